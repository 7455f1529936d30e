use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(Parser, Debug)]
#[command(name = "stockroom_cli")]
#[command(bin_name = "stockroom_cli")]
#[command(version, about, long_about = None)]
pub(crate) struct Opts {
    #[command(subcommand)]
    pub(crate) command: ActionCommand,

    /// Configuration file with API endpoints and credentials
    #[arg(long, global = true, default_value = "stockroom.json", value_name = "FILE")]
    pub(crate) config: PathBuf,

    /// Trace log file
    #[arg(long, global = true, num_args = 0..=1, default_missing_value = "trace.log")]
    pub(crate) trace: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) verbose: Verbosity<InfoLevel>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum ActionCommand {
    /// Synchronize part data from the distributor catalogs
    SyncDistributors {
        /// Single part id
        #[arg(long)]
        id: Option<u64>,

        /// Offset into the parts list (how many parts to skip)
        #[arg(long, short = 'o')]
        offset: Option<usize>,
    },

    /// List parts without any manufacturer link
    ListEmptyPartMf,

    /// Assign storage locations to parts from a CSV file
    UpdateLocationsFromCsv {
        /// CSV file to import
        #[arg(long, value_name = "FILE")]
        csv_file: PathBuf,

        /// Header of the column holding the part name
        #[arg(long, value_name = "COLUMN")]
        name_column: String,

        /// Header of the column holding the storage location name
        #[arg(long, value_name = "COLUMN")]
        location_column: String,

        /// Storage location for rows with an empty location cell
        #[arg(long, value_name = "NAME")]
        default_location: String,

        /// Overwrite locations that are already assigned
        #[arg(long, short = 'f')]
        force: bool,

        /// Single part id
        #[arg(long)]
        id: Option<u64>,
    },

    /// Render storage location barcode labels into a PDF
    GenerateLabels {
        /// Label width in millimeters
        #[arg(long)]
        label_width: u32,

        /// Label height in millimeters
        #[arg(long)]
        label_height: u32,

        /// Label resolution in DPI
        #[arg(long)]
        label_dpi: u32,

        /// Font size in pixels
        #[arg(long)]
        font_size: u32,

        /// Skip locations holding more parts than this
        #[arg(long)]
        max_parts_per_label: usize,

        /// Output PDF file
        #[arg(long, value_name = "FILE")]
        label_file: PathBuf,

        /// TrueType font for label text
        #[arg(long, value_name = "FILE", default_value = "LiberationSans-Regular.ttf")]
        font_file: PathBuf,

        /// Only render this storage location
        #[arg(long, value_name = "NAME")]
        location: Option<String>,
    },

    /// Rename parts from their parameter values, per category
    RenameFromParams {
        /// Single part id
        #[arg(long)]
        id: Option<u64>,
    },
}
