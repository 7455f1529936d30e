use anyhow::Context;
use batch::generate_labels::{generate_labels, GenerateLabelsOptions};
use batch::locations::{update_locations_from_csv, ImportLocationsOptions};
use batch::rename::{rename_from_parameters, RenameOptions};
use batch::report::list_parts_without_manufacturers;
use batch::sync::{sync_distributors, SyncOptions};
use catalog::mouser::MouserCatalog;
use catalog::tme::TmeCatalog;
use catalog::PartCatalog;
use clap::Parser;
use cli::prompt::StdinConfirm;
use inventory::client::HttpInventoryClient;
use labels::LabelSpec;

use crate::config::Config;
use crate::opts::{ActionCommand, Opts};

mod config;
mod opts;

fn main() -> anyhow::Result<()> {
    let args = argfile::expand_args(argfile::parse_fromfile, argfile::PREFIX)?;

    let opts = Opts::parse_from(args);

    cli::tracing::configure_tracing(opts.trace.clone(), opts.verbose.clone())?;

    let config = Config::load(&opts.config)?;

    let api = HttpInventoryClient::new(
        &config.inventory.base_url,
        &config.inventory.username,
        &config.inventory.password,
    );

    match opts.command {
        ActionCommand::SyncDistributors {
            id,
            offset,
        } => {
            let tme = config
                .tme
                .context("Missing 'tme' section in configuration")?;
            let mouser = config
                .mouser
                .context("Missing 'mouser' section in configuration")?;

            let catalogs: Vec<Box<dyn PartCatalog>> = vec![
                Box::new(TmeCatalog::new(tme.token)),
                Box::new(MouserCatalog::new(mouser.api_key)),
            ];

            let outcome = sync_distributors(&api, &catalogs, &SyncOptions {
                id,
                offset,
            })?;

            if !outcome.failures.is_empty() {
                println!("Parts with errors:");
                for name in &outcome.failures {
                    println!("{}", name);
                }
            }
        }
        ActionCommand::ListEmptyPartMf => {
            let names = list_parts_without_manufacturers(&api)?;

            println!("Parts without part manufacturers:");
            for name in names {
                println!("{}", name);
            }
        }
        ActionCommand::UpdateLocationsFromCsv {
            csv_file,
            name_column,
            location_column,
            default_location,
            force,
            id,
        } => {
            update_locations_from_csv(&api, &ImportLocationsOptions {
                csv_file,
                name_column,
                location_column,
                default_location,
                force,
                id,
            })?;
        }
        ActionCommand::GenerateLabels {
            label_width,
            label_height,
            label_dpi,
            font_size,
            max_parts_per_label,
            label_file,
            font_file,
            location,
        } => {
            let skipped = generate_labels(&api, &GenerateLabelsOptions {
                spec: LabelSpec {
                    width_mm: label_width,
                    height_mm: label_height,
                    dpi: label_dpi,
                    font_size,
                    max_parts_per_label,
                },
                location,
                font_file,
                output: label_file,
            })?;

            if !skipped.is_empty() {
                println!("Skipped storage locations:");
                for location in skipped {
                    println!("{} ({} parts)", location.name, location.part_count);
                }
            }
        }
        ActionCommand::RenameFromParams {
            id,
        } => {
            let mut confirm = StdinConfirm;

            rename_from_parameters(&api, &mut confirm, &RenameOptions {
                id,
            })?;
        }
    }

    Ok(())
}
