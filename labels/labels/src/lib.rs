//! Storage-location label rendering.
//!
//! A label is one fixed-size canvas per storage location: a header band naming the location and
//! one slot per part, each slot holding a Code 128 barcode over a caption line. Geometry is
//! computed separately from drawing so it can be tested without fonts or canvases.

pub mod code128;
pub mod document;
pub mod layout;
pub mod render;

use std::path::PathBuf;

use thiserror::Error;

pub use crate::layout::{compute_layout, LabelLayout, LabelSpec, Slot};
pub use crate::render::{render_label, LabelEntry};

#[derive(Error, Debug)]
pub enum LabelError {
    #[error("No labels to write")]
    NoPages,
    #[error("Slot too small for a barcode. slot height: {slot_height}px, reserved for caption: {reserved}px")]
    SlotTooSmall {
        slot_height: u32,
        reserved: u32,
    },
    #[error("Barcode is wider than the label. barcode: {barcode_width}px, usable: {usable_width}px")]
    BarcodeOverflow {
        barcode_width: u32,
        usable_width: u32,
    },
    #[error("Invalid barcode payload. payload: '{payload}', cause: {cause}")]
    Barcode {
        payload: String,
        #[source]
        cause: barcoders::error::Error,
    },
    #[error("Not a usable TrueType font. path: {path}")]
    Font {
        path: PathBuf,
    },
    #[error("Error accessing file. path: {path}, cause: {cause}")]
    Io {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },
    #[error("Error generating label document. cause: {cause}")]
    Pdf {
        #[source]
        cause: printpdf::Error,
    },
}

/// Loads a TrueType font for label text.
pub fn load_font(path: &std::path::Path) -> Result<rusttype::Font<'static>, LabelError> {
    let data = std::fs::read(path).map_err(|cause| LabelError::Io {
        path: path.to_path_buf(),
        cause,
    })?;

    rusttype::Font::try_from_vec(data).ok_or_else(|| LabelError::Font {
        path: path.to_path_buf(),
    })
}
