use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::{DynamicImage, RgbImage};
use printpdf::{Image, ImageTransform, Mm, PdfDocument};
use tracing::debug;

use crate::LabelError;

const MM_PER_INCH: f32 = 25.4;

fn px_to_mm(pixels: u32, dpi: u32) -> Mm {
    Mm(pixels as f32 / dpi as f32 * MM_PER_INCH)
}

/// Writes one page per label canvas into a single PDF at the given resolution.
///
/// An empty page list is an error; a run that filtered away every location must not leave a
/// degenerate document behind.
pub fn write_pdf(path: &Path, pages: &[RgbImage], dpi: u32) -> Result<(), LabelError> {
    let Some(first) = pages.first() else {
        return Err(LabelError::NoPages);
    };

    let (document, first_page, first_layer) = PdfDocument::new(
        "Storage location labels",
        px_to_mm(first.width(), dpi),
        px_to_mm(first.height(), dpi),
        "labels",
    );

    for (index, page) in pages.iter().enumerate() {
        debug!("Adding page {}/{}", index + 1, pages.len());

        let layer = if index == 0 {
            document.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = document.add_page(
                px_to_mm(page.width(), dpi),
                px_to_mm(page.height(), dpi),
                "labels",
            );
            document.get_page(page_index).get_layer(layer_index)
        };

        let image = Image::from_dynamic_image(&DynamicImage::ImageRgb8(page.clone()));
        image.add_to_layer(layer, ImageTransform {
            dpi: Some(dpi as f32),
            ..ImageTransform::default()
        });
    }

    let file = File::create(path).map_err(|cause| LabelError::Io {
        path: path.to_path_buf(),
        cause,
    })?;

    document
        .save(&mut BufWriter::new(file))
        .map_err(|cause| LabelError::Pdf {
            cause,
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use image::Rgb;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn no_pages_is_an_error_not_an_empty_file() {
        // given
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("labels.pdf");

        // when
        let result = write_pdf(&path, &[], 300);

        // then
        assert!(matches!(result, Err(LabelError::NoPages)));
        assert!(!path.exists());
    }

    #[test]
    fn pages_are_written_as_a_pdf() {
        // given
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("labels.pdf");
        let page = RgbImage::from_pixel(40, 20, Rgb([255, 255, 255]));

        // when
        write_pdf(&path, &[page.clone(), page], 300).unwrap();

        // then
        let content = std::fs::read(&path).unwrap();
        assert!(content.starts_with(b"%PDF"));
    }
}
