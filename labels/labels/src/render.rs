use image::{Rgb, RgbImage};
use rusttype::{point, Font, Scale};

use crate::code128;
use crate::layout::{compute_layout, LabelSpec};
use crate::LabelError;

/// Barcode payloads carry this prefix before the record number.
const BARCODE_PREFIX: &str = "P";

/// Caption gap below the barcode, as a fraction of the font size.
const CAPTION_GAP_FACTOR: f64 = 0.1;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// One part on a label.
#[derive(Debug, Clone)]
pub struct LabelEntry {
    /// Stable record number; slots are assigned in ascending id order.
    pub id: u64,
    /// Caption drawn beneath the barcode.
    pub caption: String,
}

/// Renders one storage location's label canvas.
pub fn render_label(
    spec: &LabelSpec,
    font: &Font<'_>,
    location_name: &str,
    entries: &[LabelEntry],
) -> Result<RgbImage, LabelError> {
    let layout = compute_layout(spec, entries.len())?;
    let ordered = order_entries(entries);

    let mut image = RgbImage::from_pixel(layout.width_px, layout.height_px, WHITE);

    draw_text(
        &mut image,
        font,
        spec.font_size,
        layout.margin,
        layout.header_y,
        &format!("Location: {}", location_name),
    );

    for (entry, slot) in ordered.iter().zip(&layout.slots) {
        let payload = format!("{}{}", BARCODE_PREFIX, entry.id);
        let pattern = code128::encode(&payload)?;

        let barcode_width = pattern.width_px(slot.barcode_thickness);
        if barcode_width > layout.usable_width {
            return Err(LabelError::BarcodeOverflow {
                barcode_width,
                usable_width: layout.usable_width,
            });
        }

        let barcode_x = layout.margin + (layout.usable_width - barcode_width) / 2;
        pattern.draw(&mut image, barcode_x, slot.y, slot.barcode_thickness, slot.barcode_height);

        let caption_gap = (spec.font_size as f64 * CAPTION_GAP_FACTOR).round() as u32;
        let caption_y = slot.y + slot.barcode_height + caption_gap;
        draw_text(&mut image, font, spec.font_size, barcode_x, caption_y, &entry.caption);
    }

    Ok(image)
}

/// Slots are assigned in ascending id order so reruns produce identical labels.
fn order_entries(entries: &[LabelEntry]) -> Vec<&LabelEntry> {
    let mut ordered: Vec<&LabelEntry> = entries.iter().collect();
    ordered.sort_by_key(|entry| entry.id);
    ordered
}

/// Rasterizes one line of text with its top-left corner at (x, y), blending glyph coverage
/// against whatever is already on the canvas.
fn draw_text(image: &mut RgbImage, font: &Font<'_>, font_size: u32, x: u32, y: u32, text: &str) {
    let scale = Scale::uniform(font_size as f32);
    let v_metrics = font.v_metrics(scale);
    let start = point(x as f32, y as f32 + v_metrics.ascent);

    for glyph in font.layout(text, scale, start) {
        if let Some(bounding_box) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                let px = bounding_box.min.x + gx as i32;
                let py = bounding_box.min.y + gy as i32;
                if px >= 0 && py >= 0 && (px as u32) < image.width() && (py as u32) < image.height() {
                    let shade = (255.0 * (1.0 - coverage)) as u8;
                    let pixel = image.get_pixel_mut(px as u32, py as u32);
                    let value = pixel.0[0].min(shade);
                    *pixel = Rgb([value, value, value]);
                }
            });
        }
    }
}
