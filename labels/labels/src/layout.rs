use crate::LabelError;

const MM_PER_INCH: f64 = 25.4;

/// Fraction of the larger pixel dimension reserved as a margin on every side.
const MARGIN_FRACTION: f64 = 0.02;

/// The header band and per-slot caption line are sized to 1.5 line heights.
const LINE_FACTOR: f64 = 1.5;

/// Physical label description, shared by every label in a run.
#[derive(Debug, Clone)]
pub struct LabelSpec {
    pub width_mm: u32,
    pub height_mm: u32,
    pub dpi: u32,
    /// Caption/header font size in pixels.
    pub font_size: u32,
    /// Locations with more parts than this are skipped entirely.
    pub max_parts_per_label: usize,
}

impl LabelSpec {
    pub fn width_px(&self) -> u32 {
        to_pixels(self.width_mm, self.dpi)
    }

    pub fn height_px(&self) -> u32 {
        to_pixels(self.height_mm, self.dpi)
    }
}

fn to_pixels(millimeters: u32, dpi: u32) -> u32 {
    ((millimeters as f64 / MM_PER_INCH) * dpi as f64).round() as u32
}

/// Pixel geometry for one label canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelLayout {
    pub width_px: u32,
    pub height_px: u32,
    pub margin: u32,
    pub usable_width: u32,
    /// Origin of the location-name header line.
    pub header_y: u32,
    pub slots: Vec<Slot>,
}

/// One part's region: a barcode band with a caption line beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub y: u32,
    pub height: u32,
    pub barcode_height: u32,
    pub barcode_thickness: u32,
}

/// Computes the grid for `part_count` parts on one label.
///
/// The usable area is split into a fixed-height header band and equal-height part slots; each
/// slot reserves one caption line below its barcode.
pub fn compute_layout(spec: &LabelSpec, part_count: usize) -> Result<LabelLayout, LabelError> {
    let width_px = spec.width_px();
    let height_px = spec.height_px();

    let margin = (width_px.max(height_px) as f64 * MARGIN_FRACTION).round() as u32;
    let usable_width = width_px.saturating_sub(2 * margin);
    let usable_height = height_px.saturating_sub(2 * margin);

    let line_height = (spec.font_size as f64 * LINE_FACTOR).round() as u32;

    let header_y = margin;
    let parts_band_y = margin + line_height;
    let parts_band_height = usable_height.saturating_sub(line_height);

    let slot_height = parts_band_height / part_count.max(1) as u32;
    let barcode_height = slot_height.saturating_sub(line_height);
    if barcode_height == 0 {
        return Err(LabelError::SlotTooSmall {
            slot_height,
            reserved: line_height,
        });
    }

    let barcode_thickness = (usable_width / 100).max(1);

    let slots = (0..part_count as u32)
        .map(|index| Slot {
            y: parts_band_y + slot_height * index,
            height: slot_height,
            barcode_height,
            barcode_thickness,
        })
        .collect();

    Ok(LabelLayout {
        width_px,
        height_px,
        margin,
        usable_width,
        header_y,
        slots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> LabelSpec {
        LabelSpec {
            width_mm: 100,
            height_mm: 150,
            dpi: 254,
            font_size: 24,
            max_parts_per_label: 10,
        }
    }

    #[test]
    fn physical_dimensions_convert_to_pixels() {
        // given 254 dpi makes the mm -> px conversion exact
        let spec = spec();

        // then
        assert_eq!(spec.width_px(), 1000);
        assert_eq!(spec.height_px(), 1500);
    }

    #[test]
    fn margin_follows_the_larger_dimension() {
        // when
        let layout = compute_layout(&spec(), 4).unwrap();

        // then
        assert_eq!(layout.margin, 30);
        assert_eq!(layout.usable_width, 1000 - 60);
    }

    #[test]
    fn slot_origins_increase_with_exact_spacing() {
        // given
        let part_count = 4;

        // when
        let layout = compute_layout(&spec(), part_count).unwrap();

        // then
        let slot_height = layout.slots[0].height;
        for (index, slot) in layout.slots.iter().enumerate() {
            assert_eq!(slot.height, slot_height);
            assert_eq!(slot.y, layout.slots[0].y + slot_height * index as u32);
        }
    }

    #[test]
    fn barcode_leaves_room_for_the_caption_line() {
        // given
        let spec = spec();
        let reserved = (spec.font_size as f64 * 1.5).round() as u32;

        // when
        let layout = compute_layout(&spec, 7).unwrap();

        // then
        for slot in &layout.slots {
            assert!(slot.barcode_height <= slot.height - reserved);
        }
    }

    #[test]
    fn slot_count_matches_part_count() {
        // when
        let layout = compute_layout(&spec(), 3).unwrap();

        // then
        assert_eq!(layout.slots.len(), 3);
    }

    #[test]
    fn too_many_parts_for_the_height_is_an_error() {
        // given a label that cannot fit 50 captioned barcodes
        let result = compute_layout(&spec(), 50);

        // then
        assert!(matches!(result, Err(LabelError::SlotTooSmall { .. })));
    }

    #[test]
    fn header_band_sits_above_the_first_slot() {
        // given
        let spec = spec();

        // when
        let layout = compute_layout(&spec, 2).unwrap();

        // then
        let line_height = (spec.font_size as f64 * 1.5).round() as u32;
        assert_eq!(layout.header_y, layout.margin);
        assert_eq!(layout.slots[0].y, layout.margin + line_height);
    }
}
