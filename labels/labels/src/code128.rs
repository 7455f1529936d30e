use barcoders::sym::code128::Code128;
use image::{Rgb, RgbImage};

use crate::LabelError;

/// Code 128 character-set B selector; the encoder requires the payload to name its initial
/// character set.
const CHARSET_B: char = '\u{0181}';

/// An encoded barcode: one entry per module, 1 = bar, 0 = space. No quiet zone.
pub struct BarcodePattern {
    modules: Vec<u8>,
}

/// Encodes a payload in character-set B (covers the printable ASCII we emit).
pub fn encode(payload: &str) -> Result<BarcodePattern, LabelError> {
    let barcode = Code128::new(format!("{}{}", CHARSET_B, payload)).map_err(|cause| LabelError::Barcode {
        payload: payload.to_string(),
        cause,
    })?;

    Ok(BarcodePattern {
        modules: barcode.encode(),
    })
}

impl BarcodePattern {
    pub fn width_px(&self, thickness: u32) -> u32 {
        self.modules.len() as u32 * thickness
    }

    /// Draws the bars with their top-left corner at (x, y). Out-of-canvas modules are clipped.
    pub fn draw(&self, image: &mut RgbImage, x: u32, y: u32, thickness: u32, height: u32) {
        const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

        for (index, module) in self.modules.iter().enumerate() {
            if *module == 0 {
                continue;
            }

            let module_x = x + index as u32 * thickness;
            for dx in 0..thickness {
                for dy in 0..height {
                    let px = module_x + dx;
                    let py = y + dy;
                    if px < image.width() && py < image.height() {
                        image.put_pixel(px, py, BLACK);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_produces_modules() {
        // when
        let pattern = encode("P42").unwrap();

        // then: a start character, three data characters, a check character and a stop pattern
        assert!(!pattern.modules.is_empty());
        // every Code 128 symbol begins with a bar
        assert_eq!(pattern.modules[0], 1);
    }

    #[test]
    fn width_scales_with_thickness() {
        // given
        let pattern = encode("P1").unwrap();

        // then
        assert_eq!(pattern.width_px(3), pattern.modules.len() as u32 * 3);
    }

    #[test]
    fn drawing_clips_to_the_canvas() {
        // given
        let pattern = encode("P7").unwrap();
        let mut image = RgbImage::from_pixel(16, 16, Rgb([255, 255, 255]));

        // when: drawn wider and taller than the canvas
        pattern.draw(&mut image, 0, 0, 2, 32);

        // then: the first module is a bar, and nothing panicked
        assert_eq!(*image.get_pixel(0, 0), Rgb([0, 0, 0]));
    }
}
