use image::{imageops::FilterType, ImageError, RgbImage};

pub const PREVIEW_WIDTH: u32 = 512;
pub const PREVIEW_HEIGHT: u32 = 288;

/// Splash art decoded and scaled to the fixed presentation size.
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pixels: RgbImage,
}

impl PreviewImage {
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageError> {
        let image = image::load_from_memory(bytes)?;
        let pixels = image
            .resize_exact(PREVIEW_WIDTH, PREVIEW_HEIGHT, FilterType::Triangle)
            .to_rgb8();
        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn rgb(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let [r, g, b] = self.pixels.get_pixel(x.min(self.width() - 1), y.min(self.height() - 1)).0;
        (r, g, b)
    }
}

#[cfg(test)]
pub(crate) fn encode_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    use std::io::Cursor;

    let image = RgbImage::from_pixel(width, height, image::Rgb(color));
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, image::ImageOutputFormat::Png)
        .unwrap();
    bytes.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoded_image_is_scaled_to_preview_size() {
        let png = encode_png(1215, 717, [200, 150, 0]);
        let preview = PreviewImage::decode(&png).unwrap();

        assert_eq!(preview.width(), PREVIEW_WIDTH);
        assert_eq!(preview.height(), PREVIEW_HEIGHT);
        assert_eq!(preview.rgb(10, 10), (200, 150, 0));
    }

    #[test]
    fn out_of_range_coordinates_are_clamped() {
        let preview = PreviewImage::decode(&encode_png(4, 4, [1, 2, 3])).unwrap();
        assert_eq!(preview.rgb(10_000, 10_000), (1, 2, 3));
    }

    #[test]
    fn garbage_does_not_decode() {
        assert!(PreviewImage::decode(b"definitely not an image").is_err());
    }
}
