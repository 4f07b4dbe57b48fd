use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::service::preview::PreviewImage;

/// Draws an image with one `▀` per cell: foreground is the upper pixel, background the lower one.
pub struct HalfBlockImage<'a> {
    image: &'a PreviewImage,
}

impl<'a> HalfBlockImage<'a> {
    pub fn new(image: &'a PreviewImage) -> Self {
        Self { image }
    }
}

/// Largest 16:9 rectangle centered in `area`, counting two pixel rows per terminal row.
pub fn fit_16_9(area: Rect) -> Rect {
    let rows = area.height.min((u32::from(area.width) * 9 / 32) as u16);
    let cols = (u32::from(rows) * 32 / 9) as u16;

    Rect {
        x: area.x + (area.width - cols) / 2,
        y: area.y + (area.height - rows) / 2,
        width: cols,
        height: rows,
    }
}

impl<'a> Widget for HalfBlockImage<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let target = fit_16_9(area);
        if target.width == 0 || target.height == 0 {
            return;
        }

        let (img_w, img_h) = (self.image.width(), self.image.height());
        let pixel_rows = u32::from(target.height) * 2;
        let sample = |col: u16, pixel_row: u32| {
            let x = u32::from(col) * img_w / u32::from(target.width);
            let y = pixel_row * img_h / pixel_rows;
            let (r, g, b) = self.image.rgb(x, y);
            Color::Rgb(r, g, b)
        };

        for row in 0..target.height {
            for col in 0..target.width {
                let top = sample(col, u32::from(row) * 2);
                let bottom = sample(col, u32::from(row) * 2 + 1);
                buf.get_mut(target.x + col, target.y + row)
                    .set_symbol("▀")
                    .set_fg(top)
                    .set_bg(bottom);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::preview::encode_png;

    #[test]
    fn fit_keeps_aspect_and_centers() {
        let fitted = fit_16_9(Rect::new(0, 0, 100, 10));
        assert_eq!(fitted, Rect::new(32, 0, 35, 10));

        let fitted = fit_16_9(Rect::new(2, 3, 32, 40));
        assert_eq!(fitted, Rect::new(2, 18, 32, 9));
    }

    #[test]
    fn tiny_area_renders_nothing() {
        let image = PreviewImage::decode(&encode_png(16, 9, [1, 2, 3])).unwrap();
        let area = Rect::new(0, 0, 3, 3);
        let mut buf = Buffer::empty(area);

        HalfBlockImage::new(&image).render(area, &mut buf);

        assert_eq!(buf.get(0, 0).symbol(), " ");
    }

    #[test]
    fn cells_carry_image_colors() {
        let image = PreviewImage::decode(&encode_png(16, 9, [40, 80, 120])).unwrap();
        let area = Rect::new(0, 0, 32, 9);
        let mut buf = Buffer::empty(area);

        HalfBlockImage::new(&image).render(area, &mut buf);

        let cell = buf.get(10, 4);
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(40, 80, 120));
        assert_eq!(cell.bg, Color::Rgb(40, 80, 120));
    }
}
