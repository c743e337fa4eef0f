use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

pub trait ExtraImageUtils {
    fn fill_rounded_rect(&mut self, x: u32, y: u32, width: u32, height: u32, radius: u32, color: Rgba<u8>);
    fn draw_hline(&mut self, x0: u32, x1: u32, y: u32, thickness: u32, color: Rgba<u8>);
    fn draw_vline(&mut self, y0: u32, y1: u32, x: u32, thickness: u32, color: Rgba<u8>);
}

impl ExtraImageUtils for RgbaImage {
    /// Fills a rectangle with rounded corners: two overlapping rects for the
    /// body plus a filled circle in each corner.
    fn fill_rounded_rect(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        radius: u32,
        color: Rgba<u8>,
    ) {
        let radius = radius.min(width / 2).min(height / 2);
        if radius == 0 {
            draw_filled_rect_mut(
                self,
                Rect::at(x as i32, y as i32).of_size(width, height),
                color,
            );
            return;
        }

        draw_filled_rect_mut(
            self,
            Rect::at((x + radius) as i32, y as i32).of_size(width - 2 * radius, height),
            color,
        );
        draw_filled_rect_mut(
            self,
            Rect::at(x as i32, (y + radius) as i32).of_size(width, height - 2 * radius),
            color,
        );

        let r = radius as i32;
        let corners = [
            (x as i32 + r, y as i32 + r),
            ((x + width) as i32 - r - 1, y as i32 + r),
            (x as i32 + r, (y + height) as i32 - r - 1),
            ((x + width) as i32 - r - 1, (y + height) as i32 - r - 1),
        ];
        for center in corners {
            draw_filled_circle_mut(self, center, r, color);
        }
    }

    /// A horizontal segment of the given thickness, centered on `y`.
    fn draw_hline(&mut self, x0: u32, x1: u32, y: u32, thickness: u32, color: Rgba<u8>) {
        let (start, end) = (x0.min(x1), x0.max(x1));
        draw_filled_rect_mut(
            self,
            Rect::at(start as i32, y.saturating_sub(thickness / 2) as i32)
                .of_size(end - start + 1, thickness),
            color,
        );
    }

    /// A vertical segment of the given thickness, centered on `x`.
    fn draw_vline(&mut self, y0: u32, y1: u32, x: u32, thickness: u32, color: Rgba<u8>) {
        let (start, end) = (y0.min(y1), y0.max(y1));
        draw_filled_rect_mut(
            self,
            Rect::at(x.saturating_sub(thickness / 2) as i32, start as i32)
                .of_size(thickness, end - start + 1),
            color,
        );
    }
}
