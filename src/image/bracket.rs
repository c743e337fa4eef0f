use crate::image::utils::ExtraImageUtils;
use crate::layout::{BoxRole, BracketGeometry, Connector};
use image::{Rgba, RgbaImage};
use itertools::Itertools;

pub const BACKGROUND_COLOR: Rgba<u8> = Rgba([72, 72, 72, 255]);
pub const BOX_COLOR: Rgba<u8> = Rgba([30, 126, 133, 255]);
pub const CHAMPION_COLOR: Rgba<u8> = Rgba([161, 135, 0, 255]);
pub const LINE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

pub const LINE_WIDTH: u32 = 5;
pub const CORNER_RADIUS: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub background: Rgba<u8>,
    pub boxes: Rgba<u8>,
    pub champion: Rgba<u8>,
    pub lines: Rgba<u8>,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: BACKGROUND_COLOR,
            boxes: BOX_COLOR,
            champion: CHAMPION_COLOR,
            lines: LINE_COLOR,
        }
    }
}

/// Rasterizes a computed bracket geometry: connector lines first, then the
/// rounded boxes on top so line ends disappear under the box edges.
///
/// Glyphs are not drawn here; the display strings stay available on the
/// geometry's box specs for backends that do text.
pub fn render(geometry: &BracketGeometry, scheme: &ColorScheme) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(geometry.width, geometry.height, scheme.background);

    for connector in &geometry.connectors {
        draw_polyline(&mut image, connector, scheme.lines);
    }

    for spec in geometry.rounds.iter().flatten() {
        let fill = match spec.role {
            BoxRole::Normal => scheme.boxes,
            BoxRole::Champion => scheme.champion,
        };
        image.fill_rounded_rect(spec.x, spec.y, spec.width, spec.height, CORNER_RADIUS, fill);
    }

    image
}

// Connector segments are always axis-aligned.
fn draw_polyline(image: &mut RgbaImage, connector: &Connector, color: Rgba<u8>) {
    for (&(x0, y0), &(x1, y1)) in connector.points.iter().tuple_windows() {
        if y0 == y1 {
            image.draw_hline(x0, x1, y0, LINE_WIDTH, color);
        } else {
            image.draw_vline(y0, y1, x0, LINE_WIDTH, color);
        }
    }
}
