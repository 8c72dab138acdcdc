use crate::raster::{Raster, Rgb};
use ratatui::{
    Frame,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::canvas::{Canvas, Points},
};
use std::collections::BTreeMap;

/// Pixels dimmer than this (per channel, above the background) are not drawn.
const LIT_THRESHOLD: u8 = 6;

/// Colors are bucketed to this step so each frame draws a handful of
/// point sets rather than one per pixel.
const COLOR_STEP: u8 = 24;

/// Paint the particle raster as braille dots behind everything else.
pub fn render(raster: &Raster, frame: &mut Frame, area: Rect) {
    let (width, height) = raster.dimensions();
    if raster.is_empty() {
        return;
    }

    let groups = lit_groups(raster);
    let background = to_color(raster.background());

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(background)
        .x_bounds([0.0, width.saturating_sub(1) as f64])
        .y_bounds([0.0, height.saturating_sub(1) as f64])
        .paint(move |ctx| {
            for (color, coords) in &groups {
                ctx.draw(&Points {
                    coords: coords.as_slice(),
                    color: to_color(*color),
                });
            }
        });
    frame.render_widget(canvas, area);
}

/// Lit pixels grouped by quantized color, in canvas coordinates (y up).
fn lit_groups(raster: &Raster) -> BTreeMap<Rgb, Vec<(f64, f64)>> {
    let (_, height) = raster.dimensions();
    let mut groups: BTreeMap<Rgb, Vec<(f64, f64)>> = BTreeMap::new();
    for (x, y, color) in raster.lit_pixels(LIT_THRESHOLD) {
        groups
            .entry(quantize(color))
            .or_default()
            .push((x as f64, (height - 1 - y) as f64));
    }
    groups
}

fn quantize(Rgb(r, g, b): Rgb) -> Rgb {
    let q = |c: u8| c - c % COLOR_STEP;
    Rgb(q(r), q(g), q(b))
}

fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{Paint, Surface};

    #[test]
    fn test_lit_groups_flip_y() {
        let mut raster = Raster::new(4, 4, Rgb(0, 0, 0));
        raster.fill_rect(0.0, 0.0, 1.0, 1.0, Paint::new(Rgb(200, 200, 200), 1.0));

        let groups = lit_groups(&raster);
        let points: Vec<_> = groups.values().flatten().copied().collect();
        assert_eq!(points, vec![(0.0, 3.0)]);
    }

    #[test]
    fn test_quantize_buckets_similar_colors() {
        assert_eq!(quantize(Rgb(150, 151, 167)), quantize(Rgb(145, 144, 160)));
        assert_eq!(quantize(Rgb(23, 0, 255)), Rgb(0, 0, 240));
    }
}
