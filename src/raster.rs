use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color. Serialized as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// A color plus the alpha it is composited with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Rgb,
    pub alpha: f64,
}

impl Paint {
    pub fn new(color: Rgb, alpha: f64) -> Self {
        Self { color, alpha }
    }
}

/// 2-D drawing surface with source-over compositing.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: Paint);
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, paint: Paint);
    fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, paint: Paint);
}

/// In-memory pixel buffer. Pixels persist between frames until painted over.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    background: Rgb,
    pixels: Vec<[f32; 3]>,
}

impl Raster {
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        Self {
            width,
            height,
            background,
            pixels: vec![channels(background); width * height],
        }
    }

    /// Change dimensions. The buffer is reallocated and cleared to the
    /// background color.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![channels(self.background); width * height];
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b] = self.pixels[y * self.width + x];
        Some(Rgb(to_u8(r), to_u8(g), to_u8(b)))
    }

    /// Pixels whose color differs from the background by more than
    /// `threshold` on any channel, row-major.
    pub fn lit_pixels(&self, threshold: u8) -> impl Iterator<Item = (usize, usize, Rgb)> + '_ {
        let bg = self.background;
        (0..self.height).flat_map(move |y| {
            (0..self.width).filter_map(move |x| {
                let color = self.pixel(x, y)?;
                let differs = color.0.abs_diff(bg.0) > threshold
                    || color.1.abs_diff(bg.1) > threshold
                    || color.2.abs_diff(bg.2) > threshold;
                differs.then_some((x, y, color))
            })
        })
    }

    fn blend(&mut self, x: usize, y: usize, paint: Paint) {
        if x >= self.width || y >= self.height {
            return;
        }
        let alpha = paint.alpha.clamp(0.0, 1.0) as f32;
        if alpha == 0.0 {
            return;
        }
        let src = channels(paint.color);
        let dst = &mut self.pixels[y * self.width + x];
        for c in 0..3 {
            dst[c] = src[c] * alpha + dst[c] * (1.0 - alpha);
        }
    }

    /// Integer pixel span covering `[lo, hi)` clipped to `[0, limit)`.
    fn span(lo: f64, hi: f64, limit: usize) -> std::ops::Range<usize> {
        let start = lo.max(0.0).floor() as usize;
        let end = (hi.ceil().max(0.0) as usize).min(limit);
        start.min(end)..end
    }
}

impl Surface for Raster {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: Paint) {
        for py in Self::span(y, y + h, self.height) {
            for px in Self::span(x, x + w, self.width) {
                self.blend(px, py, paint);
            }
        }
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, paint: Paint) {
        let r2 = radius * radius;
        let mut covered = false;
        for py in Self::span(cy - radius, cy + radius, self.height) {
            for px in Self::span(cx - radius, cx + radius, self.width) {
                let dx = px as f64 + 0.5 - cx;
                let dy = py as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend(px, py, paint);
                    covered = true;
                }
            }
        }
        // Sub-pixel discs still light the pixel they sit in.
        if !covered && cx >= 0.0 && cy >= 0.0 {
            self.blend(cx as usize, cy as usize, paint);
        }
    }

    fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, paint: Paint) {
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
        let mut last = None;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            if x < 0.0 || y < 0.0 {
                continue;
            }
            let cell = (x as usize, y as usize);
            if last == Some(cell) {
                continue;
            }
            last = Some(cell);
            self.blend(cell.0, cell.1, paint);
        }
    }
}

fn channels(color: Rgb) -> [f32; 3] {
    [color.0 as f32, color.1 as f32, color.2 as f32]
}

fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb = Rgb(0, 0, 0);
    const WHITE: Rgb = Rgb(255, 255, 255);

    #[test]
    fn test_new_raster_is_background() {
        let raster = Raster::new(4, 3, Rgb(10, 20, 30));
        assert_eq!(raster.pixel(3, 2), Some(Rgb(10, 20, 30)));
        assert_eq!(raster.pixel(4, 0), None);
        assert_eq!(raster.lit_pixels(0).count(), 0);
    }

    #[test]
    fn test_fade_moves_toward_fill_color() {
        let mut raster = Raster::new(2, 2, BLACK);
        raster.fill_rect(0.0, 0.0, 2.0, 2.0, Paint::new(WHITE, 1.0));
        raster.fill_rect(0.0, 0.0, 2.0, 2.0, Paint::new(BLACK, 0.25));
        // 255 * 0.75
        assert_eq!(raster.pixel(1, 1), Some(Rgb(191, 191, 191)));
    }

    #[test]
    fn test_drawing_is_clipped() {
        let mut raster = Raster::new(3, 3, BLACK);
        raster.fill_rect(-5.0, -5.0, 100.0, 1.0, Paint::new(WHITE, 1.0));
        raster.fill_circle(-10.0, -10.0, 2.0, Paint::new(WHITE, 1.0));
        raster.stroke_line(-4.0, 1.5, 10.0, 1.5, Paint::new(WHITE, 1.0));
        assert_eq!(raster.lit_pixels(0).count(), 3);
        assert!(raster.lit_pixels(0).all(|(_, y, _)| y == 1));
    }

    #[test]
    fn test_small_disc_lights_its_pixel() {
        let mut raster = Raster::new(5, 5, BLACK);
        raster.fill_circle(2.2, 3.9, 0.3, Paint::new(WHITE, 0.5));
        let lit: Vec<_> = raster.lit_pixels(0).collect();
        assert_eq!(lit, vec![(2, 3, Rgb(128, 128, 128))]);
    }

    #[test]
    fn test_line_visits_each_pixel_once() {
        let mut raster = Raster::new(10, 10, BLACK);
        raster.stroke_line(0.5, 0.5, 9.5, 0.5, Paint::new(WHITE, 0.5));
        // A double visit would compound to 191.
        assert!(raster.lit_pixels(0).all(|(_, _, c)| c == Rgb(128, 128, 128)));
        assert_eq!(raster.lit_pixels(0).count(), 10);
    }

    #[test]
    fn test_resize_clears() {
        let mut raster = Raster::new(2, 2, BLACK);
        raster.fill_rect(0.0, 0.0, 2.0, 2.0, Paint::new(WHITE, 1.0));
        raster.resize(3, 1);
        assert_eq!(raster.dimensions(), (3, 1));
        assert_eq!(raster.lit_pixels(0).count(), 0);
        raster.resize(0, 1);
        assert!(raster.is_empty());
    }
}
