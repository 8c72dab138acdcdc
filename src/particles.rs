use crate::error::ConfigError;
use crate::raster::{Paint, Rgb, Surface};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Tunables for the background particle field.
///
/// Distances and speeds are in surface pixels; on a terminal that means
/// braille dots (two per column, four per row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// Full width of the per-axis velocity interval, centred on zero.
    pub speed_range: f64,
    pub radius_range: (f64, f64),
    pub opacity_range: (f64, f64),
    pub link_distance: f64,
    pub link_opacity_scale: f64,
    /// Alpha of the background wash painted at the start of every frame.
    pub background_fade: f64,
    pub particle_color: Rgb,
    pub background_color: Rgb,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 60,
            speed_range: 0.6,
            radius_range: (0.4, 1.4),
            opacity_range: (0.35, 0.8),
            link_distance: 24.0,
            link_opacity_scale: 0.35,
            background_fade: 0.12,
            particle_color: Rgb(150, 150, 150),
            background_color: Rgb(16, 16, 22),
        }
    }
}

impl ParticleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, (min, max)) in [
            ("radius_range", self.radius_range),
            ("opacity_range", self.opacity_range),
        ] {
            if min > max {
                return Err(ConfigError::InvertedRange { field, min, max });
            }
            if min < 0.0 {
                return Err(ConfigError::Negative { field, value: min });
            }
        }
        for (field, value) in [
            ("speed_range", self.speed_range),
            ("link_distance", self.link_distance),
            ("link_opacity_scale", self.link_opacity_scale),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        for (field, value) in [
            ("background_fade", self.background_fade),
            ("opacity_range", self.opacity_range.1),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::NotAFraction { field, value });
            }
        }
        Ok(())
    }
}

/// A moving point. Velocity is fixed for the particle's lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    /// A particle placed uniformly within `width x height`.
    pub fn spawn<R: Rng>(rng: &mut R, width: f64, height: f64, config: &ParticleConfig) -> Self {
        let half_speed = config.speed_range / 2.0;
        Self {
            x: uniform(rng, 0.0, width),
            y: uniform(rng, 0.0, height),
            vx: uniform(rng, -half_speed, half_speed),
            vy: uniform(rng, -half_speed, half_speed),
            radius: uniform(rng, config.radius_range.0, config.radius_range.1),
            opacity: uniform(rng, config.opacity_range.0, config.opacity_range.1),
        }
    }
}

/// Half-open uniform sample; collapses to `lo` for an empty interval.
fn uniform<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

/// Toroidal wrap into `[0, bound)`.
pub fn wrap(value: f64, bound: f64) -> f64 {
    if bound <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(bound);
    // rem_euclid rounds tiny negatives up to `bound` itself.
    if wrapped >= bound { 0.0 } else { wrapped }
}

/// Move a particle one step and wrap it back onto the surface.
pub fn advance(p: Particle, width: f64, height: f64) -> Particle {
    Particle {
        x: wrap(p.x + p.vx, width),
        y: wrap(p.y + p.vy, height),
        ..p
    }
}

pub fn draw(p: &Particle, surface: &mut impl Surface, color: Rgb) {
    surface.fill_circle(p.x, p.y, p.radius, Paint::new(color, p.opacity));
}

/// Opacity of the line joining two particles `distance` apart, or `None`
/// when they are too far apart to be linked.
pub fn link_opacity(distance: f64, config: &ParticleConfig) -> Option<f64> {
    (distance < config.link_distance)
        .then(|| config.link_opacity_scale * (1.0 - distance / config.link_distance))
}

/// A connection between particles `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub opacity: f64,
}

/// The animated set of particles and the bounds they wrap within.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    config: ParticleConfig,
}

impl ParticleField {
    pub fn start<R: Rng>(width: f64, height: f64, config: ParticleConfig, rng: &mut R) -> Self {
        let particles = (0..config.count)
            .map(|_| Particle::spawn(rng, width, height, &config))
            .collect();
        Self {
            particles,
            width,
            height,
            config,
        }
    }

    /// New bounds apply from the next step; particles are not moved.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn step(&mut self) {
        let (w, h) = (self.width, self.height);
        for p in &mut self.particles {
            *p = advance(*p, w, h);
        }
    }

    /// Every pair closer than the link distance. O(n^2) in particle count.
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for (a, p) in self.particles.iter().enumerate() {
            for (b, q) in self.particles.iter().enumerate().skip(a + 1) {
                let distance = (p.x - q.x).hypot(p.y - q.y);
                if let Some(opacity) = link_opacity(distance, &self.config) {
                    links.push(Link {
                        a,
                        b,
                        distance,
                        opacity,
                    });
                }
            }
        }
        links
    }

    /// Fade, move, draw discs, draw links.
    pub fn frame(&mut self, surface: &mut impl Surface) {
        let (sw, sh) = (surface.width(), surface.height());
        surface.fill_rect(
            0.0,
            0.0,
            sw,
            sh,
            Paint::new(self.config.background_color, self.config.background_fade),
        );

        self.step();

        let color = self.config.particle_color;
        for p in &self.particles {
            draw(p, surface, color);
        }
        for link in self.links() {
            let (p, q) = (&self.particles[link.a], &self.particles[link.b]);
            surface.stroke_line(p.x, p.y, q.x, q.y, Paint::new(color, link.opacity));
        }
    }
}
