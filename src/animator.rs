use crate::particles::{ParticleConfig, ParticleField};
use crate::raster::Raster;
use rand::Rng;
use std::time::{Duration, Instant};

/// Braille dots per terminal cell, horizontally and vertically.
pub const DOTS_PER_CELL: (u16, u16) = (2, 4);

/// Schedules frames at a fixed interval. Overrun frames are dropped, never
/// queued; a stopped clock never fires again.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    next_due: Option<Instant>,
}

impl FrameClock {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: Some(now),
        }
    }

    /// Consume the pending frame if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let next = due + self.interval;
        self.next_due = Some(if next <= now { now + self.interval } else { next });
        true
    }

    /// Time left until the next frame, or `None` once stopped.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }
}

/// Drives the particle field onto a raster at the frame clock's cadence.
#[derive(Debug, Clone)]
pub struct Animator {
    field: ParticleField,
    raster: Raster,
    clock: FrameClock,
    frames: u64,
}

impl Animator {
    /// Start animating over a surface of `cols x rows` terminal cells.
    pub fn start<R: Rng>(
        cols: u16,
        rows: u16,
        config: ParticleConfig,
        interval: Duration,
        rng: &mut R,
        now: Instant,
    ) -> Self {
        let (w, h) = surface_size(cols, rows);
        let raster = Raster::new(w, h, config.background_color);
        let field = ParticleField::start(w as f64, h as f64, config, rng);
        Self {
            field,
            raster,
            clock: FrameClock::new(interval, now),
            frames: 0,
        }
    }

    /// Takes effect on the next frame. Particle state is preserved.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let (w, h) = surface_size(cols, rows);
        self.raster.resize(w, h);
        self.field.resize(w as f64, h as f64);
    }

    /// Run one frame if one is due. Returns whether a frame was painted.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.clock.take_due(now) {
            return false;
        }
        if self.raster.is_empty() {
            return false;
        }
        self.field.frame(&mut self.raster);
        self.frames += 1;
        true
    }

    pub fn until_next_frame(&self, now: Instant) -> Option<Duration> {
        self.clock.until_next(now)
    }

    pub fn stop(&mut self) {
        self.clock.stop();
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

fn surface_size(cols: u16, rows: u16) -> (usize, usize) {
    (
        cols as usize * DOTS_PER_CELL.0 as usize,
        rows as usize * DOTS_PER_CELL.1 as usize,
    )
}
