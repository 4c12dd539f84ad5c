//! Heart confetti particle system
//!
//! Frame-stepped (not dt-scaled) so a burst looks the same on every display:
//! velocities are px/frame and lifetimes are frame counts.

use glam::Vec2;
use rand::Rng;

use super::burst::BurstSpec;
use crate::placement::Size;

/// Maximum live particles
pub const MAX_PARTICLES: usize = 600;

/// Velocity decay per frame
const DECAY: f32 = 0.9;
/// Gravity units to px/frame
const GRAVITY_SCALE: f32 = 3.0;
/// Base heart size in px before the burst scalar
const BASE_SIZE: f32 = 10.0;

/// A single heart
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Index into `ConfettiField::palette`
    pub color: usize,
    pub size: f32,
    pub gravity: f32,
    /// Slow rotation for a fluttering look (radians)
    pub tilt: f32,
    pub spin: f32,
    pub age: u32,
    pub ticks: u32,
}

impl Particle {
    /// 1.0 when fresh, 0.0 when expired
    pub fn opacity(&self) -> f32 {
        if self.ticks == 0 {
            return 0.0;
        }
        (1.0 - self.age as f32 / self.ticks as f32).clamp(0.0, 1.0)
    }

    pub fn is_alive(&self) -> bool {
        self.age < self.ticks
    }
}

/// Every live confetti particle plus the colours they reference
#[derive(Debug, Default)]
pub struct ConfettiField {
    pub particles: Vec<Particle>,
    pub palette: Vec<String>,
}

impl ConfettiField {
    pub fn new() -> Self {
        Self::default()
    }

    fn palette_index(&mut self, color: &str) -> usize {
        if let Some(i) = self.palette.iter().position(|c| c == color) {
            return i;
        }
        self.palette.push(color.to_string());
        self.palette.len() - 1
    }

    /// Spawn one burst in viewport pixel space
    pub fn emit<R: Rng + ?Sized>(&mut self, rng: &mut R, spec: &BurstSpec, viewport: Size) {
        let origin = Vec2::new(spec.origin.x * viewport.width, spec.origin.y * viewport.height);
        let colors: Vec<usize> = spec.colors.iter().map(|c| self.palette_index(c)).collect();
        let spread = spec.spread.to_radians();
        // Screen space is y-down, so "up" is -PI/2
        let aim = -std::f32::consts::FRAC_PI_2;

        for _ in 0..spec.particle_count {
            if self.particles.len() >= MAX_PARTICLES {
                // Remove oldest particles to make room
                self.particles.remove(0);
            }
            let angle = aim + (0.5 * spread - rng.random::<f32>() * spread);
            let speed = spec.start_velocity * (0.5 + rng.random::<f32>() * 0.5);
            let color = if colors.is_empty() {
                0
            } else {
                colors[rng.random_range(0..colors.len())]
            };
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                color,
                size: BASE_SIZE * spec.scalar * (0.8 + rng.random::<f32>() * 0.4),
                gravity: spec.gravity,
                tilt: rng.random_range(-0.4..0.4),
                spin: rng.random_range(-0.05..0.05),
                age: 0,
                ticks: spec.ticks,
            });
        }
    }

    /// Advance every particle by one frame and retire expired ones
    pub fn step(&mut self) {
        for p in self.particles.iter_mut() {
            p.pos += p.vel;
            p.pos.y += p.gravity * GRAVITY_SCALE;
            p.vel *= DECAY;
            p.tilt += p.spin;
            p.age += 1;
        }
        self.particles.retain(|p| p.is_alive());
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }
}

/// Canvas backing-store size for a viewport in CSS pixels, plus the scale
/// that maps CSS pixels onto it. Unusable ratios fall back to 1.
pub fn backing_store(viewport: Size, device_pixel_ratio: f64) -> (u32, u32, f64) {
    let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    let px = |css: f32| (css.max(0.0) as f64 * ratio).round() as u32;
    (px(viewport.width), px(viewport.height), ratio)
}
