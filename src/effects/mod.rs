//! Cosmetic effects
//!
//! Nothing in here feeds back into the card state machine:
//! - `ambient`: rising background hearts behind a two-phase render gate
//! - `burst`: celebration sequences (which bursts fire, and when)
//! - `schedule`: cancellable time-ordered queue for those bursts
//! - `confetti`: frame-stepped heart particles

pub mod ambient;
pub mod burst;
pub mod confetti;
pub mod schedule;

pub use ambient::{AmbientField, HeartSprite, PaintGate};
pub use burst::{BurstSpec, CelebrationWave, heart_shower};
pub use confetti::{ConfettiField, Particle, backing_store};
pub use schedule::{EffectQueue, SequenceId};

use rand::Rng;

use crate::placement::Size;

/// User's motion preference (`prefers-reduced-motion`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPreference {
    #[default]
    Full,
    Reduced,
}

impl MotionPreference {
    /// Trim a celebration to what this preference allows
    pub fn filter_waves(&self, waves: Vec<CelebrationWave>) -> Vec<CelebrationWave> {
        match self {
            MotionPreference::Full => waves,
            MotionPreference::Reduced => waves.into_iter().take(1).collect(),
        }
    }

    /// Background hearts to generate for a requested count
    pub fn ambient_count(&self, requested: usize) -> usize {
        match self {
            MotionPreference::Full => requested,
            MotionPreference::Reduced => 0,
        }
    }
}

/// Celebration queue plus the particles it has emitted
#[derive(Debug, Default)]
pub struct Celebrations {
    pub queue: EffectQueue,
    pub confetti: ConfettiField,
    pub motion: MotionPreference,
}

impl Celebrations {
    pub fn new(motion: MotionPreference) -> Self {
        Self {
            motion,
            ..Default::default()
        }
    }

    /// Queue a celebration starting at `now_ms`
    pub fn celebrate(&mut self, now_ms: f64, waves: Vec<CelebrationWave>) -> SequenceId {
        let waves = self.motion.filter_waves(waves);
        self.queue.schedule(now_ms, &waves)
    }

    /// Fire due bursts and step particles once.
    ///
    /// Returns true while there is still something to animate.
    pub fn frame<R: Rng + ?Sized>(&mut self, rng: &mut R, now_ms: f64, viewport: Size) -> bool {
        for burst in self.queue.drain_due(now_ms) {
            self.confetti.emit(rng, &burst, viewport);
        }
        self.confetti.step();
        self.is_active()
    }

    pub fn is_active(&self) -> bool {
        !self.queue.is_empty() || !self.confetti.is_empty()
    }

    /// Drop pending bursts and live particles (page teardown)
    pub fn teardown(&mut self) {
        self.queue.cancel_all();
        self.confetti.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const VIEWPORT: Size = Size::new(1280.0, 720.0);

    #[test]
    fn test_frames_until_idle() {
        let mut rng = Pcg32::seed_from_u64(12);
        let mut fx = Celebrations::new(MotionPreference::Full);
        fx.celebrate(0.0, heart_shower(&[]));
        assert!(fx.is_active());

        let mut now = 0.0;
        let mut frames = 0;
        while fx.frame(&mut rng, now, VIEWPORT) {
            now += 16.0;
            frames += 1;
            assert!(frames < 1000, "celebration never settled");
        }
        assert!(fx.queue.is_empty());
        assert!(fx.confetti.is_empty());
        // The last wave lands at 800ms and lives 160 frames
        assert!(frames >= 160);
    }

    #[test]
    fn test_reduced_motion_keeps_first_wave() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut fx = Celebrations::new(MotionPreference::Reduced);
        fx.celebrate(0.0, heart_shower(&[]));
        fx.frame(&mut rng, 0.0, VIEWPORT);
        assert!(fx.queue.is_empty());
        assert_eq!(fx.confetti.len(), 50);
        assert_eq!(MotionPreference::Reduced.ambient_count(18), 0);
    }

    #[test]
    fn test_teardown_drops_everything() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut fx = Celebrations::default();
        fx.celebrate(0.0, heart_shower(&[]));
        fx.frame(&mut rng, 0.0, VIEWPORT);
        assert!(!fx.confetti.is_empty());

        fx.teardown();
        assert!(!fx.is_active());
        assert!(!fx.frame(&mut rng, 10_000.0, VIEWPORT));
    }
}
