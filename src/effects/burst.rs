//! Celebration burst definitions
//!
//! A celebration is a short list of waves; each wave fires one or more
//! particle bursts after a fixed delay from the trigger.

use glam::Vec2;

/// Heart confetti palette
pub const HEART_COLORS: [&str; 5] = ["#FF2D95", "#ff6db8", "#ff85c8", "#FFD166", "#ff4fa8"];

/// One particle emission
#[derive(Debug, Clone, PartialEq)]
pub struct BurstSpec {
    pub particle_count: u32,
    /// Origin as a fraction of the viewport (0,0 top-left, 1,1 bottom-right)
    pub origin: Vec2,
    /// Initial speed in px/frame
    pub start_velocity: f32,
    /// Spread cone in degrees, centred on straight up
    pub spread: f32,
    /// Lifetime in frames
    pub ticks: u32,
    /// Particle size multiplier
    pub scalar: f32,
    pub gravity: f32,
    pub colors: Vec<String>,
}

impl Default for BurstSpec {
    fn default() -> Self {
        Self {
            particle_count: 50,
            origin: Vec2::new(0.5, 0.5),
            start_velocity: 30.0,
            spread: 360.0,
            ticks: 120,
            scalar: 1.8,
            gravity: 1.0,
            colors: HEART_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Bursts fired together after `delay_ms`
#[derive(Debug, Clone, PartialEq)]
pub struct CelebrationWave {
    pub delay_ms: f64,
    pub bursts: Vec<BurstSpec>,
}

/// The heart shower fired on every stage change.
///
/// `colors` overrides the default palette when non-empty.
pub fn heart_shower(colors: &[String]) -> Vec<CelebrationWave> {
    let base = BurstSpec {
        colors: if colors.is_empty() {
            BurstSpec::default().colors
        } else {
            colors.to_vec()
        },
        ..Default::default()
    };
    let burst = |count: u32, x: f32, y: f32, velocity: f32| BurstSpec {
        particle_count: count,
        origin: Vec2::new(x, y),
        start_velocity: velocity,
        ..base.clone()
    };

    vec![
        // Big central burst
        CelebrationWave {
            delay_ms: 0.0,
            bursts: vec![burst(50, 0.5, 0.55, 30.0)],
        },
        // Offset pair
        CelebrationWave {
            delay_ms: 250.0,
            bursts: vec![
                BurstSpec {
                    scalar: 1.5,
                    ..burst(35, 0.4, 0.5, 25.0)
                },
                BurstSpec {
                    scalar: 1.5,
                    ..burst(35, 0.6, 0.5, 25.0)
                },
            ],
        },
        // Gentle shower from the top
        CelebrationWave {
            delay_ms: 500.0,
            bursts: vec![
                BurstSpec {
                    scalar: 2.0,
                    gravity: 0.6,
                    ..burst(40, 0.3, 0.3, 15.0)
                },
                BurstSpec {
                    scalar: 2.0,
                    gravity: 0.6,
                    ..burst(40, 0.7, 0.3, 15.0)
                },
            ],
        },
        // Slow floating hearts
        CelebrationWave {
            delay_ms: 800.0,
            bursts: vec![BurstSpec {
                scalar: 2.4,
                gravity: 0.4,
                ticks: 160,
                ..burst(25, 0.5, 0.45, 20.0)
            }],
        },
    ]
}

/// Total particles a celebration will emit
pub fn particle_total(waves: &[CelebrationWave]) -> u32 {
    waves
        .iter()
        .flat_map(|w| w.bursts.iter())
        .map(|b| b.particle_count)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heart_shower_shape() {
        let waves = heart_shower(&[]);
        let delays: Vec<f64> = waves.iter().map(|w| w.delay_ms).collect();
        assert_eq!(delays, vec![0.0, 250.0, 500.0, 800.0]);
        assert_eq!(
            waves.iter().map(|w| w.bursts.len()).collect::<Vec<_>>(),
            vec![1, 2, 2, 1]
        );
        assert_eq!(particle_total(&waves), 50 + 70 + 80 + 25);
    }

    #[test]
    fn test_final_wave_lingers() {
        let waves = heart_shower(&[]);
        let last = &waves[3].bursts[0];
        assert_eq!(last.ticks, 160);
        assert!((last.gravity - 0.4).abs() < f32::EPSILON);
        assert_eq!(waves[0].bursts[0].ticks, 120);
    }

    #[test]
    fn test_palette_override() {
        let colors = vec!["#000000".to_string()];
        let waves = heart_shower(&colors);
        assert!(
            waves
                .iter()
                .flat_map(|w| w.bursts.iter())
                .all(|b| b.colors == colors)
        );
    }
}
