//! Viewport-constrained random placement
//!
//! Picks a spot for a floating element so that it stays fully on screen,
//! at least `margin` pixels away from every viewport edge.

use glam::Vec2;
use rand::Rng;

/// Default distance kept between a placed element and the viewport edge
pub const DEFAULT_MARGIN: f32 = 24.0;

/// Width/height pair in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Valid placement interval along one axis.
///
/// When the element plus both margins does not fit, the interval collapses
/// to a single point inside `[0, extent]`.
#[inline]
pub fn axis_range(extent: f32, obstacle: f32, margin: f32) -> (f32, f32) {
    let extent = extent.max(0.0);
    let margin = margin.max(0.0);
    let lo = margin.min(extent);
    let span = (extent - obstacle.max(0.0) - 2.0 * margin).max(0.0);
    (lo, lo + span)
}

fn place_axis<R: Rng + ?Sized>(rng: &mut R, extent: f32, obstacle: f32, margin: f32) -> f32 {
    let (lo, hi) = axis_range(extent, obstacle, margin);
    let raw = lo + rng.random::<f32>() * (hi - lo);
    raw.clamp(lo, hi)
}

/// Uniformly random top-left corner for `obstacle` inside `viewport`.
pub fn compute_position<R: Rng + ?Sized>(
    rng: &mut R,
    viewport: Size,
    obstacle: Size,
    margin: f32,
) -> Vec2 {
    Vec2::new(
        place_axis(rng, viewport.width, obstacle.width, margin),
        place_axis(rng, viewport.height, obstacle.height, margin),
    )
}

/// Returns true if `pos` keeps `obstacle` inside `viewport` with `margin`
pub fn is_within_bounds(pos: Vec2, viewport: Size, obstacle: Size, margin: f32) -> bool {
    let (x_lo, x_hi) = axis_range(viewport.width, obstacle.width, margin);
    let (y_lo, y_hi) = axis_range(viewport.height, obstacle.height, margin);
    (x_lo..=x_hi).contains(&pos.x) && (y_lo..=y_hi).contains(&pos.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_desktop_viewport_range() {
        let viewport = Size::new(1000.0, 800.0);
        let button = Size::new(120.0, 48.0);
        assert_eq!(axis_range(viewport.width, button.width, 24.0), (24.0, 856.0));
        assert_eq!(axis_range(viewport.height, button.height, 24.0), (24.0, 728.0));

        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let pos = compute_position(&mut rng, viewport, button, 24.0);
            assert!((24.0..=856.0).contains(&pos.x), "x out of range: {}", pos.x);
            assert!((24.0..=728.0).contains(&pos.y), "y out of range: {}", pos.y);
        }
    }

    #[test]
    fn test_same_seed_same_position() {
        let viewport = Size::new(390.0, 844.0);
        let button = Size::new(140.0, 44.0);
        let a = compute_position(&mut Pcg32::seed_from_u64(42), viewport, button, DEFAULT_MARGIN);
        let b = compute_position(&mut Pcg32::seed_from_u64(42), viewport, button, DEFAULT_MARGIN);
        assert_eq!(a, b);
    }

    #[test]
    fn test_oversized_obstacle_collapses_to_margin() {
        let mut rng = Pcg32::seed_from_u64(1);
        let pos = compute_position(&mut rng, Size::new(100.0, 60.0), Size::new(300.0, 80.0), 24.0);
        assert_eq!(pos, Vec2::new(24.0, 24.0));
        assert!(pos.x.is_finite() && pos.y.is_finite());
    }

    #[test]
    fn test_margin_wider_than_viewport() {
        let mut rng = Pcg32::seed_from_u64(3);
        let pos = compute_position(&mut rng, Size::new(10.0, 0.0), Size::new(4.0, 4.0), 24.0);
        assert!((0.0..=10.0).contains(&pos.x));
        assert_eq!(pos.y, 0.0);
    }

    proptest! {
        #[test]
        fn prop_position_respects_bounds(
            vw in 0.0f32..4000.0,
            vh in 0.0f32..4000.0,
            ow in 0.0f32..600.0,
            oh in 0.0f32..600.0,
            margin in 0.0f32..64.0,
            seed in any::<u64>(),
        ) {
            let viewport = Size::new(vw, vh);
            let obstacle = Size::new(ow, oh);
            let pos = compute_position(&mut Pcg32::seed_from_u64(seed), viewport, obstacle, margin);

            prop_assert!(pos.x.is_finite() && pos.y.is_finite());
            prop_assert!(pos.x >= 0.0 && pos.x <= vw);
            prop_assert!(pos.y >= 0.0 && pos.y <= vh);
            prop_assert!(is_within_bounds(pos, viewport, obstacle, margin));

            if vw - ow - 2.0 * margin >= 0.0 {
                prop_assert!(pos.x >= margin && pos.x <= vw - ow - margin + 1e-2);
            }
            if vh - oh - 2.0 * margin >= 0.0 {
                prop_assert!(pos.y >= margin && pos.y <= vh - oh - margin + 1e-2);
            }
        }
    }
}
