//! Rising background hearts
//!
//! The sprite parameters are random, so they are generated only on the
//! client after the first paint. Until then the field is `Pending` and
//! renders an empty container, which keeps pre-rendered and hydrated markup
//! identical.

use rand::Rng;

/// Default number of background hearts
pub const DEFAULT_HEART_COUNT: usize = 18;

/// Default ambient palette (pink is listed twice to weight it)
pub const AMBIENT_COLORS: [&str; 5] = ["#FF2D95", "#4CC1FF", "#FFD166", "#FF7EB6", "#FF2D95"];

/// One rising heart. Values are fixed once generated.
#[derive(Debug, Clone, PartialEq)]
pub struct HeartSprite {
    pub id: usize,
    /// Horizontal offset, percent of the container width
    pub left_pct: f32,
    pub size_px: u32,
    pub duration_s: f32,
    pub delay_s: f32,
    pub color: String,
    pub opacity: f32,
}

impl HeartSprite {
    /// Draw a sprite's parameters
    pub fn random<R: Rng + ?Sized>(rng: &mut R, id: usize, palette: &[String]) -> Self {
        let color = if palette.is_empty() {
            AMBIENT_COLORS[0].to_string()
        } else {
            palette[rng.random_range(0..palette.len())].clone()
        };
        Self {
            id,
            left_pct: rng.random::<f32>() * 96.0 + 2.0,
            size_px: rng.random_range(10..30),
            duration_s: rng.random::<f32>() * 12.0 + 8.0,
            delay_s: rng.random::<f32>() * 10.0,
            color,
            opacity: rng.random::<f32>() * 0.35 + 0.15,
        }
    }
}

/// Two-phase render gate for the background field
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AmbientField {
    /// Not yet hydrated; renders as an empty layer
    #[default]
    Pending,
    Ready(Vec<HeartSprite>),
}

impl AmbientField {
    pub fn is_ready(&self) -> bool {
        matches!(self, AmbientField::Ready(_))
    }

    pub fn sprites(&self) -> &[HeartSprite] {
        match self {
            AmbientField::Pending => &[],
            AmbientField::Ready(sprites) => sprites,
        }
    }

    /// Generate the sprites. Only the first call has an effect.
    ///
    /// Returns true if this call generated the field.
    pub fn hydrate<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize, palette: &[String]) -> bool {
        if self.is_ready() {
            return false;
        }
        let sprites = (0..count)
            .map(|id| HeartSprite::random(rng, id, palette))
            .collect();
        *self = AmbientField::Ready(sprites);
        true
    }
}

/// Animation frames to wait before hydrating. The first callback runs
/// before the initial paint, so hydration waits for the second.
pub const FRAMES_BEFORE_HYDRATE: u32 = 2;

/// Counts animation frames until the first paint is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintGate {
    frames_left: u32,
}

impl Default for PaintGate {
    fn default() -> Self {
        Self::new(FRAMES_BEFORE_HYDRATE)
    }
}

impl PaintGate {
    pub const fn new(frames: u32) -> Self {
        Self { frames_left: frames }
    }

    pub fn is_open(&self) -> bool {
        self.frames_left == 0
    }

    /// Record one animation frame. True only on the frame that opens the gate.
    pub fn frame(&mut self) -> bool {
        match self.frames_left {
            0 => false,
            n => {
                self.frames_left = n - 1;
                self.frames_left == 0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn palette() -> Vec<String> {
        AMBIENT_COLORS.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_pending_has_no_sprites() {
        let field = AmbientField::default();
        assert!(!field.is_ready());
        assert!(field.sprites().is_empty());
    }

    #[test]
    fn test_hydrate_once() {
        let mut rng = Pcg32::seed_from_u64(100);
        let mut field = AmbientField::Pending;
        assert!(field.hydrate(&mut rng, DEFAULT_HEART_COUNT, &palette()));
        let first = field.clone();
        assert_eq!(field.sprites().len(), DEFAULT_HEART_COUNT);

        assert!(!field.hydrate(&mut rng, 3, &palette()));
        assert_eq!(field, first);
    }

    #[test]
    fn test_sprite_ranges() {
        let mut rng = Pcg32::seed_from_u64(55);
        let palette = palette();
        for id in 0..500 {
            let s = HeartSprite::random(&mut rng, id, &palette);
            assert!((2.0..=98.0).contains(&s.left_pct));
            assert!((10..30).contains(&s.size_px));
            assert!((8.0..=20.0).contains(&s.duration_s));
            assert!((0.0..=10.0).contains(&s.delay_s));
            assert!((0.15..=0.5).contains(&s.opacity));
            assert!(palette.contains(&s.color));
        }
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let mut rng = Pcg32::seed_from_u64(1);
        let s = HeartSprite::random(&mut rng, 0, &[]);
        assert_eq!(s.color, AMBIENT_COLORS[0]);
    }

    #[test]
    fn test_paint_gate_opens_on_second_frame() {
        let mut gate = PaintGate::default();
        assert!(!gate.is_open());
        assert!(!gate.frame(), "first callback runs before the first paint");
        assert!(gate.frame());
        assert!(gate.is_open());
        assert!(!gate.frame(), "opens only once");
    }
}
