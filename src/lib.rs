//! Love Protocol - a proposal microsite in WebAssembly
//!
//! Core modules:
//! - `placement`: Viewport-constrained random placement for the dodging button
//! - `reveal`: Card state machine (question, envelope, letter) and escape state
//! - `effects`: Background hearts, celebration scheduling, confetti particles
//! - `view`: HTML markup for every part of the page
//! - `config`: Page copy and tunables with JSON overrides

pub mod config;
pub mod effects;
pub mod placement;
pub mod reveal;
pub mod view;

pub use config::SiteConfig;
pub use placement::{Size, compute_position};
pub use reveal::{Action, EscapeState, ProposalCard, RejectControl, Stage};

use effects::{AmbientField, Celebrations, MotionPreference, PaintGate, heart_shower};
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Everything one page session owns
#[derive(Debug)]
pub struct Page {
    pub config: SiteConfig,
    pub proposal: ProposalCard,
    pub ambient: AmbientField,
    pub paint_gate: PaintGate,
    pub celebrations: Celebrations,
    pub rng: Pcg32,
}

impl Page {
    pub fn new(config: SiteConfig, motion: MotionPreference, seed: u64) -> Self {
        Self {
            proposal: ProposalCard::new(config.dodge_margin),
            ambient: AmbientField::Pending,
            paint_gate: PaintGate::default(),
            celebrations: Celebrations::new(motion),
            rng: Pcg32::seed_from_u64(seed),
            config,
        }
    }

    /// Generate the background hearts (call after the first paint)
    pub fn hydrate_ambient(&mut self) -> bool {
        let count = self.celebrations.motion.ambient_count(self.config.heart_count);
        self.ambient
            .hydrate(&mut self.rng, count, &self.config.ambient_colors)
    }

    /// Count one animation frame after mount and hydrate the background
    /// once the first paint is done. True if this frame generated it.
    pub fn paint_frame(&mut self) -> bool {
        self.paint_gate.frame() && self.hydrate_ambient()
    }

    /// Apply a user action; a stage change queues one celebration at `now_ms`
    pub fn act(&mut self, action: Action, now_ms: f64) -> Option<reveal::StageChange> {
        let change = self.proposal.apply(action)?;
        self.celebrations
            .celebrate(now_ms, heart_shower(&self.config.confetti_colors));
        Some(change)
    }

    pub fn dodge(&mut self, obstacle: Option<Size>, viewport: Size) -> bool {
        self.proposal.dodge(&mut self.rng, obstacle, viewport)
    }

    pub fn resize(&mut self, obstacle: Option<Size>, viewport: Size) -> bool {
        self.proposal.resize(&mut self.rng, obstacle, viewport)
    }

    /// One animation frame of celebration effects. True while still animating.
    pub fn frame(&mut self, now_ms: f64, viewport: Size) -> bool {
        self.celebrations.frame(&mut self.rng, now_ms, viewport)
    }

    /// Drop pending celebrations and particles
    pub fn teardown(&mut self) {
        self.celebrations.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        Page::new(SiteConfig::default(), MotionPreference::Full, 1234)
    }

    #[test]
    fn test_accept_schedules_one_celebration() {
        let mut page = page();
        let change = page.act(Action::Accept, 0.0);
        assert_eq!(change.map(|c| c.to), Some(Stage::Confirmed));
        assert_eq!(page.celebrations.queue.pending_sequences(), 1);
    }

    #[test]
    fn test_ignored_action_schedules_nothing() {
        let mut page = page();
        assert!(page.act(Action::OpenEnvelope, 0.0).is_none());
        assert!(page.celebrations.queue.is_empty());
    }

    #[test]
    fn test_open_after_accept_schedules_second_celebration() {
        let mut page = page();
        page.act(Action::Accept, 0.0);
        page.act(Action::OpenEnvelope, 100.0);
        assert_eq!(page.proposal.stage(), Stage::Revealed);
        assert_eq!(page.celebrations.queue.pending_sequences(), 2);
    }

    #[test]
    fn test_teardown_cancels_pending() {
        let mut page = page();
        page.act(Action::Accept, 0.0);
        page.teardown();
        assert!(page.celebrations.queue.is_empty());
        assert!(!page.frame(1000.0, Size::new(800.0, 600.0)));
    }

    #[test]
    fn test_reduced_motion_skips_ambient() {
        let mut page = Page::new(SiteConfig::default(), MotionPreference::Reduced, 1);
        assert!(page.hydrate_ambient());
        assert!(page.ambient.is_ready());
        assert!(page.ambient.sprites().is_empty());
    }

    #[test]
    fn test_background_waits_for_first_paint() {
        let mut page = page();
        assert!(!page.paint_frame());
        assert!(!page.ambient.is_ready());

        assert!(page.paint_frame());
        assert_eq!(page.ambient.sprites().len(), page.config.heart_count);

        let sprites = page.ambient.sprites().to_vec();
        assert!(!page.paint_frame());
        assert_eq!(page.ambient.sprites(), &sprites[..]);
    }

    #[test]
    fn test_same_seed_same_dodges() {
        let viewport = Size::new(1000.0, 800.0);
        let button = Some(Size::new(120.0, 48.0));
        let mut a = page();
        let mut b = page();
        for _ in 0..5 {
            a.dodge(button, viewport);
            b.dodge(button, viewport);
        }
        assert_eq!(a.proposal.escape(), b.proposal.escape());
    }
}
