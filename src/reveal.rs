//! Proposal card state machine
//!
//! Tracks the reveal stage (question → confirmed → letter) and the escape
//! state of the reject button. All mutation happens here; the browser layer
//! only feeds in events and measurements and re-renders from the result.

use glam::Vec2;
use rand::Rng;

use crate::placement::{Size, compute_position};

/// Step of the reveal sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// The question is on screen with accept/reject buttons
    Unanswered,
    /// Accepted; the sealed envelope is shown
    Confirmed,
    /// Envelope opened; letter and boarding pass are shown (terminal)
    Revealed,
}

/// User actions that can advance the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Accept,
    OpenEnvelope,
}

impl Stage {
    /// Total transition function. Pairs outside the table keep the stage.
    pub fn next(self, action: Action) -> Stage {
        match (self, action) {
            (Stage::Unanswered, Action::Accept) => Stage::Confirmed,
            (Stage::Confirmed, Action::OpenEnvelope) => Stage::Revealed,
            (stage, _) => stage,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Unanswered => "unanswered",
            Stage::Confirmed => "confirmed",
            Stage::Revealed => "revealed",
        }
    }

    fn ordinal(self) -> u8 {
        match self {
            Stage::Unanswered => 0,
            Stage::Confirmed => 1,
            Stage::Revealed => 2,
        }
    }
}

/// Where the reject button lives
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EscapeState {
    /// Still in the card's button row
    #[default]
    Docked,
    /// Floating in a fixed layer at the given top-left position
    Escaped { position: Vec2 },
}

impl EscapeState {
    pub fn has_escaped(&self) -> bool {
        matches!(self, EscapeState::Escaped { .. })
    }

    pub fn position(&self) -> Option<Vec2> {
        match self {
            EscapeState::Docked => None,
            EscapeState::Escaped { position } => Some(*position),
        }
    }
}

/// How the reject button should be rendered right now
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RejectControl {
    InFlow,
    Floating(Vec2),
    Hidden,
}

/// Emitted when the stage moves forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageChange {
    pub from: Stage,
    pub to: Stage,
}

/// State owned by the interactive card
#[derive(Debug, Clone)]
pub struct ProposalCard {
    stage: Stage,
    escape: EscapeState,
    margin: f32,
    dodges: u32,
}

impl ProposalCard {
    pub fn new(margin: f32) -> Self {
        Self {
            stage: Stage::Unanswered,
            escape: EscapeState::Docked,
            margin,
            dodges: 0,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn escape(&self) -> EscapeState {
        self.escape
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Number of successful dodges so far
    pub fn dodges(&self) -> u32 {
        self.dodges
    }

    pub fn reject_control(&self) -> RejectControl {
        if self.stage != Stage::Unanswered {
            return RejectControl::Hidden;
        }
        match self.escape {
            EscapeState::Docked => RejectControl::InFlow,
            EscapeState::Escaped { position } => RejectControl::Floating(position),
        }
    }

    /// Apply a user action. Returns the change if the stage advanced.
    pub fn apply(&mut self, action: Action) -> Option<StageChange> {
        let from = self.stage;
        let to = from.next(action);
        if to == from {
            return None;
        }
        debug_assert!(to.ordinal() > from.ordinal());

        self.stage = to;
        // The floating button is gone for good once the question is answered
        self.escape = EscapeState::Docked;
        log::info!("Stage {} -> {}", from.as_str(), to.as_str());
        Some(StageChange { from, to })
    }

    /// Pointer or touch came near the reject button.
    ///
    /// `obstacle` is the button's current measurement; `None` means it is
    /// not mounted and the event is dropped. Returns true if the button moved.
    pub fn dodge<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        obstacle: Option<Size>,
        viewport: Size,
    ) -> bool {
        if self.stage != Stage::Unanswered {
            return false;
        }
        let Some(obstacle) = obstacle else {
            log::debug!("Reject button not measurable, dodge skipped");
            return false;
        };
        let position = compute_position(rng, viewport, obstacle, self.margin);
        self.escape = EscapeState::Escaped { position };
        self.dodges += 1;
        true
    }

    /// Viewport changed size. Re-places the button if it is floating.
    pub fn resize<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        obstacle: Option<Size>,
        viewport: Size,
    ) -> bool {
        if self.stage != Stage::Unanswered || !self.escape.has_escaped() {
            return false;
        }
        let Some(obstacle) = obstacle else {
            log::debug!("Reject button not measurable, resize skipped");
            return false;
        };
        let position = compute_position(rng, viewport, obstacle, self.margin);
        self.escape = EscapeState::Escaped { position };
        true
    }
}

impl Default for ProposalCard {
    fn default() -> Self {
        Self::new(crate::placement::DEFAULT_MARGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::is_within_bounds;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BUTTON: Size = Size::new(120.0, 48.0);
    const DESKTOP: Size = Size::new(1000.0, 800.0);

    #[test]
    fn test_transition_table() {
        assert_eq!(Stage::Unanswered.next(Action::Accept), Stage::Confirmed);
        assert_eq!(Stage::Confirmed.next(Action::OpenEnvelope), Stage::Revealed);

        // Everything else is a self-loop
        assert_eq!(Stage::Unanswered.next(Action::OpenEnvelope), Stage::Unanswered);
        assert_eq!(Stage::Confirmed.next(Action::Accept), Stage::Confirmed);
        assert_eq!(Stage::Revealed.next(Action::Accept), Stage::Revealed);
        assert_eq!(Stage::Revealed.next(Action::OpenEnvelope), Stage::Revealed);
    }

    #[test]
    fn test_never_moves_backward() {
        let stages = [Stage::Unanswered, Stage::Confirmed, Stage::Revealed];
        let actions = [Action::Accept, Action::OpenEnvelope];
        for stage in stages {
            for action in actions {
                assert!(stage.next(action).ordinal() >= stage.ordinal());
            }
        }
    }

    #[test]
    fn test_full_flow() {
        let mut card = ProposalCard::default();
        assert_eq!(card.stage(), Stage::Unanswered);

        let change = card.apply(Action::Accept);
        assert_eq!(
            change,
            Some(StageChange {
                from: Stage::Unanswered,
                to: Stage::Confirmed
            })
        );
        assert!(card.apply(Action::Accept).is_none());

        let change = card.apply(Action::OpenEnvelope);
        assert_eq!(change.map(|c| c.to), Some(Stage::Revealed));
        assert!(card.apply(Action::OpenEnvelope).is_none());
        assert_eq!(card.stage(), Stage::Revealed);
    }

    #[test]
    fn test_dodge_escapes_within_bounds() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut card = ProposalCard::default();
        assert_eq!(card.reject_control(), RejectControl::InFlow);

        for _ in 0..50 {
            assert!(card.dodge(&mut rng, Some(BUTTON), DESKTOP));
            assert!(card.escape().has_escaped());
            let pos = card.escape().position().expect("escaped has a position");
            assert!(is_within_bounds(pos, DESKTOP, BUTTON, card.margin()));
            assert!(matches!(card.reject_control(), RejectControl::Floating(p) if p == pos));
        }
        assert_eq!(card.dodges(), 50);
    }

    #[test]
    fn test_dodge_without_measurement_is_noop() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut card = ProposalCard::default();
        assert!(!card.dodge(&mut rng, None, DESKTOP));
        assert_eq!(card.escape(), EscapeState::Docked);

        assert!(card.dodge(&mut rng, Some(BUTTON), DESKTOP));
        let before = card.escape();
        assert!(!card.dodge(&mut rng, None, DESKTOP));
        assert_eq!(card.escape(), before);
    }

    #[test]
    fn test_reject_hidden_after_accept() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut card = ProposalCard::default();
        card.dodge(&mut rng, Some(BUTTON), DESKTOP);
        assert!(card.escape().has_escaped());

        card.apply(Action::Accept);
        assert_eq!(card.reject_control(), RejectControl::Hidden);
        assert!(!card.escape().has_escaped());

        // Late proximity events are ignored
        assert!(!card.dodge(&mut rng, Some(BUTTON), DESKTOP));
        assert_eq!(card.reject_control(), RejectControl::Hidden);
    }

    #[test]
    fn test_resize_only_when_escaped() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut card = ProposalCard::default();
        assert!(!card.resize(&mut rng, Some(BUTTON), DESKTOP));
        assert_eq!(card.escape(), EscapeState::Docked);
    }

    #[test]
    fn test_rapid_resizes_track_latest_viewport() {
        let mut rng = Pcg32::seed_from_u64(77);
        let mut card = ProposalCard::default();
        card.dodge(&mut rng, Some(BUTTON), DESKTOP);

        let viewports = [
            Size::new(900.0, 700.0),
            Size::new(640.0, 480.0),
            Size::new(375.0, 667.0),
            Size::new(320.0, 200.0),
            Size::new(1920.0, 1080.0),
            Size::new(200.0, 100.0),
        ];
        for viewport in viewports {
            assert!(card.resize(&mut rng, Some(BUTTON), viewport));
            let pos = card.escape().position().expect("still escaped");
            assert!(
                is_within_bounds(pos, viewport, BUTTON, card.margin()),
                "{pos:?} outside {viewport:?}"
            );
        }
    }
}
