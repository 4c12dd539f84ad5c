//! Cancellable effect queue
//!
//! Celebrations are queued against the animation-frame clock instead of
//! detached timers, so tearing the page down can drop everything pending.

use super::burst::{BurstSpec, CelebrationWave};

/// Handle for one scheduled celebration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceId(u32);

#[derive(Debug, Clone)]
struct Pending {
    due_ms: f64,
    sequence: SequenceId,
    order: u32,
    burst: BurstSpec,
}

/// Time-ordered queue of bursts waiting to fire
#[derive(Debug, Default)]
pub struct EffectQueue {
    pending: Vec<Pending>,
    next_sequence: u32,
    next_order: u32,
}

impl EffectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue every wave of a celebration relative to `now_ms`
    pub fn schedule(&mut self, now_ms: f64, waves: &[CelebrationWave]) -> SequenceId {
        let sequence = SequenceId(self.next_sequence);
        self.next_sequence += 1;

        for wave in waves {
            for burst in &wave.bursts {
                self.pending.push(Pending {
                    due_ms: now_ms + wave.delay_ms.max(0.0),
                    sequence,
                    order: self.next_order,
                    burst: burst.clone(),
                });
                self.next_order += 1;
            }
        }
        // Stable iteration: by due time, then insertion order
        self.pending.sort_by(|a, b| {
            a.due_ms
                .total_cmp(&b.due_ms)
                .then_with(|| a.order.cmp(&b.order))
        });

        log::debug!("Scheduled celebration {:?} ({} waves)", sequence, waves.len());
        sequence
    }

    /// Remove and return every burst due at or before `now_ms`
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<BurstSpec> {
        let split = self.pending.partition_point(|p| p.due_ms <= now_ms);
        self.pending.drain(..split).map(|p| p.burst).collect()
    }

    /// Drop one celebration's remaining bursts
    pub fn cancel(&mut self, sequence: SequenceId) {
        self.pending.retain(|p| p.sequence != sequence);
    }

    /// Drop everything pending
    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            log::info!("Cancelled {} pending bursts", self.pending.len());
        }
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of distinct celebrations with bursts still waiting
    pub fn pending_sequences(&self) -> usize {
        let mut ids: Vec<SequenceId> = self.pending.iter().map(|p| p.sequence).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    /// Due time of the next burst
    pub fn next_due(&self) -> Option<f64> {
        self.pending.first().map(|p| p.due_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::burst::heart_shower;

    #[test]
    fn test_drains_in_delay_order() {
        let mut queue = EffectQueue::new();
        queue.schedule(1000.0, &heart_shower(&[]));
        assert_eq!(queue.pending_sequences(), 1);
        assert_eq!(queue.next_due(), Some(1000.0));

        let first = queue.drain_due(1000.0);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].particle_count, 50);

        assert!(queue.drain_due(1249.0).is_empty());
        let second = queue.drain_due(1260.0);
        assert_eq!(second.len(), 2);
        assert!(second[0].origin.x < second[1].origin.x);

        let rest = queue.drain_due(5000.0);
        assert_eq!(rest.len(), 3);
        assert!(queue.is_empty());
        assert_eq!(queue.pending_sequences(), 0);
    }

    #[test]
    fn test_late_frame_fires_everything_due() {
        let mut queue = EffectQueue::new();
        queue.schedule(0.0, &heart_shower(&[]));
        // A single frame arriving after the whole sequence is due
        assert_eq!(queue.drain_due(900.0).len(), 6);
    }

    #[test]
    fn test_cancel_all() {
        let mut queue = EffectQueue::new();
        queue.schedule(0.0, &heart_shower(&[]));
        queue.schedule(10.0, &heart_shower(&[]));
        assert_eq!(queue.pending_sequences(), 2);

        queue.drain_due(0.0);
        queue.cancel_all();
        assert!(queue.is_empty());
        assert!(queue.drain_due(10_000.0).is_empty());
    }

    #[test]
    fn test_cancel_single_sequence() {
        let mut queue = EffectQueue::new();
        let a = queue.schedule(0.0, &heart_shower(&[]));
        let b = queue.schedule(100.0, &heart_shower(&[]));
        assert_ne!(a, b);

        queue.cancel(a);
        assert_eq!(queue.pending_sequences(), 1);
        assert_eq!(queue.next_due(), Some(100.0));
    }
}
