//! Per-query modality choice.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use storyreel_core::MediaKind;

/// Probability of choosing video for a query.
pub const VIDEO_PROBABILITY: f64 = 0.5;

/// Decides video vs. photo for one query. Called once per query.
pub trait ModalityChooser: Send + Sync {
    /// Modality for the next query.
    fn choose(&self) -> MediaKind;
}

fn kind_from_coin(video: bool) -> MediaKind {
    if video { MediaKind::Video } else { MediaKind::Image }
}

/// Fair coin from the thread-local RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomModality;

impl ModalityChooser for RandomModality {
    fn choose(&self) -> MediaKind {
        kind_from_coin(rand::rng().random_bool(VIDEO_PROBABILITY))
    }
}

/// Fair coin from a seeded RNG; the same seed yields the same sequence.
pub struct SeededModality {
    rng: Mutex<StdRng>,
}

impl SeededModality {
    /// Chooser seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ModalityChooser for SeededModality {
    fn choose(&self) -> MediaKind {
        kind_from_coin(self.rng.lock().random_bool(VIDEO_PROBABILITY))
    }
}

/// Always the same modality.
#[derive(Clone, Copy, Debug)]
pub struct FixedModality(pub MediaKind);

impl ModalityChooser for FixedModality {
    fn choose(&self) -> MediaKind {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_is_fixed() {
        let chooser = FixedModality(MediaKind::Image);
        assert!((0..10).all(|_| chooser.choose() == MediaKind::Image));
    }

    #[test]
    fn seeded_is_reproducible() {
        let a = SeededModality::new(7);
        let b = SeededModality::new(7);
        let seq_a: Vec<_> = (0..32).map(|_| a.choose()).collect();
        let seq_b: Vec<_> = (0..32).map(|_| b.choose()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn seeded_produces_both_kinds() {
        let chooser = SeededModality::new(42);
        let picks: Vec<_> = (0..200).map(|_| chooser.choose()).collect();
        assert!(picks.contains(&MediaKind::Video));
        assert!(picks.contains(&MediaKind::Image));
    }

    #[test]
    fn random_is_roughly_fair() {
        let videos = (0..2000)
            .filter(|_| RandomModality.choose() == MediaKind::Video)
            .count();
        assert!((700..1300).contains(&videos), "videos = {videos}");
    }
}
