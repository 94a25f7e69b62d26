//! Per-request scorer selection and the injectable randomness behind it.

use crate::model::ModelKind;
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Uniform index draws. Production uses the thread RNG; tests swap in a
/// fixed sequence for deterministic selection and cause attribution.
pub trait DrawSource: Send + Sync {
    /// Uniform draw in `[0, bound)`.
    fn pick(&self, bound: usize) -> usize;
}

#[derive(Debug, Default)]
pub struct SystemDraw;

impl DrawSource for SystemDraw {
    fn pick(&self, bound: usize) -> usize {
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Deterministic draw sequence; cycles when exhausted.
#[derive(Debug)]
pub struct FixedDraw {
    sequence: Vec<usize>,
    cursor: AtomicUsize,
}

impl FixedDraw {
    pub fn new(sequence: Vec<usize>) -> Self {
        assert!(!sequence.is_empty(), "draw sequence must not be empty");
        Self {
            sequence,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl DrawSource for FixedDraw {
    fn pick(&self, bound: usize) -> usize {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.sequence[i % self.sequence.len()] % bound
    }
}

/// Uniformly random scorer choice, independent per request. This is
/// ensemble diversity simulation, not a quality-weighted ensemble.
pub struct ModelSelector {
    draw: Arc<dyn DrawSource>,
}

impl ModelSelector {
    pub fn new(draw: Arc<dyn DrawSource>) -> Self {
        Self { draw }
    }

    pub fn select(&self) -> ModelKind {
        ModelKind::ALL[self.draw.pick(ModelKind::ALL.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_sequence_cycles() {
        let draw = FixedDraw::new(vec![2, 0]);
        assert_eq!(draw.pick(3), 2);
        assert_eq!(draw.pick(3), 0);
        assert_eq!(draw.pick(3), 2);
    }

    #[test]
    fn selector_maps_draws_to_variants() {
        let selector = ModelSelector::new(Arc::new(FixedDraw::new(vec![0, 1, 2])));
        assert_eq!(selector.select(), ModelKind::BoostedTree);
        assert_eq!(selector.select(), ModelKind::SequenceConv);
        assert_eq!(selector.select(), ModelKind::OutlierIsolation);
    }

    #[test]
    fn system_draw_stays_in_bounds() {
        let draw = SystemDraw;
        for _ in 0..100 {
            assert!(draw.pick(3) < 3);
        }
    }
}
