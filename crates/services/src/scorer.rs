//! # Relevance Scorer
//!
//! Pluggable strategies for rating a candidate reply against its ancestor
//! context. The thread tree only depends on the `RelevanceScorer` trait,
//! so a language-model-backed policy can replace these without touching
//! tree logic.

use domains::models::ItemId;
use domains::ports::RelevanceScorer;
use rand::Rng;

/// The reference policy: a uniform random draw in `[0,1)`. A stand-in for
/// a real relevance model; callers must not assume reproducibility.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformScorer;

impl RelevanceScorer for UniformScorer {
    fn score(&self, _item: ItemId, _context: &[ItemId]) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Deterministic policy returning a fixed rating. Useful for tests and
/// embedders that need reproducible orderings.
#[derive(Debug, Clone, Copy)]
pub struct ConstantScorer(f64);

impl ConstantScorer {
    /// The value is clamped into `[0,1]` to honor the scorer contract.
    pub fn new(rating: f64) -> Self {
        Self(rating.clamp(0.0, 1.0))
    }
}

impl RelevanceScorer for ConstantScorer {
    fn score(&self, _item: ItemId, _context: &[ItemId]) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_scores_stay_in_range() {
        let scorer = UniformScorer;
        let context = [ItemId::new(), ItemId::new()];
        for _ in 0..1000 {
            let s = scorer.score(ItemId::new(), &context);
            assert!((0.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn test_constant_scorer_clamps() {
        assert_eq!(ConstantScorer::new(2.5).score(ItemId::new(), &[]), 1.0);
        assert_eq!(ConstantScorer::new(-1.0).score(ItemId::new(), &[]), 0.0);
        assert_eq!(ConstantScorer::new(0.25).score(ItemId::new(), &[]), 0.25);
    }
}
