use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use crate::{DealerStrength, HandCategory};

/// Correct answers out of attempts for one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub correct: u32,
    pub total: u32,
}

impl Tally {
    fn add(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Percentage in [0, 100]. An empty tally is 0.0.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }
}

/// Snapshot of the statistics in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    pub overall: Tally,
    pub by_category: Vec<(HandCategory, Tally)>,
    pub by_dealer_strength: Vec<(DealerStrength, Tally)>,
}

/// Accuracy tracking for the whole run of the program, overall and broken
/// down by hand category and by dealer strength.
#[derive(Debug, Clone)]
pub struct SessionStats {
    overall: Tally,
    by_category: BTreeMap<HandCategory, Tally>,
    by_dealer_strength: BTreeMap<DealerStrength, Tally>,
}

impl SessionStats {
    pub fn new() -> Self {
        SessionStats {
            overall: Tally::default(),
            by_category: HandCategory::iter().map(|c| (c, Tally::default())).collect(),
            by_dealer_strength: DealerStrength::iter()
                .map(|s| (s, Tally::default()))
                .collect(),
        }
    }

    /// Records an attempt keyed by bucket names such as "hard" and "weak".
    /// Unknown names still count toward the overall numbers but are not
    /// added to any bucket.
    pub fn record_attempt(&mut self, category: &str, dealer_strength: &str, correct: bool) {
        self.tally(category.parse().ok(), dealer_strength.parse().ok(), correct);
    }

    pub fn record(&mut self, category: HandCategory, dealer_strength: DealerStrength, correct: bool) {
        self.tally(Some(category), Some(dealer_strength), correct);
    }

    fn tally(
        &mut self,
        category: Option<HandCategory>,
        dealer_strength: Option<DealerStrength>,
        correct: bool,
    ) {
        self.overall.add(correct);
        if let Some(tally) = category.and_then(|c| self.by_category.get_mut(&c)) {
            tally.add(correct);
        }
        if let Some(tally) = dealer_strength.and_then(|s| self.by_dealer_strength.get_mut(&s)) {
            tally.add(correct);
        }
    }

    pub fn category_accuracy(&self, category: &str) -> f64 {
        category
            .parse::<HandCategory>()
            .ok()
            .and_then(|c| self.by_category.get(&c))
            .map_or(0.0, Tally::accuracy)
    }

    pub fn dealer_strength_accuracy(&self, dealer_strength: &str) -> f64 {
        dealer_strength
            .parse::<DealerStrength>()
            .ok()
            .and_then(|s| self.by_dealer_strength.get(&s))
            .map_or(0.0, Tally::accuracy)
    }

    pub fn session_accuracy(&self) -> f64 {
        self.overall.accuracy()
    }

    pub fn total_attempts(&self) -> u32 {
        self.overall.total
    }

    pub fn correct_answers(&self) -> u32 {
        self.overall.correct
    }

    pub fn dealer_strength(dealer_card: u8) -> DealerStrength {
        DealerStrength::from_card(dealer_card)
    }

    /// Zeroes every counter. Buckets stay in place.
    pub fn reset(&mut self) {
        self.overall = Tally::default();
        for tally in self.by_category.values_mut() {
            *tally = Tally::default();
        }
        for tally in self.by_dealer_strength.values_mut() {
            *tally = Tally::default();
        }
    }

    pub fn report(&self) -> ProgressReport {
        ProgressReport {
            overall: self.overall,
            by_category: self.by_category.iter().map(|(&c, &t)| (c, t)).collect(),
            by_dealer_strength: self
                .by_dealer_strength
                .iter()
                .map(|(&s, &t)| (s, t))
                .collect(),
        }
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let stats = SessionStats::new();
        assert_eq!(stats.total_attempts(), 0);
        assert_eq!(stats.correct_answers(), 0);
        assert_eq!(stats.session_accuracy(), 0.0);
        for key in ["hard", "soft", "pair"] {
            assert_eq!(stats.category_accuracy(key), 0.0);
        }
        for key in ["weak", "medium", "strong"] {
            assert_eq!(stats.dealer_strength_accuracy(key), 0.0);
        }
    }

    #[test]
    fn mixed_attempts() {
        let mut stats = SessionStats::new();
        stats.record_attempt("hard", "weak", true);
        stats.record_attempt("hard", "weak", false);
        stats.record_attempt("soft", "medium", true);
        stats.record_attempt("pair", "strong", true);

        assert_eq!(stats.session_accuracy(), 75.0);
        assert_eq!(stats.category_accuracy("hard"), 50.0);
        assert_eq!(stats.category_accuracy("soft"), 100.0);
        assert_eq!(stats.category_accuracy("pair"), 100.0);
        assert_eq!(stats.dealer_strength_accuracy("weak"), 50.0);
        assert_eq!(stats.dealer_strength_accuracy("medium"), 100.0);
        assert_eq!(stats.dealer_strength_accuracy("strong"), 100.0);
    }

    #[test]
    fn typed_and_keyed_recording_agree() {
        let mut keyed = SessionStats::new();
        let mut typed = SessionStats::new();
        keyed.record_attempt("soft", "strong", false);
        keyed.record_attempt("pair", "weak", true);
        typed.record(HandCategory::Soft, DealerStrength::Strong, false);
        typed.record(HandCategory::Pair, DealerStrength::Weak, true);
        assert_eq!(keyed.report(), typed.report());
    }

    #[test]
    fn unknown_keys_only_count_overall() {
        let mut stats = SessionStats::new();
        stats.record_attempt("invalid", "weak", true);
        stats.record_attempt("hard", "invalid", false);

        assert_eq!(stats.total_attempts(), 2);
        assert_eq!(stats.correct_answers(), 1);
        assert_eq!(stats.session_accuracy(), 50.0);
        assert_eq!(stats.category_accuracy("hard"), 0.0);
        assert_eq!(stats.dealer_strength_accuracy("weak"), 100.0);
        assert_eq!(stats.category_accuracy("invalid"), 0.0);
        assert_eq!(stats.dealer_strength_accuracy("invalid"), 0.0);

        let report = stats.report();
        assert_eq!(report.by_category.len(), 3);
        assert_eq!(report.by_dealer_strength.len(), 3);
    }

    #[test]
    fn accuracy_stays_in_range() {
        let mut stats = SessionStats::new();
        for i in 0..37 {
            stats.record(HandCategory::Hard, DealerStrength::Medium, i % 3 == 0);
            let accuracy = stats.session_accuracy();
            assert!((0.0..=100.0).contains(&accuracy));
        }
        assert_eq!(Tally { correct: 5, total: 0 }.accuracy(), 0.0);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut stats = SessionStats::new();
        stats.record_attempt("hard", "weak", true);
        stats.record_attempt("pair", "strong", false);

        stats.reset();
        let once = stats.report();
        stats.reset();
        assert_eq!(stats.report(), once);

        assert_eq!(stats.total_attempts(), 0);
        assert_eq!(stats.session_accuracy(), 0.0);
        assert_eq!(stats.category_accuracy("hard"), 0.0);
        assert_eq!(stats.dealer_strength_accuracy("weak"), 0.0);
        assert_eq!(once.by_category.len(), 3);
        assert!(once.by_category.iter().all(|(_, t)| *t == Tally::default()));

        stats.record_attempt("hard", "weak", true);
        assert_eq!(stats.category_accuracy("hard"), 100.0);
    }

    #[test]
    fn dealer_strength_of_cards() {
        assert_eq!(SessionStats::dealer_strength(6), DealerStrength::Weak);
        assert_eq!(SessionStats::dealer_strength(8), DealerStrength::Medium);
        assert_eq!(SessionStats::dealer_strength(11), DealerStrength::Strong);
        assert_eq!(SessionStats::dealer_strength(2).to_string(), "medium");
        assert_eq!(SessionStats::dealer_strength(4).to_string(), "weak");
        assert_eq!(SessionStats::dealer_strength(9).to_string(), "strong");
    }

    #[test]
    fn report_lists_buckets_in_order() {
        let mut stats = SessionStats::new();
        stats.record(HandCategory::Pair, DealerStrength::Strong, true);
        let report = stats.report();
        assert_eq!(report.overall, Tally { correct: 1, total: 1 });
        let categories: Vec<HandCategory> = report.by_category.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            categories,
            vec![HandCategory::Hard, HandCategory::Soft, HandCategory::Pair]
        );
        assert_eq!(report.by_category[2].1, Tally { correct: 1, total: 1 });
        assert_eq!(report.by_dealer_strength[2].1, Tally { correct: 1, total: 1 });
    }
}
