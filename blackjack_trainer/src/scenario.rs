use std::cmp;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::{DealerStrength, HandCategory, ACE};

const PAIR_VALUES: [u8; 10] = [2, 3, 4, 5, 6, 7, 8, 9, 10, ACE];
const HAND_CATEGORIES: [HandCategory; 3] =
    [HandCategory::Hard, HandCategory::Soft, HandCategory::Pair];

/// Hands whose correct play never changes with the dealer card.
pub const ABSOLUTE_SCENARIOS: [(HandCategory, u8); 10] = [
    (HandCategory::Pair, ACE), // A,A
    (HandCategory::Pair, 8),
    (HandCategory::Pair, 10),
    (HandCategory::Pair, 5),
    (HandCategory::Hard, 17),
    (HandCategory::Hard, 18),
    (HandCategory::Hard, 19),
    (HandCategory::Hard, 20),
    (HandCategory::Soft, 19), // A,8
    (HandCategory::Soft, 20), // A,9
];

/// Constraint policy used to draw scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Random,
    DealerGroup(DealerStrength),
    HandType(HandCategory),
    Absolute,
}

/// A practice hand. For pairs `total` is the value of one card of the pair,
/// which is how the pair chart is keyed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub category: HandCategory,
    pub cards: Vec<u8>,
    pub total: u8,
    pub dealer_card: u8,
}

/// Draws practice scenarios. Holds a single RNG for its whole lifetime, so
/// tests can inject a seeded one.
#[derive(Debug, Clone)]
pub struct ScenarioGenerator<R: Rng = StdRng> {
    rng: R,
}

impl ScenarioGenerator<StdRng> {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for ScenarioGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ScenarioGenerator<R> {
    pub fn from_rng(rng: R) -> Self {
        ScenarioGenerator { rng }
    }

    pub fn generate(&mut self, mode: SessionMode) -> Scenario {
        let scenario = match mode {
            SessionMode::Random => {
                let dealer_card = self.any_dealer_card();
                let category = self.any_category();
                self.hand_of(category, dealer_card)
            }
            SessionMode::DealerGroup(strength) => {
                let dealer_card = self.pick(strength.cards());
                let category = self.any_category();
                self.hand_of(category, dealer_card)
            }
            SessionMode::HandType(category) => {
                let dealer_card = self.any_dealer_card();
                self.hand_of(category, dealer_card)
            }
            SessionMode::Absolute => {
                let (category, total) = self.pick(&ABSOLUTE_SCENARIOS);
                let dealer_card = self.any_dealer_card();
                Scenario {
                    category,
                    cards: generate_hand_cards(category, total, &mut self.rng),
                    total,
                    dealer_card,
                }
            }
        };
        debug!(?mode, ?scenario, "generated scenario");
        scenario
    }

    fn hand_of(&mut self, category: HandCategory, dealer_card: u8) -> Scenario {
        let total = match category {
            HandCategory::Hard => self.rng.gen_range(5..=20),
            HandCategory::Soft => ACE + self.rng.gen_range(2..=9),
            HandCategory::Pair => self.pick(&PAIR_VALUES),
        };
        Scenario {
            category,
            cards: generate_hand_cards(category, total, &mut self.rng),
            total,
            dealer_card,
        }
    }

    fn any_dealer_card(&mut self) -> u8 {
        self.rng.gen_range(2..=ACE)
    }

    fn any_category(&mut self) -> HandCategory {
        self.pick(&HAND_CATEGORIES)
    }

    /// Uniform choice from a non-empty constant slice.
    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.rng.gen_range(0..items.len())]
    }
}

/// Builds concrete card values for a hand of the given category and total.
///
/// Pairs are two equal cards and soft hands are an Ace plus one card. A hard
/// total up to 11 is a single card. Larger hard totals are split into cards
/// from 2 to 10, using more than two cards when the first draw leaves more
/// than 10.
pub fn generate_hand_cards<R: Rng + ?Sized>(
    category: HandCategory,
    total: u8,
    rng: &mut R,
) -> Vec<u8> {
    let cards = match category {
        HandCategory::Pair => vec![total, total],
        HandCategory::Soft => vec![ACE, total.saturating_sub(ACE)],
        HandCategory::Hard if total <= 11 => vec![total],
        HandCategory::Hard => {
            let first_card = rng.gen_range(2..=cmp::min(10, total - 2));
            let remainder = total - first_card;

            if remainder > 10 {
                let mut cards = vec![first_card];
                let mut remaining = remainder;
                while remaining > 10 {
                    let max_card = cmp::min(10, remaining - 2);
                    if max_card < 2 {
                        break;
                    }
                    let card = rng.gen_range(2..=max_card);
                    cards.push(card);
                    remaining -= card;
                }
                if remaining >= 2 {
                    cards.push(remaining);
                }
                cards
            } else if remainder < 2 {
                vec![total]
            } else {
                vec![first_card, remainder]
            }
        }
    };
    trace!(%category, total, ?cards, "materialized hand");
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    const SEEDS: [u64; 5] = [1, 42, 999, 0xDEAD_BEEF, 7];

    fn check_scenario(scenario: &Scenario) {
        let cards = &scenario.cards;
        match scenario.category {
            HandCategory::Pair => {
                assert_eq!(cards.len(), 2, "{:?}", scenario);
                assert_eq!(cards[0], cards[1], "{:?}", scenario);
                assert_eq!(cards[0], scenario.total, "{:?}", scenario);
                assert!(PAIR_VALUES.contains(&scenario.total), "{:?}", scenario);
            }
            HandCategory::Soft => {
                assert_eq!(cards.len(), 2, "{:?}", scenario);
                assert_eq!(cards.iter().filter(|&&c| c == ACE).count(), 1, "{:?}", scenario);
                assert!((2..=9).contains(&cards[1]), "{:?}", scenario);
                assert_eq!(cards.iter().sum::<u8>(), scenario.total, "{:?}", scenario);
            }
            HandCategory::Hard => {
                assert_eq!(cards.iter().sum::<u8>(), scenario.total, "{:?}", scenario);
                assert!((5..=20).contains(&scenario.total), "{:?}", scenario);
                if scenario.total >= 12 {
                    assert!(cards.iter().all(|c| (2..=10).contains(c)), "{:?}", scenario);
                } else {
                    assert_eq!(cards.len(), 1, "{:?}", scenario);
                }
            }
        }
        assert!((2..=ACE).contains(&scenario.dealer_card), "{:?}", scenario);
    }

    #[test]
    fn hard_hands_sum_to_total_with_valid_cards() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..200 {
                for total in 12..=21u8 {
                    let cards = generate_hand_cards(HandCategory::Hard, total, &mut rng);
                    assert_eq!(cards.iter().sum::<u8>(), total, "{:?}", cards);
                    assert!(cards.len() >= 2, "{:?}", cards);
                    assert!(cards.iter().all(|c| (2..=10).contains(c)), "{:?}", cards);
                    assert!(!cards.contains(&ACE));
                }
            }
        }
    }

    #[test]
    fn low_hard_totals_are_single_cards() {
        let mut rng = StdRng::seed_from_u64(3);
        for total in 5..=10u8 {
            assert_eq!(generate_hand_cards(HandCategory::Hard, total, &mut rng), vec![total]);
        }
        // 11 is kept as a single card as well.
        assert_eq!(generate_hand_cards(HandCategory::Hard, 11, &mut rng), vec![11]);
    }

    #[test]
    fn high_hard_totals_can_need_three_cards() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut saw_three_or_more = false;
        for _ in 0..500 {
            let cards = generate_hand_cards(HandCategory::Hard, 21, &mut rng);
            assert_eq!(cards.iter().sum::<u8>(), 21);
            saw_three_or_more |= cards.len() >= 3;
        }
        assert!(saw_three_or_more);
    }

    #[test]
    fn soft_and_pair_hands() {
        let mut rng = StdRng::seed_from_u64(5);
        for total in 13..=20u8 {
            let cards = generate_hand_cards(HandCategory::Soft, total, &mut rng);
            assert_eq!(cards, vec![ACE, total - ACE]);
        }
        for value in PAIR_VALUES {
            let cards = generate_hand_cards(HandCategory::Pair, value, &mut rng);
            assert_eq!(cards, vec![value, value]);
        }
    }

    #[test]
    fn random_mode_covers_every_category_and_dealer_card() {
        let mut generator = ScenarioGenerator::with_seed(42);
        let mut categories = Vec::new();
        let mut dealer_cards = Vec::new();
        for _ in 0..2000 {
            let scenario = generator.generate(SessionMode::Random);
            check_scenario(&scenario);
            if !categories.contains(&scenario.category) {
                categories.push(scenario.category);
            }
            if !dealer_cards.contains(&scenario.dealer_card) {
                dealer_cards.push(scenario.dealer_card);
            }
        }
        assert_eq!(categories.len(), 3);
        dealer_cards.sort();
        assert_eq!(dealer_cards, (2..=11).collect::<Vec<u8>>());
    }

    #[test]
    fn dealer_group_mode_stays_in_group() {
        for strength in DealerStrength::iter() {
            let mut generator = ScenarioGenerator::with_seed(7);
            for _ in 0..300 {
                let scenario = generator.generate(SessionMode::DealerGroup(strength));
                check_scenario(&scenario);
                assert!(strength.cards().contains(&scenario.dealer_card));
            }
        }
    }

    #[test]
    fn hand_type_mode_fixes_category() {
        for category in HandCategory::iter() {
            let mut generator = ScenarioGenerator::with_seed(99);
            for _ in 0..300 {
                let scenario = generator.generate(SessionMode::HandType(category));
                check_scenario(&scenario);
                assert_eq!(scenario.category, category);
            }
        }
    }

    #[test]
    fn absolute_mode_draws_from_fixed_set() {
        let table = crate::StrategyTable::new();
        let mut generator = ScenarioGenerator::with_seed(1234);
        let mut seen = Vec::new();
        for _ in 0..1000 {
            let scenario = generator.generate(SessionMode::Absolute);
            let key = (scenario.category, scenario.total);
            assert!(ABSOLUTE_SCENARIOS.contains(&key), "{:?}", scenario);
            assert!(table.is_absolute_rule(scenario.category, scenario.total));
            check_scenario(&scenario);
            if !seen.contains(&key) {
                seen.push(key);
            }
        }
        assert_eq!(seen.len(), ABSOLUTE_SCENARIOS.len());
    }

    #[test]
    fn same_seed_gives_same_scenarios() {
        let mut a = ScenarioGenerator::with_seed(2024);
        let mut b = ScenarioGenerator::with_seed(2024);
        for _ in 0..50 {
            assert_eq!(a.generate(SessionMode::Random), b.generate(SessionMode::Random));
        }
    }
}
