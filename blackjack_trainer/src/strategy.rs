use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use crate::{Action, DealerStrength, HandCategory};

const HARD_MIN: u8 = 5;
const SOFT_MIN: u8 = 13;
const PAIR_MIN: u8 = 2;
const DEALER_MIN: u8 = 2;
const DEALER_MAX: u8 = 11;

/// Short memory aids shown to the player after a wrong answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    AlwaysSplit,
    NeverSplit,
    SoftEighteen,
    HardTwelve,
    DealerWeak,
    TeensVsStrong,
    General,
}

impl Mnemonic {
    pub fn text(&self) -> &'static str {
        match self {
            Mnemonic::AlwaysSplit => "Aces and eights, don't hesitate",
            Mnemonic::NeverSplit => "Tens and fives, keep them alive",
            Mnemonic::SoftEighteen => "A,7 is the tricky soft hand",
            Mnemonic::HardTwelve => "12 is the exception - only stand vs 4,5,6",
            Mnemonic::DealerWeak => "Dealer bust cards (4,5,6) = player gets greedy",
            Mnemonic::TeensVsStrong => "Teens stay vs weak, flee from strong",
            Mnemonic::General => "Follow basic strategy patterns",
        }
    }
}

/// Basic strategy for 4-8 decks, dealer stands on soft 17, double after
/// split allowed and no surrender.
///
/// Columns of every chart are the dealer up card from 2 to Ace (11).
#[derive(Debug, Clone)]
pub struct StrategyTable {
    hard_charts: [[Action; 10]; 17],
    soft_charts: [[Action; 10]; 9],
    pair_charts: [[Action; 10]; 10],
}

impl StrategyTable {
    pub fn new() -> StrategyTable {
        const H: Action = Action::Hit;
        const S: Action = Action::Stand;
        const D: Action = Action::Double;
        const P: Action = Action::Split;

        StrategyTable {
            hard_charts: [
                [H, H, H, H, H, H, H, H, H, H], // 5
                [H, H, H, H, H, H, H, H, H, H],
                [H, H, H, H, H, H, H, H, H, H],
                [H, H, H, H, H, H, H, H, H, H],
                [H, D, D, D, D, H, H, H, H, H], // 9
                [D, D, D, D, D, D, D, D, H, H],
                [D, D, D, D, D, D, D, D, D, H],
                [H, H, S, S, S, H, H, H, H, H], // 12
                [S, S, S, S, S, H, H, H, H, H],
                [S, S, S, S, S, H, H, H, H, H],
                [S, S, S, S, S, H, H, H, H, H],
                [S, S, S, S, S, H, H, H, H, H], // 16
                [S, S, S, S, S, S, S, S, S, S], // 17
                [S, S, S, S, S, S, S, S, S, S],
                [S, S, S, S, S, S, S, S, S, S],
                [S, S, S, S, S, S, S, S, S, S],
                [S, S, S, S, S, S, S, S, S, S], // 21
            ],
            soft_charts: [
                [H, H, H, D, D, H, H, H, H, H], // Ace + 2
                [H, H, H, D, D, H, H, H, H, H],
                [H, H, D, D, D, H, H, H, H, H],
                [H, H, D, D, D, H, H, H, H, H],
                [H, D, D, D, D, H, H, H, H, H], // Ace + 6
                [S, D, D, D, D, S, S, H, H, H], // Ace + 7
                [S, S, S, S, S, S, S, S, S, S],
                [S, S, S, S, S, S, S, S, S, S],
                [S, S, S, S, S, S, S, S, S, S], // Ace + 10
            ],
            pair_charts: [
                [P, P, P, P, P, P, H, H, H, H], // Double 2
                [P, P, P, P, P, P, H, H, H, H],
                [H, H, H, P, P, H, H, H, H, H],
                [D, D, D, D, D, D, D, D, H, H], // Double 5
                [P, P, P, P, P, H, H, H, H, H],
                [P, P, P, P, P, P, H, H, H, H],
                [P, P, P, P, P, P, P, P, P, P], // Double 8
                [P, P, P, P, P, S, P, P, S, S],
                [S, S, S, S, S, S, S, S, S, S], // Double 10
                [P, P, P, P, P, P, P, P, P, P], // Double Ace
            ],
        }
    }

    /// Looks up the optimal action. Keys outside the charts (a hard 4, a
    /// soft 12, a dealer 1, ...) fall back to `Hit`; callers are expected to
    /// query only totals that can occur for the category.
    pub fn correct_action(&self, category: HandCategory, total: u8, dealer_card: u8) -> Action {
        if !(DEALER_MIN..=DEALER_MAX).contains(&dealer_card) {
            return Action::Hit;
        }
        let col = (dealer_card - DEALER_MIN) as usize;

        let row = match category {
            HandCategory::Hard => lookup_row(&self.hard_charts, total, HARD_MIN),
            HandCategory::Soft => lookup_row(&self.soft_charts, total, SOFT_MIN),
            HandCategory::Pair => lookup_row(&self.pair_charts, total, PAIR_MIN),
        };

        match row {
            Some(row) => row[col],
            None => Action::Hit,
        }
    }

    /// Whether the right play for this hand never depends on the dealer card.
    pub fn is_absolute_rule(&self, category: HandCategory, total: u8) -> bool {
        match category {
            HandCategory::Pair => matches!(total, 5 | 8 | 10 | 11),
            HandCategory::Hard => total >= 17,
            HandCategory::Soft => total >= 19,
        }
    }

    /// Picks the mnemonic for a scenario. Hand specific mnemonics win over
    /// the weak dealer one, which wins over teens against a strong dealer.
    pub fn mnemonic(&self, category: HandCategory, total: u8, dealer_card: u8) -> Mnemonic {
        match (category, total) {
            (HandCategory::Pair, 11) | (HandCategory::Pair, 8) => Mnemonic::AlwaysSplit,
            (HandCategory::Pair, 10) | (HandCategory::Pair, 5) => Mnemonic::NeverSplit,
            (HandCategory::Soft, 18) => Mnemonic::SoftEighteen,
            (HandCategory::Hard, 12) => Mnemonic::HardTwelve,
            _ => match DealerStrength::from_card(dealer_card) {
                DealerStrength::Weak => Mnemonic::DealerWeak,
                DealerStrength::Strong if (13..=16).contains(&total) => Mnemonic::TeensVsStrong,
                _ => Mnemonic::General,
            },
        }
    }

    pub fn explanation(&self, category: HandCategory, total: u8, dealer_card: u8) -> &'static str {
        self.mnemonic(category, total, dealer_card).text()
    }

    pub fn dealer_groups(&self) -> BTreeMap<DealerStrength, &'static [u8]> {
        DealerStrength::iter()
            .map(|strength| (strength, strength.cards()))
            .collect()
    }
}

impl Default for StrategyTable {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup_row<const N: usize>(
    charts: &[[Action; 10]; N],
    total: u8,
    min_total: u8,
) -> Option<&[Action; 10]> {
    let row = total.checked_sub(min_total)? as usize;
    charts.get(row)
}
