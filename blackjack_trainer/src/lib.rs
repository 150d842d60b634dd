pub mod scenario;
pub mod session;
pub mod stats;
pub mod strategy;

use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use strum_macros::EnumIter;

pub use scenario::{generate_hand_cards, Scenario, ScenarioGenerator, SessionMode};
pub use session::{
    Feedback, SessionKind, SessionLimits, SessionOutcome, SessionSummary, Trainer,
    TrainerConsole, TrainerSettings,
};
pub use stats::{ProgressReport, SessionStats, Tally};
pub use strategy::{Mnemonic, StrategyTable};

/// Card value used for an Ace. Dealer up cards and hand cards are given in
/// blackjack values, i.e. 2 to 10, and 11 for an Ace.
pub const ACE: u8 = 11;

/// The kind of hand the player holds, which selects the chart to look up.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    Serialize_enum_str,
    Deserialize_enum_str,
)]
pub enum HandCategory {
    #[serde(rename = "hard")]
    Hard,
    #[serde(rename = "soft")]
    Soft,
    #[serde(rename = "pair")]
    Pair,
}

impl HandCategory {
    /// Capitalized name for display, e.g. "Hard".
    pub fn label(&self) -> &'static str {
        match self {
            HandCategory::Hard => "Hard",
            HandCategory::Soft => "Soft",
            HandCategory::Pair => "Pair",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize_enum_str, Deserialize_enum_str)]
pub enum Action {
    #[serde(rename = "hit")]
    Hit,
    #[serde(rename = "stand")]
    Stand,
    #[serde(rename = "double")]
    Double,
    #[serde(rename = "split")]
    Split,
}

impl Action {
    /// Maps a line typed by the user to an action. Only the first character
    /// matters and case is ignored. Returns None for empty input, `q`, or
    /// anything unrecognised, all of which mean the user wants to quit.
    pub fn from_input(input: &str) -> Option<Action> {
        let first = input.trim().chars().next()?.to_ascii_uppercase();
        match first {
            'H' => Some(Action::Hit),
            'S' => Some(Action::Stand),
            'D' => Some(Action::Double),
            'P' => Some(Action::Split),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Hit => "HIT",
            Action::Stand => "STAND",
            Action::Double => "DOUBLE",
            Action::Split => "SPLIT",
        }
    }
}

/// Grouping of the dealer's up card by how likely the dealer is to bust.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    Serialize_enum_str,
    Deserialize_enum_str,
)]
pub enum DealerStrength {
    #[serde(rename = "weak")]
    Weak,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "strong")]
    Strong,
}

impl DealerStrength {
    pub fn from_card(dealer_card: u8) -> DealerStrength {
        match dealer_card {
            4..=6 => DealerStrength::Weak,
            2 | 3 | 7 | 8 => DealerStrength::Medium,
            _ => DealerStrength::Strong,
        }
    }

    /// The dealer up cards belonging to this group.
    pub fn cards(&self) -> &'static [u8] {
        match self {
            DealerStrength::Weak => &[4, 5, 6],
            DealerStrength::Medium => &[2, 3, 7, 8],
            DealerStrength::Strong => &[9, 10, ACE],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DealerStrength::Weak => "Weak",
            DealerStrength::Medium => "Medium",
            DealerStrength::Strong => "Strong",
        }
    }
}

/// Difficulty label accepted from the command line and config file. It is
/// carried through the settings but does not change table lookups or
/// scenario generation yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_enum_str, Deserialize_enum_str)]
pub enum Difficulty {
    #[serde(rename = "easy")]
    Easy,
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "hard")]
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Normal
    }
}

/// Renders a card value the way a player reads it: "A" for an Ace, the
/// number otherwise.
pub fn card_label(card: u8) -> String {
    match card {
        ACE => String::from("A"),
        n => n.to_string(),
    }
}
