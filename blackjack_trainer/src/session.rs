use std::io;

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use tracing::{debug, info};

use crate::{
    scenario::{Scenario, ScenarioGenerator, SessionMode},
    stats::SessionStats,
    strategy::StrategyTable,
    Action, DealerStrength, Difficulty, HandCategory,
};

/// The four kinds of practice sessions, as selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_enum_str, Deserialize_enum_str)]
pub enum SessionKind {
    #[serde(rename = "random")]
    Random,
    #[serde(rename = "dealer")]
    Dealer,
    #[serde(rename = "hand")]
    Hand,
    #[serde(rename = "absolute")]
    Absolute,
}

impl SessionKind {
    pub const ALL: [SessionKind; 4] = [
        SessionKind::Random,
        SessionKind::Dealer,
        SessionKind::Hand,
        SessionKind::Absolute,
    ];

    pub fn mode_name(&self) -> &'static str {
        match self {
            SessionKind::Random => "random",
            SessionKind::Dealer => "dealer_groups",
            SessionKind::Hand => "hand_types",
            SessionKind::Absolute => "absolutes",
        }
    }
}

/// Number of questions asked per session kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionLimits {
    pub random: u32,
    pub dealer_groups: u32,
    pub hand_types: u32,
    pub absolutes: u32,
}

impl SessionLimits {
    pub fn for_kind(&self, kind: SessionKind) -> u32 {
        match kind {
            SessionKind::Random => self.random,
            SessionKind::Dealer => self.dealer_groups,
            SessionKind::Hand => self.hand_types,
            SessionKind::Absolute => self.absolutes,
        }
    }
}

impl Default for SessionLimits {
    fn default() -> Self {
        SessionLimits {
            random: 50,
            dealer_groups: 50,
            hand_types: 50,
            absolutes: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrainerSettings {
    pub difficulty: Difficulty,
    pub limits: SessionLimits,
    /// Seed for scenario generation. Fresh entropy is used when absent.
    pub rng_seed: Option<u64>,
}

/// What the player is told after answering.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub correct: bool,
    pub user_action: Action,
    pub correct_action: Action,
    pub explanation: &'static str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub correct: u32,
    pub total: u32,
    /// The player stopped before the question budget ran out.
    pub quit_early: bool,
}

impl SessionSummary {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The player cancelled the setup menu, no question was asked.
    Declined,
    Finished(SessionSummary),
}

/// The presentation side of a training session. Implementations render to
/// and read from whatever the player uses; the trainer only decides what
/// happens next.
pub trait TrainerConsole {
    fn on_session_begin(&mut self, mode_name: &str) -> io::Result<()>;

    /// Returns None when the player cancels.
    fn choose_dealer_group(&mut self) -> io::Result<Option<DealerStrength>>;

    /// Returns None when the player cancels.
    fn choose_hand_category(&mut self) -> io::Result<Option<HandCategory>>;

    fn show_scenario(&mut self, scenario: &Scenario) -> io::Result<()>;

    /// Returns None when the player wants to quit.
    fn read_action(&mut self) -> io::Result<Option<Action>>;

    /// Returns true when the player wants to quit.
    fn show_feedback(&mut self, feedback: &Feedback) -> io::Result<bool>;

    fn on_session_end(&mut self, summary: &SessionSummary) -> io::Result<()>;
}

/// Runs practice sessions: draws scenarios, checks answers against the
/// strategy table and records results.
#[derive(Debug)]
pub struct Trainer<R: Rng = StdRng> {
    table: StrategyTable,
    generator: ScenarioGenerator<R>,
    settings: TrainerSettings,
}

impl Trainer<StdRng> {
    pub fn new(settings: TrainerSettings) -> Self {
        let generator = match settings.rng_seed {
            Some(seed) => ScenarioGenerator::with_seed(seed),
            None => ScenarioGenerator::new(),
        };
        Trainer::with_generator(settings, generator)
    }
}

impl<R: Rng> Trainer<R> {
    pub fn with_generator(settings: TrainerSettings, generator: ScenarioGenerator<R>) -> Self {
        Trainer {
            table: StrategyTable::new(),
            generator,
            settings,
        }
    }

    pub fn table(&self) -> &StrategyTable {
        &self.table
    }

    pub fn settings(&self) -> &TrainerSettings {
        &self.settings
    }

    /// Runs one session until the question budget is used up or the player
    /// quits. Every answered question is recorded into `stats`.
    pub fn run_session<C: TrainerConsole + ?Sized>(
        &mut self,
        kind: SessionKind,
        stats: &mut SessionStats,
        console: &mut C,
    ) -> io::Result<SessionOutcome> {
        console.on_session_begin(kind.mode_name())?;

        let mode = match kind {
            SessionKind::Random => Some(SessionMode::Random),
            SessionKind::Dealer => console.choose_dealer_group()?.map(SessionMode::DealerGroup),
            SessionKind::Hand => console.choose_hand_category()?.map(SessionMode::HandType),
            SessionKind::Absolute => Some(SessionMode::Absolute),
        };
        let mode = match mode {
            Some(mode) => mode,
            None => {
                info!(%kind, "session setup declined");
                return Ok(SessionOutcome::Declined);
            }
        };

        let max_questions = self.settings.limits.for_kind(kind);
        info!(%kind, ?mode, max_questions, difficulty = %self.settings.difficulty, "session started");

        let mut summary = SessionSummary::default();
        while summary.total < max_questions {
            let scenario = self.generator.generate(mode);
            console.show_scenario(&scenario)?;

            let user_action = match console.read_action()? {
                Some(action) => action,
                None => {
                    summary.quit_early = true;
                    break;
                }
            };

            let correct_action =
                self.table
                    .correct_action(scenario.category, scenario.total, scenario.dealer_card);
            let feedback = Feedback {
                correct: user_action == correct_action,
                user_action,
                correct_action,
                explanation: self.table.explanation(
                    scenario.category,
                    scenario.total,
                    scenario.dealer_card,
                ),
            };
            debug!(?user_action, ?correct_action, correct = feedback.correct, "answer checked");

            stats.record(
                scenario.category,
                DealerStrength::from_card(scenario.dealer_card),
                feedback.correct,
            );
            summary.total += 1;
            if feedback.correct {
                summary.correct += 1;
            }

            if console.show_feedback(&feedback)? {
                summary.quit_early = summary.total < max_questions;
                break;
            }
        }

        info!(
            %kind,
            correct = summary.correct,
            total = summary.total,
            quit_early = summary.quit_early,
            "session finished"
        );
        if summary.total > 0 {
            console.on_session_end(&summary)?;
        }
        Ok(SessionOutcome::Finished(summary))
    }
}
