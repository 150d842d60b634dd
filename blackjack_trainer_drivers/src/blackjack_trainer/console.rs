use std::io::{self, BufRead, StdinLock, Stdout, Write};

use blackjack_trainer::{
    card_label, Action, DealerStrength, Feedback, HandCategory, ProgressReport, Scenario,
    SessionKind, SessionSummary, Tally, TrainerConsole,
};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Session(SessionKind),
    Statistics,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    Choice(MenuChoice),
    Invalid,
    /// Input was closed (EOF).
    Closed,
}

/// Line based console on top of any reader and writer. The binary uses
/// stdin and stdout.
pub struct StdConsole<R, W> {
    input: R,
    output: W,
}

impl StdConsole<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        StdConsole::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        StdConsole { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    pub fn show_banner(&mut self) -> io::Result<()> {
        writeln!(self.output, "Blackjack Basic Strategy Trainer")?;
        writeln!(self.output, "{}", "=".repeat(40))
    }

    /// Writes the prompt and reads one line. None means the input is closed.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("input closed");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_number(&mut self, text: &str) -> io::Result<Option<u8>> {
        Ok(self.prompt(text)?.and_then(|line| line.parse().ok()))
    }

    pub fn read_menu_choice(&mut self) -> io::Result<MenuInput> {
        writeln!(self.output, "\nBlackjack Basic Strategy Trainer")?;
        writeln!(self.output, "1. Quick Practice (random)")?;
        writeln!(self.output, "2. Learn by Dealer Strength")?;
        writeln!(self.output, "3. Focus on Hand Types")?;
        writeln!(self.output, "4. Absolutes Drill")?;
        writeln!(self.output, "5. View Statistics")?;
        writeln!(self.output, "6. Quit")?;

        let line = match self.prompt("\nChoice (1-6): ")? {
            Some(line) => line,
            None => return Ok(MenuInput::Closed),
        };
        let choice = match line.parse::<u8>() {
            Ok(1) => MenuChoice::Session(SessionKind::Random),
            Ok(2) => MenuChoice::Session(SessionKind::Dealer),
            Ok(3) => MenuChoice::Session(SessionKind::Hand),
            Ok(4) => MenuChoice::Session(SessionKind::Absolute),
            Ok(5) => MenuChoice::Statistics,
            Ok(6) => MenuChoice::Quit,
            _ => return Ok(MenuInput::Invalid),
        };
        Ok(MenuInput::Choice(choice))
    }

    /// Prints the statistics. Returns true if the player asked to reset them.
    pub fn show_progress(&mut self, report: &ProgressReport) -> io::Result<bool> {
        writeln!(self.output, "\n{}", "=".repeat(50))?;
        writeln!(self.output, "SESSION STATISTICS")?;
        writeln!(self.output, "{}", "=".repeat(50))?;

        if report.overall.total == 0 {
            writeln!(self.output, "No practice attempts yet this session.")?;
            self.prompt("\nPress Enter to continue...")?;
            return Ok(false);
        }

        writeln!(
            self.output,
            "Overall: {}/{} ({:.1}%)",
            report.overall.correct,
            report.overall.total,
            report.overall.accuracy()
        )?;

        writeln!(self.output, "\nBy Hand Type:")?;
        for (category, tally) in &report.by_category {
            self.write_bucket(category.label(), tally)?;
        }
        writeln!(self.output, "\nBy Dealer Strength:")?;
        for (strength, tally) in &report.by_dealer_strength {
            self.write_bucket(strength.label(), tally)?;
        }

        let answer = self.prompt("\nPress Enter to continue (or 'r' + Enter to reset statistics): ")?;
        Ok(matches!(answer, Some(line) if line.eq_ignore_ascii_case("r")))
    }

    fn write_bucket(&mut self, label: &str, tally: &Tally) -> io::Result<()> {
        if tally.total == 0 {
            return Ok(());
        }
        writeln!(
            self.output,
            "  {}: {}/{} ({:.1}%)",
            label,
            tally.correct,
            tally.total,
            tally.accuracy()
        )
    }
}

impl<R: BufRead, W: Write> TrainerConsole for StdConsole<R, W> {
    fn on_session_begin(&mut self, mode_name: &str) -> io::Result<()> {
        writeln!(self.output, "\n{}", "=".repeat(40))?;
        writeln!(self.output, "Training Mode: {}", mode_name)?;
        writeln!(self.output, "{}", "=".repeat(40))?;
        writeln!(self.output, "(Press 'q' + Enter to quit at any time)")
    }

    fn choose_dealer_group(&mut self) -> io::Result<Option<DealerStrength>> {
        writeln!(self.output, "\nChoose dealer strength group to practice:")?;
        writeln!(self.output, "1. Weak cards (4, 5, 6) - 'Bust cards'")?;
        writeln!(self.output, "2. Medium cards (2, 3, 7, 8)")?;
        writeln!(self.output, "3. Strong cards (9, 10, A)")?;
        writeln!(self.output, "0. Cancel")?;

        let group = match self.prompt_number("\nChoice (0-3): ")? {
            Some(1) => Some(DealerStrength::Weak),
            Some(2) => Some(DealerStrength::Medium),
            Some(3) => Some(DealerStrength::Strong),
            _ => None,
        };
        Ok(group)
    }

    fn choose_hand_category(&mut self) -> io::Result<Option<HandCategory>> {
        writeln!(self.output, "\nChoose hand type to practice:")?;
        writeln!(self.output, "1. Hard totals (no ace or ace = 1)")?;
        writeln!(self.output, "2. Soft totals (ace = 11)")?;
        writeln!(self.output, "3. Pairs")?;
        writeln!(self.output, "0. Cancel")?;

        let category = match self.prompt_number("\nChoice (0-3): ")? {
            Some(1) => Some(HandCategory::Hard),
            Some(2) => Some(HandCategory::Soft),
            Some(3) => Some(HandCategory::Pair),
            _ => None,
        };
        Ok(category)
    }

    fn show_scenario(&mut self, scenario: &Scenario) -> io::Result<()> {
        writeln!(self.output, "\nDealer shows: {}", card_label(scenario.dealer_card))?;
        let cards: Vec<String> = scenario.cards.iter().map(|&card| card_label(card)).collect();
        writeln!(
            self.output,
            "Your hand: {} ({} {})",
            cards.join(", "),
            scenario.category.label(),
            scenario.total
        )
    }

    fn read_action(&mut self) -> io::Result<Option<Action>> {
        writeln!(self.output, "\nWhat's your move?")?;
        let line = self.prompt("(H)it, (S)tand, (D)ouble, s(P)lit: ")?;
        Ok(line.as_deref().and_then(Action::from_input))
    }

    fn show_feedback(&mut self, feedback: &Feedback) -> io::Result<bool> {
        if feedback.correct {
            writeln!(self.output, "\n✓ Correct!")?;
        } else {
            writeln!(self.output, "\n❌ Incorrect!")?;
            writeln!(self.output, "\nCorrect answer: {}", feedback.correct_action.label())?;
            writeln!(self.output, "Your answer: {}", feedback.user_action.label())?;
            writeln!(self.output, "\nPattern: {}", feedback.explanation)?;
        }

        let quit = match self.prompt("\nPress Enter to continue (or 'q' + Enter to quit): ")? {
            Some(line) => line.to_ascii_uppercase().starts_with('Q'),
            None => true,
        };
        Ok(quit)
    }

    fn on_session_end(&mut self, summary: &SessionSummary) -> io::Result<()> {
        writeln!(
            self.output,
            "\nSession complete! Final score: {}/{} ({:.1}%)",
            summary.correct,
            summary.total,
            summary.accuracy()
        )
    }
}
