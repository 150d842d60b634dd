mod console;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use blackjack_trainer::{Difficulty, SessionKind, SessionStats, Trainer, TrainerSettings};
use blackjack_trainer_drivers::{init_tracing, parse_config_from_file, Config, ConfigError};
use clap::Parser;
use console::{MenuChoice, MenuInput, StdConsole};
use rand::Rng;
use tracing::{debug, info};

const DEFAULT_CONFIG_PATH: &str = "~/.blackjack_trainer.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// Start one session directly: random, dealer, hand or absolute
    #[arg(short, long)]
    session: Option<String>,

    /// easy, normal or hard
    #[arg(short, long)]
    difficulty: Option<String>,

    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Seed for reproducible scenarios
    #[arg(long)]
    seed: Option<u64>,

    /// More logging on stderr, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// The default config file is optional. A path given explicitly must exist.
fn load_config(config: &str) -> Result<Config, ConfigError> {
    if config != DEFAULT_CONFIG_PATH {
        return parse_config_from_file(Path::new(config));
    }

    let config_file_path: Option<PathBuf> =
        home::home_dir().map(|home_dir| home_dir.join(".blackjack_trainer.yml"));
    match config_file_path {
        Some(path) if path.is_file() => parse_config_from_file(&path),
        _ => {
            debug!("no config file, using defaults");
            Ok(Config::default())
        }
    }
}

fn load_settings(args: &CommandLineArgs) -> anyhow::Result<TrainerSettings> {
    let config = load_config(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config))?;
    let mut settings = TryInto::<TrainerSettings>::try_into(config.trainer)
        .map_err(ConfigError::from)
        .context("failed to read trainer settings")?;

    if let Some(difficulty) = &args.difficulty {
        settings.difficulty = difficulty
            .parse::<Difficulty>()
            .with_context(|| format!("invalid difficulty: {}", difficulty))?;
    }
    if args.seed.is_some() {
        settings.rng_seed = args.seed;
    }
    Ok(settings)
}

/// The interactive main menu. Returns when the player quits or input closes.
fn run_menu<R, I, O>(
    trainer: &mut Trainer<R>,
    stats: &mut SessionStats,
    console: &mut StdConsole<I, O>,
) -> anyhow::Result<()>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    loop {
        match console.read_menu_choice()? {
            MenuInput::Choice(MenuChoice::Session(kind)) => {
                trainer.run_session(kind, stats, console)?;
            }
            MenuInput::Choice(MenuChoice::Statistics) => {
                if console.show_progress(&stats.report())? {
                    stats.reset();
                    console.say("Statistics reset.")?;
                    info!("statistics reset");
                }
            }
            MenuInput::Choice(MenuChoice::Quit) | MenuInput::Closed => {
                console.say("\nThanks for practicing! Keep those strategies sharp!")?;
                return Ok(());
            }
            MenuInput::Invalid => console.say("Invalid choice. Please try again.")?,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = CommandLineArgs::parse();
    init_tracing(args.verbose);

    let settings = load_settings(&args)?;
    info!(?settings, "starting trainer");

    let mut console = StdConsole::stdio();
    console.show_banner()?;

    let mut stats = SessionStats::new();
    let mut trainer = Trainer::new(settings);

    match &args.session {
        Some(session) => {
            let kind = match session.parse::<SessionKind>() {
                Ok(kind) => kind,
                Err(_) => {
                    console.say(&format!("Invalid session type: {}", session))?;
                    console.say("Valid types: random, dealer, hand, absolute")?;
                    process::exit(1);
                }
            };
            trainer.run_session(kind, &mut stats, &mut console)?;
        }
        None => run_menu(&mut trainer, &mut stats, &mut console)?,
    }

    Ok(())
}
