//! CLI frontend for the Quizshow moderator.

mod commands;
mod console;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "qs",
    about = "Quizshow: a scoreboard and question picker for party quizzes",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a quiz and a players file and report what they contain
    Check {
        /// Quiz document (JSON)
        quiz: PathBuf,

        /// Players document (JSON)
        players: PathBuf,
    },

    /// Show the quiz board: question counts per theme and difficulty
    Board {
        /// Quiz document (JSON)
        quiz: Option<PathBuf>,

        /// Use the bundled sample quiz
        #[arg(long, conflicts_with = "quiz")]
        sample: bool,
    },

    /// Show the scoreboard for a players file
    Standings {
        /// Players document (JSON)
        players: PathBuf,
    },

    /// Run an interactive session
    Play {
        /// Players document (JSON)
        players: PathBuf,

        /// Quiz document (JSON)
        #[arg(short, long, required_unless_present = "sample")]
        quiz: Option<PathBuf>,

        /// Use the bundled sample quiz
        #[arg(long, conflicts_with = "quiz")]
        sample: bool,

        /// Number of bomb questions allowed
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        bombs: i64,

        /// RNG seed for reproducible draws
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Chance (0.0-1.0) that a draw becomes a bomb while bombs remain
        #[arg(long, default_value = "0.3")]
        bomb_chance: f64,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { quiz, players } => commands::check::run(&quiz, &players),
        Commands::Board { quiz, sample } => commands::board::run(quiz.as_deref(), sample),
        Commands::Standings { players } => commands::standings::run(&players),
        Commands::Play {
            players,
            quiz,
            sample,
            bombs,
            seed,
            bomb_chance,
        } => commands::play::run(quiz.as_deref(), sample, &players, bombs, seed, bomb_chance),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
