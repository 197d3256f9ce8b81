use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use qs_session::{SessionBuilder, SessionConfig};

use crate::console::Console;

pub fn run(
    quiz: Option<&Path>,
    sample: bool,
    players: &Path,
    bombs: i64,
    seed: u64,
    bomb_chance: f64,
) -> Result<(), String> {
    let catalog = super::load_catalog(quiz, sample)?;
    let roster = super::load_roster(players)?;
    let config = SessionConfig::default()
        .with_seed(seed)
        .with_bomb_chance(bomb_chance);

    let mut builder = SessionBuilder::new().with_config(config);
    builder.load_catalog(catalog);
    builder.load_roster(roster);
    builder
        .configure_bombs()
        .map_err(|e| format!("failed to start session: {e}"))?;
    let session = builder
        .start(bombs)
        .map_err(|e| format!("failed to start session: {e}"))?;

    println!("  {} Quiz Session", "Starting".bold());
    println!(
        "  Players: {} | Bombs: {} | Seed: {seed}",
        session.roster().len(),
        session.remaining_bombs()
    );
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let mut console = Console::new(session);
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match console.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    return Ok(());
                }
            }
            Err(e) => {
                log::warn!("'{input}' rejected: {e}");
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    println!();
    println!("{}", super::standings_table(console.session().roster()));
    Ok(())
}
