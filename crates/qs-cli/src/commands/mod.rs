pub mod board;
pub mod check;
pub mod play;
pub mod standings;

use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use qs_core::{Catalog, Difficulty, Roster};

/// Load the quiz from a file, or the bundled sample.
fn load_catalog(quiz: Option<&Path>, sample: bool) -> Result<Catalog, String> {
    match quiz {
        Some(path) => qs_core::load_catalog(path).map_err(|e| e.to_string()),
        None if sample => qs_core::sample_catalog().map_err(|e| e.to_string()),
        None => Err("no quiz given (pass a file or --sample)".into()),
    }
}

fn load_roster(players: &Path) -> Result<Roster, String> {
    qs_core::load_roster(players).map_err(|e| e.to_string())
}

/// Themes × difficulties with question counts.
fn board_table(catalog: &Catalog) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["Theme".to_string()];
    header.extend(Difficulty::ALL.iter().map(|d| d.to_string()));
    table.set_header(header);

    for theme in catalog.themes() {
        let mut row = vec![theme.name.clone()];
        for d in Difficulty::ALL {
            let count = theme.questions(d).len();
            let cell = if count == 0 {
                "-".to_string()
            } else {
                count.to_string()
            };
            row.push(cell);
        }
        table.add_row(row);
    }
    table
}

/// Scoreboard sorted by score, leader first.
fn standings_table(roster: &Roster) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Player", "Score"]);
    for (i, player) in roster.standings().iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            player.name.clone(),
            player.score.to_string(),
        ]);
    }
    table
}
