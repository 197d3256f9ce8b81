use std::path::Path;

pub fn run(players: &Path) -> Result<(), String> {
    let roster = super::load_roster(players)?;

    if roster.is_empty() {
        println!("  No players found.");
        return Ok(());
    }

    println!("{}", super::standings_table(&roster));
    Ok(())
}
