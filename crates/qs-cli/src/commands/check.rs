use std::path::Path;

pub fn run(quiz: &Path, players: &Path) -> Result<(), String> {
    let catalog = super::load_catalog(Some(quiz), false)?;
    let roster = super::load_roster(players)?;

    let playable = catalog.non_empty_slots().len();
    if playable == 0 {
        return Err("the quiz has no questions to play".into());
    }
    if roster.is_empty() {
        return Err("the roster has no players".into());
    }

    println!("  All checks passed.");
    println!(
        "  {} themes, {} questions, {} playable slots",
        catalog.themes().len(),
        catalog.question_count(),
        playable
    );
    println!("  {} players", roster.len());

    Ok(())
}
