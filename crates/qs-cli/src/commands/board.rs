use std::path::Path;

pub fn run(quiz: Option<&Path>, sample: bool) -> Result<(), String> {
    let catalog = super::load_catalog(quiz, sample)?;

    if catalog.is_empty() {
        println!("  No themes found.");
        return Ok(());
    }

    println!("{}", super::board_table(&catalog));
    println!();
    println!(
        "  {} themes, {} questions",
        catalog.themes().len(),
        catalog.question_count()
    );

    Ok(())
}
