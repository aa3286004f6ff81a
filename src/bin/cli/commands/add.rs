use anyhow::Result;

use crate::app::{format_tags, App};
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    question: &str,
    answer: &str,
    tags: &str,
    format: &OutputFormat,
) -> Result<()> {
    let id = app.session.add(question, answer, tags)?;
    let card = app.find_card(&id)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => {
            println!("Added card \"{}\"", card.question);
            if !card.tags.is_empty() {
                println!("  Tags: {}", format_tags(&card.tags));
            }
            println!("  ID: {}", card.id);
        }
    }

    Ok(())
}
