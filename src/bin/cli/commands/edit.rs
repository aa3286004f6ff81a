use anyhow::Result;

use flashdeck_lib::flashcards::store::tags_text;

use crate::app::{format_tags, App};
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    id: &str,
    question: Option<&str>,
    answer: Option<&str>,
    tags: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let existing = app.find_card(id)?;

    // Edits replace every field, so fill in the ones not given
    let question = question.unwrap_or(&existing.question);
    let answer = answer.unwrap_or(&existing.answer);
    let tags = tags
        .map(str::to_string)
        .unwrap_or_else(|| tags_text(&existing.tags));

    app.session.edit(&existing.id, question, answer, &tags)?;
    let card = app.find_card(&existing.id)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => {
            println!("Updated card {}", card.id);
            println!("  Question: {}", card.question);
            println!("  Answer: {}", card.answer);
            if !card.tags.is_empty() {
                println!("  Tags: {}", format_tags(&card.tags));
            }
        }
    }

    Ok(())
}
