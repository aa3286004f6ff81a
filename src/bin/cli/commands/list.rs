use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &mut App, tag: Option<String>, format: &OutputFormat, use_color: bool) -> Result<()> {
    app.session.set_filter(tag.clone());
    let cards = app.session.view().view(app.session.deck().cards());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                match tag {
                    Some(t) => println!("No cards tagged #{}.", t),
                    None => println!("No cards."),
                }
                return Ok(());
            }

            for (position, card) in cards.iter().enumerate() {
                println!("{}", terminal::render_summary(position, card, use_color));
            }

            println!("\n{} cards", cards.len());
        }
    }

    Ok(())
}
