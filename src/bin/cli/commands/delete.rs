use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{bail, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, id: &str, yes: bool, format: &OutputFormat) -> Result<()> {
    let card = app.find_card(id)?;

    if !yes && !confirm(&format!("Delete \"{}\"?", card.question))? {
        println!("Cancelled.");
        return Ok(());
    }

    app.session.delete(&card.id);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deleted": card.id,
                "remaining": app.session.deck().len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Deleted card {} ({} left)", card.id, app.session.deck().len());
        }
    }

    Ok(())
}

/// Ask a yes/no question on the terminal
fn confirm(prompt: &str) -> Result<bool> {
    if !io::stdin().is_terminal() {
        bail!("Refusing to delete without confirmation; pass --yes");
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
