mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flashdeck-cli", about = "Flashdeck flashcard CLI and TUI", version)]
struct Cli {
    /// Use a specific config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List cards in deck order
    List {
        /// Only cards carrying this tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// Show a card with its answer
    Show {
        /// Card id (unique prefix match)
        id: String,
    },

    /// Add a card to the end of the deck
    Add {
        question: String,
        answer: String,
        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,
    },

    /// Edit a card; omitted fields keep their current value
    Edit {
        /// Card id (unique prefix match)
        id: String,
        #[arg(long)]
        question: Option<String>,
        #[arg(long)]
        answer: Option<String>,
        /// Comma-separated tags (replaces all tags)
        #[arg(long)]
        tags: Option<String>,
    },

    /// Delete a card
    Delete {
        /// Card id (unique prefix match)
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// List tags with counts
    Tags,

    /// Launch interactive study TUI
    #[cfg(feature = "tui")]
    Study,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let mut app = app::App::new(cli.config.as_deref()).await?;

    run_and_finish(&mut app, cli.command, &cli.format, use_color).await
}

/// Run `command`, then wait for pending deck writes whether or not it failed
async fn run_and_finish(
    app: &mut app::App,
    command: Option<Command>,
    format: &OutputFormat,
    use_color: bool,
) -> anyhow::Result<()> {
    let result = run_command(app, command, format, use_color);
    app.finish().await;
    result
}

fn run_command(
    app: &mut app::App,
    command: Option<Command>,
    format: &OutputFormat,
    use_color: bool,
) -> anyhow::Result<()> {
    match command {
        None => {
            // No subcommand → launch TUI
            #[cfg(feature = "tui")]
            {
                tokio::task::block_in_place(|| tui::run(app))
            }
            #[cfg(not(feature = "tui"))]
            {
                anyhow::bail!("TUI not available (built without 'tui' feature). Use a subcommand, or run with --help for usage.")
            }
        }
        Some(Command::List { tag }) => commands::list::run(app, tag, format, use_color),
        Some(Command::Show { id }) => commands::show::run(app, &id, format, use_color),
        Some(Command::Add { question, answer, tags }) => {
            commands::add::run(app, &question, &answer, &tags, format)
        }
        Some(Command::Edit { id, question, answer, tags }) => commands::edit::run(
            app,
            &id,
            question.as_deref(),
            answer.as_deref(),
            tags.as_deref(),
            format,
        ),
        Some(Command::Delete { id, yes }) => commands::delete::run(app, &id, yes, format),
        Some(Command::Tags) => commands::tags::run(app, format),
        #[cfg(feature = "tui")]
        Some(Command::Study) => tokio::task::block_in_place(|| tui::run(app)),
    }
}
