//! `notesai` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the configured store.
//! - Drive the core command interface and render results.

mod commands;
mod config;

use clap::{Args, Parser, Subcommand};
use commands::Output;
use config::{AppConfig, ConfigArgs};
use log::{error, warn};
use notesai_core::{init_logging, NoteService};
use std::process::ExitCode;

/// Personal notes with tags, search and heuristic summaries.
#[derive(Parser, Debug)]
#[command(name = "notesai", version, about)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a note
    New(NewArgs),
    /// Replace fields of an existing note
    Edit(EditArgs),
    /// Delete a note
    Rm(IdArgs),
    /// Show one note
    Show(IdArgs),
    /// List all notes, newest first
    List,
    /// Search notes by text and filter
    Search(SearchArgs),
    /// List tags used across notes
    Tags(TagsArgs),
    /// Generate and store a summary for a note
    Summarize(SummarizeArgs),
    /// Print the core version
    Version,
}

#[derive(Args, Debug)]
struct NewArgs {
    /// Note title (blank becomes "Untitled Note")
    #[arg(short, long, default_value = "")]
    title: String,
    /// Note body
    #[arg(short, long, default_value = "")]
    content: String,
    /// Tag (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,
    /// Summary text to attach
    #[arg(long)]
    summary: Option<String>,
}

#[derive(Args, Debug)]
struct EditArgs {
    /// Note id or unique id prefix
    id: String,
    #[arg(short, long)]
    title: Option<String>,
    #[arg(short, long)]
    content: Option<String>,
    /// Replace the tag set (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,
    /// Remove every tag
    #[arg(long, conflicts_with = "tags")]
    clear_tags: bool,
    #[arg(long)]
    summary: Option<String>,
    /// Remove the summary
    #[arg(long, conflicts_with = "summary")]
    clear_summary: bool,
}

#[derive(Args, Debug)]
struct IdArgs {
    /// Note id or unique id prefix
    id: String,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Text matched against title, content and tags (case-insensitive)
    #[arg(default_value = "")]
    text: String,
    /// Filter: all | summarized | tag:<name>
    #[arg(short, long, default_value = "all")]
    filter: String,
}

#[derive(Args, Debug)]
struct TagsArgs {
    /// Include note counts per tag
    #[arg(long)]
    counts: bool,
}

#[derive(Args, Debug)]
struct SummarizeArgs {
    /// Note id or unique id prefix
    id: String,
    /// concise | bullet | simplified | detailed | qa | flashcards | outline | keywords | actionable
    #[arg(short, long, default_value = "concise")]
    style: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Command::Version = cli.command {
        println!("notesai {}", notesai_core::core_version());
        return Ok(());
    }

    let config = AppConfig::resolve(cli.config)?;
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    let mut service = NoteService::open(config.open_store()?);
    if let Some(err) = service.load_warning() {
        warn!(
            "event=store_load module=cli status=recovered malformed={} error={err}",
            err.is_malformed()
        );
        eprintln!("warning: stored notes could not be read ({err}); starting with an empty collection");
    }

    let out = Output::new(cli.json);
    match cli.command {
        Command::New(args) => commands::create(&mut service, &out, args),
        Command::Edit(args) => commands::edit(&mut service, &out, args),
        Command::Rm(args) => commands::delete(&mut service, &out, &args.id),
        Command::Show(args) => commands::show(&service, &out, &args.id),
        Command::List => commands::search(&service, &out, "", "all"),
        Command::Search(args) => commands::search(&service, &out, &args.text, &args.filter),
        Command::Tags(args) => commands::tags(&service, &out, args.counts),
        Command::Summarize(args) => commands::summarize(&mut service, &out, &args.id, &args.style),
        Command::Version => Ok(()),
    }
}
