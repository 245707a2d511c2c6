//! CLI binary for confsched.

use anyhow::Context;
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use confsched::{AppConfig, FileStore, ListFilter, ScheduleEntry, ScheduleStore};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// confsched: conference schedule with starred favorites.
#[derive(Parser)]
#[command(name = "confsched", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Print the cached schedule.
    List {
        /// Only starred entries.
        #[arg(long)]
        starred: bool,
        /// Hide entries that have already finished.
        #[arg(long)]
        upcoming: bool,
    },

    /// Fetch the schedule page and replace the cached schedule.
    Update,

    /// Print one entry with its description.
    Show {
        /// Exact entry title.
        title: String,
    },

    /// Star an entry.
    Star {
        /// Exact entry title.
        title: String,
    },

    /// Unstar an entry.
    Unstar {
        /// Exact entry title.
        title: String,
    },

    /// Flip the starred state of an entry.
    Toggle {
        /// Exact entry title.
        title: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so listings on stdout stay clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("confsched=info,confsched_scrape=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let storage = FileStore::new(config.storage_dir());
    let mut store = ScheduleStore::new(storage, config.source)?;

    match cli.command.unwrap_or(Command::List {
        starred: false,
        upcoming: false,
    }) {
        Command::List { starred, upcoming } => list(
            &mut store,
            ListFilter {
                starred_only: starred,
                upcoming_only: upcoming,
            },
        ),
        Command::Update => {
            tracing::info!(url = %store.source().url, "fetching schedule");
            let count = store.update().await?.len();
            println!("Fetched {count} entries");
            Ok(())
        }
        Command::Show { title } => show(&mut store, &title),
        Command::Star { title } => {
            let entry = lookup(&mut store, &title)?;
            warn_if_not_starable(&entry);
            store.add_star(&entry)?;
            println!("Starred \"{title}\"");
            Ok(())
        }
        Command::Unstar { title } => {
            let entry = lookup(&mut store, &title)?;
            store.remove_star(&entry)?;
            println!("Unstarred \"{title}\"");
            Ok(())
        }
        Command::Toggle { title } => {
            let entry = lookup(&mut store, &title)?;
            if store.toggle_star(&entry)? {
                warn_if_not_starable(&entry);
                println!("Starred \"{title}\"");
            } else {
                println!("Unstarred \"{title}\"");
            }
            Ok(())
        }
    }
}

/// Explicit path must exist; the default path is optional.
fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<AppConfig> {
    if let Some(path) = path {
        return AppConfig::from_file(path)
            .with_context(|| format!("cannot load config {}", path.display()));
    }
    let default_path = AppConfig::default_config_path();
    if default_path.exists() {
        AppConfig::from_file(&default_path)
            .with_context(|| format!("cannot load config {}", default_path.display()))
    } else {
        Ok(AppConfig::default())
    }
}

fn lookup(store: &mut ScheduleStore<FileStore>, title: &str) -> anyhow::Result<ScheduleEntry> {
    store
        .find_by_title(title)?
        .cloned()
        .with_context(|| format!("no entry titled \"{title}\" in the schedule"))
}

fn warn_if_not_starable(entry: &ScheduleEntry) {
    if !entry.kind.is_starable() {
        println!("Note: {} entries are not usually starred", entry.kind);
    }
}

fn list(store: &mut ScheduleStore<FileStore>, filter: ListFilter) -> anyhow::Result<()> {
    for row in store.list_entries(filter, Utc::now())? {
        let entry = row.entry;
        println!(
            "{:>3} {} {:<12} {:<16} {:>4} {}",
            row.index,
            if row.starred { '*' } else { ' ' },
            entry.kind,
            format_time(entry),
            entry
                .duration
                .map(|d| format!("{d}m"))
                .unwrap_or_default(),
            entry.title
        );
    }
    Ok(())
}

fn show(store: &mut ScheduleStore<FileStore>, title: &str) -> anyhow::Result<()> {
    let entry = lookup(store, title)?;
    let starred = store.is_starred(&entry)?;

    println!("{}{}", entry.title, if starred { " *" } else { "" });
    println!("Type: {}", entry.kind);
    if entry.time.is_some() {
        println!("When: {}", format_time(&entry));
    }
    if let Some(duration) = entry.duration {
        println!("Duration: {duration} minutes");
    }
    if let Some(description) = &entry.description {
        println!("\n{description}");
    }
    Ok(())
}

fn format_time(entry: &ScheduleEntry) -> String {
    entry
        .time
        .map(|t| t.with_timezone(&Local).format("%a %d %b %H:%M").to_string())
        .unwrap_or_default()
}
