//! SmartNote command-line front end.
//!
//! # Responsibility
//! - Map command-line gestures onto `smartnote_core` facade operations.
//! - Render notes, todos and points as plain text.
//!
//! Each invocation is one session: load, apply at most one action, exit.

mod recognizer;
mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use recognizer::TranscriptRecognizer;
use smartnote_core::{
    init_logging, AppConfig, AppService, CompletionOutcome, JsonFileStore, PointsAward,
    VoiceOutcome,
};
use std::path::{Path, PathBuf};

/// Notes, dictated todos and achievement points.
#[derive(Parser, Debug)]
#[command(name = "smartnote")]
#[command(version, about, long_about = None)]
struct Cli {
    /// State document path (default: data/app_data.json)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Directory for rolling log files; logging is off when unset
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Save a typed note
    Note {
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Dictate a note; "for tomorrow" schedules a todo
    Voice {
        /// Use this transcript instead of reading one from stdin
        #[arg(long)]
        transcript: Option<String>,
    },
    /// Manage todos
    Todo {
        #[command(subcommand)]
        action: TodoCommand,
    },
    /// List notes, most recent first
    Notes,
    /// List today's and future todos
    Todos,
    /// Show points and achievements
    Points,
}

#[derive(Subcommand, Debug)]
enum TodoCommand {
    /// Add a todo due today
    Add {
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Complete a todo by its position in today's list (1-based)
    Done { position: usize },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Some(log_dir) = &config.log_dir {
        let log_dir = absolute(log_dir)?;
        init_logging(config.log_level, &log_dir)
            .map_err(anyhow::Error::msg)
            .context("failed to initialize logging")?;
    }

    let store = JsonFileStore::new(&config.data_path);
    let mut service = AppService::open(store)
        .with_context(|| format!("failed to open {}", config.data_path.display()))?;

    match cli.command {
        Command::Note { text } => match service.save_note(&text.join(" "))? {
            Some(report) => {
                println!("Note saved!");
                print_award(&report.points);
            }
            None => println!("Nothing to save."),
        },
        Command::Voice { transcript } => {
            let mut recognizer = match transcript {
                Some(text) => TranscriptRecognizer::scripted(text),
                None => TranscriptRecognizer::stdin(),
            };
            match service.record_voice(&mut recognizer)? {
                VoiceOutcome::ScheduledTodo(report) => {
                    println!("Recorded: {}", report.entry.task);
                    println!("Scheduled for {}.", report.entry.date);
                    print_award(&report.points);
                }
                VoiceOutcome::Note(report) => {
                    println!("Recorded: {}", report.entry.text);
                    println!("Voice note saved!");
                    print_award(&report.points);
                }
                VoiceOutcome::Failed(err) => eprintln!("{}", err.user_message()),
                VoiceOutcome::Ignored => println!("Nothing was said."),
            }
        }
        Command::Todo {
            action: TodoCommand::Add { text },
        } => match service.add_todo(&text.join(" "))? {
            Some(report) => {
                println!("Todo added for {}.", report.entry.date);
                print_award(&report.points);
            }
            None => println!("Nothing to add."),
        },
        Command::Todo {
            action: TodoCommand::Done { position },
        } => {
            let Some(id) = position
                .checked_sub(1)
                .and_then(|index| service.todays_todos().nth(index))
                .map(|todo| todo.id)
            else {
                bail!("no task at position {position} in today's list");
            };
            match service.mark_todo_complete(id)? {
                CompletionOutcome::Completed(report) => {
                    println!("Completed: {}", report.entry.task);
                    print_award(&report.points);
                }
                CompletionOutcome::AlreadyComplete => println!("Already completed."),
            }
        }
        Command::Notes => print!("{}", render::notes(service.notes())),
        Command::Todos => print!(
            "{}",
            render::todos(service.todays_todos(), service.future_todos())
        ),
        Command::Points => print!(
            "{}",
            render::points(service.points(), &service.achievements())
        ),
    }

    Ok(())
}

/// Defaults, then `SMARTNOTE_*` environment, then flags.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::from_env()?;
    if let Some(path) = &cli.data {
        config = config.with_data_path(path);
    }
    if let Some(level) = &cli.log_level {
        config = config.with_log_level(level)?;
    }
    if let Some(dir) = &cli.log_dir {
        config = config.with_log_dir(dir);
    }
    Ok(config)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    Ok(cwd.join(path))
}

fn print_award(award: &PointsAward) {
    println!("+{} points (total {})", award.awarded, award.total);
    for achievement in &award.unlocked {
        println!("Achievement unlocked: {}", achievement.label);
    }
}
