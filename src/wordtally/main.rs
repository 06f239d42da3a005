use clap::Parser;
use colored::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;
use wordtally::api::{
    CmdMessage, CmdResult, ConfigAction, DaySummary, FileRow, MessageLevel, PathEntry,
};
use wordtally::config::TallyConfig;
use wordtally::error::{Result, TallyError};
use wordtally::events::StatusSink;
use wordtally::init::{initialize, TallyContext};
use wordtally::watch::DirectoryWatcher;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = initialize()?;
    if let Some(backup) = &ctx.load_report.corrupt_backup {
        eprintln!(
            "{}",
            format!(
                "Warning: stored history was unreadable and has been moved to {}. Starting fresh.",
                backup
            )
            .yellow()
        );
    }

    let outcome = dispatch(&mut ctx, cli.command);
    let closed = ctx.api.close();
    outcome?;
    closed
}

fn init_logging(verbose: bool) {
    let default = if verbose { "wordtally=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(ctx: &mut TallyContext, command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::Observe { files, root }) => handle_observe(ctx, files, root),
        Some(Commands::Today) | None => handle_today(ctx),
        Some(Commands::Flush) => handle_flush(ctx),
        Some(Commands::History { limit }) => handle_history(ctx, limit),
        Some(Commands::Show { day }) => handle_show(ctx, day),
        Some(Commands::Watch { dir }) => handle_watch(ctx, dir),
        Some(Commands::Config { key, value }) => handle_config(ctx, key, value),
        Some(Commands::Paths) => handle_paths(ctx),
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn absolute(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

fn handle_observe(ctx: &mut TallyContext, files: Vec<PathBuf>, root: Option<PathBuf>) -> Result<()> {
    let cwd = current_dir();
    let root = absolute(&cwd, root.unwrap_or_else(|| cwd.clone()));
    let files: Vec<PathBuf> = files.into_iter().map(|f| absolute(&cwd, f)).collect();

    let result = ctx.api.observe_files(&root, &files)?;
    print_messages(&result.messages);
    print_status(&result);
    Ok(())
}

fn handle_today(ctx: &mut TallyContext) -> Result<()> {
    let result = ctx.api.today()?;
    print_file_rows(&result.file_rows);
    print_status(&result);
    print_messages(&result.messages);
    Ok(())
}

fn handle_flush(ctx: &mut TallyContext) -> Result<()> {
    let result = ctx.api.flush()?;
    if let Some(dump) = &result.dump {
        println!("{}", dump);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_history(ctx: &mut TallyContext, limit: Option<usize>) -> Result<()> {
    let result = ctx.api.history(limit)?;
    print_day_summaries(&result.day_summaries);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &mut TallyContext, day: Option<String>) -> Result<()> {
    let result = ctx.api.show(day.as_deref())?;
    print_file_rows(&result.file_rows);
    print_status(&result);
    print_messages(&result.messages);
    Ok(())
}

fn handle_watch(ctx: &mut TallyContext, dir: Option<PathBuf>) -> Result<()> {
    let cwd = current_dir();
    let dir = absolute(&cwd, dir.unwrap_or_else(|| cwd.clone()));
    let dir = dir.canonicalize().map_err(|e| {
        TallyError::Watch(format!("cannot watch {}: {}", dir.display(), e))
    })?;

    println!(
        "{}",
        format!(
            "Watching {} for {} (Ctrl-C to stop)",
            dir.display(),
            ctx.config.extensions.join(", ")
        )
        .dimmed()
    );

    let mut watcher = DirectoryWatcher::new(dir, &ctx.config.extensions);
    let mut status = TerminalStatus;
    let result = ctx.api.watch(&mut watcher, &mut status)?;
    print_status(&result);
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut TallyContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), _) if !TallyConfig::keys().contains(&k.as_str()) => {
            println!("Unknown config key: {}", k);
            return Ok(());
        }
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        for key in TallyConfig::keys() {
            if let Some(val) = config.get(key) {
                println!("{} = {}", key, val);
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_paths(ctx: &mut TallyContext) -> Result<()> {
    let result = ctx.api.locations()?;
    print_paths(&result.paths);
    print_messages(&result.messages);
    Ok(())
}

/// Status line for `watch`: one line per observation.
struct TerminalStatus;

impl StatusSink for TerminalStatus {
    fn set_text(&mut self, text: &str) {
        println!("{}", text.bold());
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_status(result: &CmdResult) {
    if let Some(status) = &result.status_line {
        println!("{}", status.bold());
    }
}

const LINE_WIDTH: usize = 80;
const COUNT_WIDTH: usize = 8;

fn print_file_rows(rows: &[FileRow]) {
    if rows.is_empty() {
        return;
    }

    let available = LINE_WIDTH.saturating_sub(COUNT_WIDTH * 3 + 4);
    for row in rows {
        let path = truncate_to_width(&row.path, available);
        let padding = available.saturating_sub(path.width());
        let net = format!("{:>+width$}", row.net, width = COUNT_WIDTH);
        let net_colored = match row.net {
            n if n > 0 => net.green(),
            n if n < 0 => net.red(),
            _ => net.normal(),
        };

        println!(
            "  {}{}{}{}{}",
            path,
            " ".repeat(padding),
            format!("{:>width$}", row.pre, width = COUNT_WIDTH).dimmed(),
            format!("{:>width$}", row.cur, width = COUNT_WIDTH).dimmed(),
            net_colored
        );
    }
}

fn print_day_summaries(days: &[DaySummary]) {
    for day in days {
        let files = if day.files == 1 {
            "1 file".to_string()
        } else {
            format!("{} files", day.files)
        };
        println!(
            "  {}  {:>+width$}  {}",
            day.day.yellow(),
            day.total,
            files.dimmed(),
            width = COUNT_WIDTH
        );
    }
}

fn print_paths(paths: &[PathEntry]) {
    let label_width = paths.iter().map(|p| p.label.width()).max().unwrap_or(0);
    for entry in paths {
        println!(
            "{:<width$}  {}",
            entry.label,
            entry.location,
            width = label_width
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
