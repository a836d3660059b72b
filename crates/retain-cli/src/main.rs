//! Retain CLI
//!
//! Command-line interface for the spaced-repetition review engine.

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use retain_core::{ItemKind, NewItemInput, Quality, ReviewItem, Store};

/// Retain - Spaced-Repetition Review Engine CLI
#[derive(Parser)]
#[command(name = "retain")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "CLI for the Retain spaced-repetition review engine")]
#[command(
    long_about = "Retain schedules language-learning items with the classic SM-2 algorithm.\n\nItems you grade well drift out to ever-longer intervals; items you forget\ncome straight back to the front of the queue."
)]
struct Cli {
    /// Database path (defaults to the platform data directory, or $RETAIN_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new item to learn
    Add {
        /// What is shown to the learner
        prompt: String,
        /// The expected answer
        answer: String,
        /// Item kind (vocabulary, phrase, grammar, listening, exercise)
        #[arg(long, default_value = "vocabulary")]
        kind: String,
        /// Tags (comma-separated)
        #[arg(long)]
        tags: Option<String>,
        /// Source reference (lesson id, import file)
        #[arg(long)]
        source: Option<String>,
    },

    /// Show items currently due for review
    Queue {
        /// Maximum items to show
        #[arg(long, default_value = "20")]
        limit: i32,
    },

    /// Grade a recall for an item (quality 0-5)
    Review {
        /// Item ID
        id: String,
        /// Quality of recall: 0 = blackout .. 5 = effortless
        quality: u8,
    },

    /// Show what each grade would do to an item's schedule
    Preview {
        /// Item ID
        id: String,
    },

    /// Show one item with its progress
    Show {
        /// Item ID
        id: String,
    },

    /// Show the attempt history for an item
    History {
        /// Item ID
        id: String,
        /// Maximum attempts to show
        #[arg(long, default_value = "20")]
        limit: i32,
    },

    /// Show retention statistics
    Stats,

    /// List items, newest first
    List {
        /// Maximum items to show
        #[arg(long, default_value = "50")]
        limit: i32,
        /// Offset into the listing
        #[arg(long, default_value = "0")]
        offset: i32,
    },

    /// Remove an item and its history
    Remove {
        /// Item ID
        id: String,
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Export items in JSON or JSONL format
    Export {
        /// Output file path
        output: PathBuf,
        /// Export format: json or jsonl
        #[arg(long, default_value = "json")]
        format: String,
        /// Filter by tags (comma-separated, any match)
        #[arg(long)]
        tags: Option<String>,
        /// Only export items created after this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let store = open_store(cli.db)?;

    match cli.command {
        Commands::Add {
            prompt,
            answer,
            kind,
            tags,
            source,
        } => run_add(&store, prompt, answer, kind, tags, source),
        Commands::Queue { limit } => run_queue(&store, limit),
        Commands::Review { id, quality } => run_review(&store, &id, quality),
        Commands::Preview { id } => run_preview(&store, &id),
        Commands::Show { id } => run_show(&store, &id),
        Commands::History { id, limit } => run_history(&store, &id, limit),
        Commands::Stats => run_stats(&store),
        Commands::List { limit, offset } => run_list(&store, limit, offset),
        Commands::Remove { id, yes } => run_remove(&store, &id, yes),
        Commands::Export {
            output,
            format,
            tags,
            since,
        } => run_export(&store, output, format, tags, since),
    }
}

/// Resolve the database path: --db flag, then $RETAIN_DB, then the
/// platform default
fn open_store(flag: Option<PathBuf>) -> anyhow::Result<Store> {
    let path = flag.or_else(|| std::env::var("RETAIN_DB").ok().map(PathBuf::from));
    tracing::debug!(path = ?path, "Opening review store");
    Store::open(path).context("failed to open the review store")
}

/// Split a comma-separated tag list
fn parse_tags(tags: Option<String>) -> Vec<String> {
    tags.map(|t| {
        t.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Run add command
fn run_add(
    store: &Store,
    prompt: String,
    answer: String,
    kind: String,
    tags: Option<String>,
    source: Option<String>,
) -> anyhow::Result<()> {
    let item = store.add_item(NewItemInput {
        prompt,
        answer,
        kind: ItemKind::parse_name(&kind),
        tags: parse_tags(tags),
        source,
    })?;

    println!("{} {}", "Added".green().bold(), item.prompt.white().bold());
    println!("  {}: {}", "id".dimmed(), item.id);
    println!("  {}: {}", "kind".dimmed(), item.kind);
    if !item.tags.is_empty() {
        println!("  {}: {}", "tags".dimmed(), item.tags.join(", "));
    }
    println!("  {}: due now", "schedule".dimmed());

    Ok(())
}

/// Run queue command
fn run_queue(store: &Store, limit: i32) -> anyhow::Result<()> {
    let now = Utc::now();
    let queue = store.review_queue(now, limit)?;

    if queue.is_empty() {
        println!("{}", "Nothing due. Come back later.".green());
        return Ok(());
    }

    println!("{}", format!("=== {} item(s) due ===", queue.len()).cyan().bold());
    println!();
    for item in &queue {
        print_item_line(item, now);
    }

    Ok(())
}

/// Run review command
fn run_review(store: &Store, id: &str, quality: u8) -> anyhow::Result<()> {
    let quality = Quality::from_score(quality as i64)?;
    let result = store.submit_review(id, quality)?;

    let grade = if quality.is_success() {
        format!("{} ({})", quality, quality.score()).green().bold()
    } else {
        format!("{} ({})", quality, quality.score()).red().bold()
    };

    println!("{} {}", "Graded".white().bold(), grade);
    println!("  {}: {}", "item".dimmed(), result.item.prompt);
    println!(
        "  {}: {} day(s), ease {:.2}, {} repetition(s)",
        "schedule".dimmed(),
        result.item.interval_days,
        result.item.ease_factor,
        result.item.repetitions,
    );
    println!(
        "  {}: {}",
        "next review".dimmed(),
        result.item.due_at.format("%Y-%m-%d %H:%M")
    );
    if !quality.is_success() && result.item.lapses > 0 {
        println!(
            "  {}",
            format!("back to learning ({} lapse(s) total)", result.item.lapses).yellow()
        );
    }

    Ok(())
}

/// Run preview command
fn run_preview(store: &Store, id: &str) -> anyhow::Result<()> {
    let preview = store.preview_review(id)?;

    println!("{}", "=== If you answer... ===".cyan().bold());
    println!();
    for entry in &preview.outcomes {
        let label = format!("{} ({})", entry.quality, entry.quality.score());
        let label = if entry.quality.is_success() {
            label.green()
        } else {
            label.red()
        };
        println!(
            "  {:24} {} day(s), ease {:.2}, due {}",
            label,
            entry.outcome.interval_days,
            entry.outcome.ease_factor,
            entry.outcome.due_at.format("%Y-%m-%d"),
        );
    }

    Ok(())
}

/// Run show command
fn run_show(store: &Store, id: &str) -> anyhow::Result<()> {
    let progress = store.item_progress(id)?;
    let item = &progress.item;

    println!("{}", item.prompt.white().bold());
    println!("  {}: {}", "answer".dimmed(), item.answer);
    println!("  {}: {}", "id".dimmed(), item.id);
    println!("  {}: {}", "kind".dimmed(), item.kind);
    if !item.tags.is_empty() {
        println!("  {}: {}", "tags".dimmed(), item.tags.join(", "));
    }
    if let Some(source) = &item.source {
        println!("  {}: {}", "source".dimmed(), source);
    }
    println!(
        "  {}: ease {:.2}, interval {} day(s), {} repetition(s)",
        "schedule".dimmed(),
        item.ease_factor,
        item.interval_days,
        item.repetitions,
    );
    println!(
        "  {}: {}",
        "due".dimmed(),
        item.due_at.format("%Y-%m-%d %H:%M")
    );
    println!(
        "  {}: {} review(s), {} lapse(s)",
        "lifetime".dimmed(),
        item.total_reviews,
        item.lapses,
    );
    if let Some(accuracy) = progress.accuracy {
        println!(
            "  {}: {:.0}% over {} attempt(s), streak {}",
            "accuracy".dimmed(),
            accuracy * 100.0,
            progress.attempts.len(),
            progress.current_streak,
        );
    }

    Ok(())
}

/// Run history command
fn run_history(store: &Store, id: &str, limit: i32) -> anyhow::Result<()> {
    let attempts = store.attempt_history(id, limit)?;

    if attempts.is_empty() {
        println!("{}", "No attempts recorded.".dimmed());
        return Ok(());
    }

    println!("{}", format!("=== {} attempt(s) ===", attempts.len()).cyan().bold());
    println!();
    for attempt in &attempts {
        let grade = if attempt.is_success() {
            format!("q{}", attempt.quality).green()
        } else {
            format!("q{}", attempt.quality).red()
        };
        println!(
            "  {}  {}  -> {} day(s), ease {:.2}",
            attempt.reviewed_at.format("%Y-%m-%d %H:%M"),
            grade,
            attempt.interval_days,
            attempt.ease_factor,
        );
    }

    Ok(())
}

/// Run stats command
fn run_stats(store: &Store) -> anyhow::Result<()> {
    let stats = store.stats(Utc::now())?;

    println!("{}", "=== Retain Statistics ===".cyan().bold());
    println!();
    println!("{}: {}", "Total Items".white().bold(), stats.total_items);
    println!("{}: {}", "Due for Review".white().bold(), stats.items_due);
    println!(
        "{}: {:.2}",
        "Average Ease".white().bold(),
        stats.average_ease_factor
    );
    println!(
        "{}: {:.1} day(s)",
        "Average Interval".white().bold(),
        stats.average_interval_days
    );
    println!(
        "{}: {} ({} this week)",
        "Attempts".white().bold(),
        stats.total_attempts,
        stats.attempts_last_week
    );
    if let Some(accuracy) = stats.overall_accuracy {
        println!(
            "{}: {:.1}%",
            "Overall Accuracy".white().bold(),
            accuracy * 100.0
        );
    }
    if let Some(accuracy) = stats.recent_accuracy {
        println!(
            "{}: {:.1}%",
            "Accuracy This Week".white().bold(),
            accuracy * 100.0
        );
    }
    if let Some(oldest) = stats.oldest_item {
        println!(
            "{}: {}",
            "Oldest Item".white().bold(),
            oldest.format("%Y-%m-%d")
        );
    }

    // Phase distribution
    if stats.total_items > 0 {
        println!();
        println!("{}", "=== Learning Phases ===".yellow().bold());
        let total = stats.total_items as usize;
        print_distribution_bar("Learning", stats.learning_items as usize, total, "yellow");
        print_distribution_bar("Reviewing", stats.reviewing_items as usize, total, "green");
    }

    Ok(())
}

/// Print a distribution bar
fn print_distribution_bar(label: &str, count: usize, total: usize, color: &str) {
    let percentage = if total > 0 {
        (count as f64 / total as f64) * 100.0
    } else {
        0.0
    };

    let bar_width: usize = 30;
    let filled = ((percentage / 100.0) * bar_width as f64) as usize;
    let empty = bar_width.saturating_sub(filled);

    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(empty));
    let colored_bar = match color {
        "green" => bar.green(),
        "yellow" => bar.yellow(),
        "red" => bar.red(),
        _ => bar.white(),
    };

    println!(
        "  {:12} [{:30}] {:>4} ({:>5.1}%)",
        label, colored_bar, count, percentage
    );
}

/// Print a one-line item summary for queue/list output
fn print_item_line(item: &ReviewItem, now: DateTime<Utc>) {
    let overdue_days = (now - item.due_at).num_days();
    let due = if overdue_days > 0 {
        format!("{}d overdue", overdue_days).red()
    } else {
        "due".yellow()
    };
    println!(
        "  {}  {:30}  {}  (ease {:.2}, {} rep(s))",
        &item.id[..8].dimmed(),
        item.prompt,
        due,
        item.ease_factor,
        item.repetitions,
    );
}

/// Run list command
fn run_list(store: &Store, limit: i32, offset: i32) -> anyhow::Result<()> {
    let items = store.list_items(limit, offset)?;

    if items.is_empty() {
        println!("{}", "No items yet. Add one with `retain add`.".dimmed());
        return Ok(());
    }

    let now = Utc::now();
    println!("{}", format!("=== {} item(s) ===", items.len()).cyan().bold());
    println!();
    for item in &items {
        print_item_line(item, now);
    }

    Ok(())
}

/// Run remove command
fn run_remove(store: &Store, id: &str, yes: bool) -> anyhow::Result<()> {
    let item = store
        .get_item(id)?
        .with_context(|| format!("no item with id {}", id))?;

    if !yes {
        print!(
            "Remove '{}' and its attempt history? [y/N] ",
            item.prompt.white().bold()
        );
        std::io::stdout().flush()?;
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        if !matches!(line.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("{}", "Aborted.".dimmed());
            return Ok(());
        }
    }

    store.delete_item(id)?;
    println!("{} {}", "Removed".red().bold(), item.prompt);

    Ok(())
}

/// Run export command
fn run_export(
    store: &Store,
    output: PathBuf,
    format: String,
    tags: Option<String>,
    since: Option<String>,
) -> anyhow::Result<()> {
    let since = since
        .map(|s| {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .with_context(|| format!("invalid --since date '{}', expected YYYY-MM-DD", s))
        })
        .transpose()?;
    let tag_filter = parse_tags(tags);

    let items: Vec<ReviewItem> = store
        .list_items(i32::MAX, 0)?
        .into_iter()
        .filter(|item| {
            tag_filter.is_empty() || item.tags.iter().any(|t| tag_filter.contains(t))
        })
        .filter(|item| {
            since.is_none_or(|date| item.created_at.date_naive() >= date)
        })
        .collect();

    let file = std::fs::File::create(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);

    match format.as_str() {
        "json" => {
            serde_json::to_writer_pretty(&mut writer, &items)?;
            writer.write_all(b"\n")?;
        }
        "jsonl" => {
            for item in &items {
                serde_json::to_writer(&mut writer, item)?;
                writer.write_all(b"\n")?;
            }
        }
        other => anyhow::bail!("unknown export format '{}', expected json or jsonl", other),
    }
    writer.flush()?;

    println!(
        "{} {} item(s) to {}",
        "Exported".green().bold(),
        items.len(),
        output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags_splits_and_trims() {
        assert_eq!(
            parse_tags(Some("a1, lesson-3 ,".to_string())),
            vec!["a1".to_string(), "lesson-3".to_string()]
        );
        assert!(parse_tags(None).is_empty());
    }

    #[test]
    fn test_cli_parses_review_command() {
        let cli = Cli::try_parse_from(["retain", "review", "abc123", "4"]).unwrap();
        match cli.command {
            Commands::Review { id, quality } => {
                assert_eq!(id, "abc123");
                assert_eq!(quality, 4);
            }
            _ => panic!("expected review command"),
        }
    }

    #[test]
    fn test_cli_rejects_missing_answer() {
        assert!(Cli::try_parse_from(["retain", "add", "only-prompt"]).is_err());
    }
}
