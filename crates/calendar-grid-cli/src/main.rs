//! `calgrid` CLI — render calendar-grid month pages in the terminal.
//!
//! ## Usage
//!
//! ```sh
//! # Render every month between two dates
//! calgrid render --start 2021-01-15 --end 2021-03-10
//!
//! # Overlay events from a JSON file, mark today and two selected days
//! calgrid render --start 2021-01-15 --end 2021-03-10 -e events.json \
//!     --today 2021-02-10 --multi --select 2021-02-10 --select 2021-02-12
//!
//! # Naive event timestamps are read in the given IANA zone
//! calgrid render --start 2021-01-01 --end 2021-12-31 -e events.json --timezone Europe/Berlin
//!
//! # Machine-readable output
//! calgrid render --start 2021-01-15 --end 2021-03-10 --format json
//!
//! # Which month is showing at a scroll offset?
//! calgrid scroll --start 2021-01-15 --end 2021-03-10 --offset 650 --page-size 320
//! ```
//!
//! Set `RUST_LOG=debug` for engine diagnostics on stderr.

mod input;
mod render;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calendar_grid::scroll::{self, ScrollReport};
use calendar_grid::{CalendarEngine, DateRange, EngineConfig, Orientation};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calgrid", version, about = "Month-paged calendar grid CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(clap::Args)]
struct RangeArgs {
    /// Range start (YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS or RFC 3339)
    #[arg(long)]
    start: String,
    /// Range end (same formats as --start)
    #[arg(long)]
    end: String,
    /// IANA time zone for naive dates and times
    #[arg(long, default_value = "UTC")]
    timezone: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the month pages of a range
    Render {
        #[command(flatten)]
        range: RangeArgs,
        /// JSON file with an array of {"title","start","end"} events
        #[arg(short, long)]
        events: Option<String>,
        /// Instant treated as "now" for the today marker (defaults to the clock)
        #[arg(long)]
        today: Option<String>,
        /// Day to select; repeat for several
        #[arg(long)]
        select: Vec<String>,
        /// Keep every --select instead of only the last one
        #[arg(long)]
        multi: bool,
        /// Only print this section (0-based month page)
        #[arg(long)]
        section: Option<usize>,
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
        /// Write the rendered pages to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Resolve a scroll offset to the month page it shows
    Scroll {
        #[command(flatten)]
        range: RangeArgs,
        /// Scroll offset along the paging axis
        #[arg(long, allow_hyphen_values = true)]
        offset: f64,
        /// Page width (horizontal) or height (vertical)
        #[arg(long)]
        page_size: f64,
        /// Page vertically instead of horizontally
        #[arg(long)]
        vertical: bool,
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            range,
            events,
            today,
            select,
            multi,
            section,
            format,
            output,
        } => {
            let tz = input::parse_timezone(&range.timezone)?;
            let date_range = build_range(&range, tz)?;
            let now = match today.as_deref() {
                Some(raw) => input::parse_instant(raw, tz).context("Invalid --today")?,
                None => Utc::now(),
            };

            let mut engine = CalendarEngine::new(EngineConfig {
                allow_multiple_selection: multi,
                orientation: Orientation::Horizontal,
            });
            engine.set_range(Some(date_range), now);

            if let Some(path) = events.as_deref() {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read file: {}", path))?;
                let parsed = input::parse_events(&raw, tz)
                    .with_context(|| format!("Failed to parse events in {}", path))?;
                engine.set_events(parsed);
            }

            for raw in &select {
                let day = input::parse_day(raw).with_context(|| format!("Invalid --select '{}'", raw))?;
                if engine.select_date(day).is_empty() {
                    tracing::warn!(%day, "date not selectable in this range");
                }
            }

            if let Some(s) = section {
                if s >= engine.section_count() {
                    anyhow::bail!(
                        "Section {} out of range: the calendar has {} section(s)",
                        s,
                        engine.section_count()
                    );
                }
            }
            let sections: Vec<usize> = match section {
                Some(s) => vec![s],
                None => (0..engine.section_count()).collect(),
            };

            let content = match format {
                Format::Text => render::text(&engine, &sections),
                Format::Json => render::json(&engine, &sections)?,
            };
            emit(&content, output.as_deref())?;
        }
        Commands::Scroll {
            range,
            offset,
            page_size,
            vertical,
            format,
            output,
        } => {
            let tz = input::parse_timezone(&range.timezone)?;
            let date_range = build_range(&range, tz)?;
            let orientation = if vertical {
                Orientation::Vertical
            } else {
                Orientation::Horizontal
            };
            let mut engine = CalendarEngine::new(EngineConfig {
                allow_multiple_selection: false,
                orientation,
            });
            engine.set_range(Some(date_range), Utc::now());

            let report = match orientation {
                Orientation::Horizontal => ScrollReport::horizontal(offset, page_size),
                Orientation::Vertical => ScrollReport::vertical(offset, page_size),
            };
            engine.scrolled(&report);
            let page = scroll::resolve_page(&report, orientation);

            let content = match format {
                Format::Text => format!(
                    "page {}: {}\n",
                    page,
                    engine.displayed_title().unwrap_or_default()
                ),
                Format::Json => render::scroll_json(&engine, page, page_size)?,
            };
            emit(&content, output.as_deref())?;
        }
    }

    Ok(())
}

/// Parse `--start`/`--end` and insist on `start < end`.
fn build_range(args: &RangeArgs, tz: chrono_tz::Tz) -> Result<DateRange> {
    let start = input::parse_instant(&args.start, tz).context("Invalid --start")?;
    let end = input::parse_instant(&args.end, tz).context("Invalid --end")?;
    let range = DateRange::new(start, end);
    range.validate()?;
    Ok(range)
}

/// Sends a finished page or report to `dest`, or to stdout when no file was
/// given.
fn emit(content: &str, dest: Option<&Path>) -> Result<()> {
    let Some(dest) = dest else {
        let mut stdout = std::io::stdout().lock();
        return stdout
            .write_all(content.as_bytes())
            .and_then(|()| stdout.flush())
            .context("Failed to write calendar output to stdout");
    };
    std::fs::write(dest, content)
        .with_context(|| format!("Failed to write calendar output to {}", dest.display()))?;
    tracing::debug!(path = %dest.display(), bytes = content.len(), "calendar output written");
    Ok(())
}
