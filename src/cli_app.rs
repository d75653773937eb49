//! Top-level CLI definition and dispatch.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;

use crate::core::config::EngineConfig;
use crate::core::errors::LayoutError;
use crate::layout::model::{ContentRegion, LayoutMode, Padding, TerminalLayout};
use crate::logger;
use crate::manager::{LayoutManager, LayoutOptions, SizeCheck};
use crate::render::{
    BorderStyle, SectionOptions, TableColumn, TableOptions, render_columns_with_ellipsis, section,
    table,
};
use crate::terminal::{NullResizeSignal, StdoutProbe, TerminalCapabilities, platform_signal};
use crate::text::{Align, distribute, fit_with_ellipsis};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Responsive terminal layout engine: inspect the terminal, build and
/// validate layouts, and render width-aware text blocks.
#[derive(Debug, Parser)]
#[command(name = "tlay", version, about)]
pub struct Cli {
    /// TOML configuration file. Missing files fall back to defaults.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter directive (e.g. `debug`, `layout.resize=trace`). `RUST_LOG`
    /// takes precedence.
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show terminal size, layout mode, capabilities and minimum-size verdict.
    Probe {
        #[arg(long)]
        json: bool,
    },
    /// Build and validate a layout for the current terminal.
    Layout {
        /// JSON array of regions; the layout has no regions when omitted.
        #[arg(long, value_name = "FILE")]
        regions: Option<PathBuf>,
        /// Report this mode instead of the width-derived one.
        #[arg(long, value_name = "MODE")]
        force_mode: Option<LayoutMode>,
        #[arg(long)]
        json: bool,
    },
    /// Distribute items over columns and print them side by side.
    Columns {
        /// Total width; the terminal width when omitted.
        #[arg(long)]
        width: Option<usize>,
        /// Gap between columns; the configured gap when omitted.
        #[arg(long)]
        gap: Option<usize>,
        /// Number of columns.
        #[arg(long, default_value_t = 2)]
        columns: usize,
        items: Vec<String>,
    },
    /// Render a JSON array of objects as a bordered table.
    Table {
        /// Keys to show, comma separated. Each key is also its header.
        #[arg(long, value_delimiter = ',', required = true)]
        columns: Vec<String>,
        /// Border style; the configured style (or an ASCII fallback) when
        /// omitted.
        #[arg(long)]
        style: Option<BorderStyle>,
        file: PathBuf,
    },
    /// Render a titled section.
    Section {
        title: String,
        content: String,
        #[arg(long)]
        border: bool,
        /// Padding on every side.
        #[arg(long, default_value_t = 0)]
        padding: u16,
    },
    /// Print a line for every debounced terminal resize.
    Watch {
        /// Stop after this many seconds.
        #[arg(long, default_value_t = 30)]
        seconds: u64,
    },
    /// Print a shell completion script.
    Completions { shell: Shell },
}

/// Dispatch CLI commands.
///
/// # Errors
/// Returns an error if configuration loading, input parsing or layout
/// validation fails.
pub fn run(cli: &Cli) -> CliResult {
    let config = EngineConfig::load_or_default(cli.config.as_deref())?;
    let filter = cli.log_filter.as_deref().unwrap_or(&config.logging.filter);
    logger::init(filter);

    match &cli.command {
        Command::Probe { json } => probe(*json),
        Command::Layout {
            regions,
            force_mode,
            json,
        } => layout(&config, regions.as_deref(), *force_mode, *json),
        Command::Columns {
            width,
            gap,
            columns,
            items,
        } => columns_cmd(&config, *width, *gap, *columns, items.clone()),
        Command::Table {
            columns,
            style,
            file,
        } => table_cmd(&config, columns, *style, file),
        Command::Section {
            title,
            content,
            border,
            padding,
        } => {
            println!(
                "{}",
                section(
                    title,
                    content,
                    SectionOptions {
                        show_border: *border,
                        padding: Padding::uniform(*padding),
                    },
                )
            );
            Ok(())
        }
        Command::Watch { seconds } => watch(&config, Duration::from_secs(*seconds)),
        Command::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "tlay", &mut io::stdout());
            Ok(())
        }
    }
}

fn probe(json: bool) -> CliResult {
    let manager = LayoutManager::stdout();
    let size = manager.detect_terminal_size();
    let mode = manager.calculate_layout_mode(size.width);
    let caps = TerminalCapabilities::detect(&StdoutProbe);
    let check = manager.validate_terminal_size(size);

    if json {
        let report = serde_json::json!({
            "size": size,
            "mode": mode,
            "columns": mode.columns(),
            "capabilities": caps,
            "size_check": check,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("size:     {}x{} (tty: {})", size.width, size.height, size.is_tty);
    println!("mode:     {mode} ({} column(s))", mode.columns());
    println!("term:     {}", caps.term.as_deref().unwrap_or("-"));
    println!("unicode:  {}", caps.supports_unicode);
    println!("color:    {}", caps.supports_color);
    warn_size(&check);
    Ok(())
}

fn warn_size(check: &SizeCheck) {
    if check.is_valid {
        return;
    }
    if let Some(message) = &check.message {
        eprintln!("{} {message}", "warning:".yellow().bold());
    }
    if let Some(suggestion) = &check.suggestion {
        eprintln!("{suggestion}");
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LayoutError> {
    let raw = fs::read_to_string(path).map_err(|source| LayoutError::io(path, source))?;
    Ok(serde_json::from_str(&raw)?)
}

fn layout(
    config: &EngineConfig,
    regions: Option<&Path>,
    force_mode: Option<LayoutMode>,
    json: bool,
) -> CliResult {
    let regions: Vec<ContentRegion<serde_json::Value>> = match regions {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let mut options = LayoutOptions::from(&config.layout);
    options.force_mode = force_mode;
    let mut manager: LayoutManager<serde_json::Value> =
        LayoutManager::new(Box::new(StdoutProbe), Box::new(NullResizeSignal)).with_options(options);

    let size = manager.detect_terminal_size();
    let mode = manager.calculate_layout_mode(size.width);
    let layout = match manager.create_layout(mode, regions, options) {
        Ok(layout) => layout,
        Err(err) => {
            warn_size(&manager.validate_terminal_size(size));
            return Err(err.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&*layout)?);
    } else {
        print_layout(&layout, &config.render.ellipsis);
    }
    Ok(())
}

fn print_layout<C>(layout: &TerminalLayout<C>, ellipsis: &str) {
    let width = usize::from(layout.width);
    println!(
        "{}x{} {} ({} column(s))",
        layout.width, layout.height, layout.mode, layout.columns
    );
    for region in &layout.regions {
        let line = format!(
            "  {:<10} {:?} at {},{} size {}x{}{}",
            region.id,
            region.kind,
            region.position.row,
            region.position.column,
            region.size.width,
            region.size.height,
            if region.show_border { " [border]" } else { "" },
        );
        println!("{}", fit_with_ellipsis(&line, width, Align::Left, ellipsis).trim_end());
    }
}

fn columns_cmd(
    config: &EngineConfig,
    width: Option<usize>,
    gap: Option<usize>,
    columns: usize,
    items: Vec<String>,
) -> CliResult {
    let width = width.unwrap_or_else(|| {
        let manager = LayoutManager::stdout();
        usize::from(manager.detect_terminal_size().width)
    });
    let gap = gap.unwrap_or(config.layout.column_gap);
    let buckets = distribute(items, columns)?;
    println!(
        "{}",
        render_columns_with_ellipsis(&buckets, width, gap, &config.render.ellipsis)
    );
    Ok(())
}

fn table_cmd(
    config: &EngineConfig,
    keys: &[String],
    style: Option<BorderStyle>,
    file: &Path,
) -> CliResult {
    let rows: Vec<serde_json::Value> = read_json(file)?;
    let columns: Vec<TableColumn> = keys
        .iter()
        .map(|key| TableColumn::new(key.as_str(), key.as_str()))
        .collect();

    let border_style = style.unwrap_or_else(|| {
        let caps = TerminalCapabilities::detect(&StdoutProbe);
        if caps.supports_unicode {
            config.render.border_style
        } else {
            BorderStyle::for_capabilities(&caps)
        }
    });
    println!("{}", table(&columns, &rows, TableOptions { border_style }));
    Ok(())
}

fn watch(config: &EngineConfig, duration: Duration) -> CliResult {
    const TICK: Duration = Duration::from_millis(50);

    let mut manager: LayoutManager = LayoutManager::new(Box::new(StdoutProbe), platform_signal())
        .with_options(LayoutOptions::from(&config.layout));
    let mut subscription = manager.on_resize(|layout| {
        println!(
            "resized: {}x{} {} ({} column(s))",
            layout.width, layout.height, layout.mode, layout.columns
        );
    });
    let initial = manager.detect_terminal_size();
    println!(
        "watching {}x{} for {}s",
        initial.width,
        initial.height,
        duration.as_secs()
    );

    let end = Instant::now() + duration;
    loop {
        let now = Instant::now();
        if now >= end {
            break;
        }
        if let Err(err) = manager.poll_resize(now) {
            eprintln!("{} {err}", "warning:".yellow().bold());
        }
        let wake = manager
            .next_resize_deadline()
            .map_or(now + TICK, |deadline| deadline.min(now + TICK))
            .min(end);
        thread::sleep(wake.saturating_duration_since(now));
    }

    subscription.unsubscribe();
    Ok(())
}
