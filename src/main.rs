use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use comp_winrate::analysis::ranking::RankingConfig;
use comp_winrate::config::Config;
use comp_winrate::display::output::{
    display_error, display_info, display_parse_summary, display_report, display_success,
    render_json, render_text,
};
use comp_winrate::input::{read_log, LogSource};
use comp_winrate::analyze_log_with_progress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "Comp Winrate")]
#[command(about = "Rank team compositions by win rate and popularity from a match analysis log", long_about = None)]
struct Args {
    /// Match analysis log to read ("-" for stdin, default: COMP_LOG_PATH or stdin)
    log: Option<PathBuf>,

    /// Minimum games a composition needs to be ranked (default: 5)
    #[arg(short, long)]
    min_games: Option<usize>,

    /// Rows to show in each ranking (default: 20)
    #[arg(short = 'k', long = "top")]
    top: Option<usize>,

    /// Only analyze the N most recent matches in the log (0 means all)
    #[arg(short, long)]
    num_matches: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Also write a plain-text report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::from_env()?;
    let ranking = RankingConfig::new(
        args.min_games.unwrap_or(config.min_games),
        args.top.unwrap_or(config.top_k),
    )?;
    let quiet = args.format == OutputFormat::Json;

    let source = LogSource::from_arg(args.log.as_deref().or(config.log_path.as_deref()));
    tracing::info!(source = %source.describe(), ?ranking, "starting analysis");

    if !quiet {
        display_info(&format!("Reading match log from {}", source.describe()));
    }
    let text = read_log(&source)?;

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(text.lines().count() as u64)
    };
    if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} lines {msg}") {
        pb.set_style(style);
    }

    let (report, parse_stats) =
        analyze_log_with_progress(&text, ranking, args.num_matches, || pb.inc(1));
    pb.finish_and_clear();

    if !quiet {
        display_success(&format!(
            "Parsed {} matches ({} analyzed)",
            parse_stats.matches_emitted, report.matches_analyzed
        ));
        display_parse_summary(&parse_stats);
    }

    match args.format {
        OutputFormat::Table => display_report(&report, &source.describe()),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }

    if let Some(path) = args.output {
        let text = render_text(&report, &source.describe(), chrono::Utc::now());
        fs::write(&path, text)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        if !quiet {
            display_success(&format!("Report saved to {}", path.display()));
        }
    }

    Ok(())
}
