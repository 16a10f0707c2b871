use crate::analysis::ranking::{CompositionReport, RankedComposition, ReportStatus};
use crate::error::AppError;
use crate::parser::AssemblyStats;
use chrono::{DateTime, Utc};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct WinRateRow {
    #[tabled(rename = "#")]
    rank: String,
    record: String,
    win_rate: String,
    composition: String,
}

#[derive(Tabled)]
struct FrequencyRow {
    #[tabled(rename = "#")]
    rank: String,
    games: String,
    win_rate: String,
    record: String,
    composition: String,
}

fn win_rate_table(rows: &[RankedComposition]) -> String {
    let rows: Vec<WinRateRow> = rows
        .iter()
        .map(|row| WinRateRow {
            rank: format!("#{}", row.rank),
            record: format!("{}/{}", row.wins, row.total),
            win_rate: format!("{:.1}%", row.win_rate),
            composition: row.signature.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

fn frequency_table(rows: &[RankedComposition]) -> String {
    let rows: Vec<FrequencyRow> = rows
        .iter()
        .map(|row| FrequencyRow {
            rank: format!("#{}", row.rank),
            games: row.total.to_string(),
            win_rate: format!("{:.1}%", row.win_rate),
            record: format!("{}/{}", row.wins, row.total),
            composition: row.signature.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

fn empty_message(report: &CompositionReport) -> Option<String> {
    match report.status {
        ReportStatus::Populated => None,
        ReportStatus::NoMatches => Some("No complete matches found in the log".to_string()),
        ReportStatus::NoQualifyingCompositions => Some(format!(
            "No composition reached {} games ({} matches analyzed)",
            report.min_games, report.matches_analyzed
        )),
    }
}

pub fn display_report(report: &CompositionReport, source: &str) {
    println!(
        "\n{}",
        format!("🎮 Team Composition Rankings ({})", source).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());
    println!(
        "{} {} matches, {} compositions with ≥ {} games\n",
        "📈 Analyzed:".bold(),
        report.matches_analyzed.to_string().green(),
        report.qualifying.to_string().green(),
        report.min_games
    );

    if let Some(message) = empty_message(report) {
        println!("{}\n", message.yellow());
        return;
    }

    println!(
        "{}",
        format!("🏆 Top {} by win rate", report.by_win_rate.len()).bold().yellow()
    );
    println!("{}\n", win_rate_table(&report.by_win_rate));

    println!(
        "{}",
        format!("📊 Top {} most played", report.by_frequency.len()).bold().yellow()
    );
    println!("{}\n", frequency_table(&report.by_frequency));

    if let Some(best) = report.by_win_rate.first() {
        println!("{}", "Best Composition".bold().green());
        println!(
            "  {:.1}% win rate over {} games ({} wins)",
            best.win_rate, best.total, best.wins
        );
        println!("  {}\n", best.signature);
    }
}

/// Plain rendering of the report, without terminal colours.
pub fn render_text(report: &CompositionReport, source: &str, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str(&format!("Source: {}\n", source));
    out.push_str(&format!("Generated: {}\n", generated_at.format("%Y-%m-%d %H:%M:%S UTC")));
    out.push_str(&format!("Matches analyzed: {}\n", report.matches_analyzed));
    out.push_str(&format!(
        "Qualifying compositions (>= {} games): {}\n",
        report.min_games, report.qualifying
    ));

    if let Some(message) = empty_message(report) {
        out.push_str(&format!("\n{}\n", message));
        return out;
    }

    out.push_str(&format!(
        "\nTop {} by win rate (>= {} games):\n{}\n",
        report.by_win_rate.len(),
        report.min_games,
        win_rate_table(&report.by_win_rate)
    ));
    out.push_str(&format!(
        "\nTop {} most played (>= {} games):\n{}\n",
        report.by_frequency.len(),
        report.min_games,
        frequency_table(&report.by_frequency)
    ));
    out
}

pub fn render_json(report: &CompositionReport) -> Result<String, AppError> {
    serde_json::to_string_pretty(report)
        .map_err(|e| AppError::JsonError(format!("Failed to serialize report: {}", e)))
}

pub fn display_parse_summary(stats: &AssemblyStats) {
    if stats.matches_discarded > 0 {
        println!(
            "{} {} incomplete matches skipped",
            "⚠️".yellow(),
            stats.matches_discarded
        );
    }
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
