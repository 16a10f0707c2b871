pub mod analysis;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod parser;

use analysis::composition_stats::StatsAggregator;
use analysis::ranking::{CompositionReport, RankingConfig, RankingReporter};
use parser::{parse_lines, AssemblyStats, MatchRecord};
use tracing::info;

/// Full pass over one log: parse, keep the `recent` newest matches, aggregate, rank.
pub fn analyze_log(
    text: &str,
    config: RankingConfig,
    recent: Option<usize>,
) -> (CompositionReport, AssemblyStats) {
    analyze_log_with_progress(text, config, recent, || {})
}

/// [`analyze_log`] with a callback run once per consumed line.
pub fn analyze_log_with_progress<F>(
    text: &str,
    config: RankingConfig,
    recent: Option<usize>,
    on_line: F,
) -> (CompositionReport, AssemblyStats)
where
    F: FnMut(),
{
    let outcome = parse_lines(text.lines(), on_line).most_recent(recent);
    info!(
        matches = outcome.matches.len(),
        discarded = outcome.stats.matches_discarded,
        "parsed match log"
    );

    (rank_matches(&outcome.matches, config), outcome.stats)
}

pub fn rank_matches(matches: &[MatchRecord], config: RankingConfig) -> CompositionReport {
    let aggregator = StatsAggregator::from_matches(matches);
    let report = RankingReporter::build_report(&aggregator, config);
    info!(
        compositions = aggregator.len(),
        qualifying = report.qualifying,
        "aggregated compositions"
    );
    report
}
