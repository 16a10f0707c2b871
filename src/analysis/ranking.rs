use super::composition::CompositionSignature;
use super::composition_stats::{CompositionStats, StatsAggregator};
use crate::config::{DEFAULT_MIN_GAMES, DEFAULT_TOP_K};
use crate::error::AppError;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingConfig {
    pub min_games: usize,
    pub top_k: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        RankingConfig {
            min_games: DEFAULT_MIN_GAMES,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl RankingConfig {
    pub fn new(min_games: usize, top_k: usize) -> Result<Self, AppError> {
        if min_games == 0 {
            return Err(AppError::InvalidParameter(
                "min_games must be at least 1".to_string(),
            ));
        }
        if top_k == 0 {
            return Err(AppError::InvalidParameter(
                "top_k must be at least 1".to_string(),
            ));
        }
        Ok(RankingConfig { min_games, top_k })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedComposition {
    pub rank: usize,
    pub signature: CompositionSignature,
    pub wins: usize,
    pub total: usize,
    pub win_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Populated,
    /// No complete match was found in the log.
    NoMatches,
    /// Matches were found but no composition reached `min_games`.
    NoQualifyingCompositions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionReport {
    pub status: ReportStatus,
    pub matches_analyzed: usize,
    pub min_games: usize,
    pub top_k: usize,
    /// Signatures that passed the `min_games` floor, before truncation.
    pub qualifying: usize,
    pub by_win_rate: Vec<RankedComposition>,
    pub by_frequency: Vec<RankedComposition>,
}

impl CompositionReport {
    pub fn has_data(&self) -> bool {
        self.status == ReportStatus::Populated
    }
}

type Entry<'a> = (&'a CompositionSignature, &'a CompositionStats);

pub struct RankingReporter;

impl RankingReporter {
    pub fn build_report(aggregator: &StatsAggregator, config: RankingConfig) -> CompositionReport {
        let eligible = Self::eligible(aggregator, config.min_games);

        let status = if aggregator.matches_recorded() == 0 {
            ReportStatus::NoMatches
        } else if eligible.is_empty() {
            ReportStatus::NoQualifyingCompositions
        } else {
            ReportStatus::Populated
        };

        CompositionReport {
            status,
            matches_analyzed: aggregator.matches_recorded(),
            min_games: config.min_games,
            top_k: config.top_k,
            qualifying: eligible.len(),
            by_win_rate: Self::rank(eligible.clone(), config.top_k, compare_win_rate),
            by_frequency: Self::rank(eligible, config.top_k, compare_frequency),
        }
    }

    /// Highest win rate first; ties go to the larger sample, then signature order.
    pub fn top_by_win_rate(
        aggregator: &StatsAggregator,
        config: RankingConfig,
    ) -> Vec<RankedComposition> {
        Self::rank(
            Self::eligible(aggregator, config.min_games),
            config.top_k,
            compare_win_rate,
        )
    }

    /// Most played first; ties go to the higher win rate, then signature order.
    pub fn top_by_frequency(
        aggregator: &StatsAggregator,
        config: RankingConfig,
    ) -> Vec<RankedComposition> {
        Self::rank(
            Self::eligible(aggregator, config.min_games),
            config.top_k,
            compare_frequency,
        )
    }

    fn eligible(aggregator: &StatsAggregator, min_games: usize) -> Vec<Entry<'_>> {
        aggregator
            .stats()
            .filter(|(_, stats)| stats.total >= min_games)
            .collect()
    }

    fn rank<F>(mut entries: Vec<Entry<'_>>, top_k: usize, compare: F) -> Vec<RankedComposition>
    where
        F: Fn(&Entry<'_>, &Entry<'_>) -> Ordering,
    {
        entries.sort_by(|a, b| compare(a, b));
        entries.truncate(top_k);

        entries
            .into_iter()
            .enumerate()
            .map(|(idx, (signature, stats))| RankedComposition {
                rank: idx + 1,
                signature: signature.clone(),
                wins: stats.wins,
                total: stats.total,
                win_rate: stats.win_rate(),
            })
            .collect()
    }
}

/// Exact comparison of wins/total without going through floats.
fn win_rate_ordering(a: &CompositionStats, b: &CompositionStats) -> Ordering {
    let lhs = a.wins as u128 * b.total as u128;
    let rhs = b.wins as u128 * a.total as u128;
    lhs.cmp(&rhs)
}

fn compare_win_rate(a: &Entry<'_>, b: &Entry<'_>) -> Ordering {
    win_rate_ordering(b.1, a.1)
        .then_with(|| b.1.total.cmp(&a.1.total))
        .then_with(|| a.0.cmp(b.0))
}

fn compare_frequency(a: &Entry<'_>, b: &Entry<'_>) -> Ordering {
    b.1.total
        .cmp(&a.1.total)
        .then_with(|| win_rate_ordering(b.1, a.1))
        .then_with(|| a.0.cmp(b.0))
}
