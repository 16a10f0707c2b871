use super::composition::CompositionSignature;
use crate::parser::assembler::MatchRecord;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositionStats {
    pub wins: usize,
    pub total: usize,
}

impl CompositionStats {
    /// Win rate as a percentage.
    pub fn win_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.wins as f64 / self.total as f64) * 100.0
        }
    }
}

/// Wins/total counters per composition signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsAggregator {
    stats: HashMap<CompositionSignature, CompositionStats>,
    matches_recorded: usize,
}

impl StatsAggregator {
    pub fn new() -> Self {
        StatsAggregator {
            stats: HashMap::new(),
            matches_recorded: 0,
        }
    }

    pub fn from_matches<'a, I>(matches: I) -> Self
    where
        I: IntoIterator<Item = &'a MatchRecord>,
    {
        let mut aggregator = StatsAggregator::new();
        for record in matches {
            aggregator.record(record);
        }
        aggregator
    }

    pub fn record(&mut self, record: &MatchRecord) {
        let (winner, loser) = record.signatures();
        self.record_pair(winner, loser);
    }

    pub fn record_pair(&mut self, winner: CompositionSignature, loser: CompositionSignature) {
        let entry = self.stats.entry(winner).or_default();
        entry.wins += 1;
        entry.total += 1;

        self.stats.entry(loser).or_default().total += 1;
        self.matches_recorded += 1;
    }

    /// Folds another table into this one by summing counters per signature.
    pub fn merge(&mut self, other: StatsAggregator) {
        for (signature, counts) in other.stats {
            let entry = self.stats.entry(signature).or_default();
            entry.wins += counts.wins;
            entry.total += counts.total;
        }
        self.matches_recorded += other.matches_recorded;
    }

    pub fn get(&self, signature: &CompositionSignature) -> Option<CompositionStats> {
        self.stats.get(signature).copied()
    }

    pub fn stats(&self) -> impl Iterator<Item = (&CompositionSignature, &CompositionStats)> {
        self.stats.iter()
    }

    pub fn matches_recorded(&self) -> usize {
        self.matches_recorded
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

#[cfg(test)]
impl StatsAggregator {
    /// Seeds counters directly as `(signature, wins, total)` rows.
    pub(crate) fn from_counts(rows: &[(&str, usize, usize)]) -> Self {
        let mut aggregator = StatsAggregator::new();
        for (signature, wins, total) in rows {
            aggregator.stats.insert(
                CompositionSignature::from(*signature),
                CompositionStats {
                    wins: *wins,
                    total: *total,
                },
            );
            aggregator.matches_recorded += wins;
        }
        aggregator
    }
}
