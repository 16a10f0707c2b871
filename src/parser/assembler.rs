use super::scanner::{LogEvent, LogScanner};
use crate::analysis::composition::{CompositionSignature, TeamComposition};
use tracing::debug;

/// A fully parsed match: two teams and the index of the one that won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    teams: [TeamComposition; 2],
    winner: usize,
}

impl MatchRecord {
    /// Returns `None` unless `winner` is 0 or 1.
    pub fn new(teams: [TeamComposition; 2], winner: usize) -> Option<Self> {
        if winner > 1 {
            return None;
        }
        Some(MatchRecord { teams, winner })
    }

    pub fn teams(&self) -> &[TeamComposition; 2] {
        &self.teams
    }

    pub fn winner(&self) -> usize {
        self.winner
    }

    /// `(winner_signature, loser_signature)`
    pub fn signatures(&self) -> (CompositionSignature, CompositionSignature) {
        let loser = 1 - self.winner;
        (self.teams[self.winner].signature(), self.teams[loser].signature())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum AssemblerState {
    /// Nothing buffered; the next team header opens team 0.
    #[default]
    Idle,
    AwaitingTeam1 {
        team0: TeamComposition,
    },
    AwaitingResult {
        team0: TeamComposition,
        team1: TeamComposition,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    pub matches_emitted: usize,
    pub matches_discarded: usize,
    pub events_ignored: usize,
}

/// Groups scanner events into match records, one scan pass at a time.
#[derive(Debug, Default)]
pub struct MatchAssembler {
    state: AssemblerState,
    stats: AssemblyStats,
}

impl MatchAssembler {
    pub fn new() -> Self {
        MatchAssembler::default()
    }

    pub fn push(&mut self, event: LogEvent) -> Option<MatchRecord> {
        let state = std::mem::take(&mut self.state);

        let (next, emitted) = match (state, event) {
            (AssemblerState::Idle, LogEvent::TeamHeader { .. }) => (
                AssemblerState::AwaitingTeam1 {
                    team0: TeamComposition::new(),
                },
                None,
            ),
            (AssemblerState::AwaitingTeam1 { team0 }, LogEvent::TeamHeader { .. }) => (
                AssemblerState::AwaitingResult {
                    team0,
                    team1: TeamComposition::new(),
                },
                None,
            ),
            (AssemblerState::AwaitingResult { .. }, LogEvent::TeamHeader { label }) => {
                // A third header with no result in between: the buffered pair never closed.
                self.discard(&format!("team header '{}' before a result line", label));
                (
                    AssemblerState::AwaitingTeam1 {
                        team0: TeamComposition::new(),
                    },
                    None,
                )
            }

            (AssemblerState::Idle, LogEvent::RoleLine { .. }) => {
                self.stats.events_ignored += 1;
                (AssemblerState::Idle, None)
            }
            (AssemblerState::AwaitingTeam1 { mut team0 }, LogEvent::RoleLine { role, classes }) => {
                team0.set_role(role, classes);
                (AssemblerState::AwaitingTeam1 { team0 }, None)
            }
            (
                AssemblerState::AwaitingResult { team0, mut team1 },
                LogEvent::RoleLine { role, classes },
            ) => {
                team1.set_role(role, classes);
                (AssemblerState::AwaitingResult { team0, team1 }, None)
            }

            (AssemblerState::Idle, LogEvent::MatchResult { .. }) => {
                self.stats.events_ignored += 1;
                (AssemblerState::Idle, None)
            }
            (AssemblerState::AwaitingTeam1 { .. }, LogEvent::MatchResult { .. }) => {
                // Dropped on purpose: no winner is held over for a team that has not been seen yet.
                self.discard("result line with only one team buffered");
                (AssemblerState::Idle, None)
            }
            (AssemblerState::AwaitingResult { team0, team1 }, LogEvent::MatchResult { winner, .. }) => {
                match MatchRecord::new([team0, team1], winner) {
                    Some(record) => {
                        self.stats.matches_emitted += 1;
                        (AssemblerState::Idle, Some(record))
                    }
                    None => {
                        self.discard(&format!("winner index {} out of range", winner));
                        (AssemblerState::Idle, None)
                    }
                }
            }
        };

        self.state = next;
        emitted
    }

    /// Ends the pass. A buffered match without a result is dropped.
    pub fn finish(mut self) -> AssemblyStats {
        if self.state != AssemblerState::Idle {
            self.discard("end of input before a result line");
        }
        self.stats
    }

    pub fn stats(&self) -> AssemblyStats {
        self.stats
    }

    fn discard(&mut self, reason: &str) {
        self.stats.matches_discarded += 1;
        debug!(reason, "discarding incomplete match");
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub matches: Vec<MatchRecord>,
    pub stats: AssemblyStats,
}

impl ParseOutcome {
    /// Keeps only the last `limit` matches of the log; `None` or `Some(0)` keeps everything.
    pub fn most_recent(mut self, limit: Option<usize>) -> Self {
        if let Some(limit) = limit.filter(|&n| n > 0) {
            let skip = self.matches.len().saturating_sub(limit);
            self.matches.drain(..skip);
        }
        self
    }
}

/// Scans the whole text and collects every complete match in log order.
pub fn parse_matches(text: &str) -> ParseOutcome {
    parse_lines(text.lines(), || {})
}

/// Like [`parse_matches`], calling `on_line` after each line is consumed.
pub fn parse_lines<'a, I, F>(lines: I, mut on_line: F) -> ParseOutcome
where
    I: IntoIterator<Item = &'a str>,
    F: FnMut(),
{
    let mut assembler = MatchAssembler::new();
    let mut matches = Vec::new();
    for line in lines {
        if let Some(record) = LogScanner::classify(line).and_then(|event| assembler.push(event)) {
            matches.push(record);
        }
        on_line();
    }
    let stats = assembler.finish();

    ParseOutcome { matches, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::scanner::Role;

    const ONE_MATCH: &str = "\
Team (1):
-- Top: x [Fighter]
-- Jungle: x [Tank]
-- Mid: x [Mage]
-- Bot: x [Marksman]
-- Support: x [Support]
Team (2):
-- Top: y [Assassin]
Prediction: 1 | Real: 0
";

    #[test]
    fn test_single_match() {
        let outcome = parse_matches(ONE_MATCH);
        assert_eq!(outcome.matches.len(), 1);
        let record = &outcome.matches[0];
        assert_eq!(record.winner(), 0);
        assert_eq!(record.teams()[0].assigned_roles(), 5);
        assert_eq!(record.teams()[1].classes(Role::Top), Some(&["Assassin".to_string()][..]));
        assert_eq!(outcome.stats.matches_emitted, 1);
        assert_eq!(outcome.stats.matches_discarded, 0);
    }

    #[test]
    fn test_winner_and_loser_signatures() {
        let outcome = parse_matches(ONE_MATCH);
        let (winner, loser) = outcome.matches[0].signatures();
        assert_eq!(
            winner.as_str(),
            "Top[fighter], Jungle[tank], Mid[mage], Bot[marksman], Support[support]"
        );
        assert_eq!(
            loser.as_str(),
            "Top[assassin], Jungle[None], Mid[None], Bot[None], Support[None]"
        );
    }

    #[test]
    fn test_third_header_flushes_stale_pair() {
        let text = "\
Team (1):
-- Top: a [Tank]
Team (2):
-- Top: b [Mage]
Team (3):
-- Top: c [Fighter]
Team (4):
-- Top: d [Marksman]
Prediction: 0 | Real: 1
";
        let outcome = parse_matches(text);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.stats.matches_discarded, 1);
        let record = &outcome.matches[0];
        assert_eq!(record.teams()[0].classes(Role::Top), Some(&["Fighter".to_string()][..]));
        assert_eq!(record.winner(), 1);
    }

    #[test]
    fn test_dangling_match_at_end_of_input() {
        let text = format!("{}Team (1):\n-- Top: a [Tank]\nTeam (2):\n", ONE_MATCH);
        let outcome = parse_matches(&text);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.stats.matches_discarded, 1);
    }

    #[test]
    fn test_result_with_one_team_drops_it() {
        let text = "\
Team (1):
-- Top: a [Tank]
Prediction: 0 | Real: 0
Team (2):
-- Top: b [Mage]
";
        let outcome = parse_matches(text);
        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.stats.matches_discarded, 2);
    }

    #[test]
    fn test_out_of_range_winner_drops_match() {
        let text = ONE_MATCH.replace("Real: 0", "Real: 2");
        let outcome = parse_matches(&text);
        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.stats.matches_discarded, 1);
    }

    #[test]
    fn test_events_outside_a_match_are_ignored() {
        let text = format!("-- Top: stray [Tank]\nPrediction: 0 | Real: 0\n{}", ONE_MATCH);
        let outcome = parse_matches(&text);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.stats.events_ignored, 2);
        assert_eq!(outcome.stats.matches_discarded, 0);
    }

    #[test]
    fn test_role_line_last_write_wins() {
        let text = ONE_MATCH.replace(
            "-- Top: y [Assassin]",
            "-- Top: y [Assassin]\n-- top: z [Tank, Fighter]",
        );
        let outcome = parse_matches(&text);
        assert_eq!(
            outcome.matches[0].teams()[1].classes(Role::Top),
            Some(&["Tank".to_string(), "Fighter".to_string()][..])
        );
    }

    #[test]
    fn test_consecutive_matches() {
        let text = format!("{}{}", ONE_MATCH, ONE_MATCH.replace("Real: 0", "Real: 1"));
        let outcome = parse_matches(&text);
        assert_eq!(outcome.matches.len(), 2);
        assert_eq!(outcome.matches[0].winner(), 0);
        assert_eq!(outcome.matches[1].winner(), 1);
    }

    #[test]
    fn test_most_recent_keeps_log_tail() {
        let text = format!(
            "{}{}{}",
            ONE_MATCH,
            ONE_MATCH.replace("Real: 0", "Real: 1"),
            ONE_MATCH.replace("[Assassin]", "[Tank]")
        );
        let outcome = parse_matches(&text).most_recent(Some(2));
        assert_eq!(outcome.matches.len(), 2);
        assert_eq!(outcome.matches[0].winner(), 1);
        assert_eq!(outcome.matches[1].teams()[1].classes(Role::Top), Some(&["Tank".to_string()][..]));

        assert_eq!(parse_matches(&text).most_recent(Some(10)).matches.len(), 3);
        assert_eq!(parse_matches(&text).most_recent(None).matches.len(), 3);
    }

    #[test]
    fn test_zero_recent_limit_keeps_all_matches() {
        let text = format!("{}{}", ONE_MATCH, ONE_MATCH);
        assert_eq!(parse_matches(&text).most_recent(Some(0)).matches.len(), 2);
    }

    #[test]
    fn test_match_record_rejects_bad_winner() {
        let teams = [TeamComposition::new(), TeamComposition::new()];
        assert!(MatchRecord::new(teams.clone(), 2).is_none());
        let record = MatchRecord::new(teams, 1).unwrap();
        assert_eq!(record.winner(), 1);
    }

    #[test]
    fn test_result_before_second_team_is_not_held_over() {
        let text = "\
Team (1):
Prediction: 0 | Real: 0
Team (2):
Team (3):
";
        let outcome = parse_matches(text);
        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.stats.matches_discarded, 2);
    }

    #[test]
    fn test_parse_lines_reports_each_line() {
        let mut seen = 0;
        let outcome = parse_lines(ONE_MATCH.lines(), || seen += 1);
        assert_eq!(seen, ONE_MATCH.lines().count());
        assert_eq!(outcome.matches, parse_matches(ONE_MATCH).matches);
    }

    #[test]
    fn test_push_reports_emission() {
        let mut assembler = MatchAssembler::new();
        let mut emitted = Vec::new();
        for event in LogScanner::scan(ONE_MATCH) {
            if let Some(record) = assembler.push(event) {
                emitted.push(record);
            }
        }
        assert_eq!(emitted.len(), 1);
        assert_eq!(assembler.stats().matches_emitted, 1);
        assert_eq!(assembler.finish().matches_discarded, 0);
    }
}
