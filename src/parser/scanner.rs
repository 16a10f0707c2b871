use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Bot,
    Support,
}

impl Role {
    /// Canonical role order used everywhere a team is rendered.
    pub const ALL: [Role; 5] = [Role::Top, Role::Jungle, Role::Mid, Role::Bot, Role::Support];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Top => "Top",
            Role::Jungle => "Jungle",
            Role::Mid => "Mid",
            Role::Bot => "Bot",
            Role::Support => "Support",
        }
    }

    pub fn from_label(label: &str) -> Option<Role> {
        let label = label.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// `Team (<label>):` opens a new team slot.
    TeamHeader { label: String },
    /// `-- <Role>: <champion> [<class>, <class>]`
    RoleLine { role: Role, classes: Vec<String> },
    /// `Prediction: <n> | Real: <winner>`; only the real index is used for aggregation.
    MatchResult { predicted: Option<usize>, winner: usize },
}

struct LinePatterns {
    team_header: Regex,
    role_line: Regex,
    result_line: Regex,
}

static PATTERNS: OnceLock<LinePatterns> = OnceLock::new();

fn patterns() -> &'static LinePatterns {
    PATTERNS.get_or_init(|| LinePatterns {
        team_header: Regex::new(r"(?i)Team \((.+?)\):").expect("valid team header pattern"),
        role_line: Regex::new(r"(?i)--\s*(Top|Jungle|Mid|Bot|Support):.*?\[(.+?)\]")
            .expect("valid role line pattern"),
        result_line: Regex::new(r"(?i)Prediction:\s*(\d+)\s*\|\s*Real:\s*(\d+)")
            .expect("valid result line pattern"),
    })
}

/// Stateless line classifier for the match analysis log.
pub struct LogScanner;

impl LogScanner {
    /// Returns the event a line carries, or `None` for anything unrecognized.
    pub fn classify(line: &str) -> Option<LogEvent> {
        let patterns = patterns();

        if let Some(caps) = patterns.team_header.captures(line) {
            return Some(LogEvent::TeamHeader {
                label: caps[1].trim().to_string(),
            });
        }

        if let Some(caps) = patterns.role_line.captures(line) {
            let role = Role::from_label(&caps[1])?;
            return Some(LogEvent::RoleLine {
                role,
                classes: split_classes(&caps[2]),
            });
        }

        if let Some(caps) = patterns.result_line.captures(line) {
            let winner = caps[2].parse::<usize>().ok()?;
            return Some(LogEvent::MatchResult {
                predicted: caps[1].parse::<usize>().ok(),
                winner,
            });
        }

        None
    }

    pub fn scan(text: &str) -> impl Iterator<Item = LogEvent> + '_ {
        text.lines().filter_map(Self::classify)
    }
}

fn split_classes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
