pub mod decode;
pub mod delta;
pub mod merge;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Domain types, independent of the raw payload wire format
// ---------------------------------------------------------------------------

/// Supported tournament topologies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    #[default]
    SingleElimination,
    DoubleElimination,
    Swiss,
    RoundRobin,
}

impl Format {
    pub fn label(&self) -> &'static str {
        match self {
            Format::SingleElimination => "Single Elimination",
            Format::DoubleElimination => "Double Elimination",
            Format::Swiss => "Swiss",
            Format::RoundRobin => "Round Robin",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Upcoming,
    Live,
    Completed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub logo: Option<String>,
    pub country: Option<String>,
}

/// One side of a match: a resolved team, an unresolved slot, or a bye.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Team(Team),
    #[default]
    Tbd,
    /// Unresolved slot with a feed label like "Winner of M3".
    Placeholder(String),
    Bye,
}

impl Slot {
    pub fn team(&self) -> Option<&Team> {
        match self {
            Slot::Team(t) => Some(t),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Slot::Team(t) => &t.name,
            Slot::Tbd => "TBD",
            Slot::Placeholder(label) => label,
            Slot::Bye => "BYE",
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Slot::Team(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Match {
    pub id: String,
    pub team1: Slot,
    pub team2: Slot,
    /// Undefined until reported. Non-negative by type.
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    pub status: MatchStatus,
    pub best_of: Option<u8>,
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Potential bracket-reset game. Only meaningful on a double-elimination
    /// grand final.
    pub reset_match: Option<Box<Match>>,
}

impl Match {
    pub fn is_live(&self) -> bool {
        self.status == MatchStatus::Live
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// Winner by score. `None` when the match is not completed, a score is
    /// missing, or the scores are tied (ties are only legal in round robin,
    /// where points rather than win/loss are authoritative).
    pub fn winner(&self) -> Option<&Team> {
        if self.status != MatchStatus::Completed {
            return None;
        }
        let (s1, s2) = (self.score1?, self.score2?);
        if s1 > s2 {
            self.team1.team()
        } else if s2 > s1 {
            self.team2.team()
        } else {
            None
        }
    }

    pub fn is_draw(&self) -> bool {
        self.status == MatchStatus::Completed
            && self.score1.is_some()
            && self.score1 == self.score2
    }
}

/// Ordered sequence of matches at a named stage of a bracket segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Round {
    /// Explicit per-round name from the data. Always wins over derived names.
    pub name: Option<String>,
    pub matches: Vec<Match>,
}

// ---------------------------------------------------------------------------
// Bracket, tagged variant per format
// ---------------------------------------------------------------------------

/// A classified bracket segment. One variant per supported format so that
/// downstream dispatch (layout, naming, standings) is a single match site.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bracket {
    SingleElim {
        rounds: Vec<Round>,
    },
    DoubleElim {
        upper: Vec<Round>,
        lower: Vec<Round>,
        grand_final: Option<Match>,
    },
    /// Swiss rounds keyed by the data's own round number. Keys are not
    /// necessarily 1-based or contiguous.
    Swiss {
        rounds: BTreeMap<u32, Vec<Match>>,
    },
    /// Zero or more named groups. An empty group name marks the implicit
    /// single group of a payload that had no group partition.
    RoundRobin {
        groups: BTreeMap<String, Vec<Match>>,
    },
}

impl Default for Bracket {
    fn default() -> Self {
        Bracket::SingleElim { rounds: Vec::new() }
    }
}

impl Bracket {
    pub fn format(&self) -> Format {
        match self {
            Bracket::SingleElim { .. } => Format::SingleElimination,
            Bracket::DoubleElim { .. } => Format::DoubleElimination,
            Bracket::Swiss { .. } => Format::Swiss,
            Bracket::RoundRobin { .. } => Format::RoundRobin,
        }
    }

    /// Every match in the bracket, including the grand final and its nested
    /// reset match, in deterministic traversal order.
    pub fn matches(&self) -> Vec<&Match> {
        let mut out = Vec::new();
        match self {
            Bracket::SingleElim { rounds } => {
                for round in rounds {
                    out.extend(round.matches.iter());
                }
            }
            Bracket::DoubleElim { upper, lower, grand_final } => {
                for round in upper.iter().chain(lower.iter()) {
                    out.extend(round.matches.iter());
                }
                if let Some(gf) = grand_final {
                    out.push(gf);
                    if let Some(reset) = &gf.reset_match {
                        out.push(reset);
                    }
                }
            }
            Bracket::Swiss { rounds } => {
                for matches in rounds.values() {
                    out.extend(matches.iter());
                }
            }
            Bracket::RoundRobin { groups } => {
                for matches in groups.values() {
                    out.extend(matches.iter());
                }
            }
        }
        out
    }

    pub fn find_match(&self, id: &str) -> Option<&Match> {
        self.matches().into_iter().find(|m| m.id == id)
    }

    pub fn match_count(&self) -> usize {
        self.matches().len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches().is_empty()
    }
}
