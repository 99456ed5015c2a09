//! Derived per-team standings for Swiss and round-robin segments.
//!
//! Standings are never authoritative; they are recomputed from completed
//! matches on every cycle. Matches with unresolved slots or missing scores
//! contribute nothing.

use bracket_model::{Match, MatchStatus};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const WIN_POINTS: u32 = 3;
pub const DRAW_POINTS: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Standing {
    /// 1-based position after sorting. Advancement highlighting (top-N) is a
    /// presentational decision derived from this by the renderer.
    pub rank: usize,
    pub team: String,
    pub team_id: Option<String>,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub points: u32,
    pub map_wins: u32,
    pub map_losses: u32,
}

impl Standing {
    pub fn differential(&self) -> i64 {
        i64::from(self.map_wins) - i64::from(self.map_losses)
    }

    /// Display record, "W-L" or "W-L-D" when the team has drawn.
    pub fn record(&self) -> String {
        if self.draws > 0 {
            format!("{}-{}-{}", self.wins, self.losses, self.draws)
        } else {
            format!("{}-{}", self.wins, self.losses)
        }
    }
}

/// Aggregate completed matches into a ranked standings list.
///
/// Sort key: points descending, then map differential descending, then team
/// name ascending for determinism. Draws (round robin only) score
/// `DRAW_POINTS` for each side.
pub fn compute_standings(matches: &[Match]) -> Vec<Standing> {
    // BTreeMap keeps accumulation order independent of match order.
    let mut table: BTreeMap<String, Standing> = BTreeMap::new();

    for m in matches.iter().filter(|m| m.status == MatchStatus::Completed) {
        let (Some(t1), Some(t2)) = (m.team1.team(), m.team2.team()) else {
            continue;
        };
        let (Some(s1), Some(s2)) = (m.score1, m.score2) else {
            continue;
        };

        for (team, us, them) in [(t1, s1, s2), (t2, s2, s1)] {
            let entry = table.entry(team.name.clone()).or_insert_with(|| Standing {
                team: team.name.clone(),
                team_id: Some(team.id.clone()).filter(|id| !id.is_empty()),
                ..Standing::default()
            });
            entry.played += 1;
            entry.map_wins += us;
            entry.map_losses += them;
            if us > them {
                entry.wins += 1;
                entry.points += WIN_POINTS;
            } else if us < them {
                entry.losses += 1;
            } else {
                entry.draws += 1;
                entry.points += DRAW_POINTS;
            }
        }
    }

    let mut standings: Vec<Standing> = table.into_values().collect();
    standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.differential().cmp(&a.differential()))
            .then_with(|| a.team.cmp(&b.team))
    });
    for (i, s) in standings.iter_mut().enumerate() {
        s.rank = i + 1;
    }
    standings
}

// ---------------------------------------------------------------------------
// Head-to-head matrix
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeadToHeadCell {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub match_ids: Vec<String>,
}

/// Win/loss record per ordered team pair. Population is symmetric (a win
/// for A over B is simultaneously a loss for B against A, and the match
/// appears in both cells) but display is asymmetric: cell (A, B) shows A's
/// record against B.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeadToHead {
    /// team → opponent → record.
    pub cells: HashMap<String, HashMap<String, HeadToHeadCell>>,
}

impl HeadToHead {
    pub fn cell(&self, team: &str, opponent: &str) -> Option<&HeadToHeadCell> {
        self.cells.get(team)?.get(opponent)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Build the matrix in a single scan over completed matches.
pub fn head_to_head(matches: &[Match]) -> HeadToHead {
    let mut matrix = HeadToHead::default();

    for m in matches.iter().filter(|m| m.status == MatchStatus::Completed) {
        let (Some(t1), Some(t2)) = (m.team1.team(), m.team2.team()) else {
            continue;
        };
        let (Some(s1), Some(s2)) = (m.score1, m.score2) else {
            continue;
        };

        let forward = matrix
            .cells
            .entry(t1.name.clone())
            .or_default()
            .entry(t2.name.clone())
            .or_default();
        if s1 > s2 {
            forward.wins += 1;
        } else if s1 < s2 {
            forward.losses += 1;
        } else {
            forward.draws += 1;
        }
        forward.match_ids.push(m.id.clone());

        let reverse = matrix
            .cells
            .entry(t2.name.clone())
            .or_default()
            .entry(t1.name.clone())
            .or_default();
        if s2 > s1 {
            reverse.wins += 1;
        } else if s2 < s1 {
            reverse.losses += 1;
        } else {
            reverse.draws += 1;
        }
        reverse.match_ids.push(m.id.clone());
    }

    matrix
}

/// One round-robin group's tabular view: ranked standings plus the
/// head-to-head matrix. An empty name marks the implicit single group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupTable {
    pub name: String,
    pub standings: Vec<Standing>,
    pub head_to_head: HeadToHead,
}

pub fn group_table(name: &str, matches: &[Match]) -> GroupTable {
    GroupTable {
        name: name.to_string(),
        standings: compute_standings(matches),
        head_to_head: head_to_head(matches),
    }
}
