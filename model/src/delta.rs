//! Live delta batches: the most recent known truth per match from the
//! real-time update source. Produced externally, consumed read-only by merge.

use crate::MatchStatus;
use std::collections::HashMap;

/// Partial update for one match. Absent fields leave the base value alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveDelta {
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    pub status: Option<MatchStatus>,
}

impl LiveDelta {
    pub fn is_empty(&self) -> bool {
        self.score1.is_none() && self.score2.is_none() && self.status.is_none()
    }
}

/// Deltas keyed by match id. Values are last-known-per-field, not an ordered
/// patch log: folding a newer delta for the same match overwrites only the
/// fields the newer delta carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeltaBatch {
    pub entries: HashMap<String, LiveDelta>,
}

impl DeltaBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, match_id: &str) -> Option<&LiveDelta> {
        self.entries.get(match_id)
    }

    /// Drop entries whose match ids fail the predicate. Used when a
    /// structural re-fetch removes matches the batch still has deltas for.
    pub fn retain<F: FnMut(&str) -> bool>(&mut self, mut keep: F) {
        self.entries.retain(|id, _| keep(id));
    }

    /// Fold another batch into this one, per-field last-value-wins.
    pub fn absorb(&mut self, other: &DeltaBatch) {
        for (id, delta) in &other.entries {
            let entry = self.entries.entry(id.clone()).or_default();
            if delta.score1.is_some() {
                entry.score1 = delta.score1;
            }
            if delta.score2.is_some() {
                entry.score2 = delta.score2;
            }
            if delta.status.is_some() {
                entry.status = delta.status;
            }
        }
    }
}

impl FromIterator<(String, LiveDelta)> for DeltaBatch {
    fn from_iter<I: IntoIterator<Item = (String, LiveDelta)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}
