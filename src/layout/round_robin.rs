//! Round robin has no bracket geometry. The layout output is a tabular view
//! per group: ranked standings plus a head-to-head matrix.

use crate::standings::{self, GroupTable};
use bracket_model::Match;
use std::collections::BTreeMap;

pub(super) fn layout(groups: &BTreeMap<String, Vec<Match>>) -> Vec<GroupTable> {
    groups
        .iter()
        .map(|(name, matches)| standings::group_table(name, matches))
        .collect()
}
