//! Swiss layout: each round is an independent grid. Matches are enumerated
//! in arrival order with uniform spacing; no cross-round vertical
//! relationship exists and none is computed. Sparse round keys (a missing
//! round 2 between rounds 1 and 3) imply no adjacency.

use super::{FIXED_SPACING, LayoutNode, ROUND_WIDTH, RoundLayout, column_x};
use crate::naming;
use bracket_model::Match;
use std::collections::BTreeMap;

pub(super) fn layout(rounds: &BTreeMap<u32, Vec<Match>>) -> Vec<RoundLayout> {
    rounds
        .iter()
        .enumerate()
        .map(|(column, (number, matches))| RoundLayout {
            name: naming::swiss_round_name(*number, None),
            x: column_x(column),
            nodes: matches
                .iter()
                .enumerate()
                .map(|(i, m)| LayoutNode {
                    match_id: m.id.clone(),
                    round_index: column,
                    match_index: i,
                    y: (i as u32).saturating_mul(FIXED_SPACING),
                    round_width: ROUND_WIDTH,
                })
                .collect(),
        })
        .collect()
}
