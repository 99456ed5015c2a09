//! Single-elimination layout: the standard binary-tree fan-in.
//!
//! Round `r` spaces consecutive matches `BASE_UNIT << r` apart, with the
//! first match at half that spacing. This is the unique rule that puts each
//! match's vertical center exactly midway between its two feeder matches, so
//! straight connectors midpoint-align without per-match correction.

use super::{EliminationLayout, LayoutNode, RoundLayout, ROUND_WIDTH, column_x, slot_offset, spacing};
use crate::naming;
use bracket_model::Round;

pub(super) fn layout(rounds: &[Round]) -> EliminationLayout {
    let total = rounds.len();
    EliminationLayout {
        rounds: rounds
            .iter()
            .enumerate()
            .map(|(r, round)| RoundLayout {
                name: naming::single_round_name(r, total, round.name.as_deref()),
                x: column_x(r),
                nodes: round_nodes(round, r, spacing(r)),
            })
            .collect(),
    }
}

pub(super) fn round_nodes(round: &Round, round_index: usize, spacing: u32) -> Vec<LayoutNode> {
    round
        .matches
        .iter()
        .enumerate()
        .map(|(i, m)| LayoutNode {
            match_id: m.id.clone(),
            round_index,
            match_index: i,
            y: slot_offset(i, spacing),
            round_width: ROUND_WIDTH,
        })
        .collect()
}
