//! Double-elimination layout.
//!
//! The upper bracket is a standard fan-in and reuses the exponential rule.
//! The lower bracket uses fixed spacing: its round sizes alternate
//! shrink/hold as eliminated upper-bracket teams drop in, so the halving
//! geometry does not apply. The grand final (and its reset match, when the
//! payload carries one) forms its own centered section after both sequences.

use super::{
    BracketLayout, EliminationLayout, FIXED_SPACING, LayoutNode, ROUND_WIDTH, RoundLayout,
    column_x, single, spacing,
};
use crate::naming;
use bracket_model::{Match, Round};

pub(super) fn layout(
    upper: &[Round],
    lower: &[Round],
    grand_final: Option<&Match>,
) -> BracketLayout {
    let upper_total = upper.len();
    let upper_layout = EliminationLayout {
        rounds: upper
            .iter()
            .enumerate()
            .map(|(r, round)| RoundLayout {
                name: naming::upper_round_name(r, upper_total, round.name.as_deref()),
                x: column_x(r),
                nodes: single::round_nodes(round, r, spacing(r)),
            })
            .collect(),
    };

    let lower_total = lower.len();
    let lower_layout = EliminationLayout {
        rounds: lower
            .iter()
            .enumerate()
            .map(|(r, round)| RoundLayout {
                name: naming::lower_round_name(r, lower_total, round.name.as_deref()),
                x: column_x(r),
                nodes: single::round_nodes(round, r, FIXED_SPACING),
            })
            .collect(),
    };

    // Grand final column sits after whichever sequence is longer. y is 0 for
    // both nodes: the section is centered as a whole by the renderer.
    let gf_column = upper.len().max(lower.len());
    let mut gf_nodes = Vec::new();
    if let Some(gf) = grand_final {
        gf_nodes.push(LayoutNode {
            match_id: gf.id.clone(),
            round_index: gf_column,
            match_index: 0,
            y: 0,
            round_width: ROUND_WIDTH,
        });
        if let Some(reset) = &gf.reset_match {
            gf_nodes.push(LayoutNode {
                match_id: reset.id.clone(),
                round_index: gf_column + 1,
                match_index: 0,
                y: 0,
                round_width: ROUND_WIDTH,
            });
        }
    }

    BracketLayout::DoubleElimination {
        upper: upper_layout,
        lower: lower_layout,
        grand_final: gf_nodes,
    }
}
