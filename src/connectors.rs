//! Connector geometry for elimination brackets.
//!
//! Each match in round `r` feeds match `i / 2` of round `r + 1`. A connector
//! is three axis-aligned segments: a horizontal stub out of the source, a
//! vertical joiner at the midpoint of the column gap, and a horizontal run
//! into the destination. When source and destination share a vertical center
//! the joiner is omitted.

use crate::layout::{EliminationLayout, ROUND_GAP};
use serde::Serialize;

/// One axis-aligned line segment in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineSegment {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

/// The polyline joining a source match to the match its winner advances to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connector {
    pub from_match: String,
    pub to_match: String,
    pub segments: Vec<LineSegment>,
}

/// Compute connectors for every adjacent round pair. A source match with no
/// destination (next round shorter than expected, or empty) gets none.
pub fn connectors(layout: &EliminationLayout) -> Vec<Connector> {
    let mut out = Vec::new();
    for pair in layout.rounds.windows(2) {
        let (src, dst) = (&pair[0], &pair[1]);
        if dst.nodes.is_empty() {
            continue;
        }
        for (i, node) in src.nodes.iter().enumerate() {
            let Some(dest) = dst.nodes.get(i / 2) else {
                continue;
            };
            let right = src.x + node.round_width;
            let mid_x = right + ROUND_GAP / 2;
            let mut segments = vec![LineSegment { x1: right, y1: node.y, x2: mid_x, y2: node.y }];
            if node.y != dest.y {
                segments.push(LineSegment { x1: mid_x, y1: node.y, x2: mid_x, y2: dest.y });
            }
            segments.push(LineSegment { x1: mid_x, y1: dest.y, x2: dst.x, y2: dest.y });
            out.push(Connector {
                from_match: node.match_id.clone(),
                to_match: dest.match_id.clone(),
                segments,
            });
        }
    }
    out
}
