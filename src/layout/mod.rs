//! Layout engine: one strategy per format behind a single dispatch site.
//!
//! All positions are in abstract layout units; the renderer scales them to
//! pixels, terminal cells, or whatever its medium uses. Layout output is
//! ephemeral: recomputed from scratch on every classify/merge cycle, never
//! cached across structural changes.

mod double;
mod round_robin;
mod single;
mod swiss;

use crate::standings::GroupTable;
use bracket_model::Bracket;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Vertical distance between consecutive match slots in round 0 of an
/// elimination bracket. Round `r` uses `BASE_UNIT << r` so each match's
/// center sits midway between its two feeders.
pub const BASE_UNIT: u32 = 80;

/// Fixed vertical spacing for lower-bracket rounds and Swiss grids, whose
/// round sizes do not halve monotonically.
pub const FIXED_SPACING: u32 = BASE_UNIT;

/// Horizontal width of one round column.
pub const ROUND_WIDTH: u32 = 280;

/// Horizontal gap between adjacent round columns where connectors run.
pub const ROUND_GAP: u32 = 64;

// ---------------------------------------------------------------------------
// Layout output types
// ---------------------------------------------------------------------------

/// Computed position metadata for one match. Valid for one render pass only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutNode {
    pub match_id: String,
    pub round_index: usize,
    pub match_index: usize,
    /// Vertical offset of the match's center within its section.
    pub y: u32,
    pub round_width: u32,
}

/// One positioned round column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoundLayout {
    pub name: String,
    /// Left edge of the round column.
    pub x: u32,
    pub nodes: Vec<LayoutNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EliminationLayout {
    pub rounds: Vec<RoundLayout>,
}

impl EliminationLayout {
    pub fn node_count(&self) -> usize {
        self.rounds.iter().map(|r| r.nodes.len()).sum()
    }
}

/// Render-ready geometry, one variant per format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BracketLayout {
    Elimination(EliminationLayout),
    DoubleElimination {
        upper: EliminationLayout,
        lower: EliminationLayout,
        /// Grand final, plus reset match when present. Centered by the
        /// renderer as its own section, not part of either round sequence.
        grand_final: Vec<LayoutNode>,
    },
    /// Swiss: independent per-round grids with no cross-round vertical
    /// relationship. Only horizontal round separation matters.
    Grid(Vec<RoundLayout>),
    /// Round robin: no geometry, only tabular standings per group.
    Table(Vec<GroupTable>),
}

impl Default for BracketLayout {
    fn default() -> Self {
        BracketLayout::Elimination(EliminationLayout::default())
    }
}

impl BracketLayout {
    pub fn is_empty(&self) -> bool {
        match self {
            BracketLayout::Elimination(e) => e.node_count() == 0,
            BracketLayout::DoubleElimination { upper, lower, grand_final } => {
                upper.node_count() == 0 && lower.node_count() == 0 && grand_final.is_empty()
            }
            BracketLayout::Grid(rounds) => rounds.iter().all(|r| r.nodes.is_empty()),
            BracketLayout::Table(groups) => groups.is_empty(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Compute layout for a classified bracket. Deterministic and total: empty or
/// degenerate segments produce empty geometry, never an error.
pub fn layout(bracket: &Bracket) -> BracketLayout {
    match bracket {
        Bracket::SingleElim { rounds } => BracketLayout::Elimination(single::layout(rounds)),
        Bracket::DoubleElim { upper, lower, grand_final } => {
            double::layout(upper, lower, grand_final.as_ref())
        }
        Bracket::Swiss { rounds } => BracketLayout::Grid(swiss::layout(rounds)),
        Bracket::RoundRobin { groups } => BracketLayout::Table(round_robin::layout(groups)),
    }
}

/// Exponential spacing for elimination round `r`, saturating instead of
/// overflowing on absurd round counts.
pub(crate) fn spacing(round_index: usize) -> u32 {
    u32::try_from(round_index)
        .ok()
        .and_then(|r| 1u32.checked_shl(r))
        .and_then(|factor| BASE_UNIT.checked_mul(factor))
        .unwrap_or(u32::MAX)
}

/// Vertical offset of match `i` in a round with the given spacing.
pub(crate) fn slot_offset(match_index: usize, spacing: u32) -> u32 {
    (spacing / 2).saturating_add((match_index as u32).saturating_mul(spacing))
}

/// Left edge of round column `r`.
pub(crate) fn column_x(round_index: usize) -> u32 {
    (ROUND_WIDTH + ROUND_GAP).saturating_mul(round_index as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_doubles_per_round() {
        assert_eq!(spacing(0), BASE_UNIT);
        assert_eq!(spacing(1), BASE_UNIT * 2);
        assert_eq!(spacing(2), BASE_UNIT * 4);
        assert_eq!(spacing(3), BASE_UNIT * 8);
    }

    #[test]
    fn test_spacing_saturates() {
        assert_eq!(spacing(40), u32::MAX);
        assert_eq!(spacing(4000), u32::MAX);
    }

    #[test]
    fn test_slot_offsets_are_evenly_spaced() {
        let s = spacing(0);
        let offsets: Vec<u32> = (0..4).map(|i| slot_offset(i, s)).collect();
        assert_eq!(offsets, vec![40, 120, 200, 280]);
        for pair in offsets.windows(2) {
            assert_eq!(pair[1] - pair[0], s);
        }
    }

    #[test]
    fn test_column_x_stride() {
        assert_eq!(column_x(0), 0);
        assert_eq!(column_x(1), ROUND_WIDTH + ROUND_GAP);
        assert_eq!(column_x(3), (ROUND_WIDTH + ROUND_GAP) * 3);
    }

    #[test]
    fn test_empty_bracket_layout_is_empty() {
        assert!(layout(&Bracket::default()).is_empty());
    }
}
