//! Tournament bracket layout and live-state synchronization.
//!
//! The pipeline is a chain of pure passes over the model crate's types:
//! classify a raw payload into a format, decode it into a clean bracket,
//! merge accumulated live deltas, then compute geometry and connectors for
//! the format's layout strategy. [`facade::BracketFacade`] strings the
//! passes together for hosts that want a single entry point; each pass is
//! also usable on its own.

pub mod connectors;
pub mod facade;
pub mod layout;
pub mod naming;
pub mod standings;

pub use bracket_model as model;

pub use connectors::{Connector, LineSegment};
pub use facade::{BracketFacade, Phase, RenderBracket};
pub use layout::{BracketLayout, EliminationLayout, LayoutNode, RoundLayout};
pub use model::{Bracket, Format, Match, MatchStatus, Round, Slot, Team};
pub use standings::{GroupTable, Standing};
