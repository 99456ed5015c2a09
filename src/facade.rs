//! The facade owning the full pipeline: payload in, deltas in, render
//! bundle out. Every build runs classify, merge, layout, and connector
//! passes from scratch against the last payload and the accumulated delta
//! batch. Nothing is cached between builds, so live updates can never
//! leave stale geometry behind.

use anyhow::{Context, Result};
use bracket_model::decode::{self, decode_deltas};
use bracket_model::delta::DeltaBatch;
use bracket_model::wire::{RawBracket, RawDeltaBatch};
use bracket_model::{Bracket, Format};
use log::debug;
use serde::Serialize;
use std::collections::HashSet;

use crate::connectors::{self, Connector};
use crate::layout::{self, BracketLayout};
use crate::standings::{self, Standing};

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Where the facade is in its load/update/render cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// No payload loaded yet.
    #[default]
    Empty,
    /// A payload is loaded and its format is known.
    Classified,
    /// Live deltas have been applied since the last build.
    Merged,
    /// A render bundle has been produced for the current state.
    LaidOut,
    /// The host has drawn the last bundle.
    Rendered,
}

/// Host hooks for interaction events. The facade does not interpret clicks;
/// it forwards the clicked entity's id to whatever the host registered.
#[derive(Default)]
pub struct Callbacks {
    pub on_match_click: Option<Box<dyn Fn(&str) + Send + Sync>>,
    pub on_team_click: Option<Box<dyn Fn(&str) + Send + Sync>>,
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_match_click", &self.on_match_click.is_some())
            .field("on_team_click", &self.on_team_click.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Render bundle
// ---------------------------------------------------------------------------

/// Everything a renderer needs for one frame.
#[derive(Debug, Serialize)]
pub struct RenderBracket {
    pub format: Format,
    pub event_name: Option<String>,
    pub teams_count: Option<u32>,
    pub bracket: Bracket,
    pub layout: BracketLayout,
    pub connectors: Vec<Connector>,
    /// Populated for Swiss; round robin carries its tables inside the layout.
    pub standings: Option<Vec<Standing>>,
}

// ---------------------------------------------------------------------------
// Facade
// ---------------------------------------------------------------------------

/// Owns the last payload and the accumulated live-delta batch.
#[derive(Debug, Default)]
pub struct BracketFacade {
    raw: Option<RawBracket>,
    deltas: DeltaBatch,
    phase: Phase,
    pub callbacks: Callbacks,
}

impl BracketFacade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Replace the current payload. Accumulated deltas for matches the new
    /// payload still carries are kept, since a structural refresh and a live
    /// update may arrive in either order. Deltas for ids absent from the new
    /// payload are pruned here, so a long-lived facade does not grow an
    /// unbounded batch across re-fetches.
    pub fn load_payload(&mut self, raw: RawBracket) {
        let ids: HashSet<String> = decode::decode(&raw)
            .matches()
            .iter()
            .map(|m| m.id.clone())
            .collect();
        self.deltas.retain(|id| ids.contains(id));
        self.raw = Some(raw);
        self.phase = Phase::Classified;
    }

    pub fn ingest_json(&mut self, json: &str) -> Result<()> {
        let raw: RawBracket =
            serde_json::from_str(json).context("failed to parse bracket payload")?;
        self.load_payload(raw);
        Ok(())
    }

    /// Fold a delta batch into the accumulated one, last value per field
    /// winning. Deltas arriving before any payload are kept for the first
    /// build after one loads.
    pub fn apply_deltas(&mut self, batch: &DeltaBatch) {
        self.deltas.absorb(batch);
        if self.raw.is_some() {
            self.phase = Phase::Merged;
        }
    }

    pub fn ingest_deltas_json(&mut self, json: &str) -> Result<()> {
        let raw: RawDeltaBatch =
            serde_json::from_str(json).context("failed to parse delta batch")?;
        self.apply_deltas(&decode_deltas(&raw));
        Ok(())
    }

    /// Run the full pipeline and produce a render bundle.
    pub fn build(&mut self) -> RenderBracket {
        let (format, bracket, event_name, teams_count) = match &self.raw {
            Some(raw) => (
                decode::classify(raw),
                decode::decode(raw),
                raw.event_name.clone(),
                raw.teams_count,
            ),
            None => (Format::default(), Bracket::default(), None, None),
        };
        let bracket = bracket_model::merge::merge(&bracket, &self.deltas);
        let layout = layout::layout(&bracket);

        let connectors = match &layout {
            BracketLayout::Elimination(e) => connectors::connectors(e),
            BracketLayout::DoubleElimination { upper, lower, .. } => {
                let mut c = connectors::connectors(upper);
                c.extend(connectors::connectors(lower));
                c
            }
            BracketLayout::Grid(_) | BracketLayout::Table(_) => Vec::new(),
        };

        let standings = match &bracket {
            Bracket::Swiss { .. } => {
                let matches: Vec<_> = bracket.matches().into_iter().cloned().collect();
                Some(standings::compute_standings(&matches))
            }
            _ => None,
        };

        debug!(
            "built {} bundle: {} matches, {} connectors",
            format.label(),
            bracket.match_count(),
            connectors.len()
        );
        self.phase = Phase::LaidOut;
        RenderBracket {
            format,
            event_name,
            teams_count,
            bracket,
            layout,
            connectors,
            standings,
        }
    }

    /// The host calls this after drawing the last bundle.
    pub fn mark_rendered(&mut self) {
        if self.phase == Phase::LaidOut {
            self.phase = Phase::Rendered;
        }
    }

    pub fn notify_match_click(&self, match_id: &str) {
        if let Some(cb) = &self.callbacks.on_match_click {
            cb(match_id);
        }
    }

    pub fn notify_team_click(&self, team_id: &str) {
        if let Some(cb) = &self.callbacks.on_team_click {
            cb(team_id);
        }
    }
}
