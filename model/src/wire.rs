//! Raw bracket payload wire shapes: serde structs for deserializing the
//! tournament data source's JSON. Every field is optional; payload variants
//! observed in the wild are absorbed here (aliases, int-or-string scalars,
//! array-vs-keyed rounds) so `decode` can stay total.

use serde::Deserialize;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Bracket payload
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawBracket {
    /// Explicit format tag. Trusted verbatim by the classifier when present.
    #[serde(alias = "type")]
    pub format: Option<String>,
    /// Passthrough display metadata, untouched by the pipeline.
    pub event_name: Option<String>,
    pub teams_count: Option<u32>,
    /// Either an array of rounds (elimination) or an object keyed by round
    /// number (Swiss). The shape itself is a classification signal.
    pub rounds: Option<RawRounds>,
    pub upper_bracket: Option<Vec<RawRound>>,
    pub lower_bracket: Option<Vec<RawRound>>,
    #[serde(alias = "grand_finals")]
    pub grand_final: Option<RawMatch>,
    pub groups: Option<BTreeMap<String, RawGroup>>,
    /// Flat match list. Some payloads skip the round nesting entirely and tag
    /// each match with a `round_number` instead.
    pub matches: Option<Vec<RawMatch>>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum RawRounds {
    List(Vec<RawRound>),
    /// Swiss shape: `{"1": [...], "3": [...]}`. Keys are strings in JSON;
    /// decode parses them as round numbers.
    Keyed(BTreeMap<String, Vec<RawMatch>>),
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawRound {
    pub name: Option<String>,
    #[serde(alias = "round_number")]
    pub round: Option<u32>,
    pub matches: Option<Vec<RawMatch>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawGroup {
    pub name: Option<String>,
    pub matches: Option<Vec<RawMatch>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawMatch {
    pub id: Option<RawId>,
    pub team1: Option<RawTeam>,
    pub team2: Option<RawTeam>,
    #[serde(alias = "team1_score")]
    pub score1: Option<RawScore>,
    #[serde(alias = "team2_score")]
    pub score2: Option<RawScore>,
    pub status: Option<String>,
    pub best_of: Option<u8>,
    #[serde(alias = "round_number")]
    pub round: Option<u32>,
    pub scheduled_at: Option<String>,
    pub reset_match: Option<Box<RawMatch>>,
}

/// Team reference inside a match. Older payloads hang the score off the team
/// object instead of the match, so it is accepted here too.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawTeam {
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub logo: Option<String>,
    pub country: Option<String>,
    pub score: Option<RawScore>,
    pub bye: Option<bool>,
}

/// IDs arrive as integers from the database API and strings from scrapers.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawId {
    Int(u64),
    Text(String),
}

impl RawId {
    pub fn to_key(&self) -> String {
        match self {
            RawId::Int(n) => n.to_string(),
            RawId::Text(s) => s.clone(),
        }
    }
}

/// Scores arrive as integers or numeric strings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawScore {
    Int(u32),
    Text(String),
}

impl RawScore {
    pub fn to_u32(&self) -> Option<u32> {
        match self {
            RawScore::Int(n) => Some(*n),
            RawScore::Text(s) => s.trim().parse().ok(),
        }
    }
}

// ---------------------------------------------------------------------------
// Live delta batch
// ---------------------------------------------------------------------------

/// One partial live update, keyed externally by match id. Fields absent from
/// the delta leave the base value untouched.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawDelta {
    #[serde(alias = "team1_score")]
    pub score1: Option<RawScore>,
    #[serde(alias = "team2_score")]
    pub score2: Option<RawScore>,
    pub status: Option<String>,
}

pub type RawDeltaBatch = BTreeMap<String, RawDelta>;
