//! Classification and wire→domain mapping.
//!
//! Both entry points are total: malformed or missing fields degrade to empty
//! or partial structures instead of errors, so a renderer can show an
//! empty-state rather than crash.

use crate::wire::{RawBracket, RawDelta, RawDeltaBatch, RawMatch, RawRound, RawRounds, RawTeam};
use crate::delta::{DeltaBatch, LiveDelta};
use crate::{Bracket, Format, Match, MatchStatus, Round, Slot, Team};
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Format classifier
// ---------------------------------------------------------------------------

/// Decide which topology a raw payload represents.
///
/// Precedence is fixed to avoid ambiguity:
/// 1. explicit `format` tag, trusted verbatim; an unrecognized tag is the
///    unsupported-format case and resolves to single elimination without
///    consulting the payload shape,
/// 2. non-empty `upper_bracket` → double elimination,
/// 3. rounds keyed by round number (object, not array) → swiss,
/// 4. `groups` → round robin,
/// 5. default → single elimination.
pub fn classify(raw: &RawBracket) -> Format {
    if let Some(tag) = raw.format.as_deref() {
        return parse_format(tag).unwrap_or_else(|| {
            debug!("unrecognized format tag {tag:?}, defaulting to single elimination");
            Format::SingleElimination
        });
    }
    if raw.upper_bracket.as_ref().is_some_and(|ub| !ub.is_empty()) {
        return Format::DoubleElimination;
    }
    if matches!(raw.rounds, Some(RawRounds::Keyed(_))) {
        return Format::Swiss;
    }
    if raw.groups.is_some() {
        return Format::RoundRobin;
    }
    Format::SingleElimination
}

fn parse_format(tag: &str) -> Option<Format> {
    match tag.trim().to_ascii_lowercase().as_str() {
        "single_elimination" | "single-elimination" | "single_elim" => {
            Some(Format::SingleElimination)
        }
        "double_elimination" | "double-elimination" | "double_elim" => {
            Some(Format::DoubleElimination)
        }
        "swiss" | "swiss_system" => Some(Format::Swiss),
        // Group stages are round-robin pools under a different name.
        "round_robin" | "round-robin" | "group_stage" => Some(Format::RoundRobin),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Wire → domain mapping
// ---------------------------------------------------------------------------

/// Map a raw payload into a classified domain bracket. Never fails; a payload
/// with no usable data becomes an empty single-elimination bracket.
pub fn decode(raw: &RawBracket) -> Bracket {
    match classify(raw) {
        Format::SingleElimination => Bracket::SingleElim { rounds: decode_round_list(raw, "se") },
        Format::DoubleElimination => decode_double_elim(raw),
        Format::Swiss => Bracket::Swiss { rounds: decode_swiss_rounds(raw) },
        Format::RoundRobin => Bracket::RoundRobin { groups: decode_groups(raw) },
    }
}

/// Rounds for an elimination bracket, from whichever shape the payload used:
/// an array of rounds, a keyed round map, or a flat `matches` list tagged
/// with round numbers.
fn decode_round_list(raw: &RawBracket, id_prefix: &str) -> Vec<Round> {
    match &raw.rounds {
        Some(RawRounds::List(rounds)) => decode_rounds(rounds, id_prefix),
        Some(RawRounds::Keyed(keyed)) => {
            // Keyed rounds under an explicit elimination tag: flatten in
            // ascending round-number order.
            let mut entries: Vec<(u32, &Vec<RawMatch>)> = keyed
                .iter()
                .filter_map(|(k, v)| k.trim().parse::<u32>().ok().map(|n| (n, v)))
                .collect();
            entries.sort_by_key(|(n, _)| *n);
            entries
                .into_iter()
                .enumerate()
                .map(|(i, (_, matches))| Round {
                    name: None,
                    matches: decode_matches(matches, &format!("{id_prefix}-r{i}")),
                })
                .collect()
        }
        None => group_flat_matches(raw, id_prefix),
    }
}

fn decode_rounds(rounds: &[RawRound], id_prefix: &str) -> Vec<Round> {
    rounds
        .iter()
        .enumerate()
        .map(|(i, round)| Round {
            name: round.name.clone(),
            matches: decode_matches(
                round.matches.as_deref().unwrap_or_default(),
                &format!("{id_prefix}-r{i}"),
            ),
        })
        .collect()
}

/// Bucket a flat `matches` array into rounds by `round_number`, ascending.
/// Matches with no round tag all land in round 1.
fn group_flat_matches(raw: &RawBracket, id_prefix: &str) -> Vec<Round> {
    let Some(matches) = &raw.matches else {
        return Vec::new();
    };
    if matches.is_empty() {
        return Vec::new();
    }
    let mut by_round: BTreeMap<u32, Vec<&RawMatch>> = BTreeMap::new();
    for m in matches {
        by_round.entry(m.round.unwrap_or(1)).or_default().push(m);
    }
    by_round
        .into_values()
        .enumerate()
        .map(|(i, bucket)| Round {
            name: None,
            matches: bucket
                .iter()
                .enumerate()
                .map(|(j, m)| decode_match(m, &format!("{id_prefix}-r{i}-m{j}")))
                .collect(),
        })
        .collect()
}

fn decode_double_elim(raw: &RawBracket) -> Bracket {
    let upper = decode_rounds(raw.upper_bracket.as_deref().unwrap_or_default(), "ub");
    let lower = decode_rounds(raw.lower_bracket.as_deref().unwrap_or_default(), "lb");
    let grand_final = raw.grand_final.as_ref().map(|m| decode_match(m, "gf"));
    Bracket::DoubleElim { upper, lower, grand_final }
}

fn decode_swiss_rounds(raw: &RawBracket) -> BTreeMap<u32, Vec<Match>> {
    let mut out: BTreeMap<u32, Vec<Match>> = BTreeMap::new();
    match &raw.rounds {
        Some(RawRounds::Keyed(keyed)) => {
            for (key, matches) in keyed {
                let Ok(number) = key.trim().parse::<u32>() else {
                    debug!("skipping swiss round with non-numeric key {key:?}");
                    continue;
                };
                out.insert(number, decode_matches(matches, &format!("sw-r{number}")));
            }
        }
        // Swiss declared by tag but shipped as an ordered round array:
        // use each round's own number, else its 1-based position.
        Some(RawRounds::List(rounds)) => {
            for (i, round) in rounds.iter().enumerate() {
                let number = round.round.unwrap_or(i as u32 + 1);
                out.insert(
                    number,
                    decode_matches(
                        round.matches.as_deref().unwrap_or_default(),
                        &format!("sw-r{number}"),
                    ),
                );
            }
        }
        None => {}
    }
    out
}

fn decode_groups(raw: &RawBracket) -> BTreeMap<String, Vec<Match>> {
    let mut out = BTreeMap::new();
    if let Some(groups) = &raw.groups {
        for (key, group) in groups {
            let name = group.name.clone().unwrap_or_else(|| key.clone());
            let matches =
                decode_matches(group.matches.as_deref().unwrap_or_default(), &format!("g-{key}"));
            out.insert(name, matches);
        }
        return out;
    }
    // No group partition: a top-level match list is one implicit group,
    // marked by the empty name.
    if let Some(matches) = &raw.matches {
        if !matches.is_empty() {
            out.insert(String::new(), decode_matches(matches, "rr"));
        }
    }
    out
}

fn decode_matches(matches: &[RawMatch], id_prefix: &str) -> Vec<Match> {
    matches
        .iter()
        .enumerate()
        .map(|(i, m)| decode_match(m, &format!("{id_prefix}-m{i}")))
        .collect()
}

/// Map a single raw match. `fallback_id` keeps the match addressable for
/// layout and merge when the payload omitted an id.
fn decode_match(raw: &RawMatch, fallback_id: &str) -> Match {
    let score1 = raw
        .score1
        .as_ref()
        .and_then(|s| s.to_u32())
        .or_else(|| raw.team1.as_ref().and_then(|t| t.score.as_ref()).and_then(|s| s.to_u32()));
    let score2 = raw
        .score2
        .as_ref()
        .and_then(|s| s.to_u32())
        .or_else(|| raw.team2.as_ref().and_then(|t| t.score.as_ref()).and_then(|s| s.to_u32()));

    Match {
        id: raw.id.as_ref().map(|id| id.to_key()).unwrap_or_else(|| fallback_id.to_string()),
        team1: decode_slot(raw.team1.as_ref()),
        team2: decode_slot(raw.team2.as_ref()),
        score1,
        score2,
        status: raw.status.as_deref().map(parse_status).unwrap_or_default(),
        best_of: raw.best_of,
        scheduled_at: raw.scheduled_at.as_deref().and_then(parse_timestamp),
        reset_match: raw
            .reset_match
            .as_ref()
            .map(|m| Box::new(decode_match(m, &format!("{fallback_id}-reset")))),
    }
}

fn decode_slot(team: Option<&RawTeam>) -> Slot {
    let Some(team) = team else {
        return Slot::Tbd;
    };
    if team.bye == Some(true) {
        return Slot::Bye;
    }
    match &team.name {
        Some(name) if !name.trim().is_empty() => {
            if team.id.is_none() {
                // Named but unidentified: a feed label, not a real team.
                if name.trim().eq_ignore_ascii_case("bye") {
                    return Slot::Bye;
                }
                if name.trim().eq_ignore_ascii_case("tbd") {
                    return Slot::Tbd;
                }
                return Slot::Placeholder(name.clone());
            }
            Slot::Team(Team {
                id: team.id.as_ref().map(|id| id.to_key()).unwrap_or_default(),
                name: name.clone(),
                logo: team.logo.clone(),
                country: team.country.clone(),
            })
        }
        _ => Slot::Tbd,
    }
}

pub(crate) fn parse_status(tag: &str) -> MatchStatus {
    match tag.trim().to_ascii_lowercase().as_str() {
        "live" | "in_progress" | "ongoing" => MatchStatus::Live,
        "completed" | "finished" | "final" => MatchStatus::Completed,
        // "upcoming", "scheduled", "pending", and anything unknown.
        _ => MatchStatus::Upcoming,
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.with_timezone(&Utc))
}

// ---------------------------------------------------------------------------
// Live delta mapping
// ---------------------------------------------------------------------------

/// Map a raw delta batch to the domain form, keyed by match id.
pub fn decode_deltas(raw: &RawDeltaBatch) -> DeltaBatch {
    let mut batch = DeltaBatch::default();
    for (id, delta) in raw {
        batch.entries.insert(id.clone(), decode_delta(delta));
    }
    batch
}

fn decode_delta(raw: &RawDelta) -> LiveDelta {
    LiveDelta {
        score1: raw.score1.as_ref().and_then(|s| s.to_u32()),
        score2: raw.score2.as_ref().and_then(|s| s.to_u32()),
        status: raw.status.as_deref().map(parse_status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawBracket {
        serde_json::from_value(value).expect("fixture payload should deserialize")
    }

    #[test]
    fn test_explicit_format_wins() {
        // Shape says swiss (keyed rounds), tag says round robin.
        let payload = raw(json!({
            "format": "round_robin",
            "rounds": { "1": [] }
        }));
        assert_eq!(classify(&payload), Format::RoundRobin);
    }

    #[test]
    fn test_upper_bracket_implies_double_elim() {
        let payload = raw(json!({ "upper_bracket": [{ "matches": [] }] }));
        assert_eq!(classify(&payload), Format::DoubleElimination);
    }

    #[test]
    fn test_empty_upper_bracket_is_not_double_elim() {
        let payload = raw(json!({ "upper_bracket": [] }));
        assert_eq!(classify(&payload), Format::SingleElimination);
    }

    #[test]
    fn test_keyed_rounds_imply_swiss() {
        let payload = raw(json!({ "rounds": { "1": [], "3": [] } }));
        assert_eq!(classify(&payload), Format::Swiss);
    }

    #[test]
    fn test_groups_imply_round_robin() {
        let payload = raw(json!({ "groups": { "group_a": { "matches": [] } } }));
        assert_eq!(classify(&payload), Format::RoundRobin);
    }

    #[test]
    fn test_unknown_shape_defaults_to_single_elim() {
        assert_eq!(classify(&raw(json!({}))), Format::SingleElimination);
        assert_eq!(
            classify(&raw(json!({ "format": "ladder" }))),
            Format::SingleElimination
        );
    }

    #[test]
    fn test_unrecognized_tag_overrides_shape_evidence() {
        // An explicit tag is trusted even when it names nothing we support:
        // the payload is treated as an unsupported format, not re-detected.
        let payload = raw(json!({ "format": "ladder", "groups": {} }));
        assert_eq!(classify(&payload), Format::SingleElimination);
        let Bracket::SingleElim { rounds } = decode(&payload) else {
            panic!("expected single elim");
        };
        assert!(rounds.is_empty(), "unsupported format decodes to empty data");
    }

    #[test]
    fn test_decode_single_elim_rounds() {
        let payload = raw(json!({
            "rounds": [
                { "name": "Semis", "matches": [
                    { "id": 1, "team1": { "id": 10, "name": "Alpha" }, "team2": { "id": 11, "name": "Bravo" },
                      "score1": 2, "score2": 1, "status": "completed" },
                    { "id": 2 }
                ]},
                { "matches": [{ "id": 3 }] }
            ]
        }));
        let Bracket::SingleElim { rounds } = decode(&payload) else {
            panic!("expected single elim");
        };
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0].name.as_deref(), Some("Semis"));
        assert_eq!(rounds[0].matches[0].winner().map(|t| t.name.as_str()), Some("Alpha"));
        assert_eq!(rounds[0].matches[1].team1, Slot::Tbd);
        assert_eq!(rounds[1].matches[0].id, "3");
    }

    #[test]
    fn test_decode_missing_matches_field_is_empty_round() {
        let payload = raw(json!({ "rounds": [{ "name": "Finals" }] }));
        let Bracket::SingleElim { rounds } = decode(&payload) else {
            panic!("expected single elim");
        };
        assert_eq!(rounds.len(), 1);
        assert!(rounds[0].matches.is_empty());
    }

    #[test]
    fn test_decode_flat_matches_grouped_by_round_number() {
        let payload = raw(json!({
            "matches": [
                { "id": "a", "round_number": 2 },
                { "id": "b", "round_number": 1 },
                { "id": "c", "round_number": 1 }
            ]
        }));
        let Bracket::SingleElim { rounds } = decode(&payload) else {
            panic!("expected single elim");
        };
        assert_eq!(rounds.len(), 2);
        let first: Vec<&str> = rounds[0].matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(first, vec!["b", "c"]);
        assert_eq!(rounds[1].matches[0].id, "a");
    }

    #[test]
    fn test_decode_double_elim_with_reset() {
        let payload = raw(json!({
            "upper_bracket": [{ "matches": [{ "id": "u1" }] }],
            "lower_bracket": [{ "matches": [{ "id": "l1" }] }],
            "grand_final": { "id": "gf", "reset_match": { "id": "gf2" } }
        }));
        let Bracket::DoubleElim { upper, lower, grand_final } = decode(&payload) else {
            panic!("expected double elim");
        };
        assert_eq!(upper.len(), 1);
        assert_eq!(lower.len(), 1);
        let gf = grand_final.expect("grand final");
        assert_eq!(gf.id, "gf");
        assert_eq!(gf.reset_match.as_deref().map(|m| m.id.as_str()), Some("gf2"));
    }

    #[test]
    fn test_decode_swiss_preserves_sparse_round_keys() {
        let payload = raw(json!({
            "rounds": { "1": [{ "id": "a" }], "3": [{ "id": "b" }] }
        }));
        let Bracket::Swiss { rounds } = decode(&payload) else {
            panic!("expected swiss");
        };
        let keys: Vec<u32> = rounds.keys().copied().collect();
        assert_eq!(keys, vec![1, 3]);
    }

    #[test]
    fn test_decode_round_robin_implicit_group() {
        let payload = raw(json!({
            "format": "round_robin",
            "matches": [{ "id": "a" }, { "id": "b" }]
        }));
        let Bracket::RoundRobin { groups } = decode(&payload) else {
            panic!("expected round robin");
        };
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[""].len(), 2);
    }

    #[test]
    fn test_decode_slot_variants() {
        let payload = raw(json!({
            "rounds": [{ "matches": [{
                "id": "m",
                "team1": { "name": "BYE" },
                "team2": { "name": "Winner of M3" }
            }]}]
        }));
        let Bracket::SingleElim { rounds } = decode(&payload) else {
            panic!("expected single elim");
        };
        let m = &rounds[0].matches[0];
        assert_eq!(m.team1, Slot::Bye);
        assert_eq!(m.team2, Slot::Placeholder("Winner of M3".into()));
    }

    #[test]
    fn test_decode_score_on_team_object() {
        let payload = raw(json!({
            "rounds": [{ "matches": [{
                "id": "m",
                "team1": { "id": 1, "name": "Alpha", "score": "2" },
                "team2": { "id": 2, "name": "Bravo", "score": 0 },
                "status": "completed"
            }]}]
        }));
        let Bracket::SingleElim { rounds } = decode(&payload) else {
            panic!("expected single elim");
        };
        let m = &rounds[0].matches[0];
        assert_eq!((m.score1, m.score2), (Some(2), Some(0)));
    }

    #[test]
    fn test_status_parsing_synonyms() {
        assert_eq!(parse_status("LIVE"), MatchStatus::Live);
        assert_eq!(parse_status("in_progress"), MatchStatus::Live);
        assert_eq!(parse_status("final"), MatchStatus::Completed);
        assert_eq!(parse_status("scheduled"), MatchStatus::Upcoming);
        assert_eq!(parse_status("???"), MatchStatus::Upcoming);
    }

    #[test]
    fn test_decode_deltas() {
        let raw_batch: RawDeltaBatch = serde_json::from_value(json!({
            "m1": { "team1_score": "2", "status": "live" },
            "m2": { "score2": 3 }
        }))
        .unwrap();
        let batch = decode_deltas(&raw_batch);
        let d1 = &batch.entries["m1"];
        assert_eq!(d1.score1, Some(2));
        assert_eq!(d1.status, Some(MatchStatus::Live));
        assert!(d1.score2.is_none());
        assert_eq!(batch.entries["m2"].score2, Some(3));
    }
}
