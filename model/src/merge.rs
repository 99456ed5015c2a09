//! Pure live merge: base snapshot + delta batch → fresh bracket.
//!
//! The base snapshot may still be referenced by an in-flight render, so the
//! merge never mutates its inputs. The per-match rule is last-value-wins per
//! field, applied uniformly across every nested container including the
//! grand final and its reset match. Deltas for unknown match ids are
//! dropped.

use crate::delta::DeltaBatch;
use crate::{Bracket, Match, Round};
use log::debug;
use std::collections::HashSet;

/// Apply a delta batch to a bracket, returning a new bracket. Idempotent:
/// applying the same batch twice yields the same result.
pub fn merge(bracket: &Bracket, deltas: &DeltaBatch) -> Bracket {
    if deltas.is_empty() {
        return bracket.clone();
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let merged = match bracket {
        Bracket::SingleElim { rounds } => Bracket::SingleElim {
            rounds: merge_rounds(rounds, deltas, &mut seen),
        },
        Bracket::DoubleElim { upper, lower, grand_final } => Bracket::DoubleElim {
            upper: merge_rounds(upper, deltas, &mut seen),
            lower: merge_rounds(lower, deltas, &mut seen),
            grand_final: grand_final.as_ref().map(|gf| merge_match(gf, deltas, &mut seen)),
        },
        Bracket::Swiss { rounds } => Bracket::Swiss {
            rounds: rounds
                .iter()
                .map(|(n, matches)| (*n, merge_matches(matches, deltas, &mut seen)))
                .collect(),
        },
        Bracket::RoundRobin { groups } => Bracket::RoundRobin {
            groups: groups
                .iter()
                .map(|(name, matches)| (name.clone(), merge_matches(matches, deltas, &mut seen)))
                .collect(),
        },
    };

    for id in deltas.entries.keys() {
        if !seen.contains(id.as_str()) {
            debug!("dropping live delta for unknown match {id:?}");
        }
    }

    merged
}

fn merge_rounds<'a>(
    rounds: &'a [Round],
    deltas: &DeltaBatch,
    seen: &mut HashSet<&'a str>,
) -> Vec<Round> {
    rounds
        .iter()
        .map(|round| Round {
            name: round.name.clone(),
            matches: merge_matches(&round.matches, deltas, seen),
        })
        .collect()
}

fn merge_matches<'a>(
    matches: &'a [Match],
    deltas: &DeltaBatch,
    seen: &mut HashSet<&'a str>,
) -> Vec<Match> {
    matches.iter().map(|m| merge_match(m, deltas, seen)).collect()
}

fn merge_match<'a>(base: &'a Match, deltas: &DeltaBatch, seen: &mut HashSet<&'a str>) -> Match {
    let mut out = base.clone();
    if let Some(delta) = deltas.get(&base.id) {
        seen.insert(base.id.as_str());
        if let Some(s1) = delta.score1 {
            out.score1 = Some(s1);
        }
        if let Some(s2) = delta.score2 {
            out.score2 = Some(s2);
        }
        if let Some(status) = delta.status {
            out.status = status;
        }
    }
    if let Some(reset) = &base.reset_match {
        out.reset_match = Some(Box::new(merge_match(reset, deltas, seen)));
    }
    out
}
