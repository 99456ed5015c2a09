//! Round name derivation. Pure and total: every (format, index, total)
//! combination resolves to a non-empty label, and an explicit per-round name
//! from the data always wins.

/// Single-elimination vocabulary, keyed by distance from the final round so a
/// 2-round bracket's first round is "Semifinals", not "Round of 16".
pub fn single_round_name(round_index: usize, total_rounds: usize, explicit: Option<&str>) -> String {
    if let Some(name) = non_empty(explicit) {
        return name;
    }
    let rounds_from_end = total_rounds.saturating_sub(round_index + 1);
    match rounds_from_end {
        0 => "Finals".to_string(),
        1 => "Semifinals".to_string(),
        2 => "Quarterfinals".to_string(),
        3 => "Round of 16".to_string(),
        4 => "Round of 32".to_string(),
        5 => "Round of 64".to_string(),
        _ => format!("Round {}", round_index + 1),
    }
}

/// Double-elimination upper bracket. The table shifts by one for short
/// brackets so a 3-round upper bracket runs Quarterfinals → UB Finals.
pub fn upper_round_name(round_index: usize, total_rounds: usize, explicit: Option<&str>) -> String {
    if let Some(name) = non_empty(explicit) {
        return name;
    }
    match round_index {
        0 if total_rounds > 3 => "Round of 16".to_string(),
        0 => "Quarterfinals".to_string(),
        1 if total_rounds > 3 => "Quarterfinals".to_string(),
        1 => "Semifinals".to_string(),
        2 if total_rounds > 3 => "Semifinals".to_string(),
        2 => "UB Finals".to_string(),
        3 => "UB Finals".to_string(),
        n => format!("UB Round {}", n + 1),
    }
}

/// Lower bracket: sequential "LB Round N", with the terminal rounds named
/// "LB Semifinals" and "LB Finals".
pub fn lower_round_name(round_index: usize, total_rounds: usize, explicit: Option<&str>) -> String {
    if let Some(name) = non_empty(explicit) {
        return name;
    }
    if total_rounds > 0 && round_index + 1 == total_rounds {
        return "LB Finals".to_string();
    }
    if total_rounds > 1 && round_index + 2 == total_rounds {
        return "LB Semifinals".to_string();
    }
    format!("LB Round {}", round_index + 1)
}

/// Swiss rounds use the data's own round key. Keys are not necessarily
/// 1-based or contiguous, so no index is recomputed.
pub fn swiss_round_name(round_number: u32, explicit: Option<&str>) -> String {
    if let Some(name) = non_empty(explicit) {
        return name;
    }
    format!("Round {round_number}")
}

fn non_empty(explicit: Option<&str>) -> Option<String> {
    explicit.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_name_always_wins() {
        assert_eq!(single_round_name(0, 3, Some("Opening Stage")), "Opening Stage");
        assert_eq!(lower_round_name(0, 4, Some("Elimination Night")), "Elimination Night");
        assert_eq!(swiss_round_name(2, Some("Decider Round")), "Decider Round");
    }

    #[test]
    fn test_blank_explicit_name_is_ignored() {
        assert_eq!(single_round_name(2, 3, Some("  ")), "Finals");
    }

    #[test]
    fn test_three_round_single_elim() {
        assert_eq!(single_round_name(0, 3, None), "Quarterfinals");
        assert_eq!(single_round_name(1, 3, None), "Semifinals");
        assert_eq!(single_round_name(2, 3, None), "Finals");
    }

    #[test]
    fn test_two_round_bracket_starts_at_semifinals() {
        assert_eq!(single_round_name(0, 2, None), "Semifinals");
        assert_eq!(single_round_name(1, 2, None), "Finals");
    }

    #[test]
    fn test_deep_bracket_early_rounds() {
        assert_eq!(single_round_name(0, 5, None), "Round of 32");
        assert_eq!(single_round_name(1, 5, None), "Round of 16");
        assert_eq!(single_round_name(0, 7, None), "Round 1");
    }

    #[test]
    fn test_upper_bracket_shift() {
        // Short bracket (3 rounds): starts at Quarterfinals.
        assert_eq!(upper_round_name(0, 3, None), "Quarterfinals");
        assert_eq!(upper_round_name(1, 3, None), "Semifinals");
        assert_eq!(upper_round_name(2, 3, None), "UB Finals");
        // Longer bracket (4 rounds): starts at Round of 16.
        assert_eq!(upper_round_name(0, 4, None), "Round of 16");
        assert_eq!(upper_round_name(3, 4, None), "UB Finals");
        // Past the table: sequential fallback.
        assert_eq!(upper_round_name(4, 6, None), "UB Round 5");
    }

    #[test]
    fn test_lower_bracket_terminal_names() {
        assert_eq!(lower_round_name(0, 4, None), "LB Round 1");
        assert_eq!(lower_round_name(1, 4, None), "LB Round 2");
        assert_eq!(lower_round_name(2, 4, None), "LB Semifinals");
        assert_eq!(lower_round_name(3, 4, None), "LB Finals");
        assert_eq!(lower_round_name(0, 1, None), "LB Finals");
    }

    #[test]
    fn test_swiss_uses_data_round_key() {
        assert_eq!(swiss_round_name(1, None), "Round 1");
        assert_eq!(swiss_round_name(3, None), "Round 3");
        assert_eq!(swiss_round_name(0, None), "Round 0");
    }

    #[test]
    fn test_totality_never_empty() {
        for total in 0..12usize {
            for index in 0..total.max(1) {
                assert!(!single_round_name(index, total, None).is_empty());
                assert!(!upper_round_name(index, total, None).is_empty());
                assert!(!lower_round_name(index, total, None).is_empty());
            }
        }
    }
}
