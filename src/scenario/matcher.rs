//! Clause matching by conflict type and bias.

use crate::catalog::{Clause, Episode};

use super::tag::{ByScenario, ScenarioTag};

/// Clauses eligible for an episode, split by scenario.
pub type ClauseSets<'a> = ByScenario<Vec<&'a Clause>>;

/// Partition the clauses matching an episode's conflict type by bias.
///
/// Conflict types compare by exact string equality. Each partition keeps the
/// order of `clauses`. Clauses with an unrecognized bias land in no partition.
#[must_use]
pub fn match_clauses<'a>(episode: &Episode, clauses: &'a [Clause]) -> ClauseSets<'a> {
    let mut sets = ClauseSets::default();

    for clause in clauses
        .iter()
        .filter(|c| c.conflict_type == episode.conflict_type)
    {
        if let Some(tag) = ScenarioTag::from_bias(&clause.bias) {
            sets.get_mut(tag).push(clause);
        }
    }

    tracing::debug!(
        episode_id = %episode.episode_id,
        conflict_type = %episode.conflict_type,
        vc_win = sets.vc_win.len(),
        founder_win = sets.founder_win.len(),
        winwin = sets.winwin.len(),
        "Matched clauses"
    );

    sets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{clause, episode};

    fn ids(clauses: &[&Clause]) -> Vec<String> {
        clauses.iter().map(|c| c.clause_id.clone()).collect()
    }

    #[test]
    fn test_partitions_by_bias() {
        let ep = episode("S1E1", "board_control", "Minimum Viable Product");
        let clauses = vec![
            clause("A", "board_control", "VC_bias", 90, 10),
            clause("B", "board_control", "Founder_bias", 10, 90),
            clause("C", "board_control", "Neutral", 50, 50),
        ];

        let sets = match_clauses(&ep, &clauses);
        assert_eq!(ids(&sets.vc_win), ["A"]);
        assert_eq!(ids(&sets.founder_win), ["B"]);
        assert_eq!(ids(&sets.winwin), ["C"]);
    }

    #[test]
    fn test_filters_other_conflict_types() {
        let ep = episode("S1E1", "board_control", "Minimum Viable Product");
        let clauses = vec![
            clause("A", "funding_terms", "VC_bias", 90, 10),
            clause("B", "Board_Control", "VC_bias", 90, 10),
            clause("C", "board_control", "VC_bias", 90, 10),
        ];

        let sets = match_clauses(&ep, &clauses);
        assert_eq!(ids(&sets.vc_win), ["C"]);
        assert!(sets.founder_win.is_empty());
        assert!(sets.winwin.is_empty());
    }

    #[test]
    fn test_unknown_bias_is_dropped() {
        let ep = episode("S1E1", "board_control", "Minimum Viable Product");
        let clauses = vec![
            clause("A", "board_control", "Investor_bias", 90, 10),
            clause("B", "board_control", "neutral", 50, 50),
        ];

        let sets = match_clauses(&ep, &clauses);
        assert!(sets.iter().all(|(_, set)| set.is_empty()));
    }

    #[test]
    fn test_preserves_source_order() {
        let ep = episode("S1E1", "funding_terms", "Runway");
        let clauses = vec![
            clause("Z", "funding_terms", "VC_bias", 60, 40),
            clause("M", "funding_terms", "Neutral", 50, 50),
            clause("A", "funding_terms", "VC_bias", 70, 30),
            clause("Q", "funding_terms", "VC_bias", 80, 20),
        ];

        let sets = match_clauses(&ep, &clauses);
        assert_eq!(ids(&sets.vc_win), ["Z", "A", "Q"]);
        assert_eq!(ids(&sets.winwin), ["M"]);
    }

    #[test]
    fn test_every_matching_clause_lands_in_exactly_one_set() {
        let ep = episode("S1E1", "ip_ownership", "Proof of Concept");
        let biases = ["VC_bias", "Founder_bias", "Neutral", "Other"];
        let clauses: Vec<_> = (0..12)
            .map(|i| clause(&format!("C{i}"), "ip_ownership", biases[i % 4], 50, 50))
            .collect();

        let sets = match_clauses(&ep, &clauses);
        let total: usize = sets.iter().map(|(_, set)| set.len()).sum();
        assert_eq!(total, 9);

        for (tag, set) in sets.iter() {
            assert!(set
                .iter()
                .all(|c| ScenarioTag::from_bias(&c.bias) == Some(tag)));
        }
    }

    #[test]
    fn test_no_matches_yields_empty_sets() {
        let ep = episode("S1E1", "seed_funding", "Articles of Incorporation");
        let sets = match_clauses(&ep, &[]);
        assert_eq!(sets, ClauseSets::default());
    }
}
