//! Markdown export of matched scenarios.

use std::fmt::Write;

use crate::catalog::Episode;
use crate::scenario::{AlignmentScore, ClauseSets};

/// Render an episode's matched clauses as a markdown document.
///
/// One section per scenario in presentation order; each clause lists its
/// risk scores, followed by the scenario's alignment scores.
#[must_use]
pub fn render_markdown(episode: &Episode, sets: &ClauseSets<'_>) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = write!(
        out,
        "# Legal Scenario Simulator\n\n\
         ## Episode: {title} ({id})\n\n\
         **Conflict:** {conflict}  \n\
         **Scene:** {scene}  \n\
         **Legal Stakes:** {stakes}\n\n\
         ---\n\n",
        title = episode.title,
        id = episode.episode_id,
        conflict = episode.conflict_type,
        scene = episode.scene,
        stakes = episode.legal_stakes,
    );

    for (tag, clauses) in sets.iter() {
        let _ = writeln!(out, "### {}\n", tag.heading());

        if clauses.is_empty() {
            out.push_str("*No clauses available*\n\n");
        } else {
            for clause in clauses {
                let _ = writeln!(out, "- **{}:** {}", clause.clause_type, clause.short_text);
                let _ = writeln!(out, "  - {}", clause.explanation);
                let _ = writeln!(
                    out,
                    "  - Risk (Founder): {}% | Risk (VC): {}%\n",
                    clause.risk_score_founder, clause.risk_score_vc
                );
            }

            let scores = AlignmentScore::for_clauses(clauses);
            let _ = writeln!(
                out,
                "**Alignment:** VC: {}% | Founder: {}% | Balance: {}%\n",
                scores.vc, scores.founder, scores.balance
            );
        }

        out.push_str("---\n\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{clause, episode};
    use crate::scenario::match_clauses;

    #[test]
    fn test_header_and_sections() {
        let ep = episode("S1E1", "board_control", "Minimum Viable Product");
        let clauses = vec![clause("A", "board_control", "VC_bias", 90, 10)];

        let doc = render_markdown(&ep, &match_clauses(&ep, &clauses));

        assert!(doc.starts_with("# Legal Scenario Simulator\n\n## Episode: Minimum Viable Product (S1E1)\n"));
        assert!(doc.contains("**Conflict:** board_control"));
        assert!(doc.contains("**Legal Stakes:** Stakes for S1E1"));

        let vc = doc.find("### VC WIN").unwrap();
        let founder = doc.find("### FOUNDER WIN").unwrap();
        let winwin = doc.find("### WIN-WIN").unwrap();
        assert!(vc < founder && founder < winwin);
    }

    #[test]
    fn test_clause_lines_and_alignment() {
        let ep = episode("S1E1", "board_control", "Minimum Viable Product");
        let clauses = vec![
            clause("A", "board_control", "VC_bias", 90, 10),
            clause("B", "board_control", "VC_bias", 71, 30),
        ];

        let doc = render_markdown(&ep, &match_clauses(&ep, &clauses));

        assert!(doc.contains("- **Type A:** Short A\n  - Explanation of A\n  - Risk (Founder): 90% | Risk (VC): 10%\n\n"));
        assert!(doc.contains("**Alignment:** VC: 80% | Founder: 20% | Balance: 39%\n"));
    }

    #[test]
    fn test_empty_sections_are_marked() {
        let ep = episode("S1E1", "board_control", "Minimum Viable Product");
        let doc = render_markdown(&ep, &match_clauses(&ep, &[]));

        assert_eq!(doc.matches("*No clauses available*").count(), 3);
        assert!(!doc.contains("**Alignment:**"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let ep = episode("S1E1", "board_control", "Minimum Viable Product");
        let clauses = vec![
            clause("A", "board_control", "Neutral", 55, 45),
            clause("B", "board_control", "Founder_bias", 20, 80),
        ];
        let sets = match_clauses(&ep, &clauses);
        assert_eq!(render_markdown(&ep, &sets), render_markdown(&ep, &sets));
    }
}
