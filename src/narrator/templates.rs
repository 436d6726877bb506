//! Fallback narrative templates.
//!
//! The table maps a conflict category to one format string per scenario.
//! Templates interpolate the episode title through the `{title}` placeholder.

use crate::scenario::{ByScenario, ScenarioTag};

/// Placeholder replaced by the episode title.
pub const TITLE_PLACEHOLDER: &str = "{title}";

/// Templates for the known conflict categories.
pub static CONFLICT_TEMPLATES: &[(&str, ByScenario<&str>)] = &[
    (
        "board_control",
        ByScenario {
            vc_win: "In '{title}', VCs lock down board majority. Founders become employees of their own company. Like when Raviga tried to replace Richard - this is how they do it legally through board composition clauses.",
            founder_win: "In '{title}', founders secure board control with protective provisions. Dual-class shares keep voting power with Richard. This is the 'middle fingers up' moment - founders can't be voted out.",
            winwin: "In '{title}', board seats split evenly with independent tie-breaker. Both sides need to agree on major decisions. It's the fantasy scenario where everyone plays nice.",
        },
    ),
    (
        "funding_terms",
        ByScenario {
            vc_win: "In '{title}', VCs demand 2x liquidation preference and full ratchet anti-dilution. Founders get crushed on down-rounds. This is Peter Gregory territory - aggressive terms for runway.",
            founder_win: "In '{title}', founders negotiate 1x participating preferred with broad-based weighted average anti-dilution. They maintain equity and upside. Richard actually wins the valuation game.",
            winwin: "In '{title}', standard market terms with 1x non-participating liquidation preference. Both sides share upside fairly. The mythical 'fair deal' that Silicon Valley pretends exists.",
        },
    ),
    (
        "founder_vesting",
        ByScenario {
            vc_win: "In '{title}', VCs impose 4-year vesting with 1-year cliff and no acceleration. Founders lose equity if they leave. Erlich's nightmare - they can take your shares away.",
            founder_win: "In '{title}', founders get reverse vesting with single-trigger acceleration on acquisition. They're protected if VCs push them out. Erlich keeps his 10% no matter what.",
            winwin: "In '{title}', standard vesting with double-trigger acceleration. Both sides protected but neither can exploit the other. The compromise nobody actually likes.",
        },
    ),
    (
        "ip_ownership",
        ByScenario {
            vc_win: "In '{title}', all IP assigned to company with VCs controlling licensing. Founders can't use their own tech if they leave. Hooli's wet dream - they own everything.",
            founder_win: "In '{title}', founders retain personal IP rights with exclusive licensing to company. They keep leverage if things go south. Richard proves he built it independently.",
            winwin: "In '{title}', joint IP ownership with fair licensing terms. Both sides can use the tech under specific conditions. Patent attorneys make millions sorting this out.",
        },
    ),
    (
        "liquidation_event",
        ByScenario {
            vc_win: "In '{title}', VCs get 2-3x liquidation preference with participation rights. They make money even if founders get nothing. That Hooli acquisition offer? VCs take it all.",
            founder_win: "In '{title}', founders negotiate 1x non-participating preference and anti-cramdown provisions. Common stock actually matters. Richard can say no to bad acquisitions.",
            winwin: "In '{title}', 1.5x participating with cap at 2x investment. Both sides share downside and upside reasonably. The spreadsheet that makes everyone equally unhappy.",
        },
    ),
    (
        "seed_funding",
        ByScenario {
            vc_win: "In '{title}', early investors take 25%+ equity for minimal cash. High valuation cap on SAFE notes crushes founders later. That $250K costs you the company.",
            founder_win: "In '{title}', founders raise on favorable SAFE terms with low discount and high cap. They keep ownership and control. Building product first actually works.",
            winwin: "In '{title}', standard Y Combinator SAFE with 20% discount and reasonable cap. Industry-standard seed terms that don't screw anyone. Boring but functional.",
        },
    ),
];

/// Templates for conflict categories missing from [`CONFLICT_TEMPLATES`].
pub static GENERIC_TEMPLATES: ByScenario<&str> = ByScenario {
    vc_win: "In '{title}', VCs secure maximum control. Founders face higher dilution and limited board power. Investors hold all the cards.",
    founder_win: "In '{title}', founders retain control with protective provisions. VCs accept higher risk for upside. This is that middle-fingers-up energy.",
    winwin: "In '{title}', balanced terms require mutual consent. Both sides protected but neither dominates. The unicorn deal that rarely happens.",
};

/// Template for a conflict category and scenario.
#[must_use]
pub fn template_for(conflict_type: &str, tag: ScenarioTag) -> &'static str {
    let set = CONFLICT_TEMPLATES
        .iter()
        .find(|(category, _)| *category == conflict_type)
        .map_or(&GENERIC_TEMPLATES, |(_, set)| set);
    *set.get(tag)
}

/// Fill a template with the episode title.
#[must_use]
pub fn render(template: &str, title: &str) -> String {
    template.replace(TITLE_PLACEHOLDER, title)
}
