//! Alignment scoring over clause sets.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::catalog::Clause;

/// Score reported for an empty clause set.
pub const SENTINEL_SCORE: u32 = 50;

/// Point of view an alignment score is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Perspective {
    Vc,
    Founder,
    Neutral,
}

impl Perspective {
    /// Parse a perspective name. Anything other than `vc` or `founder` is neutral.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "vc" => Self::Vc,
            "founder" => Self::Founder,
            _ => Self::Neutral,
        }
    }
}

fn mean<C: Borrow<Clause>>(clauses: &[C], field: impl Fn(&Clause) -> u32) -> f64 {
    let sum: f64 = clauses.iter().map(|c| f64::from(field(c.borrow()))).sum();
    #[allow(clippy::cast_precision_loss)]
    let len = clauses.len() as f64;
    sum / len
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn truncate_score(value: f64) -> u32 {
    value.clamp(0.0, 100.0).trunc() as u32
}

/// Compute a 0-100 alignment score for a clause set.
///
/// `Vc` uses the mean founder risk, `Founder` the mean investor risk, and
/// `Neutral` is `100 - |mean founder risk - mean investor risk|`. Means are
/// truncated toward zero. An empty set scores [`SENTINEL_SCORE`].
#[must_use]
pub fn alignment_score<C: Borrow<Clause>>(clauses: &[C], perspective: Perspective) -> u32 {
    if clauses.is_empty() {
        return SENTINEL_SCORE;
    }

    match perspective {
        Perspective::Vc => truncate_score(mean(clauses, |c| c.risk_score_founder)),
        Perspective::Founder => truncate_score(mean(clauses, |c| c.risk_score_vc)),
        Perspective::Neutral => {
            let founder = mean(clauses, |c| c.risk_score_founder);
            let vc = mean(clauses, |c| c.risk_score_vc);
            truncate_score(100.0 - (founder - vc).abs())
        }
    }
}

/// Scores for one clause set from all three perspectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentScore {
    pub vc: u32,
    pub founder: u32,
    pub balance: u32,
}

impl AlignmentScore {
    /// Reported for scenarios without clauses.
    pub const SENTINEL: Self = Self {
        vc: SENTINEL_SCORE,
        founder: SENTINEL_SCORE,
        balance: SENTINEL_SCORE,
    };

    #[must_use]
    pub fn for_clauses<C: Borrow<Clause>>(clauses: &[C]) -> Self {
        Self {
            vc: alignment_score(clauses, Perspective::Vc),
            founder: alignment_score(clauses, Perspective::Founder),
            balance: alignment_score(clauses, Perspective::Neutral),
        }
    }
}

impl Default for AlignmentScore {
    fn default() -> Self {
        Self::SENTINEL
    }
}
