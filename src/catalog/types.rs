//! Episode and clause records loaded from the static data files.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which party a clause favors.
///
/// Serialized as the raw data-file label (`VC_bias`, `Founder_bias`, `Neutral`).
/// Unrecognized labels are kept verbatim in [`Bias::Other`] so a clause
/// round-trips unchanged, but they belong to no scenario.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Bias {
    /// Favors the investors.
    Vc,
    /// Favors the founders.
    Founder,
    /// Favors neither side.
    Neutral,
    /// Any other label found in the data.
    Other(String),
}

impl Bias {
    /// Returns the label as it appears in the data files.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Vc => "VC_bias",
            Self::Founder => "Founder_bias",
            Self::Neutral => "Neutral",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for Bias {
    fn from(label: String) -> Self {
        match label.as_str() {
            "VC_bias" => Self::Vc,
            "Founder_bias" => Self::Founder,
            "Neutral" => Self::Neutral,
            _ => Self::Other(label),
        }
    }
}

impl From<&str> for Bias {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl From<Bias> for String {
    fn from(bias: Bias) -> Self {
        match bias {
            Bias::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A narrative episode framing one negotiation conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Unique key, e.g. `S1E1`.
    pub episode_id: String,
    pub title: String,
    /// Category used to select eligible clauses.
    pub conflict_type: String,
    #[serde(default)]
    pub scene: String,
    #[serde(default)]
    pub founder_action: String,
    #[serde(default)]
    pub vc_action: String,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub legal_stakes: String,
}

/// A pre-authored term-sheet clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    /// Unique key.
    pub clause_id: String,
    /// Must equal an episode's conflict type for the clause to be eligible.
    pub conflict_type: String,
    pub bias: Bias,
    #[serde(default)]
    pub clause_type: String,
    #[serde(default)]
    pub short_text: String,
    #[serde(default)]
    pub full_text: String,
    #[serde(default)]
    pub explanation: String,
    /// Founder-side risk, 0-100.
    pub risk_score_founder: u32,
    /// Investor-side risk, 0-100.
    pub risk_score_vc: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bias_known_labels() {
        assert_eq!(Bias::from("VC_bias"), Bias::Vc);
        assert_eq!(Bias::from("Founder_bias"), Bias::Founder);
        assert_eq!(Bias::from("Neutral"), Bias::Neutral);
    }

    #[test]
    fn test_bias_is_case_sensitive() {
        assert_eq!(Bias::from("vc_bias"), Bias::Other("vc_bias".to_string()));
    }

    #[test]
    fn test_bias_other_keeps_label() {
        let bias: Bias = serde_json::from_str("\"Investor_bias\"").unwrap();
        assert_eq!(bias, Bias::Other("Investor_bias".to_string()));
        assert_eq!(serde_json::to_string(&bias).unwrap(), "\"Investor_bias\"");
    }

    #[test]
    fn test_clause_deserialize() {
        let json = r#"{
            "clause_id": "BC-001",
            "conflict_type": "board_control",
            "bias": "VC_bias",
            "clause_type": "Board Composition",
            "short_text": "Investors appoint 3 of 5 directors",
            "full_text": "The Board shall consist of five members...",
            "explanation": "Investors control the board.",
            "risk_score_founder": 90,
            "risk_score_vc": 10
        }"#;
        let clause: Clause = serde_json::from_str(json).unwrap();
        assert_eq!(clause.bias, Bias::Vc);
        assert_eq!(clause.risk_score_founder, 90);

        let out = serde_json::to_value(&clause).unwrap();
        assert_eq!(out["bias"], "VC_bias");
    }

    #[test]
    fn test_episode_optional_fields_default_to_empty() {
        let json = r#"{"episode_id": "S1E1", "title": "Minimum Viable Product", "conflict_type": "board_control"}"#;
        let episode: Episode = serde_json::from_str(json).unwrap();
        assert_eq!(episode.title, "Minimum Viable Product");
        assert!(episode.scene.is_empty());
        assert!(episode.legal_stakes.is_empty());
    }

    #[test]
    fn test_episode_requires_conflict_type() {
        let json = r#"{"episode_id": "S1E1", "title": "Minimum Viable Product"}"#;
        assert!(serde_json::from_str::<Episode>(json).is_err());
    }
}
