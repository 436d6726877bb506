//! Scenario tags and the per-tag container.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Bias;

/// One of the three fixed outcomes of a negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioTag {
    /// VC-favorable terms.
    VcWin,
    /// Founder-favorable terms.
    FounderWin,
    /// Balanced terms.
    #[serde(rename = "winwin")]
    WinWin,
}

impl ScenarioTag {
    /// All tags in presentation order.
    pub const ALL: [Self; 3] = [Self::VcWin, Self::FounderWin, Self::WinWin];

    /// Scenario a clause with the given bias belongs to, if any.
    #[must_use]
    pub fn from_bias(bias: &Bias) -> Option<Self> {
        match bias {
            Bias::Vc => Some(Self::VcWin),
            Bias::Founder => Some(Self::FounderWin),
            Bias::Neutral => Some(Self::WinWin),
            Bias::Other(_) => None,
        }
    }

    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VcWin => "vc_win",
            Self::FounderWin => "founder_win",
            Self::WinWin => "winwin",
        }
    }

    /// Human label used in prompts.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::VcWin => "VC Win (VC-favorable terms)",
            Self::FounderWin => "Founder Win (Founder-favorable terms)",
            Self::WinWin => "Win-Win (Balanced terms)",
        }
    }

    /// Section heading used in exports.
    #[must_use]
    pub fn heading(&self) -> &'static str {
        match self {
            Self::VcWin => "VC WIN",
            Self::FounderWin => "FOUNDER WIN",
            Self::WinWin => "WIN-WIN",
        }
    }
}

impl fmt::Display for ScenarioTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown scenario name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown scenario: {0}")]
pub struct UnknownScenario(pub String);

impl FromStr for ScenarioTag {
    type Err = UnknownScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vc_win" => Ok(Self::VcWin),
            "founder_win" => Ok(Self::FounderWin),
            "winwin" => Ok(Self::WinWin),
            other => Err(UnknownScenario(other.to_string())),
        }
    }
}

/// One value per scenario tag.
///
/// Serializes as an object keyed by the wire names, in presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByScenario<T> {
    pub vc_win: T,
    pub founder_win: T,
    pub winwin: T,
}

impl<T> ByScenario<T> {
    /// Build by evaluating `f` for each tag in presentation order.
    pub fn from_fn(mut f: impl FnMut(ScenarioTag) -> T) -> Self {
        Self {
            vc_win: f(ScenarioTag::VcWin),
            founder_win: f(ScenarioTag::FounderWin),
            winwin: f(ScenarioTag::WinWin),
        }
    }

    #[must_use]
    pub fn get(&self, tag: ScenarioTag) -> &T {
        match tag {
            ScenarioTag::VcWin => &self.vc_win,
            ScenarioTag::FounderWin => &self.founder_win,
            ScenarioTag::WinWin => &self.winwin,
        }
    }

    pub fn get_mut(&mut self, tag: ScenarioTag) -> &mut T {
        match tag {
            ScenarioTag::VcWin => &mut self.vc_win,
            ScenarioTag::FounderWin => &mut self.founder_win,
            ScenarioTag::WinWin => &mut self.winwin,
        }
    }

    /// Iterate `(tag, value)` pairs in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (ScenarioTag, &T)> {
        ScenarioTag::ALL.into_iter().map(move |tag| (tag, self.get(tag)))
    }

    /// Transform each value, keeping its tag.
    pub fn map<U>(self, mut f: impl FnMut(ScenarioTag, T) -> U) -> ByScenario<U> {
        ByScenario {
            vc_win: f(ScenarioTag::VcWin, self.vc_win),
            founder_win: f(ScenarioTag::FounderWin, self.founder_win),
            winwin: f(ScenarioTag::WinWin, self.winwin),
        }
    }
}

impl<T> IntoIterator for ByScenario<T> {
    type Item = (ScenarioTag, T);
    type IntoIter = std::array::IntoIter<(ScenarioTag, T), 3>;

    /// Consume into `(tag, value)` pairs in presentation order.
    fn into_iter(self) -> Self::IntoIter {
        [
            (ScenarioTag::VcWin, self.vc_win),
            (ScenarioTag::FounderWin, self.founder_win),
            (ScenarioTag::WinWin, self.winwin),
        ]
        .into_iter()
    }
}
