//! In-memory episode and clause stores.

use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::CatalogError;
use super::types::{Clause, Episode};

/// Read a JSON array of records from a file.
///
/// Records that fail to decode are skipped with a warning naming their
/// position and id; the rest are kept in source order.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array.
pub fn load_records<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>, CatalogError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let values: Vec<Value> =
        serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut records = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        let key = record_key(&value);
        match serde_json::from_value(value) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!(
                path = %path.display(),
                index,
                record = %key,
                error = %e,
                "Skipping malformed record"
            ),
        }
    }

    Ok(records)
}

/// Best-effort identifier of a raw record for log messages.
fn record_key(value: &Value) -> String {
    ["clause_id", "episode_id"]
        .iter()
        .find_map(|field| value.get(*field).and_then(Value::as_str))
        .unwrap_or("<no id>")
        .to_string()
}

/// Load records, degrading to an empty collection when the file is unusable.
fn load_or_empty<T: DeserializeOwned>(path: &Path, kind: &'static str) -> Vec<T> {
    match load_records(path) {
        Ok(records) => {
            tracing::info!(path = %path.display(), count = records.len(), kind, "Loaded data file");
            records
        }
        Err(e) => {
            tracing::warn!(error = %e, kind, "Data file unavailable, continuing with no records");
            Vec::new()
        }
    }
}

/// Immutable episode and clause collections, loaded once at startup.
///
/// Source order is preserved for both collections.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    episodes: Vec<Episode>,
    clauses: Vec<Clause>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from already-loaded records.
    ///
    /// When an episode id repeats, the first occurrence wins for lookups.
    #[must_use]
    pub fn new(episodes: Vec<Episode>, clauses: Vec<Clause>) -> Self {
        let mut index = HashMap::with_capacity(episodes.len());
        for (pos, episode) in episodes.iter().enumerate() {
            if index.contains_key(&episode.episode_id) {
                tracing::warn!(episode_id = %episode.episode_id, "Duplicate episode id ignored for lookup");
                continue;
            }
            index.insert(episode.episode_id.clone(), pos);
        }

        Self {
            episodes,
            clauses,
            index,
        }
    }

    /// Load both data files. Missing or malformed files yield empty collections.
    #[must_use]
    pub fn load(episodes_path: impl AsRef<Path>, clauses_path: impl AsRef<Path>) -> Self {
        let episodes = load_or_empty(episodes_path.as_ref(), "episodes");
        let clauses = load_or_empty(clauses_path.as_ref(), "clauses");
        Self::new(episodes, clauses)
    }

    /// All episodes in source order.
    #[must_use]
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// All clauses in source order.
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Look up an episode by id.
    #[must_use]
    pub fn episode(&self, episode_id: &str) -> Option<&Episode> {
        self.index.get(episode_id).map(|&pos| &self.episodes[pos])
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty() && self.clauses.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::super::types::{Bias, Clause, Episode};

    pub fn episode(id: &str, conflict_type: &str, title: &str) -> Episode {
        Episode {
            episode_id: id.to_string(),
            title: title.to_string(),
            conflict_type: conflict_type.to_string(),
            scene: format!("Scene for {id}"),
            founder_action: String::new(),
            vc_action: String::new(),
            result: String::new(),
            legal_stakes: format!("Stakes for {id}"),
        }
    }

    pub fn clause(id: &str, conflict_type: &str, bias: &str, founder: u32, vc: u32) -> Clause {
        Clause {
            clause_id: id.to_string(),
            conflict_type: conflict_type.to_string(),
            bias: Bias::from(bias),
            clause_type: format!("Type {id}"),
            short_text: format!("Short {id}"),
            full_text: format!("Full text of {id}"),
            explanation: format!("Explanation of {id}"),
            risk_score_founder: founder,
            risk_score_vc: vc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{clause, episode};
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::new(
            vec![
                episode("S1E1", "board_control", "Minimum Viable Product"),
                episode("S1E2", "seed_funding", "The Cap Table"),
            ],
            Vec::new(),
        );

        assert_eq!(catalog.episode("S1E2").unwrap().title, "The Cap Table");
        assert!(catalog.episode("S9E9").is_none());
    }

    #[test]
    fn test_duplicate_id_first_wins() {
        let catalog = Catalog::new(
            vec![
                episode("S1E1", "board_control", "First"),
                episode("S1E1", "board_control", "Second"),
            ],
            Vec::new(),
        );

        assert_eq!(catalog.episode("S1E1").unwrap().title, "First");
        assert_eq!(catalog.episodes().len(), 2);
    }

    #[test]
    fn test_load_missing_files_yields_empty() {
        let catalog = Catalog::load("/nonexistent/episodes.json", "/nonexistent/clauses.json");
        assert!(catalog.is_empty());
        assert!(catalog.episode("S1E1").is_none());
    }

    #[test]
    fn test_load_preserves_source_order() {
        let dir = tempfile::tempdir().unwrap();
        let episodes_path = dir.path().join("episodes.json");
        let clauses_path = dir.path().join("clauses.json");

        let episodes = vec![
            episode("S2E1", "funding_terms", "B"),
            episode("S1E1", "board_control", "A"),
        ];
        let clauses = vec![
            clause("C2", "board_control", "Neutral", 50, 50),
            clause("C1", "board_control", "VC_bias", 80, 20),
        ];
        std::fs::write(&episodes_path, serde_json::to_string(&episodes).unwrap()).unwrap();
        std::fs::write(&clauses_path, serde_json::to_string(&clauses).unwrap()).unwrap();

        let catalog = Catalog::load(&episodes_path, &clauses_path);
        let ids: Vec<_> = catalog.episodes().iter().map(|e| e.episode_id.as_str()).collect();
        assert_eq!(ids, ["S2E1", "S1E1"]);
        assert_eq!(catalog.clauses()[0].clause_id, "C2");
    }

    #[test]
    fn test_load_malformed_file_yields_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let episodes_path = dir.path().join("episodes.json");
        let clauses_path = dir.path().join("clauses.json");
        std::fs::write(&episodes_path, "not json").unwrap();
        std::fs::write(
            &clauses_path,
            serde_json::to_string(&vec![clause("C1", "board_control", "VC_bias", 80, 20)]).unwrap(),
        )
        .unwrap();

        let catalog = Catalog::load(&episodes_path, &clauses_path);
        assert!(catalog.episodes().is_empty());
        assert_eq!(catalog.clauses().len(), 1);
    }

    #[test]
    fn test_load_records_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("episodes.json");
        std::fs::write(&path, "{\"episode_id\": 1}").unwrap();

        let result = load_records::<Episode>(&path);
        assert!(matches!(result, Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn test_malformed_record_is_skipped_not_the_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clauses.json");
        std::fs::write(
            &path,
            r#"[
                {"clause_id": "C1", "conflict_type": "board_control", "bias": "VC_bias", "risk_score_founder": 80, "risk_score_vc": 20},
                {"clause_id": "C2", "conflict_type": "board_control", "bias": "VC_bias", "risk_score_founder": 80.5, "risk_score_vc": 20},
                {"clause_id": "C3", "conflict_type": "board_control", "bias": "Neutral", "risk_score_founder": -5, "risk_score_vc": 20},
                {"clause_id": "C4", "conflict_type": "board_control", "bias": "Neutral", "risk_score_founder": 50, "risk_score_vc": 50}
            ]"#,
        )
        .unwrap();

        let clauses = load_records::<Clause>(&path).unwrap();
        let ids: Vec<_> = clauses.iter().map(|c| c.clause_id.as_str()).collect();
        assert_eq!(ids, ["C1", "C4"]);
    }

    #[test]
    fn test_record_key_names_the_record() {
        assert_eq!(record_key(&serde_json::json!({"clause_id": "C9"})), "C9");
        assert_eq!(record_key(&serde_json::json!({"episode_id": "S1E1"})), "S1E1");
        assert_eq!(record_key(&serde_json::json!({"title": 3})), "<no id>");
    }
}
