//! Simulation history backed by `SQLite`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::error::HistoryError;
use super::schema::SCHEMA;
use super::types::{NewSimulation, SimulationRecord};
use crate::catalog::Catalog;
use crate::scenario::ScenarioTag;

/// Returns the default path for the history database.
///
/// This is `~/.local/share/legal-simulator/history.db` on Linux.
#[must_use]
pub fn default_history_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("legal-simulator")
        .join("history.db")
}

/// Relational mirror of the catalog plus an append-only simulation log.
///
/// Blocking `SQLite` work runs on `spawn_blocking`; writes are serialized
/// through one connection.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl HistoryStore {
    /// Open a history database at the specified path.
    ///
    /// Creates parent directories if they don't exist and initializes the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema cannot be applied.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent).await.map_err(|source| {
                    HistoryError::CreateDir {
                        path: parent.to_path_buf(),
                        source,
                    }
                })?;
            }
        }

        let path_clone = path.clone();
        let conn = tokio::task::spawn_blocking(move || -> Result<Connection, HistoryError> {
            let conn =
                Connection::open(&path_clone).map_err(|source| HistoryError::DatabaseOpen {
                    path: path_clone,
                    source,
                })?;
            conn.execute_batch(SCHEMA)?;
            Ok(conn)
        })
        .await
        .map_err(|_| HistoryError::TaskCancelled)??;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Some(path),
        })
    }

    /// Open an in-memory database for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or the schema cannot be applied.
    pub async fn open_in_memory() -> Result<Self, HistoryError> {
        let conn = tokio::task::spawn_blocking(|| -> Result<Connection, HistoryError> {
            let conn = Connection::open_in_memory()?;
            conn.execute_batch(SCHEMA)?;
            Ok(conn)
        })
        .await
        .map_err(|_| HistoryError::TaskCancelled)??;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: None,
        })
    }

    /// Returns the path to the database, if opened from a file.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Mirror the catalog into the `episodes` and `clauses` tables.
    ///
    /// Rows are replaced by primary key, so repeated calls are idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if any row cannot be written; nothing is committed then.
    pub async fn mirror_catalog(&self, catalog: &Catalog) -> Result<(), HistoryError> {
        let episodes = catalog.episodes().to_vec();
        let clauses = catalog.clauses().to_vec();

        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || -> Result<(), HistoryError> {
            let mut conn = conn.blocking_lock();
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT OR REPLACE INTO episodes (episode_id, title, conflict_type, scene, founder_action, vc_action, result, legal_stakes)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                )?;
                for ep in &episodes {
                    stmt.execute(params![
                        ep.episode_id,
                        ep.title,
                        ep.conflict_type,
                        ep.scene,
                        ep.founder_action,
                        ep.vc_action,
                        ep.result,
                        ep.legal_stakes
                    ])?;
                }

                let mut stmt = tx.prepare(
                    "INSERT OR REPLACE INTO clauses (clause_id, conflict_type, bias, clause_type, short_text, full_text, explanation, risk_score_founder, risk_score_vc)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                )?;
                for c in &clauses {
                    stmt.execute(params![
                        c.clause_id,
                        c.conflict_type,
                        c.bias.as_str(),
                        c.clause_type,
                        c.short_text,
                        c.full_text,
                        c.explanation,
                        c.risk_score_founder,
                        c.risk_score_vc
                    ])?;
                }
            }
            tx.commit()?;

            tracing::debug!(
                episodes = episodes.len(),
                clauses = clauses.len(),
                "Mirrored catalog into history database"
            );
            Ok(())
        })
        .await
        .map_err(|_| HistoryError::TaskCancelled)?
    }

    /// Number of mirrored `(episodes, clauses)` rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn mirrored_counts(&self) -> Result<(u64, u64), HistoryError> {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || -> Result<(u64, u64), HistoryError> {
            let conn = conn.blocking_lock();
            let episodes: i64 = conn.query_row("SELECT COUNT(*) FROM episodes", [], |row| row.get(0))?;
            let clauses: i64 = conn.query_row("SELECT COUNT(*) FROM clauses", [], |row| row.get(0))?;
            Ok((episodes.unsigned_abs(), clauses.unsigned_abs()))
        })
        .await
        .map_err(|_| HistoryError::TaskCancelled)?
    }

    /// Append a generated scenario. Returns the storage-assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or inserted.
    pub async fn record_simulation(&self, sim: &NewSimulation) -> Result<i64, HistoryError> {
        let run_id = sim.run_id.to_string();
        let episode_id = sim.episode_id.clone();
        let scenario = sim.scenario.as_str();
        let clauses_json = serde_json::to_string(&sim.clauses)?;
        let narrative = sim.narrative.clone();
        let scores_json = serde_json::to_string(&sim.alignment_scores)?;

        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || -> Result<i64, HistoryError> {
            let conn = conn.blocking_lock();
            conn.execute(
                "INSERT INTO simulations (run_id, episode_id, scenario_type, clauses_json, narrative, alignment_scores_json)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![run_id, episode_id, scenario, clauses_json, narrative, scores_json],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(|_| HistoryError::TaskCancelled)?
    }

    /// Most recent history rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub async fn recent_simulations(
        &self,
        limit: usize,
    ) -> Result<Vec<SimulationRecord>, HistoryError> {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<SimulationRecord>, HistoryError> {
            let conn = conn.blocking_lock();
            let mut stmt = conn.prepare(
                "SELECT id, run_id, episode_id, scenario_type, clauses_json, narrative, alignment_scores_json, created_at
                 FROM simulations ORDER BY id DESC LIMIT ?1",
            )?;

            let rows = stmt
                .query_map(params![i64::try_from(limit).unwrap_or(i64::MAX)], |row| {
                    let id: i64 = row.get(0)?;
                    let run_id: String = row.get(1)?;
                    let episode_id: String = row.get(2)?;
                    let scenario: String = row.get(3)?;
                    let clauses_json: String = row.get(4)?;
                    let narrative: String = row.get(5)?;
                    let scores_json: String = row.get(6)?;
                    let created_at: DateTime<Utc> = row.get(7)?;
                    Ok((
                        id,
                        run_id,
                        episode_id,
                        scenario,
                        clauses_json,
                        narrative,
                        scores_json,
                        created_at,
                    ))
                })?
                .collect::<Result<Vec<_>, _>>()?;

            let mut result = Vec::with_capacity(rows.len());
            for (id, run_id, episode_id, scenario, clauses_json, narrative, scores_json, created_at) in
                rows
            {
                let run_id = Uuid::parse_str(&run_id).map_err(|e| HistoryError::InvalidRecord {
                    id,
                    reason: e.to_string(),
                })?;
                let scenario = scenario
                    .parse::<ScenarioTag>()
                    .map_err(|e| HistoryError::InvalidRecord {
                        id,
                        reason: e.to_string(),
                    })?;

                result.push(SimulationRecord {
                    id,
                    run_id,
                    episode_id,
                    scenario,
                    clauses: serde_json::from_str(&clauses_json)?,
                    narrative,
                    alignment_scores: serde_json::from_str(&scores_json)?,
                    created_at,
                });
            }

            Ok(result)
        })
        .await
        .map_err(|_| HistoryError::TaskCancelled)?
    }

    /// Count stored history rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn count_simulations(&self) -> Result<u64, HistoryError> {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || -> Result<u64, HistoryError> {
            let conn = conn.blocking_lock();
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM simulations", [], |row| row.get(0))?;
            Ok(count.unsigned_abs())
        })
        .await
        .map_err(|_| HistoryError::TaskCancelled)?
    }
}
