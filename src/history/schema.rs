//! Database schema for the simulation history.

/// SQL schema for the history database.
pub const SCHEMA: &str = r"
PRAGMA journal_mode = WAL;

-- Mirror of the static episode file
CREATE TABLE IF NOT EXISTS episodes (
    episode_id TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    conflict_type TEXT NOT NULL,
    scene TEXT NOT NULL DEFAULT '',
    founder_action TEXT NOT NULL DEFAULT '',
    vc_action TEXT NOT NULL DEFAULT '',
    result TEXT NOT NULL DEFAULT '',
    legal_stakes TEXT NOT NULL DEFAULT ''
);

-- Mirror of the static clause file
CREATE TABLE IF NOT EXISTS clauses (
    clause_id TEXT PRIMARY KEY NOT NULL,
    conflict_type TEXT NOT NULL,
    bias TEXT NOT NULL,
    clause_type TEXT NOT NULL DEFAULT '',
    short_text TEXT NOT NULL DEFAULT '',
    full_text TEXT NOT NULL DEFAULT '',
    explanation TEXT NOT NULL DEFAULT '',
    risk_score_founder INTEGER NOT NULL,
    risk_score_vc INTEGER NOT NULL
);

-- Append-only log of generated scenarios
CREATE TABLE IF NOT EXISTS simulations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id TEXT NOT NULL,
    episode_id TEXT NOT NULL,
    scenario_type TEXT NOT NULL,
    clauses_json TEXT NOT NULL,
    narrative TEXT NOT NULL,
    alignment_scores_json TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_simulations_episode_id ON simulations(episode_id);
CREATE INDEX IF NOT EXISTS idx_simulations_run_id ON simulations(run_id);
";
