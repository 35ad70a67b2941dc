//! Database schema
//!
//! Created idempotently every time a store is opened.

use rusqlite::Connection;

/// Current schema version, recorded in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 1;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS teams (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS team_members (
    id       TEXT PRIMARY KEY,
    team_id  TEXT NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
    role     TEXT NOT NULL,
    active   INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS decisions (
    id          TEXT PRIMARY KEY,
    team_id     TEXT NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
    title       TEXT NOT NULL,
    status      TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS criteria (
    id           TEXT PRIMARY KEY,
    decision_id  TEXT NOT NULL REFERENCES decisions(id) ON DELETE CASCADE,
    name         TEXT NOT NULL,
    weight       REAL NOT NULL CHECK (weight > 0),
    position     INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS options (
    id           TEXT PRIMARY KEY,
    decision_id  TEXT NOT NULL REFERENCES decisions(id) ON DELETE CASCADE,
    title        TEXT NOT NULL,
    position     INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS evaluations (
    id            TEXT PRIMARY KEY,
    decision_id   TEXT NOT NULL REFERENCES decisions(id) ON DELETE CASCADE,
    evaluator_id  TEXT NOT NULL,
    created_at    TEXT NOT NULL,
    UNIQUE (decision_id, evaluator_id)
);

-- option_id / criterion_id are deliberately not foreign keys: replacing a
-- decision's catalogue leaves old scores behind, and aggregation skips them.
CREATE TABLE IF NOT EXISTS scores (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    evaluation_id  TEXT NOT NULL REFERENCES evaluations(id) ON DELETE CASCADE,
    option_id      TEXT NOT NULL,
    criterion_id   TEXT NOT NULL,
    value          INTEGER NOT NULL CHECK (value BETWEEN 1 AND 10),
    confidence     INTEGER NOT NULL CHECK (confidence BETWEEN 1 AND 5),
    comment        TEXT
);

CREATE INDEX IF NOT EXISTS idx_members_team ON team_members(team_id);
CREATE INDEX IF NOT EXISTS idx_criteria_decision ON criteria(decision_id);
CREATE INDEX IF NOT EXISTS idx_options_decision ON options(decision_id);
CREATE INDEX IF NOT EXISTS idx_evaluations_decision ON evaluations(decision_id);
CREATE INDEX IF NOT EXISTS idx_scores_evaluation ON scores(evaluation_id);
"#;

/// Create any missing tables and record the schema version.
pub fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrate_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();

        let version: i64 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_score_range_is_enforced_by_the_database() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO scores (evaluation_id, option_id, criterion_id, value, confidence)
             VALUES ('e', 'o', 'c', 11, 3)",
            [],
        );
        assert!(result.is_err());
    }
}
