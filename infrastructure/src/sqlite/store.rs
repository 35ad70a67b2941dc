//! SQLite-backed evaluation store
//!
//! One connection behind a mutex; every call runs on tokio's blocking pool.
//! SQLite serialises writers and each read is a single statement, so a
//! reader sees an evaluation either fully before or fully after a
//! replacement commits.

use super::rows::{checked, db_err, parsed, position, timestamp};
use super::schema;
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tally_application::{AccessPolicy, BallotStats, EvaluationStore, StoreError, TeamDirectory};
use tally_domain::{
    AnonymousScore, Criterion, Decision, DecisionId, EvaluationDraft, EvaluationId, EvaluatorId,
    ResponseOption, TeamId, TeamMember,
};
use tracing::{debug, info};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Evaluation store, team directory and membership-based access policy
/// over a single SQLite database
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (or create) a database file.
    ///
    /// Creates parent directories as needed and brings the schema up to date.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Database(format!(
                    "Could not create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let conn = Connection::open(path).map_err(db_err)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
            .map_err(db_err)?;

        info!("Opened evaluation store at {}", path.display());
        Self::from_connection(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        Self::from_connection(conn, None)
    }

    fn from_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self, StoreError> {
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(db_err)?;
        conn.busy_timeout(BUSY_TIMEOUT).map_err(db_err)?;
        schema::migrate(&conn).map_err(db_err)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        })
    }

    /// Path of the database file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run a closure against the connection on the blocking pool.
    pub(crate) async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| StoreError::TaskFailed("connection mutex poisoned".to_string()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| StoreError::TaskFailed(e.to_string()))?
    }
}

pub(crate) fn load_decision(conn: &Connection, id: DecisionId) -> Result<Option<Decision>, StoreError> {
    conn.query_row(
        "SELECT id, team_id, title, status, created_at FROM decisions WHERE id = ?1",
        [id.to_string()],
        |row| {
            Ok(Decision {
                id: parsed(row, 0)?,
                team_id: parsed(row, 1)?,
                title: row.get(2)?,
                status: parsed(row, 3)?,
                created_at: timestamp(row, 4)?,
            })
        },
    )
    .optional()
    .map_err(db_err)
}

pub(crate) fn load_criteria(conn: &Connection, id: DecisionId) -> Result<Vec<Criterion>, StoreError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, decision_id, name, weight, position FROM criteria
             WHERE decision_id = ?1 ORDER BY position",
        )
        .map_err(db_err)?;
    let rows = stmt
        .query_map([id.to_string()], |row| {
            Ok(Criterion {
                id: parsed(row, 0)?,
                decision_id: parsed(row, 1)?,
                name: row.get(2)?,
                weight: row.get(3)?,
                position: position(row, 4)?,
            })
        })
        .map_err(db_err)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_err)
}

pub(crate) fn load_options(conn: &Connection, id: DecisionId) -> Result<Vec<ResponseOption>, StoreError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, decision_id, title, position FROM options
             WHERE decision_id = ?1 ORDER BY position",
        )
        .map_err(db_err)?;
    let rows = stmt
        .query_map([id.to_string()], |row| {
            Ok(ResponseOption {
                id: parsed(row, 0)?,
                decision_id: parsed(row, 1)?,
                title: row.get(2)?,
                position: position(row, 3)?,
            })
        })
        .map_err(db_err)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_err)
}

fn replace_evaluation_tx(
    conn: &mut Connection,
    draft: &EvaluationDraft,
) -> Result<EvaluationId, StoreError> {
    let decision = draft.decision_id.to_string();
    let evaluator = draft.evaluator_id.to_string();
    let evaluation_id = EvaluationId::generate();

    // Dropping `tx` without commit rolls everything back.
    let tx = conn.transaction().map_err(db_err)?;

    let removed = tx
        .execute(
            "DELETE FROM scores WHERE evaluation_id IN
                (SELECT id FROM evaluations WHERE decision_id = ?1 AND evaluator_id = ?2)",
            params![decision, evaluator],
        )
        .map_err(db_err)?;
    tx.execute(
        "DELETE FROM evaluations WHERE decision_id = ?1 AND evaluator_id = ?2",
        params![decision, evaluator],
    )
    .map_err(db_err)?;

    tx.execute(
        "INSERT INTO evaluations (id, decision_id, evaluator_id, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            evaluation_id.to_string(),
            decision,
            evaluator,
            Utc::now().to_rfc3339()
        ],
    )
    .map_err(db_err)?;

    {
        let mut insert = tx
            .prepare(
                "INSERT INTO scores (evaluation_id, option_id, criterion_id, value, confidence, comment)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .map_err(db_err)?;
        for score in &draft.scores {
            insert
                .execute(params![
                    evaluation_id.to_string(),
                    score.option_id.to_string(),
                    score.criterion_id.to_string(),
                    i64::from(score.value),
                    i64::from(score.confidence),
                    score.comment,
                ])
                .map_err(db_err)?;
        }
    }

    tx.commit().map_err(db_err)?;
    debug!(
        "Committed evaluation {} ({} scores in, {} replaced)",
        evaluation_id,
        draft.scores.len(),
        removed
    );
    Ok(evaluation_id)
}

#[async_trait]
impl EvaluationStore for SqliteStore {
    async fn decision(&self, id: DecisionId) -> Result<Option<Decision>, StoreError> {
        self.with_conn(move |conn| load_decision(conn, id)).await
    }

    async fn criteria(&self, id: DecisionId) -> Result<Vec<Criterion>, StoreError> {
        self.with_conn(move |conn| load_criteria(conn, id)).await
    }

    async fn options(&self, id: DecisionId) -> Result<Vec<ResponseOption>, StoreError> {
        self.with_conn(move |conn| load_options(conn, id)).await
    }

    async fn replace_evaluation(
        &self,
        draft: &EvaluationDraft,
    ) -> Result<EvaluationId, StoreError> {
        let draft = draft.clone();
        self.with_conn(move |conn| replace_evaluation_tx(conn, &draft))
            .await
    }

    async fn anonymous_scores(&self, id: DecisionId) -> Result<Vec<AnonymousScore>, StoreError> {
        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT s.evaluation_id, s.option_id, s.criterion_id, s.value, s.confidence
                     FROM scores s
                     JOIN evaluations e ON e.id = s.evaluation_id
                     WHERE e.decision_id = ?1
                     ORDER BY s.id",
                )
                .map_err(db_err)?;
            let rows = stmt
                .query_map([id.to_string()], |row| {
                    Ok(AnonymousScore {
                        ballot: parsed(row, 0)?,
                        option_id: parsed(row, 1)?,
                        criterion_id: parsed(row, 2)?,
                        value: checked(row, 3)?,
                        confidence: checked(row, 4)?,
                    })
                })
                .map_err(db_err)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_err)
        })
        .await
    }

    async fn evaluators(&self, id: DecisionId) -> Result<Vec<EvaluatorId>, StoreError> {
        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare("SELECT DISTINCT evaluator_id FROM evaluations WHERE decision_id = ?1")
                .map_err(db_err)?;
            let rows = stmt
                .query_map([id.to_string()], |row| parsed(row, 0))
                .map_err(db_err)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_err)
        })
        .await
    }

    async fn has_evaluated(
        &self,
        id: DecisionId,
        evaluator: EvaluatorId,
    ) -> Result<bool, StoreError> {
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM evaluations WHERE decision_id = ?1 AND evaluator_id = ?2)",
                params![id.to_string(), evaluator.to_string()],
                |row| row.get(0),
            )
            .map_err(db_err)
        })
        .await
    }

    async fn ballot_stats(&self, id: DecisionId) -> Result<BallotStats, StoreError> {
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT
                    (SELECT COUNT(*) FROM evaluations WHERE decision_id = ?1),
                    (SELECT AVG(s.confidence) FROM scores s
                     JOIN evaluations e ON e.id = s.evaluation_id
                     WHERE e.decision_id = ?1)",
                [id.to_string()],
                |row| {
                    Ok(BallotStats {
                        total_evaluations: checked(row, 0)?,
                        average_confidence: row.get(1)?,
                    })
                },
            )
            .map_err(db_err)
        })
        .await
    }
}

#[async_trait]
impl TeamDirectory for SqliteStore {
    async fn active_members(&self, team: TeamId) -> Result<Vec<TeamMember>, StoreError> {
        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, team_id, role, active FROM team_members
                     WHERE team_id = ?1 AND active = 1 ORDER BY rowid",
                )
                .map_err(db_err)?;
            let rows = stmt
                .query_map([team.to_string()], |row| {
                    Ok(TeamMember {
                        id: parsed(row, 0)?,
                        team_id: parsed(row, 1)?,
                        role: row.get(2)?,
                        active: row.get(3)?,
                    })
                })
                .map_err(db_err)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_err)
        })
        .await
    }
}

/// Only active members of the decision's team may see it.
#[async_trait]
impl AccessPolicy for SqliteStore {
    async fn can_access(
        &self,
        decision: &Decision,
        caller: EvaluatorId,
    ) -> Result<bool, StoreError> {
        let team = decision.team_id;
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM team_members
                               WHERE id = ?1 AND team_id = ?2 AND active = 1)",
                params![caller.to_string(), team.to_string()],
                |row| row.get(0),
            )
            .map_err(db_err)
        })
        .await
    }
}
