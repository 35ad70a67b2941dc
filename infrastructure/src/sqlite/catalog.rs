//! Catalogue administration
//!
//! Teams, members, decisions and the criteria/options they own. These are
//! the writes the surrounding application performs; the scoring use cases
//! only read them.

use super::rows::db_err;
use super::store::{SqliteStore, load_criteria, load_decision, load_options};
use chrono::Utc;
use rusqlite::params;
use tally_application::StoreError;
use tally_domain::{
    Criterion, Decision, DecisionId, DecisionStatus, EvaluatorId, ResponseOption, TeamId,
    ValidationError,
};
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised by catalogue administration
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn team_exists(conn: &rusqlite::Connection, team: TeamId) -> Result<bool, StoreError> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM teams WHERE id = ?1)",
        [team.to_string()],
        |row| row.get(0),
    )
    .map_err(db_err)
}

impl SqliteStore {
    /// Create a team and return its id.
    pub async fn create_team(&self, name: &str) -> Result<TeamId, CatalogError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("Team name").into());
        }
        let id = TeamId::generate();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO teams (id, name, created_at) VALUES (?1, ?2, ?3)",
                params![id.to_string(), name, Utc::now().to_rfc3339()],
            )
            .map_err(db_err)
        })
        .await?;
        info!("Created team {}", id);
        Ok(id)
    }

    /// Add an active member with the given role to a team.
    pub async fn add_member(&self, team: TeamId, role: &str) -> Result<EvaluatorId, CatalogError> {
        let role = role.trim().to_string();
        if role.is_empty() {
            return Err(ValidationError::EmptyField("Member role").into());
        }
        let id = EvaluatorId::generate();
        let inserted = self
            .with_conn(move |conn| {
                if !team_exists(conn, team)? {
                    return Ok(false);
                }
                conn.execute(
                    "INSERT INTO team_members (id, team_id, role, active) VALUES (?1, ?2, ?3, 1)",
                    params![id.to_string(), team.to_string(), role],
                )
                .map_err(db_err)?;
                Ok(true)
            })
            .await?;
        if !inserted {
            return Err(CatalogError::NotFound(format!("Team {}", team)));
        }
        Ok(id)
    }

    /// Mark a member inactive. Their evaluations stay on file.
    pub async fn deactivate_member(&self, member: EvaluatorId) -> Result<(), CatalogError> {
        let updated = self
            .with_conn(move |conn| {
                conn.execute(
                    "UPDATE team_members SET active = 0 WHERE id = ?1",
                    [member.to_string()],
                )
                .map_err(db_err)
            })
            .await?;
        if updated == 0 {
            return Err(CatalogError::NotFound(format!("Member {}", member)));
        }
        Ok(())
    }

    /// Create a draft decision for a team.
    pub async fn create_decision(&self, team: TeamId, title: &str) -> Result<Decision, CatalogError> {
        let decision = Decision::new(team, title.trim())?;
        let row = decision.clone();
        let inserted = self
            .with_conn(move |conn| {
                if !team_exists(conn, row.team_id)? {
                    return Ok(false);
                }
                conn.execute(
                    "INSERT INTO decisions (id, team_id, title, status, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        row.id.to_string(),
                        row.team_id.to_string(),
                        row.title,
                        row.status.as_str(),
                        row.created_at.to_rfc3339()
                    ],
                )
                .map_err(db_err)?;
                Ok(true)
            })
            .await?;
        if !inserted {
            return Err(CatalogError::NotFound(format!("Team {}", team)));
        }
        info!("Created decision {}", decision.id);
        Ok(decision)
    }

    /// Move a decision to another lifecycle status.
    pub async fn set_status(
        &self,
        decision: DecisionId,
        status: DecisionStatus,
    ) -> Result<(), CatalogError> {
        let updated = self
            .with_conn(move |conn| {
                conn.execute(
                    "UPDATE decisions SET status = ?1 WHERE id = ?2",
                    params![status.as_str(), decision.to_string()],
                )
                .map_err(db_err)
            })
            .await?;
        if updated == 0 {
            return Err(CatalogError::NotFound(format!("Decision {}", decision)));
        }
        Ok(())
    }

    /// Replace the decision's criteria wholesale.
    ///
    /// Scores given against the old criteria stay in the store but no
    /// longer count towards any aggregate.
    pub async fn replace_criteria(
        &self,
        decision: DecisionId,
        criteria: Vec<(String, f64)>,
    ) -> Result<Vec<Criterion>, CatalogError> {
        let rows = criteria
            .into_iter()
            .enumerate()
            .map(|(position, (name, weight))| Criterion::new(decision, name.trim(), weight, position))
            .collect::<Result<Vec<_>, _>>()?;

        let replaced = self
            .with_conn(move |conn| {
                if load_decision(conn, decision)?.is_none() {
                    return Ok(None);
                }
                let orphaned = has_evaluations(conn, decision)?;
                let tx = conn.transaction().map_err(db_err)?;
                tx.execute(
                    "DELETE FROM criteria WHERE decision_id = ?1",
                    [decision.to_string()],
                )
                .map_err(db_err)?;
                for c in &rows {
                    tx.execute(
                        "INSERT INTO criteria (id, decision_id, name, weight, position)
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                        params![
                            c.id.to_string(),
                            decision.to_string(),
                            c.name,
                            c.weight,
                            c.position as i64
                        ],
                    )
                    .map_err(db_err)?;
                }
                tx.commit().map_err(db_err)?;
                Ok(Some((load_criteria(conn, decision)?, orphaned)))
            })
            .await?;

        let Some((criteria, orphaned)) = replaced else {
            return Err(CatalogError::NotFound(format!("Decision {}", decision)));
        };
        if orphaned {
            warn!(
                "Criteria of decision {} replaced after evaluation began; earlier scores are now ignored",
                decision
            );
        }
        Ok(criteria)
    }

    /// Replace the decision's options wholesale.
    ///
    /// Same orphaning rule as [`SqliteStore::replace_criteria`].
    pub async fn replace_options(
        &self,
        decision: DecisionId,
        titles: Vec<String>,
    ) -> Result<Vec<ResponseOption>, CatalogError> {
        let rows = titles
            .into_iter()
            .enumerate()
            .map(|(position, title)| ResponseOption::new(decision, title.trim(), position))
            .collect::<Result<Vec<_>, _>>()?;

        let replaced = self
            .with_conn(move |conn| {
                if load_decision(conn, decision)?.is_none() {
                    return Ok(None);
                }
                let orphaned = has_evaluations(conn, decision)?;
                let tx = conn.transaction().map_err(db_err)?;
                tx.execute(
                    "DELETE FROM options WHERE decision_id = ?1",
                    [decision.to_string()],
                )
                .map_err(db_err)?;
                for o in &rows {
                    tx.execute(
                        "INSERT INTO options (id, decision_id, title, position)
                         VALUES (?1, ?2, ?3, ?4)",
                        params![
                            o.id.to_string(),
                            decision.to_string(),
                            o.title,
                            o.position as i64
                        ],
                    )
                    .map_err(db_err)?;
                }
                tx.commit().map_err(db_err)?;
                Ok(Some((load_options(conn, decision)?, orphaned)))
            })
            .await?;

        let Some((options, orphaned)) = replaced else {
            return Err(CatalogError::NotFound(format!("Decision {}", decision)));
        };
        if orphaned {
            warn!(
                "Options of decision {} replaced after evaluation began; earlier scores are now ignored",
                decision
            );
        }
        Ok(options)
    }
}

fn has_evaluations(conn: &rusqlite::Connection, decision: DecisionId) -> Result<bool, StoreError> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM evaluations WHERE decision_id = ?1)",
        [decision.to_string()],
        |row| row.get(0),
    )
    .map_err(db_err)
}
