//! Access control port
//!
//! The use cases never decide visibility themselves. A denied decision is
//! reported to the caller exactly like a missing one.

use super::evaluation_store::StoreError;
use async_trait::async_trait;
use tally_domain::{Decision, EvaluatorId};

/// Decides whether a caller may see and evaluate a decision
#[async_trait]
pub trait AccessPolicy: Send + Sync {
    async fn can_access(&self, decision: &Decision, caller: EvaluatorId)
    -> Result<bool, StoreError>;
}

/// Policy for privileged, local callers: everything is visible
pub struct AllowAll;

#[async_trait]
impl AccessPolicy for AllowAll {
    async fn can_access(
        &self,
        _decision: &Decision,
        _caller: EvaluatorId,
    ) -> Result<bool, StoreError> {
        Ok(true)
    }
}
