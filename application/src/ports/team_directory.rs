//! Team membership port

use super::evaluation_store::StoreError;
use async_trait::async_trait;
use tally_domain::{TeamId, TeamMember};

/// Source of the members eligible to evaluate a team's decisions
#[async_trait]
pub trait TeamDirectory: Send + Sync {
    /// Currently active members of the team
    async fn active_members(&self, team: TeamId) -> Result<Vec<TeamMember>, StoreError>;
}
