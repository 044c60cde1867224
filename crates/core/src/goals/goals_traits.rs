use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalInput, GoalSnapshotVersion};
use async_trait::async_trait;

/// Trait for goal service operations.
///
/// Every successful write publishes a new snapshot and appends its CID to
/// the user's goals log; reads resolve the last CID.
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    async fn get_goals(&self, username: &str) -> Result<Vec<Goal>>;
    fn get_goal_history(&self, username: &str) -> Result<Vec<GoalSnapshotVersion>>;
    async fn get_goals_at_version(&self, username: &str, version: usize) -> Result<Vec<Goal>>;
    async fn create_goal(&self, username: &str, input: GoalInput) -> Result<Goal>;
    async fn update_goal(&self, username: &str, input: GoalInput) -> Result<Goal>;
    async fn delete_goal(&self, username: &str, goal_title: &str) -> Result<Goal>;
}
