use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use log::{debug, info};
use tokio::sync::Mutex;

use super::goals_model::{Goal, GoalInput, GoalSnapshotVersion};
use super::goals_snapshot::GoalSnapshot;
use super::goals_traits::GoalServiceTrait;
use crate::blobs::{fetch_json, upload_json, BlobStoreTrait, Cid};
use crate::constants::GOALS_SNAPSHOT_PREFIX;
use crate::errors::{Error, Result};
use crate::users::{load_user, UserRepositoryTrait};

/// Goals backed by an append-only log of snapshot CIDs on the user record.
///
/// Writes for one username are serialized through a per-user mutex so that
/// two requests in this process never start from the same head. Separate
/// processes sharing a store still race (last save wins).
pub struct GoalService {
    user_repository: Arc<dyn UserRepositoryTrait>,
    blob_store: Arc<dyn BlobStoreTrait>,
    write_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl GoalService {
    pub fn new(
        user_repository: Arc<dyn UserRepositoryTrait>,
        blob_store: Arc<dyn BlobStoreTrait>,
    ) -> Self {
        Self {
            user_repository,
            blob_store,
            write_locks: DashMap::new(),
        }
    }

    async fn load_snapshot(&self, cid: Option<&Cid>) -> Result<GoalSnapshot> {
        match cid {
            None => Ok(GoalSnapshot::default()),
            Some(cid) => {
                debug!("Fetching goals snapshot {}", cid);
                fetch_json(self.blob_store.as_ref(), cid).await
            }
        }
    }

    fn write_lock(&self, username: &str) -> Arc<Mutex<()>> {
        self.write_locks
            .entry(username.to_string())
            .or_default()
            .clone()
    }

    /// Drops the lock entry once no other writer holds a handle to it.
    fn release_write_lock(&self, username: &str) {
        self.write_locks
            .remove_if(username, |_, lock| Arc::strong_count(lock) == 1);
    }

    /// Runs `mutate` against the latest snapshot and publishes the result as
    /// the next log entry. Nothing is uploaded or appended if `mutate` fails.
    async fn publish<F>(&self, username: &str, mutate: F) -> Result<Goal>
    where
        F: FnOnce(&mut GoalSnapshot) -> Result<Goal> + Send,
    {
        let lock = self.write_lock(username);
        let result = {
            let _guard = lock.lock().await;
            self.publish_locked(username, mutate).await
        };
        drop(lock);
        self.release_write_lock(username);
        result
    }

    async fn publish_locked<F>(&self, username: &str, mutate: F) -> Result<Goal>
    where
        F: FnOnce(&mut GoalSnapshot) -> Result<Goal> + Send,
    {
        let mut user = load_user(self.user_repository.as_ref(), username)?;
        let mut snapshot = self.load_snapshot(user.latest_goals_cid()).await?;
        let outcome = mutate(&mut snapshot)?;

        let version = user.goals_cid.len() + 1;
        let name = format!("{GOALS_SNAPSHOT_PREFIX}-{username}-v{version}.json");
        let cid = upload_json(self.blob_store.as_ref(), &name, &snapshot).await?;

        user.append_goals_snapshot(cid.clone());
        self.user_repository.save(user).await?;
        info!(
            "Published goals snapshot v{} for {} ({} goals): {}",
            version,
            username,
            snapshot.len(),
            cid
        );
        Ok(outcome)
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    async fn get_goals(&self, username: &str) -> Result<Vec<Goal>> {
        let user = load_user(self.user_repository.as_ref(), username)?;
        let snapshot = self.load_snapshot(user.latest_goals_cid()).await?;
        Ok(snapshot.into_goals())
    }

    fn get_goal_history(&self, username: &str) -> Result<Vec<GoalSnapshotVersion>> {
        let user = load_user(self.user_repository.as_ref(), username)?;
        Ok(user
            .goals_cid
            .into_iter()
            .enumerate()
            .map(|(idx, cid)| GoalSnapshotVersion {
                version: idx + 1,
                cid,
            })
            .collect())
    }

    async fn get_goals_at_version(&self, username: &str, version: usize) -> Result<Vec<Goal>> {
        let user = load_user(self.user_repository.as_ref(), username)?;
        let cid = version
            .checked_sub(1)
            .and_then(|idx| user.goals_cid.get(idx))
            .ok_or_else(|| Error::NotFound("Goal snapshot version not found".to_string()))?;
        let snapshot = self.load_snapshot(Some(cid)).await?;
        Ok(snapshot.into_goals())
    }

    async fn create_goal(&self, username: &str, input: GoalInput) -> Result<Goal> {
        let goal = input.validate()?;
        self.publish(username, move |snapshot| {
            snapshot.insert(goal.clone())?;
            Ok(goal)
        })
        .await
    }

    async fn update_goal(&self, username: &str, input: GoalInput) -> Result<Goal> {
        let goal = input.validate()?;
        self.publish(username, move |snapshot| {
            snapshot.replace(goal.clone())?;
            Ok(goal)
        })
        .await
    }

    async fn delete_goal(&self, username: &str, goal_title: &str) -> Result<Goal> {
        if goal_title.is_empty() {
            return Err(Error::MissingParameter("Goal title".to_string()));
        }
        self.publish(username, |snapshot| snapshot.remove(goal_title))
            .await
    }
}
