//! In-memory view of one published goal list.

use serde::{Deserialize, Serialize};

use super::goals_model::Goal;
use crate::errors::{Error, Result};

/// The complete goal list stored in a single blob.
///
/// Mutations here only ever produce the next snapshot in memory; publishing
/// it is the service's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalSnapshot(Vec<Goal>);

impl GoalSnapshot {
    pub fn goals(&self) -> &[Goal] {
        &self.0
    }

    pub fn into_goals(self) -> Vec<Goal> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn position(&self, goal_title: &str) -> Option<usize> {
        self.0.iter().position(|g| g.goal_title == goal_title)
    }

    pub fn insert(&mut self, goal: Goal) -> Result<()> {
        if self.position(&goal.goal_title).is_some() {
            return Err(Error::Duplicate(
                "A goal with this title already exists".to_string(),
            ));
        }
        self.0.push(goal);
        Ok(())
    }

    /// Replaces the goal with the same title in place, returning the old one.
    pub fn replace(&mut self, goal: Goal) -> Result<Goal> {
        let idx = self.position(&goal.goal_title).ok_or_else(goal_not_found)?;
        Ok(std::mem::replace(&mut self.0[idx], goal))
    }

    pub fn remove(&mut self, goal_title: &str) -> Result<Goal> {
        let idx = self.position(goal_title).ok_or_else(goal_not_found)?;
        Ok(self.0.remove(idx))
    }
}

impl From<Vec<Goal>> for GoalSnapshot {
    fn from(goals: Vec<Goal>) -> Self {
        Self(goals)
    }
}

fn goal_not_found() -> Error {
    Error::NotFound("Goal not found".to_string())
}
