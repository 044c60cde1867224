//! Goals domain models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::goals_errors::GoalValidationError;
use crate::blobs::Cid;
use crate::errors::{Error, Result};

/// A savings goal. `goal_title` is the key within a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub goal_title: String,
    pub amount: f64,
    pub remaining: f64,
}

/// Raw goal body as submitted by a client.
///
/// Fields stay untyped until [`GoalInput::validate`] so that a wrongly typed
/// field is reported as invalid input rather than as a malformed request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalInput {
    #[serde(default)]
    pub goal_title: Option<Value>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub remaining: Option<Value>,
}

impl GoalInput {
    pub fn new(goal_title: &str, amount: f64, remaining: f64) -> Self {
        Self {
            goal_title: Some(Value::from(goal_title)),
            amount: Some(Value::from(amount)),
            remaining: Some(Value::from(remaining)),
        }
    }

    /// Checks shape and range. On success the returned goal satisfies
    /// `amount > 0`, `remaining >= 0` and `remaining <= amount`.
    pub fn validate(&self) -> std::result::Result<Goal, GoalValidationError> {
        let goal_title = match &self.goal_title {
            Some(Value::String(title)) if !title.trim().is_empty() => title.clone(),
            _ => return Err(GoalValidationError::MissingTitle),
        };
        let amount = number_field(&self.amount, "amount")?;
        let remaining = number_field(&self.remaining, "remaining")?;

        if amount <= 0.0 {
            return Err(GoalValidationError::NonPositiveAmount);
        }
        if remaining < 0.0 {
            return Err(GoalValidationError::NegativeRemaining);
        }
        if remaining > amount {
            return Err(GoalValidationError::RemainingExceedsAmount);
        }

        Ok(Goal {
            goal_title,
            amount,
            remaining,
        })
    }
}

fn number_field(
    value: &Option<Value>,
    field: &'static str,
) -> std::result::Result<f64, GoalValidationError> {
    value
        .as_ref()
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
        .ok_or(GoalValidationError::NotANumber(field))
}

/// Body of a delete request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalTitleInput {
    #[serde(default)]
    pub goal_title: Option<Value>,
}

impl GoalTitleInput {
    pub fn title(&self) -> Result<String> {
        match &self.goal_title {
            Some(Value::String(title)) if !title.trim().is_empty() => Ok(title.clone()),
            _ => Err(Error::MissingParameter("Goal title".to_string())),
        }
    }
}

/// One entry of a user's goals snapshot log. `version` is 1-based.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalSnapshotVersion {
    pub version: usize,
    pub cid: Cid,
}
