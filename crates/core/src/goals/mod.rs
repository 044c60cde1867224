//! Goals module - savings goals kept as an append-only log of snapshots.

mod goals_errors;
mod goals_model;
mod goals_service;
mod goals_snapshot;
mod goals_traits;

#[cfg(test)]
mod goals_service_tests;

pub use goals_errors::GoalValidationError;
pub use goals_model::{Goal, GoalInput, GoalSnapshotVersion, GoalTitleInput};
pub use goals_service::GoalService;
pub use goals_snapshot::GoalSnapshot;
pub use goals_traits::GoalServiceTrait;
