use std::time::Duration;

/// Lifetime of delegated retrieval URLs handed out for snapshots (24 hours)
pub const DEFAULT_SIGNED_URL_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Name prefix for goal snapshot blobs
pub const GOALS_SNAPSHOT_PREFIX: &str = "goals";

/// Longest accepted textual content identifier
pub const MAX_CID_LEN: usize = 128;
