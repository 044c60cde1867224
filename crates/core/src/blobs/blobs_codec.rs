//! JSON encoding of snapshot payloads stored as blobs.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::blobs_model::Cid;
use super::blobs_traits::BlobStoreTrait;
use crate::errors::{Error, Result};

/// Serializes `value` to JSON and uploads it as a new blob.
pub async fn upload_json<T: Serialize + ?Sized>(
    store: &dyn BlobStoreTrait,
    name: &str,
    value: &T,
) -> Result<Cid> {
    let bytes = serde_json::to_vec(value)
        .map_err(|e| Error::Unexpected(format!("Failed to serialize {name}: {e}")))?;
    store.upload(name, bytes).await
}

/// Fetches the blob at `cid` and parses it as JSON.
pub async fn fetch_json<T: DeserializeOwned>(store: &dyn BlobStoreTrait, cid: &Cid) -> Result<T> {
    let bytes = store.fetch(cid).await?;
    serde_json::from_slice(&bytes).map_err(|e| Error::CorruptSnapshot {
        cid: cid.to_string(),
        reason: e.to_string(),
    })
}
