use std::time::Duration;

use async_trait::async_trait;

use super::blobs_model::Cid;
use crate::errors::{Error, Result};

/// Content-addressed blob store.
///
/// Blobs are immutable: every upload yields the identifier of its bytes and
/// nothing is ever overwritten or deleted through this interface.
#[async_trait]
pub trait BlobStoreTrait: Send + Sync {
    /// Stores `bytes` and returns their content identifier. `name` is a
    /// human-readable label some gateways attach as metadata.
    async fn upload(&self, name: &str, bytes: Vec<u8>) -> Result<Cid>;

    async fn fetch(&self, cid: &Cid) -> Result<Vec<u8>>;

    /// Delegated retrieval URL valid for `expires_in`.
    async fn signed_url(&self, cid: &Cid, expires_in: Duration) -> Result<String> {
        let _ = expires_in;
        Err(Error::Unsupported(format!(
            "this blob store cannot sign retrieval URLs (cid {cid})"
        )))
    }
}
