//! Directory-backed content-addressed store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use spendly_core::blobs::{BlobStoreTrait, Cid};
use spendly_core::errors::{BlobStoreError, Result};
use tracing::debug;

/// CIDv1 header in base16 multibase: `f`, version 1, raw codec (0x55),
/// sha2-256 multihash (0x12) of 32 bytes (0x20).
const CID_V1_RAW_SHA256_PREFIX: &str = "f01551220";

/// Stores each blob as a file named after its CID.
///
/// Identifiers are real CIDv1 values, so the same bytes always land on the
/// same file and re-uploading them is a no-op.
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    /// Opens (and creates if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(BlobStoreError::from)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Computes the identifier `upload` would assign to `bytes`.
    pub fn cid_for(bytes: &[u8]) -> std::result::Result<Cid, BlobStoreError> {
        let digest = Sha256::digest(bytes);
        Cid::parse(format!("{CID_V1_RAW_SHA256_PREFIX}{}", hex::encode(digest)))
    }

    fn path_for(&self, cid: &Cid) -> PathBuf {
        self.root.join(cid.as_str())
    }
}

#[async_trait]
impl BlobStoreTrait for LocalBlobStore {
    async fn upload(&self, name: &str, bytes: Vec<u8>) -> Result<Cid> {
        let cid = Self::cid_for(&bytes)?;
        let target = self.path_for(&cid);

        if tokio::fs::try_exists(&target)
            .await
            .map_err(BlobStoreError::from)?
        {
            debug!("Blob {} ({}) already stored", cid, name);
            return Ok(cid);
        }

        // Write under a unique temp name, then rename into place so readers
        // never observe a partial blob.
        let tmp = self
            .root
            .join(format!(".{}.{}.tmp", cid, uuid::Uuid::new_v4()));
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(BlobStoreError::from)?;
        if let Err(e) = tokio::fs::rename(&tmp, &target).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(BlobStoreError::from(e).into());
        }

        debug!("Stored blob {} ({}, {} bytes)", cid, name, bytes.len());
        Ok(cid)
    }

    async fn fetch(&self, cid: &Cid) -> Result<Vec<u8>> {
        match tokio::fs::read(self.path_for(cid)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(BlobStoreError::NotFound(cid.to_string()).into())
            }
            Err(e) => Err(BlobStoreError::from(e).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendly_core::errors::Error;
    use std::time::Duration;

    fn store() -> (tempfile::TempDir, LocalBlobStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::open(dir.path().join("blobs")).unwrap();
        (dir, store)
    }

    #[test]
    fn cid_is_cidv1_raw_sha256_in_base16() {
        // sha256("hello")
        let cid = LocalBlobStore::cid_for(b"hello").unwrap();
        assert_eq!(
            cid.as_str(),
            "f015512202cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[tokio::test]
    async fn upload_then_fetch_returns_same_bytes() {
        let (_dir, store) = store();
        let payload = br#"[{"goalTitle":"Car","amount":10000,"remaining":10000}]"#.to_vec();

        let cid = store.upload("goals-alice-v1.json", payload.clone()).await.unwrap();
        assert_eq!(store.fetch(&cid).await.unwrap(), payload);
    }

    #[tokio::test]
    async fn identical_bytes_share_one_blob() {
        let (_dir, store) = store();
        let a = store.upload("a.json", b"[]".to_vec()).await.unwrap();
        let b = store.upload("b.json", b"[]".to_vec()).await.unwrap();
        assert_eq!(a, b);

        let files: Vec<_> = std::fs::read_dir(store.root()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[tokio::test]
    async fn unknown_cid_is_a_blob_store_not_found() {
        let (_dir, store) = store();
        let cid = LocalBlobStore::cid_for(b"never stored").unwrap();
        let err = store.fetch(&cid).await.unwrap_err();
        assert!(matches!(err, Error::BlobStore(BlobStoreError::NotFound(_))));
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn local_store_cannot_sign_urls() {
        let (_dir, store) = store();
        let cid = store.upload("t.json", b"[]".to_vec()).await.unwrap();
        let err = store
            .signed_url(&cid, Duration::from_secs(60))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }
}
