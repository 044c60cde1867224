use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use super::transactions_model::{Transaction, TransactionSnapshot, TransactionsLink};
use super::transactions_traits::TransactionServiceTrait;
use crate::blobs::{fetch_json, BlobStoreTrait};
use crate::errors::{Error, Result};
use crate::users::{load_user, UserRepositoryTrait};

pub struct TransactionService {
    user_repository: Arc<dyn UserRepositoryTrait>,
    blob_store: Arc<dyn BlobStoreTrait>,
    signed_url_ttl: Duration,
}

impl TransactionService {
    pub fn new(
        user_repository: Arc<dyn UserRepositoryTrait>,
        blob_store: Arc<dyn BlobStoreTrait>,
        signed_url_ttl: Duration,
    ) -> Self {
        Self {
            user_repository,
            blob_store,
            signed_url_ttl,
        }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn get_transactions(&self, username: &str) -> Result<Vec<Transaction>> {
        let user = load_user(self.user_repository.as_ref(), username)?;
        let Some(cid) = user.genesis_transactions_cid() else {
            return Ok(Vec::new());
        };
        debug!("Fetching transactions snapshot {} for {}", cid, username);
        let snapshot: TransactionSnapshot = fetch_json(self.blob_store.as_ref(), cid).await?;
        Ok(snapshot.into_transactions())
    }

    async fn get_transactions_link(&self, username: &str) -> Result<TransactionsLink> {
        let user = load_user(self.user_repository.as_ref(), username)?;
        let cid = user
            .genesis_transactions_cid()
            .ok_or_else(|| Error::NotFound("No transactions snapshot".to_string()))?;
        let url = self.blob_store.signed_url(cid, self.signed_url_ttl).await?;
        Ok(TransactionsLink {
            cid: cid.to_string(),
            url,
            expires_in: self.signed_url_ttl.as_secs(),
        })
    }
}
