use std::{net::SocketAddr, time::Duration};

use anyhow::{anyhow, Context};
use spendly_core::constants::DEFAULT_SIGNED_URL_TTL;
use spendly_ipfs::{PinataConfig, DEFAULT_PINATA_API_URL, DEFAULT_PINATA_UPLOADS_URL};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub secret_key: String,
    pub auth_token_ttl: Duration,
    pub blob_dir: String,
    /// Set when `PINATA_JWT` is present; the local blob store is used otherwise.
    pub pinata: Option<PinataConfig>,
    pub signed_url_ttl: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_addr: SocketAddr = var("SPENDLY_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid SPENDLY_LISTEN_ADDR")?;
        let db_path = var("SPENDLY_DB_PATH").unwrap_or_else(|| "./db/spendly.db".into());
        let cors_allow = var("SPENDLY_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = var("SPENDLY_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30000);
        let secret_key = var("SPENDLY_SECRET_KEY")
            .ok_or_else(|| anyhow!("SPENDLY_SECRET_KEY must be set"))?;
        let ttl_minutes: u64 = var("SPENDLY_AUTH_TOKEN_TTL_MINUTES")
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);
        let auth_token_ttl_secs = ttl_minutes
            .checked_mul(60)
            .ok_or_else(|| anyhow!("SPENDLY_AUTH_TOKEN_TTL_MINUTES is too large"))?;
        let blob_dir = var("SPENDLY_BLOB_DIR").unwrap_or_else(|| "./db/blobs".into());
        let signed_url_ttl = var("SPENDLY_SIGNED_URL_TTL_SECS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_SIGNED_URL_TTL);

        let pinata = match var("PINATA_JWT") {
            None => None,
            Some(jwt) => {
                let gateway = var("PINATA_GATEWAY")
                    .ok_or_else(|| anyhow!("PINATA_GATEWAY must be set when PINATA_JWT is"))?;
                Some(PinataConfig {
                    jwt,
                    gateway,
                    api_url: var("PINATA_API_URL")
                        .unwrap_or_else(|| DEFAULT_PINATA_API_URL.to_string()),
                    uploads_url: var("PINATA_UPLOADS_URL")
                        .unwrap_or_else(|| DEFAULT_PINATA_UPLOADS_URL.to_string()),
                })
            }
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            secret_key,
            auth_token_ttl: Duration::from_secs(auth_token_ttl_secs),
            blob_dir,
            pinata,
            signed_url_ttl,
        })
    }
}
