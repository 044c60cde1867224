//! Pinata pinning service and dedicated IPFS gateway.
//!
//! - Upload: `POST {api}/pinning/pinFileToIPFS` (multipart, bearer JWT)
//! - Fetch: `GET https://{gateway}/ipfs/{cid}`
//! - Signed retrieval URL: `POST {files_api}/v3/files/sign`
//!
//! API documentation: https://docs.pinata.cloud

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use spendly_core::blobs::{BlobStoreTrait, Cid};
use spendly_core::errors::{BlobStoreError, Result};
use tracing::{debug, warn};

pub const DEFAULT_PINATA_API_URL: &str = "https://api.pinata.cloud";
pub const DEFAULT_PINATA_UPLOADS_URL: &str = "https://api.pinata.cloud";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a Pinata account.
#[derive(Debug, Clone)]
pub struct PinataConfig {
    pub jwt: String,
    /// Dedicated gateway host, e.g. `example.mypinata.cloud`. A value that
    /// already carries a scheme is used as the base URL unchanged.
    pub gateway: String,
    pub api_url: String,
    pub uploads_url: String,
}

impl PinataConfig {
    pub fn new(jwt: impl Into<String>, gateway: impl Into<String>) -> Self {
        Self {
            jwt: jwt.into(),
            gateway: gateway.into(),
            api_url: DEFAULT_PINATA_API_URL.to_string(),
            uploads_url: DEFAULT_PINATA_UPLOADS_URL.to_string(),
        }
    }

    fn gateway_base(&self) -> String {
        let gateway = self.gateway.trim_end_matches('/');
        if gateway.starts_with("http://") || gateway.starts_with("https://") {
            gateway.to_string()
        } else {
            format!("https://{gateway}")
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PinFileResponse {
    ipfs_hash: String,
}

#[derive(Debug, Serialize)]
struct SignRequest<'a> {
    url: &'a str,
    date: i64,
    expires: u64,
    method: &'a str,
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    data: String,
}

/// Blob store backed by Pinata.
pub struct PinataGateway {
    client: Client,
    config: PinataConfig,
}

impl PinataGateway {
    pub fn new(config: PinataConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, config }
    }

    /// Turns a non-2xx response into a `BlobStoreError::Status`.
    async fn check_status(response: Response) -> std::result::Result<Response, BlobStoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(BlobStoreError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

fn request_error(err: reqwest::Error) -> BlobStoreError {
    BlobStoreError::Request(err.to_string())
}

fn decode_error(err: reqwest::Error) -> BlobStoreError {
    BlobStoreError::Decode(err.to_string())
}

#[async_trait]
impl BlobStoreTrait for PinataGateway {
    async fn upload(&self, name: &str, bytes: Vec<u8>) -> Result<Cid> {
        let size = bytes.len();
        let file = Part::bytes(bytes)
            .file_name(name.to_string())
            .mime_str("application/json")
            .map_err(request_error)?;
        let metadata = serde_json::json!({ "name": name }).to_string();
        let form = Form::new()
            .part("file", file)
            .text("pinataMetadata", metadata);

        let url = format!(
            "{}/pinning/pinFileToIPFS",
            self.config.api_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.jwt)
            .multipart(form)
            .send()
            .await
            .map_err(request_error)?;
        let response = Self::check_status(response).await.inspect_err(|e| {
            warn!("Pinata rejected upload of {}: {}", name, e);
        })?;

        let pinned: PinFileResponse = response.json().await.map_err(decode_error)?;
        let cid = Cid::parse(pinned.ipfs_hash)?;
        debug!("Pinned {} ({} bytes) as {}", name, size, cid);
        Ok(cid)
    }

    async fn fetch(&self, cid: &Cid) -> Result<Vec<u8>> {
        let url = format!("{}/ipfs/{}", self.config.gateway_base(), cid);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(request_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(BlobStoreError::NotFound(cid.to_string()).into());
        }
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await.map_err(decode_error)?;
        Ok(bytes.to_vec())
    }

    async fn signed_url(&self, cid: &Cid, expires_in: Duration) -> Result<String> {
        let target = format!("{}/files/{}", self.config.gateway_base(), cid);
        let body = SignRequest {
            url: &target,
            date: Utc::now().timestamp(),
            expires: expires_in.as_secs(),
            method: "GET",
        };

        let url = format!(
            "{}/v3/files/sign",
            self.config.uploads_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.jwt)
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;
        let response = Self::check_status(response).await?;

        let signed: SignResponse = response.json().await.map_err(decode_error)?;
        Ok(signed.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendly_core::errors::Error;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CID: &str = "bafkreihdwdcefgh4dqkjv67uzcmw7ojee6xedzdetojuzjevtenxquvyku";

    fn gateway(server: &MockServer) -> PinataGateway {
        PinataGateway::new(PinataConfig {
            jwt: "test-jwt".to_string(),
            gateway: server.uri(),
            api_url: server.uri(),
            uploads_url: server.uri(),
        })
    }

    #[test]
    fn bare_gateway_host_gets_https_scheme() {
        let config = PinataConfig::new("jwt", "example.mypinata.cloud/");
        assert_eq!(config.gateway_base(), "https://example.mypinata.cloud");
    }

    #[tokio::test]
    async fn upload_returns_pinned_hash() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pinning/pinFileToIPFS"))
            .and(header("authorization", "Bearer test-jwt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "IpfsHash": CID,
                "PinSize": 2,
                "Timestamp": "2025-01-12T00:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let cid = gateway(&server)
            .upload("goals-alice-v1.json", b"[]".to_vec())
            .await
            .unwrap();
        assert_eq!(cid.as_str(), CID);
    }

    #[tokio::test]
    async fn rejected_upload_is_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pinning/pinFileToIPFS"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid jwt"))
            .mount(&server)
            .await;

        let err = gateway(&server)
            .upload("goals.json", b"[]".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::BlobStore(BlobStoreError::Status { status: 401, .. })
        ));
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn fetch_reads_through_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/ipfs/{CID}")))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let bytes = gateway(&server)
            .fetch(&Cid::parse(CID).unwrap())
            .await
            .unwrap();
        assert_eq!(bytes, b"[]");
    }

    #[tokio::test]
    async fn fetch_of_unpinned_cid_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = gateway(&server)
            .fetch(&Cid::parse(CID).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BlobStore(BlobStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn signed_url_requests_get_access_for_the_given_lifetime() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/files/sign"))
            .and(header("authorization", "Bearer test-jwt"))
            .and(body_partial_json(serde_json::json!({
                "url": format!("{}/files/{CID}", server.uri()),
                "expires": 86400,
                "method": "GET"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": "https://example.mypinata.cloud/files/signed?X-Signature=abc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let url = gateway(&server)
            .signed_url(&Cid::parse(CID).unwrap(), Duration::from_secs(86400))
            .await
            .unwrap();
        assert!(url.contains("X-Signature=abc"));
    }
}
