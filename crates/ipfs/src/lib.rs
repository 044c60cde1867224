//! Blob-store implementations behind `spendly_core::blobs::BlobStoreTrait`.
//!
//! - [`PinataGateway`]: pins snapshots through the Pinata HTTP API and reads
//!   them back through a dedicated IPFS gateway.
//! - [`LocalBlobStore`]: content-addressed directory store used for
//!   development and tests.

mod local;
mod pinata;

pub use local::LocalBlobStore;
pub use pinata::{PinataConfig, PinataGateway, DEFAULT_PINATA_API_URL, DEFAULT_PINATA_UPLOADS_URL};
