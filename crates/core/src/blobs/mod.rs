//! Blobs module - content identifiers and the content-addressed store seam.

mod blobs_codec;
mod blobs_model;
mod blobs_traits;

pub use blobs_codec::{fetch_json, upload_json};
pub use blobs_model::Cid;
pub use blobs_traits::BlobStoreTrait;
