//! Asset catalog (upload target)
//!
//! [`AssetCatalog`] is the seam between the synchronizer and the catalog API.
//! [`CatalogClient`] talks to the real API; [`DryRunCatalog`] only logs.

pub mod client;
pub mod dry_run;
pub mod records;

pub use client::CatalogClient;
pub use dry_run::DryRunCatalog;
pub use records::{DeviceRecord, IpAssignment, PartRecord};

use async_trait::async_trait;
use thiserror::Error;

/// Failure of a single upload call
#[derive(Debug, Error)]
pub enum UploadError {
    /// Request could not be sent or timed out
    #[error("Network error: {0}")]
    Network(String),

    /// Catalog answered with a non-success status
    #[error("Catalog rejected upload with {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Write side of the asset catalog
///
/// The catalog upserts by name, so re-running a full sync is safe.
#[async_trait]
pub trait AssetCatalog: Send + Sync {
    async fn create_device(&self, device: &DeviceRecord) -> Result<(), UploadError>;

    async fn create_part(&self, part: &PartRecord) -> Result<(), UploadError>;

    async fn create_ip(&self, ip: &IpAssignment) -> Result<(), UploadError>;
}
