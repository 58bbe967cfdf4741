//! Source inventory (Storage Manager REST API)
//!
//! [`InventorySource`] is the seam between the synchronizer and the network.
//! [`StorageManagerClient`] is the production implementation.

pub mod client;
pub mod records;

pub use client::StorageManagerClient;
pub use records::{ClusterRecord, ControllerRecord, DiskRecord, DiskTierRecord, EnclosureRecord};

use async_trait::async_trait;
use thiserror::Error;

/// Failure to obtain a listing from the source API
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request could not be sent or timed out
    #[error("Network error: {0}")]
    Network(String),

    /// API answered with a non-success status
    #[error("Source API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Body did not match the expected record shape
    #[error("Failed to decode source response: {0}")]
    Decode(String),
}

/// Read-only view of the source inventory for one authenticated session
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// All Storage Centers visible to the session
    async fn clusters(&self) -> Result<Vec<ClusterRecord>, FetchError>;

    async fn enclosures(&self, cluster_id: &str) -> Result<Vec<EnclosureRecord>, FetchError>;

    async fn disks(&self, cluster_id: &str) -> Result<Vec<DiskRecord>, FetchError>;

    async fn disk_tiers(&self, cluster_id: &str) -> Result<Vec<DiskTierRecord>, FetchError>;

    async fn controllers(&self, cluster_id: &str) -> Result<Vec<ControllerRecord>, FetchError>;

    /// End the session
    async fn logout(&self) -> Result<(), FetchError>;
}
