//! Catalog stand-in for `--dry-run`: logs each record as JSON, never fails

use super::{AssetCatalog, DeviceRecord, IpAssignment, PartRecord, UploadError};
use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Default)]
pub struct DryRunCatalog;

impl DryRunCatalog {
    pub fn new() -> Self {
        Self
    }
}

fn log_record<T: Serialize>(endpoint: &str, record: &T) {
    let payload = serde_json::to_string(record).unwrap_or_else(|e| format!("<unserializable: {}>", e));
    info!(endpoint, payload = %payload, "Dry run: upload skipped");
}

#[async_trait]
impl AssetCatalog for DryRunCatalog {
    async fn create_device(&self, device: &DeviceRecord) -> Result<(), UploadError> {
        log_record("device", device);
        Ok(())
    }

    async fn create_part(&self, part: &PartRecord) -> Result<(), UploadError> {
        log_record("parts", part);
        Ok(())
    }

    async fn create_ip(&self, ip: &IpAssignment) -> Result<(), UploadError> {
        log_record("ips", ip);
        Ok(())
    }
}
