//! Asset catalog REST client
//!
//! Every call is a form-encoded POST authenticated with basic auth.
//!
//! # API Reference
//! - `POST /device/` create or update a device
//! - `POST /parts/` create or update a part
//! - `POST /ips/` create or update an IP address and its device link

use super::{AssetCatalog, DeviceRecord, IpAssignment, PartRecord, UploadError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use storsync_common::{EndpointConfig, HttpConfig};
use tracing::debug;

/// Asset catalog API client
pub struct CatalogClient {
    http_client: Client,
    endpoint: EndpointConfig,
}

impl CatalogClient {
    /// Create new catalog client
    pub fn new(endpoint: EndpointConfig, http: &HttpConfig) -> Result<Self, UploadError> {
        let http_client = Client::builder()
            .timeout(http.timeout())
            .danger_accept_invalid_certs(http.accept_invalid_certs)
            .build()
            .map_err(|e| UploadError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint,
        })
    }

    async fn post_form<T: Serialize + ?Sized>(&self, path: &str, form: &T) -> Result<(), UploadError> {
        let url = self.endpoint.url(path);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.endpoint.username, Some(&self.endpoint.password))
            .form(form)
            .send()
            .await
            .map_err(|e| UploadError::Network(format!("POST {} failed: {}", url, e)))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(url = %url, status = status.as_u16(), response = %body, "Catalog upload accepted");
        Ok(())
    }
}

#[async_trait]
impl AssetCatalog for CatalogClient {
    async fn create_device(&self, device: &DeviceRecord) -> Result<(), UploadError> {
        self.post_form("device/", device).await
    }

    async fn create_part(&self, part: &PartRecord) -> Result<(), UploadError> {
        self.post_form("parts/", part).await
    }

    async fn create_ip(&self, ip: &IpAssignment) -> Result<(), UploadError> {
        self.post_form("ips/", ip).await
    }
}
