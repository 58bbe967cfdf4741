//! Storage Manager REST client
//!
//! Logs in once with basic auth; the session cookie returned by
//! `/ApiConnection/Login` is kept by the client's cookie store and sent with
//! every subsequent request until `/ApiConnection/Logout`.
//!
//! # API Reference
//! - `POST /ApiConnection/Login`, `POST /ApiConnection/Logout`
//! - `GET /StorageCenter/StorageCenter`
//! - `GET /StorageCenter/StorageCenter/{instanceId}/{EnclosureList|DiskConfigurationList|DiskFolderTierList|ControllerList}`

use super::{
    ClusterRecord, ControllerRecord, DiskRecord, DiskTierRecord, EnclosureRecord, FetchError,
    InventorySource,
};
use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use storsync_common::{EndpointConfig, HttpConfig};
use tracing::{debug, info};

/// Header selecting the Storage Manager REST API revision
const API_VERSION_HEADER: &str = "x-dell-api-version";

const CLUSTER_LIST_PATH: &str = "StorageCenter/StorageCenter";

/// Authenticated Storage Manager session
pub struct StorageManagerClient {
    http_client: Client,
    endpoint: EndpointConfig,
}

impl StorageManagerClient {
    /// Build the HTTP client and log in
    ///
    /// # Errors
    /// Returns error if:
    /// - The HTTP client cannot be built (bad header value, TLS backend)
    /// - The login request fails or is rejected
    pub async fn connect(endpoint: EndpointConfig, http: &HttpConfig) -> Result<Self, FetchError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let version = header::HeaderValue::from_str(&endpoint.api_version).map_err(|e| {
            FetchError::Network(format!("Invalid api_version '{}': {}", endpoint.api_version, e))
        })?;
        headers.insert(API_VERSION_HEADER, version);

        let http_client = Client::builder()
            .timeout(http.timeout())
            .default_headers(headers)
            .cookie_store(true)
            .danger_accept_invalid_certs(http.accept_invalid_certs)
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        let client = Self {
            http_client,
            endpoint,
        };
        client.login().await?;
        Ok(client)
    }

    async fn login(&self) -> Result<(), FetchError> {
        let url = self.endpoint.url("ApiConnection/Login");
        debug!(url = %url, user = %self.endpoint.username, "Logging in to Storage Manager");

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.endpoint.username, Some(&self.endpoint.password))
            .body("{}")
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("Login request failed: {}", e)))?;
        check_status(response).await?;

        info!(base_uri = %self.endpoint.base_uri, "Storage Manager session established");
        Ok(())
    }

    /// GET a JSON array and decode it into records
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, FetchError> {
        let url = self.endpoint.url(path);
        debug!(url = %url, "Fetching source listing");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("GET {} failed: {}", url, e)))?;
        let response = check_status(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("Reading {} failed: {}", url, e)))?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(format!("{}: {}", path, e)))
    }

    async fn get_cluster_list<T: DeserializeOwned>(
        &self,
        cluster_id: &str,
        list: &str,
    ) -> Result<Vec<T>, FetchError> {
        self.get_list(&format!("{}/{}/{}", CLUSTER_LIST_PATH, cluster_id, list))
            .await
    }
}

/// Turn a non-success response into [`FetchError::Status`] carrying the body
async fn check_status(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(FetchError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl InventorySource for StorageManagerClient {
    async fn clusters(&self) -> Result<Vec<ClusterRecord>, FetchError> {
        self.get_list(CLUSTER_LIST_PATH).await
    }

    async fn enclosures(&self, cluster_id: &str) -> Result<Vec<EnclosureRecord>, FetchError> {
        self.get_cluster_list(cluster_id, "EnclosureList").await
    }

    async fn disks(&self, cluster_id: &str) -> Result<Vec<DiskRecord>, FetchError> {
        self.get_cluster_list(cluster_id, "DiskConfigurationList").await
    }

    async fn disk_tiers(&self, cluster_id: &str) -> Result<Vec<DiskTierRecord>, FetchError> {
        self.get_cluster_list(cluster_id, "DiskFolderTierList").await
    }

    async fn controllers(&self, cluster_id: &str) -> Result<Vec<ControllerRecord>, FetchError> {
        self.get_cluster_list(cluster_id, "ControllerList").await
    }

    async fn logout(&self) -> Result<(), FetchError> {
        let url = self.endpoint.url("ApiConnection/Logout");
        let response = self
            .http_client
            .post(&url)
            .body("{}")
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("Logout request failed: {}", e)))?;
        check_status(response).await?;
        info!("Storage Manager session closed");
        Ok(())
    }
}
