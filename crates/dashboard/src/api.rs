//! Backend reads the dashboard depends on.

use std::future::Future;

use serde::de::DeserializeOwned;

use logidash_inventory::{InventoryItem, Warehouse};

use crate::config::DashboardConfig;
use crate::session::Credential;

pub const WAREHOUSES_PATH: &str = "/api/warehouses";
pub const INVENTORY_PATH: &str = "/api/inventory";

/// Backend read failure, with the detail needed for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Source of the two collections the dashboard is built from.
///
/// A missing credential means the request is sent without authorization;
/// rejecting it is the backend's call.
pub trait DashboardSource: Send + Sync {
    fn fetch_warehouses(
        &self,
        credential: Option<&Credential>,
    ) -> impl Future<Output = Result<Vec<Warehouse>, ApiError>> + Send;

    fn fetch_inventory(
        &self,
        credential: Option<&Credential>,
    ) -> impl Future<Output = Result<Vec<InventoryItem>, ApiError>> + Send;
}

/// `DashboardSource` backed by the ERP's REST API.
#[derive(Debug, Clone)]
pub struct HttpDashboardSource {
    client: reqwest::Client,
    api_url: String,
}

impl HttpDashboardSource {
    pub fn new(config: &DashboardConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Reuse an existing client (connection pool, proxies, timeouts).
    pub fn with_client(client: reqwest::Client, config: &DashboardConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn get_json<T>(&self, path: &str, credential: Option<&Credential>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.api_url, path);
        let mut req = self.client.get(&url);

        if let Some(credential) = credential {
            req = req.bearer_auth(credential.expose());
        }

        let resp = req.send().await.map_err(|e| ApiError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ApiError::Api(
                resp.status().as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }
}

impl DashboardSource for HttpDashboardSource {
    async fn fetch_warehouses(
        &self,
        credential: Option<&Credential>,
    ) -> Result<Vec<Warehouse>, ApiError> {
        self.get_json(WAREHOUSES_PATH, credential).await
    }

    async fn fetch_inventory(
        &self,
        credential: Option<&Credential>,
    ) -> Result<Vec<InventoryItem>, ApiError> {
        self.get_json(INVENTORY_PATH, credential).await
    }
}
