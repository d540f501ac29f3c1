use std::time::Duration;

use thiserror::Error;

/// Base URL used when `INVENTORY_API_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str =
    "https://webapiordenescompras2025-g7gfbwbne2dbfqbd.canadacentral-01.azurewebsites.net/api";

/// Per-request deadline used when `INVENTORY_API_TIMEOUT_MS` is not set.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

pub const BASE_URL_VAR: &str = "INVENTORY_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "INVENTORY_API_TIMEOUT_MS";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a positive whole number of milliseconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
    #[error("Base URL must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),
}

/// The REST collections the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Products,
    Customers,
    Suppliers,
    Orders,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Products,
        Resource::Customers,
        Resource::Suppliers,
        Resource::Orders,
    ];

    /// Collection path, appended to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Resource::Products => "/products",
            Resource::Customers => "/customers",
            Resource::Suppliers => "/suppliers",
            Resource::Orders => "/orders",
        }
    }

    /// Key under which some backends wrap a collection response.
    pub fn collection_key(self) -> &'static str {
        &self.path()[1..]
    }

    /// Display title used for modal headings.
    pub fn title(self) -> &'static str {
        match self {
            Resource::Products => "Producto",
            Resource::Customers => "Cliente",
            Resource::Suppliers => "Proveedor",
            Resource::Orders => "Orden",
        }
    }

    /// Modal heading when adding a new record.
    pub fn create_title(self) -> &'static str {
        match self {
            Resource::Products => "Añadir Nuevo Producto",
            Resource::Customers => "Añadir Nuevo Cliente",
            Resource::Suppliers => "Añadir Nuevo Proveedor",
            Resource::Orders => "Crear Nueva Orden",
        }
    }

    /// Noun with article, as used in confirmation prompts.
    pub fn noun(self) -> &'static str {
        match self {
            Resource::Products => "el producto",
            Resource::Customers => "al cliente",
            Resource::Suppliers => "al proveedor",
            Resource::Orders => "la orden",
        }
    }
}

/// Connection settings for the REST backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(base_url)?;
        }
        if let Some(raw) = lookup(TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout {
                    var: TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
            config.timeout = Duration::from_millis(millis);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    /// Replaces the per-request deadline. A zero deadline is refused.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                var: "timeout",
                value: timeout.as_millis().to_string(),
            });
        }
        self.timeout = timeout;
        Ok(self)
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
