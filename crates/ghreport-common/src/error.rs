//! Error types and utilities for the report

use thiserror::Error;

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, GhReportError>;

/// Main error type for report operations
#[derive(Error, Debug)]
pub enum GhReportError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network related errors (connection, timeout, body read)
    #[error("Network error: {message}")]
    Network {
        /// Human readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The GHData API answered with a non-success status
    #[error("GHData API error: {message}")]
    Api {
        /// Human readable description
        message: String,
        /// HTTP status code returned by the API
        status_code: Option<u16>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Query string decoding errors
    #[error("Query string error: {message}")]
    Query {
        /// Human readable description
        message: String,
        /// Name of the parameter being decoded
        parameter: Option<String>,
    },

    /// Chart rendering errors, including malformed series data
    #[error("Render error: {message}")]
    Render {
        /// Human readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Page environment errors (unknown element or region)
    #[error("Page error: {message}")]
    Page {
        /// Human readable description
        message: String,
    },
}

impl GhReportError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new API error with status code
    pub fn api_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::Api {
            message: msg.into(),
            status_code: Some(status),
        }
    }

    /// Create a new query string error for a parameter
    pub fn query(msg: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::Query {
            message: msg.into(),
            parameter: Some(parameter.into()),
        }
    }

    /// Create a new render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new render error with source
    pub fn render_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new page error
    pub fn page(msg: impl Into<String>) -> Self {
        Self::Page {
            message: msg.into(),
        }
    }

    /// HTTP status carried by an API error
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Short category name, used as a structured logging field
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Io(_) => "io",
            Self::Network { .. } => "network",
            Self::Api { .. } => "api",
            Self::Serialization(_) => "serialization",
            Self::Query { .. } => "query",
            Self::Render { .. } => "render",
            Self::Page { .. } => "page",
        }
    }
}
