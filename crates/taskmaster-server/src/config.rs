//! Server configuration.

use serde::{Deserialize, Serialize};

/// Runtime environment. Controls how much error detail leaves the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Storage error details are included in responses.
    Development,
    /// Storage errors surface as a generic message only.
    Production,
}

impl Environment {
    /// Whether error detail may be exposed to clients.
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Configuration for the TaskMaster server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind (default `"127.0.0.1"`).
    pub host: String,
    /// Port to bind (default `0` for auto-assign).
    pub port: u16,
    /// Runtime environment (default development).
    pub environment: Environment,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            environment: Environment::Development,
        }
    }
}
