//! Client configuration and connection-mode resolution
//!
//! Settings are read once from the environment at process start and
//! never mutated. Resolution collapses the four optional fields into a
//! tagged union so the selector can match exhaustively instead of
//! chaining nullable checks.

use crate::constants::{DEFAULT_HOSTED_ENDPOINT, DEFAULT_REALTIME_MODEL};
use crate::error::ConfigError;

/// Raw connection settings, read once at process start
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Azure-style endpoint URL, if targeting a dedicated deployment
    pub endpoint: Option<String>,

    /// Whether to authenticate with ambient federated (Entra) credentials
    pub use_federated_auth: bool,

    /// Optional deployment/model name for Azure endpoints
    pub deployment: Option<String>,

    /// Static API key, for either an Azure endpoint or the default host
    pub api_key: Option<String>,
}

/// One recognized way of connecting, produced by [`ClientConfig::resolve`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Azure endpoint, ambient federated credentials
    AzureFederated {
        endpoint: String,
        deployment: Option<String>,
    },
    /// Azure endpoint, static API key
    AzureApiKey {
        endpoint: String,
        deployment: Option<String>,
        api_key: String,
    },
    /// Default hosted endpoint with a fixed model, static API key
    DefaultHosted { api_key: String, model: String },
}

impl ClientConfig {
    /// Read configuration from environment variables.
    ///
    /// `AZURE_OPENAI_USE_ENTRA` must parse as a bool to count; any other
    /// value is treated as false. The key falls back from
    /// `AZURE_OPENAI_API_KEY` to `OPENAI_API_KEY`.
    pub fn from_env() -> Self {
        let use_federated_auth = std::env::var("AZURE_OPENAI_USE_ENTRA")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            endpoint: std::env::var("AZURE_OPENAI_ENDPOINT").ok(),
            use_federated_auth,
            deployment: std::env::var("AZURE_OPENAI_DEPLOYMENT").ok(),
            api_key: std::env::var("AZURE_OPENAI_API_KEY")
                .or_else(|_| std::env::var("OPENAI_API_KEY"))
                .ok(),
        }
    }

    /// Resolve the settings into exactly one connection mode.
    ///
    /// Evaluation is strict first-match-wins:
    /// 1. endpoint + federated flag -> `AzureFederated`
    /// 2. endpoint + key            -> `AzureApiKey`
    /// 3. endpoint alone            -> `MissingAuthMethod`
    /// 4. key alone                 -> `DefaultHosted`
    /// 5. nothing                   -> `NoConfigurationFound`
    pub fn resolve(&self) -> Result<ConnectionMode, ConfigError> {
        match (&self.endpoint, self.use_federated_auth, &self.api_key) {
            (Some(endpoint), true, _) => Ok(ConnectionMode::AzureFederated {
                endpoint: endpoint.clone(),
                deployment: self.deployment.clone(),
            }),
            (Some(endpoint), false, Some(api_key)) => Ok(ConnectionMode::AzureApiKey {
                endpoint: endpoint.clone(),
                deployment: self.deployment.clone(),
                api_key: api_key.clone(),
            }),
            (Some(endpoint), false, None) => Err(ConfigError::MissingAuthMethod {
                endpoint: endpoint.clone(),
            }),
            (None, _, Some(api_key)) => Ok(ConnectionMode::DefaultHosted {
                api_key: api_key.clone(),
                model: DEFAULT_REALTIME_MODEL.to_string(),
            }),
            (None, _, None) => Err(ConfigError::NoConfigurationFound),
        }
    }
}

impl ConnectionMode {
    /// Endpoint this mode will connect to
    pub fn endpoint(&self) -> &str {
        match self {
            ConnectionMode::AzureFederated { endpoint, .. } => endpoint,
            ConnectionMode::AzureApiKey { endpoint, .. } => endpoint,
            ConnectionMode::DefaultHosted { .. } => DEFAULT_HOSTED_ENDPOINT,
        }
    }
}
