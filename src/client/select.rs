//! Client selection: one configuration in, one authenticated handle out
//!
//! Runs exactly once at startup. Each chosen branch prints operator-facing
//! status lines to stdout; secrets are masked before emission.

use crate::client::config::{ClientConfig, ConnectionMode};
use crate::client::handle::{ClientMode, Credential, RealtimeClientHandle};
use crate::constants::{DEFAULT_HOSTED_ENDPOINT, SECRET_MASK_PREFIX};
use crate::error::ConfigError;

/// Build the conversation client handle for the given configuration.
///
/// Decision order and error cases are documented on
/// [`ClientConfig::resolve`]; this function only attaches credentials and
/// emits the status lines for the branch that won.
pub fn select_client(config: &ClientConfig) -> Result<RealtimeClientHandle, ConfigError> {
    let mode = config.resolve()?;

    let handle = match mode {
        ConnectionMode::AzureFederated {
            endpoint,
            deployment,
        } => {
            println!(" * Connecting to Azure OpenAI endpoint (AZURE_OPENAI_ENDPOINT): {endpoint}");
            println!(" * Using Entra token-based authentication (AZURE_OPENAI_USE_ENTRA)");
            print_deployment(deployment.as_deref());
            RealtimeClientHandle::new(
                ClientMode::AzureFederated,
                endpoint,
                deployment,
                Credential::Federated,
            )
        }
        ConnectionMode::AzureApiKey {
            endpoint,
            deployment,
            api_key,
        } => {
            println!(" * Connecting to Azure OpenAI endpoint (AZURE_OPENAI_ENDPOINT): {endpoint}");
            println!(
                " * Using API key (AZURE_OPENAI_API_KEY): {}",
                mask_secret(&api_key)
            );
            print_deployment(deployment.as_deref());
            RealtimeClientHandle::new(
                ClientMode::AzureApiKey,
                endpoint,
                deployment,
                Credential::ApiKey(api_key),
            )
        }
        ConnectionMode::DefaultHosted { api_key, model } => {
            println!(" * Connecting to OpenAI endpoint (OPENAI_ENDPOINT): {DEFAULT_HOSTED_ENDPOINT}");
            println!(" * Using API key (OPENAI_API_KEY): {}", mask_secret(&api_key));
            RealtimeClientHandle::new(
                ClientMode::DefaultHosted,
                DEFAULT_HOSTED_ENDPOINT,
                Some(model),
                Credential::ApiKey(api_key),
            )
        }
    };

    tracing::info!(
        mode = ?handle.mode(),
        endpoint = handle.endpoint(),
        deployment = handle.deployment(),
        "conversation client configured"
    );
    Ok(handle)
}

fn print_deployment(deployment: Option<&str>) {
    match deployment {
        Some(d) if !d.is_empty() => {
            println!(" * Using deployment (AZURE_OPENAI_DEPLOYMENT): {d}");
        }
        _ => println!(" * Using no deployment (AZURE_OPENAI_DEPLOYMENT)"),
    }
}

/// Mask a secret to a short non-reversible prefix for diagnostics.
///
/// Keeps at most the first [`SECRET_MASK_PREFIX`] characters followed by
/// a `**` marker. Safe on short and non-ASCII input.
pub fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(SECRET_MASK_PREFIX).collect();
    format!("{prefix}**")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("sk-ABCDE12345"), "sk-AB**");
        assert_eq!(mask_secret("abc"), "abc**");
        assert_eq!(mask_secret(""), "**");
    }

    #[test]
    fn test_select_azure_federated_scenario() {
        let config = ClientConfig {
            endpoint: Some("https://x.example/".to_string()),
            use_federated_auth: true,
            deployment: Some("d1".to_string()),
            api_key: None,
        };
        let handle = select_client(&config).unwrap();
        assert_eq!(handle.mode(), ClientMode::AzureFederated);
        assert_eq!(handle.endpoint(), "https://x.example/");
        assert_eq!(handle.deployment(), Some("d1"));
        assert!(matches!(handle.credential(), Credential::Federated));
    }

    #[test]
    fn test_select_azure_api_key() {
        let config = ClientConfig {
            endpoint: Some("https://x.example/".to_string()),
            use_federated_auth: false,
            deployment: None,
            api_key: Some("azure-key-123".to_string()),
        };
        let handle = select_client(&config).unwrap();
        assert_eq!(handle.mode(), ClientMode::AzureApiKey);
        assert_eq!(handle.endpoint(), "https://x.example/");
        assert_eq!(handle.deployment(), None);
    }

    #[test]
    fn test_select_default_hosted_scenario() {
        let config = ClientConfig {
            api_key: Some("sk-ABCDE12345".to_string()),
            ..Default::default()
        };
        let handle = select_client(&config).unwrap();
        assert_eq!(handle.mode(), ClientMode::DefaultHosted);
        assert_eq!(handle.endpoint(), "https://api.openai.com/v1");
        assert_eq!(
            handle.deployment(),
            Some("gpt-4o-realtime-preview-2024-10-01")
        );
    }

    #[test]
    fn test_select_missing_auth_method() {
        let config = ClientConfig {
            endpoint: Some("https://x.example/".to_string()),
            ..Default::default()
        };
        let err = select_client(&config).unwrap_err();
        assert!(matches!(err, ConfigError::MissingAuthMethod { .. }));
    }

    #[test]
    fn test_select_no_configuration() {
        let err = select_client(&ClientConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::NoConfigurationFound));
    }
}
