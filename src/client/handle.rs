//! Opaque handle to the remote realtime conversation API
//!
//! The handle carries everything needed to open a conversation session:
//! endpoint, credential, and the deployment or model to request. All
//! session traffic happens through the external conversation client;
//! this crate only constructs the handle and hands it to the UI layer.

/// Which connection mode the handle was built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientMode {
    /// Azure endpoint with ambient federated (Entra) credentials
    AzureFederated,
    /// Azure endpoint with a static API key
    AzureApiKey,
    /// Default hosted endpoint with a static API key
    DefaultHosted,
}

/// Credential backing a client handle
#[derive(Clone)]
pub enum Credential {
    /// Token acquisition is deferred to the ambient identity provider
    Federated,
    /// Static secret sent with each request
    ApiKey(String),
}

// Keys must never reach logs through Debug formatting.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Federated => write!(f, "Federated"),
            Credential::ApiKey(key) => {
                write!(f, "ApiKey({})", crate::client::select::mask_secret(key))
            }
        }
    }
}

/// Authenticated handle to the remote conversation API.
///
/// Constructed exactly once at startup by [`crate::client::select_client`]
/// and passed by explicit dependency injection to whatever consumes it.
#[derive(Debug, Clone)]
pub struct RealtimeClientHandle {
    mode: ClientMode,
    endpoint: String,
    deployment: Option<String>,
    credential: Credential,
}

impl RealtimeClientHandle {
    pub(crate) fn new(
        mode: ClientMode,
        endpoint: impl Into<String>,
        deployment: Option<String>,
        credential: Credential,
    ) -> Self {
        Self {
            mode,
            endpoint: endpoint.into(),
            deployment,
            credential,
        }
    }

    pub fn mode(&self) -> ClientMode {
        self.mode
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Deployment name (Azure modes) or model identifier (default hosted)
    pub fn deployment(&self) -> Option<&str> {
        self.deployment.as_deref()
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_debug_masks_key() {
        let cred = Credential::ApiKey("sk-ABCDE12345".to_string());
        let rendered = format!("{cred:?}");
        assert!(rendered.contains("sk-AB**"));
        assert!(!rendered.contains("sk-ABCDE12345"));
    }

    #[test]
    fn test_handle_debug_masks_key() {
        let handle = RealtimeClientHandle::new(
            ClientMode::DefaultHosted,
            "https://api.openai.com/v1",
            Some("gpt-4o-realtime-preview-2024-10-01".to_string()),
            Credential::ApiKey("sk-ABCDE12345".to_string()),
        );
        let rendered = format!("{handle:?}");
        assert!(!rendered.contains("sk-ABCDE12345"));
    }
}
