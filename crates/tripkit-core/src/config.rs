// ── Runtime client configuration ──
//
// Describes how to reach the backend and how long to trust cached data.
// Never touches disk: the CLI builds a `ClientConfig` from its profile
// and hands it in.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use tripkit_api::TlsMode;
use url::Url;

use crate::store::{CachePolicy, MemoryStorage, SessionStorage};

/// Configuration for one backend connection.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., `https://api.example.com/api`).
    pub base_url: Url,
    /// Bearer token attached to every request, if any.
    pub token: Option<SecretString>,
    pub timeout: Duration,
    pub tls: TlsMode,
    pub cache: CachePolicy,
    /// Where cache snapshots are persisted between sessions.
    pub storage: Arc<dyn SessionStorage>,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            token: None,
            timeout: Duration::from_secs(30),
            tls: TlsMode::System,
            cache: CachePolicy::default(),
            storage: Arc::new(MemoryStorage::new()),
        }
    }

    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_storage(mut self, storage: Arc<dyn SessionStorage>) -> Self {
        self.storage = storage;
        self
    }
}
