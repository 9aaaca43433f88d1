//! CLI configuration, a thin wrapper around `tripkit_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--api-url, --token, etc.).

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use tripkit_core::{CachePolicy, ClientConfig, MemoryStorage, TlsMode};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use tripkit_config::{
    Config, Profile, cache_dir, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the runtime `ClientConfig` from the config file, the active
/// profile and CLI overrides. Flags take priority over profile values.
pub fn build_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut client = if let Some(profile) = cfg.profiles.get(&profile_name) {
        let mut client =
            tripkit_config::profile_to_client_config(profile, &profile_name, &cfg.defaults)?;
        if let Some(ref url) = global.api_url {
            client.base_url = tripkit_config::parse_api_url(url)?;
        }
        client
    } else {
        // No profile: the URL must come from flags or env.
        let url = global.api_url.as_deref().ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;
        ClientConfig::new(tripkit_config::parse_api_url(url)?)
            .with_storage(tripkit_config::session_storage(
                &profile_name,
                cfg.defaults.persist,
            ))
    };

    if let Some(ref token) = global.token {
        client.token = Some(SecretString::from(token.clone()));
    }
    if global.insecure {
        client.tls = TlsMode::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        client.timeout = Duration::from_secs(secs);
    }
    if global.no_cache {
        client.storage = Arc::new(MemoryStorage::new());
        client.cache = CachePolicy::default().with_max_age(Duration::ZERO);
    }

    Ok(client)
}
