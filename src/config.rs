//! Backend connection configuration
//!
//! Resolved once at startup: built-in defaults, then `~/.caretrack/config.yaml`,
//! then environment variables. CLI flags are applied last by the binary.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_ANON_KEY, DEFAULT_BACKEND_URL, ENV_ANON_KEY, ENV_BACKEND_URL,
};
use crate::storage::config_dir;

/// Session handling options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthOptions {
    pub persist_session: bool,
    pub auto_refresh_token: bool,
}

impl Default for AuthOptions {
    fn default() -> Self {
        AuthOptions {
            persist_session: true,
            auto_refresh_token: true,
        }
    }
}

/// Everything needed to construct the backend client
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
    pub auth: AuthOptions,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            url: String::from(DEFAULT_BACKEND_URL),
            anon_key: String::from(DEFAULT_ANON_KEY),
            auth: AuthOptions::default(),
        }
    }
}

/// On-disk overrides; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    backend_url: Option<String>,
    anon_key: Option<String>,
    persist_session: Option<bool>,
    auto_refresh_token: Option<bool>,
}

pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

impl BackendConfig {
    /// Defaults + config file (if present) + process environment
    pub fn load(config_path: &Path) -> Result<Self> {
        let mut config = BackendConfig::default();
        config.apply_file(config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let file: FileConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded config file");

        if let Some(url) = file.backend_url {
            self.url = url;
        }
        if let Some(key) = file.anon_key {
            self.anon_key = key;
        }
        if let Some(persist) = file.persist_session {
            self.auth.persist_session = persist;
        }
        if let Some(refresh) = file.auto_refresh_token {
            self.auth.auto_refresh_token = refresh;
        }
        Ok(())
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_BACKEND_URL).filter(|v| !v.is_empty()) {
            self.url = url;
        }
        if let Some(key) = lookup(ENV_ANON_KEY).filter(|v| !v.is_empty()) {
            self.anon_key = key;
        }
    }

    /// Reject configurations the client must not be built with
    pub fn validate(&self) -> Result<()> {
        if self.anon_key.trim().is_empty() {
            bail!("anon key is empty");
        }
        let url = reqwest::Url::parse(&self.url)
            .with_context(|| format!("invalid backend url '{}'", self.url))?;
        match url.scheme() {
            "https" => Ok(()),
            "http" if is_local(&url) => Ok(()),
            scheme => bail!("backend url must use https (got {})", scheme),
        }
    }

    /// First label of the host: `abc` for `https://abc.supabase.co`
    pub fn project_ref(&self) -> String {
        reqwest::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.split('.').next().unwrap_or(h).to_string()))
            .unwrap_or_else(|| String::from("local"))
    }

    /// Key under which the session is persisted
    pub fn storage_key(&self) -> String {
        format!("sb-{}-auth-token", self.project_ref())
    }
}

fn is_local(url: &reqwest::Url) -> bool {
    matches!(url.host_str(), Some("localhost") | Some("127.0.0.1") | Some("[::1]"))
}
