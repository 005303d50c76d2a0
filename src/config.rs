use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_COOKIE_NAME: &str = "agency_os_session";

/// Connection settings for the console server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub tenant_id: String,
    /// Location opened at startup.
    pub start_location: String,
    /// Signed session cookie value copied from a browser login.
    pub session_cookie: Option<String>,
    pub cookie_name: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            tenant_id: String::new(),
            start_location: "/".to_string(),
            session_cookie: None,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
        }
    }
}

pub fn config_dir() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("opsdeck");
        path
    })
}

impl ConsoleConfig {
    /// Reads `~/.config/opsdeck/config.toml`, then applies `OPSDECK_*`
    /// environment overrides.
    pub fn load() -> Self {
        let from_file = config_dir()
            .map(|dir| Self::load_from(&dir.join("config.toml")))
            .unwrap_or_default();
        from_file.with_env(|key| std::env::var(key).ok())
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str::<Self>(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                Self::default()
            }
        }
    }

    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("OPSDECK_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = lookup("OPSDECK_TENANT_ID") {
            self.tenant_id = v;
        }
        if let Some(v) = lookup("OPSDECK_SESSION") {
            self.session_cookie = Some(v);
        }
        self
    }
}
