use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    #[default]
    Calm,
    Dense,
}

impl Density {
    pub fn toggled(self) -> Self {
        match self {
            Density::Calm => Density::Dense,
            Density::Dense => Density::Calm,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Density::Calm => "Calm",
            Density::Dense => "Dense",
        }
    }
}

/// Display preferences, read once at startup.
///
/// Values are never edited in place: every change goes through a `with_*`
/// method and the result is handed to the single writer as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: ThemeMode,
    pub density: Density,
    pub easy_mode: bool,
    /// Muted feed row ids, keyed by tenant.
    pub muted_feeds: BTreeMap<String, BTreeSet<String>>,
}

impl Preferences {
    pub fn with_theme(&self, theme: ThemeMode) -> Self {
        Self {
            theme,
            ..self.clone()
        }
    }

    pub fn with_density(&self, density: Density) -> Self {
        Self {
            density,
            ..self.clone()
        }
    }

    pub fn with_easy_mode(&self, easy_mode: bool) -> Self {
        Self {
            easy_mode,
            ..self.clone()
        }
    }

    pub fn with_muted_feeds(&self, tenant: &str, ids: BTreeSet<String>) -> Self {
        let mut muted_feeds = self.muted_feeds.clone();
        if ids.is_empty() {
            muted_feeds.remove(tenant);
        } else {
            muted_feeds.insert(tenant.to_string(), ids);
        }
        Self {
            muted_feeds,
            ..self.clone()
        }
    }

    pub fn muted_for(&self, tenant: &str) -> Option<&BTreeSet<String>> {
        self.muted_feeds.get(tenant)
    }

    pub fn is_muted(&self, tenant: &str, feed_id: &str) -> bool {
        self.muted_for(tenant).is_some_and(|ids| ids.contains(feed_id))
    }
}

pub fn get_preferences_path() -> Option<PathBuf> {
    crate::config::config_dir().map(|dir| dir.join("preferences.toml"))
}

pub fn load_preferences() -> Preferences {
    get_preferences_path()
        .map(|path| load_preferences_from(&path))
        .unwrap_or_default()
}

pub fn load_preferences_from(path: &Path) -> Preferences {
    if !path.exists() {
        return Preferences::default();
    }
    match std::fs::read_to_string(path)
        .map_err(anyhow::Error::from)
        .and_then(|content| toml::from_str::<Preferences>(&content).map_err(Into::into))
    {
        Ok(prefs) => prefs,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "preferences unreadable, using defaults");
            Preferences::default()
        }
    }
}

pub fn save_preferences_to(path: &Path, prefs: &Preferences) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string(prefs)?)?;
    Ok(())
}
