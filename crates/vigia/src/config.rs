//! Suite configuration from an INI file.
//!
//! Loading is an explicit call with an explicit path; nothing reads config
//! at module load. The `config` crate lowercases INI section and key names
//! on ingest, so lookups normalize before querying and `[AppData]` and
//! `[appdata]` address the same section.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::result::{VigiaError, VigiaResult};

/// INI section holding the application under test's coordinates.
pub const APP_SECTION: &str = "AppData";

/// Typed view of the whole configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// The `[AppData]` section
    #[serde(rename = "appdata")]
    pub app: AppData,
}

/// Application URL and credentials.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppData {
    /// Base URL of the CRM under test
    pub url: String,
    /// Login username
    pub username: String,
    /// Login password
    pub password: String,
}

/// Handle over a loaded INI file.
#[derive(Debug, Clone)]
pub struct IniConfig {
    inner: config::Config,
}

impl IniConfig {
    /// Load an INI file from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Config`] when the file is missing or malformed.
    pub fn load(path: impl AsRef<Path>) -> VigiaResult<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading configuration");
        let inner = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Ini))
            .build()?;
        Ok(Self { inner })
    }

    /// Read one entry as a string.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::MissingConfig`] naming the section and key when
    /// the entry is absent.
    pub fn get(&self, section: &str, key: &str) -> VigiaResult<String> {
        let path = format!("{}.{}", section.to_lowercase(), key.to_lowercase());
        self.inner.get_string(&path).map_err(|err| match err {
            config::ConfigError::NotFound(_) => VigiaError::MissingConfig {
                section: section.to_string(),
                key: key.to_string(),
            },
            other => VigiaError::Config(other),
        })
    }

    /// The `[AppData]` entries, each missing one reported by name.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::MissingConfig`] for the first absent entry.
    pub fn app_data(&self) -> VigiaResult<AppData> {
        Ok(AppData {
            url: self.get(APP_SECTION, "url")?,
            username: self.get(APP_SECTION, "username")?,
            password: self.get(APP_SECTION, "password")?,
        })
    }

    /// Deserialize the whole file into [`Settings`].
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Config`] when the file does not match the
    /// expected shape.
    pub fn settings(&self) -> VigiaResult<Settings> {
        Ok(self.inner.clone().try_deserialize()?)
    }
}
