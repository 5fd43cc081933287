//! Application settings loaded from the environment and an optional `.env` file.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Default location of the environment file, relative to the working directory.
pub const ENV_FILE: &str = ".env";

/// Resolved application settings.
///
/// Built once at startup and passed to whatever needs it; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Deployment environment name, read from `ENV`.
    #[serde(rename = "env", default = "default_environment_name")]
    environment_name: String,
}

/// Values supplied in code. These take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    /// Explicit environment name.
    pub environment_name: Option<String>,
}

fn default_environment_name() -> String {
    "development".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment_name: default_environment_name(),
        }
    }
}

impl Settings {
    /// Load settings from the process environment and `.env` in the working directory.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(ENV_FILE))
    }

    /// Load settings from the process environment and the given environment file.
    pub fn load_from(env_file: &Path) -> Result<Self> {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        Ok(Self::from_sources(
            SettingsOverrides::default(),
            vars,
            Some(env_file),
        )?)
    }

    /// Resolve settings from explicit sources.
    ///
    /// Precedence, highest first: `overrides`, `env_vars`, the pairs in
    /// `env_file`, compiled-in defaults. A missing file is skipped. The file
    /// is read without touching the process environment.
    pub fn from_sources<I>(
        overrides: SettingsOverrides,
        env_vars: I,
        env_file: Option<&Path>,
    ) -> std::result::Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        // envy lowercases keys, so the merge does too
        let mut merged: BTreeMap<String, String> = BTreeMap::new();

        if let Some(path) = env_file {
            for (key, value) in read_env_file(path)? {
                merged.insert(key.to_lowercase(), value);
            }
        }

        for (key, value) in env_vars {
            merged.insert(key.to_lowercase(), value);
        }

        if let Some(name) = overrides.environment_name {
            merged.insert("env".to_string(), name);
        }

        let settings: Settings = envy::from_iter(merged)?;
        debug!(environment = %settings.environment_name, "settings resolved");
        Ok(settings)
    }

    /// Deployment environment name.
    pub fn environment_name(&self) -> &str {
        &self.environment_name
    }
}

fn read_env_file(path: &Path) -> std::result::Result<Vec<(String, String)>, ConfigError> {
    let wrap = |source| ConfigError::EnvFile {
        path: path.to_path_buf(),
        source,
    };

    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            debug!(path = %path.display(), "no environment file");
            return Ok(Vec::new());
        }
        Err(e) => return Err(wrap(e)),
    };

    let pairs = iter
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(wrap)?;
    debug!(path = %path.display(), entries = pairs.len(), "read environment file");
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn env_file(contents: &str) -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn defaults_to_development_without_sources() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join(".env");

        let settings =
            Settings::from_sources(SettingsOverrides::default(), vars(&[]), Some(&missing))
                .unwrap();

        assert_eq!(settings.environment_name(), "development");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn process_env_sets_environment_name() {
        let settings = Settings::from_sources(
            SettingsOverrides::default(),
            vars(&[("ENV", "production")]),
            None,
        )
        .unwrap();

        assert_eq!(settings.environment_name(), "production");
    }

    #[test]
    fn env_file_sets_environment_name() {
        let (_dir, path) = env_file("ENV=staging\n");

        let settings =
            Settings::from_sources(SettingsOverrides::default(), vars(&[]), Some(&path)).unwrap();

        assert_eq!(settings.environment_name(), "staging");
    }

    #[test]
    fn process_env_wins_over_env_file() {
        let (_dir, path) = env_file("ENV=staging\n");

        let settings = Settings::from_sources(
            SettingsOverrides::default(),
            vars(&[("ENV", "production")]),
            Some(&path),
        )
        .unwrap();

        assert_eq!(settings.environment_name(), "production");
    }

    #[test]
    fn explicit_override_wins_over_everything() {
        let (_dir, path) = env_file("ENV=staging\n");
        let overrides = SettingsOverrides {
            environment_name: Some("test".to_string()),
        };

        let settings =
            Settings::from_sources(overrides, vars(&[("ENV", "production")]), Some(&path))
                .unwrap();

        assert_eq!(settings.environment_name(), "test");
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let (_dir, path) = env_file("# comment\nDATABASE_URL=postgres://localhost\n");

        let settings = Settings::from_sources(
            SettingsOverrides::default(),
            vars(&[("PATH", "/usr/bin"), ("HOME", "/root")]),
            Some(&path),
        )
        .unwrap();

        assert_eq!(settings.environment_name(), "development");
    }

    #[test]
    fn malformed_env_file_is_an_error() {
        let (_dir, path) = env_file("ENV staging\n");

        let err = Settings::from_sources(SettingsOverrides::default(), vars(&[]), Some(&path))
            .unwrap_err();

        assert!(matches!(err, ConfigError::EnvFile { .. }));
    }

    #[test]
    fn load_from_reports_malformed_file_as_config_error() {
        let (_dir, path) = env_file("ENV staging\n");

        let err = Settings::load_from(&path).unwrap_err();

        assert!(matches!(
            err,
            crate::error::ApiError::Config(ConfigError::EnvFile { .. })
        ));
    }

    #[test]
    fn env_file_does_not_touch_process_env() {
        let (_dir, path) = env_file("ANTIFAKEKIT_CONFIG_TEST_MARKER=1\n");

        Settings::from_sources(SettingsOverrides::default(), vars(&[]), Some(&path)).unwrap();

        assert!(std::env::var("ANTIFAKEKIT_CONFIG_TEST_MARKER").is_err());
    }
}
