// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Resolved paths and persisted user settings.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};

use crate::logic::error::{LauncherError, Result};

/// Overrides the registry/icon directory.
pub const DATA_DIR_ENV: &str = "TARANTULA_DATA_DIR";
/// Overrides the directory desktop entries are written to.
pub const DESKTOP_DIR_ENV: &str = "TARANTULA_DESKTOP_DIR";

const SETTINGS_FILE: &str = "config.json";

/// Runtime configuration handed to every storage and launch operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Holds `apps.json`, `config.json` and downloaded icons.
    pub app_data_path: PathBuf,
    /// Where `.desktop` entries are written.
    pub desktop_data_path: PathBuf,
    /// Explicit browser executable; detected when `None`.
    pub browser_path: Option<String>,
    /// Download a favicon when an app is installed without an icon.
    pub fetch_icons: bool,
}

/// Subset of [`Config`] persisted in `config.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub browser_path: Option<String>,
    #[serde(default = "default_fetch_icons")]
    pub fetch_icons: bool,
}

fn default_fetch_icons() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            browser_path: None,
            fetch_icons: default_fetch_icons(),
        }
    }
}

impl Config {
    pub fn new(app_data_path: PathBuf, desktop_data_path: PathBuf) -> Self {
        Self {
            app_data_path,
            desktop_data_path,
            browser_path: None,
            fetch_icons: true,
        }
    }

    /// Resolve directories from the environment or platform defaults and merge saved settings.
    ///
    /// # Errors
    ///
    /// Fails when no data directory can be determined or `config.json` is unreadable.
    pub fn load() -> anyhow::Result<Self> {
        let app_data_path = dir_from_env(DATA_DIR_ENV, "tarantula")?;
        let desktop_data_path = dir_from_env(DESKTOP_DIR_ENV, "applications")?;

        let mut config = Self::new(app_data_path, desktop_data_path);
        let settings = read_settings(&config.app_data_path)?;
        config.apply(settings);
        tracing::debug!(
            data = %config.app_data_path.display(),
            desktop = %config.desktop_data_path.display(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Persistable part of this configuration.
    pub fn settings(&self) -> Settings {
        Settings {
            browser_path: self.browser_path.clone(),
            fetch_icons: self.fetch_icons,
        }
    }

    fn apply(&mut self, settings: Settings) {
        self.browser_path = settings.browser_path;
        self.fetch_icons = settings.fetch_icons;
    }

    pub fn apps_file(&self) -> PathBuf {
        self.app_data_path.join("apps.json")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.app_data_path.join(SETTINGS_FILE)
    }
}

/// Directory from `var`, else `<platform data dir>/<default_name>`.
fn dir_from_env(var: &str, default_name: &str) -> anyhow::Result<PathBuf> {
    resolve_dir(var, std::env::var_os(var), dirs::data_dir(), default_name)
}

/// A non-empty `override_dir` wins; otherwise `data_root/default_name`.
fn resolve_dir(
    var: &str,
    override_dir: Option<OsString>,
    data_root: Option<PathBuf>,
    default_name: &str,
) -> anyhow::Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    data_root
        .map(|root| root.join(default_name))
        .ok_or_else(|| anyhow!("Could not find data directory; set {var}"))
}

/// Read `config.json` from `dir`; a missing file yields defaults.
pub fn read_settings(dir: &Path) -> anyhow::Result<Settings> {
    let path = dir.join(SETTINGS_FILE);
    match fs::read_to_string(&path) {
        Ok(content) => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {:?}", path)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(e) => Err(e).with_context(|| format!("Failed to read settings file: {:?}", path)),
    }
}

fn write_settings(config: &Config) -> anyhow::Result<()> {
    fs::create_dir_all(&config.app_data_path).with_context(|| {
        format!(
            "Failed to create data directory: {:?}",
            config.app_data_path
        )
    })?;
    let json = serde_json::to_string_pretty(&config.settings())?;
    let path = config.settings_file();
    fs::write(&path, json).with_context(|| format!("Failed to write settings file: {:?}", path))
}

/// Set and persist the browser executable used to launch apps.
///
/// # Errors
///
/// Returns [`LauncherError::InvalidPath`] for blank or non-existent paths.
pub fn update_browser_path(new_path: &str, config: &mut Config) -> Result<()> {
    let new_path = new_path.trim();
    if new_path.is_empty() {
        return Err(LauncherError::InvalidPath(
            "Browser path cannot be empty".into(),
        ));
    }
    if !Path::new(new_path).exists() {
        return Err(LauncherError::InvalidPath(format!(
            "Executable path does not exist: {new_path}"
        )));
    }

    config.browser_path = Some(new_path.to_string());
    write_settings(config)?;
    tracing::info!(browser = new_path, "browser path updated");
    Ok(())
}

/// Enable or disable favicon download on install and persist the choice.
pub fn set_fetch_icons(enabled: bool, config: &mut Config) -> Result<()> {
    config.fetch_icons = enabled;
    write_settings(config)?;
    tracing::info!(enabled, "favicon download setting updated");
    Ok(())
}

/// Config rooted in a temporary directory. Keep the `TempDir` alive for the test's duration.
#[cfg(test)]
pub fn test_config() -> (Config, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().unwrap();
    let mut config = Config::new(dir.path().join("data"), dir.path().join("applications"));
    config.fetch_icons = false;
    (config, dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_settings_defaults_when_missing() {
        let (config, _dir) = test_config();
        let settings = read_settings(&config.app_data_path).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.fetch_icons);
    }

    #[test]
    fn read_settings_fills_missing_keys() {
        let (config, _dir) = test_config();
        fs::create_dir_all(&config.app_data_path).unwrap();
        fs::write(config.settings_file(), r#"{"browser_path":"/usr/bin/chromium"}"#).unwrap();

        let settings = read_settings(&config.app_data_path).unwrap();

        assert_eq!(settings.browser_path.as_deref(), Some("/usr/bin/chromium"));
        assert!(settings.fetch_icons);
    }

    #[test]
    fn update_browser_path_persists_existing_executable() {
        let (mut config, dir) = test_config();
        let browser = dir.path().join("browser");
        fs::write(&browser, b"#!/bin/sh\n").unwrap();
        let browser = browser.to_str().unwrap().to_string();

        update_browser_path(&browser, &mut config).unwrap();

        assert_eq!(config.browser_path.as_deref(), Some(browser.as_str()));
        let saved = read_settings(&config.app_data_path).unwrap();
        assert_eq!(saved.browser_path.as_deref(), Some(browser.as_str()));
    }

    #[test]
    fn update_browser_path_rejects_missing_and_blank_paths() {
        let (mut config, dir) = test_config();
        let missing = dir.path().join("nope");

        let err = update_browser_path(missing.to_str().unwrap(), &mut config).unwrap_err();
        assert!(matches!(err, LauncherError::InvalidPath(_)));

        let err = update_browser_path("  ", &mut config).unwrap_err();
        assert!(matches!(err, LauncherError::InvalidPath(_)));

        assert_eq!(config.browser_path, None);
        assert!(!config.settings_file().exists());
    }

    #[test]
    fn set_fetch_icons_round_trips_through_settings_file() {
        let (mut config, _dir) = test_config();
        set_fetch_icons(false, &mut config).unwrap();

        let saved = read_settings(&config.app_data_path).unwrap();
        assert!(!saved.fetch_icons);
    }

    #[test]
    fn env_override_wins_over_platform_data_dir() {
        let dir = resolve_dir(
            DATA_DIR_ENV,
            Some(OsString::from("/srv/tarantula")),
            Some(PathBuf::from("/home/u/.local/share")),
            "tarantula",
        )
        .unwrap();
        assert_eq!(dir, PathBuf::from("/srv/tarantula"));
    }

    #[test]
    fn empty_or_missing_override_uses_platform_data_dir() {
        let root = Some(PathBuf::from("/home/u/.local/share"));
        for override_dir in [None, Some(OsString::new())] {
            let dir = resolve_dir(DESKTOP_DIR_ENV, override_dir, root.clone(), "applications")
                .unwrap();
            assert_eq!(dir, PathBuf::from("/home/u/.local/share/applications"));
        }
    }

    #[test]
    fn missing_data_dir_names_the_override_variable() {
        let err = resolve_dir(DATA_DIR_ENV, None, None, "tarantula").unwrap_err();
        assert!(err.to_string().contains(DATA_DIR_ENV));
    }
}
