// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! JSON-backed app registry (`apps.json`).
//!
//! The file holds a pretty-printed array of [`App`]. A missing file is an
//! empty registry; every mutation rewrites the whole file.

use std::fs;

use anyhow::{Context, Result};

use crate::logic::config::Config;
use crate::models::App;
use crate::utils::slug;

/// Load every registered app in stored order.
///
/// # Errors
///
/// Returns an error when the registry exists but cannot be read or parsed.
pub fn get_apps(config: &Config) -> Result<Vec<App>> {
    let path = config.apps_file();
    match fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse app registry: {:?}", path)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e).with_context(|| format!("Failed to read app registry: {:?}", path)),
    }
}

/// Find an app by name, ignoring case.
pub fn get_app(name: &str, config: &Config) -> Result<Option<App>> {
    Ok(get_apps(config)?.into_iter().find(|a| a.matches(name)))
}

/// First app, other than `except`, that `name` would clash with.
///
/// Names clash when they are equal ignoring case or share a file stem, since the
/// desktop entry and downloaded icon are keyed by [`slug`].
pub fn find_conflict(name: &str, except: Option<&str>, config: &Config) -> Result<Option<App>> {
    let stem = slug(name);
    Ok(get_apps(config)?
        .into_iter()
        .filter(|a| except.is_none_or(|current| !a.matches(current)))
        .find(|a| a.matches(name) || slug(&a.name) == stem))
}

/// Append an app to the registry. Duplicate checks belong to the caller.
pub fn add_app(app: App, config: &Config) -> Result<()> {
    let mut apps = get_apps(config)?;
    apps.push(app);
    write_apps(&apps, config)
}

/// Replace the app named `name` in place. Returns `false` when no app matched.
pub fn update_app(name: &str, app: &App, config: &Config) -> Result<bool> {
    let mut apps = get_apps(config)?;
    let Some(slot) = apps.iter_mut().find(|a| a.matches(name)) else {
        return Ok(false);
    };
    *slot = app.clone();
    write_apps(&apps, config)?;
    Ok(true)
}

/// Remove the app named `name`. Returns `false` when nothing was removed.
pub fn remove_app(name: &str, config: &Config) -> Result<bool> {
    let mut apps = get_apps(config)?;
    let before = apps.len();
    apps.retain(|a| !a.matches(name));
    if apps.len() == before {
        return Ok(false);
    }
    write_apps(&apps, config)?;
    Ok(true)
}

fn write_apps(apps: &[App], config: &Config) -> Result<()> {
    fs::create_dir_all(&config.app_data_path).with_context(|| {
        format!(
            "Failed to create data directory: {:?}",
            config.app_data_path
        )
    })?;
    let json = serde_json::to_string_pretty(apps)?;
    let path = config.apps_file();
    fs::write(&path, json).with_context(|| format!("Failed to write app registry: {:?}", path))?;
    tracing::debug!(count = apps.len(), path = %path.display(), "registry written");
    Ok(())
}
