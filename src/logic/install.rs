// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Register a new web app.

use std::fs;
use std::path::Path;

use crate::logic::config::Config;
use crate::logic::error::{LauncherError, Result};
use crate::models::App;
use crate::models::app::{validate_name, validate_url};
use crate::store::icons::{self, HttpIconSource, IconSource};
use crate::store::{desktop, registry};

/// Install an app, downloading its favicon over HTTP when no icon is given.
pub fn install(name: &str, url: &str, icon: Option<&str>, config: &Config) -> Result<App> {
    install_with(name, url, icon, config, &HttpIconSource::default())
}

/// Install an app using `icon_source` for favicon discovery.
///
/// Validates input, rejects names that clash with an installed app, writes the
/// desktop entry, and records the app in the registry last. Icon download is
/// best-effort; a failed install leaves no entry or downloaded icon behind.
pub fn install_with(
    name: &str,
    url: &str,
    icon: Option<&str>,
    config: &Config,
    icon_source: &dyn IconSource,
) -> Result<App> {
    let name = validate_name(name).map_err(LauncherError::InvalidInput)?;
    let url = validate_url(url).map_err(LauncherError::InvalidInput)?;
    let icon = icon
        .map(str::trim)
        .filter(|i| !i.is_empty())
        .map(str::to_string);

    ensure_available(&name, None, config)?;

    let mut app = App::new(name, url, icon);
    let mut fetched = None;
    if app.icon.is_none() && config.fetch_icons {
        match icons::store_icon(&app, config, icon_source) {
            Ok(Some(path)) => {
                app.icon = Some(path.to_string_lossy().into_owned());
                fetched = Some(path);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(app = %app.name, error = %e, "icon download failed"),
        }
    }

    if let Err(e) = desktop::create_entry(&app, config) {
        discard_icon(fetched.as_deref());
        return Err(e.into());
    }
    if let Err(e) = registry::add_app(app.clone(), config) {
        if let Err(cleanup) = desktop::remove_entry(&app.name, config) {
            tracing::warn!(app = %app.name, error = %cleanup, "failed to roll back desktop entry");
        }
        discard_icon(fetched.as_deref());
        return Err(e.into());
    }
    tracing::info!(app = %app.name, url = %app.url, "app installed");
    Ok(app)
}

/// Reject `name` when it clashes with an installed app other than `except`.
pub(crate) fn ensure_available(name: &str, except: Option<&str>, config: &Config) -> Result<()> {
    match registry::find_conflict(name, except, config)? {
        None => Ok(()),
        Some(existing) if existing.matches(name) => {
            Err(LauncherError::DuplicateApp(name.to_string()))
        }
        Some(existing) => Err(LauncherError::NameConflict {
            name: name.to_string(),
            existing: existing.name,
        }),
    }
}

fn discard_icon(path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };
    if let Err(e) = fs::remove_file(path) {
        tracing::warn!(path = %path.display(), error = %e, "failed to remove downloaded icon");
    }
}
