// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Remove an installed web app.

use crate::logic::config::Config;
use crate::logic::error::{LauncherError, Result};
use crate::models::App;
use crate::store::{desktop, icons, registry};

/// Remove the app from the registry together with its desktop entry and downloaded icon.
pub fn uninstall(name: &str, config: &Config) -> Result<App> {
    let app = registry::get_app(name, config)?
        .ok_or_else(|| LauncherError::AppNotFound(name.to_string()))?;

    registry::remove_app(&app.name, config)?;
    desktop::remove_entry(&app.name, config)?;
    let removed = registry::get_apps(config)
        .and_then(|remaining| icons::remove_icon(&app, &remaining, config));
    if let Err(e) = removed {
        tracing::warn!(app = %app.name, error = %e, "failed to remove icon");
    }
    tracing::info!(app = %app.name, "app uninstalled");
    Ok(app)
}
