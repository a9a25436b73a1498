// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Freedesktop `.desktop` entries so installed apps show up in the system menu.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::logic::config::Config;
use crate::models::App;
use crate::utils::slug;

/// Command written into `Exec=`; the launcher must be on `PATH`.
pub const LAUNCHER_BIN: &str = "tarantula";

/// Characters that force an `Exec` argument to be quoted.
const EXEC_RESERVED: &[char] = &[
    ' ', '\t', '\n', '"', '\'', '\\', '>', '<', '~', '|', '&', ';', '$', '*', '?', '#', '(', ')',
    '`',
];

/// Path of the entry for an app name.
pub fn entry_path(app_name: &str, config: &Config) -> PathBuf {
    config
        .desktop_data_path
        .join(format!("{}.desktop", slug(app_name)))
}

/// Render the entry file contents for an app.
pub fn entry_contents(app: &App) -> String {
    let mut content = format!(
        "[Desktop Entry]\nName={}\nExec={} {}\nType=Application\n",
        escape_value(&app.name),
        LAUNCHER_BIN,
        escape_value(&quote_exec_arg(&app.name)),
    );
    if let Some(icon) = app.icon.as_deref().filter(|i| !i.trim().is_empty()) {
        content.push_str(&format!("Icon={}\n", escape_value(icon)));
    }
    content
}

/// Write (or overwrite) the entry for `app`.
pub fn create_entry(app: &App, config: &Config) -> Result<()> {
    fs::create_dir_all(&config.desktop_data_path).with_context(|| {
        format!(
            "Failed to create desktop entry directory: {:?}",
            config.desktop_data_path
        )
    })?;
    let path = entry_path(&app.name, config);
    fs::write(&path, entry_contents(app))
        .with_context(|| format!("Failed to write desktop entry: {:?}", path))?;
    tracing::debug!(path = %path.display(), "desktop entry written");
    Ok(())
}

/// Rewrite the entry after an edit, dropping the old file when the name changed.
pub fn update_entry(old_name: &str, app: &App, config: &Config) -> Result<()> {
    if entry_path(old_name, config) != entry_path(&app.name, config) {
        remove_entry(old_name, config)?;
    }
    create_entry(app, config)
}

/// Delete the entry for `app_name`; a missing entry is not an error.
pub fn remove_entry(app_name: &str, config: &Config) -> Result<()> {
    let path = entry_path(app_name, config);
    match fs::remove_file(&path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "desktop entry removed");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no desktop entry to remove");
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to remove desktop entry: {:?}", path)),
    }
}

/// Quote an `Exec` argument using freedesktop quoting rules and escape `%` field codes.
fn quote_exec_arg(arg: &str) -> String {
    let arg = arg.replace('%', "%%");
    if !arg.contains(EXEC_RESERVED) {
        return arg;
    }
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for ch in arg.chars() {
        if matches!(ch, '"' | '`' | '$' | '\\') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// Escape a string value for a key file (`\`, newlines, tabs).
fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}
