// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Locate the browser executable used to open apps in app mode.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::logic::config::Config;

/// System directories searched for the default browser's desktop file.
const SYSTEM_APP_DIRS: &[&str] = &["/usr/share/applications", "/etc/xdg/autostart"];
/// Directories searched for an executable named after the browser id.
const BIN_DIRS: &[&str] = &["/usr/bin", "/usr/local/bin", "/snap/bin"];

/// Browser to launch: the configured path, else the detected default browser.
pub fn browser_path(config: &Config) -> Option<String> {
    if let Some(path) = config.browser_path.as_deref().filter(|p| !p.trim().is_empty()) {
        return Some(path.to_string());
    }

    let desktop_id = default_browser_id()?;
    let mut app_dirs: Vec<PathBuf> = Vec::new();
    if let Some(user_dir) = dirs::data_dir() {
        app_dirs.push(user_dir.join("applications"));
    }
    app_dirs.extend(SYSTEM_APP_DIRS.iter().map(PathBuf::from));
    let bin_dirs: Vec<PathBuf> = BIN_DIRS.iter().map(PathBuf::from).collect();

    let found = resolve_browser(&desktop_id, &app_dirs, &bin_dirs);
    match &found {
        Some(path) => tracing::debug!(desktop_id = %desktop_id, browser = %path, "default browser resolved"),
        None => tracing::debug!(desktop_id = %desktop_id, "default browser not resolvable"),
    }
    found
}

/// Ask `xdg-settings` for the default browser's desktop id (e.g. `firefox.desktop`).
pub fn default_browser_id() -> Option<String> {
    let output = Command::new("xdg-settings")
        .args(["get", "default-web-browser"])
        .output();
    match output {
        Ok(out) if out.status.success() => {
            let id = String::from_utf8_lossy(&out.stdout).trim().to_string();
            (!id.is_empty()).then_some(id)
        }
        Ok(out) => {
            tracing::debug!(status = %out.status, "xdg-settings reported no default browser");
            None
        }
        Err(e) => {
            tracing::debug!(error = %e, "xdg-settings unavailable");
            None
        }
    }
}

/// Resolve a desktop id to an executable.
///
/// The desktop file's `Exec` wins; otherwise an executable named after the id
/// (without `.desktop`) is looked up in `bin_dirs`.
pub fn resolve_browser(desktop_id: &str, app_dirs: &[PathBuf], bin_dirs: &[PathBuf]) -> Option<String> {
    for dir in app_dirs {
        let desktop_file = dir.join(desktop_id);
        if let Some(exec) = std::fs::read_to_string(&desktop_file)
            .ok()
            .and_then(|content| exec_from_desktop(&content))
        {
            return Some(exec);
        }
    }

    let bin_name = desktop_id.strip_suffix(".desktop").unwrap_or(desktop_id);
    bin_dirs
        .iter()
        .map(|dir| dir.join(bin_name))
        .find(|candidate| is_file(candidate))
        .map(|candidate| candidate.to_string_lossy().into_owned())
}

/// Program of the first `Exec=` line, with `%` field codes stripped.
pub fn exec_from_desktop(content: &str) -> Option<String> {
    let exec_line = content
        .lines()
        .find_map(|line| line.trim_start().strip_prefix("Exec="))?;
    let program = exec_line.split_whitespace().next()?;
    let program = program.split('%').next().unwrap_or(program);
    (!program.is_empty()).then(|| program.to_string())
}

fn is_file(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}
