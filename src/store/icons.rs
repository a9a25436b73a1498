// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Favicon discovery and local icon cache.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use url::Url;

use crate::logic::config::Config;
use crate::models::App;
use crate::utils::slug;

/// Well-known favicon locations, tried in order against the app's host.
const FAVICON_CANDIDATES: &[&str] = &[
    "favicon.ico",
    "assets/favicon.ico",
    "assets/favicon.png",
    "images/favicon.ico",
    "images/favicon.png",
];

/// Upper bound for a downloaded icon.
const MAX_ICON_BYTES: u64 = 1024 * 1024;

/// Something that can fetch raw bytes for a URL.
pub trait IconSource {
    /// Return the body for `url`, or `None` when it is unavailable.
    fn fetch(&self, url: &str) -> Option<Vec<u8>>;
}

/// Fetches icons over HTTP(S).
pub struct HttpIconSource {
    agent: ureq::Agent,
}

impl Default for HttpIconSource {
    fn default() -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(5))
                .build(),
        }
    }
}

impl IconSource for HttpIconSource {
    fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        let response = match self.agent.get(url).call() {
            Ok(resp) => resp,
            Err(e) => {
                tracing::debug!(url, error = %e, "icon candidate unavailable");
                return None;
            }
        };
        read_limited(response.into_reader(), url)
    }
}

/// Read at most [`MAX_ICON_BYTES`]; a larger body is treated as unavailable.
fn read_limited(reader: impl Read, url: &str) -> Option<Vec<u8>> {
    let mut bytes = Vec::new();
    if let Err(e) = reader.take(MAX_ICON_BYTES + 1).read_to_end(&mut bytes) {
        tracing::warn!(url, error = %e, "failed to read icon body");
        return None;
    }
    if bytes.len() as u64 > MAX_ICON_BYTES {
        tracing::warn!(url, limit = MAX_ICON_BYTES, "icon body too large; skipped");
        return None;
    }
    Some(bytes)
}

/// Download the first available favicon for `app` and store it next to the registry.
///
/// Returns the stored path, or `None` when no candidate yielded data.
///
/// # Errors
///
/// Fails when the app URL has no host or the icon cannot be written.
pub fn store_icon(app: &App, config: &Config, source: &dyn IconSource) -> Result<Option<PathBuf>> {
    let url = Url::parse(&app.url).with_context(|| format!("Invalid app URL: {}", app.url))?;
    let host = url
        .host_str()
        .ok_or_else(|| anyhow!("App URL has no host: {}", app.url))?;

    for candidate in FAVICON_CANDIDATES {
        let candidate_url = format!("https://{host}/{candidate}");
        let Some(bytes) = source.fetch(&candidate_url).filter(|b| !b.is_empty()) else {
            continue;
        };

        let ext = Path::new(candidate)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("ico");
        fs::create_dir_all(&config.app_data_path).with_context(|| {
            format!(
                "Failed to create data directory: {:?}",
                config.app_data_path
            )
        })?;
        let path = icon_path(&app.name, ext, config);
        fs::write(&path, &bytes).with_context(|| format!("Failed to write icon: {:?}", path))?;
        tracing::info!(app = %app.name, source = %candidate_url, "icon stored");
        return Ok(Some(path));
    }

    tracing::info!(app = %app.name, host, "no favicon found");
    Ok(None)
}

/// Where [`store_icon`] puts an icon with extension `ext` for `app_name`.
pub fn icon_path(app_name: &str, ext: &str, config: &Config) -> PathBuf {
    config
        .app_data_path
        .join(format!("{}.{ext}", slug(app_name)))
}

/// The app's icon if it is the file [`store_icon`] downloads for this app's name.
pub fn owned_icon(app: &App, config: &Config) -> Option<PathBuf> {
    let icon = Path::new(app.icon.as_deref()?);
    FAVICON_CANDIDATES
        .iter()
        .filter_map(|c| Path::new(*c).extension()?.to_str())
        .map(|ext| icon_path(&app.name, ext, config))
        .find(|path| path == icon)
}

fn shared_with(path: &Path, others: &[App]) -> Option<String> {
    others
        .iter()
        .find(|o| o.icon.as_deref().is_some_and(|i| Path::new(i) == path))
        .map(|o| o.name.clone())
}

/// Move a downloaded icon so it follows a rename of `app` to `new_name`.
///
/// Returns the new path, or `None` when the icon was left where it is
/// (user-picked, missing, shared with one of `others`, or already in place).
pub fn rename_icon(
    app: &App,
    new_name: &str,
    others: &[App],
    config: &Config,
) -> Result<Option<PathBuf>> {
    let Some(from) = owned_icon(app, config).filter(|p| p.is_file()) else {
        return Ok(None);
    };
    if let Some(other) = shared_with(&from, others) {
        tracing::debug!(icon = %from.display(), app = %other, "icon shared; not moved");
        return Ok(None);
    }
    let ext = from.extension().and_then(|e| e.to_str()).unwrap_or("ico");
    let to = icon_path(new_name, ext, config);
    if to == from {
        return Ok(None);
    }
    fs::rename(&from, &to)
        .with_context(|| format!("Failed to move icon {:?} to {:?}", from, to))?;
    tracing::debug!(from = %from.display(), to = %to.display(), "icon moved");
    Ok(Some(to))
}

/// Delete the icon downloaded for `app`.
///
/// User-picked icons and icons still referenced by one of `others` are left alone.
pub fn remove_icon(app: &App, others: &[App], config: &Config) -> Result<()> {
    let Some(path) = owned_icon(app, config) else {
        return Ok(());
    };
    if let Some(other) = shared_with(&path, others) {
        tracing::debug!(icon = %path.display(), app = %other, "icon still in use; kept");
        return Ok(());
    }
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove icon: {:?}", path)),
    }
}

#[cfg(test)]
pub mod fake {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::IconSource;

    /// In-memory icon source recording every requested URL.
    #[derive(Default)]
    pub struct FakeIconSource {
        pub responses: HashMap<String, Vec<u8>>,
        pub requested: RefCell<Vec<String>>,
    }

    impl FakeIconSource {
        pub fn with(url: &str, bytes: &[u8]) -> Self {
            let mut source = Self::default();
            source.responses.insert(url.to_string(), bytes.to_vec());
            source
        }
    }

    impl IconSource for FakeIconSource {
        fn fetch(&self, url: &str) -> Option<Vec<u8>> {
            self.requested.borrow_mut().push(url.to_string());
            self.responses.get(url).cloned()
        }
    }
}
