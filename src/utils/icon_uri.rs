// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Turn stored icon paths into URIs the egui image loaders can display.

use std::path::Path;

use url::Url;

/// Resolve an icon path to a displayable `file://` URI.
///
/// Only absolute local paths are converted; relative paths, blank values and
/// non-file URLs yield `None` so callers fall back to a placeholder glyph.
///
/// # Examples
///
/// ```rust,ignore
/// assert_eq!(
///     icon_uri("/home/me/.local/share/tarantula/mail.ico").as_deref(),
///     Some("file:///home/me/.local/share/tarantula/mail.ico"),
/// );
/// assert_eq!(icon_uri("icons/mail.ico"), None);
/// ```
pub fn icon_uri(icon: &str) -> Option<String> {
    let icon = icon.trim();
    if icon.is_empty() {
        return None;
    }
    if icon.starts_with("file://") {
        return Some(icon.to_string());
    }
    Url::from_file_path(Path::new(icon))
        .ok()
        .map(|url| url.to_string())
}
