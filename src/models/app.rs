// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Web app domain model and input validation (UI-agnostic).

use serde::{Deserialize, Serialize};
use url::Url;

/// A registered web app as stored in the registry file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub name: String,
    pub url: String,
    /// Local icon path; `null` in the registry when absent.
    #[serde(default)]
    pub icon: Option<String>,
}

impl App {
    pub fn new(name: impl Into<String>, url: impl Into<String>, icon: Option<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            icon,
        }
    }

    /// Case-insensitive name comparison; names are unique under this rule.
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Partial update applied to an existing app. `None` keeps the stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOptions {
    pub name: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
}

impl UpdateOptions {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.url.is_none() && self.icon.is_none()
    }
}

/// Trim and validate an app name.
pub fn validate_name(name: &str) -> Result<String, String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Please enter a name.".into());
    }
    Ok(trimmed.to_string())
}

/// Trim and validate an app URL; only http/https URLs with a host are accepted.
pub fn validate_url(url: &str) -> Result<String, String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err("Please enter a URL.".into());
    }
    Url::parse(trimmed)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .map(|_| trimmed.to_string())
        .ok_or_else(|| format!("'{trimmed}' is not a valid http/https URL."))
}

/// Whether the argument looks like a URL that can be launched directly.
pub fn is_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
