// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Shared helper utilities reused by UI, CLI and storage.

pub mod icon_uri;
pub mod sanitize_component;

/// Convert a stored icon path into a displayable `file://` URI.
pub use icon_uri::icon_uri;
/// Lowercase, filesystem-safe file stem for an app name.
pub use sanitize_component::slug;
