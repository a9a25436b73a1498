// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Error type shared by the launcher use cases.

use thiserror::Error;

/// Failures surfaced to the CLI and the launcher screen.
#[derive(Debug, Error)]
pub enum LauncherError {
    #[error("App not found: {0}")]
    AppNotFound(String),
    #[error("An app named '{0}' already exists")]
    DuplicateApp(String),
    /// A different name that maps to the same desktop entry and icon files.
    #[error("'{name}' would share files with the existing app '{existing}'; choose another name")]
    NameConflict { name: String, existing: String },
    #[error("{0}")]
    InvalidInput(String),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("Failed to launch app: {0}")]
    LaunchFailed(String),
    /// Registry, desktop entry, or settings I/O failed.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type Result<T, E = LauncherError> = std::result::Result<T, E>;
