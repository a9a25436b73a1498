// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Use cases shared by the CLI and the launcher screen.
//!
//! Responsibilities:
//! - Validate user input and keep app names unique.
//! - Keep the registry, desktop entries and cached icons in sync.
//! - Resolve the browser and launch apps in app mode.

pub mod browser;
pub mod config;
pub mod error;
pub mod install;
pub mod run;
pub mod uninstall;
pub mod update;

pub use config::Config;
pub use error::LauncherError;
