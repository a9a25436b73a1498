// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Domain layer: pure data types and validation helpers shared between UI, CLI and storage.

pub mod app;

pub use app::{App, UpdateOptions};
