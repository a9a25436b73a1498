// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Persistence: the app registry, desktop entries and cached icons.

pub mod desktop;
pub mod icons;
pub mod registry;
