// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Reusable egui components structured for MVU-style updates.

pub mod app_form;
pub mod app_grid;
pub mod confirm_delete;
