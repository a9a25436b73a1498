// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Launcher window bootstrap wiring egui/eframe to the launcher screen.

use eframe::egui;
use egui_phosphor::Variant;

use crate::logic::config::Config;
use crate::ui::LauncherApp;

/// Open the launcher window and run the egui event loop until it closes.
pub fn run(config: Config) -> eframe::Result<()> {
    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Tarantula")
            .with_app_id("tarantula")
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    tracing::info!(data = %config.app_data_path.display(), "opening launcher window");
    eframe::run_native(
        "Tarantula",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(LauncherApp::new(config)))
        }),
    )
}
