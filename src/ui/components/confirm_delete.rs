// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Delete confirmation modal.

use eframe::egui;

/// Messages emitted by the confirmation dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmDeleteMsg {
    Confirm,
    Cancel,
}

/// Ask before removing `app_name`; `busy` disables the confirm button.
pub fn view(ctx: &egui::Context, app_name: &str, busy: bool) -> Vec<ConfirmDeleteMsg> {
    let mut msgs = Vec::new();

    egui::Window::new("Delete app")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(format!("Delete \"{app_name}\"?"));
            ui.label(
                egui::RichText::new("Its desktop entry and downloaded icon are removed too.")
                    .small()
                    .color(egui::Color32::from_gray(110)),
            );
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let delete = egui::Button::new(
                    egui::RichText::new(format!("{} Delete", egui_phosphor::regular::TRASH_SIMPLE))
                        .color(egui::Color32::from_rgb(200, 40, 40)),
                );
                if ui.add_enabled(!busy, delete).clicked() {
                    msgs.push(ConfirmDeleteMsg::Confirm);
                }
                if ui.button("Cancel").clicked() {
                    msgs.push(ConfirmDeleteMsg::Cancel);
                }
            });
        });

    msgs
}
