// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Card grid listing the registered apps.

use eframe::egui;

use crate::models::App;
use crate::utils::icon_uri;

const CARD_WIDTH: f32 = 210.0;
const ICON_SIZE: f32 = 48.0;

/// Messages emitted by the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppGridMsg {
    Create,
    Launch(usize),
    Edit(usize),
    Delete(usize),
}

/// Render one card per app in a responsive grid.
pub fn view(ui: &mut egui::Ui, apps: &[App]) -> Vec<AppGridMsg> {
    let mut msgs = Vec::new();

    if apps.is_empty() {
        render_empty_state(ui, &mut msgs);
        return msgs;
    }

    let spacing = 12.0;
    let cols = ((ui.available_width() + spacing) / (CARD_WIDTH + spacing))
        .floor()
        .max(1.0) as usize;

    egui::Grid::new("app_grid")
        .num_columns(cols)
        .spacing(egui::vec2(spacing, spacing))
        .show(ui, |ui| {
            for (index, app) in apps.iter().enumerate() {
                render_card(ui, index, app, &mut msgs);
                if (index + 1) % cols == 0 {
                    ui.end_row();
                }
            }
            if !apps.len().is_multiple_of(cols) {
                ui.end_row();
            }
        });

    msgs
}

fn render_empty_state(ui: &mut egui::Ui, msgs: &mut Vec<AppGridMsg>) {
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.label(
            egui::RichText::new("No apps yet.")
                .italics()
                .color(egui::Color32::from_gray(110)),
        );
        ui.add_space(8.0);
        if ui
            .button(format!("{} Add your first app", egui_phosphor::regular::PLUS))
            .clicked()
        {
            msgs.push(AppGridMsg::Create);
        }
    });
}

/// A single app card: icon, name, URL, and actions.
fn render_card(ui: &mut egui::Ui, index: usize, app: &App, msgs: &mut Vec<AppGridMsg>) {
    egui::Frame::group(ui.style())
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH - 20.0);
            ui.vertical_centered(|ui| {
                render_icon(ui, app);
                ui.add_space(4.0);
                ui.label(egui::RichText::new(&app.name).strong());
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(&app.url)
                            .small()
                            .color(egui::Color32::from_gray(110)),
                    )
                    .truncate(),
                )
                .on_hover_text(app.url.as_str());
                ui.add_space(6.0);

                ui.horizontal(|ui| {
                    if ui
                        .button(format!("{} Open", egui_phosphor::regular::ROCKET_LAUNCH))
                        .clicked()
                    {
                        msgs.push(AppGridMsg::Launch(index));
                    }
                    if ui
                        .button(egui_phosphor::regular::PENCIL_SIMPLE)
                        .on_hover_text("Edit app")
                        .clicked()
                    {
                        msgs.push(AppGridMsg::Edit(index));
                    }
                    if ui
                        .button(
                            egui::RichText::new(egui_phosphor::regular::TRASH_SIMPLE)
                                .color(egui::Color32::from_gray(140)),
                        )
                        .on_hover_text("Delete app")
                        .clicked()
                    {
                        msgs.push(AppGridMsg::Delete(index));
                    }
                });
            });
        });
}

fn render_icon(ui: &mut egui::Ui, app: &App) {
    match app.icon.as_deref().and_then(icon_uri) {
        Some(uri) => {
            ui.add(egui::Image::new(uri).fit_to_exact_size(egui::vec2(ICON_SIZE, ICON_SIZE)));
        }
        None => {
            ui.label(
                egui::RichText::new(egui_phosphor::regular::GLOBE)
                    .size(ICON_SIZE - 8.0)
                    .color(egui::Color32::from_gray(130)),
            );
        }
    }
}
