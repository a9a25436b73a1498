// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Create/edit app modal in an MVU-friendly shape.

use std::path::PathBuf;

use eframe::egui;

use crate::models::App;
use crate::models::app::{validate_name, validate_url};
use crate::utils::icon_uri;

const NAME_FIELD: &str = "app_form_name";
const URL_FIELD: &str = "app_form_url";
const ICON_FIELD: &str = "app_form_icon";

/// Form state for the create/edit dialog, kept free of side effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppFormModel {
    pub name: String,
    pub url: String,
    /// Icon path as typed or picked; empty means no icon.
    pub icon: String,
    /// Validation or save error shown inside the dialog.
    pub error: Option<String>,
    /// Set while the submitted form is being saved.
    pub saving: bool,
}

impl AppFormModel {
    /// Prefill the form from an existing app.
    pub fn from_app(app: &App) -> Self {
        Self {
            name: app.name.clone(),
            url: app.url.clone(),
            icon: app.icon.clone().unwrap_or_default(),
            ..Default::default()
        }
    }
}

/// Messages emitted by the form view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppFormMsg {
    NameChanged(String),
    UrlChanged(String),
    IconChanged(String),
    ClearIcon,
    RequestPickIcon,
    IconPicked(Option<PathBuf>),
    Submit,
    Cancel,
}

/// Validated form content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppDraft {
    pub name: String,
    pub url: String,
    pub icon: Option<String>,
}

/// What the parent should do after a form message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppFormOutcome {
    PickIcon,
    Submit(AppDraft),
    Cancel,
}

/// Apply a message to the form. Returns an outcome the parent must act on.
pub fn update(model: &mut AppFormModel, msg: AppFormMsg) -> Option<AppFormOutcome> {
    match msg {
        AppFormMsg::NameChanged(text) => {
            model.name = text;
            model.error = None;
            None
        }
        AppFormMsg::UrlChanged(text) => {
            model.url = text;
            model.error = None;
            None
        }
        AppFormMsg::IconChanged(text) => {
            model.icon = text;
            None
        }
        AppFormMsg::ClearIcon => {
            model.icon.clear();
            None
        }
        AppFormMsg::RequestPickIcon => Some(AppFormOutcome::PickIcon),
        AppFormMsg::IconPicked(path) => {
            if let Some(path) = path {
                model.icon = path.to_string_lossy().into_owned();
            }
            None
        }
        AppFormMsg::Submit => {
            if model.saving {
                return None;
            }
            match validate(model) {
                Ok(draft) => {
                    model.error = None;
                    model.saving = true;
                    Some(AppFormOutcome::Submit(draft))
                }
                Err(err) => {
                    model.error = Some(err);
                    None
                }
            }
        }
        AppFormMsg::Cancel => Some(AppFormOutcome::Cancel),
    }
}

/// Validate the form into a draft ready for saving.
pub fn validate(model: &AppFormModel) -> Result<AppDraft, String> {
    let name = validate_name(&model.name)?;
    let url = validate_url(&model.url)?;
    let icon = model.icon.trim();
    Ok(AppDraft {
        name,
        url,
        icon: (!icon.is_empty()).then(|| icon.to_string()),
    })
}

/// Render the modal window and return messages triggered by user interaction.
pub fn view(ctx: &egui::Context, title: &str, model: &AppFormModel) -> Vec<AppFormMsg> {
    let mut msgs = Vec::new();
    let mut name = model.name.clone();
    let mut url = model.url.clone();
    let mut icon = model.icon.clone();

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            egui::Grid::new("app_form_grid")
                .num_columns(2)
                .spacing(egui::vec2(8.0, 10.0))
                .min_col_width(60.0)
                .show(ui, |ui| {
                    ui.label("Name");
                    let name_resp = ui.add(
                        egui::TextEdit::singleline(&mut name)
                            .id(egui::Id::new(NAME_FIELD))
                            .hint_text("e.g., Mail")
                            .desired_width(280.0),
                    );
                    if name_resp.changed() {
                        msgs.push(AppFormMsg::NameChanged(name.clone()));
                    }
                    if submitted_with_enter(ui, &name_resp) {
                        msgs.push(AppFormMsg::Submit);
                    }
                    ui.end_row();

                    ui.label("URL");
                    let url_resp = ui.add(
                        egui::TextEdit::singleline(&mut url)
                            .id(egui::Id::new(URL_FIELD))
                            .hint_text("https://")
                            .desired_width(280.0),
                    );
                    if url_resp.changed() {
                        msgs.push(AppFormMsg::UrlChanged(url.clone()));
                    }
                    if submitted_with_enter(ui, &url_resp) {
                        msgs.push(AppFormMsg::Submit);
                    }
                    ui.end_row();

                    ui.label("Icon");
                    ui.horizontal(|ui| {
                        let icon_resp = ui.add(
                            egui::TextEdit::singleline(&mut icon)
                                .id(egui::Id::new(ICON_FIELD))
                                .hint_text("Optional; fetched from the site if empty")
                                .desired_width(200.0),
                        );
                        if icon_resp.changed() {
                            msgs.push(AppFormMsg::IconChanged(icon.clone()));
                        }
                        if submitted_with_enter(ui, &icon_resp) {
                            msgs.push(AppFormMsg::Submit);
                        }
                        if ui
                            .button(egui_phosphor::regular::FOLDER_OPEN)
                            .on_hover_text("Browse…")
                            .clicked()
                        {
                            msgs.push(AppFormMsg::RequestPickIcon);
                        }
                        if ui
                            .add_enabled(
                                !model.icon.is_empty(),
                                egui::Button::new(egui_phosphor::regular::X),
                            )
                            .on_hover_text("Clear icon")
                            .clicked()
                        {
                            msgs.push(AppFormMsg::ClearIcon);
                        }
                    });
                    ui.end_row();
                });

            if let Some(uri) = icon_uri(&model.icon) {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("Preview")
                            .small()
                            .color(egui::Color32::from_gray(110)),
                    );
                    ui.add(egui::Image::new(uri).fit_to_exact_size(egui::vec2(32.0, 32.0)));
                });
            }

            if let Some(err) = &model.error {
                ui.add_space(6.0);
                ui.label(egui::RichText::new(err).color(egui::Color32::from_rgb(200, 40, 40)));
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let save = egui::Button::new(format!("{} Save", egui_phosphor::regular::CHECK));
                if ui.add_enabled(!model.saving, save).clicked() {
                    msgs.push(AppFormMsg::Submit);
                }
                if ui.button("Cancel").clicked() {
                    msgs.push(AppFormMsg::Cancel);
                }
                if model.saving {
                    ui.add(egui::Spinner::new().size(14.0));
                }
            });
        });

    msgs
}

/// A single-line edit loses focus on Enter; treat that as submitting the form.
fn submitted_with_enter(ui: &egui::Ui, response: &egui::Response) -> bool {
    response.lost_focus() && ui.input(|inp| inp.key_pressed(egui::Key::Enter))
}
