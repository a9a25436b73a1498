// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Top-level egui application shell for the launcher screen.
//! Handles layout, modal dialogs, and dispatching commands to worker threads.

pub mod components;

use std::time::Duration;

use eframe::egui;

use crate::logic::config::Config;
use crate::mvu::{self, AppModel, Command, Dialog, Msg};
use crate::ui::components::{app_form, app_grid, confirm_delete};

/// Stateful egui application listing web apps as launchable cards.
pub struct LauncherApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl LauncherApp {
    /// Spawn the command workers and request the initial registry load.
    pub fn new(config: Config) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().max(2))
            .unwrap_or(2);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let config = config.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd, &config);
                    let _ = msg_tx.send(msg);
                }
            });
        }
        tracing::debug!(threads, "command workers started");

        Self {
            model: AppModel::default(),
            inbox: vec![Msg::Refresh],
            cmd_tx,
            msg_rx,
        }
    }

    /// Apply queued messages to the model and hand resulting commands to the workers.
    fn process_inbox(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        for msg in std::mem::take(&mut self.inbox) {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
        }
    }
}

impl eframe::App for LauncherApp {
    /// Drives a single frame: drains worker results, updates the model, then
    /// renders the top bar, card grid, open dialog, and status bar.
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        self.process_inbox();
        let ctx = ui.ctx().clone();

        egui::Panel::top("top_bar").show_inside(ui, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Web apps");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::widgets::global_theme_preference_switch(ui);
                    ui.separator();
                    self.render_toolbar(ui);
                });
            });
            ui.add_space(4.0);
        });

        egui::Panel::bottom("status_panel")
            .resizable(false)
            .show_inside(ui, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            ui.add_space(8.0);
            if self.model.loading && self.model.apps.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(48.0);
                    ui.add(egui::Spinner::new().size(24.0));
                });
                return;
            }
            egui::ScrollArea::vertical().show(ui, |ui| {
                let grid_msgs = app_grid::view(ui, &self.model.apps);
                self.inbox.extend(grid_msgs.into_iter().map(Msg::Grid));
            });
        });

        self.render_dialog(&ctx);
        self.render_error_modal(&ctx);

        // Worker results arrive off-frame; keep polling while any are outstanding.
        if self.model.pending_commands > 0 || !self.inbox.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}

impl LauncherApp {
    fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        if ui
            .add_enabled(
                !self.model.loading,
                egui::Button::new(egui_phosphor::regular::ARROW_CLOCKWISE),
            )
            .on_hover_text("Reload apps")
            .clicked()
        {
            self.inbox.push(Msg::Refresh);
        }
        if ui
            .button(format!("{} New app", egui_phosphor::regular::PLUS))
            .clicked()
        {
            self.inbox
                .push(Msg::Grid(app_grid::AppGridMsg::Create));
        }
    }

    /// Render whichever modal the model says is open.
    fn render_dialog(&mut self, ctx: &egui::Context) {
        match &self.model.dialog {
            Dialog::None => {}
            Dialog::Create => {
                let msgs = app_form::view(ctx, "New app", &self.model.form);
                self.inbox.extend(msgs.into_iter().map(Msg::Form));
            }
            Dialog::Edit(_) => {
                let msgs = app_form::view(ctx, "Edit app", &self.model.form);
                self.inbox.extend(msgs.into_iter().map(Msg::Form));
            }
            Dialog::Delete(name) => {
                let msgs = confirm_delete::view(ctx, name, self.model.deleting);
                self.inbox.extend(msgs.into_iter().map(Msg::ConfirmDelete));
            }
        }
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    /// Render latest status message with a spinner while commands run.
    fn render_status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let text = self.model.status.as_deref().unwrap_or("Ready");
            ui.label(egui::RichText::new(text).color(egui::Color32::from_gray(68)));
            if self.model.pending_commands > 0 {
                ui.add(egui::Spinner::new().size(14.0))
                    .on_hover_text(format!(
                        "{} task(s) running in background",
                        self.model.pending_commands
                    ));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!("{} app(s)", self.model.apps.len()))
                        .small()
                        .color(egui::Color32::from_gray(110)),
                );
            });
        });
    }
}
