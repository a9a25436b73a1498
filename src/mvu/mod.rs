// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Root Model-View-Update kernel of the launcher screen.

use crate::logic::config::Config;
use crate::logic::{install, run, uninstall, update as update_app};
use crate::models::{App, UpdateOptions};
use crate::store::registry;
use crate::ui::components::app_form::{self, AppFormModel, AppFormMsg, AppFormOutcome};
use crate::ui::components::app_grid::AppGridMsg;
use crate::ui::components::confirm_delete::ConfirmDeleteMsg;

/// Which modal dialog is open. Edit and delete target an app by name so a
/// reload that reorders or shrinks the list cannot retarget them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Dialog {
    #[default]
    None,
    Create,
    /// Editing the named app.
    Edit(String),
    /// Confirming deletion of the named app.
    Delete(String),
}

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    /// Registry snapshot shown as cards.
    pub apps: Vec<App>,
    /// Open modal, if any.
    pub dialog: Dialog,
    /// Create/edit form state.
    pub form: AppFormModel,
    /// Set while the registry is being (re)loaded.
    pub loading: bool,
    /// Set while a delete is in flight.
    pub deleting: bool,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

/// Application messages routed through the update function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    Refresh,
    AppsLoaded(Result<Vec<App>, String>),
    Grid(AppGridMsg),
    Form(AppFormMsg),
    ConfirmDelete(ConfirmDeleteMsg),
    LaunchCompleted(Result<String, String>),
    SaveCompleted(Result<String, String>),
    DeleteCompleted(Result<String, String>),
    DismissError,
}

/// Commands represent side-effects executed off the UI thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    LoadApps,
    RunApp(String),
    PickIcon,
    Install {
        name: String,
        url: String,
        icon: Option<String>,
    },
    Update {
        name: String,
        options: UpdateOptions,
    },
    Uninstall(String),
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::Refresh => {
            model.loading = true;
            cmds.push(Command::LoadApps);
        }
        Msg::AppsLoaded(result) => {
            model.loading = false;
            match result {
                Ok(apps) => {
                    model.apps = apps;
                    if !dialog_target_exists(model) {
                        close_dialog(model);
                    }
                }
                Err(err) => surface_event(model, format!("Failed to load apps:\n\n{err}"), true),
            }
        }
        Msg::Grid(m) => handle_grid(model, m, cmds),
        Msg::Form(m) => handle_form(model, m, cmds),
        Msg::ConfirmDelete(ConfirmDeleteMsg::Cancel) => close_dialog(model),
        Msg::ConfirmDelete(ConfirmDeleteMsg::Confirm) => {
            let Dialog::Delete(name) = &model.dialog else {
                return;
            };
            if model.deleting {
                return;
            }
            let name = name.clone();
            if find_app(model, &name).is_some() {
                model.deleting = true;
                cmds.push(Command::Uninstall(name));
            } else {
                close_dialog(model);
            }
        }
        Msg::LaunchCompleted(result) => match result {
            Ok(name) => surface_event(model, format!("Launched {name}"), false),
            Err(err) => surface_event(model, format!("Failed to launch app:\n\n{err}"), true),
        },
        Msg::SaveCompleted(result) => {
            model.form.saving = false;
            match result {
                Ok(message) => {
                    close_dialog(model);
                    surface_event(model, message, false);
                    reload(model, cmds);
                }
                Err(err) => {
                    tracing::error!(error = %err, "saving app failed");
                    if matches!(model.dialog, Dialog::Create | Dialog::Edit(_)) {
                        model.form.error = Some(err.clone());
                        model.status = Some(err);
                    } else {
                        surface_event(model, err, true);
                    }
                }
            }
        }
        Msg::DeleteCompleted(result) => {
            model.deleting = false;
            close_dialog(model);
            match result {
                Ok(name) => {
                    surface_event(model, format!("Deleted {name}"), false);
                    reload(model, cmds);
                }
                Err(err) => surface_event(model, format!("Failed to delete app:\n\n{err}"), true),
            }
        }
        Msg::DismissError => model.error = None,
    }
}

fn handle_grid(model: &mut AppModel, msg: AppGridMsg, cmds: &mut Vec<Command>) {
    match msg {
        AppGridMsg::Create => {
            model.form = AppFormModel::default();
            model.dialog = Dialog::Create;
        }
        AppGridMsg::Launch(index) => {
            if let Some(app) = model.apps.get(index) {
                model.status = Some(format!("Launching {}…", app.name));
                cmds.push(Command::RunApp(app.name.clone()));
            }
        }
        AppGridMsg::Edit(index) => {
            if let Some(app) = model.apps.get(index) {
                model.form = AppFormModel::from_app(app);
                model.dialog = Dialog::Edit(app.name.clone());
            }
        }
        AppGridMsg::Delete(index) => {
            if let Some(app) = model.apps.get(index) {
                model.dialog = Dialog::Delete(app.name.clone());
            }
        }
    }
}

fn handle_form(model: &mut AppModel, msg: AppFormMsg, cmds: &mut Vec<Command>) {
    let Some(outcome) = app_form::update(&mut model.form, msg) else {
        return;
    };
    match outcome {
        AppFormOutcome::PickIcon => cmds.push(Command::PickIcon),
        AppFormOutcome::Cancel => close_dialog(model),
        AppFormOutcome::Submit(draft) => match &model.dialog {
            Dialog::Create => cmds.push(Command::Install {
                name: draft.name,
                url: draft.url,
                icon: draft.icon,
            }),
            Dialog::Edit(name) => match find_app(model, name) {
                Some(app) => cmds.push(Command::Update {
                    name: app.name.clone(),
                    options: UpdateOptions {
                        name: Some(draft.name),
                        url: Some(draft.url),
                        icon: Some(draft.icon.unwrap_or_default()),
                    },
                }),
                None => close_dialog(model),
            },
            Dialog::None | Dialog::Delete(_) => model.form.saving = false,
        },
    }
}

/// Execute a command synchronously and return the resulting message.
pub fn run_command(cmd: Command, config: &Config) -> Msg {
    match cmd {
        Command::LoadApps => {
            Msg::AppsLoaded(registry::get_apps(config).map_err(|e| format!("{e:#}")))
        }
        Command::RunApp(name) => Msg::LaunchCompleted(
            run::run(&name, config)
                .map(|_| name)
                .map_err(|e| e.to_string()),
        ),
        Command::PickIcon => {
            let file = rfd::FileDialog::new()
                .set_title("Select app icon")
                .add_filter(
                    "Images",
                    &["png", "ico", "svg", "jpg", "jpeg", "gif", "webp", "bmp"],
                )
                .pick_file();
            Msg::Form(AppFormMsg::IconPicked(file))
        }
        Command::Install { name, url, icon } => Msg::SaveCompleted(
            install::install(&name, &url, icon.as_deref(), config)
                .map(|app| format!("Installed {}", app.name))
                .map_err(|e| e.to_string()),
        ),
        Command::Update { name, options } => Msg::SaveCompleted(
            update_app::update(&name, &options, config)
                .map(|app| format!("Saved {}", app.name))
                .map_err(|e| e.to_string()),
        ),
        Command::Uninstall(name) => Msg::DeleteCompleted(
            uninstall::uninstall(&name, config)
                .map(|app| app.name)
                .map_err(|e| e.to_string()),
        ),
    }
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        tracing::error!("{message}");
        model.error = Some(message.clone());
    }
    model.status = Some(message);
}

fn close_dialog(model: &mut AppModel) {
    model.dialog = Dialog::None;
    model.form = AppFormModel::default();
}

fn reload(model: &mut AppModel, cmds: &mut Vec<Command>) {
    model.loading = true;
    cmds.push(Command::LoadApps);
}

fn find_app<'a>(model: &'a AppModel, name: &str) -> Option<&'a App> {
    model.apps.iter().find(|app| app.name == name)
}

fn dialog_target_exists(model: &AppModel) -> bool {
    match &model.dialog {
        Dialog::Edit(name) | Dialog::Delete(name) => find_app(model, name).is_some(),
        Dialog::None | Dialog::Create => true,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::field_reassign_with_default)]

    use super::*;
    use crate::logic::config::test_config;

    fn apply(model: &mut AppModel, msg: Msg) -> Vec<Command> {
        let mut cmds = Vec::new();
        update(model, msg, &mut cmds);
        cmds
    }

    /// Run every command to completion, feeding results back like the UI workers do.
    fn drain(model: &mut AppModel, mut cmds: Vec<Command>, config: &Config) {
        while let Some(cmd) = cmds.pop() {
            let msg = run_command(cmd, config);
            cmds.extend(apply(model, msg));
        }
    }

    fn loaded(apps: &[(&str, &str)]) -> AppModel {
        let mut model = AppModel::default();
        let apps = apps
            .iter()
            .map(|(name, url)| App::new(*name, *url, None))
            .collect();
        apply(&mut model, Msg::AppsLoaded(Ok(apps)));
        model
    }

    #[test]
    fn refresh_enqueues_load_and_result_replaces_apps() {
        let (config, _dir) = test_config();
        install::install("Mail", "https://mail.test", None, &config).unwrap();
        let mut model = AppModel::default();

        let cmds = apply(&mut model, Msg::Refresh);
        assert_eq!(cmds, vec![Command::LoadApps]);
        assert!(model.loading);

        drain(&mut model, cmds, &config);

        assert!(!model.loading);
        assert_eq!(model.apps.len(), 1);
        assert_eq!(model.apps[0].name, "Mail");
    }

    #[test]
    fn load_failure_surfaces_error() {
        let mut model = AppModel::default();
        apply(&mut model, Msg::AppsLoaded(Err("corrupt".into())));
        assert!(model.error.as_deref().unwrap().contains("corrupt"));
    }

    #[test]
    fn create_flow_installs_and_reloads() {
        let (config, _dir) = test_config();
        let mut model = AppModel::default();

        apply(&mut model, Msg::Grid(AppGridMsg::Create));
        assert_eq!(model.dialog, Dialog::Create);
        apply(&mut model, Msg::Form(AppFormMsg::NameChanged("Mail".into())));
        apply(
            &mut model,
            Msg::Form(AppFormMsg::UrlChanged("https://mail.test".into())),
        );

        let cmds = apply(&mut model, Msg::Form(AppFormMsg::Submit));
        assert_eq!(
            cmds,
            vec![Command::Install {
                name: "Mail".into(),
                url: "https://mail.test".into(),
                icon: None,
            }]
        );

        drain(&mut model, cmds, &config);

        assert_eq!(model.dialog, Dialog::None);
        assert_eq!(model.status.as_deref(), Some("Installed Mail"));
        assert_eq!(model.apps.len(), 1);
        assert!(model.error.is_none());
    }

    #[test]
    fn invalid_form_does_not_enqueue_commands() {
        let mut model = AppModel::default();
        apply(&mut model, Msg::Grid(AppGridMsg::Create));
        apply(&mut model, Msg::Form(AppFormMsg::NameChanged("Mail".into())));

        let cmds = apply(&mut model, Msg::Form(AppFormMsg::Submit));

        assert!(cmds.is_empty());
        assert_eq!(model.dialog, Dialog::Create);
        assert!(model.form.error.is_some());
    }

    #[test]
    fn failed_save_keeps_dialog_open_with_error() {
        let (config, _dir) = test_config();
        install::install("Mail", "https://mail.test", None, &config).unwrap();
        let mut model = AppModel::default();
        apply(&mut model, Msg::Grid(AppGridMsg::Create));
        apply(&mut model, Msg::Form(AppFormMsg::NameChanged("mail".into())));
        apply(
            &mut model,
            Msg::Form(AppFormMsg::UrlChanged("https://other.test".into())),
        );

        let cmds = apply(&mut model, Msg::Form(AppFormMsg::Submit));
        drain(&mut model, cmds, &config);

        assert_eq!(model.dialog, Dialog::Create);
        assert!(model.form.error.as_deref().unwrap().contains("already exists"));
        assert!(!model.form.saving);
        assert!(model.error.is_none(), "form errors stay inside the dialog");
    }

    #[test]
    fn edit_flow_prefills_and_updates_by_original_name() {
        let (config, _dir) = test_config();
        install::install("Mail", "https://mail.test", None, &config).unwrap();
        let mut model = AppModel::default();
        drain(&mut model, vec![Command::LoadApps], &config);

        apply(&mut model, Msg::Grid(AppGridMsg::Edit(0)));
        assert_eq!(model.dialog, Dialog::Edit("Mail".into()));
        assert_eq!(model.form.url, "https://mail.test");

        apply(&mut model, Msg::Form(AppFormMsg::NameChanged("Webmail".into())));
        let cmds = apply(&mut model, Msg::Form(AppFormMsg::Submit));
        match &cmds[..] {
            [Command::Update { name, options }] => {
                assert_eq!(name, "Mail");
                assert_eq!(options.name.as_deref(), Some("Webmail"));
            }
            other => panic!("unexpected commands: {other:?}"),
        }

        drain(&mut model, cmds, &config);

        assert_eq!(model.dialog, Dialog::None);
        assert_eq!(model.apps[0].name, "Webmail");
    }

    #[test]
    fn delete_flow_requires_confirmation() {
        let (config, _dir) = test_config();
        install::install("Mail", "https://mail.test", None, &config).unwrap();
        let mut model = AppModel::default();
        drain(&mut model, vec![Command::LoadApps], &config);

        let cmds = apply(&mut model, Msg::Grid(AppGridMsg::Delete(0)));
        assert!(cmds.is_empty());
        assert_eq!(model.dialog, Dialog::Delete("Mail".into()));

        let cmds = apply(&mut model, Msg::ConfirmDelete(ConfirmDeleteMsg::Confirm));
        assert_eq!(cmds, vec![Command::Uninstall("Mail".into())]);
        assert!(model.deleting);

        drain(&mut model, cmds, &config);

        assert_eq!(model.dialog, Dialog::None);
        assert!(model.apps.is_empty());
        assert_eq!(model.status.as_deref(), Some("Deleted Mail"));
    }

    #[test]
    fn cancel_closes_dialogs_without_commands() {
        let mut model = loaded(&[("Mail", "https://mail.test")]);

        apply(&mut model, Msg::Grid(AppGridMsg::Delete(0)));
        let cmds = apply(&mut model, Msg::ConfirmDelete(ConfirmDeleteMsg::Cancel));
        assert!(cmds.is_empty());
        assert_eq!(model.dialog, Dialog::None);

        apply(&mut model, Msg::Grid(AppGridMsg::Edit(0)));
        let cmds = apply(&mut model, Msg::Form(AppFormMsg::Cancel));
        assert!(cmds.is_empty());
        assert_eq!(model.dialog, Dialog::None);
        assert_eq!(model.form, AppFormModel::default());
    }

    #[test]
    fn out_of_range_indices_are_ignored() {
        let mut model = loaded(&[("Mail", "https://mail.test")]);

        assert!(apply(&mut model, Msg::Grid(AppGridMsg::Launch(5))).is_empty());
        apply(&mut model, Msg::Grid(AppGridMsg::Edit(5)));
        apply(&mut model, Msg::Grid(AppGridMsg::Delete(5)));

        assert_eq!(model.dialog, Dialog::None);
    }

    #[test]
    fn launch_enqueues_run_and_reports_failure() {
        let mut model = loaded(&[("Mail", "https://mail.test")]);

        let cmds = apply(&mut model, Msg::Grid(AppGridMsg::Launch(0)));
        assert_eq!(cmds, vec![Command::RunApp("Mail".into())]);

        apply(
            &mut model,
            Msg::LaunchCompleted(Err("browser missing".into())),
        );
        assert!(model.error.as_deref().unwrap().contains("browser missing"));

        apply(&mut model, Msg::DismissError);
        assert!(model.error.is_none());
    }

    #[test]
    fn reload_closes_dialog_whose_app_disappeared() {
        let mut model = loaded(&[("Mail", "https://mail.test"), ("Chat", "https://chat.test")]);
        apply(&mut model, Msg::Grid(AppGridMsg::Edit(1)));

        apply(
            &mut model,
            Msg::AppsLoaded(Ok(vec![App::new("Mail", "https://mail.test", None)])),
        );

        assert_eq!(model.dialog, Dialog::None);
    }

    #[test]
    fn picked_icon_flows_back_into_form() {
        let mut model = loaded(&[]);
        apply(&mut model, Msg::Grid(AppGridMsg::Create));

        let cmds = apply(&mut model, Msg::Form(AppFormMsg::RequestPickIcon));
        assert_eq!(cmds, vec![Command::PickIcon]);

        apply(
            &mut model,
            Msg::Form(AppFormMsg::IconPicked(Some("/icons/a.png".into()))),
        );
        assert_eq!(model.form.icon, "/icons/a.png");
    }

    #[test]
    fn reload_that_shifts_apps_closes_stale_edit_dialog() {
        let (config, _dir) = test_config();
        for (name, url) in [("A", "https://a.test"), ("B", "https://b.test"), ("C", "https://c.test")] {
            install::install(name, url, None, &config).unwrap();
        }
        let mut model = AppModel::default();
        drain(&mut model, vec![Command::LoadApps], &config);
        apply(&mut model, Msg::Grid(AppGridMsg::Edit(1)));
        assert_eq!(model.dialog, Dialog::Edit("B".into()));

        uninstall::uninstall("B", &config).unwrap();
        let cmds = apply(&mut model, Msg::Refresh);
        drain(&mut model, cmds, &config);

        assert_eq!(model.dialog, Dialog::None);
        assert!(apply(&mut model, Msg::Form(AppFormMsg::Submit)).is_empty());
        let urls: Vec<_> = registry::get_apps(&config)
            .unwrap()
            .into_iter()
            .map(|a| a.url)
            .collect();
        assert_eq!(urls, vec!["https://a.test", "https://c.test"]);
    }

    #[test]
    fn delete_dialog_follows_its_app_across_reorder() {
        let mut model = loaded(&[("A", "https://a.test"), ("B", "https://b.test")]);
        apply(&mut model, Msg::Grid(AppGridMsg::Delete(1)));

        apply(
            &mut model,
            Msg::AppsLoaded(Ok(vec![
                App::new("B", "https://b.test", None),
                App::new("A", "https://a.test", None),
            ])),
        );

        let cmds = apply(&mut model, Msg::ConfirmDelete(ConfirmDeleteMsg::Confirm));
        assert_eq!(cmds, vec![Command::Uninstall("B".into())]);
    }
}
