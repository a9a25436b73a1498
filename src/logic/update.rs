// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Edit an installed web app.

use crate::logic::config::Config;
use crate::logic::error::{LauncherError, Result};
use crate::logic::install::ensure_available;
use crate::models::app::{validate_name, validate_url};
use crate::models::{App, UpdateOptions};
use crate::store::{desktop, icons, registry};

/// Apply `options` to the app named `name` and refresh its desktop entry.
///
/// An empty icon string clears the icon. Renaming onto a name that clashes with
/// another app is rejected; changing only the letter case is allowed. A
/// downloaded icon is moved along with a rename.
pub fn update(name: &str, options: &UpdateOptions, config: &Config) -> Result<App> {
    let current = registry::get_app(name, config)?
        .ok_or_else(|| LauncherError::AppNotFound(name.to_string()))?;
    let mut app = current.clone();

    if let Some(new_name) = options.name.as_deref() {
        let new_name = validate_name(new_name).map_err(LauncherError::InvalidInput)?;
        ensure_available(&new_name, Some(&current.name), config)?;
        app.name = new_name;
    }
    if let Some(url) = options.url.as_deref() {
        app.url = validate_url(url).map_err(LauncherError::InvalidInput)?;
    }
    if let Some(icon) = options.icon.as_deref() {
        let icon = icon.trim();
        app.icon = (!icon.is_empty()).then(|| icon.to_string());
    }

    if app == current {
        tracing::debug!(app = %app.name, "update left app unchanged");
        return Ok(app);
    }

    let mut moved = None;
    if app.name != current.name && app.icon == current.icon {
        let others: Vec<App> = registry::get_apps(config)?
            .into_iter()
            .filter(|a| !a.matches(&current.name))
            .collect();
        if let Some(path) = icons::rename_icon(&current, &app.name, &others, config)? {
            app.icon = Some(path.to_string_lossy().into_owned());
            moved = Some(path);
        }
    }

    if let Err(e) = registry::update_app(&current.name, &app, config) {
        if let (Some(to), Some(from)) = (&moved, icons::owned_icon(&current, config)) {
            if let Err(undo) = std::fs::rename(to, &from) {
                tracing::warn!(icon = %to.display(), error = %undo, "failed to move icon back");
            }
        }
        return Err(e.into());
    }
    desktop::update_entry(&current.name, &app, config)?;
    tracing::info!(from = %current.name, to = %app.name, "app updated");
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::config::test_config;
    use crate::logic::install::install;

    fn options(name: Option<&str>, url: Option<&str>, icon: Option<&str>) -> UpdateOptions {
        UpdateOptions {
            name: name.map(String::from),
            url: url.map(String::from),
            icon: icon.map(String::from),
        }
    }

    #[test]
    fn update_renames_and_moves_desktop_entry() {
        let (config, _dir) = test_config();
        install("Test App", "https://example.com", None, &config).unwrap();

        let app = update(
            "Test App",
            &options(Some("Test App new"), Some("https://example2.com"), None),
            &config,
        )
        .unwrap();

        assert_eq!(app.name, "Test App new");
        let apps = registry::get_apps(&config).unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].url, "https://example2.com");
        assert!(!config.desktop_data_path.join("test_app.desktop").exists());
        assert!(config.desktop_data_path.join("test_app_new.desktop").exists());
    }

    #[test]
    fn update_unknown_app_is_not_found() {
        let (config, _dir) = test_config();
        let err = update("Ghost", &options(Some("x"), None, None), &config).unwrap_err();
        assert!(matches!(err, LauncherError::AppNotFound(_)));
    }

    #[test]
    fn update_rejects_rename_onto_existing_app() {
        let (config, _dir) = test_config();
        install("One", "https://one.test", None, &config).unwrap();
        install("Two", "https://two.test", None, &config).unwrap();

        let err = update("One", &options(Some("two"), None, None), &config).unwrap_err();

        assert!(matches!(err, LauncherError::DuplicateApp(_)));
    }

    #[test]
    fn update_allows_case_only_rename() {
        let (config, _dir) = test_config();
        install("mail", "https://mail.test", None, &config).unwrap();

        let app = update("mail", &options(Some("Mail"), None, None), &config).unwrap();

        assert_eq!(app.name, "Mail");
        assert!(config.desktop_data_path.join("mail.desktop").exists());
    }

    #[test]
    fn update_sets_and_clears_icon() {
        let (config, _dir) = test_config();
        install("Mail", "https://mail.test", None, &config).unwrap();

        let app = update("Mail", &options(None, None, Some("/icons/mail.png")), &config).unwrap();
        assert_eq!(app.icon.as_deref(), Some("/icons/mail.png"));

        let app = update("Mail", &options(None, None, Some("")), &config).unwrap();
        assert_eq!(app.icon, None);
        assert_eq!(registry::get_app("Mail", &config).unwrap().unwrap().icon, None);
    }

    #[test]
    fn update_rejects_invalid_url() {
        let (config, _dir) = test_config();
        install("Mail", "https://mail.test", None, &config).unwrap();

        let err = update("Mail", &options(None, Some("mail"), None), &config).unwrap_err();

        assert!(matches!(err, LauncherError::InvalidInput(_)));
        assert_eq!(
            registry::get_app("Mail", &config).unwrap().unwrap().url,
            "https://mail.test"
        );
    }

    #[test]
    fn update_rejects_rename_sharing_a_file_stem() {
        let (config, _dir) = test_config();
        install("Test App", "https://example.com", None, &config).unwrap();
        install("Mail", "https://mail.test", None, &config).unwrap();

        let err = update("Mail", &options(Some("test_app"), None, None), &config).unwrap_err();

        assert!(matches!(err, LauncherError::NameConflict { .. }));
        assert!(config.desktop_data_path.join("mail.desktop").exists());
    }

    #[test]
    fn rename_moves_downloaded_icon_and_frees_old_stem() {
        let (config, _dir) = test_config();
        std::fs::create_dir_all(&config.app_data_path).unwrap();
        let old_icon = config.app_data_path.join("mail.ico");
        std::fs::write(&old_icon, b"ico").unwrap();
        install("Mail", "https://mail.test", old_icon.to_str(), &config).unwrap();

        let app = update("Mail", &options(Some("Webmail"), None, None), &config).unwrap();

        let new_icon = config.app_data_path.join("webmail.ico");
        assert_eq!(app.icon.as_deref(), new_icon.to_str());
        assert!(new_icon.exists());
        assert!(!old_icon.exists());
        let entry =
            std::fs::read_to_string(config.desktop_data_path.join("webmail.desktop")).unwrap();
        assert!(entry.contains(&format!("Icon={}\n", new_icon.display())));
    }
}
