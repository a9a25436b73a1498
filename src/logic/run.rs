// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Launch a registered app (or an ad-hoc URL) in a browser app window.

use std::process::{Command, Stdio};

use crate::logic::browser;
use crate::logic::config::Config;
use crate::logic::error::{LauncherError, Result};
use crate::models::app::is_url;
use crate::store::registry;

/// How an app was opened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Launched {
    /// `<browser> --app=<url>` was spawned.
    AppWindow { browser: String, url: String },
    /// No browser could be determined; the URL went to the system opener.
    SystemOpener { url: String },
}

impl Launched {
    pub fn url(&self) -> &str {
        match self {
            Launched::AppWindow { url, .. } | Launched::SystemOpener { url } => url,
        }
    }
}

/// URL to open for `name_or_url`: a registered app's URL, or the argument itself when it is a URL.
pub fn resolve_target(name_or_url: &str, config: &Config) -> Result<String> {
    if let Some(app) = registry::get_app(name_or_url, config)? {
        return Ok(app.url);
    }
    if is_url(name_or_url) {
        return Ok(name_or_url.to_string());
    }
    Err(LauncherError::AppNotFound(name_or_url.to_string()))
}

/// Open `name_or_url` in app mode and return without waiting for the browser.
pub fn run(name_or_url: &str, config: &Config) -> Result<Launched> {
    let url = resolve_target(name_or_url, config)?;

    let Some(browser) = browser::browser_path(config) else {
        tracing::warn!(url = %url, "could not determine default browser; using system opener");
        open::that_detached(&url).map_err(|e| LauncherError::LaunchFailed(e.to_string()))?;
        return Ok(Launched::SystemOpener { url });
    };

    let mut child = Command::new(&browser)
        .arg(format!("--app={url}"))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| LauncherError::LaunchFailed(format!("{browser}: {e}")))?;
    tracing::info!(browser = %browser, url = %url, pid = child.id(), "app launched");
    // Reap the child on exit.
    std::thread::spawn(move || {
        let _ = child.wait();
    });

    Ok(Launched::AppWindow { browser, url })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::config::test_config;
    use crate::models::App;

    #[test]
    fn resolve_target_prefers_registered_app() {
        let (config, _dir) = test_config();
        registry::add_app(App::new("Mail", "https://mail.test", None), &config).unwrap();

        assert_eq!(resolve_target("mail", &config).unwrap(), "https://mail.test");
    }

    #[test]
    fn resolve_target_accepts_ad_hoc_urls() {
        let (config, _dir) = test_config();
        assert_eq!(
            resolve_target("https://example.com", &config).unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn resolve_target_rejects_unknown_names() {
        let (config, _dir) = test_config();
        let err = resolve_target("Unknown", &config).unwrap_err();
        assert!(matches!(err, LauncherError::AppNotFound(name) if name == "Unknown"));
    }

    #[test]
    fn run_reports_spawn_failure() {
        let (mut config, dir) = test_config();
        config.browser_path = Some(dir.path().join("no-such-browser").to_string_lossy().into());

        let err = run("https://example.com", &config).unwrap_err();

        assert!(matches!(err, LauncherError::LaunchFailed(_)));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn run_spawns_configured_browser() {
        let (mut config, _dir) = test_config();
        config.browser_path = Some("/bin/true".into());
        registry::add_app(App::new("Mail", "https://mail.test", None), &config).unwrap();

        let launched = run("Mail", &config).unwrap();

        assert_eq!(
            launched,
            Launched::AppWindow {
                browser: "/bin/true".into(),
                url: "https://mail.test".into()
            }
        );
    }
}
