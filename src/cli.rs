// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 tarantula contributors

//! Command-line surface: manage the registry, launch apps, or open the launcher window.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::logic::config::{self, Config};
use crate::logic::{browser, install, run, uninstall, update};
use crate::models::UpdateOptions;
use crate::store::registry;

#[derive(Parser, Debug)]
#[command(
    name = "tarantula",
    version,
    about = "Use web apps like desktop apps",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// App name or URL to launch; opens the launcher window when omitted.
    #[arg(value_name = "NAME_OR_URL")]
    pub run_cmd: Vec<String>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register a web app and create its desktop entry.
    Install(InstallArgs),
    /// Remove a web app, its desktop entry and downloaded icon.
    Uninstall(NameArgs),
    /// List registered web apps.
    List,
    /// Change a web app's name, URL or icon.
    Update(UpdateArgs),
    /// Show or change settings.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct InstallArgs {
    pub name: String,
    pub url: String,

    /// Icon file to use instead of downloading the site's favicon.
    #[arg(short = 'i', long = "icon")]
    pub icon: Option<String>,
}

#[derive(Debug, Args)]
pub struct NameArgs {
    pub name: String,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub name: String,

    #[arg(short = 'n', long = "name")]
    pub new_name: Option<String>,

    #[arg(short = 'u', long = "url")]
    pub new_url: Option<String>,

    /// New icon path; pass an empty string to clear it.
    #[arg(short = 'i', long = "icon")]
    pub new_icon: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Browser executable used to open apps.
    #[arg(short = 'b', long = "browser")]
    pub browser_path: Option<String>,

    /// Download favicons for apps installed without an icon.
    #[arg(long = "fetch-icons", value_name = "BOOL")]
    pub fetch_icons: Option<bool>,
}

/// Execute the parsed command line.
pub fn run(cli: Cli, mut config: Config) -> Result<()> {
    match cli.command {
        Some(Commands::Install(args)) => {
            let app = install::install(&args.name, &args.url, args.icon.as_deref(), &config)?;
            println!("Web app installed: {}", app.name);
            if let Some(icon) = &app.icon {
                println!("Icon: {icon}");
            }
        }
        Some(Commands::Uninstall(args)) => {
            let app = uninstall::uninstall(&args.name, &config)?;
            println!("Web app uninstalled: {}", app.name);
        }
        Some(Commands::List) => {
            let apps = registry::get_apps(&config)?;
            if apps.is_empty() {
                println!("No web apps installed.");
            }
            for app in apps {
                println!("{} - {}", app.name, app.url);
            }
        }
        Some(Commands::Update(args)) => {
            let options = UpdateOptions {
                name: args.new_name,
                url: args.new_url,
                icon: args.new_icon,
            };
            if options.is_empty() {
                println!("Nothing to update; pass --name, --url or --icon.");
                return Ok(());
            }
            let app = update::update(&args.name, &options, &config)?;
            println!("App updated: {} - {}", app.name, app.url);
        }
        Some(Commands::Config(args)) => configure(args, &mut config)?,
        None if cli.run_cmd.is_empty() => {
            crate::app::run(config)
                .map_err(|e| anyhow::anyhow!("{e}"))
                .context("Failed to open launcher window")?;
        }
        None => {
            let target = cli.run_cmd.join(" ");
            let launched = run::run(&target, &config)?;
            println!("App launched: {}", launched.url());
        }
    }
    Ok(())
}

fn configure(args: ConfigArgs, config: &mut Config) -> Result<()> {
    let mut changed = false;
    if let Some(path) = &args.browser_path {
        config::update_browser_path(path, config)?;
        println!("Browser path updated!");
        changed = true;
    }
    if let Some(enabled) = args.fetch_icons {
        config::set_fetch_icons(enabled, config)?;
        println!("Favicon download {}.", if enabled { "enabled" } else { "disabled" });
        changed = true;
    }
    if changed {
        return Ok(());
    }

    let browser = match &config.browser_path {
        Some(path) => path.clone(),
        None => match browser::browser_path(config) {
            Some(path) => format!("{path} (detected)"),
            None => "(not found)".to_string(),
        },
    };
    println!("browser:     {browser}");
    println!("fetch icons: {}", config.fetch_icons);
    println!("data dir:    {}", config.app_data_path.display());
    println!("desktop dir: {}", config.desktop_data_path.display());
    Ok(())
}
