//! members-tui - A terminal dashboard for a members GraphQL API
//!
//! Reads configuration, sets up file logging, then runs the Component
//! Architecture event loop from ratatui. Without an endpoint and token it
//! runs against the built-in mock dataset.

mod action;
mod app;
mod component;
mod components;
mod config;
mod coordinator;
mod error;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::{CliOverrides, Config};
use crate::tui::Tui;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::Event;
use std::path::PathBuf;
use std::time::Duration;

/// Browse, search and filter members from a GraphQL endpoint
#[derive(Debug, Parser)]
#[command(name = "members-tui", version, about)]
struct Args {
    /// GraphQL endpoint URL
    #[arg(long)]
    url: Option<String>,

    /// Access token sent as a bearer token
    #[arg(long)]
    token: Option<String>,

    /// Use the built-in mock dataset
    #[arg(long)]
    mock: bool,

    /// Members per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Config file (default: ~/.members-tui/config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file (default: ~/.members-tui/members-tui.log)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Write the resolved settings to the config file and exit
    #[arg(long)]
    save_config: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            url: self.url.clone(),
            token: self.token.clone(),
            mock: self.mock,
            page_size: self.page_size,
            log_file: self.log_file.clone(),
        }
    }
}

/// Defaults, then the config file, then the environment, then flags
fn resolve_config(args: &Args) -> Result<Config> {
    resolve_config_with(args, |key| std::env::var(key).ok())
}

fn resolve_config_with(args: &Args, env: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let from_file = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(from_file
        .unwrap_or_default()
        .apply_env_from(env)
        .apply_cli_overrides(&args.overrides()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    if args.save_config {
        match &args.config {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
        println!("Configuration saved");
        return Ok(());
    }

    let log_path = config
        .log_file
        .clone()
        .unwrap_or_else(logging::default_log_path);
    if let Err(err) = logging::init(&log_path) {
        eprintln!("Logging disabled: {}", err);
    }

    let source = config.data_source();
    tracing::info!(
        mock = source.is_mock(),
        page_size = config.initial_page_size(),
        "starting members-tui"
    );

    // Create app state before touching the terminal so setup errors print cleanly
    let mut app = App::new(source, config.initial_page_size())
        .context("Failed to set up the members client")?;

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    let result = app.init().and_then(|_| run_app(&mut tui, &mut app));

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "exiting after error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    tracing::info!("members-tui exited");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::warn!(error = %e, "draw failed");
            }
        })?;

        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            // No event - poll background fetches
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_map_to_overrides() {
        let args = Args::try_parse_from([
            "members-tui",
            "--url",
            "https://api.example.com/graphql",
            "--token",
            "abc",
            "--page-size",
            "50",
        ])
        .unwrap();

        let overrides = args.overrides();
        assert_eq!(overrides.url.as_deref(), Some("https://api.example.com/graphql"));
        assert_eq!(overrides.token.as_deref(), Some("abc"));
        assert_eq!(overrides.page_size, Some(50));
        assert!(!overrides.mock);
    }

    #[test]
    fn test_mock_flag() {
        let args = Args::try_parse_from(["members-tui", "--mock"]).unwrap();
        assert!(args.overrides().mock);
    }

    #[test]
    fn test_rejects_non_numeric_page_size() {
        assert!(Args::try_parse_from(["members-tui", "--page-size", "lots"]).is_err());
    }

    #[test]
    fn test_resolve_config_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"page_size": 10, "mock_mode": true}"#).unwrap();

        let args = Args::try_parse_from([
            "members-tui",
            "--config",
            path.to_str().unwrap(),
            "--page-size",
            "50",
        ])
        .unwrap();
        let config = resolve_config_with(&args, |_| None).unwrap();

        assert_eq!(config.page_size, 50);
        assert!(config.mock_mode);
    }

    #[test]
    fn test_resolve_config_layers_env_between_file_and_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"graphql_url": "https://file.example.com/graphql", "mock_mode": true}"#,
        )
        .unwrap();

        let env = |key: &str| match key {
            "MEMBERS_GRAPHQL_URL" => Some("https://env.example.com/graphql".to_string()),
            "MEMBERS_MOCK_MODE" => Some("false".to_string()),
            _ => None,
        };
        let args = Args::try_parse_from(["members-tui", "--config", path.to_str().unwrap()])
            .unwrap();
        let config = resolve_config_with(&args, env).unwrap();
        assert_eq!(config.graphql_url.as_deref(), Some("https://env.example.com/graphql"));
        assert!(!config.mock_mode);

        let args = Args::try_parse_from([
            "members-tui",
            "--config",
            path.to_str().unwrap(),
            "--url",
            "https://cli.example.com/graphql",
        ])
        .unwrap();
        let config = resolve_config_with(&args, env).unwrap();
        assert_eq!(config.graphql_url.as_deref(), Some("https://cli.example.com/graphql"));
    }
}
