use crate::context::Settings;
use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use watchlist_config::Config;

pub fn run_config(cmd: ConfigCommands, settings: &Settings, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(settings, output),
        ConfigCommands::Init { api_url, force } => init_config(settings, api_url, force, output),
    }
}

fn show_config(settings: &Settings, output: &Output) -> Result<()> {
    let config = &settings.config;

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            if !settings.file_exists {
                output.warn(format!(
                    "Configuration file not found at: {}",
                    settings.config_file.display()
                ));
                output.info("Showing defaults. Run 'mediawatchlist config init' to write a file.");
                println!();
            }

            let mut info_table = Table::new();
            info_table.set_header(vec![
                Cell::new("Config File").add_attribute(Attribute::Bold),
                Cell::new(settings.config_file.display().to_string()),
            ]);
            info_table.load_preset(comfy_table::presets::UTF8_FULL);
            info_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", info_table);
            println!();

            let mut server_table = section("Server");
            server_table.add_row(vec![Cell::new("Base URL"), Cell::new(config.base_url())]);
            server_table.add_row(vec![
                Cell::new("Timeout"),
                Cell::new(
                    config
                        .server
                        .timeout_seconds
                        .map(|s| format!("{} seconds", s))
                        .unwrap_or_else(|| "none".to_string()),
                ),
            ]);
            server_table.add_row(vec![Cell::new("User Agent"), Cell::new(&config.server.user_agent)]);
            println!("{}", server_table);
            println!();

            let mut query_table = section("Queries");
            query_table.add_row(vec![
                Cell::new("Discard Stale Responses"),
                Cell::new(check_mark(config.query.discard_stale_responses)),
            ]);
            println!("{}", query_table);
            println!();

            let mut logging_table = section("Logging");
            logging_table.add_row(vec![Cell::new("Level"), Cell::new(&config.logging.level)]);
            let json_display = match config.logging.json {
                Some(enabled) => check_mark(enabled),
                None => "auto (when not a terminal)".bright_black().to_string(),
            };
            logging_table.add_row(vec![Cell::new("JSON"), Cell::new(json_display)]);
            logging_table.add_row(vec![
                Cell::new("File"),
                Cell::new(
                    config
                        .logging
                        .file
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "none".bright_black().to_string()),
                ),
            ]);
            logging_table.add_row(vec![
                Cell::new("Log Directory"),
                Cell::new(settings.paths.log_dir().display().to_string()),
            ]);
            println!("{}", logging_table);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": settings.config_file.display().to_string(),
                "file_exists": settings.file_exists,
                "server": {
                    "base_url": config.base_url(),
                    "timeout_seconds": config.server.timeout_seconds,
                    "user_agent": config.server.user_agent,
                },
                "query": {
                    "discard_stale_responses": config.query.discard_stale_responses,
                },
                "logging": {
                    "level": config.logging.level,
                    "json": config.logging.json,
                    "file": config.logging.file.as_ref().map(|p| p.display().to_string()),
                    "log_dir": settings.paths.log_dir().display().to_string(),
                },
            }));
        }
    }

    Ok(())
}

fn init_config(settings: &Settings, api_url: Option<String>, force: bool, output: &Output) -> Result<()> {
    if settings.file_exists && !force {
        return Err(eyre!(
            "Configuration file already exists at {}. Use --force to overwrite it.",
            settings.config_file.display()
        ));
    }

    let mut config = Config::default();
    if let Some(url) = api_url {
        config.server.base_url = url;
    }
    config
        .validate()
        .map_err(|e| eyre!("Configuration validation failed: {}", e))?;

    settings
        .paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create {}: {}", settings.paths.config_dir().display(), e))?;
    config
        .save_to_file(&settings.config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", settings.config_file.display(), e))?;

    tracing::info!(path = %settings.config_file.display(), base_url = config.base_url(), "Wrote configuration");
    output.success(format!("Configuration written to {}", settings.config_file.display()));
    Ok(())
}

fn section(title: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold)]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn check_mark(enabled: bool) -> String {
    if enabled {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}
