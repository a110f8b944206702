use super::prompts;
use crate::context;
use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use movie_search_config::{Config, CredentialStore, PathManager};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, output),
        crate::ConfigCommands::Keys { kinopoisk, tmdb, serpapi } => configure_keys(kinopoisk, tmdb, serpapi, output),
        crate::ConfigCommands::Sites { sites } => configure_sites(sites, output),
        crate::ConfigCommands::Init { force } => init_config(force, output),
    }
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    if !config_file.exists() {
        output.warn(format!(
            "Configuration file not found at {}, showing defaults. Run 'moviefinder config init' to create it.",
            config_file.display()
        ));
    }

    let config = context::load_config(&path_manager)?;
    let cred_store = context::load_credentials(&path_manager)?;
    let key_display = |provider: &str| match cred_store.api_key_for(provider) {
        Some(key) if full => key.clone(),
        Some(key) => mask_string(key),
        None => "<not set>".to_string(),
    };

    if !output.is_human() {
        output.json(&json!({
            "type": "config",
            "config_file": config_file.display().to_string(),
            "history_file": config.history_path(path_manager.history_file()).display().to_string(),
            "config": serde_json::to_value(&config)?,
            "api_keys": {
                "kinopoisk": key_display("kinopoisk"),
                "tmdb": key_display("tmdb"),
                "serpapi": key_display("serpapi"),
            },
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    println!("\n{}\n", "Configuration".bright_cyan().bold());

    let mut files_table = section_table("Files");
    files_table.add_row(vec![Cell::new("Config"), Cell::new(config_file.display().to_string())]);
    files_table.add_row(vec![
        Cell::new("Credentials"),
        Cell::new(path_manager.credentials_file().display().to_string()),
    ]);
    files_table.add_row(vec![
        Cell::new("History"),
        Cell::new(config.history_path(path_manager.history_file()).display().to_string()),
    ]);
    println!("{}\n", files_table);

    let mut providers_table = section_table("Catalogs");
    for (index, name) in config.resolution.provider_order.iter().enumerate() {
        providers_table.add_row(vec![
            Cell::new(format!("{}. {}", index + 1, name)),
            Cell::new(enabled_mark(config.is_provider_enabled(name))),
            Cell::new(key_display(name)),
        ]);
    }
    providers_table.add_row(vec![
        Cell::new("Request timeout"),
        Cell::new(format!("{}s", config.resolution.request_timeout_seconds)),
    ]);
    println!("{}\n", providers_table);

    let mut links_table = section_table("Watch links (SerpApi)");
    links_table.add_row(vec![Cell::new("Enabled"), Cell::new(enabled_mark(config.links.enabled))]);
    links_table.add_row(vec![Cell::new("API key"), Cell::new(key_display("serpapi"))]);
    links_table.add_row(vec![Cell::new("Sites"), Cell::new(config.links.sites.join(", "))]);
    println!("{}\n", links_table);

    if let Err(e) = config.validate() {
        output.warn(format!("Configuration is invalid: {}", e));
    }

    Ok(())
}

fn configure_keys(
    kinopoisk_arg: Option<String>,
    tmdb_arg: Option<String>,
    serpapi_arg: Option<String>,
    output: &Output,
) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;

    let credentials_file = path_manager.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    let any_given = kinopoisk_arg.is_some() || tmdb_arg.is_some() || serpapi_arg.is_some();
    if !any_given {
        print_section_header("API keys", output);
        output.info("Leave a key empty to keep the stored value.");
    }

    let mut updated = Vec::new();
    let slots = [
        ("Kinopoisk", kinopoisk_arg, "kinopoisk_api_key"),
        ("TMDB", tmdb_arg, "tmdb_api_key"),
        ("SerpApi", serpapi_arg, "serpapi_api_key"),
    ];
    for (label, arg, key) in slots {
        let value = match arg {
            Some(value) => value,
            None if any_given => continue,
            None => prompts::prompt_secret(&format!("{} API key", label))?,
        };
        let value = value.trim().to_string();
        if value.is_empty() {
            continue;
        }
        cred_store.set(key.to_string(), value);
        updated.push(label);
    }

    if updated.is_empty() {
        output.info("No keys changed");
        return Ok(());
    }

    cred_store
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials to {}: {}", credentials_file.display(), e))?;
    output.success(format!("Saved API keys: {}", updated.join(", ")));
    Ok(())
}

fn configure_sites(sites: Vec<String>, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let mut config = context::load_config(&path_manager)?;

    config.links.sites = sites.iter().map(|s| s.trim().to_string()).collect();
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid sites: {}", e))?;
    config
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Watch links will be looked up on: {}", config.links.sites.join(", ")));
    Ok(())
}

fn init_config(force: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;

    let config_file = path_manager.config_file();
    if config_file.exists() && !force {
        let overwrite = output.is_human()
            && prompts::prompt_yes_no(
                &format!("{} already exists. Overwrite with defaults?", config_file.display()),
                Some(false),
            )?;
        if !overwrite {
            output.info("Kept existing configuration");
            return Ok(());
        }
    }

    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
    output.success(format!("Wrote default configuration to {}", config_file.display()));
    output.info("Next: run 'moviefinder config keys' to store your API keys.");
    Ok(())
}

fn section_table(title: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![Cell::new(title)
        .fg(comfy_table::Color::Cyan)
        .add_attribute(comfy_table::Attribute::Bold)]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn enabled_mark(enabled: bool) -> String {
    if enabled {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}

fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

fn print_section_header(title: &str, output: &Output) {
    output.info("");
    output.info(format!("{}", title.bold().bright_cyan()));
    output.info(format!("{}", "─".repeat(title.len()).bright_cyan()));
}
