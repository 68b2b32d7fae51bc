use std::time::Instant;

use anyhow::{Context, Result};
use colored::*;

use crate::cli::GenerateArgs;
use crate::config::{RunConfig, Settings, default_config_path};
use crate::generator;

pub fn handle_generate_command(args: GenerateArgs) -> Result<()> {
    let config_path = args.config.unwrap_or_else(default_config_path);
    if !config_path.exists() {
        anyhow::bail!(
            "Run file does not exist: {}\nCreate one with 'offerings-cli init-config --write'",
            config_path.display()
        );
    }

    println!("Using run file: {}", config_path.display().to_string().cyan());

    let mut config = RunConfig::from_file(&config_path)?;
    if let Some(source) = args.source {
        config.source_dir = Some(source);
    }
    if let Some(output) = args.output {
        config.output_dir = Some(output);
    }

    let settings = Settings::from_config(config).context("Invalid run configuration")?;

    println!(
        "Naming: {}  Kind: {}  Apps: {}",
        settings.convention.label().bright_blue(),
        settings.kind.as_str().bright_blue(),
        if settings.apps.is_empty() { "-".to_string() } else { settings.apps.join(", ") }
    );

    let start = Instant::now();
    let path = generator::run(&settings)?;

    println!(
        "{} {}",
        "Excel file exported to:".green().bold(),
        path.display()
    );
    println!("Total time: {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
