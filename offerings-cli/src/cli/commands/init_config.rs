use std::fs;

use anyhow::{Context, Result};
use colored::*;

use crate::cli::InitConfigArgs;
use crate::config::{TEMPLATE, default_config_path};

pub fn handle_init_config_command(args: InitConfigArgs) -> Result<()> {
    if !args.write {
        print!("{}", TEMPLATE);
        return Ok(());
    }

    let path = default_config_path();
    if path.exists() && !args.force {
        anyhow::bail!(
            "Run file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }
    fs::write(&path, TEMPLATE).with_context(|| format!("Failed to write run file: {}", path.display()))?;

    println!("{} {}", "Run file written to:".green(), path.display());
    Ok(())
}
