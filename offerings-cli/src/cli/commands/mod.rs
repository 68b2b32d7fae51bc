pub mod commitments;
pub mod generate;
pub mod init_config;
pub mod name;

use anyhow::Result;

use super::{Cli, Commands};

/// Dispatch a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Generate(args) => generate::handle_generate_command(args),
        Commands::Name(args) => name::handle_name_command(args),
        Commands::Commitments(args) => commitments::handle_commitments_command(args),
        Commands::InitConfig(args) => init_config::handle_init_config_command(args),
    }
}
