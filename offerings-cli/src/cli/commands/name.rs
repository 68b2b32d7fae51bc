use anyhow::Result;
use colored::*;

use crate::cli::NameArgs;
use crate::naming::{CountryTable, NameBuilder, NameRequest};

/// Name for the given arguments with the default country table
pub fn preview_name(args: &NameArgs) -> String {
    let countries = CountryTable::default();
    let builder = NameBuilder::new(args.convention, &countries).with_prod(!args.no_prod);
    let req = NameRequest::new(&args.parent, args.kind, &args.schedule)
        .with_app(args.app.as_deref())
        .with_receiver(&args.receiver)
        .with_delivering(&args.delivering);

    match &args.lvl2 {
        Some(service_type) => builder.build_lvl2(&req, service_type),
        None => builder.build(&req),
    }
}

pub fn handle_name_command(args: NameArgs) -> Result<()> {
    if args.parent.trim().is_empty() {
        anyhow::bail!("Parent offering must not be empty");
    }

    log::debug!("Building name with {} convention", args.convention.label());
    println!("{}", preview_name(&args).bright_green());
    Ok(())
}
