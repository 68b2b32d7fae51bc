use anyhow::Result;

use crate::cli::CommitmentArgs;
use crate::commitments::{OlaPolicy, commit_block, update_commitments};

pub fn render_commitments(args: &CommitmentArgs) -> String {
    let country = args.country.trim().to_uppercase();
    match &args.update {
        Some(orig) => update_commitments(
            orig,
            &args.schedule,
            &args.rsp,
            &args.rsl,
            args.kind,
            &country,
            &OlaPolicy::Preserve,
        ),
        None => commit_block(&country, &args.schedule, &args.rsp, &args.rsl, args.kind),
    }
}

pub fn handle_commitments_command(args: CommitmentArgs) -> Result<()> {
    if args.schedule.trim().is_empty() {
        anyhow::bail!("Schedule must not be empty");
    }
    println!("{}", render_commitments(&args));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::ServiceKind;

    #[test]
    fn test_render_fresh_and_update() {
        let mut args = CommitmentArgs {
            country: "pl".to_string(),
            kind: ServiceKind::Im,
            schedule: "24/7".to_string(),
            rsp: "1h".to_string(),
            rsl: "8h".to_string(),
            update: None,
        };
        assert_eq!(
            render_commitments(&args),
            "[PL] SLA IM RSP 24/7 P1-P4 1h\n[PL] SLA IM RSL 24/7 P1-P4 8h"
        );

        args.update = Some("[PL] SLA IM RSP Mon-Fri 9-17 P1 2h".to_string());
        assert_eq!(render_commitments(&args), "[PL] SLA IM RSP 24/7 P1 1h");
    }
}
