//! `lbal rules` command

use anyhow::Result;

use super::{load_project_config, signal_request};
use crate::cli::RulesArgs;
use lbal::ops::{format_rules, identify};

pub fn execute(args: RulesArgs) -> Result<()> {
    let config = load_project_config()?;
    let request = signal_request(&args.source)?;

    let classification = identify(&request, &config)?;
    print!("{}", format_rules(&classification, args.filter.as_deref())?);

    Ok(())
}
