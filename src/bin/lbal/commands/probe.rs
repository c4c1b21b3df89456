//! `lbal probe` command

use anyhow::Result;

use super::{compiler_request, load_project_config};
use crate::cli::ProbeArgs;
use lbal::ops::probe_to;

pub fn execute(args: ProbeArgs) -> Result<()> {
    let config = load_project_config()?;
    let request = compiler_request(&args.compiler)?;

    let outcome = probe_to(&request, &config, args.output.as_deref())?;

    match args.output {
        Some(path) if outcome.written => {
            eprintln!("Recorded {} macros to {}", outcome.count, path.display());
        }
        Some(path) => {
            eprintln!("{} is up to date ({} macros)", path.display(), outcome.count);
        }
        None => print!("{}", outcome.dump),
    }

    Ok(())
}
