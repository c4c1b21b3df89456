//! `lbal resolve` command

use anyhow::{anyhow, Context, Result};

use super::{load_project_config, signal_request};
use crate::cli::ResolveArgs;
use lbal::core::OverrideSet;
use lbal::ops::{render, resolve_environment, OutputFormat};
use lbal::util::diagnostic::{self, suggestions};
use lbal::util::fs::write_if_changed;

pub fn execute(args: ResolveArgs, color: bool) -> Result<()> {
    let config = load_project_config()?;

    let mut overrides = OverrideSet::new();
    for arg in &args.overrides {
        let (name, value) = OverrideSet::parse_assignment(arg)
            .map_err(|e| anyhow!("{}\n{}", e, suggestions::BAD_OVERRIDE))?;
        overrides = overrides.with(name, value);
    }

    let format: OutputFormat = match args.format.as_deref() {
        Some(format) => format
            .parse()
            .with_context(|| format!("invalid output format: {}", format))?,
        None => config.format()?.unwrap_or_default(),
    };

    let mut request = signal_request(&args.source)?;
    request.overrides = overrides;
    request.validate_overrides = args.validate_overrides();

    let resolution = resolve_environment(&request, &config)?;
    for warning in &resolution.warnings {
        diagnostic::emit(warning, color);
    }

    let output = render(&resolution, format)?;
    match args.output {
        Some(path) => {
            if write_if_changed(&path, &output)? {
                eprintln!("Wrote {} ({})", path.display(), resolution.identity);
            } else {
                eprintln!("{} is up to date", path.display());
            }
        }
        None => print!("{}", output),
    }

    Ok(())
}
