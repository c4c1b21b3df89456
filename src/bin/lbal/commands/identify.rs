//! `lbal identify` command

use anyhow::{Context, Result};

use super::{load_project_config, signal_request};
use crate::cli::IdentifyArgs;
use lbal::ops::identify;

pub fn execute(args: IdentifyArgs) -> Result<()> {
    let config = load_project_config()?;
    let request = signal_request(&args.source)?;

    let classification = identify(&request, &config)?;
    let identity = &classification.identity;

    if args.json {
        let json = serde_json::json!({
            "identity": identity,
            "strings": identity.describe(),
            "target": classification.target,
            "standard": classification.standard,
            "tokens": identity.tokens(),
        });
        let output =
            serde_json::to_string_pretty(&json).context("failed to serialize identity")?;
        println!("{}", output);
        return Ok(());
    }

    let strings = identity.describe();
    println!("Compiler: {}", strings.compiler);
    println!("Stdlib:   {}", strings.stdlib);
    println!("OS:       {}", strings.os);
    println!("Target:   {}", classification.target);
    println!(
        "Standard: {} ({})",
        classification.standard, classification.language_level
    );
    println!();
    for (token, value) in identity.tokens() {
        println!("  {} {}", token, value);
    }

    Ok(())
}
