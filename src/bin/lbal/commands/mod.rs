//! Command implementations

pub mod completions;
pub mod identify;
pub mod probe;
pub mod resolve;
pub mod rules;

use anyhow::{Context, Result};

use crate::cli::{CompilerArgs, SignalArgs};
use lbal::core::CppStandard;
use lbal::ops::ResolveRequest;
use lbal::util::config::{global_config_path, load_config, project_config_path};
use lbal::util::Config;

/// Load the global and project configuration for the current directory.
pub fn load_project_config() -> Result<Config> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    load_config(
        global_config_path().as_deref(),
        &project_config_path(&cwd),
    )
}

/// Translate compiler arguments into a request.
pub fn compiler_request(args: &CompilerArgs) -> Result<ResolveRequest> {
    let std = args
        .std
        .as_deref()
        .map(|s| s.parse::<CppStandard>())
        .transpose()
        .with_context(|| format!("invalid --std value: {}", args.std.as_deref().unwrap_or("")))?;

    Ok(ResolveRequest {
        cxx: args.cxx.clone(),
        std,
        flags: args.flags.clone(),
        ..Default::default()
    })
}

/// Translate signal-source arguments into a request.
pub fn signal_request(args: &SignalArgs) -> Result<ResolveRequest> {
    Ok(ResolveRequest {
        signals: args.signals.clone(),
        ..compiler_request(&args.compiler)?
    })
}
