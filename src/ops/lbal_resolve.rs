//! Implementation of `lbal resolve` and `lbal identify`.
//!
//! Gathers the inputs of a pass (signals, configuration, command-line
//! overrides), runs the pure resolver, and hands the result back for
//! rendering. Everything with side effects lives here, not in
//! [`crate::resolver`].

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::classify::{classify, Classification};
use crate::collect::{ensure_vendor_signal, probe, ProbeRequest};
use crate::core::{CppStandard, OverrideSet, SignalSet};
use crate::resolver::{resolve, Resolution, ResolveOptions};
use crate::util::config::Config;
use crate::util::diagnostic::suggestions;

/// Options for the resolve command.
#[derive(Debug, Clone, Default)]
pub struct ResolveRequest {
    /// Read signals from this file instead of probing a compiler
    pub signals: Option<PathBuf>,

    /// Compiler to probe (overrides `[probe].cxx`)
    pub cxx: Option<PathBuf>,

    /// Language standard to probe with (overrides `[probe].std`)
    pub std: Option<CppStandard>,

    /// Extra probe flags, appended to `[probe].flags`
    pub flags: Vec<String>,

    /// Command-line overrides, layered over `[overrides]`
    pub overrides: OverrideSet,

    /// Explicit `--validate-overrides` (overrides `[resolve]`)
    pub validate_overrides: Option<bool>,
}

impl ResolveRequest {
    /// Probe request after layering the command line over the config.
    pub fn probe_request(&self, config: &Config) -> ProbeRequest {
        let mut flags = config.probe.flags.clone();
        flags.extend(self.flags.iter().cloned());
        ProbeRequest {
            cxx: self.cxx.clone().or_else(|| config.probe.cxx.clone()),
            std: self.std.or(config.probe.std),
            flags,
        }
    }

    /// Overrides after layering the command line over the config.
    pub fn overrides(&self, config: &Config) -> OverrideSet {
        let mut overrides = config.overrides.clone();
        overrides.merge(self.overrides.clone());
        overrides
    }

    /// Resolution options after layering the command line over the config.
    pub fn options(&self, config: &Config) -> ResolveOptions {
        ResolveOptions {
            validate_overrides: self
                .validate_overrides
                .or(config.resolve.validate_overrides)
                .unwrap_or(false),
        }
    }
}

/// Collect the signal set for a request: from a file if one was given,
/// otherwise by probing a compiler.
pub fn collect_signals(request: &ResolveRequest, config: &Config) -> Result<SignalSet> {
    let signals = match &request.signals {
        Some(path) if !path.exists() => bail!(
            "signal file `{}` does not exist\n{}",
            path.display(),
            suggestions::NO_SIGNALS
        ),
        Some(path) => SignalSet::load(path)?,
        None => probe(&request.probe_request(config)).context("failed to collect signals")?,
    };
    tracing::debug!("collected {} signals", signals.len());
    Ok(signals)
}

/// Run a full resolution pass.
pub fn resolve_environment(request: &ResolveRequest, config: &Config) -> Result<Resolution> {
    let signals = collect_signals(request, config)?;
    let overrides = request.overrides(config);
    let options = request.options(config);

    let resolution = resolve(&signals, &overrides, &options)?;
    tracing::info!(
        "resolved {} capabilities for {}",
        resolution.capabilities.len(),
        resolution.identity
    );
    Ok(resolution)
}

/// Classify the environment without evaluating any capability.
pub fn identify(request: &ResolveRequest, config: &Config) -> Result<Classification> {
    let signals = collect_signals(request, config)?;
    ensure_vendor_signal(&signals)?;
    Ok(classify(&signals)?)
}
