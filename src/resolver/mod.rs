//! Capability resolution.
//!
//! A resolution pass is a pure function of its inputs: collect, classify,
//! evaluate the identity's rule table, validate. All I/O (probing,
//! reading signal files, loading configuration) happens before it.

pub mod errors;

pub use errors::{ResolveError, Stage};

use serde::Serialize;

use crate::classify::classify;
use crate::collect::ensure_vendor_signal;
use crate::core::decorators::{decorators, DecoratorMap};
use crate::core::{
    CapabilityMap, CppStandard, Identity, IdentityStrings, OverrideSet, SignalSet, Target,
};
use crate::table::{EvalContext, RuleTable};
use crate::util::diagnostic::Diagnostic;
use crate::util::hash::Fingerprint;
use crate::validate::{validate, Subject};

/// Options for a resolution pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Compare overrides against direct probes and warn on disagreement
    pub validate_overrides: bool,
}

/// Everything a pass produces.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub identity: Identity,
    /// Display strings, generated once per pass
    pub strings: IdentityStrings,
    /// Identity tokens (`LBAL_COMPILER_GCC 1`, `LBAL_COMPILER_VERSION 130200`)
    pub tokens: Vec<(String, i64)>,
    pub target: Target,
    pub standard: CppStandard,
    pub capabilities: CapabilityMap,
    pub decorators: DecoratorMap,
    /// Non-fatal diagnostics
    pub warnings: Vec<Diagnostic>,
    /// Capabilities no rule could decide
    pub degraded: Vec<String>,
    /// SHA-256 of the signals, overrides and options
    pub fingerprint: String,
}

/// Run one resolution pass.
///
/// Fatal errors abort the pass; no partial table is returned.
pub fn resolve(
    signals: &SignalSet,
    overrides: &OverrideSet,
    options: &ResolveOptions,
) -> Result<Resolution, ResolveError> {
    ensure_vendor_signal(signals)?;
    let classification = classify(signals)?;

    let table = RuleTable::for_identity(&classification.identity);
    let ctx = EvalContext {
        signals,
        classification: &classification,
    };
    let outcome = table.evaluate(&ctx, overrides, options.validate_overrides);

    validate(&Subject {
        classification: &classification,
        capabilities: &outcome.capabilities,
        table: &table,
    })?;

    if !outcome.degraded.is_empty() {
        tracing::info!(
            "{} capabilities could not be detected and resolve absent",
            outcome.degraded.len()
        );
    }

    let decorators = decorators(&classification.identity, &classification.target);
    Ok(Resolution {
        strings: classification.identity.describe(),
        tokens: classification.identity.tokens(),
        identity: classification.identity,
        target: classification.target,
        standard: classification.standard,
        capabilities: outcome.capabilities,
        decorators,
        warnings: outcome.warnings,
        degraded: outcome.degraded,
        fingerprint: fingerprint(signals, overrides, options),
    })
}

/// Fingerprint of a pass's inputs.
pub fn fingerprint(signals: &SignalSet, overrides: &OverrideSet, options: &ResolveOptions) -> String {
    let mut fp = Fingerprint::new();
    fp.update_str(env!("CARGO_PKG_VERSION"));
    fp.update_str("signals");
    for (name, value) in signals.iter() {
        fp.update_pair(name, value);
    }
    fp.update_str("overrides");
    for (name, value) in overrides.iter() {
        fp.update_pair(name, value);
    }
    fp.update_bool(options.validate_overrides);
    fp.finish()
}

impl Resolution {
    /// Whether a capability resolved present.
    pub fn has(&self, name: &str) -> bool {
        self.capabilities.is_present(name)
    }
}
