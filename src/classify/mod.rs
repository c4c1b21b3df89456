//! Identity classification.
//!
//! Each identity component (compiler, standard library, OS, architecture)
//! is classified by an ordered chain of rules. The first rule whose
//! predicate matches decides the component; later rules are never
//! consulted. Vendors that impersonate others (clang defines `__GNUC__`,
//! Apple Clang defines `__clang__`, ARM64EC defines `_M_X64`) are handled
//! by putting the more specific rule earlier. A chain with no match is a
//! fatal error; there is no silent generic default beyond the rule a chain
//! explicitly places last.

mod platform;
mod vendor;

use semver::Version;

use crate::core::{CppStandard, Identity, SignalSet, Target};
use crate::resolver::errors::ResolveError;

pub use platform::{classify_arch, classify_os, classify_standard};
pub use vendor::{classify_compiler, classify_stdlib, compiler_floor, stdlib_floor};

/// Result of classifying a signal set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub identity: Identity,
    pub target: Target,
    pub standard: CppStandard,
    /// Raw `__cplusplus` (or `_MSVC_LANG`) value
    pub language_level: i64,
}

/// One rule of an ordered classification chain.
pub(crate) struct Rule<T> {
    /// Vendor or platform the rule recognises
    pub name: &'static str,
    /// Whether the rule applies to a signal set
    pub matches: fn(&SignalSet) -> bool,
    /// Decode the component; may reject a known but unsupported vendor
    pub decode: fn(&SignalSet) -> Result<T, ResolveError>,
}

/// Evaluate a chain, first match wins.
pub(crate) fn first_match<T>(
    chain: &[Rule<T>],
    signals: &SignalSet,
    component: &'static str,
    expected: &[&'static str],
) -> Result<T, ResolveError> {
    for rule in chain {
        if (rule.matches)(signals) {
            tracing::debug!("{} matched rule `{}`", component, rule.name);
            return (rule.decode)(signals);
        }
    }

    Err(ResolveError::Unrecognized {
        component,
        expected: expected.to_vec(),
    })
}

/// Fail if `found` is below `floor`.
pub(crate) fn check_floor(
    subject: &str,
    found: &Version,
    floor: &Version,
    signal: &str,
) -> Result<(), ResolveError> {
    if found < floor {
        return Err(ResolveError::VersionBelowFloor {
            subject: subject.to_string(),
            found: found.clone(),
            floor: floor.clone(),
            signal: signal.to_string(),
        });
    }
    Ok(())
}

/// Classify a signal set into exactly one identity.
pub fn classify(signals: &SignalSet) -> Result<Classification, ResolveError> {
    let (compiler, compiler_signal) = classify_compiler(signals)?;
    check_floor(
        compiler.name(),
        &compiler.version,
        &compiler_floor(&compiler),
        compiler_signal,
    )?;

    let (stdlib, stdlib_signal) = classify_stdlib(signals)?;
    check_floor(
        stdlib.family.name(),
        &stdlib.version,
        &stdlib_floor(stdlib.family),
        stdlib_signal,
    )?;

    let os = classify_os(signals)?;
    let target = Target::new(classify_arch(signals)?);
    let (standard, language_level) = classify_standard(signals, &compiler)?;

    let identity = Identity {
        compiler,
        stdlib,
        os,
    };
    tracing::info!("identity: {} on {}, {}", identity, target, standard);

    Ok(Classification {
        identity,
        target,
        standard,
        language_level,
    })
}
