//! Signal collection.
//!
//! Collection is pure extraction: signals are read from a macro dump, a
//! TOML file or a live compiler probe, and nothing is inferred or
//! compared here. The only check is that the set contains at least one
//! recognisable vendor marker; without one there is nothing to classify.

pub mod probe;

use crate::core::SignalSet;
use crate::resolver::errors::ResolveError;

pub use probe::{find_cxx_compiler, probe, probe_dump, ProbeRequest};

/// Signals whose presence identifies some compiler vendor.
///
/// The list includes vendors that are rejected later on; rejection is the
/// classifier's decision, not the collector's.
pub const VENDOR_MARKERS: &[&str] = &[
    "__GNUC__",
    "__clang__",
    "__apple_build_version__",
    "_MSC_VER",
    "__INTEL_COMPILER",
    "__INTEL_LLVM_COMPILER",
    "__NVCOMPILER",
];

/// Check that a signal set came from a recognisable environment.
pub fn ensure_vendor_signal(signals: &SignalSet) -> Result<(), ResolveError> {
    if signals.any(VENDOR_MARKERS) {
        Ok(())
    } else {
        tracing::debug!(
            "no vendor marker among {} collected signals",
            signals.len()
        );
        Err(ResolveError::UnknownEnvironment {
            signal_count: signals.len(),
        })
    }
}
