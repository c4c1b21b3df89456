//! lbal - a layered capability resolver for C++ toolchains
//!
//! A resolution pass takes the predefined macros of a compiler (the
//! signals), classifies the compiler, standard library and operating
//! system, evaluates a capability table against that identity, applies
//! caller overrides and checks the result for consistency. The output is a
//! flat `LBAL_*` vocabulary that is the same across vendors.
//!
//! ```no_run
//! use lbal::{resolve, OverrideSet, ResolveOptions, SignalSet};
//!
//! let signals = SignalSet::load(std::path::Path::new("signals.h"))?;
//! let resolution = resolve(&signals, &OverrideSet::new(), &ResolveOptions::default())?;
//! assert!(resolution.has("LBAL_CPP_VERSION"));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod classify;
pub mod collect;
pub mod core;
pub mod ops;
pub mod resolver;
pub mod table;
pub mod util;
pub mod validate;

/// Recorded signal sets for unit tests.
#[cfg(test)]
pub mod test_support;

pub use core::{
    CapabilityMap, CapabilityValue, CppStandard, Identity, OverrideSet, SignalSet, Source,
};
pub use resolver::{resolve, Resolution, ResolveError, ResolveOptions, Stage};
