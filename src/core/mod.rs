//! Core data types: signals, identities, targets and capabilities.

pub mod capability;
pub mod decorators;
pub mod identity;
pub mod language;
pub mod overrides;
pub mod signal;
pub mod target;

pub use capability::{CapabilityEntry, CapabilityMap, CapabilityValue, Source, ValueKind};
pub use identity::{
    Compiler, CompilerFamily, CompilerVariant, Identity, IdentityStrings, Os, OsFamily, Stdlib,
    StdlibFamily,
};
pub use language::CppStandard;
pub use overrides::OverrideSet;
pub use signal::{FeatureFamily, SignalSet, SignalValue};
pub use target::{Arch, Endian, Target, TargetFact};
