//! High-level operations.
//!
//! This module contains the implementation of lbal commands.

pub mod emit;
pub mod lbal_probe;
pub mod lbal_resolve;
pub mod lbal_rules;

pub use emit::{render, OutputFormat};
pub use lbal_probe::{probe_to, ProbeOutcome};
pub use lbal_resolve::{collect_signals, identify, resolve_environment, ResolveRequest};
pub use lbal_rules::format_rules;
