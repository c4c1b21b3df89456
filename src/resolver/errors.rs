//! Fatal resolution errors and their diagnostics.
//!
//! Every fatal error names the stage that failed, the signal or entry
//! implicated, and a remediation hint. No partial capability table is
//! produced when one of these is returned.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;
use semver::Version;
use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// Resolution stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Collect,
    Classify,
    Validate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Collect => write!(f, "signal collection"),
            Stage::Classify => write!(f, "identity classification"),
            Stage::Validate => write!(f, "consistency validation"),
        }
    }
}

/// Fatal error during a resolution pass.
#[derive(Debug, Clone, Error, MietteDiagnostic)]
pub enum ResolveError {
    #[error("unknown environment: no recognizable compiler signal")]
    #[diagnostic(
        code(lbal::collect::unknown_environment),
        help("collect signals with `lbal probe` so that predefined macros are included")
    )]
    UnknownEnvironment { signal_count: usize },

    #[error("unrecognized {component}")]
    #[diagnostic(code(lbal::classify::unrecognized))]
    Unrecognized {
        component: &'static str,
        /// Signals that were looked for
        expected: Vec<&'static str>,
    },

    #[error("{vendor} is not supported")]
    #[diagnostic(
        code(lbal::classify::unsupported),
        help("build with GCC, Clang, Apple Clang, clang-cl or MSVC")
    )]
    UnsupportedVendor { vendor: String, signal: String },

    #[error("{subject} {found} is below the minimum supported version {floor}")]
    #[diagnostic(
        code(lbal::classify::version_floor),
        help("upgrade to at least {subject} {floor}")
    )]
    VersionBelowFloor {
        subject: String,
        found: Version,
        floor: Version,
        signal: String,
    },

    #[error("consistency check `{invariant}` failed: {reason}")]
    #[diagnostic(code(lbal::validate::consistency))]
    Inconsistent {
        invariant: &'static str,
        entry: String,
        reason: String,
    },
}

impl ResolveError {
    /// The stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            ResolveError::UnknownEnvironment { .. } => Stage::Collect,
            ResolveError::Unrecognized { .. }
            | ResolveError::UnsupportedVendor { .. }
            | ResolveError::VersionBelowFloor { .. } => Stage::Classify,
            ResolveError::Inconsistent { .. } => Stage::Validate,
        }
    }

    /// The signal or entry implicated in the failure.
    pub fn implicated(&self) -> String {
        match self {
            ResolveError::UnknownEnvironment { .. } => "(vendor markers)".to_string(),
            ResolveError::Unrecognized { expected, .. } => expected.join(", "),
            ResolveError::UnsupportedVendor { signal, .. } => signal.clone(),
            ResolveError::VersionBelowFloor { signal, .. } => signal.clone(),
            ResolveError::Inconsistent { entry, .. } => entry.clone(),
        }
    }

    /// Remediation hint.
    pub fn hint(&self) -> String {
        match self {
            ResolveError::UnknownEnvironment { .. } => {
                "collect signals with `lbal probe` so that predefined macros are included"
                    .to_string()
            }
            ResolveError::Unrecognized { component, .. } => format!(
                "make sure the signal set comes from a supported toolchain; the {} could not be identified",
                component
            ),
            ResolveError::UnsupportedVendor { .. } => {
                "build with GCC, Clang, Apple Clang, clang-cl or MSVC".to_string()
            }
            ResolveError::VersionBelowFloor { subject, floor, .. } => {
                format!("upgrade to at least {} {}", subject, floor)
            }
            ResolveError::Inconsistent { invariant, .. } => format!(
                "check overrides touching `{}` or report the rule table inconsistency",
                invariant
            ),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.to_string())
            .with_context(format!("stage: {}", self.stage()))
            .with_context(format!("implicated: {}", self.implicated()));

        match self {
            ResolveError::UnknownEnvironment { signal_count } => {
                diag = diag.with_context(format!("{} signals were collected", signal_count));
            }
            ResolveError::VersionBelowFloor { found, .. } => {
                diag = diag.with_context(format!("detected version: {}", found));
            }
            ResolveError::Inconsistent { reason, .. } => {
                diag = diag.with_context(reason.clone());
            }
            _ => {}
        }

        diag.with_suggestion(self.hint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_diagnostic() {
        let err = ResolveError::VersionBelowFloor {
            subject: "GCC".to_string(),
            found: Version::new(5, 4, 0),
            floor: Version::new(7, 1, 0),
            signal: "__GNUC__".to_string(),
        };

        assert_eq!(err.stage(), Stage::Classify);
        let output = err.to_diagnostic().format(false);
        assert!(output.contains("GCC 5.4.0 is below the minimum supported version 7.1.0"));
        assert!(output.contains("stage: identity classification"));
        assert!(output.contains("implicated: __GNUC__"));
        assert!(output.contains("upgrade to at least GCC 7.1.0"));
    }

    #[test]
    fn test_inconsistent_diagnostic() {
        let err = ResolveError::Inconsistent {
            invariant: "pointer-width",
            entry: "LBAL_TARGET_PTR_WIDTH".to_string(),
            reason: "resolved to 16, expected 32 or 64".to_string(),
        };

        assert_eq!(err.stage(), Stage::Validate);
        let output = err.to_diagnostic().format(false);
        assert!(output.contains("consistency check `pointer-width` failed"));
        assert!(output.contains("LBAL_TARGET_PTR_WIDTH"));
    }
}
