//! Test utilities for `lbal` unit tests.
//!
//! Fixtures are predefined-macro dumps in the form `cc -dM -E` prints
//! them, recorded from real toolchains and trimmed to the signals the
//! resolver reads plus some noise.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::fixtures;
//!
//! #[test]
//! fn test_example() {
//!     let signals = fixtures::with_signals(&fixtures::gcc13_linux(), &[("__cplusplus", 202002)]);
//!     // Resolve against the modified dump...
//! }
//! ```

pub mod fixtures;
