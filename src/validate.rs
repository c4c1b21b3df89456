//! Consistency validation.
//!
//! Runs after the table is complete. Each check is a fixed assertion over
//! the final capability values; a violation is a genuine contradiction
//! (usually an override fighting the environment, or two rule tables
//! that disagree) and aborts the pass.

use crate::classify::Classification;
use crate::core::{CapabilityMap, CppStandard};
use crate::resolver::errors::ResolveError;
use crate::table::RuleTable;

/// What a check sees.
pub struct Subject<'a> {
    pub classification: &'a Classification,
    pub capabilities: &'a CapabilityMap,
    pub table: &'a RuleTable,
}

/// A named assertion. On failure returns the implicated entry and reason.
struct Check {
    name: &'static str,
    check: fn(&Subject<'_>) -> Result<(), (String, String)>,
}

const CHECKS: &[Check] = &[
    Check {
        name: "byte-order",
        check: byte_order,
    },
    Check {
        name: "pointer-width",
        check: pointer_width,
    },
    Check {
        name: "language-floor",
        check: language_floor,
    },
    Check {
        name: "refinement",
        check: refinement,
    },
];

/// Run every check; the first violation is returned.
pub fn validate(subject: &Subject<'_>) -> Result<(), ResolveError> {
    for check in CHECKS {
        if let Err((entry, reason)) = (check.check)(subject) {
            tracing::debug!("check `{}` failed on {}", check.name, entry);
            return Err(ResolveError::Inconsistent {
                invariant: check.name,
                entry,
                reason,
            });
        }
        tracing::debug!("check `{}` passed", check.name);
    }
    Ok(())
}

fn byte_order(s: &Subject<'_>) -> Result<(), (String, String)> {
    let little = s.capabilities.is_present("LBAL_TARGET_LITTLE_ENDIAN");
    let big = s.capabilities.is_present("LBAL_TARGET_BIG_ENDIAN");
    match (little, big) {
        (true, false) | (false, true) => Ok(()),
        (true, true) => Err((
            "LBAL_TARGET_LITTLE_ENDIAN, LBAL_TARGET_BIG_ENDIAN".to_string(),
            "the target is both little- and big-endian".to_string(),
        )),
        (false, false) => Err((
            "LBAL_TARGET_LITTLE_ENDIAN, LBAL_TARGET_BIG_ENDIAN".to_string(),
            format!("no byte order could be established for {}", s.classification.target),
        )),
    }
}

fn pointer_width(s: &Subject<'_>) -> Result<(), (String, String)> {
    let width = s
        .capabilities
        .value("LBAL_TARGET_PTR_WIDTH")
        .map(|v| v.as_int())
        .unwrap_or(0);
    if width == 32 || width == 64 {
        Ok(())
    } else {
        Err((
            "LBAL_TARGET_PTR_WIDTH".to_string(),
            format!("resolved to {}, expected 32 or 64", width),
        ))
    }
}

/// Reads the final `LBAL_CPP_VERSION`, so an override below C++11 is
/// caught as well as an old `-std=`.
fn language_floor(s: &Subject<'_>) -> Result<(), (String, String)> {
    let level = s
        .capabilities
        .value("LBAL_CPP_VERSION")
        .map(|v| v.as_int())
        .unwrap_or(0);
    if level >= CppStandard::Cpp11.cplusplus() {
        Ok(())
    } else {
        Err((
            "LBAL_CPP_VERSION".to_string(),
            format!("resolved to {}, at least C++11 (201103) is required", level),
        ))
    }
}

fn refinement(s: &Subject<'_>) -> Result<(), (String, String)> {
    for entry in s.table.entries() {
        let Some(parent) = entry.refines else {
            continue;
        };
        if s.capabilities.is_present(entry.name) && !s.capabilities.is_present(parent) {
            return Err((
                entry.name.to_string(),
                format!("`{}` is present but `{}`, which it refines, is not", entry.name, parent),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::core::{CapabilityEntry, CapabilityValue, Source};
    use crate::test_support::fixtures;

    fn map(values: &[(&str, CapabilityValue)]) -> CapabilityMap {
        let mut map = CapabilityMap::new();
        for (name, value) in values {
            map.insert(CapabilityEntry {
                name: name.to_string(),
                value: *value,
                source: Source::Override,
            });
        }
        map
    }

    fn sane() -> Vec<(&'static str, CapabilityValue)> {
        vec![
            ("LBAL_TARGET_LITTLE_ENDIAN", CapabilityValue::Flag(true)),
            ("LBAL_TARGET_BIG_ENDIAN", CapabilityValue::Flag(false)),
            ("LBAL_TARGET_PTR_WIDTH", CapabilityValue::Level(64)),
            ("LBAL_CPP_VERSION", CapabilityValue::Level(201703)),
        ]
    }

    fn run(values: &[(&str, CapabilityValue)]) -> Result<(), ResolveError> {
        let classification = classify(&fixtures::gcc13_linux()).unwrap();
        let table = RuleTable::for_identity(&classification.identity);
        let capabilities = map(values);
        validate(&Subject {
            classification: &classification,
            capabilities: &capabilities,
            table: &table,
        })
    }

    fn failed_invariant(result: Result<(), ResolveError>) -> &'static str {
        match result {
            Err(ResolveError::Inconsistent { invariant, .. }) => invariant,
            other => panic!("expected a consistency failure, got {:?}", other),
        }
    }

    #[test]
    fn test_consistent_table_passes() {
        assert!(run(&sane()).is_ok());
    }

    #[test]
    fn test_both_byte_orders() {
        let mut values = sane();
        values[1].1 = CapabilityValue::Flag(true);
        assert_eq!(failed_invariant(run(&values)), "byte-order");
    }

    #[test]
    fn test_no_byte_order() {
        let mut values = sane();
        values[0].1 = CapabilityValue::Flag(false);
        assert_eq!(failed_invariant(run(&values)), "byte-order");
    }

    #[test]
    fn test_pointer_width() {
        let mut values = sane();
        values[2].1 = CapabilityValue::Level(16);
        assert_eq!(failed_invariant(run(&values)), "pointer-width");
    }

    #[test]
    fn test_refinement_inversion() {
        // Library ranges without library concepts
        let mut values = sane();
        values.push(("LBAL_LIBCPP20_RANGES", CapabilityValue::Level(201911)));
        values.push(("LBAL_LIBCPP20_CONCEPTS", CapabilityValue::Level(0)));
        let err = run(&values).unwrap_err();
        match err {
            ResolveError::Inconsistent {
                invariant, entry, ..
            } => {
                assert_eq!(invariant, "refinement");
                assert_eq!(entry, "LBAL_LIBCPP20_RANGES");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_language_floor() {
        let mut values = sane();
        values[3].1 = CapabilityValue::Level(199711);
        assert_eq!(failed_invariant(run(&values)), "language-floor");

        // A missing language level is no better
        values.remove(3);
        assert_eq!(failed_invariant(run(&values)), "language-floor");
    }
}
