//! Implementation of `lbal rules`: show the rule table for an identity.

use std::fmt::Write as _;

use anyhow::{bail, Result};

use crate::classify::Classification;
use crate::core::ValueKind;
use crate::table::{EntrySpec, RuleTable};

/// Render the rule table materialised for a classification.
///
/// `filter` keeps entries whose name contains the given text
/// (case-insensitive).
pub fn format_rules(classification: &Classification, filter: Option<&str>) -> Result<String> {
    let table = RuleTable::for_identity(&classification.identity);
    let needle = filter.map(|f| f.to_uppercase());

    let mut output = String::new();
    writeln!(output, "Rule table for {}", classification.identity).unwrap();
    writeln!(output, "Active standard: {}", classification.standard).unwrap();

    let mut shown = 0;
    for entry in table.entries() {
        if let Some(ref needle) = needle {
            if !entry.name.contains(needle.as_str()) {
                continue;
            }
        }
        shown += 1;

        writeln!(output).unwrap();
        write!(output, "{} ({}, since {})", entry.name, kind_name(entry), entry.epoch).unwrap();
        if let Some(parent) = entry.refines {
            write!(output, ", refines {}", parent).unwrap();
        }
        writeln!(output).unwrap();

        if entry.epoch > classification.standard {
            writeln!(output, "    absent: {} is not active", entry.epoch).unwrap();
        }
        if entry.rules.is_empty() {
            writeln!(output, "    (no rule applies to this identity)").unwrap();
        }
        for (i, rule) in entry.rules.iter().enumerate() {
            writeln!(output, "    {}. {}", i + 1, rule).unwrap();
        }
    }

    if shown == 0 {
        if let Some(filter) = filter {
            bail!(
                "no capability matches `{}`\n\
                 help: Run `lbal rules` without a filter to list every capability",
                filter
            );
        }
    }

    Ok(output)
}

fn kind_name(entry: &EntrySpec) -> &'static str {
    match entry.kind {
        ValueKind::Flag => "flag",
        ValueKind::Level => "level",
    }
}
