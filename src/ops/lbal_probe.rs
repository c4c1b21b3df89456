//! Implementation of `lbal probe`: record a compiler's predefined macros.
//!
//! The recorded dump is a signal file that `lbal resolve --signals`
//! accepts later, so a pass can be reproduced without the compiler.

use std::path::Path;

use anyhow::Result;

use crate::collect::probe_dump;
use crate::ops::lbal_resolve::ResolveRequest;
use crate::util::config::Config;
use crate::util::fs::write_if_changed;

/// Outcome of a probe.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    /// The sorted macro dump
    pub dump: String,
    /// Number of macros recorded
    pub count: usize,
    /// Whether the output file was (re)written
    pub written: bool,
}

/// Probe the configured compiler and optionally write the dump to a file.
pub fn probe_to(
    request: &ResolveRequest,
    config: &Config,
    output: Option<&Path>,
) -> Result<ProbeOutcome> {
    let raw = probe_dump(&request.probe_request(config))?;
    let dump = normalize_dump(&raw);
    let count = dump.lines().count();

    let written = match output {
        Some(path) => write_if_changed(path, &dump)?,
        None => false,
    };
    Ok(ProbeOutcome {
        dump,
        count,
        written,
    })
}

/// Keep `#define` lines only, sorted, so that recordings diff cleanly.
pub fn normalize_dump(raw: &str) -> String {
    let mut lines: Vec<&str> = raw
        .lines()
        .map(str::trim_end)
        .filter(|l| l.trim_start().starts_with("#define "))
        .collect();
    lines.sort_unstable();
    lines.dedup();

    let mut dump = lines.join("\n");
    if !dump.is_empty() {
        dump.push('\n');
    }
    dump
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SignalSet;

    #[test]
    fn test_normalize_dump() {
        let raw = "#define __GNUC__ 13\r\n# 1 \"<stdin>\"\n#define __cplusplus 201703L\n\n#define __GNUC__ 13\n";
        let dump = normalize_dump(raw);
        assert_eq!(dump, "#define __GNUC__ 13\n#define __cplusplus 201703L\n");

        let signals = SignalSet::parse_defines(&dump);
        assert_eq!(signals.int("__cplusplus"), Some(201703));
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_dump(""), "");
    }
}
