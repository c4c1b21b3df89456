//! Rendering a resolution for downstream consumers.
//!
//! Three formats: a C/C++ configuration header, JSON, and a human-readable
//! report. Rendering never re-derives anything; the identity strings and
//! tokens are taken from the [`Resolution`] as produced by the pass.

use std::fmt::Write as _;

use anyhow::{Context, Result};

use crate::resolver::Resolution;

/// Include guard of the generated header.
pub const HEADER_GUARD: &str = "LBAL_CONFIG_H";

/// Output format for a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `#define` header (default)
    #[default]
    Header,
    /// Machine-readable JSON
    Json,
    /// Human-readable report with value sources
    Text,
}

impl std::str::FromStr for OutputFormat {
    type Err = OutputFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "header" | "h" => Ok(OutputFormat::Header),
            "json" => Ok(OutputFormat::Json),
            "text" | "human" => Ok(OutputFormat::Text),
            _ => Err(OutputFormatParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Header => write!(f, "header"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// Error parsing output format option.
#[derive(Debug, Clone)]
pub struct OutputFormatParseError(pub String);

impl std::fmt::Display for OutputFormatParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid output format '{}', valid values: header, json, text",
            self.0
        )
    }
}

impl std::error::Error for OutputFormatParseError {}

/// Render a resolution in the requested format.
pub fn render(resolution: &Resolution, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Header => Ok(render_header(resolution)),
        OutputFormat::Json => render_json(resolution),
        OutputFormat::Text => Ok(render_text(resolution)),
    }
}

/// Escape a string for a C string literal.
fn c_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render the configuration header.
///
/// Every capability is defined, absent ones as `0`, so consumers test
/// with `#if NAME` rather than `#ifdef NAME`.
pub fn render_header(resolution: &Resolution) -> String {
    let mut out = String::new();
    let strings = &resolution.strings;

    writeln!(out, "/* Generated by lbal {}. Do not edit.", env!("CARGO_PKG_VERSION")).unwrap();
    writeln!(out, " *").unwrap();
    writeln!(out, " * compiler: {}", strings.compiler).unwrap();
    writeln!(out, " * stdlib:   {}", strings.stdlib).unwrap();
    writeln!(out, " * os:       {}", strings.os).unwrap();
    writeln!(out, " * target:   {}", resolution.target).unwrap();
    writeln!(out, " * standard: {}", resolution.standard).unwrap();
    writeln!(out, " * inputs:   {}", short(&resolution.fingerprint)).unwrap();
    writeln!(out, " */").unwrap();
    writeln!(out, "#ifndef {}", HEADER_GUARD).unwrap();
    writeln!(out, "#define {}", HEADER_GUARD).unwrap();

    writeln!(out).unwrap();
    writeln!(out, "/* Identity */").unwrap();
    for (name, value) in &resolution.tokens {
        writeln!(out, "#define {} {}", name, value).unwrap();
    }
    writeln!(out, "#define LBAL_COMPILER_STRING {}", c_string(&strings.compiler)).unwrap();
    writeln!(out, "#define LBAL_STDLIB_STRING {}", c_string(&strings.stdlib)).unwrap();
    writeln!(out, "#define LBAL_OS_STRING {}", c_string(&strings.os)).unwrap();

    writeln!(out).unwrap();
    writeln!(out, "/* Capabilities */").unwrap();
    for entry in resolution.capabilities.iter() {
        if entry.is_overridden() {
            // Caller-defined values win over the generated ones
            writeln!(out, "#ifndef {}", entry.name).unwrap();
            writeln!(out, "#define {} {}", entry.name, entry.value.as_int()).unwrap();
            writeln!(out, "#endif").unwrap();
        } else {
            writeln!(out, "#define {} {}", entry.name, entry.value.as_int()).unwrap();
        }
    }

    writeln!(out).unwrap();
    writeln!(out, "/* Decorators */").unwrap();
    for (name, token) in &resolution.decorators {
        if token.is_empty() {
            writeln!(out, "#define {}", name).unwrap();
        } else {
            writeln!(out, "#define {} {}", name, token).unwrap();
        }
    }

    writeln!(out).unwrap();
    writeln!(out, "#endif /* {} */", HEADER_GUARD).unwrap();
    out
}

/// Render the resolution as pretty-printed JSON.
pub fn render_json(resolution: &Resolution) -> Result<String> {
    serde_json::to_string_pretty(resolution).context("failed to serialize resolution")
}

/// Render a human-readable report.
pub fn render_text(resolution: &Resolution) -> String {
    let mut out = String::new();
    let strings = &resolution.strings;

    writeln!(out, "Compiler: {}", strings.compiler).unwrap();
    writeln!(out, "Stdlib:   {}", strings.stdlib).unwrap();
    writeln!(out, "OS:       {}", strings.os).unwrap();
    writeln!(out, "Target:   {}", resolution.target).unwrap();
    writeln!(out, "Standard: {}", resolution.standard).unwrap();
    writeln!(out).unwrap();

    let width = resolution
        .capabilities
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(0);

    let present = resolution
        .capabilities
        .iter()
        .filter(|e| e.value.is_present())
        .count();
    writeln!(
        out,
        "Capabilities ({}/{} present):",
        present,
        resolution.capabilities.len()
    )
    .unwrap();
    for entry in resolution.capabilities.iter() {
        let mark = if entry.value.is_present() { "+" } else { "-" };
        writeln!(
            out,
            "  {} {:<width$}  {:<8}  {}",
            mark,
            entry.name,
            entry.value.to_string(),
            entry.source,
            width = width
        )
        .unwrap();
    }

    if !resolution.degraded.is_empty() {
        writeln!(out).unwrap();
        writeln!(out, "Undetected (resolved absent):").unwrap();
        for name in &resolution.degraded {
            writeln!(out, "  - {}", name).unwrap();
        }
    }

    if !resolution.warnings.is_empty() {
        writeln!(out).unwrap();
        writeln!(out, "Warnings:").unwrap();
        for warning in &resolution.warnings {
            match &warning.subject {
                Some(subject) => writeln!(out, "  - {}: {}", subject, warning.message).unwrap(),
                None => writeln!(out, "  - {}", warning.message).unwrap(),
            }
        }
    }

    out
}

fn short(fingerprint: &str) -> &str {
    fingerprint.get(..16).unwrap_or(fingerprint)
}
