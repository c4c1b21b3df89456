//! Raw environment signals.
//!
//! A signal is one fact about the build environment as reported by the
//! compiler: usually a predefined macro such as `__clang_major__` or
//! `__cpp_lib_optional`. Signals are collected once per resolution pass
//! and are never mutated afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Value carried by a signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalValue {
    /// Numeric value (`#define __GNUC__ 13`)
    Int(i64),
    /// Macro defined with an empty body (`#define __linux__`), or `true` in TOML
    Defined,
    /// Any other body, kept verbatim
    Text(String),
}

impl SignalValue {
    /// Numeric view of the value, if it has one.
    ///
    /// A bare definition counts as `1`, matching how the preprocessor
    /// evaluates `#if NAME` for an object-like macro defined as `1`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            SignalValue::Int(v) => Some(*v),
            SignalValue::Defined => Some(1),
            SignalValue::Text(_) => None,
        }
    }

    /// Textual view of the value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SignalValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Parse a macro body the way the collector records it.
    pub fn parse_body(body: &str) -> Self {
        let body = body.trim();
        if body.is_empty() {
            return SignalValue::Defined;
        }
        match parse_integer_literal(body) {
            Some(v) => SignalValue::Int(v),
            None => SignalValue::Text(body.to_string()),
        }
    }
}

impl fmt::Display for SignalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalValue::Int(v) => write!(f, "{}", v),
            SignalValue::Defined => write!(f, "(defined)"),
            SignalValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Parse a C integer literal, tolerating integer suffixes and parentheses.
fn parse_integer_literal(s: &str) -> Option<i64> {
    let s = s.trim().trim_start_matches('(').trim_end_matches(')').trim();
    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest.trim()),
        None => (false, s),
    };

    let digits = s.trim_end_matches(['u', 'U', 'l', 'L']);
    if digits.is_empty() {
        return None;
    }

    let value = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).ok()?
    } else if digits.len() > 1 && digits.starts_with('0') {
        i64::from_str_radix(&digits[1..], 8).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };

    Some(if negative { -value } else { value })
}

/// Family of a standard feature-test macro.
///
/// Language macros (`__cpp_concepts`) are predefined by the front end;
/// library macros (`__cpp_lib_span`) appear once `<version>` or another
/// library header has been included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureFamily {
    Language,
    Library,
}

impl FeatureFamily {
    /// Family of a signal name, if it is a feature-test macro.
    pub fn of(name: &str) -> Option<Self> {
        if name.starts_with("__cpp_lib_") {
            Some(FeatureFamily::Library)
        } else if name.starts_with("__cpp_") {
            Some(FeatureFamily::Language)
        } else {
            None
        }
    }
}

/// Matches one object-like `#define` line. Function-like macros
/// (`#define X(a) ...`) are rejected by requiring whitespace or end of
/// line right after the name.
static DEFINE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*#\s*define\s+([A-Za-z_][A-Za-z0-9_]*)(?:\s+(.*?))?\s*$")
        .expect("define regex is valid")
});

/// The immutable set of signals for one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalSet {
    signals: BTreeMap<String, SignalValue>,
}

impl SignalSet {
    /// Create an empty signal set.
    pub fn new() -> Self {
        SignalSet::default()
    }

    /// Parse a predefined-macro dump as printed by `cc -dM -E`.
    ///
    /// Lines that are not object-like `#define`s are ignored. When a macro
    /// is defined twice the last definition wins, as in the preprocessor.
    pub fn parse_defines(dump: &str) -> Self {
        dump.lines()
            .filter_map(|line| {
                let caps = DEFINE_LINE.captures(line)?;
                let name = caps.get(1)?.as_str().to_string();
                let body = caps.get(2).map(|m| m.as_str()).unwrap_or("");
                Some((name, SignalValue::parse_body(body)))
            })
            .collect()
    }

    /// Load signals from a TOML document with a `[signals]` table.
    pub fn from_toml(contents: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct Document {
            signals: BTreeMap<String, toml::Value>,
        }

        let doc: Document = toml::from_str(contents).context("failed to parse signal file")?;

        doc.signals
            .into_iter()
            .filter_map(|(name, value)| {
                let value = match value {
                    toml::Value::Integer(i) => Some(SignalValue::Int(i)),
                    toml::Value::Boolean(true) => Some(SignalValue::Defined),
                    toml::Value::Boolean(false) => None,
                    toml::Value::String(s) => Some(SignalValue::parse_body(&s)),
                    other => {
                        return Some(Err(anyhow::anyhow!(
                            "signal `{}` has unsupported value `{}`",
                            name,
                            other
                        )))
                    }
                };
                value.map(|v| Ok((name, v)))
            })
            .collect()
    }

    /// Load a signal file, choosing the format from its contents.
    ///
    /// Files containing `#define` lines are treated as macro dumps;
    /// everything else must be TOML.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read signal file: {}", path.display()))?;

        if contents.lines().any(|l| DEFINE_LINE.is_match(l)) {
            Ok(Self::parse_defines(&contents))
        } else {
            Self::from_toml(&contents)
                .with_context(|| format!("failed to load signals from {}", path.display()))
        }
    }

    /// Look up a signal.
    pub fn get(&self, name: &str) -> Option<&SignalValue> {
        self.signals.get(name)
    }

    /// Whether a signal is present at all.
    pub fn has(&self, name: &str) -> bool {
        self.signals.contains_key(name)
    }

    /// Numeric value of a signal.
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(SignalValue::as_int)
    }

    /// Whether any of the given signals is present.
    pub fn any(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.has(n))
    }

    /// Whether any feature-test macro of `family` is defined. When one is,
    /// the environment publishes that family and a missing macro means
    /// the feature is off.
    pub fn publishes(&self, family: FeatureFamily) -> bool {
        self.signals
            .keys()
            .any(|name| FeatureFamily::of(name) == Some(family))
    }

    /// Number of signals.
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Iterate over signals in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SignalValue)> {
        self.signals.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, SignalValue)> for SignalSet {
    fn from_iter<I: IntoIterator<Item = (String, SignalValue)>>(iter: I) -> Self {
        SignalSet {
            signals: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, i64)> for SignalSet {
    fn from_iter<I: IntoIterator<Item = (&'a str, i64)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_string(), SignalValue::Int(v)))
            .collect()
    }
}
