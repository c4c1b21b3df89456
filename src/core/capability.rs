//! Resolved capability values.
//!
//! Every capability resolves to either a flag or a level. Levels follow
//! the feature-test macro convention: `0` means absent, a non-zero value
//! names the revision of the feature that is satisfied (`201606`).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The value of one capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CapabilityValue {
    Flag(bool),
    Level(i64),
}

impl CapabilityValue {
    /// Whether the capability is present.
    pub fn is_present(&self) -> bool {
        match self {
            CapabilityValue::Flag(b) => *b,
            CapabilityValue::Level(v) => *v != 0,
        }
    }

    /// Value as it appears in a `#define`.
    pub fn as_int(&self) -> i64 {
        match self {
            CapabilityValue::Flag(b) => i64::from(*b),
            CapabilityValue::Level(v) => *v,
        }
    }

    /// Parse a value given on the command line or in a config file.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" => Some(CapabilityValue::Flag(true)),
            "false" | "no" | "off" => Some(CapabilityValue::Flag(false)),
            other => other
                .trim_end_matches(['l', 'L'])
                .parse()
                .ok()
                .map(CapabilityValue::Level),
        }
    }
}

impl fmt::Display for CapabilityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityValue::Flag(b) => write!(f, "{}", b),
            CapabilityValue::Level(v) => write!(f, "{}", v),
        }
    }
}

/// Shape of a capability's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Flag,
    Level,
}

impl ValueKind {
    /// The absent value of this shape.
    pub fn absent(&self) -> CapabilityValue {
        match self {
            ValueKind::Flag => CapabilityValue::Flag(false),
            ValueKind::Level => CapabilityValue::Level(0),
        }
    }

    /// Convert a raw level into this shape.
    pub fn from_level(&self, level: i64) -> CapabilityValue {
        match self {
            ValueKind::Flag => CapabilityValue::Flag(level != 0),
            ValueKind::Level => CapabilityValue::Level(level),
        }
    }
}

/// How a capability's value was decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Source {
    /// Pre-set by the caller
    Override,
    /// Direct probe of the named signal
    Probe { signal: String },
    /// Vendor-version proxy (compiler or standard library)
    Proxy { subject: String },
    /// Platform availability gate
    Platform { requirement: String },
    /// Identity or architecture constant
    Constant,
    /// Derived from earlier entries
    Derived { from: Vec<String> },
    /// Entry's epoch exceeds the active standard
    Epoch,
    /// No rule could be evaluated
    Unresolved,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Override => write!(f, "override"),
            Source::Probe { signal } => write!(f, "probe {}", signal),
            Source::Proxy { subject } => write!(f, "proxy {}", subject),
            Source::Platform { requirement } => write!(f, "platform {}", requirement),
            Source::Constant => write!(f, "constant"),
            Source::Derived { from } => write!(f, "derived from {}", from.join(", ")),
            Source::Epoch => write!(f, "language epoch not reached"),
            Source::Unresolved => write!(f, "unresolved"),
        }
    }
}

/// A capability after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityEntry {
    pub name: String,
    pub value: CapabilityValue,
    pub source: Source,
}

impl CapabilityEntry {
    /// Whether the caller pre-defined this entry.
    pub fn is_overridden(&self) -> bool {
        self.source == Source::Override
    }
}

/// Flat mapping from capability name to resolved entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityMap {
    entries: BTreeMap<String, CapabilityEntry>,
}

impl CapabilityMap {
    pub fn new() -> Self {
        CapabilityMap::default()
    }

    /// Record a resolved entry. Entries are write-once per pass.
    pub(crate) fn insert(&mut self, entry: CapabilityEntry) {
        debug_assert!(
            !self.entries.contains_key(&entry.name),
            "capability `{}` resolved twice",
            entry.name
        );
        self.entries.insert(entry.name.clone(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&CapabilityEntry> {
        self.entries.get(name)
    }

    /// Resolved value of a capability.
    pub fn value(&self, name: &str) -> Option<CapabilityValue> {
        self.get(name).map(|e| e.value)
    }

    /// Whether a capability resolved present.
    pub fn is_present(&self, name: &str) -> bool {
        self.value(name).is_some_and(|v| v.is_present())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CapabilityEntry> {
        self.entries.values()
    }
}
