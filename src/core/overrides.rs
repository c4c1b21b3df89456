//! Caller-supplied capability values.
//!
//! An [`OverrideSet`] is established before resolution starts. The
//! resolver consults it for every entry and never writes to it.

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::core::capability::CapabilityValue;

/// Mapping from capability name to a pre-defined value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideSet {
    values: BTreeMap<String, CapabilityValue>,
}

impl OverrideSet {
    pub fn new() -> Self {
        OverrideSet::default()
    }

    /// Add an override, replacing any earlier value for the same name.
    pub fn with(mut self, name: impl Into<String>, value: CapabilityValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Parse a `NAME=VALUE` command-line argument.
    pub fn parse_assignment(arg: &str) -> Result<(String, CapabilityValue)> {
        let Some((name, value)) = arg.split_once('=') else {
            bail!("invalid override `{}`, expected NAME=VALUE", arg);
        };
        let name = name.trim();
        if name.is_empty() {
            bail!("invalid override `{}`, name is empty", arg);
        }
        let Some(value) = CapabilityValue::parse(value) else {
            bail!(
                "invalid override value `{}` for `{}`, expected true/false or an integer",
                value,
                name
            );
        };
        Ok((name.to_string(), value))
    }

    /// Layer `other` on top of this set (other takes precedence).
    pub fn merge(&mut self, other: OverrideSet) {
        self.values.extend(other.values);
    }

    pub fn get(&self, name: &str) -> Option<CapabilityValue> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, CapabilityValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, CapabilityValue)> for OverrideSet {
    fn from_iter<I: IntoIterator<Item = (String, CapabilityValue)>>(iter: I) -> Self {
        OverrideSet {
            values: iter.into_iter().collect(),
        }
    }
}
