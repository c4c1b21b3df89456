//! Capability table.
//!
//! The catalog lists every capability `lbal` knows about, each with an
//! ordered list of detection rules. [`RuleTable::for_identity`] narrows
//! the catalog to the rules that make sense for one identity and adds the
//! vendor version proxies for that identity's compiler and standard
//! library. Within an entry, direct probes always come before proxies, so
//! a proxy is only consulted when the environment does not answer the
//! question itself. A missing feature-test macro is an answer when the
//! environment defines other macros of the same family.
//!
//! Evaluation is a single forward pass. Overrides are checked first and
//! are never replaced; an entry newer than the active standard resolves
//! absent without evaluation; otherwise the first applicable rule decides.

mod catalog;
mod clang;
mod gcc;
mod msvc;

use std::collections::BTreeSet;
use std::fmt;

use semver::Version;

use crate::classify::Classification;
use crate::core::{
    CapabilityEntry, CapabilityMap, CapabilityValue, Compiler, CompilerFamily, CompilerVariant,
    CppStandard, Endian, FeatureFamily, Identity, OsFamily, OverrideSet, SignalSet, SignalValue,
    Source, StdlibFamily, TargetFact, ValueKind,
};
use crate::util::diagnostic::Diagnostic;

pub use catalog::catalog;

/// `(major, minor, patch)` lower bound of a proxy or availability gate.
pub type MinVersion = (u64, u64, u64);

fn to_version((major, minor, patch): MinVersion) -> Version {
    Version::new(major, minor, patch)
}

/// Version numbering a compiler proxy is written against.
///
/// clang-cl shares upstream Clang's numbering; Apple Clang does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numbering {
    Gcc,
    Clang,
    AppleClang,
    Msvc,
}

impl Numbering {
    pub fn of(compiler: &Compiler) -> Self {
        match (compiler.family, compiler.variant) {
            (CompilerFamily::Clang, CompilerVariant::Apple) => Numbering::AppleClang,
            (CompilerFamily::Clang, _) => Numbering::Clang,
            (CompilerFamily::Gcc, _) => Numbering::Gcc,
            (CompilerFamily::Msvc, _) => Numbering::Msvc,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Numbering::Gcc => "GCC",
            Numbering::Clang => "Clang",
            Numbering::AppleClang => "Apple Clang",
            Numbering::Msvc => "MSVC",
        }
    }

    fn proxies(&self) -> &'static [(&'static str, MinVersion)] {
        match self {
            Numbering::Gcc => gcc::COMPILER,
            Numbering::Clang => clang::COMPILER,
            Numbering::AppleClang => clang::APPLE_COMPILER,
            Numbering::Msvc => msvc::COMPILER,
        }
    }
}

fn stdlib_proxies(family: StdlibFamily) -> &'static [(&'static str, MinVersion)] {
    match family {
        StdlibFamily::LibStdCxx => gcc::LIBSTDCXX,
        StdlibFamily::LibCxx => clang::LIBCXX,
        StdlibFamily::MsvcStl => msvc::STL,
    }
}

fn lookup(table: &[(&'static str, MinVersion)], name: &str) -> Option<MinVersion> {
    table.iter().find(|(n, _)| *n == name).map(|(_, min)| *min)
}

/// One way of deciding a capability.
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    /// Present iff the signal's value is at least `threshold`. Applies
    /// when the signal is defined, or when it is the entry's last probe
    /// and the environment publishes its feature-test macro family.
    Probe {
        signal: &'static str,
        threshold: i64,
    },
    /// The signal's value times `factor` (`__SIZEOF_POINTER__ * 8`).
    Scaled { signal: &'static str, factor: i64 },
    /// `__BYTE_ORDER__` compared against the predefined order constants.
    ByteOrder(Endian),
    /// The active `__cplusplus` value.
    LanguageLevel,
    /// Present iff the compiler is at least `min`.
    CompilerVersion { numbering: Numbering, min: MinVersion },
    /// Present iff the standard library is at least `min`.
    StdlibVersion { family: StdlibFamily, min: MinVersion },
    /// Absent when the Apple deployment target is below `min`. Apple
    /// ships libc++ as a system library, so some features depend on the
    /// OS the binary will run on rather than on the headers.
    PlatformFloor { os: OsFamily, min: MinVersion },
    /// Fixed value on one operating system.
    OnOs { os: OsFamily, value: CapabilityValue },
    /// Fixed value.
    Constant(CapabilityValue),
    /// Architecture fact.
    Target(TargetFact),
    /// Present iff every named (earlier) entry is present.
    Requires(&'static [&'static str]),
}

impl Detection {
    /// Evaluation order within an entry: availability gates, direct
    /// probes, proxies, then constants and derivations.
    fn rank(&self) -> u8 {
        match self {
            Detection::PlatformFloor { .. } => 0,
            Detection::Probe { .. }
            | Detection::Scaled { .. }
            | Detection::ByteOrder(_)
            | Detection::LanguageLevel => 1,
            Detection::CompilerVersion { .. } | Detection::StdlibVersion { .. } => 2,
            Detection::OnOs { .. }
            | Detection::Constant(_)
            | Detection::Target(_)
            | Detection::Requires(_) => 3,
        }
    }

    /// Whether the rule observes the environment directly.
    pub fn is_probe(&self) -> bool {
        self.rank() == 1
    }

    /// Whether the rule's precondition holds for an identity.
    fn applies_to(&self, identity: &Identity) -> bool {
        match self {
            Detection::CompilerVersion { numbering, .. } => {
                *numbering == Numbering::of(&identity.compiler)
            }
            Detection::StdlibVersion { family, .. } => *family == identity.stdlib.family,
            Detection::PlatformFloor { os, .. } => {
                *os == identity.os.family && identity.stdlib.family == StdlibFamily::LibCxx
            }
            Detection::OnOs { os, .. } => *os == identity.os.family,
            _ => true,
        }
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detection::Probe { signal, threshold } => write!(f, "probe {} >= {}", signal, threshold),
            Detection::Scaled { signal, factor } => write!(f, "probe {} * {}", signal, factor),
            Detection::ByteOrder(endian) => write!(f, "probe __BYTE_ORDER__ == {}", endian.as_str()),
            Detection::LanguageLevel => write!(f, "language level"),
            Detection::CompilerVersion { numbering, min } => {
                write!(f, "proxy {} >= {}", numbering.name(), to_version(*min))
            }
            Detection::StdlibVersion { family, min } => {
                write!(f, "proxy {} >= {}", family.name(), to_version(*min))
            }
            Detection::PlatformFloor { os, min } => {
                write!(f, "unavailable below {} {}", os.name(), to_version(*min))
            }
            Detection::OnOs { os, value } => write!(f, "constant {} on {}", value, os.name()),
            Detection::Constant(value) => write!(f, "constant {}", value),
            Detection::Target(fact) => match fact {
                TargetFact::PointerWidth => write!(f, "target pointer width"),
                TargetFact::IsEndian(endian) => write!(f, "target is {}-endian", endian.as_str()),
            },
            Detection::Requires(names) => write!(f, "requires {}", names.join(", ")),
        }
    }
}

/// One capability in the catalog.
#[derive(Debug, Clone)]
pub struct EntrySpec {
    /// Capability name (`LBAL_CPP17_IF_CONSTEXPR`)
    pub name: &'static str,
    /// Standard that introduced the feature
    pub epoch: CppStandard,
    pub kind: ValueKind,
    /// Coarser capability this one refines
    pub refines: Option<&'static str>,
    /// Detection rules, first applicable wins
    pub rules: Vec<Detection>,
}

impl EntrySpec {
    pub fn flag(name: &'static str, epoch: CppStandard) -> Self {
        EntrySpec {
            name,
            epoch,
            kind: ValueKind::Flag,
            refines: None,
            rules: Vec::new(),
        }
    }

    pub fn level(name: &'static str, epoch: CppStandard) -> Self {
        EntrySpec {
            kind: ValueKind::Level,
            ..EntrySpec::flag(name, epoch)
        }
    }

    pub fn probe(self, signal: &'static str, threshold: i64) -> Self {
        self.rule(Detection::Probe { signal, threshold })
    }

    pub fn unavailable_below(self, os: OsFamily, min: MinVersion) -> Self {
        self.rule(Detection::PlatformFloor { os, min })
    }

    pub fn refines(mut self, parent: &'static str) -> Self {
        self.refines = Some(parent);
        self
    }

    pub fn rule(mut self, rule: Detection) -> Self {
        self.rules.push(rule);
        self
    }

    /// Value asserted by a proxy: the revision of the entry's first
    /// probe, or plain presence.
    fn proxy_value(&self) -> CapabilityValue {
        let level = self
            .rules
            .iter()
            .find_map(|rule| match rule {
                Detection::Probe { threshold, .. } => Some(*threshold),
                _ => None,
            })
            .unwrap_or(1);
        self.kind.from_level(level)
    }

    /// Signal of the entry's last direct probe.
    fn last_probe(&self) -> Option<&'static str> {
        self.rules.iter().rev().find_map(|rule| match rule {
            Detection::Probe { signal, .. } => Some(*signal),
            _ => None,
        })
    }

    /// Evaluate one rule. `None` means the rule does not apply and the
    /// next one is tried.
    fn detect(
        &self,
        rule: &Detection,
        ctx: &EvalContext<'_>,
        resolved: &CapabilityMap,
    ) -> Option<(CapabilityValue, Source)> {
        let identity = &ctx.classification.identity;
        match rule {
            Detection::Probe { signal, threshold } => {
                let value = match ctx.signals.int(signal) {
                    Some(value) => value,
                    None if self.last_probe() == Some(*signal) && ctx.publishes(signal) => 0,
                    None => return None,
                };
                let level = if value >= *threshold { value } else { 0 };
                Some((
                    self.kind.from_level(level),
                    Source::Probe {
                        signal: signal.to_string(),
                    },
                ))
            }
            Detection::Scaled { signal, factor } => {
                // An out-of-range product resolves absent
                let value = ctx.signals.int(signal)?.checked_mul(*factor).unwrap_or(0);
                Some((
                    self.kind.from_level(value),
                    Source::Probe {
                        signal: signal.to_string(),
                    },
                ))
            }
            Detection::ByteOrder(endian) => {
                let order = byte_order(ctx.signals)?;
                Some((
                    self.kind.from_level(i64::from(order == *endian)),
                    Source::Probe {
                        signal: "__BYTE_ORDER__".to_string(),
                    },
                ))
            }
            Detection::LanguageLevel => Some((
                self.kind.from_level(ctx.classification.language_level),
                Source::Probe {
                    signal: if identity.compiler.is_msvc_like() {
                        "_MSVC_LANG".to_string()
                    } else {
                        "__cplusplus".to_string()
                    },
                },
            )),
            Detection::CompilerVersion { numbering, min } => self.proxy(
                identity.compiler.version >= to_version(*min),
                format!("{} >= {}", numbering.name(), to_version(*min)),
                resolved,
            ),
            Detection::StdlibVersion { family, min } => self.proxy(
                identity.stdlib.version >= to_version(*min),
                format!("{} >= {}", family.name(), to_version(*min)),
                resolved,
            ),
            Detection::PlatformFloor { os, min } => {
                let deployed = identity.os.version.as_ref()?;
                if *deployed >= to_version(*min) {
                    return None;
                }
                Some((
                    self.kind.absent(),
                    Source::Platform {
                        requirement: format!("{} >= {}", os.name(), to_version(*min)),
                    },
                ))
            }
            Detection::OnOs { value, .. } | Detection::Constant(value) => {
                Some((self.kind.from_level(value.as_int()), Source::Constant))
            }
            Detection::Target(fact) => {
                let value = ctx.classification.target.fact(*fact)?;
                Some((self.kind.from_level(value), Source::Constant))
            }
            Detection::Requires(names) => {
                let present = names.iter().all(|name| resolved.is_present(name));
                Some((
                    if present {
                        self.proxy_value()
                    } else {
                        self.kind.absent()
                    },
                    Source::Derived {
                        from: names.iter().map(|n| n.to_string()).collect(),
                    },
                ))
            }
        }
    }

    /// Proxy outcome. A proxy never asserts a refinement whose base
    /// resolved absent; probes and overrides are not gated this way.
    fn proxy(
        &self,
        satisfied: bool,
        subject: String,
        resolved: &CapabilityMap,
    ) -> Option<(CapabilityValue, Source)> {
        if let Some(parent) = self.refines {
            if satisfied && !resolved.is_present(parent) {
                return Some((
                    self.kind.absent(),
                    Source::Derived {
                        from: vec![parent.to_string()],
                    },
                ));
            }
        }
        let value = if satisfied {
            self.proxy_value()
        } else {
            self.kind.absent()
        };
        Some((value, Source::Proxy { subject }))
    }

    /// First applicable rule, restricted to `filter`.
    fn first_applicable(
        &self,
        ctx: &EvalContext<'_>,
        resolved: &CapabilityMap,
        filter: impl Fn(&Detection) -> bool,
    ) -> Option<(CapabilityValue, Source)> {
        self.rules
            .iter()
            .filter(|rule| filter(*rule))
            .find_map(|rule| self.detect(rule, ctx, resolved))
    }
}

/// `__BYTE_ORDER__` as reported by GCC-compatible compilers. The dump
/// form is the constant's name; TOML signal files may give the number.
fn byte_order(signals: &SignalSet) -> Option<Endian> {
    match signals.get("__BYTE_ORDER__")? {
        SignalValue::Text(name) => match name.as_str() {
            "__ORDER_LITTLE_ENDIAN__" => Some(Endian::Little),
            "__ORDER_BIG_ENDIAN__" => Some(Endian::Big),
            _ => None,
        },
        value => {
            let order = value.as_int()?;
            let little = signals.int("__ORDER_LITTLE_ENDIAN__").unwrap_or(1234);
            let big = signals.int("__ORDER_BIG_ENDIAN__").unwrap_or(4321);
            if order == little {
                Some(Endian::Little)
            } else if order == big {
                Some(Endian::Big)
            } else {
                None
            }
        }
    }
}

/// Inputs a table is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub signals: &'a SignalSet,
    pub classification: &'a Classification,
}

impl EvalContext<'_> {
    /// Whether an undefined `signal` is a conclusive answer: it is a
    /// feature-test macro and its family is published at all.
    fn publishes(&self, signal: &str) -> bool {
        FeatureFamily::of(signal).is_some_and(|family| self.signals.publishes(family))
    }
}

/// Result of evaluating a table.
#[derive(Debug, Clone, Default)]
pub struct TableOutcome {
    pub capabilities: CapabilityMap,
    /// Non-fatal diagnostics (override validation, unknown overrides)
    pub warnings: Vec<Diagnostic>,
    /// Entries no rule could decide; they resolve absent
    pub degraded: Vec<String>,
}

/// The catalog narrowed to one identity.
#[derive(Debug, Clone)]
pub struct RuleTable {
    entries: Vec<EntrySpec>,
}

impl RuleTable {
    /// Build the table for an identity.
    ///
    /// Rules whose precondition does not hold are dropped, the identity's
    /// compiler and standard library proxies are added, rules are ordered
    /// probes first and entries are ordered by epoch (stable).
    pub fn for_identity(identity: &Identity) -> Self {
        let numbering = Numbering::of(&identity.compiler);
        let family = identity.stdlib.family;

        let mut entries: Vec<EntrySpec> = catalog()
            .into_iter()
            .map(|mut entry| {
                entry.rules.retain(|rule| rule.applies_to(identity));
                if let Some(min) = lookup(numbering.proxies(), entry.name) {
                    entry
                        .rules
                        .push(Detection::CompilerVersion { numbering, min });
                }
                if let Some(min) = lookup(stdlib_proxies(family), entry.name) {
                    entry.rules.push(Detection::StdlibVersion { family, min });
                }
                entry.rules.sort_by_key(Detection::rank);
                entry
            })
            .collect();
        entries.sort_by_key(|entry| entry.epoch);

        tracing::debug!(
            "rule table for {}: {} entries, {} rules",
            identity,
            entries.len(),
            entries.iter().map(|e| e.rules.len()).sum::<usize>()
        );
        RuleTable { entries }
    }

    pub fn entries(&self) -> &[EntrySpec] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&EntrySpec> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Structural problems: duplicate names and references to entries
    /// that are unknown or not evaluated earlier.
    pub fn lint(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut seen = BTreeSet::new();

        for entry in &self.entries {
            let mut references: Vec<&str> = entry.refines.into_iter().collect();
            for rule in &entry.rules {
                if let Detection::Requires(names) = rule {
                    references.extend(names.iter().copied());
                }
            }
            for reference in references {
                if !seen.contains(reference) {
                    problems.push(format!(
                        "`{}` references `{}`, which is not evaluated before it",
                        entry.name, reference
                    ));
                }
            }
            if !seen.insert(entry.name) {
                problems.push(format!("`{}` is defined twice", entry.name));
            }
        }
        problems
    }

    /// Evaluate every entry once, in order.
    pub fn evaluate(
        &self,
        ctx: &EvalContext<'_>,
        overrides: &OverrideSet,
        validate_overrides: bool,
    ) -> TableOutcome {
        let mut outcome = TableOutcome::default();

        for (name, _) in overrides.iter() {
            if self.get(name).is_none() {
                tracing::debug!("override for unknown capability `{}` ignored", name);
                outcome.warnings.push(
                    Diagnostic::warning(format!("unknown capability `{}` in overrides", name))
                        .with_subject(name)
                        .with_context("the override was ignored")
                        .with_suggestion("run `lbal rules` to list known capabilities"),
                );
            }
        }

        for entry in &self.entries {
            if let Some(value) = overrides.get(entry.name) {
                let value = entry.kind.from_level(value.as_int());
                if validate_overrides {
                    if let Some(warning) =
                        validate_override(entry, value, ctx, &outcome.capabilities)
                    {
                        tracing::debug!("{}", warning.message);
                        outcome.warnings.push(warning);
                    }
                }
                tracing::debug!("{} = {} (override)", entry.name, value);
                outcome.capabilities.insert(CapabilityEntry {
                    name: entry.name.to_string(),
                    value,
                    source: Source::Override,
                });
                continue;
            }

            let decision = if entry.epoch > ctx.classification.standard {
                Some((entry.kind.absent(), Source::Epoch))
            } else {
                entry.first_applicable(ctx, &outcome.capabilities, |_| true)
            };

            let (value, source) = decision.unwrap_or_else(|| {
                tracing::debug!("{}: no applicable rule", entry.name);
                outcome.degraded.push(entry.name.to_string());
                (entry.kind.absent(), Source::Unresolved)
            });
            tracing::debug!("{} = {} ({})", entry.name, value, source);
            outcome.capabilities.insert(CapabilityEntry {
                name: entry.name.to_string(),
                value,
                source,
            });
        }

        outcome
    }
}

/// Compare an override against the entry's direct probes.
fn validate_override(
    entry: &EntrySpec,
    value: CapabilityValue,
    ctx: &EvalContext<'_>,
    resolved: &CapabilityMap,
) -> Option<Diagnostic> {
    match entry.first_applicable(ctx, resolved, Detection::is_probe) {
        None => Some(
            Diagnostic::warning(format!(
                "cannot validate override `{}={}`: no direct probe is available",
                entry.name, value
            ))
            .with_subject(entry.name)
            .with_context("the override is trusted as-is"),
        ),
        Some((detected, source)) if detected.is_present() != value.is_present() => Some(
            Diagnostic::warning(format!(
                "override `{}={}` disagrees with the environment",
                entry.name, value
            ))
            .with_subject(entry.name)
            .with_context(format!("{} reports {}", source, detected))
            .with_context("the override is kept"),
        ),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::test_support::fixtures;

    fn evaluate(signals: &SignalSet, overrides: &OverrideSet, validate: bool) -> TableOutcome {
        let classification = classify(signals).unwrap();
        let table = RuleTable::for_identity(&classification.identity);
        let ctx = EvalContext {
            signals,
            classification: &classification,
        };
        table.evaluate(&ctx, overrides, validate)
    }

    #[test]
    fn test_probes_come_before_proxies() {
        for (name, signals) in fixtures::all() {
            let identity = classify(&signals).unwrap().identity;
            let table = RuleTable::for_identity(&identity);
            for entry in table.entries() {
                let ranks: Vec<u8> = entry.rules.iter().map(Detection::rank).collect();
                assert!(
                    ranks.windows(2).all(|w| w[0] <= w[1]),
                    "{}: {} rules out of order",
                    name,
                    entry.name
                );
            }
        }
    }

    #[test]
    fn test_tables_are_well_formed() {
        for (name, signals) in fixtures::all() {
            let identity = classify(&signals).unwrap().identity;
            let problems = RuleTable::for_identity(&identity).lint();
            assert!(problems.is_empty(), "{}: {:?}", name, problems);
        }
    }

    #[test]
    fn test_proxy_tables_name_catalog_entries() {
        let names: BTreeSet<&str> = catalog().iter().map(|e| e.name).collect();
        let tables = [
            gcc::COMPILER,
            gcc::LIBSTDCXX,
            clang::COMPILER,
            clang::APPLE_COMPILER,
            clang::LIBCXX,
            msvc::COMPILER,
            msvc::STL,
        ];
        for table in tables {
            for (name, _) in table {
                assert!(names.contains(name), "proxy for unknown entry {}", name);
            }
        }
    }

    #[test]
    fn test_only_matching_proxies_are_kept() {
        let identity = classify(&fixtures::gcc13_linux()).unwrap().identity;
        let table = RuleTable::for_identity(&identity);
        let entry = table.get("LBAL_CPP17_IF_CONSTEXPR").unwrap();
        assert_eq!(
            entry.rules,
            vec![
                Detection::Probe {
                    signal: "__cpp_if_constexpr",
                    threshold: 201606
                },
                Detection::CompilerVersion {
                    numbering: Numbering::Gcc,
                    min: (7, 1, 0)
                },
            ]
        );
    }

    #[test]
    fn test_entries_ordered_by_epoch() {
        let identity = classify(&fixtures::gcc13_linux()).unwrap().identity;
        let table = RuleTable::for_identity(&identity);
        let epochs: Vec<CppStandard> = table.entries().iter().map(|e| e.epoch).collect();
        assert!(epochs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_probe_wins_over_proxy() {
        // GCC 13 would satisfy the proxy, but the probe reports an older revision
        let signals = fixtures::with_signals(
            &fixtures::gcc13_linux(),
            &[("__cplusplus", 202002), ("__cpp_concepts", 201507)],
        );
        let outcome = evaluate(&signals, &OverrideSet::new(), false);
        let entry = outcome.capabilities.get("LBAL_CPP20_CONCEPTS").unwrap();
        assert_eq!(entry.value, CapabilityValue::Level(0));
        assert_eq!(
            entry.source,
            Source::Probe {
                signal: "__cpp_concepts".to_string()
            }
        );
    }

    #[test]
    fn test_proxy_used_without_feature_macros() {
        let signals =
            fixtures::without_family(&fixtures::gcc13_linux(), FeatureFamily::Language);
        let outcome = evaluate(&signals, &OverrideSet::new(), false);
        let entry = outcome.capabilities.get("LBAL_CPP17_IF_CONSTEXPR").unwrap();
        assert_eq!(entry.value, CapabilityValue::Level(201606));
        assert!(matches!(entry.source, Source::Proxy { .. }));
    }

    #[test]
    fn test_missing_language_macro_is_absent() {
        // -fno-char8_t: Clang 17 would satisfy the proxy
        let signals =
            fixtures::without_signals(&fixtures::clang17_libcxx_linux(), &["__cpp_char8_t"]);
        let outcome = evaluate(&signals, &OverrideSet::new(), false);
        let entry = outcome.capabilities.get("LBAL_CPP20_CHAR8_T").unwrap();
        assert_eq!(entry.value, CapabilityValue::Level(0));
        assert_eq!(
            entry.source,
            Source::Probe {
                signal: "__cpp_char8_t".to_string()
            }
        );
        assert!(!outcome.degraded.contains(&"LBAL_CPP20_CHAR8_T".to_string()));
    }

    #[test]
    fn test_missing_library_macro() {
        let base = fixtures::clang17_libcxx_linux();

        // <version> was seen, so a missing macro is an answer
        let signals = fixtures::without_signals(&base, &["__cpp_lib_span"]);
        let outcome = evaluate(&signals, &OverrideSet::new(), false);
        let entry = outcome.capabilities.get("LBAL_LIBCPP20_SPAN").unwrap();
        assert!(!entry.value.is_present());
        assert!(matches!(entry.source, Source::Probe { .. }));

        // No library macros at all: libc++ 17 decides
        let signals = fixtures::without_family(&base, FeatureFamily::Library);
        let outcome = evaluate(&signals, &OverrideSet::new(), false);
        let entry = outcome.capabilities.get("LBAL_LIBCPP20_SPAN").unwrap();
        assert_eq!(entry.value, CapabilityValue::Level(202002));
        assert!(matches!(entry.source, Source::Proxy { .. }));
    }

    #[test]
    fn test_alternative_rtti_macros_fall_through() {
        // MSVC spells RTTI `_CPPRTTI` even where `__cpp_*` macros exist
        let signals =
            fixtures::without_signals(&fixtures::clang_cl17_windows(), &["__cpp_rtti"]);
        let outcome = evaluate(&signals, &OverrideSet::new(), false);
        let entry = outcome.capabilities.get("LBAL_RTTI").unwrap();
        assert_eq!(entry.value, CapabilityValue::Flag(true));
        assert_eq!(
            entry.source,
            Source::Probe {
                signal: "_CPPRTTI".to_string()
            }
        );
    }

    #[test]
    fn test_oversized_pointer_width_is_absent() {
        let signals =
            fixtures::with_signals(&fixtures::gcc13_linux(), &[("__SIZEOF_POINTER__", i64::MAX)]);
        let outcome = evaluate(&signals, &OverrideSet::new(), false);
        let entry = outcome.capabilities.get("LBAL_TARGET_PTR_WIDTH").unwrap();
        assert_eq!(entry.value, CapabilityValue::Level(0));
    }

    #[test]
    fn test_epoch_gate() {
        // gcc13_linux is a C++17 dump
        let outcome = evaluate(&fixtures::gcc13_linux(), &OverrideSet::new(), false);
        let entry = outcome.capabilities.get("LBAL_CPP20_CONCEPTS").unwrap();
        assert!(!entry.value.is_present());
        assert_eq!(entry.source, Source::Epoch);
        assert!(outcome.capabilities.is_present("LBAL_CPP17_IF_CONSTEXPR"));
    }

    #[test]
    fn test_override_wins() {
        let overrides = OverrideSet::new()
            .with("LBAL_CPP17_IF_CONSTEXPR", CapabilityValue::Flag(false))
            .with("LBAL_CPP20_CONCEPTS", CapabilityValue::Level(201907));
        let outcome = evaluate(&fixtures::gcc13_linux(), &overrides, false);

        let entry = outcome.capabilities.get("LBAL_CPP17_IF_CONSTEXPR").unwrap();
        assert_eq!(entry.value, CapabilityValue::Level(0));
        assert!(entry.is_overridden());

        // Overrides are not subject to the epoch gate
        let entry = outcome.capabilities.get("LBAL_CPP20_CONCEPTS").unwrap();
        assert_eq!(entry.value, CapabilityValue::Level(201907));
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_validate_overrides() {
        let overrides = OverrideSet::new()
            .with("LBAL_CPP17_IF_CONSTEXPR", CapabilityValue::Flag(false))
            .with("LBAL_CPP20_COROUTINE_SUPPORT", CapabilityValue::Flag(true));
        let outcome = evaluate(&fixtures::gcc13_linux(), &overrides, true);

        assert_eq!(outcome.warnings.len(), 2);
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.message.contains("disagrees")
                && w.subject.as_deref() == Some("LBAL_CPP17_IF_CONSTEXPR")));
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.message.contains("cannot validate")
                && w.subject.as_deref() == Some("LBAL_CPP20_COROUTINE_SUPPORT")));

        // Values are never changed by validation
        assert!(!outcome.capabilities.is_present("LBAL_CPP17_IF_CONSTEXPR"));
        assert!(outcome.capabilities.is_present("LBAL_CPP20_COROUTINE_SUPPORT"));
    }

    #[test]
    fn test_unknown_override_is_ignored() {
        let overrides = OverrideSet::new().with("LBAL_NOT_A_THING", CapabilityValue::Flag(true));
        let outcome = evaluate(&fixtures::gcc13_linux(), &overrides, false);
        assert!(!outcome.capabilities.contains("LBAL_NOT_A_THING"));
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_platform_floor() {
        // macOS 13.0 deployment target: filesystem yes, floating-point format no
        let outcome = evaluate(&fixtures::apple_clang15_macos(), &OverrideSet::new(), false);
        assert!(outcome.capabilities.is_present("LBAL_LIBCPP17_FILESYSTEM"));
        let format = outcome.capabilities.get("LBAL_LIBCPP20_FORMAT").unwrap();
        assert!(!format.value.is_present());
        assert!(matches!(format.source, Source::Platform { .. }));
    }

    #[test]
    fn test_unresolved_entries_are_degraded() {
        // libstdc++ has no mdspan proxy and the dump has no library macros
        let signals = fixtures::without_family(
            &fixtures::with_signals(&fixtures::gcc13_linux(), &[("__cplusplus", 202302)]),
            FeatureFamily::Library,
        );
        let outcome = evaluate(&signals, &OverrideSet::new(), false);
        assert!(outcome.degraded.contains(&"LBAL_LIBCPP23_MDSPAN".to_string()));
        let entry = outcome.capabilities.get("LBAL_LIBCPP23_MDSPAN").unwrap();
        assert_eq!(entry.source, Source::Unresolved);
        assert!(!entry.value.is_present());
    }

    #[test]
    fn test_proxy_does_not_assert_refinement_without_base() {
        // Clang 9 lacks concepts; libstdc++ 13 alone would claim library concepts
        let signals: SignalSet = [
            ("__GNUC__", 4),
            ("__clang__", 1),
            ("__clang_major__", 9),
            ("_GLIBCXX_RELEASE", 13),
            ("__linux__", 1),
            ("__x86_64__", 1),
            ("__cplusplus", 202002),
        ]
        .into_iter()
        .collect();
        let outcome = evaluate(&signals, &OverrideSet::new(), false);
        assert!(!outcome.capabilities.is_present("LBAL_CPP20_CONCEPTS"));
        let entry = outcome.capabilities.get("LBAL_LIBCPP20_CONCEPTS").unwrap();
        assert!(!entry.value.is_present());
        assert_eq!(
            entry.source,
            Source::Derived {
                from: vec!["LBAL_CPP20_CONCEPTS".to_string()]
            }
        );
    }

    #[test]
    fn test_byte_order_forms() {
        let dump = SignalSet::parse_defines("#define __BYTE_ORDER__ __ORDER_BIG_ENDIAN__\n");
        assert_eq!(byte_order(&dump), Some(Endian::Big));
        let numeric: SignalSet = [("__BYTE_ORDER__", 1234)].into_iter().collect();
        assert_eq!(byte_order(&numeric), Some(Endian::Little));
        assert_eq!(byte_order(&SignalSet::new()), None);
    }
}
