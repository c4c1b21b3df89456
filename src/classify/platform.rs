//! Operating system, architecture and language standard.

use semver::Version;

use super::{first_match, Rule};
use crate::core::{Arch, Compiler, CppStandard, Os, OsFamily, SignalSet};
use crate::resolver::errors::ResolveError;

/// OS chain. Android defines `__linux__` and iOS defines `__MACH__`, so
/// both come before the platforms they resemble.
const OS_CHAIN: &[Rule<Os>] = &[
    Rule {
        name: "Android",
        matches: |s| s.has("__ANDROID__"),
        decode: |s| {
            Ok(Os::new(
                OsFamily::Android,
                s.int("__ANDROID_API__").map(|api| Version::new(to_u64(api), 0, 0)),
            ))
        },
    },
    Rule {
        name: "Linux",
        matches: |s| s.any(&["__linux__", "__linux", "__gnu_linux__"]),
        decode: |_| Ok(Os::new(OsFamily::Linux, None)),
    },
    Rule {
        name: "iOS",
        matches: |s| {
            s.has("__APPLE__") && s.has("__ENVIRONMENT_IPHONE_OS_VERSION_MIN_REQUIRED__")
        },
        decode: |s| {
            Ok(Os::new(
                OsFamily::Ios,
                s.int("__ENVIRONMENT_IPHONE_OS_VERSION_MIN_REQUIRED__")
                    .map(apple_version),
            ))
        },
    },
    Rule {
        name: "macOS",
        matches: |s| s.has("__APPLE__") && s.has("__MACH__"),
        decode: |s| {
            Ok(Os::new(
                OsFamily::MacOs,
                s.int("__ENVIRONMENT_MAC_OS_X_VERSION_MIN_REQUIRED__")
                    .or_else(|| s.int("__ENVIRONMENT_OS_VERSION_MIN_REQUIRED__"))
                    .map(apple_version),
            ))
        },
    },
    Rule {
        name: "Windows",
        matches: |s| s.has("_WIN32"),
        decode: |_| Ok(Os::new(OsFamily::Windows, None)),
    },
    Rule {
        name: "FreeBSD",
        matches: |s| s.has("__FreeBSD__"),
        decode: |s| {
            Ok(Os::new(
                OsFamily::FreeBsd,
                s.int("__FreeBSD__").map(|v| Version::new(to_u64(v), 0, 0)),
            ))
        },
    },
];

/// Architecture chain. ARM64EC also defines `_M_X64`/`_M_AMD64` so it is
/// checked before x86-64.
const ARCH_CHAIN: &[Rule<Arch>] = &[
    Rule {
        name: "ARM64EC",
        matches: |s| s.has("_M_ARM64EC"),
        decode: |_| Ok(Arch::Aarch64),
    },
    Rule {
        name: "x86-64",
        matches: |s| s.any(&["__x86_64__", "__amd64__", "_M_X64", "_M_AMD64"]),
        decode: |_| Ok(Arch::X86_64),
    },
    Rule {
        name: "AArch64",
        matches: |s| s.any(&["__aarch64__", "_M_ARM64"]),
        decode: |_| Ok(Arch::Aarch64),
    },
    Rule {
        name: "x86",
        matches: |s| s.any(&["__i386__", "_M_IX86"]),
        decode: |_| Ok(Arch::X86),
    },
    Rule {
        name: "ARM",
        matches: |s| s.any(&["__arm__", "_M_ARM"]),
        decode: |_| Ok(Arch::Arm),
    },
    Rule {
        name: "PowerPC 64",
        matches: |s| s.any(&["__powerpc64__", "__ppc64__"]),
        decode: |_| Ok(Arch::PowerPc64),
    },
    Rule {
        name: "PowerPC",
        matches: |s| s.any(&["__powerpc__", "__ppc__"]),
        decode: |_| Ok(Arch::PowerPc),
    },
    Rule {
        name: "RISC-V",
        matches: |s| s.has("__riscv"),
        decode: |s| match s.int("__riscv_xlen") {
            Some(64) => Ok(Arch::RiscV64),
            Some(32) => Ok(Arch::RiscV32),
            _ => Err(ResolveError::Unrecognized {
                component: "architecture",
                expected: vec!["__riscv_xlen"],
            }),
        },
    },
    Rule {
        name: "s390x",
        matches: |s| s.has("__s390x__"),
        decode: |_| Ok(Arch::S390x),
    },
];

fn to_u64(v: i64) -> u64 {
    u64::try_from(v).unwrap_or(0)
}

/// Decode an Apple deployment-target value.
///
/// macOS before 10.10 uses `1090` (`MMmp`); later releases and iOS use
/// `MMmmpp` (`101500`, `130000`, `170400`).
fn apple_version(v: i64) -> Version {
    if v < 10_000 {
        Version::new(to_u64(v / 100), to_u64((v / 10) % 10), to_u64(v % 10))
    } else {
        Version::new(
            to_u64(v / 10_000),
            to_u64((v / 100) % 100),
            to_u64(v % 100),
        )
    }
}

/// Classify the operating system.
pub fn classify_os(signals: &SignalSet) -> Result<Os, ResolveError> {
    first_match(
        OS_CHAIN,
        signals,
        "operating system",
        &["__linux__", "__APPLE__", "_WIN32", "__FreeBSD__"],
    )
}

/// Classify the target architecture.
pub fn classify_arch(signals: &SignalSet) -> Result<Arch, ResolveError> {
    first_match(
        ARCH_CHAIN,
        signals,
        "architecture",
        &["__x86_64__", "__aarch64__", "__i386__", "__arm__", "_M_X64", "_M_ARM64"],
    )
}

/// Determine the active language standard and its raw `__cplusplus`
/// value.
///
/// MSVC-compatible front ends keep `__cplusplus` at `199711L` unless
/// `/Zc:__cplusplus` is given, so `_MSVC_LANG` is preferred for them.
pub fn classify_standard(
    signals: &SignalSet,
    compiler: &Compiler,
) -> Result<(CppStandard, i64), ResolveError> {
    let (signal, value) = match signals.int("_MSVC_LANG") {
        Some(v) if compiler.is_msvc_like() => ("_MSVC_LANG", Some(v)),
        _ => ("__cplusplus", signals.int("__cplusplus")),
    };

    let standard = value.and_then(|v| CppStandard::from_cplusplus(v).map(|std| (std, v)));
    match standard {
        Some((std, level)) => {
            tracing::debug!("language standard {} from {} = {}", std, signal, level);
            Ok((std, level))
        }
        None => Err(ResolveError::Unrecognized {
            component: "language standard",
            expected: vec!["__cplusplus", "_MSVC_LANG"],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CompilerFamily, CompilerVariant};

    fn signals(pairs: &[(&str, i64)]) -> SignalSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_android_before_linux() {
        let s = signals(&[("__linux__", 1), ("__ANDROID__", 1), ("__ANDROID_API__", 24)]);
        let os = classify_os(&s).unwrap();
        assert_eq!(os.family, OsFamily::Android);
        assert_eq!(os.version, Some(Version::new(24, 0, 0)));
    }

    #[test]
    fn test_ios_before_macos() {
        let s = signals(&[
            ("__APPLE__", 1),
            ("__MACH__", 1),
            ("__ENVIRONMENT_IPHONE_OS_VERSION_MIN_REQUIRED__", 170400),
        ]);
        let os = classify_os(&s).unwrap();
        assert_eq!(os.family, OsFamily::Ios);
        assert_eq!(os.version, Some(Version::new(17, 4, 0)));
    }

    #[test]
    fn test_apple_version_forms() {
        assert_eq!(apple_version(1090), Version::new(10, 9, 0));
        assert_eq!(apple_version(101500), Version::new(10, 15, 0));
        assert_eq!(apple_version(130000), Version::new(13, 0, 0));
    }

    #[test]
    fn test_unknown_os() {
        let s = signals(&[("__HAIKU__", 1)]);
        assert!(matches!(
            classify_os(&s),
            Err(ResolveError::Unrecognized {
                component: "operating system",
                ..
            })
        ));
    }

    #[test]
    fn test_arm64ec_is_not_x86_64() {
        let s = signals(&[("_M_X64", 100), ("_M_AMD64", 100), ("_M_ARM64EC", 1)]);
        assert_eq!(classify_arch(&s).unwrap(), Arch::Aarch64);
    }

    #[test]
    fn test_riscv_xlen() {
        let s = signals(&[("__riscv", 1), ("__riscv_xlen", 64)]);
        assert_eq!(classify_arch(&s).unwrap(), Arch::RiscV64);
        assert!(classify_arch(&signals(&[("__riscv", 1)])).is_err());
    }

    #[test]
    fn test_standard_ignores_msvc_lang_for_gcc() {
        let gcc = Compiler::new(
            CompilerFamily::Gcc,
            CompilerVariant::Generic,
            Version::new(13, 2, 0),
        );
        let s = signals(&[("__cplusplus", 202002), ("_MSVC_LANG", 201402)]);
        assert_eq!(
            classify_standard(&s, &gcc).unwrap(),
            (CppStandard::Cpp20, 202002)
        );
    }

    #[test]
    fn test_missing_standard() {
        let msvc = Compiler::new(
            CompilerFamily::Msvc,
            CompilerVariant::Generic,
            Version::new(19, 38, 0),
        );
        assert!(classify_standard(&SignalSet::new(), &msvc).is_err());
    }
}
