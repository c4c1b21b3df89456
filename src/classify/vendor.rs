//! Compiler and standard library chains.

use semver::Version;

use super::{first_match, Rule};
use crate::core::{
    Compiler, CompilerFamily, CompilerVariant, SignalSet, Stdlib, StdlibFamily,
};
use crate::resolver::errors::ResolveError;

/// Compiler chain, most specific first. GCC is the designated fallback:
/// nearly every vendor defines `__GNUC__`.
const COMPILER_CHAIN: &[Rule<(Compiler, &'static str)>] = &[
    Rule {
        name: "Intel C++ Compiler Classic",
        matches: |s| s.has("__INTEL_COMPILER"),
        decode: |_| Err(unsupported("Intel C++ Compiler Classic", "__INTEL_COMPILER")),
    },
    Rule {
        name: "Intel oneAPI DPC++/C++",
        matches: |s| s.has("__INTEL_LLVM_COMPILER"),
        decode: |_| Err(unsupported("Intel oneAPI DPC++/C++", "__INTEL_LLVM_COMPILER")),
    },
    Rule {
        name: "NVIDIA HPC C++",
        matches: |s| s.has("__NVCOMPILER"),
        decode: |_| Err(unsupported("NVIDIA HPC C++", "__NVCOMPILER")),
    },
    Rule {
        name: "Apple Clang",
        matches: |s| s.has("__clang__") && s.has("__apple_build_version__"),
        decode: |s| Ok((clang(s, CompilerVariant::Apple), "__clang_major__")),
    },
    Rule {
        name: "clang-cl",
        matches: |s| s.has("__clang__") && s.has("_MSC_VER"),
        decode: |s| Ok((clang(s, CompilerVariant::MsvcCompat), "__clang_major__")),
    },
    Rule {
        name: "Clang",
        matches: |s| s.has("__clang__"),
        decode: |s| Ok((clang(s, CompilerVariant::Generic), "__clang_major__")),
    },
    Rule {
        name: "MSVC",
        matches: |s| s.has("_MSC_VER"),
        decode: |s| {
            Ok((
                Compiler::new(CompilerFamily::Msvc, CompilerVariant::Generic, msvc_version(s)),
                "_MSC_VER",
            ))
        },
    },
    Rule {
        name: "GCC",
        matches: |s| s.has("__GNUC__"),
        decode: |s| {
            Ok((
                Compiler::new(
                    CompilerFamily::Gcc,
                    CompilerVariant::Generic,
                    triple(s, "__GNUC__", "__GNUC_MINOR__", "__GNUC_PATCHLEVEL__"),
                ),
                "__GNUC__",
            ))
        },
    },
];

/// Standard library chain. libc++ goes first because it is also used
/// with GCC, and libstdc++ with Clang.
const STDLIB_CHAIN: &[Rule<(Stdlib, &'static str)>] = &[
    Rule {
        name: "libc++",
        matches: |s| s.has("_LIBCPP_VERSION"),
        decode: |s| {
            Ok((
                Stdlib::new(StdlibFamily::LibCxx, libcxx_version(s.int("_LIBCPP_VERSION"))),
                "_LIBCPP_VERSION",
            ))
        },
    },
    Rule {
        name: "libstdc++",
        matches: |s| s.any(&["_GLIBCXX_RELEASE", "__GLIBCXX__"]),
        decode: |s| {
            // _GLIBCXX_RELEASE appeared in GCC 7; older releases only have
            // the __GLIBCXX__ date stamp and decode as 0.0.0.
            let major = s.int("_GLIBCXX_RELEASE").unwrap_or(0);
            Ok((
                Stdlib::new(StdlibFamily::LibStdCxx, Version::new(to_u64(major), 0, 0)),
                if s.has("_GLIBCXX_RELEASE") {
                    "_GLIBCXX_RELEASE"
                } else {
                    "__GLIBCXX__"
                },
            ))
        },
    },
    Rule {
        name: "MSVC STL",
        matches: |s| s.any(&["_MSVC_STL_VERSION", "_CPPLIB_VER"]),
        decode: |s| {
            let version = match s.int("_MSVC_STL_VERSION") {
                Some(v) => Version::new(
                    to_u64(v / 10),
                    to_u64(v % 10),
                    to_u64(s.int("_MSVC_STL_UPDATE").unwrap_or(0)),
                ),
                // VS 2015 and older only define _CPPLIB_VER
                None => Version::new(14, 0, 0),
            };
            Ok((
                Stdlib::new(StdlibFamily::MsvcStl, version),
                if s.has("_MSVC_STL_VERSION") {
                    "_MSVC_STL_VERSION"
                } else {
                    "_CPPLIB_VER"
                },
            ))
        },
    },
];

fn unsupported(vendor: &str, signal: &str) -> ResolveError {
    ResolveError::UnsupportedVendor {
        vendor: vendor.to_string(),
        signal: signal.to_string(),
    }
}

fn to_u64(v: i64) -> u64 {
    u64::try_from(v).unwrap_or(0)
}

/// Version from three separate component signals; missing parts are 0.
fn triple(s: &SignalSet, major: &str, minor: &str, patch: &str) -> Version {
    Version::new(
        to_u64(s.int(major).unwrap_or(0)),
        to_u64(s.int(minor).unwrap_or(0)),
        to_u64(s.int(patch).unwrap_or(0)),
    )
}

fn clang(s: &SignalSet, variant: CompilerVariant) -> Compiler {
    Compiler::new(
        CompilerFamily::Clang,
        variant,
        triple(s, "__clang_major__", "__clang_minor__", "__clang_patchlevel__"),
    )
}

/// `_MSC_FULL_VER` is `MMmmbbbbb` (e.g. `193833135` for 19.38.33135).
fn msvc_version(s: &SignalSet) -> Version {
    if let Some(full) = s.int("_MSC_FULL_VER") {
        return Version::new(
            to_u64(full / 10_000_000),
            to_u64((full / 100_000) % 100),
            to_u64(full % 100_000),
        );
    }
    let short = s.int("_MSC_VER").unwrap_or(0);
    Version::new(to_u64(short / 100), to_u64(short % 100), 0)
}

/// `_LIBCPP_VERSION` is `XXYYZZ` from LLVM 16 on and `XXYYY` before,
/// where the old form never encoded a meaningful minor.
fn libcxx_version(v: Option<i64>) -> Version {
    let v = v.unwrap_or(0);
    if v >= 160_000 {
        Version::new(to_u64(v / 10_000), to_u64((v / 100) % 100), to_u64(v % 100))
    } else {
        Version::new(to_u64(v / 1000), 0, 0)
    }
}

/// Classify the compiler. Returns the compiler and the signal its
/// version was read from.
pub fn classify_compiler(signals: &SignalSet) -> Result<(Compiler, &'static str), ResolveError> {
    first_match(
        COMPILER_CHAIN,
        signals,
        "compiler",
        &["__clang__", "_MSC_VER", "__GNUC__"],
    )
}

/// Classify the standard library.
pub fn classify_stdlib(signals: &SignalSet) -> Result<(Stdlib, &'static str), ResolveError> {
    first_match(
        STDLIB_CHAIN,
        signals,
        "standard library",
        &["_LIBCPP_VERSION", "_GLIBCXX_RELEASE", "_MSVC_STL_VERSION"],
    )
}

/// Minimum supported compiler version.
pub fn compiler_floor(compiler: &Compiler) -> Version {
    match (compiler.family, compiler.variant) {
        (CompilerFamily::Clang, CompilerVariant::Apple) => Version::new(10, 0, 0),
        (CompilerFamily::Clang, CompilerVariant::MsvcCompat) => Version::new(8, 0, 0),
        (CompilerFamily::Clang, CompilerVariant::Generic) => Version::new(6, 0, 0),
        (CompilerFamily::Gcc, _) => Version::new(7, 1, 0),
        (CompilerFamily::Msvc, _) => Version::new(19, 14, 0),
    }
}

/// Minimum supported standard library version.
pub fn stdlib_floor(family: StdlibFamily) -> Version {
    match family {
        StdlibFamily::LibCxx => Version::new(6, 0, 0),
        StdlibFamily::LibStdCxx => Version::new(7, 0, 0),
        StdlibFamily::MsvcStl => Version::new(14, 1, 0),
    }
}
