//! Classified toolchain identity.
//!
//! An [`Identity`] is the single (compiler, standard library, OS) tuple a
//! resolution pass works against. Each component carries its family tag
//! and decoded version.

use std::fmt;

use semver::Version;
use serde::{Deserialize, Serialize};

/// Compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerFamily {
    Clang,
    Gcc,
    Msvc,
}

impl CompilerFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerFamily::Clang => "clang",
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Msvc => "msvc",
        }
    }
}

/// Vendor variant within a compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilerVariant {
    /// Upstream releases
    Generic,
    /// Apple's rebadged clang, which has its own version numbering
    Apple,
    /// MSVC-compatible driver (clang-cl)
    MsvcCompat,
}

/// The classified compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compiler {
    pub family: CompilerFamily,
    pub variant: CompilerVariant,
    pub version: Version,
}

impl Compiler {
    pub fn new(family: CompilerFamily, variant: CompilerVariant, version: Version) -> Self {
        Compiler {
            family,
            variant,
            version,
        }
    }

    /// Human-readable vendor name.
    pub fn name(&self) -> &'static str {
        match (self.family, self.variant) {
            (CompilerFamily::Clang, CompilerVariant::Apple) => "Apple Clang",
            (CompilerFamily::Clang, CompilerVariant::MsvcCompat) => "clang-cl",
            (CompilerFamily::Clang, _) => "Clang",
            (CompilerFamily::Gcc, _) => "GCC",
            (CompilerFamily::Msvc, _) => "MSVC",
        }
    }

    /// Whether the front end follows MSVC conventions (`_MSVC_LANG`,
    /// `__declspec`, MSVC calling-convention keywords).
    pub fn is_msvc_like(&self) -> bool {
        self.family == CompilerFamily::Msvc || self.variant == CompilerVariant::MsvcCompat
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.version)
    }
}

/// Standard library family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StdlibFamily {
    LibCxx,
    LibStdCxx,
    MsvcStl,
}

impl StdlibFamily {
    pub fn name(&self) -> &'static str {
        match self {
            StdlibFamily::LibCxx => "libc++",
            StdlibFamily::LibStdCxx => "libstdc++",
            StdlibFamily::MsvcStl => "MSVC STL",
        }
    }
}

/// The classified standard library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stdlib {
    pub family: StdlibFamily,
    pub version: Version,
}

impl Stdlib {
    pub fn new(family: StdlibFamily, version: Version) -> Self {
        Stdlib { family, version }
    }
}

impl fmt::Display for Stdlib {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family.name(), self.version)
    }
}

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Linux,
    Android,
    MacOs,
    Ios,
    Windows,
    FreeBsd,
}

impl OsFamily {
    pub fn name(&self) -> &'static str {
        match self {
            OsFamily::Linux => "Linux",
            OsFamily::Android => "Android",
            OsFamily::MacOs => "macOS",
            OsFamily::Ios => "iOS",
            OsFamily::Windows => "Windows",
            OsFamily::FreeBsd => "FreeBSD",
        }
    }
}

/// The classified operating system, with the minimum deployment version
/// when the toolchain reports one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Os {
    pub family: OsFamily,
    pub version: Option<Version>,
}

impl Os {
    pub fn new(family: OsFamily, version: Option<Version>) -> Self {
        Os { family, version }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{} {}", self.family.name(), v),
            None => f.write_str(self.family.name()),
        }
    }
}

/// The single identity active for a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub compiler: Compiler,
    pub stdlib: Stdlib,
    pub os: Os,
}

impl Identity {
    /// Human-readable identity strings, generated once per pass.
    pub fn describe(&self) -> IdentityStrings {
        IdentityStrings {
            compiler: self.compiler.to_string(),
            stdlib: self.stdlib.to_string(),
            os: self.os.to_string(),
        }
    }

    /// Preprocessor-style identity tokens (`LBAL_COMPILER_CLANG 1`, ...).
    ///
    /// Versions are packed as `MMmmpp` (major × 10000 + minor × 100 +
    /// patch), with minor and patch clamped so that MSVC build numbers do
    /// not spill into the major digits.
    pub fn tokens(&self) -> Vec<(String, i64)> {
        let compiler_token = match (self.compiler.family, self.compiler.variant) {
            (CompilerFamily::Clang, CompilerVariant::Apple) => "LBAL_COMPILER_APPLE_CLANG",
            (CompilerFamily::Clang, CompilerVariant::MsvcCompat) => "LBAL_COMPILER_CLANG_CL",
            (CompilerFamily::Clang, _) => "LBAL_COMPILER_CLANG",
            (CompilerFamily::Gcc, _) => "LBAL_COMPILER_GCC",
            (CompilerFamily::Msvc, _) => "LBAL_COMPILER_MSVC",
        };
        let stdlib_token = match self.stdlib.family {
            StdlibFamily::LibCxx => "LBAL_STDLIB_LIBCXX",
            StdlibFamily::LibStdCxx => "LBAL_STDLIB_LIBSTDCXX",
            StdlibFamily::MsvcStl => "LBAL_STDLIB_MSVC_STL",
        };
        let os_token = match self.os.family {
            OsFamily::Linux => "LBAL_OS_LINUX",
            OsFamily::Android => "LBAL_OS_ANDROID",
            OsFamily::MacOs => "LBAL_OS_MACOS",
            OsFamily::Ios => "LBAL_OS_IOS",
            OsFamily::Windows => "LBAL_OS_WINDOWS",
            OsFamily::FreeBsd => "LBAL_OS_FREEBSD",
        };

        let mut tokens = vec![
            (compiler_token.to_string(), 1),
            (
                "LBAL_COMPILER_VERSION".to_string(),
                pack_version(&self.compiler.version),
            ),
            (stdlib_token.to_string(), 1),
            (
                "LBAL_STDLIB_VERSION".to_string(),
                pack_version(&self.stdlib.version),
            ),
            (os_token.to_string(), 1),
        ];
        if let Some(ref v) = self.os.version {
            tokens.push(("LBAL_OS_VERSION".to_string(), pack_version(v)));
        }
        tokens
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.compiler, self.stdlib, self.os)
    }
}

/// Largest major that still packs into an `i64`.
const MAX_PACKED_MAJOR: u64 = (i64::MAX as u64 - 9999) / 10000;

/// Pack a version as `MMmmpp`. Components are clamped to their fields.
pub fn pack_version(v: &Version) -> i64 {
    let major = v.major.min(MAX_PACKED_MAJOR) as i64;
    let minor = v.minor.min(99) as i64;
    let patch = v.patch.min(99) as i64;
    major * 10000 + minor * 100 + patch
}

/// Display strings for diagnostics and logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityStrings {
    pub compiler: String,
    pub stdlib: String,
    pub os: String,
}
