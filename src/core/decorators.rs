//! Declaration decorators.
//!
//! Visibility, inlining and calling-convention spellings are a direct
//! lookup on the identity; there is no detection involved. Calling
//! conventions only exist on x86 targets and expand to nothing elsewhere.

use std::collections::BTreeMap;

use crate::core::identity::{Identity, OsFamily};
use crate::core::target::{Arch, Target};

/// Decorator name to textual token.
pub type DecoratorMap = BTreeMap<&'static str, &'static str>;

/// Look up the decorator spellings for an identity.
pub fn decorators(identity: &Identity, target: &Target) -> DecoratorMap {
    let mut map = DecoratorMap::new();
    let msvc_like = identity.compiler.is_msvc_like();
    let windows = identity.os.family == OsFamily::Windows;

    // Visibility
    if windows {
        if msvc_like {
            map.insert("LBAL_EXPORT", "__declspec(dllexport)");
            map.insert("LBAL_IMPORT", "__declspec(dllimport)");
        } else {
            // MinGW-style GCC/Clang
            map.insert("LBAL_EXPORT", "__attribute__((dllexport))");
            map.insert("LBAL_IMPORT", "__attribute__((dllimport))");
        }
        map.insert("LBAL_HIDDEN", "");
    } else {
        map.insert("LBAL_EXPORT", "__attribute__((visibility(\"default\")))");
        map.insert("LBAL_IMPORT", "__attribute__((visibility(\"default\")))");
        map.insert("LBAL_HIDDEN", "__attribute__((visibility(\"hidden\")))");
    }

    // Inlining and aliasing
    if msvc_like {
        map.insert("LBAL_FORCE_INLINE", "__forceinline");
        map.insert("LBAL_NOINLINE", "__declspec(noinline)");
        map.insert("LBAL_RESTRICT", "__restrict");
        map.insert("LBAL_FUNCTION_SIGNATURE", "__FUNCSIG__");
    } else {
        map.insert("LBAL_FORCE_INLINE", "inline __attribute__((always_inline))");
        map.insert("LBAL_NOINLINE", "__attribute__((noinline))");
        map.insert("LBAL_RESTRICT", "__restrict__");
        map.insert("LBAL_FUNCTION_SIGNATURE", "__PRETTY_FUNCTION__");
    }

    // Calling conventions: meaningful on 32-bit x86, `vectorcall` also on x86-64
    let x86 = target.arch.has_x86_calling_conventions();
    let x86_32 = target.arch == Arch::X86;
    let (cdecl, stdcall, fastcall, vectorcall) = if !x86 {
        ("", "", "", "")
    } else if msvc_like {
        (
            if x86_32 { "__cdecl" } else { "" },
            if x86_32 { "__stdcall" } else { "" },
            if x86_32 { "__fastcall" } else { "" },
            "__vectorcall",
        )
    } else if x86_32 {
        (
            "__attribute__((cdecl))",
            "__attribute__((stdcall))",
            "__attribute__((fastcall))",
            "",
        )
    } else {
        ("", "", "", "")
    };
    map.insert("LBAL_CDECL", cdecl);
    map.insert("LBAL_STDCALL", stdcall);
    map.insert("LBAL_FASTCALL", fastcall);
    map.insert("LBAL_VECTORCALL", vectorcall);

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::*;
    use semver::Version;

    fn identity(family: CompilerFamily, variant: CompilerVariant, os: OsFamily) -> Identity {
        Identity {
            compiler: Compiler::new(family, variant, Version::new(17, 0, 0)),
            stdlib: Stdlib::new(StdlibFamily::LibStdCxx, Version::new(13, 0, 0)),
            os: Os::new(os, None),
        }
    }

    #[test]
    fn test_elf_visibility() {
        let id = identity(CompilerFamily::Gcc, CompilerVariant::Generic, OsFamily::Linux);
        let map = decorators(&id, &Target::new(Arch::X86_64));
        assert_eq!(
            map["LBAL_HIDDEN"],
            "__attribute__((visibility(\"hidden\")))"
        );
        assert_eq!(map["LBAL_CDECL"], "");
        assert_eq!(map["LBAL_FUNCTION_SIGNATURE"], "__PRETTY_FUNCTION__");
    }

    #[test]
    fn test_msvc_x86() {
        let id = identity(CompilerFamily::Msvc, CompilerVariant::Generic, OsFamily::Windows);
        let map = decorators(&id, &Target::new(Arch::X86));
        assert_eq!(map["LBAL_EXPORT"], "__declspec(dllexport)");
        assert_eq!(map["LBAL_STDCALL"], "__stdcall");
        assert_eq!(map["LBAL_VECTORCALL"], "__vectorcall");
    }

    #[test]
    fn test_clang_cl_uses_msvc_spellings() {
        let id = identity(
            CompilerFamily::Clang,
            CompilerVariant::MsvcCompat,
            OsFamily::Windows,
        );
        let map = decorators(&id, &Target::new(Arch::Aarch64));
        assert_eq!(map["LBAL_FORCE_INLINE"], "__forceinline");
        assert_eq!(map["LBAL_VECTORCALL"], "");
    }
}
