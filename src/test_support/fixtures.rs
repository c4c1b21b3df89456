//! Recorded signal sets.

use crate::core::{FeatureFamily, SignalSet, SignalValue};

pub const GCC13_LINUX: &str = r#"
#define __GNUC__ 13
#define __GNUC_MINOR__ 2
#define __GNUC_PATCHLEVEL__ 0
#define __VERSION__ "13.2.0"
#define __STDC__ 1
#define __linux__ 1
#define __linux 1
#define __gnu_linux__ 1
#define __unix__ 1
#define __x86_64__ 1
#define __amd64__ 1
#define __LP64__ 1
#define __SIZEOF_POINTER__ 8
#define __SIZEOF_INT128__ 16
#define __SIZEOF_WCHAR_T__ 4
#define __ORDER_LITTLE_ENDIAN__ 1234
#define __ORDER_BIG_ENDIAN__ 4321
#define __ORDER_PDP_ENDIAN__ 3412
#define __BYTE_ORDER__ __ORDER_LITTLE_ENDIAN__
#define __INT_MAX__ 0x7fffffff
#define __has_include(STR) __has_include__(STR)
#define __cplusplus 201703L
#define __GXX_RTTI 1
#define __cpp_rtti 199711L
#define __EXCEPTIONS 1
#define __cpp_exceptions 199711L
#define __cpp_generic_lambdas 201304L
#define __cpp_variable_templates 201304L
#define __cpp_if_constexpr 201606L
#define __cpp_inline_variables 201606L
#define __cpp_structured_bindings 201606L
#define __cpp_fold_expressions 201603L
#define __cpp_deduction_guides 201703L
#define _GLIBCXX_RELEASE 13
#define __GLIBCXX__ 20230727
#define __cpp_lib_make_unique 201304L
#define __cpp_lib_optional 201606L
#define __cpp_lib_variant 202106L
#define __cpp_lib_any 201606L
#define __cpp_lib_string_view 201803L
#define __cpp_lib_filesystem 201703L
#define __cpp_lib_to_chars 201611L
#define __cpp_lib_hardware_interference_size 201703L
#define __cpp_lib_memory_resource 201603L
"#;

pub const GCC5_LINUX: &str = r#"
#define __GNUC__ 5
#define __GNUC_MINOR__ 4
#define __GNUC_PATCHLEVEL__ 0
#define __linux__ 1
#define __x86_64__ 1
#define __SIZEOF_POINTER__ 8
#define __BYTE_ORDER__ __ORDER_LITTLE_ENDIAN__
#define __cplusplus 201402L
#define __GLIBCXX__ 20160609
"#;

pub const CLANG17_LIBCXX_LINUX: &str = r#"
#define __GNUC__ 4
#define __GNUC_MINOR__ 2
#define __GNUC_PATCHLEVEL__ 1
#define __clang__ 1
#define __clang_major__ 17
#define __clang_minor__ 0
#define __clang_patchlevel__ 6
#define __clang_version__ "17.0.6 "
#define __linux__ 1
#define __unix__ 1
#define __x86_64__ 1
#define __SIZEOF_POINTER__ 8
#define __SIZEOF_INT128__ 16
#define __SIZEOF_WCHAR_T__ 4
#define __ORDER_LITTLE_ENDIAN__ 1234
#define __ORDER_BIG_ENDIAN__ 4321
#define __BYTE_ORDER__ __ORDER_LITTLE_ENDIAN__
#define __LITTLE_ENDIAN__ 1
#define __cplusplus 202002L
#define __GXX_RTTI 1
#define __cpp_rtti 199711L
#define __EXCEPTIONS 1
#define __cpp_exceptions 199711L
#define __cpp_generic_lambdas 201707L
#define __cpp_variable_templates 201304L
#define __cpp_if_constexpr 201606L
#define __cpp_inline_variables 201606L
#define __cpp_structured_bindings 201606L
#define __cpp_fold_expressions 201603L
#define __cpp_deduction_guides 201703L
#define __cpp_concepts 201907L
#define __cpp_impl_coroutine 201902L
#define __cpp_consteval 202211L
#define __cpp_impl_three_way_comparison 201907L
#define __cpp_designated_initializers 201707L
#define __cpp_char8_t 202207L
#define _LIBCPP_VERSION 170006
#define _LIBCPP_ABI_VERSION 1
#define __cpp_lib_make_unique 201304L
#define __cpp_lib_optional 202110L
#define __cpp_lib_variant 202106L
#define __cpp_lib_any 201606L
#define __cpp_lib_string_view 201803L
#define __cpp_lib_filesystem 201703L
#define __cpp_lib_memory_resource 201603L
#define __cpp_lib_concepts 202002L
#define __cpp_lib_ranges 202106L
#define __cpp_lib_span 202002L
#define __cpp_lib_bit_cast 201806L
#define __cpp_lib_source_location 201907L
#define __cpp_lib_coroutine 201902L
"#;

pub const CLANG16_LIBSTDCXX_LINUX: &str = r#"
#define __GNUC__ 4
#define __GNUC_MINOR__ 2
#define __GNUC_PATCHLEVEL__ 1
#define __clang__ 1
#define __clang_major__ 16
#define __clang_minor__ 0
#define __clang_patchlevel__ 6
#define __linux__ 1
#define __aarch64__ 1
#define __SIZEOF_POINTER__ 8
#define __SIZEOF_INT128__ 16
#define __SIZEOF_WCHAR_T__ 4
#define __CHAR_UNSIGNED__ 1
#define __ORDER_LITTLE_ENDIAN__ 1234
#define __ORDER_BIG_ENDIAN__ 4321
#define __BYTE_ORDER__ __ORDER_LITTLE_ENDIAN__
#define __cplusplus 201703L
#define __GXX_RTTI 1
#define __cpp_rtti 199711L
#define __EXCEPTIONS 1
#define __cpp_exceptions 199711L
#define __cpp_generic_lambdas 201304L
#define __cpp_variable_templates 201304L
#define __cpp_if_constexpr 201606L
#define __cpp_inline_variables 201606L
#define __cpp_structured_bindings 201606L
#define __cpp_fold_expressions 201603L
#define __cpp_deduction_guides 201703L
#define _GLIBCXX_RELEASE 12
#define __GLIBCXX__ 20220819
#define __cpp_lib_make_unique 201304L
#define __cpp_lib_optional 201606L
#define __cpp_lib_variant 202102L
#define __cpp_lib_any 201606L
#define __cpp_lib_string_view 201803L
#define __cpp_lib_filesystem 201703L
#define __cpp_lib_to_chars 201611L
#define __cpp_lib_hardware_interference_size 201703L
#define __cpp_lib_memory_resource 201603L
"#;

pub const APPLE_CLANG15_MACOS: &str = r#"
#define __GNUC__ 4
#define __GNUC_MINOR__ 2
#define __GNUC_PATCHLEVEL__ 1
#define __clang__ 1
#define __clang_major__ 15
#define __clang_minor__ 0
#define __clang_patchlevel__ 0
#define __apple_build_version__ 15000040
#define __APPLE__ 1
#define __APPLE_CC__ 6000
#define __MACH__ 1
#define __ENVIRONMENT_MAC_OS_X_VERSION_MIN_REQUIRED__ 130000
#define __ENVIRONMENT_OS_VERSION_MIN_REQUIRED__ 130000
#define __aarch64__ 1
#define __arm64__ 1
#define __SIZEOF_POINTER__ 8
#define __SIZEOF_INT128__ 16
#define __SIZEOF_WCHAR_T__ 4
#define __ORDER_LITTLE_ENDIAN__ 1234
#define __ORDER_BIG_ENDIAN__ 4321
#define __BYTE_ORDER__ __ORDER_LITTLE_ENDIAN__
#define __cplusplus 202002L
#define __GXX_RTTI 1
#define __cpp_rtti 199711L
#define __EXCEPTIONS 1
#define __cpp_exceptions 199711L
#define __cpp_generic_lambdas 201707L
#define __cpp_variable_templates 201304L
#define __cpp_if_constexpr 201606L
#define __cpp_inline_variables 201606L
#define __cpp_structured_bindings 201606L
#define __cpp_fold_expressions 201603L
#define __cpp_deduction_guides 201703L
#define __cpp_concepts 201907L
#define __cpp_impl_coroutine 201902L
#define __cpp_consteval 201811L
#define __cpp_impl_three_way_comparison 201907L
#define __cpp_designated_initializers 201707L
#define __cpp_char8_t 201811L
#define _LIBCPP_VERSION 160006
#define __cpp_lib_make_unique 201304L
#define __cpp_lib_optional 202106L
#define __cpp_lib_variant 202106L
#define __cpp_lib_any 201606L
#define __cpp_lib_string_view 201803L
#define __cpp_lib_filesystem 201703L
#define __cpp_lib_concepts 202002L
#define __cpp_lib_span 202002L
#define __cpp_lib_bit_cast 201806L
#define __cpp_lib_source_location 201907L
#define __cpp_lib_coroutine 201902L
"#;

pub const MSVC1938_WINDOWS: &str = r#"
#define _MSC_VER 1938
#define _MSC_FULL_VER 193833135
#define _MSC_BUILD 0
#define _MSC_EXTENSIONS 1
#define _WIN32 1
#define _WIN64 1
#define _M_X64 100
#define _M_AMD64 100
#define _MSVC_LANG 202002L
#define __cplusplus 199711L
#define _CPPRTTI 1
#define _CPPUNWIND 1
#define _NATIVE_WCHAR_T_DEFINED 1
#define _MSVC_STL_VERSION 143
#define _MSVC_STL_UPDATE 202308L
#define _CPPLIB_VER 650
#define __cpp_lib_make_unique 201304L
#define __cpp_lib_optional 202110L
#define __cpp_lib_variant 202106L
#define __cpp_lib_any 201606L
#define __cpp_lib_string_view 201803L
#define __cpp_lib_filesystem 201703L
#define __cpp_lib_to_chars 201611L
#define __cpp_lib_execution 201603L
#define __cpp_lib_hardware_interference_size 201703L
#define __cpp_lib_memory_resource 201603L
#define __cpp_lib_concepts 202002L
#define __cpp_lib_ranges 202110L
#define __cpp_lib_span 202002L
#define __cpp_lib_bit_cast 201806L
#define __cpp_lib_format 202110L
#define __cpp_lib_source_location 201907L
#define __cpp_lib_coroutine 201902L
#define __cpp_lib_jthread 201911L
"#;

pub const CLANG_CL17_WINDOWS: &str = r#"
#define __clang__ 1
#define __clang_major__ 17
#define __clang_minor__ 0
#define __clang_patchlevel__ 1
#define _MSC_VER 1938
#define _MSC_FULL_VER 193833135
#define _WIN32 1
#define _WIN64 1
#define _M_X64 100
#define _M_AMD64 100
#define __x86_64__ 1
#define __SIZEOF_POINTER__ 8
#define __SIZEOF_WCHAR_T__ 2
#define __ORDER_LITTLE_ENDIAN__ 1234
#define __ORDER_BIG_ENDIAN__ 4321
#define __BYTE_ORDER__ __ORDER_LITTLE_ENDIAN__
#define _MSVC_LANG 201703L
#define __cplusplus 201703L
#define _CPPRTTI 1
#define __cpp_rtti 199711L
#define __cpp_generic_lambdas 201304L
#define __cpp_variable_templates 201304L
#define __cpp_if_constexpr 201606L
#define __cpp_inline_variables 201606L
#define __cpp_structured_bindings 201606L
#define __cpp_fold_expressions 201603L
#define __cpp_deduction_guides 201703L
#define _MSVC_STL_VERSION 143
#define _MSVC_STL_UPDATE 202308L
#define __cpp_lib_make_unique 201304L
#define __cpp_lib_optional 201606L
#define __cpp_lib_variant 202102L
#define __cpp_lib_any 201606L
#define __cpp_lib_string_view 201606L
#define __cpp_lib_filesystem 201703L
#define __cpp_lib_to_chars 201611L
#define __cpp_lib_execution 201603L
#define __cpp_lib_hardware_interference_size 201703L
#define __cpp_lib_memory_resource 201603L
"#;

/// GCC 13.2 with libstdc++ on x86-64 Linux, `-std=c++17`.
pub fn gcc13_linux() -> SignalSet {
    SignalSet::parse_defines(GCC13_LINUX)
}

/// GCC 5.4, below the supported floor.
pub fn gcc5_linux() -> SignalSet {
    SignalSet::parse_defines(GCC5_LINUX)
}

/// Clang 17 with libc++ on x86-64 Linux, `-std=c++20`.
pub fn clang17_libcxx_linux() -> SignalSet {
    SignalSet::parse_defines(CLANG17_LIBCXX_LINUX)
}

/// Clang 16 with libstdc++ 12 on AArch64 Linux, `-std=c++17`.
pub fn clang16_libstdcxx_linux() -> SignalSet {
    SignalSet::parse_defines(CLANG16_LIBSTDCXX_LINUX)
}

/// Apple Clang 15 on Apple silicon, deployment target macOS 13.0,
/// `-std=c++20`.
pub fn apple_clang15_macos() -> SignalSet {
    SignalSet::parse_defines(APPLE_CLANG15_MACOS)
}

/// MSVC 19.38 (VS 17.8) on x64, `/std:c++20`.
pub fn msvc1938_windows() -> SignalSet {
    SignalSet::parse_defines(MSVC1938_WINDOWS)
}

/// clang-cl 17 with the MSVC STL on x64, `/std:c++17`.
pub fn clang_cl17_windows() -> SignalSet {
    SignalSet::parse_defines(CLANG_CL17_WINDOWS)
}

/// Every supported fixture, by name.
pub fn all() -> Vec<(&'static str, SignalSet)> {
    vec![
        ("gcc13_linux", gcc13_linux()),
        ("clang17_libcxx_linux", clang17_libcxx_linux()),
        ("clang16_libstdcxx_linux", clang16_libstdcxx_linux()),
        ("apple_clang15_macos", apple_clang15_macos()),
        ("msvc1938_windows", msvc1938_windows()),
        ("clang_cl17_windows", clang_cl17_windows()),
    ]
}

/// `base` with the given signals added or replaced.
pub fn with_signals(base: &SignalSet, extra: &[(&str, i64)]) -> SignalSet {
    base.iter()
        .filter(|(name, _)| !extra.iter().any(|(n, _)| n == name))
        .map(|(name, value)| (name.to_string(), value.clone()))
        .chain(
            extra
                .iter()
                .map(|(name, value)| (name.to_string(), SignalValue::Int(*value))),
        )
        .collect()
}

/// `base` without the named signals.
pub fn without_signals(base: &SignalSet, names: &[&str]) -> SignalSet {
    base.iter()
        .filter(|(name, _)| !names.contains(name))
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

/// `base` without any feature-test macro of `family`.
pub fn without_family(base: &SignalSet, family: FeatureFamily) -> SignalSet {
    base.iter()
        .filter(|(name, _)| FeatureFamily::of(name) != Some(family))
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}
