//! The capability catalog.
//!
//! Vendor-independent: probes, platform availability gates and constants
//! live here; version proxies live in the per-vendor modules and are
//! attached by [`RuleTable::for_identity`](super::RuleTable::for_identity).

use super::{Detection, EntrySpec};
use crate::core::{CapabilityValue, CppStandard, Endian, OsFamily, TargetFact};

use CppStandard::{Cpp14, Cpp17, Cpp20, Cpp23, Cpp98};

/// Every known capability, in evaluation order within each epoch.
pub fn catalog() -> Vec<EntrySpec> {
    let mut entries = target_entries();
    entries.extend(language_entries());
    entries.extend(library_entries());
    entries.extend(derived_entries());
    entries
}

fn target_entries() -> Vec<EntrySpec> {
    let absent = Detection::Constant(CapabilityValue::Flag(false));

    vec![
        EntrySpec::level("LBAL_CPP_VERSION", Cpp98).rule(Detection::LanguageLevel),
        EntrySpec::level("LBAL_TARGET_PTR_WIDTH", Cpp98)
            .rule(Detection::Scaled {
                signal: "__SIZEOF_POINTER__",
                factor: 8,
            })
            .rule(Detection::Target(TargetFact::PointerWidth)),
        byte_order_entry("LBAL_TARGET_LITTLE_ENDIAN", Endian::Little),
        byte_order_entry("LBAL_TARGET_BIG_ENDIAN", Endian::Big),
        EntrySpec::flag("LBAL_RTTI", Cpp98)
            .probe("__cpp_rtti", 199711)
            .probe("__GXX_RTTI", 1)
            .probe("_CPPRTTI", 1)
            .rule(absent.clone()),
        EntrySpec::flag("LBAL_EXCEPTIONS", Cpp98)
            .probe("__cpp_exceptions", 199711)
            .probe("__EXCEPTIONS", 1)
            .probe("_CPPUNWIND", 1)
            .rule(absent.clone()),
        EntrySpec::flag("LBAL_INT128", Cpp98)
            .probe("__SIZEOF_INT128__", 16)
            .rule(absent.clone()),
        EntrySpec::flag("LBAL_CHAR_UNSIGNED", Cpp98)
            .probe("__CHAR_UNSIGNED__", 1)
            .probe("_CHAR_UNSIGNED", 1)
            .rule(absent),
        EntrySpec::level("LBAL_WCHAR_WIDTH", Cpp98)
            .rule(Detection::Scaled {
                signal: "__SIZEOF_WCHAR_T__",
                factor: 8,
            })
            .rule(Detection::OnOs {
                os: OsFamily::Windows,
                value: CapabilityValue::Level(16),
            }),
    ]
}

/// Windows and Apple platforms are little-endian only; elsewhere the
/// architecture decides unless it is bi-endian.
fn byte_order_entry(name: &'static str, endian: Endian) -> EntrySpec {
    let little = CapabilityValue::Flag(endian == Endian::Little);
    [OsFamily::Windows, OsFamily::MacOs, OsFamily::Ios]
        .into_iter()
        .fold(
            EntrySpec::flag(name, Cpp98).rule(Detection::ByteOrder(endian)),
            |entry, os| entry.rule(Detection::OnOs { os, value: little }),
        )
        .rule(Detection::Target(TargetFact::IsEndian(endian)))
}

fn language_entries() -> Vec<EntrySpec> {
    vec![
        EntrySpec::level("LBAL_CPP14_GENERIC_LAMBDAS", Cpp14).probe("__cpp_generic_lambdas", 201304),
        EntrySpec::level("LBAL_CPP14_VARIABLE_TEMPLATES", Cpp14)
            .probe("__cpp_variable_templates", 201304),
        EntrySpec::level("LBAL_CPP17_IF_CONSTEXPR", Cpp17).probe("__cpp_if_constexpr", 201606),
        EntrySpec::level("LBAL_CPP17_INLINE_VARIABLES", Cpp17)
            .probe("__cpp_inline_variables", 201606),
        EntrySpec::level("LBAL_CPP17_STRUCTURED_BINDINGS", Cpp17)
            .probe("__cpp_structured_bindings", 201606),
        EntrySpec::level("LBAL_CPP17_FOLD_EXPRESSIONS", Cpp17)
            .probe("__cpp_fold_expressions", 201603),
        EntrySpec::level("LBAL_CPP17_DEDUCTION_GUIDES", Cpp17)
            .probe("__cpp_deduction_guides", 201703),
        EntrySpec::level("LBAL_CPP20_CONCEPTS", Cpp20).probe("__cpp_concepts", 201907),
        EntrySpec::level("LBAL_CPP20_COROUTINES", Cpp20).probe("__cpp_impl_coroutine", 201902),
        EntrySpec::level("LBAL_CPP20_CONSTEVAL", Cpp20).probe("__cpp_consteval", 201811),
        EntrySpec::level("LBAL_CPP20_THREE_WAY_COMPARISON", Cpp20)
            .probe("__cpp_impl_three_way_comparison", 201907),
        EntrySpec::level("LBAL_CPP20_DESIGNATED_INITIALIZERS", Cpp20)
            .probe("__cpp_designated_initializers", 201707),
        EntrySpec::level("LBAL_CPP20_CHAR8_T", Cpp20).probe("__cpp_char8_t", 201811),
        EntrySpec::level("LBAL_CPP23_IF_CONSTEVAL", Cpp23).probe("__cpp_if_consteval", 202106),
        EntrySpec::level("LBAL_CPP23_EXPLICIT_THIS", Cpp23)
            .probe("__cpp_explicit_this_parameter", 202110),
        EntrySpec::level("LBAL_CPP23_MULTIDIM_SUBSCRIPT", Cpp23)
            .probe("__cpp_multidimensional_subscript", 202110),
        EntrySpec::level("LBAL_CPP23_STATIC_CALL_OPERATOR", Cpp23)
            .probe("__cpp_static_call_operator", 202207),
    ]
}

fn library_entries() -> Vec<EntrySpec> {
    use OsFamily::{Ios, MacOs};

    vec![
        EntrySpec::level("LBAL_LIBCPP14_MAKE_UNIQUE", Cpp14).probe("__cpp_lib_make_unique", 201304),
        // bad_optional_access and friends live in the system dylib
        EntrySpec::level("LBAL_LIBCPP17_OPTIONAL", Cpp17)
            .unavailable_below(MacOs, (10, 14, 0))
            .unavailable_below(Ios, (12, 0, 0))
            .probe("__cpp_lib_optional", 201606),
        EntrySpec::level("LBAL_LIBCPP17_VARIANT", Cpp17)
            .unavailable_below(MacOs, (10, 14, 0))
            .unavailable_below(Ios, (12, 0, 0))
            .probe("__cpp_lib_variant", 201606),
        EntrySpec::level("LBAL_LIBCPP17_ANY", Cpp17)
            .unavailable_below(MacOs, (10, 14, 0))
            .unavailable_below(Ios, (12, 0, 0))
            .probe("__cpp_lib_any", 201606),
        EntrySpec::level("LBAL_LIBCPP17_STRING_VIEW", Cpp17).probe("__cpp_lib_string_view", 201603),
        EntrySpec::level("LBAL_LIBCPP17_FILESYSTEM", Cpp17)
            .unavailable_below(MacOs, (10, 15, 0))
            .unavailable_below(Ios, (13, 0, 0))
            .probe("__cpp_lib_filesystem", 201703),
        EntrySpec::level("LBAL_LIBCPP17_CHARCONV", Cpp17)
            .unavailable_below(MacOs, (13, 3, 0))
            .unavailable_below(Ios, (16, 3, 0))
            .probe("__cpp_lib_to_chars", 201611),
        EntrySpec::level("LBAL_LIBCPP17_PARALLEL_ALGORITHMS", Cpp17)
            .probe("__cpp_lib_execution", 201603),
        EntrySpec::level("LBAL_LIBCPP17_HARDWARE_INTERFERENCE_SIZE", Cpp17)
            .probe("__cpp_lib_hardware_interference_size", 201703),
        EntrySpec::level("LBAL_LIBCPP17_MEMORY_RESOURCE", Cpp17)
            .unavailable_below(MacOs, (14, 0, 0))
            .unavailable_below(Ios, (17, 0, 0))
            .probe("__cpp_lib_memory_resource", 201603),
        EntrySpec::level("LBAL_LIBCPP20_CONCEPTS", Cpp20)
            .refines("LBAL_CPP20_CONCEPTS")
            .probe("__cpp_lib_concepts", 202002),
        EntrySpec::level("LBAL_LIBCPP20_RANGES", Cpp20)
            .refines("LBAL_LIBCPP20_CONCEPTS")
            .probe("__cpp_lib_ranges", 201911),
        EntrySpec::level("LBAL_LIBCPP20_SPAN", Cpp20).probe("__cpp_lib_span", 202002),
        EntrySpec::level("LBAL_LIBCPP20_BIT_CAST", Cpp20).probe("__cpp_lib_bit_cast", 201806),
        // std::format of floating-point values needs to_chars from the dylib
        EntrySpec::level("LBAL_LIBCPP20_FORMAT", Cpp20)
            .unavailable_below(MacOs, (13, 3, 0))
            .unavailable_below(Ios, (16, 3, 0))
            .probe("__cpp_lib_format", 201907),
        EntrySpec::level("LBAL_LIBCPP20_SOURCE_LOCATION", Cpp20)
            .probe("__cpp_lib_source_location", 201907),
        EntrySpec::level("LBAL_LIBCPP20_JTHREAD", Cpp20)
            .unavailable_below(MacOs, (11, 0, 0))
            .unavailable_below(Ios, (14, 0, 0))
            .probe("__cpp_lib_jthread", 201911),
        EntrySpec::level("LBAL_LIBCPP20_COROUTINE", Cpp20)
            .refines("LBAL_CPP20_COROUTINES")
            .probe("__cpp_lib_coroutine", 201902),
        EntrySpec::level("LBAL_LIBCPP23_EXPECTED", Cpp23).probe("__cpp_lib_expected", 202202),
        EntrySpec::level("LBAL_LIBCPP23_PRINT", Cpp23)
            .refines("LBAL_LIBCPP20_FORMAT")
            .probe("__cpp_lib_print", 202207),
        EntrySpec::level("LBAL_LIBCPP23_MDSPAN", Cpp23).probe("__cpp_lib_mdspan", 202207),
        EntrySpec::level("LBAL_LIBCPP23_STACKTRACE", Cpp23).probe("__cpp_lib_stacktrace", 202011),
    ]
}

fn derived_entries() -> Vec<EntrySpec> {
    vec![EntrySpec::flag("LBAL_CPP20_COROUTINE_SUPPORT", Cpp20).rule(Detection::Requires(&[
        "LBAL_CPP20_COROUTINES",
        "LBAL_LIBCPP20_COROUTINE",
    ]))]
}
