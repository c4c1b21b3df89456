//! Clang, Apple Clang and libc++ version proxies.

use super::MinVersion;

/// Upstream numbering, shared by clang-cl.
pub(super) const COMPILER: &[(&str, MinVersion)] = &[
    ("LBAL_CPP14_GENERIC_LAMBDAS", (3, 4, 0)),
    ("LBAL_CPP14_VARIABLE_TEMPLATES", (3, 4, 0)),
    ("LBAL_CPP17_IF_CONSTEXPR", (3, 9, 0)),
    ("LBAL_CPP17_INLINE_VARIABLES", (3, 9, 0)),
    ("LBAL_CPP17_STRUCTURED_BINDINGS", (4, 0, 0)),
    ("LBAL_CPP17_FOLD_EXPRESSIONS", (3, 6, 0)),
    ("LBAL_CPP17_DEDUCTION_GUIDES", (5, 0, 0)),
    ("LBAL_CPP20_CONCEPTS", (10, 0, 0)),
    ("LBAL_CPP20_COROUTINES", (14, 0, 0)),
    ("LBAL_CPP20_CONSTEVAL", (17, 0, 0)),
    ("LBAL_CPP20_THREE_WAY_COMPARISON", (10, 0, 0)),
    ("LBAL_CPP20_DESIGNATED_INITIALIZERS", (10, 0, 0)),
    ("LBAL_CPP20_CHAR8_T", (7, 0, 0)),
    ("LBAL_CPP23_IF_CONSTEVAL", (14, 0, 0)),
    ("LBAL_CPP23_EXPLICIT_THIS", (18, 1, 0)),
    ("LBAL_CPP23_MULTIDIM_SUBSCRIPT", (15, 0, 0)),
    ("LBAL_CPP23_STATIC_CALL_OPERATOR", (16, 0, 0)),
];

/// Apple's own numbering (Xcode releases).
pub(super) const APPLE_COMPILER: &[(&str, MinVersion)] = &[
    ("LBAL_CPP14_GENERIC_LAMBDAS", (6, 0, 0)),
    ("LBAL_CPP14_VARIABLE_TEMPLATES", (6, 0, 0)),
    ("LBAL_CPP17_IF_CONSTEXPR", (9, 0, 0)),
    ("LBAL_CPP17_INLINE_VARIABLES", (9, 0, 0)),
    ("LBAL_CPP17_STRUCTURED_BINDINGS", (9, 0, 0)),
    ("LBAL_CPP17_FOLD_EXPRESSIONS", (7, 0, 0)),
    ("LBAL_CPP17_DEDUCTION_GUIDES", (10, 0, 0)),
    ("LBAL_CPP20_CONCEPTS", (12, 0, 0)),
    ("LBAL_CPP20_COROUTINES", (14, 0, 3)),
    ("LBAL_CPP20_CONSTEVAL", (16, 0, 0)),
    ("LBAL_CPP20_THREE_WAY_COMPARISON", (12, 0, 0)),
    ("LBAL_CPP20_DESIGNATED_INITIALIZERS", (12, 0, 0)),
    ("LBAL_CPP20_CHAR8_T", (10, 0, 1)),
    ("LBAL_CPP23_IF_CONSTEVAL", (14, 0, 3)),
    ("LBAL_CPP23_MULTIDIM_SUBSCRIPT", (15, 0, 0)),
    ("LBAL_CPP23_STATIC_CALL_OPERATOR", (15, 0, 0)),
];

pub(super) const LIBCXX: &[(&str, MinVersion)] = &[
    ("LBAL_LIBCPP14_MAKE_UNIQUE", (3, 4, 0)),
    ("LBAL_LIBCPP17_OPTIONAL", (4, 0, 0)),
    ("LBAL_LIBCPP17_VARIANT", (4, 0, 0)),
    ("LBAL_LIBCPP17_ANY", (4, 0, 0)),
    ("LBAL_LIBCPP17_STRING_VIEW", (4, 0, 0)),
    ("LBAL_LIBCPP17_FILESYSTEM", (9, 0, 0)),
    ("LBAL_LIBCPP17_HARDWARE_INTERFERENCE_SIZE", (19, 1, 0)),
    ("LBAL_LIBCPP17_MEMORY_RESOURCE", (16, 0, 0)),
    ("LBAL_LIBCPP20_CONCEPTS", (13, 0, 0)),
    ("LBAL_LIBCPP20_RANGES", (16, 0, 0)),
    ("LBAL_LIBCPP20_SPAN", (7, 0, 0)),
    ("LBAL_LIBCPP20_BIT_CAST", (14, 0, 0)),
    ("LBAL_LIBCPP20_FORMAT", (17, 0, 0)),
    ("LBAL_LIBCPP20_SOURCE_LOCATION", (16, 0, 0)),
    ("LBAL_LIBCPP20_JTHREAD", (18, 1, 0)),
    ("LBAL_LIBCPP20_COROUTINE", (14, 0, 0)),
    ("LBAL_LIBCPP23_EXPECTED", (16, 0, 0)),
    ("LBAL_LIBCPP23_PRINT", (18, 1, 0)),
    ("LBAL_LIBCPP23_MDSPAN", (18, 1, 0)),
];
