//! GCC and libstdc++ version proxies.
//!
//! libstdc++ versions come from `_GLIBCXX_RELEASE`, which only carries the
//! major release.

use super::MinVersion;

pub(super) const COMPILER: &[(&str, MinVersion)] = &[
    ("LBAL_CPP14_GENERIC_LAMBDAS", (4, 9, 0)),
    ("LBAL_CPP14_VARIABLE_TEMPLATES", (5, 1, 0)),
    ("LBAL_CPP17_IF_CONSTEXPR", (7, 1, 0)),
    ("LBAL_CPP17_INLINE_VARIABLES", (7, 1, 0)),
    ("LBAL_CPP17_STRUCTURED_BINDINGS", (7, 1, 0)),
    ("LBAL_CPP17_FOLD_EXPRESSIONS", (6, 1, 0)),
    ("LBAL_CPP17_DEDUCTION_GUIDES", (8, 1, 0)),
    ("LBAL_CPP20_CONCEPTS", (10, 1, 0)),
    // GCC 10 still needs -fcoroutines
    ("LBAL_CPP20_COROUTINES", (11, 1, 0)),
    ("LBAL_CPP20_CONSTEVAL", (10, 1, 0)),
    ("LBAL_CPP20_THREE_WAY_COMPARISON", (10, 1, 0)),
    ("LBAL_CPP20_DESIGNATED_INITIALIZERS", (8, 1, 0)),
    ("LBAL_CPP20_CHAR8_T", (9, 1, 0)),
    ("LBAL_CPP23_IF_CONSTEVAL", (12, 1, 0)),
    ("LBAL_CPP23_EXPLICIT_THIS", (14, 1, 0)),
    ("LBAL_CPP23_MULTIDIM_SUBSCRIPT", (12, 1, 0)),
    ("LBAL_CPP23_STATIC_CALL_OPERATOR", (13, 1, 0)),
];

pub(super) const LIBSTDCXX: &[(&str, MinVersion)] = &[
    ("LBAL_LIBCPP14_MAKE_UNIQUE", (5, 0, 0)),
    ("LBAL_LIBCPP17_OPTIONAL", (7, 0, 0)),
    ("LBAL_LIBCPP17_VARIANT", (7, 0, 0)),
    ("LBAL_LIBCPP17_ANY", (7, 0, 0)),
    ("LBAL_LIBCPP17_STRING_VIEW", (7, 0, 0)),
    ("LBAL_LIBCPP17_FILESYSTEM", (8, 0, 0)),
    ("LBAL_LIBCPP17_CHARCONV", (11, 0, 0)),
    ("LBAL_LIBCPP17_PARALLEL_ALGORITHMS", (9, 0, 0)),
    ("LBAL_LIBCPP17_HARDWARE_INTERFERENCE_SIZE", (12, 0, 0)),
    ("LBAL_LIBCPP17_MEMORY_RESOURCE", (9, 0, 0)),
    ("LBAL_LIBCPP20_CONCEPTS", (10, 0, 0)),
    ("LBAL_LIBCPP20_RANGES", (10, 0, 0)),
    ("LBAL_LIBCPP20_SPAN", (10, 0, 0)),
    ("LBAL_LIBCPP20_BIT_CAST", (11, 0, 0)),
    ("LBAL_LIBCPP20_FORMAT", (13, 0, 0)),
    ("LBAL_LIBCPP20_SOURCE_LOCATION", (11, 0, 0)),
    ("LBAL_LIBCPP20_JTHREAD", (10, 0, 0)),
    ("LBAL_LIBCPP20_COROUTINE", (10, 0, 0)),
    ("LBAL_LIBCPP23_EXPECTED", (12, 0, 0)),
    ("LBAL_LIBCPP23_PRINT", (14, 0, 0)),
    ("LBAL_LIBCPP23_STACKTRACE", (12, 0, 0)),
];
