//! MSVC and MSVC STL version proxies.
//!
//! STL versions are `14.<toolset>.<_MSVC_STL_UPDATE>`; the update stamp
//! separates features shipped within one toolset generation.

use super::MinVersion;

pub(super) const COMPILER: &[(&str, MinVersion)] = &[
    ("LBAL_CPP14_GENERIC_LAMBDAS", (19, 0, 0)),
    ("LBAL_CPP14_VARIABLE_TEMPLATES", (19, 0, 0)),
    ("LBAL_CPP17_IF_CONSTEXPR", (19, 11, 0)),
    ("LBAL_CPP17_INLINE_VARIABLES", (19, 12, 0)),
    ("LBAL_CPP17_STRUCTURED_BINDINGS", (19, 11, 0)),
    ("LBAL_CPP17_FOLD_EXPRESSIONS", (19, 12, 0)),
    ("LBAL_CPP17_DEDUCTION_GUIDES", (19, 14, 0)),
    ("LBAL_CPP20_CONCEPTS", (19, 28, 0)),
    ("LBAL_CPP20_COROUTINES", (19, 28, 0)),
    ("LBAL_CPP20_CONSTEVAL", (19, 29, 0)),
    ("LBAL_CPP20_THREE_WAY_COMPARISON", (19, 20, 0)),
    ("LBAL_CPP20_DESIGNATED_INITIALIZERS", (19, 21, 0)),
    ("LBAL_CPP20_CHAR8_T", (19, 22, 0)),
    ("LBAL_CPP23_EXPLICIT_THIS", (19, 32, 0)),
];

pub(super) const STL: &[(&str, MinVersion)] = &[
    ("LBAL_LIBCPP14_MAKE_UNIQUE", (14, 0, 0)),
    ("LBAL_LIBCPP17_OPTIONAL", (14, 1, 0)),
    ("LBAL_LIBCPP17_VARIANT", (14, 1, 0)),
    ("LBAL_LIBCPP17_ANY", (14, 1, 0)),
    ("LBAL_LIBCPP17_STRING_VIEW", (14, 1, 0)),
    ("LBAL_LIBCPP17_FILESYSTEM", (14, 1, 0)),
    ("LBAL_LIBCPP17_CHARCONV", (14, 2, 201907)),
    ("LBAL_LIBCPP17_PARALLEL_ALGORITHMS", (14, 1, 0)),
    ("LBAL_LIBCPP17_HARDWARE_INTERFERENCE_SIZE", (14, 1, 0)),
    ("LBAL_LIBCPP17_MEMORY_RESOURCE", (14, 1, 0)),
    ("LBAL_LIBCPP20_CONCEPTS", (14, 2, 201911)),
    ("LBAL_LIBCPP20_RANGES", (14, 2, 202105)),
    ("LBAL_LIBCPP20_SPAN", (14, 2, 202003)),
    ("LBAL_LIBCPP20_BIT_CAST", (14, 2, 202008)),
    ("LBAL_LIBCPP20_FORMAT", (14, 2, 202105)),
    ("LBAL_LIBCPP20_SOURCE_LOCATION", (14, 2, 202008)),
    ("LBAL_LIBCPP20_JTHREAD", (14, 2, 202003)),
    ("LBAL_LIBCPP20_COROUTINE", (14, 2, 202003)),
    ("LBAL_LIBCPP23_EXPECTED", (14, 3, 202202)),
    ("LBAL_LIBCPP23_PRINT", (14, 3, 202303)),
    ("LBAL_LIBCPP23_MDSPAN", (14, 3, 202311)),
    ("LBAL_LIBCPP23_STACKTRACE", (14, 3, 202206)),
];
