//! C++ language standard epochs.
//!
//! Capability entries are grouped by the standard that introduced them;
//! an entry is only evaluated when the active standard reaches its epoch.

use serde::{Deserialize, Serialize};

/// C++ standard version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CppStandard {
    /// C++98/03
    #[serde(rename = "98", alias = "c++98", alias = "cpp98", alias = "03")]
    Cpp98,
    /// C++11
    #[serde(rename = "11", alias = "c++11", alias = "cpp11")]
    Cpp11,
    /// C++14
    #[serde(rename = "14", alias = "c++14", alias = "cpp14")]
    Cpp14,
    /// C++17
    #[serde(rename = "17", alias = "c++17", alias = "cpp17")]
    Cpp17,
    /// C++20
    #[serde(rename = "20", alias = "c++20", alias = "cpp20")]
    Cpp20,
    /// C++23
    #[serde(rename = "23", alias = "c++23", alias = "cpp23")]
    Cpp23,
    /// C++26 (any value past the C++23 one)
    #[serde(rename = "26", alias = "c++26", alias = "cpp26")]
    Cpp26,
}

impl CppStandard {
    /// All standards, oldest first.
    pub const ALL: [CppStandard; 7] = [
        CppStandard::Cpp98,
        CppStandard::Cpp11,
        CppStandard::Cpp14,
        CppStandard::Cpp17,
        CppStandard::Cpp20,
        CppStandard::Cpp23,
        CppStandard::Cpp26,
    ];

    /// The `__cplusplus` value published by this standard.
    ///
    /// C++26 has no published value yet; compilers report `202400L`
    /// or later in their experimental modes.
    pub fn cplusplus(&self) -> i64 {
        match self {
            CppStandard::Cpp98 => 199711,
            CppStandard::Cpp11 => 201103,
            CppStandard::Cpp14 => 201402,
            CppStandard::Cpp17 => 201703,
            CppStandard::Cpp20 => 202002,
            CppStandard::Cpp23 => 202302,
            CppStandard::Cpp26 => 202400,
        }
    }

    /// Map a `__cplusplus`-style value to the newest standard it satisfies.
    ///
    /// Pre-release modes publish intermediate values (`201709L` for
    /// `-std=c++2a` on older GCC), which land on the previous epoch.
    pub fn from_cplusplus(value: i64) -> Option<Self> {
        CppStandard::ALL
            .iter()
            .rev()
            .find(|std| value >= std.cplusplus())
            .copied()
    }

    /// Get the standard as a compiler flag value (e.g., "c++17").
    pub fn as_flag_value(&self) -> &'static str {
        match self {
            CppStandard::Cpp98 => "c++98",
            CppStandard::Cpp11 => "c++11",
            CppStandard::Cpp14 => "c++14",
            CppStandard::Cpp17 => "c++17",
            CppStandard::Cpp20 => "c++20",
            CppStandard::Cpp23 => "c++23",
            CppStandard::Cpp26 => "c++26",
        }
    }

    /// Get the MSVC-style standard flag value (e.g., "c++17", "c++latest" for C++23).
    pub fn as_msvc_flag_value(&self) -> &'static str {
        match self {
            CppStandard::Cpp98 | CppStandard::Cpp11 => "c++14", // MSVC has no older mode
            CppStandard::Cpp14 => "c++14",
            CppStandard::Cpp17 => "c++17",
            CppStandard::Cpp20 => "c++20",
            CppStandard::Cpp23 | CppStandard::Cpp26 => "c++latest",
        }
    }

    fn short(&self) -> &'static str {
        match self {
            CppStandard::Cpp98 => "98",
            CppStandard::Cpp11 => "11",
            CppStandard::Cpp14 => "14",
            CppStandard::Cpp17 => "17",
            CppStandard::Cpp20 => "20",
            CppStandard::Cpp23 => "23",
            CppStandard::Cpp26 => "26",
        }
    }
}

impl std::str::FromStr for CppStandard {
    type Err = CppStandardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        let short = lowered
            .strip_prefix("c++")
            .or_else(|| lowered.strip_prefix("cpp"))
            .or_else(|| lowered.strip_prefix("gnu++"))
            .unwrap_or(lowered.as_str());

        match short {
            "98" | "03" => Ok(CppStandard::Cpp98),
            "11" | "0x" => Ok(CppStandard::Cpp11),
            "14" | "1y" => Ok(CppStandard::Cpp14),
            "17" | "1z" => Ok(CppStandard::Cpp17),
            "20" | "2a" => Ok(CppStandard::Cpp20),
            "23" | "2b" => Ok(CppStandard::Cpp23),
            "26" | "2c" => Ok(CppStandard::Cpp26),
            _ => Err(CppStandardParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid C++ standard string.
#[derive(Debug, Clone)]
pub struct CppStandardParseError(pub String);

impl std::fmt::Display for CppStandardParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid C++ standard '{}', valid values: 98, 11, 14, 17, 20, 23, 26",
            self.0
        )
    }
}

impl std::error::Error for CppStandardParseError {}

impl std::fmt::Display for CppStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "C++{}", self.short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpp_standard_ordering() {
        assert!(CppStandard::Cpp98 < CppStandard::Cpp11);
        assert!(CppStandard::Cpp11 < CppStandard::Cpp14);
        assert!(CppStandard::Cpp17 < CppStandard::Cpp20);
        assert!(CppStandard::Cpp23 < CppStandard::Cpp26);
    }

    #[test]
    fn test_from_cplusplus() {
        assert_eq!(CppStandard::from_cplusplus(199711), Some(CppStandard::Cpp98));
        assert_eq!(CppStandard::from_cplusplus(201703), Some(CppStandard::Cpp17));
        // -std=c++2a on GCC 9
        assert_eq!(CppStandard::from_cplusplus(201709), Some(CppStandard::Cpp17));
        assert_eq!(CppStandard::from_cplusplus(202100), Some(CppStandard::Cpp20));
        assert_eq!(CppStandard::from_cplusplus(202602), Some(CppStandard::Cpp26));
        assert_eq!(CppStandard::from_cplusplus(1), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("17".parse::<CppStandard>().unwrap(), CppStandard::Cpp17);
        assert_eq!("c++2a".parse::<CppStandard>().unwrap(), CppStandard::Cpp20);
        assert_eq!("gnu++23".parse::<CppStandard>().unwrap(), CppStandard::Cpp23);
        assert!("c++42".parse::<CppStandard>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(CppStandard::Cpp20.to_string(), "C++20");
        assert_eq!(CppStandard::Cpp17.as_msvc_flag_value(), "c++17");
    }
}
