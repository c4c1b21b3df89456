//! Live compiler probing.
//!
//! Runs the C++ compiler in preprocess-only mode with `-dM` so that it
//! prints every predefined macro. The probe source includes `<version>`
//! (or `<ciso646>` before C++20 libraries shipped it) so that the
//! standard library's identity and feature-test macros are part of the
//! dump.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::{CppStandard, SignalSet};
use crate::util::diagnostic::suggestions;
use crate::util::process::{find_executable, ProcessBuilder};

/// Source fed to the compiler on stdin.
pub const PROBE_SOURCE: &str = "\
#if defined(__has_include)
#  if __has_include(<version>)
#    include <version>
#  else
#    include <ciso646>
#  endif
#else
#  include <ciso646>
#endif
";

/// What to probe and how.
#[derive(Debug, Clone, Default)]
pub struct ProbeRequest {
    /// Compiler to run (defaults to [`find_cxx_compiler`])
    pub cxx: Option<PathBuf>,
    /// Language standard to request
    pub std: Option<CppStandard>,
    /// Extra flags passed before the input (e.g. `--target=...`, `-stdlib=libc++`)
    pub flags: Vec<String>,
}

/// Command-line dialect of a compiler driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Driver {
    /// GCC-compatible (`gcc`, `clang++`, `c++`)
    Gnu,
    /// clang-cl, which forwards GNU flags through `/clang:`
    ClangCl,
    /// cl.exe, which cannot dump its predefined macros
    Cl,
}

impl Driver {
    fn of(cxx: &Path) -> Self {
        let name = cxx
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_lowercase();

        if name == "clang-cl" || name.ends_with("-clang-cl") {
            Driver::ClangCl
        } else if name == "cl" {
            Driver::Cl
        } else {
            Driver::Gnu
        }
    }
}

/// Find a C++ compiler.
///
/// Checks the `CXX` environment variable first, then the usual driver
/// names on `PATH`.
pub fn find_cxx_compiler() -> Option<PathBuf> {
    if let Ok(cxx) = std::env::var("CXX") {
        if let Some(path) = find_executable(&cxx) {
            return Some(path);
        }
    }

    for compiler in &["c++", "g++", "clang++", "clang-cl"] {
        if let Some(path) = find_executable(compiler) {
            return Some(path);
        }
    }

    None
}

/// Build the preprocess-only command for a request.
fn probe_command(cxx: &Path, request: &ProbeRequest) -> Result<ProcessBuilder> {
    let pb = ProcessBuilder::new(cxx).args(&request.flags);

    let pb = match Driver::of(cxx) {
        Driver::Gnu => {
            let pb = pb.args(["-x", "c++", "-dM", "-E"]);
            let pb = match request.std {
                Some(std) => pb.arg(format!("-std={}", std.as_flag_value())),
                None => pb,
            };
            pb.arg("-")
        }
        Driver::ClangCl => {
            let pb = pb.args(["/nologo", "/clang:-dM", "/E", "/TP"]);
            let pb = match request.std {
                Some(std) => pb.arg(format!("/std:{}", std.as_msvc_flag_value())),
                None => pb,
            };
            pb.arg("-")
        }
        Driver::Cl => bail!(
            "`{}` cannot print its predefined macros\n\
             help: record the signals in a TOML file or probe with clang-cl",
            cxx.display()
        ),
    };

    Ok(pb.stdin(PROBE_SOURCE))
}

/// Run the probe and return the raw macro dump.
pub fn probe_dump(request: &ProbeRequest) -> Result<String> {
    let cxx = match request.cxx.clone().or_else(find_cxx_compiler) {
        Some(cxx) => cxx,
        None => bail!("no C++ compiler found\n{}", suggestions::NO_COMPILER),
    };

    let pb = probe_command(&cxx, request)?;
    tracing::debug!("probing: {}", pb.display_command());

    let output = pb
        .exec_and_check()
        .with_context(|| format!("failed to probe `{}`", cxx.display()))?;

    let dump = String::from_utf8_lossy(&output.stdout).into_owned();
    tracing::info!(
        "probed {} ({} lines of predefined macros)",
        cxx.display(),
        dump.lines().count()
    );
    Ok(dump)
}

/// Run the probe and collect its signals.
pub fn probe(request: &ProbeRequest) -> Result<SignalSet> {
    Ok(SignalSet::parse_defines(&probe_dump(request)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_detection() {
        assert_eq!(Driver::of(Path::new("/usr/bin/g++")), Driver::Gnu);
        assert_eq!(Driver::of(Path::new("clang++-17")), Driver::Gnu);
        assert_eq!(Driver::of(Path::new("C:/LLVM/bin/clang-cl.exe")), Driver::ClangCl);
        assert_eq!(Driver::of(Path::new("cl.exe")), Driver::Cl);
    }

    #[test]
    fn test_gnu_probe_command() {
        let request = ProbeRequest {
            cxx: None,
            std: Some(CppStandard::Cpp20),
            flags: vec!["-stdlib=libc++".to_string()],
        };
        let pb = probe_command(Path::new("clang++"), &request).unwrap();
        assert_eq!(
            pb.display_command(),
            "clang++ -stdlib=libc++ -x c++ -dM -E -std=c++20 -"
        );
    }

    #[test]
    fn test_clang_cl_probe_command() {
        let request = ProbeRequest {
            std: Some(CppStandard::Cpp23),
            ..Default::default()
        };
        let pb = probe_command(Path::new("clang-cl"), &request).unwrap();
        assert!(pb.get_args().contains(&"/clang:-dM".to_string()));
        assert!(pb.get_args().contains(&"/std:c++latest".to_string()));
    }

    #[test]
    fn test_cl_cannot_probe() {
        let err = probe_command(Path::new("cl"), &ProbeRequest::default()).unwrap_err();
        assert!(err.to_string().contains("cannot print its predefined macros"));
    }
}
