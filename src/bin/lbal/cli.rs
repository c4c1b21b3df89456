//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// lbal - uniform capability tokens for C++ toolchains
#[derive(Parser)]
#[command(name = "lbal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a compiler's predefined macros as a signal file
    Probe(ProbeArgs),

    /// Classify the compiler, standard library and OS
    Identify(IdentifyArgs),

    /// Resolve capabilities and emit a header, JSON or a report
    Resolve(ResolveArgs),

    /// Show the rule table for the detected identity
    Rules(RulesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// How to run the compiler probe.
#[derive(Args, Clone)]
pub struct CompilerArgs {
    /// C++ compiler to probe (defaults to $CXX, then c++, g++, clang++)
    #[arg(long)]
    pub cxx: Option<PathBuf>,

    /// C++ standard to probe with (e.g., 17, c++20, gnu++23)
    #[arg(long)]
    pub std: Option<String>,

    /// Extra flag passed to the compiler (repeatable)
    #[arg(long = "flag", value_name = "FLAG", allow_hyphen_values = true)]
    pub flags: Vec<String>,
}

/// Where signals come from.
#[derive(Args, Clone)]
pub struct SignalArgs {
    /// Read signals from a macro dump or TOML file instead of probing
    #[arg(long, value_name = "FILE")]
    pub signals: Option<PathBuf>,

    #[command(flatten)]
    pub compiler: CompilerArgs,
}

#[derive(Args)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub compiler: CompilerArgs,

    /// Write the dump to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct IdentifyArgs {
    #[command(flatten)]
    pub source: SignalArgs,

    /// Print the identity as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub source: SignalArgs,

    /// Pre-define a capability (NAME=true|false|<integer>, repeatable)
    #[arg(long = "override", short = 'D', value_name = "NAME=VALUE")]
    pub overrides: Vec<String>,

    /// Compare overrides against direct probes and warn on disagreement
    #[arg(long, overrides_with = "no_validate_overrides")]
    pub validate_overrides: bool,

    /// Trust overrides without comparing them, even if the config asks to
    #[arg(long, overrides_with = "validate_overrides")]
    pub no_validate_overrides: bool,

    /// Output format: header, json, text
    #[arg(long)]
    pub format: Option<String>,

    /// Write the output to a file (unchanged files are not rewritten)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ResolveArgs {
    /// Explicit validation choice; `None` defers to the config.
    pub fn validate_overrides(&self) -> Option<bool> {
        if self.validate_overrides {
            Some(true)
        } else if self.no_validate_overrides {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Args)]
pub struct RulesArgs {
    #[command(flatten)]
    pub source: SignalArgs,

    /// Only show capabilities whose name contains this text
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
