//! Target architecture facts.
//!
//! The architecture is classified from the same signal set as the
//! compiler identity. Word size and default byte order are properties of
//! the architecture; bi-endian architectures leave the byte order to the
//! `__BYTE_ORDER__` probe.

use serde::{Deserialize, Serialize};

/// Byte order of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endian::Little => "little",
            Endian::Big => "big",
        }
    }
}

/// CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X86,
    X86_64,
    Arm,
    Aarch64,
    PowerPc,
    PowerPc64,
    RiscV32,
    RiscV64,
    S390x,
}

impl Arch {
    /// Architecture name as used in target triples.
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86_64",
            Arch::Arm => "arm",
            Arch::Aarch64 => "aarch64",
            Arch::PowerPc => "powerpc",
            Arch::PowerPc64 => "powerpc64",
            Arch::RiscV32 => "riscv32",
            Arch::RiscV64 => "riscv64",
            Arch::S390x => "s390x",
        }
    }

    /// Native pointer width in bits.
    pub fn pointer_width(&self) -> u32 {
        match self {
            Arch::X86 | Arch::Arm | Arch::PowerPc | Arch::RiscV32 => 32,
            Arch::X86_64 | Arch::Aarch64 | Arch::PowerPc64 | Arch::RiscV64 | Arch::S390x => 64,
        }
    }

    /// Byte order fixed by the architecture, if it is not bi-endian.
    pub fn fixed_endian(&self) -> Option<Endian> {
        match self {
            Arch::X86 | Arch::X86_64 | Arch::RiscV32 | Arch::RiscV64 => Some(Endian::Little),
            Arch::S390x => Some(Endian::Big),
            Arch::Arm | Arch::Aarch64 | Arch::PowerPc | Arch::PowerPc64 => None,
        }
    }

    /// Whether x86 calling-convention keywords are meaningful.
    pub fn has_x86_calling_conventions(&self) -> bool {
        matches!(self, Arch::X86 | Arch::X86_64)
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Architecture-level facts about the build target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// CPU architecture
    pub arch: Arch,
}

impl Target {
    pub fn new(arch: Arch) -> Self {
        Target { arch }
    }

    /// A target fact used by constant capability rules.
    pub fn fact(&self, fact: TargetFact) -> Option<i64> {
        match fact {
            TargetFact::PointerWidth => Some(i64::from(self.arch.pointer_width())),
            TargetFact::IsEndian(endian) => self
                .arch
                .fixed_endian()
                .map(|fixed| i64::from(fixed == endian)),
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}-bit)", self.arch, self.arch.pointer_width())
    }
}

/// Architecture-derived fact a capability can be defined by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFact {
    /// Pointer width in bits
    PointerWidth,
    /// Whether the architecture's fixed byte order is this one
    IsEndian(Endian),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_width() {
        assert_eq!(Arch::X86_64.pointer_width(), 64);
        assert_eq!(Arch::RiscV32.pointer_width(), 32);
    }

    #[test]
    fn test_target_facts() {
        let target = Target::new(Arch::X86_64);
        assert_eq!(target.fact(TargetFact::PointerWidth), Some(64));
        assert_eq!(target.fact(TargetFact::IsEndian(Endian::Little)), Some(1));
        assert_eq!(target.fact(TargetFact::IsEndian(Endian::Big)), Some(0));

        // Bi-endian architectures have no fixed answer
        let arm = Target::new(Arch::Aarch64);
        assert_eq!(arm.fact(TargetFact::IsEndian(Endian::Little)), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Target::new(Arch::Arm).to_string(), "arm (32-bit)");
    }
}
