//! Operand values of a decoded [`crate::Instruction`].
//!
//! An [`Operand`] is a tagged union: the variant decides which fields exist, so a register
//! operand cannot carry a stale displacement and a branch cannot carry a base register.

use crate::instruction::register::Register;

/// An immediate operand together with its encoded width.
///
/// The `ImmXtoY` variants are encoded with `X` bits and sign-extended by the CPU to `Y` bits.
/// They store the extended value, so [`Immediate::value`] is what the instruction operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Immediate {
    /// 8-bit immediate
    Imm8(u8),
    /// 16-bit immediate
    Imm16(u16),
    /// 32-bit immediate
    Imm32(u32),
    /// 64-bit immediate (`MOV r64, imm64`)
    Imm64(u64),
    /// 8-bit immediate sign-extended to 16 bits
    Imm8to16(i16),
    /// 8-bit immediate sign-extended to 32 bits
    Imm8to32(i32),
    /// 8-bit immediate sign-extended to 64 bits
    Imm8to64(i64),
    /// 32-bit immediate sign-extended to 64 bits
    Imm32to64(i64),
}

impl Immediate {
    /// Value as an unsigned 64-bit integer (sign-extended forms are sign-extended to 64 bits).
    #[must_use]
    pub fn value(&self) -> u64 {
        match *self {
            Immediate::Imm8(v) => u64::from(v),
            Immediate::Imm16(v) => u64::from(v),
            Immediate::Imm32(v) => u64::from(v),
            Immediate::Imm64(v) => v,
            Immediate::Imm8to16(v) => v as i64 as u64,
            Immediate::Imm8to32(v) => v as i64 as u64,
            Immediate::Imm8to64(v) | Immediate::Imm32to64(v) => v as u64,
        }
    }

    /// Number of bytes the immediate occupies in the encoding.
    #[must_use]
    pub fn encoded_size(&self) -> usize {
        match self {
            Immediate::Imm8(_)
            | Immediate::Imm8to16(_)
            | Immediate::Imm8to32(_)
            | Immediate::Imm8to64(_) => 1,
            Immediate::Imm16(_) => 2,
            Immediate::Imm32(_) | Immediate::Imm32to64(_) => 4,
            Immediate::Imm64(_) => 8,
        }
    }
}

/// A `[base + index * scale + displacement]` memory reference.
///
/// For RIP/EIP-relative operands `base` is [`Register::RIP`] or [`Register::EIP`] and
/// `displacement` holds the absolute target address, not the encoded offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MemoryOperand {
    /// Base register, or [`Register::None`]
    pub base: Register,
    /// Index register, or [`Register::None`]
    pub index: Register,
    /// Index scale: 1, 2, 4 or 8
    pub scale: u8,
    /// Displacement, sign-extended for 64-bit addressing and zero-extended otherwise
    pub displacement: u64,
    /// Encoded displacement size in bytes: 0, 1, 2, 4 or 8
    pub displ_size: u8,
}

impl MemoryOperand {
    /// A memory operand with only a base register and displacement.
    #[must_use]
    pub fn with_base_displ(base: Register, displacement: u64, displ_size: u8) -> Self {
        MemoryOperand {
            base,
            index: Register::None,
            scale: 1,
            displacement,
            displ_size,
        }
    }

    /// `true` for `[rip + disp]` and `[eip + disp]`.
    #[must_use]
    pub fn is_ip_relative(&self) -> bool {
        matches!(self.base, Register::RIP | Register::EIP)
    }

    /// Address size in bits implied by the registers, or `None` for an absolute address.
    #[must_use]
    pub fn address_size(&self) -> Option<u32> {
        let reg = if self.base != Register::None {
            self.base
        } else {
            self.index
        };
        match reg {
            Register::None => None,
            Register::EIP => Some(32),
            Register::RIP => Some(64),
            reg => Some(reg.size() as u32 * 8),
        }
    }
}

/// Rounding control of an EVEX instruction with embedded rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundingControl {
    /// No embedded rounding
    #[default]
    None,
    /// Round to nearest (even)
    RoundToNearest,
    /// Round down (toward -inf)
    RoundDown,
    /// Round up (toward +inf)
    RoundUp,
    /// Round toward zero (truncate)
    RoundTowardZero,
}

impl RoundingControl {
    /// Rounding control selected by EVEX `L'L` when `b` is set on a register form.
    #[must_use]
    pub const fn from_ll(ll: u8) -> Self {
        match ll & 3 {
            0 => RoundingControl::RoundToNearest,
            1 => RoundingControl::RoundDown,
            2 => RoundingControl::RoundUp,
            _ => RoundingControl::RoundTowardZero,
        }
    }

    /// EVEX `L'L` bits of this rounding mode.
    #[must_use]
    pub const fn to_ll(self) -> Option<u8> {
        match self {
            RoundingControl::None => None,
            RoundingControl::RoundToNearest => Some(0),
            RoundingControl::RoundDown => Some(1),
            RoundingControl::RoundUp => Some(2),
            RoundingControl::RoundTowardZero => Some(3),
        }
    }
}

/// One operand of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operand {
    /// No operand in this position
    #[default]
    None,
    /// A register
    Register(Register),
    /// A ModRM or moffs memory reference
    Memory(MemoryOperand),
    /// The implicit `[rSI]`/`[rDI]`/`[rBX + AL]` operand of a string or `XLAT` instruction
    StringMemory {
        /// `SI`/`ESI`/`RSI`, `DI`/`EDI`/`RDI` or `BX`/`EBX`/`RBX`; its width is the address size
        base: Register,
    },
    /// An immediate
    Immediate(Immediate),
    /// A near branch target (absolute address)
    NearBranch(u64),
    /// A far branch target `selector:offset`
    FarBranch {
        /// Segment selector
        selector: u16,
        /// Offset within the segment
        offset: u32,
    },
}

impl Operand {
    /// The register of a register operand.
    #[must_use]
    pub fn register(&self) -> Option<Register> {
        match self {
            Operand::Register(reg) => Some(*reg),
            _ => None,
        }
    }

    /// The memory reference of a memory operand.
    #[must_use]
    pub fn memory(&self) -> Option<&MemoryOperand> {
        match self {
            Operand::Memory(mem) => Some(mem),
            _ => None,
        }
    }

    /// The immediate of an immediate operand.
    #[must_use]
    pub fn immediate(&self) -> Option<Immediate> {
        match self {
            Operand::Immediate(imm) => Some(*imm),
            _ => None,
        }
    }

    /// `true` for [`Operand::None`].
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Operand::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_values() {
        assert_eq!(Immediate::Imm8(0xFF).value(), 0xFF);
        assert_eq!(Immediate::Imm8to32(-1).value(), u64::MAX);
        assert_eq!(Immediate::Imm32to64(-2).value(), 0xFFFF_FFFF_FFFF_FFFE);
        assert_eq!(Immediate::Imm8to64(5).encoded_size(), 1);
        assert_eq!(Immediate::Imm32to64(5).encoded_size(), 4);
    }

    #[test]
    fn test_memory_address_size() {
        let mem = MemoryOperand::with_base_displ(Register::RIP, 0x1000, 4);
        assert!(mem.is_ip_relative());
        assert_eq!(mem.address_size(), Some(64));

        let mem = MemoryOperand {
            index: Register::ESI,
            scale: 4,
            ..MemoryOperand::default()
        };
        assert_eq!(mem.address_size(), Some(32));
        assert_eq!(MemoryOperand::default().address_size(), None);
    }

    #[test]
    fn test_rounding_bits() {
        for ll in 0..4 {
            assert_eq!(RoundingControl::from_ll(ll).to_ll(), Some(ll));
        }
        assert_eq!(RoundingControl::None.to_ll(), None);
    }
}
