//! The decoded instruction value.

use bitflags::bitflags;

use crate::instruction::{
    code::Code,
    operand::{Operand, RoundingControl},
    register::Register,
};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Prefix-derived attributes of an [`Instruction`]
    pub struct InstructionFlags: u16 {
        /// `LOCK` prefix
        const LOCK = 0x0001;
        /// `REP`/`REPE` prefix (`F3`) acting as a repeat prefix
        const REP = 0x0002;
        /// `REPNE` prefix (`F2`) acting as a repeat prefix
        const REPNE = 0x0004;
        /// `XACQUIRE` hint (`F2` on a locked or `XCHG` instruction)
        const XACQUIRE = 0x0008;
        /// `XRELEASE` hint (`F3` on a locked, `XCHG` or `MOV` store instruction)
        const XRELEASE = 0x0010;
        /// EVEX zeroing-masking (`{z}`)
        const ZEROING = 0x0020;
        /// EVEX embedded broadcast of the memory operand (`{1toN}`)
        const BROADCAST = 0x0040;
        /// EVEX suppress-all-exceptions (`{sae}`)
        const SUPPRESS_ALL_EXCEPTIONS = 0x0080;
    }
}

/// One x86 instruction.
///
/// Produced by [`crate::Decoder`] and consumed by [`crate::Encoder`] and
/// [`crate::BlockEncoder`]. Operands are stored in Intel order; unused positions hold
/// [`Operand::None`]. An instruction whose `code` is [`Code::INVALID`] carries no meaning
/// beyond its `ip` and `len`.
///
/// # Examples
///
/// ```rust
/// use x86scope::{Bitness, Code, Decoder, DecoderOptions, Operand};
///
/// let mut decoder = Decoder::new(Bitness::Bit64, &[0xEB, 0x00], 0x1000, DecoderOptions::NONE);
/// let instr = decoder.decode()?;
/// assert_eq!(instr.code, Code::Jmp_rel8_64);
/// assert_eq!(instr.len, 2);
/// assert_eq!(instr.operands[0], Operand::NearBranch(0x1002));
/// # Ok::<(), x86scope::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Instruction {
    /// Address of the first byte
    pub ip: u64,
    /// Mnemonic and operand kinds
    pub code: Code,
    /// Length in bytes (1-15)
    pub len: u8,
    /// Operands in Intel order
    pub operands: [Operand; 4],
    /// Segment override prefix, or [`Register::None`]
    pub segment_prefix: Register,
    /// Prefix-derived attributes
    pub flags: InstructionFlags,
    /// EVEX opmask register (`K1`-`K7`), or [`Register::None`]
    pub op_mask: Register,
    /// EVEX embedded rounding
    pub rounding: RoundingControl,
}

impl Instruction {
    /// An instruction with `code` and no operands.
    #[must_use]
    pub fn with_code(code: Code) -> Self {
        Instruction {
            code,
            ..Instruction::default()
        }
    }

    /// `true` if this instruction could not be decoded.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.code == Code::INVALID
    }

    /// Address of the byte following this instruction.
    #[must_use]
    pub fn next_ip(&self) -> u64 {
        self.ip.wrapping_add(u64::from(self.len))
    }

    /// Number of operands.
    #[must_use]
    pub fn op_count(&self) -> usize {
        self.operands.iter().take_while(|op| !op.is_none()).count()
    }

    /// Target of the first near-branch operand.
    #[must_use]
    pub fn near_branch_target(&self) -> Option<u64> {
        self.operands.iter().find_map(|op| match op {
            Operand::NearBranch(target) => Some(*target),
            _ => None,
        })
    }

    /// Replaces the target of the first near-branch operand. Returns `false` if there is none.
    pub fn set_near_branch_target(&mut self, target: u64) -> bool {
        for op in &mut self.operands {
            if let Operand::NearBranch(old) = op {
                *old = target;
                return true;
            }
        }
        false
    }

    /// The memory operand, if any.
    #[must_use]
    pub fn memory_operand(&self) -> Option<&crate::MemoryOperand> {
        self.operands.iter().find_map(Operand::memory)
    }

    /// `true` if the instruction has a RIP- or EIP-relative memory operand.
    #[must_use]
    pub fn is_ip_rel_memory(&self) -> bool {
        self.memory_operand().is_some_and(|mem| mem.is_ip_relative())
    }

    /// Effective segment of the memory operand.
    ///
    /// The segment override if one is present, otherwise `SS` for `rBP`/`rSP` based
    /// addressing and `DS` for everything else. String destinations (`[rDI]`) always use `ES`.
    /// Returns [`Register::None`] when there is no memory operand.
    #[must_use]
    pub fn memory_segment(&self) -> Register {
        let mut default = Register::None;
        for op in &self.operands {
            match op {
                Operand::Memory(mem) => {
                    default = match mem.base {
                        Register::BP | Register::EBP | Register::RBP | Register::SP
                        | Register::ESP | Register::RSP => Register::SS,
                        _ => Register::DS,
                    };
                    break;
                }
                Operand::StringMemory { base } => {
                    if matches!(base, Register::DI | Register::EDI | Register::RDI) {
                        if default == Register::None {
                            default = Register::ES;
                        }
                        continue;
                    }
                    default = Register::DS;
                    break;
                }
                _ => {}
            }
        }

        match (default, self.segment_prefix) {
            (Register::None, _) => Register::None,
            (Register::ES, _) if self.only_es_di_operands() => Register::ES,
            (default, Register::None) => default,
            (_, prefix) => prefix,
        }
    }

    fn only_es_di_operands(&self) -> bool {
        self.operands.iter().all(|op| match op {
            Operand::StringMemory { base } => {
                matches!(base, Register::DI | Register::EDI | Register::RDI)
            }
            Operand::Memory(_) => false,
            _ => true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::operand::MemoryOperand;

    #[test]
    fn test_branch_target_accessors() {
        let mut instr = Instruction::with_code(Code::Jmp_rel8_64);
        instr.operands[0] = Operand::NearBranch(0x1002);
        assert_eq!(instr.near_branch_target(), Some(0x1002));
        assert!(instr.set_near_branch_target(0x2000));
        assert_eq!(instr.near_branch_target(), Some(0x2000));
        assert_eq!(instr.op_count(), 1);

        let mut nop = Instruction::with_code(Code::Nopd);
        assert!(!nop.set_near_branch_target(0));
    }

    #[test]
    fn test_memory_segment_defaults() {
        let mut instr = Instruction::with_code(Code::Mov_r32_rm32);
        instr.operands[0] = Operand::Register(Register::EAX);
        instr.operands[1] = Operand::Memory(MemoryOperand::with_base_displ(Register::EBP, 8, 1));
        assert_eq!(instr.memory_segment(), Register::SS);

        instr.segment_prefix = Register::FS;
        assert_eq!(instr.memory_segment(), Register::FS);

        let mut movs = Instruction::with_code(Code::Movsb_m8_m8);
        movs.operands[0] = Operand::StringMemory { base: Register::RDI };
        movs.operands[1] = Operand::StringMemory { base: Register::RSI };
        movs.segment_prefix = Register::GS;
        assert_eq!(movs.memory_segment(), Register::GS);

        let mut stos = Instruction::with_code(Code::Stosb_m8_AL);
        stos.operands[0] = Operand::StringMemory { base: Register::EDI };
        stos.operands[1] = Operand::Register(Register::AL);
        stos.segment_prefix = Register::GS;
        assert_eq!(stos.memory_segment(), Register::ES);

        assert_eq!(Instruction::with_code(Code::Nopd).memory_segment(), Register::None);
    }
}
