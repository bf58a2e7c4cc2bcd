//! Per-code encoding descriptors.
//!
//! Every [`crate::Code`] owns exactly one [`OpCodeInfo`] describing how it is laid out in
//! bytes: which encoding and opcode map it lives in, which mandatory prefix and opcode byte
//! select it, the ModRM.reg/ModRM.rm values of opcode groups, the operand and address size it
//! implies, and the kind of each operand. The encoder builds bytes purely from this
//! descriptor, and the decoder materializes operands from the same [`OperandSpec`] list, so
//! the two directions cannot disagree about operand layout.
//!
//! Descriptors are built with `const fn` constructors such as [`OpCodeInfo::legacy`] and
//! chained modifiers (`.o32()`, `.g(3)`, `.p66()`), and live in a static table generated
//! together with the [`crate::Code`] enum.

use bitflags::bitflags;

/// Instruction encoding family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingKind {
    /// Legacy and REX-prefixed encodings
    Legacy,
    /// 2- and 3-byte VEX (`C5`/`C4`)
    Vex,
    /// 4-byte EVEX (`62`)
    Evex,
    /// AMD XOP (`8F`)
    Xop,
}

/// Opcode map an instruction's opcode byte belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCodeTable {
    /// One-byte map
    Normal,
    /// `0F xx`
    T0F,
    /// `0F 38 xx`
    T0F38,
    /// `0F 3A xx`
    T0F3A,
    /// XOP map 8
    Xop8,
    /// XOP map 9
    Xop9,
    /// XOP map 10
    XopA,
}

impl OpCodeTable {
    /// VEX/EVEX `mmmmm` value, or XOP map number.
    #[must_use]
    pub const fn map_select(self) -> u8 {
        match self {
            OpCodeTable::Normal => 0,
            OpCodeTable::T0F => 1,
            OpCodeTable::T0F38 => 2,
            OpCodeTable::T0F3A => 3,
            OpCodeTable::Xop8 => 8,
            OpCodeTable::Xop9 => 9,
            OpCodeTable::XopA => 10,
        }
    }
}

/// Mandatory prefix selecting an opcode.
///
/// The discriminant doubles as the VEX/EVEX/XOP `pp` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum MandatoryPrefix {
    /// No mandatory prefix
    #[default]
    None = 0,
    /// `66`
    P66 = 1,
    /// `F3`
    PF3 = 2,
    /// `F2`
    PF2 = 3,
}

impl MandatoryPrefix {
    /// Maps a `pp` field (0-3) to a prefix.
    #[must_use]
    pub const fn from_pp(pp: u8) -> MandatoryPrefix {
        match pp & 3 {
            0 => MandatoryPrefix::None,
            1 => MandatoryPrefix::P66,
            2 => MandatoryPrefix::PF3,
            _ => MandatoryPrefix::PF2,
        }
    }

    /// The legacy prefix byte, if any.
    #[must_use]
    pub const fn byte(self) -> Option<u8> {
        match self {
            MandatoryPrefix::None => None,
            MandatoryPrefix::P66 => Some(0x66),
            MandatoryPrefix::PF3 => Some(0xF3),
            MandatoryPrefix::PF2 => Some(0xF2),
        }
    }
}

/// EVEX tuple type, selecting the `N` of compressed `disp8*N` displacements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TupleType {
    /// Not an EVEX instruction
    None,
    /// Full vector, broadcastable: `N` is the element size when broadcasting, else the vector size
    Full,
    /// Full vector memory, not broadcastable: `N` is the vector size
    FullMem,
}

/// Where an operand lives in the encoding and what it may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandSpec {
    /// ModRM.rm: 8-bit register or memory
    Rm8,
    /// ModRM.rm: 16-bit register or memory
    Rm16,
    /// ModRM.rm: 32-bit register or memory
    Rm32,
    /// ModRM.rm: 64-bit register or memory
    Rm64,
    /// ModRM.rm: 16-bit register only
    RmReg16,
    /// ModRM.rm: 32-bit register only
    RmReg32,
    /// ModRM.rm: 64-bit register only
    RmReg64,
    /// ModRM.rm: XMM register only
    RmRegXmm,
    /// ModRM.rm: memory only
    Mem,
    /// ModRM.rm: MPX `mib` memory, never RIP-relative
    Mib,
    /// ModRM.rm: bound register or memory
    BndRm,
    /// ModRM.rm: `ST(i)`, register form only
    RmSti,
    /// ModRM.rm: MMX register or memory
    MmRm,
    /// ModRM.rm: XMM register or memory
    XmmRm,
    /// ModRM.rm: YMM register or memory
    YmmRm,
    /// ModRM.rm: ZMM register or memory
    ZmmRm,
    /// ModRM.reg: 8-bit register
    Reg8,
    /// ModRM.reg: 16-bit register
    Reg16,
    /// ModRM.reg: 32-bit register
    Reg32,
    /// ModRM.reg: 64-bit register
    Reg64,
    /// ModRM.reg: segment register
    RegSeg,
    /// ModRM.reg: control register
    RegCr,
    /// ModRM.reg: debug register
    RegDr,
    /// ModRM.reg: bound register
    RegBnd,
    /// ModRM.reg: MMX register
    RegMm,
    /// ModRM.reg: XMM register
    RegXmm,
    /// ModRM.reg: YMM register
    RegYmm,
    /// ModRM.reg: ZMM register
    RegZmm,
    /// Low three opcode bits: 8-bit register
    Op8,
    /// Low three opcode bits: 16-bit register
    Op16,
    /// Low three opcode bits: 32-bit register
    Op32,
    /// Low three opcode bits: 64-bit register
    Op64,
    /// VEX/EVEX/XOP `vvvv`: 32-bit register
    Vvvv32,
    /// VEX/EVEX/XOP `vvvv`: 64-bit register
    Vvvv64,
    /// VEX/EVEX `vvvv`: XMM register
    VvvvXmm,
    /// VEX/EVEX `vvvv`: YMM register
    VvvvYmm,
    /// EVEX `vvvv`: ZMM register
    VvvvZmm,
    /// Implicit `AL`
    Al,
    /// Implicit `CL`
    Cl,
    /// Implicit `AX`
    Ax,
    /// Implicit `DX`
    Dx,
    /// Implicit `EAX`
    Eax,
    /// Implicit `RAX`
    Rax,
    /// Implicit `ES`
    Es,
    /// Implicit `CS`
    Cs,
    /// Implicit `SS`
    Ss,
    /// Implicit `DS`
    Ds,
    /// Implicit `FS`
    Fs,
    /// Implicit `GS`
    Gs,
    /// Implicit `ST(0)`
    St0,
    /// 8-bit immediate
    Imm8,
    /// Implicit constant 1 (shift by one), not encoded
    Imm8Const1,
    /// 8-bit immediate sign-extended to 16 bits
    Imm8Sx16,
    /// 8-bit immediate sign-extended to 32 bits
    Imm8Sx32,
    /// 8-bit immediate sign-extended to 64 bits
    Imm8Sx64,
    /// 16-bit immediate
    Imm16,
    /// 32-bit immediate
    Imm32,
    /// 32-bit immediate sign-extended to 64 bits
    Imm32Sx64,
    /// 64-bit immediate
    Imm64,
    /// `rel8` with a 16-bit target
    Br16_1,
    /// `rel8` with a 32-bit target
    Br32_1,
    /// `rel8` with a 64-bit target
    Br64_1,
    /// `rel16` with a 16-bit target
    Br16_2,
    /// `rel32` with a 32-bit target
    Br32_4,
    /// `rel32` with a 64-bit target
    Br64_4,
    /// `XBEGIN rel16`, target as wide as the code size
    Xbegin2,
    /// `XBEGIN rel32`, target as wide as the code size
    Xbegin4,
    /// `ptr16:16`
    FarBr16,
    /// `ptr16:32`
    FarBr32,
    /// String source `seg:[rSI]`, segment overridable
    SegSi,
    /// String destination `ES:[rDI]`
    EsDi,
    /// `XLAT` source `seg:[rBX+AL]`
    SegBxAl,
    /// Absolute `moffs`, as wide as the address size
    MemOffs,
}

impl OperandSpec {
    /// Operand is encoded in ModRM.rm.
    #[must_use]
    pub const fn is_rm(self) -> bool {
        matches!(
            self,
            OperandSpec::Rm8
                | OperandSpec::Rm16
                | OperandSpec::Rm32
                | OperandSpec::Rm64
                | OperandSpec::RmReg16
                | OperandSpec::RmReg32
                | OperandSpec::RmReg64
                | OperandSpec::RmRegXmm
                | OperandSpec::Mem
                | OperandSpec::Mib
                | OperandSpec::BndRm
                | OperandSpec::RmSti
                | OperandSpec::MmRm
                | OperandSpec::XmmRm
                | OperandSpec::YmmRm
                | OperandSpec::ZmmRm
        )
    }

    /// Operand is encoded in ModRM.reg.
    #[must_use]
    pub const fn is_reg(self) -> bool {
        matches!(
            self,
            OperandSpec::Reg8
                | OperandSpec::Reg16
                | OperandSpec::Reg32
                | OperandSpec::Reg64
                | OperandSpec::RegSeg
                | OperandSpec::RegCr
                | OperandSpec::RegDr
                | OperandSpec::RegBnd
                | OperandSpec::RegMm
                | OperandSpec::RegXmm
                | OperandSpec::RegYmm
                | OperandSpec::RegZmm
        )
    }

    /// Operand is encoded in `vvvv`.
    #[must_use]
    pub const fn is_vvvv(self) -> bool {
        matches!(
            self,
            OperandSpec::Vvvv32
                | OperandSpec::Vvvv64
                | OperandSpec::VvvvXmm
                | OperandSpec::VvvvYmm
                | OperandSpec::VvvvZmm
        )
    }

    /// Operand is a relative branch target.
    #[must_use]
    pub const fn is_near_branch(self) -> bool {
        matches!(
            self,
            OperandSpec::Br16_1
                | OperandSpec::Br32_1
                | OperandSpec::Br64_1
                | OperandSpec::Br16_2
                | OperandSpec::Br32_4
                | OperandSpec::Br64_4
                | OperandSpec::Xbegin2
                | OperandSpec::Xbegin4
        )
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Attributes of an [`OpCodeInfo`]
    pub struct OpCodeFlags: u32 {
        /// Valid in 16-bit mode
        const MODE16 = 0x0000_0001;
        /// Valid in 32-bit mode
        const MODE32 = 0x0000_0002;
        /// Valid in 64-bit mode
        const MODE64 = 0x0000_0004;
        /// 64-bit operand size is the default in 64-bit mode, no `REX.W`
        const DEFAULT_OP_SIZE64 = 0x0000_0008;
        /// Accepts a `LOCK` prefix with a memory destination
        const LOCK = 0x0000_0010;
        /// VEX/EVEX/XOP `W` = 1
        const W1 = 0x0000_0020;
        /// VEX/EVEX/XOP `W` is ignored
        const WIG = 0x0000_0040;
        /// VEX/EVEX `L` is ignored
        const LIG = 0x0000_0080;
        /// EVEX: supports an opmask
        const OPMASK = 0x0000_0100;
        /// EVEX: supports zeroing-masking
        const ZEROING = 0x0000_0200;
        /// EVEX: supports embedded broadcast
        const BROADCAST = 0x0000_0400;
        /// EVEX: supports embedded rounding control
        const ROUNDING = 0x0000_0800;
        /// EVEX: supports suppress-all-exceptions
        const SAE = 0x0000_1000;
        /// `REX.W` is ignored by the decoder (the 64-bit form is not distinct)
        const REX_W_IGNORED = 0x0000_2000;
    }
}

/// Encoding descriptor of one [`crate::Code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpCodeInfo {
    /// Encoding family
    pub encoding: EncodingKind,
    /// Opcode map
    pub table: OpCodeTable,
    /// Mandatory prefix (or VEX/EVEX/XOP `pp`)
    pub mandatory_prefix: MandatoryPrefix,
    /// Opcode byte; for register-in-opcode forms, the byte with the register bits clear
    pub op_code: u8,
    /// ModRM.reg of an opcode group, or -1
    pub group_index: i8,
    /// ModRM.rm of a register-form group (ModRM.mod = 3), or -1
    pub rm_group_index: i8,
    /// Operand size in bits (16, 32, 64), or 0 when the prefix state does not select it
    pub operand_size: u8,
    /// Address size in bits (16, 32, 64), or 0 when it follows the operands
    pub address_size: u8,
    /// Vector length: 0 = 128-bit, 1 = 256-bit, 2 = 512-bit
    pub vector_length: u8,
    /// EVEX tuple type
    pub tuple_type: TupleType,
    /// Attributes
    pub flags: OpCodeFlags,
    /// Operands in Intel order
    pub ops: &'static [OperandSpec],
}

const ALL_MODES: OpCodeFlags = OpCodeFlags::MODE16
    .union(OpCodeFlags::MODE32)
    .union(OpCodeFlags::MODE64);

impl OpCodeInfo {
    /// Descriptor of [`crate::Code::INVALID`].
    pub const INVALID: OpCodeInfo = OpCodeInfo {
        encoding: EncodingKind::Legacy,
        table: OpCodeTable::Normal,
        mandatory_prefix: MandatoryPrefix::None,
        op_code: 0,
        group_index: -1,
        rm_group_index: -1,
        operand_size: 0,
        address_size: 0,
        vector_length: 0,
        tuple_type: TupleType::None,
        flags: OpCodeFlags::empty(),
        ops: &[],
    };

    const fn new(
        encoding: EncodingKind,
        table: OpCodeTable,
        op_code: u8,
        ops: &'static [OperandSpec],
    ) -> Self {
        OpCodeInfo {
            encoding,
            table,
            mandatory_prefix: MandatoryPrefix::None,
            op_code,
            group_index: -1,
            rm_group_index: -1,
            operand_size: 0,
            address_size: 0,
            vector_length: 0,
            tuple_type: TupleType::None,
            flags: ALL_MODES,
            ops,
        }
    }

    /// Legacy encoding in `table`.
    pub const fn legacy(table: OpCodeTable, op_code: u8, ops: &'static [OperandSpec]) -> Self {
        OpCodeInfo::new(EncodingKind::Legacy, table, op_code, ops)
    }

    /// VEX encoding in `table`, `W` ignored unless set.
    pub const fn vex(table: OpCodeTable, op_code: u8, ops: &'static [OperandSpec]) -> Self {
        OpCodeInfo::new(EncodingKind::Vex, table, op_code, ops)
    }

    /// EVEX encoding in `table`. EVEX is not available in 16-bit mode here.
    pub const fn evex(table: OpCodeTable, op_code: u8, ops: &'static [OperandSpec]) -> Self {
        let mut info = OpCodeInfo::new(EncodingKind::Evex, table, op_code, ops);
        info.flags = OpCodeFlags::MODE32
            .union(OpCodeFlags::MODE64)
            .union(OpCodeFlags::OPMASK)
            .union(OpCodeFlags::ZEROING);
        info
    }

    /// XOP encoding in `table`.
    pub const fn xop(table: OpCodeTable, op_code: u8, ops: &'static [OperandSpec]) -> Self {
        OpCodeInfo::new(EncodingKind::Xop, table, op_code, ops)
    }

    const fn with(mut self, flags: OpCodeFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    /// Mandatory `66`.
    pub const fn p66(mut self) -> Self {
        self.mandatory_prefix = MandatoryPrefix::P66;
        self
    }

    /// Mandatory `F3`.
    pub const fn pf3(mut self) -> Self {
        self.mandatory_prefix = MandatoryPrefix::PF3;
        self
    }

    /// Mandatory `F2`.
    pub const fn pf2(mut self) -> Self {
        self.mandatory_prefix = MandatoryPrefix::PF2;
        self
    }

    /// Opcode group member `/n`.
    pub const fn g(mut self, reg: i8) -> Self {
        self.group_index = reg;
        self
    }

    /// Register-form group member with fixed ModRM.rm.
    pub const fn rmg(mut self, rm: i8) -> Self {
        self.rm_group_index = rm;
        self
    }

    /// 16-bit operand size.
    pub const fn o16(mut self) -> Self {
        self.operand_size = 16;
        self
    }

    /// 32-bit operand size.
    pub const fn o32(mut self) -> Self {
        self.operand_size = 32;
        self
    }

    /// 64-bit operand size via `REX.W`; only valid in 64-bit mode.
    pub const fn o64(mut self) -> Self {
        self.operand_size = 64;
        self.flags = OpCodeFlags::MODE64.union(self.flags.difference(ALL_MODES));
        self
    }

    /// 64-bit operand size by default in 64-bit mode; only valid in 64-bit mode.
    pub const fn d64(self) -> Self {
        self.o64().with(OpCodeFlags::DEFAULT_OP_SIZE64)
    }

    /// 16-bit address size.
    pub const fn a16(mut self) -> Self {
        self.address_size = 16;
        self
    }

    /// 32-bit address size.
    pub const fn a32(mut self) -> Self {
        self.address_size = 32;
        self
    }

    /// 64-bit address size.
    pub const fn a64(mut self) -> Self {
        self.address_size = 64;
        self
    }

    /// Not valid in 64-bit mode.
    pub const fn no64(mut self) -> Self {
        self.flags = self.flags.difference(OpCodeFlags::MODE64);
        self
    }

    /// Only valid in 64-bit mode.
    pub const fn only64(mut self) -> Self {
        self.flags = self.flags.difference(OpCodeFlags::MODE16.union(OpCodeFlags::MODE32));
        self
    }

    /// Not valid in 16-bit mode.
    pub const fn no16(mut self) -> Self {
        self.flags = self.flags.difference(OpCodeFlags::MODE16);
        self
    }

    /// Accepts `LOCK`.
    pub const fn lock(self) -> Self {
        self.with(OpCodeFlags::LOCK)
    }

    /// `W` = 1.
    pub const fn w1(self) -> Self {
        self.with(OpCodeFlags::W1)
    }

    /// `W` ignored.
    pub const fn wig(self) -> Self {
        self.with(OpCodeFlags::WIG)
    }

    /// `L` ignored.
    pub const fn lig(self) -> Self {
        self.with(OpCodeFlags::LIG)
    }

    /// `REX.W` does not select a distinct form.
    pub const fn rexw_ignored(self) -> Self {
        self.with(OpCodeFlags::REX_W_IGNORED)
    }

    /// Vector length `L` (0 = 128, 1 = 256, 2 = 512).
    pub const fn l(mut self, length: u8) -> Self {
        self.vector_length = length;
        self
    }

    /// EVEX full-vector tuple with embedded broadcast.
    pub const fn full_bcst(mut self) -> Self {
        self.tuple_type = TupleType::Full;
        self.with(OpCodeFlags::BROADCAST)
    }

    /// EVEX full-vector-memory tuple.
    pub const fn full_mem(mut self) -> Self {
        self.tuple_type = TupleType::FullMem;
        self
    }

    /// EVEX embedded rounding control.
    pub const fn er(self) -> Self {
        self.with(OpCodeFlags::ROUNDING.union(OpCodeFlags::SAE))
    }

    /// Valid in `bitness`-bit mode.
    #[must_use]
    pub const fn is_valid_in(&self, bitness: u32) -> bool {
        match bitness {
            16 => self.flags.contains(OpCodeFlags::MODE16),
            32 => self.flags.contains(OpCodeFlags::MODE32),
            64 => self.flags.contains(OpCodeFlags::MODE64),
            _ => false,
        }
    }

    /// Element size in bytes used for EVEX broadcast.
    #[must_use]
    pub const fn element_size(&self) -> u32 {
        if self.flags.contains(OpCodeFlags::W1) {
            8
        } else {
            4
        }
    }

    /// `N` of a compressed EVEX displacement.
    #[must_use]
    pub const fn disp8_scale(&self, broadcast: bool) -> u32 {
        let vector_bytes = 16u32 << self.vector_length;
        match self.tuple_type {
            TupleType::None => 1,
            TupleType::Full if broadcast => self.element_size(),
            TupleType::Full | TupleType::FullMem => vector_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_modes() {
        let ops = &[OperandSpec::Rm64, OperandSpec::Reg64];
        let info = OpCodeInfo::legacy(OpCodeTable::Normal, 0x01, ops).o64();
        assert!(info.is_valid_in(64));
        assert!(!info.is_valid_in(32));
        assert_eq!(info.operand_size, 64);

        let info = OpCodeInfo::legacy(OpCodeTable::Normal, 0x27, &[]).no64();
        assert!(info.is_valid_in(16));
        assert!(!info.is_valid_in(64));
    }

    #[test]
    fn test_disp8_scale() {
        let info = OpCodeInfo::evex(OpCodeTable::T0F, 0x58, &[]).l(2).full_bcst();
        assert_eq!(info.disp8_scale(false), 64);
        assert_eq!(info.disp8_scale(true), 4);
        assert_eq!(info.w1().disp8_scale(true), 8);

        let info = OpCodeInfo::evex(OpCodeTable::T0F, 0x10, &[]).l(1).full_mem();
        assert_eq!(info.disp8_scale(false), 32);
    }

    #[test]
    fn test_mandatory_prefix_pp() {
        assert_eq!(MandatoryPrefix::from_pp(2), MandatoryPrefix::PF3);
        assert_eq!(MandatoryPrefix::PF2 as u8, 3);
        assert_eq!(MandatoryPrefix::P66.byte(), Some(0x66));
    }
}
