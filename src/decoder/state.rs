//! Per-instruction scratch state of the decoder.

use bitflags::bitflags;

use crate::instruction::{EncodingKind, MandatoryPrefix, Register};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    /// Prefix and extension bits collected while decoding one instruction
    pub(crate) struct StateFlags: u32 {
        /// A REX prefix directly precedes the opcode
        const HAS_REX = 0x0001;
        /// REX.W / VEX.W / EVEX.W
        const W = 0x0002;
        /// `F0` seen
        const LOCK = 0x0004;
        /// `66` seen
        const HAS66 = 0x0008;
        /// `F2`/`F3` seen; `rep_byte` holds the last one
        const HAS_REP = 0x0010;
        /// The `F2`/`F3` prefix selected the opcode and is not a repeat prefix
        const REP_CONSUMED = 0x0020;
        /// ModRM.mod is treated as 3 (`MOV CRn/DRn`)
        const IGNORE_MOD = 0x0040;
        /// EVEX.z
        const Z = 0x0080;
        /// EVEX.b
        const B = 0x0100;
        /// The instruction is invalid
        const INVALID = 0x0200;
        /// A VEX/EVEX/XOP prefix was preceded by a prefix it does not allow
        const BAD_VECTOR_PREFIX = 0x0400;
    }
}

/// Transient decode state. Reset at the start of every instruction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct State {
    pub modrm: u8,
    pub mod_: u8,
    pub reg: u8,
    pub rm: u8,
    /// Low three bits of the opcode byte, for register-in-opcode forms
    pub op_reg: u8,
    /// REX.R / VEX.R̄ / EVEX.R̄ as `0` or `8`
    pub extra_reg: u8,
    /// REX.X as `0` or `8`
    pub extra_index: u8,
    /// REX.B as `0` or `8`
    pub extra_base: u8,
    /// EVEX.R̄' as `0` or `16`
    pub extra_reg_evex: u8,
    /// EVEX.X̄ extending a register ModRM.rm, as `0` or `16`
    pub extra_base_evex: u8,
    /// VEX/EVEX/XOP register specifier, already inverted
    pub vvvv: u8,
    /// EVEX opmask register number
    pub aaa: u8,
    /// VEX.L or EVEX.L'L
    pub vector_length: u8,
    pub operand_size: u32,
    pub address_size: u32,
    pub segment: Register,
    /// `FS`/`GS` was seen; in 64-bit mode later `ES`/`CS`/`SS`/`DS` do not replace it
    pub segment_prio: bool,
    pub rep_byte: u8,
    pub mandatory_prefix: MandatoryPrefix,
    pub encoding: EncodingKind,
    pub flags: StateFlags,
}

impl State {
    pub fn new(operand_size: u32, address_size: u32) -> Self {
        State {
            modrm: 0,
            mod_: 0,
            reg: 0,
            rm: 0,
            op_reg: 0,
            extra_reg: 0,
            extra_index: 0,
            extra_base: 0,
            extra_reg_evex: 0,
            extra_base_evex: 0,
            vvvv: 0,
            aaa: 0,
            vector_length: 0,
            operand_size,
            address_size,
            segment: Register::None,
            segment_prio: false,
            rep_byte: 0,
            mandatory_prefix: MandatoryPrefix::None,
            encoding: EncodingKind::Legacy,
            flags: StateFlags::empty(),
        }
    }

    /// Splits a ModRM byte into its fields.
    pub fn set_modrm(&mut self, modrm: u8) {
        self.modrm = modrm;
        self.mod_ = modrm >> 6;
        self.reg = (modrm >> 3) & 7;
        self.rm = modrm & 7;
    }

    /// `true` when ModRM names a register operand.
    pub fn is_reg_form(&self) -> bool {
        self.mod_ == 3 || self.flags.contains(StateFlags::IGNORE_MOD)
    }

    pub fn w(&self) -> bool {
        self.flags.contains(StateFlags::W)
    }

    pub fn invalidate(&mut self) {
        self.flags.insert(StateFlags::INVALID);
    }
}
