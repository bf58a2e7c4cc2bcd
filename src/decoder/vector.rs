//! VEX, XOP and EVEX prefix decoding.

use crate::{
    decoder::{state::StateFlags, Decoder, DecoderOptions},
    instruction::{
        Code, EncodingKind, Instruction, InstructionFlags, MandatoryPrefix, OpCodeFlags,
        OperandSpec, Register, RoundingControl,
    },
    Result,
};

impl Decoder<'_> {
    /// VEX/XOP/EVEX may not follow `66`, `F2`, `F3`, `LOCK` or REX.
    fn check_vector_prefixes(&mut self, encoding: EncodingKind) {
        self.state.encoding = encoding;
        if self.state.flags.intersects(
            StateFlags::HAS66 | StateFlags::HAS_REP | StateFlags::LOCK | StateFlags::HAS_REX,
        ) {
            self.state.flags.insert(StateFlags::BAD_VECTOR_PREFIX);
            self.state.invalidate();
        }
        // The vector prefix carries its own operand size and register extensions.
        self.state.flags.remove(StateFlags::W);
        self.state.extra_reg = 0;
        self.state.extra_index = 0;
        self.state.extra_base = 0;
    }

    /// Common tail of the 3-byte VEX and the XOP prefix: `R̄X̄B̄ mmmmm`, `W vvvv̄ L pp`.
    fn read_vex3_fields(&mut self) -> Result<u8> {
        let b1 = self.parser.read_le::<u8>()?;
        let b2 = self.parser.read_le::<u8>()?;
        let state = &mut self.state;
        if self.bitness == crate::Bitness::Bit64 {
            state.extra_reg = (!b1 >> 4) & 8;
            state.extra_index = (!b1 >> 3) & 8;
            state.extra_base = (!b1 >> 2) & 8;
        }
        if b2 & 0x80 != 0 {
            state.flags.insert(StateFlags::W);
        }
        state.vvvv = (!b2 >> 3) & 0x0F;
        state.vector_length = (b2 >> 2) & 1;
        state.mandatory_prefix = MandatoryPrefix::from_pp(b2 & 3);
        self.limit_vvvv();
        Ok(b1 & 0x1F)
    }

    fn limit_vvvv(&mut self) {
        if !self.is_64() {
            self.state.vvvv &= 7;
        }
    }

    /// Reads the opcode of an unknown map so the length is still right, and invalidates.
    fn invalid_map(&mut self) -> Result<()> {
        self.parser.read_le::<u8>()?;
        self.state.invalidate();
        Ok(())
    }

    /// `C5 R̄vvvv̄Lpp`
    pub(crate) fn decode_vex2(&mut self, instr: &mut Instruction) -> Result<()> {
        self.check_vector_prefixes(EncodingKind::Vex);
        let b1 = self.parser.read_le::<u8>()?;
        if self.is_64() {
            self.state.extra_reg = (!b1 >> 4) & 8;
        }
        self.state.vvvv = (!b1 >> 3) & 0x0F;
        self.state.vector_length = (b1 >> 2) & 1;
        self.state.mandatory_prefix = MandatoryPrefix::from_pp(b1 & 3);
        self.limit_vvvv();

        let tables = self.tables;
        self.dispatch(&tables.vex[0], instr)
    }

    /// `C4 R̄X̄B̄mmmmm Wvvvv̄Lpp`
    pub(crate) fn decode_vex3(&mut self, instr: &mut Instruction) -> Result<()> {
        self.check_vector_prefixes(EncodingKind::Vex);
        let map = self.read_vex3_fields()?;
        let tables = self.tables;
        match map {
            1..=3 => self.dispatch(&tables.vex[map as usize - 1], instr),
            _ => self.invalid_map(),
        }
    }

    /// `8F R̄X̄B̄mmmmm Wvvvv̄Lpp`
    pub(crate) fn decode_xop(&mut self, instr: &mut Instruction) -> Result<()> {
        self.check_vector_prefixes(EncodingKind::Xop);
        let map = self.read_vex3_fields()?;
        let tables = self.tables;
        match map {
            8..=10 => self.dispatch(&tables.xop[map as usize - 8], instr),
            _ => self.invalid_map(),
        }
    }

    /// `62 R̄X̄B̄R̄'00mm Wvvvv̄1pp zL'Lbv̄'aaa`
    pub(crate) fn decode_evex(&mut self, instr: &mut Instruction) -> Result<()> {
        self.check_vector_prefixes(EncodingKind::Evex);
        let p0 = self.parser.read_le::<u8>()?;
        let p1 = self.parser.read_le::<u8>()?;
        let p2 = self.parser.read_le::<u8>()?;
        let check = !self.options.contains(DecoderOptions::NO_INVALID_CHECK);

        let state = &mut self.state;
        if check && (p0 & 0x0C != 0 || p1 & 0x04 == 0) {
            state.invalidate();
        }
        if self.bitness == crate::Bitness::Bit64 {
            state.extra_reg = (!p0 >> 4) & 8;
            state.extra_index = (!p0 >> 3) & 8;
            state.extra_base = (!p0 >> 2) & 8;
            state.extra_reg_evex = !p0 & 0x10;
            state.extra_base_evex = (!p0 >> 2) & 0x10;
        }
        if p1 & 0x80 != 0 {
            state.flags.insert(StateFlags::W);
        }
        state.vvvv = ((!p1 >> 3) & 0x0F) | ((!p2 & 0x08) << 1);
        state.mandatory_prefix = MandatoryPrefix::from_pp(p1 & 3);
        state.vector_length = (p2 >> 5) & 3;
        state.aaa = p2 & 7;
        if p2 & 0x80 != 0 {
            state.flags.insert(StateFlags::Z);
        }
        if p2 & 0x10 != 0 {
            state.flags.insert(StateFlags::B);
        }
        if self.bitness != crate::Bitness::Bit64 {
            if check && state.vvvv > 7 {
                state.invalidate();
            }
            state.vvvv &= 7;
        }

        let tables = self.tables;
        match p0 & 3 {
            map @ 1..=3 => self.dispatch(&tables.evex[map as usize - 1], instr),
            _ => self.invalid_map(),
        }
    }

    /// `true` when EVEX.b on a register form selects embedded rounding / SAE.
    pub(crate) fn is_evex_rounding(&self) -> bool {
        self.state.encoding == EncodingKind::Evex
            && self.state.flags.contains(StateFlags::B)
            && self.state.mod_ == 3
    }

    /// Validates the vector fields against `code` and records the EVEX extras on `instr`.
    pub(crate) fn check_vector(&mut self, code: Code, instr: &mut Instruction) {
        let info = code.op_code();
        let check = !self.options.contains(DecoderOptions::NO_INVALID_CHECK);
        let rounding = self.is_evex_rounding();
        let state = &mut self.state;
        let flags = info.flags;

        let uses_gpr = info.ops.iter().any(|op| {
            matches!(
                op,
                OperandSpec::Reg32
                    | OperandSpec::Reg64
                    | OperandSpec::Rm32
                    | OperandSpec::Rm64
                    | OperandSpec::Vvvv32
                    | OperandSpec::Vvvv64
            )
        });
        if !flags.contains(OpCodeFlags::WIG)
            && !uses_gpr
            && state.w() != flags.contains(OpCodeFlags::W1)
        {
            state.invalidate();
        }
        if !flags.contains(OpCodeFlags::LIG)
            && !rounding
            && state.vector_length != info.vector_length
        {
            state.invalidate();
        }
        if check && state.vvvv != 0 && !info.ops.iter().any(|op| op.is_vvvv()) {
            state.invalidate();
        }
        if state.encoding != EncodingKind::Evex {
            return;
        }

        if state.aaa != 0 {
            if !flags.contains(OpCodeFlags::OPMASK) {
                state.invalidate();
            }
            instr.op_mask = Register::k(state.aaa);
        }
        if state.flags.contains(StateFlags::Z) {
            let mem_dest = state.mod_ != 3 && info.ops.first().is_some_and(|op| op.is_rm());
            if state.aaa == 0 || !flags.contains(OpCodeFlags::ZEROING) || mem_dest {
                state.invalidate();
            }
            instr.flags.insert(InstructionFlags::ZEROING);
        }
        if state.flags.contains(StateFlags::B) {
            if rounding {
                if flags.contains(OpCodeFlags::ROUNDING) {
                    instr.rounding = RoundingControl::from_ll(state.vector_length);
                } else if flags.contains(OpCodeFlags::SAE) {
                    instr.flags.insert(InstructionFlags::SUPPRESS_ALL_EXCEPTIONS);
                } else {
                    state.invalidate();
                }
            } else if flags.contains(OpCodeFlags::BROADCAST) {
                instr.flags.insert(InstructionFlags::BROADCAST);
            } else {
                state.invalidate();
            }
        } else if state.vector_length == 3 && !flags.contains(OpCodeFlags::LIG) {
            state.invalidate();
        }
    }
}
