//! x86/x86-64 instruction decoder.
//!
//! The decoder is a table-driven state machine. For every instruction it
//!
//! 1. consumes legacy prefixes (`26 2E 36 3E 64 65 66 67 F0 F2 F3`) and, in 64-bit mode, a
//!    REX prefix that directly precedes the opcode,
//! 2. looks the opcode byte up in the one-byte map, whose entries may escape to the `0F`,
//!    `0F 38` and `0F 3A` maps or to a VEX/EVEX/XOP prefix and its maps,
//! 3. reads ModRM when the selected [`handler::Handler`] needs it and lets the handler pick
//!    the final [`Code`],
//! 4. reads every operand described by the code's [`crate::OperandSpec`] list: registers,
//!    memory (ModRM/SIB/displacement), immediates and branch targets,
//! 5. applies the prefix validity rules (`LOCK`, `XACQUIRE`/`XRELEASE`, repeat prefixes) and
//!    the 15-byte length limit.
//!
//! Undecodable bytes produce an [`Instruction`] whose code is [`Code::INVALID`]; only running
//! out of input is an error ([`Error::EndOfInput`]).
//!
//! # Examples
//!
//! ```rust
//! use x86scope::{Bitness, Code, Decoder, DecoderOptions};
//!
//! // mov eax, [rip+0x10] ; ret
//! let bytes = [0x8B, 0x05, 0x10, 0x00, 0x00, 0x00, 0xC3];
//! let decoder = Decoder::new(Bitness::Bit64, &bytes, 0x1000, DecoderOptions::NONE);
//! let codes: Vec<Code> = decoder.map(|instr| instr.code).collect();
//! assert_eq!(codes, [Code::Mov_r32_rm32, Code::Retnq]);
//! ```

mod handler;
mod memory;
mod operands;
mod state;
mod tables;
mod vector;

use bitflags::bitflags;
use log::trace;

use crate::{
    instruction::{
        Code, Instruction, InstructionFlags, MandatoryPrefix, OpCodeFlags, Operand,
        Register,
    },
    parser::Parser,
    Error, Result,
};

use self::{
    handler::{Handler, LoopCodes, SizeRule, Sizes},
    state::{State, StateFlags},
    tables::Tables,
};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Decoder quirk switches
    pub struct DecoderOptions: u32 {
        /// Default behaviour
        const NONE = 0;
        /// Skip the `LOCK`, `vvvv` and EVEX reserved-field validity checks
        const NO_INVALID_CHECK = 0x0000_0001;
        /// An operand size prefix on a near branch in 64-bit mode selects the 16-bit form
        const AMD = 0x0000_0002;
        /// Decode the 287 opcodes `FRSTPM` (`DB E5`), `FSTDW AX` (`DF E1`), `FSTSG AX` (`DF E2`)
        const OLD_FPU = 0x0000_0004;
        /// `F3 90` is `NOP` with a repeat prefix, not `PAUSE`
        const NO_PAUSE = 0x0000_0008;
        /// `F3 0F 09` is `WBINVD` with a repeat prefix, not `WBNOINVD`
        const NO_WBNOINVD = 0x0000_0010;
        /// `0F A6`/`0F A7` are the 386 A-step `XBTS`/`IBTS`
        const XBTS = 0x0000_0020;
        /// `0F A6`/`0F A7` are the 486 A-step `CMPXCHG`
        const CMPXCHG486A = 0x0000_0040;
        /// `LOCK MOV CR0` outside 64-bit mode is invalid instead of an alias of `MOV CR8`
        const NO_LOCK_MOV_CR0 = 0x0000_0080;
    }
}

/// Code size of the processor mode being decoded or encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bitness {
    /// 16-bit real or protected mode
    Bit16,
    /// 32-bit protected mode
    Bit32,
    /// 64-bit long mode
    Bit64,
}

impl Bitness {
    /// Size in bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Bitness::Bit16 => 16,
            Bitness::Bit32 => 32,
            Bitness::Bit64 => 64,
        }
    }

    /// Mask of the instruction pointer. Addresses wrap around at this width.
    #[must_use]
    pub const fn address_mask(self) -> u64 {
        match self {
            Bitness::Bit16 => 0xFFFF,
            Bitness::Bit32 => 0xFFFF_FFFF,
            Bitness::Bit64 => u64::MAX,
        }
    }
}

impl TryFrom<u32> for Bitness {
    type Error = Error;

    fn try_from(bits: u32) -> Result<Self> {
        match bits {
            16 => Ok(Bitness::Bit16),
            32 => Ok(Bitness::Bit32),
            64 => Ok(Bitness::Bit64),
            other => Err(Error::InvalidBitness(other)),
        }
    }
}

const LEGACY_SEGMENTS: [Register; 4] = [Register::ES, Register::CS, Register::SS, Register::DS];

/// Decodes instructions from a byte buffer.
///
/// The decoder keeps an instruction pointer that advances with every decoded instruction, so
/// branch targets and RIP-relative operands are absolute addresses. It also implements
/// [`Iterator`], stopping at the end of the buffer or at a truncated instruction.
pub struct Decoder<'a> {
    parser: Parser<'a>,
    ip: u64,
    bitness: Bitness,
    options: DecoderOptions,
    state: State,
    tables: &'static Tables,
}

impl<'a> Decoder<'a> {
    /// Create a new decoder.
    ///
    /// ## Arguments
    /// * 'bitness' - The processor mode
    /// * 'data'    - The bytes to decode
    /// * 'ip'      - The address of `data[0]`
    /// * 'options' - Quirk switches
    #[must_use]
    pub fn new(bitness: Bitness, data: &'a [u8], ip: u64, options: DecoderOptions) -> Self {
        let mut decoder = Decoder {
            parser: Parser::new(data),
            ip,
            bitness,
            options,
            state: State::new(32, 32),
            tables: tables::get(),
        };
        decoder.state = decoder.fresh_state();
        decoder
    }

    /// Create a new decoder from a bitness given in bits.
    ///
    /// # Errors
    /// Returns [`Error::InvalidBitness`] if `bitness` is not 16, 32 or 64.
    pub fn try_new(bitness: u32, data: &'a [u8], ip: u64, options: DecoderOptions) -> Result<Self> {
        Ok(Decoder::new(Bitness::try_from(bitness)?, data, ip, options))
    }

    /// The processor mode.
    #[must_use]
    pub fn bitness(&self) -> Bitness {
        self.bitness
    }

    /// Address of the next instruction.
    #[must_use]
    pub fn ip(&self) -> u64 {
        self.ip
    }

    /// Sets the address of the next instruction.
    pub fn set_ip(&mut self, ip: u64) {
        self.ip = ip;
    }

    /// Offset of the next instruction in the buffer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.parser.pos()
    }

    /// Moves to another buffer offset. The instruction pointer is not changed.
    ///
    /// # Errors
    /// Returns [`Error::EndOfInput`] if `pos` is beyond the buffer.
    pub fn set_position(&mut self, pos: usize) -> Result<()> {
        self.parser.seek(pos)
    }

    /// `true` while bytes remain.
    #[must_use]
    pub fn can_decode(&self) -> bool {
        self.parser.has_more_data()
    }

    /// Decodes the next instruction and advances past it.
    ///
    /// # Errors
    /// Returns [`Error::EndOfInput`] if the buffer ends inside the instruction. The position
    /// and instruction pointer are left unchanged in that case.
    pub fn decode(&mut self) -> Result<Instruction> {
        let start = self.parser.pos();
        match self.decode_one() {
            Ok(instr) => Ok(instr),
            Err(error) => {
                self.parser.seek(start)?;
                Err(error)
            }
        }
    }

    fn fresh_state(&self) -> State {
        State::new(self.default_operand_size(), self.default_address_size())
    }

    fn decode_one(&mut self) -> Result<Instruction> {
        self.parser.begin_instruction();
        self.state = self.fresh_state();
        let mut instr = Instruction {
            ip: self.ip,
            ..Instruction::default()
        };

        let opcode = self.read_prefixes()?;
        self.state.op_reg = opcode & 7;
        let tables = self.tables;
        self.dispatch_handler(&tables.legacy[opcode as usize], &mut instr)?;

        if self.parser.is_too_long() {
            self.parser.consume_max_length();
            self.state.invalidate();
        }
        let len = self.parser.instruction_len();
        instr.len = len as u8;
        if !self.state.flags.contains(StateFlags::INVALID) {
            self.apply_prefixes(&mut instr);
        }
        if self.state.flags.contains(StateFlags::INVALID) {
            trace!("invalid instruction at {:#x}, length {}", self.ip, len);
            instr = Instruction {
                ip: self.ip,
                len: len as u8,
                ..Instruction::default()
            };
        }

        self.ip = self.ip.wrapping_add(len as u64);
        Ok(instr)
    }

    /// Consumes the prefix bytes and returns the opcode byte.
    fn read_prefixes(&mut self) -> Result<u8> {
        let is_64 = self.is_64();
        let inverted_operand_size = if self.bitness == Bitness::Bit16 { 32 } else { 16 };
        let inverted_address_size = if self.bitness == Bitness::Bit32 { 16 } else { 32 };
        let mut rex = 0u8;
        let opcode = loop {
            let byte = self.parser.read_le::<u8>()?;
            let state = &mut self.state;
            match byte {
                0x26 | 0x2E | 0x36 | 0x3E => {
                    if !is_64 || !state.segment_prio {
                        state.segment = LEGACY_SEGMENTS[((byte >> 3) & 3) as usize];
                    }
                }
                0x64 | 0x65 => {
                    state.segment = if byte == 0x64 {
                        Register::FS
                    } else {
                        Register::GS
                    };
                    state.segment_prio = true;
                }
                0x66 => {
                    state.flags.insert(StateFlags::HAS66);
                    state.operand_size = inverted_operand_size;
                    if state.mandatory_prefix == MandatoryPrefix::None {
                        state.mandatory_prefix = MandatoryPrefix::P66;
                    }
                }
                0x67 => state.address_size = inverted_address_size,
                0xF0 => state.flags.insert(StateFlags::LOCK),
                0xF2 | 0xF3 => {
                    state.flags.insert(StateFlags::HAS_REP);
                    state.rep_byte = byte;
                    state.mandatory_prefix = if byte == 0xF3 {
                        MandatoryPrefix::PF3
                    } else {
                        MandatoryPrefix::PF2
                    };
                }
                0x40..=0x4F if is_64 => {
                    rex = byte;
                    continue;
                }
                _ => break byte,
            }
            rex = 0;
        };

        if rex != 0 {
            let state = &mut self.state;
            state.flags.insert(StateFlags::HAS_REX);
            if rex & 8 != 0 {
                state.flags.insert(StateFlags::W);
                state.operand_size = 64;
            }
            state.extra_reg = (rex & 4) << 1;
            state.extra_index = (rex & 2) << 2;
            state.extra_base = (rex & 1) << 3;
        }
        Ok(opcode)
    }

    /// Turns the collected prefix state into instruction flags and validates `LOCK`.
    fn apply_prefixes(&mut self, instr: &mut Instruction) {
        let flags = self.state.flags;
        let info = instr.code.op_code();
        let mem_dest = matches!(instr.operands[0], Operand::Memory(_));
        instr.segment_prefix = self.state.segment;

        if flags.contains(StateFlags::LOCK) {
            let lockable = info.flags.contains(OpCodeFlags::LOCK) && mem_dest;
            if !lockable && !self.options.contains(DecoderOptions::NO_INVALID_CHECK) {
                self.state.invalidate();
                return;
            }
            instr.flags.insert(InstructionFlags::LOCK);
        }

        if flags.contains(StateFlags::HAS_REP) && !flags.contains(StateFlags::REP_CONSUMED) {
            let hle = instr.flags.contains(InstructionFlags::LOCK)
                || (mem_dest && is_xchg(instr.code));
            let flag = match self.state.rep_byte {
                0xF2 if hle => InstructionFlags::XACQUIRE,
                0xF2 => InstructionFlags::REPNE,
                _ if hle || (mem_dest && is_mov_store(instr.code)) => InstructionFlags::XRELEASE,
                _ => InstructionFlags::REP,
            };
            instr.flags.insert(flag);
        }

        let next_ip = instr.next_ip();
        for op in &mut instr.operands {
            if let Operand::Memory(mem) = op {
                match mem.base {
                    Register::RIP => mem.displacement = mem.displacement.wrapping_add(next_ip),
                    Register::EIP => {
                        mem.displacement =
                            u64::from((mem.displacement as u32).wrapping_add(next_ip as u32));
                    }
                    _ => {}
                }
            }
        }
    }

    /// Reads the next opcode byte and runs its handler from `table`.
    pub(crate) fn dispatch(
        &mut self,
        table: &[Handler; 256],
        instr: &mut Instruction,
    ) -> Result<()> {
        let opcode = self.parser.read_le::<u8>()?;
        self.state.op_reg = opcode & 7;
        self.dispatch_handler(&table[opcode as usize], instr)
    }

    /// Reads ModRM if `handler` needs it and runs it.
    pub(crate) fn dispatch_handler(
        &mut self,
        handler: &Handler,
        instr: &mut Instruction,
    ) -> Result<()> {
        if handler.has_modrm() {
            let modrm = self.parser.read_le::<u8>()?;
            self.state.set_modrm(modrm);
        }
        handler.decode(self, instr)
    }

    pub(crate) fn is_64(&self) -> bool {
        self.bitness == Bitness::Bit64
    }

    pub(crate) fn default_operand_size(&self) -> u32 {
        if self.bitness == Bitness::Bit16 {
            16
        } else {
            32
        }
    }

    fn default_address_size(&self) -> u32 {
        self.bitness.bits()
    }

    /// Picks the 16/32/64-bit variant for the current operand size.
    pub(crate) fn select_size(&self, sizes: &Sizes, rule: SizeRule) -> Code {
        let size = self.state.operand_size;
        let size = if self.is_64() {
            match rule {
                SizeRule::Normal => size,
                SizeRule::Default64 if size == 16 => 16,
                SizeRule::Force64
                    if size == 16 && self.options.contains(DecoderOptions::AMD) =>
                {
                    16
                }
                SizeRule::Default64 | SizeRule::Force64 => 64,
            }
        } else {
            size
        };
        match size {
            16 => sizes.c16,
            32 => sizes.c32,
            _ => sizes.c64,
        }
    }

    /// Picks the `LOOPcc`/`JrCXZ` variant for the current operand and address size.
    pub(crate) fn select_loop(&self, codes: &LoopCodes) -> Code {
        let operand_size = if self.is_64() {
            if self.state.operand_size == 16 && self.options.contains(DecoderOptions::AMD) {
                16
            } else {
                64
            }
        } else {
            self.state.operand_size
        };
        match (self.state.address_size, operand_size) {
            (16, 16) => codes.cx[0],
            (16, _) => codes.cx[1],
            (32, 16) => codes.ecx[0],
            (32, 32) => codes.ecx[1],
            (32, _) => codes.ecx[2],
            (_, 16) => codes.rcx[0],
            _ => codes.rcx[1],
        }
    }
}

fn is_xchg(code: Code) -> bool {
    matches!(
        code,
        Code::Xchg_rm8_r8 | Code::Xchg_rm16_r16 | Code::Xchg_rm32_r32 | Code::Xchg_rm64_r64
    )
}

fn is_mov_store(code: Code) -> bool {
    matches!(
        code,
        Code::Mov_rm8_r8
            | Code::Mov_rm16_r16
            | Code::Mov_rm32_r32
            | Code::Mov_rm64_r64
            | Code::Mov_rm8_imm8
            | Code::Mov_rm16_imm16
            | Code::Mov_rm32_imm32
            | Code::Mov_rm64_imm32
    )
}

impl Iterator for Decoder<'_> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        if !self.can_decode() {
            return None;
        }
        self.decode().ok()
    }
}

/// Decodes one instruction at `offset` of `bytes`.
///
/// Returns the instruction and the number of bytes it occupies.
///
/// ## Arguments
/// * 'bytes'   - The buffer
/// * 'offset'  - Offset of the instruction in `bytes`
/// * 'bitness' - The processor mode
/// * 'ip'      - Address of the instruction
/// * 'options' - Quirk switches
///
/// # Errors
/// Returns [`Error::EndOfInput`] if the buffer ends inside the instruction.
///
/// # Examples
///
/// ```rust
/// use x86scope::{decode, Bitness, Code, DecoderOptions};
///
/// let bytes = [0x90, 0xEB, 0x00];
/// let (instr, len) = decode(&bytes, 1, Bitness::Bit32, 0x1000, DecoderOptions::NONE)?;
/// assert_eq!(instr.code, Code::Jmp_rel8_32);
/// assert_eq!(len, 2);
/// # Ok::<(), x86scope::Error>(())
/// ```
pub fn decode(
    bytes: &[u8],
    offset: usize,
    bitness: Bitness,
    ip: u64,
    options: DecoderOptions,
) -> Result<(Instruction, usize)> {
    let mut decoder = Decoder::new(bitness, bytes, ip, options);
    decoder.set_position(offset)?;
    let instr = decoder.decode()?;
    Ok((instr, instr.len as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryOperand;

    fn decode64(bytes: &[u8]) -> Instruction {
        decode_with(Bitness::Bit64, bytes, DecoderOptions::NONE)
    }

    fn decode_with(bitness: Bitness, bytes: &[u8], options: DecoderOptions) -> Instruction {
        Decoder::new(bitness, bytes, 0x1000, options).decode().unwrap()
    }

    #[test]
    fn test_short_jump_targets_are_absolute() {
        let jmp = decode64(&[0xEB, 0x00]);
        assert_eq!(jmp.code, Code::Jmp_rel8_64);
        assert_eq!(jmp.near_branch_target(), Some(0x1002));

        let jmp = decode64(&[0xEB, 0xFE]);
        assert_eq!(jmp.near_branch_target(), Some(0x1000));

        let jmp = decode_with(Bitness::Bit16, &[0xE9, 0x00, 0xF0], DecoderOptions::NONE);
        assert_eq!(jmp.code, Code::Jmp_rel16);
        assert_eq!(jmp.near_branch_target(), Some(0x0003));
    }

    #[test]
    fn test_rip_relative_displacement_is_absolute() {
        let mov = decode64(&[0x8B, 0x05, 0x10, 0x00, 0x00, 0x00]);
        assert_eq!(mov.code, Code::Mov_r32_rm32);
        assert_eq!(
            mov.operands[1],
            Operand::Memory(MemoryOperand::with_base_displ(Register::RIP, 0x1016, 4))
        );
        assert!(mov.is_ip_rel_memory());
    }

    #[test]
    fn test_segment_prefix_priority() {
        let mov = decode64(&[0x64, 0x26, 0x8B, 0x00]);
        assert_eq!(mov.segment_prefix, Register::FS);
        let mov = decode64(&[0x26, 0x8B, 0x00]);
        assert_eq!(mov.segment_prefix, Register::ES);
        let mov = decode_with(Bitness::Bit32, &[0x64, 0x26, 0x8B, 0x00], DecoderOptions::NONE);
        assert_eq!(mov.segment_prefix, Register::ES);
        // recorded even without a memory operand
        let nop = decode64(&[0x2E, 0x90]);
        assert_eq!(nop.segment_prefix, Register::CS);
    }

    #[test]
    fn test_rex_must_precede_the_opcode() {
        let nop = decode64(&[0x48, 0x66, 0x90]);
        assert_eq!(nop.code, Code::Nopw);
        assert_eq!(nop.len, 3);
        let nop = decode64(&[0x66, 0x48, 0x90]);
        assert_eq!(nop.code, Code::Nopq);
        let xchg = decode64(&[0x41, 0x90]);
        assert_eq!(xchg.code, Code::Xchg_r32_EAX);
    }

    #[test]
    fn test_lock_needs_a_lockable_memory_destination() {
        let add = decode64(&[0xF0, 0x01, 0x08]);
        assert_eq!(add.code, Code::Add_rm32_r32);
        assert!(add.flags.contains(InstructionFlags::LOCK));

        let add = decode64(&[0xF0, 0x01, 0xC8]);
        assert!(add.is_invalid());
        assert_eq!(add.len, 3);

        let add = decode_with(
            Bitness::Bit64,
            &[0xF0, 0x01, 0xC8],
            DecoderOptions::NO_INVALID_CHECK,
        );
        assert_eq!(add.code, Code::Add_rm32_r32);
    }

    #[test]
    fn test_lock_mov_cr0_is_cr8_outside_long_mode() {
        let mov = decode_with(Bitness::Bit32, &[0xF0, 0x0F, 0x20, 0xC0], DecoderOptions::NONE);
        assert_eq!(mov.code, Code::Mov_r32_cr);
        assert_eq!(mov.operands[0], Operand::Register(Register::EAX));
        assert_eq!(mov.operands[1], Operand::Register(Register::CR8));
        assert!(!mov.flags.contains(InstructionFlags::LOCK));
        assert_eq!(mov.len, 4);

        let mov = decode_with(Bitness::Bit16, &[0xF0, 0x0F, 0x22, 0xC3], DecoderOptions::NONE);
        assert_eq!(mov.code, Code::Mov_cr_r32);
        assert_eq!(mov.operands[0], Operand::Register(Register::CR8));
        assert_eq!(mov.operands[1], Operand::Register(Register::EBX));

        let mov = decode_with(
            Bitness::Bit32,
            &[0xF0, 0x0F, 0x20, 0xC0],
            DecoderOptions::NO_LOCK_MOV_CR0,
        );
        assert!(mov.is_invalid());
        // only CR0 has the alias
        let mov = decode_with(Bitness::Bit32, &[0xF0, 0x0F, 0x20, 0xD8], DecoderOptions::NONE);
        assert!(mov.is_invalid());
        assert!(decode64(&[0xF0, 0x0F, 0x20, 0xC0]).is_invalid());
    }

    #[test]
    fn test_bound_register_instructions() {
        let none = DecoderOptions::NONE;
        let bndcl = decode_with(Bitness::Bit32, &[0xF3, 0x0F, 0x1A, 0xC1], none);
        assert_eq!(bndcl.code, Code::Bndcl_bnd_rm32);
        assert_eq!(bndcl.operands[0], Operand::Register(Register::BND0));
        assert_eq!(bndcl.operands[1], Operand::Register(Register::ECX));

        let bndcl = decode64(&[0xF3, 0x0F, 0x1A, 0x08]);
        assert_eq!(bndcl.code, Code::Bndcl_bnd_rm64);
        assert_eq!(bndcl.operands[0], Operand::Register(Register::BND1));
        assert!(matches!(bndcl.operands[1], Operand::Memory(mem) if mem.base == Register::RAX));

        let bndmov = decode64(&[0x66, 0x0F, 0x1A, 0xCA]);
        assert_eq!(bndmov.code, Code::Bndmov_bnd_bndm128);
        assert_eq!(bndmov.operands[1], Operand::Register(Register::BND2));

        // bndldx bnd0, [eax + ebx]
        let bndldx = decode_with(Bitness::Bit32, &[0x0F, 0x1A, 0x04, 0x18], none);
        assert_eq!(bndldx.code, Code::Bndldx_bnd_mib);
        let Operand::Memory(mib) = bndldx.operands[1] else {
            panic!("expected memory, got {:?}", bndldx.operands[1]);
        };
        assert_eq!((mib.base, mib.index), (Register::EAX, Register::EBX));

        let bndmk = decode_with(Bitness::Bit32, &[0xF3, 0x0F, 0x1B, 0x0B], none);
        assert_eq!(bndmk.code, Code::Bndmk_bnd_m32);
        assert_eq!(bndmk.len, 4);

        // only BND0-BND3 exist
        assert!(decode_with(Bitness::Bit32, &[0x66, 0x0F, 0x1A, 0xC4], none).is_invalid());
        assert!(decode64(&[0xF3, 0x44, 0x0F, 0x1A, 0xC0]).is_invalid());
        assert!(decode_with(Bitness::Bit32, &[0xF3, 0x0F, 0x1B, 0xC0], none).is_invalid());
        assert!(decode64(&[0x0F, 0x1A, 0x05, 0, 0, 0, 0]).is_invalid());
        assert!(decode_with(Bitness::Bit16, &[0xF3, 0x0F, 0x1A, 0x07], none).is_invalid());
        let bndcl = decode_with(Bitness::Bit16, &[0x67, 0xF3, 0x0F, 0x1A, 0x00], none);
        assert_eq!(bndcl.code, Code::Bndcl_bnd_rm32);
    }

    #[test]
    fn test_fifteen_byte_limit() {
        let mut bytes = vec![0x66; 14];
        bytes.push(0x90);
        let nop = decode64(&bytes);
        assert_eq!(nop.code, Code::Nopw);
        assert_eq!(nop.len, 15);

        let mut bytes = vec![0x66; 15];
        bytes.push(0x90);
        let mut decoder = Decoder::new(Bitness::Bit64, &bytes, 0x1000, DecoderOptions::NONE);
        let instr = decoder.decode().unwrap();
        assert!(instr.is_invalid());
        assert_eq!(instr.len, 15);
        assert_eq!(decoder.position(), 15);
        assert_eq!(decoder.ip(), 0x100F);
    }

    #[test]
    fn test_truncated_input_leaves_decoder_in_place() {
        let mut decoder = Decoder::new(Bitness::Bit64, &[0x90, 0x8B], 0x1000, DecoderOptions::NONE);
        assert_eq!(decoder.decode().unwrap().code, Code::Nopd);
        assert!(matches!(decoder.decode(), Err(Error::EndOfInput { .. })));
        assert_eq!(decoder.position(), 1);
        assert_eq!(decoder.ip(), 0x1001);
        assert_eq!(decoder.next(), None);
    }

    #[test]
    fn test_quirk_options() {
        assert_eq!(decode64(&[0xF3, 0x90]).code, Code::Pause);
        let nop = decode_with(Bitness::Bit64, &[0xF3, 0x90], DecoderOptions::NO_PAUSE);
        assert_eq!(nop.code, Code::Nopd);
        assert!(nop.flags.contains(InstructionFlags::REP));

        assert_eq!(decode64(&[0xF3, 0x0F, 0x09]).code, Code::Wbnoinvd);
        let wb = decode_with(Bitness::Bit64, &[0xF3, 0x0F, 0x09], DecoderOptions::NO_WBNOINVD);
        assert_eq!(wb.code, Code::Wbinvd);

        assert!(decode64(&[0xDB, 0xE5]).is_invalid());
        let fpu = decode_with(Bitness::Bit64, &[0xDB, 0xE5], DecoderOptions::OLD_FPU);
        assert_eq!(fpu.code, Code::Frstpm);

        let bytes = [0x0F, 0xA6, 0xC1];
        assert!(decode_with(Bitness::Bit32, &bytes, DecoderOptions::NONE).is_invalid());
        let xbts = decode_with(Bitness::Bit32, &bytes, DecoderOptions::XBTS);
        assert_eq!(xbts.code, Code::Xbts_r32_rm32);
        let cmpxchg = decode_with(Bitness::Bit32, &bytes, DecoderOptions::CMPXCHG486A);
        assert_eq!(cmpxchg.code, Code::Cmpxchg486_rm8_r8);

        assert_eq!(decode64(&[0x66, 0xEB, 0x00]).code, Code::Jmp_rel8_64);
        let jmp = decode_with(Bitness::Bit64, &[0x66, 0xEB, 0x00], DecoderOptions::AMD);
        assert_eq!(jmp.code, Code::Jmp_rel8_16);
    }

    #[test]
    fn test_vector_encodings() {
        let add = decode64(&[0xC5, 0xE8, 0x58, 0xCB]);
        assert_eq!(add.code, Code::VEX_Vaddps_xmm_xmm_xmmm128);
        assert_eq!(
            add.operands[..3],
            [
                Operand::Register(Register::XMM1),
                Operand::Register(Register::XMM2),
                Operand::Register(Register::XMM3)
            ]
        );

        let add = decode64(&[0x62, 0xF1, 0x6C, 0xC9, 0x58, 0xCB]);
        assert_eq!(add.code, Code::EVEX_Vaddps_zmm_k1z_zmm_zmmm512b32_er);
        assert_eq!(add.op_mask, Register::K1);
        assert!(add.flags.contains(InstructionFlags::ZEROING));

        // reserved EVEX bits
        assert!(decode64(&[0x62, 0xF5, 0x6C, 0x48, 0x58, 0xCB]).is_invalid());
        assert!(decode64(&[0x62, 0xF1, 0x68, 0x48, 0x58, 0xCB]).is_invalid());

        // VEX after a 66 prefix
        assert!(decode64(&[0x66, 0xC5, 0xE8, 0x58, 0xCB]).is_invalid());

        let blcfill = decode_with(
            Bitness::Bit32,
            &[0x8F, 0xE9, 0x78, 0x01, 0xC9],
            DecoderOptions::NONE,
        );
        assert_eq!(blcfill.code, Code::XOP_Blcfill_r32_rm32);
        assert_eq!(blcfill.operands[0], Operand::Register(Register::EAX));
        assert_eq!(blcfill.operands[1], Operand::Register(Register::ECX));
    }

    #[test]
    fn test_legacy_meanings_of_vector_escapes() {
        let decode32 = |bytes: &[u8]| decode_with(Bitness::Bit32, bytes, DecoderOptions::NONE);
        assert_eq!(decode32(&[0xC5, 0x06]).code, Code::Lds_r32_m1632);
        assert_eq!(decode32(&[0xC4, 0x00]).code, Code::Les_r32_m1632);
        assert_eq!(decode32(&[0x62, 0x00]).code, Code::Bound_r32_m3232);
        assert_eq!(decode32(&[0x8F, 0x00]).code, Code::Pop_rm32);
        assert_eq!(decode32(&[0xC5, 0xE8, 0x58, 0xCB]).code, Code::VEX_Vaddps_xmm_xmm_xmmm128);
        assert_eq!(decode64(&[0x8F, 0x00]).code, Code::Pop_rm64);
    }

    #[test]
    fn test_opcodes_removed_in_long_mode() {
        for bytes in [&[0x37][..], &[0xCE], &[0x06]] {
            assert!(decode64(bytes).is_invalid(), "{bytes:02X?}");
        }
        assert_eq!(
            decode_with(Bitness::Bit32, &[0x37], DecoderOptions::NONE).code,
            Code::Aaa
        );
    }

    #[test]
    fn test_iterator_and_free_function() {
        let bytes = [0x55, 0x48, 0x89, 0xE5, 0xC3];
        let codes: Vec<Code> = Decoder::new(Bitness::Bit64, &bytes, 0, DecoderOptions::NONE)
            .map(|instr| instr.code)
            .collect();
        assert_eq!(codes, [Code::Push_r64, Code::Mov_rm64_r64, Code::Retnq]);

        let (instr, len) =
            decode(&bytes, 1, Bitness::Bit64, 0x401001, DecoderOptions::NONE).unwrap();
        assert_eq!((instr.code, len, instr.ip), (Code::Mov_rm64_r64, 3, 0x401001));
        assert!(matches!(
            Decoder::try_new(8, &bytes, 0, DecoderOptions::NONE),
            Err(Error::InvalidBitness(8))
        ));
    }
}
