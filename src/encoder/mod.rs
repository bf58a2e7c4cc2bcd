//! Single-instruction encoder.
//!
//! The [`Encoder`] turns one [`Instruction`] into bytes at a given address. Everything it needs
//! comes from the code's [`crate::OpCodeInfo`]: the opcode map and byte, the mandatory prefix,
//! the ModRM group, the operand size that decides `66`/`REX.W`, and the operand list that says
//! where each operand goes. The block encoder ([`crate::BlockEncoder`]) is built on top of it.
//!
//! Bytes are laid out as
//!
//! ```text
//! [seg] [F0] [66] [67] [F3] [F2] [mandatory] [REX | VEX | XOP | EVEX] [escape] opcode
//!     [ModRM [SIB] [disp]] [immediates | moffs | branch displacement | far pointer]
//! ```
//!
//! Branch and RIP-relative displacements depend on the instruction's own length, so they are
//! written as placeholders and patched once the length is known.
//!
//! # Examples
//!
//! ```rust
//! use x86scope::{Bitness, Decoder, DecoderOptions, Encoder};
//!
//! let bytes = [0x48, 0x8B, 0x05, 0x10, 0x00, 0x00, 0x00]; // mov rax, [rip+0x10]
//! let instr = Decoder::new(Bitness::Bit64, &bytes, 0x1000, DecoderOptions::NONE).decode()?;
//!
//! let mut encoder = Encoder::new(Bitness::Bit64);
//! // Moving the instruction 0x10 bytes forward keeps the absolute target.
//! encoder.encode(&instr, 0x1010)?;
//! assert_eq!(encoder.take_buffer(), [0x48, 0x8B, 0x05, 0x00, 0x00, 0x00, 0x00]);
//! # Ok::<(), x86scope::Error>(())
//! ```

mod operands;
mod prefixes;

use crate::{
    instruction::{Code, Instruction},
    io::{write_le, write_le_sized},
    parser::MAX_INSTRUCTION_LENGTH,
    Bitness, Result,
};

use self::operands::{Displacement, Fields, Trailing};

/// `true` if `value` is representable as a signed integer of `size` bytes.
pub(crate) fn fits_signed(value: i64, size: u8) -> bool {
    match size {
        1 => i8::try_from(value).is_ok(),
        2 => i16::try_from(value).is_ok(),
        4 => i32::try_from(value).is_ok(),
        _ => true,
    }
}

/// Where the displacement and immediates of the last encoded instruction were placed.
///
/// Offsets are relative to the first byte of the instruction. A size of 0 means the field is
/// absent. Branch displacements are not constants and are not reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConstantOffsets {
    /// Offset of the memory displacement (or `moffs` address)
    pub displacement_offset: u8,
    /// Size of the memory displacement in bytes
    pub displacement_size: u8,
    /// Offset of the first immediate
    pub immediate_offset: u8,
    /// Size of the first immediate in bytes
    pub immediate_size: u8,
    /// Offset of the second immediate (`ENTER`)
    pub immediate_offset2: u8,
    /// Size of the second immediate in bytes
    pub immediate_size2: u8,
}

impl ConstantOffsets {
    /// `true` if the instruction has a displacement.
    #[must_use]
    pub fn has_displacement(&self) -> bool {
        self.displacement_size != 0
    }

    /// `true` if the instruction has at least one immediate.
    #[must_use]
    pub fn has_immediate(&self) -> bool {
        self.immediate_size != 0
    }

    /// `true` if the instruction has a second immediate.
    #[must_use]
    pub fn has_immediate2(&self) -> bool {
        self.immediate_size2 != 0
    }
}

/// A field whose value is only known once the instruction length is.
#[derive(Debug, Clone, Copy)]
enum Patch {
    Rip { pos: usize, target: u64 },
    Eip { pos: usize, target: u64 },
    Branch { pos: usize, target: u64, size: u8, width: u32 },
}

/// Encodes instructions into an internal buffer.
///
/// Every successful [`Encoder::encode`] appends one instruction. A failed call leaves the
/// buffer as it was.
pub struct Encoder {
    bitness: Bitness,
    buffer: Vec<u8>,
    constant_offsets: ConstantOffsets,
}

impl Encoder {
    /// Create a new encoder for `bitness`.
    #[must_use]
    pub fn new(bitness: Bitness) -> Self {
        Encoder::with_capacity(bitness, 0)
    }

    /// Create a new encoder whose buffer can hold `capacity` bytes without growing.
    #[must_use]
    pub fn with_capacity(bitness: Bitness, capacity: usize) -> Self {
        Encoder {
            bitness,
            buffer: Vec::with_capacity(capacity),
            constant_offsets: ConstantOffsets::default(),
        }
    }

    /// Create a new encoder from a bitness given in bits.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidBitness`] if `bitness` is not 16, 32 or 64.
    pub fn try_new(bitness: u32) -> Result<Self> {
        Ok(Encoder::new(Bitness::try_from(bitness)?))
    }

    /// The processor mode.
    #[must_use]
    pub fn bitness(&self) -> Bitness {
        self.bitness
    }

    /// The bytes encoded so far.
    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Returns the encoded bytes and leaves the encoder with an empty buffer.
    pub fn take_buffer(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }

    /// Replaces the output buffer. New instructions are appended to `buffer`.
    pub fn set_buffer(&mut self, buffer: Vec<u8>) {
        self.buffer = buffer;
    }

    /// Displacement and immediate locations of the last encoded instruction.
    #[must_use]
    pub fn constant_offsets(&self) -> ConstantOffsets {
        self.constant_offsets
    }

    /// Encodes `instr` as if it were located at `ip` and appends it to the buffer.
    ///
    /// Branch targets and RIP-relative operands are absolute in `instr`, so moving an
    /// instruction to a new `ip` re-computes their displacements. Memory displacement sizes
    /// follow the operand's `displ_size`, which keeps decoded instructions byte-exact.
    ///
    /// ## Arguments
    /// * 'instr' - The instruction to encode
    /// * 'ip'    - Address of the instruction's first byte
    ///
    /// # Errors
    /// Returns [`crate::Error::Encode`], carrying `instr.ip`, when
    /// - the code is [`Code::INVALID`] or does not exist in this mode,
    /// - an operand does not fit the code's operand kind,
    /// - a register needs REX together with `AH`..`BH`, or REX outside 64-bit mode,
    /// - a displacement, immediate or branch target is out of range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use x86scope::{Bitness, Code, Encoder, Instruction, Operand};
    ///
    /// let mut jmp = Instruction::with_code(Code::Jmp_rel8_64);
    /// jmp.operands[0] = Operand::NearBranch(0x1010);
    ///
    /// let mut encoder = Encoder::new(Bitness::Bit64);
    /// assert_eq!(encoder.encode(&jmp, 0x1000)?, 2);
    /// assert_eq!(encoder.buffer(), [0xEB, 0x0E]);
    ///
    /// // A short jump cannot reach 0x2000 from 0x1000.
    /// jmp.operands[0] = Operand::NearBranch(0x2000);
    /// assert!(encoder.encode(&jmp, 0x1000).is_err());
    /// # Ok::<(), x86scope::Error>(())
    /// ```
    pub fn encode(&mut self, instr: &Instruction, ip: u64) -> Result<usize> {
        let start = self.buffer.len();
        let result = self.encode_at(instr, ip, start);
        if result.is_err() {
            self.buffer.truncate(start);
        }
        result
    }

    /// Encoded length of `instr` at `ip`, without keeping the bytes.
    pub(crate) fn measure(&mut self, instr: &Instruction, ip: u64) -> Result<usize> {
        let start = self.buffer.len();
        let result = self.encode_at(instr, ip, start);
        self.buffer.truncate(start);
        result
    }

    fn encode_at(&mut self, instr: &Instruction, ip: u64, start: usize) -> Result<usize> {
        let info = instr.code.op_code();
        if instr.code == Code::INVALID {
            return Err(encode_error!(instr.ip, "cannot encode an invalid instruction"));
        }
        if !info.is_valid_in(self.bitness.bits()) {
            return Err(encode_error!(
                instr.ip,
                "{} is not valid in {}-bit mode",
                instr.code.name(),
                self.bitness.bits()
            ));
        }

        let fields = Fields::collect(self.bitness, instr, info)?;
        let out = &mut self.buffer;
        prefixes::write_prefixes(out, self.bitness, instr, info, &fields)?;
        out.extend_from_slice(prefixes::escape_bytes(info));
        out.push(info.op_code | fields.op_reg);

        let mut offsets = ConstantOffsets::default();
        let mut patches: Vec<Patch> = Vec::new();
        if fields.has_modrm {
            out.push((fields.mod_ << 6) | (fields.reg << 3) | fields.rm);
            if let Some(sib) = fields.sib {
                out.push(sib);
            }
            match fields.displacement {
                Displacement::None => {}
                Displacement::Fixed { value, size } => {
                    offsets.displacement_offset = (out.len() - start) as u8;
                    offsets.displacement_size = size;
                    write_le_sized(out, value, size as usize);
                }
                Displacement::IpRelative { target, eip } => {
                    offsets.displacement_offset = (out.len() - start) as u8;
                    offsets.displacement_size = 4;
                    let pos = out.len();
                    patches.push(if eip {
                        Patch::Eip { pos, target }
                    } else {
                        Patch::Rip { pos, target }
                    });
                    write_le(out, 0u32);
                }
            }
        }

        for field in &fields.trailing {
            match *field {
                Trailing::Immediate { value, size } => {
                    let at = (out.len() - start) as u8;
                    if offsets.immediate_size == 0 {
                        offsets.immediate_offset = at;
                        offsets.immediate_size = size;
                    } else {
                        offsets.immediate_offset2 = at;
                        offsets.immediate_size2 = size;
                    }
                    write_le_sized(out, value, size as usize);
                }
                Trailing::Moffs { value, size } => {
                    offsets.displacement_offset = (out.len() - start) as u8;
                    offsets.displacement_size = size;
                    write_le_sized(out, value, size as usize);
                }
                Trailing::Branch {
                    target,
                    size,
                    width,
                } => {
                    patches.push(Patch::Branch {
                        pos: out.len(),
                        target,
                        size,
                        width,
                    });
                    write_le_sized(out, 0, size as usize);
                }
                Trailing::Far {
                    selector,
                    offset,
                    size,
                } => {
                    write_le_sized(out, u64::from(offset), size as usize);
                    write_le(out, selector);
                }
            }
        }

        let len = out.len() - start;
        if len > MAX_INSTRUCTION_LENGTH {
            return Err(encode_error!(
                instr.ip,
                "{} would be {} bytes long",
                instr.code.name(),
                len
            ));
        }

        let next_ip = ip.wrapping_add(len as u64);
        for patch in patches {
            let (pos, value, size) = resolve_patch(instr.ip, patch, next_ip)?;
            out[pos..pos + size].copy_from_slice(&value.to_le_bytes()[..size]);
        }
        self.constant_offsets = offsets;
        Ok(len)
    }
}

/// Position, value and size of a patched displacement.
fn resolve_patch(address: u64, patch: Patch, next_ip: u64) -> Result<(usize, u64, usize)> {
    match patch {
        Patch::Rip { pos, target } => {
            let diff = target.wrapping_sub(next_ip) as i64;
            if !fits_signed(diff, 4) {
                return Err(encode_error!(
                    address,
                    "RIP-relative target {:#x} is out of range of {:#x}",
                    target,
                    next_ip
                ));
            }
            Ok((pos, diff as u64, 4))
        }
        Patch::Eip { pos, target } => {
            if target >> 32 != 0 {
                return Err(encode_error!(
                    address,
                    "EIP-relative target {:#x} does not fit in 32 bits",
                    target
                ));
            }
            let diff = (target as u32).wrapping_sub(next_ip as u32);
            Ok((pos, u64::from(diff), 4))
        }
        Patch::Branch {
            pos,
            target,
            size,
            width,
        } => {
            let raw = target.wrapping_sub(next_ip);
            let diff = match width {
                16 => i64::from(raw as u16 as i16),
                32 => i64::from(raw as u32 as i32),
                _ => raw as i64,
            };
            if !fits_signed(diff, size) {
                return Err(encode_error!(
                    address,
                    "branch target {:#x} is out of range of a {}-byte displacement",
                    target,
                    size
                ));
            }
            Ok((pos, diff as u64, size as usize))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Error, Immediate, InstructionFlags, MemoryOperand, Operand, Register, RoundingControl,
    };

    fn instr(code: Code, operands: &[Operand]) -> Instruction {
        let mut instr = Instruction::with_code(code);
        instr.ip = 0x1000;
        instr.operands[..operands.len()].copy_from_slice(operands);
        instr
    }

    fn reg(reg: Register) -> Operand {
        Operand::Register(reg)
    }

    fn mem(base: Register, displacement: u64, displ_size: u8) -> Operand {
        Operand::Memory(MemoryOperand::with_base_displ(base, displacement, displ_size))
    }

    fn encode(bitness: Bitness, instr: &Instruction) -> Result<Vec<u8>> {
        let mut encoder = Encoder::new(bitness);
        encoder.encode(instr, instr.ip)?;
        Ok(encoder.take_buffer())
    }

    fn assert_encode_error(result: Result<Vec<u8>>) {
        match result {
            Err(Error::Encode { address, .. }) => assert_eq!(address, 0x1000),
            other => panic!("expected an encode error, got {other:?}"),
        }
    }

    #[test]
    fn test_encode_register_forms() {
        let add = instr(Code::Add_rm32_r32, &[reg(Register::ECX), reg(Register::EAX)]);
        assert_eq!(encode(Bitness::Bit64, &add).unwrap(), [0x01, 0xC1]);

        let add16 = instr(Code::Add_rm16_r16, &[reg(Register::CX), reg(Register::AX)]);
        assert_eq!(encode(Bitness::Bit32, &add16).unwrap(), [0x66, 0x01, 0xC1]);
        assert_eq!(encode(Bitness::Bit16, &add16).unwrap(), [0x01, 0xC1]);

        let push = instr(Code::Push_r64, &[reg(Register::R12)]);
        assert_eq!(encode(Bitness::Bit64, &push).unwrap(), [0x41, 0x54]);
    }

    #[test]
    fn test_encode_rex_byte_registers() {
        let mov = instr(Code::Mov_rm8_r8, &[reg(Register::SPL), reg(Register::AL)]);
        assert_eq!(encode(Bitness::Bit64, &mov).unwrap(), [0x40, 0x88, 0xC4]);

        let mov = instr(Code::Mov_rm8_r8, &[reg(Register::SPL), reg(Register::AH)]);
        assert_encode_error(encode(Bitness::Bit64, &mov));

        let mov = instr(Code::Mov_rm8_r8, &[reg(Register::R8L), reg(Register::BH)]);
        assert_encode_error(encode(Bitness::Bit64, &mov));

        let mov = instr(Code::Mov_rm8_r8, &[reg(Register::SIL), reg(Register::AL)]);
        assert_encode_error(encode(Bitness::Bit32, &mov));
    }

    #[test]
    fn test_encode_memory_forms() {
        let mov = instr(Code::Mov_r64_rm64, &[reg(Register::RAX), mem(Register::RBX, 8, 1)]);
        assert_eq!(encode(Bitness::Bit64, &mov).unwrap(), [0x48, 0x8B, 0x43, 0x08]);

        // [rbp] needs a zero disp8, [r12] needs a SIB byte
        let mov = instr(Code::Mov_r32_rm32, &[reg(Register::EAX), mem(Register::RBP, 0, 0)]);
        assert_eq!(encode(Bitness::Bit64, &mov).unwrap(), [0x8B, 0x45, 0x00]);
        let mov = instr(Code::Mov_r32_rm32, &[reg(Register::EAX), mem(Register::R12, 0, 0)]);
        assert_eq!(encode(Bitness::Bit64, &mov).unwrap(), [0x41, 0x8B, 0x04, 0x24]);

        let scaled = Operand::Memory(MemoryOperand {
            base: Register::RBX,
            index: Register::RCX,
            scale: 4,
            displacement: 0x10,
            displ_size: 1,
        });
        let mov = instr(Code::Mov_r32_rm32, &[reg(Register::EAX), scaled]);
        assert_eq!(encode(Bitness::Bit64, &mov).unwrap(), [0x8B, 0x44, 0x8B, 0x10]);

        let bad_index = Operand::Memory(MemoryOperand {
            base: Register::RBX,
            index: Register::RSP,
            scale: 1,
            ..MemoryOperand::default()
        });
        let mov = instr(Code::Mov_r32_rm32, &[reg(Register::EAX), bad_index]);
        assert_encode_error(encode(Bitness::Bit64, &mov));
    }

    #[test]
    fn test_encode_displacement_hint() {
        // disp32 of a small value is kept when the operand asks for it
        let mov = instr(Code::Mov_r32_rm32, &[reg(Register::EAX), mem(Register::EBX, 8, 4)]);
        assert_eq!(
            encode(Bitness::Bit32, &mov).unwrap(),
            [0x8B, 0x83, 0x08, 0x00, 0x00, 0x00]
        );
        let mov = instr(Code::Mov_r32_rm32, &[reg(Register::EAX), mem(Register::EBX, 0x200, 1)]);
        assert_eq!(
            encode(Bitness::Bit32, &mov).unwrap(),
            [0x8B, 0x83, 0x00, 0x02, 0x00, 0x00]
        );
    }

    #[test]
    fn test_encode_sixteen_bit_addressing() {
        let bp_di = Operand::Memory(MemoryOperand {
            base: Register::BP,
            index: Register::DI,
            scale: 1,
            displacement: 0xFFFE,
            displ_size: 1,
        });
        let mov = instr(Code::Mov_r16_rm16, &[reg(Register::AX), bp_di]);
        assert_eq!(encode(Bitness::Bit16, &mov).unwrap(), [0x8B, 0x43, 0xFE]);

        let mov = instr(Code::Mov_r16_rm16, &[reg(Register::AX), mem(Register::None, 0x1234, 2)]);
        assert_eq!(encode(Bitness::Bit16, &mov).unwrap(), [0x8B, 0x06, 0x34, 0x12]);
        assert_encode_error(encode(Bitness::Bit64, &mov));
    }

    #[test]
    fn test_encode_bound_registers() {
        let bndcl = instr(Code::Bndcl_bnd_rm32, &[reg(Register::BND1), reg(Register::ECX)]);
        assert_eq!(encode(Bitness::Bit32, &bndcl).unwrap(), [0xF3, 0x0F, 0x1A, 0xC9]);

        let bndcl = instr(Code::Bndcl_bnd_rm32, &[reg(Register::BND0), mem(Register::EBX, 0, 0)]);
        assert_eq!(encode(Bitness::Bit16, &bndcl).unwrap(), [0x67, 0xF3, 0x0F, 0x1A, 0x03]);
        let bndcl = instr(Code::Bndcl_bnd_rm32, &[reg(Register::BND0), mem(Register::BX, 0, 0)]);
        assert_encode_error(encode(Bitness::Bit16, &bndcl));

        let bndldx = instr(Code::Bndldx_bnd_mib, &[reg(Register::BND0), mem(Register::RIP, 0, 4)]);
        assert_encode_error(encode(Bitness::Bit64, &bndldx));
        let bndmov = instr(Code::Bndmov_bnd_bndm128, &[reg(Register::BND1), reg(Register::XMM0)]);
        assert_encode_error(encode(Bitness::Bit64, &bndmov));
    }

    #[test]
    fn test_encode_rip_relative() {
        let mov = instr(Code::Mov_r32_rm32, &[reg(Register::EAX), mem(Register::RIP, 0x1016, 4)]);
        assert_eq!(
            encode(Bitness::Bit64, &mov).unwrap(),
            [0x8B, 0x05, 0x10, 0x00, 0x00, 0x00]
        );

        let far = instr(
            Code::Mov_r32_rm32,
            &[reg(Register::EAX), mem(Register::RIP, 0x1_0000_1000, 4)],
        );
        assert_encode_error(encode(Bitness::Bit64, &far));

        let eip = instr(Code::Mov_r32_rm32, &[reg(Register::EAX), mem(Register::EIP, 0x0FF7, 4)]);
        assert_eq!(
            encode(Bitness::Bit64, &eip).unwrap(),
            [0x67, 0x8B, 0x05, 0xF0, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_encode_branch_ranges() {
        let jmp = instr(Code::Jmp_rel8_64, &[Operand::NearBranch(0x1002)]);
        assert_eq!(encode(Bitness::Bit64, &jmp).unwrap(), [0xEB, 0x00]);
        let jmp = instr(Code::Jmp_rel8_64, &[Operand::NearBranch(0x0F82)]);
        assert_eq!(encode(Bitness::Bit64, &jmp).unwrap(), [0xEB, 0x80]);
        let jmp = instr(Code::Jmp_rel8_64, &[Operand::NearBranch(0x0F81)]);
        assert_encode_error(encode(Bitness::Bit64, &jmp));

        // 16-bit targets wrap around the segment
        let mut jmp = instr(Code::Jmp_rel16, &[Operand::NearBranch(0x0010)]);
        jmp.ip = 0xFFF0;
        let mut encoder = Encoder::new(Bitness::Bit16);
        encoder.encode(&jmp, 0xFFF0).unwrap();
        assert_eq!(encoder.buffer(), [0xE9, 0x1D, 0x00]);

        let call = instr(Code::Call_rel32_64, &[Operand::NearBranch(0x1_0000_0000)]);
        assert_encode_error(encode(Bitness::Bit64, &call));
    }

    #[test]
    fn test_encode_prefixes_in_order() {
        let mut add = instr(
            Code::Add_rm32_r32,
            &[mem(Register::RAX, 0, 0), reg(Register::ECX)],
        );
        add.flags = InstructionFlags::LOCK;
        add.segment_prefix = Register::FS;
        assert_eq!(encode(Bitness::Bit64, &add).unwrap(), [0x64, 0xF0, 0x01, 0x08]);

        let mut movs = instr(
            Code::Movsb_m8_m8,
            &[
                Operand::StringMemory { base: Register::EDI },
                Operand::StringMemory { base: Register::ESI },
            ],
        );
        movs.flags = InstructionFlags::REP;
        assert_eq!(encode(Bitness::Bit64, &movs).unwrap(), [0x67, 0xF3, 0xA4]);

        let popcnt = instr(Code::Popcnt_r16_rm16, &[reg(Register::AX), reg(Register::CX)]);
        assert_eq!(
            encode(Bitness::Bit64, &popcnt).unwrap(),
            [0x66, 0xF3, 0x0F, 0xB8, 0xC1]
        );
    }

    #[test]
    fn test_encode_vex_forms() {
        let add = instr(
            Code::VEX_Vaddps_xmm_xmm_xmmm128,
            &[reg(Register::XMM1), reg(Register::XMM2), reg(Register::XMM3)],
        );
        assert_eq!(encode(Bitness::Bit64, &add).unwrap(), [0xC5, 0xE8, 0x58, 0xCB]);

        let add = instr(
            Code::VEX_Vaddps_xmm_xmm_xmmm128,
            &[reg(Register::XMM1), reg(Register::XMM2), reg(Register::XMM9)],
        );
        assert_eq!(
            encode(Bitness::Bit64, &add).unwrap(),
            [0xC4, 0xC1, 0x68, 0x58, 0xC9]
        );

        let mut locked = add;
        locked.flags = InstructionFlags::LOCK;
        assert_encode_error(encode(Bitness::Bit64, &locked));
    }

    #[test]
    fn test_encode_evex_forms() {
        let mut add = instr(
            Code::EVEX_Vaddps_zmm_k1z_zmm_zmmm512b32_er,
            &[reg(Register::ZMM1), reg(Register::ZMM2), reg(Register::ZMM3)],
        );
        add.op_mask = Register::K1;
        add.flags = InstructionFlags::ZEROING;
        assert_eq!(
            encode(Bitness::Bit64, &add).unwrap(),
            [0x62, 0xF1, 0x6C, 0xC9, 0x58, 0xCB]
        );

        // disp8*N with N = 64
        let add = instr(
            Code::EVEX_Vaddps_zmm_k1z_zmm_zmmm512b32_er,
            &[reg(Register::ZMM1), reg(Register::ZMM2), mem(Register::RAX, 0x40, 1)],
        );
        assert_eq!(
            encode(Bitness::Bit64, &add).unwrap(),
            [0x62, 0xF1, 0x6C, 0x48, 0x58, 0x48, 0x01]
        );

        let mut rounded = add;
        rounded.rounding = RoundingControl::RoundDown;
        assert_encode_error(encode(Bitness::Bit64, &rounded));

        let mut zeroing_without_mask = add;
        zeroing_without_mask.flags = InstructionFlags::ZEROING;
        assert_encode_error(encode(Bitness::Bit64, &zeroing_without_mask));
    }

    #[test]
    fn test_encode_reports_constant_offsets() {
        let mov = instr(
            Code::Mov_rm32_imm32,
            &[
                mem(Register::RIP, 0x2000, 4),
                Operand::Immediate(Immediate::Imm32(0x1234_5678)),
            ],
        );
        let mut encoder = Encoder::new(Bitness::Bit64);
        assert_eq!(encoder.encode(&mov, 0x1000).unwrap(), 10);
        let offsets = encoder.constant_offsets();
        assert_eq!((offsets.displacement_offset, offsets.displacement_size), (2, 4));
        assert_eq!((offsets.immediate_offset, offsets.immediate_size), (6, 4));
        assert!(!offsets.has_immediate2());

        let enter = instr(
            Code::Enterq_imm16_imm8,
            &[
                Operand::Immediate(Immediate::Imm16(0x20)),
                Operand::Immediate(Immediate::Imm8(1)),
            ],
        );
        encoder.encode(&enter, 0x1000).unwrap();
        let offsets = encoder.constant_offsets();
        assert!(!offsets.has_displacement());
        assert_eq!((offsets.immediate_offset2, offsets.immediate_size2), (3, 1));
    }

    #[test]
    fn test_encode_rejects_invalid_requests() {
        assert_encode_error(encode(Bitness::Bit64, &instr(Code::INVALID, &[])));
        assert_encode_error(encode(Bitness::Bit32, &instr(Code::Push_r64, &[reg(Register::RAX)])));
        assert_encode_error(encode(
            Bitness::Bit64,
            &instr(Code::Add_rm32_r32, &[reg(Register::RCX), reg(Register::EAX)]),
        ));
        assert_encode_error(encode(
            Bitness::Bit64,
            &instr(
                Code::Add_rm32_imm8,
                &[reg(Register::ECX), Operand::Immediate(Immediate::Imm32(0x80))],
            ),
        ));
    }

    #[test]
    fn test_failed_encode_leaves_buffer_untouched() {
        let mut encoder = Encoder::new(Bitness::Bit64);
        encoder
            .encode(&instr(Code::Push_r64, &[reg(Register::RAX)]), 0)
            .unwrap();
        let bad = instr(Code::Jmp_rel8_64, &[Operand::NearBranch(0x9000)]);
        assert!(encoder.encode(&bad, 0x1000).is_err());
        assert_eq!(encoder.buffer(), [0x50]);
    }
}
