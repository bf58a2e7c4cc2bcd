//! Operand materialization from [`OperandSpec`] lists.
//!
//! Handlers only choose a [`Code`]; this module reads whatever that code's operands need, in
//! operand order, which for every supported encoding is also byte order (ModRM memory, then
//! immediates, then branch displacements).

use crate::{
    decoder::{state::StateFlags, Decoder},
    instruction::{
        Code, EncodingKind, Immediate, Instruction, MemoryOperand, Operand, OperandSpec,
        Register,
    },
    Result,
};

impl Decoder<'_> {
    /// Sets `instr.code` and reads all of its operands.
    ///
    /// A code that does not exist in the current mode, or an operand combination the ModRM
    /// byte cannot express, invalidates the instruction.
    pub(crate) fn read_operands(&mut self, instr: &mut Instruction, code: Code) -> Result<()> {
        let info = code.op_code();
        if code == Code::INVALID || !info.is_valid_in(self.bitness.bits()) {
            self.state.invalidate();
            return Ok(());
        }

        instr.code = code;
        let disp8_scale = if self.state.encoding == EncodingKind::Evex {
            info.disp8_scale(self.state.flags.contains(StateFlags::B))
        } else {
            1
        };
        for (slot, form) in info.ops.iter().enumerate() {
            let operand = self.read_operand(*form, disp8_scale)?;
            if slot == 0
                && *form == OperandSpec::RegSeg
                && operand == Operand::Register(Register::CS)
            {
                self.state.invalidate();
            }
            instr.operands[slot] = operand;
        }
        // MPX has no 16-bit addressing
        if info.ops.contains(&OperandSpec::RegBnd)
            && self.state.address_size == 16
            && !self.state.is_reg_form()
        {
            self.state.invalidate();
        }
        Ok(())
    }

    fn rm_register(&mut self, make: fn(u8) -> Register) -> Operand {
        Operand::Register(make(self.state.rm | self.state.extra_base))
    }

    fn rm_or_memory(&mut self, make: fn(u8) -> Register, disp8_scale: u32) -> Result<Operand> {
        if self.state.is_reg_form() {
            Ok(self.rm_register(make))
        } else {
            Ok(Operand::Memory(self.read_memory(disp8_scale)?))
        }
    }

    fn vector_rm(&mut self, make: fn(u8) -> Register, disp8_scale: u32) -> Result<Operand> {
        if self.state.is_reg_form() {
            let n = self.state.rm | self.state.extra_base | self.state.extra_base_evex;
            Ok(Operand::Register(make(n)))
        } else {
            Ok(Operand::Memory(self.read_memory(disp8_scale)?))
        }
    }

    fn reg_only(&mut self, make: fn(u8) -> Register) -> Operand {
        if !self.state.is_reg_form() {
            self.state.invalidate();
        }
        self.rm_register(make)
    }

    fn string_base(&self, n: u8) -> Register {
        match self.state.address_size {
            16 => Register::gpr16(n),
            32 => Register::gpr32(n),
            _ => Register::gpr64(n),
        }
    }

    fn branch_target(&self, disp: i64, mask: u64) -> u64 {
        let next_ip = self.ip.wrapping_add(self.parser.instruction_len() as u64);
        next_ip.wrapping_add(disp as u64) & mask
    }

    fn read_operand(&mut self, form: OperandSpec, disp8_scale: u32) -> Result<Operand> {
        use OperandSpec as S;

        let has_rex = self.state.flags.contains(StateFlags::HAS_REX);
        let reg = self.state.reg | self.state.extra_reg;
        let op_reg = self.state.op_reg | self.state.extra_base;
        let operand = match form {
            S::Rm8 => {
                if self.state.is_reg_form() {
                    let rm = self.state.rm | self.state.extra_base;
                    Operand::Register(Register::gpr8(rm, has_rex))
                } else {
                    Operand::Memory(self.read_memory(disp8_scale)?)
                }
            }
            S::Rm16 => self.rm_or_memory(Register::gpr16, disp8_scale)?,
            S::Rm32 => self.rm_or_memory(Register::gpr32, disp8_scale)?,
            S::Rm64 => self.rm_or_memory(Register::gpr64, disp8_scale)?,
            S::RmReg16 => self.reg_only(Register::gpr16),
            S::RmReg32 => self.reg_only(Register::gpr32),
            S::RmReg64 => self.reg_only(Register::gpr64),
            S::RmRegXmm => {
                if !self.state.is_reg_form() {
                    self.state.invalidate();
                }
                let n = self.state.rm | self.state.extra_base | self.state.extra_base_evex;
                Operand::Register(Register::xmm(n))
            }
            S::Mem => {
                if self.state.is_reg_form() {
                    self.state.invalidate();
                    Operand::None
                } else {
                    Operand::Memory(self.read_memory(disp8_scale)?)
                }
            }
            S::Mib => {
                if self.state.is_reg_form() {
                    self.state.invalidate();
                    Operand::None
                } else {
                    let mem = self.read_memory(disp8_scale)?;
                    if matches!(mem.base, Register::RIP | Register::EIP) {
                        self.state.invalidate();
                    }
                    Operand::Memory(mem)
                }
            }
            S::BndRm => {
                if self.state.is_reg_form() {
                    let rm = self.state.rm | self.state.extra_base;
                    if rm > 3 {
                        self.state.invalidate();
                    }
                    Operand::Register(Register::bnd(rm))
                } else {
                    Operand::Memory(self.read_memory(disp8_scale)?)
                }
            }
            S::RmSti => Operand::Register(Register::st(self.state.rm)),
            S::MmRm => {
                if self.state.is_reg_form() {
                    Operand::Register(Register::mm(self.state.rm))
                } else {
                    Operand::Memory(self.read_memory(disp8_scale)?)
                }
            }
            S::XmmRm => self.vector_rm(Register::xmm, disp8_scale)?,
            S::YmmRm => self.vector_rm(Register::ymm, disp8_scale)?,
            S::ZmmRm => self.vector_rm(Register::zmm, disp8_scale)?,
            S::Reg8 => Operand::Register(Register::gpr8(reg, has_rex)),
            S::Reg16 => Operand::Register(Register::gpr16(reg)),
            S::Reg32 => Operand::Register(Register::gpr32(reg)),
            S::Reg64 => Operand::Register(Register::gpr64(reg)),
            S::RegSeg => match Register::segment(self.state.reg) {
                Some(seg) => Operand::Register(seg),
                None => {
                    self.state.invalidate();
                    Operand::None
                }
            },
            S::RegCr => {
                if !matches!(reg, 0 | 2 | 3 | 4 | 8) {
                    self.state.invalidate();
                }
                Operand::Register(Register::cr(reg))
            }
            S::RegDr => {
                if reg > 7 {
                    self.state.invalidate();
                }
                Operand::Register(Register::dr(reg))
            }
            S::RegBnd => {
                if reg > 3 {
                    self.state.invalidate();
                }
                Operand::Register(Register::bnd(reg))
            }
            S::RegMm => Operand::Register(Register::mm(self.state.reg)),
            S::RegXmm => Operand::Register(Register::xmm(reg | self.state.extra_reg_evex)),
            S::RegYmm => Operand::Register(Register::ymm(reg | self.state.extra_reg_evex)),
            S::RegZmm => Operand::Register(Register::zmm(reg | self.state.extra_reg_evex)),
            S::Op8 => Operand::Register(Register::gpr8(op_reg, has_rex)),
            S::Op16 => Operand::Register(Register::gpr16(op_reg)),
            S::Op32 => Operand::Register(Register::gpr32(op_reg)),
            S::Op64 => Operand::Register(Register::gpr64(op_reg)),
            S::Vvvv32 => Operand::Register(Register::gpr32(self.state.vvvv)),
            S::Vvvv64 => Operand::Register(Register::gpr64(self.state.vvvv)),
            S::VvvvXmm => Operand::Register(Register::xmm(self.state.vvvv)),
            S::VvvvYmm => Operand::Register(Register::ymm(self.state.vvvv)),
            S::VvvvZmm => Operand::Register(Register::zmm(self.state.vvvv)),
            S::Al => Operand::Register(Register::AL),
            S::Cl => Operand::Register(Register::CL),
            S::Ax => Operand::Register(Register::AX),
            S::Dx => Operand::Register(Register::DX),
            S::Eax => Operand::Register(Register::EAX),
            S::Rax => Operand::Register(Register::RAX),
            S::Es => Operand::Register(Register::ES),
            S::Cs => Operand::Register(Register::CS),
            S::Ss => Operand::Register(Register::SS),
            S::Ds => Operand::Register(Register::DS),
            S::Fs => Operand::Register(Register::FS),
            S::Gs => Operand::Register(Register::GS),
            S::St0 => Operand::Register(Register::ST0),
            S::Imm8 => Operand::Immediate(Immediate::Imm8(self.parser.read_le::<u8>()?)),
            S::Imm8Const1 => Operand::Immediate(Immediate::Imm8(1)),
            S::Imm8Sx16 => Operand::Immediate(Immediate::Imm8to16(i16::from(
                self.parser.read_le::<i8>()?,
            ))),
            S::Imm8Sx32 => Operand::Immediate(Immediate::Imm8to32(i32::from(
                self.parser.read_le::<i8>()?,
            ))),
            S::Imm8Sx64 => Operand::Immediate(Immediate::Imm8to64(i64::from(
                self.parser.read_le::<i8>()?,
            ))),
            S::Imm16 => Operand::Immediate(Immediate::Imm16(self.parser.read_le::<u16>()?)),
            S::Imm32 => Operand::Immediate(Immediate::Imm32(self.parser.read_le::<u32>()?)),
            S::Imm32Sx64 => Operand::Immediate(Immediate::Imm32to64(i64::from(
                self.parser.read_le::<i32>()?,
            ))),
            S::Imm64 => Operand::Immediate(Immediate::Imm64(self.parser.read_le::<u64>()?)),
            S::Br16_1 => {
                let disp = i64::from(self.parser.read_le::<i8>()?);
                Operand::NearBranch(self.branch_target(disp, 0xFFFF))
            }
            S::Br32_1 => {
                let disp = i64::from(self.parser.read_le::<i8>()?);
                Operand::NearBranch(self.branch_target(disp, 0xFFFF_FFFF))
            }
            S::Br64_1 => {
                let disp = i64::from(self.parser.read_le::<i8>()?);
                Operand::NearBranch(self.branch_target(disp, u64::MAX))
            }
            S::Br16_2 => {
                let disp = i64::from(self.parser.read_le::<i16>()?);
                Operand::NearBranch(self.branch_target(disp, 0xFFFF))
            }
            S::Br32_4 => {
                let disp = i64::from(self.parser.read_le::<i32>()?);
                Operand::NearBranch(self.branch_target(disp, 0xFFFF_FFFF))
            }
            S::Br64_4 => {
                let disp = i64::from(self.parser.read_le::<i32>()?);
                Operand::NearBranch(self.branch_target(disp, u64::MAX))
            }
            S::Xbegin2 | S::Xbegin4 => {
                let disp = if form == S::Xbegin2 {
                    i64::from(self.parser.read_le::<i16>()?)
                } else {
                    i64::from(self.parser.read_le::<i32>()?)
                };
                let mask = if self.is_64() { u64::MAX } else { 0xFFFF_FFFF };
                Operand::NearBranch(self.branch_target(disp, mask))
            }
            S::FarBr16 => {
                let offset = u32::from(self.parser.read_le::<u16>()?);
                let selector = self.parser.read_le::<u16>()?;
                Operand::FarBranch { selector, offset }
            }
            S::FarBr32 => {
                let offset = self.parser.read_le::<u32>()?;
                let selector = self.parser.read_le::<u16>()?;
                Operand::FarBranch { selector, offset }
            }
            S::SegSi => Operand::StringMemory {
                base: self.string_base(6),
            },
            S::EsDi => Operand::StringMemory {
                base: self.string_base(7),
            },
            S::SegBxAl => Operand::StringMemory {
                base: self.string_base(3),
            },
            S::MemOffs => {
                let (displacement, displ_size) = match self.state.address_size {
                    16 => (u64::from(self.parser.read_le::<u16>()?), 2),
                    32 => (u64::from(self.parser.read_le::<u32>()?), 4),
                    _ => (self.parser.read_le::<u64>()?, 8),
                };
                Operand::Memory(MemoryOperand::with_base_displ(
                    Register::None,
                    displacement,
                    displ_size,
                ))
            }
        };
        Ok(operand)
    }
}
