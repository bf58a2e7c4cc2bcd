//! Translation of operands into ModRM, SIB, prefix and trailing fields.
//!
//! [`Fields::collect`] walks a code's [`OperandSpec`] list next to the instruction's operands,
//! checks that every operand fits its slot and records where its bits go. Nothing is written
//! here; the caller lays the fields out in byte order.

use crate::{
    encoder::fits_signed,
    instruction::{
        EncodingKind, Instruction, InstructionFlags, MemoryOperand, OpCodeInfo, Operand,
        OperandSpec, Register, RegisterKind,
    },
    Bitness, Result,
};

/// The ModRM displacement of a memory operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Displacement {
    None,
    Fixed { value: u64, size: u8 },
    /// `[rip + disp32]` / `[eip + disp32]`, relative to the end of the instruction
    IpRelative { target: u64, eip: bool },
}

/// A field that follows ModRM/SIB/displacement, in operand order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Trailing {
    Immediate { value: u64, size: u8 },
    /// `moffs` address of `MOV AL, [moffs]` and friends
    Moffs { value: u64, size: u8 },
    Branch { target: u64, size: u8, width: u32 },
    Far { selector: u16, offset: u32, size: u8 },
}

#[derive(Debug, Clone)]
pub(crate) struct Fields {
    pub has_modrm: bool,
    pub mod_: u8,
    pub reg: u8,
    pub rm: u8,
    pub sib: Option<u8>,
    pub displacement: Displacement,
    /// Bit 3 of ModRM.reg, SIB.index and ModRM.rm/SIB.base/opcode register
    pub rex_r: bool,
    pub rex_x: bool,
    pub rex_b: bool,
    /// EVEX.R': bit 4 of ModRM.reg
    pub evex_r2: bool,
    /// EVEX.X: bit 4 of a register ModRM.rm
    pub evex_x2: bool,
    /// Register number in VEX/EVEX/XOP `vvvv` (and EVEX.V')
    pub vvvv: u8,
    pub op_reg: u8,
    /// Address size in bits selected by the operands, 0 if none
    pub address_size: u32,
    /// `SPL`..`DIL` need an otherwise empty REX prefix
    pub needs_rex: bool,
    /// `AH`..`BH` cannot be combined with REX
    pub high_byte_reg: bool,
    /// `CR8` outside 64-bit mode, written as `LOCK` with `CR0`
    pub lock_cr8: bool,
    pub trailing: Vec<Trailing>,
}

impl Default for Fields {
    fn default() -> Self {
        Fields {
            has_modrm: false,
            mod_: 0,
            reg: 0,
            rm: 0,
            sib: None,
            displacement: Displacement::None,
            rex_r: false,
            rex_x: false,
            rex_b: false,
            evex_r2: false,
            evex_x2: false,
            vvvv: 0,
            op_reg: 0,
            address_size: 0,
            needs_rex: false,
            high_byte_reg: false,
            lock_cr8: false,
            trailing: Vec::new(),
        }
    }
}

struct Collector {
    bitness: Bitness,
    address: u64,
    encoding: EncodingKind,
    disp8_scale: i64,
    fields: Fields,
}

impl Fields {
    /// Checks `instr`'s operands against `info` and gathers their encoding fields.
    ///
    /// ## Arguments
    /// * 'bitness' - The processor mode being encoded for
    /// * 'instr'   - The instruction, `instr.ip` is used in error messages
    /// * 'info'    - The descriptor of `instr.code`
    ///
    /// # Errors
    /// Returns [`crate::Error::Encode`] if an operand does not fit its slot or cannot be
    /// expressed in `bitness`.
    pub(crate) fn collect(
        bitness: Bitness,
        instr: &Instruction,
        info: &OpCodeInfo,
    ) -> Result<Fields> {
        let disp8_scale = if info.encoding == EncodingKind::Evex {
            i64::from(info.disp8_scale(instr.flags.contains(InstructionFlags::BROADCAST)))
        } else {
            1
        };
        let mut collector = Collector {
            bitness,
            address: instr.ip,
            encoding: info.encoding,
            disp8_scale,
            fields: Fields::default(),
        };

        for (slot, form) in info.ops.iter().enumerate() {
            collector.operand(*form, &instr.operands[slot])?;
        }
        if let Some(extra) = instr.operands[info.ops.len().min(4)..]
            .iter()
            .find(|op| !op.is_none())
        {
            return Err(encode_error!(
                instr.ip,
                "{} takes {} operands, found extra {:?}",
                instr.code.name(),
                info.ops.len(),
                extra
            ));
        }

        let fields = &mut collector.fields;
        if info.group_index >= 0 {
            fields.has_modrm = true;
            fields.reg = info.group_index as u8;
        }
        if info.rm_group_index >= 0 {
            fields.has_modrm = true;
            fields.mod_ = 3;
            fields.rm = info.rm_group_index as u8;
        }
        if info.address_size != 0 {
            collector.set_address_size(u32::from(info.address_size))?;
        }
        if info.ops.contains(&OperandSpec::RegBnd) && collector.fields.address_size == 16 {
            return Err(encode_error!(
                instr.ip,
                "{} has no 16-bit addressing",
                instr.code.name()
            ));
        }
        Ok(collector.fields)
    }
}

impl Collector {
    fn mismatch(&self, form: OperandSpec, operand: &Operand) -> crate::Error {
        encode_error!(self.address, "operand {:?} does not fit {:?}", operand, form)
    }

    fn is_64(&self) -> bool {
        self.bitness == Bitness::Bit64
    }

    /// Register number, after checking that the mode and encoding can reach it.
    fn number(&mut self, reg: Register) -> Result<u8> {
        let n = reg.number();
        if n >= 8 && !self.is_64() {
            return Err(encode_error!(
                self.address,
                "{:?} is only available in 64-bit mode",
                reg
            ));
        }
        if n >= 16 && self.encoding != EncodingKind::Evex {
            return Err(encode_error!(self.address, "{:?} needs an EVEX encoding", reg));
        }
        if reg.requires_rex() {
            if !self.is_64() {
                return Err(encode_error!(
                    self.address,
                    "{:?} is only available in 64-bit mode",
                    reg
                ));
            }
            self.fields.needs_rex = true;
        }
        if reg.is_gpr8_high() {
            self.fields.high_byte_reg = true;
        }
        Ok(n)
    }

    fn register(
        &self,
        form: OperandSpec,
        operand: &Operand,
        kind: RegisterKind,
    ) -> Result<Register> {
        match operand {
            Operand::Register(reg) if reg.kind() == kind => Ok(*reg),
            other => Err(self.mismatch(form, other)),
        }
    }

    fn set_address_size(&mut self, bits: u32) -> Result<()> {
        match (self.bitness, bits) {
            (Bitness::Bit64, 16) => {
                return Err(encode_error!(
                    self.address,
                    "16-bit addressing is not available in 64-bit mode"
                ))
            }
            (Bitness::Bit16 | Bitness::Bit32, 64) => {
                return Err(encode_error!(
                    self.address,
                    "64-bit addressing requires 64-bit mode"
                ))
            }
            _ => {}
        }
        let current = self.fields.address_size;
        if current != 0 && current != bits {
            return Err(encode_error!(
                self.address,
                "operands disagree on the address size ({} and {} bits)",
                current,
                bits
            ));
        }
        self.fields.address_size = bits;
        Ok(())
    }

    fn reg_field(&mut self, reg: Register) -> Result<()> {
        let n = self.number(reg)?;
        let fields = &mut self.fields;
        fields.has_modrm = true;
        fields.reg = n & 7;
        fields.rex_r = n & 8 != 0;
        fields.evex_r2 = n & 16 != 0;
        Ok(())
    }

    fn rm_register(&mut self, reg: Register) -> Result<()> {
        let n = self.number(reg)?;
        let fields = &mut self.fields;
        fields.has_modrm = true;
        fields.mod_ = 3;
        fields.rm = n & 7;
        fields.rex_b = n & 8 != 0;
        fields.evex_x2 = n & 16 != 0;
        Ok(())
    }

    fn rm_or_memory(
        &mut self,
        form: OperandSpec,
        operand: &Operand,
        kind: RegisterKind,
    ) -> Result<()> {
        match operand {
            Operand::Memory(mem) => self.memory(mem),
            other => {
                let reg = self.register(form, other, kind)?;
                self.rm_register(reg)
            }
        }
    }

    fn rm_register_only(
        &mut self,
        form: OperandSpec,
        operand: &Operand,
        kind: RegisterKind,
    ) -> Result<()> {
        let reg = self.register(form, operand, kind)?;
        self.rm_register(reg)
    }

    fn reg(&mut self, form: OperandSpec, operand: &Operand, kind: RegisterKind) -> Result<()> {
        let reg = self.register(form, operand, kind)?;
        self.reg_field(reg)
    }

    fn op_register(
        &mut self,
        form: OperandSpec,
        operand: &Operand,
        kind: RegisterKind,
    ) -> Result<()> {
        let reg = self.register(form, operand, kind)?;
        let n = self.number(reg)?;
        self.fields.op_reg = n & 7;
        self.fields.rex_b = n & 8 != 0;
        Ok(())
    }

    fn vvvv(&mut self, form: OperandSpec, operand: &Operand, kind: RegisterKind) -> Result<()> {
        let reg = self.register(form, operand, kind)?;
        let n = self.number(reg)?;
        self.fields.vvvv = n;
        Ok(())
    }

    fn implicit(&self, form: OperandSpec, operand: &Operand, expected: Register) -> Result<()> {
        if *operand == Operand::Register(expected) {
            Ok(())
        } else {
            Err(self.mismatch(form, operand))
        }
    }

    fn immediate(&mut self, form: OperandSpec, operand: &Operand, size: u8) -> Result<()> {
        let Operand::Immediate(imm) = operand else {
            return Err(self.mismatch(form, operand));
        };
        let value = imm.value();
        let unsigned_fits = size == 8 || value >> (u32::from(size) * 8) == 0;
        if !unsigned_fits && !fits_signed(value as i64, size) {
            return Err(encode_error!(
                self.address,
                "immediate {:#x} does not fit in {} bytes",
                value,
                size
            ));
        }
        self.fields.trailing.push(Trailing::Immediate { value, size });
        Ok(())
    }

    /// An immediate of `size` bytes that the CPU sign-extends to `width` bits.
    fn immediate_sx(
        &mut self,
        form: OperandSpec,
        operand: &Operand,
        size: u8,
        width: u32,
    ) -> Result<()> {
        let Operand::Immediate(imm) = operand else {
            return Err(self.mismatch(form, operand));
        };
        let value = imm.value();
        let shift = 64 - width;
        let extended = ((value << shift) as i64) >> shift;
        if !fits_signed(extended, size) {
            return Err(encode_error!(
                self.address,
                "immediate {:#x} is not a sign-extended {}-byte value",
                value,
                size
            ));
        }
        self.fields.trailing.push(Trailing::Immediate {
            value: extended as u64,
            size,
        });
        Ok(())
    }

    fn branch(&mut self, form: OperandSpec, operand: &Operand, size: u8, width: u32) -> Result<()> {
        let Operand::NearBranch(target) = *operand else {
            return Err(self.mismatch(form, operand));
        };
        if width < 64 && target >> width != 0 {
            return Err(encode_error!(
                self.address,
                "branch target {:#x} does not fit in {} bits",
                target,
                width
            ));
        }
        self.fields.trailing.push(Trailing::Branch {
            target,
            size,
            width,
        });
        Ok(())
    }

    fn far_branch(&mut self, form: OperandSpec, operand: &Operand, size: u8) -> Result<()> {
        let Operand::FarBranch { selector, offset } = *operand else {
            return Err(self.mismatch(form, operand));
        };
        if size == 2 && offset > 0xFFFF {
            return Err(encode_error!(
                self.address,
                "far branch offset {:#x} does not fit in 16 bits",
                offset
            ));
        }
        self.fields.trailing.push(Trailing::Far {
            selector,
            offset,
            size,
        });
        Ok(())
    }

    /// `[rSI]`, `[rDI]` or `[rBX + AL]`; the base register's width is the address size.
    fn string(&mut self, form: OperandSpec, operand: &Operand, number: u8) -> Result<()> {
        let Operand::StringMemory { base } = *operand else {
            return Err(self.mismatch(form, operand));
        };
        let width_ok = matches!(
            base.kind(),
            RegisterKind::Gpr16 | RegisterKind::Gpr32 | RegisterKind::Gpr64
        );
        if !width_ok || base.number() != number {
            return Err(self.mismatch(form, operand));
        }
        self.set_address_size(base.size() as u32 * 8)
    }

    fn moffs(&mut self, form: OperandSpec, operand: &Operand) -> Result<()> {
        let Operand::Memory(mem) = operand else {
            return Err(self.mismatch(form, operand));
        };
        if mem.base != Register::None || mem.index != Register::None {
            return Err(encode_error!(
                self.address,
                "moffs operands take an absolute address"
            ));
        }
        let bits = match mem.displ_size {
            2 => 16,
            4 => 32,
            8 => 64,
            _ => self.bitness.bits(),
        };
        self.set_address_size(bits)?;
        if bits < 64 && mem.displacement >> bits != 0 {
            return Err(encode_error!(
                self.address,
                "moffs address {:#x} does not fit in {} bits",
                mem.displacement,
                bits
            ));
        }
        self.fields.trailing.push(Trailing::Moffs {
            value: mem.displacement,
            size: (bits / 8) as u8,
        });
        Ok(())
    }

    fn memory(&mut self, mem: &MemoryOperand) -> Result<()> {
        self.fields.has_modrm = true;
        if mem.is_ip_relative() {
            return self.ip_relative(mem);
        }
        let bits = self.memory_address_size(mem)?;
        self.set_address_size(bits)?;
        if bits == 16 {
            self.memory16(mem)
        } else {
            self.memory32_64(mem, bits)
        }
    }

    fn ip_relative(&mut self, mem: &MemoryOperand) -> Result<()> {
        if !self.is_64() {
            return Err(encode_error!(
                self.address,
                "RIP-relative addressing requires 64-bit mode"
            ));
        }
        if mem.index != Register::None {
            return Err(encode_error!(
                self.address,
                "RIP-relative operands cannot have an index"
            ));
        }
        let eip = mem.base == Register::EIP;
        self.set_address_size(if eip { 32 } else { 64 })?;
        let fields = &mut self.fields;
        fields.mod_ = 0;
        fields.rm = 5;
        fields.displacement = Displacement::IpRelative {
            target: mem.displacement,
            eip,
        };
        Ok(())
    }

    /// Address size implied by the registers, or chosen for an absolute address.
    fn memory_address_size(&self, mem: &MemoryOperand) -> Result<u32> {
        let width = |reg: Register| -> Result<Option<u32>> {
            match reg.kind() {
                RegisterKind::None => Ok(None),
                RegisterKind::Gpr16 | RegisterKind::Gpr32 | RegisterKind::Gpr64 => {
                    Ok(Some(reg.size() as u32 * 8))
                }
                _ => Err(encode_error!(
                    self.address,
                    "{:?} cannot address memory",
                    reg
                )),
            }
        };
        match (width(mem.base)?, width(mem.index)?) {
            (Some(base), Some(index)) if base != index => Err(encode_error!(
                self.address,
                "base {:?} and index {:?} differ in size",
                mem.base,
                mem.index
            )),
            (Some(bits), _) | (None, Some(bits)) => Ok(bits),
            (None, None) => self.absolute_address_size(mem),
        }
    }

    fn absolute_address_size(&self, mem: &MemoryOperand) -> Result<u32> {
        let value = mem.displacement;
        match (self.bitness, mem.displ_size) {
            (Bitness::Bit64, 2) => Err(encode_error!(
                self.address,
                "16-bit addressing is not available in 64-bit mode"
            )),
            (Bitness::Bit64, _) if fits_signed(value as i64, 4) => Ok(64),
            (Bitness::Bit64, _) if value >> 32 == 0 => Ok(32),
            (Bitness::Bit64, _) => Err(encode_error!(
                self.address,
                "absolute address {:#x} needs a moffs operand",
                value
            )),
            (_, 2) => Ok(16),
            (_, 4) => Ok(32),
            (Bitness::Bit16, _) if value > 0xFFFF => Ok(32),
            (bitness, _) => Ok(bitness.bits()),
        }
    }

    /// ModRM.mod and displacement for a base-relative operand.
    ///
    /// `hint` is the displacement size the operand was decoded with: 0 picks the shortest form,
    /// 1 prefers `disp8`, anything larger keeps the full width. `allow_none` is false when
    /// mod = 0 would mean something else for this base.
    fn displacement(&self, disp: i64, hint: u8, allow_none: bool, full: u8) -> (u8, Displacement) {
        if disp == 0 && hint == 0 && allow_none {
            return (0, Displacement::None);
        }
        if hint <= 1 && disp % self.disp8_scale == 0 && fits_signed(disp / self.disp8_scale, 1) {
            let value = (disp / self.disp8_scale) as u64;
            return (1, Displacement::Fixed { value, size: 1 });
        }
        (
            2,
            Displacement::Fixed {
                value: disp as u64,
                size: full,
            },
        )
    }

    fn memory16(&mut self, mem: &MemoryOperand) -> Result<()> {
        if mem.index != Register::None && mem.scale > 1 {
            return Err(encode_error!(
                self.address,
                "16-bit addressing has no index scale"
            ));
        }
        if mem.displacement > 0xFFFF && !fits_signed(mem.displacement as i64, 2) {
            return Err(encode_error!(
                self.address,
                "displacement {:#x} does not fit in 16 bits",
                mem.displacement
            ));
        }
        let disp = i64::from(mem.displacement as u16 as i16);
        let rm = match (mem.base, mem.index) {
            (Register::BX, Register::SI) => 0,
            (Register::BX, Register::DI) => 1,
            (Register::BP, Register::SI) => 2,
            (Register::BP, Register::DI) => 3,
            (Register::SI, Register::None) => 4,
            (Register::DI, Register::None) => 5,
            (Register::BP, Register::None) => 6,
            (Register::BX, Register::None) => 7,
            (Register::None, Register::None) => {
                let fields = &mut self.fields;
                fields.mod_ = 0;
                fields.rm = 6;
                fields.displacement = Displacement::Fixed {
                    value: disp as u64,
                    size: 2,
                };
                return Ok(());
            }
            (base, index) => {
                return Err(encode_error!(
                    self.address,
                    "[{:?} + {:?}] is not a 16-bit addressing form",
                    base,
                    index
                ))
            }
        };
        let (mod_, displacement) = self.displacement(disp, mem.displ_size, rm != 6, 2);
        let fields = &mut self.fields;
        fields.mod_ = mod_;
        fields.rm = rm;
        fields.displacement = displacement;
        Ok(())
    }

    fn memory32_64(&mut self, mem: &MemoryOperand, bits: u32) -> Result<()> {
        let disp = if bits == 64 {
            mem.displacement as i64
        } else {
            i64::from(mem.displacement as u32 as i32)
        };
        let in_range = if bits == 64 {
            fits_signed(disp, 4)
        } else {
            mem.displacement >> 32 == 0 || fits_signed(mem.displacement as i64, 4)
        };
        if !in_range {
            return Err(encode_error!(
                self.address,
                "displacement {:#x} does not fit in 32 bits",
                mem.displacement
            ));
        }

        let index = if mem.index == Register::None {
            None
        } else {
            let n = self.number(mem.index)?;
            if n == 4 {
                return Err(encode_error!(
                    self.address,
                    "{:?} cannot be used as an index",
                    mem.index
                ));
            }
            self.fields.rex_x = n & 8 != 0;
            let scale = match mem.scale {
                1 => 0,
                2 => 1,
                4 => 2,
                8 => 3,
                other => {
                    return Err(encode_error!(self.address, "invalid index scale {}", other))
                }
            };
            Some((n & 7, scale))
        };
        let sib = |base: u8| match index {
            Some((n, scale)) => (scale << 6) | (n << 3) | base,
            None => (4 << 3) | base,
        };

        if mem.base == Register::None {
            let fields = &mut self.fields;
            fields.mod_ = 0;
            if index.is_some() || self.bitness == Bitness::Bit64 {
                fields.rm = 4;
                fields.sib = Some(sib(5));
            } else {
                fields.rm = 5;
            }
            fields.displacement = Displacement::Fixed {
                value: disp as u64,
                size: 4,
            };
            return Ok(());
        }

        let base = self.number(mem.base)?;
        let (mod_, displacement) = self.displacement(disp, mem.displ_size, base & 7 != 5, 4);
        let fields = &mut self.fields;
        fields.rex_b = base & 8 != 0;
        if index.is_some() || base & 7 == 4 {
            fields.rm = 4;
            fields.sib = Some(sib(base & 7));
        } else {
            fields.rm = base & 7;
        }
        fields.mod_ = mod_;
        fields.displacement = displacement;
        Ok(())
    }

    fn operand(&mut self, form: OperandSpec, operand: &Operand) -> Result<()> {
        use OperandSpec as S;
        use RegisterKind as K;

        let xbegin_width = if self.is_64() { 64 } else { 32 };
        match form {
            S::Rm8 => self.rm_or_memory(form, operand, K::Gpr8),
            S::Rm16 => self.rm_or_memory(form, operand, K::Gpr16),
            S::Rm32 => self.rm_or_memory(form, operand, K::Gpr32),
            S::Rm64 => self.rm_or_memory(form, operand, K::Gpr64),
            S::RmReg16 => self.rm_register_only(form, operand, K::Gpr16),
            S::RmReg32 => self.rm_register_only(form, operand, K::Gpr32),
            S::RmReg64 => self.rm_register_only(form, operand, K::Gpr64),
            S::RmRegXmm => self.rm_register_only(form, operand, K::Xmm),
            S::RmSti => self.rm_register_only(form, operand, K::St),
            S::Mem => match operand {
                Operand::Memory(mem) => self.memory(mem),
                other => Err(self.mismatch(form, other)),
            },
            S::Mib => match operand {
                Operand::Memory(mem) if !matches!(mem.base, Register::RIP | Register::EIP) => {
                    self.memory(mem)
                }
                other => Err(self.mismatch(form, other)),
            },
            S::BndRm => self.rm_or_memory(form, operand, K::Bound),
            S::MmRm => self.rm_or_memory(form, operand, K::Mmx),
            S::XmmRm => self.rm_or_memory(form, operand, K::Xmm),
            S::YmmRm => self.rm_or_memory(form, operand, K::Ymm),
            S::ZmmRm => self.rm_or_memory(form, operand, K::Zmm),
            S::Reg8 => self.reg(form, operand, K::Gpr8),
            S::Reg16 => self.reg(form, operand, K::Gpr16),
            S::Reg32 => self.reg(form, operand, K::Gpr32),
            S::Reg64 => self.reg(form, operand, K::Gpr64),
            S::RegSeg => self.reg(form, operand, K::Segment),
            S::RegCr => {
                let reg = self.register(form, operand, K::Control)?;
                if !matches!(reg.number(), 0 | 2 | 3 | 4 | 8) {
                    return Err(encode_error!(self.address, "{:?} does not exist", reg));
                }
                if reg == Register::CR8 && !self.is_64() {
                    self.fields.lock_cr8 = true;
                    return self.reg_field(Register::CR0);
                }
                self.reg_field(reg)
            }
            S::RegDr => {
                let reg = self.register(form, operand, K::Debug)?;
                if reg.number() > 7 {
                    return Err(encode_error!(self.address, "{:?} does not exist", reg));
                }
                self.reg_field(reg)
            }
            S::RegBnd => self.reg(form, operand, K::Bound),
            S::RegMm => self.reg(form, operand, K::Mmx),
            S::RegXmm => self.reg(form, operand, K::Xmm),
            S::RegYmm => self.reg(form, operand, K::Ymm),
            S::RegZmm => self.reg(form, operand, K::Zmm),
            S::Op8 => self.op_register(form, operand, K::Gpr8),
            S::Op16 => self.op_register(form, operand, K::Gpr16),
            S::Op32 => self.op_register(form, operand, K::Gpr32),
            S::Op64 => self.op_register(form, operand, K::Gpr64),
            S::Vvvv32 => self.vvvv(form, operand, K::Gpr32),
            S::Vvvv64 => self.vvvv(form, operand, K::Gpr64),
            S::VvvvXmm => self.vvvv(form, operand, K::Xmm),
            S::VvvvYmm => self.vvvv(form, operand, K::Ymm),
            S::VvvvZmm => self.vvvv(form, operand, K::Zmm),
            S::Al => self.implicit(form, operand, Register::AL),
            S::Cl => self.implicit(form, operand, Register::CL),
            S::Ax => self.implicit(form, operand, Register::AX),
            S::Dx => self.implicit(form, operand, Register::DX),
            S::Eax => self.implicit(form, operand, Register::EAX),
            S::Rax => self.implicit(form, operand, Register::RAX),
            S::Es => self.implicit(form, operand, Register::ES),
            S::Cs => self.implicit(form, operand, Register::CS),
            S::Ss => self.implicit(form, operand, Register::SS),
            S::Ds => self.implicit(form, operand, Register::DS),
            S::Fs => self.implicit(form, operand, Register::FS),
            S::Gs => self.implicit(form, operand, Register::GS),
            S::St0 => self.implicit(form, operand, Register::ST0),
            S::Imm8 => self.immediate(form, operand, 1),
            S::Imm8Const1 => match operand.immediate() {
                Some(imm) if imm.value() == 1 => Ok(()),
                _ => Err(self.mismatch(form, operand)),
            },
            S::Imm8Sx16 => self.immediate_sx(form, operand, 1, 16),
            S::Imm8Sx32 => self.immediate_sx(form, operand, 1, 32),
            S::Imm8Sx64 => self.immediate_sx(form, operand, 1, 64),
            S::Imm16 => self.immediate(form, operand, 2),
            S::Imm32 => self.immediate(form, operand, 4),
            S::Imm32Sx64 => self.immediate_sx(form, operand, 4, 64),
            S::Imm64 => self.immediate(form, operand, 8),
            S::Br16_1 => self.branch(form, operand, 1, 16),
            S::Br32_1 => self.branch(form, operand, 1, 32),
            S::Br64_1 => self.branch(form, operand, 1, 64),
            S::Br16_2 => self.branch(form, operand, 2, 16),
            S::Br32_4 => self.branch(form, operand, 4, 32),
            S::Br64_4 => self.branch(form, operand, 4, 64),
            S::Xbegin2 => self.branch(form, operand, 2, xbegin_width),
            S::Xbegin4 => self.branch(form, operand, 4, xbegin_width),
            S::FarBr16 => self.far_branch(form, operand, 2),
            S::FarBr32 => self.far_branch(form, operand, 4),
            S::SegSi => self.string(form, operand, 6),
            S::EsDi => self.string(form, operand, 7),
            S::SegBxAl => self.string(form, operand, 3),
            S::MemOffs => self.moffs(form, operand),
        }
    }
}
