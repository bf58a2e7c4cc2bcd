//! ModRM/SIB memory operand decoding.

use crate::{
    decoder::Decoder,
    instruction::{MemoryOperand, Register},
    Result,
};

/// Base and index of the 16-bit ModRM.rm encodings.
const MEM16: [(Register, Register); 8] = [
    (Register::BX, Register::SI),
    (Register::BX, Register::DI),
    (Register::BP, Register::SI),
    (Register::BP, Register::DI),
    (Register::SI, Register::None),
    (Register::DI, Register::None),
    (Register::BP, Register::None),
    (Register::BX, Register::None),
];

impl Decoder<'_> {
    /// Reads the SIB byte and displacement of a ModRM memory operand (mod != 3).
    ///
    /// `disp8_scale` is the EVEX `N` of a compressed 8-bit displacement, 1 otherwise. RIP- and
    /// EIP-relative displacements are stored raw here and made absolute once the instruction
    /// length is known.
    pub(crate) fn read_memory(&mut self, disp8_scale: u32) -> Result<MemoryOperand> {
        match self.state.address_size {
            16 => self.read_memory16(),
            size => self.read_memory32_64(size, disp8_scale),
        }
    }

    fn read_memory16(&mut self) -> Result<MemoryOperand> {
        let (mod_, rm) = (self.state.mod_, self.state.rm);
        let (mut base, index) = MEM16[rm as usize];
        let (displacement, displ_size) = match mod_ {
            0 if rm == 6 => {
                base = Register::None;
                (u64::from(self.parser.read_le::<u16>()?), 2)
            }
            0 => (0, 0),
            1 => {
                let disp = self.parser.read_le::<i8>()?;
                (u64::from(disp as i16 as u16), 1)
            }
            _ => (u64::from(self.parser.read_le::<u16>()?), 2),
        };
        Ok(MemoryOperand {
            base,
            index,
            scale: 1,
            displacement,
            displ_size,
        })
    }

    fn read_memory32_64(&mut self, address_size: u32, disp8_scale: u32) -> Result<MemoryOperand> {
        let (mod_, rm) = (self.state.mod_, self.state.rm);
        let is_64 = address_size == 64;
        let gpr = |n: u8| {
            if is_64 {
                Register::gpr64(n)
            } else {
                Register::gpr32(n)
            }
        };

        let mut mem = MemoryOperand {
            scale: 1,
            ..MemoryOperand::default()
        };
        let mut no_base_disp32 = false;
        if rm == 4 {
            let sib = self.parser.read_le::<u8>()?;
            let index = ((sib >> 3) & 7) | self.state.extra_index;
            if index != 4 {
                mem.index = gpr(index);
                mem.scale = 1 << (sib >> 6);
            }
            let base = sib & 7;
            if base == 5 && mod_ == 0 {
                no_base_disp32 = true;
            } else {
                mem.base = gpr(base | self.state.extra_base);
            }
        } else if rm == 5 && mod_ == 0 {
            no_base_disp32 = true;
            if self.is_64() {
                mem.base = if is_64 { Register::RIP } else { Register::EIP };
            }
        } else {
            mem.base = gpr(rm | self.state.extra_base);
        }

        let disp: i64 = if no_base_disp32 || mod_ == 2 {
            mem.displ_size = 4;
            i64::from(self.parser.read_le::<i32>()?)
        } else if mod_ == 1 {
            mem.displ_size = 1;
            i64::from(self.parser.read_le::<i8>()?) * i64::from(disp8_scale)
        } else {
            0
        };

        mem.displacement = if is_64 {
            disp as u64
        } else {
            u64::from(disp as u32)
        };
        Ok(mem)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Bitness, Decoder, DecoderOptions, Operand, Register};

    fn memory_of(bitness: Bitness, bytes: &[u8]) -> crate::MemoryOperand {
        let mut decoder = Decoder::new(bitness, bytes, 0x1000, DecoderOptions::NONE);
        let instr = decoder.decode().unwrap();
        assert!(!instr.is_invalid(), "{bytes:02x?}");
        match instr.operands[1] {
            Operand::Memory(mem) => mem,
            other => panic!("expected memory, got {other:?}"),
        }
    }

    #[test]
    fn test_sib_with_scaled_index() {
        // mov eax, [rbx + rcx*4 + 0x10]
        let mem = memory_of(Bitness::Bit64, &[0x8B, 0x44, 0x8B, 0x10]);
        assert_eq!(mem.base, Register::RBX);
        assert_eq!(mem.index, Register::RCX);
        assert_eq!(mem.scale, 4);
        assert_eq!(mem.displacement, 0x10);
        assert_eq!(mem.displ_size, 1);
    }

    #[test]
    fn test_sib_without_base() {
        // mov eax, [rsi*2 + 0x12345678]
        let mem = memory_of(Bitness::Bit64, &[0x8B, 0x04, 0x75, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(mem.base, Register::None);
        assert_eq!(mem.index, Register::RSI);
        assert_eq!(mem.scale, 2);
        assert_eq!(mem.displacement, 0x1234_5678);
    }

    #[test]
    fn test_sib_without_index_uses_rex_x() {
        // mov eax, [rsp] ; mov eax, [rsp + r12*1] with REX.X
        let mem = memory_of(Bitness::Bit64, &[0x8B, 0x04, 0x24]);
        assert_eq!(mem.base, Register::RSP);
        assert_eq!(mem.index, Register::None);
        let mem = memory_of(Bitness::Bit64, &[0x42, 0x8B, 0x04, 0x24]);
        assert_eq!(mem.index, Register::R12);
    }

    #[test]
    fn test_negative_displacement_extension() {
        // mov eax, [rbp - 8]
        let mem = memory_of(Bitness::Bit64, &[0x8B, 0x45, 0xF8]);
        assert_eq!(mem.displacement, (-8i64) as u64);
        // mov eax, [ebp - 8] in 32-bit mode
        let mem = memory_of(Bitness::Bit32, &[0x8B, 0x45, 0xF8]);
        assert_eq!(mem.displacement, 0xFFFF_FFF8);
    }

    #[test]
    fn test_rip_and_eip_relative() {
        // mov eax, [rip + 0x10], 6 bytes long at 0x1000
        let mem = memory_of(Bitness::Bit64, &[0x8B, 0x05, 0x10, 0x00, 0x00, 0x00]);
        assert_eq!(mem.base, Register::RIP);
        assert_eq!(mem.displacement, 0x1016);

        let mem = memory_of(Bitness::Bit64, &[0x67, 0x8B, 0x05, 0xF0, 0xFF, 0xFF, 0xFF]);
        assert_eq!(mem.base, Register::EIP);
        assert_eq!(mem.displacement, 0x0FF7);
    }

    #[test]
    fn test_absolute_disp32_outside_long_mode() {
        let mem = memory_of(Bitness::Bit32, &[0x8B, 0x05, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(mem.base, Register::None);
        assert_eq!(mem.displacement, 0x1234_5678);
        assert_eq!(mem.displ_size, 4);
    }

    #[test]
    fn test_sixteen_bit_forms() {
        // mov ax, [bp + di - 2]
        let mem = memory_of(Bitness::Bit16, &[0x8B, 0x43, 0xFE]);
        assert_eq!(mem.base, Register::BP);
        assert_eq!(mem.index, Register::DI);
        assert_eq!(mem.displacement, 0xFFFE);

        // mov ax, [0x1234]
        let mem = memory_of(Bitness::Bit16, &[0x8B, 0x06, 0x34, 0x12]);
        assert_eq!(mem.base, Register::None);
        assert_eq!(mem.displacement, 0x1234);
        assert_eq!(mem.displ_size, 2);
    }
}
