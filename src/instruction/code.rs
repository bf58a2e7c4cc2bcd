//! The [`Code`] enum and its encoding descriptors.
//!
//! `Code` names one mnemonic together with its operand kinds and widths, for example
//! [`Code::Add_rm32_r32`] or [`Code::Jmp_rel8_64`]. The enum and the static
//! [`OpCodeInfo`] table are produced by one macro invocation, so every variant has exactly
//! one descriptor at the same index.

use strum::{EnumCount, EnumIter, IntoStaticStr};

use crate::instruction::opcode::{
    OpCodeInfo,
    OpCodeTable::{self, T0F, T0F38, T0F3A, Xop9, XopA},
    OperandSpec::{self, *},
};

const fn lg(op_code: u8, ops: &'static [OperandSpec]) -> OpCodeInfo {
    OpCodeInfo::legacy(OpCodeTable::Normal, op_code, ops)
}

const fn l0f(op_code: u8, ops: &'static [OperandSpec]) -> OpCodeInfo {
    OpCodeInfo::legacy(T0F, op_code, ops)
}

const fn l38(op_code: u8, ops: &'static [OperandSpec]) -> OpCodeInfo {
    OpCodeInfo::legacy(T0F38, op_code, ops)
}

const fn l3a(op_code: u8, ops: &'static [OperandSpec]) -> OpCodeInfo {
    OpCodeInfo::legacy(T0F3A, op_code, ops)
}

const fn vx(table: OpCodeTable, op_code: u8, ops: &'static [OperandSpec]) -> OpCodeInfo {
    OpCodeInfo::vex(table, op_code, ops)
}

const fn ev(table: OpCodeTable, op_code: u8, ops: &'static [OperandSpec]) -> OpCodeInfo {
    OpCodeInfo::evex(table, op_code, ops)
}

const fn xp(table: OpCodeTable, op_code: u8, ops: &'static [OperandSpec]) -> OpCodeInfo {
    OpCodeInfo::xop(table, op_code, ops)
}

macro_rules! codes {
    ($($name:ident => $info:expr,)*) => {
        /// Mnemonic plus operand kinds of an instruction.
        ///
        /// Legacy codes are named after the mnemonic and their operands (`Mov_r64_imm64`).
        /// Branches carry the displacement width and the target width (`Jne_rel8_32`). VEX,
        /// EVEX and XOP encoded codes are prefixed with their encoding (`VEX_Vmovups_xmm_xmmm128`).
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, EnumCount, EnumIter,
            IntoStaticStr,
        )]
        #[allow(non_camel_case_types)]
        #[repr(u16)]
        pub enum Code {
            /// An invalid or unsupported instruction
            #[default]
            INVALID,
            $(
                #[doc = concat!("`", stringify!($name), "`")]
                $name,
            )*
        }

        static OP_CODE_INFOS: [OpCodeInfo; Code::COUNT] = [OpCodeInfo::INVALID, $($info,)*];
    };
}

codes! {
    Add_rm8_r8 => lg(0x00, &[Rm8, Reg8]).lock(),
    Add_rm16_r16 => lg(0x01, &[Rm16, Reg16]).o16().lock(),
    Add_rm32_r32 => lg(0x01, &[Rm32, Reg32]).o32().lock(),
    Add_rm64_r64 => lg(0x01, &[Rm64, Reg64]).o64().lock(),
    Add_r8_rm8 => lg(0x02, &[Reg8, Rm8]),
    Add_r16_rm16 => lg(0x03, &[Reg16, Rm16]).o16(),
    Add_r32_rm32 => lg(0x03, &[Reg32, Rm32]).o32(),
    Add_r64_rm64 => lg(0x03, &[Reg64, Rm64]).o64(),
    Add_AL_imm8 => lg(0x04, &[Al, Imm8]),
    Add_AX_imm16 => lg(0x05, &[Ax, Imm16]).o16(),
    Add_EAX_imm32 => lg(0x05, &[Eax, Imm32]).o32(),
    Add_RAX_imm32 => lg(0x05, &[Rax, Imm32Sx64]).o64(),
    Or_rm8_r8 => lg(0x08, &[Rm8, Reg8]).lock(),
    Or_rm16_r16 => lg(0x09, &[Rm16, Reg16]).o16().lock(),
    Or_rm32_r32 => lg(0x09, &[Rm32, Reg32]).o32().lock(),
    Or_rm64_r64 => lg(0x09, &[Rm64, Reg64]).o64().lock(),
    Or_r8_rm8 => lg(0x0A, &[Reg8, Rm8]),
    Or_r16_rm16 => lg(0x0B, &[Reg16, Rm16]).o16(),
    Or_r32_rm32 => lg(0x0B, &[Reg32, Rm32]).o32(),
    Or_r64_rm64 => lg(0x0B, &[Reg64, Rm64]).o64(),
    Or_AL_imm8 => lg(0x0C, &[Al, Imm8]),
    Or_AX_imm16 => lg(0x0D, &[Ax, Imm16]).o16(),
    Or_EAX_imm32 => lg(0x0D, &[Eax, Imm32]).o32(),
    Or_RAX_imm32 => lg(0x0D, &[Rax, Imm32Sx64]).o64(),
    Adc_rm8_r8 => lg(0x10, &[Rm8, Reg8]).lock(),
    Adc_rm16_r16 => lg(0x11, &[Rm16, Reg16]).o16().lock(),
    Adc_rm32_r32 => lg(0x11, &[Rm32, Reg32]).o32().lock(),
    Adc_rm64_r64 => lg(0x11, &[Rm64, Reg64]).o64().lock(),
    Adc_r8_rm8 => lg(0x12, &[Reg8, Rm8]),
    Adc_r16_rm16 => lg(0x13, &[Reg16, Rm16]).o16(),
    Adc_r32_rm32 => lg(0x13, &[Reg32, Rm32]).o32(),
    Adc_r64_rm64 => lg(0x13, &[Reg64, Rm64]).o64(),
    Adc_AL_imm8 => lg(0x14, &[Al, Imm8]),
    Adc_AX_imm16 => lg(0x15, &[Ax, Imm16]).o16(),
    Adc_EAX_imm32 => lg(0x15, &[Eax, Imm32]).o32(),
    Adc_RAX_imm32 => lg(0x15, &[Rax, Imm32Sx64]).o64(),
    Sbb_rm8_r8 => lg(0x18, &[Rm8, Reg8]).lock(),
    Sbb_rm16_r16 => lg(0x19, &[Rm16, Reg16]).o16().lock(),
    Sbb_rm32_r32 => lg(0x19, &[Rm32, Reg32]).o32().lock(),
    Sbb_rm64_r64 => lg(0x19, &[Rm64, Reg64]).o64().lock(),
    Sbb_r8_rm8 => lg(0x1A, &[Reg8, Rm8]),
    Sbb_r16_rm16 => lg(0x1B, &[Reg16, Rm16]).o16(),
    Sbb_r32_rm32 => lg(0x1B, &[Reg32, Rm32]).o32(),
    Sbb_r64_rm64 => lg(0x1B, &[Reg64, Rm64]).o64(),
    Sbb_AL_imm8 => lg(0x1C, &[Al, Imm8]),
    Sbb_AX_imm16 => lg(0x1D, &[Ax, Imm16]).o16(),
    Sbb_EAX_imm32 => lg(0x1D, &[Eax, Imm32]).o32(),
    Sbb_RAX_imm32 => lg(0x1D, &[Rax, Imm32Sx64]).o64(),
    And_rm8_r8 => lg(0x20, &[Rm8, Reg8]).lock(),
    And_rm16_r16 => lg(0x21, &[Rm16, Reg16]).o16().lock(),
    And_rm32_r32 => lg(0x21, &[Rm32, Reg32]).o32().lock(),
    And_rm64_r64 => lg(0x21, &[Rm64, Reg64]).o64().lock(),
    And_r8_rm8 => lg(0x22, &[Reg8, Rm8]),
    And_r16_rm16 => lg(0x23, &[Reg16, Rm16]).o16(),
    And_r32_rm32 => lg(0x23, &[Reg32, Rm32]).o32(),
    And_r64_rm64 => lg(0x23, &[Reg64, Rm64]).o64(),
    And_AL_imm8 => lg(0x24, &[Al, Imm8]),
    And_AX_imm16 => lg(0x25, &[Ax, Imm16]).o16(),
    And_EAX_imm32 => lg(0x25, &[Eax, Imm32]).o32(),
    And_RAX_imm32 => lg(0x25, &[Rax, Imm32Sx64]).o64(),
    Sub_rm8_r8 => lg(0x28, &[Rm8, Reg8]).lock(),
    Sub_rm16_r16 => lg(0x29, &[Rm16, Reg16]).o16().lock(),
    Sub_rm32_r32 => lg(0x29, &[Rm32, Reg32]).o32().lock(),
    Sub_rm64_r64 => lg(0x29, &[Rm64, Reg64]).o64().lock(),
    Sub_r8_rm8 => lg(0x2A, &[Reg8, Rm8]),
    Sub_r16_rm16 => lg(0x2B, &[Reg16, Rm16]).o16(),
    Sub_r32_rm32 => lg(0x2B, &[Reg32, Rm32]).o32(),
    Sub_r64_rm64 => lg(0x2B, &[Reg64, Rm64]).o64(),
    Sub_AL_imm8 => lg(0x2C, &[Al, Imm8]),
    Sub_AX_imm16 => lg(0x2D, &[Ax, Imm16]).o16(),
    Sub_EAX_imm32 => lg(0x2D, &[Eax, Imm32]).o32(),
    Sub_RAX_imm32 => lg(0x2D, &[Rax, Imm32Sx64]).o64(),
    Xor_rm8_r8 => lg(0x30, &[Rm8, Reg8]).lock(),
    Xor_rm16_r16 => lg(0x31, &[Rm16, Reg16]).o16().lock(),
    Xor_rm32_r32 => lg(0x31, &[Rm32, Reg32]).o32().lock(),
    Xor_rm64_r64 => lg(0x31, &[Rm64, Reg64]).o64().lock(),
    Xor_r8_rm8 => lg(0x32, &[Reg8, Rm8]),
    Xor_r16_rm16 => lg(0x33, &[Reg16, Rm16]).o16(),
    Xor_r32_rm32 => lg(0x33, &[Reg32, Rm32]).o32(),
    Xor_r64_rm64 => lg(0x33, &[Reg64, Rm64]).o64(),
    Xor_AL_imm8 => lg(0x34, &[Al, Imm8]),
    Xor_AX_imm16 => lg(0x35, &[Ax, Imm16]).o16(),
    Xor_EAX_imm32 => lg(0x35, &[Eax, Imm32]).o32(),
    Xor_RAX_imm32 => lg(0x35, &[Rax, Imm32Sx64]).o64(),
    Cmp_rm8_r8 => lg(0x38, &[Rm8, Reg8]),
    Cmp_rm16_r16 => lg(0x39, &[Rm16, Reg16]).o16(),
    Cmp_rm32_r32 => lg(0x39, &[Rm32, Reg32]).o32(),
    Cmp_rm64_r64 => lg(0x39, &[Rm64, Reg64]).o64(),
    Cmp_r8_rm8 => lg(0x3A, &[Reg8, Rm8]),
    Cmp_r16_rm16 => lg(0x3B, &[Reg16, Rm16]).o16(),
    Cmp_r32_rm32 => lg(0x3B, &[Reg32, Rm32]).o32(),
    Cmp_r64_rm64 => lg(0x3B, &[Reg64, Rm64]).o64(),
    Cmp_AL_imm8 => lg(0x3C, &[Al, Imm8]),
    Cmp_AX_imm16 => lg(0x3D, &[Ax, Imm16]).o16(),
    Cmp_EAX_imm32 => lg(0x3D, &[Eax, Imm32]).o32(),
    Cmp_RAX_imm32 => lg(0x3D, &[Rax, Imm32Sx64]).o64(),
    Pushw_ES => lg(0x06, &[Es]).o16().no64(),
    Pushd_ES => lg(0x06, &[Es]).o32().no64(),
    Popw_ES => lg(0x07, &[Es]).o16().no64(),
    Popd_ES => lg(0x07, &[Es]).o32().no64(),
    Pushw_CS => lg(0x0E, &[Cs]).o16().no64(),
    Pushd_CS => lg(0x0E, &[Cs]).o32().no64(),
    Pushw_SS => lg(0x16, &[Ss]).o16().no64(),
    Pushd_SS => lg(0x16, &[Ss]).o32().no64(),
    Popw_SS => lg(0x17, &[Ss]).o16().no64(),
    Popd_SS => lg(0x17, &[Ss]).o32().no64(),
    Pushw_DS => lg(0x1E, &[Ds]).o16().no64(),
    Pushd_DS => lg(0x1E, &[Ds]).o32().no64(),
    Popw_DS => lg(0x1F, &[Ds]).o16().no64(),
    Popd_DS => lg(0x1F, &[Ds]).o32().no64(),
    Daa => lg(0x27, &[]).no64(),
    Das => lg(0x2F, &[]).no64(),
    Aaa => lg(0x37, &[]).no64(),
    Aas => lg(0x3F, &[]).no64(),
    Inc_r16 => lg(0x40, &[Op16]).o16().no64(),
    Inc_r32 => lg(0x40, &[Op32]).o32().no64(),
    Dec_r16 => lg(0x48, &[Op16]).o16().no64(),
    Dec_r32 => lg(0x48, &[Op32]).o32().no64(),
    Push_r16 => lg(0x50, &[Op16]).o16(),
    Push_r32 => lg(0x50, &[Op32]).o32().no64(),
    Push_r64 => lg(0x50, &[Op64]).d64(),
    Pop_r16 => lg(0x58, &[Op16]).o16(),
    Pop_r32 => lg(0x58, &[Op32]).o32().no64(),
    Pop_r64 => lg(0x58, &[Op64]).d64(),
    Pushaw => lg(0x60, &[]).o16().no64(),
    Pushad => lg(0x60, &[]).o32().no64(),
    Popaw => lg(0x61, &[]).o16().no64(),
    Popad => lg(0x61, &[]).o32().no64(),
    Bound_r16_m1616 => lg(0x62, &[Reg16, Mem]).o16().no64(),
    Bound_r32_m3232 => lg(0x62, &[Reg32, Mem]).o32().no64(),
    Arpl_rm16_r16 => lg(0x63, &[Rm16, Reg16]).no64(),
    Movsxd_r16_rm16 => lg(0x63, &[Reg16, Rm16]).o16().only64(),
    Movsxd_r32_rm32 => lg(0x63, &[Reg32, Rm32]).o32().only64(),
    Movsxd_r64_rm32 => lg(0x63, &[Reg64, Rm32]).o64(),
    Push_imm16 => lg(0x68, &[Imm16]).o16(),
    Pushd_imm32 => lg(0x68, &[Imm32]).o32().no64(),
    Pushq_imm32 => lg(0x68, &[Imm32Sx64]).d64(),
    Imul_r16_rm16_imm16 => lg(0x69, &[Reg16, Rm16, Imm16]).o16(),
    Imul_r32_rm32_imm32 => lg(0x69, &[Reg32, Rm32, Imm32]).o32(),
    Imul_r64_rm64_imm32 => lg(0x69, &[Reg64, Rm64, Imm32Sx64]).o64(),
    Pushw_imm8 => lg(0x6A, &[Imm8Sx16]).o16(),
    Pushd_imm8 => lg(0x6A, &[Imm8Sx32]).o32().no64(),
    Pushq_imm8 => lg(0x6A, &[Imm8Sx64]).d64(),
    Imul_r16_rm16_imm8 => lg(0x6B, &[Reg16, Rm16, Imm8Sx16]).o16(),
    Imul_r32_rm32_imm8 => lg(0x6B, &[Reg32, Rm32, Imm8Sx32]).o32(),
    Imul_r64_rm64_imm8 => lg(0x6B, &[Reg64, Rm64, Imm8Sx64]).o64(),
    Insb_m8_DX => lg(0x6C, &[EsDi, Dx]),
    Insw_m16_DX => lg(0x6D, &[EsDi, Dx]).o16(),
    Insd_m32_DX => lg(0x6D, &[EsDi, Dx]).o32(),
    Outsb_DX_m8 => lg(0x6E, &[Dx, SegSi]),
    Outsw_DX_m16 => lg(0x6F, &[Dx, SegSi]).o16(),
    Outsd_DX_m32 => lg(0x6F, &[Dx, SegSi]).o32(),
    Jo_rel8_16 => lg(0x70, &[Br16_1]).o16(),
    Jo_rel8_32 => lg(0x70, &[Br32_1]).o32().no64(),
    Jo_rel8_64 => lg(0x70, &[Br64_1]).d64(),
    Jno_rel8_16 => lg(0x71, &[Br16_1]).o16(),
    Jno_rel8_32 => lg(0x71, &[Br32_1]).o32().no64(),
    Jno_rel8_64 => lg(0x71, &[Br64_1]).d64(),
    Jb_rel8_16 => lg(0x72, &[Br16_1]).o16(),
    Jb_rel8_32 => lg(0x72, &[Br32_1]).o32().no64(),
    Jb_rel8_64 => lg(0x72, &[Br64_1]).d64(),
    Jae_rel8_16 => lg(0x73, &[Br16_1]).o16(),
    Jae_rel8_32 => lg(0x73, &[Br32_1]).o32().no64(),
    Jae_rel8_64 => lg(0x73, &[Br64_1]).d64(),
    Je_rel8_16 => lg(0x74, &[Br16_1]).o16(),
    Je_rel8_32 => lg(0x74, &[Br32_1]).o32().no64(),
    Je_rel8_64 => lg(0x74, &[Br64_1]).d64(),
    Jne_rel8_16 => lg(0x75, &[Br16_1]).o16(),
    Jne_rel8_32 => lg(0x75, &[Br32_1]).o32().no64(),
    Jne_rel8_64 => lg(0x75, &[Br64_1]).d64(),
    Jbe_rel8_16 => lg(0x76, &[Br16_1]).o16(),
    Jbe_rel8_32 => lg(0x76, &[Br32_1]).o32().no64(),
    Jbe_rel8_64 => lg(0x76, &[Br64_1]).d64(),
    Ja_rel8_16 => lg(0x77, &[Br16_1]).o16(),
    Ja_rel8_32 => lg(0x77, &[Br32_1]).o32().no64(),
    Ja_rel8_64 => lg(0x77, &[Br64_1]).d64(),
    Js_rel8_16 => lg(0x78, &[Br16_1]).o16(),
    Js_rel8_32 => lg(0x78, &[Br32_1]).o32().no64(),
    Js_rel8_64 => lg(0x78, &[Br64_1]).d64(),
    Jns_rel8_16 => lg(0x79, &[Br16_1]).o16(),
    Jns_rel8_32 => lg(0x79, &[Br32_1]).o32().no64(),
    Jns_rel8_64 => lg(0x79, &[Br64_1]).d64(),
    Jp_rel8_16 => lg(0x7A, &[Br16_1]).o16(),
    Jp_rel8_32 => lg(0x7A, &[Br32_1]).o32().no64(),
    Jp_rel8_64 => lg(0x7A, &[Br64_1]).d64(),
    Jnp_rel8_16 => lg(0x7B, &[Br16_1]).o16(),
    Jnp_rel8_32 => lg(0x7B, &[Br32_1]).o32().no64(),
    Jnp_rel8_64 => lg(0x7B, &[Br64_1]).d64(),
    Jl_rel8_16 => lg(0x7C, &[Br16_1]).o16(),
    Jl_rel8_32 => lg(0x7C, &[Br32_1]).o32().no64(),
    Jl_rel8_64 => lg(0x7C, &[Br64_1]).d64(),
    Jge_rel8_16 => lg(0x7D, &[Br16_1]).o16(),
    Jge_rel8_32 => lg(0x7D, &[Br32_1]).o32().no64(),
    Jge_rel8_64 => lg(0x7D, &[Br64_1]).d64(),
    Jle_rel8_16 => lg(0x7E, &[Br16_1]).o16(),
    Jle_rel8_32 => lg(0x7E, &[Br32_1]).o32().no64(),
    Jle_rel8_64 => lg(0x7E, &[Br64_1]).d64(),
    Jg_rel8_16 => lg(0x7F, &[Br16_1]).o16(),
    Jg_rel8_32 => lg(0x7F, &[Br32_1]).o32().no64(),
    Jg_rel8_64 => lg(0x7F, &[Br64_1]).d64(),
    Add_rm8_imm8 => lg(0x80, &[Rm8, Imm8]).g(0).lock(),
    Add_rm16_imm16 => lg(0x81, &[Rm16, Imm16]).g(0).o16().lock(),
    Add_rm32_imm32 => lg(0x81, &[Rm32, Imm32]).g(0).o32().lock(),
    Add_rm64_imm32 => lg(0x81, &[Rm64, Imm32Sx64]).g(0).o64().lock(),
    Add_rm8_imm8_82 => lg(0x82, &[Rm8, Imm8]).g(0).no64().lock(),
    Add_rm16_imm8 => lg(0x83, &[Rm16, Imm8Sx16]).g(0).o16().lock(),
    Add_rm32_imm8 => lg(0x83, &[Rm32, Imm8Sx32]).g(0).o32().lock(),
    Add_rm64_imm8 => lg(0x83, &[Rm64, Imm8Sx64]).g(0).o64().lock(),
    Or_rm8_imm8 => lg(0x80, &[Rm8, Imm8]).g(1).lock(),
    Or_rm16_imm16 => lg(0x81, &[Rm16, Imm16]).g(1).o16().lock(),
    Or_rm32_imm32 => lg(0x81, &[Rm32, Imm32]).g(1).o32().lock(),
    Or_rm64_imm32 => lg(0x81, &[Rm64, Imm32Sx64]).g(1).o64().lock(),
    Or_rm8_imm8_82 => lg(0x82, &[Rm8, Imm8]).g(1).no64().lock(),
    Or_rm16_imm8 => lg(0x83, &[Rm16, Imm8Sx16]).g(1).o16().lock(),
    Or_rm32_imm8 => lg(0x83, &[Rm32, Imm8Sx32]).g(1).o32().lock(),
    Or_rm64_imm8 => lg(0x83, &[Rm64, Imm8Sx64]).g(1).o64().lock(),
    Adc_rm8_imm8 => lg(0x80, &[Rm8, Imm8]).g(2).lock(),
    Adc_rm16_imm16 => lg(0x81, &[Rm16, Imm16]).g(2).o16().lock(),
    Adc_rm32_imm32 => lg(0x81, &[Rm32, Imm32]).g(2).o32().lock(),
    Adc_rm64_imm32 => lg(0x81, &[Rm64, Imm32Sx64]).g(2).o64().lock(),
    Adc_rm8_imm8_82 => lg(0x82, &[Rm8, Imm8]).g(2).no64().lock(),
    Adc_rm16_imm8 => lg(0x83, &[Rm16, Imm8Sx16]).g(2).o16().lock(),
    Adc_rm32_imm8 => lg(0x83, &[Rm32, Imm8Sx32]).g(2).o32().lock(),
    Adc_rm64_imm8 => lg(0x83, &[Rm64, Imm8Sx64]).g(2).o64().lock(),
    Sbb_rm8_imm8 => lg(0x80, &[Rm8, Imm8]).g(3).lock(),
    Sbb_rm16_imm16 => lg(0x81, &[Rm16, Imm16]).g(3).o16().lock(),
    Sbb_rm32_imm32 => lg(0x81, &[Rm32, Imm32]).g(3).o32().lock(),
    Sbb_rm64_imm32 => lg(0x81, &[Rm64, Imm32Sx64]).g(3).o64().lock(),
    Sbb_rm8_imm8_82 => lg(0x82, &[Rm8, Imm8]).g(3).no64().lock(),
    Sbb_rm16_imm8 => lg(0x83, &[Rm16, Imm8Sx16]).g(3).o16().lock(),
    Sbb_rm32_imm8 => lg(0x83, &[Rm32, Imm8Sx32]).g(3).o32().lock(),
    Sbb_rm64_imm8 => lg(0x83, &[Rm64, Imm8Sx64]).g(3).o64().lock(),
    And_rm8_imm8 => lg(0x80, &[Rm8, Imm8]).g(4).lock(),
    And_rm16_imm16 => lg(0x81, &[Rm16, Imm16]).g(4).o16().lock(),
    And_rm32_imm32 => lg(0x81, &[Rm32, Imm32]).g(4).o32().lock(),
    And_rm64_imm32 => lg(0x81, &[Rm64, Imm32Sx64]).g(4).o64().lock(),
    And_rm8_imm8_82 => lg(0x82, &[Rm8, Imm8]).g(4).no64().lock(),
    And_rm16_imm8 => lg(0x83, &[Rm16, Imm8Sx16]).g(4).o16().lock(),
    And_rm32_imm8 => lg(0x83, &[Rm32, Imm8Sx32]).g(4).o32().lock(),
    And_rm64_imm8 => lg(0x83, &[Rm64, Imm8Sx64]).g(4).o64().lock(),
    Sub_rm8_imm8 => lg(0x80, &[Rm8, Imm8]).g(5).lock(),
    Sub_rm16_imm16 => lg(0x81, &[Rm16, Imm16]).g(5).o16().lock(),
    Sub_rm32_imm32 => lg(0x81, &[Rm32, Imm32]).g(5).o32().lock(),
    Sub_rm64_imm32 => lg(0x81, &[Rm64, Imm32Sx64]).g(5).o64().lock(),
    Sub_rm8_imm8_82 => lg(0x82, &[Rm8, Imm8]).g(5).no64().lock(),
    Sub_rm16_imm8 => lg(0x83, &[Rm16, Imm8Sx16]).g(5).o16().lock(),
    Sub_rm32_imm8 => lg(0x83, &[Rm32, Imm8Sx32]).g(5).o32().lock(),
    Sub_rm64_imm8 => lg(0x83, &[Rm64, Imm8Sx64]).g(5).o64().lock(),
    Xor_rm8_imm8 => lg(0x80, &[Rm8, Imm8]).g(6).lock(),
    Xor_rm16_imm16 => lg(0x81, &[Rm16, Imm16]).g(6).o16().lock(),
    Xor_rm32_imm32 => lg(0x81, &[Rm32, Imm32]).g(6).o32().lock(),
    Xor_rm64_imm32 => lg(0x81, &[Rm64, Imm32Sx64]).g(6).o64().lock(),
    Xor_rm8_imm8_82 => lg(0x82, &[Rm8, Imm8]).g(6).no64().lock(),
    Xor_rm16_imm8 => lg(0x83, &[Rm16, Imm8Sx16]).g(6).o16().lock(),
    Xor_rm32_imm8 => lg(0x83, &[Rm32, Imm8Sx32]).g(6).o32().lock(),
    Xor_rm64_imm8 => lg(0x83, &[Rm64, Imm8Sx64]).g(6).o64().lock(),
    Cmp_rm8_imm8 => lg(0x80, &[Rm8, Imm8]).g(7),
    Cmp_rm16_imm16 => lg(0x81, &[Rm16, Imm16]).g(7).o16(),
    Cmp_rm32_imm32 => lg(0x81, &[Rm32, Imm32]).g(7).o32(),
    Cmp_rm64_imm32 => lg(0x81, &[Rm64, Imm32Sx64]).g(7).o64(),
    Cmp_rm8_imm8_82 => lg(0x82, &[Rm8, Imm8]).g(7).no64(),
    Cmp_rm16_imm8 => lg(0x83, &[Rm16, Imm8Sx16]).g(7).o16(),
    Cmp_rm32_imm8 => lg(0x83, &[Rm32, Imm8Sx32]).g(7).o32(),
    Cmp_rm64_imm8 => lg(0x83, &[Rm64, Imm8Sx64]).g(7).o64(),
    Test_rm8_r8 => lg(0x84, &[Rm8, Reg8]),
    Test_rm16_r16 => lg(0x85, &[Rm16, Reg16]).o16(),
    Test_rm32_r32 => lg(0x85, &[Rm32, Reg32]).o32(),
    Test_rm64_r64 => lg(0x85, &[Rm64, Reg64]).o64(),
    Xchg_rm8_r8 => lg(0x86, &[Rm8, Reg8]).lock(),
    Xchg_rm16_r16 => lg(0x87, &[Rm16, Reg16]).o16().lock(),
    Xchg_rm32_r32 => lg(0x87, &[Rm32, Reg32]).o32().lock(),
    Xchg_rm64_r64 => lg(0x87, &[Rm64, Reg64]).o64().lock(),
    Mov_rm8_r8 => lg(0x88, &[Rm8, Reg8]),
    Mov_rm16_r16 => lg(0x89, &[Rm16, Reg16]).o16(),
    Mov_rm32_r32 => lg(0x89, &[Rm32, Reg32]).o32(),
    Mov_rm64_r64 => lg(0x89, &[Rm64, Reg64]).o64(),
    Mov_r8_rm8 => lg(0x8A, &[Reg8, Rm8]),
    Mov_r16_rm16 => lg(0x8B, &[Reg16, Rm16]).o16(),
    Mov_r32_rm32 => lg(0x8B, &[Reg32, Rm32]).o32(),
    Mov_r64_rm64 => lg(0x8B, &[Reg64, Rm64]).o64(),
    Mov_rm16_Sreg => lg(0x8C, &[Rm16, RegSeg]).o16(),
    Mov_r32m16_Sreg => lg(0x8C, &[Rm32, RegSeg]).o32(),
    Mov_r64m16_Sreg => lg(0x8C, &[Rm64, RegSeg]).o64(),
    Lea_r16_m => lg(0x8D, &[Reg16, Mem]).o16(),
    Lea_r32_m => lg(0x8D, &[Reg32, Mem]).o32(),
    Lea_r64_m => lg(0x8D, &[Reg64, Mem]).o64(),
    Mov_Sreg_rm16 => lg(0x8E, &[RegSeg, Rm16]).o16(),
    Mov_Sreg_r32m16 => lg(0x8E, &[RegSeg, Rm32]).o32(),
    Mov_Sreg_r64m16 => lg(0x8E, &[RegSeg, Rm64]).o64(),
    Pop_rm16 => lg(0x8F, &[Rm16]).g(0).o16(),
    Pop_rm32 => lg(0x8F, &[Rm32]).g(0).o32().no64(),
    Pop_rm64 => lg(0x8F, &[Rm64]).g(0).d64(),
    Nopw => lg(0x90, &[]).o16(),
    Nopd => lg(0x90, &[]).o32(),
    Nopq => lg(0x90, &[]).o64(),
    Pause => lg(0x90, &[]).pf3(),
    Xchg_r16_AX => lg(0x90, &[Op16, Ax]).o16(),
    Xchg_r32_EAX => lg(0x90, &[Op32, Eax]).o32(),
    Xchg_r64_RAX => lg(0x90, &[Op64, Rax]).o64(),
    Cbw => lg(0x98, &[]).o16(),
    Cwde => lg(0x98, &[]).o32(),
    Cdqe => lg(0x98, &[]).o64(),
    Cwd => lg(0x99, &[]).o16(),
    Cdq => lg(0x99, &[]).o32(),
    Cqo => lg(0x99, &[]).o64(),
    Call_ptr1616 => lg(0x9A, &[FarBr16]).o16().no64(),
    Call_ptr1632 => lg(0x9A, &[FarBr32]).o32().no64(),
    Wait => lg(0x9B, &[]),
    Pushfw => lg(0x9C, &[]).o16(),
    Pushfd => lg(0x9C, &[]).o32().no64(),
    Pushfq => lg(0x9C, &[]).d64(),
    Popfw => lg(0x9D, &[]).o16(),
    Popfd => lg(0x9D, &[]).o32().no64(),
    Popfq => lg(0x9D, &[]).d64(),
    Sahf => lg(0x9E, &[]),
    Lahf => lg(0x9F, &[]),
    Mov_AL_moffs8 => lg(0xA0, &[Al, MemOffs]),
    Mov_AX_moffs16 => lg(0xA1, &[Ax, MemOffs]).o16(),
    Mov_EAX_moffs32 => lg(0xA1, &[Eax, MemOffs]).o32(),
    Mov_RAX_moffs64 => lg(0xA1, &[Rax, MemOffs]).o64(),
    Mov_moffs8_AL => lg(0xA2, &[MemOffs, Al]),
    Mov_moffs16_AX => lg(0xA3, &[MemOffs, Ax]).o16(),
    Mov_moffs32_EAX => lg(0xA3, &[MemOffs, Eax]).o32(),
    Mov_moffs64_RAX => lg(0xA3, &[MemOffs, Rax]).o64(),
    Movsb_m8_m8 => lg(0xA4, &[EsDi, SegSi]),
    Movsw_m16_m16 => lg(0xA5, &[EsDi, SegSi]).o16(),
    Movsd_m32_m32 => lg(0xA5, &[EsDi, SegSi]).o32(),
    Movsq_m64_m64 => lg(0xA5, &[EsDi, SegSi]).o64(),
    Cmpsb_m8_m8 => lg(0xA6, &[SegSi, EsDi]),
    Cmpsw_m16_m16 => lg(0xA7, &[SegSi, EsDi]).o16(),
    Cmpsd_m32_m32 => lg(0xA7, &[SegSi, EsDi]).o32(),
    Cmpsq_m64_m64 => lg(0xA7, &[SegSi, EsDi]).o64(),
    Test_AL_imm8 => lg(0xA8, &[Al, Imm8]),
    Test_AX_imm16 => lg(0xA9, &[Ax, Imm16]).o16(),
    Test_EAX_imm32 => lg(0xA9, &[Eax, Imm32]).o32(),
    Test_RAX_imm32 => lg(0xA9, &[Rax, Imm32Sx64]).o64(),
    Stosb_m8_AL => lg(0xAA, &[EsDi, Al]),
    Stosw_m16_AX => lg(0xAB, &[EsDi, Ax]).o16(),
    Stosd_m32_EAX => lg(0xAB, &[EsDi, Eax]).o32(),
    Stosq_m64_RAX => lg(0xAB, &[EsDi, Rax]).o64(),
    Lodsb_AL_m8 => lg(0xAC, &[Al, SegSi]),
    Lodsw_AX_m16 => lg(0xAD, &[Ax, SegSi]).o16(),
    Lodsd_EAX_m32 => lg(0xAD, &[Eax, SegSi]).o32(),
    Lodsq_RAX_m64 => lg(0xAD, &[Rax, SegSi]).o64(),
    Scasb_AL_m8 => lg(0xAE, &[Al, EsDi]),
    Scasw_AX_m16 => lg(0xAF, &[Ax, EsDi]).o16(),
    Scasd_EAX_m32 => lg(0xAF, &[Eax, EsDi]).o32(),
    Scasq_RAX_m64 => lg(0xAF, &[Rax, EsDi]).o64(),
    Mov_r8_imm8 => lg(0xB0, &[Op8, Imm8]),
    Mov_r16_imm16 => lg(0xB8, &[Op16, Imm16]).o16(),
    Mov_r32_imm32 => lg(0xB8, &[Op32, Imm32]).o32(),
    Mov_r64_imm64 => lg(0xB8, &[Op64, Imm64]).o64(),
    Rol_rm8_imm8 => lg(0xC0, &[Rm8, Imm8]).g(0),
    Rol_rm16_imm8 => lg(0xC1, &[Rm16, Imm8]).g(0).o16(),
    Rol_rm32_imm8 => lg(0xC1, &[Rm32, Imm8]).g(0).o32(),
    Rol_rm64_imm8 => lg(0xC1, &[Rm64, Imm8]).g(0).o64(),
    Ror_rm8_imm8 => lg(0xC0, &[Rm8, Imm8]).g(1),
    Ror_rm16_imm8 => lg(0xC1, &[Rm16, Imm8]).g(1).o16(),
    Ror_rm32_imm8 => lg(0xC1, &[Rm32, Imm8]).g(1).o32(),
    Ror_rm64_imm8 => lg(0xC1, &[Rm64, Imm8]).g(1).o64(),
    Rcl_rm8_imm8 => lg(0xC0, &[Rm8, Imm8]).g(2),
    Rcl_rm16_imm8 => lg(0xC1, &[Rm16, Imm8]).g(2).o16(),
    Rcl_rm32_imm8 => lg(0xC1, &[Rm32, Imm8]).g(2).o32(),
    Rcl_rm64_imm8 => lg(0xC1, &[Rm64, Imm8]).g(2).o64(),
    Rcr_rm8_imm8 => lg(0xC0, &[Rm8, Imm8]).g(3),
    Rcr_rm16_imm8 => lg(0xC1, &[Rm16, Imm8]).g(3).o16(),
    Rcr_rm32_imm8 => lg(0xC1, &[Rm32, Imm8]).g(3).o32(),
    Rcr_rm64_imm8 => lg(0xC1, &[Rm64, Imm8]).g(3).o64(),
    Shl_rm8_imm8 => lg(0xC0, &[Rm8, Imm8]).g(4),
    Shl_rm16_imm8 => lg(0xC1, &[Rm16, Imm8]).g(4).o16(),
    Shl_rm32_imm8 => lg(0xC1, &[Rm32, Imm8]).g(4).o32(),
    Shl_rm64_imm8 => lg(0xC1, &[Rm64, Imm8]).g(4).o64(),
    Shr_rm8_imm8 => lg(0xC0, &[Rm8, Imm8]).g(5),
    Shr_rm16_imm8 => lg(0xC1, &[Rm16, Imm8]).g(5).o16(),
    Shr_rm32_imm8 => lg(0xC1, &[Rm32, Imm8]).g(5).o32(),
    Shr_rm64_imm8 => lg(0xC1, &[Rm64, Imm8]).g(5).o64(),
    Sal_rm8_imm8 => lg(0xC0, &[Rm8, Imm8]).g(6),
    Sal_rm16_imm8 => lg(0xC1, &[Rm16, Imm8]).g(6).o16(),
    Sal_rm32_imm8 => lg(0xC1, &[Rm32, Imm8]).g(6).o32(),
    Sal_rm64_imm8 => lg(0xC1, &[Rm64, Imm8]).g(6).o64(),
    Sar_rm8_imm8 => lg(0xC0, &[Rm8, Imm8]).g(7),
    Sar_rm16_imm8 => lg(0xC1, &[Rm16, Imm8]).g(7).o16(),
    Sar_rm32_imm8 => lg(0xC1, &[Rm32, Imm8]).g(7).o32(),
    Sar_rm64_imm8 => lg(0xC1, &[Rm64, Imm8]).g(7).o64(),
    Retnw_imm16 => lg(0xC2, &[Imm16]).o16(),
    Retnd_imm16 => lg(0xC2, &[Imm16]).o32().no64(),
    Retnq_imm16 => lg(0xC2, &[Imm16]).d64(),
    Retnw => lg(0xC3, &[]).o16(),
    Retnd => lg(0xC3, &[]).o32().no64(),
    Retnq => lg(0xC3, &[]).d64(),
    Les_r16_m1616 => lg(0xC4, &[Reg16, Mem]).o16().no64(),
    Les_r32_m1632 => lg(0xC4, &[Reg32, Mem]).o32().no64(),
    Lds_r16_m1616 => lg(0xC5, &[Reg16, Mem]).o16().no64(),
    Lds_r32_m1632 => lg(0xC5, &[Reg32, Mem]).o32().no64(),
    Mov_rm8_imm8 => lg(0xC6, &[Rm8, Imm8]).g(0),
    Xabort_imm8 => lg(0xC6, &[Imm8]).g(7).rmg(0),
    Mov_rm16_imm16 => lg(0xC7, &[Rm16, Imm16]).g(0).o16(),
    Mov_rm32_imm32 => lg(0xC7, &[Rm32, Imm32]).g(0).o32(),
    Mov_rm64_imm32 => lg(0xC7, &[Rm64, Imm32Sx64]).g(0).o64(),
    Xbegin_rel16 => lg(0xC7, &[Xbegin2]).g(7).rmg(0).o16(),
    Xbegin_rel32 => lg(0xC7, &[Xbegin4]).g(7).rmg(0).o32(),
    Enterw_imm16_imm8 => lg(0xC8, &[Imm16, Imm8]).o16(),
    Enterd_imm16_imm8 => lg(0xC8, &[Imm16, Imm8]).o32().no64(),
    Enterq_imm16_imm8 => lg(0xC8, &[Imm16, Imm8]).d64(),
    Leavew => lg(0xC9, &[]).o16(),
    Leaved => lg(0xC9, &[]).o32().no64(),
    Leaveq => lg(0xC9, &[]).d64(),
    Retfw_imm16 => lg(0xCA, &[Imm16]).o16(),
    Retfd_imm16 => lg(0xCA, &[Imm16]).o32(),
    Retfq_imm16 => lg(0xCA, &[Imm16]).o64(),
    Retfw => lg(0xCB, &[]).o16(),
    Retfd => lg(0xCB, &[]).o32(),
    Retfq => lg(0xCB, &[]).o64(),
    Int3 => lg(0xCC, &[]),
    Int_imm8 => lg(0xCD, &[Imm8]),
    Into => lg(0xCE, &[]).no64(),
    Iretw => lg(0xCF, &[]).o16(),
    Iretd => lg(0xCF, &[]).o32(),
    Iretq => lg(0xCF, &[]).o64(),
    Rol_rm8_1 => lg(0xD0, &[Rm8, Imm8Const1]).g(0),
    Rol_rm16_1 => lg(0xD1, &[Rm16, Imm8Const1]).g(0).o16(),
    Rol_rm32_1 => lg(0xD1, &[Rm32, Imm8Const1]).g(0).o32(),
    Rol_rm64_1 => lg(0xD1, &[Rm64, Imm8Const1]).g(0).o64(),
    Rol_rm8_CL => lg(0xD2, &[Rm8, Cl]).g(0),
    Rol_rm16_CL => lg(0xD3, &[Rm16, Cl]).g(0).o16(),
    Rol_rm32_CL => lg(0xD3, &[Rm32, Cl]).g(0).o32(),
    Rol_rm64_CL => lg(0xD3, &[Rm64, Cl]).g(0).o64(),
    Ror_rm8_1 => lg(0xD0, &[Rm8, Imm8Const1]).g(1),
    Ror_rm16_1 => lg(0xD1, &[Rm16, Imm8Const1]).g(1).o16(),
    Ror_rm32_1 => lg(0xD1, &[Rm32, Imm8Const1]).g(1).o32(),
    Ror_rm64_1 => lg(0xD1, &[Rm64, Imm8Const1]).g(1).o64(),
    Ror_rm8_CL => lg(0xD2, &[Rm8, Cl]).g(1),
    Ror_rm16_CL => lg(0xD3, &[Rm16, Cl]).g(1).o16(),
    Ror_rm32_CL => lg(0xD3, &[Rm32, Cl]).g(1).o32(),
    Ror_rm64_CL => lg(0xD3, &[Rm64, Cl]).g(1).o64(),
    Rcl_rm8_1 => lg(0xD0, &[Rm8, Imm8Const1]).g(2),
    Rcl_rm16_1 => lg(0xD1, &[Rm16, Imm8Const1]).g(2).o16(),
    Rcl_rm32_1 => lg(0xD1, &[Rm32, Imm8Const1]).g(2).o32(),
    Rcl_rm64_1 => lg(0xD1, &[Rm64, Imm8Const1]).g(2).o64(),
    Rcl_rm8_CL => lg(0xD2, &[Rm8, Cl]).g(2),
    Rcl_rm16_CL => lg(0xD3, &[Rm16, Cl]).g(2).o16(),
    Rcl_rm32_CL => lg(0xD3, &[Rm32, Cl]).g(2).o32(),
    Rcl_rm64_CL => lg(0xD3, &[Rm64, Cl]).g(2).o64(),
    Rcr_rm8_1 => lg(0xD0, &[Rm8, Imm8Const1]).g(3),
    Rcr_rm16_1 => lg(0xD1, &[Rm16, Imm8Const1]).g(3).o16(),
    Rcr_rm32_1 => lg(0xD1, &[Rm32, Imm8Const1]).g(3).o32(),
    Rcr_rm64_1 => lg(0xD1, &[Rm64, Imm8Const1]).g(3).o64(),
    Rcr_rm8_CL => lg(0xD2, &[Rm8, Cl]).g(3),
    Rcr_rm16_CL => lg(0xD3, &[Rm16, Cl]).g(3).o16(),
    Rcr_rm32_CL => lg(0xD3, &[Rm32, Cl]).g(3).o32(),
    Rcr_rm64_CL => lg(0xD3, &[Rm64, Cl]).g(3).o64(),
    Shl_rm8_1 => lg(0xD0, &[Rm8, Imm8Const1]).g(4),
    Shl_rm16_1 => lg(0xD1, &[Rm16, Imm8Const1]).g(4).o16(),
    Shl_rm32_1 => lg(0xD1, &[Rm32, Imm8Const1]).g(4).o32(),
    Shl_rm64_1 => lg(0xD1, &[Rm64, Imm8Const1]).g(4).o64(),
    Shl_rm8_CL => lg(0xD2, &[Rm8, Cl]).g(4),
    Shl_rm16_CL => lg(0xD3, &[Rm16, Cl]).g(4).o16(),
    Shl_rm32_CL => lg(0xD3, &[Rm32, Cl]).g(4).o32(),
    Shl_rm64_CL => lg(0xD3, &[Rm64, Cl]).g(4).o64(),
    Shr_rm8_1 => lg(0xD0, &[Rm8, Imm8Const1]).g(5),
    Shr_rm16_1 => lg(0xD1, &[Rm16, Imm8Const1]).g(5).o16(),
    Shr_rm32_1 => lg(0xD1, &[Rm32, Imm8Const1]).g(5).o32(),
    Shr_rm64_1 => lg(0xD1, &[Rm64, Imm8Const1]).g(5).o64(),
    Shr_rm8_CL => lg(0xD2, &[Rm8, Cl]).g(5),
    Shr_rm16_CL => lg(0xD3, &[Rm16, Cl]).g(5).o16(),
    Shr_rm32_CL => lg(0xD3, &[Rm32, Cl]).g(5).o32(),
    Shr_rm64_CL => lg(0xD3, &[Rm64, Cl]).g(5).o64(),
    Sal_rm8_1 => lg(0xD0, &[Rm8, Imm8Const1]).g(6),
    Sal_rm16_1 => lg(0xD1, &[Rm16, Imm8Const1]).g(6).o16(),
    Sal_rm32_1 => lg(0xD1, &[Rm32, Imm8Const1]).g(6).o32(),
    Sal_rm64_1 => lg(0xD1, &[Rm64, Imm8Const1]).g(6).o64(),
    Sal_rm8_CL => lg(0xD2, &[Rm8, Cl]).g(6),
    Sal_rm16_CL => lg(0xD3, &[Rm16, Cl]).g(6).o16(),
    Sal_rm32_CL => lg(0xD3, &[Rm32, Cl]).g(6).o32(),
    Sal_rm64_CL => lg(0xD3, &[Rm64, Cl]).g(6).o64(),
    Sar_rm8_1 => lg(0xD0, &[Rm8, Imm8Const1]).g(7),
    Sar_rm16_1 => lg(0xD1, &[Rm16, Imm8Const1]).g(7).o16(),
    Sar_rm32_1 => lg(0xD1, &[Rm32, Imm8Const1]).g(7).o32(),
    Sar_rm64_1 => lg(0xD1, &[Rm64, Imm8Const1]).g(7).o64(),
    Sar_rm8_CL => lg(0xD2, &[Rm8, Cl]).g(7),
    Sar_rm16_CL => lg(0xD3, &[Rm16, Cl]).g(7).o16(),
    Sar_rm32_CL => lg(0xD3, &[Rm32, Cl]).g(7).o32(),
    Sar_rm64_CL => lg(0xD3, &[Rm64, Cl]).g(7).o64(),
    Aam_imm8 => lg(0xD4, &[Imm8]).no64(),
    Aad_imm8 => lg(0xD5, &[Imm8]).no64(),
    Salc => lg(0xD6, &[]).no64(),
    Xlat_m8 => lg(0xD7, &[SegBxAl]),
    Loopne_rel8_16_CX => lg(0xE0, &[Br16_1]).o16().a16().no64(),
    Loopne_rel8_32_CX => lg(0xE0, &[Br32_1]).o32().a16().no64(),
    Loopne_rel8_16_ECX => lg(0xE0, &[Br16_1]).o16().a32(),
    Loopne_rel8_32_ECX => lg(0xE0, &[Br32_1]).o32().a32().no64(),
    Loopne_rel8_64_ECX => lg(0xE0, &[Br64_1]).d64().a32(),
    Loopne_rel8_16_RCX => lg(0xE0, &[Br16_1]).o16().a64().only64(),
    Loopne_rel8_64_RCX => lg(0xE0, &[Br64_1]).d64().a64(),
    Loope_rel8_16_CX => lg(0xE1, &[Br16_1]).o16().a16().no64(),
    Loope_rel8_32_CX => lg(0xE1, &[Br32_1]).o32().a16().no64(),
    Loope_rel8_16_ECX => lg(0xE1, &[Br16_1]).o16().a32(),
    Loope_rel8_32_ECX => lg(0xE1, &[Br32_1]).o32().a32().no64(),
    Loope_rel8_64_ECX => lg(0xE1, &[Br64_1]).d64().a32(),
    Loope_rel8_16_RCX => lg(0xE1, &[Br16_1]).o16().a64().only64(),
    Loope_rel8_64_RCX => lg(0xE1, &[Br64_1]).d64().a64(),
    Loop_rel8_16_CX => lg(0xE2, &[Br16_1]).o16().a16().no64(),
    Loop_rel8_32_CX => lg(0xE2, &[Br32_1]).o32().a16().no64(),
    Loop_rel8_16_ECX => lg(0xE2, &[Br16_1]).o16().a32(),
    Loop_rel8_32_ECX => lg(0xE2, &[Br32_1]).o32().a32().no64(),
    Loop_rel8_64_ECX => lg(0xE2, &[Br64_1]).d64().a32(),
    Loop_rel8_16_RCX => lg(0xE2, &[Br16_1]).o16().a64().only64(),
    Loop_rel8_64_RCX => lg(0xE2, &[Br64_1]).d64().a64(),
    Jcxz_rel8_16 => lg(0xE3, &[Br16_1]).o16().a16().no64(),
    Jcxz_rel8_32 => lg(0xE3, &[Br32_1]).o32().a16().no64(),
    Jecxz_rel8_16 => lg(0xE3, &[Br16_1]).o16().a32(),
    Jecxz_rel8_32 => lg(0xE3, &[Br32_1]).o32().a32().no64(),
    Jecxz_rel8_64 => lg(0xE3, &[Br64_1]).d64().a32(),
    Jrcxz_rel8_16 => lg(0xE3, &[Br16_1]).o16().a64().only64(),
    Jrcxz_rel8_64 => lg(0xE3, &[Br64_1]).d64().a64(),
    In_AL_imm8 => lg(0xE4, &[Al, Imm8]),
    In_AX_imm8 => lg(0xE5, &[Ax, Imm8]).o16(),
    In_EAX_imm8 => lg(0xE5, &[Eax, Imm8]).o32(),
    Out_imm8_AL => lg(0xE6, &[Imm8, Al]),
    Out_imm8_AX => lg(0xE7, &[Imm8, Ax]).o16(),
    Out_imm8_EAX => lg(0xE7, &[Imm8, Eax]).o32(),
    Call_rel16 => lg(0xE8, &[Br16_2]).o16(),
    Call_rel32_32 => lg(0xE8, &[Br32_4]).o32().no64(),
    Call_rel32_64 => lg(0xE8, &[Br64_4]).d64(),
    Jmp_rel16 => lg(0xE9, &[Br16_2]).o16(),
    Jmp_rel32_32 => lg(0xE9, &[Br32_4]).o32().no64(),
    Jmp_rel32_64 => lg(0xE9, &[Br64_4]).d64(),
    Jmp_ptr1616 => lg(0xEA, &[FarBr16]).o16().no64(),
    Jmp_ptr1632 => lg(0xEA, &[FarBr32]).o32().no64(),
    Jmp_rel8_16 => lg(0xEB, &[Br16_1]).o16(),
    Jmp_rel8_32 => lg(0xEB, &[Br32_1]).o32().no64(),
    Jmp_rel8_64 => lg(0xEB, &[Br64_1]).d64(),
    In_AL_DX => lg(0xEC, &[Al, Dx]),
    In_AX_DX => lg(0xED, &[Ax, Dx]).o16(),
    In_EAX_DX => lg(0xED, &[Eax, Dx]).o32(),
    Out_DX_AL => lg(0xEE, &[Dx, Al]),
    Out_DX_AX => lg(0xEF, &[Dx, Ax]).o16(),
    Out_DX_EAX => lg(0xEF, &[Dx, Eax]).o32(),
    Int1 => lg(0xF1, &[]),
    Hlt => lg(0xF4, &[]),
    Cmc => lg(0xF5, &[]),
    Test_rm8_imm8 => lg(0xF6, &[Rm8, Imm8]).g(0),
    Test_rm8_imm8_F6r1 => lg(0xF6, &[Rm8, Imm8]).g(1),
    Not_rm8 => lg(0xF6, &[Rm8]).g(2).lock(),
    Neg_rm8 => lg(0xF6, &[Rm8]).g(3).lock(),
    Mul_rm8 => lg(0xF6, &[Rm8]).g(4),
    Imul_rm8 => lg(0xF6, &[Rm8]).g(5),
    Div_rm8 => lg(0xF6, &[Rm8]).g(6),
    Idiv_rm8 => lg(0xF6, &[Rm8]).g(7),
    Test_rm16_imm16 => lg(0xF7, &[Rm16, Imm16]).g(0).o16(),
    Test_rm32_imm32 => lg(0xF7, &[Rm32, Imm32]).g(0).o32(),
    Test_rm64_imm32 => lg(0xF7, &[Rm64, Imm32Sx64]).g(0).o64(),
    Test_rm16_imm16_F7r1 => lg(0xF7, &[Rm16, Imm16]).g(1).o16(),
    Test_rm32_imm32_F7r1 => lg(0xF7, &[Rm32, Imm32]).g(1).o32(),
    Test_rm64_imm32_F7r1 => lg(0xF7, &[Rm64, Imm32Sx64]).g(1).o64(),
    Not_rm16 => lg(0xF7, &[Rm16]).g(2).o16().lock(),
    Not_rm32 => lg(0xF7, &[Rm32]).g(2).o32().lock(),
    Not_rm64 => lg(0xF7, &[Rm64]).g(2).o64().lock(),
    Neg_rm16 => lg(0xF7, &[Rm16]).g(3).o16().lock(),
    Neg_rm32 => lg(0xF7, &[Rm32]).g(3).o32().lock(),
    Neg_rm64 => lg(0xF7, &[Rm64]).g(3).o64().lock(),
    Mul_rm16 => lg(0xF7, &[Rm16]).g(4).o16(),
    Mul_rm32 => lg(0xF7, &[Rm32]).g(4).o32(),
    Mul_rm64 => lg(0xF7, &[Rm64]).g(4).o64(),
    Imul_rm16 => lg(0xF7, &[Rm16]).g(5).o16(),
    Imul_rm32 => lg(0xF7, &[Rm32]).g(5).o32(),
    Imul_rm64 => lg(0xF7, &[Rm64]).g(5).o64(),
    Div_rm16 => lg(0xF7, &[Rm16]).g(6).o16(),
    Div_rm32 => lg(0xF7, &[Rm32]).g(6).o32(),
    Div_rm64 => lg(0xF7, &[Rm64]).g(6).o64(),
    Idiv_rm16 => lg(0xF7, &[Rm16]).g(7).o16(),
    Idiv_rm32 => lg(0xF7, &[Rm32]).g(7).o32(),
    Idiv_rm64 => lg(0xF7, &[Rm64]).g(7).o64(),
    Clc => lg(0xF8, &[]),
    Stc => lg(0xF9, &[]),
    Cli => lg(0xFA, &[]),
    Sti => lg(0xFB, &[]),
    Cld => lg(0xFC, &[]),
    Std => lg(0xFD, &[]),
    Inc_rm8 => lg(0xFE, &[Rm8]).g(0).lock(),
    Dec_rm8 => lg(0xFE, &[Rm8]).g(1).lock(),
    Inc_rm16 => lg(0xFF, &[Rm16]).g(0).o16().lock(),
    Inc_rm32 => lg(0xFF, &[Rm32]).g(0).o32().lock(),
    Inc_rm64 => lg(0xFF, &[Rm64]).g(0).o64().lock(),
    Dec_rm16 => lg(0xFF, &[Rm16]).g(1).o16().lock(),
    Dec_rm32 => lg(0xFF, &[Rm32]).g(1).o32().lock(),
    Dec_rm64 => lg(0xFF, &[Rm64]).g(1).o64().lock(),
    Call_rm16 => lg(0xFF, &[Rm16]).g(2).o16(),
    Call_rm32 => lg(0xFF, &[Rm32]).g(2).o32().no64(),
    Call_rm64 => lg(0xFF, &[Rm64]).g(2).d64(),
    Call_m1616 => lg(0xFF, &[Mem]).g(3).o16(),
    Call_m1632 => lg(0xFF, &[Mem]).g(3).o32(),
    Call_m1664 => lg(0xFF, &[Mem]).g(3).o64(),
    Jmp_rm16 => lg(0xFF, &[Rm16]).g(4).o16(),
    Jmp_rm32 => lg(0xFF, &[Rm32]).g(4).o32().no64(),
    Jmp_rm64 => lg(0xFF, &[Rm64]).g(4).d64(),
    Jmp_m1616 => lg(0xFF, &[Mem]).g(5).o16(),
    Jmp_m1632 => lg(0xFF, &[Mem]).g(5).o32(),
    Jmp_m1664 => lg(0xFF, &[Mem]).g(5).o64(),
    Push_rm16 => lg(0xFF, &[Rm16]).g(6).o16(),
    Push_rm32 => lg(0xFF, &[Rm32]).g(6).o32().no64(),
    Push_rm64 => lg(0xFF, &[Rm64]).g(6).d64(),
    Fadd_m32fp => lg(0xD8, &[Mem]).g(0),
    Fadd_st0_sti => lg(0xD8, &[St0, RmSti]).g(0),
    Fmul_m32fp => lg(0xD8, &[Mem]).g(1),
    Fmul_st0_sti => lg(0xD8, &[St0, RmSti]).g(1),
    Fcom_m32fp => lg(0xD8, &[Mem]).g(2),
    Fcom_st0_sti => lg(0xD8, &[St0, RmSti]).g(2),
    Fcomp_m32fp => lg(0xD8, &[Mem]).g(3),
    Fcomp_st0_sti => lg(0xD8, &[St0, RmSti]).g(3),
    Fsub_m32fp => lg(0xD8, &[Mem]).g(4),
    Fsub_st0_sti => lg(0xD8, &[St0, RmSti]).g(4),
    Fsubr_m32fp => lg(0xD8, &[Mem]).g(5),
    Fsubr_st0_sti => lg(0xD8, &[St0, RmSti]).g(5),
    Fdiv_m32fp => lg(0xD8, &[Mem]).g(6),
    Fdiv_st0_sti => lg(0xD8, &[St0, RmSti]).g(6),
    Fdivr_m32fp => lg(0xD8, &[Mem]).g(7),
    Fdivr_st0_sti => lg(0xD8, &[St0, RmSti]).g(7),
    Fld_m32fp => lg(0xD9, &[Mem]).g(0),
    Fst_m32fp => lg(0xD9, &[Mem]).g(2),
    Fstp_m32fp => lg(0xD9, &[Mem]).g(3),
    Fldcw_m16 => lg(0xD9, &[Mem]).g(5),
    Fnstcw_m16 => lg(0xD9, &[Mem]).g(7),
    Fldenv_m14byte => lg(0xD9, &[Mem]).g(4).o16(),
    Fldenv_m28byte => lg(0xD9, &[Mem]).g(4).o32().rexw_ignored(),
    Fnstenv_m14byte => lg(0xD9, &[Mem]).g(6).o16(),
    Fnstenv_m28byte => lg(0xD9, &[Mem]).g(6).o32().rexw_ignored(),
    Fld_st0_sti => lg(0xD9, &[St0, RmSti]).g(0),
    Fxch_st0_sti => lg(0xD9, &[St0, RmSti]).g(1),
    Fnop => lg(0xD9, &[]).g(2).rmg(0),
    Fstpnce_sti => lg(0xD9, &[RmSti]).g(3),
    Fchs => lg(0xD9, &[]).g(4).rmg(0),
    Fabs => lg(0xD9, &[]).g(4).rmg(1),
    Ftst => lg(0xD9, &[]).g(4).rmg(4),
    Fxam => lg(0xD9, &[]).g(4).rmg(5),
    Fld1 => lg(0xD9, &[]).g(5).rmg(0),
    Fldl2t => lg(0xD9, &[]).g(5).rmg(1),
    Fldl2e => lg(0xD9, &[]).g(5).rmg(2),
    Fldpi => lg(0xD9, &[]).g(5).rmg(3),
    Fldlg2 => lg(0xD9, &[]).g(5).rmg(4),
    Fldln2 => lg(0xD9, &[]).g(5).rmg(5),
    Fldz => lg(0xD9, &[]).g(5).rmg(6),
    F2xm1 => lg(0xD9, &[]).g(6).rmg(0),
    Fyl2x => lg(0xD9, &[]).g(6).rmg(1),
    Fptan => lg(0xD9, &[]).g(6).rmg(2),
    Fpatan => lg(0xD9, &[]).g(6).rmg(3),
    Fxtract => lg(0xD9, &[]).g(6).rmg(4),
    Fprem1 => lg(0xD9, &[]).g(6).rmg(5),
    Fdecstp => lg(0xD9, &[]).g(6).rmg(6),
    Fincstp => lg(0xD9, &[]).g(6).rmg(7),
    Fprem => lg(0xD9, &[]).g(7).rmg(0),
    Fyl2xp1 => lg(0xD9, &[]).g(7).rmg(1),
    Fsqrt => lg(0xD9, &[]).g(7).rmg(2),
    Fsincos => lg(0xD9, &[]).g(7).rmg(3),
    Frndint => lg(0xD9, &[]).g(7).rmg(4),
    Fscale => lg(0xD9, &[]).g(7).rmg(5),
    Fsin => lg(0xD9, &[]).g(7).rmg(6),
    Fcos => lg(0xD9, &[]).g(7).rmg(7),
    Fiadd_m32int => lg(0xDA, &[Mem]).g(0),
    Fimul_m32int => lg(0xDA, &[Mem]).g(1),
    Ficom_m32int => lg(0xDA, &[Mem]).g(2),
    Ficomp_m32int => lg(0xDA, &[Mem]).g(3),
    Fisub_m32int => lg(0xDA, &[Mem]).g(4),
    Fisubr_m32int => lg(0xDA, &[Mem]).g(5),
    Fidiv_m32int => lg(0xDA, &[Mem]).g(6),
    Fidivr_m32int => lg(0xDA, &[Mem]).g(7),
    Fcmovb_st0_sti => lg(0xDA, &[St0, RmSti]).g(0),
    Fcmove_st0_sti => lg(0xDA, &[St0, RmSti]).g(1),
    Fcmovbe_st0_sti => lg(0xDA, &[St0, RmSti]).g(2),
    Fcmovu_st0_sti => lg(0xDA, &[St0, RmSti]).g(3),
    Fucompp => lg(0xDA, &[]).g(5).rmg(1),
    Fild_m32int => lg(0xDB, &[Mem]).g(0),
    Fisttp_m32int => lg(0xDB, &[Mem]).g(1),
    Fist_m32int => lg(0xDB, &[Mem]).g(2),
    Fistp_m32int => lg(0xDB, &[Mem]).g(3),
    Fld_m80fp => lg(0xDB, &[Mem]).g(5),
    Fstp_m80fp => lg(0xDB, &[Mem]).g(7),
    Fcmovnb_st0_sti => lg(0xDB, &[St0, RmSti]).g(0),
    Fcmovne_st0_sti => lg(0xDB, &[St0, RmSti]).g(1),
    Fcmovnbe_st0_sti => lg(0xDB, &[St0, RmSti]).g(2),
    Fcmovnu_st0_sti => lg(0xDB, &[St0, RmSti]).g(3),
    Fneni => lg(0xDB, &[]).g(4).rmg(0),
    Fndisi => lg(0xDB, &[]).g(4).rmg(1),
    Fnclex => lg(0xDB, &[]).g(4).rmg(2),
    Fninit => lg(0xDB, &[]).g(4).rmg(3),
    Fnsetpm => lg(0xDB, &[]).g(4).rmg(4),
    Frstpm => lg(0xDB, &[]).g(4).rmg(5),
    Fucomi_st0_sti => lg(0xDB, &[St0, RmSti]).g(5),
    Fcomi_st0_sti => lg(0xDB, &[St0, RmSti]).g(6),
    Fadd_m64fp => lg(0xDC, &[Mem]).g(0),
    Fmul_m64fp => lg(0xDC, &[Mem]).g(1),
    Fcom_m64fp => lg(0xDC, &[Mem]).g(2),
    Fcomp_m64fp => lg(0xDC, &[Mem]).g(3),
    Fsub_m64fp => lg(0xDC, &[Mem]).g(4),
    Fsubr_m64fp => lg(0xDC, &[Mem]).g(5),
    Fdiv_m64fp => lg(0xDC, &[Mem]).g(6),
    Fdivr_m64fp => lg(0xDC, &[Mem]).g(7),
    Fadd_sti_st0 => lg(0xDC, &[RmSti, St0]).g(0),
    Fmul_sti_st0 => lg(0xDC, &[RmSti, St0]).g(1),
    Fsubr_sti_st0 => lg(0xDC, &[RmSti, St0]).g(4),
    Fsub_sti_st0 => lg(0xDC, &[RmSti, St0]).g(5),
    Fdivr_sti_st0 => lg(0xDC, &[RmSti, St0]).g(6),
    Fdiv_sti_st0 => lg(0xDC, &[RmSti, St0]).g(7),
    Fcom_st0_sti_DCD0 => lg(0xDC, &[St0, RmSti]).g(2),
    Fcomp_st0_sti_DCD8 => lg(0xDC, &[St0, RmSti]).g(3),
    Fld_m64fp => lg(0xDD, &[Mem]).g(0),
    Fisttp_m64fp => lg(0xDD, &[Mem]).g(1),
    Fst_m64fp => lg(0xDD, &[Mem]).g(2),
    Fstp_m64fp => lg(0xDD, &[Mem]).g(3),
    Fnstsw_m16 => lg(0xDD, &[Mem]).g(7),
    Frstor_m94byte => lg(0xDD, &[Mem]).g(4).o16(),
    Frstor_m108byte => lg(0xDD, &[Mem]).g(4).o32().rexw_ignored(),
    Fnsave_m94byte => lg(0xDD, &[Mem]).g(6).o16(),
    Fnsave_m108byte => lg(0xDD, &[Mem]).g(6).o32().rexw_ignored(),
    Ffree_sti => lg(0xDD, &[RmSti]).g(0),
    Fxch_st0_sti_DDC8 => lg(0xDD, &[St0, RmSti]).g(1),
    Fst_sti => lg(0xDD, &[RmSti]).g(2),
    Fstp_sti => lg(0xDD, &[RmSti]).g(3),
    Fucom_st0_sti => lg(0xDD, &[St0, RmSti]).g(4),
    Fucomp_st0_sti => lg(0xDD, &[St0, RmSti]).g(5),
    Fiadd_m16int => lg(0xDE, &[Mem]).g(0),
    Fimul_m16int => lg(0xDE, &[Mem]).g(1),
    Ficom_m16int => lg(0xDE, &[Mem]).g(2),
    Ficomp_m16int => lg(0xDE, &[Mem]).g(3),
    Fisub_m16int => lg(0xDE, &[Mem]).g(4),
    Fisubr_m16int => lg(0xDE, &[Mem]).g(5),
    Fidiv_m16int => lg(0xDE, &[Mem]).g(6),
    Fidivr_m16int => lg(0xDE, &[Mem]).g(7),
    Faddp_sti_st0 => lg(0xDE, &[RmSti, St0]).g(0),
    Fmulp_sti_st0 => lg(0xDE, &[RmSti, St0]).g(1),
    Fsubrp_sti_st0 => lg(0xDE, &[RmSti, St0]).g(4),
    Fsubp_sti_st0 => lg(0xDE, &[RmSti, St0]).g(5),
    Fdivrp_sti_st0 => lg(0xDE, &[RmSti, St0]).g(6),
    Fdivp_sti_st0 => lg(0xDE, &[RmSti, St0]).g(7),
    Fcomp_st0_sti_DED0 => lg(0xDE, &[St0, RmSti]).g(2),
    Fcompp => lg(0xDE, &[]).g(3).rmg(1),
    Fild_m16int => lg(0xDF, &[Mem]).g(0),
    Fisttp_m16int => lg(0xDF, &[Mem]).g(1),
    Fist_m16int => lg(0xDF, &[Mem]).g(2),
    Fistp_m16int => lg(0xDF, &[Mem]).g(3),
    Fbld_m80bcd => lg(0xDF, &[Mem]).g(4),
    Fild_m64int => lg(0xDF, &[Mem]).g(5),
    Fbstp_m80bcd => lg(0xDF, &[Mem]).g(6),
    Fistp_m64int => lg(0xDF, &[Mem]).g(7),
    Ffreep_sti => lg(0xDF, &[RmSti]).g(0),
    Fxch_st0_sti_DFC8 => lg(0xDF, &[St0, RmSti]).g(1),
    Fstp_sti_DFD0 => lg(0xDF, &[RmSti]).g(2),
    Fstp_sti_DFD8 => lg(0xDF, &[RmSti]).g(3),
    Fnstsw_AX => lg(0xDF, &[Ax]).g(4).rmg(0),
    Fstdw_AX => lg(0xDF, &[Ax]).g(4).rmg(1),
    Fstsg_AX => lg(0xDF, &[Ax]).g(4).rmg(2),
    Fucomip_st0_sti => lg(0xDF, &[St0, RmSti]).g(5),
    Fcomip_st0_sti => lg(0xDF, &[St0, RmSti]).g(6),
    Sldt_rm16 => l0f(0x00, &[Rm16]).g(0).o16(),
    Sldt_r32m16 => l0f(0x00, &[Rm32]).g(0).o32(),
    Sldt_r64m16 => l0f(0x00, &[Rm64]).g(0).o64(),
    Str_rm16 => l0f(0x00, &[Rm16]).g(1).o16(),
    Str_r32m16 => l0f(0x00, &[Rm32]).g(1).o32(),
    Str_r64m16 => l0f(0x00, &[Rm64]).g(1).o64(),
    Lldt_rm16 => l0f(0x00, &[Rm16]).g(2),
    Ltr_rm16 => l0f(0x00, &[Rm16]).g(3),
    Verr_rm16 => l0f(0x00, &[Rm16]).g(4),
    Verw_rm16 => l0f(0x00, &[Rm16]).g(5),
    Sgdt_m1632_16 => l0f(0x01, &[Mem]).g(0).o16().no64(),
    Sgdt_m1632 => l0f(0x01, &[Mem]).g(0).o32().no64(),
    Sgdt_m1664 => l0f(0x01, &[Mem]).g(0).d64(),
    Sidt_m1632_16 => l0f(0x01, &[Mem]).g(1).o16().no64(),
    Sidt_m1632 => l0f(0x01, &[Mem]).g(1).o32().no64(),
    Sidt_m1664 => l0f(0x01, &[Mem]).g(1).d64(),
    Lgdt_m1632_16 => l0f(0x01, &[Mem]).g(2).o16().no64(),
    Lgdt_m1632 => l0f(0x01, &[Mem]).g(2).o32().no64(),
    Lgdt_m1664 => l0f(0x01, &[Mem]).g(2).d64(),
    Lidt_m1632_16 => l0f(0x01, &[Mem]).g(3).o16().no64(),
    Lidt_m1632 => l0f(0x01, &[Mem]).g(3).o32().no64(),
    Lidt_m1664 => l0f(0x01, &[Mem]).g(3).d64(),
    Smsw_rm16 => l0f(0x01, &[Rm16]).g(4).o16(),
    Smsw_r32m16 => l0f(0x01, &[Rm32]).g(4).o32(),
    Smsw_r64m16 => l0f(0x01, &[Rm64]).g(4).o64(),
    Lmsw_rm16 => l0f(0x01, &[Rm16]).g(6),
    Invlpg_m => l0f(0x01, &[Mem]).g(7),
    Vmcall => l0f(0x01, &[]).g(0).rmg(1),
    Vmlaunch => l0f(0x01, &[]).g(0).rmg(2),
    Vmresume => l0f(0x01, &[]).g(0).rmg(3),
    Vmxoff => l0f(0x01, &[]).g(0).rmg(4),
    Monitorw => l0f(0x01, &[]).g(1).rmg(0),
    Mwait => l0f(0x01, &[]).g(1).rmg(1),
    Clac => l0f(0x01, &[]).g(1).rmg(2),
    Stac => l0f(0x01, &[]).g(1).rmg(3),
    Xgetbv => l0f(0x01, &[]).g(2).rmg(0),
    Xsetbv => l0f(0x01, &[]).g(2).rmg(1),
    Xend => l0f(0x01, &[]).g(2).rmg(5),
    Xtest => l0f(0x01, &[]).g(2).rmg(6),
    Swapgs => l0f(0x01, &[]).g(7).rmg(0).only64(),
    Rdtscp => l0f(0x01, &[]).g(7).rmg(1),
    Lar_r16_rm16 => l0f(0x02, &[Reg16, Rm16]).o16(),
    Lar_r32_r32m16 => l0f(0x02, &[Reg32, Rm32]).o32(),
    Lar_r64_r64m16 => l0f(0x02, &[Reg64, Rm64]).o64(),
    Lsl_r16_rm16 => l0f(0x03, &[Reg16, Rm16]).o16(),
    Lsl_r32_r32m16 => l0f(0x03, &[Reg32, Rm32]).o32(),
    Lsl_r64_r64m16 => l0f(0x03, &[Reg64, Rm64]).o64(),
    Syscall => l0f(0x05, &[]),
    Clts => l0f(0x06, &[]),
    Sysretd => l0f(0x07, &[]).o32(),
    Sysretq => l0f(0x07, &[]).o64(),
    Invd => l0f(0x08, &[]),
    Wbinvd => l0f(0x09, &[]),
    Wbnoinvd => l0f(0x09, &[]).pf3(),
    Ud2 => l0f(0x0B, &[]),
    Prefetchw_m8 => l0f(0x0D, &[Mem]).g(1),
    Prefetchnta_m8 => l0f(0x18, &[Mem]).g(0),
    Prefetcht0_m8 => l0f(0x18, &[Mem]).g(1),
    Prefetcht1_m8 => l0f(0x18, &[Mem]).g(2),
    Prefetcht2_m8 => l0f(0x18, &[Mem]).g(3),
    Bndldx_bnd_mib => l0f(0x1A, &[RegBnd, Mib]),
    Bndmov_bnd_bndm64 => l0f(0x1A, &[RegBnd, BndRm]).p66().no64(),
    Bndmov_bnd_bndm128 => l0f(0x1A, &[RegBnd, BndRm]).p66().only64(),
    Bndcl_bnd_rm32 => l0f(0x1A, &[RegBnd, Rm32]).pf3().no64(),
    Bndcl_bnd_rm64 => l0f(0x1A, &[RegBnd, Rm64]).pf3().only64(),
    Bndcu_bnd_rm32 => l0f(0x1A, &[RegBnd, Rm32]).pf2().no64(),
    Bndcu_bnd_rm64 => l0f(0x1A, &[RegBnd, Rm64]).pf2().only64(),
    Bndstx_mib_bnd => l0f(0x1B, &[Mib, RegBnd]),
    Bndmov_bndm64_bnd => l0f(0x1B, &[BndRm, RegBnd]).p66().no64(),
    Bndmov_bndm128_bnd => l0f(0x1B, &[BndRm, RegBnd]).p66().only64(),
    Bndmk_bnd_m32 => l0f(0x1B, &[RegBnd, Mem]).pf3().no64(),
    Bndmk_bnd_m64 => l0f(0x1B, &[RegBnd, Mem]).pf3().only64(),
    Bndcn_bnd_rm32 => l0f(0x1B, &[RegBnd, Rm32]).pf2().no64(),
    Bndcn_bnd_rm64 => l0f(0x1B, &[RegBnd, Rm64]).pf2().only64(),
    Nop_rm16 => l0f(0x1F, &[Rm16]).g(0).o16(),
    Nop_rm32 => l0f(0x1F, &[Rm32]).g(0).o32(),
    Nop_rm64 => l0f(0x1F, &[Rm64]).g(0).o64(),
    Mov_r32_cr => l0f(0x20, &[RmReg32, RegCr]).no64(),
    Mov_r64_cr => l0f(0x20, &[RmReg64, RegCr]).only64(),
    Mov_r32_dr => l0f(0x21, &[RmReg32, RegDr]).no64(),
    Mov_r64_dr => l0f(0x21, &[RmReg64, RegDr]).only64(),
    Mov_cr_r32 => l0f(0x22, &[RegCr, RmReg32]).no64(),
    Mov_cr_r64 => l0f(0x22, &[RegCr, RmReg64]).only64(),
    Mov_dr_r32 => l0f(0x23, &[RegDr, RmReg32]).no64(),
    Mov_dr_r64 => l0f(0x23, &[RegDr, RmReg64]).only64(),
    Wrmsr => l0f(0x30, &[]),
    Rdtsc => l0f(0x31, &[]),
    Rdmsr => l0f(0x32, &[]),
    Rdpmc => l0f(0x33, &[]),
    Sysenter => l0f(0x34, &[]),
    Sysexitd => l0f(0x35, &[]).o32(),
    Sysexitq => l0f(0x35, &[]).o64(),
    Cmovo_r16_rm16 => l0f(0x40, &[Reg16, Rm16]).o16(),
    Cmovo_r32_rm32 => l0f(0x40, &[Reg32, Rm32]).o32(),
    Cmovo_r64_rm64 => l0f(0x40, &[Reg64, Rm64]).o64(),
    Cmovno_r16_rm16 => l0f(0x41, &[Reg16, Rm16]).o16(),
    Cmovno_r32_rm32 => l0f(0x41, &[Reg32, Rm32]).o32(),
    Cmovno_r64_rm64 => l0f(0x41, &[Reg64, Rm64]).o64(),
    Cmovb_r16_rm16 => l0f(0x42, &[Reg16, Rm16]).o16(),
    Cmovb_r32_rm32 => l0f(0x42, &[Reg32, Rm32]).o32(),
    Cmovb_r64_rm64 => l0f(0x42, &[Reg64, Rm64]).o64(),
    Cmovae_r16_rm16 => l0f(0x43, &[Reg16, Rm16]).o16(),
    Cmovae_r32_rm32 => l0f(0x43, &[Reg32, Rm32]).o32(),
    Cmovae_r64_rm64 => l0f(0x43, &[Reg64, Rm64]).o64(),
    Cmove_r16_rm16 => l0f(0x44, &[Reg16, Rm16]).o16(),
    Cmove_r32_rm32 => l0f(0x44, &[Reg32, Rm32]).o32(),
    Cmove_r64_rm64 => l0f(0x44, &[Reg64, Rm64]).o64(),
    Cmovne_r16_rm16 => l0f(0x45, &[Reg16, Rm16]).o16(),
    Cmovne_r32_rm32 => l0f(0x45, &[Reg32, Rm32]).o32(),
    Cmovne_r64_rm64 => l0f(0x45, &[Reg64, Rm64]).o64(),
    Cmovbe_r16_rm16 => l0f(0x46, &[Reg16, Rm16]).o16(),
    Cmovbe_r32_rm32 => l0f(0x46, &[Reg32, Rm32]).o32(),
    Cmovbe_r64_rm64 => l0f(0x46, &[Reg64, Rm64]).o64(),
    Cmova_r16_rm16 => l0f(0x47, &[Reg16, Rm16]).o16(),
    Cmova_r32_rm32 => l0f(0x47, &[Reg32, Rm32]).o32(),
    Cmova_r64_rm64 => l0f(0x47, &[Reg64, Rm64]).o64(),
    Cmovs_r16_rm16 => l0f(0x48, &[Reg16, Rm16]).o16(),
    Cmovs_r32_rm32 => l0f(0x48, &[Reg32, Rm32]).o32(),
    Cmovs_r64_rm64 => l0f(0x48, &[Reg64, Rm64]).o64(),
    Cmovns_r16_rm16 => l0f(0x49, &[Reg16, Rm16]).o16(),
    Cmovns_r32_rm32 => l0f(0x49, &[Reg32, Rm32]).o32(),
    Cmovns_r64_rm64 => l0f(0x49, &[Reg64, Rm64]).o64(),
    Cmovp_r16_rm16 => l0f(0x4A, &[Reg16, Rm16]).o16(),
    Cmovp_r32_rm32 => l0f(0x4A, &[Reg32, Rm32]).o32(),
    Cmovp_r64_rm64 => l0f(0x4A, &[Reg64, Rm64]).o64(),
    Cmovnp_r16_rm16 => l0f(0x4B, &[Reg16, Rm16]).o16(),
    Cmovnp_r32_rm32 => l0f(0x4B, &[Reg32, Rm32]).o32(),
    Cmovnp_r64_rm64 => l0f(0x4B, &[Reg64, Rm64]).o64(),
    Cmovl_r16_rm16 => l0f(0x4C, &[Reg16, Rm16]).o16(),
    Cmovl_r32_rm32 => l0f(0x4C, &[Reg32, Rm32]).o32(),
    Cmovl_r64_rm64 => l0f(0x4C, &[Reg64, Rm64]).o64(),
    Cmovge_r16_rm16 => l0f(0x4D, &[Reg16, Rm16]).o16(),
    Cmovge_r32_rm32 => l0f(0x4D, &[Reg32, Rm32]).o32(),
    Cmovge_r64_rm64 => l0f(0x4D, &[Reg64, Rm64]).o64(),
    Cmovle_r16_rm16 => l0f(0x4E, &[Reg16, Rm16]).o16(),
    Cmovle_r32_rm32 => l0f(0x4E, &[Reg32, Rm32]).o32(),
    Cmovle_r64_rm64 => l0f(0x4E, &[Reg64, Rm64]).o64(),
    Cmovg_r16_rm16 => l0f(0x4F, &[Reg16, Rm16]).o16(),
    Cmovg_r32_rm32 => l0f(0x4F, &[Reg32, Rm32]).o32(),
    Cmovg_r64_rm64 => l0f(0x4F, &[Reg64, Rm64]).o64(),
    Jo_rel16 => l0f(0x80, &[Br16_2]).o16(),
    Jo_rel32_32 => l0f(0x80, &[Br32_4]).o32().no64(),
    Jo_rel32_64 => l0f(0x80, &[Br64_4]).d64(),
    Jno_rel16 => l0f(0x81, &[Br16_2]).o16(),
    Jno_rel32_32 => l0f(0x81, &[Br32_4]).o32().no64(),
    Jno_rel32_64 => l0f(0x81, &[Br64_4]).d64(),
    Jb_rel16 => l0f(0x82, &[Br16_2]).o16(),
    Jb_rel32_32 => l0f(0x82, &[Br32_4]).o32().no64(),
    Jb_rel32_64 => l0f(0x82, &[Br64_4]).d64(),
    Jae_rel16 => l0f(0x83, &[Br16_2]).o16(),
    Jae_rel32_32 => l0f(0x83, &[Br32_4]).o32().no64(),
    Jae_rel32_64 => l0f(0x83, &[Br64_4]).d64(),
    Je_rel16 => l0f(0x84, &[Br16_2]).o16(),
    Je_rel32_32 => l0f(0x84, &[Br32_4]).o32().no64(),
    Je_rel32_64 => l0f(0x84, &[Br64_4]).d64(),
    Jne_rel16 => l0f(0x85, &[Br16_2]).o16(),
    Jne_rel32_32 => l0f(0x85, &[Br32_4]).o32().no64(),
    Jne_rel32_64 => l0f(0x85, &[Br64_4]).d64(),
    Jbe_rel16 => l0f(0x86, &[Br16_2]).o16(),
    Jbe_rel32_32 => l0f(0x86, &[Br32_4]).o32().no64(),
    Jbe_rel32_64 => l0f(0x86, &[Br64_4]).d64(),
    Ja_rel16 => l0f(0x87, &[Br16_2]).o16(),
    Ja_rel32_32 => l0f(0x87, &[Br32_4]).o32().no64(),
    Ja_rel32_64 => l0f(0x87, &[Br64_4]).d64(),
    Js_rel16 => l0f(0x88, &[Br16_2]).o16(),
    Js_rel32_32 => l0f(0x88, &[Br32_4]).o32().no64(),
    Js_rel32_64 => l0f(0x88, &[Br64_4]).d64(),
    Jns_rel16 => l0f(0x89, &[Br16_2]).o16(),
    Jns_rel32_32 => l0f(0x89, &[Br32_4]).o32().no64(),
    Jns_rel32_64 => l0f(0x89, &[Br64_4]).d64(),
    Jp_rel16 => l0f(0x8A, &[Br16_2]).o16(),
    Jp_rel32_32 => l0f(0x8A, &[Br32_4]).o32().no64(),
    Jp_rel32_64 => l0f(0x8A, &[Br64_4]).d64(),
    Jnp_rel16 => l0f(0x8B, &[Br16_2]).o16(),
    Jnp_rel32_32 => l0f(0x8B, &[Br32_4]).o32().no64(),
    Jnp_rel32_64 => l0f(0x8B, &[Br64_4]).d64(),
    Jl_rel16 => l0f(0x8C, &[Br16_2]).o16(),
    Jl_rel32_32 => l0f(0x8C, &[Br32_4]).o32().no64(),
    Jl_rel32_64 => l0f(0x8C, &[Br64_4]).d64(),
    Jge_rel16 => l0f(0x8D, &[Br16_2]).o16(),
    Jge_rel32_32 => l0f(0x8D, &[Br32_4]).o32().no64(),
    Jge_rel32_64 => l0f(0x8D, &[Br64_4]).d64(),
    Jle_rel16 => l0f(0x8E, &[Br16_2]).o16(),
    Jle_rel32_32 => l0f(0x8E, &[Br32_4]).o32().no64(),
    Jle_rel32_64 => l0f(0x8E, &[Br64_4]).d64(),
    Jg_rel16 => l0f(0x8F, &[Br16_2]).o16(),
    Jg_rel32_32 => l0f(0x8F, &[Br32_4]).o32().no64(),
    Jg_rel32_64 => l0f(0x8F, &[Br64_4]).d64(),
    Seto_rm8 => l0f(0x90, &[Rm8]),
    Setno_rm8 => l0f(0x91, &[Rm8]),
    Setb_rm8 => l0f(0x92, &[Rm8]),
    Setae_rm8 => l0f(0x93, &[Rm8]),
    Sete_rm8 => l0f(0x94, &[Rm8]),
    Setne_rm8 => l0f(0x95, &[Rm8]),
    Setbe_rm8 => l0f(0x96, &[Rm8]),
    Seta_rm8 => l0f(0x97, &[Rm8]),
    Sets_rm8 => l0f(0x98, &[Rm8]),
    Setns_rm8 => l0f(0x99, &[Rm8]),
    Setp_rm8 => l0f(0x9A, &[Rm8]),
    Setnp_rm8 => l0f(0x9B, &[Rm8]),
    Setl_rm8 => l0f(0x9C, &[Rm8]),
    Setge_rm8 => l0f(0x9D, &[Rm8]),
    Setle_rm8 => l0f(0x9E, &[Rm8]),
    Setg_rm8 => l0f(0x9F, &[Rm8]),
    Pushw_FS => l0f(0xA0, &[Fs]).o16(),
    Pushd_FS => l0f(0xA0, &[Fs]).o32().no64(),
    Pushq_FS => l0f(0xA0, &[Fs]).d64(),
    Popw_FS => l0f(0xA1, &[Fs]).o16(),
    Popd_FS => l0f(0xA1, &[Fs]).o32().no64(),
    Popq_FS => l0f(0xA1, &[Fs]).d64(),
    Cpuid => l0f(0xA2, &[]),
    Pushw_GS => l0f(0xA8, &[Gs]).o16(),
    Pushd_GS => l0f(0xA8, &[Gs]).o32().no64(),
    Pushq_GS => l0f(0xA8, &[Gs]).d64(),
    Popw_GS => l0f(0xA9, &[Gs]).o16(),
    Popd_GS => l0f(0xA9, &[Gs]).o32().no64(),
    Popq_GS => l0f(0xA9, &[Gs]).d64(),
    Rsm => l0f(0xAA, &[]),
    Bt_rm16_r16 => l0f(0xA3, &[Rm16, Reg16]).o16(),
    Bt_rm32_r32 => l0f(0xA3, &[Rm32, Reg32]).o32(),
    Bt_rm64_r64 => l0f(0xA3, &[Rm64, Reg64]).o64(),
    Bts_rm16_r16 => l0f(0xAB, &[Rm16, Reg16]).o16().lock(),
    Bts_rm32_r32 => l0f(0xAB, &[Rm32, Reg32]).o32().lock(),
    Bts_rm64_r64 => l0f(0xAB, &[Rm64, Reg64]).o64().lock(),
    Btr_rm16_r16 => l0f(0xB3, &[Rm16, Reg16]).o16().lock(),
    Btr_rm32_r32 => l0f(0xB3, &[Rm32, Reg32]).o32().lock(),
    Btr_rm64_r64 => l0f(0xB3, &[Rm64, Reg64]).o64().lock(),
    Btc_rm16_r16 => l0f(0xBB, &[Rm16, Reg16]).o16().lock(),
    Btc_rm32_r32 => l0f(0xBB, &[Rm32, Reg32]).o32().lock(),
    Btc_rm64_r64 => l0f(0xBB, &[Rm64, Reg64]).o64().lock(),
    Shld_rm16_r16_imm8 => l0f(0xA4, &[Rm16, Reg16, Imm8]).o16(),
    Shld_rm32_r32_imm8 => l0f(0xA4, &[Rm32, Reg32, Imm8]).o32(),
    Shld_rm64_r64_imm8 => l0f(0xA4, &[Rm64, Reg64, Imm8]).o64(),
    Shld_rm16_r16_CL => l0f(0xA5, &[Rm16, Reg16, Cl]).o16(),
    Shld_rm32_r32_CL => l0f(0xA5, &[Rm32, Reg32, Cl]).o32(),
    Shld_rm64_r64_CL => l0f(0xA5, &[Rm64, Reg64, Cl]).o64(),
    Shrd_rm16_r16_imm8 => l0f(0xAC, &[Rm16, Reg16, Imm8]).o16(),
    Shrd_rm32_r32_imm8 => l0f(0xAC, &[Rm32, Reg32, Imm8]).o32(),
    Shrd_rm64_r64_imm8 => l0f(0xAC, &[Rm64, Reg64, Imm8]).o64(),
    Shrd_rm16_r16_CL => l0f(0xAD, &[Rm16, Reg16, Cl]).o16(),
    Shrd_rm32_r32_CL => l0f(0xAD, &[Rm32, Reg32, Cl]).o32(),
    Shrd_rm64_r64_CL => l0f(0xAD, &[Rm64, Reg64, Cl]).o64(),
    Xbts_r16_rm16 => l0f(0xA6, &[Reg16, Rm16]).o16().no64(),
    Xbts_r32_rm32 => l0f(0xA6, &[Reg32, Rm32]).o32().no64(),
    Ibts_rm16_r16 => l0f(0xA7, &[Rm16, Reg16]).o16().no64(),
    Ibts_rm32_r32 => l0f(0xA7, &[Rm32, Reg32]).o32().no64(),
    Cmpxchg486_rm8_r8 => l0f(0xA6, &[Rm8, Reg8]).no64().lock(),
    Cmpxchg486_rm16_r16 => l0f(0xA7, &[Rm16, Reg16]).o16().no64().lock(),
    Cmpxchg486_rm32_r32 => l0f(0xA7, &[Rm32, Reg32]).o32().no64().lock(),
    Fxsave_m512byte => l0f(0xAE, &[Mem]).g(0),
    Fxrstor_m512byte => l0f(0xAE, &[Mem]).g(1),
    Xsave_mem => l0f(0xAE, &[Mem]).g(4),
    Xrstor_mem => l0f(0xAE, &[Mem]).g(5),
    Clflush_m8 => l0f(0xAE, &[Mem]).g(7),
    Ldmxcsr_m32 => l0f(0xAE, &[Mem]).g(2),
    Stmxcsr_m32 => l0f(0xAE, &[Mem]).g(3),
    Lfence => l0f(0xAE, &[]).g(5).rmg(0),
    Mfence => l0f(0xAE, &[]).g(6).rmg(0),
    Sfence => l0f(0xAE, &[]).g(7).rmg(0),
    Imul_r16_rm16 => l0f(0xAF, &[Reg16, Rm16]).o16(),
    Imul_r32_rm32 => l0f(0xAF, &[Reg32, Rm32]).o32(),
    Imul_r64_rm64 => l0f(0xAF, &[Reg64, Rm64]).o64(),
    Cmpxchg_rm8_r8 => l0f(0xB0, &[Rm8, Reg8]).lock(),
    Cmpxchg_rm16_r16 => l0f(0xB1, &[Rm16, Reg16]).o16().lock(),
    Cmpxchg_rm32_r32 => l0f(0xB1, &[Rm32, Reg32]).o32().lock(),
    Cmpxchg_rm64_r64 => l0f(0xB1, &[Rm64, Reg64]).o64().lock(),
    Lss_r16_m1616 => l0f(0xB2, &[Reg16, Mem]).o16(),
    Lss_r32_m1632 => l0f(0xB2, &[Reg32, Mem]).o32(),
    Lss_r64_m1664 => l0f(0xB2, &[Reg64, Mem]).o64(),
    Lfs_r16_m1616 => l0f(0xB4, &[Reg16, Mem]).o16(),
    Lfs_r32_m1632 => l0f(0xB4, &[Reg32, Mem]).o32(),
    Lfs_r64_m1664 => l0f(0xB4, &[Reg64, Mem]).o64(),
    Lgs_r16_m1616 => l0f(0xB5, &[Reg16, Mem]).o16(),
    Lgs_r32_m1632 => l0f(0xB5, &[Reg32, Mem]).o32(),
    Lgs_r64_m1664 => l0f(0xB5, &[Reg64, Mem]).o64(),
    Movzx_r16_rm8 => l0f(0xB6, &[Reg16, Rm8]).o16(),
    Movzx_r32_rm8 => l0f(0xB6, &[Reg32, Rm8]).o32(),
    Movzx_r64_rm8 => l0f(0xB6, &[Reg64, Rm8]).o64(),
    Movzx_r16_rm16 => l0f(0xB7, &[Reg16, Rm16]).o16(),
    Movzx_r32_rm16 => l0f(0xB7, &[Reg32, Rm16]).o32(),
    Movzx_r64_rm16 => l0f(0xB7, &[Reg64, Rm16]).o64(),
    Movsx_r16_rm8 => l0f(0xBE, &[Reg16, Rm8]).o16(),
    Movsx_r32_rm8 => l0f(0xBE, &[Reg32, Rm8]).o32(),
    Movsx_r64_rm8 => l0f(0xBE, &[Reg64, Rm8]).o64(),
    Movsx_r16_rm16 => l0f(0xBF, &[Reg16, Rm16]).o16(),
    Movsx_r32_rm16 => l0f(0xBF, &[Reg32, Rm16]).o32(),
    Movsx_r64_rm16 => l0f(0xBF, &[Reg64, Rm16]).o64(),
    Popcnt_r16_rm16 => l0f(0xB8, &[Reg16, Rm16]).pf3().o16(),
    Popcnt_r32_rm32 => l0f(0xB8, &[Reg32, Rm32]).pf3().o32(),
    Popcnt_r64_rm64 => l0f(0xB8, &[Reg64, Rm64]).pf3().o64(),
    Tzcnt_r16_rm16 => l0f(0xBC, &[Reg16, Rm16]).pf3().o16(),
    Tzcnt_r32_rm32 => l0f(0xBC, &[Reg32, Rm32]).pf3().o32(),
    Tzcnt_r64_rm64 => l0f(0xBC, &[Reg64, Rm64]).pf3().o64(),
    Lzcnt_r16_rm16 => l0f(0xBD, &[Reg16, Rm16]).pf3().o16(),
    Lzcnt_r32_rm32 => l0f(0xBD, &[Reg32, Rm32]).pf3().o32(),
    Lzcnt_r64_rm64 => l0f(0xBD, &[Reg64, Rm64]).pf3().o64(),
    Ud1_r16_rm16 => l0f(0xB9, &[Reg16, Rm16]).o16(),
    Ud1_r32_rm32 => l0f(0xB9, &[Reg32, Rm32]).o32(),
    Ud1_r64_rm64 => l0f(0xB9, &[Reg64, Rm64]).o64(),
    Bt_rm16_imm8 => l0f(0xBA, &[Rm16, Imm8]).g(4).o16(),
    Bt_rm32_imm8 => l0f(0xBA, &[Rm32, Imm8]).g(4).o32(),
    Bt_rm64_imm8 => l0f(0xBA, &[Rm64, Imm8]).g(4).o64(),
    Bts_rm16_imm8 => l0f(0xBA, &[Rm16, Imm8]).g(5).o16().lock(),
    Bts_rm32_imm8 => l0f(0xBA, &[Rm32, Imm8]).g(5).o32().lock(),
    Bts_rm64_imm8 => l0f(0xBA, &[Rm64, Imm8]).g(5).o64().lock(),
    Btr_rm16_imm8 => l0f(0xBA, &[Rm16, Imm8]).g(6).o16().lock(),
    Btr_rm32_imm8 => l0f(0xBA, &[Rm32, Imm8]).g(6).o32().lock(),
    Btr_rm64_imm8 => l0f(0xBA, &[Rm64, Imm8]).g(6).o64().lock(),
    Btc_rm16_imm8 => l0f(0xBA, &[Rm16, Imm8]).g(7).o16().lock(),
    Btc_rm32_imm8 => l0f(0xBA, &[Rm32, Imm8]).g(7).o32().lock(),
    Btc_rm64_imm8 => l0f(0xBA, &[Rm64, Imm8]).g(7).o64().lock(),
    Bsf_r16_rm16 => l0f(0xBC, &[Reg16, Rm16]).o16(),
    Bsf_r32_rm32 => l0f(0xBC, &[Reg32, Rm32]).o32(),
    Bsf_r64_rm64 => l0f(0xBC, &[Reg64, Rm64]).o64(),
    Bsr_r16_rm16 => l0f(0xBD, &[Reg16, Rm16]).o16(),
    Bsr_r32_rm32 => l0f(0xBD, &[Reg32, Rm32]).o32(),
    Bsr_r64_rm64 => l0f(0xBD, &[Reg64, Rm64]).o64(),
    Xadd_rm8_r8 => l0f(0xC0, &[Rm8, Reg8]).lock(),
    Xadd_rm16_r16 => l0f(0xC1, &[Rm16, Reg16]).o16().lock(),
    Xadd_rm32_r32 => l0f(0xC1, &[Rm32, Reg32]).o32().lock(),
    Xadd_rm64_r64 => l0f(0xC1, &[Rm64, Reg64]).o64().lock(),
    Cmpxchg8b_m64 => l0f(0xC7, &[Mem]).g(1).lock(),
    Cmpxchg16b_m128 => l0f(0xC7, &[Mem]).g(1).o64().lock(),
    Rdrand_r16 => l0f(0xC7, &[RmReg16]).g(6).o16(),
    Rdrand_r32 => l0f(0xC7, &[RmReg32]).g(6).o32(),
    Rdrand_r64 => l0f(0xC7, &[RmReg64]).g(6).o64(),
    Rdseed_r16 => l0f(0xC7, &[RmReg16]).g(7).o16(),
    Rdseed_r32 => l0f(0xC7, &[RmReg32]).g(7).o32(),
    Rdseed_r64 => l0f(0xC7, &[RmReg64]).g(7).o64(),
    Bswap_r32 => l0f(0xC8, &[Op32]).o32(),
    Bswap_r64 => l0f(0xC8, &[Op64]).o64(),
    Ud0_r16_rm16 => l0f(0xFF, &[Reg16, Rm16]).o16(),
    Ud0_r32_rm32 => l0f(0xFF, &[Reg32, Rm32]).o32(),
    Ud0_r64_rm64 => l0f(0xFF, &[Reg64, Rm64]).o64(),
    Movbe_r16_m16 => l38(0xF0, &[Reg16, Mem]).o16(),
    Movbe_r32_m32 => l38(0xF0, &[Reg32, Mem]).o32(),
    Movbe_r64_m64 => l38(0xF0, &[Reg64, Mem]).o64(),
    Movbe_m16_r16 => l38(0xF1, &[Mem, Reg16]).o16(),
    Movbe_m32_r32 => l38(0xF1, &[Mem, Reg32]).o32(),
    Movbe_m64_r64 => l38(0xF1, &[Mem, Reg64]).o64(),
    Crc32_r32_rm8 => l38(0xF0, &[Reg32, Rm8]).pf2().o32(),
    Crc32_r64_rm8 => l38(0xF0, &[Reg64, Rm8]).pf2().o64(),
    Crc32_r32_rm16 => l38(0xF1, &[Reg32, Rm16]).pf2().o16(),
    Crc32_r32_rm32 => l38(0xF1, &[Reg32, Rm32]).pf2().o32(),
    Crc32_r64_rm64 => l38(0xF1, &[Reg64, Rm64]).pf2().o64(),
    Movups_xmm_xmmm128 => l0f(0x10, &[RegXmm, XmmRm]),
    Movupd_xmm_xmmm128 => l0f(0x10, &[RegXmm, XmmRm]).p66(),
    Movss_xmm_xmmm32 => l0f(0x10, &[RegXmm, XmmRm]).pf3(),
    Movsd_xmm_xmmm64 => l0f(0x10, &[RegXmm, XmmRm]).pf2(),
    Movups_xmmm128_xmm => l0f(0x11, &[XmmRm, RegXmm]),
    Movupd_xmmm128_xmm => l0f(0x11, &[XmmRm, RegXmm]).p66(),
    Movss_xmmm32_xmm => l0f(0x11, &[XmmRm, RegXmm]).pf3(),
    Movsd_xmmm64_xmm => l0f(0x11, &[XmmRm, RegXmm]).pf2(),
    Movaps_xmm_xmmm128 => l0f(0x28, &[RegXmm, XmmRm]),
    Movapd_xmm_xmmm128 => l0f(0x28, &[RegXmm, XmmRm]).p66(),
    Movaps_xmmm128_xmm => l0f(0x29, &[XmmRm, RegXmm]),
    Movapd_xmmm128_xmm => l0f(0x29, &[XmmRm, RegXmm]).p66(),
    Cvtsi2ss_xmm_rm32 => l0f(0x2A, &[RegXmm, Rm32]).pf3(),
    Cvtsi2ss_xmm_rm64 => l0f(0x2A, &[RegXmm, Rm64]).pf3().o64(),
    Cvtsi2sd_xmm_rm32 => l0f(0x2A, &[RegXmm, Rm32]).pf2(),
    Cvtsi2sd_xmm_rm64 => l0f(0x2A, &[RegXmm, Rm64]).pf2().o64(),
    Cvttss2si_r32_xmmm32 => l0f(0x2C, &[Reg32, XmmRm]).pf3(),
    Cvttss2si_r64_xmmm32 => l0f(0x2C, &[Reg64, XmmRm]).pf3().o64(),
    Cvttsd2si_r32_xmmm64 => l0f(0x2C, &[Reg32, XmmRm]).pf2(),
    Cvttsd2si_r64_xmmm64 => l0f(0x2C, &[Reg64, XmmRm]).pf2().o64(),
    Ucomiss_xmm_xmmm32 => l0f(0x2E, &[RegXmm, XmmRm]),
    Ucomisd_xmm_xmmm64 => l0f(0x2E, &[RegXmm, XmmRm]).p66(),
    Comiss_xmm_xmmm32 => l0f(0x2F, &[RegXmm, XmmRm]),
    Comisd_xmm_xmmm64 => l0f(0x2F, &[RegXmm, XmmRm]).p66(),
    Sqrtps_xmm_xmmm128 => l0f(0x51, &[RegXmm, XmmRm]),
    Sqrtpd_xmm_xmmm128 => l0f(0x51, &[RegXmm, XmmRm]).p66(),
    Sqrtss_xmm_xmmm32 => l0f(0x51, &[RegXmm, XmmRm]).pf3(),
    Sqrtsd_xmm_xmmm64 => l0f(0x51, &[RegXmm, XmmRm]).pf2(),
    Addps_xmm_xmmm128 => l0f(0x58, &[RegXmm, XmmRm]),
    Addpd_xmm_xmmm128 => l0f(0x58, &[RegXmm, XmmRm]).p66(),
    Addss_xmm_xmmm32 => l0f(0x58, &[RegXmm, XmmRm]).pf3(),
    Addsd_xmm_xmmm64 => l0f(0x58, &[RegXmm, XmmRm]).pf2(),
    Mulps_xmm_xmmm128 => l0f(0x59, &[RegXmm, XmmRm]),
    Mulpd_xmm_xmmm128 => l0f(0x59, &[RegXmm, XmmRm]).p66(),
    Mulss_xmm_xmmm32 => l0f(0x59, &[RegXmm, XmmRm]).pf3(),
    Mulsd_xmm_xmmm64 => l0f(0x59, &[RegXmm, XmmRm]).pf2(),
    Subps_xmm_xmmm128 => l0f(0x5C, &[RegXmm, XmmRm]),
    Subpd_xmm_xmmm128 => l0f(0x5C, &[RegXmm, XmmRm]).p66(),
    Subss_xmm_xmmm32 => l0f(0x5C, &[RegXmm, XmmRm]).pf3(),
    Subsd_xmm_xmmm64 => l0f(0x5C, &[RegXmm, XmmRm]).pf2(),
    Divps_xmm_xmmm128 => l0f(0x5E, &[RegXmm, XmmRm]),
    Divpd_xmm_xmmm128 => l0f(0x5E, &[RegXmm, XmmRm]).p66(),
    Divss_xmm_xmmm32 => l0f(0x5E, &[RegXmm, XmmRm]).pf3(),
    Divsd_xmm_xmmm64 => l0f(0x5E, &[RegXmm, XmmRm]).pf2(),
    Andps_xmm_xmmm128 => l0f(0x54, &[RegXmm, XmmRm]),
    Andpd_xmm_xmmm128 => l0f(0x54, &[RegXmm, XmmRm]).p66(),
    Xorps_xmm_xmmm128 => l0f(0x57, &[RegXmm, XmmRm]),
    Xorpd_xmm_xmmm128 => l0f(0x57, &[RegXmm, XmmRm]).p66(),
    Movd_mm_rm32 => l0f(0x6E, &[RegMm, Rm32]),
    Movq_mm_rm64 => l0f(0x6E, &[RegMm, Rm64]).o64(),
    Movd_xmm_rm32 => l0f(0x6E, &[RegXmm, Rm32]).p66(),
    Movq_xmm_rm64 => l0f(0x6E, &[RegXmm, Rm64]).p66().o64(),
    Movq_mm_mmm64 => l0f(0x6F, &[RegMm, MmRm]),
    Movdqa_xmm_xmmm128 => l0f(0x6F, &[RegXmm, XmmRm]).p66(),
    Movdqu_xmm_xmmm128 => l0f(0x6F, &[RegXmm, XmmRm]).pf3(),
    Movd_rm32_mm => l0f(0x7E, &[Rm32, RegMm]),
    Movq_rm64_mm => l0f(0x7E, &[Rm64, RegMm]).o64(),
    Movd_rm32_xmm => l0f(0x7E, &[Rm32, RegXmm]).p66(),
    Movq_rm64_xmm => l0f(0x7E, &[Rm64, RegXmm]).p66().o64(),
    Movq_xmm_xmmm64 => l0f(0x7E, &[RegXmm, XmmRm]).pf3(),
    Movq_mmm64_mm => l0f(0x7F, &[MmRm, RegMm]),
    Movdqa_xmmm128_xmm => l0f(0x7F, &[XmmRm, RegXmm]).p66(),
    Movdqu_xmmm128_xmm => l0f(0x7F, &[XmmRm, RegXmm]).pf3(),
    Movq_xmmm64_xmm => l0f(0xD6, &[XmmRm, RegXmm]).p66(),
    Pxor_mm_mmm64 => l0f(0xEF, &[RegMm, MmRm]),
    Pxor_xmm_xmmm128 => l0f(0xEF, &[RegXmm, XmmRm]).p66(),
    Pshufb_mm_mmm64 => l38(0x00, &[RegMm, MmRm]),
    Pshufb_xmm_xmmm128 => l38(0x00, &[RegXmm, XmmRm]).p66(),
    Palignr_mm_mmm64_imm8 => l3a(0x0F, &[RegMm, MmRm, Imm8]),
    Palignr_xmm_xmmm128_imm8 => l3a(0x0F, &[RegXmm, XmmRm, Imm8]).p66(),
    VEX_Vmovups_xmm_xmmm128 => vx(T0F, 0x10, &[RegXmm, XmmRm]).wig(),
    VEX_Vmovups_ymm_ymmm256 => vx(T0F, 0x10, &[RegYmm, YmmRm]).l(1).wig(),
    VEX_Vmovups_xmmm128_xmm => vx(T0F, 0x11, &[XmmRm, RegXmm]).wig(),
    VEX_Vmovups_ymmm256_ymm => vx(T0F, 0x11, &[YmmRm, RegYmm]).l(1).wig(),
    VEX_Vmovupd_xmm_xmmm128 => vx(T0F, 0x10, &[RegXmm, XmmRm]).p66().wig(),
    VEX_Vmovupd_ymm_ymmm256 => vx(T0F, 0x10, &[RegYmm, YmmRm]).p66().l(1).wig(),
    VEX_Vmovupd_xmmm128_xmm => vx(T0F, 0x11, &[XmmRm, RegXmm]).p66().wig(),
    VEX_Vmovupd_ymmm256_ymm => vx(T0F, 0x11, &[YmmRm, RegYmm]).p66().l(1).wig(),
    VEX_Vmovaps_xmm_xmmm128 => vx(T0F, 0x28, &[RegXmm, XmmRm]).wig(),
    VEX_Vmovaps_ymm_ymmm256 => vx(T0F, 0x28, &[RegYmm, YmmRm]).l(1).wig(),
    VEX_Vmovaps_xmmm128_xmm => vx(T0F, 0x29, &[XmmRm, RegXmm]).wig(),
    VEX_Vmovaps_ymmm256_ymm => vx(T0F, 0x29, &[YmmRm, RegYmm]).l(1).wig(),
    VEX_Vmovapd_xmm_xmmm128 => vx(T0F, 0x28, &[RegXmm, XmmRm]).p66().wig(),
    VEX_Vmovapd_ymm_ymmm256 => vx(T0F, 0x28, &[RegYmm, YmmRm]).p66().l(1).wig(),
    VEX_Vmovapd_xmmm128_xmm => vx(T0F, 0x29, &[XmmRm, RegXmm]).p66().wig(),
    VEX_Vmovapd_ymmm256_ymm => vx(T0F, 0x29, &[YmmRm, RegYmm]).p66().l(1).wig(),
    VEX_Vmovss_xmm_xmm_xmm => vx(T0F, 0x10, &[RegXmm, VvvvXmm, RmRegXmm]).pf3().lig().wig(),
    VEX_Vmovss_xmm_m32 => vx(T0F, 0x10, &[RegXmm, Mem]).pf3().lig().wig(),
    VEX_Vmovss_xmm_xmm_xmm_0F11 => vx(T0F, 0x11, &[RmRegXmm, VvvvXmm, RegXmm]).pf3().lig().wig(),
    VEX_Vmovss_m32_xmm => vx(T0F, 0x11, &[Mem, RegXmm]).pf3().lig().wig(),
    VEX_Vmovsd_xmm_xmm_xmm => vx(T0F, 0x10, &[RegXmm, VvvvXmm, RmRegXmm]).pf2().lig().wig(),
    VEX_Vmovsd_xmm_m64 => vx(T0F, 0x10, &[RegXmm, Mem]).pf2().lig().wig(),
    VEX_Vmovsd_xmm_xmm_xmm_0F11 => vx(T0F, 0x11, &[RmRegXmm, VvvvXmm, RegXmm]).pf2().lig().wig(),
    VEX_Vmovsd_m64_xmm => vx(T0F, 0x11, &[Mem, RegXmm]).pf2().lig().wig(),
    VEX_Vaddps_xmm_xmm_xmmm128 => vx(T0F, 0x58, &[RegXmm, VvvvXmm, XmmRm]).wig(),
    VEX_Vaddps_ymm_ymm_ymmm256 => vx(T0F, 0x58, &[RegYmm, VvvvYmm, YmmRm]).l(1).wig(),
    VEX_Vaddpd_xmm_xmm_xmmm128 => vx(T0F, 0x58, &[RegXmm, VvvvXmm, XmmRm]).p66().wig(),
    VEX_Vaddpd_ymm_ymm_ymmm256 => vx(T0F, 0x58, &[RegYmm, VvvvYmm, YmmRm]).p66().l(1).wig(),
    VEX_Vaddss_xmm_xmm_xmmm32 => vx(T0F, 0x58, &[RegXmm, VvvvXmm, XmmRm]).pf3().lig().wig(),
    VEX_Vaddsd_xmm_xmm_xmmm64 => vx(T0F, 0x58, &[RegXmm, VvvvXmm, XmmRm]).pf2().lig().wig(),
    VEX_Vmulps_xmm_xmm_xmmm128 => vx(T0F, 0x59, &[RegXmm, VvvvXmm, XmmRm]).wig(),
    VEX_Vmulps_ymm_ymm_ymmm256 => vx(T0F, 0x59, &[RegYmm, VvvvYmm, YmmRm]).l(1).wig(),
    VEX_Vmulpd_xmm_xmm_xmmm128 => vx(T0F, 0x59, &[RegXmm, VvvvXmm, XmmRm]).p66().wig(),
    VEX_Vmulpd_ymm_ymm_ymmm256 => vx(T0F, 0x59, &[RegYmm, VvvvYmm, YmmRm]).p66().l(1).wig(),
    VEX_Vmulss_xmm_xmm_xmmm32 => vx(T0F, 0x59, &[RegXmm, VvvvXmm, XmmRm]).pf3().lig().wig(),
    VEX_Vmulsd_xmm_xmm_xmmm64 => vx(T0F, 0x59, &[RegXmm, VvvvXmm, XmmRm]).pf2().lig().wig(),
    VEX_Vsubps_xmm_xmm_xmmm128 => vx(T0F, 0x5C, &[RegXmm, VvvvXmm, XmmRm]).wig(),
    VEX_Vsubps_ymm_ymm_ymmm256 => vx(T0F, 0x5C, &[RegYmm, VvvvYmm, YmmRm]).l(1).wig(),
    VEX_Vsubpd_xmm_xmm_xmmm128 => vx(T0F, 0x5C, &[RegXmm, VvvvXmm, XmmRm]).p66().wig(),
    VEX_Vsubpd_ymm_ymm_ymmm256 => vx(T0F, 0x5C, &[RegYmm, VvvvYmm, YmmRm]).p66().l(1).wig(),
    VEX_Vsubss_xmm_xmm_xmmm32 => vx(T0F, 0x5C, &[RegXmm, VvvvXmm, XmmRm]).pf3().lig().wig(),
    VEX_Vsubsd_xmm_xmm_xmmm64 => vx(T0F, 0x5C, &[RegXmm, VvvvXmm, XmmRm]).pf2().lig().wig(),
    VEX_Vxorps_xmm_xmm_xmmm128 => vx(T0F, 0x57, &[RegXmm, VvvvXmm, XmmRm]).wig(),
    VEX_Vxorps_ymm_ymm_ymmm256 => vx(T0F, 0x57, &[RegYmm, VvvvYmm, YmmRm]).l(1).wig(),
    VEX_Vxorpd_xmm_xmm_xmmm128 => vx(T0F, 0x57, &[RegXmm, VvvvXmm, XmmRm]).p66().wig(),
    VEX_Vxorpd_ymm_ymm_ymmm256 => vx(T0F, 0x57, &[RegYmm, VvvvYmm, YmmRm]).p66().l(1).wig(),
    VEX_Vmovdqa_xmm_xmmm128 => vx(T0F, 0x6F, &[RegXmm, XmmRm]).p66().wig(),
    VEX_Vmovdqa_ymm_ymmm256 => vx(T0F, 0x6F, &[RegYmm, YmmRm]).p66().l(1).wig(),
    VEX_Vmovdqa_xmmm128_xmm => vx(T0F, 0x7F, &[XmmRm, RegXmm]).p66().wig(),
    VEX_Vmovdqa_ymmm256_ymm => vx(T0F, 0x7F, &[YmmRm, RegYmm]).p66().l(1).wig(),
    VEX_Vmovdqu_xmm_xmmm128 => vx(T0F, 0x6F, &[RegXmm, XmmRm]).pf3().wig(),
    VEX_Vmovdqu_ymm_ymmm256 => vx(T0F, 0x6F, &[RegYmm, YmmRm]).pf3().l(1).wig(),
    VEX_Vmovdqu_xmmm128_xmm => vx(T0F, 0x7F, &[XmmRm, RegXmm]).pf3().wig(),
    VEX_Vmovdqu_ymmm256_ymm => vx(T0F, 0x7F, &[YmmRm, RegYmm]).pf3().l(1).wig(),
    VEX_Vpxor_xmm_xmm_xmmm128 => vx(T0F, 0xEF, &[RegXmm, VvvvXmm, XmmRm]).p66().wig(),
    VEX_Vpxor_ymm_ymm_ymmm256 => vx(T0F, 0xEF, &[RegYmm, VvvvYmm, YmmRm]).p66().l(1).wig(),
    VEX_Vzeroupper => vx(T0F, 0x77, &[]).wig(),
    VEX_Vzeroall => vx(T0F, 0x77, &[]).l(1).wig(),
    VEX_Vbroadcastss_xmm_m32 => vx(T0F38, 0x18, &[RegXmm, Mem]).p66(),
    VEX_Vbroadcastss_ymm_m32 => vx(T0F38, 0x18, &[RegYmm, Mem]).p66().l(1),
    VEX_Andn_r32_r32_rm32 => vx(T0F38, 0xF2, &[Reg32, Vvvv32, Rm32]),
    VEX_Andn_r64_r64_rm64 => vx(T0F38, 0xF2, &[Reg64, Vvvv64, Rm64]).w1().only64(),
    VEX_Bextr_r32_rm32_r32 => vx(T0F38, 0xF7, &[Reg32, Rm32, Vvvv32]),
    VEX_Bextr_r64_rm64_r64 => vx(T0F38, 0xF7, &[Reg64, Rm64, Vvvv64]).w1().only64(),
    VEX_Shlx_r32_rm32_r32 => vx(T0F38, 0xF7, &[Reg32, Rm32, Vvvv32]).p66(),
    VEX_Shlx_r64_rm64_r64 => vx(T0F38, 0xF7, &[Reg64, Rm64, Vvvv64]).p66().w1().only64(),
    VEX_Sarx_r32_rm32_r32 => vx(T0F38, 0xF7, &[Reg32, Rm32, Vvvv32]).pf3(),
    VEX_Sarx_r64_rm64_r64 => vx(T0F38, 0xF7, &[Reg64, Rm64, Vvvv64]).pf3().w1().only64(),
    VEX_Shrx_r32_rm32_r32 => vx(T0F38, 0xF7, &[Reg32, Rm32, Vvvv32]).pf2(),
    VEX_Shrx_r64_rm64_r64 => vx(T0F38, 0xF7, &[Reg64, Rm64, Vvvv64]).pf2().w1().only64(),
    VEX_Bzhi_r32_rm32_r32 => vx(T0F38, 0xF5, &[Reg32, Rm32, Vvvv32]),
    VEX_Bzhi_r64_rm64_r64 => vx(T0F38, 0xF5, &[Reg64, Rm64, Vvvv64]).w1().only64(),
    VEX_Pdep_r32_r32_rm32 => vx(T0F38, 0xF5, &[Reg32, Vvvv32, Rm32]).pf2(),
    VEX_Pdep_r64_r64_rm64 => vx(T0F38, 0xF5, &[Reg64, Vvvv64, Rm64]).pf2().w1().only64(),
    VEX_Pext_r32_r32_rm32 => vx(T0F38, 0xF5, &[Reg32, Vvvv32, Rm32]).pf3(),
    VEX_Pext_r64_r64_rm64 => vx(T0F38, 0xF5, &[Reg64, Vvvv64, Rm64]).pf3().w1().only64(),
    VEX_Blsr_r32_rm32 => vx(T0F38, 0xF3, &[Vvvv32, Rm32]).g(1),
    VEX_Blsr_r64_rm64 => vx(T0F38, 0xF3, &[Vvvv64, Rm64]).g(1).w1().only64(),
    VEX_Blsmsk_r32_rm32 => vx(T0F38, 0xF3, &[Vvvv32, Rm32]).g(2),
    VEX_Blsmsk_r64_rm64 => vx(T0F38, 0xF3, &[Vvvv64, Rm64]).g(2).w1().only64(),
    VEX_Blsi_r32_rm32 => vx(T0F38, 0xF3, &[Vvvv32, Rm32]).g(3),
    VEX_Blsi_r64_rm64 => vx(T0F38, 0xF3, &[Vvvv64, Rm64]).g(3).w1().only64(),
    VEX_Rorx_r32_rm32_imm8 => vx(T0F3A, 0xF0, &[Reg32, Rm32, Imm8]).pf2(),
    VEX_Rorx_r64_rm64_imm8 => vx(T0F3A, 0xF0, &[Reg64, Rm64, Imm8]).pf2().w1().only64(),
    XOP_Blcfill_r32_rm32 => xp(Xop9, 0x01, &[Vvvv32, Rm32]).g(1),
    XOP_Blcfill_r64_rm64 => xp(Xop9, 0x01, &[Vvvv64, Rm64]).g(1).w1().only64(),
    XOP_Blsfill_r32_rm32 => xp(Xop9, 0x01, &[Vvvv32, Rm32]).g(2),
    XOP_Blsfill_r64_rm64 => xp(Xop9, 0x01, &[Vvvv64, Rm64]).g(2).w1().only64(),
    XOP_Blcs_r32_rm32 => xp(Xop9, 0x01, &[Vvvv32, Rm32]).g(3),
    XOP_Blcs_r64_rm64 => xp(Xop9, 0x01, &[Vvvv64, Rm64]).g(3).w1().only64(),
    XOP_Tzmsk_r32_rm32 => xp(Xop9, 0x01, &[Vvvv32, Rm32]).g(4),
    XOP_Tzmsk_r64_rm64 => xp(Xop9, 0x01, &[Vvvv64, Rm64]).g(4).w1().only64(),
    XOP_Blcic_r32_rm32 => xp(Xop9, 0x01, &[Vvvv32, Rm32]).g(5),
    XOP_Blcic_r64_rm64 => xp(Xop9, 0x01, &[Vvvv64, Rm64]).g(5).w1().only64(),
    XOP_Blsic_r32_rm32 => xp(Xop9, 0x01, &[Vvvv32, Rm32]).g(6),
    XOP_Blsic_r64_rm64 => xp(Xop9, 0x01, &[Vvvv64, Rm64]).g(6).w1().only64(),
    XOP_T1mskc_r32_rm32 => xp(Xop9, 0x01, &[Vvvv32, Rm32]).g(7),
    XOP_T1mskc_r64_rm64 => xp(Xop9, 0x01, &[Vvvv64, Rm64]).g(7).w1().only64(),
    XOP_Blcmsk_r32_rm32 => xp(Xop9, 0x02, &[Vvvv32, Rm32]).g(1),
    XOP_Blcmsk_r64_rm64 => xp(Xop9, 0x02, &[Vvvv64, Rm64]).g(1).w1().only64(),
    XOP_Blci_r32_rm32 => xp(Xop9, 0x02, &[Vvvv32, Rm32]).g(6),
    XOP_Blci_r64_rm64 => xp(Xop9, 0x02, &[Vvvv64, Rm64]).g(6).w1().only64(),
    XOP_Bextr_r32_rm32_imm32 => xp(XopA, 0x10, &[Reg32, Rm32, Imm32]),
    XOP_Bextr_r64_rm64_imm32 => xp(XopA, 0x10, &[Reg64, Rm64, Imm32]).w1().only64(),
    EVEX_Vmovups_xmm_k1z_xmmm128 => ev(T0F, 0x10, &[RegXmm, XmmRm]).l(0).full_mem(),
    EVEX_Vmovups_xmmm128_k1_xmm => ev(T0F, 0x11, &[XmmRm, RegXmm]).l(0).full_mem(),
    EVEX_Vmovups_ymm_k1z_ymmm256 => ev(T0F, 0x10, &[RegYmm, YmmRm]).l(1).full_mem(),
    EVEX_Vmovups_ymmm256_k1_ymm => ev(T0F, 0x11, &[YmmRm, RegYmm]).l(1).full_mem(),
    EVEX_Vmovups_zmm_k1z_zmmm512 => ev(T0F, 0x10, &[RegZmm, ZmmRm]).l(2).full_mem(),
    EVEX_Vmovups_zmmm512_k1_zmm => ev(T0F, 0x11, &[ZmmRm, RegZmm]).l(2).full_mem(),
    EVEX_Vmovupd_xmm_k1z_xmmm128 => ev(T0F, 0x10, &[RegXmm, XmmRm]).p66().l(0).w1().full_mem(),
    EVEX_Vmovupd_xmmm128_k1_xmm => ev(T0F, 0x11, &[XmmRm, RegXmm]).p66().l(0).w1().full_mem(),
    EVEX_Vmovupd_ymm_k1z_ymmm256 => ev(T0F, 0x10, &[RegYmm, YmmRm]).p66().l(1).w1().full_mem(),
    EVEX_Vmovupd_ymmm256_k1_ymm => ev(T0F, 0x11, &[YmmRm, RegYmm]).p66().l(1).w1().full_mem(),
    EVEX_Vmovupd_zmm_k1z_zmmm512 => ev(T0F, 0x10, &[RegZmm, ZmmRm]).p66().l(2).w1().full_mem(),
    EVEX_Vmovupd_zmmm512_k1_zmm => ev(T0F, 0x11, &[ZmmRm, RegZmm]).p66().l(2).w1().full_mem(),
    EVEX_Vaddps_xmm_k1z_xmm_xmmm128b32 => ev(T0F, 0x58, &[RegXmm, VvvvXmm, XmmRm]).l(0).full_bcst(),
    EVEX_Vaddps_ymm_k1z_ymm_ymmm256b32 => ev(T0F, 0x58, &[RegYmm, VvvvYmm, YmmRm]).l(1).full_bcst(),
    EVEX_Vaddps_zmm_k1z_zmm_zmmm512b32_er => ev(T0F, 0x58, &[RegZmm, VvvvZmm, ZmmRm]).l(2).full_bcst().er(),
    EVEX_Vaddpd_xmm_k1z_xmm_xmmm128b64 => ev(T0F, 0x58, &[RegXmm, VvvvXmm, XmmRm]).p66().l(0).w1().full_bcst(),
    EVEX_Vaddpd_ymm_k1z_ymm_ymmm256b64 => ev(T0F, 0x58, &[RegYmm, VvvvYmm, YmmRm]).p66().l(1).w1().full_bcst(),
    EVEX_Vaddpd_zmm_k1z_zmm_zmmm512b64_er => ev(T0F, 0x58, &[RegZmm, VvvvZmm, ZmmRm]).p66().l(2).w1().full_bcst().er(),
    EVEX_Vpxord_xmm_k1z_xmm_xmmm128b32 => ev(T0F, 0xEF, &[RegXmm, VvvvXmm, XmmRm]).p66().l(0).full_bcst(),
    EVEX_Vpxord_ymm_k1z_ymm_ymmm256b32 => ev(T0F, 0xEF, &[RegYmm, VvvvYmm, YmmRm]).p66().l(1).full_bcst(),
    EVEX_Vpxord_zmm_k1z_zmm_zmmm512b32 => ev(T0F, 0xEF, &[RegZmm, VvvvZmm, ZmmRm]).p66().l(2).full_bcst(),
    EVEX_Vpxorq_xmm_k1z_xmm_xmmm128b64 => ev(T0F, 0xEF, &[RegXmm, VvvvXmm, XmmRm]).p66().l(0).w1().full_bcst(),
    EVEX_Vpxorq_ymm_k1z_ymm_ymmm256b64 => ev(T0F, 0xEF, &[RegYmm, VvvvYmm, YmmRm]).p66().l(1).w1().full_bcst(),
    EVEX_Vpxorq_zmm_k1z_zmm_zmmm512b64 => ev(T0F, 0xEF, &[RegZmm, VvvvZmm, ZmmRm]).p66().l(2).w1().full_bcst(),
    EVEX_Vmovdqu32_xmm_k1z_xmmm128 => ev(T0F, 0x6F, &[RegXmm, XmmRm]).pf3().l(0).full_mem(),
    EVEX_Vmovdqu32_xmmm128_k1z_xmm => ev(T0F, 0x7F, &[XmmRm, RegXmm]).pf3().l(0).full_mem(),
    EVEX_Vmovdqu32_ymm_k1z_ymmm256 => ev(T0F, 0x6F, &[RegYmm, YmmRm]).pf3().l(1).full_mem(),
    EVEX_Vmovdqu32_ymmm256_k1z_ymm => ev(T0F, 0x7F, &[YmmRm, RegYmm]).pf3().l(1).full_mem(),
    EVEX_Vmovdqu32_zmm_k1z_zmmm512 => ev(T0F, 0x6F, &[RegZmm, ZmmRm]).pf3().l(2).full_mem(),
    EVEX_Vmovdqu32_zmmm512_k1z_zmm => ev(T0F, 0x7F, &[ZmmRm, RegZmm]).pf3().l(2).full_mem(),
    EVEX_Vmovdqu64_xmm_k1z_xmmm128 => ev(T0F, 0x6F, &[RegXmm, XmmRm]).pf3().l(0).w1().full_mem(),
    EVEX_Vmovdqu64_xmmm128_k1z_xmm => ev(T0F, 0x7F, &[XmmRm, RegXmm]).pf3().l(0).w1().full_mem(),
    EVEX_Vmovdqu64_ymm_k1z_ymmm256 => ev(T0F, 0x6F, &[RegYmm, YmmRm]).pf3().l(1).w1().full_mem(),
    EVEX_Vmovdqu64_ymmm256_k1z_ymm => ev(T0F, 0x7F, &[YmmRm, RegYmm]).pf3().l(1).w1().full_mem(),
    EVEX_Vmovdqu64_zmm_k1z_zmmm512 => ev(T0F, 0x6F, &[RegZmm, ZmmRm]).pf3().l(2).w1().full_mem(),
    EVEX_Vmovdqu64_zmmm512_k1z_zmm => ev(T0F, 0x7F, &[ZmmRm, RegZmm]).pf3().l(2).w1().full_mem(),
}

/// Short `Jcc` with a 16-bit target, by condition code.
pub(crate) const JCC_SHORT_16: [Code; 16] = [
    Code::Jo_rel8_16, Code::Jno_rel8_16, Code::Jb_rel8_16, Code::Jae_rel8_16,
    Code::Je_rel8_16, Code::Jne_rel8_16, Code::Jbe_rel8_16, Code::Ja_rel8_16,
    Code::Js_rel8_16, Code::Jns_rel8_16, Code::Jp_rel8_16, Code::Jnp_rel8_16,
    Code::Jl_rel8_16, Code::Jge_rel8_16, Code::Jle_rel8_16, Code::Jg_rel8_16,
];
/// Short `Jcc` with a 32-bit target, by condition code.
pub(crate) const JCC_SHORT_32: [Code; 16] = [
    Code::Jo_rel8_32, Code::Jno_rel8_32, Code::Jb_rel8_32, Code::Jae_rel8_32,
    Code::Je_rel8_32, Code::Jne_rel8_32, Code::Jbe_rel8_32, Code::Ja_rel8_32,
    Code::Js_rel8_32, Code::Jns_rel8_32, Code::Jp_rel8_32, Code::Jnp_rel8_32,
    Code::Jl_rel8_32, Code::Jge_rel8_32, Code::Jle_rel8_32, Code::Jg_rel8_32,
];
/// Short `Jcc` with a 64-bit target, by condition code.
pub(crate) const JCC_SHORT_64: [Code; 16] = [
    Code::Jo_rel8_64, Code::Jno_rel8_64, Code::Jb_rel8_64, Code::Jae_rel8_64,
    Code::Je_rel8_64, Code::Jne_rel8_64, Code::Jbe_rel8_64, Code::Ja_rel8_64,
    Code::Js_rel8_64, Code::Jns_rel8_64, Code::Jp_rel8_64, Code::Jnp_rel8_64,
    Code::Jl_rel8_64, Code::Jge_rel8_64, Code::Jle_rel8_64, Code::Jg_rel8_64,
];
/// Near `Jcc` with a 16-bit target, by condition code.
pub(crate) const JCC_NEAR_16: [Code; 16] = [
    Code::Jo_rel16, Code::Jno_rel16, Code::Jb_rel16, Code::Jae_rel16,
    Code::Je_rel16, Code::Jne_rel16, Code::Jbe_rel16, Code::Ja_rel16,
    Code::Js_rel16, Code::Jns_rel16, Code::Jp_rel16, Code::Jnp_rel16,
    Code::Jl_rel16, Code::Jge_rel16, Code::Jle_rel16, Code::Jg_rel16,
];
/// Near `Jcc` with a 32-bit target, by condition code.
pub(crate) const JCC_NEAR_32: [Code; 16] = [
    Code::Jo_rel32_32, Code::Jno_rel32_32, Code::Jb_rel32_32, Code::Jae_rel32_32,
    Code::Je_rel32_32, Code::Jne_rel32_32, Code::Jbe_rel32_32, Code::Ja_rel32_32,
    Code::Js_rel32_32, Code::Jns_rel32_32, Code::Jp_rel32_32, Code::Jnp_rel32_32,
    Code::Jl_rel32_32, Code::Jge_rel32_32, Code::Jle_rel32_32, Code::Jg_rel32_32,
];
/// Near `Jcc` with a 64-bit target, by condition code.
pub(crate) const JCC_NEAR_64: [Code; 16] = [
    Code::Jo_rel32_64, Code::Jno_rel32_64, Code::Jb_rel32_64, Code::Jae_rel32_64,
    Code::Je_rel32_64, Code::Jne_rel32_64, Code::Jbe_rel32_64, Code::Ja_rel32_64,
    Code::Js_rel32_64, Code::Jns_rel32_64, Code::Jp_rel32_64, Code::Jnp_rel32_64,
    Code::Jl_rel32_64, Code::Jge_rel32_64, Code::Jle_rel32_64, Code::Jg_rel32_64,
];
/// `SETcc r/m8`, by condition code.
pub(crate) const SETCC: [Code; 16] = [
    Code::Seto_rm8, Code::Setno_rm8, Code::Setb_rm8, Code::Setae_rm8,
    Code::Sete_rm8, Code::Setne_rm8, Code::Setbe_rm8, Code::Seta_rm8,
    Code::Sets_rm8, Code::Setns_rm8, Code::Setp_rm8, Code::Setnp_rm8,
    Code::Setl_rm8, Code::Setge_rm8, Code::Setle_rm8, Code::Setg_rm8,
];
/// `CMOVcc r16, r/m16`, by condition code.
pub(crate) const CMOVCC_16: [Code; 16] = [
    Code::Cmovo_r16_rm16, Code::Cmovno_r16_rm16, Code::Cmovb_r16_rm16, Code::Cmovae_r16_rm16,
    Code::Cmove_r16_rm16, Code::Cmovne_r16_rm16, Code::Cmovbe_r16_rm16, Code::Cmova_r16_rm16,
    Code::Cmovs_r16_rm16, Code::Cmovns_r16_rm16, Code::Cmovp_r16_rm16, Code::Cmovnp_r16_rm16,
    Code::Cmovl_r16_rm16, Code::Cmovge_r16_rm16, Code::Cmovle_r16_rm16, Code::Cmovg_r16_rm16,
];
/// `CMOVcc r32, r/m32`, by condition code.
pub(crate) const CMOVCC_32: [Code; 16] = [
    Code::Cmovo_r32_rm32, Code::Cmovno_r32_rm32, Code::Cmovb_r32_rm32, Code::Cmovae_r32_rm32,
    Code::Cmove_r32_rm32, Code::Cmovne_r32_rm32, Code::Cmovbe_r32_rm32, Code::Cmova_r32_rm32,
    Code::Cmovs_r32_rm32, Code::Cmovns_r32_rm32, Code::Cmovp_r32_rm32, Code::Cmovnp_r32_rm32,
    Code::Cmovl_r32_rm32, Code::Cmovge_r32_rm32, Code::Cmovle_r32_rm32, Code::Cmovg_r32_rm32,
];
/// `CMOVcc r64, r/m64`, by condition code.
pub(crate) const CMOVCC_64: [Code; 16] = [
    Code::Cmovo_r64_rm64, Code::Cmovno_r64_rm64, Code::Cmovb_r64_rm64, Code::Cmovae_r64_rm64,
    Code::Cmove_r64_rm64, Code::Cmovne_r64_rm64, Code::Cmovbe_r64_rm64, Code::Cmova_r64_rm64,
    Code::Cmovs_r64_rm64, Code::Cmovns_r64_rm64, Code::Cmovp_r64_rm64, Code::Cmovnp_r64_rm64,
    Code::Cmovl_r64_rm64, Code::Cmovge_r64_rm64, Code::Cmovle_r64_rm64, Code::Cmovg_r64_rm64,
];

impl Code {
    /// Encoding descriptor of this code.
    #[must_use]
    pub fn op_code(self) -> &'static OpCodeInfo {
        &OP_CODE_INFOS[self as usize]
    }

    /// Name of the variant, e.g. `"Add_rm32_r32"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Width in bits of the target of a near branch code (16, 32 or 64).
    fn branch_width(self) -> Option<u32> {
        match self.op_code().ops.first()? {
            Br16_1 | Br16_2 | Xbegin2 => Some(16),
            Br32_1 | Br32_4 => Some(32),
            Br64_1 | Br64_4 => Some(64),
            Xbegin4 => Some(32),
            _ => None,
        }
    }

    /// Condition code (`0` = `o` .. `15` = `g`) of a short or near `Jcc`.
    #[must_use]
    pub fn condition_code(self) -> Option<u8> {
        let info = self.op_code();
        let base = match info.table {
            OpCodeTable::Normal => 0x70,
            T0F => 0x80,
            _ => return None,
        };
        let is_branch = info.ops.first().is_some_and(|op| op.is_near_branch());
        (is_branch && (base..base + 16).contains(&info.op_code)).then(|| info.op_code - base)
    }

    /// `true` for `Jcc rel8`.
    #[must_use]
    pub fn is_jcc_short(self) -> bool {
        self.condition_code().is_some() && self.op_code().table == OpCodeTable::Normal
    }

    /// `true` for `Jcc rel16/rel32`.
    #[must_use]
    pub fn is_jcc_near(self) -> bool {
        self.condition_code().is_some() && self.op_code().table == T0F
    }

    /// `true` for `JMP rel8`.
    #[must_use]
    pub fn is_jmp_short(self) -> bool {
        matches!(self, Code::Jmp_rel8_16 | Code::Jmp_rel8_32 | Code::Jmp_rel8_64)
    }

    /// `true` for `JMP rel16/rel32`.
    #[must_use]
    pub fn is_jmp_near(self) -> bool {
        matches!(self, Code::Jmp_rel16 | Code::Jmp_rel32_32 | Code::Jmp_rel32_64)
    }

    /// `true` for `CALL rel16/rel32`.
    #[must_use]
    pub fn is_call_near(self) -> bool {
        matches!(self, Code::Call_rel16 | Code::Call_rel32_32 | Code::Call_rel32_64)
    }

    /// `true` for `LOOP`, `LOOPE`, `LOOPNE` and `JCXZ`/`JECXZ`/`JRCXZ`.
    #[must_use]
    pub fn is_loop_or_jrcxz(self) -> bool {
        let info = self.op_code();
        info.table == OpCodeTable::Normal
            && (0xE0..=0xE3).contains(&info.op_code)
            && info.encoding == crate::instruction::opcode::EncodingKind::Legacy
    }

    /// `true` for `XBEGIN`.
    #[must_use]
    pub fn is_xbegin(self) -> bool {
        matches!(self, Code::Xbegin_rel16 | Code::Xbegin_rel32)
    }

    /// The `rel8` form of a `JMP` or `Jcc`, or `self` for any other code.
    #[must_use]
    pub fn to_short_branch(self) -> Code {
        match self {
            Code::Jmp_rel16 => Code::Jmp_rel8_16,
            Code::Jmp_rel32_32 => Code::Jmp_rel8_32,
            Code::Jmp_rel32_64 => Code::Jmp_rel8_64,
            _ => match (self.condition_code(), self.branch_width()) {
                (Some(cc), Some(16)) => JCC_SHORT_16[cc as usize],
                (Some(cc), Some(32)) => JCC_SHORT_32[cc as usize],
                (Some(cc), Some(64)) => JCC_SHORT_64[cc as usize],
                _ => self,
            },
        }
    }

    /// The `rel16/rel32` form of a `JMP` or `Jcc`, or `self` for any other code.
    #[must_use]
    pub fn to_near_branch(self) -> Code {
        match self {
            Code::Jmp_rel8_16 => Code::Jmp_rel16,
            Code::Jmp_rel8_32 => Code::Jmp_rel32_32,
            Code::Jmp_rel8_64 => Code::Jmp_rel32_64,
            _ => match (self.condition_code(), self.branch_width()) {
                (Some(cc), Some(16)) => JCC_NEAR_16[cc as usize],
                (Some(cc), Some(32)) => JCC_NEAR_32[cc as usize],
                (Some(cc), Some(64)) => JCC_NEAR_64[cc as usize],
                _ => self,
            },
        }
    }

    /// The `Jcc` testing the opposite condition (`je` <-> `jne`), or `self`.
    #[must_use]
    pub fn negate_condition_code(self) -> Code {
        let Some(cc) = self.condition_code() else {
            return self;
        };
        let negated = (cc ^ 1) as usize;
        let short = self.is_jcc_short();
        match (short, self.branch_width()) {
            (true, Some(16)) => JCC_SHORT_16[negated],
            (true, Some(32)) => JCC_SHORT_32[negated],
            (true, Some(64)) => JCC_SHORT_64[negated],
            (false, Some(16)) => JCC_NEAR_16[negated],
            (false, Some(32)) => JCC_NEAR_32[negated],
            (false, Some(64)) => JCC_NEAR_64[negated],
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_table_is_indexed_by_code() {
        assert_eq!(Code::INVALID.op_code(), &OpCodeInfo::INVALID);
        assert_eq!(Code::Add_rm8_r8.op_code().op_code, 0x00);
        assert_eq!(Code::Mov_r64_imm64.op_code().op_code, 0xB8);
        assert_eq!(Code::Cpuid.op_code().op_code, 0xA2);
        assert_eq!(Code::Cpuid.op_code().table, T0F);
        assert_eq!(Code::EVEX_Vpxorq_zmm_k1z_zmm_zmmm512b64.op_code().vector_length, 2);
    }

    #[test]
    fn test_every_valid_code_is_valid_somewhere() {
        for code in Code::iter().skip(1) {
            let info = code.op_code();
            assert!(
                info.is_valid_in(16) || info.is_valid_in(32) || info.is_valid_in(64),
                "{code:?} is valid in no mode"
            );
        }
    }

    #[test]
    fn test_jcc_tables_follow_condition_order() {
        for (cc, code) in JCC_SHORT_64.iter().enumerate() {
            assert_eq!(code.condition_code(), Some(cc as u8));
            assert_eq!(code.op_code().op_code, 0x70 + cc as u8);
        }
        for (cc, code) in JCC_NEAR_32.iter().enumerate() {
            assert_eq!(code.condition_code(), Some(cc as u8));
            assert_eq!(code.op_code().op_code, 0x80 + cc as u8);
        }
        for (cc, code) in SETCC.iter().enumerate() {
            assert_eq!(code.op_code().op_code, 0x90 + cc as u8);
        }
        for (cc, code) in CMOVCC_64.iter().enumerate() {
            assert_eq!(code.op_code().op_code, 0x40 + cc as u8);
            assert_eq!(CMOVCC_16[cc].op_code().op_code, CMOVCC_32[cc].op_code().op_code);
        }
    }

    #[test]
    fn test_branch_conversions() {
        assert_eq!(Code::Je_rel8_64.to_near_branch(), Code::Je_rel32_64);
        assert_eq!(Code::Je_rel32_64.to_short_branch(), Code::Je_rel8_64);
        assert_eq!(Code::Jne_rel16.to_short_branch(), Code::Jne_rel8_16);
        assert_eq!(Code::Jmp_rel8_32.to_near_branch(), Code::Jmp_rel32_32);
        assert_eq!(Code::Je_rel8_32.negate_condition_code(), Code::Jne_rel8_32);
        assert_eq!(Code::Jg_rel32_64.negate_condition_code(), Code::Jle_rel32_64);
        assert_eq!(Code::Nopd.to_short_branch(), Code::Nopd);
        assert_eq!(Code::Call_rel32_64.negate_condition_code(), Code::Call_rel32_64);
    }

    #[test]
    fn test_branch_classification() {
        assert!(Code::Jb_rel8_16.is_jcc_short());
        assert!(!Code::Jb_rel8_16.is_jcc_near());
        assert!(Code::Jb_rel32_64.is_jcc_near());
        assert!(Code::Loopne_rel8_64_RCX.is_loop_or_jrcxz());
        assert!(Code::Jrcxz_rel8_64.is_loop_or_jrcxz());
        assert!(!Code::In_AL_imm8.is_loop_or_jrcxz());
        assert!(Code::Call_rel16.is_call_near());
        assert!(Code::Xbegin_rel32.is_xbegin());
        assert_eq!(Code::Seto_rm8.condition_code(), None);
    }
}
