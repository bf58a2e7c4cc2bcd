//! Opcode dispatch tables.
//!
//! Each map is a `[Handler; 256]` indexed by opcode byte. The tables are built on first use and
//! shared by every decoder for the lifetime of the process.

use std::sync::OnceLock;

use crate::{
    decoder::{
        handler::{Handler, LoopCodes, SizeRule, Sizes},
        DecoderOptions,
    },
    instruction::{
        Code as C, CMOVCC_16, CMOVCC_32, CMOVCC_64, JCC_NEAR_16, JCC_NEAR_32, JCC_NEAR_64,
        JCC_SHORT_16, JCC_SHORT_32, JCC_SHORT_64, SETCC,
    },
};

/// All opcode maps.
pub(crate) struct Tables {
    pub legacy: [Handler; 256],
    pub map0f: [Handler; 256],
    pub map0f38: [Handler; 256],
    pub map0f3a: [Handler; 256],
    /// VEX maps `0F`, `0F38`, `0F3A`
    pub vex: [[Handler; 256]; 3],
    /// EVEX maps `0F`, `0F38`, `0F3A`
    pub evex: [[Handler; 256]; 3],
    /// XOP maps 8, 9, 10
    pub xop: [[Handler; 256]; 3],
}

static TABLES: OnceLock<Tables> = OnceLock::new();

/// The shared tables, built on first call.
pub(crate) fn get() -> &'static Tables {
    TABLES.get_or_init(|| Tables {
        legacy: legacy(),
        map0f: map0f(),
        map0f38: map0f38(),
        map0f3a: map0f3a(),
        vex: [vex0f(), vex0f38(), vex0f3a()],
        evex: [evex0f(), empty(), empty()],
        xop: [empty(), xop9(), xop_a()],
    })
}

fn empty() -> [Handler; 256] {
    std::array::from_fn(|_| Handler::Invalid)
}

const X: fn() -> Handler = || Handler::Invalid;

fn s(code: C) -> Handler {
    Handler::Simple(code)
}

fn m(code: C) -> Handler {
    Handler::ModRm(code)
}

fn sz(c16: C, c32: C, c64: C) -> Handler {
    Handler::Sized(Sizes::new(c16, c32, c64), SizeRule::Normal)
}

fn sz_d64(c16: C, c32: C, c64: C) -> Handler {
    Handler::Sized(Sizes::new(c16, c32, c64), SizeRule::Default64)
}

fn sz_f64(c16: C, c32: C, c64: C) -> Handler {
    Handler::Sized(Sizes::new(c16, c32, c64), SizeRule::Force64)
}

fn msz(c16: C, c32: C, c64: C) -> Handler {
    Handler::ModRmSized(Sizes::new(c16, c32, c64), SizeRule::Normal)
}

fn msz_d64(c16: C, c32: C, c64: C) -> Handler {
    Handler::ModRmSized(Sizes::new(c16, c32, c64), SizeRule::Default64)
}

fn msz_f64(c16: C, c32: C, c64: C) -> Handler {
    Handler::ModRmSized(Sizes::new(c16, c32, c64), SizeRule::Force64)
}

fn group(handlers: [Handler; 8]) -> Handler {
    Handler::Group(Box::new(handlers))
}

fn rm_group(handlers: [Handler; 8]) -> Handler {
    Handler::RmGroup(Box::new(handlers))
}

fn reg_mem(reg: Handler, mem: Handler) -> Handler {
    Handler::RegMem {
        reg: Box::new(reg),
        mem: Box::new(mem),
    }
}

fn mp(none: Handler, p66: Handler, f3: Handler, f2: Handler) -> Handler {
    Handler::MandatoryPrefix(Box::new([none, p66, f3, f2]))
}

fn rep(none: Handler, f3: Handler, f2: Handler) -> Handler {
    Handler::RepSelect {
        none: Box::new(none),
        f3: Box::new(f3),
        f2: Box::new(f2),
    }
}

fn bits(legacy: Handler, long: Handler) -> Handler {
    Handler::Bitness {
        legacy: Box::new(legacy),
        long: Box::new(long),
    }
}

fn option(default: Handler, alt: Handler, option: DecoderOptions) -> Handler {
    Handler::Options {
        default: Box::new(default),
        alt: Box::new(alt),
        option,
    }
}

/// `W` selects the 64-bit form; ignored outside 64-bit mode.
fn w(w0: Handler, w1: Handler) -> Handler {
    Handler::W {
        w0: Box::new(w0),
        w1: Box::new(w1),
        ignore_outside_64: true,
    }
}

/// `W` selects the element size in every mode.
fn w_all(w0: Handler, w1: Handler) -> Handler {
    Handler::W {
        w0: Box::new(w0),
        w1: Box::new(w1),
        ignore_outside_64: false,
    }
}

fn v(code: C) -> Handler {
    Handler::Vector(code)
}

/// Vector GPR instruction with a 64-bit `W1` form.
fn vw(c32: C, c64: C) -> Handler {
    w(v(c32), v(c64))
}

fn vl2(l128: C, l256: C) -> Handler {
    Handler::VectorLength(Box::new([v(l128), v(l256), X(), X()]))
}

fn vl3(l128: C, l256: C, l512: C) -> Handler {
    Handler::VectorLength(Box::new([v(l128), v(l256), v(l512), X()]))
}

fn loops(cx: [C; 2], ecx: [C; 3], rcx: [C; 2]) -> Handler {
    Handler::Loop(LoopCodes { cx, ecx, rcx })
}

/// The eight `op r/m, r` .. `op rAX, imm` forms of an ALU family starting at `base`.
fn alu(t: &mut [Handler; 256], base: usize, c: [C; 12]) {
    t[base] = m(c[0]);
    t[base + 1] = msz(c[1], c[2], c[3]);
    t[base + 2] = m(c[4]);
    t[base + 3] = msz(c[5], c[6], c[7]);
    t[base + 4] = s(c[8]);
    t[base + 5] = sz(c[9], c[10], c[11]);
}

fn for_reg(t: &mut [Handler; 256], base: usize, make: impl Fn() -> Handler) {
    for op in base..base + 8 {
        t[op] = make();
    }
}

#[rustfmt::skip]
fn legacy() -> [Handler; 256] {
    let mut t = empty();
    alu(&mut t, 0x00, [C::Add_rm8_r8, C::Add_rm16_r16, C::Add_rm32_r32, C::Add_rm64_r64, C::Add_r8_rm8, C::Add_r16_rm16, C::Add_r32_rm32, C::Add_r64_rm64, C::Add_AL_imm8, C::Add_AX_imm16, C::Add_EAX_imm32, C::Add_RAX_imm32]);
    alu(&mut t, 0x08, [C::Or_rm8_r8, C::Or_rm16_r16, C::Or_rm32_r32, C::Or_rm64_r64, C::Or_r8_rm8, C::Or_r16_rm16, C::Or_r32_rm32, C::Or_r64_rm64, C::Or_AL_imm8, C::Or_AX_imm16, C::Or_EAX_imm32, C::Or_RAX_imm32]);
    alu(&mut t, 0x10, [C::Adc_rm8_r8, C::Adc_rm16_r16, C::Adc_rm32_r32, C::Adc_rm64_r64, C::Adc_r8_rm8, C::Adc_r16_rm16, C::Adc_r32_rm32, C::Adc_r64_rm64, C::Adc_AL_imm8, C::Adc_AX_imm16, C::Adc_EAX_imm32, C::Adc_RAX_imm32]);
    alu(&mut t, 0x18, [C::Sbb_rm8_r8, C::Sbb_rm16_r16, C::Sbb_rm32_r32, C::Sbb_rm64_r64, C::Sbb_r8_rm8, C::Sbb_r16_rm16, C::Sbb_r32_rm32, C::Sbb_r64_rm64, C::Sbb_AL_imm8, C::Sbb_AX_imm16, C::Sbb_EAX_imm32, C::Sbb_RAX_imm32]);
    alu(&mut t, 0x20, [C::And_rm8_r8, C::And_rm16_r16, C::And_rm32_r32, C::And_rm64_r64, C::And_r8_rm8, C::And_r16_rm16, C::And_r32_rm32, C::And_r64_rm64, C::And_AL_imm8, C::And_AX_imm16, C::And_EAX_imm32, C::And_RAX_imm32]);
    alu(&mut t, 0x28, [C::Sub_rm8_r8, C::Sub_rm16_r16, C::Sub_rm32_r32, C::Sub_rm64_r64, C::Sub_r8_rm8, C::Sub_r16_rm16, C::Sub_r32_rm32, C::Sub_r64_rm64, C::Sub_AL_imm8, C::Sub_AX_imm16, C::Sub_EAX_imm32, C::Sub_RAX_imm32]);
    alu(&mut t, 0x30, [C::Xor_rm8_r8, C::Xor_rm16_r16, C::Xor_rm32_r32, C::Xor_rm64_r64, C::Xor_r8_rm8, C::Xor_r16_rm16, C::Xor_r32_rm32, C::Xor_r64_rm64, C::Xor_AL_imm8, C::Xor_AX_imm16, C::Xor_EAX_imm32, C::Xor_RAX_imm32]);
    alu(&mut t, 0x38, [C::Cmp_rm8_r8, C::Cmp_rm16_r16, C::Cmp_rm32_r32, C::Cmp_rm64_r64, C::Cmp_r8_rm8, C::Cmp_r16_rm16, C::Cmp_r32_rm32, C::Cmp_r64_rm64, C::Cmp_AL_imm8, C::Cmp_AX_imm16, C::Cmp_EAX_imm32, C::Cmp_RAX_imm32]);

    t[0x06] = sz(C::Pushw_ES, C::Pushd_ES, C::Pushd_ES);
    t[0x07] = sz(C::Popw_ES, C::Popd_ES, C::Popd_ES);
    t[0x0E] = sz(C::Pushw_CS, C::Pushd_CS, C::Pushd_CS);
    t[0x0F] = Handler::Escape0F;
    t[0x16] = sz(C::Pushw_SS, C::Pushd_SS, C::Pushd_SS);
    t[0x17] = sz(C::Popw_SS, C::Popd_SS, C::Popd_SS);
    t[0x1E] = sz(C::Pushw_DS, C::Pushd_DS, C::Pushd_DS);
    t[0x1F] = sz(C::Popw_DS, C::Popd_DS, C::Popd_DS);
    t[0x27] = s(C::Daa);
    t[0x2F] = s(C::Das);
    t[0x37] = s(C::Aaa);
    t[0x3F] = s(C::Aas);

    // REX in 64-bit mode, so only reached outside it
    for_reg(&mut t, 0x40, || sz(C::Inc_r16, C::Inc_r32, C::Inc_r32));
    for_reg(&mut t, 0x48, || sz(C::Dec_r16, C::Dec_r32, C::Dec_r32));
    for_reg(&mut t, 0x50, || sz_d64(C::Push_r16, C::Push_r32, C::Push_r64));
    for_reg(&mut t, 0x58, || sz_d64(C::Pop_r16, C::Pop_r32, C::Pop_r64));

    t[0x60] = sz(C::Pushaw, C::Pushad, C::Pushad);
    t[0x61] = sz(C::Popaw, C::Popad, C::Popad);
    t[0x62] = Handler::Evex(Box::new(msz(C::Bound_r16_m1616, C::Bound_r32_m3232, C::Bound_r32_m3232)));
    t[0x63] = bits(m(C::Arpl_rm16_r16), msz(C::Movsxd_r16_rm16, C::Movsxd_r32_rm32, C::Movsxd_r64_rm32));
    t[0x68] = sz_d64(C::Push_imm16, C::Pushd_imm32, C::Pushq_imm32);
    t[0x69] = msz(C::Imul_r16_rm16_imm16, C::Imul_r32_rm32_imm32, C::Imul_r64_rm64_imm32);
    t[0x6A] = sz_d64(C::Pushw_imm8, C::Pushd_imm8, C::Pushq_imm8);
    t[0x6B] = msz(C::Imul_r16_rm16_imm8, C::Imul_r32_rm32_imm8, C::Imul_r64_rm64_imm8);
    t[0x6C] = s(C::Insb_m8_DX);
    t[0x6D] = sz(C::Insw_m16_DX, C::Insd_m32_DX, C::Insd_m32_DX);
    t[0x6E] = s(C::Outsb_DX_m8);
    t[0x6F] = sz(C::Outsw_DX_m16, C::Outsd_DX_m32, C::Outsd_DX_m32);
    for cc in 0..16 {
        t[0x70 + cc] = sz_f64(JCC_SHORT_16[cc], JCC_SHORT_32[cc], JCC_SHORT_64[cc]);
    }

    t[0x80] = group([m(C::Add_rm8_imm8), m(C::Or_rm8_imm8), m(C::Adc_rm8_imm8), m(C::Sbb_rm8_imm8), m(C::And_rm8_imm8), m(C::Sub_rm8_imm8), m(C::Xor_rm8_imm8), m(C::Cmp_rm8_imm8)]);
    t[0x81] = group([
        msz(C::Add_rm16_imm16, C::Add_rm32_imm32, C::Add_rm64_imm32),
        msz(C::Or_rm16_imm16, C::Or_rm32_imm32, C::Or_rm64_imm32),
        msz(C::Adc_rm16_imm16, C::Adc_rm32_imm32, C::Adc_rm64_imm32),
        msz(C::Sbb_rm16_imm16, C::Sbb_rm32_imm32, C::Sbb_rm64_imm32),
        msz(C::And_rm16_imm16, C::And_rm32_imm32, C::And_rm64_imm32),
        msz(C::Sub_rm16_imm16, C::Sub_rm32_imm32, C::Sub_rm64_imm32),
        msz(C::Xor_rm16_imm16, C::Xor_rm32_imm32, C::Xor_rm64_imm32),
        msz(C::Cmp_rm16_imm16, C::Cmp_rm32_imm32, C::Cmp_rm64_imm32),
    ]);
    t[0x82] = group([m(C::Add_rm8_imm8_82), m(C::Or_rm8_imm8_82), m(C::Adc_rm8_imm8_82), m(C::Sbb_rm8_imm8_82), m(C::And_rm8_imm8_82), m(C::Sub_rm8_imm8_82), m(C::Xor_rm8_imm8_82), m(C::Cmp_rm8_imm8_82)]);
    t[0x83] = group([
        msz(C::Add_rm16_imm8, C::Add_rm32_imm8, C::Add_rm64_imm8),
        msz(C::Or_rm16_imm8, C::Or_rm32_imm8, C::Or_rm64_imm8),
        msz(C::Adc_rm16_imm8, C::Adc_rm32_imm8, C::Adc_rm64_imm8),
        msz(C::Sbb_rm16_imm8, C::Sbb_rm32_imm8, C::Sbb_rm64_imm8),
        msz(C::And_rm16_imm8, C::And_rm32_imm8, C::And_rm64_imm8),
        msz(C::Sub_rm16_imm8, C::Sub_rm32_imm8, C::Sub_rm64_imm8),
        msz(C::Xor_rm16_imm8, C::Xor_rm32_imm8, C::Xor_rm64_imm8),
        msz(C::Cmp_rm16_imm8, C::Cmp_rm32_imm8, C::Cmp_rm64_imm8),
    ]);
    t[0x84] = m(C::Test_rm8_r8);
    t[0x85] = msz(C::Test_rm16_r16, C::Test_rm32_r32, C::Test_rm64_r64);
    t[0x86] = m(C::Xchg_rm8_r8);
    t[0x87] = msz(C::Xchg_rm16_r16, C::Xchg_rm32_r32, C::Xchg_rm64_r64);
    t[0x88] = m(C::Mov_rm8_r8);
    t[0x89] = msz(C::Mov_rm16_r16, C::Mov_rm32_r32, C::Mov_rm64_r64);
    t[0x8A] = m(C::Mov_r8_rm8);
    t[0x8B] = msz(C::Mov_r16_rm16, C::Mov_r32_rm32, C::Mov_r64_rm64);
    t[0x8C] = msz(C::Mov_rm16_Sreg, C::Mov_r32m16_Sreg, C::Mov_r64m16_Sreg);
    t[0x8D] = msz(C::Lea_r16_m, C::Lea_r32_m, C::Lea_r64_m);
    t[0x8E] = msz(C::Mov_Sreg_rm16, C::Mov_Sreg_r32m16, C::Mov_Sreg_r64m16);
    t[0x8F] = Handler::Xop(Box::new(group([msz_d64(C::Pop_rm16, C::Pop_rm32, C::Pop_rm64), X(), X(), X(), X(), X(), X(), X()])));

    t[0x90] = Handler::Nop90;
    for op in 0x91..0x98 {
        t[op] = sz(C::Xchg_r16_AX, C::Xchg_r32_EAX, C::Xchg_r64_RAX);
    }
    t[0x98] = sz(C::Cbw, C::Cwde, C::Cdqe);
    t[0x99] = sz(C::Cwd, C::Cdq, C::Cqo);
    t[0x9A] = sz(C::Call_ptr1616, C::Call_ptr1632, C::Call_ptr1632);
    t[0x9B] = s(C::Wait);
    t[0x9C] = sz_d64(C::Pushfw, C::Pushfd, C::Pushfq);
    t[0x9D] = sz_d64(C::Popfw, C::Popfd, C::Popfq);
    t[0x9E] = s(C::Sahf);
    t[0x9F] = s(C::Lahf);

    t[0xA0] = s(C::Mov_AL_moffs8);
    t[0xA1] = sz(C::Mov_AX_moffs16, C::Mov_EAX_moffs32, C::Mov_RAX_moffs64);
    t[0xA2] = s(C::Mov_moffs8_AL);
    t[0xA3] = sz(C::Mov_moffs16_AX, C::Mov_moffs32_EAX, C::Mov_moffs64_RAX);
    t[0xA4] = s(C::Movsb_m8_m8);
    t[0xA5] = sz(C::Movsw_m16_m16, C::Movsd_m32_m32, C::Movsq_m64_m64);
    t[0xA6] = s(C::Cmpsb_m8_m8);
    t[0xA7] = sz(C::Cmpsw_m16_m16, C::Cmpsd_m32_m32, C::Cmpsq_m64_m64);
    t[0xA8] = s(C::Test_AL_imm8);
    t[0xA9] = sz(C::Test_AX_imm16, C::Test_EAX_imm32, C::Test_RAX_imm32);
    t[0xAA] = s(C::Stosb_m8_AL);
    t[0xAB] = sz(C::Stosw_m16_AX, C::Stosd_m32_EAX, C::Stosq_m64_RAX);
    t[0xAC] = s(C::Lodsb_AL_m8);
    t[0xAD] = sz(C::Lodsw_AX_m16, C::Lodsd_EAX_m32, C::Lodsq_RAX_m64);
    t[0xAE] = s(C::Scasb_AL_m8);
    t[0xAF] = sz(C::Scasw_AX_m16, C::Scasd_EAX_m32, C::Scasq_RAX_m64);
    for_reg(&mut t, 0xB0, || s(C::Mov_r8_imm8));
    for_reg(&mut t, 0xB8, || sz(C::Mov_r16_imm16, C::Mov_r32_imm32, C::Mov_r64_imm64));

    t[0xC0] = group([m(C::Rol_rm8_imm8), m(C::Ror_rm8_imm8), m(C::Rcl_rm8_imm8), m(C::Rcr_rm8_imm8), m(C::Shl_rm8_imm8), m(C::Shr_rm8_imm8), m(C::Sal_rm8_imm8), m(C::Sar_rm8_imm8)]);
    t[0xC1] = group([
        msz(C::Rol_rm16_imm8, C::Rol_rm32_imm8, C::Rol_rm64_imm8),
        msz(C::Ror_rm16_imm8, C::Ror_rm32_imm8, C::Ror_rm64_imm8),
        msz(C::Rcl_rm16_imm8, C::Rcl_rm32_imm8, C::Rcl_rm64_imm8),
        msz(C::Rcr_rm16_imm8, C::Rcr_rm32_imm8, C::Rcr_rm64_imm8),
        msz(C::Shl_rm16_imm8, C::Shl_rm32_imm8, C::Shl_rm64_imm8),
        msz(C::Shr_rm16_imm8, C::Shr_rm32_imm8, C::Shr_rm64_imm8),
        msz(C::Sal_rm16_imm8, C::Sal_rm32_imm8, C::Sal_rm64_imm8),
        msz(C::Sar_rm16_imm8, C::Sar_rm32_imm8, C::Sar_rm64_imm8),
    ]);
    t[0xC2] = sz_f64(C::Retnw_imm16, C::Retnd_imm16, C::Retnq_imm16);
    t[0xC3] = sz_f64(C::Retnw, C::Retnd, C::Retnq);
    t[0xC4] = Handler::Vex3(Box::new(msz(C::Les_r16_m1616, C::Les_r32_m1632, C::Les_r32_m1632)));
    t[0xC5] = Handler::Vex2(Box::new(msz(C::Lds_r16_m1616, C::Lds_r32_m1632, C::Lds_r32_m1632)));
    t[0xC6] = group([m(C::Mov_rm8_imm8), X(), X(), X(), X(), X(), X(),
        reg_mem(rm_group([m(C::Xabort_imm8), X(), X(), X(), X(), X(), X(), X()]), X())]);
    t[0xC7] = group([msz(C::Mov_rm16_imm16, C::Mov_rm32_imm32, C::Mov_rm64_imm32), X(), X(), X(), X(), X(), X(),
        reg_mem(rm_group([msz(C::Xbegin_rel16, C::Xbegin_rel32, C::Xbegin_rel32), X(), X(), X(), X(), X(), X(), X()]), X())]);
    t[0xC8] = sz_d64(C::Enterw_imm16_imm8, C::Enterd_imm16_imm8, C::Enterq_imm16_imm8);
    t[0xC9] = sz_d64(C::Leavew, C::Leaved, C::Leaveq);
    t[0xCA] = sz(C::Retfw_imm16, C::Retfd_imm16, C::Retfq_imm16);
    t[0xCB] = sz(C::Retfw, C::Retfd, C::Retfq);
    t[0xCC] = s(C::Int3);
    t[0xCD] = s(C::Int_imm8);
    t[0xCE] = s(C::Into);
    t[0xCF] = sz(C::Iretw, C::Iretd, C::Iretq);

    t[0xD0] = group([m(C::Rol_rm8_1), m(C::Ror_rm8_1), m(C::Rcl_rm8_1), m(C::Rcr_rm8_1), m(C::Shl_rm8_1), m(C::Shr_rm8_1), m(C::Sal_rm8_1), m(C::Sar_rm8_1)]);
    t[0xD1] = group([
        msz(C::Rol_rm16_1, C::Rol_rm32_1, C::Rol_rm64_1),
        msz(C::Ror_rm16_1, C::Ror_rm32_1, C::Ror_rm64_1),
        msz(C::Rcl_rm16_1, C::Rcl_rm32_1, C::Rcl_rm64_1),
        msz(C::Rcr_rm16_1, C::Rcr_rm32_1, C::Rcr_rm64_1),
        msz(C::Shl_rm16_1, C::Shl_rm32_1, C::Shl_rm64_1),
        msz(C::Shr_rm16_1, C::Shr_rm32_1, C::Shr_rm64_1),
        msz(C::Sal_rm16_1, C::Sal_rm32_1, C::Sal_rm64_1),
        msz(C::Sar_rm16_1, C::Sar_rm32_1, C::Sar_rm64_1),
    ]);
    t[0xD2] = group([m(C::Rol_rm8_CL), m(C::Ror_rm8_CL), m(C::Rcl_rm8_CL), m(C::Rcr_rm8_CL), m(C::Shl_rm8_CL), m(C::Shr_rm8_CL), m(C::Sal_rm8_CL), m(C::Sar_rm8_CL)]);
    t[0xD3] = group([
        msz(C::Rol_rm16_CL, C::Rol_rm32_CL, C::Rol_rm64_CL),
        msz(C::Ror_rm16_CL, C::Ror_rm32_CL, C::Ror_rm64_CL),
        msz(C::Rcl_rm16_CL, C::Rcl_rm32_CL, C::Rcl_rm64_CL),
        msz(C::Rcr_rm16_CL, C::Rcr_rm32_CL, C::Rcr_rm64_CL),
        msz(C::Shl_rm16_CL, C::Shl_rm32_CL, C::Shl_rm64_CL),
        msz(C::Shr_rm16_CL, C::Shr_rm32_CL, C::Shr_rm64_CL),
        msz(C::Sal_rm16_CL, C::Sal_rm32_CL, C::Sal_rm64_CL),
        msz(C::Sar_rm16_CL, C::Sar_rm32_CL, C::Sar_rm64_CL),
    ]);
    t[0xD4] = s(C::Aam_imm8);
    t[0xD5] = s(C::Aad_imm8);
    t[0xD6] = s(C::Salc);
    t[0xD7] = s(C::Xlat_m8);
    fpu(&mut t);

    t[0xE0] = loops([C::Loopne_rel8_16_CX, C::Loopne_rel8_32_CX], [C::Loopne_rel8_16_ECX, C::Loopne_rel8_32_ECX, C::Loopne_rel8_64_ECX], [C::Loopne_rel8_16_RCX, C::Loopne_rel8_64_RCX]);
    t[0xE1] = loops([C::Loope_rel8_16_CX, C::Loope_rel8_32_CX], [C::Loope_rel8_16_ECX, C::Loope_rel8_32_ECX, C::Loope_rel8_64_ECX], [C::Loope_rel8_16_RCX, C::Loope_rel8_64_RCX]);
    t[0xE2] = loops([C::Loop_rel8_16_CX, C::Loop_rel8_32_CX], [C::Loop_rel8_16_ECX, C::Loop_rel8_32_ECX, C::Loop_rel8_64_ECX], [C::Loop_rel8_16_RCX, C::Loop_rel8_64_RCX]);
    t[0xE3] = loops([C::Jcxz_rel8_16, C::Jcxz_rel8_32], [C::Jecxz_rel8_16, C::Jecxz_rel8_32, C::Jecxz_rel8_64], [C::Jrcxz_rel8_16, C::Jrcxz_rel8_64]);
    t[0xE4] = s(C::In_AL_imm8);
    t[0xE5] = sz(C::In_AX_imm8, C::In_EAX_imm8, C::In_EAX_imm8);
    t[0xE6] = s(C::Out_imm8_AL);
    t[0xE7] = sz(C::Out_imm8_AX, C::Out_imm8_EAX, C::Out_imm8_EAX);
    t[0xE8] = sz_f64(C::Call_rel16, C::Call_rel32_32, C::Call_rel32_64);
    t[0xE9] = sz_f64(C::Jmp_rel16, C::Jmp_rel32_32, C::Jmp_rel32_64);
    t[0xEA] = sz(C::Jmp_ptr1616, C::Jmp_ptr1632, C::Jmp_ptr1632);
    t[0xEB] = sz_f64(C::Jmp_rel8_16, C::Jmp_rel8_32, C::Jmp_rel8_64);
    t[0xEC] = s(C::In_AL_DX);
    t[0xED] = sz(C::In_AX_DX, C::In_EAX_DX, C::In_EAX_DX);
    t[0xEE] = s(C::Out_DX_AL);
    t[0xEF] = sz(C::Out_DX_AX, C::Out_DX_EAX, C::Out_DX_EAX);

    t[0xF1] = s(C::Int1);
    t[0xF4] = s(C::Hlt);
    t[0xF5] = s(C::Cmc);
    t[0xF6] = group([m(C::Test_rm8_imm8), m(C::Test_rm8_imm8_F6r1), m(C::Not_rm8), m(C::Neg_rm8), m(C::Mul_rm8), m(C::Imul_rm8), m(C::Div_rm8), m(C::Idiv_rm8)]);
    t[0xF7] = group([
        msz(C::Test_rm16_imm16, C::Test_rm32_imm32, C::Test_rm64_imm32),
        msz(C::Test_rm16_imm16_F7r1, C::Test_rm32_imm32_F7r1, C::Test_rm64_imm32_F7r1),
        msz(C::Not_rm16, C::Not_rm32, C::Not_rm64),
        msz(C::Neg_rm16, C::Neg_rm32, C::Neg_rm64),
        msz(C::Mul_rm16, C::Mul_rm32, C::Mul_rm64),
        msz(C::Imul_rm16, C::Imul_rm32, C::Imul_rm64),
        msz(C::Div_rm16, C::Div_rm32, C::Div_rm64),
        msz(C::Idiv_rm16, C::Idiv_rm32, C::Idiv_rm64),
    ]);
    t[0xF8] = s(C::Clc);
    t[0xF9] = s(C::Stc);
    t[0xFA] = s(C::Cli);
    t[0xFB] = s(C::Sti);
    t[0xFC] = s(C::Cld);
    t[0xFD] = s(C::Std);
    t[0xFE] = group([m(C::Inc_rm8), m(C::Dec_rm8), X(), X(), X(), X(), X(), X()]);
    t[0xFF] = group([
        msz(C::Inc_rm16, C::Inc_rm32, C::Inc_rm64),
        msz(C::Dec_rm16, C::Dec_rm32, C::Dec_rm64),
        msz_f64(C::Call_rm16, C::Call_rm32, C::Call_rm64),
        msz(C::Call_m1616, C::Call_m1632, C::Call_m1664),
        msz_f64(C::Jmp_rm16, C::Jmp_rm32, C::Jmp_rm64),
        msz(C::Jmp_m1616, C::Jmp_m1632, C::Jmp_m1664),
        msz_d64(C::Push_rm16, C::Push_rm32, C::Push_rm64),
        X(),
    ]);
    t
}

/// `D8`..`DF`: memory forms by ModRM.reg, register forms by ModRM.reg and sometimes ModRM.rm.
#[rustfmt::skip]
fn fpu(t: &mut [Handler; 256]) {
    let env = |c16, c32| msz(c16, c32, c32);

    t[0xD8] = reg_mem(
        group([m(C::Fadd_st0_sti), m(C::Fmul_st0_sti), m(C::Fcom_st0_sti), m(C::Fcomp_st0_sti), m(C::Fsub_st0_sti), m(C::Fsubr_st0_sti), m(C::Fdiv_st0_sti), m(C::Fdivr_st0_sti)]),
        group([m(C::Fadd_m32fp), m(C::Fmul_m32fp), m(C::Fcom_m32fp), m(C::Fcomp_m32fp), m(C::Fsub_m32fp), m(C::Fsubr_m32fp), m(C::Fdiv_m32fp), m(C::Fdivr_m32fp)]),
    );
    t[0xD9] = reg_mem(
        group([
            m(C::Fld_st0_sti),
            m(C::Fxch_st0_sti),
            rm_group([m(C::Fnop), X(), X(), X(), X(), X(), X(), X()]),
            m(C::Fstpnce_sti),
            rm_group([m(C::Fchs), m(C::Fabs), X(), X(), m(C::Ftst), m(C::Fxam), X(), X()]),
            rm_group([m(C::Fld1), m(C::Fldl2t), m(C::Fldl2e), m(C::Fldpi), m(C::Fldlg2), m(C::Fldln2), m(C::Fldz), X()]),
            rm_group([m(C::F2xm1), m(C::Fyl2x), m(C::Fptan), m(C::Fpatan), m(C::Fxtract), m(C::Fprem1), m(C::Fdecstp), m(C::Fincstp)]),
            rm_group([m(C::Fprem), m(C::Fyl2xp1), m(C::Fsqrt), m(C::Fsincos), m(C::Frndint), m(C::Fscale), m(C::Fsin), m(C::Fcos)]),
        ]),
        group([m(C::Fld_m32fp), X(), m(C::Fst_m32fp), m(C::Fstp_m32fp), env(C::Fldenv_m14byte, C::Fldenv_m28byte), m(C::Fldcw_m16), env(C::Fnstenv_m14byte, C::Fnstenv_m28byte), m(C::Fnstcw_m16)]),
    );
    t[0xDA] = reg_mem(
        group([m(C::Fcmovb_st0_sti), m(C::Fcmove_st0_sti), m(C::Fcmovbe_st0_sti), m(C::Fcmovu_st0_sti), X(),
            rm_group([X(), m(C::Fucompp), X(), X(), X(), X(), X(), X()]), X(), X()]),
        group([m(C::Fiadd_m32int), m(C::Fimul_m32int), m(C::Ficom_m32int), m(C::Ficomp_m32int), m(C::Fisub_m32int), m(C::Fisubr_m32int), m(C::Fidiv_m32int), m(C::Fidivr_m32int)]),
    );
    t[0xDB] = reg_mem(
        group([
            m(C::Fcmovnb_st0_sti),
            m(C::Fcmovne_st0_sti),
            m(C::Fcmovnbe_st0_sti),
            m(C::Fcmovnu_st0_sti),
            rm_group([m(C::Fneni), m(C::Fndisi), m(C::Fnclex), m(C::Fninit), m(C::Fnsetpm), option(X(), m(C::Frstpm), DecoderOptions::OLD_FPU), X(), X()]),
            m(C::Fucomi_st0_sti),
            m(C::Fcomi_st0_sti),
            X(),
        ]),
        group([m(C::Fild_m32int), m(C::Fisttp_m32int), m(C::Fist_m32int), m(C::Fistp_m32int), X(), m(C::Fld_m80fp), X(), m(C::Fstp_m80fp)]),
    );
    t[0xDC] = reg_mem(
        group([m(C::Fadd_sti_st0), m(C::Fmul_sti_st0), m(C::Fcom_st0_sti_DCD0), m(C::Fcomp_st0_sti_DCD8), m(C::Fsubr_sti_st0), m(C::Fsub_sti_st0), m(C::Fdivr_sti_st0), m(C::Fdiv_sti_st0)]),
        group([m(C::Fadd_m64fp), m(C::Fmul_m64fp), m(C::Fcom_m64fp), m(C::Fcomp_m64fp), m(C::Fsub_m64fp), m(C::Fsubr_m64fp), m(C::Fdiv_m64fp), m(C::Fdivr_m64fp)]),
    );
    t[0xDD] = reg_mem(
        group([m(C::Ffree_sti), m(C::Fxch_st0_sti_DDC8), m(C::Fst_sti), m(C::Fstp_sti), m(C::Fucom_st0_sti), m(C::Fucomp_st0_sti), X(), X()]),
        group([m(C::Fld_m64fp), m(C::Fisttp_m64fp), m(C::Fst_m64fp), m(C::Fstp_m64fp), env(C::Frstor_m94byte, C::Frstor_m108byte), X(), env(C::Fnsave_m94byte, C::Fnsave_m108byte), m(C::Fnstsw_m16)]),
    );
    t[0xDE] = reg_mem(
        group([m(C::Faddp_sti_st0), m(C::Fmulp_sti_st0), m(C::Fcomp_st0_sti_DED0),
            rm_group([X(), m(C::Fcompp), X(), X(), X(), X(), X(), X()]),
            m(C::Fsubrp_sti_st0), m(C::Fsubp_sti_st0), m(C::Fdivrp_sti_st0), m(C::Fdivp_sti_st0)]),
        group([m(C::Fiadd_m16int), m(C::Fimul_m16int), m(C::Ficom_m16int), m(C::Ficomp_m16int), m(C::Fisub_m16int), m(C::Fisubr_m16int), m(C::Fidiv_m16int), m(C::Fidivr_m16int)]),
    );
    t[0xDF] = reg_mem(
        group([
            m(C::Ffreep_sti),
            m(C::Fxch_st0_sti_DFC8),
            m(C::Fstp_sti_DFD0),
            m(C::Fstp_sti_DFD8),
            rm_group([
                m(C::Fnstsw_AX),
                option(X(), m(C::Fstdw_AX), DecoderOptions::OLD_FPU),
                option(X(), m(C::Fstsg_AX), DecoderOptions::OLD_FPU),
                X(), X(), X(), X(), X(),
            ]),
            m(C::Fucomip_st0_sti),
            m(C::Fcomip_st0_sti),
            X(),
        ]),
        group([m(C::Fild_m16int), m(C::Fisttp_m16int), m(C::Fist_m16int), m(C::Fistp_m16int), m(C::Fbld_m80bcd), m(C::Fild_m64int), m(C::Fbstp_m80bcd), m(C::Fistp_m64int)]),
    );
}

/// `SGDT`-style descriptor table access: 64-bit only form in long mode.
fn dtr(c16: C, c32: C, c64: C) -> Handler {
    bits(msz(c16, c32, c32), m(c64))
}

#[rustfmt::skip]
fn map0f() -> [Handler; 256] {
    let mut t = empty();
    t[0x00] = group([
        msz(C::Sldt_rm16, C::Sldt_r32m16, C::Sldt_r64m16),
        msz(C::Str_rm16, C::Str_r32m16, C::Str_r64m16),
        m(C::Lldt_rm16), m(C::Ltr_rm16), m(C::Verr_rm16), m(C::Verw_rm16), X(), X(),
    ]);
    t[0x01] = reg_mem(
        group([
            rm_group([X(), m(C::Vmcall), m(C::Vmlaunch), m(C::Vmresume), m(C::Vmxoff), X(), X(), X()]),
            rm_group([m(C::Monitorw), m(C::Mwait), m(C::Clac), m(C::Stac), X(), X(), X(), X()]),
            rm_group([m(C::Xgetbv), m(C::Xsetbv), X(), X(), X(), m(C::Xend), m(C::Xtest), X()]),
            X(),
            msz(C::Smsw_rm16, C::Smsw_r32m16, C::Smsw_r64m16),
            X(),
            m(C::Lmsw_rm16),
            rm_group([m(C::Swapgs), m(C::Rdtscp), X(), X(), X(), X(), X(), X()]),
        ]),
        group([
            dtr(C::Sgdt_m1632_16, C::Sgdt_m1632, C::Sgdt_m1664),
            dtr(C::Sidt_m1632_16, C::Sidt_m1632, C::Sidt_m1664),
            dtr(C::Lgdt_m1632_16, C::Lgdt_m1632, C::Lgdt_m1664),
            dtr(C::Lidt_m1632_16, C::Lidt_m1632, C::Lidt_m1664),
            msz(C::Smsw_rm16, C::Smsw_r32m16, C::Smsw_r64m16),
            X(),
            m(C::Lmsw_rm16),
            m(C::Invlpg_m),
        ]),
    );
    t[0x02] = msz(C::Lar_r16_rm16, C::Lar_r32_r32m16, C::Lar_r64_r64m16);
    t[0x03] = msz(C::Lsl_r16_rm16, C::Lsl_r32_r32m16, C::Lsl_r64_r64m16);
    t[0x05] = s(C::Syscall);
    t[0x06] = s(C::Clts);
    t[0x07] = sz(C::Sysretd, C::Sysretd, C::Sysretq);
    t[0x08] = s(C::Invd);
    t[0x09] = Handler::RepAlt { default: C::Wbinvd, alt: C::Wbnoinvd, disable: DecoderOptions::NO_WBNOINVD };
    t[0x0B] = s(C::Ud2);
    t[0x0D] = group([X(), m(C::Prefetchw_m8), X(), X(), X(), X(), X(), X()]);
    t[0x10] = mp(m(C::Movups_xmm_xmmm128), m(C::Movupd_xmm_xmmm128), m(C::Movss_xmm_xmmm32), m(C::Movsd_xmm_xmmm64));
    t[0x11] = mp(m(C::Movups_xmmm128_xmm), m(C::Movupd_xmmm128_xmm), m(C::Movss_xmmm32_xmm), m(C::Movsd_xmmm64_xmm));
    t[0x18] = group([m(C::Prefetchnta_m8), m(C::Prefetcht0_m8), m(C::Prefetcht1_m8), m(C::Prefetcht2_m8), X(), X(), X(), X()]);
    t[0x1A] = mp(m(C::Bndldx_bnd_mib),
        bits(m(C::Bndmov_bnd_bndm64), m(C::Bndmov_bnd_bndm128)),
        bits(m(C::Bndcl_bnd_rm32), m(C::Bndcl_bnd_rm64)),
        bits(m(C::Bndcu_bnd_rm32), m(C::Bndcu_bnd_rm64)));
    t[0x1B] = mp(m(C::Bndstx_mib_bnd),
        bits(m(C::Bndmov_bndm64_bnd), m(C::Bndmov_bndm128_bnd)),
        bits(m(C::Bndmk_bnd_m32), m(C::Bndmk_bnd_m64)),
        bits(m(C::Bndcn_bnd_rm32), m(C::Bndcn_bnd_rm64)));
    t[0x1F] = group([msz(C::Nop_rm16, C::Nop_rm32, C::Nop_rm64), X(), X(), X(), X(), X(), X(), X()]);
    t[0x20] = Handler::MovCrDr { c32: C::Mov_r32_cr, c64: C::Mov_r64_cr };
    t[0x21] = Handler::MovCrDr { c32: C::Mov_r32_dr, c64: C::Mov_r64_dr };
    t[0x22] = Handler::MovCrDr { c32: C::Mov_cr_r32, c64: C::Mov_cr_r64 };
    t[0x23] = Handler::MovCrDr { c32: C::Mov_dr_r32, c64: C::Mov_dr_r64 };
    t[0x28] = mp(m(C::Movaps_xmm_xmmm128), m(C::Movapd_xmm_xmmm128), X(), X());
    t[0x29] = mp(m(C::Movaps_xmmm128_xmm), m(C::Movapd_xmmm128_xmm), X(), X());
    t[0x2A] = mp(X(), X(),
        w(m(C::Cvtsi2ss_xmm_rm32), m(C::Cvtsi2ss_xmm_rm64)),
        w(m(C::Cvtsi2sd_xmm_rm32), m(C::Cvtsi2sd_xmm_rm64)));
    t[0x2C] = mp(X(), X(),
        w(m(C::Cvttss2si_r32_xmmm32), m(C::Cvttss2si_r64_xmmm32)),
        w(m(C::Cvttsd2si_r32_xmmm64), m(C::Cvttsd2si_r64_xmmm64)));
    t[0x2E] = mp(m(C::Ucomiss_xmm_xmmm32), m(C::Ucomisd_xmm_xmmm64), X(), X());
    t[0x2F] = mp(m(C::Comiss_xmm_xmmm32), m(C::Comisd_xmm_xmmm64), X(), X());
    t[0x30] = s(C::Wrmsr);
    t[0x31] = s(C::Rdtsc);
    t[0x32] = s(C::Rdmsr);
    t[0x33] = s(C::Rdpmc);
    t[0x34] = s(C::Sysenter);
    t[0x35] = sz(C::Sysexitd, C::Sysexitd, C::Sysexitq);
    t[0x38] = Handler::Escape38;
    t[0x3A] = Handler::Escape3A;
    for cc in 0..16 {
        t[0x40 + cc] = msz(CMOVCC_16[cc], CMOVCC_32[cc], CMOVCC_64[cc]);
    }
    t[0x51] = mp(m(C::Sqrtps_xmm_xmmm128), m(C::Sqrtpd_xmm_xmmm128), m(C::Sqrtss_xmm_xmmm32), m(C::Sqrtsd_xmm_xmmm64));
    t[0x54] = mp(m(C::Andps_xmm_xmmm128), m(C::Andpd_xmm_xmmm128), X(), X());
    t[0x57] = mp(m(C::Xorps_xmm_xmmm128), m(C::Xorpd_xmm_xmmm128), X(), X());
    t[0x58] = mp(m(C::Addps_xmm_xmmm128), m(C::Addpd_xmm_xmmm128), m(C::Addss_xmm_xmmm32), m(C::Addsd_xmm_xmmm64));
    t[0x59] = mp(m(C::Mulps_xmm_xmmm128), m(C::Mulpd_xmm_xmmm128), m(C::Mulss_xmm_xmmm32), m(C::Mulsd_xmm_xmmm64));
    t[0x5C] = mp(m(C::Subps_xmm_xmmm128), m(C::Subpd_xmm_xmmm128), m(C::Subss_xmm_xmmm32), m(C::Subsd_xmm_xmmm64));
    t[0x5E] = mp(m(C::Divps_xmm_xmmm128), m(C::Divpd_xmm_xmmm128), m(C::Divss_xmm_xmmm32), m(C::Divsd_xmm_xmmm64));
    t[0x6E] = mp(w(m(C::Movd_mm_rm32), m(C::Movq_mm_rm64)), w(m(C::Movd_xmm_rm32), m(C::Movq_xmm_rm64)), X(), X());
    t[0x6F] = mp(m(C::Movq_mm_mmm64), m(C::Movdqa_xmm_xmmm128), m(C::Movdqu_xmm_xmmm128), X());
    t[0x7E] = mp(w(m(C::Movd_rm32_mm), m(C::Movq_rm64_mm)), w(m(C::Movd_rm32_xmm), m(C::Movq_rm64_xmm)), m(C::Movq_xmm_xmmm64), X());
    t[0x7F] = mp(m(C::Movq_mmm64_mm), m(C::Movdqa_xmmm128_xmm), m(C::Movdqu_xmmm128_xmm), X());
    for cc in 0..16 {
        t[0x80 + cc] = sz_f64(JCC_NEAR_16[cc], JCC_NEAR_32[cc], JCC_NEAR_64[cc]);
        t[0x90 + cc] = m(SETCC[cc]);
    }
    t[0xA0] = sz_d64(C::Pushw_FS, C::Pushd_FS, C::Pushq_FS);
    t[0xA1] = sz_d64(C::Popw_FS, C::Popd_FS, C::Popq_FS);
    t[0xA2] = s(C::Cpuid);
    t[0xA3] = msz(C::Bt_rm16_r16, C::Bt_rm32_r32, C::Bt_rm64_r64);
    t[0xA4] = msz(C::Shld_rm16_r16_imm8, C::Shld_rm32_r32_imm8, C::Shld_rm64_r64_imm8);
    t[0xA5] = msz(C::Shld_rm16_r16_CL, C::Shld_rm32_r32_CL, C::Shld_rm64_r64_CL);
    t[0xA6] = option(
        option(X(), m(C::Cmpxchg486_rm8_r8), DecoderOptions::CMPXCHG486A),
        msz(C::Xbts_r16_rm16, C::Xbts_r32_rm32, C::Xbts_r32_rm32),
        DecoderOptions::XBTS,
    );
    t[0xA7] = option(
        option(X(), msz(C::Cmpxchg486_rm16_r16, C::Cmpxchg486_rm32_r32, C::Cmpxchg486_rm32_r32), DecoderOptions::CMPXCHG486A),
        msz(C::Ibts_rm16_r16, C::Ibts_rm32_r32, C::Ibts_rm32_r32),
        DecoderOptions::XBTS,
    );
    t[0xA8] = sz_d64(C::Pushw_GS, C::Pushd_GS, C::Pushq_GS);
    t[0xA9] = sz_d64(C::Popw_GS, C::Popd_GS, C::Popq_GS);
    t[0xAA] = s(C::Rsm);
    t[0xAB] = msz(C::Bts_rm16_r16, C::Bts_rm32_r32, C::Bts_rm64_r64);
    t[0xAC] = msz(C::Shrd_rm16_r16_imm8, C::Shrd_rm32_r32_imm8, C::Shrd_rm64_r64_imm8);
    t[0xAD] = msz(C::Shrd_rm16_r16_CL, C::Shrd_rm32_r32_CL, C::Shrd_rm64_r64_CL);
    t[0xAE] = reg_mem(
        group([X(), X(), X(), X(), X(),
            rm_group([m(C::Lfence), X(), X(), X(), X(), X(), X(), X()]),
            rm_group([m(C::Mfence), X(), X(), X(), X(), X(), X(), X()]),
            rm_group([m(C::Sfence), X(), X(), X(), X(), X(), X(), X()])]),
        group([m(C::Fxsave_m512byte), m(C::Fxrstor_m512byte), m(C::Ldmxcsr_m32), m(C::Stmxcsr_m32), m(C::Xsave_mem), m(C::Xrstor_mem), X(), m(C::Clflush_m8)]),
    );
    t[0xAF] = msz(C::Imul_r16_rm16, C::Imul_r32_rm32, C::Imul_r64_rm64);
    t[0xB0] = m(C::Cmpxchg_rm8_r8);
    t[0xB1] = msz(C::Cmpxchg_rm16_r16, C::Cmpxchg_rm32_r32, C::Cmpxchg_rm64_r64);
    t[0xB2] = msz(C::Lss_r16_m1616, C::Lss_r32_m1632, C::Lss_r64_m1664);
    t[0xB3] = msz(C::Btr_rm16_r16, C::Btr_rm32_r32, C::Btr_rm64_r64);
    t[0xB4] = msz(C::Lfs_r16_m1616, C::Lfs_r32_m1632, C::Lfs_r64_m1664);
    t[0xB5] = msz(C::Lgs_r16_m1616, C::Lgs_r32_m1632, C::Lgs_r64_m1664);
    t[0xB6] = msz(C::Movzx_r16_rm8, C::Movzx_r32_rm8, C::Movzx_r64_rm8);
    t[0xB7] = msz(C::Movzx_r16_rm16, C::Movzx_r32_rm16, C::Movzx_r64_rm16);
    t[0xB8] = rep(X(), msz(C::Popcnt_r16_rm16, C::Popcnt_r32_rm32, C::Popcnt_r64_rm64), X());
    t[0xB9] = msz(C::Ud1_r16_rm16, C::Ud1_r32_rm32, C::Ud1_r64_rm64);
    t[0xBA] = group([X(), X(), X(), X(),
        msz(C::Bt_rm16_imm8, C::Bt_rm32_imm8, C::Bt_rm64_imm8),
        msz(C::Bts_rm16_imm8, C::Bts_rm32_imm8, C::Bts_rm64_imm8),
        msz(C::Btr_rm16_imm8, C::Btr_rm32_imm8, C::Btr_rm64_imm8),
        msz(C::Btc_rm16_imm8, C::Btc_rm32_imm8, C::Btc_rm64_imm8)]);
    t[0xBB] = msz(C::Btc_rm16_r16, C::Btc_rm32_r32, C::Btc_rm64_r64);
    t[0xBC] = rep(
        msz(C::Bsf_r16_rm16, C::Bsf_r32_rm32, C::Bsf_r64_rm64),
        msz(C::Tzcnt_r16_rm16, C::Tzcnt_r32_rm32, C::Tzcnt_r64_rm64),
        msz(C::Bsf_r16_rm16, C::Bsf_r32_rm32, C::Bsf_r64_rm64),
    );
    t[0xBD] = rep(
        msz(C::Bsr_r16_rm16, C::Bsr_r32_rm32, C::Bsr_r64_rm64),
        msz(C::Lzcnt_r16_rm16, C::Lzcnt_r32_rm32, C::Lzcnt_r64_rm64),
        msz(C::Bsr_r16_rm16, C::Bsr_r32_rm32, C::Bsr_r64_rm64),
    );
    t[0xBE] = msz(C::Movsx_r16_rm8, C::Movsx_r32_rm8, C::Movsx_r64_rm8);
    t[0xBF] = msz(C::Movsx_r16_rm16, C::Movsx_r32_rm16, C::Movsx_r64_rm16);
    t[0xC0] = m(C::Xadd_rm8_r8);
    t[0xC1] = msz(C::Xadd_rm16_r16, C::Xadd_rm32_r32, C::Xadd_rm64_r64);
    t[0xC7] = reg_mem(
        group([X(), X(), X(), X(), X(), X(),
            msz(C::Rdrand_r16, C::Rdrand_r32, C::Rdrand_r64),
            msz(C::Rdseed_r16, C::Rdseed_r32, C::Rdseed_r64)]),
        group([X(), w(m(C::Cmpxchg8b_m64), m(C::Cmpxchg16b_m128)), X(), X(), X(), X(), X(), X()]),
    );
    for_reg(&mut t, 0xC8, || sz(C::INVALID, C::Bswap_r32, C::Bswap_r64));
    t[0xD6] = mp(X(), m(C::Movq_xmmm64_xmm), X(), X());
    t[0xEF] = mp(m(C::Pxor_mm_mmm64), m(C::Pxor_xmm_xmmm128), X(), X());
    t[0xFF] = msz(C::Ud0_r16_rm16, C::Ud0_r32_rm32, C::Ud0_r64_rm64);
    t
}

#[rustfmt::skip]
fn map0f38() -> [Handler; 256] {
    let mut t = empty();
    t[0x00] = mp(m(C::Pshufb_mm_mmm64), m(C::Pshufb_xmm_xmmm128), X(), X());
    t[0xF0] = rep(
        msz(C::Movbe_r16_m16, C::Movbe_r32_m32, C::Movbe_r64_m64),
        X(),
        w(m(C::Crc32_r32_rm8), m(C::Crc32_r64_rm8)),
    );
    t[0xF1] = rep(
        msz(C::Movbe_m16_r16, C::Movbe_m32_r32, C::Movbe_m64_r64),
        X(),
        msz(C::Crc32_r32_rm16, C::Crc32_r32_rm32, C::Crc32_r64_rm64),
    );
    t
}

fn map0f3a() -> [Handler; 256] {
    let mut t = empty();
    t[0x0F] = mp(
        m(C::Palignr_mm_mmm64_imm8),
        m(C::Palignr_xmm_xmmm128_imm8),
        X(),
        X(),
    );
    t
}

#[rustfmt::skip]
fn vex0f() -> [Handler; 256] {
    let mut t = empty();
    t[0x10] = mp(
        vl2(C::VEX_Vmovups_xmm_xmmm128, C::VEX_Vmovups_ymm_ymmm256),
        vl2(C::VEX_Vmovupd_xmm_xmmm128, C::VEX_Vmovupd_ymm_ymmm256),
        reg_mem(v(C::VEX_Vmovss_xmm_xmm_xmm), v(C::VEX_Vmovss_xmm_m32)),
        reg_mem(v(C::VEX_Vmovsd_xmm_xmm_xmm), v(C::VEX_Vmovsd_xmm_m64)),
    );
    t[0x11] = mp(
        vl2(C::VEX_Vmovups_xmmm128_xmm, C::VEX_Vmovups_ymmm256_ymm),
        vl2(C::VEX_Vmovupd_xmmm128_xmm, C::VEX_Vmovupd_ymmm256_ymm),
        reg_mem(v(C::VEX_Vmovss_xmm_xmm_xmm_0F11), v(C::VEX_Vmovss_m32_xmm)),
        reg_mem(v(C::VEX_Vmovsd_xmm_xmm_xmm_0F11), v(C::VEX_Vmovsd_m64_xmm)),
    );
    t[0x28] = mp(vl2(C::VEX_Vmovaps_xmm_xmmm128, C::VEX_Vmovaps_ymm_ymmm256), vl2(C::VEX_Vmovapd_xmm_xmmm128, C::VEX_Vmovapd_ymm_ymmm256), X(), X());
    t[0x29] = mp(vl2(C::VEX_Vmovaps_xmmm128_xmm, C::VEX_Vmovaps_ymmm256_ymm), vl2(C::VEX_Vmovapd_xmmm128_xmm, C::VEX_Vmovapd_ymmm256_ymm), X(), X());
    t[0x57] = mp(vl2(C::VEX_Vxorps_xmm_xmm_xmmm128, C::VEX_Vxorps_ymm_ymm_ymmm256), vl2(C::VEX_Vxorpd_xmm_xmm_xmmm128, C::VEX_Vxorpd_ymm_ymm_ymmm256), X(), X());
    t[0x58] = mp(
        vl2(C::VEX_Vaddps_xmm_xmm_xmmm128, C::VEX_Vaddps_ymm_ymm_ymmm256),
        vl2(C::VEX_Vaddpd_xmm_xmm_xmmm128, C::VEX_Vaddpd_ymm_ymm_ymmm256),
        v(C::VEX_Vaddss_xmm_xmm_xmmm32),
        v(C::VEX_Vaddsd_xmm_xmm_xmmm64),
    );
    t[0x59] = mp(
        vl2(C::VEX_Vmulps_xmm_xmm_xmmm128, C::VEX_Vmulps_ymm_ymm_ymmm256),
        vl2(C::VEX_Vmulpd_xmm_xmm_xmmm128, C::VEX_Vmulpd_ymm_ymm_ymmm256),
        v(C::VEX_Vmulss_xmm_xmm_xmmm32),
        v(C::VEX_Vmulsd_xmm_xmm_xmmm64),
    );
    t[0x5C] = mp(
        vl2(C::VEX_Vsubps_xmm_xmm_xmmm128, C::VEX_Vsubps_ymm_ymm_ymmm256),
        vl2(C::VEX_Vsubpd_xmm_xmm_xmmm128, C::VEX_Vsubpd_ymm_ymm_ymmm256),
        v(C::VEX_Vsubss_xmm_xmm_xmmm32),
        v(C::VEX_Vsubsd_xmm_xmm_xmmm64),
    );
    t[0x6F] = mp(X(), vl2(C::VEX_Vmovdqa_xmm_xmmm128, C::VEX_Vmovdqa_ymm_ymmm256), vl2(C::VEX_Vmovdqu_xmm_xmmm128, C::VEX_Vmovdqu_ymm_ymmm256), X());
    t[0x77] = mp(vl2(C::VEX_Vzeroupper, C::VEX_Vzeroall), X(), X(), X());
    t[0x7F] = mp(X(), vl2(C::VEX_Vmovdqa_xmmm128_xmm, C::VEX_Vmovdqa_ymmm256_ymm), vl2(C::VEX_Vmovdqu_xmmm128_xmm, C::VEX_Vmovdqu_ymmm256_ymm), X());
    t[0xEF] = mp(X(), vl2(C::VEX_Vpxor_xmm_xmm_xmmm128, C::VEX_Vpxor_ymm_ymm_ymmm256), X(), X());
    t
}

#[rustfmt::skip]
fn vex0f38() -> [Handler; 256] {
    let mut t = empty();
    t[0x18] = mp(X(), vl2(C::VEX_Vbroadcastss_xmm_m32, C::VEX_Vbroadcastss_ymm_m32), X(), X());
    t[0xF2] = mp(vw(C::VEX_Andn_r32_r32_rm32, C::VEX_Andn_r64_r64_rm64), X(), X(), X());
    t[0xF3] = mp(
        group([X(),
            vw(C::VEX_Blsr_r32_rm32, C::VEX_Blsr_r64_rm64),
            vw(C::VEX_Blsmsk_r32_rm32, C::VEX_Blsmsk_r64_rm64),
            vw(C::VEX_Blsi_r32_rm32, C::VEX_Blsi_r64_rm64),
            X(), X(), X(), X()]),
        X(), X(), X(),
    );
    t[0xF5] = mp(
        vw(C::VEX_Bzhi_r32_rm32_r32, C::VEX_Bzhi_r64_rm64_r64),
        X(),
        vw(C::VEX_Pext_r32_r32_rm32, C::VEX_Pext_r64_r64_rm64),
        vw(C::VEX_Pdep_r32_r32_rm32, C::VEX_Pdep_r64_r64_rm64),
    );
    t[0xF7] = mp(
        vw(C::VEX_Bextr_r32_rm32_r32, C::VEX_Bextr_r64_rm64_r64),
        vw(C::VEX_Shlx_r32_rm32_r32, C::VEX_Shlx_r64_rm64_r64),
        vw(C::VEX_Sarx_r32_rm32_r32, C::VEX_Sarx_r64_rm64_r64),
        vw(C::VEX_Shrx_r32_rm32_r32, C::VEX_Shrx_r64_rm64_r64),
    );
    t
}

fn vex0f3a() -> [Handler; 256] {
    let mut t = empty();
    t[0xF0] = mp(
        X(),
        X(),
        X(),
        vw(C::VEX_Rorx_r32_rm32_imm8, C::VEX_Rorx_r64_rm64_imm8),
    );
    t
}

#[rustfmt::skip]
fn xop9() -> [Handler; 256] {
    let mut t = empty();
    t[0x01] = mp(
        group([X(),
            vw(C::XOP_Blcfill_r32_rm32, C::XOP_Blcfill_r64_rm64),
            vw(C::XOP_Blsfill_r32_rm32, C::XOP_Blsfill_r64_rm64),
            vw(C::XOP_Blcs_r32_rm32, C::XOP_Blcs_r64_rm64),
            vw(C::XOP_Tzmsk_r32_rm32, C::XOP_Tzmsk_r64_rm64),
            vw(C::XOP_Blcic_r32_rm32, C::XOP_Blcic_r64_rm64),
            vw(C::XOP_Blsic_r32_rm32, C::XOP_Blsic_r64_rm64),
            vw(C::XOP_T1mskc_r32_rm32, C::XOP_T1mskc_r64_rm64)]),
        X(), X(), X(),
    );
    t[0x02] = mp(
        group([X(), vw(C::XOP_Blcmsk_r32_rm32, C::XOP_Blcmsk_r64_rm64), X(), X(), X(), X(),
            vw(C::XOP_Blci_r32_rm32, C::XOP_Blci_r64_rm64), X()]),
        X(), X(), X(),
    );
    t
}

fn xop_a() -> [Handler; 256] {
    let mut t = empty();
    t[0x10] = mp(
        vw(C::XOP_Bextr_r32_rm32_imm32, C::XOP_Bextr_r64_rm64_imm32),
        X(),
        X(),
        X(),
    );
    t
}

#[rustfmt::skip]
fn evex0f() -> [Handler; 256] {
    let mut t = empty();
    t[0x10] = mp(
        vl3(C::EVEX_Vmovups_xmm_k1z_xmmm128, C::EVEX_Vmovups_ymm_k1z_ymmm256, C::EVEX_Vmovups_zmm_k1z_zmmm512),
        vl3(C::EVEX_Vmovupd_xmm_k1z_xmmm128, C::EVEX_Vmovupd_ymm_k1z_ymmm256, C::EVEX_Vmovupd_zmm_k1z_zmmm512),
        X(), X(),
    );
    t[0x11] = mp(
        vl3(C::EVEX_Vmovups_xmmm128_k1_xmm, C::EVEX_Vmovups_ymmm256_k1_ymm, C::EVEX_Vmovups_zmmm512_k1_zmm),
        vl3(C::EVEX_Vmovupd_xmmm128_k1_xmm, C::EVEX_Vmovupd_ymmm256_k1_ymm, C::EVEX_Vmovupd_zmmm512_k1_zmm),
        X(), X(),
    );
    t[0x58] = mp(
        vl3(C::EVEX_Vaddps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vaddps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vaddps_zmm_k1z_zmm_zmmm512b32_er),
        vl3(C::EVEX_Vaddpd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vaddpd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vaddpd_zmm_k1z_zmm_zmmm512b64_er),
        X(), X(),
    );
    t[0x6F] = mp(X(), X(),
        w_all(
            vl3(C::EVEX_Vmovdqu32_xmm_k1z_xmmm128, C::EVEX_Vmovdqu32_ymm_k1z_ymmm256, C::EVEX_Vmovdqu32_zmm_k1z_zmmm512),
            vl3(C::EVEX_Vmovdqu64_xmm_k1z_xmmm128, C::EVEX_Vmovdqu64_ymm_k1z_ymmm256, C::EVEX_Vmovdqu64_zmm_k1z_zmmm512),
        ),
        X(),
    );
    t[0x7F] = mp(X(), X(),
        w_all(
            vl3(C::EVEX_Vmovdqu32_xmmm128_k1z_xmm, C::EVEX_Vmovdqu32_ymmm256_k1z_ymm, C::EVEX_Vmovdqu32_zmmm512_k1z_zmm),
            vl3(C::EVEX_Vmovdqu64_xmmm128_k1z_xmm, C::EVEX_Vmovdqu64_ymmm256_k1z_ymm, C::EVEX_Vmovdqu64_zmmm512_k1z_zmm),
        ),
        X(),
    );
    t[0xEF] = mp(X(),
        w_all(
            vl3(C::EVEX_Vpxord_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpxord_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpxord_zmm_k1z_zmm_zmmm512b32),
            vl3(C::EVEX_Vpxorq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpxorq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpxorq_zmm_k1z_zmm_zmmm512b64),
        ),
        X(), X(),
    );
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_shared() {
        assert!(std::ptr::eq(get(), get()));
    }

    #[test]
    fn test_escapes_and_prefix_bytes() {
        let tables = get();
        assert!(matches!(tables.legacy[0x0F], Handler::Escape0F));
        assert!(matches!(tables.map0f[0x38], Handler::Escape38));
        assert!(matches!(tables.map0f[0x3A], Handler::Escape3A));
        // prefix bytes never reach the table
        for prefix in [0x26, 0x2E, 0x36, 0x3E, 0x64, 0x65, 0x66, 0x67, 0xF0, 0xF2, 0xF3] {
            assert!(matches!(tables.legacy[prefix], Handler::Invalid));
        }
    }

    #[test]
    fn test_modrm_requirements() {
        let tables = get();
        assert!(tables.legacy[0x01].has_modrm());
        assert!(tables.legacy[0xD9].has_modrm());
        assert!(!tables.legacy[0xEB].has_modrm());
        assert!(!tables.legacy[0xC4].has_modrm());
        assert!(tables.map0f[0x10].has_modrm());
        assert!(!tables.vex[0][0x77].has_modrm());
    }
}
