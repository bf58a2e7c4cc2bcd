//! Opcode handlers.
//!
//! A [`Handler`] finishes decoding one opcode family once the dispatch tables have located it.
//! Leaf variants pick a [`Code`] (by operand size, address size or prefix) and hand it to the
//! shared operand reader; dispatch variants select a child handler by ModRM fields, mandatory
//! prefix, bitness or vector length; escape variants switch to another opcode map.

use crate::{
    decoder::{state::StateFlags, Decoder, DecoderOptions},
    instruction::{Code, Instruction, MandatoryPrefix, Operand, Register},
    Result,
};

/// The 16/32/64-bit operand size variants of one instruction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Sizes {
    pub c16: Code,
    pub c32: Code,
    pub c64: Code,
}

impl Sizes {
    pub const fn new(c16: Code, c32: Code, c64: Code) -> Self {
        Sizes { c16, c32, c64 }
    }
}

/// How the operand size is chosen in 64-bit mode.
///
/// Outside 64-bit mode the operand size is always the default size toggled by `66`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SizeRule {
    /// `REX.W` selects 64, else `66` selects 16, else 32
    Normal,
    /// 64 unless `66` (without `REX.W`) selects 16: `PUSH`, `POP`, `ENTER`, `LEAVE`
    Default64,
    /// Always 64; `66` selects 16 only with [`DecoderOptions::AMD`]: near branches and `RET`
    Force64,
}

/// `LOOPcc`/`JrCXZ` codes, by operand size and address size.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LoopCodes {
    /// `CX` counter: 16- and 32-bit targets
    pub cx: [Code; 2],
    /// `ECX` counter: 16-, 32- and 64-bit targets
    pub ecx: [Code; 3],
    /// `RCX` counter: 16- and 64-bit targets
    pub rcx: [Code; 2],
}

#[derive(Debug)]
pub(crate) enum Handler {
    /// Undefined opcode
    Invalid,
    /// No ModRM, one code
    Simple(Code),
    /// No ModRM, code by operand size
    Sized(Sizes, SizeRule),
    /// ModRM, one code
    ModRm(Code),
    /// ModRM, code by operand size
    ModRmSized(Sizes, SizeRule),
    /// `LOOP`, `LOOPE`, `LOOPNE`, `JrCXZ`
    Loop(LoopCodes),
    /// `90`: `NOP`, `PAUSE` or `XCHG r8, rAX`
    Nop90,
    /// No ModRM; an `F3` prefix selects `alt` unless `disable` is set
    RepAlt {
        default: Code,
        alt: Code,
        disable: DecoderOptions,
    },
    /// `MOV r, CRn/DRn` and back; ModRM.mod is ignored
    MovCrDr { c32: Code, c64: Code },
    /// `option` selects `alt` over `default`
    Options {
        default: Box<Handler>,
        alt: Box<Handler>,
        option: DecoderOptions,
    },
    /// Selected by ModRM.reg
    Group(Box<[Handler; 8]>),
    /// Selected by ModRM.mod
    RegMem { reg: Box<Handler>, mem: Box<Handler> },
    /// Register form selected by ModRM.rm
    RmGroup(Box<[Handler; 8]>),
    /// Selected by mandatory prefix: none, `66`, `F3`, `F2`
    MandatoryPrefix(Box<[Handler; 4]>),
    /// Selected by the last `F3`/`F2`; `66` stays an operand size prefix
    RepSelect {
        none: Box<Handler>,
        f3: Box<Handler>,
        f2: Box<Handler>,
    },
    /// Selected by 64-bit mode
    Bitness { legacy: Box<Handler>, long: Box<Handler> },
    /// Selected by `W`; outside 64-bit mode `W` may be ignored
    W {
        w0: Box<Handler>,
        w1: Box<Handler>,
        ignore_outside_64: bool,
    },
    /// Selected by VEX.L / EVEX.L'L
    VectorLength(Box<[Handler; 4]>),
    /// `0F` escape
    Escape0F,
    /// `0F 38` escape
    Escape38,
    /// `0F 3A` escape
    Escape3A,
    /// `C5`, or `legacy` when it is `LDS`
    Vex2(Box<Handler>),
    /// `C4`, or `legacy` when it is `LES`
    Vex3(Box<Handler>),
    /// `62`, or `legacy` when it is `BOUND`
    Evex(Box<Handler>),
    /// `8F`, or `legacy` when it is `POP r/m`
    Xop(Box<Handler>),
    /// VEX/EVEX/XOP encoded instruction with the usual validity checks
    Vector(Code),
}

impl Handler {
    /// `true` if the dispatcher must read a ModRM byte before calling [`Handler::decode`].
    pub fn has_modrm(&self) -> bool {
        match self {
            Handler::Invalid
            | Handler::Simple(_)
            | Handler::Sized(..)
            | Handler::Loop(_)
            | Handler::Nop90
            | Handler::RepAlt { .. }
            | Handler::Escape0F
            | Handler::Escape38
            | Handler::Escape3A
            | Handler::Vex2(_)
            | Handler::Vex3(_)
            | Handler::Evex(_)
            | Handler::Xop(_) => false,
            Handler::ModRm(_)
            | Handler::ModRmSized(..)
            | Handler::MovCrDr { .. }
            | Handler::Group(_)
            | Handler::RegMem { .. }
            | Handler::RmGroup(_) => true,
            Handler::Vector(code) => !code.op_code().ops.is_empty(),
            Handler::Options { default, alt, .. } => default.has_modrm() || alt.has_modrm(),
            Handler::MandatoryPrefix(handlers) => handlers.iter().any(Handler::has_modrm),
            Handler::RepSelect { none, f3, f2 } => {
                none.has_modrm() || f3.has_modrm() || f2.has_modrm()
            }
            Handler::VectorLength(handlers) => handlers.iter().any(Handler::has_modrm),
            Handler::Bitness { legacy, long } => legacy.has_modrm() || long.has_modrm(),
            Handler::W { w0, w1, .. } => w0.has_modrm() || w1.has_modrm(),
        }
    }

    /// Finishes decoding `instr`. The ModRM byte, if any, has already been read.
    ///
    /// ## Arguments
    /// * 'decoder' - The decoder positioned after the opcode (and ModRM) byte
    /// * 'instr'   - The instruction being filled in
    ///
    /// # Errors
    /// Returns [`crate::Error::EndOfInput`] if the input ends inside the instruction.
    pub fn decode(&self, decoder: &mut Decoder<'_>, instr: &mut Instruction) -> Result<()> {
        match self {
            Handler::Invalid => {
                decoder.state.invalidate();
                Ok(())
            }
            Handler::Simple(code) | Handler::ModRm(code) => decoder.read_operands(instr, *code),
            Handler::Sized(sizes, rule) | Handler::ModRmSized(sizes, rule) => {
                let code = decoder.select_size(sizes, *rule);
                decoder.read_operands(instr, code)
            }
            Handler::Loop(codes) => {
                let code = decoder.select_loop(codes);
                decoder.read_operands(instr, code)
            }
            Handler::Nop90 => {
                let code = if decoder.state.extra_base != 0 {
                    decoder.select_size(
                        &Sizes::new(Code::Xchg_r16_AX, Code::Xchg_r32_EAX, Code::Xchg_r64_RAX),
                        SizeRule::Normal,
                    )
                } else if decoder.state.mandatory_prefix == MandatoryPrefix::PF3
                    && !decoder.options.contains(DecoderOptions::NO_PAUSE)
                {
                    decoder.state.flags.insert(StateFlags::REP_CONSUMED);
                    Code::Pause
                } else {
                    decoder.select_size(
                        &Sizes::new(Code::Nopw, Code::Nopd, Code::Nopq),
                        SizeRule::Normal,
                    )
                };
                decoder.read_operands(instr, code)
            }
            Handler::RepAlt {
                default,
                alt,
                disable,
            } => {
                let state = &mut decoder.state;
                let code = if state.mandatory_prefix == MandatoryPrefix::PF3
                    && !decoder.options.intersects(*disable)
                {
                    state.flags.insert(StateFlags::REP_CONSUMED);
                    *alt
                } else {
                    *default
                };
                decoder.read_operands(instr, code)
            }
            Handler::MovCrDr { c32, c64 } => {
                decoder.state.flags.insert(StateFlags::IGNORE_MOD);
                let code = if decoder.is_64() { *c64 } else { *c32 };
                decoder.read_operands(instr, code)?;

                // Some AMD CPUs accept LOCK MOV CR0 as an alias of CR8 outside 64-bit mode
                let state = &mut decoder.state;
                if matches!(code, Code::Mov_r32_cr | Code::Mov_cr_r32)
                    && state.reg == 0
                    && state.flags.contains(StateFlags::LOCK)
                    && !decoder.options.contains(DecoderOptions::NO_LOCK_MOV_CR0)
                {
                    state.flags.remove(StateFlags::LOCK);
                    for op in &mut instr.operands {
                        if *op == Operand::Register(Register::CR0) {
                            *op = Operand::Register(Register::CR8);
                        }
                    }
                }
                Ok(())
            }
            Handler::Options {
                default,
                alt,
                option,
            } => {
                if decoder.options.intersects(*option) {
                    alt.decode(decoder, instr)
                } else {
                    default.decode(decoder, instr)
                }
            }
            Handler::Group(handlers) => {
                handlers[decoder.state.reg as usize].decode(decoder, instr)
            }
            Handler::RegMem { reg, mem } => {
                if decoder.state.mod_ == 3 {
                    reg.decode(decoder, instr)
                } else {
                    mem.decode(decoder, instr)
                }
            }
            Handler::RmGroup(handlers) => {
                handlers[decoder.state.rm as usize].decode(decoder, instr)
            }
            Handler::MandatoryPrefix(handlers) => {
                let default_size = decoder.default_operand_size();
                let state = &mut decoder.state;
                match state.mandatory_prefix {
                    MandatoryPrefix::None => {}
                    MandatoryPrefix::P66 => {
                        state.operand_size = if state.w() { 64 } else { default_size };
                    }
                    MandatoryPrefix::PF3 | MandatoryPrefix::PF2 => {
                        state.flags.insert(StateFlags::REP_CONSUMED);
                    }
                }
                handlers[decoder.state.mandatory_prefix as usize].decode(decoder, instr)
            }
            Handler::RepSelect { none, f3, f2 } => {
                let state = &mut decoder.state;
                if !state.flags.contains(StateFlags::HAS_REP) {
                    return none.decode(decoder, instr);
                }
                state.flags.insert(StateFlags::REP_CONSUMED);
                if state.rep_byte == 0xF3 {
                    f3.decode(decoder, instr)
                } else {
                    f2.decode(decoder, instr)
                }
            }
            Handler::Bitness { legacy, long } => {
                if decoder.is_64() {
                    long.decode(decoder, instr)
                } else {
                    legacy.decode(decoder, instr)
                }
            }
            Handler::W {
                w0,
                w1,
                ignore_outside_64,
            } => {
                if decoder.state.w() && (decoder.is_64() || !ignore_outside_64) {
                    w1.decode(decoder, instr)
                } else {
                    w0.decode(decoder, instr)
                }
            }
            Handler::VectorLength(handlers) => {
                // EVEX.b on a register form turns L'L into rounding control at 512 bits.
                let index = if decoder.is_evex_rounding() {
                    2
                } else {
                    decoder.state.vector_length & 3
                };
                handlers[index as usize].decode(decoder, instr)
            }
            Handler::Escape0F => {
                let tables = decoder.tables;
                decoder.dispatch(&tables.map0f, instr)
            }
            Handler::Escape38 => {
                let tables = decoder.tables;
                decoder.dispatch(&tables.map0f38, instr)
            }
            Handler::Escape3A => {
                let tables = decoder.tables;
                decoder.dispatch(&tables.map0f3a, instr)
            }
            Handler::Vex2(legacy) => {
                if !decoder.is_64() && decoder.parser.peek_byte()? < 0xC0 {
                    return decoder.dispatch_handler(legacy, instr);
                }
                decoder.decode_vex2(instr)
            }
            Handler::Vex3(legacy) => {
                if !decoder.is_64() && decoder.parser.peek_byte()? < 0xC0 {
                    return decoder.dispatch_handler(legacy, instr);
                }
                decoder.decode_vex3(instr)
            }
            Handler::Evex(legacy) => {
                if !decoder.is_64() && decoder.parser.peek_byte()? < 0xC0 {
                    return decoder.dispatch_handler(legacy, instr);
                }
                decoder.decode_evex(instr)
            }
            Handler::Xop(legacy) => {
                if decoder.parser.peek_byte()? & 0x1F < 8 {
                    return decoder.dispatch_handler(legacy, instr);
                }
                decoder.decode_xop(instr)
            }
            Handler::Vector(code) => {
                decoder.check_vector(*code, instr);
                decoder.read_operands(instr, *code)
            }
        }
    }
}
