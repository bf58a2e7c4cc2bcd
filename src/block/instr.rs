//! Relaxable wrappers around the instructions of a block.
//!
//! Every source instruction becomes an [`Instr`]. Plain instructions have a single size.
//! Branches carry a small state machine:
//!
//! ```text
//! Unresolved ──> Short
//!     │   └────> Near ──> Short
//!     └────────> Long                 (64-bit only, terminal)
//! ```
//!
//! `Unresolved` is sized for the largest form the branch can take and no transition picks a
//! larger form, so sizes only ever shrink. RIP-relative memory operands follow the same idea
//! with the forms `Rip`, `Eip` and `Unreachable`.

use log::debug;

use crate::{
    encoder::{fits_signed, ConstantOffsets, Encoder},
    instruction::{Code, Instruction, MemoryOperand, Operand, Register},
    parser::MAX_INSTRUCTION_LENGTH,
    Bitness, Result,
};

/// `FF 25 disp32` / `FF 15 disp32`
const INDIRECT_SIZE: u32 = 6;

/// Where a branch goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    /// An instruction of one of the blocks being encoded
    Instr { block: usize, index: usize },
    /// An address outside every block
    Address(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BranchKind {
    Jmp,
    Jcc,
    Call,
    /// `LOOP`, `LOOPcc` and `JrCXZ`, which only exist with a `rel8`
    Loop,
    Xbegin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BranchForm {
    /// Re-encoded with its original code
    Fixed,
    Unresolved,
    Short,
    Near,
    /// Indirect through a pointer slot
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IpRelForm {
    Fixed,
    Unresolved,
    Rip,
    Eip,
    /// Neither RIP- nor EIP-relative addressing reaches the target
    Unreachable,
}

/// Encoded sizes of the forms of a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FormSizes {
    pub(crate) short: u32,
    pub(crate) near: u32,
    pub(crate) long: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Relax {
    Simple,
    Branch {
        kind: BranchKind,
        form: BranchForm,
        target: Target,
        sizes: FormSizes,
    },
    IpRelMem {
        form: IpRelForm,
        target: u64,
        rip: u32,
        eip: u32,
    },
}

/// A range of possible addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) low: u64,
    pub(crate) high: u64,
}

impl Span {
    pub(crate) fn exact(address: u64) -> Self {
        Span {
            low: address,
            high: address,
        }
    }
}

/// Addresses of a block's instructions during one relaxation pass.
#[derive(Debug, Clone, Default)]
pub(crate) struct Layout {
    /// Every instruction at its committed size
    pub(crate) current: Vec<u64>,
    /// Every instruction at the smallest size it can still shrink to
    pub(crate) minimum: Vec<u64>,
}

impl Layout {
    pub(crate) fn span(&self, index: usize) -> Span {
        Span {
            low: self.minimum[index],
            high: self.current[index],
        }
    }
}

/// The position of the instruction being optimized.
pub(crate) struct Site<'a> {
    pub(crate) bitness: Bitness,
    pub(crate) layouts: &'a [Layout],
    pub(crate) block: usize,
    pub(crate) index: usize,
}

/// Where a branch target can be during one pass.
#[derive(Debug, Clone, Copy)]
struct Destination {
    span: Span,
    same_block: bool,
    /// Follows the branch in the same block, so it moves when the branch changes size
    after: bool,
}

impl Site<'_> {
    /// Possible addresses of `target`.
    fn target(&self, target: Target) -> Destination {
        match target {
            Target::Instr { block, index } if block == self.block => Destination {
                span: Span::exact(self.layouts[block].current[index]),
                same_block: true,
                after: index > self.index,
            },
            Target::Instr { block, index } => Destination {
                span: self.layouts[block].span(index),
                same_block: false,
                after: false,
            },
            Target::Address(address) => Destination {
                span: Span::exact(address),
                same_block: false,
                after: false,
            },
        }
    }

    /// `true` if a branch of `size` bytes, currently `current` bytes, with a `bytes`-wide
    /// displacement reaches `dest` from anywhere this instruction can still end up.
    ///
    /// Within one block only the instructions in between move, and they only shrink, so the
    /// current layout is enough.
    fn reaches(&self, size: u32, current: u32, dest: Destination, bytes: u8) -> bool {
        let layout = &self.layouts[self.block];
        let origin = if dest.same_block {
            Span::exact(layout.current[self.index])
        } else {
            layout.span(self.index)
        };
        let shift = if dest.after {
            u64::from(current.saturating_sub(size))
        } else {
            0
        };
        let size = u64::from(size);
        let target_low = dest.span.low.wrapping_sub(shift);
        let target_high = dest.span.high.wrapping_sub(shift);
        let low = self.wrap(target_low.wrapping_sub(origin.high.wrapping_add(size)));
        let high = self.wrap(target_high.wrapping_sub(origin.low.wrapping_add(size)));
        fits_signed(low, bytes) && fits_signed(high, bytes)
    }

    fn wrap(&self, diff: u64) -> i64 {
        match self.bitness {
            Bitness::Bit16 => i64::from(diff as u16 as i16),
            Bitness::Bit32 => i64::from(diff as u32 as i32),
            Bitness::Bit64 => diff as i64,
        }
    }
}

/// One instruction of a block and its relaxation state.
#[derive(Debug, Clone)]
pub(crate) struct Instr {
    pub(crate) instruction: Instruction,
    pub(crate) relax: Relax,
    /// Committed size in bytes
    pub(crate) size: u32,
    /// Index of the pointer slot of a long branch
    pub(crate) slot: Option<usize>,
}

fn jmp_codes(bitness: Bitness) -> (Code, Code) {
    match bitness {
        Bitness::Bit16 => (Code::Jmp_rel8_16, Code::Jmp_rel16),
        Bitness::Bit32 => (Code::Jmp_rel8_32, Code::Jmp_rel32_32),
        Bitness::Bit64 => (Code::Jmp_rel8_64, Code::Jmp_rel32_64),
    }
}

fn branch_kind(code: Code) -> Option<BranchKind> {
    if code.is_jmp_short() || code.is_jmp_near() {
        Some(BranchKind::Jmp)
    } else if code.is_jcc_short() || code.is_jcc_near() {
        Some(BranchKind::Jcc)
    } else if code.is_call_near() {
        Some(BranchKind::Call)
    } else if code.is_loop_or_jrcxz() {
        Some(BranchKind::Loop)
    } else if code.is_xbegin() {
        Some(BranchKind::Xbegin)
    } else {
        None
    }
}

fn with_code(instruction: &Instruction, code: Code) -> Instruction {
    Instruction {
        code,
        ..*instruction
    }
}

fn with_target(instruction: &Instruction, code: Code, target: u64) -> Instruction {
    let mut instr = with_code(instruction, code);
    instr.set_near_branch_target(target);
    instr
}

fn with_ip_rel_base(instruction: &Instruction, base: Register) -> Instruction {
    let mut instr = *instruction;
    for op in &mut instr.operands {
        if let Operand::Memory(mem) = op {
            if mem.is_ip_relative() {
                mem.base = base;
            }
        }
    }
    instr
}

/// `jmp [rip+slot]` or `call [rip+slot]`, reported at the address of `original`.
fn indirect(original: &Instruction, code: Code, slot: u64) -> Instruction {
    let mut instr = Instruction::with_code(code);
    instr.ip = original.ip;
    instr.operands[0] = Operand::Memory(MemoryOperand::with_base_displ(Register::RIP, slot, 4));
    instr
}

/// Size of `instruction` encoded at address 0 with every address-dependent field pointing at 0.
///
/// The size of these fields does not depend on their value, so this is the size at any address.
/// An instruction that cannot be encoded is given the maximum length; the final encode reports
/// the failure.
fn measure(encoder: &mut Encoder, instruction: &Instruction) -> u32 {
    let mut zeroed = *instruction;
    zeroed.set_near_branch_target(0);
    for op in &mut zeroed.operands {
        if let Operand::Memory(mem) = op {
            if mem.is_ip_relative() {
                mem.displacement = 0;
            }
        }
    }
    encoder
        .measure(&zeroed, 0)
        .map_or(MAX_INSTRUCTION_LENGTH as u32, |len| len as u32)
}

impl FormSizes {
    fn measure(encoder: &mut Encoder, instruction: &Instruction, kind: BranchKind) -> Self {
        let code = instruction.code;
        let (jmp_short, jmp_near) = jmp_codes(encoder.bitness());
        let mut size = |code: Code| measure(encoder, &with_code(instruction, code));
        match kind {
            BranchKind::Jmp => FormSizes {
                short: size(code.to_short_branch()),
                near: size(code.to_near_branch()),
                long: INDIRECT_SIZE,
            },
            BranchKind::Jcc => {
                let short = size(code.to_short_branch());
                FormSizes {
                    short,
                    near: size(code.to_near_branch()),
                    long: short + INDIRECT_SIZE,
                }
            }
            BranchKind::Call => {
                let near = size(code);
                FormSizes {
                    short: near,
                    near,
                    long: INDIRECT_SIZE,
                }
            }
            BranchKind::Loop => {
                let short = size(code);
                let skip = size(jmp_short);
                FormSizes {
                    short,
                    near: short + skip + size(jmp_near),
                    long: short + skip + INDIRECT_SIZE,
                }
            }
            BranchKind::Xbegin => {
                let near = size(Code::Xbegin_rel32);
                FormSizes {
                    short: size(Code::Xbegin_rel16),
                    near,
                    long: near,
                }
            }
        }
    }
}

impl Instr {
    /// Wraps `instruction`, measuring every form it may take.
    ///
    /// ## Arguments
    /// * 'encoder'      - Scratch encoder for the block's bitness
    /// * 'instruction'  - The source instruction; its `ip` is the original address
    /// * 'fix_branches' - `false` keeps every instruction in its original form
    /// * 'resolve'      - Maps an original address to a branch target
    pub(crate) fn new(
        encoder: &mut Encoder,
        instruction: Instruction,
        fix_branches: bool,
        resolve: impl Fn(u64) -> Target,
    ) -> Self {
        let bitness = encoder.bitness();
        let original_size = measure(encoder, &instruction);
        let branch = branch_kind(instruction.code).zip(instruction.near_branch_target());
        let ip_rel = instruction
            .memory_operand()
            .filter(|mem| bitness == Bitness::Bit64 && mem.is_ip_relative())
            .map(|mem| mem.displacement);

        let (relax, size) = match (branch, ip_rel) {
            (Some((kind, target)), _) => {
                let target = resolve(target);
                if fix_branches {
                    let sizes = FormSizes::measure(encoder, &instruction, kind);
                    let has_long = bitness == Bitness::Bit64 && kind != BranchKind::Xbegin;
                    let size = if has_long {
                        sizes.near.max(sizes.long)
                    } else {
                        sizes.near
                    };
                    let form = BranchForm::Unresolved;
                    (Relax::Branch { kind, form, target, sizes }, size)
                } else {
                    let sizes = FormSizes {
                        short: original_size,
                        near: original_size,
                        long: original_size,
                    };
                    let form = BranchForm::Fixed;
                    (Relax::Branch { kind, form, target, sizes }, original_size)
                }
            }
            (None, Some(target)) if fix_branches => {
                let rip = measure(encoder, &with_ip_rel_base(&instruction, Register::RIP));
                let eip = measure(encoder, &with_ip_rel_base(&instruction, Register::EIP));
                let form = IpRelForm::Unresolved;
                (Relax::IpRelMem { form, target, rip, eip }, rip.max(eip))
            }
            (None, Some(target)) => {
                let form = IpRelForm::Fixed;
                let relax = Relax::IpRelMem {
                    form,
                    target,
                    rip: original_size,
                    eip: original_size,
                };
                (relax, original_size)
            }
            (None, None) => (Relax::Simple, original_size),
        };

        Instr {
            instruction,
            relax,
            size,
            slot: None,
        }
    }

    /// The smallest size this instruction can still shrink to.
    pub(crate) fn min_size(&self) -> u32 {
        match self.relax {
            Relax::Branch {
                kind: BranchKind::Call,
                form: BranchForm::Unresolved,
                sizes,
                ..
            } => sizes.near,
            Relax::Branch {
                kind,
                form: BranchForm::Unresolved | BranchForm::Near,
                sizes,
                ..
            } if kind != BranchKind::Call => sizes.short,
            Relax::IpRelMem {
                form: IpRelForm::Unresolved,
                rip,
                eip,
                ..
            } => rip.min(eip),
            _ => self.size,
        }
    }

    /// `true` once no later pass can change this instruction.
    pub(crate) fn is_settled(&self) -> bool {
        match self.relax {
            Relax::Simple => true,
            Relax::Branch { kind, form, .. } => match form {
                BranchForm::Unresolved => false,
                BranchForm::Near => kind == BranchKind::Call,
                BranchForm::Fixed | BranchForm::Short | BranchForm::Long => true,
            },
            Relax::IpRelMem { form, .. } => form != IpRelForm::Unresolved,
        }
    }

    /// `true` if this is a branch committed to the indirect form.
    pub(crate) fn is_long(&self) -> bool {
        matches!(
            self.relax,
            Relax::Branch {
                form: BranchForm::Long,
                ..
            }
        )
    }

    /// The branch target, if this is a branch.
    pub(crate) fn target(&self) -> Option<Target> {
        match self.relax {
            Relax::Branch { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Runs one optimize step. Returns `true` if the form changed.
    pub(crate) fn optimize(&mut self, site: &Site<'_>) -> bool {
        match self.relax {
            Relax::Simple => false,
            Relax::Branch {
                kind,
                form,
                target,
                sizes,
            } => {
                if !matches!(form, BranchForm::Unresolved | BranchForm::Near) {
                    return false;
                }
                let dest = site.target(target);
                let short_bytes = if kind == BranchKind::Xbegin { 2 } else { 1 };
                let next = if kind != BranchKind::Call
                    && site.reaches(sizes.short, self.size, dest, short_bytes)
                {
                    BranchForm::Short
                } else if form == BranchForm::Near {
                    return false;
                } else if site.bitness != Bitness::Bit64
                    || dest.same_block
                    || kind == BranchKind::Xbegin
                    || site.reaches(sizes.near, self.size, dest, 4)
                {
                    BranchForm::Near
                } else {
                    debug!(
                        "branch at {:#x} cannot reach {:#x}, using an indirect jump",
                        self.instruction.ip, dest.span.low
                    );
                    BranchForm::Long
                };
                self.size = match next {
                    BranchForm::Short => sizes.short,
                    BranchForm::Near => sizes.near,
                    _ => sizes.long,
                };
                self.relax = Relax::Branch {
                    kind,
                    form: next,
                    target,
                    sizes,
                };
                true
            }
            Relax::IpRelMem {
                form,
                target,
                rip,
                eip,
            } => {
                if form != IpRelForm::Unresolved {
                    return false;
                }
                let here = site.layouts[site.block].span(site.index);
                let from_low = target.wrapping_sub(here.low.wrapping_add(u64::from(rip))) as i64;
                let from_high = target.wrapping_sub(here.high.wrapping_add(u64::from(rip))) as i64;
                let (next, size) = if fits_signed(from_low, 4) && fits_signed(from_high, 4) {
                    (IpRelForm::Rip, rip)
                } else if target >> 32 == 0 {
                    (IpRelForm::Eip, eip)
                } else {
                    (IpRelForm::Unreachable, self.size)
                };
                self.size = size;
                self.relax = Relax::IpRelMem {
                    form: next,
                    target,
                    rip,
                    eip,
                };
                true
            }
        }
    }

    /// Encodes the committed form at `ip`.
    ///
    /// Returns the constant offsets of the instruction and whether it is still a single
    /// instruction.
    ///
    /// ## Arguments
    /// * 'encoder' - Output encoder
    /// * 'ip'      - Final address of the instruction
    /// * 'target'  - Final address of the branch target (ignored for other instructions)
    /// * 'slot'    - Address of the pointer slot of a long branch
    ///
    /// # Errors
    /// Returns [`crate::Error::Encode`] if the encoder rejects the instruction, or
    /// [`crate::Error::Malformed`] if the instruction was never resolved.
    pub(crate) fn encode(
        &self,
        encoder: &mut Encoder,
        ip: u64,
        target: u64,
        slot: Option<u64>,
    ) -> Result<(ConstantOffsets, bool)> {
        let original = &self.instruction;
        match self.relax {
            Relax::Simple => {
                encoder.encode(original, ip)?;
                Ok((encoder.constant_offsets(), true))
            }
            Relax::IpRelMem { form, target, .. } => {
                let instr = match form {
                    IpRelForm::Fixed | IpRelForm::Unresolved => *original,
                    IpRelForm::Rip => with_ip_rel_base(original, Register::RIP),
                    IpRelForm::Eip => with_ip_rel_base(original, Register::EIP),
                    IpRelForm::Unreachable => {
                        return Err(encode_error!(
                            original.ip,
                            "{:#x} is out of reach of RIP-relative addressing and above 4 GiB",
                            target
                        ));
                    }
                };
                encoder.encode(&instr, ip)?;
                Ok((encoder.constant_offsets(), true))
            }
            Relax::Branch {
                kind, form, sizes, ..
            } => {
                self.encode_branch(encoder, kind, form, sizes, ip, target, slot)?;
                // a long Jmp/Call is still one `FF /4` or `FF /2` instruction
                let single = !matches!(
                    (kind, form),
                    (BranchKind::Jcc, BranchForm::Long)
                        | (BranchKind::Loop, BranchForm::Near | BranchForm::Long)
                );
                Ok((ConstantOffsets::default(), single))
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn encode_branch(
        &self,
        encoder: &mut Encoder,
        kind: BranchKind,
        form: BranchForm,
        sizes: FormSizes,
        ip: u64,
        target: u64,
        slot: Option<u64>,
    ) -> Result<()> {
        let original = &self.instruction;
        let code = original.code;
        let slot = || {
            slot.ok_or_else(|| {
                malformed_error!("indirect branch at {:#x} has no pointer slot", original.ip)
            })
        };
        let mask = encoder.bitness().address_mask();
        let end = ip.wrapping_add(u64::from(self.size)) & mask;

        match (kind, form) {
            (_, BranchForm::Unresolved) => {
                return Err(malformed_error!(
                    "branch at {:#x} was never resolved",
                    original.ip
                ));
            }
            (_, BranchForm::Fixed) => {
                encoder.encode(&with_target(original, code, target), ip)?;
            }
            (BranchKind::Xbegin, BranchForm::Short) => {
                encoder.encode(&with_target(original, Code::Xbegin_rel16, target), ip)?;
            }
            (BranchKind::Xbegin, _) => {
                encoder.encode(&with_target(original, Code::Xbegin_rel32, target), ip)?;
            }
            (BranchKind::Loop, BranchForm::Short) => {
                encoder.encode(&with_target(original, code, target), ip)?;
            }
            (BranchKind::Loop, _) => {
                // loop L1 ; jmp short L2 ; L1: jmp target ; L2:
                let (jmp_short, jmp_near) = jmp_codes(encoder.bitness());
                let skip_ip = ip.wrapping_add(u64::from(sizes.short)) & mask;
                let mut skip = Instruction::with_code(jmp_short);
                skip.ip = original.ip;
                skip.operands[0] = Operand::NearBranch(end);
                let jump_ip = skip_ip.wrapping_add(u64::from(measure(encoder, &skip))) & mask;

                encoder.encode(&with_target(original, code, jump_ip), ip)?;
                encoder.encode(&skip, skip_ip)?;
                if form == BranchForm::Long {
                    encoder.encode(&indirect(original, Code::Jmp_rm64, slot()?), jump_ip)?;
                } else {
                    let mut jump = Instruction::with_code(jmp_near);
                    jump.ip = original.ip;
                    jump.operands[0] = Operand::NearBranch(target);
                    encoder.encode(&jump, jump_ip)?;
                }
            }
            (_, BranchForm::Short) => {
                encoder.encode(&with_target(original, code.to_short_branch(), target), ip)?;
            }
            (_, BranchForm::Near) => {
                encoder.encode(&with_target(original, code.to_near_branch(), target), ip)?;
            }
            (BranchKind::Jmp, BranchForm::Long) => {
                encoder.encode(&indirect(original, Code::Jmp_rm64, slot()?), ip)?;
            }
            (BranchKind::Call, BranchForm::Long) => {
                encoder.encode(&indirect(original, Code::Call_rm64, slot()?), ip)?;
            }
            (BranchKind::Jcc, BranchForm::Long) => {
                // j!cc skip ; jmp [rip+slot] ; skip:
                let inverted = code.negate_condition_code().to_short_branch();
                encoder.encode(&with_target(original, inverted, end), ip)?;
                let jump_ip = ip.wrapping_add(u64::from(sizes.short)) & mask;
                encoder.encode(&indirect(original, Code::Jmp_rm64, slot()?), jump_ip)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(code: Code, ip: u64, target: u64) -> Instruction {
        let mut instr = Instruction::with_code(code);
        instr.ip = ip;
        instr.operands[0] = Operand::NearBranch(target);
        instr
    }

    fn wrap(bitness: Bitness, instruction: Instruction) -> Instr {
        let mut encoder = Encoder::new(bitness);
        Instr::new(&mut encoder, instruction, true, Target::Address)
    }

    fn site(layouts: &[Layout], index: usize) -> Site<'_> {
        Site {
            bitness: Bitness::Bit64,
            layouts,
            block: 0,
            index,
        }
    }

    #[test]
    fn test_branch_sizes_per_kind() {
        let jmp = wrap(Bitness::Bit64, branch(Code::Jmp_rel32_64, 0, 0x100));
        let Relax::Branch { sizes, form, .. } = jmp.relax else {
            panic!("not a branch");
        };
        assert_eq!(form, BranchForm::Unresolved);
        assert_eq!((sizes.short, sizes.near, sizes.long), (2, 5, 6));
        assert_eq!(jmp.size, 6);
        assert_eq!(jmp.min_size(), 2);

        let jcc = wrap(Bitness::Bit64, branch(Code::Je_rel8_64, 0, 0x100));
        assert_eq!(jcc.size, 8);

        let call = wrap(Bitness::Bit64, branch(Code::Call_rel32_64, 0, 0x100));
        assert_eq!((call.size, call.min_size()), (6, 5));

        let jmp32 = wrap(Bitness::Bit32, branch(Code::Jmp_rel8_32, 0, 0x100));
        assert_eq!((jmp32.size, jmp32.min_size()), (5, 2));

        let lp = wrap(Bitness::Bit64, branch(Code::Loop_rel8_64_RCX, 0, 0x100));
        let Relax::Branch { sizes, .. } = lp.relax else {
            panic!("not a branch");
        };
        assert_eq!((sizes.short, sizes.near, sizes.long), (2, 9, 10));
    }

    #[test]
    fn test_near_branch_in_reach_shrinks_once_and_settles() {
        let mut jmp = wrap(Bitness::Bit64, branch(Code::Jmp_rel32_64, 0x1000, 0x9000));
        let layouts = [Layout {
            current: vec![0x1000],
            minimum: vec![0x1000],
        }];
        assert!(jmp.optimize(&site(&layouts, 0)));
        assert!(matches!(
            jmp.relax,
            Relax::Branch {
                form: BranchForm::Near,
                ..
            }
        ));
        assert_eq!(jmp.size, 5);
        assert!(!jmp.is_settled());
        assert!(!jmp.optimize(&site(&layouts, 0)));
    }

    #[test]
    fn test_unreachable_target_goes_long_and_stays() {
        let mut jmp = wrap(
            Bitness::Bit64,
            branch(Code::Jmp_rel32_64, 0x1000, 0x7FFF_0000_0000),
        );
        let layouts = [Layout {
            current: vec![0x1000],
            minimum: vec![0x1000],
        }];
        assert!(jmp.optimize(&site(&layouts, 0)));
        assert!(jmp.is_long());
        assert!(jmp.is_settled());
        assert_eq!(jmp.size, 6);
        assert!(!jmp.optimize(&site(&layouts, 0)));
    }

    #[test]
    fn test_address_interval_blocks_optimistic_short_form() {
        // Reachable from the current layout but not from the smallest one.
        let mut jmp = wrap(Bitness::Bit64, branch(Code::Jmp_rel32_64, 0x1100, 0x1000));
        let layouts = [Layout {
            current: vec![0x1000],
            minimum: vec![0x0F00],
        }];
        let mut shrunk = jmp.clone();
        assert!(shrunk.optimize(&site(&layouts, 0)));
        assert!(!matches!(
            shrunk.relax,
            Relax::Branch {
                form: BranchForm::Short,
                ..
            }
        ));

        let exact = [Layout {
            current: vec![0x0FF0],
            minimum: vec![0x0FF0],
        }];
        assert!(jmp.optimize(&site(&exact, 0)));
        assert_eq!(jmp.size, 2);
        assert!(jmp.is_settled());
    }

    #[test]
    fn test_ip_relative_forms() {
        let mut mov = Instruction::with_code(Code::Mov_r32_rm32);
        mov.ip = 0x1000;
        mov.operands[0] = Operand::Register(Register::EAX);
        mov.operands[1] = Operand::Memory(MemoryOperand::with_base_displ(Register::RIP, 0x2000, 4));
        let layouts = [Layout {
            current: vec![0x1_0000_0000],
            minimum: vec![0x1_0000_0000],
        }];

        let mut far = wrap(Bitness::Bit64, mov);
        assert_eq!((far.size, far.min_size()), (7, 6));
        assert!(far.optimize(&site(&layouts, 0)));
        assert_eq!(
            far.relax,
            Relax::IpRelMem {
                form: IpRelForm::Eip,
                target: 0x2000,
                rip: 6,
                eip: 7
            }
        );

        let mut encoder = Encoder::new(Bitness::Bit64);
        far.encode(&mut encoder, 0x1_0000_0000, 0, None).unwrap();
        assert_eq!(encoder.buffer()[..3], [0x67, 0x8B, 0x05]);

        if let Operand::Memory(mem) = &mut mov.operands[1] {
            mem.displacement = 0x7000_0000_0000;
        }
        let mut unreachable = wrap(Bitness::Bit64, mov);
        assert!(unreachable.optimize(&site(&layouts, 0)));
        assert!(unreachable
            .encode(&mut Encoder::new(Bitness::Bit64), 0x1_0000_0000, 0, None)
            .is_err());
    }

    #[test]
    fn test_long_jcc_skips_over_indirect_jump() {
        let mut jcc = wrap(Bitness::Bit64, branch(Code::Je_rel32_64, 0x1000, 0x7000_0000_0000));
        let layouts = [Layout {
            current: vec![0x1000],
            minimum: vec![0x1000],
        }];
        assert!(jcc.optimize(&site(&layouts, 0)));
        let mut encoder = Encoder::new(Bitness::Bit64);
        let (_, single) = jcc
            .encode(&mut encoder, 0x1000, 0x7000_0000_0000, Some(0x1010))
            .unwrap();
        assert!(!single);
        // jne +6 ; jmp [rip+8]
        assert_eq!(
            encoder.buffer(),
            [0x75, 0x06, 0xFF, 0x25, 0x08, 0x00, 0x00, 0x00]
        );
    }
}
