//! Block encoder with branch relaxation.
//!
//! The [`BlockEncoder`] re-encodes a list of instructions at a new address. Branch targets that
//! are instructions of the encoded blocks follow them to their new location; every other target
//! stays where it is. With [`BlockEncoderConfig::fix_branches`] set, each relative branch is
//! re-sized to the smallest form that reaches its target:
//!
//! | Kind      | Short    | Near                              | Long (64-bit only)                   |
//! |-----------|----------|-----------------------------------|--------------------------------------|
//! | `JMP`     | `EB rel8`| `E9 rel32`                        | `FF 25 [rip+slot]`                   |
//! | `Jcc`     | `7x rel8`| `0F 8x rel32`                     | `j!cc +6 ; FF 25 [rip+slot]`         |
//! | `CALL`    |          | `E8 rel32`                        | `FF 15 [rip+slot]`                   |
//! | `LOOP`    | `Ex rel8`| `loop L1 ; jmp L2 ; L1: jmp rel32`| `loop L1 ; jmp L2 ; L1: FF 25 [..]`  |
//! | `XBEGIN`  | `rel16`  | `rel32`                           |                                      |
//!
//! A long branch jumps through a pointer slot that holds the absolute target. Slots follow the
//! code of their block, 8-byte aligned and padded with `0xCC`.
//!
//! Sizes are found by a fixed-point loop. Every branch starts at its largest form, and each pass
//! lays the blocks out and lets every branch pick a smaller form it is sure to fit. A form is
//! never given up for a larger one, so the loop ends after at most one pass per branch.
//!
//! # Examples
//!
//! ```rust
//! use x86scope::{
//!     Bitness, BlockEncoder, BlockEncoderConfig, Decoder, DecoderOptions, InstructionBlock,
//! };
//!
//! // jmp near +0 ; nop
//! let bytes = [0xE9, 0x00, 0x00, 0x00, 0x00, 0x90];
//! let decoder = Decoder::new(Bitness::Bit64, &bytes, 0x1000, DecoderOptions::NONE);
//! let instructions: Vec<_> = decoder.collect();
//!
//! let block = InstructionBlock::new(&instructions, 0x7000);
//! let result = BlockEncoder::encode(Bitness::Bit64, block, &BlockEncoderConfig::default())?;
//! assert_eq!(result.code_buffer, [0xEB, 0x00, 0x90]);
//! # Ok::<(), x86scope::Error>(())
//! ```

mod instr;

use std::collections::{hash_map::Entry, HashMap};

use log::debug;
use rayon::prelude::*;

use crate::{
    encoder::{ConstantOffsets, Encoder},
    instruction::Instruction,
    io::write_le,
    Bitness, Error, Result,
};

use self::instr::{Instr, Layout, Site, Target};

/// Size of a pointer slot.
const SLOT_SIZE: u64 = 8;

/// A list of instructions to encode at one address.
///
/// The `ip` of each instruction is its original address. It is used to resolve branches
/// between instructions and is reported in errors.
#[derive(Debug, Clone, Copy)]
pub struct InstructionBlock<'a> {
    /// The instructions, in output order
    pub instructions: &'a [Instruction],
    /// Address of the first byte of the encoded block
    pub rip: u64,
}

impl<'a> InstructionBlock<'a> {
    /// Create a new block.
    ///
    /// ## Arguments
    /// * 'instructions' - The instructions, in output order
    /// * 'rip'          - Address the block will be placed at
    #[must_use]
    pub fn new(instructions: &'a [Instruction], rip: u64) -> Self {
        InstructionBlock { instructions, rip }
    }
}

/// Block encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockEncoderConfig {
    /// Re-size relative branches to the smallest form that reaches. With `false`, every
    /// instruction keeps its code and only addresses are updated.
    pub fix_branches: bool,
    /// Upper bound on optimize passes. `None` allows one pass per branch plus one.
    pub max_passes: Option<usize>,
    /// Fill [`BlockEncoderResult::new_instruction_offsets`]
    pub return_new_instruction_offsets: bool,
    /// Fill [`BlockEncoderResult::reloc_infos`]
    pub return_reloc_infos: bool,
    /// Fill [`BlockEncoderResult::constant_offsets`]
    pub return_constant_offsets: bool,
}

impl Default for BlockEncoderConfig {
    fn default() -> Self {
        BlockEncoderConfig {
            fix_branches: true,
            max_passes: None,
            return_new_instruction_offsets: false,
            return_reloc_infos: false,
            return_constant_offsets: false,
        }
    }
}

/// Kind of a relocation in the encoded block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum RelocKind {
    /// A 64-bit absolute address
    Offset64,
}

/// A location in the encoded block that holds an absolute address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelocInfo {
    /// What is stored there
    pub kind: RelocKind,
    /// Address of the relocated field
    pub address: u64,
}

/// The encoded form of one [`InstructionBlock`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockEncoderResult {
    /// Address of `code_buffer[0]`
    pub rip: u64,
    /// Code followed by the pointer slots
    pub code_buffer: Vec<u8>,
    /// One entry per pointer slot, if requested
    pub reloc_infos: Vec<RelocInfo>,
    /// Offset of each instruction in `code_buffer`, if requested. `None` for an instruction that
    /// was rewritten into several instructions.
    pub new_instruction_offsets: Vec<Option<u32>>,
    /// Constant offsets of each instruction, if requested
    pub constant_offsets: Vec<ConstantOffsets>,
}

struct Block {
    rip: u64,
    instrs: Vec<Instr>,
    /// Index of the instruction that owns each pointer slot
    slots: Vec<usize>,
}

/// Encodes blocks of instructions at new addresses, relaxing their branches.
pub struct BlockEncoder {
    bitness: Bitness,
    config: BlockEncoderConfig,
    blocks: Vec<Block>,
}

impl BlockEncoder {
    /// Encodes one block.
    ///
    /// ## Arguments
    /// * 'bitness' - The processor mode
    /// * 'block'   - The instructions and their new address
    /// * 'config'  - Encoder settings
    ///
    /// # Errors
    /// - [`Error::Encode`] if an instruction cannot be encoded, with its original address
    /// - [`Error::DuplicateAddress`] if two instructions share a non-zero original address
    /// - [`Error::RelaxationLimit`] if relaxation needs more than `config.max_passes` passes
    ///
    /// # Examples
    ///
    /// ```rust
    /// use x86scope::{
    ///     Bitness, BlockEncoder, BlockEncoderConfig, Code, Instruction, InstructionBlock, Operand,
    /// };
    ///
    /// // A call to a function 64 GiB away can only be done through a pointer.
    /// let mut call = Instruction::with_code(Code::Call_rel32_64);
    /// call.ip = 0x1000;
    /// call.operands[0] = Operand::NearBranch(0x10_0000_0000);
    ///
    /// let config = BlockEncoderConfig {
    ///     return_reloc_infos: true,
    ///     ..BlockEncoderConfig::default()
    /// };
    /// let instructions = [call];
    /// let block = InstructionBlock::new(&instructions, 0x1000);
    /// let result = BlockEncoder::encode(Bitness::Bit64, block, &config)?;
    /// assert_eq!(result.code_buffer[..6], [0xFF, 0x15, 0x02, 0x00, 0x00, 0x00]);
    /// assert_eq!(result.reloc_infos[0].address, 0x1008);
    /// # Ok::<(), x86scope::Error>(())
    /// ```
    pub fn encode(
        bitness: Bitness,
        block: InstructionBlock<'_>,
        config: &BlockEncoderConfig,
    ) -> Result<BlockEncoderResult> {
        let mut results = BlockEncoder::encode_blocks(bitness, &[block], config)?;
        results
            .pop()
            .ok_or_else(|| malformed_error!("block encoder produced no result"))
    }

    /// Encodes several blocks together.
    ///
    /// A branch into another block follows the target instruction to its new address. Results
    /// are returned in block order.
    ///
    /// # Errors
    /// See [`BlockEncoder::encode`].
    pub fn encode_blocks(
        bitness: Bitness,
        blocks: &[InstructionBlock<'_>],
        config: &BlockEncoderConfig,
    ) -> Result<Vec<BlockEncoderResult>> {
        let mut encoder = BlockEncoder::new(bitness, blocks, config)?;
        encoder.relax()?;
        encoder.finish()
    }

    /// Encodes independent blocks in parallel.
    ///
    /// Each block is relaxed on its own, so a branch into another block is treated like any
    /// other address outside the block and keeps its original target.
    ///
    /// # Errors
    /// See [`BlockEncoder::encode`]. If several blocks fail, any one of their errors is reported.
    pub fn encode_blocks_parallel(
        bitness: Bitness,
        blocks: &[InstructionBlock<'_>],
        config: &BlockEncoderConfig,
    ) -> Result<Vec<BlockEncoderResult>> {
        blocks
            .par_iter()
            .map(|block| BlockEncoder::encode(bitness, *block, config))
            .collect()
    }

    fn new(
        bitness: Bitness,
        blocks: &[InstructionBlock<'_>],
        config: &BlockEncoderConfig,
    ) -> Result<Self> {
        let mut to_instr: HashMap<u64, (usize, usize)> = HashMap::new();
        let mut zero_shared = false;
        for (block, info) in blocks.iter().enumerate() {
            for (index, instruction) in info.instructions.iter().enumerate() {
                match to_instr.entry(instruction.ip) {
                    Entry::Vacant(entry) => {
                        entry.insert((block, index));
                    }
                    Entry::Occupied(_) if instruction.ip == 0 => zero_shared = true,
                    Entry::Occupied(_) => return Err(Error::DuplicateAddress(instruction.ip)),
                }
            }
        }
        // Instructions built from scratch all sit at 0; nothing can branch to them.
        if zero_shared {
            to_instr.remove(&0);
        }

        let resolve = |address: u64| match to_instr.get(&address) {
            Some(&(block, index)) => Target::Instr { block, index },
            None => Target::Address(address),
        };
        let mut scratch = Encoder::new(bitness);
        let blocks = blocks
            .iter()
            .map(|info| Block {
                rip: info.rip,
                instrs: info
                    .instructions
                    .iter()
                    .map(|instruction| {
                        Instr::new(&mut scratch, *instruction, config.fix_branches, &resolve)
                    })
                    .collect(),
                slots: Vec::new(),
            })
            .collect();

        Ok(BlockEncoder {
            bitness,
            config: *config,
            blocks,
        })
    }

    fn layouts(&self) -> Vec<Layout> {
        let mask = self.bitness.address_mask();
        self.blocks
            .iter()
            .map(|block| {
                let mut layout = Layout {
                    current: Vec::with_capacity(block.instrs.len()),
                    minimum: Vec::with_capacity(block.instrs.len()),
                };
                let start = block.rip & mask;
                let (mut current, mut minimum) = (start, start);
                for instr in &block.instrs {
                    layout.current.push(current);
                    layout.minimum.push(minimum);
                    current = current.wrapping_add(u64::from(instr.size)) & mask;
                    minimum = minimum.wrapping_add(u64::from(instr.min_size())) & mask;
                }
                layout
            })
            .collect()
    }

    fn unsettled(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(|block| &block.instrs)
            .filter(|instr| !instr.is_settled())
            .count()
    }

    /// Runs optimize passes until no instruction changes. Returns the number of passes.
    fn relax(&mut self) -> Result<usize> {
        let budget = self
            .config
            .max_passes
            .unwrap_or_else(|| self.unsettled() + 1);
        let bitness = self.bitness;
        let mut passes = 0;

        while self.unsettled() != 0 {
            if passes == budget {
                return Err(Error::RelaxationLimit { passes });
            }
            passes += 1;

            let layouts = self.layouts();
            let mut changed = 0usize;
            for (block_index, block) in self.blocks.iter_mut().enumerate() {
                for (index, instr) in block.instrs.iter_mut().enumerate() {
                    let site = Site {
                        bitness,
                        layouts: &layouts,
                        block: block_index,
                        index,
                    };
                    if !instr.optimize(&site) {
                        continue;
                    }
                    changed += 1;
                    if instr.is_long() && instr.slot.is_none() {
                        instr.slot = Some(block.slots.len());
                        block.slots.push(index);
                    }
                }
            }

            let size: u64 = self
                .blocks
                .iter()
                .flat_map(|block| &block.instrs)
                .map(|instr| u64::from(instr.size))
                .sum();
            debug!("relaxation pass {passes}: {size} bytes, {changed} changed");
            if changed == 0 {
                break;
            }
        }

        debug!("relaxation converged after {passes} passes");
        Ok(passes)
    }

    fn finish(self) -> Result<Vec<BlockEncoderResult>> {
        let layouts = self.layouts();
        let resolve = |target: Target| match target {
            Target::Instr { block, index } => layouts[block].current[index],
            Target::Address(address) => address,
        };

        let mut results = Vec::with_capacity(self.blocks.len());
        for (block, layout) in self.blocks.iter().zip(&layouts) {
            let code_size: u64 = block.instrs.iter().map(|instr| u64::from(instr.size)).sum();
            let code_end = block.rip.wrapping_add(code_size);
            let slots_base = code_end.wrapping_add(SLOT_SIZE - 1) & !(SLOT_SIZE - 1);
            let capacity = (slots_base.wrapping_sub(block.rip)
                + SLOT_SIZE * block.slots.len() as u64) as usize;

            let mut encoder = Encoder::with_capacity(self.bitness, capacity);
            let mut result = BlockEncoderResult {
                rip: block.rip,
                ..BlockEncoderResult::default()
            };
            for (instr, &ip) in block.instrs.iter().zip(&layout.current) {
                let target = instr.target().map_or(0, resolve);
                let slot = instr
                    .slot
                    .map(|slot| slots_base.wrapping_add(SLOT_SIZE * slot as u64));

                let start = encoder.buffer().len();
                let (offsets, single) = instr.encode(&mut encoder, ip, target, slot)?;
                let written = encoder.buffer().len() - start;
                if written != instr.size as usize {
                    return Err(malformed_error!(
                        "instruction at {:#x} was laid out as {} bytes but encoded as {}",
                        instr.instruction.ip,
                        instr.size,
                        written
                    ));
                }

                if self.config.return_new_instruction_offsets {
                    let offset = ip.wrapping_sub(block.rip) & self.bitness.address_mask();
                    result.new_instruction_offsets.push(single.then_some(offset as u32));
                }
                if self.config.return_constant_offsets {
                    result.constant_offsets.push(offsets);
                }
            }

            let mut buffer = encoder.take_buffer();
            if !block.slots.is_empty() {
                buffer.resize(slots_base.wrapping_sub(block.rip) as usize, 0xCC);
                for (slot, &owner) in block.slots.iter().enumerate() {
                    let target = block.instrs[owner].target().map_or(0, resolve);
                    write_le(&mut buffer, target);
                    if self.config.return_reloc_infos {
                        result.reloc_infos.push(RelocInfo {
                            kind: RelocKind::Offset64,
                            address: slots_base.wrapping_add(SLOT_SIZE * slot as u64),
                        });
                    }
                }
            }
            result.code_buffer = buffer;
            results.push(result);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Code, Operand};

    fn branch(code: Code, ip: u64, target: u64) -> Instruction {
        let mut instr = Instruction::with_code(code);
        instr.ip = ip;
        instr.operands[0] = Operand::NearBranch(target);
        instr
    }

    fn nop(ip: u64) -> Instruction {
        let mut instr = Instruction::with_code(Code::Nopd);
        instr.ip = ip;
        instr
    }

    fn encode64(instructions: &[Instruction], rip: u64) -> Result<BlockEncoderResult> {
        let config = BlockEncoderConfig {
            return_new_instruction_offsets: true,
            return_reloc_infos: true,
            return_constant_offsets: true,
            ..BlockEncoderConfig::default()
        };
        BlockEncoder::encode(Bitness::Bit64, InstructionBlock::new(instructions, rip), &config)
    }

    #[test]
    fn test_empty_block() {
        let result = encode64(&[], 0x1000).unwrap();
        assert!(result.code_buffer.is_empty());
        assert!(result.new_instruction_offsets.is_empty());
    }

    #[test]
    fn test_in_block_near_jump_shrinks() {
        let block = [branch(Code::Jmp_rel32_64, 0x100, 0x105), nop(0x105)];
        let result = encode64(&block, 0x7000).unwrap();
        assert_eq!(result.code_buffer, [0xEB, 0x00, 0x90]);
        assert_eq!(result.new_instruction_offsets, [Some(0), Some(2)]);
    }

    #[test]
    fn test_backward_loop_stays_short() {
        let block = [nop(0x100), branch(Code::Loop_rel8_64_RCX, 0x101, 0x100)];
        let result = encode64(&block, 0x4000).unwrap();
        assert_eq!(result.code_buffer, [0x90, 0xE2, 0xFD]);
    }

    #[test]
    fn test_unreachable_jump_goes_through_pointer_slot() {
        let block = [branch(Code::Jmp_rel32_64, 0x100, 0x7000_0000_0000)];
        let result = encode64(&block, 0x1000).unwrap();
        assert_eq!(
            result.code_buffer,
            [
                0xFF, 0x25, 0x02, 0x00, 0x00, 0x00, 0xCC, 0xCC, // jmp [rip+2] ; padding
                0x00, 0x00, 0x00, 0x00, 0x00, 0x70, 0x00, 0x00, // slot
            ]
        );
        assert_eq!(
            result.reloc_infos,
            [RelocInfo {
                kind: RelocKind::Offset64,
                address: 0x1008
            }]
        );
    }

    #[test]
    fn test_long_jmp_and_call_keep_their_offsets() {
        let block = [
            branch(Code::Call_rel32_64, 0x100, 0x7000_0000_0000),
            branch(Code::Jmp_rel32_64, 0x105, 0x7000_0000_1000),
        ];
        let result = encode64(&block, 0x1000).unwrap();
        assert_eq!(result.new_instruction_offsets, [Some(0), Some(6)]);
        assert_eq!(result.code_buffer[..2], [0xFF, 0x15]);
        assert_eq!(result.code_buffer[6..8], [0xFF, 0x25]);
        assert_eq!(result.reloc_infos.len(), 2);
    }

    #[test]
    fn test_long_jcc_is_not_a_single_instruction() {
        let block = [branch(Code::Je_rel8_64, 0x100, 0x7000_0000_0000), nop(0x102)];
        let result = encode64(&block, 0x1000).unwrap();
        assert_eq!(result.new_instruction_offsets, [None, Some(8)]);
        assert_eq!(result.code_buffer[..3], [0x75, 0x06, 0xFF]);
    }

    #[test]
    fn test_near_loop_expands_to_three_jumps() {
        let block = [branch(Code::Loop_rel8_64_RCX, 0x100, 0x2000_0000)];
        let result = encode64(&block, 0x1000).unwrap();
        // loop +2 ; jmp short +5 ; jmp near target
        assert_eq!(result.code_buffer[..4], [0xE2, 0x02, 0xEB, 0x05]);
        assert_eq!(result.code_buffer[4], 0xE9);
        assert_eq!(result.code_buffer.len(), 9);
        assert_eq!(result.new_instruction_offsets, [None]);
    }

    #[test]
    fn test_verbatim_mode_keeps_forms() {
        let block = [branch(Code::Jmp_rel32_64, 0x100, 0x105), nop(0x105)];
        let config = BlockEncoderConfig {
            fix_branches: false,
            ..BlockEncoderConfig::default()
        };
        let result =
            BlockEncoder::encode(Bitness::Bit64, InstructionBlock::new(&block, 0x9000), &config)
                .unwrap();
        assert_eq!(result.code_buffer, [0xE9, 0x00, 0x00, 0x00, 0x00, 0x90]);
    }

    #[test]
    fn test_legacy_modes_never_go_long() {
        let block = [branch(Code::Call_rel32_32, 0x100, 0xF000_0000)];
        let result = BlockEncoder::encode(
            Bitness::Bit32,
            InstructionBlock::new(&block, 0x1000),
            &BlockEncoderConfig::default(),
        )
        .unwrap();
        assert_eq!(result.code_buffer.len(), 5);
        assert_eq!(result.code_buffer[0], 0xE8);
    }

    #[test]
    fn test_duplicate_addresses() {
        let block = [nop(0x10), nop(0x10)];
        assert!(matches!(
            encode64(&block, 0),
            Err(Error::DuplicateAddress(0x10))
        ));
        let block = [nop(0), nop(0)];
        assert_eq!(encode64(&block, 0).unwrap().code_buffer, [0x90, 0x90]);
    }

    #[test]
    fn test_pass_budget_is_enforced() {
        let block = [branch(Code::Jmp_rel32_64, 0x100, 0x105), nop(0x105)];
        let config = BlockEncoderConfig {
            max_passes: Some(0),
            ..BlockEncoderConfig::default()
        };
        let result =
            BlockEncoder::encode(Bitness::Bit64, InstructionBlock::new(&block, 0), &config);
        assert!(matches!(result, Err(Error::RelaxationLimit { passes: 0 })));
    }

    #[test]
    fn test_encode_error_carries_original_address() {
        let mut push = Instruction::with_code(Code::Push_r64);
        push.ip = 0x4242;
        push.operands[0] = Operand::Register(crate::Register::RAX);
        let result = BlockEncoder::encode(
            Bitness::Bit32,
            InstructionBlock::new(&[push], 0x1000),
            &BlockEncoderConfig::default(),
        );
        assert!(matches!(result, Err(Error::Encode { address: 0x4242, .. })));
    }

    #[test]
    fn test_branches_between_blocks() {
        let first = [branch(Code::Jmp_rel32_64, 0x100, 0x200)];
        let second = [nop(0x200)];
        let blocks = [
            InstructionBlock::new(&first, 0x1000),
            InstructionBlock::new(&second, 0x1010),
        ];
        let config = BlockEncoderConfig::default();

        let joint = BlockEncoder::encode_blocks(Bitness::Bit64, &blocks, &config).unwrap();
        assert_eq!(joint[0].code_buffer, [0xEB, 0x0E]);
        assert_eq!(joint[1].code_buffer, [0x90]);

        let separate =
            BlockEncoder::encode_blocks_parallel(Bitness::Bit64, &blocks, &config).unwrap();
        assert_eq!(separate[0].code_buffer, [0xE9, 0xFB, 0xF1, 0xFF, 0xFF]);
        assert_eq!(separate[1].rip, 0x1010);
    }
}
