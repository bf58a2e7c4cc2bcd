//! Integration tests for block relocation and branch relaxation.
//!
//! Blocks are built from decoded bytes or from hand-made instructions, relocated with the
//! [`BlockEncoder`] and checked by decoding the output again.

use x86scope::{io::read_le_at, prelude::*};

const FAR: u64 = 0x7FFF_0000_0000;

fn jmp(ip: u64, target: u64) -> Instruction {
    let mut instr = Instruction::with_code(Code::Jmp_rel32_64);
    instr.ip = ip;
    instr.operands[0] = Operand::NearBranch(target);
    instr
}

fn ret(ip: u64) -> Instruction {
    let mut instr = Instruction::with_code(Code::Retnq);
    instr.ip = ip;
    instr
}

fn full_config() -> BlockEncoderConfig {
    BlockEncoderConfig {
        return_new_instruction_offsets: true,
        return_reloc_infos: true,
        return_constant_offsets: true,
        ..BlockEncoderConfig::default()
    }
}

fn decode_all(bitness: Bitness, bytes: &[u8], ip: u64) -> Vec<Instruction> {
    Decoder::new(bitness, bytes, ip, DecoderOptions::NONE).collect()
}

/// Reads the 8-byte pointer slot a `jmp [rip+disp]` refers to.
fn slot_value(result: &BlockEncoderResult, instr: &Instruction) -> Result<u64> {
    let slot = instr
        .memory_operand()
        .map(|mem| mem.displacement)
        .expect("indirect jump has a memory operand");
    let mut offset = (slot - result.rip) as usize;
    read_le_at::<u64>(&result.code_buffer, &mut offset)
}

/// 200 near jumps: every fifth one targets an address the new location cannot reach with a
/// 32-bit displacement, the others target the `ret` that ends the block.
#[test]
fn test_only_unreachable_jumps_become_indirect() -> Result<()> {
    const COUNT: usize = 200;
    let end = 0x1000 + 5 * COUNT as u64;
    let is_far = |i: usize| i % 5 == 0;

    let mut instructions: Vec<Instruction> = (0..COUNT)
        .map(|i| {
            let target = if is_far(i) { FAR } else { end };
            jmp(0x1000 + 5 * i as u64, target)
        })
        .collect();
    instructions.push(ret(end));

    let rip = 0x10_0000_0000;
    let result = BlockEncoder::encode(
        Bitness::Bit64,
        InstructionBlock::new(&instructions, rip),
        &full_config(),
    )?;

    let offsets = &result.new_instruction_offsets;
    assert_eq!(offsets.len(), COUNT + 1);
    assert!(offsets.iter().all(Option::is_some));
    let code_len = offsets[COUNT].unwrap_or_default() as usize + 1;
    let new_end = rip + code_len as u64 - 1;

    let decoded = decode_all(Bitness::Bit64, &result.code_buffer[..code_len], rip);
    assert_eq!(decoded.len(), COUNT + 1);
    assert_eq!(decoded[COUNT].code, Code::Retnq);

    let mut indirect = 0;
    for (i, instr) in decoded[..COUNT].iter().enumerate() {
        assert_eq!(Some((instr.ip - rip) as u32), offsets[i]);
        if is_far(i) {
            assert_eq!(instr.code, Code::Jmp_rm64, "jump {i}");
            assert!(instr.is_ip_rel_memory());
            assert_eq!(slot_value(&result, instr)?, FAR);
            indirect += 1;
        } else {
            assert!(
                matches!(instr.code, Code::Jmp_rel8_64 | Code::Jmp_rel32_64),
                "jump {i} is {:?}",
                instr.code
            );
            assert_eq!(instr.near_branch_target(), Some(new_end));
        }
    }
    assert_eq!(indirect, COUNT / 5);

    assert_eq!(result.reloc_infos.len(), COUNT / 5);
    for reloc in &result.reloc_infos {
        assert_eq!(reloc.kind, RelocKind::Offset64);
        assert_eq!(reloc.address % 8, 0);
        let mut offset = (reloc.address - rip) as usize;
        assert_eq!(read_le_at::<u64>(&result.code_buffer, &mut offset)?, FAR);
    }
    Ok(())
}

#[test]
fn test_short_jcc_boundary() -> Result<()> {
    for (nops, short) in [(127usize, true), (128, false)] {
        // jne near over `nops` nops to a ret
        let mut bytes = vec![0x0F, 0x85];
        bytes.extend_from_slice(&(nops as u32).to_le_bytes());
        bytes.extend(std::iter::repeat(0x90).take(nops));
        bytes.push(0xC3);

        let instructions = decode_all(Bitness::Bit64, &bytes, 0x1000);
        let result = BlockEncoder::encode(
            Bitness::Bit64,
            InstructionBlock::new(&instructions, 0x5000),
            &BlockEncoderConfig::default(),
        )?;

        if short {
            assert_eq!(result.code_buffer[..2], [0x75, 0x7F]);
            assert_eq!(result.code_buffer.len(), 2 + nops + 1);
        } else {
            assert_eq!(result.code_buffer[..6], [0x0F, 0x85, 0x80, 0x00, 0x00, 0x00]);
            assert_eq!(result.code_buffer.len(), 6 + nops + 1);
        }
    }
    Ok(())
}

/// The backward jump only fits in a short form once the conditional jump has shrunk.
#[test]
fn test_relaxation_cascades() -> Result<()> {
    let mut bytes = vec![0x90];
    // je near to the final ret: skips 122 nops and a 5-byte jmp
    bytes.extend_from_slice(&[0x0F, 0x84, 127, 0x00, 0x00, 0x00]);
    bytes.extend(std::iter::repeat(0x90).take(122));
    // jmp near back to the first nop
    let back = -(1 + 6 + 122 + 5i32);
    bytes.push(0xE9);
    bytes.extend_from_slice(&back.to_le_bytes());
    bytes.push(0xC3);

    let instructions = decode_all(Bitness::Bit64, &bytes, 0x1000);
    assert_eq!(instructions[1].near_branch_target(), Some(0x1000 + 134));
    assert_eq!(instructions[124].near_branch_target(), Some(0x1000));

    let result = BlockEncoder::encode(
        Bitness::Bit64,
        InstructionBlock::new(&instructions, 0x2000),
        &BlockEncoderConfig::default(),
    )?;
    let code = &result.code_buffer;
    assert_eq!(code.len(), 128);
    assert_eq!(code[1..3], [0x74, 124]);
    assert_eq!(code[125..], [0xEB, 0x81, 0xC3]);
    Ok(())
}

#[test]
fn test_rip_relative_falls_back_to_eip() -> Result<()> {
    // mov eax, [rip+0xFFA] at 0x1000 reads 0x2000
    let bytes = [0x8B, 0x05, 0xFA, 0x0F, 0x00, 0x00];
    let instructions = decode_all(Bitness::Bit64, &bytes, 0x1000);
    let rip = 0x7000_0000_0000;

    let result = BlockEncoder::encode(
        Bitness::Bit64,
        InstructionBlock::new(&instructions, rip),
        &full_config(),
    )?;
    assert_eq!(
        result.code_buffer,
        [0x67, 0x8B, 0x05, 0xF9, 0x1F, 0x00, 0x00]
    );
    let offsets = result.constant_offsets[0];
    assert_eq!((offsets.displacement_offset, offsets.displacement_size), (3, 4));
    Ok(())
}

#[test]
fn test_rip_relative_beyond_reach_fails() {
    let mut mov = Instruction::with_code(Code::Mov_r32_rm32);
    mov.ip = 0x1000;
    mov.operands[0] = Operand::Register(Register::EAX);
    mov.operands[1] = Operand::Memory(MemoryOperand::with_base_displ(Register::RIP, FAR, 4));

    let result = BlockEncoder::encode(
        Bitness::Bit64,
        InstructionBlock::new(&[mov], 0x1000),
        &BlockEncoderConfig::default(),
    );
    assert!(matches!(result, Err(Error::Encode { address: 0x1000, .. })));
}

#[test]
fn test_32bit_block_relocation() -> Result<()> {
    // call +0 ; jne near back to the call ; ret
    let bytes = [
        0xE8, 0x00, 0x00, 0x00, 0x00, //
        0x0F, 0x85, 0xF5, 0xFF, 0xFF, 0xFF, //
        0xC3,
    ];
    let instructions = decode_all(Bitness::Bit32, &bytes, 0x40_1000);
    assert_eq!(instructions[1].near_branch_target(), Some(0x40_1000));

    let result = BlockEncoder::encode(
        Bitness::Bit32,
        InstructionBlock::new(&instructions, 0x50_0000),
        &full_config(),
    )?;
    // the call keeps its near form, the jne shrinks
    assert_eq!(
        result.code_buffer,
        [0xE8, 0x00, 0x00, 0x00, 0x00, 0x75, 0xF9, 0xC3]
    );
    assert_eq!(result.new_instruction_offsets, [Some(0), Some(5), Some(7)]);
    assert!(result.reloc_infos.is_empty());
    Ok(())
}

#[test]
fn test_parallel_matches_sequential_for_independent_blocks() -> Result<()> {
    let first = decode_all(Bitness::Bit64, &[0xEB, 0x00, 0x90], 0x1000);
    let second = decode_all(Bitness::Bit64, &[0x74, 0x00, 0xC3], 0x2000);
    let third: Vec<Instruction> = vec![jmp(0x3000, FAR)];
    let blocks = [
        InstructionBlock::new(&first, 0x10_0000),
        InstructionBlock::new(&second, 0x20_0000),
        InstructionBlock::new(&third, 0x30_0000),
    ];

    let config = full_config();
    let sequential = BlockEncoder::encode_blocks(Bitness::Bit64, &blocks, &config)?;
    let parallel = BlockEncoder::encode_blocks_parallel(Bitness::Bit64, &blocks, &config)?;
    assert_eq!(sequential.len(), 3);
    for (a, b) in sequential.iter().zip(&parallel) {
        assert_eq!(a.rip, b.rip);
        assert_eq!(a.code_buffer, b.code_buffer);
        assert_eq!(a.reloc_infos, b.reloc_infos);
    }
    assert_eq!(parallel[2].reloc_infos.len(), 1);
    Ok(())
}

/// A 16 or 32-bit block placed at the top of the address space runs on at address 0.
#[test]
fn test_legacy_block_wraps_around_address_space() -> Result<()> {
    for (bitness, near, rip, ret) in [
        (Bitness::Bit32, vec![0xE9, 0x20, 0x00, 0x00, 0x00], 0xFFFF_FFF0u64, Code::Retnd),
        (Bitness::Bit16, vec![0xE9, 0x20, 0x00], 0xFFF0, Code::Retnw),
    ] {
        // jmp near over 32 nops to the ret
        let mut bytes = near;
        bytes.extend(std::iter::repeat(0x90).take(32));
        bytes.push(0xC3);
        let instructions = decode_all(bitness, &bytes, 0x1000);
        assert_eq!(instructions.len(), 34);

        let result = BlockEncoder::encode(
            bitness,
            InstructionBlock::new(&instructions, rip),
            &full_config(),
        )?;

        let mut expected = vec![0xEB, 0x20];
        expected.extend(std::iter::repeat(0x90).take(32));
        expected.push(0xC3);
        assert_eq!(result.code_buffer, expected, "{bitness:?}");
        assert_eq!(result.new_instruction_offsets[33], Some(34));
        assert_eq!(decode_all(bitness, &result.code_buffer, rip)[33].code, ret);
    }
    Ok(())
}
