//! Benchmarks for the single-instruction encoder and the block encoder.
//!
//! - Re-encoding a decoded stream instruction by instruction
//! - Relocating a branch-heavy block within reach of its targets
//! - Relocating the same block far away, forcing pointer slots
//! - Encoding independent blocks sequentially and in parallel

extern crate x86scope;

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use x86scope::{
    Bitness, BlockEncoder, BlockEncoderConfig, Code, Decoder, DecoderOptions, Encoder,
    Instruction, InstructionBlock, Operand,
};

const BASE: u64 = 0x40_0000;

/// Jumps and conditional jumps over nops; every eighth branch leaves the block.
fn branchy_block(base: u64, count: usize) -> Vec<Instruction> {
    let mut instructions = Vec::with_capacity(count * 2 + 1);
    let mut ip = base;
    let end = base + count as u64 * 7;
    for i in 0..count {
        let code = if i % 2 == 0 {
            Code::Jmp_rel32_64
        } else {
            Code::Jne_rel32_64
        };
        let mut branch = Instruction::with_code(code);
        branch.ip = ip;
        branch.operands[0] = Operand::NearBranch(if i % 8 == 0 { 0x1000 } else { end });
        instructions.push(branch);
        ip += 6;

        let mut nop = Instruction::with_code(Code::Nopd);
        nop.ip = ip;
        instructions.push(nop);
        ip += 1;
    }
    let mut ret = Instruction::with_code(Code::Retnq);
    ret.ip = end;
    instructions.push(ret);
    instructions
}

fn bench_reencode(c: &mut Criterion) {
    let code: Vec<u8> = [
        0x55, 0x48, 0x89, 0xE5, 0x48, 0x8B, 0x43, 0x08, 0x8B, 0x05, 0x10, 0x00, 0x00, 0x00, 0xC5,
        0xE8, 0x58, 0xCB, 0x5D, 0xC3,
    ]
    .repeat(128);
    let instructions: Vec<Instruction> =
        Decoder::new(Bitness::Bit64, &code, BASE, DecoderOptions::NONE).collect();

    c.bench_function("encoder_reencode", |b| {
        b.iter(|| {
            let mut encoder = Encoder::with_capacity(Bitness::Bit64, code.len());
            for instr in &instructions {
                encoder.encode(black_box(instr), instr.ip).unwrap();
            }
            black_box(encoder.take_buffer())
        });
    });
}

fn bench_relocate_near(c: &mut Criterion) {
    let instructions = branchy_block(BASE, 512);
    let config = BlockEncoderConfig::default();

    c.bench_function("block_relocate_near", |b| {
        b.iter(|| {
            let block = InstructionBlock::new(black_box(&instructions), 0x50_0000);
            black_box(BlockEncoder::encode(Bitness::Bit64, block, &config).unwrap())
        });
    });
}

fn bench_relocate_far(c: &mut Criterion) {
    let instructions = branchy_block(BASE, 512);
    let config = BlockEncoderConfig {
        return_reloc_infos: true,
        ..BlockEncoderConfig::default()
    };

    c.bench_function("block_relocate_far", |b| {
        b.iter(|| {
            let block = InstructionBlock::new(black_box(&instructions), 0x7FFF_0000_0000);
            black_box(BlockEncoder::encode(Bitness::Bit64, block, &config).unwrap())
        });
    });
}

fn bench_many_blocks(c: &mut Criterion) {
    let sources: Vec<Vec<Instruction>> = (0..32u64)
        .map(|i| branchy_block(BASE + i * 0x1000, 64))
        .collect();
    let blocks: Vec<InstructionBlock<'_>> = sources
        .iter()
        .enumerate()
        .map(|(i, instructions)| InstructionBlock::new(instructions, 0x100_0000 * (i as u64 + 1)))
        .collect();
    let config = BlockEncoderConfig::default();

    let mut group = c.benchmark_group("block_encoder_blocks");
    group.bench_function("sequential", |b| {
        b.iter(|| {
            black_box(
                BlockEncoder::encode_blocks(Bitness::Bit64, black_box(&blocks), &config).unwrap(),
            )
        });
    });
    group.bench_function("parallel", |b| {
        b.iter(|| {
            black_box(
                BlockEncoder::encode_blocks_parallel(Bitness::Bit64, black_box(&blocks), &config)
                    .unwrap(),
            )
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_reencode,
    bench_relocate_near,
    bench_relocate_far,
    bench_many_blocks,
);
criterion_main!(benches);
