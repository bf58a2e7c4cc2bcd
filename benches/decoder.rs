//! Benchmarks for instruction decoding.
//!
//! Measures decoder throughput on:
//! - A typical 64-bit function prologue/body/epilogue
//! - Prefix-heavy legacy code
//! - VEX and EVEX vector code
//! - 32-bit code

extern crate x86scope;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;
use x86scope::{Bitness, Decoder, DecoderOptions};

/// push rbp ; mov rbp, rsp ; sub rsp, 0x20 ; mov rax, [rbx+8] ; mov eax, [rip+0x10] ;
/// lea rax, [rip-0x10] ; test ecx, ecx ; jne +0 ; call +0 ; add rsp, 0x20 ; pop rbp ; ret
const FUNCTION_64: &[u8] = &[
    0x55, 0x48, 0x89, 0xE5, 0x48, 0x83, 0xEC, 0x20, 0x48, 0x8B, 0x43, 0x08, 0x8B, 0x05, 0x10,
    0x00, 0x00, 0x00, 0x48, 0x8D, 0x05, 0xF0, 0xFF, 0xFF, 0xFF, 0x85, 0xC9, 0x0F, 0x85, 0x00,
    0x00, 0x00, 0x00, 0xE8, 0x00, 0x00, 0x00, 0x00, 0x48, 0x83, 0xC4, 0x20, 0x5D, 0xC3,
];

/// lock add fs:[rax], ecx ; rep movsb ; popcnt ax, cx ; nop dword [rax+rax]
const PREFIXED_64: &[u8] = &[
    0x64, 0xF0, 0x01, 0x08, 0x67, 0xF3, 0xA4, 0x66, 0xF3, 0x0F, 0xB8, 0xC1, 0x0F, 0x1F, 0x44,
    0x00, 0x00,
];

/// vaddps xmm1, xmm2, xmm3 ; vaddps xmm1, xmm2, xmm9 ; vaddps zmm1{k1}{z}, zmm2, zmm3 ;
/// vaddps zmm1, zmm2, [rax+0x40]
const VECTOR_64: &[u8] = &[
    0xC5, 0xE8, 0x58, 0xCB, 0xC4, 0xC1, 0x68, 0x58, 0xC9, 0x62, 0xF1, 0x6C, 0xC9, 0x58, 0xCB,
    0x62, 0xF1, 0x6C, 0x48, 0x58, 0x48, 0x01,
];

/// push ebp ; mov ebp, esp ; mov eax, [ebp+8] ; add eax, 1 ; je +0x10 ; pop ebp ; ret
const FUNCTION_32: &[u8] = &[
    0x55, 0x89, 0xE5, 0x8B, 0x45, 0x08, 0x83, 0xC0, 0x01, 0x74, 0x10, 0x5D, 0xC3,
];

fn repeat(code: &[u8], times: usize) -> Vec<u8> {
    code.iter().copied().cycle().take(code.len() * times).collect()
}

fn bench_decode(c: &mut Criterion, name: &str, bitness: Bitness, code: &[u8]) {
    let data = repeat(code, 256);

    let mut group = c.benchmark_group("decoder");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function(name, |b| {
        b.iter(|| {
            let decoder = Decoder::new(bitness, black_box(&data), 0x40_0000, DecoderOptions::NONE);
            black_box(decoder.count())
        });
    });
    group.finish();
}

fn bench_function_64(c: &mut Criterion) {
    bench_decode(c, "function_64", Bitness::Bit64, FUNCTION_64);
}

fn bench_prefixed_64(c: &mut Criterion) {
    bench_decode(c, "prefixed_64", Bitness::Bit64, PREFIXED_64);
}

fn bench_vector_64(c: &mut Criterion) {
    bench_decode(c, "vector_64", Bitness::Bit64, VECTOR_64);
}

fn bench_function_32(c: &mut Criterion) {
    bench_decode(c, "function_32", Bitness::Bit32, FUNCTION_32);
}

criterion_group!(
    benches,
    bench_function_64,
    bench_prefixed_64,
    bench_vector_64,
    bench_function_32,
);
criterion_main!(benches);
