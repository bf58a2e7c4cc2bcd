//! Integration tests for decode / re-encode round trips.
//!
//! Each sequence is decoded, re-encoded at its original address and compared byte for byte.
//! The sequences are the canonical encodings of their instructions, so the encoder has exactly
//! one way to produce them.

use x86scope::prelude::*;

/// Decodes `bytes` at `ip` and re-encodes every instruction at its own address.
fn reencode(bitness: Bitness, bytes: &[u8], ip: u64) -> Result<Vec<u8>> {
    let mut decoder = Decoder::new(bitness, bytes, ip, DecoderOptions::NONE);
    let mut encoder = Encoder::new(bitness);
    while decoder.can_decode() {
        let instr = decoder.decode()?;
        assert!(!instr.is_invalid(), "{:02X?} decoded as invalid", bytes);
        encoder.encode(&instr, instr.ip)?;
    }
    Ok(encoder.take_buffer())
}

fn assert_roundtrip(bitness: Bitness, sequences: &[&[u8]]) {
    for bytes in sequences {
        let encoded = reencode(bitness, bytes, 0x40_1000)
            .unwrap_or_else(|e| panic!("{bytes:02X?}: {e}"));
        assert_eq!(&encoded, bytes, "{:?}", bitness);
    }
}

#[test]
fn test_roundtrip_64bit_general_purpose() {
    assert_roundtrip(
        Bitness::Bit64,
        &[
            &[0x55],                                     // push rbp
            &[0x48, 0x89, 0xE5],                         // mov rbp, rsp
            &[0x48, 0x83, 0xEC, 0x20],                   // sub rsp, 0x20
            &[0x01, 0xC1],                               // add ecx, eax
            &[0x66, 0x01, 0xC1],                         // add cx, ax
            &[0x31, 0xC0],                               // xor eax, eax
            &[0x85, 0xC9],                               // test ecx, ecx
            &[0x41, 0x54],                               // push r12
            &[0x41, 0x5C],                               // pop r12
            &[0x40, 0x88, 0xC4],                         // mov spl, al
            &[0x0F, 0xB6, 0xC1],                         // movzx eax, cl
            &[0x48, 0xB8, 1, 2, 3, 4, 5, 6, 7, 8],       // mov rax, imm64
            &[0x0F, 0xA2],                               // cpuid
            &[0x0F, 0x05],                               // syscall
            &[0xCC],                                     // int3
            &[0xC3],                                     // ret
        ],
    );
}

#[test]
fn test_roundtrip_64bit_memory_operands() {
    assert_roundtrip(
        Bitness::Bit64,
        &[
            &[0x48, 0x8B, 0x43, 0x08],                   // mov rax, [rbx+8]
            &[0x8B, 0x45, 0x00],                         // mov eax, [rbp]
            &[0x41, 0x8B, 0x04, 0x24],                   // mov eax, [r12]
            &[0x8B, 0x44, 0x8B, 0x10],                   // mov eax, [rbx+rcx*4+0x10]
            &[0x8B, 0x83, 0x08, 0x00, 0x00, 0x00],       // mov eax, [rbx+8] (disp32)
            &[0x8B, 0x05, 0x10, 0x00, 0x00, 0x00],       // mov eax, [rip+0x10]
            &[0x48, 0x8D, 0x05, 0xF0, 0xFF, 0xFF, 0xFF], // lea rax, [rip-0x10]
            &[0x0F, 0x1F, 0x44, 0x00, 0x00],             // nop dword [rax+rax]
            &[0x64, 0xF0, 0x01, 0x08],                   // lock add fs:[rax], ecx
            &[0x67, 0xF3, 0xA4],                         // rep movsb (32-bit addressing)
        ],
    );
}

#[test]
fn test_roundtrip_64bit_branches() {
    assert_roundtrip(
        Bitness::Bit64,
        &[
            &[0xEB, 0x00],                               // jmp short
            &[0x74, 0xFE],                               // je self
            &[0x0F, 0x85, 0x00, 0x01, 0x00, 0x00],       // jne near
            &[0xE8, 0x00, 0x00, 0x00, 0x00],             // call near
            &[0xE9, 0x00, 0x00, 0x00, 0x00],             // jmp near, kept near
            &[0xE2, 0xFE],                               // loop self
        ],
    );
}

#[test]
fn test_roundtrip_vector_encodings() {
    assert_roundtrip(
        Bitness::Bit64,
        &[
            &[0x66, 0xF3, 0x0F, 0xB8, 0xC1],             // popcnt ax, cx
            &[0xC5, 0xE8, 0x58, 0xCB],                   // vaddps xmm1, xmm2, xmm3
            &[0xC4, 0xC1, 0x68, 0x58, 0xC9],             // vaddps xmm1, xmm2, xmm9
            &[0x62, 0xF1, 0x6C, 0xC9, 0x58, 0xCB],       // vaddps zmm1{k1}{z}, zmm2, zmm3
            &[0x62, 0xF1, 0x6C, 0x48, 0x58, 0x48, 0x01], // vaddps zmm1, zmm2, [rax+0x40]
        ],
    );
}

#[test]
fn test_roundtrip_32bit() {
    assert_roundtrip(
        Bitness::Bit32,
        &[
            &[0x55],                                     // push ebp
            &[0x89, 0xE5],                               // mov ebp, esp
            &[0x8B, 0x45, 0x08],                         // mov eax, [ebp+8]
            &[0x66, 0x01, 0xC1],                         // add cx, ax
            &[0x83, 0xC0, 0x01],                         // add eax, 1
            &[0x74, 0x10],                               // je short
            &[0xF0, 0x0F, 0x20, 0xC0],                   // mov eax, cr8
            &[0xF0, 0x0F, 0x22, 0xC0],                   // mov cr8, eax
            &[0xC3],                                     // ret
        ],
    );
}

#[test]
fn test_roundtrip_16bit() {
    assert_roundtrip(
        Bitness::Bit16,
        &[
            &[0x8B, 0x43, 0xFE],                         // mov ax, [bp+di-2]
            &[0x8B, 0x06, 0x34, 0x12],                   // mov ax, [0x1234]
            &[0xB8, 0x34, 0x12],                         // mov ax, 0x1234
            &[0x01, 0xC1],                               // add cx, ax
        ],
    );
}

#[test]
fn test_roundtrip_bound_registers() {
    assert_roundtrip(
        Bitness::Bit32,
        &[
            &[0xF3, 0x0F, 0x1A, 0xC1],                   // bndcl bnd0, ecx
            &[0xF2, 0x0F, 0x1B, 0x4B, 0x08],             // bndcn bnd1, [ebx+8]
            &[0x0F, 0x1A, 0x04, 0x18],                   // bndldx bnd0, [eax+ebx]
            &[0x0F, 0x1B, 0x14, 0x18],                   // bndstx [eax+ebx], bnd2
            &[0x66, 0x0F, 0x1B, 0x0B],                   // bndmov [ebx], bnd1
            &[0xF3, 0x0F, 0x1B, 0x1E],                   // bndmk bnd3, [esi]
        ],
    );
    assert_roundtrip(
        Bitness::Bit64,
        &[
            &[0xF3, 0x41, 0x0F, 0x1A, 0xC0],             // bndcl bnd0, r8
            &[0xF2, 0x0F, 0x1A, 0x08],                   // bndcu bnd1, [rax]
            &[0x66, 0x0F, 0x1A, 0xCA],                   // bndmov bnd1, bnd2
        ],
    );
    assert_roundtrip(Bitness::Bit16, &[&[0x67, 0xF3, 0x0F, 0x1A, 0x00]]);
}

#[test]
fn test_rip_relative_target_survives_move() -> Result<()> {
    // lea rax, [rip+0x100] at 0x1000 points at 0x1107
    let bytes = [0x48, 0x8D, 0x05, 0x00, 0x01, 0x00, 0x00];
    let instr = decode(&bytes, 0, Bitness::Bit64, 0x1000, DecoderOptions::NONE)?.0;

    let mut encoder = Encoder::new(Bitness::Bit64);
    encoder.encode(&instr, 0x1100)?;
    assert_eq!(encoder.buffer(), [0x48, 0x8D, 0x05, 0x00, 0x00, 0x00, 0x00]);
    assert!(encoder.constant_offsets().has_displacement());
    Ok(())
}

#[test]
fn test_branch_target_survives_move() -> Result<()> {
    // call +0x10 at 0x1000 targets 0x1015
    let bytes = [0xE8, 0x10, 0x00, 0x00, 0x00];
    let instr = decode(&bytes, 0, Bitness::Bit64, 0x1000, DecoderOptions::NONE)?.0;
    assert_eq!(instr.near_branch_target(), Some(0x1015));

    let mut encoder = Encoder::new(Bitness::Bit64);
    encoder.encode(&instr, 0x1015 - 5)?;
    assert_eq!(encoder.buffer(), [0xE8, 0x00, 0x00, 0x00, 0x00]);
    Ok(())
}

#[test]
fn test_invalid_bytes_do_not_encode() -> Result<()> {
    // 06 (push es) does not exist in 64-bit mode
    let (instr, len) = decode(&[0x06], 0, Bitness::Bit64, 0x1000, DecoderOptions::NONE)?;
    assert!(instr.is_invalid());
    assert_eq!(len, 1);

    let mut encoder = Encoder::new(Bitness::Bit64);
    assert!(matches!(
        encoder.encode(&instr, 0x1000),
        Err(Error::Encode { address: 0x1000, .. })
    ));
    Ok(())
}

#[test]
fn test_verbatim_block_at_same_address() -> Result<()> {
    // push rbp ; mov eax, [rip+0x10] ; jne near call ; jmp short mov ; call near ret ; ret
    let bytes = [
        0x55, //
        0x8B, 0x05, 0x10, 0x00, 0x00, 0x00, //
        0x0F, 0x85, 0x02, 0x00, 0x00, 0x00, //
        0xEB, 0xF2, //
        0xE8, 0x00, 0x00, 0x00, 0x00, //
        0xC3,
    ];
    let instructions: Vec<Instruction> =
        Decoder::new(Bitness::Bit64, &bytes, 0x40_1000, DecoderOptions::NONE).collect();
    assert_eq!(instructions.len(), 6);

    let config = BlockEncoderConfig {
        fix_branches: false,
        ..BlockEncoderConfig::default()
    };
    let result = BlockEncoder::encode(
        Bitness::Bit64,
        InstructionBlock::new(&instructions, 0x40_1000),
        &config,
    )?;
    assert_eq!(result.code_buffer, bytes);
    Ok(())
}
