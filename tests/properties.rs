//! Property-based tests using proptest.
//!
//! Arbitrary byte streams go through the decoder, the single-instruction encoder and the block
//! encoder. None of them may panic, and the invariants checked here hold for every input.

use proptest::prelude::*;
use x86scope::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn arb_bitness() -> impl Strategy<Value = Bitness> {
    prop_oneof![
        Just(Bitness::Bit16),
        Just(Bitness::Bit32),
        Just(Bitness::Bit64)
    ]
}

fn arb_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..128)
}

/// Bytes that start with a prefix or escape often enough to reach the deeper tables.
fn arb_prefixed_bytes() -> impl Strategy<Value = Vec<u8>> {
    let lead = prop::sample::select(vec![
        0x0F, 0x66, 0x67, 0xF2, 0xF3, 0xF0, 0x48, 0x41, 0xC4, 0xC5, 0x62, 0x8F,
    ]);
    (prop::collection::vec(lead, 1..4), arb_bytes()).prop_map(|(mut lead, rest)| {
        lead.extend(rest);
        lead
    })
}

// ── Property: decoding is total and consistent ──────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Every decoded instruction is 1 to 15 bytes and advances position and ip by its length.
    #[test]
    fn decode_advances_by_length(bytes in arb_prefixed_bytes()) {
        let mut decoder = Decoder::new(Bitness::Bit64, &bytes, 0x1000, DecoderOptions::NONE);
        while decoder.can_decode() {
            let (position, ip) = (decoder.position(), decoder.ip());
            match decoder.decode() {
                Ok(instr) => {
                    prop_assert!((1..=15).contains(&instr.len));
                    prop_assert_eq!(instr.ip, ip);
                    prop_assert_eq!(decoder.position(), position + usize::from(instr.len));
                    prop_assert_eq!(decoder.ip(), ip + u64::from(instr.len));
                }
                Err(Error::EndOfInput { .. }) => {
                    prop_assert_eq!(decoder.position(), position);
                    prop_assert_eq!(decoder.ip(), ip);
                    break;
                }
                Err(e) => prop_assert!(false, "unexpected error {}", e),
            }
        }
    }

    /// The free function and the streaming decoder agree.
    #[test]
    fn one_shot_matches_stream(bytes in arb_bytes(), bitness in arb_bitness()) {
        let mut decoder = Decoder::new(bitness, &bytes, 0x100, DecoderOptions::NONE);
        if let Ok(streamed) = decoder.decode() {
            let (single, len) = decode(&bytes, 0, bitness, 0x100, DecoderOptions::NONE)?;
            prop_assert_eq!(streamed, single);
            prop_assert_eq!(usize::from(streamed.len), len);
        }
    }

    /// Quirk options never make the decoder panic.
    #[test]
    fn options_never_panic(bytes in arb_prefixed_bytes(), bits in any::<u32>()) {
        let options = DecoderOptions::from_bits_truncate(bits);
        for bitness in [Bitness::Bit16, Bitness::Bit32, Bitness::Bit64] {
            let _ = Decoder::new(bitness, &bytes, 0, options).count();
        }
    }
}

// ── Property: encoders never panic ──────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Re-encoding a decoded instruction either fails cleanly or stays within 15 bytes.
    #[test]
    fn reencode_is_bounded(bytes in arb_prefixed_bytes(), bitness in arb_bitness()) {
        let mut encoder = Encoder::new(bitness);
        for instr in Decoder::new(bitness, &bytes, 0x1000, DecoderOptions::NONE) {
            let before = encoder.buffer().len();
            match encoder.encode(&instr, instr.ip) {
                Ok(len) => {
                    prop_assert!(len <= 15);
                    prop_assert_eq!(encoder.buffer().len(), before + len);
                }
                Err(_) => prop_assert_eq!(encoder.buffer().len(), before),
            }
        }
    }

    /// The block encoder never panics, and successful output offsets are increasing.
    #[test]
    fn block_encoder_never_panics(bytes in arb_bytes(), rip in any::<u32>()) {
        let instructions: Vec<Instruction> =
            Decoder::new(Bitness::Bit64, &bytes, 0x1000, DecoderOptions::NONE).collect();
        let config = BlockEncoderConfig {
            return_new_instruction_offsets: true,
            ..BlockEncoderConfig::default()
        };
        let block = InstructionBlock::new(&instructions, u64::from(rip));
        if let Ok(result) = BlockEncoder::encode(Bitness::Bit64, block, &config) {
            let offsets: Vec<u32> =
                result.new_instruction_offsets.iter().flatten().copied().collect();
            prop_assert!(offsets.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }
}

// ── Property: re-encoding preserves meaning ─────────────────────────────

/// Everything but the length: redundant prefixes and non-minimal forms are dropped on re-encode.
fn same_meaning(a: &Instruction, b: &Instruction) -> bool {
    Instruction { len: 0, ..*a } == Instruction { len: 0, ..*b }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Every valid instruction re-encodes to bytes that decode to the same instruction.
    ///
    /// The only allowed failure is a short branch whose displacement no longer fits once a
    /// redundant prefix is gone.
    #[test]
    fn reencode_preserves_meaning(bytes in arb_prefixed_bytes(), bitness in arb_bitness()) {
        for instr in Decoder::new(bitness, &bytes, 0x1000, DecoderOptions::NONE) {
            if instr.is_invalid() {
                continue;
            }
            let mut encoder = Encoder::new(bitness);
            if encoder.encode(&instr, instr.ip).is_err() {
                prop_assert!(instr.near_branch_target().is_some(), "{:?}", instr);
                continue;
            }
            let encoded = encoder.take_buffer();
            let (again, len) = decode(&encoded, 0, bitness, instr.ip, DecoderOptions::NONE)?;
            prop_assert_eq!(len, encoded.len());
            prop_assert!(same_meaning(&instr, &again), "{:?} became {:?}", instr, again);
        }
    }

    /// The encoder's own output is canonical: decoding and re-encoding it gives the same bytes.
    #[test]
    fn canonical_encodings_roundtrip(bytes in arb_prefixed_bytes(), bitness in arb_bitness()) {
        for instr in Decoder::new(bitness, &bytes, 0x1000, DecoderOptions::NONE) {
            let mut encoder = Encoder::new(bitness);
            if instr.is_invalid() || encoder.encode(&instr, instr.ip).is_err() {
                continue;
            }
            let canonical = encoder.take_buffer();
            let (again, _) = decode(&canonical, 0, bitness, instr.ip, DecoderOptions::NONE)?;
            encoder.encode(&again, instr.ip)?;
            prop_assert_eq!(encoder.take_buffer(), canonical);
        }
    }
}

// ── Property: relocation keeps branch targets ───────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// A relocated short jump to an outside address still lands on that address.
    #[test]
    fn relocated_jump_keeps_target(rel in any::<i8>(), delta in -0x4000_0000i64..0x4000_0000) {
        // jmp $ targets the jump itself, which moves with the block
        prop_assume!(rel != -2);
        let bytes = [0xEB, rel as u8];
        let instructions: Vec<Instruction> =
            Decoder::new(Bitness::Bit64, &bytes, 0x8000_0000, DecoderOptions::NONE).collect();
        let target = instructions[0].near_branch_target();
        prop_assert!(target.is_some());

        let rip = (0x8000_0000i64 + delta) as u64;
        let result = BlockEncoder::encode(
            Bitness::Bit64,
            InstructionBlock::new(&instructions, rip),
            &BlockEncoderConfig::default(),
        )?;
        let relocated = Decoder::new(Bitness::Bit64, &result.code_buffer, rip, DecoderOptions::NONE)
            .next()
            .and_then(|instr| instr.near_branch_target());
        prop_assert_eq!(relocated, target);
    }
}

// ── Property: relaxed blocks keep every target ──────────────────────────

const FAR: u64 = 0x7FFF_0000_0000;
const NEAR_BASE: u64 = 0x6000_0000;

#[derive(Debug, Clone, Copy)]
enum Dest {
    /// An instruction of the block, modulo its length
    Index(usize),
    /// An outside address the relocated block can reach
    Near(i32),
    /// An outside address only a pointer slot can reach
    Far,
}

#[derive(Debug, Clone, Copy)]
enum Item {
    Nop,
    Jmp(Dest),
    Jne(Dest),
}

fn arb_near_dest() -> impl Strategy<Value = Dest> {
    prop_oneof![
        3 => any::<usize>().prop_map(Dest::Index),
        1 => (-0x1000_0000i32..0x1000_0000).prop_map(Dest::Near),
    ]
}

fn arb_item() -> impl Strategy<Value = Item> {
    prop_oneof![
        3 => Just(Item::Nop),
        2 => prop_oneof![4 => arb_near_dest(), 1 => Just(Dest::Far)].prop_map(Item::Jmp),
        2 => arb_near_dest().prop_map(Item::Jne),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Every relocated branch lands where its original did: on the moved instruction for
    /// targets inside the block, on the same address for targets outside it.
    #[test]
    fn relaxed_branches_reach_their_targets(
        items in prop::collection::vec(arb_item(), 1..48),
        rip_delta in 0u64..0x1000_0000,
    ) {
        let base = 0x10_0000_0000u64;
        let mut ips = Vec::with_capacity(items.len());
        let mut ip = base;
        for item in &items {
            ips.push(ip);
            ip += match item {
                Item::Nop => 1,
                Item::Jmp(_) => 5,
                Item::Jne(_) => 6,
            };
        }
        let original_target = |dest: Dest| match dest {
            Dest::Index(k) => ips[k % items.len()],
            Dest::Near(offset) => NEAR_BASE.wrapping_add(offset as i64 as u64),
            Dest::Far => FAR,
        };

        let instructions: Vec<Instruction> = items
            .iter()
            .zip(&ips)
            .map(|(item, &ip)| {
                let (code, dest) = match *item {
                    Item::Nop => (Code::Nopd, None),
                    Item::Jmp(dest) => (Code::Jmp_rel32_64, Some(dest)),
                    Item::Jne(dest) => (Code::Jne_rel32_64, Some(dest)),
                };
                let mut instr = Instruction::with_code(code);
                instr.ip = ip;
                if let Some(dest) = dest {
                    instr.operands[0] = Operand::NearBranch(original_target(dest));
                }
                instr
            })
            .collect();

        let rip = 0x4000_0000 + rip_delta;
        let config = BlockEncoderConfig {
            return_new_instruction_offsets: true,
            ..BlockEncoderConfig::default()
        };
        let result = BlockEncoder::encode(
            Bitness::Bit64,
            InstructionBlock::new(&instructions, rip),
            &config,
        )?;

        let offsets: Vec<u64> = result
            .new_instruction_offsets
            .iter()
            .map(|offset| offset.map(u64::from))
            .collect::<Option<_>>()
            .unwrap_or_default();
        prop_assert_eq!(offsets.len(), items.len());
        let new_target = |dest: Dest| match dest {
            Dest::Index(k) => rip + offsets[k % items.len()],
            other => original_target(other),
        };

        for (item, &offset) in items.iter().zip(&offsets) {
            let (instr, _) = decode(
                &result.code_buffer,
                offset as usize,
                Bitness::Bit64,
                rip + offset,
                DecoderOptions::NONE,
            )?;
            match *item {
                Item::Nop => prop_assert_eq!(instr.code, Code::Nopd),
                Item::Jmp(dest) if instr.code == Code::Jmp_rm64 => {
                    let slot = instr
                        .memory_operand()
                        .map(|mem| mem.displacement)
                        .unwrap_or_default();
                    let mut at = (slot - rip) as usize;
                    let value = x86scope::io::read_le_at::<u64>(&result.code_buffer, &mut at)?;
                    prop_assert_eq!(value, new_target(dest));
                }
                Item::Jmp(dest) => {
                    prop_assert!(matches!(instr.code, Code::Jmp_rel8_64 | Code::Jmp_rel32_64));
                    prop_assert_eq!(instr.near_branch_target(), Some(new_target(dest)));
                }
                Item::Jne(dest) => {
                    prop_assert!(matches!(instr.code, Code::Jne_rel8_64 | Code::Jne_rel32_64));
                    prop_assert_eq!(instr.near_branch_target(), Some(new_target(dest)));
                }
            }
        }
    }
}
