#![no_main]

use libfuzzer_sys::fuzz_target;
use x86scope::{
    Bitness, BlockEncoder, BlockEncoderConfig, Decoder, DecoderOptions, Instruction,
    InstructionBlock,
};

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let (rip, code) = data.split_at(8);
    let rip = u64::from_le_bytes(rip.try_into().unwrap_or_default());

    let instructions: Vec<Instruction> =
        Decoder::new(Bitness::Bit64, code, 0x40_0000, DecoderOptions::NONE).collect();
    let config = BlockEncoderConfig {
        return_new_instruction_offsets: true,
        return_reloc_infos: true,
        return_constant_offsets: true,
        ..BlockEncoderConfig::default()
    };
    let block = InstructionBlock::new(&instructions, rip);
    let _ = BlockEncoder::encode(Bitness::Bit64, block, &config);
});
