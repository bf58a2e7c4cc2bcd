#![no_main]

use libfuzzer_sys::fuzz_target;
use x86scope::{Bitness, Decoder, DecoderOptions, Encoder};

fuzz_target!(|data: &[u8]| {
    for bitness in [Bitness::Bit16, Bitness::Bit32, Bitness::Bit64] {
        let mut encoder = Encoder::new(bitness);
        for instr in Decoder::new(bitness, data, 0x1000, DecoderOptions::NONE) {
            let _ = encoder.encode(&instr, instr.ip);
        }
    }
});
