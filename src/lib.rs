// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(clippy::too_many_arguments)]
//! # x86scope
//!
//! [![Crates.io](https://img.shields.io/crates/v/x86scope.svg)](https://crates.io/crates/x86scope)
//! [![Documentation](https://docs.rs/x86scope/badge.svg)](https://docs.rs/x86scope)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/x86scope/blob/main/LICENSE-APACHE)
//!
//! A table-driven x86/x86-64 instruction decoder and a relocating block encoder. Decode
//! machine code into structured [`Instruction`] values, move it to a new address and get back
//! code whose branches have been re-sized to the smallest form that still reaches their target.
//!
//! ## Features
//!
//! - **16/32/64-bit decoding** - legacy prefixes, REX, VEX, EVEX and XOP
//! - **Faithful invalid handling** - undecodable bytes yield [`Code::INVALID`] with a length,
//!   never a panic
//! - **Single-instruction encoding** - [`Encoder`] re-emits any decoded instruction at any address
//! - **Branch relaxation** - [`BlockEncoder`] shrinks and grows `JMP`, `Jcc`, `CALL`, `LOOP` and
//!   `XBEGIN` until the layout is stable, with pointer-slot long forms in 64-bit mode
//! - **Parallel block encoding** - independent blocks are encoded on a [`rayon`] pool
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! x86scope = "0.1"
//! ```
//!
//! ### Decoding
//!
//! ```rust
//! use x86scope::prelude::*;
//!
//! // push rbp ; mov rbp, rsp ; ret
//! let bytes = [0x55, 0x48, 0x89, 0xE5, 0xC3];
//! let mut decoder = Decoder::new(Bitness::Bit64, &bytes, 0x1000, DecoderOptions::NONE);
//!
//! while decoder.can_decode() {
//!     let instr = decoder.decode()?;
//!     println!("{:#x} {:?} ({} bytes)", instr.ip, instr.code, instr.len);
//! }
//! # Ok::<(), x86scope::Error>(())
//! ```
//!
//! ### Relocating a block
//!
//! ```rust
//! use x86scope::prelude::*;
//!
//! // jne +0 (near form) ; ret
//! let bytes = [0x0F, 0x85, 0x00, 0x00, 0x00, 0x00, 0xC3];
//! let instructions: Vec<Instruction> =
//!     Decoder::new(Bitness::Bit64, &bytes, 0x1000, DecoderOptions::NONE).collect();
//!
//! let block = InstructionBlock::new(&instructions, 0x8000);
//! let result = BlockEncoder::encode(Bitness::Bit64, block, &BlockEncoderConfig::default())?;
//!
//! // The branch target moved with the block, so the short form is enough.
//! assert_eq!(result.code_buffer, [0x75, 0x00, 0xC3]);
//! # Ok::<(), x86scope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`Decoder`] and [`decode`] - prefix state machine, opcode tables and operand readers
//! - [`Encoder`] - single-instruction encoder driven by [`OpCodeInfo`]
//! - [`BlockEncoder`] - layout and relaxation of whole instruction blocks
//! - [`io`] - little-endian helpers shared by both directions
//! - [`Error`] and [`Result`] - error handling
//!
//! ## Error Handling
//!
//! Undecodable bytes are not an error. Errors are reserved for running out of input, invalid
//! configuration and encode requests that cannot be satisfied:
//!
//! ```rust
//! use x86scope::{Bitness, Decoder, DecoderOptions, Error};
//!
//! // mov eax, imm32 with only two immediate bytes present
//! let mut decoder = Decoder::new(Bitness::Bit32, &[0xB8, 0x01, 0x02], 0, DecoderOptions::NONE);
//! match decoder.decode() {
//!     Err(Error::EndOfInput { offset }) => println!("truncated at {offset}"),
//!     other => println!("unexpected: {other:?}"),
//! }
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: relaxation passes at `debug`, per-instruction
//! decoder detail at `trace`. Install any `log` backend to see them.
//!
//! ## Development and Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! cargo +nightly fuzz run decode --release
//! ```
#[macro_use]
pub(crate) mod error;

pub(crate) mod parser;

/// Little-endian integer helpers shared by the decoder and the encoders.
///
/// # Examples
///
/// ```rust
/// use x86scope::io::{read_le_at, write_le};
///
/// let mut out = Vec::new();
/// write_le(&mut out, 0x1234_u16);
///
/// let mut offset = 0;
/// let value: u16 = read_le_at(&out, &mut offset)?;
/// assert_eq!(value, 0x1234);
/// assert_eq!(offset, 2);
/// # Ok::<(), x86scope::Error>(())
/// ```
pub mod io;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use x86scope::prelude::*;
///
/// let decoder = Decoder::new(Bitness::Bit32, &[0x90], 0, DecoderOptions::NONE);
/// let codes: Vec<Code> = decoder.map(|instr| instr.code).collect();
/// assert_eq!(codes, [Code::Nopd]);
/// ```
pub mod prelude;

mod block;
mod decoder;
mod encoder;
mod instruction;

/// `x86scope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `x86scope` Error type
///
/// # Examples
///
/// ```rust
/// use x86scope::{Bitness, Encoder, Error, Instruction};
///
/// let mut encoder = Encoder::new(Bitness::Bit64);
/// match encoder.encode(&Instruction::default(), 0x1000) {
///     Err(Error::Encode { address, message }) => println!("{address:#x}: {message}"),
///     other => println!("unexpected: {other:?}"),
/// }
/// ```
pub use error::Error;

/// Decoding of x86 machine code.
///
/// See [`Decoder`] for streaming use and [`decode`] for a one-shot call.
pub use decoder::{decode, Bitness, Decoder, DecoderOptions};

/// Encoding of single instructions.
pub use encoder::{ConstantOffsets, Encoder};

/// Encoding of instruction blocks with branch relaxation.
pub use block::{
    BlockEncoder, BlockEncoderConfig, BlockEncoderResult, InstructionBlock, RelocInfo, RelocKind,
};

/// The instruction data model and the encoding descriptors behind every [`Code`].
pub use instruction::{
    Code, EncodingKind, Immediate, Instruction, InstructionFlags, MandatoryPrefix, MemoryOperand,
    OpCodeFlags, OpCodeInfo, OpCodeTable, Operand, OperandSpec, Register, RegisterKind,
    RoundingControl, TupleType,
};
