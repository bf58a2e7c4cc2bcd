//! # x86scope Prelude
//!
//! The types needed to decode, inspect and re-encode x86 code, in one glob import.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all x86scope operations
pub use crate::Error;

/// The result type used throughout x86scope
pub use crate::Result;

// ================================================================================================
// Decoding
// ================================================================================================

/// Processor mode and decoder configuration
pub use crate::{Bitness, DecoderOptions};

/// Streaming and one-shot decoding
pub use crate::{decode, Decoder};

// ================================================================================================
// Instruction Model
// ================================================================================================

/// Decoded instruction and its prefix-derived attributes
pub use crate::{Instruction, InstructionFlags};

/// Instruction identifiers
pub use crate::Code;

/// Operands
pub use crate::{Immediate, MemoryOperand, Operand, RoundingControl};

/// Registers
pub use crate::{Register, RegisterKind};

// ================================================================================================
// Encoding
// ================================================================================================

/// Single-instruction encoder and the positions of its constants
pub use crate::{ConstantOffsets, Encoder};

/// Block encoder, its input and output
pub use crate::{
    BlockEncoder, BlockEncoderConfig, BlockEncoderResult, InstructionBlock, RelocInfo, RelocKind,
};
