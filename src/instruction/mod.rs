//! Instruction data model shared by the decoder and the encoders.
//!
//! - [`Instruction`] is the decoded value: an [`Code`], up to four [`Operand`]s and the
//!   prefix-derived [`InstructionFlags`].
//! - [`Register`] is the flat register set.
//! - [`OpCodeInfo`] is the encoding descriptor behind every [`Code`]; it drives the encoder and
//!   the decoder's operand reader.

mod code;
#[allow(clippy::module_inception)]
mod instruction;
mod opcode;
mod operand;
mod register;

pub use code::Code;
pub(crate) use code::{
    CMOVCC_16, CMOVCC_32, CMOVCC_64, JCC_NEAR_16, JCC_NEAR_32, JCC_NEAR_64, JCC_SHORT_16,
    JCC_SHORT_32, JCC_SHORT_64, SETCC,
};
pub use instruction::{Instruction, InstructionFlags};
pub use opcode::{
    EncodingKind, MandatoryPrefix, OpCodeFlags, OpCodeInfo, OpCodeTable, OperandSpec, TupleType,
};
pub use operand::{Immediate, MemoryOperand, Operand, RoundingControl};
pub use register::{Register, RegisterKind};
