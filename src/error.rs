use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! encode_error {
    ($address:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        crate::Error::Encode {
            address: $address,
            message: format!($fmt $(, $arg)*),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Note that an undecodable byte sequence is *not* an error: the decoder reports it as an
/// [`crate::Instruction`] whose code is [`crate::Code::INVALID`], so a caller walking a byte
/// stream can always resynchronize. Errors are reserved for conditions where no instruction
/// can be produced at all, or where an encode request cannot be satisfied.
///
/// # Error Categories
///
/// ## Decoding
/// - [`Error::EndOfInput`] - The buffer ended before a complete instruction could be read
/// - [`Error::InvalidBitness`] - A bitness other than 16, 32 or 64 was requested
///
/// ## Encoding
/// - [`Error::Encode`] - A single instruction could not be encoded in the requested form
/// - [`Error::RelaxationLimit`] - Branch relaxation did not converge within its pass budget
/// - [`Error::DuplicateAddress`] - Two instructions share an original address
///
/// ## Internal
/// - [`Error::Malformed`] - An internal consistency check failed
///
/// # Examples
///
/// ```rust
/// use x86scope::{Bitness, Decoder, DecoderOptions, Error};
///
/// // A lone ModRM-requiring opcode with no ModRM byte.
/// let mut decoder = Decoder::new(Bitness::Bit64, &[0x01], 0x1000, DecoderOptions::NONE);
/// match decoder.decode() {
///     Err(Error::EndOfInput { offset }) => assert_eq!(offset, 1),
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The input buffer ended in the middle of an instruction.
    ///
    /// `offset` is the buffer position at which the missing byte was expected. This is
    /// distinct from an invalid opcode, which still yields an instruction.
    #[error("End of input at offset {offset}")]
    EndOfInput {
        /// Position in the input buffer where more data was required
        offset: usize,
    },

    /// The requested code size is not one of 16, 32 or 64.
    #[error("Invalid bitness - {0}")]
    InvalidBitness(u32),

    /// An instruction could not be encoded.
    ///
    /// `address` is the original address of the instruction (its `ip` before relocation), so
    /// a failure inside a block can be traced back to the source instruction.
    #[error("Failed to encode instruction at {address:#x} - {message}")]
    Encode {
        /// The original address of the offending instruction
        address: u64,
        /// Description of the failure
        message: String,
    },

    /// Branch relaxation exceeded its pass budget without reaching a fixed point.
    #[error("Branch relaxation did not converge after {passes} passes")]
    RelaxationLimit {
        /// Number of optimize passes that were run
        passes: usize,
    },

    /// Two instructions handed to the block encoder share the same non-zero original address,
    /// making branch target resolution ambiguous.
    #[error("Multiple instructions with the same address {0:#x}")]
    DuplicateAddress(u64),

    /// An internal consistency check failed.
    ///
    /// The error includes the source location where it was raised.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },
}
