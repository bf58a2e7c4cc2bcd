//! Bounded byte cursor used by the decoder.
//!
//! [`Parser`] walks an input buffer one instruction at a time. Besides ordinary bounds
//! checking it enforces the architectural 15-byte instruction length limit: a read that would
//! push the current instruction past 15 bytes does not consume anything and instead marks the
//! instruction as too long, while a read past the end of the buffer is an
//! [`crate::Error::EndOfInput`].

use crate::{
    io::{read_le_at, LeBytes},
    Error, Result,
};

/// Maximum length of a single x86 instruction in bytes.
pub const MAX_INSTRUCTION_LENGTH: usize = 15;

/// A cursor over instruction bytes.
///
/// The parser remembers where the instruction currently being decoded started so it can
/// report the instruction length and apply the 15-byte limit.
///
/// # Examples
///
/// ```rust,ignore
/// use crate::parser::Parser;
/// let data = [0x48, 0x89, 0xC8];
/// let mut parser = Parser::new(&data);
/// parser.begin_instruction();
/// assert_eq!(parser.read_le::<u8>()?, 0x48);
/// assert_eq!(parser.read_le::<u16>()?, 0xC889);
/// assert_eq!(parser.instruction_len(), 3);
/// assert!(!parser.has_more_data());
/// # Ok::<(), x86scope::Error>(())
/// ```
pub struct Parser<'a> {
    /// The instruction bytes being decoded
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
    /// Position of the first byte of the current instruction
    instr_start: usize,
    /// The current instruction asked for more than [`MAX_INSTRUCTION_LENGTH`] bytes
    too_long: bool,
}

impl<'a> Parser<'a> {
    /// Create a new [`Parser`] positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser {
            data,
            position: 0,
            instr_start: 0,
            too_long: false,
        }
    }

    /// Returns `true` if there is more data available to parse.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Move the current position to `pos`.
    ///
    /// Seeking to the end of the buffer is allowed and leaves the parser exhausted.
    ///
    /// # Errors
    /// Returns [`Error::EndOfInput`] if `pos` is beyond the data length.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(Error::EndOfInput { offset: pos });
        }

        self.position = pos;
        self.instr_start = pos;
        self.too_long = false;
        Ok(())
    }

    /// Returns the current position within the buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Marks the current position as the first byte of a new instruction.
    pub fn begin_instruction(&mut self) {
        self.instr_start = self.position;
        self.too_long = false;
    }

    /// Number of bytes consumed by the current instruction so far.
    #[must_use]
    pub fn instruction_len(&self) -> usize {
        self.position - self.instr_start
    }

    /// Returns `true` once the current instruction needed more than 15 bytes.
    #[must_use]
    pub fn is_too_long(&self) -> bool {
        self.too_long
    }

    /// Moves the position to the end of a 15-byte instruction.
    ///
    /// Used when an over-long instruction is reported as invalid: it consumes exactly the
    /// architectural maximum.
    pub fn consume_max_length(&mut self) {
        self.position = (self.instr_start + MAX_INSTRUCTION_LENGTH).min(self.data.len());
    }

    /// Returns the next byte without consuming it.
    ///
    /// # Errors
    /// Returns [`Error::EndOfInput`] if the buffer is exhausted.
    pub fn peek_byte(&self) -> Result<u8> {
        self.data
            .get(self.position)
            .copied()
            .ok_or(Error::EndOfInput {
                offset: self.position,
            })
    }

    /// Read a type `T` in little-endian order and advance past it.
    ///
    /// If the read would make the current instruction longer than 15 bytes while the buffer
    /// still holds those bytes, nothing is consumed, the instruction is flagged as too long and
    /// zero is returned. Decoding then runs to completion structurally and the caller reports
    /// an invalid instruction.
    ///
    /// # Errors
    /// Returns [`Error::EndOfInput`] if reading would exceed the data length.
    pub fn read_le<T: LeBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let cap = self.instr_start + MAX_INSTRUCTION_LENGTH;
        if self.too_long || self.position + size > cap {
            if cap <= self.data.len() {
                self.too_long = true;
                return Ok(T::from_le(T::Bytes::default()));
            }
            return Err(Error::EndOfInput {
                offset: self.data.len(),
            });
        }

        read_le_at::<T>(self.data, &mut self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_reads_and_tracks_length() {
        let data = [0x66, 0x90, 0xC3];
        let mut parser = Parser::new(&data);
        parser.begin_instruction();
        assert_eq!(parser.read_le::<u8>().unwrap(), 0x66);
        assert_eq!(parser.read_le::<u8>().unwrap(), 0x90);
        assert_eq!(parser.instruction_len(), 2);

        parser.begin_instruction();
        assert_eq!(parser.pos(), 2);
        assert_eq!(parser.read_le::<u8>().unwrap(), 0xC3);
        assert_eq!(parser.instruction_len(), 1);
        assert!(!parser.has_more_data());
    }

    #[test]
    fn test_parser_end_of_input() {
        let data = [0x0F];
        let mut parser = Parser::new(&data);
        parser.begin_instruction();
        parser.read_le::<u8>().unwrap();
        match parser.read_le::<u8>() {
            Err(Error::EndOfInput { offset }) => assert_eq!(offset, 1),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parser_flags_sixteenth_byte() {
        let data = [0x66; 20];
        let mut parser = Parser::new(&data);
        parser.begin_instruction();
        for _ in 0..MAX_INSTRUCTION_LENGTH {
            parser.read_le::<u8>().unwrap();
        }
        assert!(!parser.is_too_long());
        assert_eq!(parser.read_le::<u8>().unwrap(), 0);
        assert!(parser.is_too_long());
        assert_eq!(parser.instruction_len(), MAX_INSTRUCTION_LENGTH);
    }

    #[test]
    fn test_parser_short_buffer_is_end_of_input_not_too_long() {
        let data = [0x66; 10];
        let mut parser = Parser::new(&data);
        parser.begin_instruction();
        for _ in 0..10 {
            parser.read_le::<u8>().unwrap();
        }
        assert!(parser.read_le::<u32>().is_err());
        assert!(!parser.is_too_long());
    }

    #[test]
    fn test_parser_seek() {
        let data = [0x01, 0x02, 0x03];
        let mut parser = Parser::new(&data);
        parser.seek(3).unwrap();
        assert!(!parser.has_more_data());
        assert!(parser.seek(4).is_err());
    }
}
