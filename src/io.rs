//! Little-endian primitive access for instruction bytes.
//!
//! x86 stores every multi-byte field of an instruction (displacements, immediates, far
//! pointers) in little-endian order. This module provides the single trait both directions
//! share: [`LeBytes`] converts between a primitive and its byte array, [`read_le_at`] pulls one
//! out of a slice with bounds checking, and [`write_le`] appends one to an output buffer.
//!
//! # Examples
//!
//! ```rust
//! use x86scope::io::{read_le_at, write_le};
//!
//! let mut out = Vec::new();
//! write_le(&mut out, 0x1234_5678_u32);
//! assert_eq!(out, [0x78, 0x56, 0x34, 0x12]);
//!
//! let mut offset = 0;
//! let value: u16 = read_le_at(&out, &mut offset).unwrap();
//! assert_eq!(value, 0x5678);
//! assert_eq!(offset, 2);
//! ```

use crate::{Error, Result};

/// Conversion between a primitive integer and its little-endian byte representation.
///
/// Implemented for the integer widths that appear inside an x86 instruction.
pub trait LeBytes: Sized + Copy {
    /// Byte array type for this primitive (e.g. `[u8; 4]` for `u32`)
    type Bytes: Sized + Default + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Read `Self` from a little-endian byte array
    fn from_le(bytes: Self::Bytes) -> Self;

    /// Write `Self` into a little-endian byte array
    fn to_le(self) -> Self::Bytes;
}

macro_rules! impl_le_bytes {
    ($($ty:ty),* $(,)?) => {
        $(
            impl LeBytes for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                fn from_le(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn to_le(self) -> Self::Bytes {
                    <$ty>::to_le_bytes(self)
                }
            }
        )*
    };
}

impl_le_bytes!(u8, i8, u16, i16, u32, i32, u64, i64);

/// Safely reads a value of type `T` in little-endian byte order at `offset`, advancing the
/// offset past it.
///
/// # Errors
/// Returns [`Error::EndOfInput`] if fewer than `size_of::<T>()` bytes remain. The error
/// carries the offset of the first missing byte.
pub fn read_le_at<T: LeBytes>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(Error::EndOfInput { offset: *offset });
    };
    if end > data.len() {
        return Err(Error::EndOfInput {
            offset: data.len().max(*offset),
        });
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(Error::EndOfInput { offset: *offset });
    };

    *offset = end;
    Ok(T::from_le(read))
}

/// Appends `value` to `out` in little-endian byte order.
pub fn write_le<T: LeBytes>(out: &mut Vec<u8>, value: T) {
    out.extend_from_slice(value.to_le().as_ref());
}

/// Appends the low `size` bytes of `value` (1, 2, 4 or 8) to `out` in little-endian order.
///
/// Used for variable-width fields such as displacements, where the width is decided at
/// encode time rather than by a Rust type.
pub fn write_le_sized(out: &mut Vec<u8>, value: u64, size: usize) {
    let bytes = value.to_le_bytes();
    out.extend_from_slice(&bytes[..size.min(8)]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_le_at_advances() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05];
        let mut offset = 1;
        let value: u32 = read_le_at(&data, &mut offset).unwrap();
        assert_eq!(value, 0x0504_0302);
        assert_eq!(offset, 5);
    }

    #[test]
    fn test_read_le_at_signed() {
        let data = [0xFE];
        let mut offset = 0;
        let value: i8 = read_le_at(&data, &mut offset).unwrap();
        assert_eq!(value, -2);
    }

    #[test]
    fn test_read_le_at_end_of_input() {
        let data = [0x01, 0x02];
        let mut offset = 1;
        match read_le_at::<u16>(&data, &mut offset) {
            Err(Error::EndOfInput { offset: at }) => assert_eq!(at, 2),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(offset, 1);
    }

    #[test]
    fn test_write_le_sized_truncates() {
        let mut out = Vec::new();
        write_le_sized(&mut out, 0xFFFF_FFFF_FFFF_FF80, 1);
        write_le_sized(&mut out, 0x1234, 2);
        assert_eq!(out, [0x80, 0x34, 0x12]);
    }
}
