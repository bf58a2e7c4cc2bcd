//! x86 register set.
//!
//! [`Register`] is a flat enum over every register an operand can name. Registers of one
//! class occupy a contiguous range of discriminants, so converting between a class-relative
//! number (as found in ModRM, SIB, REX and VEX fields) and a [`Register`] is plain arithmetic.

use strum::{EnumCount, FromRepr, IntoStaticStr};

/// Every register an x86 operand can reference.
#[allow(non_camel_case_types, clippy::upper_case_acronyms, missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    EnumCount,
    FromRepr,
    IntoStaticStr,
)]
#[repr(u8)]
pub enum Register {
    /// No register
    #[default]
    None = 0,
    // 8-bit general purpose registers. `AH`..`BH` cannot be encoded together with a REX
    // prefix, `SPL`..`DIL` require one.
    AL = 1,
    CL = 2,
    DL = 3,
    BL = 4,
    AH = 5,
    CH = 6,
    DH = 7,
    BH = 8,
    SPL = 9,
    BPL = 10,
    SIL = 11,
    DIL = 12,
    R8L = 13,
    R9L = 14,
    R10L = 15,
    R11L = 16,
    R12L = 17,
    R13L = 18,
    R14L = 19,
    R15L = 20,
    // 16-bit general purpose registers
    AX = 21,
    CX = 22,
    DX = 23,
    BX = 24,
    SP = 25,
    BP = 26,
    SI = 27,
    DI = 28,
    R8W = 29,
    R9W = 30,
    R10W = 31,
    R11W = 32,
    R12W = 33,
    R13W = 34,
    R14W = 35,
    R15W = 36,
    // 32-bit general purpose registers
    EAX = 37,
    ECX = 38,
    EDX = 39,
    EBX = 40,
    ESP = 41,
    EBP = 42,
    ESI = 43,
    EDI = 44,
    R8D = 45,
    R9D = 46,
    R10D = 47,
    R11D = 48,
    R12D = 49,
    R13D = 50,
    R14D = 51,
    R15D = 52,
    // 64-bit general purpose registers
    RAX = 53,
    RCX = 54,
    RDX = 55,
    RBX = 56,
    RSP = 57,
    RBP = 58,
    RSI = 59,
    RDI = 60,
    R8 = 61,
    R9 = 62,
    R10 = 63,
    R11 = 64,
    R12 = 65,
    R13 = 66,
    R14 = 67,
    R15 = 68,
    // Instruction pointers, only valid as a memory base
    EIP = 69,
    RIP = 70,
    // Segment registers, in ModRM.reg encoding order
    ES = 71,
    CS = 72,
    SS = 73,
    DS = 74,
    FS = 75,
    GS = 76,
    // 128-bit vector registers
    XMM0 = 77,
    XMM1 = 78,
    XMM2 = 79,
    XMM3 = 80,
    XMM4 = 81,
    XMM5 = 82,
    XMM6 = 83,
    XMM7 = 84,
    XMM8 = 85,
    XMM9 = 86,
    XMM10 = 87,
    XMM11 = 88,
    XMM12 = 89,
    XMM13 = 90,
    XMM14 = 91,
    XMM15 = 92,
    XMM16 = 93,
    XMM17 = 94,
    XMM18 = 95,
    XMM19 = 96,
    XMM20 = 97,
    XMM21 = 98,
    XMM22 = 99,
    XMM23 = 100,
    XMM24 = 101,
    XMM25 = 102,
    XMM26 = 103,
    XMM27 = 104,
    XMM28 = 105,
    XMM29 = 106,
    XMM30 = 107,
    XMM31 = 108,
    // 256-bit vector registers
    YMM0 = 109,
    YMM1 = 110,
    YMM2 = 111,
    YMM3 = 112,
    YMM4 = 113,
    YMM5 = 114,
    YMM6 = 115,
    YMM7 = 116,
    YMM8 = 117,
    YMM9 = 118,
    YMM10 = 119,
    YMM11 = 120,
    YMM12 = 121,
    YMM13 = 122,
    YMM14 = 123,
    YMM15 = 124,
    YMM16 = 125,
    YMM17 = 126,
    YMM18 = 127,
    YMM19 = 128,
    YMM20 = 129,
    YMM21 = 130,
    YMM22 = 131,
    YMM23 = 132,
    YMM24 = 133,
    YMM25 = 134,
    YMM26 = 135,
    YMM27 = 136,
    YMM28 = 137,
    YMM29 = 138,
    YMM30 = 139,
    YMM31 = 140,
    // 512-bit vector registers
    ZMM0 = 141,
    ZMM1 = 142,
    ZMM2 = 143,
    ZMM3 = 144,
    ZMM4 = 145,
    ZMM5 = 146,
    ZMM6 = 147,
    ZMM7 = 148,
    ZMM8 = 149,
    ZMM9 = 150,
    ZMM10 = 151,
    ZMM11 = 152,
    ZMM12 = 153,
    ZMM13 = 154,
    ZMM14 = 155,
    ZMM15 = 156,
    ZMM16 = 157,
    ZMM17 = 158,
    ZMM18 = 159,
    ZMM19 = 160,
    ZMM20 = 161,
    ZMM21 = 162,
    ZMM22 = 163,
    ZMM23 = 164,
    ZMM24 = 165,
    ZMM25 = 166,
    ZMM26 = 167,
    ZMM27 = 168,
    ZMM28 = 169,
    ZMM29 = 170,
    ZMM30 = 171,
    ZMM31 = 172,
    // AVX-512 opmask registers
    K0 = 173,
    K1 = 174,
    K2 = 175,
    K3 = 176,
    K4 = 177,
    K5 = 178,
    K6 = 179,
    K7 = 180,
    // MMX registers
    MM0 = 181,
    MM1 = 182,
    MM2 = 183,
    MM3 = 184,
    MM4 = 185,
    MM5 = 186,
    MM6 = 187,
    MM7 = 188,
    // x87 stack registers
    ST0 = 189,
    ST1 = 190,
    ST2 = 191,
    ST3 = 192,
    ST4 = 193,
    ST5 = 194,
    ST6 = 195,
    ST7 = 196,
    // Control registers
    CR0 = 197,
    CR1 = 198,
    CR2 = 199,
    CR3 = 200,
    CR4 = 201,
    CR5 = 202,
    CR6 = 203,
    CR7 = 204,
    CR8 = 205,
    CR9 = 206,
    CR10 = 207,
    CR11 = 208,
    CR12 = 209,
    CR13 = 210,
    CR14 = 211,
    CR15 = 212,
    // Debug registers
    DR0 = 213,
    DR1 = 214,
    DR2 = 215,
    DR3 = 216,
    DR4 = 217,
    DR5 = 218,
    DR6 = 219,
    DR7 = 220,
    DR8 = 221,
    DR9 = 222,
    DR10 = 223,
    DR11 = 224,
    DR12 = 225,
    DR13 = 226,
    DR14 = 227,
    DR15 = 228,
    // MPX bound registers
    BND0 = 229,
    BND1 = 230,
    BND2 = 231,
    BND3 = 232,
}

/// Register class of a [`Register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterKind {
    /// [`Register::None`]
    None,
    /// 8-bit general purpose
    Gpr8,
    /// 16-bit general purpose
    Gpr16,
    /// 32-bit general purpose
    Gpr32,
    /// 64-bit general purpose
    Gpr64,
    /// `EIP` / `RIP`
    InstructionPointer,
    /// Segment register
    Segment,
    /// `XMM0`-`XMM31`
    Xmm,
    /// `YMM0`-`YMM31`
    Ymm,
    /// `ZMM0`-`ZMM31`
    Zmm,
    /// `K0`-`K7`
    Mask,
    /// `MM0`-`MM7`
    Mmx,
    /// `ST0`-`ST7`
    St,
    /// `CR0`-`CR15`
    Control,
    /// `DR0`-`DR15`
    Debug,
    /// `BND0`-`BND3`
    Bound,
}

impl Register {
    const fn offset(base: Register, n: u8) -> Register {
        match Register::from_repr(base as u8 + n) {
            Some(reg) => reg,
            None => Register::None,
        }
    }

    /// Returns the 8-bit register with number `n` (0-15).
    ///
    /// Without a REX prefix, numbers 4-7 select `AH`, `CH`, `DH`, `BH`; with one they select
    /// `SPL`, `BPL`, `SIL`, `DIL`.
    #[must_use]
    pub const fn gpr8(n: u8, has_rex: bool) -> Register {
        if n < 4 || (n < 8 && !has_rex) {
            Register::offset(Register::AL, n)
        } else if n < 8 {
            Register::offset(Register::SPL, n - 4)
        } else {
            Register::offset(Register::R8L, n - 8)
        }
    }

    /// Returns the 16-bit register with number `n` (0-15).
    #[must_use]
    pub const fn gpr16(n: u8) -> Register {
        Register::offset(Register::AX, n & 15)
    }

    /// Returns the 32-bit register with number `n` (0-15).
    #[must_use]
    pub const fn gpr32(n: u8) -> Register {
        Register::offset(Register::EAX, n & 15)
    }

    /// Returns the 64-bit register with number `n` (0-15).
    #[must_use]
    pub const fn gpr64(n: u8) -> Register {
        Register::offset(Register::RAX, n & 15)
    }

    /// Returns the general purpose register of `size` bytes (2, 4 or 8) with number `n`.
    #[must_use]
    pub const fn gpr(size: u8, n: u8) -> Register {
        match size {
            2 => Register::gpr16(n),
            4 => Register::gpr32(n),
            8 => Register::gpr64(n),
            _ => Register::None,
        }
    }

    /// Returns the segment register with ModRM.reg number `n`, if `n` names one.
    #[must_use]
    pub const fn segment(n: u8) -> Option<Register> {
        if n < 6 {
            Some(Register::offset(Register::ES, n))
        } else {
            None
        }
    }

    /// Returns `XMMn` (0-31).
    #[must_use]
    pub const fn xmm(n: u8) -> Register {
        Register::offset(Register::XMM0, n & 31)
    }

    /// Returns `YMMn` (0-31).
    #[must_use]
    pub const fn ymm(n: u8) -> Register {
        Register::offset(Register::YMM0, n & 31)
    }

    /// Returns `ZMMn` (0-31).
    #[must_use]
    pub const fn zmm(n: u8) -> Register {
        Register::offset(Register::ZMM0, n & 31)
    }

    /// Returns `Kn` (0-7).
    #[must_use]
    pub const fn k(n: u8) -> Register {
        Register::offset(Register::K0, n & 7)
    }

    /// Returns `MMn` (0-7).
    #[must_use]
    pub const fn mm(n: u8) -> Register {
        Register::offset(Register::MM0, n & 7)
    }

    /// Returns `STn` (0-7).
    #[must_use]
    pub const fn st(n: u8) -> Register {
        Register::offset(Register::ST0, n & 7)
    }

    /// Returns `CRn` (0-15).
    #[must_use]
    pub const fn cr(n: u8) -> Register {
        Register::offset(Register::CR0, n & 15)
    }

    /// Returns `DRn` (0-15).
    #[must_use]
    pub const fn dr(n: u8) -> Register {
        Register::offset(Register::DR0, n & 15)
    }

    /// Returns `BNDn` (0-3).
    #[must_use]
    pub const fn bnd(n: u8) -> Register {
        Register::offset(Register::BND0, n & 3)
    }

    /// Returns the register class.
    #[must_use]
    pub const fn kind(self) -> RegisterKind {
        let v = self as u8;
        if v == 0 {
            RegisterKind::None
        } else if v <= Register::R15L as u8 {
            RegisterKind::Gpr8
        } else if v <= Register::R15W as u8 {
            RegisterKind::Gpr16
        } else if v <= Register::R15D as u8 {
            RegisterKind::Gpr32
        } else if v <= Register::R15 as u8 {
            RegisterKind::Gpr64
        } else if v <= Register::RIP as u8 {
            RegisterKind::InstructionPointer
        } else if v <= Register::GS as u8 {
            RegisterKind::Segment
        } else if v <= Register::XMM31 as u8 {
            RegisterKind::Xmm
        } else if v <= Register::YMM31 as u8 {
            RegisterKind::Ymm
        } else if v <= Register::ZMM31 as u8 {
            RegisterKind::Zmm
        } else if v <= Register::K7 as u8 {
            RegisterKind::Mask
        } else if v <= Register::MM7 as u8 {
            RegisterKind::Mmx
        } else if v <= Register::ST7 as u8 {
            RegisterKind::St
        } else if v <= Register::CR15 as u8 {
            RegisterKind::Control
        } else if v <= Register::DR15 as u8 {
            RegisterKind::Debug
        } else {
            RegisterKind::Bound
        }
    }

    /// Returns the register's encoding number within its class.
    ///
    /// For 8-bit registers this is the value that goes into a ModRM/REX field: `AH` and `SPL`
    /// both encode as 4, which is why `AH` cannot be combined with a REX prefix.
    #[must_use]
    pub const fn number(self) -> u8 {
        let v = self as u8;
        let base = match self.kind() {
            RegisterKind::None => return 0,
            RegisterKind::Gpr8 => {
                return if v >= Register::R8L as u8 {
                    v - Register::R8L as u8 + 8
                } else if v >= Register::SPL as u8 {
                    v - Register::SPL as u8 + 4
                } else {
                    v - Register::AL as u8
                };
            }
            RegisterKind::Gpr16 => Register::AX,
            RegisterKind::Gpr32 => Register::EAX,
            RegisterKind::Gpr64 => Register::RAX,
            RegisterKind::InstructionPointer => Register::EIP,
            RegisterKind::Segment => Register::ES,
            RegisterKind::Xmm => Register::XMM0,
            RegisterKind::Ymm => Register::YMM0,
            RegisterKind::Zmm => Register::ZMM0,
            RegisterKind::Mask => Register::K0,
            RegisterKind::Mmx => Register::MM0,
            RegisterKind::St => Register::ST0,
            RegisterKind::Control => Register::CR0,
            RegisterKind::Debug => Register::DR0,
            RegisterKind::Bound => Register::BND0,
        };
        v - base as u8
    }

    /// Size of the register in bytes, 0 for [`Register::None`].
    #[must_use]
    pub const fn size(self) -> usize {
        match self.kind() {
            RegisterKind::None => 0,
            RegisterKind::Gpr8 => 1,
            RegisterKind::Gpr16 | RegisterKind::Segment => 2,
            RegisterKind::Gpr32 => 4,
            RegisterKind::InstructionPointer => {
                if matches!(self, Register::EIP) {
                    4
                } else {
                    8
                }
            }
            RegisterKind::Gpr64 | RegisterKind::Mask | RegisterKind::Mmx => 8,
            RegisterKind::St => 10,
            RegisterKind::Control | RegisterKind::Debug => 8,
            RegisterKind::Xmm | RegisterKind::Bound => 16,
            RegisterKind::Ymm => 32,
            RegisterKind::Zmm => 64,
        }
    }

    /// `AH`, `CH`, `DH` or `BH`.
    #[must_use]
    pub const fn is_gpr8_high(self) -> bool {
        matches!(self, Register::AH | Register::CH | Register::DH | Register::BH)
    }

    /// `SPL`, `BPL`, `SIL` or `DIL`, which only exist with a REX prefix.
    #[must_use]
    pub const fn requires_rex(self) -> bool {
        matches!(
            self,
            Register::SPL | Register::BPL | Register::SIL | Register::DIL
        )
    }

    /// Returns `true` for any general purpose register.
    #[must_use]
    pub const fn is_gpr(self) -> bool {
        matches!(
            self.kind(),
            RegisterKind::Gpr8 | RegisterKind::Gpr16 | RegisterKind::Gpr32 | RegisterKind::Gpr64
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpr8_rex_selection() {
        assert_eq!(Register::gpr8(4, false), Register::AH);
        assert_eq!(Register::gpr8(4, true), Register::SPL);
        assert_eq!(Register::gpr8(7, true), Register::DIL);
        assert_eq!(Register::gpr8(9, true), Register::R9L);
        assert_eq!(Register::gpr8(1, true), Register::CL);
    }

    #[test]
    fn test_numbers_roundtrip_per_class() {
        for n in 0..16 {
            assert_eq!(Register::gpr64(n).number(), n);
            assert_eq!(Register::gpr32(n).number(), n);
            assert_eq!(Register::gpr16(n).number(), n);
            assert_eq!(Register::cr(n).number(), n);
        }
        for n in 0..32 {
            assert_eq!(Register::zmm(n).number(), n);
            assert_eq!(Register::zmm(n).kind(), RegisterKind::Zmm);
        }
        assert_eq!(Register::AH.number(), 4);
        assert_eq!(Register::SPL.number(), 4);
        assert_eq!(Register::R15L.number(), 15);
    }

    #[test]
    fn test_class_boundaries() {
        assert_eq!(Register::R15L.kind(), RegisterKind::Gpr8);
        assert_eq!(Register::AX.kind(), RegisterKind::Gpr16);
        assert_eq!(Register::RIP.kind(), RegisterKind::InstructionPointer);
        assert_eq!(Register::GS.kind(), RegisterKind::Segment);
        assert_eq!(Register::DR15.kind(), RegisterKind::Debug);
        assert_eq!(Register::BND0.kind(), RegisterKind::Bound);
        assert_eq!(Register::BND3 as usize + 1, Register::COUNT);
        assert_eq!(Register::bnd(2).number(), 2);
        assert_eq!(Register::segment(6), None);
        assert_eq!(Register::segment(4), Some(Register::FS));
    }

    #[test]
    fn test_sizes() {
        assert_eq!(Register::EIP.size(), 4);
        assert_eq!(Register::RIP.size(), 8);
        assert_eq!(Register::YMM3.size(), 32);
        assert_eq!(Register::BH.size(), 1);
        assert_eq!(Register::BND1.size(), 16);
    }
}
