//! Legacy prefixes, REX and the VEX/XOP/EVEX prefixes.

use crate::{
    encoder::operands::Fields,
    instruction::{
        EncodingKind, Instruction, InstructionFlags, OpCodeFlags, OpCodeInfo, OpCodeTable, Operand,
        Register,
    },
    Bitness, Result,
};

const REP_FLAGS: InstructionFlags = InstructionFlags::REP
    .union(InstructionFlags::REPNE)
    .union(InstructionFlags::XACQUIRE)
    .union(InstructionFlags::XRELEASE);

const EVEX_FLAGS: InstructionFlags = InstructionFlags::ZEROING
    .union(InstructionFlags::BROADCAST)
    .union(InstructionFlags::SUPPRESS_ALL_EXCEPTIONS);

fn segment_byte(address: u64, segment: Register) -> Result<Option<u8>> {
    let byte = match segment {
        Register::None => return Ok(None),
        Register::ES => 0x26,
        Register::CS => 0x2E,
        Register::SS => 0x36,
        Register::DS => 0x3E,
        Register::FS => 0x64,
        Register::GS => 0x65,
        other => {
            return Err(encode_error!(
                address,
                "{:?} is not a segment register",
                other
            ))
        }
    };
    Ok(Some(byte))
}

/// Writes every byte that precedes the opcode escape.
///
/// The order is segment, `F0`, `66`, `67`, `F3`/`F2`, then the mandatory prefix and REX for
/// legacy encodings, or the VEX/XOP/EVEX prefix.
pub(crate) fn write_prefixes(
    out: &mut Vec<u8>,
    bitness: Bitness,
    instr: &Instruction,
    info: &OpCodeInfo,
    fields: &Fields,
) -> Result<()> {
    let address = instr.ip;
    let legacy = info.encoding == EncodingKind::Legacy;
    if !legacy && instr.flags.intersects(REP_FLAGS | InstructionFlags::LOCK) {
        return Err(encode_error!(
            address,
            "{} cannot take LOCK or repeat prefixes",
            instr.code.name()
        ));
    }

    if let Some(byte) = segment_byte(address, instr.segment_prefix)? {
        out.push(byte);
    }
    if instr.flags.contains(InstructionFlags::LOCK) || fields.lock_cr8 {
        out.push(0xF0);
    }
    let mandatory = if legacy {
        info.mandatory_prefix.byte()
    } else {
        None
    };
    let operand_override = matches!(
        (bitness, info.operand_size),
        (Bitness::Bit16, 32) | (Bitness::Bit32 | Bitness::Bit64, 16)
    );
    if legacy && operand_override && mandatory != Some(0x66) {
        out.push(0x66);
    }
    if fields.address_size != 0 && fields.address_size != bitness.bits() {
        out.push(0x67);
    }
    if instr.flags.intersects(InstructionFlags::REP | InstructionFlags::XRELEASE)
        && mandatory != Some(0xF3)
    {
        out.push(0xF3);
    }
    if instr.flags.intersects(InstructionFlags::REPNE | InstructionFlags::XACQUIRE)
        && mandatory != Some(0xF2)
    {
        out.push(0xF2);
    }

    match info.encoding {
        EncodingKind::Legacy => {
            if let Some(byte) = mandatory {
                out.push(byte);
            }
            write_rex(out, bitness, instr, info, fields)
        }
        EncodingKind::Vex => {
            check_no_evex_state(instr)?;
            write_vex(out, info, fields);
            Ok(())
        }
        EncodingKind::Xop => {
            check_no_evex_state(instr)?;
            write_vex3(out, 0x8F, info, fields);
            Ok(())
        }
        EncodingKind::Evex => write_evex(out, instr, info, fields),
    }
}

fn check_no_evex_state(instr: &Instruction) -> Result<()> {
    if instr.op_mask != Register::None
        || instr.flags.intersects(EVEX_FLAGS)
        || instr.rounding.to_ll().is_some()
    {
        return Err(encode_error!(
            instr.ip,
            "{} has no opmask, broadcast or rounding",
            instr.code.name()
        ));
    }
    Ok(())
}

fn write_rex(
    out: &mut Vec<u8>,
    bitness: Bitness,
    instr: &Instruction,
    info: &OpCodeInfo,
    fields: &Fields,
) -> Result<()> {
    check_no_evex_state(instr)?;
    let w = info.operand_size == 64 && !info.flags.contains(OpCodeFlags::DEFAULT_OP_SIZE64);
    let rex = 0x40
        | (u8::from(w) << 3)
        | (u8::from(fields.rex_r) << 2)
        | (u8::from(fields.rex_x) << 1)
        | u8::from(fields.rex_b);
    if rex == 0x40 && !fields.needs_rex {
        return Ok(());
    }
    if bitness != Bitness::Bit64 {
        return Err(encode_error!(
            instr.ip,
            "{} needs a REX prefix outside 64-bit mode",
            instr.code.name()
        ));
    }
    if fields.high_byte_reg {
        return Err(encode_error!(
            instr.ip,
            "AH, CH, DH and BH cannot be encoded with a REX prefix"
        ));
    }
    out.push(rex);
    Ok(())
}

fn w_bit(info: &OpCodeInfo) -> u8 {
    u8::from(info.flags.contains(OpCodeFlags::W1))
}

fn l_bit(info: &OpCodeInfo) -> u8 {
    if info.flags.contains(OpCodeFlags::LIG) {
        0
    } else {
        info.vector_length & 1
    }
}

/// `C5` when only `R` is needed in map `0F` with `W` = 0, otherwise `C4`.
fn write_vex(out: &mut Vec<u8>, info: &OpCodeInfo, fields: &Fields) {
    let two_byte =
        !fields.rex_x && !fields.rex_b && w_bit(info) == 0 && info.table == OpCodeTable::T0F;
    if two_byte {
        let vvvv = !fields.vvvv & 0x0F;
        out.push(0xC5);
        out.push(
            (u8::from(!fields.rex_r) << 7)
                | (vvvv << 3)
                | (l_bit(info) << 2)
                | info.mandatory_prefix as u8,
        );
    } else {
        write_vex3(out, 0xC4, info, fields);
    }
}

/// `C4`/`8F R̄X̄B̄mmmmm Wvvvv̄Lpp`
fn write_vex3(out: &mut Vec<u8>, escape: u8, info: &OpCodeInfo, fields: &Fields) {
    let vvvv = !fields.vvvv & 0x0F;
    out.push(escape);
    out.push(
        (u8::from(!fields.rex_r) << 7)
            | (u8::from(!fields.rex_x) << 6)
            | (u8::from(!fields.rex_b) << 5)
            | info.table.map_select(),
    );
    out.push((w_bit(info) << 7) | (vvvv << 3) | (l_bit(info) << 2) | info.mandatory_prefix as u8);
}

/// `62 R̄X̄B̄R̄'00mm Wvvvv̄1pp zL'Lbv̄'aaa`
fn write_evex(
    out: &mut Vec<u8>,
    instr: &Instruction,
    info: &OpCodeInfo,
    fields: &Fields,
) -> Result<()> {
    let address = instr.ip;
    let flags = info.flags;
    let has_memory = instr.operands.iter().any(|op| matches!(op, Operand::Memory(_)));

    let aaa = match instr.op_mask {
        Register::None => 0,
        mask @ (Register::K1
        | Register::K2
        | Register::K3
        | Register::K4
        | Register::K5
        | Register::K6
        | Register::K7) => {
            if !flags.contains(OpCodeFlags::OPMASK) {
                return Err(encode_error!(address, "{} has no opmask", instr.code.name()));
            }
            mask.number()
        }
        other => {
            return Err(encode_error!(address, "{:?} cannot be used as an opmask", other));
        }
    };

    let zeroing = instr.flags.contains(InstructionFlags::ZEROING);
    if zeroing {
        let memory_destination = matches!(instr.operands[0], Operand::Memory(_));
        if aaa == 0 || !flags.contains(OpCodeFlags::ZEROING) || memory_destination {
            return Err(encode_error!(
                address,
                "zeroing-masking needs an opmask and a register destination"
            ));
        }
    }

    let mut ll = info.vector_length & 3;
    let mut b = false;
    if instr.flags.contains(InstructionFlags::BROADCAST) {
        if !flags.contains(OpCodeFlags::BROADCAST) || !has_memory {
            return Err(encode_error!(
                address,
                "{} cannot broadcast",
                instr.code.name()
            ));
        }
        b = true;
    }
    if let Some(rounding) = instr.rounding.to_ll() {
        if !flags.contains(OpCodeFlags::ROUNDING) || has_memory {
            return Err(encode_error!(
                address,
                "{} has no embedded rounding",
                instr.code.name()
            ));
        }
        ll = rounding;
        b = true;
    }
    if instr.flags.contains(InstructionFlags::SUPPRESS_ALL_EXCEPTIONS) {
        if !flags.contains(OpCodeFlags::SAE) || has_memory {
            return Err(encode_error!(
                address,
                "{} cannot suppress exceptions",
                instr.code.name()
            ));
        }
        b = true;
    }

    let x = fields.rex_x || fields.evex_x2;
    let p0 = (u8::from(!fields.rex_r) << 7)
        | (u8::from(!x) << 6)
        | (u8::from(!fields.rex_b) << 5)
        | (u8::from(!fields.evex_r2) << 4)
        | (info.table.map_select() & 3);
    let p1 = (w_bit(info) << 7)
        | ((!fields.vvvv & 0x0F) << 3)
        | 0x04
        | info.mandatory_prefix as u8;
    let p2 = (u8::from(zeroing) << 7)
        | (ll << 5)
        | (u8::from(b) << 4)
        | (u8::from(fields.vvvv & 0x10 == 0) << 3)
        | aaa;
    out.extend_from_slice(&[0x62, p0, p1, p2]);
    Ok(())
}

/// Bytes of the opcode escape of a legacy encoding.
pub(crate) fn escape_bytes(info: &OpCodeInfo) -> &'static [u8] {
    if info.encoding != EncodingKind::Legacy {
        return &[];
    }
    match info.table {
        OpCodeTable::T0F => &[0x0F],
        OpCodeTable::T0F38 => &[0x0F, 0x38],
        OpCodeTable::T0F3A => &[0x0F, 0x3A],
        _ => &[],
    }
}

