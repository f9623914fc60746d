//! Wire codec for the four SMPP parameter kinds and the TLV wrapper.
//!
//! Every PDU body is a sequence of parameters drawn from a small set of
//! shapes: fixed-width big-endian integers, NUL-terminated C-Octet-Strings,
//! raw octet strings whose length lives in a sibling parameter, and the two
//! list parameters used by submit_multi. Optional parameters are the same
//! shapes wrapped in a (tag, length) TLV header.

use std::borrow::Cow;
use std::io::Cursor;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::PduParseError;

/// Shape of a single PDU parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Big-endian unsigned integer of 1, 2 or 4 bytes.
    Integer { size: usize },
    /// NUL-terminated string, right-padded with NULs to exactly `size` bytes.
    CStringFixed { size: usize },
    /// NUL-terminated string of at most `max_len` bytes including the NUL.
    /// Longer values are truncated so the last byte is the terminator.
    CString { max_len: usize },
    /// Raw bytes. `size` or `max_len` document the declared bounds; the
    /// actual length travels in a sibling parameter or the TLV header.
    OctetString {
        size: Option<usize>,
        max_len: Option<usize>,
    },
    /// submit_sm dest_address: records keyed by dest_flag.
    DestAddressList,
    /// submit_multi_resp unsuccess_sme records.
    UnsuccessSmeList,
}

/// Declaration of one mandatory parameter within a command schema.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    /// Sibling integer parameter that carries this parameter's length.
    pub len_param: Option<&'static str>,
    /// Value assumed when the caller sets nothing.
    pub initial: Option<u32>,
}

impl ParamSpec {
    pub const fn int(name: &'static str, size: usize) -> Self {
        Self {
            name,
            kind: ParamKind::Integer { size },
            len_param: None,
            initial: None,
        }
    }

    pub const fn int_default(name: &'static str, size: usize, initial: u32) -> Self {
        Self {
            name,
            kind: ParamKind::Integer { size },
            len_param: None,
            initial: Some(initial),
        }
    }

    pub const fn cstring(name: &'static str, max_len: usize) -> Self {
        Self {
            name,
            kind: ParamKind::CString { max_len },
            len_param: None,
            initial: None,
        }
    }

    pub const fn octets(name: &'static str, max_len: usize, len_param: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::OctetString {
                size: None,
                max_len: Some(max_len),
            },
            len_param: Some(len_param),
            initial: None,
        }
    }

    pub const fn dest_address_list(name: &'static str, len_param: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::DestAddressList,
            len_param: Some(len_param),
            initial: None,
        }
    }

    pub const fn unsuccess_sme_list(name: &'static str, len_param: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::UnsuccessSmeList,
            len_param: Some(len_param),
            initial: None,
        }
    }
}

/// Declaration of one optional (TLV) parameter.
#[derive(Debug, Clone)]
pub struct TlvDef {
    pub tag: u16,
    pub name: Cow<'static, str>,
    pub kind: ParamKind,
}

impl TlvDef {
    pub const fn int(tag: u16, name: &'static str, size: usize) -> Self {
        Self {
            tag,
            name: Cow::Borrowed(name),
            kind: ParamKind::Integer { size },
        }
    }

    pub const fn cstring(tag: u16, name: &'static str, max_len: usize) -> Self {
        Self {
            tag,
            name: Cow::Borrowed(name),
            kind: ParamKind::CString { max_len },
        }
    }

    pub const fn octets(tag: u16, name: &'static str, max_len: usize) -> Self {
        Self {
            tag,
            name: Cow::Borrowed(name),
            kind: ParamKind::OctetString {
                size: None,
                max_len: Some(max_len),
            },
        }
    }

    pub const fn octets_fixed(tag: u16, name: &'static str, size: usize) -> Self {
        Self {
            tag,
            name: Cow::Borrowed(name),
            kind: ParamKind::OctetString {
                size: Some(size),
                max_len: None,
            },
        }
    }
}

/// One record of submit_multi's dest_address list, discriminated by the
/// dest_flag byte on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestAddress {
    /// dest_flag 1: an SME address.
    Sme { ton: u8, npi: u8, addr: String },
    /// dest_flag 2: a distribution list name.
    DistributionList { name: String },
}

/// One record of submit_multi_resp's unsuccess_sme list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsuccessSme {
    pub ton: u8,
    pub npi: u8,
    pub addr: String,
    pub error_status_code: u32,
}

/// A parameter value held by a PDU.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(u32),
    Str(String),
    Bytes(Bytes),
    DestAddresses(Vec<DestAddress>),
    UnsuccessSmes(Vec<UnsuccessSme>),
}

impl Value {
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Str(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::DestAddresses(_) => "destination list",
            Value::UnsuccessSmes(_) => "unsuccess list",
        }
    }

    pub fn as_int(&self) -> Option<u32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

fn wrong_kind(name: &str, value: &Value) -> PduParseError {
    PduParseError::WrongKind {
        name: name.to_string(),
        given: value.kind_name(),
    }
}

fn put_int(buf: &mut BytesMut, value: u32, size: usize) {
    match size {
        1 => buf.put_u8(value as u8),
        2 => buf.put_u16(value as u16),
        _ => buf.put_u32(value),
    }
}

/// Append a NUL-terminated string, truncating so the encoded form never
/// exceeds `max_len` bytes when the value is too long.
fn put_cstring(buf: &mut BytesMut, value: &str, max_len: usize) {
    let bytes = value.as_bytes();
    if bytes.len() > max_len {
        buf.put_slice(&bytes[..max_len - 1]);
    } else {
        buf.put_slice(bytes);
    }
    buf.put_u8(0);
}

/// Append a string right-padded with NULs to exactly `size` bytes.
fn put_cstring_fixed(buf: &mut BytesMut, value: &str, size: usize) {
    let bytes = value.as_bytes();
    let used = bytes.len().min(size);
    buf.put_slice(&bytes[..used]);
    for _ in used..size {
        buf.put_u8(0);
    }
}

fn put_dest_addresses(buf: &mut BytesMut, records: &[DestAddress]) {
    for record in records {
        match record {
            DestAddress::Sme { ton, npi, addr } => {
                buf.put_u8(1);
                buf.put_u8(*ton);
                buf.put_u8(*npi);
                put_cstring(buf, addr, 21);
            }
            DestAddress::DistributionList { name } => {
                buf.put_u8(2);
                put_cstring(buf, name, 21);
            }
        }
    }
}

fn put_unsuccess_smes(buf: &mut BytesMut, records: &[UnsuccessSme]) {
    for record in records {
        buf.put_u8(record.ton);
        buf.put_u8(record.npi);
        put_cstring(buf, &record.addr, 21);
        buf.put_u8(record.error_status_code as u8);
    }
}

/// Encode one mandatory parameter in place.
///
/// An unset mandatory integer encodes as a single zero byte regardless of its
/// declared width; an unset C-Octet-String is just the terminator; an unset
/// octet string contributes nothing.
pub(crate) fn encode_mandatory(
    spec: &ParamSpec,
    value: Option<&Value>,
    buf: &mut BytesMut,
) -> Result<(), PduParseError> {
    match (spec.kind, value) {
        (ParamKind::Integer { .. }, None) => buf.put_u8(0),
        (ParamKind::Integer { size }, Some(Value::Int(v))) => put_int(buf, *v, size),

        (ParamKind::CString { .. } | ParamKind::CStringFixed { .. }, None) => buf.put_u8(0),
        (ParamKind::CString { max_len }, Some(Value::Str(s))) => put_cstring(buf, s, max_len),
        (ParamKind::CStringFixed { size }, Some(Value::Str(s))) => {
            put_cstring_fixed(buf, s, size)
        }

        (ParamKind::OctetString { .. }, None) => {}
        (ParamKind::OctetString { .. }, Some(Value::Bytes(b))) => buf.put_slice(b),
        (ParamKind::OctetString { .. }, Some(_)) => {
            return Err(PduParseError::NotOctetString(spec.name.to_string()));
        }

        (ParamKind::DestAddressList, None) | (ParamKind::UnsuccessSmeList, None) => {}
        (ParamKind::DestAddressList, Some(Value::DestAddresses(records))) => {
            put_dest_addresses(buf, records)
        }
        (ParamKind::UnsuccessSmeList, Some(Value::UnsuccessSmes(records))) => {
            put_unsuccess_smes(buf, records)
        }

        (_, Some(v)) => return Err(wrong_kind(spec.name, v)),
    }
    Ok(())
}

/// Encode one optional parameter as (tag, length, value).
pub(crate) fn encode_tlv(
    def: &TlvDef,
    value: &Value,
    buf: &mut BytesMut,
) -> Result<(), PduParseError> {
    match (def.kind, value) {
        (ParamKind::Integer { size }, Value::Int(v)) => {
            buf.put_u16(def.tag);
            buf.put_u16(size as u16);
            put_int(buf, *v, size);
        }
        (ParamKind::CString { max_len }, Value::Str(s)) => {
            let mut encoded = BytesMut::new();
            put_cstring(&mut encoded, s, max_len);
            buf.put_u16(def.tag);
            buf.put_u16(encoded.len() as u16);
            buf.put_slice(&encoded);
        }
        (ParamKind::CStringFixed { size }, Value::Str(s)) => {
            buf.put_u16(def.tag);
            buf.put_u16(size as u16);
            put_cstring_fixed(buf, s, size);
        }
        (ParamKind::OctetString { .. }, Value::Bytes(b)) => {
            buf.put_u16(def.tag);
            buf.put_u16(b.len() as u16);
            buf.put_slice(b);
        }
        (ParamKind::OctetString { .. }, _) => {
            return Err(PduParseError::NotOctetString(def.name.to_string()));
        }
        (_, v) => return Err(wrong_kind(&def.name, v)),
    }
    Ok(())
}

fn take_bytes(
    cur: &mut Cursor<&[u8]>,
    len: usize,
    name: &str,
) -> Result<Bytes, PduParseError> {
    if cur.remaining() < len {
        return Err(PduParseError::Truncated(name.to_string()));
    }
    Ok(cur.copy_to_bytes(len))
}

fn into_string(bytes: Vec<u8>, name: &str) -> Result<String, PduParseError> {
    String::from_utf8(bytes).map_err(|e| PduParseError::Utf8 {
        name: name.to_string(),
        source: e,
    })
}

/// Read bytes up to and including the next NUL; the terminator is consumed
/// but not part of the value. Input without a terminator is taken whole.
fn read_cstring(cur: &mut Cursor<&[u8]>, name: &str) -> Result<String, PduParseError> {
    let remaining = &cur.get_ref()[cur.position() as usize..];
    match remaining.iter().position(|&b| b == 0) {
        Some(i) => {
            let value = remaining[..i].to_vec();
            cur.advance(i + 1);
            into_string(value, name)
        }
        None => {
            let value = remaining.to_vec();
            let len = value.len();
            cur.advance(len);
            into_string(value, name)
        }
    }
}

/// Read exactly `len` bytes and strip a single trailing NUL if present.
fn read_cstring_sized(
    cur: &mut Cursor<&[u8]>,
    len: usize,
    name: &str,
) -> Result<String, PduParseError> {
    let mut value = take_bytes(cur, len.min(cur.remaining()), name)?.to_vec();
    if value.last() == Some(&0) {
        value.pop();
    }
    into_string(value, name)
}

fn read_int(cur: &mut Cursor<&[u8]>, size: usize, name: &str) -> Result<u32, PduParseError> {
    if cur.remaining() < size {
        return Err(PduParseError::Truncated(name.to_string()));
    }
    Ok(match size {
        1 => cur.get_u8() as u32,
        2 => cur.get_u16() as u32,
        _ => cur.get_u32(),
    })
}

/// Decode one mandatory parameter from the body cursor. `len_hint` carries
/// the resolved value of the parameter's `len_param`, where declared.
pub(crate) fn decode_mandatory(
    spec: &ParamSpec,
    len_hint: Option<usize>,
    cur: &mut Cursor<&[u8]>,
) -> Result<Value, PduParseError> {
    match spec.kind {
        ParamKind::Integer { size } => Ok(Value::Int(read_int(cur, size, spec.name)?)),
        ParamKind::CString { .. } => Ok(Value::Str(read_cstring(cur, spec.name)?)),
        ParamKind::CStringFixed { size } => {
            Ok(Value::Str(read_cstring_sized(cur, size, spec.name)?))
        }
        ParamKind::OctetString { .. } => {
            let len = len_hint
                .ok_or_else(|| PduParseError::MissingLength(spec.name.to_string()))?;
            Ok(Value::Bytes(take_bytes(cur, len, spec.name)?))
        }
        ParamKind::DestAddressList => {
            let count = len_hint.unwrap_or(0);
            let mut records = Vec::with_capacity(count);
            for _ in 0..count {
                let flag = read_int(cur, 1, "dest_flag")?;
                if flag == 1 {
                    let ton = read_int(cur, 1, "dest_addr_ton")? as u8;
                    let npi = read_int(cur, 1, "dest_addr_npi")? as u8;
                    let addr = read_cstring(cur, "destination_addr")?;
                    records.push(DestAddress::Sme { ton, npi, addr });
                } else {
                    let name = read_cstring(cur, "dl_name")?;
                    records.push(DestAddress::DistributionList { name });
                }
            }
            Ok(Value::DestAddresses(records))
        }
        ParamKind::UnsuccessSmeList => {
            let count = len_hint.unwrap_or(0);
            let mut records = Vec::with_capacity(count);
            for _ in 0..count {
                let ton = read_int(cur, 1, "dest_addr_ton")? as u8;
                let npi = read_int(cur, 1, "dest_addr_npi")? as u8;
                let addr = read_cstring(cur, "destination_addr")?;
                let error_status_code = read_int(cur, 1, "error_status_code")?;
                records.push(UnsuccessSme {
                    ton,
                    npi,
                    addr,
                    error_status_code,
                });
            }
            Ok(Value::UnsuccessSmes(records))
        }
    }
}

/// Decode the value part of a TLV whose bounds have already been checked.
///
/// Exactly `length` bytes are consumed regardless of the declared width so
/// that the TLV walk stays aligned with the wire.
pub(crate) fn decode_tlv_value(
    def: &TlvDef,
    length: u16,
    cur: &mut Cursor<&[u8]>,
) -> Result<Value, PduParseError> {
    let length = length as usize;
    match def.kind {
        ParamKind::Integer { .. } => {
            if length > 4 {
                return Err(PduParseError::TlvIntegerLength {
                    tag: def.tag,
                    length: length as u16,
                });
            }
            let bytes = take_bytes(cur, length, &def.name)?;
            Ok(Value::Int(
                bytes.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32),
            ))
        }
        ParamKind::CString { .. } | ParamKind::CStringFixed { .. } => {
            Ok(Value::Str(read_cstring_sized(cur, length, &def.name)?))
        }
        _ => Ok(Value::Bytes(take_bytes(cur, length, &def.name)?)),
    }
}
