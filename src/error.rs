// ABOUTME: Error types for PDU parsing, command failures, connection faults and
// ABOUTME: text encoding, plus the umbrella error returned by client operations

use std::io;
use thiserror::Error;

use crate::command::status;

/// Raised when raw PDU bytes cannot be parsed or a PDU cannot be encoded.
///
/// Fatal to the PDU in question but not to the session; a read loop may be
/// resumed after handling one of these.
#[derive(Debug, Error)]
pub enum PduParseError {
    #[error("PDU has invalid header: {0} bytes is too short")]
    InvalidHeader(usize),

    #[error("invalid command length {0}")]
    InvalidCommandLength(u32),

    #[error("invalid command code {0:#010x}")]
    InvalidCommandId(u32),

    #[error("PDU body ends inside parameter '{0}'")]
    Truncated(String),

    #[error("TLV {tag:#06x} length {length} overruns PDU body ({remaining} bytes left)")]
    TlvOverrun {
        tag: u16,
        length: u16,
        remaining: usize,
    },

    #[error("TLV {tag:#06x} carries {length} bytes for an integer value")]
    TlvIntegerLength { tag: u16, length: u16 },

    #[error("value of {0} must be in bytes")]
    NotOctetString(String),

    #[error("'{0}' is not a parameter of this command")]
    UnknownParam(String),

    #[error("parameter '{name}' cannot hold a {given} value")]
    WrongKind { name: String, given: &'static str },

    #[error("message_payload and short_message cannot coexist")]
    PayloadConflict,

    #[error("cannot extract Octet-String without length for parameter {0}")]
    MissingLength(String),

    #[error("invalid UTF-8 in parameter '{name}'")]
    Utf8 {
        name: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// A response PDU carried a non-ROK status, or a command was refused locally
/// (for example an attempt to submit while unbound).
#[derive(Debug, Error)]
#[error("{message} ({status:#x}: {})", status::describe(*.status))]
pub struct CommandError {
    pub message: String,
    pub status: u32,
}

impl CommandError {
    pub fn new(message: impl Into<String>, status: u32) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

/// The underlying socket failed: closed by the peer, a zero-byte write, an OS
/// error, or a timeout where a response was required.
#[derive(Debug, Error)]
pub enum SmppConnectionError {
    #[error("connection failed: {0}")]
    Io(#[from] io::Error),

    #[error("broken socket")]
    Closed,

    #[error("socket timeout")]
    Timeout,
}

/// GSM 03.38 or data-coding conversion failure.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("character {0:?} has no GSM 03.38 encoding")]
    UnmappableChar(char),

    #[error("byte {0:#04x} is not a GSM 03.38 character")]
    UnmappableByte(u8),

    #[error("data coding {0:#04x} requires bytes input")]
    BinaryInput(u8),

    #[error("unhandled data coding {0:#04x}")]
    UnhandledDataCoding(u8),
}

/// Umbrella error for client operations.
#[derive(Debug, Error)]
pub enum SmppError {
    #[error(transparent)]
    Pdu(#[from] PduParseError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Connection(#[from] SmppConnectionError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// Result type alias for SMPP operations.
pub type SmppResult<T> = Result<T, SmppError>;
