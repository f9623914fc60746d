//! An SMPP v3.4 ESME client library.
//!
//! The crate has two halves. The codec half models PDUs against declarative
//! per-command schemas: [`PduRegistry`] turns raw bytes into [`Pdu`] values
//! and back, with optional (TLV) parameters resolved through a registry that
//! callers can extend with vendor tags at runtime. The session half is
//! [`Client`], an async state machine over one TCP connection that performs
//! binds, gates outgoing commands by bind state, correlates responses by
//! sequence number, keeps an idle link alive with enquire_link and dispatches
//! per-command callbacks.
//!
//! Text handling lives in [`encoding`] (GSM 03.38 with its escape plane and
//! 7-bit packing, plus the ISO-8859 and UCS-2 codings) and [`sm`]
//! (segmentation of long messages into UDH-concatenated parts).
//!
//! ```rust,no_run
//! use smpp_esme::{BindCredentials, Client, ClientConfig, CommandId};
//!
//! #[tokio::main]
//! async fn main() -> smpp_esme::SmppResult<()> {
//!     let mut esme = Client::connect("localhost:2775", ClientConfig::default()).await?;
//!     esme.bind_transceiver(&BindCredentials::new("system_id", "password")).await?;
//!
//!     let mut sms = esme.new_pdu(CommandId::SubmitSm);
//!     sms.set_str("source_addr", "131313")?;
//!     sms.set_str("destination_addr", "4178481818")?;
//!     sms.set_bytes("short_message", &b"Hello, World!"[..])?;
//!     esme.submit_sm(sms).await?;
//!
//!     esme.close().await
//! }
//! ```

pub mod client;
pub mod command;
pub mod connection;
pub mod defs;
pub mod encoding;
pub mod error;
pub mod params;
pub mod pdu;
pub mod sequence;
pub mod sm;

pub use client::{BindCredentials, Client, ClientConfig, PduCallback};
pub use command::{CommandId, SessionState, status};
pub use defs::tags;
pub use encoding::{MessageData, data_coding, encode_short_message, gsm0338};
pub use error::{
    CommandError, EncodingError, PduParseError, SmppConnectionError, SmppError, SmppResult,
};
pub use params::{DestAddress, ParamKind, TlvDef, UnsuccessSme, Value};
pub use pdu::{Pdu, PduRegistry};
pub use sequence::{InMemorySequence, SequenceGenerator};
pub use sm::{SplitMessage, split_short_message};
