//! PDU model and wire codec.
//!
//! A [`Pdu`] is a header (command id, status, sequence) plus a map from
//! parameter name to [`Value`], interpreted through the command's schema. The
//! [`PduRegistry`] owns one schema per command and is the entry point for
//! constructing and decoding PDUs; vendor TLVs can be registered against
//! individual commands at runtime.
//!
//! ```no_run
//! use smpp_esme::{CommandId, PduRegistry};
//!
//! let registry = PduRegistry::new();
//! let mut pdu = registry.new_pdu(CommandId::BindTransceiver);
//! pdu.set_str("system_id", "demofoo").unwrap();
//! pdu.set_str("password", "secret!").unwrap();
//! let raw = pdu.to_bytes().unwrap();
//! let parsed = registry.decode(&raw).unwrap();
//! assert_eq!(parsed.str_param("system_id"), Some("demofoo"));
//! ```

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::warn;

use crate::command::{ALL_COMMANDS, CommandId, status};
use crate::defs;
use crate::error::PduParseError;
use crate::params::{
    self, DestAddress, ParamKind, ParamSpec, TlvDef, UnsuccessSme, Value,
};

/// Size of the PDU header common to all commands.
pub const HEADER_SIZE: usize = 16;

/// Maximum accepted PDU size, to bound buffer growth on a hostile peer.
pub const MAX_PDU_SIZE: u32 = 65536;

/// Resolved schema of one command: the static mandatory table plus the
/// optional set, extended with any vendor registrations.
#[derive(Debug, Clone)]
pub struct CommandDef {
    pub id: CommandId,
    mandatory: &'static [ParamSpec],
    optional: Vec<TlvDef>,
}

impl CommandDef {
    fn from_table(id: CommandId) -> Self {
        let table = defs::table(id);
        CommandDef {
            id,
            mandatory: table.mandatory,
            optional: table.optional.to_vec(),
        }
    }

    fn declares(&self, name: &str) -> bool {
        self.mandatory.iter().any(|p| p.name == name)
            || self.optional.iter().any(|d| d.name == name)
    }
}

/// Schema registry for all SMPP commands.
///
/// Defaults to the full v3.4 parameter set. Additional vendor TLVs (tag range
/// 0x4000-0xFFFF) can be registered per command; registrations are
/// append-only and re-registering an existing name is a no-op.
#[derive(Debug, Clone)]
pub struct PduRegistry {
    defs: HashMap<CommandId, Arc<CommandDef>>,
}

impl PduRegistry {
    pub fn new() -> Self {
        let defs = ALL_COMMANDS
            .iter()
            .map(|&id| (id, Arc::new(CommandDef::from_table(id))))
            .collect();
        PduRegistry { defs }
    }

    /// Declare a vendor optional parameter for one command.
    ///
    /// The parameter becomes settable by name on that command and is parsed
    /// from incoming PDUs. A parameter used by multiple commands must be
    /// registered once per command.
    pub fn register_optional_param(
        &mut self,
        command: CommandId,
        tag: u16,
        name: &str,
        kind: ParamKind,
    ) {
        let def = match self.defs.get_mut(&command) {
            Some(def) => def,
            None => return,
        };
        if def.declares(name) {
            warn!(
                "ignoring an already defined parameter definition for tag {}",
                name
            );
            return;
        }
        Arc::make_mut(def).optional.push(TlvDef {
            tag,
            name: name.to_string().into(),
            kind,
        });
    }

    fn def(&self, id: CommandId) -> Arc<CommandDef> {
        // The map is seeded with every command id at construction.
        Arc::clone(&self.defs[&id])
    }

    /// Create a blank PDU for the given command, with schema defaults
    /// applied (bind commands start with interface_version 0x34).
    pub fn new_pdu(&self, id: CommandId) -> Pdu {
        Pdu::new(self.def(id))
    }

    /// Parse one complete raw PDU (header plus body).
    pub fn decode(&self, raw: &[u8]) -> Result<Pdu, PduParseError> {
        if raw.len() < HEADER_SIZE {
            return Err(PduParseError::InvalidHeader(raw.len()));
        }
        let mut cur = Cursor::new(raw);
        let command_length = cur.get_u32();
        if command_length < HEADER_SIZE as u32 {
            return Err(PduParseError::InvalidCommandLength(command_length));
        }
        let raw_id = cur.get_u32();
        let id =
            CommandId::try_from(raw_id).map_err(|_| PduParseError::InvalidCommandId(raw_id))?;
        let command_status = cur.get_u32();
        let sequence_number = cur.get_u32();

        let mut pdu = self.new_pdu(id);
        pdu.command_status = command_status;
        pdu.sequence_number = sequence_number;

        let def = Arc::clone(&pdu.def);

        // Mandatory parameters in declared order; a short body simply leaves
        // the tail parameters unset.
        for spec in def.mandatory {
            if !cur.has_remaining() {
                break;
            }
            let len_hint = spec
                .len_param
                .and_then(|lp| pdu.int_param(lp))
                .map(|v| v as usize);
            let value = params::decode_mandatory(spec, len_hint, &mut cur)?;
            pdu.values.insert(spec.name.to_string(), value);
        }

        // Then TLVs until the body is exhausted.
        while cur.has_remaining() {
            if cur.remaining() < 4 {
                return Err(PduParseError::Truncated("optional parameter".to_string()));
            }
            let tag = cur.get_u16();
            let length = cur.get_u16();
            if (length as usize) > cur.remaining() {
                return Err(PduParseError::TlvOverrun {
                    tag,
                    length,
                    remaining: cur.remaining(),
                });
            }
            match def.optional.iter().find(|d| d.tag == tag) {
                Some(tlv) => {
                    let value = params::decode_tlv_value(tlv, length, &mut cur)?;
                    pdu.values.insert(tlv.name.to_string(), value);
                }
                None => {
                    match defs::tag_name(tag) {
                        Some(name) => warn!(
                            "unexpected TLV '{name}' ({tag:#06x}); not part of {}; ignored",
                            id.name()
                        ),
                        None => warn!("unknown TLV tag {tag:#06x} with length {length}; ignored"),
                    }
                    cur.advance(length as usize);
                }
            }
        }

        Ok(pdu)
    }
}

impl Default for PduRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// One SMPP protocol data unit.
#[derive(Debug, Clone)]
pub struct Pdu {
    pub command_id: CommandId,
    pub command_status: u32,
    pub sequence_number: u32,
    def: Arc<CommandDef>,
    values: HashMap<String, Value>,
    encoded_body: Option<Bytes>,
}

impl Pdu {
    fn new(def: Arc<CommandDef>) -> Self {
        let mut values = HashMap::new();
        for spec in def.mandatory {
            if let Some(initial) = spec.initial {
                values.insert(spec.name.to_string(), Value::Int(initial));
            }
        }
        Pdu {
            command_id: def.id,
            command_status: status::ESME_ROK,
            sequence_number: 0,
            def,
            values,
            encoded_body: None,
        }
    }

    /// True as long as command_status is ESME_ROK.
    pub fn ok(&self) -> bool {
        self.command_status == status::ESME_ROK
    }

    /// Wire name of the command.
    pub fn command(&self) -> &'static str {
        self.command_id.name()
    }

    /// Set a parameter by name. The name must be declared by this command's
    /// schema; setting invalidates any cached body encoding.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), PduParseError> {
        if !self.def.declares(name) {
            return Err(PduParseError::UnknownParam(name.to_string()));
        }
        self.values.insert(name.to_string(), value);
        self.encoded_body = None;
        Ok(())
    }

    /// Remove a parameter value, reverting it to unset.
    pub fn clear(&mut self, name: &str) {
        self.values.remove(name);
        self.encoded_body = None;
    }

    pub fn set_int(&mut self, name: &str, value: u32) -> Result<(), PduParseError> {
        self.set(name, Value::Int(value))
    }

    pub fn set_str(&mut self, name: &str, value: impl Into<String>) -> Result<(), PduParseError> {
        self.set(name, Value::Str(value.into()))
    }

    pub fn set_bytes(&mut self, name: &str, value: impl Into<Bytes>) -> Result<(), PduParseError> {
        self.set(name, Value::Bytes(value.into()))
    }

    pub fn set_dest_addresses(
        &mut self,
        records: Vec<DestAddress>,
    ) -> Result<(), PduParseError> {
        self.set("dest_address", Value::DestAddresses(records))
    }

    pub fn set_unsuccess_smes(
        &mut self,
        records: Vec<UnsuccessSme>,
    ) -> Result<(), PduParseError> {
        self.set("unsuccess_sme", Value::UnsuccessSmes(records))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn int_param(&self, name: &str) -> Option<u32> {
        self.values.get(name).and_then(Value::as_int)
    }

    pub fn str_param(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    pub fn bytes_param(&self, name: &str) -> Option<&Bytes> {
        self.values.get(name).and_then(Value::as_bytes)
    }

    pub fn dest_addresses(&self) -> Option<&[DestAddress]> {
        match self.values.get("dest_address") {
            Some(Value::DestAddresses(records)) => Some(records),
            _ => None,
        }
    }

    pub fn unsuccess_smes(&self) -> Option<&[UnsuccessSme]> {
        match self.values.get("unsuccess_sme") {
            Some(Value::UnsuccessSmes(records)) => Some(records),
            _ => None,
        }
    }

    /// Recompute the derived length parameters and enforce exclusivity rules
    /// before the body is encoded. Callers never set these lengths.
    fn prepare_body(&mut self) -> Result<(), PduParseError> {
        match self.command_id {
            CommandId::SubmitSm | CommandId::DeliverSm | CommandId::SubmitMulti => {
                let sm_length = match self.values.get("short_message") {
                    Some(Value::Bytes(b)) if !b.is_empty() => {
                        if self.values.contains_key("message_payload") {
                            return Err(PduParseError::PayloadConflict);
                        }
                        b.len()
                    }
                    _ => 0,
                };
                self.values
                    .insert("sm_length".to_string(), Value::Int(sm_length as u32));
                if self.command_id == CommandId::SubmitMulti {
                    let dests = match self.values.get("dest_address") {
                        Some(Value::DestAddresses(records)) => records.len(),
                        _ => 0,
                    };
                    self.values
                        .insert("number_of_dests".to_string(), Value::Int(dests as u32));
                }
            }
            CommandId::ReplaceSm => {
                let sm_length = match self.values.get("short_message") {
                    Some(Value::Bytes(b)) => b.len(),
                    _ => 0,
                };
                self.values
                    .insert("sm_length".to_string(), Value::Int(sm_length as u32));
            }
            CommandId::SubmitMultiResp => {
                let unsuccessful = match self.values.get("unsuccess_sme") {
                    Some(Value::UnsuccessSmes(records)) => records.len(),
                    _ => 0,
                };
                self.values
                    .insert("no_unsuccess".to_string(), Value::Int(unsuccessful as u32));
            }
            _ => {}
        }
        Ok(())
    }

    /// Encoded PDU body. The result is cached until a parameter changes.
    pub fn body(&mut self) -> Result<Bytes, PduParseError> {
        if let Some(body) = &self.encoded_body {
            return Ok(body.clone());
        }
        self.prepare_body()?;

        let def = Arc::clone(&self.def);
        let mut buf = BytesMut::new();
        for spec in def.mandatory {
            params::encode_mandatory(spec, self.values.get(spec.name), &mut buf)?;
        }
        for tlv in &def.optional {
            if let Some(value) = self.values.get(tlv.name.as_ref()) {
                params::encode_tlv(tlv, value, &mut buf)?;
            }
        }

        let body = buf.freeze();
        self.encoded_body = Some(body.clone());
        Ok(body)
    }

    /// Encode the complete PDU: 16-byte header followed by the body, with
    /// command_length covering both.
    pub fn to_bytes(&mut self) -> Result<Bytes, PduParseError> {
        let body = self.body()?;
        let mut buf = BytesMut::with_capacity(HEADER_SIZE + body.len());
        buf.put_u32((HEADER_SIZE + body.len()) as u32);
        buf.put_u32(self.command_id as u32);
        buf.put_u32(self.command_status);
        buf.put_u32(self.sequence_number);
        buf.put_slice(&body);
        Ok(buf.freeze())
    }
}
