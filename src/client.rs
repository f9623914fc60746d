// ABOUTME: SMPP session client: bind state machine, outgoing command gate,
// ABOUTME: response correlation, idle keepalive and per-command callbacks

//! An SMPP client ("ESME") session.
//!
//! [`Client`] owns the TCP connection and the session state machine. It can
//! connect to an SMSC, perform a bind, transmit any ESME-issued command and
//! run a listen loop that waits for incoming PDUs, responding automatically
//! where the protocol requires it.
//!
//! ```no_run
//! use smpp_esme::{BindCredentials, Client, ClientConfig, CommandId};
//!
//! # async fn example() -> smpp_esme::SmppResult<()> {
//! let mut esme = Client::connect("smsc.host.or.ip:2776", ClientConfig::default()).await?;
//! esme.bind_transmitter(&BindCredentials::new("username", "pass")).await?;
//!
//! let mut sms = esme.new_pdu(CommandId::SubmitSm);
//! sms.set_str("destination_addr", "4178481818")?;
//! sms.set_bytes("short_message", &b"test sms"[..])?;
//! esme.submit_sm(sms).await?;
//!
//! // Responses and mobile-originated traffic arrive through the listen
//! // loop; callbacks see every PDU as it is read or sent.
//! esme.set_callback(CommandId::SubmitSmResp, |pdu| {
//!     if pdu.ok() {
//!         println!("SMS was sent successfully");
//!     }
//!     None
//! });
//! esme.listen().await?;
//! # Ok(())
//! # }
//! ```
//!
//! A session is single-owner: all operations take `&mut self`, so writes to
//! the socket are naturally serialized. Run one `Client` per SMSC link and
//! as many clients in parallel as needed.

use std::collections::HashMap;
use std::time::Duration;

use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{Instant, timeout};
use tracing::{debug, info, warn};

use crate::command::{ALL_COMMANDS, CommandId, SessionState, session_transition, status};
use crate::connection::Connection;
use crate::error::{CommandError, SmppConnectionError, SmppResult};
use crate::pdu::{Pdu, PduRegistry};
use crate::sequence::{InMemorySequence, SequenceGenerator};

/// Per-session tuning knobs.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Socket read timeout. Hitting it during `listen` is not an error; it
    /// is the tick on which the idle keepalive is evaluated.
    pub read_timeout: Duration,
    /// Idle time after which a read timeout triggers an enquire_link.
    pub enquire_link_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_secs(5),
            enquire_link_interval: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub fn with_enquire_link_interval(mut self, interval: Duration) -> Self {
        self.enquire_link_interval = interval;
        self
    }
}

/// Credentials and addressing for a bind operation.
#[derive(Debug, Clone)]
pub struct BindCredentials {
    pub system_id: String,
    pub password: String,
    pub system_type: Option<String>,
    pub addr_ton: u8,
    pub addr_npi: u8,
    pub address_range: Option<String>,
}

impl BindCredentials {
    pub fn new(system_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            system_id: system_id.into(),
            password: password.into(),
            system_type: None,
            addr_ton: 0,
            addr_npi: 0,
            address_range: None,
        }
    }

    pub fn with_system_type(mut self, system_type: impl Into<String>) -> Self {
        self.system_type = Some(system_type.into());
        self
    }

    pub fn with_numbering(mut self, addr_ton: u8, addr_npi: u8) -> Self {
        self.addr_ton = addr_ton;
        self.addr_npi = addr_npi;
        self
    }

    pub fn with_address_range(mut self, range: impl Into<String>) -> Self {
        self.address_range = Some(range.into());
        self
    }
}

/// Callback invoked when a PDU of its command is read or about to be sent.
/// Returning `Some(status)` overrides the command_status of any automatic
/// response composed for the PDU.
pub type PduCallback = Box<dyn FnMut(&Pdu) -> Option<u32> + Send>;

/// An SMPP client session over one TCP connection.
pub struct Client {
    connection: Connection,
    registry: PduRegistry,
    state: SessionState,
    sequence: Box<dyn SequenceGenerator + Send>,
    callbacks: HashMap<CommandId, PduCallback>,
    config: ClientConfig,
    last_inbound: Instant,
}

impl Client {
    /// Establish the TCP connection; the session becomes `Open`.
    pub async fn connect(addr: impl ToSocketAddrs, config: ClientConfig) -> SmppResult<Client> {
        let socket = TcpStream::connect(addr)
            .await
            .map_err(SmppConnectionError::Io)?;
        if let Ok(peer) = socket.peer_addr() {
            info!("connected to SMSC at {peer}");
        }
        Ok(Client {
            connection: Connection::new(socket),
            registry: PduRegistry::new(),
            state: SessionState::Open,
            sequence: Box::new(InMemorySequence::new()),
            callbacks: HashMap::new(),
            config,
            last_inbound: Instant::now(),
        })
    }

    /// Replace the default in-memory sequence generator, e.g. with one that
    /// persists its counter across restarts.
    pub fn with_sequence_generator(
        mut self,
        sequence: impl SequenceGenerator + Send + 'static,
    ) -> Self {
        self.sequence = Box::new(sequence);
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Time elapsed since the last received PDU.
    pub fn inactivity_time(&self) -> Duration {
        self.last_inbound.elapsed()
    }

    pub fn registry(&self) -> &PduRegistry {
        &self.registry
    }

    /// Mutable schema registry, for vendor TLV registration.
    pub fn registry_mut(&mut self) -> &mut PduRegistry {
        &mut self.registry
    }

    /// Create a blank PDU against this session's schema registry.
    pub fn new_pdu(&self, id: CommandId) -> Pdu {
        self.registry.new_pdu(id)
    }

    /// Set the callback for one command.
    pub fn set_callback(
        &mut self,
        command: CommandId,
        callback: impl FnMut(&Pdu) -> Option<u32> + Send + 'static,
    ) {
        self.callbacks.insert(command, Box::new(callback));
    }

    /// Set one callback for every command, sent or received.
    pub fn set_callback_all(
        &mut self,
        callback: impl Fn(&Pdu) -> Option<u32> + Send + Sync + 'static,
    ) {
        let callback = std::sync::Arc::new(callback);
        for &id in ALL_COMMANDS {
            let callback = std::sync::Arc::clone(&callback);
            self.callbacks.insert(id, Box::new(move |pdu| callback(pdu)));
        }
    }

    fn next_sequence(&mut self) -> u32 {
        self.sequence.next_sequence()
    }

    /// Gate, announce and write one PDU. The per-command callback runs right
    /// before the bytes are emitted.
    async fn send_pdu(&mut self, pdu: &mut Pdu) -> SmppResult<()> {
        if !pdu.command_id.allowed_states().contains(&self.state) {
            return Err(CommandError::new(
                format!("{} command could not be sent", pdu.command()),
                status::ESME_RINVBNDSTS,
            )
            .into());
        }

        info!("sending {} PDU", pdu.command());
        if let Some(callback) = self.callbacks.get_mut(&pdu.command_id) {
            callback(pdu);
        }
        self.connection.write_pdu(pdu).await
    }

    /// Record an inbound PDU: refresh the inactivity timer, apply any
    /// session state transition, and run the command's callback. Returns the
    /// status to use for an automatic response.
    fn note_inbound(&mut self, pdu: &Pdu) -> u32 {
        self.last_inbound = Instant::now();

        if pdu.ok() {
            if let Some(next) = session_transition(pdu.command_id) {
                debug!("session state changing to {next:?}");
                self.state = next;
            }
        }

        let mut return_status = status::ESME_ROK;
        if let Some(callback) = self.callbacks.get_mut(&pdu.command_id) {
            if let Some(status) = callback(pdu) {
                return_status = status;
            }
        }
        return_status
    }

    async fn read_response(&mut self) -> SmppResult<Pdu> {
        let pdu = match timeout(
            self.config.read_timeout,
            self.connection.read_pdu(&self.registry),
        )
        .await
        {
            Err(_) => return Err(SmppConnectionError::Timeout.into()),
            Ok(read) => read?.ok_or(SmppConnectionError::Closed)?,
        };
        self.note_inbound(&pdu);
        Ok(pdu)
    }

    async fn bind(&mut self, id: CommandId, credentials: &BindCredentials) -> SmppResult<Pdu> {
        debug!("binding as {}", id.name());
        let mut pdu = self.registry.new_pdu(id);
        pdu.set_str("system_id", credentials.system_id.clone())?;
        pdu.set_str("password", credentials.password.clone())?;
        if let Some(system_type) = &credentials.system_type {
            pdu.set_str("system_type", system_type.clone())?;
        }
        pdu.set_int("addr_ton", credentials.addr_ton as u32)?;
        pdu.set_int("addr_npi", credentials.addr_npi as u32)?;
        if let Some(range) = &credentials.address_range {
            pdu.set_str("address_range", range.clone())?;
        }
        pdu.sequence_number = self.next_sequence();

        self.send_pdu(&mut pdu).await?;
        let response = self.read_response().await?;
        if !response.ok() {
            return Err(
                CommandError::new("Bind request rejected", response.command_status).into(),
            );
        }
        Ok(response)
    }

    /// Bind as a transmitter. Blocks until the bind response arrives; a
    /// non-ROK status is a [`CommandError`].
    pub async fn bind_transmitter(&mut self, credentials: &BindCredentials) -> SmppResult<Pdu> {
        self.bind(CommandId::BindTransmitter, credentials).await
    }

    /// Bind as a receiver.
    pub async fn bind_receiver(&mut self, credentials: &BindCredentials) -> SmppResult<Pdu> {
        self.bind(CommandId::BindReceiver, credentials).await
    }

    /// Bind as a transceiver.
    pub async fn bind_transceiver(&mut self, credentials: &BindCredentials) -> SmppResult<Pdu> {
        self.bind(CommandId::BindTransceiver, credentials).await
    }

    /// Send a request PDU built by the caller. A zero sequence number is
    /// replaced from the session's generator; the sent PDU is returned and
    /// its response arrives through the listen loop.
    async fn send_request(&mut self, expected: CommandId, mut pdu: Pdu) -> SmppResult<Pdu> {
        if pdu.command_id != expected {
            return Err(CommandError::new(
                format!("expected a {} PDU, got {}", expected.name(), pdu.command()),
                status::ESME_RINVCMDID,
            )
            .into());
        }
        if pdu.sequence_number == 0 {
            pdu.sequence_number = self.next_sequence();
        }
        self.send_pdu(&mut pdu).await?;
        Ok(pdu)
    }

    pub async fn submit_sm(&mut self, pdu: Pdu) -> SmppResult<Pdu> {
        self.send_request(CommandId::SubmitSm, pdu).await
    }

    pub async fn submit_multi(&mut self, pdu: Pdu) -> SmppResult<Pdu> {
        self.send_request(CommandId::SubmitMulti, pdu).await
    }

    pub async fn data_sm(&mut self, pdu: Pdu) -> SmppResult<Pdu> {
        self.send_request(CommandId::DataSm, pdu).await
    }

    /// Send a deliver_sm towards the peer. Only meaningful against test
    /// harnesses; a real SMSC originates these itself.
    pub async fn deliver_sm(&mut self, pdu: Pdu) -> SmppResult<Pdu> {
        self.send_request(CommandId::DeliverSm, pdu).await
    }

    pub async fn query_sm(&mut self, pdu: Pdu) -> SmppResult<Pdu> {
        self.send_request(CommandId::QuerySm, pdu).await
    }

    pub async fn cancel_sm(&mut self, pdu: Pdu) -> SmppResult<Pdu> {
        self.send_request(CommandId::CancelSm, pdu).await
    }

    pub async fn replace_sm(&mut self, pdu: Pdu) -> SmppResult<Pdu> {
        self.send_request(CommandId::ReplaceSm, pdu).await
    }

    /// Send a link keepalive probe.
    pub async fn enquire_link(&mut self) -> SmppResult<Pdu> {
        let mut pdu = self.registry.new_pdu(CommandId::EnquireLink);
        pdu.sequence_number = self.next_sequence();
        self.send_pdu(&mut pdu).await?;
        Ok(pdu)
    }

    /// Send an unbind request. The unbind_resp arrives through the listen
    /// loop and makes it exit; see [`Client::close`] for the synchronous
    /// variant.
    pub async fn unbind(&mut self) -> SmppResult<Pdu> {
        let mut pdu = self.registry.new_pdu(CommandId::Unbind);
        pdu.sequence_number = self.next_sequence();
        self.send_pdu(&mut pdu).await?;
        Ok(pdu)
    }

    /// Compose and send the automatic response to a peer-originated PDU,
    /// mirroring its sequence number.
    async fn respond(&mut self, request: &Pdu, status_code: u32) -> SmppResult<()> {
        if let Some(response_id) = request.command_id.response() {
            let mut response = self.registry.new_pdu(response_id);
            response.command_status = status_code;
            response.sequence_number = request.sequence_number;
            self.send_pdu(&mut response).await?;
            debug!("responded with {}", response_id.name());
        }
        Ok(())
    }

    /// Read and process one PDU.
    ///
    /// Does not return the PDU; interaction happens through callbacks and
    /// the automatic responses (deliver_sm, data_sm, enquire_link and unbind
    /// are answered with their `_resp`, using a callback-provided status
    /// when one is returned). A read timeout is swallowed: if the link has
    /// been idle longer than the enquire_link interval a keepalive is sent,
    /// and reading may simply be retried.
    ///
    /// Returns `false` when an unbind or unbind_resp was processed and the
    /// caller should stop reading; `true` otherwise.
    pub async fn read_one_pdu(&mut self) -> SmppResult<bool> {
        let pdu = match timeout(
            self.config.read_timeout,
            self.connection.read_pdu(&self.registry),
        )
        .await
        {
            Err(_) => {
                if self.inactivity_time() > self.config.enquire_link_interval {
                    debug!("socket timed out, sending enquire link");
                    self.enquire_link().await?;
                }
                return Ok(true);
            }
            Ok(read) => read?.ok_or(SmppConnectionError::Closed)?,
        };

        let return_status = self.note_inbound(&pdu);
        info!("received {} command", pdu.command());
        if !pdu.ok() {
            warn!(
                "received {} with a NOK status {:#x} ({})",
                pdu.command(),
                pdu.command_status,
                status::describe(pdu.command_status)
            );
        }

        match pdu.command_id {
            CommandId::DeliverSm | CommandId::DataSm | CommandId::EnquireLink => {
                self.respond(&pdu, return_status).await?;
            }
            CommandId::Unbind => {
                self.respond(&pdu, return_status).await?;
                debug!("responded with unbind_resp, exiting");
                return Ok(false);
            }
            CommandId::UnbindResp => {
                debug!("received unbind_resp, exiting");
                return Ok(false);
            }
            _ => {}
        }
        Ok(true)
    }

    /// Block and read incoming PDUs until an unbind or unbind_resp arrives,
    /// then shut the socket down.
    ///
    /// A parse error leaves the socket open; after handling it the loop can
    /// be resumed by calling `listen` again. Connection errors should lead
    /// the caller to [`Client::disconnect`].
    pub async fn listen(&mut self) -> SmppResult<()> {
        while self.read_one_pdu().await? {
            debug!("waiting for PDU");
        }
        info!("client exiting, shutting down socket");
        self.disconnect().await
    }

    /// Unbind if bound, wait briefly for the response, then disconnect.
    pub async fn close(&mut self) -> SmppResult<()> {
        if matches!(
            self.state,
            SessionState::BoundTx | SessionState::BoundRx | SessionState::BoundTrx
        ) {
            match self.unbind().await {
                Ok(_) => loop {
                    match timeout(
                        self.config.read_timeout,
                        self.connection.read_pdu(&self.registry),
                    )
                    .await
                    {
                        Ok(Ok(Some(pdu))) => {
                            self.note_inbound(&pdu);
                            if pdu.command_id == CommandId::UnbindResp {
                                break;
                            }
                        }
                        _ => break,
                    }
                },
                Err(e) => warn!("{e}. Ignored"),
            }
        }
        self.disconnect().await
    }

    /// Close the socket. In-flight reads and writes surface as connection
    /// errors; the session ends up `Closed`.
    pub async fn disconnect(&mut self) -> SmppResult<()> {
        info!("disconnecting from SMSC");
        if self.state == SessionState::Closed {
            warn!("session is already in closed state");
        } else if self.state != SessionState::Open {
            warn!("session is being disconnected while bound");
        }
        if let Err(e) = self.connection.shutdown().await {
            debug!("socket shutdown failed: {e}");
        }
        self.state = SessionState::Closed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_and_builders() {
        let config = ClientConfig::default();
        assert_eq!(config.read_timeout, Duration::from_secs(5));
        assert_eq!(config.enquire_link_interval, Duration::from_secs(30));

        let config = ClientConfig::default()
            .with_read_timeout(Duration::from_millis(250))
            .with_enquire_link_interval(Duration::from_secs(60));
        assert_eq!(config.read_timeout, Duration::from_millis(250));
        assert_eq!(config.enquire_link_interval, Duration::from_secs(60));
    }

    #[test]
    fn bind_credentials_builder() {
        let credentials = BindCredentials::new("sys", "pw")
            .with_system_type("VMS")
            .with_numbering(1, 1)
            .with_address_range("1234");
        assert_eq!(credentials.system_id, "sys");
        assert_eq!(credentials.password, "pw");
        assert_eq!(credentials.system_type.as_deref(), Some("VMS"));
        assert_eq!((credentials.addr_ton, credentials.addr_npi), (1, 1));
        assert_eq!(credentials.address_range.as_deref(), Some("1234"));
    }
}
