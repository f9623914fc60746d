// ABOUTME: Provides TCP connection management for SMPP v3.4 protocol communication
// ABOUTME: Implements length-prefixed PDU framing with buffered reads and writes

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;
use tracing::debug;

use crate::error::{PduParseError, SmppConnectionError, SmppError};
use crate::pdu::{HEADER_SIZE, MAX_PDU_SIZE, Pdu, PduRegistry};

/// Framed PDU transport over one TCP stream.
///
/// Reads accumulate into a buffer until a complete PDU (as announced by its
/// command_length) is available; writes go through a buffered writer and are
/// flushed per PDU so the bytes of one PDU are emitted contiguously.
///
/// The connection is pure transport: session state is tracked by the client
/// that owns it.
#[derive(Debug)]
pub struct Connection {
    stream: BufWriter<TcpStream>,

    // The buffer for reading frames.
    buffer: BytesMut,
}

impl Connection {
    /// Create a new `Connection`, backed by `socket`. Read and write buffers
    /// are initialized.
    pub fn new(socket: TcpStream) -> Connection {
        Connection {
            stream: BufWriter::new(socket),
            buffer: BytesMut::with_capacity(4 * 1024),
        }
    }

    /// Read a single PDU from the underlying stream.
    ///
    /// Waits until enough data has been buffered for a full PDU. Data left
    /// over after the PDU is kept for the next call. Returns `None` on a
    /// clean end of stream between PDUs; a peer that closes mid-PDU is a
    /// connection error.
    pub async fn read_pdu(&mut self, registry: &PduRegistry) -> Result<Option<Pdu>, SmppError> {
        loop {
            if let Some(pdu) = self.parse_pdu(registry)? {
                return Ok(Some(pdu));
            }

            // `0` from read_buf means end of stream.
            let read = self
                .stream
                .read_buf(&mut self.buffer)
                .await
                .map_err(SmppConnectionError::Io)?;
            if read == 0 {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                return Err(SmppConnectionError::Closed.into());
            }
        }
    }

    /// Try to parse one PDU out of the read buffer. `Ok(None)` means more
    /// data is needed. The PDU's bytes are consumed from the buffer even
    /// when its body fails to parse, so the stream stays aligned and the
    /// read loop can be resumed after an error.
    fn parse_pdu(&mut self, registry: &PduRegistry) -> Result<Option<Pdu>, SmppError> {
        if self.buffer.len() < 4 {
            return Ok(None);
        }

        let command_length =
            u32::from_be_bytes([self.buffer[0], self.buffer[1], self.buffer[2], self.buffer[3]]);
        if command_length < HEADER_SIZE as u32 || command_length > MAX_PDU_SIZE {
            return Err(PduParseError::InvalidCommandLength(command_length).into());
        }

        if self.buffer.len() < command_length as usize {
            return Ok(None);
        }

        let raw = self.buffer.split_to(command_length as usize);
        debug!("read {} bytes", raw.len());
        let pdu = registry.decode(&raw)?;
        Ok(Some(pdu))
    }

    /// Write a single PDU to the underlying stream and flush it.
    pub async fn write_pdu(&mut self, pdu: &mut Pdu) -> Result<(), SmppError> {
        let raw = pdu.to_bytes()?;
        self.stream
            .write_all(&raw)
            .await
            .map_err(SmppConnectionError::Io)?;
        self.stream
            .flush()
            .await
            .map_err(SmppConnectionError::Io)?;
        debug!("sent {} bytes", raw.len());
        Ok(())
    }

    /// Shut down the write side of the socket.
    pub async fn shutdown(&mut self) -> Result<(), SmppError> {
        self.stream
            .shutdown()
            .await
            .map_err(SmppConnectionError::Io)?;
        Ok(())
    }
}
