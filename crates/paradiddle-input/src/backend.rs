use std::sync::mpsc::Sender;

use crate::error::ReaderError;
use crate::message::RawMessage;

/// Abstraction over the MIDI transport.
/// Implementations: MidirBackend (production), MockBackend (testing).
pub trait MidiBackend: Send + Sync {
    /// Names of all available input endpoints.
    fn input_ports(&self) -> Result<Vec<String>, ReaderError>;

    /// Names of all available output endpoints.
    fn output_ports(&self) -> Result<Vec<String>, ReaderError>;

    /// Open the named input endpoint, forwarding raw messages into `tx`.
    fn connect_input(
        &self,
        port_name: &str,
        tx: Sender<RawMessage>,
    ) -> Result<Box<dyn InputConnection>, ReaderError>;
}

/// An open input endpoint. Closing consumes the connection, so the
/// underlying endpoint is released exactly once.
pub trait InputConnection: Send {
    fn close(self: Box<Self>);
}

/// Production backend over midir.
#[derive(Debug, Default)]
pub struct MidirBackend;

impl MidirBackend {
    fn input_client() -> Result<midir::MidiInput, ReaderError> {
        midir::MidiInput::new("paradiddle").map_err(|e| ReaderError::Init(e.to_string()))
    }
}

impl MidiBackend for MidirBackend {
    fn input_ports(&self) -> Result<Vec<String>, ReaderError> {
        let midi_in = Self::input_client()?;
        Ok(midi_in
            .ports()
            .iter()
            .filter_map(|p| midi_in.port_name(p).ok())
            .collect())
    }

    fn output_ports(&self) -> Result<Vec<String>, ReaderError> {
        let midi_out =
            midir::MidiOutput::new("paradiddle").map_err(|e| ReaderError::Init(e.to_string()))?;
        Ok(midi_out
            .ports()
            .iter()
            .filter_map(|p| midi_out.port_name(p).ok())
            .collect())
    }

    fn connect_input(
        &self,
        port_name: &str,
        tx: Sender<RawMessage>,
    ) -> Result<Box<dyn InputConnection>, ReaderError> {
        // Fresh client per connection; midir consumes it on connect.
        let midi_in = Self::input_client()?;
        let ports = midi_in.ports();
        let port = ports
            .iter()
            .find(|p| midi_in.port_name(p).is_ok_and(|n| n == port_name))
            .ok_or_else(|| ReaderError::PortNotFound {
                port: port_name.to_string(),
            })?;

        let connection = midi_in
            .connect(
                port,
                "paradiddle-in",
                move |_timestamp, message, _| {
                    if message.len() >= 2 {
                        let raw = RawMessage {
                            status: message[0],
                            data1: message[1],
                            data2: if message.len() >= 3 { message[2] } else { 0 },
                        };
                        let _ = tx.send(raw);
                    }
                },
                (),
            )
            .map_err(|e| ReaderError::Connect {
                port: port_name.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Box::new(MidirConnection {
            connection: Some(connection),
        }))
    }
}

struct MidirConnection {
    connection: Option<midir::MidiInputConnection<()>>,
}

impl InputConnection for MidirConnection {
    fn close(mut self: Box<Self>) {
        if let Some(connection) = self.connection.take() {
            connection.close();
        }
    }
}
