//! Mock MIDI backend for reader tests.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;

use crate::backend::{InputConnection, MidiBackend};
use crate::error::ReaderError;
use crate::message::RawMessage;

/// Backend with a fixed endpoint list. Connections keep their channel
/// sender around so tests can inject raw messages, and count closes.
pub struct MockBackend {
    ports: Vec<String>,
    senders: Mutex<Vec<Sender<RawMessage>>>,
    connects: AtomicUsize,
    closes: Arc<AtomicUsize>,
}

impl MockBackend {
    pub fn with_ports(ports: &[&str]) -> Self {
        Self {
            ports: ports.iter().map(|s| s.to_string()).collect(),
            senders: Mutex::new(Vec::new()),
            connects: AtomicUsize::new(0),
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Push a raw message through every open connection.
    pub fn inject(&self, raw: RawMessage) {
        for tx in self.senders.lock().unwrap().iter() {
            let _ = tx.send(raw);
        }
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::Relaxed)
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::Relaxed)
    }
}

impl MidiBackend for MockBackend {
    fn input_ports(&self) -> Result<Vec<String>, ReaderError> {
        Ok(self.ports.clone())
    }

    fn output_ports(&self) -> Result<Vec<String>, ReaderError> {
        Ok(Vec::new())
    }

    fn connect_input(
        &self,
        port_name: &str,
        tx: Sender<RawMessage>,
    ) -> Result<Box<dyn InputConnection>, ReaderError> {
        if !self.ports.iter().any(|p| p == port_name) {
            return Err(ReaderError::PortNotFound {
                port: port_name.to_string(),
            });
        }
        self.senders.lock().unwrap().push(tx);
        self.connects.fetch_add(1, Ordering::Relaxed);
        Ok(Box::new(MockConnection {
            closes: Arc::clone(&self.closes),
        }))
    }
}

struct MockConnection {
    closes: Arc<AtomicUsize>,
}

impl InputConnection for MockConnection {
    fn close(self: Box<Self>) {
        self.closes.fetch_add(1, Ordering::Relaxed);
    }
}
