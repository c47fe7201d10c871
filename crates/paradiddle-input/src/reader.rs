use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::backend::{InputConnection, MidiBackend, MidirBackend};
use crate::error::ReaderError;
use crate::message::MidiMessage;

/// Interval between endpoint-list scans while auto-detecting.
const DETECT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Reader settings.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Substring used to pick an input endpoint when none is named.
    /// `None` selects the first available endpoint.
    pub port_keyword: Option<String>,
    /// Sleep between channel drains on the reader thread.
    pub poll_interval: Duration,
    /// How long auto-detection waits for a matching endpoint.
    pub detect_timeout: Duration,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            port_keyword: Some("USB".to_string()),
            poll_interval: Duration::from_millis(10),
            detect_timeout: Duration::from_secs(15),
        }
    }
}

/// Wait for an input endpoint, polling the list until the deadline.
///
/// With a keyword, the first endpoint whose name contains it
/// (case-insensitive) wins; without one, the first endpoint listed wins.
pub fn wait_for_input(
    backend: &dyn MidiBackend,
    keyword: Option<&str>,
    timeout: Duration,
) -> Result<String, ReaderError> {
    let deadline = Instant::now() + timeout;
    loop {
        let ports = backend.input_ports()?;
        let found = match keyword {
            Some(k) => {
                let k = k.to_lowercase();
                ports.iter().find(|p| p.to_lowercase().contains(&k))
            }
            None => ports.first(),
        };
        if let Some(name) = found {
            return Ok(name.clone());
        }
        if Instant::now() >= deadline {
            return Err(ReaderError::DetectTimeout {
                keyword: keyword.map(str::to_string),
                waited: timeout,
            });
        }
        thread::sleep(DETECT_POLL_INTERVAL);
    }
}

/// Background MIDI reader.
///
/// `start` opens an endpoint and launches a polling thread that drains the
/// transport channel and invokes the registered handler for each decoded
/// event. `stop` joins the thread and closes the endpoint; it is a no-op
/// when the reader is idle. Dropping a running reader stops it.
pub struct MidiReader {
    backend: Arc<dyn MidiBackend>,
    config: ReaderConfig,
    handler: Arc<dyn Fn(MidiMessage) + Send + Sync>,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
    connection: Option<Box<dyn InputConnection>>,
    port_name: Option<String>,
}

impl MidiReader {
    /// Reader over the system MIDI transport.
    pub fn new(
        config: ReaderConfig,
        handler: impl Fn(MidiMessage) + Send + Sync + 'static,
    ) -> Self {
        Self::with_backend(Arc::new(MidirBackend), config, handler)
    }

    /// Reader over an explicit backend.
    pub fn with_backend(
        backend: Arc<dyn MidiBackend>,
        config: ReaderConfig,
        handler: impl Fn(MidiMessage) + Send + Sync + 'static,
    ) -> Self {
        Self {
            backend,
            config,
            handler: Arc::new(handler),
            running: Arc::new(AtomicBool::new(false)),
            thread: None,
            connection: None,
            port_name: None,
        }
    }

    /// Name of the connected endpoint while running.
    pub fn port_name(&self) -> Option<&str> {
        self.port_name.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Start reading from `port`, or auto-detect one when `None`.
    ///
    /// No-op if already running. Fails with `DetectTimeout` when no
    /// matching endpoint appears before the configured deadline.
    pub fn start(&mut self, port: Option<&str>) -> Result<(), ReaderError> {
        if self.is_running() {
            return Ok(());
        }

        let name = match port {
            Some(name) => name.to_string(),
            None => wait_for_input(
                &*self.backend,
                self.config.port_keyword.as_deref(),
                self.config.detect_timeout,
            )?,
        };

        let (tx, rx) = mpsc::channel();
        let connection = self.backend.connect_input(&name, tx)?;
        log::info!("Connected to MIDI input: {name}");

        self.running.store(true, Ordering::Relaxed);
        let running = Arc::clone(&self.running);
        let handler = Arc::clone(&self.handler);
        let poll_interval = self.config.poll_interval;
        self.thread = Some(thread::spawn(move || {
            while running.load(Ordering::Relaxed) {
                while let Ok(raw) = rx.try_recv() {
                    if let Some(message) = raw.decode() {
                        handler(message);
                    }
                }
                thread::sleep(poll_interval);
            }
        }));

        self.connection = Some(connection);
        self.port_name = Some(name);
        Ok(())
    }

    /// Stop the reader. No-op when idle; the endpoint is closed once.
    pub fn stop(&mut self) {
        if !self.running.swap(false, Ordering::Relaxed) {
            return;
        }
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
        if let Some(connection) = self.connection.take() {
            connection.close();
        }
        self.port_name = None;
        log::info!("MIDI reader stopped");
    }
}

impl Drop for MidiReader {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::message::RawMessage;
    use crate::test_utils::MockBackend;

    fn collecting_reader(
        backend: Arc<MockBackend>,
        keyword: Option<&str>,
    ) -> (MidiReader, Arc<Mutex<Vec<MidiMessage>>>) {
        let collected = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&collected);
        let config = ReaderConfig {
            port_keyword: keyword.map(str::to_string),
            poll_interval: Duration::from_millis(1),
            detect_timeout: Duration::ZERO,
        };
        let reader = MidiReader::with_backend(backend, config, move |message| {
            sink.lock().unwrap().push(message);
        });
        (reader, collected)
    }

    fn wait_for_collected(collected: &Mutex<Vec<MidiMessage>>, count: usize) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while collected.lock().unwrap().len() < count {
            assert!(Instant::now() < deadline, "timed out waiting for events");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn wait_for_input_returns_keyword_match() {
        let backend = MockBackend::with_ports(&["Primary", "USB Drum", "Other"]);
        let name = wait_for_input(&backend, Some("usb"), Duration::ZERO).unwrap();
        assert_eq!(name, "USB Drum");
    }

    #[test]
    fn wait_for_input_without_keyword_takes_first() {
        let backend = MockBackend::with_ports(&["Primary", "Secondary"]);
        let name = wait_for_input(&backend, None, Duration::ZERO).unwrap();
        assert_eq!(name, "Primary");
    }

    #[test]
    fn wait_for_input_times_out_with_distinct_error() {
        let backend = MockBackend::with_ports(&[]);
        let err = wait_for_input(&backend, Some("USB"), Duration::ZERO).unwrap_err();
        assert!(matches!(
            err,
            ReaderError::DetectTimeout {
                keyword: Some(ref k),
                ..
            } if k == "USB"
        ));
    }

    #[test]
    fn start_auto_detects_keyword_match() {
        let backend = Arc::new(MockBackend::with_ports(&["Primary", "USB Drum"]));
        let (mut reader, _) = collecting_reader(Arc::clone(&backend), Some("usb"));
        reader.start(None).unwrap();
        assert_eq!(reader.port_name(), Some("USB Drum"));
        reader.stop();
    }

    #[test]
    fn start_without_keyword_takes_first_port() {
        let backend = Arc::new(MockBackend::with_ports(&["Primary", "Secondary"]));
        let (mut reader, _) = collecting_reader(Arc::clone(&backend), None);
        reader.start(None).unwrap();
        assert_eq!(reader.port_name(), Some("Primary"));
        reader.stop();
    }

    #[test]
    fn start_with_explicit_port_skips_detection() {
        let backend = Arc::new(MockBackend::with_ports(&["A", "B"]));
        let (mut reader, _) = collecting_reader(Arc::clone(&backend), Some("nomatch"));
        reader.start(Some("B")).unwrap();
        assert_eq!(reader.port_name(), Some("B"));
        reader.stop();
    }

    #[test]
    fn events_reach_the_handler() {
        let backend = Arc::new(MockBackend::with_ports(&["USB Drum"]));
        let (mut reader, collected) = collecting_reader(Arc::clone(&backend), Some("USB"));
        reader.start(None).unwrap();

        backend.inject(RawMessage {
            status: 0x90,
            data1: 38,
            data2: 100,
        });
        backend.inject(RawMessage {
            status: 0x90,
            data1: 38,
            data2: 0,
        });
        wait_for_collected(&collected, 2);
        reader.stop();

        let events = collected.lock().unwrap();
        assert_eq!(
            events[0],
            MidiMessage::NoteOn {
                note: 38,
                velocity: 100
            }
        );
        assert_eq!(events[1], MidiMessage::NoteOff { note: 38 });
    }

    #[test]
    fn stop_twice_closes_endpoint_once() {
        let backend = Arc::new(MockBackend::with_ports(&["USB Drum"]));
        let (mut reader, _) = collecting_reader(Arc::clone(&backend), Some("USB"));
        reader.start(None).unwrap();
        reader.stop();
        reader.stop();
        assert_eq!(backend.close_count(), 1);
    }

    #[test]
    fn stop_while_idle_is_a_no_op() {
        let backend = Arc::new(MockBackend::with_ports(&["USB Drum"]));
        let (mut reader, _) = collecting_reader(Arc::clone(&backend), Some("USB"));
        reader.stop();
        assert_eq!(backend.close_count(), 0);
        assert!(!reader.is_running());
    }

    #[test]
    fn start_while_running_is_a_no_op() {
        let backend = Arc::new(MockBackend::with_ports(&["USB Drum"]));
        let (mut reader, _) = collecting_reader(Arc::clone(&backend), Some("USB"));
        reader.start(None).unwrap();
        reader.start(None).unwrap();
        assert_eq!(backend.connect_count(), 1);
        reader.stop();
        assert_eq!(backend.close_count(), 1);
    }

    #[test]
    fn drop_stops_a_running_reader() {
        let backend = Arc::new(MockBackend::with_ports(&["USB Drum"]));
        {
            let (mut reader, _) = collecting_reader(Arc::clone(&backend), Some("USB"));
            reader.start(None).unwrap();
        }
        assert_eq!(backend.close_count(), 1);
    }
}
