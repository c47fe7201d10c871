// paradiddle — drum trainer reading live hits from a MIDI kit.
//
// Wires discovery → reader → staff view. `--headless` logs decoded events
// instead of opening a display.

mod app;

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use log::{debug, info, warn};

use paradiddle_config::AppConfig;
use paradiddle_input::{MidiMessage, MidiReader, ReaderConfig, format_port_listing};
use paradiddle_notation::gm_drum_name;

#[derive(Parser, Debug)]
#[command(name = "paradiddle", about = "Read and display MIDI events from a drum kit")]
struct Args {
    /// Substring used to pick the MIDI input port (overrides the config).
    #[arg(long)]
    port_keyword: Option<String>,

    /// Log raw MIDI events instead of launching the display.
    #[arg(long)]
    headless: bool,

    /// Print detected MIDI ports and exit.
    #[arg(long)]
    list_ports: bool,

    /// Path to config JSON file.
    #[arg(long, default_value = "paradiddle.json")]
    config: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list_ports {
        println!("{}", format_port_listing()?);
        return Ok(());
    }

    let mut config = match AppConfig::load_from(&args.config) {
        Ok(config) => config,
        Err(e) => {
            warn!(
                "Failed to read config {}: {e}, using defaults",
                args.config.display()
            );
            AppConfig::default()
        }
    };
    if let Some(keyword) = args.port_keyword {
        config.port_keyword = Some(keyword);
    }

    if args.headless {
        run_headless(&config)
    } else {
        app::run_gui(config)
    }
}

/// Reader settings derived from the application config.
fn reader_config(config: &AppConfig) -> ReaderConfig {
    ReaderConfig {
        port_keyword: config.port_keyword.clone(),
        poll_interval: Duration::from_millis(config.poll_interval_ms),
        detect_timeout: Duration::from_secs(config.detect_timeout_secs),
    }
}

/// Auto-detect a port and log every decoded event until interrupted.
fn run_headless(config: &AppConfig) -> Result<()> {
    let mut reader = MidiReader::new(reader_config(config), |message| match message {
        MidiMessage::NoteOn { note, velocity } => info!(
            "note_on note={note} ({}) velocity={velocity}",
            gm_drum_name(note).unwrap_or("Unknown Drum")
        ),
        MidiMessage::NoteOff { note } => debug!("note_off note={note}"),
    });
    reader.start(None)?;
    info!(
        "Reading MIDI events from '{}'",
        reader.port_name().unwrap_or("?")
    );

    loop {
        thread::sleep(Duration::from_millis(250));
    }
}
