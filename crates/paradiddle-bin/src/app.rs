use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{error, info, warn};

use paradiddle_config::AppConfig;
use paradiddle_input::{MidiMessage, MidiReader, input_port_names};
use paradiddle_sheet::{SheetModel, SheetWidget};

use crate::reader_config;

/// Launch the interactive staff view.
pub fn run_gui(config: AppConfig) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_title("Drum Trainer"),
        ..Default::default()
    };

    eframe::run_native(
        "Drum Trainer",
        options,
        Box::new(move |_cc| Ok(Box::new(DrumTrainerApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}

/// Main window: port selection, status line, and the scrolling staff.
///
/// This type owns all view state. The reader's callback only pushes hits
/// into a channel; `update` drains it on the UI thread.
struct DrumTrainerApp {
    config: AppConfig,
    ports: Vec<String>,
    selected_port: usize,
    reader: Option<MidiReader>,
    hits: Option<Receiver<(u8, u8)>>,
    model: SheetModel,
    widget: SheetWidget,
    status: String,
    started: Instant,
}

impl DrumTrainerApp {
    fn new(config: AppConfig) -> Self {
        let (ports, status) = match input_port_names() {
            Ok(ports) if !ports.is_empty() => (ports, "Select a MIDI input device".to_string()),
            Ok(_) => {
                warn!("No MIDI input ports found");
                (
                    Vec::new(),
                    "No MIDI input ports found.\nConnect your drum kit and restart.".to_string(),
                )
            }
            Err(e) => {
                error!("MIDI port enumeration failed: {e}");
                (Vec::new(), format!("MIDI unavailable: {e}"))
            }
        };

        let model = SheetModel::new(config.seconds_visible);
        Self {
            config,
            ports,
            selected_port: 0,
            reader: None,
            hits: None,
            model,
            widget: SheetWidget::default(),
            status,
            started: Instant::now(),
        }
    }

    fn now_us(&self) -> i64 {
        self.started.elapsed().as_micros() as i64
    }

    /// Open `port`, replacing any active reader first so only one thread
    /// ever feeds the channel.
    fn start_reader(&mut self, port: String) {
        if let Some(mut reader) = self.reader.take() {
            reader.stop();
        }

        let (tx, rx) = mpsc::channel();
        let mut reader = MidiReader::new(reader_config(&self.config), move |message| {
            if let MidiMessage::NoteOn { note, velocity } = message {
                let _ = tx.send((note, velocity));
            }
        });

        match reader.start(Some(&port)) {
            Ok(()) => {
                info!("Reading MIDI events from '{port}'");
                self.status = "Reading MIDI events".to_string();
                self.hits = Some(rx);
                self.reader = Some(reader);
            }
            Err(e) => {
                error!("Failed to open MIDI input '{port}': {e}");
                self.status = format!("Failed to open '{port}': {e}");
            }
        }
    }
}

impl eframe::App for DrumTrainerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now_us = self.now_us();
        if let Some(rx) = &self.hits {
            while let Ok((note, velocity)) = rx.try_recv() {
                self.model.add_hit(note, velocity, now_us);
            }
        }
        self.model.tick(now_us);

        egui::TopBottomPanel::top("status_bar").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Drum Trainer");
                ui.label(&self.status);
                if let Some(name) = self.reader.as_ref().and_then(|r| r.port_name()) {
                    ui.label(format!("Connected to: {name}"));
                }
            });
        });

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.reader.is_none() && !self.ports.is_empty() {
                    egui::ComboBox::from_id_salt("port_select")
                        .selected_text(
                            self.ports
                                .get(self.selected_port)
                                .map(String::as_str)
                                .unwrap_or(""),
                        )
                        .show_ui(ui, |ui| {
                            for (idx, name) in self.ports.iter().enumerate() {
                                ui.selectable_value(&mut self.selected_port, idx, name.as_str());
                            }
                        });
                    if ui.button("Start").clicked() {
                        if let Some(port) = self.ports.get(self.selected_port).cloned() {
                            self.start_reader(port);
                        }
                    }
                }
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.widget.ui(ui, &self.model);
        });

        // Fixed-rate repaint keeps the staff scrolling between hits.
        // The reader is stopped by MidiReader's Drop when the app closes.
        ctx.request_repaint_after(Duration::from_secs_f32(
            1.0 / self.config.update_fps.max(1) as f32,
        ));
    }
}
