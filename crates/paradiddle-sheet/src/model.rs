use paradiddle_notation::{DEFAULT_KIT, gm_drum_name};

const US_PER_SEC: f32 = 1_000_000.0;

/// A timestamped drum hit. Times are microseconds from view start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRecord {
    pub time_us: i64,
    pub note: u8,
    pub velocity: u8,
}

/// One horizontal staff row, bound to a drum sound code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub note: u8,
    pub label: String,
}

/// Staff view state: assigned rows and the rolling window of recent hits.
///
/// Mutated only by the UI thread; hits from the reader cross over through
/// a channel before they land here.
pub struct SheetModel {
    rows: Vec<Row>,
    events: Vec<HitRecord>,
    visible_window_us: i64,
    current_time_us: i64,
}

impl SheetModel {
    /// Model with the standard kit pre-assigned to rows, ascending by
    /// sound code, so staff lines render from the start.
    pub fn new(seconds_visible: f32) -> Self {
        let rows = DEFAULT_KIT
            .iter()
            .map(|&(note, label)| Row {
                note,
                label: label.to_string(),
            })
            .collect();
        Self {
            rows,
            events: Vec::new(),
            visible_window_us: (seconds_visible * US_PER_SEC) as i64,
            current_time_us: 0,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Records currently inside the visible window (the drawable set).
    pub fn events(&self) -> &[HitRecord] {
        &self.events
    }

    pub fn current_time_us(&self) -> i64 {
        self.current_time_us
    }

    pub fn row_of(&self, note: u8) -> Option<usize> {
        self.rows.iter().position(|r| r.note == note)
    }

    /// Record a hit, assigning a fresh row to a previously unseen sound
    /// code. Returns the row index.
    pub fn add_hit(&mut self, note: u8, velocity: u8, now_us: i64) -> usize {
        let row = match self.row_of(note) {
            Some(row) => row,
            None => {
                let label = gm_drum_name(note)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Note {note}"));
                log::debug!("Assigning new staff row to note {note} ({label})");
                self.rows.push(Row { note, label });
                self.rows.len() - 1
            }
        };
        self.events.push(HitRecord {
            time_us: now_us,
            note,
            velocity,
        });
        self.prune();
        row
    }

    /// Advance the playhead time and drop records that scrolled out.
    pub fn tick(&mut self, now_us: i64) {
        self.current_time_us = now_us;
        self.prune();
    }

    fn prune(&mut self) {
        let cutoff = self.current_time_us - self.visible_window_us;
        self.events.retain(|e| e.time_us >= cutoff);
    }

    /// Fraction of the visible window elapsed since the hit: 0 at the
    /// playhead, 1 at the trailing edge. `None` outside the window.
    pub fn age_fraction(&self, record: &HitRecord) -> Option<f32> {
        let dt = self.current_time_us - record.time_us;
        if dt < 0 || dt > self.visible_window_us {
            return None;
        }
        Some(dt as f32 / self.visible_window_us as f32)
    }
}
