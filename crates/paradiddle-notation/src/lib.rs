// paradiddle-notation — drum notation to MIDI mapping.
//
// Pure lookup tables and value types shared by the staff view and the
// application shell. No state, no I/O.

mod event;
mod kit;
mod mapper;

pub use event::{Articulation, Dynamic, NotationEvent, Notehead, StaffPosition};
pub use kit::{DEFAULT_KIT, gm_drum_name};
pub use mapper::{describe_event, map_event, midi_note, notation_for_note, velocity};
