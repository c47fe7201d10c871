// paradiddle-input — MIDI endpoint discovery and the background reader.
//
// Device bytes arrive on the transport's callback thread, cross into the
// reader thread over a channel, and reach the application through a
// registered handler. View state is never touched from here.

mod backend;
mod error;
mod message;
mod ports;
mod reader;

#[cfg(test)]
mod test_utils;

pub use backend::{InputConnection, MidiBackend, MidirBackend};
pub use error::ReaderError;
pub use message::{MidiMessage, RawMessage};
pub use ports::{format_listing, format_port_listing, input_port_names, output_port_names};
pub use reader::{MidiReader, ReaderConfig, wait_for_input};
