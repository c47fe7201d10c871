use crate::backend::{MidiBackend, MidirBackend};
use crate::error::ReaderError;

/// Names of all detected MIDI input endpoints.
pub fn input_port_names() -> Result<Vec<String>, ReaderError> {
    MidirBackend.input_ports()
}

/// Names of all detected MIDI output endpoints.
pub fn output_port_names() -> Result<Vec<String>, ReaderError> {
    MidirBackend.output_ports()
}

/// Formatted listing of the system's MIDI endpoints.
pub fn format_port_listing() -> Result<String, ReaderError> {
    Ok(format_listing(&input_port_names()?, &output_port_names()?))
}

/// Build the listing from already-enumerated names.
pub fn format_listing(inputs: &[String], outputs: &[String]) -> String {
    let mut lines = vec!["MIDI ports detected".to_string(), "=".repeat(40)];

    lines.push("Input ports:".to_string());
    if inputs.is_empty() {
        lines.push("  (none)".to_string());
    } else {
        for (idx, name) in inputs.iter().enumerate() {
            lines.push(format!("  {}. {name}", idx + 1));
        }
    }

    lines.push("Output ports:".to_string());
    if outputs.is_empty() {
        lines.push("  (none)".to_string());
    } else {
        for (idx, name) in outputs.iter().enumerate() {
            lines.push(format!("  {}. {name}", idx + 1));
        }
    }

    lines.push("=".repeat(40));
    lines.join("\n")
}
