/// General MIDI percussion names, for labels and logging.
pub fn gm_drum_name(note: u8) -> Option<&'static str> {
    let name = match note {
        35 => "Acoustic Bass Drum",
        36 => "Bass Drum 1",
        37 => "Side Stick",
        38 => "Acoustic Snare",
        39 => "Hand Clap",
        40 => "Electric Snare",
        41 => "Low Floor Tom",
        42 => "Closed Hi-Hat",
        43 => "High Floor Tom",
        44 => "Pedal Hi-Hat",
        45 => "Low Tom",
        46 => "Open Hi-Hat",
        47 => "Low-Mid Tom",
        48 => "Hi-Mid Tom",
        49 => "Crash Cymbal 1",
        50 => "High Tom",
        51 => "Ride Cymbal 1",
        52 => "Chinese Cymbal",
        53 => "Ride Bell",
        57 => "Crash Cymbal 2",
        _ => return None,
    };
    Some(name)
}

/// The standard kit shown on the staff from startup, ascending by note
/// number with short display labels.
pub const DEFAULT_KIT: &[(u8, &str)] = &[
    (36, "Kick"),
    (38, "Snare"),
    (42, "Closed HH"),
    (43, "Floor Tom"),
    (44, "Pedal HH"),
    (45, "Low Tom"),
    (46, "Open HH"),
    (47, "Mid Tom"),
    (48, "High Tom"),
    (49, "Crash"),
    (51, "Ride"),
    (53, "Ride Bell"),
];
