use crate::event::{Articulation, Dynamic, NotationEvent, Notehead, StaffPosition};
use crate::kit::gm_drum_name;

use Notehead::*;
use StaffPosition::*;

/// Notation (notehead + staff position) → General MIDI drum note.
///
/// Loaded once, never mutated. Order matters for the reverse lookup: the
/// first entry carrying a note number is that note's canonical notation.
const NOTATION_TO_MIDI: &[((Notehead, StaffPosition), u8)] = &[
    // Hi-hats
    ((Cross, TopSpace), 42),
    ((Plus, TopSpace), 42),
    ((Cross, AboveTopLine), 46),
    ((OpenCircle, AboveTopLine), 46),
    ((Cross, AboveStaff), 44),
    // Snare
    ((Normal, MiddleLine), 38),
    ((Accent, MiddleLine), 38),
    ((Ghost, MiddleLine), 38),
    // Kick
    ((Normal, BelowBottomLine), 36),
    // Toms
    ((Normal, SecondSpace), 48),
    ((Normal, ThirdSpace), 47),
    ((Normal, FourthSpace), 45),
    ((Normal, BottomLine), 43),
    // Cymbals
    ((Cross, AboveTopLineCrash), 49),
    ((Cross, TopLine), 51),
    ((Cross, SpaceAboveTopLine), 53),
];

fn lookup(notehead: Notehead, position: StaffPosition) -> Option<u8> {
    NOTATION_TO_MIDI
        .iter()
        .find(|((h, p), _)| *h == notehead && *p == position)
        .map(|&(_, note)| note)
}

/// Map (notehead, staff position) to a MIDI drum note.
///
/// Combinations absent from the table are retried with the `Normal`
/// notehead; if that misses too the combination is unmapped and `None` is
/// returned rather than a guessed value.
pub fn midi_note(notehead: Notehead, position: StaffPosition) -> Option<u8> {
    lookup(notehead, position).or_else(|| lookup(Normal, position))
}

/// Compute MIDI velocity from articulation and an optional dynamic marking.
///
/// `base(articulation) × multiplier(dynamic)`, truncated and clamped to
/// [1, 127].
pub fn velocity(articulation: Articulation, dynamic: Option<Dynamic>) -> u8 {
    let base = articulation.base_velocity() as f32;
    let mult = dynamic.map_or(1.0, Dynamic::multiplier);
    ((base * mult) as i32).clamp(1, 127) as u8
}

/// Map a notation event to `(midi_note, velocity)`, or `None` if the
/// notation cannot be resolved.
pub fn map_event(event: &NotationEvent) -> Option<(u8, u8)> {
    let note = midi_note(event.notehead, event.position)?;
    Some((note, velocity(event.articulation, event.dynamic)))
}

/// Reverse lookup: the canonical notation for a drum note.
///
/// Used by the staff view to pick a glyph for an incoming hit.
pub fn notation_for_note(note: u8) -> Option<(Notehead, StaffPosition)> {
    NOTATION_TO_MIDI
        .iter()
        .find(|&&(_, n)| n == note)
        .map(|&(notation, _)| notation)
}

/// Human-readable description of a notation event, for logs.
pub fn describe_event(event: &NotationEvent) -> String {
    match map_event(event) {
        Some((note, vel)) => format!(
            "Notation {:?}@{:?} (articulation={:?}, dynamic={:?}) -> MIDI {} ({}), vel={}",
            event.notehead,
            event.position,
            event.articulation,
            event.dynamic,
            note,
            gm_drum_name(note).unwrap_or("Unknown Drum"),
            vel,
        ),
        None => format!("Unmapped notation: {event:?}"),
    }
}
