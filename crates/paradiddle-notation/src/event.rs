/// Visual symbol marking how a drum hit is notated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notehead {
    /// Filled oval, the default for drums and toms.
    Normal,
    /// An `x`, used for hi-hats and cymbals.
    Cross,
    /// A `+`, explicit closed hi-hat.
    Plus,
    /// An `O`, explicit open hi-hat.
    OpenCircle,
    /// A small `o`, ghost note.
    Ghost,
    /// Accented notehead variant.
    Accent,
}

/// Symbolic vertical placement on the percussion staff, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaffPosition {
    AboveStaff,
    AboveTopLineCrash,
    SpaceAboveTopLine,
    AboveTopLine,
    TopLine,
    TopSpace,
    SecondSpace,
    MiddleLine,
    ThirdSpace,
    FourthSpace,
    BottomLine,
    BelowBottomLine,
}

/// Performance nuance affecting how hard a note is struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Articulation {
    Ghost,
    Normal,
    Accent,
    Rimshot,
}

impl Articulation {
    /// Base MIDI velocity for this articulation.
    pub fn base_velocity(self) -> u8 {
        match self {
            Articulation::Ghost => 30,
            Articulation::Normal => 80,
            Articulation::Accent => 110,
            Articulation::Rimshot => 120,
        }
    }
}

/// Score-level loudness marking scaling the articulation velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dynamic {
    Pp,
    P,
    Mp,
    Mf,
    F,
    Ff,
}

impl Dynamic {
    /// Multiplier applied on top of the articulation base velocity.
    pub fn multiplier(self) -> f32 {
        match self {
            Dynamic::Pp => 0.5,
            Dynamic::P => 0.7,
            Dynamic::Mp => 0.85,
            Dynamic::Mf => 1.0,
            Dynamic::F => 1.15,
            Dynamic::Ff => 1.3,
        }
    }
}

/// A single drum notation event on the staff.
///
/// Constructed from whatever the notation source provides; immutable once
/// built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotationEvent {
    pub notehead: Notehead,
    pub position: StaffPosition,
    pub articulation: Articulation,
    pub dynamic: Option<Dynamic>,
}

impl NotationEvent {
    /// Event with default articulation and no dynamic marking.
    pub fn new(notehead: Notehead, position: StaffPosition) -> Self {
        Self {
            notehead,
            position,
            articulation: Articulation::Normal,
            dynamic: None,
        }
    }
}
