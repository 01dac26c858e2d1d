//! The game's state machine.
use std::fmt;

/// Status of a game. `Exploded` and `Solved` are terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Status {
    /// Board is laid out and nothing has been opened yet.
    Init,
    /// At least one safe cell has been opened.
    InGame,
    /// A mine was opened.
    Exploded,
    /// Every safe cell has been opened.
    Solved,
}

/// Something that happened on the board which may move the game forward.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Event {
    /// A safe cell was opened.
    Reveal,
    /// A mined cell was opened.
    Explode,
    /// The last safe cell was opened.
    Clear,
}

impl Status {
    /// The status after `event`. Terminal statuses absorb every event, so the status only
    /// ever moves forward.
    pub fn next(self, event: Event) -> Status {
        match (self, event) {
            (Status::Exploded, _) | (Status::Solved, _) => self,
            (_, Event::Reveal) => Status::InGame,
            (_, Event::Explode) => Status::Exploded,
            (_, Event::Clear) => Status::Solved,
        }
    }

    /// Returns true once the game has been won or lost.
    pub fn is_over(self) -> bool {
        matches!(self, Status::Exploded | Status::Solved)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Init => "INIT",
            Status::InGame => "IN_GAME",
            Status::Exploded => "EXPLODED",
            Status::Solved => "SOLVED",
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Init
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.as_str())
    }
}
