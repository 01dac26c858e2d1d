//! Board size presets.

/// Difficulty of a game: the board size and how many mines are buried in it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Level {
    /// 5x5 with 3 mines.
    Tiny,
    /// 9x9 with 10 mines.
    Easy,
    /// 16x16 with 40 mines.
    Medium,
    /// 16x30 with 99 mines.
    Hard,
    /// Caller-chosen size and mine count.
    Custom {
        rows: usize,
        cols: usize,
        mines: usize,
    },
}

impl Level {
    /// All of the non-custom levels, easiest first.
    pub const PRESETS: &'static [Level] = &[Level::Tiny, Level::Easy, Level::Medium, Level::Hard];

    /// Number of rows on the board.
    pub fn rows(self) -> usize {
        self.params().0
    }

    /// Number of columns on the board.
    pub fn cols(self) -> usize {
        self.params().1
    }

    /// Number of mines buried in the board.
    pub fn mines(self) -> usize {
        self.params().2
    }

    fn params(self) -> (usize, usize, usize) {
        match self {
            Level::Tiny => (5, 5, 3),
            Level::Easy => (9, 9, 10),
            Level::Medium => (16, 16, 40),
            Level::Hard => (16, 30, 99),
            Level::Custom { rows, cols, mines } => (rows, cols, mines),
        }
    }
}
