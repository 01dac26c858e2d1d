use thiserror::Error;

/// Error returned when a game can't be set up.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum GameError {
    /// The board would be empty or too large to address.
    #[error("invalid board dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    /// More mines were requested than there are cells to hold them.
    #[error("cannot place {mines} mines on a board with {cells} cells")]
    TooManyMines { mines: usize, cells: usize },
}
