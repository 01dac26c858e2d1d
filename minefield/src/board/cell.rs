//! A single cell of the minefield.
use std::fmt;

use enumflags2::BitFlags;

/// State bits a [`Cell`] can carry.
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum CellState {
    /// A mine is buried under the cell.
    Mine = 0b001,
    /// The cell has been opened.
    Visible = 0b010,
    /// The player has marked the cell as a suspected mine.
    Flagged = 0b100,
}

/// Neighbor-mine count stored in a [`Cell`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Count {
    /// No count has been derived yet.
    Unset,
    /// The cell holds a mine, so it has no meaningful count.
    Mine,
    /// Number of mines among the cell's neighbors.
    Adjacent(u8),
}

impl Count {
    /// Get the number of adjacent mines, if this is a real count.
    pub fn adjacent(self) -> Option<u8> {
        match self {
            Count::Adjacent(n) => Some(n),
            Count::Unset | Count::Mine => None,
        }
    }
}

impl Default for Count {
    fn default() -> Self {
        Count::Unset
    }
}

/// One position on the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Cell {
    state: BitFlags<CellState>,
    count: Count,
}

impl Cell {
    /// Construct a hidden, unflagged cell without a mine or a count.
    pub fn new() -> Self {
        Self {
            state: BitFlags::empty(),
            count: Count::Unset,
        }
    }

    /// Bury a mine under this cell. Mines are never removed.
    pub fn set_mine(&mut self) {
        self.state.insert(CellState::Mine);
    }

    /// Open the cell. Returns true if it was hidden before.
    pub fn set_visible(&mut self) -> bool {
        let was_hidden = !self.visible();
        self.state.insert(CellState::Visible);
        was_hidden
    }

    /// Flag the cell. Visible cells can't be flagged. Returns true if the cell went from
    /// unflagged to flagged.
    pub fn set_flagged(&mut self) -> bool {
        if self.visible() || self.is_flagged() {
            return false;
        }
        self.state.insert(CellState::Flagged);
        true
    }

    /// Clear the flag. Returns true if the cell was flagged.
    pub fn unflag(&mut self) -> bool {
        let was_flagged = self.is_flagged();
        self.state.remove(CellState::Flagged);
        was_flagged
    }

    /// Record the neighbor-mine count.
    pub fn set_count(&mut self, count: Count) {
        self.count = count;
    }

    pub fn has_mine(&self) -> bool {
        self.state.contains(CellState::Mine)
    }

    pub fn visible(&self) -> bool {
        self.state.contains(CellState::Visible)
    }

    pub fn is_flagged(&self) -> bool {
        self.state.contains(CellState::Flagged)
    }

    pub fn count(&self) -> Count {
        self.count
    }

    /// All state bits of the cell.
    pub fn state(&self) -> BitFlags<CellState> {
        self.state
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Cell {
    /// `?` for hidden, `F` for flagged, `X` for an opened mine, blank for an opened cell
    /// without neighboring mines, the count otherwise.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_flagged() {
            f.pad("F")
        } else if !self.visible() {
            f.pad("?")
        } else if self.has_mine() {
            f.pad("X")
        } else {
            match self.count {
                Count::Adjacent(0) | Count::Unset => f.pad(" "),
                Count::Adjacent(n) => f.pad(&n.to_string()),
                Count::Mine => f.pad("X"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_blank() {
        let cell = Cell::default();
        assert!(!cell.has_mine());
        assert!(!cell.visible());
        assert!(!cell.is_flagged());
        assert_eq!(cell.count(), Count::Unset);
        assert!(cell.state().is_empty());
    }

    #[test]
    fn set_mine_is_idempotent() {
        let mut cell = Cell::new();
        cell.set_mine();
        cell.set_mine();
        assert!(cell.has_mine());
        assert_eq!(cell.state(), BitFlags::from(CellState::Mine));
    }

    #[test]
    fn flag_transitions() {
        let mut cell = Cell::new();
        assert!(!cell.unflag());
        assert!(cell.set_flagged());
        assert!(!cell.set_flagged());
        assert!(cell.is_flagged());
        assert!(cell.unflag());
        assert!(!cell.is_flagged());
    }

    #[test]
    fn visible_cells_cannot_be_flagged() {
        let mut cell = Cell::new();
        assert!(cell.set_visible());
        assert!(!cell.set_visible());
        assert!(!cell.set_flagged());
        assert!(!cell.is_flagged());
    }

    #[test]
    fn display() {
        let mut cell = Cell::new();
        cell.set_count(Count::Adjacent(3));
        assert_eq!(cell.to_string(), "?");
        cell.set_flagged();
        assert_eq!(cell.to_string(), "F");
        cell.unflag();
        cell.set_visible();
        assert_eq!(cell.to_string(), "3");
        cell.set_count(Count::Adjacent(0));
        assert_eq!(cell.to_string(), " ");

        let mut mine = Cell::new();
        mine.set_mine();
        mine.set_visible();
        assert_eq!(mine.to_string(), "X");
    }
}
