//! Types that make up the game board.

pub use self::{
    cell::{Cell, CellState, Count},
    coordinate::Coordinate,
    dimensions::{Dimensions, Neighbors},
    errors::GridError,
    grid::Grid,
};

mod cell;
mod coordinate;
mod dimensions;
mod errors;
mod grid;

/// Build a `rows` x `cols` grid of default cells: no mines, hidden, unflagged and without
/// a count.
pub fn empty_board(rows: usize, cols: usize) -> Grid<Cell> {
    Grid::from_fn(rows, cols, |_| Cell::new())
}
