//! Rectangular board dimensions and 8-directional neighbor iteration.
use crate::board::Coordinate;

/// Offsets of the eight neighbors of a cell, row-major from the top-left.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Number of rows and columns of a rectangular grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Dimensions {
    /// Number of rows. This cooresponds to [`Coordinate::row`].
    rows: usize,
    /// Number of columns. This cooresponds to [`Coordinate::col`].
    cols: usize,
}

impl Dimensions {
    /// Create [`Dimensions`] with the given number of rows and columns. Zero is allowed
    /// here since an empty grid is still a grid; use [`try_new`][Dimensions::try_new] to
    /// describe a playable board.
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Create [`Dimensions`] for a playable board. Returns `None` if `rows` or `cols` is 0
    /// or if `rows * cols` exceeds `usize::max_value()`.
    pub fn try_new(rows: usize, cols: usize) -> Option<Self> {
        if rows == 0 || cols == 0 {
            None
        } else {
            rows.checked_mul(cols).map(|_| Self { rows, cols })
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn total_size(&self) -> usize {
        self.rows * self.cols
    }

    /// Check if the given [`Coordinate`] lies within these dimensions.
    #[inline]
    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Get an iterator over rows of this grid. Each row is an iterator over the
    /// coordinates of that row.
    pub fn iter_coordinates(&self) -> impl Iterator<Item = impl Iterator<Item = Coordinate>> {
        let cols = self.cols;
        (0..self.rows).map(move |row| (0..cols).map(move |col| Coordinate { row, col }))
    }

    /// Get a row-major iterator over every coordinate.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        self.iter_coordinates().flatten()
    }

    /// Iterate the in-bounds orthogonal and diagonal neighbors of the given coordinate.
    /// Yields nothing if the coordinate itself is out of bounds.
    pub fn neighbors(&self, coord: Coordinate) -> Neighbors {
        Neighbors {
            dim: *self,
            coord,
            // If the coordinate is out of bounds, skip directly to the end so we don't
            // produce neighbors of a cell that doesn't exist.
            next: if self.contains(coord) {
                0
            } else {
                NEIGHBOR_OFFSETS.len()
            },
        }
    }
}

/// Iterator over the neighbors of a coordinate. Owns a copy of the dimensions so the grid
/// can be mutated while iterating.
#[derive(Debug, Clone)]
pub struct Neighbors {
    dim: Dimensions,
    coord: Coordinate,
    next: usize,
}

impl Iterator for Neighbors {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        while let Some(&(dr, dc)) = NEIGHBOR_OFFSETS.get(self.next) {
            self.next += 1;
            let row = step(self.coord.row, dr, self.dim.rows);
            let col = step(self.coord.col, dc, self.dim.cols);
            if let (Some(row), Some(col)) = (row, col) {
                return Some(Coordinate { row, col });
            }
        }
        None
    }
}

/// Move `pos` by `delta` (one of -1, 0, 1), returning `None` if that leaves `[0, limit)`.
#[inline]
fn step(pos: usize, delta: isize, limit: usize) -> Option<usize> {
    match delta {
        -1 => pos.checked_sub(1),
        1 => Some(pos + 1).filter(|&p| p < limit),
        _ => Some(pos),
    }
}
