//! Row-oriented two dimensional grid built out of [`DynArr`]s.

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use crate::{
    board::{Coordinate, Dimensions, GridError},
    dynarr::DynArr,
};

/// A grid of equally long rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    /// Rows of the grid, top to bottom.
    rows: DynArr<DynArr<T>>,
}

impl<T> Grid<T> {
    /// Construct a grid with no rows.
    pub fn new() -> Self {
        Self {
            rows: DynArr::new(),
        }
    }

    /// Construct a `rows` x `cols` grid, filling each cell from `init`.
    pub fn from_fn<F>(rows: usize, cols: usize, mut init: F) -> Self
    where
        F: FnMut(Coordinate) -> T,
    {
        let rows = Dimensions::new(rows, cols)
            .iter_coordinates()
            .map(|row| row.map(&mut init).collect::<DynArr<T>>())
            .collect();
        Self { rows }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.size()
    }

    /// Number of columns. 0 if the grid has no rows.
    pub fn col_count(&self) -> usize {
        self.rows.get(0).map_or(0, |row| row.size())
    }

    /// The [`Dimensions`] of this grid.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.row_count(), self.col_count())
    }

    /// Returns true if `(row, col)` addresses a cell of this grid.
    pub fn is_valid_cell(&self, row: usize, col: usize) -> bool {
        row < self.row_count() && col < self.col_count()
    }

    /// Get a reference to the cell at the given [`Coordinate`]. Returns `None` if the
    /// coordinate is out of bounds.
    pub fn get(&self, coord: Coordinate) -> Option<&T> {
        self.rows
            .get(coord.row)
            .ok()
            .and_then(|row| row.get(coord.col).ok())
    }

    /// Get a mutable reference to the cell at the given [`Coordinate`].
    pub fn get_mut(&mut self, coord: Coordinate) -> Option<&mut T> {
        self.rows
            .get_mut(coord.row)
            .ok()
            .and_then(move |row| row.get_mut(coord.col).ok())
    }

    /// Insert a full row at `index`. The first row fixes the column count; every later
    /// row must match it.
    pub fn add_row(&mut self, index: usize, row: DynArr<T>) -> Result<(), GridError> {
        if !self.rows.is_empty() && row.size() != self.col_count() {
            return Err(GridError::RowLength {
                expected: self.col_count(),
                found: row.size(),
            });
        }
        self.rows.insert(index, row)?;
        Ok(())
    }

    /// Get the row at `index`, if any.
    pub fn row(&self, index: usize) -> Option<&DynArr<T>> {
        self.rows.get(index).ok()
    }

    /// Iterate the rows top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &DynArr<T>> {
        self.rows.iter()
    }

    /// Row-major iterator over every cell and its coordinate.
    pub fn enumerate(&self) -> impl Iterator<Item = (Coordinate, &T)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, cell)| (Coordinate::new(r, c), cell))
        })
    }
}

impl<T> Default for Grid<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Coordinate> for Grid<T> {
    type Output = T;

    fn index(&self, coord: Coordinate) -> &T {
        self.get(coord).expect("coordinate out of bounds")
    }
}

impl<T> IndexMut<Coordinate> for Grid<T> {
    fn index_mut(&mut self, coord: Coordinate) -> &mut T {
        self.get_mut(coord).expect("coordinate out of bounds")
    }
}

impl<T: fmt::Display> fmt::Display for Grid<T> {
    /// Column header followed by one line per row, cells separated by `|`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "- |")?;
        for col in 0..self.col_count() {
            write!(f, "{}|", col)?;
        }
        for (r, row) in self.rows.iter().enumerate() {
            write!(f, "\n{} |", r)?;
            for cell in row.iter() {
                write!(f, "{}|", cell)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynarr::DynArrError;

    fn row(values: &[i32]) -> DynArr<i32> {
        values.iter().copied().collect()
    }

    #[test]
    fn empty_grid_has_no_columns() {
        let grid: Grid<i32> = Grid::new();
        assert_eq!(grid.row_count(), 0);
        assert_eq!(grid.col_count(), 0);
        assert!(!grid.is_valid_cell(0, 0));
    }

    #[test]
    fn add_row_inserts_at_index() {
        let mut grid = Grid::new();
        grid.add_row(0, row(&[1, 2, 3])).unwrap();
        grid.add_row(1, row(&[7, 8, 9])).unwrap();
        grid.add_row(1, row(&[4, 5, 6])).unwrap();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.col_count(), 3);
        assert_eq!(grid.get(Coordinate::new(1, 0)), Some(&4));
        assert_eq!(grid[Coordinate::new(2, 2)], 9);
        assert_eq!(grid.to_string(), "- |0|1|2|\n0 |1|2|3|\n1 |4|5|6|\n2 |7|8|9|");
    }

    #[test]
    fn add_row_rejects_mismatched_length() {
        let mut grid = Grid::new();
        grid.add_row(0, row(&[1, 2])).unwrap();
        assert_eq!(
            grid.add_row(1, row(&[1, 2, 3])),
            Err(GridError::RowLength {
                expected: 2,
                found: 3
            })
        );
        assert_eq!(grid.row_count(), 1);
    }

    #[test]
    fn add_row_rejects_bad_index() {
        let mut grid = Grid::new();
        assert_eq!(
            grid.add_row(1, row(&[1])),
            Err(GridError::Array(DynArrError::IndexOutOfBounds {
                index: 1,
                size: 0
            }))
        );
    }

    #[test]
    fn is_valid_cell_matches_bounds() {
        let grid = Grid::from_fn(3, 4, |c| c.row * 10 + c.col);
        for row in 0..5 {
            for col in 0..6 {
                assert_eq!(grid.is_valid_cell(row, col), row < 3 && col < 4);
                assert_eq!(
                    grid.get(Coordinate::new(row, col)).is_some(),
                    grid.is_valid_cell(row, col)
                );
            }
        }
        assert_eq!(grid[Coordinate::new(2, 3)], 23);
    }

    #[test]
    fn get_mut_updates_cell() {
        let mut grid = Grid::from_fn(2, 2, |_| 0);
        *grid.get_mut(Coordinate::new(1, 0)).unwrap() = 5;
        assert!(grid.get_mut(Coordinate::new(2, 0)).is_none());
        let values: Vec<_> = grid.enumerate().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![0, 0, 5, 0]);
    }
}
