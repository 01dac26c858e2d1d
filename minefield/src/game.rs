//! The minesweeper game: board setup, clicking and flagging.
//!
//! A [`Game`] owns a [`Grid`] of [`Cell`]s. Construction buries the mines and derives every
//! cell's neighbor count, after which [`click_at`][Game::click_at],
//! [`flag_at`][Game::flag_at] and [`un_flag_at`][Game::un_flag_at] drive the
//! [`Status`] forward.
//!
//! Bad coordinates are an ordinary outcome here, not an error: they are reported through
//! return values (`Rejected`, `None`, `false`) and never change the game.
use std::fmt;

use tracing::{debug, info};

use crate::{
    board::{empty_board, Cell, Coordinate, Count, Dimensions, Grid},
    rng::{Lcg48, MAX_BOUND},
};

pub use self::{
    errors::GameError,
    level::Level,
    status::{Event, Status},
};

mod errors;
mod level;
mod status;

/// Reason why a click didn't open anything.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CannotClickReason {
    /// The coordinate is outside the board.
    OutOfBounds,
    /// The cell is flagged and must be unflagged first.
    Flagged,
    /// The cell has already been opened.
    AlreadyVisible,
    /// The game has already been won or lost.
    GameOver,
}

/// Outcome of a click.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ClickOutcome {
    /// Nothing changed.
    Rejected(CannotClickReason),
    /// The cell held a mine. The game is lost.
    Exploded,
    /// The cell was safe and is now open. Carries its neighbor-mine count.
    Revealed(u8),
}

/// A single game of minesweeper.
#[derive(Debug, Clone)]
pub struct Game {
    /// Cells of the board.
    board: Grid<Cell>,

    /// Size of the board.
    dim: Dimensions,

    /// Number of mines buried in the board.
    mine_total: usize,

    /// Number of safe cells opened so far.
    clicked: usize,

    /// Number of cells currently flagged.
    flagged: usize,

    status: Status,
}

impl Game {
    /// Lay out a new game of the given [`Level`], burying mines at positions drawn from an
    /// [`Lcg48`] seeded with `seed`. The same level and seed always give the same board.
    pub fn new(level: Level, seed: i32) -> Result<Self, GameError> {
        let mut rng = Lcg48::new(seed.into());
        Self::generate(level, |bound| rng.next_below(bound))
    }

    /// Lay out a new game of the given [`Level`], drawing mine positions from `rng`.
    #[cfg(feature = "rng_gen")]
    pub fn with_rng<R: rand::Rng>(level: Level, rng: &mut R) -> Result<Self, GameError> {
        Self::generate(level, |bound| rng.gen_range(0, bound))
    }

    /// Start a game from an explicit mine layout, where `true` marks a mine.
    pub fn from_mines(mines: &Grid<bool>) -> Result<Self, GameError> {
        let (rows, cols) = (mines.row_count(), mines.col_count());
        let dim = checked_dimensions(rows, cols)?;
        let board = Grid::from_fn(rows, cols, |coord| {
            let mut cell = Cell::new();
            if mines[coord] {
                cell.set_mine();
            }
            cell
        });
        let mine_total = mines.enumerate().filter(|&(_, &mine)| mine).count();
        Ok(Self::start(board, dim, mine_total))
    }

    /// Place `level.mines()` mines using `draw`, which must return a value in `[0, bound)`.
    /// A draw that lands on a mine is discarded and drawn again.
    fn generate<F>(level: Level, mut draw: F) -> Result<Self, GameError>
    where
        F: FnMut(usize) -> usize,
    {
        let dim = checked_dimensions(level.rows(), level.cols())?;
        if level.mines() > dim.total_size() {
            return Err(GameError::TooManyMines {
                mines: level.mines(),
                cells: dim.total_size(),
            });
        }
        let mut board = empty_board(dim.rows(), dim.cols());
        let mut placed = 0;
        while placed < level.mines() {
            let row = draw(dim.rows());
            let col = draw(dim.cols());
            let cell = &mut board[Coordinate::new(row, col)];
            if cell.has_mine() {
                continue;
            }
            cell.set_mine();
            placed += 1;
        }
        debug!(
            "Placed {} mines on a {}x{} board",
            placed,
            dim.rows(),
            dim.cols()
        );
        Ok(Self::start(board, dim, placed))
    }

    /// Derive counts and reset the counters for a freshly laid out board.
    fn start(board: Grid<Cell>, dim: Dimensions, mine_total: usize) -> Self {
        let mut game = Self {
            board,
            dim,
            mine_total,
            clicked: 0,
            flagged: 0,
            status: Status::Init,
        };
        for coord in dim.coordinates() {
            let count = game.count_at(coord);
            game.board[coord].set_count(count);
        }
        game
    }

    /// Number of rows on the board.
    pub fn row_count(&self) -> usize {
        self.dim.rows()
    }

    /// Number of columns on the board.
    pub fn col_count(&self) -> usize {
        self.dim.cols()
    }

    /// Get the [`Dimensions`] of the board.
    pub fn dimensions(&self) -> Dimensions {
        self.dim
    }

    /// Total number of mines on the board.
    pub fn mine_total(&self) -> usize {
        self.mine_total
    }

    /// Number of mines not accounted for by a flag. Negative if more cells are flagged
    /// than there are mines.
    pub fn mine_left(&self) -> isize {
        self.mine_total as isize - self.flagged as isize
    }

    /// Number of safe cells opened so far.
    pub fn clicked_count(&self) -> usize {
        self.clicked
    }

    /// Number of cells currently flagged.
    pub fn flagged_count(&self) -> usize {
        self.flagged
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_solved(&self) -> bool {
        self.status == Status::Solved
    }

    pub fn is_exploded(&self) -> bool {
        self.status == Status::Exploded
    }

    /// Get the board.
    pub fn board(&self) -> &Grid<Cell> {
        &self.board
    }

    /// Returns true if the cell is open. False for out of bounds coordinates.
    pub fn is_visible(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).map_or(false, Cell::visible)
    }

    /// Returns true if the cell is flagged. False for out of bounds coordinates.
    pub fn is_flagged(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).map_or(false, Cell::is_flagged)
    }

    /// Returns true if the cell holds a mine, flagged or not. False for out of bounds
    /// coordinates.
    pub fn has_mine(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).map_or(false, Cell::has_mine)
    }

    /// Get the stored count of the cell, or `None` for out of bounds coordinates.
    pub fn get_count(&self, row: usize, col: usize) -> Option<Count> {
        self.cell(row, col).map(Cell::count)
    }

    /// Count the mines around the cell. `None` for out of bounds coordinates,
    /// [`Count::Mine`] if the cell itself holds a mine.
    pub fn count_nbr_mines(&self, row: usize, col: usize) -> Option<Count> {
        let coord = Coordinate::new(row, col);
        if self.dim.contains(coord) {
            Some(self.count_at(coord))
        } else {
            None
        }
    }

    /// Open the cell at `(row, col)`.
    ///
    /// Opening a mine loses the game. Opening a safe cell with no neighboring mines also
    /// opens every hidden, unflagged neighbor, cascading through the whole connected
    /// region of such cells and its border. The game is solved once every safe cell is
    /// open.
    pub fn click_at(&mut self, row: usize, col: usize) -> ClickOutcome {
        if self.status.is_over() {
            return ClickOutcome::Rejected(CannotClickReason::GameOver);
        }
        let coord = Coordinate::new(row, col);
        let cell = match self.board.get(coord) {
            Some(&cell) => cell,
            None => return ClickOutcome::Rejected(CannotClickReason::OutOfBounds),
        };
        if cell.is_flagged() {
            return ClickOutcome::Rejected(CannotClickReason::Flagged);
        }
        if cell.visible() {
            return ClickOutcome::Rejected(CannotClickReason::AlreadyVisible);
        }

        if cell.has_mine() {
            self.board[coord].set_visible();
            self.status = self.status.next(Event::Explode);
            info!("Mine at ({}, {}) exploded", row, col);
            return ClickOutcome::Exploded;
        }

        self.status = self.status.next(Event::Reveal);
        let count = self.reveal(coord);
        if self.clicked == self.dim.total_size() - self.mine_total {
            self.status = self.status.next(Event::Clear);
            info!("Board solved after {} cells opened", self.clicked);
        }
        ClickOutcome::Revealed(count)
    }

    /// Flag the cell at `(row, col)`. Returns false for out of bounds or open cells.
    /// Flagging a cell that is already flagged changes nothing but still returns true.
    pub fn flag_at(&mut self, row: usize, col: usize) -> bool {
        match self.board.get_mut(Coordinate::new(row, col)) {
            None => false,
            Some(cell) if cell.visible() => false,
            Some(cell) => {
                if cell.set_flagged() {
                    self.flagged += 1;
                    debug!("Cell ({}, {}) flagged", row, col);
                }
                true
            }
        }
    }

    /// Clear the flag on the cell at `(row, col)`. Returns true only if the cell went
    /// from flagged to unflagged.
    pub fn un_flag_at(&mut self, row: usize, col: usize) -> bool {
        let cell = match self.board.get_mut(Coordinate::new(row, col)) {
            Some(cell) if !cell.visible() => cell,
            _ => return false,
        };
        if !cell.unflag() {
            return false;
        }
        self.flagged -= 1;
        debug!("Cell ({}, {}) unflagged", row, col);
        true
    }

    fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.board.get(Coordinate::new(row, col))
    }

    /// Count for an in-bounds coordinate.
    fn count_at(&self, coord: Coordinate) -> Count {
        if self.board[coord].has_mine() {
            return Count::Mine;
        }
        let mines = self
            .dim
            .neighbors(coord)
            .filter(|&nbr| self.board[nbr].has_mine())
            .count();
        Count::Adjacent(mines as u8)
    }

    /// Open the safe, hidden cell at `start`, flooding outward through zero-count cells
    /// with an explicit stack. Returns the count of `start`.
    fn reveal(&mut self, start: Coordinate) -> u8 {
        let dim = self.dim;
        self.board[start].set_visible();
        self.clicked += 1;
        let mut opened = 1;
        let mut pending = vec![start];
        while let Some(coord) = pending.pop() {
            if self.board[coord].count() != Count::Adjacent(0) {
                continue;
            }
            for nbr in dim.neighbors(coord) {
                let cell = &mut self.board[nbr];
                if cell.visible() || cell.is_flagged() || cell.has_mine() {
                    continue;
                }
                cell.set_visible();
                self.clicked += 1;
                opened += 1;
                pending.push(nbr);
            }
        }
        debug!(
            "Click at ({}, {}) opened {} cells",
            start.row, start.col, opened
        );
        self.board[start].count().adjacent().unwrap_or(0)
    }
}

/// Validate a board size for play.
fn checked_dimensions(rows: usize, cols: usize) -> Result<Dimensions, GameError> {
    Dimensions::try_new(rows, cols)
        .filter(|_| rows <= MAX_BOUND && cols <= MAX_BOUND)
        .ok_or(GameError::InvalidDimensions { rows, cols })
}

impl fmt::Display for Game {
    /// Debug dump of the game: size, mine counts, status and the board.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Board Size: {} x {}", self.row_count(), self.col_count())?;
        writeln!(f, "Total mines: {}", self.mine_total)?;
        writeln!(f, "Remaining mines: {}", self.mine_left())?;
        writeln!(f, "Game status: {}", self.status)?;
        write!(f, "{}", self.board)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    /// Build a game from a picture of the board where `*` marks a mine.
    fn layout(rows: &[&str]) -> Game {
        let mines = Grid::from_fn(rows.len(), rows[0].len(), |c| {
            rows[c.row].as_bytes()[c.col] == b'*'
        });
        Game::from_mines(&mines).unwrap()
    }

    fn visible_map(game: &Game) -> Vec<String> {
        game.board()
            .iter_rows()
            .map(|row| {
                row.iter()
                    .map(|cell| if cell.visible() { 'o' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn construction_counts_mines_exactly() {
        let mut seeds = StdRng::seed_from_u64(7);
        for &level in Level::PRESETS {
            for _ in 0..20 {
                let game = Game::new(level, seeds.gen()).unwrap();
                let mines = game.board().enumerate().filter(|(_, c)| c.has_mine()).count();
                assert_eq!(mines, level.mines());
                assert_eq!(game.mine_total(), level.mines());
                assert_eq!(game.status(), Status::Init);
                assert_eq!(game.clicked_count(), 0);
                assert_eq!(game.flagged_count(), 0);
            }
        }
    }

    #[test]
    fn same_seed_same_board() {
        let a = Game::new(Level::Medium, 99).unwrap();
        let b = Game::new(Level::Medium, 99).unwrap();
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn custom_levels_are_validated() {
        assert_eq!(
            Game::new(
                Level::Custom {
                    rows: 0,
                    cols: 3,
                    mines: 0
                },
                1
            )
            .unwrap_err(),
            GameError::InvalidDimensions { rows: 0, cols: 3 }
        );
        assert_eq!(
            Game::new(
                Level::Custom {
                    rows: 2,
                    cols: 2,
                    mines: 5
                },
                1
            )
            .unwrap_err(),
            GameError::TooManyMines { mines: 5, cells: 4 }
        );
        let full = Game::new(
            Level::Custom {
                rows: 2,
                cols: 3,
                mines: 6,
            },
            1,
        )
        .unwrap();
        assert_eq!(full.mine_total(), 6);
    }

    #[test]
    fn counts_match_neighbors() {
        let game = layout(&[
            "*..", //
            "...", //
            ".*.",
        ]);
        assert_eq!(game.count_nbr_mines(0, 0), Some(Count::Mine));
        assert_eq!(game.count_nbr_mines(1, 1), Some(Count::Adjacent(2)));
        assert_eq!(game.count_nbr_mines(0, 2), Some(Count::Adjacent(0)));
        assert_eq!(game.count_nbr_mines(2, 2), Some(Count::Adjacent(1)));
        assert_eq!(game.count_nbr_mines(3, 0), None);
        assert_eq!(game.count_nbr_mines(0, 3), None);
        for coord in game.dimensions().coordinates() {
            assert_eq!(
                game.get_count(coord.row, coord.col),
                game.count_nbr_mines(coord.row, coord.col)
            );
        }
    }

    #[test]
    fn queries_on_bad_coordinates_are_false() {
        let game = layout(&["*."]);
        assert!(game.has_mine(0, 0));
        assert!(!game.has_mine(0, 2));
        assert!(!game.is_visible(1, 0));
        assert!(!game.is_flagged(1, 0));
        assert_eq!(game.get_count(5, 5), None);
    }

    #[test]
    fn click_rejections_change_nothing() {
        let mut game = layout(&[
            "*..", //
            "...",
        ]);
        assert_eq!(
            game.click_at(2, 0),
            ClickOutcome::Rejected(CannotClickReason::OutOfBounds)
        );
        assert!(game.flag_at(1, 2));
        assert_eq!(
            game.click_at(1, 2),
            ClickOutcome::Rejected(CannotClickReason::Flagged)
        );
        assert_eq!(game.status(), Status::Init);

        assert_eq!(game.click_at(0, 1), ClickOutcome::Revealed(1));
        assert_eq!(game.status(), Status::InGame);
        assert_eq!(
            game.click_at(0, 1),
            ClickOutcome::Rejected(CannotClickReason::AlreadyVisible)
        );
        assert_eq!(game.clicked_count(), 1);
    }

    #[test]
    fn zero_cell_floods_region_and_border() {
        let mut game = layout(&[
            ".....", //
            ".....", //
            "...**", //
            "...*.", //
            "..*..",
        ]);
        assert_eq!(game.click_at(0, 0), ClickOutcome::Revealed(0));
        assert_eq!(
            visible_map(&game),
            vec![
                "ooooo", //
                "ooooo", //
                "ooo..", //
                "ooo..", //
                "oo...",
            ]
        );
        assert_eq!(game.clicked_count(), 18);
        assert_eq!(game.status(), Status::InGame);
    }

    #[test]
    fn flood_skips_flagged_cells() {
        let mut game = layout(&[
            "....", //
            "....", //
            "...*",
        ]);
        assert!(game.flag_at(0, 3));
        assert_eq!(game.click_at(0, 0), ClickOutcome::Revealed(0));
        assert!(!game.is_visible(0, 3));
        assert!(game.is_flagged(0, 3));
        assert!(!game.is_solved());

        assert!(game.un_flag_at(0, 3));
        assert_eq!(game.click_at(0, 3), ClickOutcome::Revealed(0));
        assert!(game.is_solved());
    }

    #[test]
    fn opening_every_safe_cell_solves() {
        let mut game = layout(&[
            "*.", //
            "..",
        ]);
        assert_eq!(game.click_at(0, 1), ClickOutcome::Revealed(1));
        assert_eq!(game.click_at(1, 0), ClickOutcome::Revealed(1));
        assert_eq!(game.status(), Status::InGame);
        assert_eq!(game.click_at(1, 1), ClickOutcome::Revealed(1));
        assert_eq!(game.status(), Status::Solved);
        assert_eq!(
            game.click_at(0, 0),
            ClickOutcome::Rejected(CannotClickReason::GameOver)
        );
        assert!(!game.is_visible(0, 0));
    }

    #[test]
    fn clicking_a_mine_explodes() {
        let mut game = layout(&[
            "*.", //
            "..",
        ]);
        assert_eq!(game.click_at(0, 0), ClickOutcome::Exploded);
        assert!(game.is_visible(0, 0));
        assert!(game.is_exploded());
        assert_eq!(game.clicked_count(), 0);
        assert_eq!(
            game.click_at(1, 1),
            ClickOutcome::Rejected(CannotClickReason::GameOver)
        );
        assert_eq!(game.status(), Status::Exploded);
    }

    #[test]
    fn flagging_counts_each_cell_once() {
        let mut game = layout(&[
            "*.", //
            "..",
        ]);
        assert!(game.flag_at(0, 0));
        assert!(game.flag_at(0, 0));
        assert_eq!(game.flagged_count(), 1);
        assert_eq!(game.mine_left(), 0);
        assert!(game.flag_at(1, 1));
        assert_eq!(game.mine_left(), -1);

        assert!(!game.un_flag_at(0, 1));
        assert_eq!(game.flagged_count(), 2);
        assert!(game.un_flag_at(1, 1));
        assert!(!game.un_flag_at(1, 1));
        assert_eq!(game.flagged_count(), 1);

        assert!(!game.flag_at(2, 0));
        assert!(!game.un_flag_at(0, 9));
    }

    #[test]
    fn open_cells_cannot_be_flagged() {
        let mut game = layout(&[
            "*.", //
            "..",
        ]);
        game.click_at(1, 1);
        assert!(!game.flag_at(1, 1));
        assert!(!game.un_flag_at(1, 1));
        assert_eq!(game.flagged_count(), 0);
    }

    #[test]
    fn large_board_floods_without_recursion() {
        let mut game = Game::new(
            Level::Custom {
                rows: 1000,
                cols: 1000,
                mines: 0,
            },
            3,
        )
        .unwrap();
        assert_eq!(game.click_at(500, 500), ClickOutcome::Revealed(0));
        assert_eq!(game.clicked_count(), 1_000_000);
        assert!(game.is_solved());
    }

    #[test]
    fn display_dump() {
        let mut game = layout(&[
            "*.", //
            "..",
        ]);
        game.flag_at(0, 0);
        game.click_at(1, 1);
        assert_eq!(
            game.to_string(),
            "Board Size: 2 x 2\n\
             Total mines: 1\n\
             Remaining mines: 0\n\
             Game status: IN_GAME\n\
             - |0|1|\n\
             0 |F|?|\n\
             1 |?|1|"
        );
    }

    #[cfg(feature = "rng_gen")]
    #[test]
    fn with_rng_places_every_mine() {
        let mut rng = StdRng::seed_from_u64(11);
        let game = Game::with_rng(Level::Hard, &mut rng).unwrap();
        assert_eq!(
            game.board().enumerate().filter(|(_, c)| c.has_mine()).count(),
            99
        );
    }
}
