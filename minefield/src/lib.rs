//! Minesweeper engine.
//!
//! The board is a [`Grid`][board::Grid] made of rows of [`DynArr`][dynarr::DynArr]s, a
//! growable array with an explicit doubling/halving capacity policy. The [`game`] module
//! lays out mines from a seed, derives neighbor counts and runs clicks and flags against
//! the board.
//!
//! ```
//! use minefield::game::{ClickOutcome, Game, Level, Status};
//!
//! let mut game = Game::new(Level::Tiny, -1157793070).unwrap();
//! assert_eq!(game.click_at(3, 3), ClickOutcome::Revealed(3));
//! assert_eq!(game.status(), Status::InGame);
//! assert_eq!(game.click_at(2, 3), ClickOutcome::Exploded);
//! assert_eq!(game.status(), Status::Exploded);
//! ```

pub mod board;
pub mod dynarr;
pub mod game;
pub mod rng;
