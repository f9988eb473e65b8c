//! Conway-style cellular automaton exhibit

pub mod cell;
pub mod grid;
pub mod patterns;

pub use cell::Cell;
pub use grid::{is_born, survives, Grid, GridSnapshot};
