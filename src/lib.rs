//! **mazes** generates seeded perfect mazes with the recursive backtracker and maps them into world space
//! for drawing and walking.
//!
//! A maze is a flat array of cells, row major from `(0, 0)`, each holding its own four walls and the indices
//! of its four neighbours. The same width, height and seed always carve the same maze.

pub mod cells;
pub mod errors;
pub mod gameplay;
pub mod generators;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_positions;
pub mod maze;
pub mod maze_rng;
pub mod renderers;
pub mod request;
pub mod units;
mod utils;
