//! Maze generation and pathfinding for Maze Defender.
//!
//! Produces the static per-session maze (directional passage grid, spawn
//! points, base, pellets, power-ups, derived wall geometry) and the A*
//! pathfinder enemies use to traverse it. One-way passages are first-class:
//! a passage is an opening recorded per cell, and traversal direction
//! matters everywhere.

pub mod grid;
pub mod maze;
pub mod path;
pub mod walls;

pub use grid::Grid;
pub use maze::Maze;
pub use path::find_path;
