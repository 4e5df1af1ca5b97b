//! Maze Defender application shell.
//!
//! Hosts the fixed-timestep game loop thread and the channel types a
//! frontend uses to talk to it. The binary in this crate runs the
//! engine headless as a demo.

pub mod game_loop;
pub mod state;

pub use defender_core as core;
