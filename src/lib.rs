//! Perfect maze generation with animated breadth-first and depth-first search playback.
//!
//! [`generators`] carves a maze, [`solvers`] searches it, and [`animator`] replays the search as
//! timed grid snapshots. [`session`] ties the three together behind the actions a front end needs,
//! and [`app`] is the terminal front end.

pub mod animator;
pub mod app;
pub mod config;
pub mod error;
pub mod generators;
pub mod logging;
pub mod maze;
pub mod session;
pub mod solvers;
