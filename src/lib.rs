#![allow(clippy::module_inception)]

//! Disjoint pattern database construction and IDA* solving for the 5x5 sliding-tile
//! puzzle (the 24-puzzle), following Korf & Felner's "Disjoint Pattern Database
//! Heuristics" (Artificial Intelligence 134 (2002) 9-22).
//!
//! [`board`] defines the fixed 25-square board and its symmetries. [`pattern`] maps
//! pattern-tile placements to dense table indices. [`bfs`] builds one disjoint
//! pattern database with an external-memory retrograde breadth-first search.
//! [`dpdb`] reads and writes the resulting database files. [`ida`] runs
//! iterative-deepening A* over full puzzle instances using four such databases (two
//! stored, two more recovered by symmetry).

pub mod bfs;
pub mod board;
pub mod dpdb;
pub mod error;
pub mod ida;
pub mod pattern;
mod queue;

pub use error::Error;
