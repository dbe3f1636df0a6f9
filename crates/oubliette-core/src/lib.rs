//! Oubliette Core - Prison-Escape Maze Engine
//!
//! An undirected graph of rooms over a dense adjacency matrix, with BFS
//! analysis, a turn-based escape game on top, and text persistence. The
//! crate is pure logic: every function takes plain data and returns
//! results, so the interactive shell, tests, and any future front end
//! drive it the same way.
//!
//! # Architecture
//!
//! Room ids are positional: a room's id is its slot in the store, so ids
//! stay dense and removal re-labels the survivors. The adjacency matrix is
//! the single source of truth for passages; the game and every traversal
//! read neighbors from it in ascending id order, which keeps exploration
//! orders and route choices reproducible.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`answer`] | Trap-answer folding (case and accent normalization) |
//! | [`game`] | Exploration state machine: traps, keys, locked doors, outcomes |
//! | [`graph`] | Room store and dense adjacency matrix with re-packed ids |
//! | [`persistence`] | Line-oriented save/load and GraphViz export |
//! | [`room`] | Room records: flags, traps, hints |
//! | [`scenario`] | JSON map manifests |
//! | [`traversal`] | BFS exploration order, connectivity, shortest routes |
//!
//! # Example
//!
//! ```rust
//! use oubliette_core::prelude::*;
//!
//! let mut graph = MazeGraph::new(8);
//! let cell = graph.append(Room::new("Cell", "Bare stone walls."))?;
//! let yard = graph.append(Room::new("Yard", "Open sky.").with_exit())?;
//! graph.connect(cell, yard)?;
//!
//! let (mut run, _events) = Adventure::begin(&mut graph, cell)?;
//! run.travel(&mut graph, yard).unwrap();
//! assert_eq!(run.outcome(), Some(Outcome::Escaped));
//! # Ok::<(), oubliette_core::graph::GraphError>(())
//! ```

pub mod answer;
pub mod game;
pub mod graph;
pub mod persistence;
pub mod room;
pub mod scenario;
pub mod traversal;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::game::{Adventure, ExitOption, MoveBlock, Outcome, TurnEvent};
    pub use crate::graph::{GraphError, MazeGraph, DEFAULT_CAPACITY};
    pub use crate::room::{Room, RoomId, Trap};
    pub use crate::traversal::{bfs_walk, connectivity_report, find_route};
}
