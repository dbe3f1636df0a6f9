//! Room records, the per-vertex data of the maze.
//!
//! A room is identified by its slot in the graph's contiguous store
//! (`RoomId`), so ids stay dense in `[0, len)` and get re-assigned when an
//! earlier room is removed. Gameplay state (key, lock, trap, hint) lives
//! here; the passages themselves live in the adjacency matrix.

use serde::{Deserialize, Serialize};

/// Dense positional label of a room. Equals the room's current slot index,
/// so it is always `< MazeGraph::len()` for a live room.
pub type RoomId = usize;

/// A riddle gating a room. One wrong answer ends the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trap {
    pub challenge: String,
    pub solution: String,
    /// Set once the challenge has been answered correctly; never re-fires.
    pub solved: bool,
}

/// A single cell, corridor, or yard of the prison map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Current slot index in the graph store. Managed by the graph.
    pub id: RoomId,
    pub name: String,
    pub description: String,
    /// A key lies here, collectible exactly once.
    pub has_item: bool,
    /// Entering requires carrying the key.
    pub requires_item: bool,
    /// Reaching this room wins the game.
    pub is_exit: bool,
    pub trap: Option<Trap>,
    pub hint: Option<String>,
}

impl Room {
    /// A plain room with no gameplay flags set. The graph assigns the id on
    /// insertion.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: description.into(),
            has_item: false,
            requires_item: false,
            is_exit: false,
            trap: None,
            hint: None,
        }
    }

    /// Place a collectible key in this room.
    pub fn with_item(mut self) -> Self {
        self.has_item = true;
        self
    }

    /// Lock this room behind the key.
    pub fn with_lock(mut self) -> Self {
        self.requires_item = true;
        self
    }

    /// Mark this room as the escape exit.
    pub fn with_exit(mut self) -> Self {
        self.is_exit = true;
        self
    }

    /// Arm this room with a riddle trap.
    pub fn with_trap(mut self, challenge: impl Into<String>, solution: impl Into<String>) -> Self {
        self.trap = Some(Trap {
            challenge: challenge.into(),
            solution: solution.into(),
            solved: false,
        });
        self
    }

    /// Leave a hint for the player to find.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Whether an unresolved trap is waiting in this room.
    pub fn trap_armed(&self) -> bool {
        self.trap.as_ref().is_some_and(|t| !t.solved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_flags() {
        let room = Room::new("Guard Post", "Empty chairs, a cold cup of coffee.")
            .with_item()
            .with_trap("Watchword?", "october");
        assert!(room.has_item);
        assert!(!room.requires_item);
        assert!(!room.is_exit);
        assert!(room.hint.is_none());
        assert_eq!(room.trap.as_ref().map(|t| t.solution.as_str()), Some("october"));
    }

    #[test]
    fn test_trap_armed_tracks_solved() {
        let mut room = Room::new("Vault", "Iron walls.").with_trap("2+2?", "4");
        assert!(room.trap_armed());
        room.trap.as_mut().unwrap().solved = true;
        assert!(!room.trap_armed());
        assert!(!Room::new("Hall", "Bare stone.").trap_armed());
    }
}
