//! The maze graph: a contiguous room store plus a dense adjacency matrix.
//!
//! Capacity is fixed at construction. Rooms occupy slots `[0, len)` with
//! `room.id == slot`. Removing a room shifts everything after it down one
//! slot (room records, matrix rows, matrix columns) and re-labels ids, so
//! ids stay dense and every survivor above the gap moves down by one.
//!
//! The matrix is symmetric (passages are two-way) and stored row-major in a
//! flat `Vec<bool>` of capacity² cells. Maps are a few dozen rooms, so the
//! quadratic footprint is noise; what matters is that neighbor scans are a
//! predictable ascending index walk, which every traversal in this crate
//! relies on.

use std::fmt;

use crate::room::{Room, RoomId};

/// Capacity used when nothing more specific is asked for.
pub const DEFAULT_CAPACITY: usize = 20;

/// Errors from room-store and passage operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// An id outside `[0, len)` was passed to a passage or removal op.
    OutOfRange(RoomId),
    /// The store already holds `capacity` rooms.
    CapacityExceeded { capacity: usize },
    /// Lookup of a room that does not (or no longer) exist.
    NotFound(RoomId),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::OutOfRange(id) => write!(f, "room id {} is out of range", id),
            GraphError::CapacityExceeded { capacity } => {
                write!(f, "the map is full ({} rooms)", capacity)
            }
            GraphError::NotFound(id) => write!(f, "no room with id {}", id),
        }
    }
}

impl std::error::Error for GraphError {}

/// Degree-based role of a room, as the security report classifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeClass {
    /// Exactly one passage: a place to get cornered in.
    DeadEnd,
    Ordinary,
    /// More than three passages: a junction worth watching.
    Hub,
}

/// Classify a passage count.
pub fn degree_class(degree: usize) -> DegreeClass {
    match degree {
        1 => DegreeClass::DeadEnd,
        d if d > 3 => DegreeClass::Hub,
        _ => DegreeClass::Ordinary,
    }
}

/// Room store and adjacency engine for one maze.
#[derive(Debug, Clone)]
pub struct MazeGraph {
    capacity: usize,
    rooms: Vec<Room>,
    /// capacity × capacity cells, row-major: `adj[u * capacity + v]`.
    adj: Vec<bool>,
}

impl MazeGraph {
    /// An empty maze able to hold `capacity` rooms.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            rooms: Vec::with_capacity(capacity),
            adj: vec![false; capacity * capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live rooms; ids run `0..len()`.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// All live rooms in id order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    fn cell(&self, u: RoomId, v: RoomId) -> bool {
        self.adj[u * self.capacity + v]
    }

    fn set_cell(&mut self, u: RoomId, v: RoomId, present: bool) {
        self.adj[u * self.capacity + v] = present;
    }

    fn check(&self, id: RoomId) -> Result<(), GraphError> {
        if id < self.rooms.len() {
            Ok(())
        } else {
            Err(GraphError::OutOfRange(id))
        }
    }

    /// Append a room at the end of the store, assigning the next dense id.
    pub fn append(&mut self, mut room: Room) -> Result<RoomId, GraphError> {
        if self.rooms.len() == self.capacity {
            return Err(GraphError::CapacityExceeded { capacity: self.capacity });
        }
        let id = self.rooms.len();
        room.id = id;
        self.rooms.push(room);
        Ok(id)
    }

    pub fn room(&self, id: RoomId) -> Result<&Room, GraphError> {
        self.rooms.get(id).ok_or(GraphError::NotFound(id))
    }

    pub fn room_mut(&mut self, id: RoomId) -> Result<&mut Room, GraphError> {
        self.rooms.get_mut(id).ok_or(GraphError::NotFound(id))
    }

    /// Open a two-way passage. Re-opening an existing one is a silent
    /// success.
    pub fn connect(&mut self, u: RoomId, v: RoomId) -> Result<(), GraphError> {
        self.check(u)?;
        self.check(v)?;
        self.set_cell(u, v, true);
        self.set_cell(v, u, true);
        Ok(())
    }

    /// Close a passage in both directions. Closing an absent one is a
    /// silent success.
    pub fn disconnect(&mut self, u: RoomId, v: RoomId) -> Result<(), GraphError> {
        self.check(u)?;
        self.check(v)?;
        self.set_cell(u, v, false);
        self.set_cell(v, u, false);
        Ok(())
    }

    /// Whether a passage exists between `u` and `v`. Out-of-range ids
    /// simply yield `false`.
    pub fn has_passage(&self, u: RoomId, v: RoomId) -> bool {
        u < self.rooms.len() && v < self.rooms.len() && self.cell(u, v)
    }

    /// Neighbor ids of `id` in ascending order, the scan order every
    /// traversal uses. Out-of-range ids have no neighbors.
    pub fn neighbors(&self, id: RoomId) -> Vec<RoomId> {
        if id >= self.rooms.len() {
            return Vec::new();
        }
        (0..self.rooms.len()).filter(|&v| self.cell(id, v)).collect()
    }

    /// Number of passages leaving `id`.
    pub fn degree(&self, id: RoomId) -> Result<usize, GraphError> {
        self.check(id)?;
        Ok((0..self.rooms.len()).filter(|&v| self.cell(id, v)).count())
    }

    /// Remove a room and close the id gap.
    ///
    /// Rows then columns above the gap shift down one slot, survivors are
    /// re-labeled, and the vacated last row/column is zeroed rather than
    /// left stale. All passages touching the removed room disappear;
    /// passages between survivors are preserved under their new ids.
    /// Returns the removed room.
    pub fn remove_room(&mut self, id: RoomId) -> Result<Room, GraphError> {
        self.check(id)?;
        let count = self.rooms.len();

        for r in id..count - 1 {
            for c in 0..count {
                let moved = self.cell(r + 1, c);
                self.set_cell(r, c, moved);
            }
        }
        for c in id..count - 1 {
            for r in 0..count {
                let moved = self.cell(r, c + 1);
                self.set_cell(r, c, moved);
            }
        }
        let last = count - 1;
        for k in 0..self.capacity {
            self.set_cell(last, k, false);
            self.set_cell(k, last, false);
        }

        let removed = self.rooms.remove(id);
        for i in id..self.rooms.len() {
            self.rooms[i].id = i;
        }
        Ok(removed)
    }

    /// Printable adjacency matrix with row labels and room names, for the
    /// map display.
    pub fn render_matrix(&self) -> String {
        let count = self.rooms.len();
        let mut out = String::from("    ");
        for v in 0..count {
            out.push_str(&format!("{:>2} ", v));
        }
        out.push('\n');
        for u in 0..count {
            out.push_str(&format!("{:>2} |", u));
            for v in 0..count {
                out.push_str(&format!(" {} ", u8::from(self.cell(u, v))));
            }
            out.push_str(&format!("| {}\n", self.rooms[u].name));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Room {
        Room::new(name, format!("{} description", name))
    }

    /// Every cell must mirror its transpose.
    fn assert_symmetric(graph: &MazeGraph) {
        for u in 0..graph.capacity() {
            for v in 0..graph.capacity() {
                assert_eq!(graph.cell(u, v), graph.cell(v, u), "asymmetry at ({}, {})", u, v);
            }
        }
    }

    #[test]
    fn test_append_assigns_dense_ids() {
        let mut graph = MazeGraph::new(3);
        assert_eq!(graph.append(named("A")).unwrap(), 0);
        assert_eq!(graph.append(named("B")).unwrap(), 1);
        assert_eq!(graph.append(named("C")).unwrap(), 2);
        assert_eq!(graph.len(), 3);
        assert_eq!(
            graph.append(named("D")),
            Err(GraphError::CapacityExceeded { capacity: 3 })
        );
        for (slot, room) in graph.rooms().iter().enumerate() {
            assert_eq!(room.id, slot);
        }
    }

    #[test]
    fn test_connect_is_symmetric_and_idempotent() {
        let mut graph = MazeGraph::new(4);
        for name in ["A", "B", "C"] {
            graph.append(named(name)).unwrap();
        }
        graph.connect(0, 2).unwrap();
        graph.connect(0, 2).unwrap();
        assert!(graph.has_passage(0, 2));
        assert!(graph.has_passage(2, 0));
        assert_eq!(graph.degree(0).unwrap(), 1);
        assert_symmetric(&graph);

        graph.disconnect(2, 0).unwrap();
        assert!(!graph.has_passage(0, 2));
        // Closing an absent passage stays a no-op.
        graph.disconnect(0, 1).unwrap();
        assert_symmetric(&graph);
    }

    #[test]
    fn test_passage_ops_reject_out_of_range() {
        let mut graph = MazeGraph::new(4);
        graph.append(named("A")).unwrap();
        assert_eq!(graph.connect(0, 3), Err(GraphError::OutOfRange(3)));
        assert_eq!(graph.disconnect(1, 0), Err(GraphError::OutOfRange(1)));
        assert_eq!(graph.degree(1), Err(GraphError::OutOfRange(1)));
        assert!(!graph.has_passage(0, 3));
        assert!(graph.neighbors(7).is_empty());
    }

    #[test]
    fn test_neighbors_scan_ascending() {
        let mut graph = MazeGraph::new(5);
        for name in ["A", "B", "C", "D", "E"] {
            graph.append(named(name)).unwrap();
        }
        graph.connect(2, 4).unwrap();
        graph.connect(2, 0).unwrap();
        graph.connect(2, 3).unwrap();
        assert_eq!(graph.neighbors(2), vec![0, 3, 4]);
    }

    #[test]
    fn test_remove_middle_room_relabels_and_drops_its_passages() {
        let mut graph = MazeGraph::new(4);
        for name in ["A", "B", "C"] {
            graph.append(named(name)).unwrap();
        }
        graph.connect(0, 1).unwrap();
        graph.connect(1, 2).unwrap();

        let removed = graph.remove_room(1).unwrap();
        assert_eq!(removed.name, "B");
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.rooms()[0].name, "A");
        assert_eq!(graph.rooms()[1].name, "C");
        assert_eq!(graph.rooms()[1].id, 1);
        // A and C were never adjacent; removal must not invent a passage.
        assert!(!graph.has_passage(0, 1));
        assert_symmetric(&graph);
    }

    #[test]
    fn test_remove_preserves_surviving_passages_under_new_ids() {
        let mut graph = MazeGraph::new(4);
        for name in ["A", "B", "C", "D"] {
            graph.append(named(name)).unwrap();
        }
        graph.connect(0, 2).unwrap();
        graph.connect(2, 3).unwrap();

        graph.remove_room(1).unwrap();
        // C is now 1 and D is now 2; both of C's passages must survive.
        assert!(graph.has_passage(0, 1));
        assert!(graph.has_passage(1, 2));
        assert!(!graph.has_passage(0, 2));
        assert_eq!(graph.degree(1).unwrap(), 2);
        assert_symmetric(&graph);
    }

    #[test]
    fn test_remove_last_room_zeroes_stale_cells() {
        let mut graph = MazeGraph::new(3);
        for name in ["A", "B"] {
            graph.append(named(name)).unwrap();
        }
        graph.connect(0, 1).unwrap();
        graph.remove_room(1).unwrap();
        assert_eq!(graph.len(), 1);
        assert!(!graph.has_passage(0, 1));
        assert_symmetric(&graph);

        // Re-appending into the vacated slot must start with no passages.
        let id = graph.append(named("B2")).unwrap();
        assert_eq!(id, 1);
        assert_eq!(graph.degree(id).unwrap(), 0);
    }

    #[test]
    fn test_degree_class_thresholds() {
        assert_eq!(degree_class(0), DegreeClass::Ordinary);
        assert_eq!(degree_class(1), DegreeClass::DeadEnd);
        assert_eq!(degree_class(3), DegreeClass::Ordinary);
        assert_eq!(degree_class(4), DegreeClass::Hub);
    }

    #[test]
    fn test_render_matrix_lists_rows_with_names() {
        let mut graph = MazeGraph::new(3);
        graph.append(named("Cell")).unwrap();
        graph.append(named("Yard")).unwrap();
        graph.connect(0, 1).unwrap();
        let rendered = graph.render_matrix();
        let expected = "     0  1 \n 0 | 0  1 | Cell\n 1 | 1  0 | Yard\n";
        assert_eq!(rendered, expected);
    }
}
