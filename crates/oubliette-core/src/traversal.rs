//! Breadth-first analysis over the maze: exploration order, connectivity,
//! and shortest escape routes.
//!
//! All three entry points share one BFS core with a fixed discipline:
//! neighbors are scanned in ascending id order, a room is marked seen when
//! it is enqueued, and the visitor fires when it is dequeued. That makes
//! visit sequences reproducible and parent links follow first-discoverer
//! order, so reconstructed routes are stable as well as minimal.

use std::collections::VecDeque;
use std::fmt;

use crate::graph::MazeGraph;
use crate::room::RoomId;

/// Errors from route finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    /// An endpoint outside `[0, len)`.
    OutOfRange(RoomId),
    /// The endpoints sit in different components.
    NoRoute { from: RoomId, to: RoomId },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::OutOfRange(id) => write!(f, "room id {} is out of range", id),
            RouteError::NoRoute { from, to } => {
                write!(f, "no route from room {} to room {}", from, to)
            }
        }
    }
}

impl std::error::Error for RouteError {}

/// Outcome of the connectivity census (BFS from room 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectivityReport {
    /// Rooms reachable from room 0, itself included.
    pub reachable: usize,
    /// Live rooms in the maze.
    pub total: usize,
}

impl ConnectivityReport {
    /// True when every room is reachable from room 0. Vacuously true for
    /// an empty map.
    pub fn is_connected(&self) -> bool {
        self.reachable == self.total
    }
}

/// A concrete route between two rooms, both endpoints included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub rooms: Vec<RoomId>,
}

impl Route {
    /// Passages walked, one less than rooms touched.
    pub fn hops(&self) -> usize {
        self.rooms.len().saturating_sub(1)
    }
}

/// Shared BFS core. Calls `visit` as each room is dequeued; a `false`
/// return stops the scan early. Returns the first-discoverer parent table
/// (`None` for the start and for rooms never reached).
fn breadth_first<F>(graph: &MazeGraph, start: RoomId, mut visit: F) -> Vec<Option<RoomId>>
where
    F: FnMut(RoomId) -> bool,
{
    let count = graph.len();
    let mut parent: Vec<Option<RoomId>> = vec![None; count];
    if start >= count {
        return parent;
    }

    let mut seen = vec![false; count];
    let mut queue = VecDeque::with_capacity(count);
    seen[start] = true;
    queue.push_back(start);

    while let Some(u) = queue.pop_front() {
        if !visit(u) {
            break;
        }
        for v in graph.neighbors(u) {
            if !seen[v] {
                seen[v] = true;
                parent[v] = Some(u);
                queue.push_back(v);
            }
        }
    }
    parent
}

/// Rooms reachable from `start`, in breadth-first visit order starting
/// with `start` itself. An out-of-range start yields an empty sequence.
pub fn bfs_walk(graph: &MazeGraph, start: RoomId) -> Vec<RoomId> {
    let mut order = Vec::new();
    breadth_first(graph, start, |u| {
        order.push(u);
        true
    });
    order
}

/// How much of the map room 0 can reach.
pub fn connectivity_report(graph: &MazeGraph) -> ConnectivityReport {
    ConnectivityReport {
        reachable: bfs_walk(graph, 0).len(),
        total: graph.len(),
    }
}

/// Shortest route (fewest passages) from `from` to `to`. Ties break toward
/// lower-id parents because of the ascending scan.
pub fn find_route(graph: &MazeGraph, from: RoomId, to: RoomId) -> Result<Route, RouteError> {
    let count = graph.len();
    if from >= count {
        return Err(RouteError::OutOfRange(from));
    }
    if to >= count {
        return Err(RouteError::OutOfRange(to));
    }

    let mut reached = false;
    let parent = breadth_first(graph, from, |u| {
        if u == to {
            reached = true;
            return false;
        }
        true
    });
    if !reached {
        return Err(RouteError::NoRoute { from, to });
    }

    let mut rooms = vec![to];
    let mut cursor = to;
    while let Some(prev) = parent[cursor] {
        rooms.push(prev);
        cursor = prev;
    }
    rooms.reverse();
    Ok(Route { rooms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::Room;

    /// n rooms in a row: 0-1-2-...-(n-1).
    fn linear_graph(n: usize) -> MazeGraph {
        let mut graph = MazeGraph::new(n);
        for i in 0..n {
            graph
                .append(Room::new(format!("Room {}", i), "plain"))
                .unwrap();
        }
        for i in 1..n {
            graph.connect(i - 1, i).unwrap();
        }
        graph
    }

    #[test]
    fn test_walk_visits_start_first_in_ascending_layers() {
        let mut graph = linear_graph(4);
        // Turn the line into a star around 0 plus the 2-3 link.
        graph.disconnect(1, 2).unwrap();
        graph.connect(0, 2).unwrap();
        graph.connect(0, 3).unwrap();
        assert_eq!(bfs_walk(&graph, 0), vec![0, 1, 2, 3]);
        assert_eq!(bfs_walk(&graph, 3), vec![3, 0, 2, 1]);
    }

    #[test]
    fn test_walk_covers_only_the_component() {
        let mut graph = linear_graph(5);
        graph.disconnect(2, 3).unwrap();
        assert_eq!(bfs_walk(&graph, 0), vec![0, 1, 2]);
        assert_eq!(bfs_walk(&graph, 4), vec![4, 3]);
        assert!(bfs_walk(&graph, 9).is_empty());
    }

    #[test]
    fn test_connectivity_report() {
        let mut graph = linear_graph(4);
        assert!(connectivity_report(&graph).is_connected());

        graph.disconnect(1, 2).unwrap();
        let report = connectivity_report(&graph);
        assert_eq!(report.reachable, 2);
        assert_eq!(report.total, 4);
        assert!(!report.is_connected());
    }

    #[test]
    fn test_empty_map_is_vacuously_connected() {
        let graph = MazeGraph::new(4);
        let report = connectivity_report(&graph);
        assert_eq!(report.reachable, 0);
        assert_eq!(report.total, 0);
        assert!(report.is_connected());
    }

    #[test]
    fn test_route_prefers_the_shortcut() {
        let mut graph = linear_graph(4);
        graph.connect(0, 3).unwrap();
        let route = find_route(&graph, 0, 3).unwrap();
        assert_eq!(route.rooms, vec![0, 3]);
        assert_eq!(route.hops(), 1);
    }

    #[test]
    fn test_route_through_a_branching_map() {
        // 0-1, 0-2, 1-3, 2-3, 3-4: two equal routes to 3; the lower-id
        // branch wins the parent link.
        let mut graph = MazeGraph::new(5);
        for i in 0..5 {
            graph
                .append(Room::new(format!("Room {}", i), "plain"))
                .unwrap();
        }
        for (u, v) in [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)] {
            graph.connect(u, v).unwrap();
        }
        let route = find_route(&graph, 0, 4).unwrap();
        assert_eq!(route.rooms, vec![0, 1, 3, 4]);
        assert_eq!(route.hops(), 3);
    }

    #[test]
    fn test_route_to_self_is_a_single_room() {
        let graph = linear_graph(3);
        let route = find_route(&graph, 2, 2).unwrap();
        assert_eq!(route.rooms, vec![2]);
        assert_eq!(route.hops(), 0);
    }

    #[test]
    fn test_unreachable_and_out_of_range_routes() {
        let mut graph = linear_graph(4);
        graph.disconnect(1, 2).unwrap();
        assert_eq!(
            find_route(&graph, 0, 3),
            Err(RouteError::NoRoute { from: 0, to: 3 })
        );
        assert_eq!(find_route(&graph, 0, 9), Err(RouteError::OutOfRange(9)));
        assert_eq!(find_route(&graph, 9, 0), Err(RouteError::OutOfRange(9)));
    }
}
