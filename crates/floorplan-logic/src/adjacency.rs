//! Shared-wall extraction between partitioned rooms.
//!
//! Two rooms are adjacent when one's side lies exactly on the other's
//! opposite side and their extents along that side strictly overlap.
//! Coordinates are compared exactly; the treemap computes both sides of a
//! shared wall with the same arithmetic, so no tolerance is applied.

use crate::geometry::{Adjacency, Edge, Room};

/// Shared wall between two rooms, if any.
///
/// The four configurations are tested in order (left/right, right/left,
/// bottom/top, top/bottom) and the first match wins.
pub fn shared_wall(a: &Room, b: &Room) -> Option<Edge> {
    let y_overlap = a.y_max > b.y_min && b.y_max > a.y_min;
    let x_overlap = a.x_max > b.x_min && b.x_max > a.x_min;

    if a.x_min == b.x_max {
        return y_overlap.then(|| Edge::vertical(a.x_min, a.y_min.max(b.y_min), a.y_max.min(b.y_max)));
    }
    if a.x_max == b.x_min {
        return y_overlap.then(|| Edge::vertical(a.x_max, a.y_min.max(b.y_min), a.y_max.min(b.y_max)));
    }
    if a.y_min == b.y_max {
        return x_overlap.then(|| Edge::horizontal(a.y_min, a.x_min.max(b.x_min), a.x_max.min(b.x_max)));
    }
    if a.y_max == b.y_min {
        return x_overlap.then(|| Edge::horizontal(a.y_max, a.x_min.max(b.x_min), a.x_max.min(b.x_max)));
    }
    None
}

/// Scan every unordered room pair and collect the shared walls. O(n²).
pub fn extract_adjacencies(rooms: &[Room]) -> Vec<Adjacency> {
    let mut adjacencies = Vec::new();
    for i in 0..rooms.len() {
        for j in (i + 1)..rooms.len() {
            if let Some(edge) = shared_wall(&rooms[i], &rooms[j]) {
                adjacencies.push(Adjacency {
                    rooms: (i, j),
                    edge,
                });
            }
        }
    }
    adjacencies
}
