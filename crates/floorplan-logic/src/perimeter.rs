//! Outer boundary of the floor plan: four solid walls, never carved.

use crate::edges::{EdgeArena, EdgeId};
use crate::geometry::Edge;

/// Left, bottom, right, top walls of the `size × size` square.
pub fn perimeter_edges(size: f64) -> [Edge; 4] {
    [
        Edge::vertical(0.0, 0.0, size),
        Edge::horizontal(0.0, 0.0, size),
        Edge::vertical(size, 0.0, size),
        Edge::horizontal(size, 0.0, size),
    ]
}

/// Append the perimeter to `arena`.
pub fn add_perimeter(arena: &mut EdgeArena, size: f64) -> [EdgeId; 4] {
    perimeter_edges(size).map(|edge| arena.insert(edge))
}
