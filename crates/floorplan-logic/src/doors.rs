//! Doorway carving.
//!
//! Each wall taken by the connectivity pass is split around a randomly placed
//! gap of `door_size`. Walls that were not taken stay solid.

use crate::edges::{EdgeArena, EdgeId};
use crate::geometry::{Edge, Orientation, Point};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A wall to receive a doorway, with the rooms it joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorRequest {
    pub edge: EdgeId,
    pub rooms: (usize, usize),
}

/// A carved doorway.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Doorway {
    pub rooms: (usize, usize),
    pub center: Point,
    pub orientation: Orientation,
    pub width: f64,
}

/// Split `edge` around a gap of `door_size` centered at `center` (a
/// coordinate along the wall). Returns the lower and upper halves.
///
/// The halves have non-negative length, not strictly positive: a door flush
/// with either end of the wall leaves a zero-length half there. It is kept so
/// every carve yields exactly two edges.
pub fn split_edge(edge: &Edge, center: f64, door_size: f64) -> (Edge, Edge) {
    let half = door_size / 2.0;
    match edge.orientation {
        Orientation::Vertical => (
            Edge::vertical(edge.p0.x, edge.p0.y, center - half),
            Edge::vertical(edge.p0.x, center + half, edge.p1.y),
        ),
        Orientation::Horizontal => (
            Edge::horizontal(edge.p0.y, edge.p0.x, center - half),
            Edge::horizontal(edge.p0.y, center + half, edge.p1.x),
        ),
    }
}

/// Carve one doorway per request, replacing each wall in `arena` with its
/// two halves. Requests whose handle is stale or whose wall cannot fit the
/// door are skipped.
pub fn carve_doorways<R: Rng + ?Sized>(
    arena: &mut EdgeArena,
    requests: &[DoorRequest],
    door_size: f64,
    rng: &mut R,
) -> Vec<Doorway> {
    let half = door_size / 2.0;
    let mut doorways = Vec::with_capacity(requests.len());

    for request in requests {
        let Some(edge) = arena.get(request.edge).copied() else {
            log::warn!(
                "Skipping doorway between rooms {} and {}: wall no longer exists",
                request.rooms.0,
                request.rooms.1
            );
            continue;
        };
        if edge.length() <= door_size {
            log::warn!(
                "Skipping doorway between rooms {} and {}: wall length {:.3} <= door size {:.3}",
                request.rooms.0,
                request.rooms.1,
                edge.length(),
                door_size
            );
            continue;
        }

        let (start, end) = edge.span();
        let center = rng.gen_range((start + half)..=(end - half));
        let (lower, upper) = split_edge(&edge, center, door_size);

        arena.remove(request.edge);
        arena.insert(lower);
        arena.insert(upper);

        let center_point = match edge.orientation {
            Orientation::Vertical => Point::new(edge.p0.x, center),
            Orientation::Horizontal => Point::new(center, edge.p0.y),
        };
        doorways.push(Doorway {
            rooms: request.rooms,
            center: center_point,
            orientation: edge.orientation,
            width: door_size,
        });
    }

    doorways
}
