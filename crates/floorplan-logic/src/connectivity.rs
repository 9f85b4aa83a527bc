//! Doorway connectivity over the shared-wall graph.
//!
//! Grows a connected set outward from the heaviest room, only crossing walls
//! long enough to hold a door. The plan is viable when every room is reached.
//! Walls taken during growth are the ones that later receive doorways.

use crate::geometry::{Adjacency, Room};
use std::collections::BTreeSet;

/// Outcome of one connectivity pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub viable: bool,
    /// Room the growth started from, `None` when there are no rooms.
    pub seed: Option<usize>,
    pub connected: BTreeSet<usize>,
    /// Indices into the adjacency list, in the order they were taken.
    pub selected: Vec<usize>,
}

/// Index of the heaviest room; the first one wins ties.
pub fn seed_room(rooms: &[Room]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, room) in rooms.iter().enumerate() {
        match best {
            Some((_, weight)) if room.weight <= weight => {}
            _ => best = Some((idx, room.weight)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Frontier search restricted to walls with `length > door_size`.
///
/// Each pass visits every frontier room in index order, takes each qualifying
/// wall that reaches an unconnected room, then retires the frontier room.
/// Stops on full coverage or when the frontier runs dry.
pub fn resolve(rooms: &[Room], adjacencies: &[Adjacency], door_size: f64) -> Resolution {
    let Some(seed) = seed_room(rooms) else {
        return Resolution {
            viable: false,
            seed: None,
            connected: BTreeSet::new(),
            selected: Vec::new(),
        };
    };

    let mut connected = BTreeSet::from([seed]);
    let mut frontier = BTreeSet::from([seed]);
    let mut selected = Vec::new();

    while connected.len() != rooms.len() {
        if frontier.is_empty() {
            return Resolution {
                viable: false,
                seed: Some(seed),
                connected,
                selected,
            };
        }

        let pass: Vec<usize> = frontier.iter().copied().collect();
        for room in pass {
            for (idx, adj) in adjacencies.iter().enumerate() {
                let (a, b) = adj.rooms;
                if !adj.touches(room) || (connected.contains(&a) && connected.contains(&b)) {
                    continue;
                }
                if adj.length() > door_size {
                    connected.extend([a, b]);
                    frontier.extend([a, b]);
                    selected.push(idx);
                }
            }
            frontier.remove(&room);
        }
    }

    Resolution {
        viable: true,
        seed: Some(seed),
        connected,
        selected,
    }
}
