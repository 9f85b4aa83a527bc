//! Arena of wall edges addressed by generation-tagged handles.
//!
//! Doorway carving removes walls and inserts their split halves while other
//! stages still hold handles. A handle to a removed wall never resolves to a
//! later wall that reuses its slot.

use crate::geometry::Edge;

/// Handle into an [`EdgeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    index: u32,
    generation: u32,
}

impl EdgeId {
    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    edge: Option<Edge>,
}

/// Slot arena with a free list. Iteration follows slot order.
#[derive(Debug, Clone, Default)]
pub struct EdgeArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl EdgeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Store an edge, reusing the most recently freed slot if there is one.
    pub fn insert(&mut self, edge: Edge) -> EdgeId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.edge = Some(edge);
            return EdgeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            edge: Some(edge),
        });
        EdgeId {
            index,
            generation: 0,
        }
    }

    /// Remove the edge behind `id`. Returns `None` for stale handles.
    pub fn remove(&mut self, id: EdgeId) -> Option<Edge> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        let edge = slot.edge.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(edge)
    }

    pub fn get(&self, id: EdgeId) -> Option<&Edge> {
        let slot = self.slots.get(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        slot.edge.as_ref()
    }

    pub fn contains(&self, id: EdgeId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live edges with their handles, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.slots.iter().zip(0u32..).filter_map(|(slot, index)| {
            slot.edge.as_ref().map(|edge| {
                (
                    EdgeId {
                        index,
                        generation: slot.generation,
                    },
                    edge,
                )
            })
        })
    }

    /// Consume the arena, keeping live edges in slot order.
    pub fn into_edges(self) -> Vec<Edge> {
        self.slots.into_iter().filter_map(|slot| slot.edge).collect()
    }
}

impl FromIterator<Edge> for EdgeArena {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        let mut arena = EdgeArena::new();
        for edge in iter {
            arena.insert(edge);
        }
        arena
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut arena = EdgeArena::new();
        let a = arena.insert(Edge::vertical(1.0, 0.0, 2.0));
        let b = arena.insert(Edge::horizontal(3.0, 0.0, 4.0));
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&Edge::vertical(1.0, 0.0, 2.0)));
        assert_eq!(arena.get(b).map(Edge::length), Some(4.0));
    }

    #[test]
    fn test_stale_handle_after_reuse() {
        let mut arena = EdgeArena::new();
        let a = arena.insert(Edge::vertical(1.0, 0.0, 2.0));
        assert!(arena.remove(a).is_some());
        let b = arena.insert(Edge::vertical(1.0, 0.0, 2.0));

        // Same slot, new generation: the old handle must not see the new edge
        assert_eq!(a.index(), b.index());
        assert_ne!(a.generation(), b.generation());
        assert!(arena.get(a).is_none());
        assert!(arena.remove(a).is_none());
        assert!(arena.contains(b));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_identical_edges_removed_independently() {
        let wall = Edge::vertical(5.0, 0.0, 5.0);
        let mut arena = EdgeArena::new();
        let first = arena.insert(wall);
        let second = arena.insert(wall);
        arena.remove(second);
        assert!(arena.contains(first));
        assert!(!arena.contains(second));
    }

    #[test]
    fn test_iteration_in_slot_order() {
        let mut arena: EdgeArena = (0..4)
            .map(|i| Edge::vertical(i as f64, 0.0, 1.0))
            .collect();
        let ids: Vec<_> = arena.iter().map(|(id, _)| id).collect();
        arena.remove(ids[1]);
        arena.insert(Edge::vertical(9.0, 0.0, 1.0));
        let xs: Vec<f64> = arena.into_edges().iter().map(|e| e.p0.x).collect();
        assert_eq!(xs, vec![0.0, 9.0, 2.0, 3.0]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut arena = EdgeArena::new();
        let id = arena.insert(Edge::vertical(0.0, 0.0, 1.0));
        let mut other = EdgeArena::new();
        assert!(other.remove(id).is_none());
        assert!(other.is_empty());
    }
}
