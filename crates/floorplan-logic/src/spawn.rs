//! Spawn point and point-goal sampling for downstream consumers.
//!
//! Rejection sampling with a fixed trial budget. Running out of trials is a
//! normal outcome and yields `None`.

use crate::generator::FloorPlan;
use crate::geometry::{Point, Room};
use rand::seq::index::sample;
use rand::Rng;

/// Trials per sampling request.
pub const SPAWN_TRIALS: usize = 100;

/// Uniform point in `[lo, hi]`, or `None` when the range is empty.
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> Option<f64> {
    (lo <= hi).then(|| rng.gen_range(lo..=hi))
}

/// A point strictly inside some room, at least `margin` from its walls.
pub fn random_spawn_location<R: Rng + ?Sized>(
    plan: &FloorPlan,
    margin: f64,
    rng: &mut R,
) -> Option<Point> {
    let size = plan.floor_plan_size;
    for _ in 0..SPAWN_TRIALS {
        let (Some(x), Some(y)) = (
            uniform(rng, margin, size - margin),
            uniform(rng, margin, size - margin),
        ) else {
            break;
        };
        let p = Point::new(x, y);
        if plan.rooms.iter().any(|room| room.contains_with_margin(p, margin)) {
            return Some(p);
        }
    }
    log::debug!("No spawn location found with margin {:.2}", margin);
    None
}

/// A point inside `room` shrunk by `margin`, not necessarily strictly inside.
fn point_in_room<R: Rng + ?Sized>(room: &Room, margin: f64, rng: &mut R) -> Option<Point> {
    let x = uniform(rng, room.x_min + margin, room.x_max - margin)?;
    let y = uniform(rng, room.y_min + margin, room.y_max - margin)?;
    Some(Point::new(x, y))
}

/// A start/goal pair at least `min_dist` apart.
///
/// With `other_room` and more than one room, the two points come from two
/// distinct rooms. Otherwise both are independent spawn locations.
pub fn random_point_goal<R: Rng + ?Sized>(
    plan: &FloorPlan,
    min_dist: f64,
    other_room: bool,
    margin: f64,
    rng: &mut R,
) -> Option<(Point, Point)> {
    if other_room && plan.rooms.len() > 1 {
        for _ in 0..SPAWN_TRIALS {
            let picked = sample(rng, plan.rooms.len(), 2);
            let (Some(start), Some(goal)) = (
                point_in_room(&plan.rooms[picked.index(0)], margin, rng),
                point_in_room(&plan.rooms[picked.index(1)], margin, rng),
            ) else {
                continue;
            };
            if start.distance(&goal) >= min_dist {
                return Some((start, goal));
            }
        }
    } else {
        for _ in 0..SPAWN_TRIALS {
            let (Some(start), Some(goal)) = (
                random_spawn_location(plan, margin, rng),
                random_spawn_location(plan, margin, rng),
            ) else {
                continue;
            };
            if start.distance(&goal) >= min_dist {
                return Some((start, goal));
            }
        }
    }
    log::debug!("No point-goal pair found at distance >= {:.2}", min_dist);
    None
}

impl FloorPlan {
    /// See [`random_spawn_location`].
    pub fn random_spawn_location<R: Rng + ?Sized>(&self, margin: f64, rng: &mut R) -> Option<Point> {
        random_spawn_location(self, margin, rng)
    }

    /// See [`random_point_goal`].
    pub fn random_point_goal<R: Rng + ?Sized>(
        &self,
        min_dist: f64,
        other_room: bool,
        margin: f64,
        rng: &mut R,
    ) -> Option<(Point, Point)> {
        random_point_goal(self, min_dist, other_room, margin, rng)
    }
}
