//! Structural validation for generated floor plans.
//!
//! Pure functions that take rooms, walls and doorways and return validation
//! errors. Used by the test suites and the headless harness.

use crate::connectivity::seed_room;
use crate::doors::Doorway;
use crate::generator::FloorPlan;
use crate::geometry::{Adjacency, Edge, Orientation, Room};
use std::collections::{HashMap, HashSet, VecDeque};

/// Relative tolerance for area and bounds comparisons.
pub const AREA_TOLERANCE: f64 = 1e-9;

/// A validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

// ── A. Rooms ────────────────────────────────────────────────────────────

/// Check that no room has zero or negative dimensions.
pub fn check_room_dimensions(rooms: &[Room]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (id, r) in rooms.iter().enumerate() {
        if r.width() <= 0.0 || r.height() <= 0.0 {
            errors.push(ValidationError {
                category: "room_geometry",
                severity: Severity::Error,
                message: format!(
                    "Room #{} has non-positive dimensions: {}×{}",
                    id,
                    r.width(),
                    r.height()
                ),
            });
        }
    }
    errors
}

/// Flag sliver rooms (aspect ratio above 10:1). Slivers are legal.
pub fn check_room_aspect_ratios(rooms: &[Room]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (id, r) in rooms.iter().enumerate() {
        if r.width() <= 0.0 || r.height() <= 0.0 {
            continue; // caught by dimension check
        }
        let ratio = (r.width() / r.height()).max(r.height() / r.width());
        if ratio > 10.0 {
            errors.push(ValidationError {
                category: "room_geometry",
                severity: Severity::Warning,
                message: format!(
                    "Room #{} has extreme aspect ratio {:.1}:1 ({:.2}×{:.2})",
                    id,
                    ratio,
                    r.width(),
                    r.height()
                ),
            });
        }
    }
    errors
}

/// Check rooms stay inside the bounding square.
pub fn check_rooms_within_bounds(rooms: &[Room], size: f64) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let tol = size * AREA_TOLERANCE;
    for (id, r) in rooms.iter().enumerate() {
        if r.x_min < -tol || r.y_min < -tol || r.x_max > size + tol || r.y_max > size + tol {
            errors.push(ValidationError {
                category: "room_geometry",
                severity: Severity::Error,
                message: format!(
                    "Room #{} extends outside the plan: ({:.3},{:.3})→({:.3},{:.3}) vs {}×{}",
                    id, r.x_min, r.y_min, r.x_max, r.y_max, size, size
                ),
            });
        }
    }
    errors
}

/// Check no two room interiors overlap. Touching walls are fine.
pub fn check_room_overlaps(rooms: &[Room]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let tol = 1e-9;
    for i in 0..rooms.len() {
        for j in (i + 1)..rooms.len() {
            let a = &rooms[i];
            let b = &rooms[j];
            let overlap_x = (a.x_max - tol) > b.x_min && (b.x_max - tol) > a.x_min;
            let overlap_y = (a.y_max - tol) > b.y_min && (b.y_max - tol) > a.y_min;
            if overlap_x && overlap_y {
                errors.push(ValidationError {
                    category: "room_overlap",
                    severity: Severity::Error,
                    message: format!("Rooms #{} and #{} overlap", i, j),
                });
            }
        }
    }
    errors
}

/// Check room areas add up to the bounding square.
pub fn check_tiling_area(rooms: &[Room], size: f64) -> Vec<ValidationError> {
    let total: f64 = rooms.iter().map(Room::area).sum();
    let expected = size * size;
    if (total - expected).abs() > expected * AREA_TOLERANCE {
        return vec![ValidationError {
            category: "tiling",
            severity: Severity::Error,
            message: format!(
                "Room areas sum to {:.9}, expected {:.9}",
                total, expected
            ),
        }];
    }
    Vec::new()
}

// ── B. Walls ────────────────────────────────────────────────────────────

/// Check every wall is axis-aligned with a non-negative length (within tolerance).
pub fn check_edges_axis_aligned(edges: &[Edge]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (id, e) in edges.iter().enumerate() {
        let aligned = match e.orientation {
            Orientation::Vertical => e.p0.x == e.p1.x,
            Orientation::Horizontal => e.p0.y == e.p1.y,
        };
        if !aligned {
            errors.push(ValidationError {
                category: "wall_geometry",
                severity: Severity::Error,
                message: format!("Wall #{} is not {:?}", id, e.orientation),
            });
        }
        if e.length() < -AREA_TOLERANCE {
            errors.push(ValidationError {
                category: "wall_geometry",
                severity: Severity::Error,
                message: format!("Wall #{} has negative length {}", id, e.length()),
            });
        }
    }
    errors
}

/// Check each shared wall lies on the outline of both of its rooms.
pub fn check_adjacency_on_boundaries(
    rooms: &[Room],
    adjacencies: &[Adjacency],
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for adj in adjacencies {
        let (a, b) = adj.rooms;
        let (Some(ra), Some(rb)) = (rooms.get(a), rooms.get(b)) else {
            errors.push(ValidationError {
                category: "adjacency",
                severity: Severity::Error,
                message: format!("Shared wall references missing room pair ({}, {})", a, b),
            });
            continue;
        };
        let on_both = [adj.edge.p0, adj.edge.p1]
            .iter()
            .all(|&p| ra.on_boundary(p) && rb.on_boundary(p));
        if !on_both || adj.length() <= 0.0 {
            errors.push(ValidationError {
                category: "adjacency",
                severity: Severity::Error,
                message: format!(
                    "Shared wall between #{} and #{} is not on both outlines (length {:.3})",
                    a,
                    b,
                    adj.length()
                ),
            });
        }
    }
    errors
}

// ── C. Connectivity ─────────────────────────────────────────────────────

/// Check every room is reachable from the seed room through doorways.
pub fn check_doorway_connectivity(rooms: &[Room], doorways: &[Doorway]) -> Vec<ValidationError> {
    let Some(start) = seed_room(rooms) else {
        return Vec::new();
    };

    let mut adj: HashMap<usize, Vec<usize>> = HashMap::new();
    for d in doorways {
        adj.entry(d.rooms.0).or_default().push(d.rooms.1);
        adj.entry(d.rooms.1).or_default().push(d.rooms.0);
    }

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if let Some(neighbors) = adj.get(&current) {
            for &next in neighbors {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }

    let unreached: Vec<usize> = (0..rooms.len()).filter(|r| !visited.contains(r)).collect();
    if unreached.is_empty() {
        return Vec::new();
    }
    vec![ValidationError {
        category: "connectivity",
        severity: Severity::Error,
        message: format!(
            "{} of {} rooms unreachable through doorways (e.g. room #{})",
            unreached.len(),
            rooms.len(),
            unreached[0]
        ),
    }]
}

// ── Master validation ───────────────────────────────────────────────────

/// Run every check. Connectivity is only checked for plans marked viable.
pub fn validate_plan(plan: &FloorPlan, adjacencies: &[Adjacency]) -> Vec<ValidationError> {
    let mut all = Vec::new();
    all.extend(check_room_dimensions(&plan.rooms));
    all.extend(check_room_aspect_ratios(&plan.rooms));
    all.extend(check_rooms_within_bounds(&plan.rooms, plan.floor_plan_size));
    all.extend(check_room_overlaps(&plan.rooms));
    all.extend(check_tiling_area(&plan.rooms, plan.floor_plan_size));
    all.extend(check_edges_axis_aligned(&plan.edges));
    all.extend(check_adjacency_on_boundaries(&plan.rooms, adjacencies));
    if plan.viable {
        all.extend(check_doorway_connectivity(&plan.rooms, &plan.doorways));
    }
    all
}

/// Only the `Error`-severity entries.
pub fn errors_only(results: &[ValidationError]) -> Vec<&ValidationError> {
    results
        .iter()
        .filter(|e| e.severity == Severity::Error)
        .collect()
}
