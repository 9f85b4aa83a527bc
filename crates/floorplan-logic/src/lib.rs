//! Procedural floor plan generation.
//!
//! This crate contains the whole generation pipeline as pure functions over
//! plain data: no I/O, no rendering backend, no global random state. Every
//! randomized operation takes the caller's RNG, so a seed reproduces a plan.
//!
//! # Pipeline
//!
//! 1. [`treemap`] partitions the square into weighted rooms
//! 2. [`adjacency`] finds the shared walls between rooms
//! 3. [`connectivity`] grows a doorway-connected set from the heaviest room
//! 4. [`generator`] retries 1–3 until viable or out of attempts
//! 5. [`doors`] splits each selected wall around a doorway gap
//! 6. [`perimeter`] closes the outer boundary
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`adjacency`] | O(n²) shared-wall scan between rooms |
//! | [`config`] | Generator parameters, defaults and validation |
//! | [`connectivity`] | Door-sized reachability search, seed selection |
//! | [`doors`] | Doorway carving and wall splitting |
//! | [`edges`] | Wall arena with generation-tagged handles |
//! | [`generator`] | Retry controller, finished `FloorPlan` |
//! | [`geometry`] | Points, rooms, walls, per-wall properties |
//! | [`perimeter`] | The four outer walls |
//! | [`render`] | Segment sink interface for drawing plans |
//! | [`spawn`] | Spawn point and point-goal sampling |
//! | [`treemap`] | Squarified treemap partitioning |
//! | [`validation`] | Structural checks over generated plans |

pub mod adjacency;
pub mod config;
pub mod connectivity;
pub mod doors;
pub mod edges;
pub mod generator;
pub mod geometry;
pub mod perimeter;
pub mod render;
pub mod spawn;
pub mod treemap;
pub mod validation;

pub use config::{ConfigError, GeneratorConfig};
pub use generator::{FloorPlan, FloorPlanGenerator};
pub use geometry::{Edge, Orientation, Point, Room};
