//! Generation controller: partition, wall extraction, connectivity, retry.
//!
//! Each attempt draws a fresh room program and runs
//! `Reset → Partitioned → AdjacencyBuilt → Resolved`. The first viable
//! attempt wins. When every attempt fails the last one is still finished
//! (doors carved, perimeter closed) and returned with `viable == false`, so
//! callers always get a plottable plan.
//!
//! ```
//! use floorplan_logic::config::GeneratorConfig;
//! use floorplan_logic::generator::FloorPlanGenerator;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut generator = FloorPlanGenerator::new(GeneratorConfig::default()).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//! let plan = generator.generate(&mut rng);
//! assert!(plan.edges.len() >= 4);
//! assert_eq!(plan.viable, generator.viable());
//! ```

use crate::adjacency::extract_adjacencies;
use crate::config::{ConfigError, GeneratorConfig};
use crate::connectivity::{resolve, Resolution};
use crate::doors::{carve_doorways, DoorRequest, Doorway};
use crate::edges::EdgeArena;
use crate::geometry::{Adjacency, Edge, EdgeProperties, Room};
use crate::perimeter::add_perimeter;
use crate::render::PlanRenderer;
use crate::treemap::{draw_room_weights, partition};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of a single generation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStage {
    Reset,
    Partitioned,
    AdjacencyBuilt,
    Resolved { viable: bool },
}

impl fmt::Display for AttemptStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptStage::Reset => write!(f, "reset"),
            AttemptStage::Partitioned => write!(f, "partitioned"),
            AttemptStage::AdjacencyBuilt => write!(f, "adjacency built"),
            AttemptStage::Resolved { viable: true } => write!(f, "resolved (viable)"),
            AttemptStage::Resolved { viable: false } => write!(f, "resolved (not viable)"),
        }
    }
}

/// Everything one attempt produced before doors are carved.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub rooms: Vec<Room>,
    pub adjacencies: Vec<Adjacency>,
    pub resolution: Resolution,
}

impl Attempt {
    /// Run partition → extract → resolve on a fixed room program.
    pub fn run(weights: &[f64], floor_plan_size: f64, door_size: f64) -> Self {
        let rooms = partition(weights, floor_plan_size);
        log::trace!("{}: {} rooms", AttemptStage::Partitioned, rooms.len());
        let adjacencies = extract_adjacencies(&rooms);
        log::trace!("{}: {} shared walls", AttemptStage::AdjacencyBuilt, adjacencies.len());
        let resolution = resolve(&rooms, &adjacencies, door_size);
        Self {
            rooms,
            adjacencies,
            resolution,
        }
    }

    pub fn stage(&self) -> AttemptStage {
        AttemptStage::Resolved {
            viable: self.resolution.viable,
        }
    }
}

/// A finished floor plan, owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    pub floor_plan_size: f64,
    pub rooms: Vec<Room>,
    /// Solid walls, split door walls, then the four perimeter walls.
    pub edges: Vec<Edge>,
    pub doorways: Vec<Doorway>,
    /// True when every room is reachable through doorways.
    pub viable: bool,
    /// Number of partition attempts used.
    pub attempts: u32,
}

impl FloorPlan {
    /// Per-wall midpoint, orientation and length, in `edges` order.
    pub fn edge_properties(&self) -> EdgeProperties {
        EdgeProperties::from_edges(&self.edges)
    }

    /// Draw every wall as a line segment.
    pub fn render<P: PlanRenderer + ?Sized>(&self, renderer: &mut P) {
        for edge in &self.edges {
            renderer.draw_segment(edge.p0, edge.p1);
        }
        renderer.finish();
    }
}

/// Randomized floor plan generator with bounded retry.
#[derive(Debug, Clone)]
pub struct FloorPlanGenerator {
    config: GeneratorConfig,
    viable: bool,
    attempts_used: u32,
}

impl FloorPlanGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            viable: false,
            attempts_used: 0,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Whether the most recent `generate` reached every room.
    pub fn viable(&self) -> bool {
        self.viable
    }

    /// Attempts used by the most recent `generate`.
    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    /// Run the full retry pipeline and finish the resulting plan.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> FloorPlan {
        let mut attempt_no = 0;
        let attempt = loop {
            attempt_no += 1;
            let weights = draw_room_weights(&self.config, rng);
            log::trace!("{}: attempt {} with {} rooms", AttemptStage::Reset, attempt_no, weights.len());

            let attempt = Attempt::run(&weights, self.config.floor_plan_size, self.config.door_size);
            log::debug!(
                "Attempt {}/{}: {} rooms, {} shared walls, {}",
                attempt_no,
                self.config.max_iteration,
                attempt.rooms.len(),
                attempt.adjacencies.len(),
                attempt.stage()
            );

            if attempt.resolution.viable || attempt_no >= self.config.max_iteration {
                break attempt;
            }
        };

        if !attempt.resolution.viable {
            log::warn!(
                "Unable to find a viable floor plan after {} attempts; returning a disconnected plan",
                attempt_no
            );
        }

        let plan = self.finish(attempt, attempt_no, rng);
        self.viable = plan.viable;
        self.attempts_used = plan.attempts;
        plan
    }

    /// Single attempt on a supplied room program, no retry.
    pub fn generate_from_weights<R: Rng + ?Sized>(&mut self, weights: &[f64], rng: &mut R) -> FloorPlan {
        let attempt = Attempt::run(weights, self.config.floor_plan_size, self.config.door_size);
        if !attempt.resolution.viable {
            log::warn!("Room program of {} rooms has no viable doorway layout", weights.len());
        }
        let plan = self.finish(attempt, 1, rng);
        self.viable = plan.viable;
        self.attempts_used = 1;
        plan
    }

    /// Carve doors into the selected walls and close the perimeter.
    fn finish<R: Rng + ?Sized>(&self, attempt: Attempt, attempts: u32, rng: &mut R) -> FloorPlan {
        let Attempt {
            rooms,
            adjacencies,
            resolution,
        } = attempt;

        let mut arena = EdgeArena::with_capacity(adjacencies.len() + resolution.selected.len() + 4);
        let ids: Vec<_> = adjacencies.iter().map(|adj| arena.insert(adj.edge)).collect();
        let requests: Vec<DoorRequest> = resolution
            .selected
            .iter()
            .map(|&idx| DoorRequest {
                edge: ids[idx],
                rooms: adjacencies[idx].rooms,
            })
            .collect();

        let doorways = carve_doorways(&mut arena, &requests, self.config.door_size, rng);
        add_perimeter(&mut arena, self.config.floor_plan_size);
        let edges = arena.into_edges();

        if resolution.viable {
            log::info!(
                "Generated floor plan: {} rooms, {} walls, {} doorways in {} attempt(s)",
                rooms.len(),
                edges.len(),
                doorways.len(),
                attempts
            );
        }

        FloorPlan {
            floor_plan_size: self.config.floor_plan_size,
            rooms,
            edges,
            doorways,
            viable: resolution.viable,
            attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Orientation;
    use log::Level;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    mod capture {
        use log::{Level, LevelFilter, Log, Metadata, Record};
        use std::cell::RefCell;
        use std::sync::Once;

        thread_local! {
            static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
        }

        // Records per thread so parallel tests don't see each other's output
        struct ThreadCapture;

        impl Log for ThreadCapture {
            fn enabled(&self, _: &Metadata) -> bool {
                true
            }

            fn log(&self, record: &Record) {
                RECORDS.with(|r| r.borrow_mut().push((record.level(), record.args().to_string())));
            }

            fn flush(&self) {}
        }

        static LOGGER: ThreadCapture = ThreadCapture;
        static INIT: Once = Once::new();

        /// Run `f` and return the records it logged on this thread.
        pub fn logged<T>(f: impl FnOnce() -> T) -> (T, Vec<(Level, String)>) {
            INIT.call_once(|| {
                if log::set_logger(&LOGGER).is_ok() {
                    log::set_max_level(LevelFilter::Trace);
                }
            });
            RECORDS.with(|r| r.borrow_mut().clear());
            let out = f();
            let records = RECORDS.with(|r| r.borrow_mut().drain(..).collect());
            (out, records)
        }
    }

    fn warnings(records: &[(Level, String)]) -> Vec<&str> {
        records
            .iter()
            .filter(|(level, _)| *level == Level::Warn)
            .map(|(_, msg)| msg.as_str())
            .collect()
    }

    fn four_room_config() -> GeneratorConfig {
        GeneratorConfig {
            floor_plan_size: 10.0,
            min_rooms: 4,
            max_rooms: 4,
            door_size: 1.5,
            room_size_ratio: 4.0,
            max_iteration: 5,
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GeneratorConfig {
            max_iteration: 0,
            ..Default::default()
        };
        assert!(FloorPlanGenerator::new(config).is_err());
    }

    #[test]
    fn test_single_room_is_only_perimeter() {
        let config = GeneratorConfig {
            min_rooms: 1,
            max_rooms: 1,
            ..Default::default()
        };
        let mut generator = FloorPlanGenerator::new(config).unwrap();
        let plan = generator.generate(&mut StdRng::seed_from_u64(0));
        assert!(plan.viable);
        assert!(generator.viable());
        assert_eq!(plan.attempts, 1);
        assert_eq!(plan.edges.len(), 4);
        assert!(plan.doorways.is_empty());
        assert!(plan.edges.iter().all(|e| e.length() == 10.0));
    }

    #[test]
    fn test_edge_count_matches_walls_plus_doors_plus_perimeter() {
        let mut generator = FloorPlanGenerator::new(four_room_config()).unwrap();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = generator.generate(&mut rng);
            let walls = extract_adjacencies(&plan.rooms).len();
            assert_eq!(
                plan.edges.len(),
                walls + plan.doorways.len() + 4,
                "seed {}",
                seed
            );
            assert_eq!(plan.rooms.len(), 4);
        }
    }

    #[test]
    fn test_viable_plan_has_spanning_doorways() {
        let mut generator = FloorPlanGenerator::new(four_room_config()).unwrap();
        let plan = generator.generate(&mut StdRng::seed_from_u64(11));
        if plan.viable {
            assert_eq!(plan.doorways.len(), plan.rooms.len() - 1);
        }
    }

    #[test]
    fn test_same_seed_same_plan() {
        let mut generator = FloorPlanGenerator::new(GeneratorConfig::default()).unwrap();
        let a = generator.generate(&mut StdRng::seed_from_u64(99));
        let b = generator.generate(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_perimeter_is_last() {
        let mut generator = FloorPlanGenerator::new(GeneratorConfig::default()).unwrap();
        let plan = generator.generate(&mut StdRng::seed_from_u64(5));
        let tail = &plan.edges[plan.edges.len() - 4..];
        assert_eq!(tail, &crate::perimeter::perimeter_edges(10.0)[..]);
    }

    #[test]
    fn test_unreachable_program_exhausts_retries() {
        // Door wider than any wall: nothing can connect
        let config = GeneratorConfig {
            door_size: 50.0,
            min_rooms: 3,
            max_rooms: 3,
            max_iteration: 3,
            ..Default::default()
        };
        let mut generator = FloorPlanGenerator::new(config).unwrap();
        let plan = generator.generate(&mut StdRng::seed_from_u64(3));
        assert!(!plan.viable);
        assert!(!generator.viable());
        assert_eq!(plan.attempts, 3);
        assert_eq!(generator.attempts_used(), 3);
        // Still a best-effort plan: solid walls and perimeter
        assert!(plan.doorways.is_empty());
        assert_eq!(plan.edges.len(), extract_adjacencies(&plan.rooms).len() + 4);
    }

    #[test]
    fn test_exhaustion_warns_once_with_attempt_count() {
        let config = GeneratorConfig {
            door_size: 50.0,
            min_rooms: 3,
            max_rooms: 3,
            max_iteration: 3,
            ..Default::default()
        };
        let mut generator = FloorPlanGenerator::new(config).unwrap();
        let (plan, records) = capture::logged(|| generator.generate(&mut StdRng::seed_from_u64(3)));
        assert!(!plan.viable);

        let warns = warnings(&records);
        assert_eq!(warns.len(), 1, "{:?}", warns);
        assert!(warns[0].contains("after 3 attempts"), "{}", warns[0]);
    }

    #[test]
    fn test_viable_run_does_not_warn() {
        let mut generator = FloorPlanGenerator::new(four_room_config()).unwrap();
        let mut checked = 0;
        for seed in 0..20 {
            let (plan, records) = capture::logged(|| generator.generate(&mut StdRng::seed_from_u64(seed)));
            if plan.viable {
                checked += 1;
                assert!(warnings(&records).is_empty(), "seed {}: {:?}", seed, warnings(&records));
            }
        }
        assert!(checked > 0);

        let (plan, records) =
            capture::logged(|| generator.generate_from_weights(&[1.0, 1.0], &mut StdRng::seed_from_u64(4)));
        assert!(plan.viable);
        assert!(warnings(&records).is_empty());
    }

    #[test]
    fn test_attempts_stay_within_budget() {
        let mut generator = FloorPlanGenerator::new(four_room_config()).unwrap();
        for seed in 0..50 {
            let plan = generator.generate(&mut StdRng::seed_from_u64(seed));
            assert!((1..=5).contains(&plan.attempts), "seed {}: {}", seed, plan.attempts);
            if !plan.viable {
                assert_eq!(plan.attempts, 5, "seed {}", seed);
            }
        }
    }

    #[test]
    fn test_single_attempt_budget() {
        let config = GeneratorConfig {
            max_iteration: 1,
            ..Default::default()
        };
        let mut generator = FloorPlanGenerator::new(config).unwrap();
        for seed in 0..20 {
            let plan = generator.generate(&mut StdRng::seed_from_u64(seed));
            assert_eq!(plan.attempts, 1);
            assert_eq!(generator.attempts_used(), 1);
        }
    }

    #[test]
    fn test_generate_from_weights() {
        let mut generator = FloorPlanGenerator::new(GeneratorConfig::default()).unwrap();
        let plan = generator.generate_from_weights(&[1.0, 1.0], &mut StdRng::seed_from_u64(8));
        assert!(plan.viable);
        assert_eq!(plan.doorways.len(), 1);
        // One wall split in two, plus perimeter
        assert_eq!(plan.edges.len(), 2 + 4);
        assert_eq!(plan.doorways[0].orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_edge_properties_follow_edges() {
        let mut generator = FloorPlanGenerator::new(GeneratorConfig::default()).unwrap();
        let plan = generator.generate(&mut StdRng::seed_from_u64(21));
        let props = plan.edge_properties();
        assert_eq!(props.len(), plan.edges.len());
        for (i, edge) in plan.edges.iter().enumerate() {
            assert_eq!(props.centers[i], edge.midpoint());
            assert_eq!(props.lengths[i], edge.length());
        }
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(AttemptStage::Resolved { viable: false }.to_string(), "resolved (not viable)");
        assert_eq!(AttemptStage::AdjacencyBuilt.to_string(), "adjacency built");
    }
}
