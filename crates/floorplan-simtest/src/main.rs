//! Floor Plan Headless Validation Harness
//!
//! Runs the generator across seeds and presets and checks the structural
//! invariants of every plan. Runs entirely in-process: no rendering backend,
//! no files written.
//!
//! Usage:
//!   cargo run -p floorplan-simtest
//!   cargo run -p floorplan-simtest -- --verbose
//!   cargo run -p floorplan-simtest -- --draw

use floorplan_logic::adjacency::extract_adjacencies;
use floorplan_logic::geometry::Point;
use floorplan_logic::render::PlanRenderer;
use floorplan_logic::validation::{errors_only, validate_plan};
use floorplan_logic::{ConfigError, FloorPlan, FloorPlanGenerator, GeneratorConfig};
use log::LevelFilter;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

// ── Presets (shared with docs and tests) ────────────────────────────────
const PRESETS_JSON: &str = include_str!("../../../data/presets.json");

const SEEDS_PER_PRESET: u64 = 200;

#[derive(Debug, Deserialize)]
struct Preset {
    name: String,
    min_viable_rate: f64,
    config: GeneratorConfig,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let draw = std::env::args().any(|a| a == "--draw");

    env_logger::Builder::new()
        .filter_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .format_timestamp(None)
        .init();

    println!("=== Floor Plan Generation Harness ===\n");

    let mut results = Vec::new();

    // 1. Preset parsing
    let presets = match load_presets() {
        Ok(presets) => {
            results.push(TestResult {
                name: "presets_parse".into(),
                passed: !presets.is_empty(),
                detail: format!("{} presets loaded", presets.len()),
            });
            presets
        }
        Err(e) => {
            results.push(TestResult {
                name: "presets_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            Vec::new()
        }
    };

    // 2. Config validation
    results.extend(validate_config_rules());

    // 3. Generation sweep per preset
    for preset in &presets {
        results.extend(validate_preset(preset, verbose));
    }

    // 4. Spawn sampling
    results.extend(validate_spawn_sampling());

    // 5. Reproducibility
    results.extend(validate_reproducibility());

    if draw {
        draw_sample_plan();
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn load_presets() -> Result<Vec<Preset>, serde_json::Error> {
    serde_json::from_str(PRESETS_JSON)
}

// ── 2. Config rules ─────────────────────────────────────────────────────

fn validate_config_rules() -> Vec<TestResult> {
    println!("--- Config Validation ---");
    let mut results = Vec::new();

    let cases: [(&str, GeneratorConfig, fn(&ConfigError) -> bool); 4] = [
        (
            "config_rejects_zero_size",
            GeneratorConfig {
                floor_plan_size: 0.0,
                ..Default::default()
            },
            |e| matches!(e, ConfigError::FloorPlanSize(_)),
        ),
        (
            "config_rejects_inverted_range",
            GeneratorConfig {
                min_rooms: 5,
                max_rooms: 2,
                ..Default::default()
            },
            |e| matches!(e, ConfigError::RoomRange { .. }),
        ),
        (
            "config_rejects_ratio_one",
            GeneratorConfig {
                room_size_ratio: 1.0,
                ..Default::default()
            },
            |e| matches!(e, ConfigError::RoomSizeRatio(_)),
        ),
        (
            "config_rejects_zero_iterations",
            GeneratorConfig {
                max_iteration: 0,
                ..Default::default()
            },
            |e| matches!(e, ConfigError::NoIterations),
        ),
    ];

    for (name, config, expected) in cases {
        let outcome = FloorPlanGenerator::new(config);
        let (passed, detail) = match &outcome {
            Ok(_) => (false, "accepted an invalid config".to_string()),
            Err(e) => (expected(e), e.to_string()),
        };
        results.push(TestResult {
            name: name.into(),
            passed,
            detail,
        });
    }

    results.push(TestResult {
        name: "config_default_valid".into(),
        passed: FloorPlanGenerator::new(GeneratorConfig::default()).is_ok(),
        detail: "default config accepted".into(),
    });

    results
}

// ── 3. Generation sweep ─────────────────────────────────────────────────

fn validate_preset(preset: &Preset, verbose: bool) -> Vec<TestResult> {
    println!("--- Preset: {} ---", preset.name);
    let mut results = Vec::new();

    let mut generator = match FloorPlanGenerator::new(preset.config.clone()) {
        Ok(g) => g,
        Err(e) => {
            results.push(TestResult {
                name: format!("{}_config", preset.name),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    let mut viable = 0u64;
    let mut total_attempts = 0u64;
    let mut validation_failures = Vec::new();
    let mut count_mismatches = Vec::new();
    let mut perimeter_failures = Vec::new();
    let mut door_count_failures = Vec::new();

    for seed in 0..SEEDS_PER_PRESET {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let plan = generator.generate(&mut rng);
        total_attempts += plan.attempts as u64;
        if plan.viable {
            viable += 1;
        }

        let adjacencies = extract_adjacencies(&plan.rooms);
        let report = validate_plan(&plan, &adjacencies);
        if !errors_only(&report).is_empty() {
            validation_failures.push(seed);
            if verbose {
                for e in errors_only(&report) {
                    println!("    seed {} [{}] {}", seed, e.category, e.message);
                }
            }
        }

        if plan.edges.len() != adjacencies.len() + plan.doorways.len() + 4 {
            count_mismatches.push(seed);
        }

        let size = preset.config.floor_plan_size;
        let tail = &plan.edges[plan.edges.len().saturating_sub(4)..];
        if tail.len() != 4 || tail.iter().any(|e| e.length() != size) {
            perimeter_failures.push(seed);
        }

        if plan.viable && plan.doorways.len() + 1 != plan.rooms.len() {
            door_count_failures.push(seed);
        }
    }

    let rate = viable as f64 / SEEDS_PER_PRESET as f64;
    results.push(TestResult {
        name: format!("{}_viability", preset.name),
        passed: rate >= preset.min_viable_rate,
        detail: format!(
            "{}/{} viable ({:.1}%), avg {:.2} attempts, floor {:.0}%",
            viable,
            SEEDS_PER_PRESET,
            rate * 100.0,
            total_attempts as f64 / SEEDS_PER_PRESET as f64,
            preset.min_viable_rate * 100.0
        ),
    });

    results.push(seed_check(
        format!("{}_structure", preset.name),
        &validation_failures,
        "all plans pass structural validation",
    ));
    results.push(seed_check(
        format!("{}_edge_count", preset.name),
        &count_mismatches,
        "edges = walls + doorways + 4",
    ));
    results.push(seed_check(
        format!("{}_perimeter", preset.name),
        &perimeter_failures,
        "last four edges are the full-length perimeter",
    ));
    results.push(seed_check(
        format!("{}_spanning_doors", preset.name),
        &door_count_failures,
        "viable plans have rooms - 1 doorways",
    ));

    results
}

fn seed_check(name: String, failures: &[u64], ok_detail: &str) -> TestResult {
    TestResult {
        name,
        passed: failures.is_empty(),
        detail: if failures.is_empty() {
            ok_detail.into()
        } else {
            format!(
                "{} seeds failed (e.g. seed {})",
                failures.len(),
                failures[0]
            )
        },
    }
}

// ── 4. Spawn sampling ───────────────────────────────────────────────────

fn validate_spawn_sampling() -> Vec<TestResult> {
    println!("--- Spawn Sampling ---");
    let mut results = Vec::new();

    let single = GeneratorConfig {
        min_rooms: 1,
        max_rooms: 1,
        ..Default::default()
    };
    let plan = match FloorPlanGenerator::new(single) {
        Ok(mut g) => g.generate(&mut ChaCha8Rng::seed_from_u64(0)),
        Err(e) => {
            results.push(TestResult {
                name: "spawn_setup".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let samples: Vec<Option<Point>> = (0..500)
        .map(|_| plan.random_spawn_location(1.0, &mut rng))
        .collect();
    let inside = samples
        .iter()
        .flatten()
        .all(|p| p.x > 1.0 && p.x < 9.0 && p.y > 1.0 && p.y < 9.0);
    results.push(TestResult {
        name: "spawn_margin_single_room".into(),
        passed: samples.iter().all(Option::is_some) && inside,
        detail: "500 spawns inside (1, 9)²".into(),
    });

    results.push(TestResult {
        name: "spawn_impossible_margin".into(),
        passed: plan.random_spawn_location(5.0, &mut rng).is_none(),
        detail: "margin 5 in a 10×10 room → None".into(),
    });

    let far = plan.random_point_goal(3.0, true, 1.0, &mut rng);
    results.push(TestResult {
        name: "point_goal_single_room".into(),
        passed: far.is_some_and(|(a, b)| a.distance(&b) >= 3.0),
        detail: "single room falls back to spawn sampling".into(),
    });

    results.push(TestResult {
        name: "point_goal_unreachable".into(),
        passed: plan.random_point_goal(50.0, false, 1.0, &mut rng).is_none(),
        detail: "distance larger than the plan → None".into(),
    });

    results
}

// ── 5. Reproducibility ──────────────────────────────────────────────────

fn validate_reproducibility() -> Vec<TestResult> {
    println!("--- Reproducibility ---");
    let mut results = Vec::new();

    let Ok(mut generator) = FloorPlanGenerator::new(GeneratorConfig::default()) else {
        return results;
    };
    let a = generator.generate(&mut ChaCha8Rng::seed_from_u64(1234));
    let b = generator.generate(&mut ChaCha8Rng::seed_from_u64(1234));
    let c = generator.generate(&mut ChaCha8Rng::seed_from_u64(4321));

    results.push(TestResult {
        name: "same_seed_same_plan".into(),
        passed: a == b,
        detail: format!("{} edges, {} doorways", a.edges.len(), a.doorways.len()),
    });
    results.push(TestResult {
        name: "different_seed_different_plan".into(),
        passed: a != c,
        detail: "seeds 1234 and 4321 differ".into(),
    });

    results
}

// ── ASCII drawing ───────────────────────────────────────────────────────

/// Rasterizes wall segments onto a character grid.
struct AsciiCanvas {
    cols: usize,
    rows: usize,
    scale: f64,
    cells: Vec<Vec<char>>,
}

impl AsciiCanvas {
    fn new(size: f64, cols: usize) -> Self {
        let rows = cols / 2;
        Self {
            cols,
            rows,
            scale: size,
            cells: vec![vec![' '; cols + 1]; rows + 1],
        }
    }

    fn to_cell(&self, p: Point) -> (usize, usize) {
        let c = (p.x / self.scale * self.cols as f64).round() as usize;
        // Row 0 is the top of the plan
        let r = self.rows - (p.y / self.scale * self.rows as f64).round() as usize;
        (c.min(self.cols), r.min(self.rows))
    }
}

impl PlanRenderer for AsciiCanvas {
    fn draw_segment(&mut self, from: Point, to: Point) {
        let (c0, r0) = self.to_cell(from);
        let (c1, r1) = self.to_cell(to);
        if c0 == c1 {
            for r in r0.min(r1)..=r0.max(r1) {
                self.cells[r][c0] = '|';
            }
        } else {
            for c in c0.min(c1)..=c0.max(c1) {
                self.cells[r0][c] = '-';
            }
        }
    }

    fn finish(&mut self) {
        for row in &self.cells {
            println!("    {}", row.iter().collect::<String>());
        }
    }
}

fn draw_sample_plan() {
    println!("--- Sample Plan ---");
    let Ok(mut generator) = FloorPlanGenerator::new(GeneratorConfig::default()) else {
        return;
    };
    let plan: FloorPlan = generator.generate(&mut ChaCha8Rng::seed_from_u64(7));
    println!(
        "    {} rooms, {} walls, {} doorways, viable = {}",
        plan.rooms.len(),
        plan.edges.len(),
        plan.doorways.len(),
        plan.viable
    );
    let mut canvas = AsciiCanvas::new(plan.floor_plan_size, 60);
    plan.render(&mut canvas);
}
