//! Area partitioning using a squarified treemap.
//!
//! Packs weighted rectangles into the bounding square, each with area
//! proportional to its weight, keeping aspect ratios close to 1.

use crate::config::GeneratorConfig;
use crate::geometry::Room;
use rand::Rng;

/// A rectangle placed by the treemap, in `{x, y, dx, dy}` form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRect {
    /// Position of the weight in the input slice.
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
}

/// The part of the bounding rectangle not yet covered by strips.
#[derive(Debug, Clone, Copy)]
struct FreeRect {
    x: f64,
    y: f64,
    dx: f64,
    dy: f64,
}

/// Draw a room program: a count in `[min_rooms, max_rooms]` and one weight
/// per room in `[1, room_size_ratio)`.
pub fn draw_room_weights<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Vec<f64> {
    let count = rng.gen_range(config.min_rooms..=config.max_rooms);
    (0..count)
        .map(|_| rng.gen_range(1.0..config.room_size_ratio))
        .collect()
}

/// Scale weights so they sum to `dx * dy`, preserving proportions.
pub fn normalize_sizes(sizes: &[f64], dx: f64, dy: f64) -> Vec<f64> {
    let total: f64 = sizes.iter().sum();
    if total <= 0.0 {
        return vec![0.0; sizes.len()];
    }
    let area = dx * dy;
    sizes.iter().map(|size| size * area / total).collect()
}

/// Lay out one strip along the shorter side of `free`.
fn layout_strip(sizes: &[(f64, usize)], free: FreeRect) -> Vec<LayoutRect> {
    let covered: f64 = sizes.iter().map(|(a, _)| *a).sum();
    let mut rects = Vec::with_capacity(sizes.len());
    if free.dx >= free.dy {
        // Column of width covered/dy, rooms stacked along y
        let width = covered / free.dy;
        let mut y = free.y;
        for (area, index) in sizes {
            let dy = area / width;
            rects.push(LayoutRect {
                index: *index,
                x: free.x,
                y,
                dx: width,
                dy,
            });
            y += dy;
        }
    } else {
        // Row of height covered/dx, rooms side by side along x
        let height = covered / free.dx;
        let mut x = free.x;
        for (area, index) in sizes {
            let dx = area / height;
            rects.push(LayoutRect {
                index: *index,
                x,
                y: free.y,
                dx,
                dy: height,
            });
            x += dx;
        }
    }
    rects
}

/// The free rectangle left after placing a strip holding `sizes`.
fn leftover(sizes: &[(f64, usize)], free: FreeRect) -> FreeRect {
    let covered: f64 = sizes.iter().map(|(a, _)| *a).sum();
    if free.dx >= free.dy {
        let width = covered / free.dy;
        FreeRect {
            x: free.x + width,
            y: free.y,
            dx: free.dx - width,
            dy: free.dy,
        }
    } else {
        let height = covered / free.dx;
        FreeRect {
            x: free.x,
            y: free.y + height,
            dx: free.dx,
            dy: free.dy - height,
        }
    }
}

/// Worst aspect ratio the strip would have if finalized now.
fn worst_ratio(sizes: &[(f64, usize)], free: FreeRect) -> f64 {
    layout_strip(sizes, free)
        .iter()
        .map(|r| (r.dx / r.dy).max(r.dy / r.dx))
        .fold(0.0, f64::max)
}

/// Squarified treemap over already-normalized areas.
///
/// Areas are processed in descending order; a strip keeps growing while its
/// worst aspect ratio does not get worse. Output is in input index order.
pub fn squarify(areas: &[f64], x: f64, y: f64, dx: f64, dy: f64) -> Vec<LayoutRect> {
    if areas.is_empty() {
        return Vec::new();
    }
    if areas.len() == 1 {
        return vec![LayoutRect {
            index: 0,
            x,
            y,
            dx,
            dy,
        }];
    }

    let mut order: Vec<(f64, usize)> = areas.iter().copied().zip(0..).collect();
    // Stable: equal areas keep input order
    order.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut result = Vec::with_capacity(areas.len());
    let mut free = FreeRect { x, y, dx, dy };
    let mut remaining = &order[..];

    while !remaining.is_empty() {
        if remaining.len() == 1 {
            result.extend(layout_strip(remaining, free));
            break;
        }

        let mut count = 1;
        while count < remaining.len()
            && worst_ratio(&remaining[..count], free) >= worst_ratio(&remaining[..=count], free)
        {
            count += 1;
        }

        let (strip, rest) = remaining.split_at(count);
        result.extend(layout_strip(strip, free));
        free = leftover(strip, free);
        remaining = rest;
    }

    result.sort_by_key(|r| r.index);
    result
}

/// Partition the `size × size` square into one room per weight.
/// Room `i` has area proportional to `weights[i]`.
pub fn partition(weights: &[f64], size: f64) -> Vec<Room> {
    let values = normalize_sizes(weights, size, size);
    squarify(&values, 0.0, 0.0, size, size)
        .into_iter()
        .map(|r| Room {
            x_min: r.x,
            y_min: r.y,
            x_max: r.x + r.dx,
            y_max: r.y + r.dy,
            weight: values[r.index],
        })
        .collect()
}
