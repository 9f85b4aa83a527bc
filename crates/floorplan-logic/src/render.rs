//! Drawing interface. The crate ships no graphics backend; callers plug in
//! whatever canvas they have and receive every wall as a line segment.

use crate::geometry::Point;

/// A sink for wall segments.
pub trait PlanRenderer {
    fn draw_segment(&mut self, from: Point, to: Point);

    /// Called once after the last segment.
    fn finish(&mut self) {}
}

/// Collects segments in draw order.
impl PlanRenderer for Vec<(Point, Point)> {
    fn draw_segment(&mut self, from: Point, to: Point) {
        self.push((from, to));
    }
}
