//! Plain geometry types shared by every stage of the pipeline.
//!
//! Rooms are axis-aligned rectangles in floor-plan units; walls are
//! axis-aligned segments. No database or rendering dependency.

use serde::{Deserialize, Serialize};

/// A point on the floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Wall orientation. Vertical walls share an x coordinate, horizontal walls a y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// A room: an axis-aligned rectangle plus the weight it was sized from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
    /// Normalized weight, equal to the target area of the room.
    pub weight: f64,
}

impl Room {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// True if `p` lies strictly inside the room shrunk by `margin` on every side.
    pub fn contains_with_margin(&self, p: Point, margin: f64) -> bool {
        self.x_min + margin < p.x
            && p.x < self.x_max - margin
            && self.y_min + margin < p.y
            && p.y < self.y_max - margin
    }

    /// True if `p` lies on the rectangle's outline.
    pub fn on_boundary(&self, p: Point) -> bool {
        let on_x_side = (p.x == self.x_min || p.x == self.x_max)
            && p.y >= self.y_min
            && p.y <= self.y_max;
        let on_y_side = (p.y == self.y_min || p.y == self.y_max)
            && p.x >= self.x_min
            && p.x <= self.x_max;
        on_x_side || on_y_side
    }
}

/// A wall segment. `p0` holds the lower coordinate along the wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub p0: Point,
    pub p1: Point,
    pub orientation: Orientation,
}

impl Edge {
    /// Vertical wall at `x` spanning `[y0, y1]`.
    pub fn vertical(x: f64, y0: f64, y1: f64) -> Self {
        Self {
            p0: Point::new(x, y0),
            p1: Point::new(x, y1),
            orientation: Orientation::Vertical,
        }
    }

    /// Horizontal wall at `y` spanning `[x0, x1]`.
    pub fn horizontal(y: f64, x0: f64, x1: f64) -> Self {
        Self {
            p0: Point::new(x0, y),
            p1: Point::new(x1, y),
            orientation: Orientation::Horizontal,
        }
    }

    /// Start and end along the varying axis.
    pub fn span(&self) -> (f64, f64) {
        match self.orientation {
            Orientation::Vertical => (self.p0.y, self.p1.y),
            Orientation::Horizontal => (self.p0.x, self.p1.x),
        }
    }

    pub fn length(&self) -> f64 {
        let (start, end) = self.span();
        end - start
    }

    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.p0.x + self.p1.x) / 2.0,
            (self.p0.y + self.p1.y) / 2.0,
        )
    }
}

/// A shared wall between two rooms. `rooms.0 < rooms.1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adjacency {
    pub rooms: (usize, usize),
    pub edge: Edge,
}

impl Adjacency {
    pub fn touches(&self, room: usize) -> bool {
        self.rooms.0 == room || self.rooms.1 == room
    }

    pub fn length(&self) -> f64 {
        self.edge.length()
    }
}

/// Compact per-wall metadata, parallel vectors in output edge order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeProperties {
    pub centers: Vec<Point>,
    pub orientations: Vec<Orientation>,
    pub lengths: Vec<f64>,
}

impl EdgeProperties {
    pub fn from_edges(edges: &[Edge]) -> Self {
        let mut props = Self {
            centers: Vec::with_capacity(edges.len()),
            orientations: Vec::with_capacity(edges.len()),
            lengths: Vec::with_capacity(edges.len()),
        };
        for edge in edges {
            props.centers.push(edge.midpoint());
            props.orientations.push(edge.orientation);
            props.lengths.push(edge.length());
        }
        props
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(x0: f64, y0: f64, x1: f64, y1: f64) -> Room {
        Room {
            x_min: x0,
            y_min: y0,
            x_max: x1,
            y_max: y1,
            weight: (x1 - x0) * (y1 - y0),
        }
    }

    #[test]
    fn test_room_dimensions() {
        let r = room(1.0, 2.0, 5.0, 4.0);
        assert_eq!(r.width(), 4.0);
        assert_eq!(r.height(), 2.0);
        assert_eq!(r.area(), 8.0);
    }

    #[test]
    fn test_contains_with_margin_is_strict() {
        let r = room(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_with_margin(Point::new(5.0, 5.0), 1.0));
        assert!(!r.contains_with_margin(Point::new(1.0, 5.0), 1.0));
        assert!(!r.contains_with_margin(Point::new(5.0, 9.5), 1.0));
    }

    #[test]
    fn test_on_boundary() {
        let r = room(0.0, 0.0, 4.0, 3.0);
        assert!(r.on_boundary(Point::new(0.0, 1.5)));
        assert!(r.on_boundary(Point::new(4.0, 3.0)));
        assert!(r.on_boundary(Point::new(2.0, 0.0)));
        assert!(!r.on_boundary(Point::new(2.0, 1.0)));
        assert!(!r.on_boundary(Point::new(0.0, 3.5)));
    }

    #[test]
    fn test_edge_length_and_midpoint() {
        let v = Edge::vertical(2.0, 1.0, 4.0);
        assert_eq!(v.length(), 3.0);
        assert_eq!(v.midpoint(), Point::new(2.0, 2.5));
        assert_eq!(v.span(), (1.0, 4.0));

        let h = Edge::horizontal(5.0, 0.5, 2.5);
        assert_eq!(h.length(), 2.0);
        assert_eq!(h.orientation, Orientation::Horizontal);
        assert_eq!(h.p0.y, h.p1.y);
    }

    #[test]
    fn test_edge_properties_parallel() {
        let edges = vec![Edge::vertical(0.0, 0.0, 10.0), Edge::horizontal(0.0, 0.0, 4.0)];
        let props = EdgeProperties::from_edges(&edges);
        assert_eq!(props.len(), 2);
        assert_eq!(props.centers[0], Point::new(0.0, 5.0));
        assert_eq!(props.orientations[1], Orientation::Horizontal);
        assert_eq!(props.lengths, vec![10.0, 4.0]);
    }

    #[test]
    fn test_point_distance() {
        assert!((Point::new(0.0, 0.0).distance(&Point::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }
}
