use serde::{Deserialize, Serialize};

const EDGE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn from_vertices(vertices: &[Point]) -> Option<Self> {
        let first = vertices.first()?;
        let mut bounds = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for vertex in &vertices[1..] {
            bounds.min_x = bounds.min_x.min(vertex.x);
            bounds.min_y = bounds.min_y.min(vertex.y);
            bounds.max_x = bounds.max_x.max(vertex.x);
            bounds.max_y = bounds.max_y.max(vertex.y);
        }
        Some(bounds)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}

/// Even-odd ray cast over a simple polygon. Points exactly on an edge or
/// vertex count as inside; open or degenerate input is never inside.
pub fn polygon_contains(vertices: &[Point], closed: bool, point: Point) -> bool {
    if !closed || vertices.len() < 3 {
        return false;
    }

    let count = vertices.len();
    for index in 0..count {
        if on_segment(vertices[index], vertices[(index + 1) % count], point) {
            return true;
        }
    }

    let mut inside = false;
    let mut previous = count - 1;
    for current in 0..count {
        let a = vertices[current];
        let b = vertices[previous];
        if ((a.y > point.y) != (b.y > point.y))
            && (point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x)
        {
            inside = !inside;
        }
        previous = current;
    }
    inside
}

fn on_segment(a: Point, b: Point, point: Point) -> bool {
    let length_squared = (b.x - a.x).powi(2) + (b.y - a.y).powi(2);
    if length_squared <= EDGE_EPSILON {
        // Zero-length edge from a duplicated vertex; only the vertex matches.
        return (point.x - a.x).abs() <= EDGE_EPSILON && (point.y - a.y).abs() <= EDGE_EPSILON;
    }
    let cross = (b.x - a.x) * (point.y - a.y) - (b.y - a.y) * (point.x - a.x);
    if cross.abs() > EDGE_EPSILON {
        return false;
    }
    let dot = (point.x - a.x) * (b.x - a.x) + (point.y - a.y) * (b.y - a.y);
    dot >= -EDGE_EPSILON && dot <= length_squared + EDGE_EPSILON
}
