use super::types::{Direction, Point};

/// Toroidal grid arithmetic. Stateless apart from the dimensions:
/// every coordinate operation wraps on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Euclidean remainder: always lands in [0, limit).
    pub fn wrap(value: i64, limit: usize) -> usize {
        let limit = limit as i64;
        (((value % limit) + limit) % limit) as usize
    }

    /// One cell in the given direction, wrapping over the edges.
    pub fn step(&self, from: Point, direction: Direction) -> Point {
        let (dx, dy) = direction.delta();
        self.offset(from, dx, dy)
    }

    pub fn offset(&self, from: Point, dx: i64, dy: i64) -> Point {
        Point::new(
            Self::wrap(from.x as i64 + dx, self.width),
            Self::wrap(from.y as i64 + dy, self.height),
        )
    }

    /// Signed shortest displacement from `from` to `to` along one axis,
    /// |result| <= limit / 2.
    pub fn axis_delta(from: usize, to: usize, limit: usize) -> i64 {
        let limit = limit as i64;
        let mut d = to as i64 - from as i64;
        if d > limit / 2 {
            d -= limit;
        } else if d < -(limit / 2) {
            d += limit;
        }
        d
    }

    /// Shortest (dx, dy) from `from` to `to` on the torus.
    pub fn delta(&self, from: Point, to: Point) -> (i64, i64) {
        (
            Self::axis_delta(from.x, to.x, self.width),
            Self::axis_delta(from.y, to.y, self.height),
        )
    }

    /// Toroidal Manhattan distance.
    pub fn distance(&self, a: Point, b: Point) -> usize {
        let (dx, dy) = self.delta(a, b);
        (dx.abs() + dy.abs()) as usize
    }
}
