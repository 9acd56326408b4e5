use super::grid::Grid;
use super::rng::GameRng;
use super::snake::Snake;
use super::types::Point;

/// The single-player pursuit agent. Hunts the food with a toroidal
/// Manhattan-greedy rule, one cell per chaser tick (every second
/// kernel tick).
#[derive(Clone, Copy, Debug)]
pub struct Chaser {
    pub position: Point,
    pub frozen_ticks: u32,
    pub score: u32,
}

impl Chaser {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            frozen_ticks: 0,
            score: 0,
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_ticks > 0
    }

    pub fn freeze(&mut self, ticks: u32) {
        self.frozen_ticks = ticks;
    }

    pub fn thaw(&mut self) {
        self.frozen_ticks = 0;
    }

    /// Picks the next cell: one unit along the axis with the larger
    /// wrapped delta to the food, falling back to the other axis when
    /// the player's body blocks the way (random sign when that axis
    /// has zero delta). Both blocked means the chaser stays put.
    ///
    /// The player's head cell never counts as blocked: stepping onto
    /// it is the capture, resolved by the kernel.
    pub fn choose_step(&self, grid: &Grid, food: Point, player: &Snake, rng: &mut GameRng) -> Point {
        let (dx, dy) = grid.delta(self.position, food);
        if dx == 0 && dy == 0 {
            return self.position;
        }

        let blocked = |cell: Point| player.occupies(cell) && cell != player.head();

        let x_primary = dx.abs() >= dy.abs();
        let primary = self.axis_step(grid, x_primary, dx, dy, rng);
        if !blocked(primary) {
            return primary;
        }

        let secondary = self.axis_step(grid, !x_primary, dx, dy, rng);
        if !blocked(secondary) {
            return secondary;
        }

        self.position
    }

    fn axis_step(&self, grid: &Grid, along_x: bool, dx: i64, dy: i64, rng: &mut GameRng) -> Point {
        if along_x {
            let sign = if dx != 0 { dx.signum() } else { rng.random_sign() };
            grid.offset(self.position, sign, 0)
        } else {
            let sign = if dy != 0 { dy.signum() } else { rng.random_sign() };
            grid.offset(self.position, 0, sign)
        }
    }
}
