use std::collections::{HashSet, VecDeque};

use super::effects::TempoEffect;
use super::grid::Grid;
use super::settings::EngineSettings;
use super::types::{DeathCause, Direction, PlayerSlot, Point};

/// A player snake. The body is head-first and strictly contiguous
/// under the wrap metric. `direction` is the committed direction from
/// the last step; `pending_direction` buffers the latest accepted
/// intent until the next step.
#[derive(Clone, Debug)]
pub struct Snake {
    pub slot: PlayerSlot,
    pub body: VecDeque<Point>,
    body_set: HashSet<Point>,
    pub direction: Direction,
    pub pending_direction: Option<Direction>,
    pub death: Option<DeathCause>,
    pub score: u32,
    /// Interval before tempo effects, shortens as food is eaten.
    pub base_interval_ms: u64,
    /// Wall-clock time accumulated toward the next step.
    pub accumulated_ms: u64,
    pub tempo: Option<TempoEffect>,
    pub ghost_ticks: u32,
}

impl Snake {
    pub fn new(
        slot: PlayerSlot,
        start: Point,
        direction: Direction,
        grid: &Grid,
        settings: &EngineSettings,
    ) -> Self {
        let mut body = VecDeque::new();
        let mut body_set = HashSet::new();

        // Trailing segments extend away from the facing direction.
        let (dx, dy) = direction.delta();
        let mut segment = start;
        for _ in 0..settings.min_snake_length {
            body.push_back(segment);
            body_set.insert(segment);
            segment = grid.offset(segment, -dx, -dy);
        }

        Self {
            slot,
            body,
            body_set,
            direction,
            pending_direction: None,
            death: None,
            score: 0,
            base_interval_ms: settings.initial_interval_ms,
            accumulated_ms: 0,
            tempo: None,
            ghost_ticks: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.death.is_none()
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, cell: Point) -> bool {
        self.body_set.contains(&cell)
    }

    /// Last-valid-wins intent buffering. A direction opposite to the
    /// committed one is dropped silently, checked against the committed
    /// direction so rapid inputs between steps cannot fold the snake
    /// onto itself.
    pub fn submit_direction(&mut self, direction: Direction) {
        if !direction.is_opposite(&self.direction) {
            self.pending_direction = Some(direction);
        }
    }

    pub fn commit_direction(&mut self) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
    }

    pub fn push_head(&mut self, head: Point) {
        self.body.push_front(head);
        self.body_set.insert(head);
    }

    /// Removes the tail segment. The occupancy set only drops the cell
    /// when no other segment still covers it; under the Ghost effect
    /// the body can transiently overlap itself.
    pub fn pop_tail(&mut self) {
        let tail = self
            .body
            .pop_back()
            .expect("snake body should never be empty");
        if !self.body.contains(&tail) {
            self.body_set.remove(&tail);
        }
    }

    pub fn shrink_to(&mut self, target_len: usize) {
        while self.body.len() > target_len {
            self.pop_tail();
        }
    }

    pub fn effective_interval_ms(&self, settings: &EngineSettings) -> u64 {
        match self.tempo {
            Some(TempoEffect::Speed { .. }) => {
                settings.min_interval_ms.max(self.base_interval_ms / 2)
            }
            Some(TempoEffect::Slow { .. }) => settings
                .max_interval_ms
                .min(self.base_interval_ms + self.base_interval_ms / 2),
            None => self.base_interval_ms,
        }
    }

    /// Permanent speed-up from eating food, clamped at the floor.
    pub fn quicken(&mut self, settings: &EngineSettings) {
        self.base_interval_ms = settings
            .min_interval_ms
            .max(self.base_interval_ms.saturating_sub(settings.speedup_per_food_ms));
    }

    /// Adds elapsed wall-clock time; reports whether a step is due.
    /// The accumulator resets to zero on a step, so a snake takes at
    /// most one step per poll and falls behind under lag rather than
    /// fast-forwarding.
    pub fn accumulate(&mut self, elapsed_ms: u64, settings: &EngineSettings) -> bool {
        self.accumulated_ms += elapsed_ms;
        if self.accumulated_ms >= self.effective_interval_ms(settings) {
            self.accumulated_ms = 0;
            true
        } else {
            false
        }
    }

    /// One-tick decay of the timed effects; expired effects revert.
    pub fn tick_effect_timers(&mut self) {
        if let Some(tempo) = &mut self.tempo {
            let ticks = tempo.ticks_left_mut();
            *ticks = ticks.saturating_sub(1);
        }
        if self.tempo.is_some_and(|t| t.ticks_left() == 0) {
            self.tempo = None;
        }
        self.ghost_ticks = self.ghost_ticks.saturating_sub(1);
    }

    #[cfg(test)]
    pub fn set_body(&mut self, segments: Vec<Point>) {
        self.body = segments.iter().copied().collect();
        self.body_set = segments.into_iter().collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameMode;

    fn make_snake(direction: Direction) -> Snake {
        let grid = Grid::new(12, 12);
        let settings = EngineSettings::default();
        Snake::new(
            PlayerSlot::One,
            Point::new(6, 6),
            direction,
            &grid,
            &settings,
        )
    }

    #[test]
    fn test_spawn_is_contiguous_and_trails_backward() {
        let snake = make_snake(Direction::Up);
        assert_eq!(snake.len(), EngineSettings::default().min_snake_length);
        assert_eq!(snake.head(), Point::new(6, 6));
        // Facing up, the body extends downward.
        assert_eq!(snake.body[1], Point::new(6, 7));
        assert_eq!(snake.tail(), Point::new(6, 8));
    }

    #[test]
    fn test_spawn_wraps_over_the_edge() {
        let grid = Grid::new(12, 12);
        let settings = EngineSettings::default();
        let snake = Snake::new(
            PlayerSlot::One,
            Point::new(0, 0),
            Direction::Right,
            &grid,
            &settings,
        );
        assert_eq!(snake.body[1], Point::new(11, 0));
        assert_eq!(snake.tail(), Point::new(10, 0));
    }

    #[test]
    fn test_opposite_intent_is_dropped() {
        let mut snake = make_snake(Direction::Up);
        snake.submit_direction(Direction::Down);
        assert_eq!(snake.pending_direction, None);
        snake.submit_direction(Direction::Left);
        assert_eq!(snake.pending_direction, Some(Direction::Left));
    }

    #[test]
    fn test_rapid_intents_collapse_to_last_valid() {
        // Up -> Left accepted, then Down is checked against the
        // committed Up (not the pending Left) and still dropped.
        let mut snake = make_snake(Direction::Up);
        snake.submit_direction(Direction::Left);
        snake.submit_direction(Direction::Down);
        assert_eq!(snake.pending_direction, Some(Direction::Left));
        snake.commit_direction();
        assert_eq!(snake.direction, Direction::Left);
    }

    #[test]
    fn test_occupancy_survives_ghost_overlap() {
        let mut snake = make_snake(Direction::Up);
        snake.set_body(vec![
            Point::new(5, 5),
            Point::new(5, 6),
            Point::new(5, 7),
            Point::new(6, 7),
        ]);
        // Ghost pass-through: head re-enters a cell the body covers.
        snake.push_head(Point::new(5, 6));
        snake.pop_tail();
        assert!(snake.occupies(Point::new(5, 6)));
        // Two segments sit on (5, 6); removing one keeps it occupied.
        snake.pop_tail();
        snake.pop_tail();
        assert!(snake.occupies(Point::new(5, 6)));
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn test_shrink_truncates_tail_first() {
        let mut snake = make_snake(Direction::Up);
        snake.set_body(vec![
            Point::new(1, 1),
            Point::new(1, 2),
            Point::new(1, 3),
            Point::new(1, 4),
            Point::new(1, 5),
            Point::new(1, 6),
        ]);
        snake.shrink_to(3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Point::new(1, 1));
        assert!(!snake.occupies(Point::new(1, 6)));
    }

    #[test]
    fn test_effective_interval_clamps() {
        let settings = EngineSettings::default();
        let mut snake = make_snake(Direction::Up);
        snake.base_interval_ms = 100;
        assert_eq!(snake.effective_interval_ms(&settings), 100);

        snake.tempo = Some(TempoEffect::speed(&settings));
        assert_eq!(snake.effective_interval_ms(&settings), 60);

        snake.tempo = Some(TempoEffect::slow(&settings));
        assert_eq!(snake.effective_interval_ms(&settings), 150);

        snake.tempo = None;
        snake.base_interval_ms = settings.min_interval_ms;
        snake.tempo = Some(TempoEffect::speed(&settings));
        assert_eq!(
            snake.effective_interval_ms(&settings),
            settings.min_interval_ms
        );
    }

    #[test]
    fn test_quicken_clamps_at_floor() {
        let settings = EngineSettings::default();
        let mut snake = make_snake(Direction::Up);
        snake.base_interval_ms = settings.min_interval_ms + 1;
        snake.quicken(&settings);
        assert_eq!(snake.base_interval_ms, settings.min_interval_ms);
        snake.quicken(&settings);
        assert_eq!(snake.base_interval_ms, settings.min_interval_ms);
    }

    #[test]
    fn test_accumulate_steps_at_most_once_per_poll() {
        let settings = EngineSettings::default();
        let mut snake = make_snake(Direction::Up);
        snake.base_interval_ms = 100;
        assert!(!snake.accumulate(60, &settings));
        // A huge lag spike still yields a single step.
        assert!(snake.accumulate(1000, &settings));
        assert_eq!(snake.accumulated_ms, 0);
        assert!(!snake.accumulate(60, &settings));
    }

    #[test]
    fn test_two_modes_reuse_one_snake_type() {
        // Regression guard for the consolidation: both modes build
        // snakes through the same constructor.
        for mode in [GameMode::SinglePlayer, GameMode::TwoPlayer] {
            assert!(!mode.player_slots().is_empty());
        }
    }
}
