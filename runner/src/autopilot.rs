use engine::{Direction, GameRng, Grid, PlayerSlot, Point, WorldState};

/// Greedy steering for headless rounds: pick the safe neighbor cell
/// closest to the food under the wrap metric, or any safe cell when
/// the greedy one is blocked. Works purely off the public WorldState,
/// like any other kernel collaborator.
pub fn choose_direction(
    state: &WorldState,
    slot: PlayerSlot,
    rng: &mut GameRng,
) -> Option<Direction> {
    let snake = state.snakes.iter().find(|s| s.slot == slot)?;
    if !snake.alive {
        return None;
    }

    let grid = Grid::new(state.field_width, state.field_height);
    let head = snake.segments[0];

    let candidates: Vec<(Direction, Point)> = Direction::ALL
        .iter()
        .filter(|d| !d.is_opposite(&snake.direction))
        .map(|d| (*d, grid.step(head, *d)))
        .collect();

    let safe: Vec<(Direction, Point)> = candidates
        .into_iter()
        .filter(|(_, cell)| is_safe(state, slot, *cell))
        .collect();

    if safe.is_empty() {
        // Cornered; keep going and let the kernel call it.
        return Some(snake.direction);
    }

    if let Some(food) = state.food {
        let best = safe
            .iter()
            .min_by_key(|(_, cell)| grid.distance(*cell, food))
            .map(|(dir, _)| *dir);
        if best.is_some() {
            return best;
        }
    }

    let idx = rng.random_range(0..safe.len());
    Some(safe[idx].0)
}

fn is_safe(state: &WorldState, slot: PlayerSlot, cell: Point) -> bool {
    for snake in &state.snakes {
        if snake.slot == slot {
            // The tail cell vacates this step, so it stays legal.
            let tail = *snake.segments.last().expect("snake has segments");
            if snake.segments.contains(&cell) && cell != tail {
                return false;
            }
        } else if snake.segments.contains(&cell) {
            return false;
        }
    }

    if let Some(chaser) = &state.chaser {
        // A frozen chaser is a snack, a live one is lethal.
        if chaser.frozen_ticks == 0 && chaser.position == cell {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{GameMode, RoundPhase, SnakeView};

    fn state_with_snake(segments: Vec<Point>, direction: Direction) -> WorldState {
        WorldState {
            tick: 0,
            phase: RoundPhase::Playing,
            mode: GameMode::SinglePlayer,
            field_width: 16,
            field_height: 16,
            snakes: vec![SnakeView {
                slot: PlayerSlot::One,
                segments,
                direction,
                alive: true,
                score: 0,
                interval_ms: 160,
                ghost_ticks: 0,
            }],
            food: Some(Point::new(9, 5)),
            powerup: None,
            chaser: None,
        }
    }

    #[test]
    fn test_steers_toward_food() {
        let state = state_with_snake(
            vec![Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)],
            Direction::Right,
        );
        let mut rng = GameRng::new(1);
        let dir = choose_direction(&state, PlayerSlot::One, &mut rng);
        assert_eq!(dir, Some(Direction::Right));
    }

    #[test]
    fn test_never_reverses() {
        let mut state = state_with_snake(
            vec![Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)],
            Direction::Right,
        );
        // Food directly behind the head.
        state.food = Some(Point::new(2, 5));
        let mut rng = GameRng::new(1);
        let dir = choose_direction(&state, PlayerSlot::One, &mut rng).unwrap();
        assert_ne!(dir, Direction::Left);
    }

    #[test]
    fn test_avoids_live_chaser_cell() {
        let mut state = state_with_snake(
            vec![Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)],
            Direction::Right,
        );
        state.chaser = Some(engine::ChaserView {
            position: Point::new(6, 5),
            frozen_ticks: 0,
            score: 0,
        });
        let mut rng = GameRng::new(1);
        let dir = choose_direction(&state, PlayerSlot::One, &mut rng).unwrap();
        assert_ne!(dir, Direction::Right);
    }

    #[test]
    fn test_dead_snake_gets_no_direction() {
        let mut state = state_with_snake(
            vec![Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)],
            Direction::Right,
        );
        state.snakes[0].alive = false;
        let mut rng = GameRng::new(1);
        assert_eq!(choose_direction(&state, PlayerSlot::One, &mut rng), None);
    }
}
