use super::snake::Snake;
use super::types::{DeathCause, Point};

/// Death rules for a proposed head position, checked against pre-move
/// bodies in fixed order: self-collision (with the vacated-tail
/// exemption), then the opponent's body. Ghost suppresses both. The
/// head-to-head rule is a joint check owned by the kernel, because it
/// needs both next heads before either body is committed.
pub fn resolve(
    next_head: Point,
    snake: &Snake,
    opponent: Option<&Snake>,
    grows: bool,
) -> Option<DeathCause> {
    if snake.ghost_ticks > 0 {
        return None;
    }

    // The tail cell is legal to enter only when it vacates this step,
    // which a growing move does not do.
    if snake.occupies(next_head) && !(next_head == snake.tail() && !grows) {
        return Some(DeathCause::SelfCollision);
    }

    if let Some(opponent) = opponent
        && opponent.occupies(next_head)
    {
        return Some(DeathCause::OpponentCollision);
    }

    None
}
