use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit delta in grid coordinates; y grows downward.
    pub fn delta(&self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }

    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerSlot {
    One,
    Two,
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerSlot::One => write!(f, "P1"),
            PlayerSlot::Two => write!(f, "P2"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    SinglePlayer,
    TwoPlayer,
}

impl GameMode {
    pub fn has_chaser(&self) -> bool {
        matches!(self, GameMode::SinglePlayer)
    }

    pub fn player_slots(&self) -> &'static [PlayerSlot] {
        match self {
            GameMode::SinglePlayer => &[PlayerSlot::One],
            GameMode::TwoPlayer => &[PlayerSlot::One, PlayerSlot::Two],
        }
    }

    /// Capability table: which powerup kinds may spawn in this mode.
    /// Freeze targets the chaser, so it is never offered without one.
    pub fn allowed_powerups(&self) -> &'static [PowerupKind] {
        match self {
            GameMode::SinglePlayer => &[
                PowerupKind::Freeze,
                PowerupKind::Speed,
                PowerupKind::Slow,
                PowerupKind::Ghost,
                PowerupKind::Shrink,
            ],
            GameMode::TwoPlayer => &[
                PowerupKind::Speed,
                PowerupKind::Slow,
                PowerupKind::Ghost,
                PowerupKind::Shrink,
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    Freeze,
    Speed,
    Slow,
    Ghost,
    Shrink,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Powerup {
    pub position: Point,
    pub kind: PowerupKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    SelfCollision,
    OpponentCollision,
    HeadOnCollision,
    CaughtByChaser,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Single-player: the chaser or the board won.
    PlayerDefeated,
    Winner(PlayerSlot),
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    FoodEaten { by: PlayerSlot },
    PowerupCollected { by: PlayerSlot, kind: PowerupKind },
    AgentConsumed { by: PlayerSlot },
    ChaserAteFood,
    Death { who: PlayerSlot, cause: DeathCause },
    RoundOver { outcome: RoundOutcome },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposites() {
        assert!(Direction::Up.is_opposite(&Direction::Down));
        assert!(Direction::Left.is_opposite(&Direction::Right));
        assert!(!Direction::Up.is_opposite(&Direction::Left));
        assert!(!Direction::Down.is_opposite(&Direction::Down));
    }

    #[test]
    fn test_direction_deltas_are_unit_vectors() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn test_freeze_not_offered_in_two_player() {
        assert!(!GameMode::TwoPlayer
            .allowed_powerups()
            .contains(&PowerupKind::Freeze));
        assert!(GameMode::SinglePlayer
            .allowed_powerups()
            .contains(&PowerupKind::Freeze));
    }

    #[test]
    fn test_chaser_only_in_single_player() {
        assert!(GameMode::SinglePlayer.has_chaser());
        assert!(!GameMode::TwoPlayer.has_chaser());
    }
}
