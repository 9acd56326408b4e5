pub mod chaser;
pub mod collision;
pub mod config;
pub mod effects;
pub mod grid;
pub mod kernel;
pub mod logger;
pub mod rng;
pub mod settings;
pub mod snake;
pub mod types;

pub use chaser::Chaser;
pub use grid::Grid;
pub use kernel::{ChaserView, RoundPhase, SimulationKernel, SnakeView, TickReport, WorldState};
pub use rng::GameRng;
pub use settings::EngineSettings;
pub use snake::Snake;
pub use types::{
    DeathCause, Direction, Event, GameMode, PlayerSlot, Point, Powerup, PowerupKind, RoundOutcome,
};
