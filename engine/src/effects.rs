use super::chaser::Chaser;
use super::settings::EngineSettings;
use super::snake::Snake;
use super::types::PowerupKind;

/// The shared Speed/Slow effect slot. Only one of the pair can be
/// active per snake; applying the other kind overwrites it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TempoEffect {
    Speed { ticks_left: u32 },
    Slow { ticks_left: u32 },
}

impl TempoEffect {
    pub fn speed(settings: &EngineSettings) -> Self {
        TempoEffect::Speed {
            ticks_left: settings.speed_duration_ticks,
        }
    }

    pub fn slow(settings: &EngineSettings) -> Self {
        TempoEffect::Slow {
            ticks_left: settings.slow_duration_ticks,
        }
    }

    pub fn kind(&self) -> PowerupKind {
        match self {
            TempoEffect::Speed { .. } => PowerupKind::Speed,
            TempoEffect::Slow { .. } => PowerupKind::Slow,
        }
    }

    pub fn ticks_left(&self) -> u32 {
        match self {
            TempoEffect::Speed { ticks_left } | TempoEffect::Slow { ticks_left } => *ticks_left,
        }
    }

    pub fn ticks_left_mut(&mut self) -> &mut u32 {
        match self {
            TempoEffect::Speed { ticks_left } | TempoEffect::Slow { ticks_left } => ticks_left,
        }
    }
}

/// Applies a consumed powerup to the consuming snake (and the chaser,
/// for Freeze). Freeze and Ghost run on independent timers; Shrink is
/// instantaneous.
pub fn apply_powerup(
    kind: PowerupKind,
    snake: &mut Snake,
    chaser: Option<&mut Chaser>,
    settings: &EngineSettings,
) {
    match kind {
        PowerupKind::Freeze => {
            if let Some(chaser) = chaser {
                chaser.freeze(settings.freeze_duration_ticks);
            }
        }
        PowerupKind::Speed => {
            snake.tempo = Some(TempoEffect::speed(settings));
        }
        PowerupKind::Slow => {
            snake.tempo = Some(TempoEffect::slow(settings));
        }
        PowerupKind::Ghost => {
            snake.ghost_ticks = settings.ghost_duration_ticks;
        }
        PowerupKind::Shrink => {
            let target = settings.min_snake_length.max(snake.len() / 2);
            snake.shrink_to(target);
        }
    }
}
