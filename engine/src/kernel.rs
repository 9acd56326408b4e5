use serde::Serialize;
use std::time::Duration;

use super::chaser::Chaser;
use super::collision;
use super::config::Validate;
use super::effects;
use super::grid::Grid;
use super::rng::GameRng;
use super::settings::EngineSettings;
use super::snake::Snake;
use super::types::{
    DeathCause, Direction, Event, GameMode, PlayerSlot, Point, Powerup, RoundOutcome,
};
use crate::log;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RoundPhase {
    /// No round started yet; ticking is a driver bug.
    Idle,
    Playing,
    /// Sticky until reset_round.
    RoundOver(RoundOutcome),
}

/// Serializable view of the world handed to rendering/audio/UI
/// collaborators. Rebuilt from scratch every tick.
#[derive(Clone, Debug, Serialize)]
pub struct WorldState {
    pub tick: u64,
    pub phase: RoundPhase,
    pub mode: GameMode,
    pub field_width: usize,
    pub field_height: usize,
    pub snakes: Vec<SnakeView>,
    pub food: Option<Point>,
    pub powerup: Option<Powerup>,
    pub chaser: Option<ChaserView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SnakeView {
    pub slot: PlayerSlot,
    pub segments: Vec<Point>,
    pub direction: Direction,
    pub alive: bool,
    pub score: u32,
    /// Effective move interval after tempo effects.
    pub interval_ms: u64,
    pub ghost_ticks: u32,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct ChaserView {
    pub position: Point,
    pub frozen_ticks: u32,
    pub score: u32,
}

#[derive(Clone, Debug)]
pub struct TickReport {
    pub events: Vec<Event>,
    pub state: WorldState,
}

/// Owns all entity and timer state for a round and advances it in
/// fixed steps. Strictly synchronous and passive: the driver feeds it
/// elapsed time, the kernel decides when steps are due.
pub struct SimulationKernel {
    settings: EngineSettings,
    grid: Grid,
    rng: GameRng,
    phase: RoundPhase,
    mode: GameMode,
    snakes: Vec<Snake>,
    chaser: Option<Chaser>,
    food: Option<Point>,
    powerup: Option<Powerup>,
    tick_count: u64,
}

impl SimulationKernel {
    pub fn new(settings: EngineSettings, seed: u64) -> Result<Self, String> {
        settings.validate()?;
        let grid = Grid::new(settings.field_width, settings.field_height);
        Ok(Self {
            settings,
            grid,
            rng: GameRng::new(seed),
            phase: RoundPhase::Idle,
            mode: GameMode::SinglePlayer,
            snakes: Vec::new(),
            chaser: None,
            food: None,
            powerup: None,
            tick_count: 0,
        })
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Rebuilds every entity for a fresh round and enters Playing.
    pub fn reset_round(&mut self, mode: GameMode) -> WorldState {
        self.mode = mode;
        self.tick_count = 0;
        self.snakes.clear();
        self.chaser = None;
        self.food = None;
        self.powerup = None;

        let slots = mode.player_slots();
        for (idx, slot) in slots.iter().enumerate() {
            let start = start_position(idx, slots.len(), &self.grid);
            self.snakes
                .push(Snake::new(*slot, start, Direction::Up, &self.grid, &self.settings));
        }

        let food = self
            .place_free_cell()
            .expect("a fresh field must have a free cell for food");
        self.food = Some(food);

        if mode.has_chaser() {
            let start = self
                .place_free_cell()
                .expect("a fresh field must have a free cell for the chaser");
            self.chaser = Some(Chaser::new(start));
        }

        self.phase = RoundPhase::Playing;
        log!("Round started: {:?}, seed {}", mode, self.rng.seed());
        self.snapshot()
    }

    /// Buffers a directional intent for the next step. An opposite
    /// direction is dropped silently (normal input collapse); a slot
    /// that is not part of the round is a driver bug.
    pub fn submit_intent(&mut self, slot: PlayerSlot, direction: Direction) -> Result<(), String> {
        match self.phase {
            RoundPhase::Idle => Err("round not started; call reset_round first".to_string()),
            RoundPhase::RoundOver(_) => Err("round is over; call reset_round first".to_string()),
            RoundPhase::Playing => {
                let snake = self
                    .snakes
                    .iter_mut()
                    .find(|s| s.slot == slot)
                    .ok_or_else(|| format!("no snake in slot {} this round", slot))?;
                snake.submit_direction(direction);
                Ok(())
            }
        }
    }

    /// Advances the simulation. Each snake accumulates the elapsed
    /// time and takes at most one step per call; after RoundOver this
    /// is a no-op until reset_round.
    pub fn tick(&mut self, elapsed: Duration) -> Result<TickReport, String> {
        match self.phase {
            RoundPhase::Idle => Err("tick called before reset_round".to_string()),
            RoundPhase::RoundOver(_) => Ok(TickReport {
                events: Vec::new(),
                state: self.snapshot(),
            }),
            RoundPhase::Playing => self.step(elapsed),
        }
    }

    fn step(&mut self, elapsed: Duration) -> Result<TickReport, String> {
        let elapsed_ms = elapsed.as_millis() as u64;

        let settings = &self.settings;
        let due: Vec<usize> = self
            .snakes
            .iter_mut()
            .enumerate()
            .filter_map(|(i, snake)| snake.accumulate(elapsed_ms, settings).then_some(i))
            .collect();

        let mut events = Vec::new();
        if due.is_empty() {
            return Ok(TickReport {
                events,
                state: self.snapshot(),
            });
        }

        self.tick_count += 1;

        for &i in &due {
            self.snakes[i].tick_effect_timers();
            self.snakes[i].commit_direction();
        }

        let next_heads: Vec<Option<Point>> = self
            .snakes
            .iter()
            .enumerate()
            .map(|(i, snake)| {
                due.contains(&i)
                    .then(|| self.grid.step(snake.head(), snake.direction))
            })
            .collect();

        let mut deaths: Vec<(usize, DeathCause)> = Vec::new();

        let head_on = self.snakes.len() == 2
            && matches!(
                (next_heads[0], next_heads[1]),
                (Some(a), Some(b)) if a == b
            );

        if head_on {
            deaths.push((0, DeathCause::HeadOnCollision));
            deaths.push((1, DeathCause::HeadOnCollision));
        } else {
            for &i in &due {
                let next = next_heads[i].expect("due snake must have a next head");
                let opponent = match self.snakes.len() {
                    2 => Some(&self.snakes[1 - i]),
                    _ => None,
                };
                let grows = self.move_grows(next);
                if let Some(cause) = collision::resolve(next, &self.snakes[i], opponent, grows) {
                    deaths.push((i, cause));
                }
            }

            for &i in &due {
                if deaths.iter().any(|(dead, _)| *dead == i) {
                    continue;
                }
                let next = next_heads[i].expect("due snake must have a next head");
                if let Some(cause) = self.commit_move(i, next, &mut events)? {
                    deaths.push((i, cause));
                }
            }
        }

        // Chaser cadence: half the snake tick frequency.
        if deaths.is_empty() && self.tick_count % 2 == 0 {
            self.chaser_tick(&mut events, &mut deaths)?;
        }

        if !deaths.is_empty() {
            for &(i, cause) in &deaths {
                let slot = self.snakes[i].slot;
                self.snakes[i].death = Some(cause);
                events.push(Event::Death { who: slot, cause });
                log!("[{}] died: {:?}", slot, cause);
            }
            let outcome = self.round_outcome();
            self.phase = RoundPhase::RoundOver(outcome);
            events.push(Event::RoundOver { outcome });
            log!("Round over: {:?}", outcome);
        }

        Ok(TickReport {
            events,
            state: self.snapshot(),
        })
    }

    /// Whether a move onto `next` keeps the tail in place this step.
    fn move_grows(&self, next: Point) -> bool {
        if self.food == Some(next) {
            return true;
        }
        if self.powerup.map(|p| p.position) == Some(next) {
            return true;
        }
        matches!(self.chaser, Some(chaser) if chaser.is_frozen() && chaser.position == next)
    }

    /// Pushes the surviving snake's head and settles what it landed
    /// on. Returns a death cause when the cell holds an unfrozen
    /// chaser.
    fn commit_move(
        &mut self,
        i: usize,
        next: Point,
        events: &mut Vec<Event>,
    ) -> Result<Option<DeathCause>, String> {
        let slot = self.snakes[i].slot;
        self.snakes[i].push_head(next);

        if let Some(chaser) = self.chaser
            && chaser.position == next
        {
            if !chaser.is_frozen() {
                return Ok(Some(DeathCause::CaughtByChaser));
            }
            // Eating a frozen chaser: bonus points, the chaser thaws
            // and respawns elsewhere, the tail stays in place.
            self.snakes[i].score += self.settings.chaser_catch_bonus;
            events.push(Event::AgentConsumed { by: slot });
            log!(
                "[{}] consumed the frozen chaser at ({}, {})",
                slot,
                next.x,
                next.y
            );
            let respawn = self.place_free_cell()?;
            let chaser = self.chaser.as_mut().expect("chaser checked above");
            chaser.position = respawn;
            chaser.thaw();
            return Ok(None);
        }

        if self.food == Some(next) {
            self.snakes[i].score += 1;
            self.snakes[i].quicken(&self.settings);
            events.push(Event::FoodEaten { by: slot });
            log!(
                "[{}] ate food at ({}, {}). Score: {}",
                slot,
                next.x,
                next.y,
                self.snakes[i].score
            );
            self.food = None;
            let food = self.place_free_cell()?;
            self.food = Some(food);
            log!("Food spawned at ({}, {})", food.x, food.y);
            self.maybe_spawn_powerup()?;
            return Ok(None);
        }

        if let Some(powerup) = self.powerup
            && powerup.position == next
        {
            effects::apply_powerup(
                powerup.kind,
                &mut self.snakes[i],
                self.chaser.as_mut(),
                &self.settings,
            );
            events.push(Event::PowerupCollected {
                by: slot,
                kind: powerup.kind,
            });
            log!("[{}] collected {:?} powerup", slot, powerup.kind);
            self.powerup = None;
            return Ok(None);
        }

        self.snakes[i].pop_tail();
        Ok(None)
    }

    fn chaser_tick(
        &mut self,
        events: &mut Vec<Event>,
        deaths: &mut Vec<(usize, DeathCause)>,
    ) -> Result<(), String> {
        let Some(mut chaser) = self.chaser else {
            return Ok(());
        };

        if chaser.is_frozen() {
            chaser.frozen_ticks -= 1;
            self.chaser = Some(chaser);
            return Ok(());
        }

        let food = self.food.expect("food is always present during play");
        let target = chaser.choose_step(&self.grid, food, &self.snakes[0], &mut self.rng);
        chaser.position = target;

        let caught = target == self.snakes[0].head();
        let ate_food = self.food == Some(target);
        let ate_powerup = self.powerup.map(|p| p.position) == Some(target);
        self.chaser = Some(chaser);

        if caught {
            deaths.push((0, DeathCause::CaughtByChaser));
        } else if ate_food {
            self.chaser.as_mut().expect("chaser set above").score += 1;
            events.push(Event::ChaserAteFood);
            log!("Chaser ate the food at ({}, {})", target.x, target.y);
            self.food = None;
            let food = self.place_free_cell()?;
            self.food = Some(food);
            log!("Food spawned at ({}, {})", food.x, food.y);
        } else if ate_powerup {
            // Destroyed without any score change.
            self.powerup = None;
            log!("Chaser destroyed the powerup at ({}, {})", target.x, target.y);
        }

        Ok(())
    }

    fn maybe_spawn_powerup(&mut self) -> Result<(), String> {
        if self.powerup.is_some() {
            return Ok(());
        }
        if !self.rng.chance(self.settings.powerup_spawn_probability) {
            return Ok(());
        }
        let kind = self.rng.pick(self.mode.allowed_powerups());
        let position = self.place_free_cell()?;
        self.powerup = Some(Powerup { position, kind });
        log!("{:?} powerup spawned at ({}, {})", kind, position.x, position.y);
        Ok(())
    }

    fn is_occupied(&self, cell: Point) -> bool {
        if self.snakes.iter().any(|snake| snake.occupies(cell)) {
            return true;
        }
        if self.food == Some(cell) {
            return true;
        }
        if self.powerup.map(|p| p.position) == Some(cell) {
            return true;
        }
        matches!(self.chaser, Some(chaser) if chaser.position == cell)
    }

    /// Random placement with a bounded number of attempts, then an
    /// exhaustive scan. A saturated grid is a fatal error, never a
    /// busy loop.
    fn place_free_cell(&mut self) -> Result<Point, String> {
        for _ in 0..100 {
            let cell = Point::new(
                self.rng.random_range(0..self.grid.width),
                self.rng.random_range(0..self.grid.height),
            );
            if !self.is_occupied(cell) {
                return Ok(cell);
            }
        }

        for y in 0..self.grid.height {
            for x in 0..self.grid.width {
                let cell = Point::new(x, y);
                if !self.is_occupied(cell) {
                    return Ok(cell);
                }
            }
        }

        Err("no free cell left on the field".to_string())
    }

    fn round_outcome(&self) -> RoundOutcome {
        match self.mode {
            GameMode::SinglePlayer => RoundOutcome::PlayerDefeated,
            GameMode::TwoPlayer => {
                let mut alive = self.snakes.iter().filter(|s| s.is_alive());
                match (alive.next(), alive.next()) {
                    (Some(winner), None) => RoundOutcome::Winner(winner.slot),
                    _ => RoundOutcome::Draw,
                }
            }
        }
    }

    pub fn snapshot(&self) -> WorldState {
        WorldState {
            tick: self.tick_count,
            phase: self.phase,
            mode: self.mode,
            field_width: self.grid.width,
            field_height: self.grid.height,
            snakes: self
                .snakes
                .iter()
                .map(|snake| SnakeView {
                    slot: snake.slot,
                    segments: snake.body.iter().copied().collect(),
                    direction: snake.direction,
                    alive: snake.is_alive(),
                    score: snake.score,
                    interval_ms: snake.effective_interval_ms(&self.settings),
                    ghost_ticks: snake.ghost_ticks,
                })
                .collect(),
            food: self.food,
            powerup: self.powerup,
            chaser: self.chaser.map(|chaser| ChaserView {
                position: chaser.position,
                frozen_ticks: chaser.frozen_ticks,
                score: chaser.score,
            }),
        }
    }

    #[cfg(test)]
    fn snake_mut(&mut self, slot: PlayerSlot) -> &mut Snake {
        self.snakes
            .iter_mut()
            .find(|s| s.slot == slot)
            .expect("slot present in round")
    }

    #[cfg(test)]
    fn set_food(&mut self, cell: Point) {
        self.food = Some(cell);
    }

    #[cfg(test)]
    fn set_powerup(&mut self, powerup: Powerup) {
        self.powerup = Some(powerup);
    }

    #[cfg(test)]
    fn clear_powerup(&mut self) {
        self.powerup = None;
    }

    #[cfg(test)]
    fn set_chaser(&mut self, position: Point, frozen_ticks: u32) {
        self.chaser = Some(Chaser {
            position,
            frozen_ticks,
            score: 0,
        });
    }
}

fn start_position(index: usize, total: usize, grid: &Grid) -> Point {
    let x = if total == 1 {
        grid.width / 2
    } else {
        (index + 1) * grid.width / (total + 1)
    };
    Point::new(x.min(grid.width - 1), grid.height / 2)
}
