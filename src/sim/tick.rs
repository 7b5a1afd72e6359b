//! Variable timestep simulation tick and the loop driver
//!
//! [`tick`] advances one [`World`] by one step. [`Game`] owns the run and
//! walks the phase machine:
//!
//! ```text
//! Idle --start--> Running <--pause/resume--> Paused
//!                    |
//!                    +--health 0--> GameOver --restart--> Running
//! ```

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::Direction;
use super::clock::apply_contact_damage;
use super::geometry::clamp_to_arena;
use super::layout::LayoutSelection;
use super::state::{GamePhase, Snapshot, World};
use super::steering::steer_enemies;
use crate::platform::TickScheduler;
use crate::tuning::Tuning;

/// What the driver should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    GameOver,
}

/// Move the player one step in `direction`.
///
/// The step is clamped to the arena bounds. If it would end inside a wall the
/// player instead advances as far as it can (whole units) toward the wall, so
/// a blocked move still ends flush against it. Returns whether the player moved.
pub fn move_player(world: &mut World, direction: Direction) -> bool {
    let arena = &world.arena;
    let player = &mut world.player;
    let delta = direction.delta();

    let mut distance = player.speed;
    while distance > 0.0 {
        let target = clamp_to_arena(&player.rect.translated(delta * distance), arena.width, arena.height);
        if arena.is_clear(&target) {
            let moved = target != player.rect;
            player.rect = target;
            return moved;
        }
        distance -= 1.0;
    }
    false
}

/// Advance `world` to timestamp `now` (ms).
///
/// Order: clock, pending player move, enemy steering, contact damage.
pub fn tick(world: &mut World, pending_move: Option<Direction>, now: f64, tuning: &Tuning) -> TickOutcome {
    let dt = world.clock.advance(now);
    world.ticks += 1;

    if let Some(direction) = pending_move {
        move_player(world, direction);
    }

    let player_rect = world.player.rect;
    steer_enemies(
        &mut world.enemies,
        &player_rect,
        &world.arena.walls,
        dt,
        tuning,
        &mut world.rng,
    );

    let touching = world.touching_enemies();
    if let Some(report) = apply_contact_damage(&mut world.clock, &mut world.player, touching, dt) {
        if report.damage > 0 {
            log::debug!(
                "{} enemies touching, -{} health ({} left)",
                report.touching,
                report.damage,
                world.player.health()
            );
        }
    }

    if world.player.is_dead() {
        TickOutcome::GameOver
    } else {
        TickOutcome::Continue
    }
}

/// A run in progress (or not). Only `Running` receives ticks.
#[derive(Debug)]
enum Session {
    Idle,
    Running(World),
    Paused(World),
    GameOver(World),
}

impl Session {
    fn phase(&self) -> GamePhase {
        match self {
            Session::Idle => GamePhase::Idle,
            Session::Running(_) => GamePhase::Running,
            Session::Paused(_) => GamePhase::Paused,
            Session::GameOver(_) => GamePhase::GameOver,
        }
    }

    fn world(&self) -> Option<&World> {
        match self {
            Session::Idle => None,
            Session::Running(w) | Session::Paused(w) | Session::GameOver(w) => Some(w),
        }
    }
}

type GameOverListener = Box<dyn FnMut(&Snapshot<'_>)>;

/// Loop driver: owns the current run and the tick subscription
pub struct Game<S: TickScheduler> {
    session: Session,
    scheduler: S,
    tuning: Tuning,
    layout: LayoutSelection,
    /// Draws a fresh world seed for every start/restart
    seeds: Pcg32,
    /// Latest move requested since the last tick
    pending_move: Option<Direction>,
    game_over_listeners: Vec<GameOverListener>,
}

impl<S: TickScheduler> Game<S> {
    pub fn new(seed: u64, layout: LayoutSelection, tuning: Tuning, scheduler: S) -> Self {
        Self {
            session: Session::Idle,
            scheduler,
            tuning: tuning.validated(),
            layout,
            seeds: Pcg32::seed_from_u64(seed),
            pending_move: None,
            game_over_listeners: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    pub fn world(&self) -> Option<&World> {
        self.session.world()
    }

    /// Read-only view of the current run (None while idle)
    pub fn snapshot(&self) -> Option<Snapshot<'_>> {
        let phase = self.phase();
        self.session.world().map(|w| w.snapshot(phase))
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Register a callback for the Running -> GameOver transition
    pub fn on_game_over(&mut self, listener: impl FnMut(&Snapshot<'_>) + 'static) {
        self.game_over_listeners.push(Box::new(listener));
    }

    fn new_world(&mut self, now: f64) -> World {
        let seed = self.seeds.random::<u64>();
        let world = World::new(seed, &self.layout, now, &self.tuning);
        log::info!(
            "New run: layout '{}', seed {}, {} walls, {} enemies",
            world.arena.name,
            seed,
            world.arena.walls.len(),
            world.enemies.len()
        );
        world
    }

    /// Idle -> Running
    pub fn start(&mut self, now: f64) -> bool {
        if !matches!(self.session, Session::Idle) {
            log::debug!("start ignored in {:?}", self.phase());
            return false;
        }
        let world = self.new_world(now);
        self.session = Session::Running(world);
        self.pending_move = None;
        self.scheduler.request_tick();
        true
    }

    /// Running -> Paused
    pub fn pause(&mut self) -> bool {
        match std::mem::replace(&mut self.session, Session::Idle) {
            Session::Running(world) => {
                self.session = Session::Paused(world);
                self.pending_move = None;
                self.scheduler.cancel_tick();
                log::info!("Paused");
                true
            }
            other => {
                self.session = other;
                log::debug!("pause ignored in {:?}", self.phase());
                false
            }
        }
    }

    /// Paused -> Running. The paused interval is not charged to the clock.
    pub fn resume(&mut self, now: f64) -> bool {
        match std::mem::replace(&mut self.session, Session::Idle) {
            Session::Paused(mut world) => {
                world.clock.rebaseline(now);
                self.session = Session::Running(world);
                self.scheduler.request_tick();
                log::info!("Resumed");
                true
            }
            other => {
                self.session = other;
                log::debug!("resume ignored in {:?}", self.phase());
                false
            }
        }
    }

    /// Throw away the current run and start a fresh one
    pub fn restart(&mut self, now: f64) -> bool {
        self.scheduler.cancel_tick();
        let world = self.new_world(now);
        self.session = Session::Running(world);
        self.pending_move = None;
        self.scheduler.request_tick();
        true
    }

    /// Start/pause/resume on a single key
    pub fn toggle(&mut self, now: f64) -> bool {
        match self.phase() {
            GamePhase::Idle => self.start(now),
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(now),
            GamePhase::GameOver => false,
        }
    }

    /// Queue a player move for the next tick. The latest request wins.
    pub fn request_move(&mut self, direction: Direction) -> bool {
        if !matches!(self.session, Session::Running(_)) {
            return false;
        }
        self.pending_move = Some(direction);
        true
    }

    /// Handle one scheduled tick at timestamp `now` (ms)
    pub fn on_tick(&mut self, now: f64) -> GamePhase {
        let Session::Running(world) = &mut self.session else {
            log::debug!("tick ignored in {:?}", self.phase());
            return self.phase();
        };

        match tick(world, self.pending_move.take(), now, &self.tuning) {
            TickOutcome::Continue => self.scheduler.request_tick(),
            TickOutcome::GameOver => self.finish(),
        }
        self.phase()
    }

    fn finish(&mut self) {
        if let Session::Running(world) = std::mem::replace(&mut self.session, Session::Idle) {
            log::info!(
                "Game over after {} ticks: score {}, level {}",
                world.ticks,
                world.player.kind.score,
                world.player.kind.level
            );
            self.session = Session::GameOver(world);
        }
        if let Session::GameOver(world) = &self.session {
            let snapshot = world.snapshot(GamePhase::GameOver);
            for listener in &mut self.game_over_listeners {
                listener(&snapshot);
            }
        }
    }
}
