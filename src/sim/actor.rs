//! Player and enemy entities
//!
//! Both share a positional base ([`Actor`]) so collision and drawing code can
//! treat them alike; the role-specific data lives in the `kind` payload.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::tuning::{Tuning, sample_range};

/// Player move directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in screen space (y grows downward)
    pub fn delta(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Shared positional/sizing base
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor<K> {
    pub rect: Rect,
    /// Units per move (player) or per tick (enemy)
    pub speed: f32,
    pub kind: K,
}

impl<K> Actor<K> {
    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.rect.pos()
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.rect = self.rect.with_pos(pos);
    }

    pub fn overlaps<T>(&self, other: &Actor<T>) -> bool {
        self.rect.overlaps(&other.rect)
    }
}

/// Player-only state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStats {
    pub health: u32,
    pub max_health: u32,
    /// Damage intervals survived
    pub score: u64,
    pub level: u32,
}

/// Enemy-only steering state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySteering {
    pub base_speed: f32,
    /// Speed multiplier fixed at creation
    pub speed_variation: f32,
    pub direction_jitter: Vec2,
    /// Time accumulated since the last jitter refresh (ms)
    pub jitter_timer: f64,
    pub jitter_interval: f64,
}

pub type Player = Actor<PlayerStats>;
pub type Enemy = Actor<EnemySteering>;

impl Player {
    /// New player centered on `center`
    pub fn spawn(center: Vec2, level: u32, tuning: &Tuning) -> Self {
        Self {
            rect: Rect::centered(center, tuning.player_size),
            speed: tuning.player_speed,
            kind: PlayerStats {
                health: tuning.player_max_health,
                max_health: tuning.player_max_health,
                score: 0,
                level,
            },
        }
    }

    pub fn health(&self) -> u32 {
        self.kind.health
    }

    pub fn is_dead(&self) -> bool {
        self.kind.health == 0
    }

    /// Subtract `damage`, saturating at zero
    pub fn take_damage(&mut self, damage: u32) {
        self.kind.health = self.kind.health.saturating_sub(damage);
    }
}

impl Enemy {
    /// New enemy centered on `center` with a randomized speed profile
    pub fn spawn(center: Vec2, tuning: &Tuning, rng: &mut Pcg32) -> Self {
        let speed_variation =
            sample_range(rng, tuning.speed_variation_min, tuning.speed_variation_max);
        let jitter_interval = sample_range(rng, tuning.jitter_interval_min, tuning.jitter_interval_max);
        Self {
            rect: Rect::centered(center, tuning.enemy_size),
            speed: tuning.enemy_base_speed * speed_variation,
            kind: EnemySteering {
                base_speed: tuning.enemy_base_speed,
                speed_variation,
                direction_jitter: Vec2::ZERO,
                jitter_timer: 0.0,
                jitter_interval,
            },
        }
    }
}

/// Borrowed view over either actor role
#[derive(Debug, Clone, Copy)]
pub enum ActorView<'a> {
    Player(&'a Player),
    Enemy(&'a Enemy),
}

impl ActorView<'_> {
    pub fn rect(&self) -> &Rect {
        match self {
            ActorView::Player(p) => &p.rect,
            ActorView::Enemy(e) => &e.rect,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self, ActorView::Player(_))
    }
}
