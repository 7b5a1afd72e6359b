//! Rogue Arena - A wall-maze roguelike arena
//!
//! Core modules:
//! - `sim`: Simulation core (collision, layouts, enemy steering, damage clock, loop driver)
//! - `platform`: Tick scheduling abstraction
//! - `renderer`: Canvas 2D drawing (wasm only)
//! - `input`: Keyboard to command mapping
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (canvas pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    /// Thickness of the outer ring walls
    pub const BORDER_THICKNESS: f32 = 20.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 30.0;
    /// Units moved per key press
    pub const PLAYER_SPEED: f32 = 10.0;
    pub const PLAYER_MAX_HEALTH: u32 = 250;

    /// Enemy defaults
    pub const ENEMY_COUNT: usize = 5;
    pub const ENEMY_SIZE: f32 = 20.0;
    /// Units per tick before speed variation is applied
    pub const ENEMY_BASE_SPEED: f32 = 1.5;
    /// Per-enemy speed multiplier range, fixed at creation
    pub const SPEED_VARIATION_MIN: f32 = 0.5;
    pub const SPEED_VARIATION_MAX: f32 = 1.0;

    /// Jitter refresh interval range (ms)
    pub const JITTER_INTERVAL_MIN: f64 = 500.0;
    pub const JITTER_INTERVAL_MAX: f64 = 1500.0;
    /// Max absolute jitter per axis (units per tick)
    pub const JITTER_MAGNITUDE: f32 = 0.25;

    /// Enemies closer than this push each other apart
    pub const SEPARATION_RADIUS: f32 = 50.0;
    pub const SEPARATION_WEIGHT: f32 = 0.1;

    /// Contact damage is applied once per interval (ms)
    pub const HEALTH_LOSS_INTERVAL: f64 = 1000.0;
    pub const DAMAGE_PER_ENEMY: u32 = 10;
    /// Cap on damage dealt in a single interval
    pub const MAX_HEALTH_LOSS_PER_SECOND: u32 = 50;

    /// Rejection sampling budget for spawn points
    pub const SPAWN_MAX_ATTEMPTS: u32 = 100;
}
