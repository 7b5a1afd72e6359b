//! Data-driven game balance
//!
//! Every number the simulation uses lives here so a run can be retuned from
//! JSON without a rebuild. Missing fields take the values in [`crate::consts`].

use rand::Rng;
use rand::distr::uniform::SampleUniform;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    pub spawn_max_attempts: u32,

    // === Player ===
    pub player_size: f32,
    pub player_speed: f32,
    pub player_max_health: u32,

    // === Enemies ===
    pub enemy_count: usize,
    pub enemy_size: f32,
    pub enemy_base_speed: f32,
    pub speed_variation_min: f32,
    pub speed_variation_max: f32,
    pub jitter_interval_min: f64,
    pub jitter_interval_max: f64,
    pub jitter_magnitude: f32,
    pub separation_radius: f32,
    pub separation_weight: f32,

    // === Contact damage ===
    /// Milliseconds between damage checks
    pub health_loss_interval: f64,
    pub damage_per_enemy: u32,
    pub max_health_loss_per_interval: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            spawn_max_attempts: SPAWN_MAX_ATTEMPTS,

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            player_max_health: PLAYER_MAX_HEALTH,

            enemy_count: ENEMY_COUNT,
            enemy_size: ENEMY_SIZE,
            enemy_base_speed: ENEMY_BASE_SPEED,
            speed_variation_min: SPEED_VARIATION_MIN,
            speed_variation_max: SPEED_VARIATION_MAX,
            jitter_interval_min: JITTER_INTERVAL_MIN,
            jitter_interval_max: JITTER_INTERVAL_MAX,
            jitter_magnitude: JITTER_MAGNITUDE,
            separation_radius: SEPARATION_RADIUS,
            separation_weight: SEPARATION_WEIGHT,

            health_loss_interval: HEALTH_LOSS_INTERVAL,
            damage_per_enemy: DAMAGE_PER_ENEMY,
            max_health_loss_per_interval: MAX_HEALTH_LOSS_PER_SECOND,
        }
    }
}

impl Tuning {
    /// Environment variable naming a JSON tuning file (native only)
    pub const ENV_PATH: &'static str = "ROGUE_ARENA_TUNING";

    /// Parse tuning from JSON; the result is always [`Tuning::validated`]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::validated)
    }

    /// Repair values the simulation cannot sample from.
    ///
    /// Reversed ranges are swapped, a negative jitter magnitude is made
    /// positive and non-positive actor sizes take their defaults. Equal range
    /// bounds are kept; they pin the value.
    pub fn validated(mut self) -> Self {
        if self.speed_variation_min > self.speed_variation_max {
            log::warn!("speed_variation_min > max, swapping");
            std::mem::swap(&mut self.speed_variation_min, &mut self.speed_variation_max);
        }
        if self.jitter_interval_min > self.jitter_interval_max {
            log::warn!("jitter_interval_min > max, swapping");
            std::mem::swap(&mut self.jitter_interval_min, &mut self.jitter_interval_max);
        }
        if !self.jitter_magnitude.is_finite() {
            log::warn!("Invalid jitter_magnitude, using {}", JITTER_MAGNITUDE);
            self.jitter_magnitude = JITTER_MAGNITUDE;
        } else if self.jitter_magnitude < 0.0 {
            log::warn!("Negative jitter_magnitude {}, using its absolute value", self.jitter_magnitude);
            self.jitter_magnitude = self.jitter_magnitude.abs();
        }
        if !(self.player_size > 0.0) {
            log::warn!("Invalid player_size {}, using {}", self.player_size, PLAYER_SIZE);
            self.player_size = PLAYER_SIZE;
        }
        if !(self.enemy_size > 0.0) {
            log::warn!("Invalid enemy_size {}, using {}", self.enemy_size, ENEMY_SIZE);
            self.enemy_size = ENEMY_SIZE;
        }
        self
    }

    /// Load tuning from the file named by `ROGUE_ARENA_TUNING`, falling back
    /// to defaults if the variable is unset or the file is unreadable.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_PATH) else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::warn!("Failed to parse tuning {}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read tuning {}: {}", path, e);
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }
}

/// Uniform sample from `[min, max)`, or `min` when the range is empty
pub fn sample_range<T, R>(rng: &mut R, min: T, max: T) -> T
where
    T: SampleUniform + PartialOrd + Copy,
    R: Rng + ?Sized,
{
    if min < max { rng.random_range(min..max) } else { min }
}
