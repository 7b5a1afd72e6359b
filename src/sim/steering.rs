//! Enemy steering
//!
//! Each tick every enemy combines three influences:
//! - a chase vector toward the player, scaled by its current speed
//! - a separation push away from nearby enemies
//! - a small random jitter that is re-rolled every 0.5-1.5 s
//!
//! The proposed move is committed only if it keeps the enemy out of every
//! wall; otherwise the enemy holds still for the tick.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::actor::Enemy;
use super::geometry::{Rect, collides_with_any};
use super::layout::Wall;
use crate::tuning::{Tuning, sample_range};

/// Advance the jitter timer and re-roll jitter, speed and interval when it fires
pub fn refresh_jitter(enemy: &mut Enemy, dt: f64, tuning: &Tuning, rng: &mut Pcg32) {
    let steering = &mut enemy.kind;
    steering.jitter_timer += dt;
    if steering.jitter_timer < steering.jitter_interval {
        return;
    }

    let m = tuning.jitter_magnitude.abs();
    steering.direction_jitter = Vec2::new(rng.random_range(-m..=m), rng.random_range(-m..=m));
    steering.jitter_interval = sample_range(rng, tuning.jitter_interval_min, tuning.jitter_interval_max);
    steering.jitter_timer = 0.0;
    enemy.speed = steering.base_speed * steering.speed_variation;
}

/// Push away from every other center within `radius`, weighted by closeness.
///
/// Coincident centers contribute nothing (no direction to push in).
pub fn separation_force(index: usize, centers: &[Vec2], radius: f32) -> Vec2 {
    let me = centers[index];
    let mut force = Vec2::ZERO;
    for (j, &other) in centers.iter().enumerate() {
        if j == index {
            continue;
        }
        let away = me - other;
        let distance = away.length();
        if distance > 0.0 && distance < radius {
            force += away * (1.0 - distance / radius);
        }
    }
    force
}

/// Unit vector from `from` toward `to`, scaled by `speed` (zero if coincident)
#[inline]
pub fn attraction(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    (to - from).normalize_or_zero() * speed
}

/// Run one steering step for the whole roster.
///
/// Separation uses the positions from the start of the tick, so the result
/// does not depend on roster order.
pub fn steer_enemies(
    enemies: &mut [Enemy],
    player: &Rect,
    walls: &[Wall],
    dt: f64,
    tuning: &Tuning,
    rng: &mut Pcg32,
) {
    let centers: Vec<Vec2> = enemies.iter().map(|e| e.center()).collect();
    let target = player.center();

    for (i, enemy) in enemies.iter_mut().enumerate() {
        refresh_jitter(enemy, dt, tuning, rng);

        let separation = separation_force(i, &centers, tuning.separation_radius);
        let chase = attraction(centers[i], target, enemy.speed);
        let step = chase + enemy.kind.direction_jitter + separation * tuning.separation_weight;

        let proposed = enemy.rect.translated(step);
        if !collides_with_any(&proposed, walls) {
            enemy.rect = proposed;
        }
    }
}
