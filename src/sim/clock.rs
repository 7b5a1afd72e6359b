//! Simulation clock and contact damage
//!
//! Ticks arrive at whatever cadence the host provides, so elapsed time is
//! measured from timestamps rather than assumed. Damage is applied at most
//! once per tick when a full interval has accumulated; leftover time carries
//! over to the next interval.

use serde::{Deserialize, Serialize};

use super::actor::Player;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationClock {
    /// Timestamp of the last tick (ms)
    pub last_update: f64,
    /// Time accumulated toward the next damage check (ms)
    pub health_loss_timer: f64,
    pub health_loss_interval: f64,
    pub damage_per_enemy: u32,
    pub max_health_loss_per_interval: u32,
}

impl SimulationClock {
    pub fn new(now: f64, tuning: &Tuning) -> Self {
        Self {
            last_update: now,
            health_loss_timer: 0.0,
            health_loss_interval: tuning.health_loss_interval,
            damage_per_enemy: tuning.damage_per_enemy,
            max_health_loss_per_interval: tuning.max_health_loss_per_interval,
        }
    }

    /// Elapsed time since the last tick. Timestamps going backwards count as zero.
    pub fn advance(&mut self, now: f64) -> f64 {
        let delta = (now - self.last_update).max(0.0);
        self.last_update = now;
        delta
    }

    /// Forget time spent while paused
    pub fn rebaseline(&mut self, now: f64) {
        self.last_update = now;
    }
}

/// Result of one damage check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageReport {
    pub touching: usize,
    pub damage: u32,
}

/// Damage dealt for `touching` simultaneous contacts
#[inline]
pub fn contact_damage(touching: usize, per_enemy: u32, cap: u32) -> u32 {
    if touching == 0 {
        return 0;
    }
    let raw = (touching as u32).saturating_mul(per_enemy);
    raw.min(cap)
}

/// Accumulate `delta` and, once a full interval is available, damage the
/// player for the `touching` enemies currently overlapping it.
///
/// Returns `None` when no interval elapsed this tick. Surviving an interval
/// earns one point of score.
pub fn apply_contact_damage(
    clock: &mut SimulationClock,
    player: &mut Player,
    touching: usize,
    delta: f64,
) -> Option<DamageReport> {
    clock.health_loss_timer += delta;
    if clock.health_loss_timer < clock.health_loss_interval {
        return None;
    }
    clock.health_loss_timer -= clock.health_loss_interval;

    let damage = contact_damage(touching, clock.damage_per_enemy, clock.max_health_loss_per_interval);
    player.take_damage(damage);
    if !player.is_dead() {
        player.kind.score += 1;
    }

    Some(DamageReport { touching, damage })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn setup() -> (SimulationClock, Player) {
        let tuning = Tuning::default();
        let player = Player::spawn(Vec2::new(400.0, 300.0), 1, &tuning);
        (SimulationClock::new(0.0, &tuning), player)
    }

    #[test]
    fn test_contact_damage_table() {
        assert_eq!(contact_damage(0, 10, 50), 0);
        assert_eq!(contact_damage(1, 10, 50), 10);
        assert_eq!(contact_damage(3, 10, 50), 30);
        assert_eq!(contact_damage(5, 10, 50), 50);
        assert_eq!(contact_damage(6, 10, 50), 50);
    }

    #[test]
    fn test_clock_advance_and_rebaseline() {
        let tuning = Tuning::default();
        let mut clock = SimulationClock::new(100.0, &tuning);
        assert_eq!(clock.advance(116.0), 16.0);
        assert_eq!(clock.advance(110.0), 0.0);
        clock.rebaseline(5000.0);
        assert_eq!(clock.advance(5016.0), 16.0);
    }

    #[test]
    fn test_no_contact_no_damage() {
        let (mut clock, mut player) = setup();
        for _ in 0..100 {
            apply_contact_damage(&mut clock, &mut player, 0, 250.0);
        }
        assert_eq!(player.health(), 250);
        assert_eq!(player.kind.score, 25);
    }

    #[test]
    fn test_three_enemies_one_interval() {
        let (mut clock, mut player) = setup();
        let touching = 3;
        assert_eq!(apply_contact_damage(&mut clock, &mut player, touching, 999.0), None);
        assert_eq!(player.health(), 250);
        let report = apply_contact_damage(&mut clock, &mut player, touching, 1.0);
        assert_eq!(report, Some(DamageReport { touching: 3, damage: 30 }));
        assert_eq!(player.health(), 220);
    }

    #[test]
    fn test_partial_interval_carries_over() {
        let (mut clock, mut player) = setup();
        let touching = 1;
        apply_contact_damage(&mut clock, &mut player, touching, 1400.0);
        assert_eq!(player.health(), 240);
        assert!((clock.health_loss_timer - 400.0).abs() < 1e-9);
        apply_contact_damage(&mut clock, &mut player, touching, 600.0);
        assert_eq!(player.health(), 230);
    }

    #[test]
    fn test_single_check_per_tick() {
        // A long stall only triggers one interval this tick
        let (mut clock, mut player) = setup();
        let touching = 2;
        apply_contact_damage(&mut clock, &mut player, touching, 3500.0);
        assert_eq!(player.health(), 230);
        assert!((clock.health_loss_timer - 2500.0).abs() < 1e-9);
    }

    #[test]
    fn test_damage_settings_come_from_tuning() {
        let tuning = Tuning {
            damage_per_enemy: 7,
            max_health_loss_per_interval: 20,
            ..Tuning::default()
        };
        let mut clock = SimulationClock::new(0.0, &tuning);
        let mut player = Player::spawn(Vec2::new(400.0, 300.0), 1, &tuning);
        let report = apply_contact_damage(&mut clock, &mut player, 2, 1000.0);
        assert_eq!(report, Some(DamageReport { touching: 2, damage: 14 }));
        let report = apply_contact_damage(&mut clock, &mut player, 5, 1000.0);
        assert_eq!(report, Some(DamageReport { touching: 5, damage: 20 }));
    }

    #[test]
    fn test_health_floor_at_zero() {
        let (mut clock, mut player) = setup();
        let touching = 6;
        for _ in 0..10 {
            apply_contact_damage(&mut clock, &mut player, touching, 1000.0);
        }
        assert_eq!(player.health(), 0);
        assert!(player.is_dead());
        assert_eq!(player.kind.score, 4);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn health_never_increases(
                touching in 0usize..8,
                deltas in proptest::collection::vec(0.0f64..2500.0, 1..40),
            ) {
                let (mut clock, mut player) = setup();
                let mut last = player.health();
                for delta in deltas {
                    apply_contact_damage(&mut clock, &mut player, touching, delta);
                    prop_assert!(player.health() <= last);
                    prop_assert!(last - player.health() <= clock.max_health_loss_per_interval);
                    last = player.health();
                }
            }
        }
    }
}
