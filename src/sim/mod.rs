//! Arena simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - Elapsed time comes in as timestamps, never read from a system clock
//! - Seeded RNG only
//! - No rendering or DOM dependencies

pub mod actor;
pub mod clock;
pub mod geometry;
pub mod layout;
pub mod state;
pub mod steering;
pub mod tick;

pub use actor::{ActorView, Direction, Enemy, EnemySteering, Player, PlayerStats};
pub use clock::{DamageReport, SimulationClock, apply_contact_damage, contact_damage};
pub use geometry::{Rect, clamp_to_arena, collides_with_any, overlaps};
pub use layout::{
    Arena, LAYOUTS, LayoutSelection, NamedLayout, Wall, border_walls, find_layout,
    find_valid_spawn_point, procedural_walls,
};
pub use state::{GamePhase, Snapshot, World};
pub use steering::steer_enemies;
pub use tick::{Game, TickOutcome, move_player, tick};
