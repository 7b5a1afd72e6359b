//! Arena layouts: static walls and spawn placement
//!
//! A layout is either one of the hand-authored patterns in [`LAYOUTS`]
//! (expressed as fractions of the arena size so they scale with the canvas),
//! a procedural scatter of internal walls, or an open field with no walls.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, collides_with_any};

/// A static obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub rect: Rect,
    /// Decorative rotation in radians (drawn only, never collided)
    #[serde(default)]
    pub rotation: f32,
}

impl Wall {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            rotation: 0.0,
        }
    }

    pub fn rotated(rect: Rect, rotation: f32) -> Self {
        Self { rect, rotation }
    }
}

/// Which wall set to build for a new arena
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LayoutSelection {
    /// A pattern from [`LAYOUTS`], looked up by name
    Named(String),
    /// Border ring plus a few random internal walls
    #[default]
    Procedural,
    /// No walls; actors are held in by the arena bounds
    Open,
}

/// Wall rectangle as fractions of arena width/height
#[derive(Debug, Clone, Copy)]
struct FracRect {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    rotation: f32,
}

const fn fr(x: f32, y: f32, w: f32, h: f32) -> FracRect {
    FracRect {
        x,
        y,
        w,
        h,
        rotation: 0.0,
    }
}

const fn frr(x: f32, y: f32, w: f32, h: f32, rotation: f32) -> FracRect {
    FracRect { x, y, w, h, rotation }
}

/// A hand-authored wall pattern
#[derive(Debug)]
pub struct NamedLayout {
    pub name: &'static str,
    /// Add the border ring around the pattern
    pub outer_walls: bool,
    walls: &'static [FracRect],
}

impl NamedLayout {
    /// Resolve fractional walls against a concrete arena size
    pub fn walls(&self, width: f32, height: f32) -> Vec<Wall> {
        let mut walls = if self.outer_walls {
            border_walls(width, height, crate::consts::BORDER_THICKNESS)
        } else {
            Vec::new()
        };
        walls.extend(self.walls.iter().map(|f| {
            Wall::rotated(
                Rect::new(f.x * width, f.y * height, f.w * width, f.h * height),
                f.rotation,
            )
        }));
        walls
    }
}

// Standard bar thickness: 20px on an 800x600 arena
const TX: f32 = 0.025;
const TY: f32 = 0.0333;

/// The library of named layouts
pub const LAYOUTS: &[NamedLayout] = &[
    NamedLayout {
        name: "cross",
        outer_walls: true,
        walls: &[fr(0.4875, 0.2, TX, 0.6), fr(0.2, 0.4833, 0.6, TY)],
    },
    NamedLayout {
        name: "double_cross",
        outer_walls: true,
        walls: &[
            fr(0.2375, 0.15, TX, 0.3),
            fr(0.1, 0.2833, 0.3, TY),
            fr(0.7375, 0.55, TX, 0.3),
            fr(0.6, 0.6833, 0.3, TY),
        ],
    },
    NamedLayout {
        name: "spiral",
        outer_walls: true,
        walls: &[
            fr(0.15, 0.15, 0.7, TY),
            fr(0.825, 0.15, TX, 0.7),
            fr(0.25, 0.8167, 0.6, TY),
            fr(0.25, 0.3, TX, 0.55),
            fr(0.25, 0.3, 0.45, TY),
            fr(0.675, 0.3, TX, 0.4),
            fr(0.4, 0.6333, 0.3, TY),
        ],
    },
    NamedLayout {
        name: "chambers",
        outer_walls: true,
        walls: &[
            fr(0.33, 0.0, TX, 0.4),
            fr(0.33, 0.6, TX, 0.4),
            fr(0.66, 0.0, TX, 0.35),
            fr(0.66, 0.55, TX, 0.45),
            fr(0.0, 0.5, 0.15, TY),
            fr(0.85, 0.5, 0.15, TY),
        ],
    },
    NamedLayout {
        name: "diagonal",
        outer_walls: true,
        walls: &[
            frr(0.2, 0.2, 0.25, TY, 0.785),
            frr(0.55, 0.65, 0.25, TY, 0.785),
            frr(0.55, 0.25, 0.25, TY, -0.785),
            frr(0.2, 0.7, 0.25, TY, -0.785),
        ],
    },
    NamedLayout {
        name: "pillars",
        outer_walls: true,
        walls: &[
            fr(0.2, 0.25, 0.05, 0.0667),
            fr(0.475, 0.25, 0.05, 0.0667),
            fr(0.75, 0.25, 0.05, 0.0667),
            fr(0.2, 0.65, 0.05, 0.0667),
            fr(0.475, 0.65, 0.05, 0.0667),
            fr(0.75, 0.65, 0.05, 0.0667),
        ],
    },
    NamedLayout {
        name: "corridors",
        outer_walls: true,
        walls: &[
            fr(0.0, 0.25, 0.75, TY),
            fr(0.25, 0.5, 0.75, TY),
            fr(0.0, 0.75, 0.75, TY),
        ],
    },
    NamedLayout {
        name: "ring",
        outer_walls: false,
        walls: &[
            fr(0.25, 0.2, 0.2, TY),
            fr(0.55, 0.2, 0.2, TY),
            fr(0.25, 0.7667, 0.5, TY),
            fr(0.25, 0.2, TX, 0.25),
            fr(0.25, 0.55, TX, 0.25),
            fr(0.725, 0.2, TX, 0.6),
        ],
    },
    NamedLayout {
        name: "zigzag",
        outer_walls: true,
        walls: &[
            fr(0.15, 0.15, TX, 0.5),
            fr(0.3, 0.35, TX, 0.5),
            fr(0.45, 0.15, TX, 0.5),
            fr(0.6, 0.35, TX, 0.5),
            fr(0.75, 0.15, TX, 0.5),
        ],
    },
    NamedLayout {
        name: "maze",
        outer_walls: true,
        walls: &[
            fr(0.1, 0.2, 0.3, TY),
            fr(0.5, 0.2, 0.4, TY),
            fr(0.1, 0.45, TX, 0.35),
            fr(0.25, 0.4, 0.4, TY),
            fr(0.75, 0.3, TX, 0.4),
            fr(0.3, 0.65, 0.45, TY),
            fr(0.5, 0.65, TX, 0.25),
        ],
    },
    NamedLayout {
        name: "fortress",
        outer_walls: true,
        walls: &[
            // Keep with a gate on every side
            fr(0.35, 0.3, 0.1, TY),
            fr(0.55, 0.3, 0.1, TY),
            fr(0.35, 0.6667, 0.1, TY),
            fr(0.55, 0.6667, 0.1, TY),
            fr(0.35, 0.3, TX, 0.1333),
            fr(0.35, 0.5667, TX, 0.1333),
            fr(0.625, 0.3, TX, 0.1333),
            fr(0.625, 0.5667, TX, 0.1333),
            // Corner towers
            fr(0.1, 0.1, 0.05, 0.0667),
            fr(0.85, 0.1, 0.05, 0.0667),
            fr(0.1, 0.8333, 0.05, 0.0667),
            fr(0.85, 0.8333, 0.05, 0.0667),
        ],
    },
    NamedLayout {
        name: "checker",
        outer_walls: true,
        walls: &[
            fr(0.15, 0.2, 0.06, 0.08),
            fr(0.55, 0.2, 0.06, 0.08),
            fr(0.35, 0.45, 0.06, 0.08),
            fr(0.75, 0.45, 0.06, 0.08),
            fr(0.15, 0.7, 0.06, 0.08),
            fr(0.55, 0.7, 0.06, 0.08),
        ],
    },
    NamedLayout {
        name: "comb",
        outer_walls: true,
        walls: &[
            fr(0.1, 0.15, 0.8, TY),
            fr(0.15, 0.15, TX, 0.45),
            fr(0.35, 0.15, TX, 0.45),
            fr(0.55, 0.15, TX, 0.45),
            fr(0.75, 0.15, TX, 0.45),
        ],
    },
    NamedLayout {
        name: "hourglass",
        outer_walls: true,
        walls: &[
            fr(0.2, 0.15, 0.6, TY),
            fr(0.2, 0.8167, 0.6, TY),
            frr(0.3, 0.3, 0.15, TY, 0.6),
            frr(0.55, 0.3, 0.15, TY, -0.6),
            frr(0.3, 0.65, 0.15, TY, -0.6),
            frr(0.55, 0.65, 0.15, TY, 0.6),
        ],
    },
    NamedLayout {
        name: "labyrinth",
        outer_walls: true,
        walls: &[
            fr(0.1, 0.12, TX, 0.3),
            fr(0.1, 0.12, 0.25, TY),
            fr(0.45, 0.12, 0.45, TY),
            fr(0.2, 0.28, 0.3, TY),
            fr(0.6, 0.28, TX, 0.3),
            fr(0.6, 0.28, 0.25, TY),
            fr(0.1, 0.55, 0.4, TY),
            fr(0.35, 0.55, TX, 0.3),
            fr(0.7, 0.7, 0.2, TY),
            fr(0.5, 0.85, 0.3, TY),
            fr(0.2, 0.7, TX, 0.2),
        ],
    },
    NamedLayout {
        name: "windmill",
        outer_walls: false,
        walls: &[
            fr(0.47, 0.15, TX, 0.3),
            fr(0.53, 0.47, 0.3, TY),
            fr(0.505, 0.55, TX, 0.3),
            fr(0.17, 0.5, 0.3, TY),
        ],
    },
];

/// Look up a named layout and its 1-based position in the library
pub fn find_layout(name: &str) -> Option<(usize, &'static NamedLayout)> {
    LAYOUTS
        .iter()
        .enumerate()
        .find(|(_, layout)| layout.name == name)
        .map(|(i, layout)| (i + 1, layout))
}

/// The four walls forming the arena's outer ring
pub fn border_walls(width: f32, height: f32, thickness: f32) -> Vec<Wall> {
    vec![
        Wall::new(Rect::new(0.0, 0.0, width, thickness)),
        Wall::new(Rect::new(0.0, height - thickness, width, thickness)),
        Wall::new(Rect::new(0.0, 0.0, thickness, height)),
        Wall::new(Rect::new(width - thickness, 0.0, thickness, height)),
    ]
}

/// Border ring plus 3-6 randomly sized internal bars
pub fn procedural_walls(width: f32, height: f32, rng: &mut Pcg32) -> Vec<Wall> {
    use crate::consts::BORDER_THICKNESS;

    let mut walls = border_walls(width, height, BORDER_THICKNESS);
    let count = rng.random_range(3..=6);
    let margin = BORDER_THICKNESS * 3.0;

    for _ in 0..count {
        let length = rng.random_range(60.0..=200.0f32);
        let (w, h) = if rng.random_bool(0.5) {
            (length, BORDER_THICKNESS)
        } else {
            (BORDER_THICKNESS, length)
        };
        let x = rng.random_range(margin..=(width - margin - w).max(margin));
        let y = rng.random_range(margin..=(height - margin - h).max(margin));
        walls.push(Wall::new(Rect::new(x, y, w, h)));
    }

    walls
}

/// Static walls plus the bounds that clamp every actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub walls: Vec<Wall>,
    /// Display name of the layout the walls came from
    pub name: String,
    /// 1-based library position for named layouts, 1 otherwise
    pub level: u32,
}

impl Arena {
    /// Build the walls for `selection`.
    ///
    /// Unknown layout names fall back to a procedural arena.
    pub fn generate(selection: &LayoutSelection, width: f32, height: f32, rng: &mut Pcg32) -> Self {
        match selection {
            LayoutSelection::Named(name) => match find_layout(name) {
                Some((position, layout)) => Self {
                    width,
                    height,
                    walls: layout.walls(width, height),
                    name: layout.name.to_string(),
                    level: position as u32,
                },
                None => {
                    log::warn!("Unknown layout '{}', using a procedural arena", name);
                    Self::generate(&LayoutSelection::Procedural, width, height, rng)
                }
            },
            LayoutSelection::Procedural => Self {
                width,
                height,
                walls: procedural_walls(width, height, rng),
                name: "procedural".to_string(),
                level: 1,
            },
            LayoutSelection::Open => Self {
                width,
                height,
                walls: Vec::new(),
                name: "open".to_string(),
                level: 1,
            },
        }
    }

    /// Touches no wall. Bounds are not checked; see [`super::geometry::clamp_to_arena`].
    pub fn is_clear(&self, rect: &Rect) -> bool {
        !collides_with_any(rect, &self.walls)
    }
}

/// Find a center point where an `actor_size` box touches no wall.
///
/// Samples uniformly within `[size/2, dim - size/2]` on both axes. After
/// `max_attempts` misses this returns the arena center, which may itself
/// be inside a wall.
pub fn find_valid_spawn_point(
    walls: &[Wall],
    width: f32,
    height: f32,
    actor_size: f32,
    max_attempts: u32,
    rng: &mut Pcg32,
) -> Vec2 {
    let half = actor_size / 2.0;
    let max_x = (width - half).max(half);
    let max_y = (height - half).max(half);

    for _ in 0..max_attempts {
        let candidate = Vec2::new(rng.random_range(half..=max_x), rng.random_range(half..=max_y));
        if !collides_with_any(&Rect::centered(candidate, actor_size), walls) {
            return candidate;
        }
    }

    log::warn!(
        "No spawn point found after {} attempts, falling back to arena center",
        max_attempts
    );
    Vec2::new(width / 2.0, height / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use rand::SeedableRng;

    #[test]
    fn test_library_size_and_unique_names() {
        assert!(LAYOUTS.len() >= 15);
        for (i, a) in LAYOUTS.iter().enumerate() {
            for b in &LAYOUTS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_named_layout_walls_inside_arena() {
        for layout in LAYOUTS {
            let walls = layout.walls(ARENA_WIDTH, ARENA_HEIGHT);
            assert!(!walls.is_empty(), "{} has no walls", layout.name);
            for wall in &walls {
                assert!(wall.rect.width > 0.0 && wall.rect.height > 0.0);
                assert!(wall.rect.x >= 0.0 && wall.rect.right() <= ARENA_WIDTH + 0.5);
                assert!(wall.rect.y >= 0.0 && wall.rect.bottom() <= ARENA_HEIGHT + 0.5);
            }
        }
    }

    #[test]
    fn test_outer_walls_flag_adds_border() {
        let (_, cross) = find_layout("cross").unwrap();
        assert!(cross.outer_walls);
        let walls = cross.walls(ARENA_WIDTH, ARENA_HEIGHT);
        assert_eq!(walls.len(), 4 + 2);
        assert_eq!(walls[0].rect, Rect::new(0.0, 0.0, ARENA_WIDTH, BORDER_THICKNESS));

        let (_, ring) = find_layout("ring").unwrap();
        assert!(!ring.outer_walls);
        assert_eq!(ring.walls(ARENA_WIDTH, ARENA_HEIGHT).len(), 6);
    }

    #[test]
    fn test_diagonal_layout_keeps_rotation() {
        let (_, diagonal) = find_layout("diagonal").unwrap();
        let walls = diagonal.walls(ARENA_WIDTH, ARENA_HEIGHT);
        assert!(walls.iter().any(|w| w.rotation != 0.0));
    }

    #[test]
    fn test_border_walls_enclose_arena() {
        let walls = border_walls(800.0, 600.0, 20.0);
        assert_eq!(walls.len(), 4);
        // Anything poking out of the playfield hits the ring
        assert!(collides_with_any(&Rect::new(-5.0, 300.0, 10.0, 10.0), &walls));
        assert!(collides_with_any(&Rect::new(400.0, 595.0, 10.0, 10.0), &walls));
        assert!(!collides_with_any(&Rect::new(20.0, 20.0, 760.0, 560.0), &walls));
    }

    #[test]
    fn test_procedural_walls() {
        let mut rng = Pcg32::seed_from_u64(7);
        let walls = procedural_walls(ARENA_WIDTH, ARENA_HEIGHT, &mut rng);
        assert!((4 + 3..=4 + 6).contains(&walls.len()));
        for wall in &walls[4..] {
            assert!(wall.rect.x >= 0.0 && wall.rect.right() <= ARENA_WIDTH);
            assert!(wall.rect.y >= 0.0 && wall.rect.bottom() <= ARENA_HEIGHT);
        }
    }

    #[test]
    fn test_arena_generate_named_and_fallback() {
        let mut rng = Pcg32::seed_from_u64(1);
        let arena = Arena::generate(
            &LayoutSelection::Named("spiral".into()),
            ARENA_WIDTH,
            ARENA_HEIGHT,
            &mut rng,
        );
        assert_eq!(arena.name, "spiral");
        assert_eq!(arena.level, 3);

        let fallback = Arena::generate(
            &LayoutSelection::Named("no-such-layout".into()),
            ARENA_WIDTH,
            ARENA_HEIGHT,
            &mut rng,
        );
        assert_eq!(fallback.name, "procedural");

        let open = Arena::generate(&LayoutSelection::Open, ARENA_WIDTH, ARENA_HEIGHT, &mut rng);
        assert!(open.walls.is_empty());
    }

    #[test]
    fn test_spawn_point_avoids_walls() {
        let mut rng = Pcg32::seed_from_u64(42);
        for layout in LAYOUTS {
            let walls = layout.walls(ARENA_WIDTH, ARENA_HEIGHT);
            for _ in 0..20 {
                let p = find_valid_spawn_point(
                    &walls,
                    ARENA_WIDTH,
                    ARENA_HEIGHT,
                    PLAYER_SIZE,
                    SPAWN_MAX_ATTEMPTS,
                    &mut rng,
                );
                let rect = Rect::centered(p, PLAYER_SIZE);
                let fallback = p == Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);
                assert!(fallback || !collides_with_any(&rect, &walls));
            }
        }
    }

    #[test]
    fn test_spawn_point_falls_back_to_center() {
        let mut rng = Pcg32::seed_from_u64(3);
        let everything = vec![Wall::new(Rect::new(0.0, 0.0, 800.0, 600.0))];
        let p = find_valid_spawn_point(&everything, 800.0, 600.0, 20.0, 10, &mut rng);
        assert_eq!(p, Vec2::new(400.0, 300.0));
    }
}
