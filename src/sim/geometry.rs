//! Axis-aligned rectangle geometry
//!
//! Everything in the arena (walls, player, enemies) collides as an
//! unrotated box. Overlap is half-open: boxes that only share an edge
//! do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::layout::Wall;

/// An axis-aligned rectangle in arena pixel coordinates (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "rect must have positive size");
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `size` centered on `center`
    pub fn centered(center: Vec2, size: f32) -> Self {
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
    }

    /// Top-left corner
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Same size, moved so its top-left corner sits at `pos`
    pub fn with_pos(&self, pos: Vec2) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            ..*self
        }
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        self.with_pos(self.pos() + delta)
    }

    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(self, other)
    }
}

/// Half-open overlap test (touching edges are not an overlap)
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// True if `rect` overlaps the bounding box of any wall.
///
/// Wall rotation is ignored here.
pub fn collides_with_any(rect: &Rect, walls: &[Wall]) -> bool {
    walls.iter().any(|wall| overlaps(rect, &wall.rect))
}

/// Keep `rect` fully inside a `width` x `height` arena
pub fn clamp_to_arena(rect: &Rect, width: f32, height: f32) -> Rect {
    // max() first so an oversized rect pins to 0 instead of panicking in clamp()
    let max_x = (width - rect.width).max(0.0);
    let max_y = (height - rect.height).max(0.0);
    Rect {
        x: rect.x.clamp(0.0, max_x),
        y: rect.y.clamp(0.0, max_y),
        ..*rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        let corner = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &below));
        assert!(!overlaps(&a, &corner));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_collides_with_any() {
        let walls = vec![
            Wall::new(Rect::new(100.0, 0.0, 20.0, 200.0)),
            Wall::rotated(Rect::new(300.0, 300.0, 50.0, 50.0), 0.7),
        ];
        assert!(collides_with_any(&Rect::new(110.0, 50.0, 10.0, 10.0), &walls));
        // Rotated walls still collide on their unrotated box
        assert!(collides_with_any(&Rect::new(301.0, 301.0, 2.0, 2.0), &walls));
        assert!(!collides_with_any(&Rect::new(200.0, 50.0, 10.0, 10.0), &walls));
        assert!(!collides_with_any(&Rect::new(0.0, 0.0, 10.0, 10.0), &[]));
    }

    #[test]
    fn test_clamp_to_arena() {
        let r = Rect::new(-15.0, 700.0, 30.0, 30.0);
        let clamped = clamp_to_arena(&r, 800.0, 600.0);
        assert_eq!(clamped.x, 0.0);
        assert_eq!(clamped.y, 570.0);
        assert_eq!(clamped.width, 30.0);

        let inside = Rect::new(100.0, 100.0, 30.0, 30.0);
        assert_eq!(clamp_to_arena(&inside, 800.0, 600.0), inside);
    }

    #[test]
    fn test_centered() {
        let r = Rect::centered(Vec2::new(50.0, 60.0), 20.0);
        assert_eq!(r.pos(), Vec2::new(40.0, 50.0));
        assert_eq!(r.center(), Vec2::new(50.0, 60.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn rect() -> impl Strategy<Value = Rect> {
            (-500.0f32..1500.0, -500.0f32..1500.0, 1.0f32..300.0, 1.0f32..300.0)
                .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
        }

        proptest! {
            #[test]
            fn overlap_is_symmetric(a in rect(), b in rect()) {
                prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
            }

            #[test]
            fn clamped_rect_stays_in_bounds(
                r in rect(),
                width in 300.0f32..1200.0,
                height in 300.0f32..1200.0,
            ) {
                prop_assume!(r.width <= width && r.height <= height);
                let c = clamp_to_arena(&r, width, height);
                prop_assert!(c.x >= 0.0 && c.x <= width - c.width);
                prop_assert!(c.y >= 0.0 && c.y <= height - c.height);
            }
        }
    }
}
