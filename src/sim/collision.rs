//! Collision detection
//!
//! Plain AABB overlap, with both boxes shrunk inward by a padding margin so
//! near misses on sprite corners don't count as hits.

use glam::Vec2;

use super::state::GameObject;

pub const DEFAULT_PADDING_X: f32 = 8.0;
pub const DEFAULT_PADDING_Y: f32 = 8.0;

/// Padded overlap test with the default 8px margins
#[inline]
pub fn check_collision<A, B>(a: &A, b: &B) -> bool
where
    A: GameObject + ?Sized,
    B: GameObject + ?Sized,
{
    check_collision_padded(a, b, DEFAULT_PADDING_X, DEFAULT_PADDING_Y)
}

/// Check whether the padded interiors of `a` and `b` overlap
///
/// Strict inequalities: boxes that merely touch after padding do not collide.
/// Symmetric in `a` and `b`.
pub fn check_collision_padded<A, B>(a: &A, b: &B, pad_x: f32, pad_y: f32) -> bool
where
    A: GameObject + ?Sized,
    B: GameObject + ?Sized,
{
    let pad = Vec2::new(pad_x, pad_y);
    let (a, b) = (a.bounds(), b.bounds());

    let a_min = a.min() + pad;
    let a_max = a.max() - pad;
    let b_min = b.min() + pad;
    let b_max = b.max() - pad;

    a_min.cmplt(b_max).all() && a_max.cmpgt(b_min).all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Dino, Obstacle, ObstacleKind, Rect};
    use proptest::prelude::*;

    #[test]
    fn test_identical_rects_collide() {
        let r = Rect::new(100.0, 100.0, 40.0, 50.0);
        assert!(check_collision(&r, &r));
        assert!(check_collision_padded(&r, &r, 19.9, 24.9));
        // Padding eats the whole box
        assert!(!check_collision_padded(&r, &r, 20.0, 8.0));
    }

    #[test]
    fn test_padding_forgives_corner_graze() {
        let a = Rect::new(0.0, 0.0, 40.0, 40.0);
        let b = Rect::new(35.0, 35.0, 40.0, 40.0);
        assert!(check_collision_padded(&a, &b, 0.0, 0.0));
        assert!(!check_collision(&a, &b));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 40.0, 40.0);
        let b = Rect::new(40.0, 0.0, 40.0, 40.0);
        assert!(!check_collision_padded(&a, &b, 0.0, 0.0));
    }

    #[test]
    fn test_dino_vs_cactus() {
        let dino = Dino::new(250.0);
        let cactus = Obstacle {
            x: dino.x + 10.0,
            y: 250.0,
            width: 40.0,
            height: 50.0,
            kind: ObstacleKind::Cactus,
            speed: 6.0,
            active: true,
        };
        assert!(check_collision(&dino, &cactus));

        // Same cactus once the dino is high in the air
        let airborne = Dino { y: 150.0, ..dino };
        assert!(!check_collision(&airborne, &cactus));
    }

    fn rect() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 1.0f32..200.0, 1.0f32..200.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_symmetric(a in rect(), b in rect(), px in 0.0f32..30.0, py in 0.0f32..30.0) {
            prop_assert_eq!(
                check_collision_padded(&a, &b, px, py),
                check_collision_padded(&b, &a, px, py)
            );
        }

        #[test]
        fn prop_separated_never_collide(a in rect(), gap in 0.1f32..100.0, pad in 0.0f32..30.0) {
            let b = Rect::new(a.right() + 2.0 * pad + gap, a.y, a.width, a.height);
            prop_assert!(!check_collision_padded(&a, &b, pad, pad));
        }

        #[test]
        fn prop_identical_collide(a in rect(), fx in 0.0f32..0.49, fy in 0.0f32..0.49) {
            let px = a.width * fx;
            let py = a.height * fy;
            prop_assert!(check_collision_padded(&a, &a, px, py));
        }
    }
}
