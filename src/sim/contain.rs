//! One-shot containment correction
//!
//! Run after a layout change (and once at startup) to pull any body that
//! ended up partly outside the container back inside. Only the offset moves;
//! velocity is never touched.

use glam::Vec2;

use super::body::Body;
use super::rect::Rect;

/// Shift `body` by the smallest translation that puts it fully inside
/// `container`, returning the translation applied (zero if already inside).
pub fn contain(body: &mut Body, container: &Rect) -> Vec2 {
    let range = body.range(container);
    let corrected = range.clamp_offset(body.offset);
    let delta = corrected - body.offset;
    body.offset = corrected;
    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::BodyId;
    use proptest::prelude::*;

    fn container() -> Rect {
        Rect::new(0.0, 0.0, 300.0, 300.0)
    }

    fn body(offset: Vec2) -> Body {
        Body::new(
            BodyId(0),
            "circle",
            Rect::from_size(Vec2::new(50.0, 50.0), Vec2::splat(20.0)),
        )
        .with_offset(offset)
        .with_velocity(Vec2::new(3.0, -2.0))
    }

    #[test]
    fn test_inside_body_is_untouched() {
        let mut b = body(Vec2::new(10.0, 10.0));
        assert_eq!(contain(&mut b, &container()), Vec2::ZERO);
        assert_eq!(b.offset, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_pulls_back_minimal_translation() {
        // Rendered at (-30..-10, 330..350): left of and below the container
        let mut b = body(Vec2::new(-80.0, 280.0));
        let delta = contain(&mut b, &container());

        assert_eq!(delta, Vec2::new(30.0, -50.0));
        assert_eq!(b.rendered(), Rect::new(0.0, 280.0, 20.0, 300.0));
        assert_eq!(b.velocity, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_container_shrunk_under_body() {
        let mut b = body(Vec2::new(200.0, 0.0));
        let shrunk = Rect::new(0.0, 0.0, 150.0, 300.0);
        assert_eq!(contain(&mut b, &shrunk), Vec2::new(-120.0, 0.0));
        assert!(shrunk.contains_rect(&b.rendered()));
    }

    #[test]
    fn test_second_pass_is_a_no_op() {
        let mut b = body(Vec2::new(500.0, -500.0));
        contain(&mut b, &container());
        assert_eq!(contain(&mut b, &container()), Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_contain_is_idempotent_and_velocity_preserving(
            ox in -1000.0f32..1000.0,
            oy in -1000.0f32..1000.0,
            size in 1.0f32..300.0,
        ) {
            let natural = Rect::from_size(Vec2::new(40.0, 40.0), Vec2::splat(size));
            let mut b = Body::new(BodyId(0), "circle", natural)
                .with_offset(Vec2::new(ox, oy))
                .with_velocity(Vec2::new(1.0, 1.0));

            contain(&mut b, &container());
            prop_assert!(container().expand(1e-3).contains_rect(&b.rendered()));

            let settled = b.offset;
            prop_assert_eq!(contain(&mut b, &container()), Vec2::ZERO);
            prop_assert_eq!(b.offset, settled);
            prop_assert_eq!(b.velocity, Vec2::new(1.0, 1.0));
        }
    }
}
