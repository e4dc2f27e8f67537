//! Body-body collision detection and response
//!
//! Bodies are treated as circles of radius half their rendered width. Two
//! bodies overlap when their centers are closer than the sum of their radii,
//! and the response is a straight velocity swap rather than an impulse along
//! the contact normal.
//!
//! There is no separation step after a swap. Two bodies that stay overlapped
//! swap again on every tick that one of them runs the resolver, which reads
//! as a brief jitter until wall reflections pull them apart.
//!
//! The swap also runs after the wall reflection, so a body that has just
//! turned around at a wall can be handed an outward velocity by a neighbour
//! and carried past the edge for several ticks. A cluster pressed against a
//! wall can push one of its members well outside the container before
//! reflection brings it back. Only a lone body is held to the one-tick
//! overshoot.

use glam::Vec2;

use super::body::{Body, BodyId};

/// A detected overlap between two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    pub other: BodyId,
    /// Distance between rendered centers
    pub distance: f32,
    /// Sum of both radii (the overlap threshold)
    pub combined_radii: f32,
}

impl Overlap {
    /// How far the two circles interpenetrate
    pub fn depth(&self) -> f32 {
        self.combined_radii - self.distance
    }
}

/// Check whether `body` overlaps `other`
pub fn overlap(body: &Body, other: &Body) -> Option<Overlap> {
    overlap_at(body.center(), body.radius(), other)
}

fn overlap_at(center: Vec2, radius: f32, other: &Body) -> Option<Overlap> {
    let distance = center.distance(other.center());
    let combined_radii = radius + other.radius();
    (distance < combined_radii).then_some(Overlap {
        other: other.id,
        distance,
        combined_radii,
    })
}

/// Scan every other body against `bodies[index]` and swap velocities with
/// each one it overlaps, in registration order.
///
/// Returns the ids swapped with. With several overlaps the swaps chain, so
/// the body ends up carrying the velocity of the last one it touched.
pub fn resolve_collisions(bodies: &mut [Body], index: usize) -> Vec<BodyId> {
    let Some(body) = bodies.get(index) else {
        return Vec::new();
    };
    let center = body.center();
    let radius = body.radius();

    let mut swapped = Vec::new();
    for other in 0..bodies.len() {
        if other == index {
            continue;
        }
        if let Some(hit) = overlap_at(center, radius, &bodies[other]) {
            let (a, b) = pair_mut(bodies, index, other);
            std::mem::swap(&mut a.velocity, &mut b.velocity);
            swapped.push(hit.other);
        }
    }
    swapped
}

/// Two distinct mutable elements of a slice
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (lo, hi) = items.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;

    /// Round body of radius 10 centered at `center`
    fn ball(id: usize, center: Vec2, velocity: Vec2) -> Body {
        Body::new(
            BodyId(id),
            format!("circle-{id}"),
            Rect::from_size(center - Vec2::splat(10.0), Vec2::splat(20.0)),
        )
        .with_velocity(velocity)
    }

    #[test]
    fn test_overlap_uses_center_distance() {
        let a = ball(0, Vec2::new(100.0, 100.0), Vec2::ONE);
        let b = ball(1, Vec2::new(105.0, 100.0), -Vec2::ONE);

        let hit = overlap(&a, &b).unwrap();
        assert_eq!(hit.other, BodyId(1));
        assert_eq!(hit.distance, 5.0);
        assert_eq!(hit.combined_radii, 20.0);
        assert_eq!(hit.depth(), 15.0);
    }

    #[test]
    fn test_touching_bodies_do_not_overlap() {
        let a = ball(0, Vec2::new(100.0, 100.0), Vec2::ONE);
        let b = ball(1, Vec2::new(120.0, 100.0), -Vec2::ONE);
        assert!(overlap(&a, &b).is_none());
    }

    #[test]
    fn test_overlapping_bodies_swap_velocities() {
        let mut bodies = vec![
            ball(0, Vec2::new(100.0, 100.0), Vec2::new(1.0, 1.0)),
            ball(1, Vec2::new(103.0, 104.0), Vec2::new(-1.0, -1.0)),
        ];

        let swapped = resolve_collisions(&mut bodies, 0);

        assert_eq!(swapped, vec![BodyId(1)]);
        assert_eq!(bodies[0].velocity, Vec2::new(-1.0, -1.0));
        assert_eq!(bodies[1].velocity, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_swap_repeats_while_still_overlapping() {
        let mut bodies = vec![
            ball(0, Vec2::new(100.0, 100.0), Vec2::new(1.0, 1.0)),
            ball(1, Vec2::new(105.0, 100.0), Vec2::new(-1.0, -1.0)),
        ];

        // One swap per pass, and the pair keeps trading while overlapped
        for pass in 1..=4 {
            assert_eq!(resolve_collisions(&mut bodies, 0).len(), 1);
            let expected = if pass % 2 == 1 { -Vec2::ONE } else { Vec2::ONE };
            assert_eq!(bodies[0].velocity, expected, "pass {pass}");
            assert_eq!(bodies[1].velocity, -expected, "pass {pass}");
        }
    }

    #[test]
    fn test_distant_bodies_keep_velocities() {
        let mut bodies = vec![
            ball(0, Vec2::new(0.0, 0.0), Vec2::new(1.0, 2.0)),
            ball(1, Vec2::new(50.0, 50.0), Vec2::new(3.0, 4.0)),
        ];
        assert!(resolve_collisions(&mut bodies, 1).is_empty());
        assert_eq!(bodies[0].velocity, Vec2::new(1.0, 2.0));
        assert_eq!(bodies[1].velocity, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_multiple_overlaps_chain_in_registration_order() {
        let mut bodies = vec![
            ball(0, Vec2::new(95.0, 100.0), Vec2::new(0.0, 1.0)),
            ball(1, Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0)),
            ball(2, Vec2::new(105.0, 100.0), Vec2::new(0.0, -1.0)),
        ];

        let swapped = resolve_collisions(&mut bodies, 1);

        assert_eq!(swapped, vec![BodyId(0), BodyId(2)]);
        // 1 <-> 0 first, then 1 (now carrying 0's velocity) <-> 2
        assert_eq!(bodies[0].velocity, Vec2::new(1.0, 0.0));
        assert_eq!(bodies[1].velocity, Vec2::new(0.0, -1.0));
        assert_eq!(bodies[2].velocity, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_out_of_range_index_is_ignored() {
        let mut bodies = vec![ball(0, Vec2::ZERO, Vec2::ONE)];
        assert!(resolve_collisions(&mut bodies, 3).is_empty());
    }

    #[test]
    fn test_pair_mut_either_order() {
        let mut items = [1, 2, 3];
        let (a, b) = pair_mut(&mut items, 2, 0);
        std::mem::swap(a, b);
        assert_eq!(items, [3, 2, 1]);
    }
}
