//! Per-tick motion: integration and boundary reflection
//!
//! Both work in offset space. A body's rendered edge crosses the container
//! edge exactly when its offset leaves the body's [`MovableRange`], so the
//! reflection test against the range is the same as the test against the
//! container's edges.

use glam::Vec2;

use super::body::Body;
use super::rect::MovableRange;

/// Which velocity components were inverted by a reflection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reflection {
    pub x: bool,
    pub y: bool,
}

impl Reflection {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Offset the body will have after one more tick
#[inline]
pub fn next_offset(body: &Body) -> Vec2 {
    body.offset + body.velocity
}

/// Advance a body by one tick's velocity and return the new offset
#[inline]
pub fn integrate(body: &mut Body) -> Vec2 {
    body.offset = next_offset(body);
    body.offset
}

/// Invert each velocity component whose leading edge would reach or cross
/// the container on the next tick.
///
/// The leading edge is the one facing the direction of travel, so a body
/// already outside the container and heading back in is left alone. Axes are
/// independent (a corner bounce flips both). Position is never clamped here.
pub fn reflect(body: &mut Body, range: &MovableRange) -> Reflection {
    let next = next_offset(body);
    let reflection = Reflection {
        x: crosses(body.velocity.x, next.x, range.x_min, range.x_max),
        y: crosses(body.velocity.y, next.y, range.y_min, range.y_max),
    };
    if reflection.x {
        body.velocity.x = -body.velocity.x;
    }
    if reflection.y {
        body.velocity.y = -body.velocity.y;
    }
    reflection
}

#[inline]
fn crosses(velocity: f32, next: f32, min: f32, max: f32) -> bool {
    (velocity > 0.0 && next >= max) || (velocity < 0.0 && next <= min)
}
