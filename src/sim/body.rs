//! Body state
//!
//! A body is one movable page element. Its offset is the single source of
//! truth for where it is drawn; the rendered rectangle is always derived as
//! `natural + offset`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::{MovableRange, Rect};

/// Registry handle for a body (its registration index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub usize);

impl BodyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A movable body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    /// Surface identity of the element this body drives
    pub key: String,
    /// Cumulative displacement from the natural layout position (px)
    pub offset: Vec2,
    /// Displacement per tick (px)
    pub velocity: Vec2,
    /// Layout rectangle with no offset applied
    pub natural: Rect,
}

impl Body {
    pub fn new(id: BodyId, key: impl Into<String>, natural: Rect) -> Self {
        Self {
            id,
            key: key.into(),
            offset: Vec2::ZERO,
            velocity: Vec2::ZERO,
            natural,
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Where the body is currently drawn
    #[inline]
    pub fn rendered(&self) -> Rect {
        self.natural.translate(self.offset)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rendered().center()
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.natural.radius()
    }

    /// Legal offsets for this body inside `container`, computed fresh
    #[inline]
    pub fn range(&self, container: &Rect) -> MovableRange {
        MovableRange::between(&self.natural, container)
    }

    /// Re-derive the natural rectangle from a fresh measurement of the
    /// rendered element (after reflow or a breakpoint switch)
    pub fn remeasure(&mut self, rendered: Rect) {
        self.natural = rendered.translate(-self.offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_follows_offset() {
        let natural = Rect::from_size(Vec2::new(10.0, 10.0), Vec2::splat(20.0));
        let body = Body::new(BodyId(0), "circle", natural)
            .with_offset(Vec2::new(5.0, -5.0));
        assert_eq!(body.rendered(), Rect::new(15.0, 5.0, 35.0, 25.0));
        assert_eq!(body.center(), Vec2::new(25.0, 15.0));
        assert_eq!(body.radius(), 10.0);
    }

    #[test]
    fn test_remeasure_keeps_offset() {
        let natural = Rect::from_size(Vec2::ZERO, Vec2::splat(20.0));
        let mut body = Body::new(BodyId(1), "circle", natural)
            .with_offset(Vec2::new(30.0, 40.0));

        // Element reflowed 100px to the right and grew to 30px
        let measured = Rect::from_size(Vec2::new(130.0, 40.0), Vec2::splat(30.0));
        body.remeasure(measured);

        assert_eq!(body.offset, Vec2::new(30.0, 40.0));
        assert_eq!(
            body.natural,
            Rect::from_size(Vec2::new(100.0, 0.0), Vec2::splat(30.0))
        );
        assert_eq!(body.rendered(), measured);
    }
}
