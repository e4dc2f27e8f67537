//! Axis-aligned rectangles and the legal offset range derived from them

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in page pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle with its top-left corner at `origin`
    pub fn from_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, origin.x + size.x, origin.y + size.y)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.left + self.width() / 2.0,
            self.top + self.height() / 2.0,
        )
    }

    /// Collision radius: half the rendered width (bodies are round)
    #[inline]
    pub fn radius(&self) -> f32 {
        self.width() / 2.0
    }

    pub fn translate(&self, by: Vec2) -> Self {
        Self::new(
            self.left + by.x,
            self.top + by.y,
            self.right + by.x,
            self.bottom + by.y,
        )
    }

    /// Grow every edge outward by `margin`
    pub fn expand(&self, margin: f32) -> Self {
        Self::new(
            self.left - margin,
            self.top - margin,
            self.right + margin,
            self.bottom + margin,
        )
    }

    /// Whether `other` lies fully inside (edges may touch)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.right <= self.right
            && other.top >= self.top
            && other.bottom <= self.bottom
    }

    /// Whether anything is visible below the top of the viewport
    pub fn is_visible(&self) -> bool {
        self.bottom > 0.0
    }
}

/// Legal offset range for one body inside a container.
///
/// Any offset inside `[x_min, x_max] x [y_min, y_max]` keeps the body's
/// rendered rectangle inside the container. If the body is wider (or taller)
/// than the container the range is empty on that axis (`min > max`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovableRange {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl MovableRange {
    /// Range for a body whose un-offset layout rectangle is `natural`
    pub fn between(natural: &Rect, container: &Rect) -> Self {
        Self {
            x_min: container.left - natural.left,
            x_max: container.right - natural.right,
            y_min: container.top - natural.top,
            y_max: container.bottom - natural.bottom,
        }
    }

    pub fn contains(&self, offset: Vec2) -> bool {
        offset.x >= self.x_min
            && offset.x <= self.x_max
            && offset.y >= self.y_min
            && offset.y <= self.y_max
    }

    /// Nearest offset inside the range.
    ///
    /// On an empty axis the low edge wins, so an oversized body stays
    /// aligned with the container's left/top edge.
    pub fn clamp_offset(&self, offset: Vec2) -> Vec2 {
        Vec2::new(
            clamp_axis(offset.x, self.x_min, self.x_max),
            clamp_axis(offset.y, self.y_min, self.y_max),
        )
    }
}

#[inline]
fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    if value < min || min > max {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_geometry() {
        let r = Rect::from_size(Vec2::new(10.0, 20.0), Vec2::new(40.0, 30.0));
        assert_eq!(r, Rect::new(10.0, 20.0, 50.0, 50.0));
        assert_eq!(r.width(), 40.0);
        assert_eq!(r.height(), 30.0);
        assert_eq!(r.center(), Vec2::new(30.0, 35.0));
        assert_eq!(r.radius(), 20.0);
        assert_eq!(
            r.translate(Vec2::new(-10.0, 5.0)),
            Rect::new(0.0, 25.0, 40.0, 55.0)
        );
    }

    #[test]
    fn test_movable_range_keeps_body_inside() {
        let container = Rect::new(0.0, 0.0, 300.0, 300.0);
        let natural = Rect::from_size(Vec2::new(100.0, 50.0), Vec2::splat(20.0));
        let range = MovableRange::between(&natural, &container);

        assert_eq!(range.x_min, -100.0);
        assert_eq!(range.x_max, 180.0);
        assert_eq!(range.y_min, -50.0);
        assert_eq!(range.y_max, 230.0);

        for offset in [
            Vec2::new(range.x_min, range.y_min),
            Vec2::new(range.x_max, range.y_max),
            Vec2::new(0.0, 0.0),
        ] {
            assert!(range.contains(offset));
            assert!(container.contains_rect(&natural.translate(offset)));
        }
        assert!(!range.contains(Vec2::new(181.0, 0.0)));
    }

    #[test]
    fn test_clamp_offset() {
        let range = MovableRange {
            x_min: -10.0,
            x_max: 10.0,
            y_min: 0.0,
            y_max: 5.0,
        };
        assert_eq!(
            range.clamp_offset(Vec2::new(20.0, -3.0)),
            Vec2::new(10.0, 0.0)
        );
        assert_eq!(range.clamp_offset(Vec2::new(1.0, 2.0)), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_clamp_offset_oversized_body_aligns_low_edge() {
        let container = Rect::new(0.0, 0.0, 50.0, 50.0);
        let natural = Rect::from_size(Vec2::ZERO, Vec2::new(80.0, 20.0));
        let range = MovableRange::between(&natural, &container);
        assert!(range.x_min > range.x_max);
        assert_eq!(range.clamp_offset(Vec2::new(-40.0, 0.0)).x, 0.0);
        assert_eq!(range.clamp_offset(Vec2::new(10.0, 0.0)).x, 0.0);
    }
}
