//! Bouncefield - autonomous bouncing bodies inside a page container
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (integration, reflection, collisions, containment)
//! - `surface`: Rendering/layout surface abstraction (headless + DOM)
//! - `settings`: Data-driven configuration
//! - `error`: Error types shared by the modules above

pub mod error;
pub mod settings;
pub mod sim;
pub mod surface;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{SettingsError, SimError, SurfaceError};
pub use settings::Settings;
pub use sim::{Body, BodyId, FrameReport, MovableRange, Rect, Simulation};
pub use surface::{HeadlessSurface, LayoutSurface};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Default per-tick velocity (px/tick) given to every body
    pub const DEFAULT_VELOCITY: (f32, f32) = (1.0, 1.0);
    /// `max-width` media breakpoint below which the page is in compact mode
    pub const COMPACT_MAX_WIDTH: f32 = 992.0;

    /// Container holding all movable bodies
    pub const CONTAINER_SELECTOR: &str = ".ping-pong";
    /// Anything whose class mentions "circle" is a movable body
    pub const BODY_SELECTOR: &str = "[class*=\"circle\"]";

    /// Headless scene defaults (native demo)
    pub const HEADLESS_WIDTH: f32 = 1280.0;
    pub const HEADLESS_HEIGHT: f32 = 720.0;
    pub const HEADLESS_BODY_COUNT: usize = 5;
    pub const HEADLESS_BODY_DIAMETER: f32 = 80.0;
    pub const HEADLESS_FRAMES: u64 = 600;
}

/// Render an offset as a CSS translate transform
#[inline]
pub fn format_translate(offset: Vec2) -> String {
    format!("translate({}px, {}px)", offset.x, offset.y)
}

/// Parse a `translate(Xpx, Ypx)` transform back into an offset.
///
/// Missing or malformed input yields `(0, 0)`.
pub fn parse_translate(transform: &str) -> Vec2 {
    parse_translate_parts(transform).unwrap_or(Vec2::ZERO)
}

fn parse_translate_parts(transform: &str) -> Option<Vec2> {
    let start = transform.find("translate(")? + "translate(".len();
    let rest = &transform[start..];
    let inner = &rest[..rest.find(')')?];
    let (x, y) = inner.split_once(',')?;
    let x = x.trim().strip_suffix("px")?.parse::<f32>().ok()?;
    let y = y.trim().strip_suffix("px")?.parse::<f32>().ok()?;
    if x.is_finite() && y.is_finite() {
        Some(Vec2::new(x, y))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_roundtrip() {
        let offset = Vec2::new(5.0, -12.5);
        assert_eq!(format_translate(offset), "translate(5px, -12.5px)");
        assert_eq!(parse_translate(&format_translate(offset)), offset);
    }

    #[test]
    fn test_parse_translate_tolerates_spacing() {
        assert_eq!(parse_translate("translate(3px,4px)"), Vec2::new(3.0, 4.0));
        assert_eq!(
            parse_translate("scale(2) translate( -1.5px ,  2px )"),
            Vec2::new(-1.5, 2.0)
        );
    }

    #[test]
    fn test_parse_translate_malformed_is_zero() {
        assert_eq!(parse_translate(""), Vec2::ZERO);
        assert_eq!(parse_translate("none"), Vec2::ZERO);
        assert_eq!(parse_translate("translate(3px)"), Vec2::ZERO);
        assert_eq!(parse_translate("translate(apx, 2px)"), Vec2::ZERO);
        assert_eq!(parse_translate("translate(3em, 2px)"), Vec2::ZERO);
        assert_eq!(parse_translate("translate(3px, 2px"), Vec2::ZERO);
    }
}
