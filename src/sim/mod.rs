//! Bounce simulation module
//!
//! All motion logic lives here. It stays free of page access:
//! - Geometry comes in through the driver's surface
//! - Seeded RNG only
//! - Stable iteration order (by registration index)

pub mod body;
pub mod collision;
pub mod contain;
pub mod driver;
pub mod motion;
pub mod rect;
pub mod timeline;

pub use body::{Body, BodyId};
pub use collision::{Overlap, overlap, resolve_collisions};
pub use contain::contain;
pub use driver::{FrameReport, Simulation};
pub use motion::{Reflection, integrate, next_offset, reflect};
pub use rect::{MovableRange, Rect};
pub use timeline::{SourceState, TickHandle, Timeline};
