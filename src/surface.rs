//! Rendering/layout surface abstraction
//!
//! The simulation never touches the page directly. It measures and draws
//! through [`LayoutSurface`]:
//! - `HeadlessSurface`: in-memory layout, used natively and in tests
//! - `web::DomSurface`: the real page (wasm32 only)

use glam::Vec2;
use rand::Rng;

use crate::error::SurfaceError;
use crate::parse_translate;
use crate::settings::HeadlessScene;
use crate::sim::Rect;

/// Geometry queries and transform writes against whatever draws the bodies
pub trait LayoutSurface {
    /// Current rectangle of the container, if it exists
    fn container_rect(&self) -> Option<Rect>;

    /// Identities of every movable element, in page order
    fn movable_keys(&self) -> Vec<String>;

    /// Current rendered rectangle of an element (transform applied)
    fn element_rect(&self, key: &str) -> Option<Rect>;

    /// Current transform string of an element, if one is set
    fn transform(&self, key: &str) -> Option<String>;

    /// Replace an element's transform
    fn set_transform(&mut self, key: &str, value: &str) -> Result<(), SurfaceError>;
}

#[derive(Debug, Clone)]
struct HeadlessElement {
    key: String,
    natural: Rect,
    transform: Option<String>,
    attached: bool,
}

/// In-memory surface: elements have a layout rectangle and a transform string
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    container: Option<Rect>,
    elements: Vec<HeadlessElement>,
}

impl HeadlessSurface {
    pub fn new(container: Rect) -> Self {
        Self {
            container: Some(container),
            elements: Vec::new(),
        }
    }

    /// Surface whose container cannot be found
    pub fn without_container() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, key: impl Into<String>, natural: Rect) -> Self {
        self.add_element(key, natural);
        self
    }

    pub fn add_element(&mut self, key: impl Into<String>, natural: Rect) {
        self.elements.push(HeadlessElement {
            key: key.into(),
            natural,
            transform: None,
            attached: true,
        });
    }

    /// Lay out `scene.body_count` round bodies at seeded random positions
    pub fn scene<R: Rng>(scene: &HeadlessScene, rng: &mut R) -> Self {
        let container = Rect::new(0.0, 0.0, scene.width, scene.height);
        let mut surface = Self::new(container);
        let size = Vec2::splat(scene.body_diameter);
        let span = Vec2::new(scene.width, scene.height) - size;

        for i in 0..scene.body_count {
            let origin = Vec2::new(random_up_to(rng, span.x), random_up_to(rng, span.y));
            surface.add_element(format!("circle-{}", i + 1), Rect::from_size(origin, size));
        }
        surface
    }

    pub fn set_container(&mut self, container: Option<Rect>) {
        self.container = container;
    }

    /// Move an element's layout rectangle (content reflow)
    pub fn reflow(&mut self, key: &str, natural: Rect) {
        if let Some(element) = self.element_mut(key) {
            element.natural = natural;
        }
    }

    /// Set a transform string as-is, bypassing the simulation
    pub fn set_raw_transform(&mut self, key: &str, value: &str) {
        if let Some(element) = self.element_mut(key) {
            element.transform = Some(value.to_string());
        }
    }

    /// Remove an element from layout; it stays listed but can't be measured
    /// or written
    pub fn detach(&mut self, key: &str) {
        if let Some(element) = self.element_mut(key) {
            element.attached = false;
        }
    }

    fn element(&self, key: &str) -> Option<&HeadlessElement> {
        self.elements.iter().find(|e| e.key == key)
    }

    fn element_mut(&mut self, key: &str) -> Option<&mut HeadlessElement> {
        self.elements.iter_mut().find(|e| e.key == key)
    }
}

fn random_up_to<R: Rng>(rng: &mut R, max: f32) -> f32 {
    if max > 0.0 {
        rng.random_range(0.0..max)
    } else {
        0.0
    }
}

impl LayoutSurface for HeadlessSurface {
    fn container_rect(&self) -> Option<Rect> {
        self.container
    }

    fn movable_keys(&self) -> Vec<String> {
        self.elements.iter().map(|e| e.key.clone()).collect()
    }

    fn element_rect(&self, key: &str) -> Option<Rect> {
        let element = self.element(key).filter(|e| e.attached)?;
        let offset = element
            .transform
            .as_deref()
            .map(parse_translate)
            .unwrap_or(Vec2::ZERO);
        Some(element.natural.translate(offset))
    }

    fn transform(&self, key: &str) -> Option<String> {
        self.element(key)?.transform.clone()
    }

    fn set_transform(&mut self, key: &str, value: &str) -> Result<(), SurfaceError> {
        match self.element_mut(key) {
            Some(element) if element.attached => {
                element.transform = Some(value.to_string());
                Ok(())
            }
            _ => Err(SurfaceError::Detached(key.to_string())),
        }
    }
}
