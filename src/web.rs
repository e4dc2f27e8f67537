//! Browser surface (wasm32 only)
//!
//! Measures elements with `getBoundingClientRect` and draws bodies by writing
//! their inline `transform` style.

use wasm_bindgen::JsCast;
use web_sys::{Document, DomRect, Element, HtmlElement};

use crate::error::SurfaceError;
use crate::settings::Settings;
use crate::sim::Rect;
use crate::surface::LayoutSurface;

/// Page elements found once at startup
pub struct DomSurface {
    container: Option<Element>,
    elements: Vec<(String, HtmlElement)>,
}

impl DomSurface {
    /// Find the container and every movable element on the page.
    ///
    /// Keys are the element's class name plus its page index, so two
    /// elements sharing a class still get distinct identities.
    pub fn discover(document: &Document, settings: &Settings) -> Self {
        let container = document
            .query_selector(&settings.container_selector)
            .ok()
            .flatten();

        let mut elements = Vec::new();
        if let Ok(list) = document.query_selector_all(&settings.body_selector) {
            for i in 0..list.length() {
                let Some(element) = list
                    .get(i)
                    .and_then(|node| node.dyn_into::<HtmlElement>().ok())
                else {
                    continue;
                };
                let key = format!("{}#{}", element.class_name(), i);
                elements.push((key, element));
            }
        }

        log::info!(
            "Found {} movable elements (container {})",
            elements.len(),
            if container.is_some() { "present" } else { "missing" }
        );
        Self {
            container,
            elements,
        }
    }

    pub fn element(&self, key: &str) -> Option<&HtmlElement> {
        self.elements
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, element)| element)
    }
}

fn to_rect(rect: DomRect) -> Rect {
    Rect::new(
        rect.left() as f32,
        rect.top() as f32,
        rect.right() as f32,
        rect.bottom() as f32,
    )
}

impl LayoutSurface for DomSurface {
    fn container_rect(&self) -> Option<Rect> {
        let container = self.container.as_ref().filter(|c| c.is_connected())?;
        Some(to_rect(container.get_bounding_client_rect()))
    }

    fn movable_keys(&self) -> Vec<String> {
        self.elements.iter().map(|(key, _)| key.clone()).collect()
    }

    fn element_rect(&self, key: &str) -> Option<Rect> {
        let element = self.element(key).filter(|e| e.is_connected())?;
        Some(to_rect(element.get_bounding_client_rect()))
    }

    fn transform(&self, key: &str) -> Option<String> {
        let value = self
            .element(key)?
            .style()
            .get_property_value("transform")
            .ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn set_transform(&mut self, key: &str, value: &str) -> Result<(), SurfaceError> {
        let element = self
            .element(key)
            .filter(|e| e.is_connected())
            .ok_or_else(|| SurfaceError::Detached(key.to_string()))?;
        element
            .style()
            .set_property("transform", value)
            .map_err(|e| SurfaceError::Rejected {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}
