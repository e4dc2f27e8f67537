//! Simulation driver
//!
//! Owns the body registry, the container snapshot and one tick source per
//! body. Each frame, every running source ticks its body in registration
//! order: integrate, render, reflect, then resolve collisions against the
//! full set. Because ticks run in sequence, a body early in the order sees
//! the not-yet-ticked state of bodies after it.
//!
//! Host events (pointer hover, breakpoint switch, resize, teardown) call in
//! between frames, never during one.

use glam::Vec2;

use super::body::{Body, BodyId};
use super::collision::resolve_collisions;
use super::contain::contain;
use super::motion::{Reflection, integrate, next_offset, reflect};
use super::rect::Rect;
use super::timeline::{SourceState, TickHandle, Timeline};
use crate::error::SimError;
use crate::settings::Settings;
use crate::surface::LayoutSurface;
use crate::{format_translate, parse_translate};

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Bodies that ticked
    pub ticked: usize,
    /// Velocity components inverted by wall reflections
    pub reflections: usize,
    /// Velocity swaps between overlapping bodies
    pub swaps: usize,
    /// Bodies whose tick failed this frame (they stop animating)
    pub faulted: Vec<BodyId>,
}

/// Outcome of a single body tick
#[derive(Debug, Clone, PartialEq)]
struct TickOutcome {
    reflection: Reflection,
    swapped: Vec<BodyId>,
}

/// The running simulation for one page
pub struct Simulation<S: LayoutSurface> {
    surface: S,
    container: Rect,
    bodies: Vec<Body>,
    /// Tick source per body (by registration index); `None` if never started
    handles: Vec<Option<TickHandle>>,
    timeline: Timeline,
    compact: bool,
    frames: u64,
}

impl<S: LayoutSurface> Simulation<S> {
    /// Discover bodies on `surface`, pull them inside the container, give
    /// them their initial velocity and start their tick sources.
    ///
    /// Fails when the settings don't validate or the container is missing.
    /// Elements that can't be measured or drawn are skipped.
    pub fn new(surface: S, settings: &Settings) -> Result<Self, SimError> {
        settings.validate()?;
        let container = surface.container_rect().ok_or(SimError::MissingContainer)?;
        let mut rng = settings.rng();

        let mut bodies = Vec::new();
        for key in surface.movable_keys() {
            let Some(rendered) = surface.element_rect(&key) else {
                log::warn!("Skipping body: {}", SimError::MissingBody(key));
                continue;
            };
            let offset = surface
                .transform(&key)
                .map(|t| parse_translate(&t))
                .unwrap_or(Vec2::ZERO);
            let id = BodyId(bodies.len());
            let mut body = Body::new(id, key, rendered.translate(-offset)).with_offset(offset);
            contain(&mut body, &container);
            body.velocity = settings.initial_velocity_for(&mut rng);
            bodies.push(body);
        }

        let mut sim = Self {
            surface,
            container,
            handles: vec![None; bodies.len()],
            bodies,
            timeline: Timeline::new(),
            compact: false,
            frames: 0,
        };

        let visible = container.is_visible();
        for index in 0..sim.bodies.len() {
            if let Err(e) = sim.render(index) {
                log::warn!("Body {} not started: {}", sim.bodies[index].key, e);
                continue;
            }
            if visible {
                sim.handles[index] = sim.timeline.start(BodyId(index));
            }
        }

        if !visible {
            log::info!("Container not visible, bodies registered but idle");
        }
        log::info!(
            "Simulation ready: {} bodies ({} animating) in {}x{} container",
            sim.bodies.len(),
            sim.timeline.len(),
            container.width(),
            container.height()
        );
        Ok(sim)
    }

    /// Run one frame: every running tick source fires once, in order
    pub fn frame(&mut self) -> FrameReport {
        let mut report = FrameReport::default();
        if self.timeline.is_torn_down() {
            return report;
        }

        let container = self.container;
        for handle in self.timeline.handles() {
            let Some(id) = self.timeline.fire(handle) else {
                continue;
            };
            match self.tick(id, &container) {
                Ok(outcome) => {
                    report.ticked += 1;
                    report.reflections +=
                        usize::from(outcome.reflection.x) + usize::from(outcome.reflection.y);
                    report.swaps += outcome.swapped.len();
                }
                Err(e) => {
                    log::warn!("Body {} stopped animating: {}", id, e);
                    self.timeline.fault(handle);
                    report.faulted.push(id);
                }
            }
        }

        self.frames += 1;
        report
    }

    fn tick(&mut self, id: BodyId, container: &Rect) -> Result<TickOutcome, SimError> {
        let index = id.index();
        let body = self
            .bodies
            .get_mut(index)
            .ok_or_else(|| SimError::MissingBody(id.to_string()))?;

        // Commit the move only once it has been drawn
        self.surface.set_transform(&body.key, &format_translate(next_offset(body)))?;
        integrate(body);

        let range = body.range(container);
        let reflection = reflect(body, &range);
        let swapped = resolve_collisions(&mut self.bodies, index);

        Ok(TickOutcome {
            reflection,
            swapped,
        })
    }

    fn render(&mut self, index: usize) -> Result<(), SimError> {
        let body = &self.bodies[index];
        self.surface
            .set_transform(&body.key, &format_translate(body.offset))?;
        Ok(())
    }

    /// Pointer entered a body: stop it where it is
    pub fn pointer_enter(&mut self, id: BodyId) {
        if let Some(handle) = self.handle(id) {
            self.timeline.pause(handle);
        }
    }

    /// Pointer left a body: let it move again (unless the page is compact)
    pub fn pointer_leave(&mut self, id: BodyId) {
        if self.compact {
            return;
        }
        if let Some(handle) = self.handle(id) {
            self.timeline.resume(handle);
        }
    }

    /// Viewport crossed the compact breakpoint.
    ///
    /// Re-measures, pulls every body back inside the container, then pauses
    /// everything (compact) or restarts everything from tick zero.
    pub fn breakpoint_changed(&mut self, compact: bool) {
        if self.timeline.is_torn_down() {
            return;
        }
        self.relayout();
        self.contain_all();
        self.compact = compact;
        if compact {
            self.pause_all();
        } else {
            self.restart_all();
        }
        log::info!(
            "Breakpoint changed: {}",
            if compact { "compact, paused" } else { "full, restarted" }
        );
    }

    /// Re-measure the container and every body after a layout change.
    ///
    /// Keeps the previous geometry for anything that can no longer be measured.
    pub fn relayout(&mut self) {
        if self.timeline.is_torn_down() {
            return;
        }
        match self.surface.container_rect() {
            Some(container) => self.container = container,
            None => log::warn!("Container vanished, keeping last known bounds"),
        }
        for body in &mut self.bodies {
            match self.surface.element_rect(&body.key) {
                Some(rendered) => body.remeasure(rendered),
                None => log::debug!("Body {} not measurable, keeping geometry", body.key),
            }
        }
    }

    /// Containment pass over every body, rendering any that moved
    pub fn contain_all(&mut self) {
        if self.timeline.is_torn_down() {
            return;
        }
        for index in 0..self.bodies.len() {
            let delta = contain(&mut self.bodies[index], &self.container);
            if delta == Vec2::ZERO {
                continue;
            }
            log::debug!("Body {} pulled back inside by {}", self.bodies[index].key, delta);
            if let Err(e) = self.render(index) {
                log::warn!("Body {} stopped animating: {}", self.bodies[index].key, e);
                if let Some(handle) = self.handles[index] {
                    self.timeline.fault(handle);
                }
            }
        }
    }

    pub fn pause_all(&mut self) {
        for handle in self.handles.iter().flatten() {
            self.timeline.pause(*handle);
        }
    }

    pub fn restart_all(&mut self) {
        for handle in self.handles.iter().flatten() {
            self.timeline.restart(*handle);
        }
    }

    /// Cancel every tick source. Everything after this is a no-op.
    pub fn teardown(&mut self) {
        if !self.timeline.is_torn_down() {
            log::info!("Simulation torn down after {} frames", self.frames);
        }
        self.timeline.teardown();
    }

    pub fn is_torn_down(&self) -> bool {
        self.timeline.is_torn_down()
    }

    fn handle(&self, id: BodyId) -> Option<TickHandle> {
        self.handles.get(id.index()).copied().flatten()
    }

    pub fn body_id(&self, key: &str) -> Option<BodyId> {
        self.bodies.iter().find(|b| b.key == key).map(|b| b.id)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    /// Mutable access between frames (e.g. to seed a velocity)
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.index())
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Tick source state, `None` if the body never started or after teardown
    pub fn source_state(&self, id: BodyId) -> Option<SourceState> {
        self.timeline.state(self.handle(id)?)
    }

    /// Ticks fired since start or the last restart
    pub fn ticks(&self, id: BodyId) -> Option<u64> {
        self.timeline.ticks(self.handle(id)?)
    }

    pub fn container(&self) -> Rect {
        self.container
    }

    pub fn is_compact(&self) -> bool {
        self.compact
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
