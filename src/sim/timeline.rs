//! Tick sources
//!
//! Each body gets one repeating, linear tick source that fires once per
//! frame until paused. Sources fire in registration order. A source can be
//! paused, resumed, restarted from tick zero, or faulted (stopped for good
//! after a failed tick). Teardown cancels every source, after which all
//! calls are no-ops.

use super::body::BodyId;

/// Handle to one tick source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(usize);

/// Lifecycle of a single tick source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    /// Fires every frame
    Running,
    /// Skipped until resumed or restarted
    Paused,
    /// A tick failed; never fires again
    Faulted,
}

#[derive(Debug, Clone)]
struct TickSource {
    body: BodyId,
    state: SourceState,
    /// Ticks fired since start or the last restart
    ticks: u64,
}

/// All tick sources of one simulation
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    sources: Vec<TickSource>,
    torn_down: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a running tick source driving `body`. Returns `None` after teardown.
    pub fn start(&mut self, body: BodyId) -> Option<TickHandle> {
        if self.torn_down {
            return None;
        }
        self.sources.push(TickSource {
            body,
            state: SourceState::Running,
            ticks: 0,
        });
        Some(TickHandle(self.sources.len() - 1))
    }

    /// Pause a running source. Returns whether anything changed.
    pub fn pause(&mut self, handle: TickHandle) -> bool {
        self.transition(handle, SourceState::Running, SourceState::Paused)
    }

    /// Resume a paused source. Returns whether anything changed.
    pub fn resume(&mut self, handle: TickHandle) -> bool {
        self.transition(handle, SourceState::Paused, SourceState::Running)
    }

    /// Reset the tick count and run from tick zero (resumes a paused source)
    pub fn restart(&mut self, handle: TickHandle) {
        if let Some(source) = self.source_mut(handle) {
            if source.state != SourceState::Faulted {
                source.state = SourceState::Running;
                source.ticks = 0;
            }
        }
    }

    /// Stop a source permanently after a failed tick
    pub fn fault(&mut self, handle: TickHandle) {
        if let Some(source) = self.source_mut(handle) {
            source.state = SourceState::Faulted;
        }
    }

    /// Cancel every source. Idempotent.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.sources.clear();
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Fire `handle` if it is running, returning the body to tick
    pub fn fire(&mut self, handle: TickHandle) -> Option<BodyId> {
        let source = self.source_mut(handle)?;
        if source.state != SourceState::Running {
            return None;
        }
        source.ticks += 1;
        Some(source.body)
    }

    /// Every live handle, in registration order
    pub fn handles(&self) -> Vec<TickHandle> {
        (0..self.sources.len()).map(TickHandle).collect()
    }

    pub fn state(&self, handle: TickHandle) -> Option<SourceState> {
        self.sources.get(handle.0).map(|s| s.state)
    }

    pub fn ticks(&self, handle: TickHandle) -> Option<u64> {
        self.sources.get(handle.0).map(|s| s.ticks)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    fn source_mut(&mut self, handle: TickHandle) -> Option<&mut TickSource> {
        if self.torn_down {
            return None;
        }
        self.sources.get_mut(handle.0)
    }

    fn transition(&mut self, handle: TickHandle, from: SourceState, to: SourceState) -> bool {
        match self.source_mut(handle) {
            Some(source) if source.state == from => {
                source.state = to;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire_all(timeline: &mut Timeline) -> Vec<BodyId> {
        timeline
            .handles()
            .into_iter()
            .filter_map(|h| timeline.fire(h))
            .collect()
    }

    #[test]
    fn test_sources_fire_in_registration_order() {
        let mut timeline = Timeline::new();
        for i in [2, 0, 1] {
            timeline.start(BodyId(i));
        }
        assert_eq!(
            fire_all(&mut timeline),
            vec![BodyId(2), BodyId(0), BodyId(1)]
        );
    }

    #[test]
    fn test_pause_is_idempotent() {
        let mut timeline = Timeline::new();
        let h = timeline.start(BodyId(0)).unwrap();
        timeline.fire(h);

        assert!(timeline.pause(h));
        assert!(!timeline.pause(h));
        for _ in 0..3 {
            assert!(timeline.fire(h).is_none());
        }
        assert_eq!(timeline.ticks(h), Some(1));
        assert_eq!(timeline.state(h), Some(SourceState::Paused));
    }

    #[test]
    fn test_resume_and_restart() {
        let mut timeline = Timeline::new();
        let h = timeline.start(BodyId(0)).unwrap();
        timeline.fire(h);
        timeline.fire(h);

        assert!(!timeline.resume(h));
        timeline.pause(h);
        assert!(timeline.resume(h));
        assert_eq!(timeline.ticks(h), Some(2));

        timeline.pause(h);
        timeline.restart(h);
        assert_eq!(timeline.state(h), Some(SourceState::Running));
        assert_eq!(timeline.ticks(h), Some(0));
        assert_eq!(timeline.fire(h), Some(BodyId(0)));
    }

    #[test]
    fn test_faulted_source_stays_down() {
        let mut timeline = Timeline::new();
        let h = timeline.start(BodyId(0)).unwrap();
        timeline.fault(h);
        assert!(!timeline.resume(h));
        timeline.restart(h);
        assert_eq!(timeline.state(h), Some(SourceState::Faulted));
        assert!(timeline.fire(h).is_none());
    }

    #[test]
    fn test_teardown_makes_everything_a_no_op() {
        let mut timeline = Timeline::new();
        let h = timeline.start(BodyId(0)).unwrap();
        timeline.teardown();
        timeline.teardown();

        assert!(timeline.is_torn_down());
        assert!(!timeline.pause(h));
        assert!(!timeline.resume(h));
        timeline.restart(h);
        assert!(timeline.fire(h).is_none());
        assert!(timeline.start(BodyId(1)).is_none());
        assert!(timeline.is_empty());
    }
}
