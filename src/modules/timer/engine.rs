//! Timer engine: the set of class timers a client owns.
//!
//! Single-threaded and `&mut self` only; there is no background tick. A UI
//! polls `live_seconds` as often as it wants to redraw.
//!
//! At most one timer runs at a time: starting or resuming a timer first
//! stops whichever other timer is running.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(SystemClock);
//! engine.add_class(5, "Calculus");
//! engine.start(5);
//! // later
//! engine.stop(5);
//! if let Some(report) = engine.save(5) {
//!     let command = report.into_command(user_id, Uuid::now_v7(), Utc::now());
//! }
//! ```

use std::collections::BTreeMap;

use crate::modules::timer::core::report::SessionReport;
use crate::modules::timer::core::state::{ClassTimer, TimerState};
use crate::shared::core::clock::Clock;
use crate::shared::core::primitives::ClassId;

#[derive(Debug)]
pub struct TimerEngine<C: Clock> {
    clock: C,
    timers: BTreeMap<ClassId, ClassTimer>,
}

impl<C: Clock> TimerEngine<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            timers: BTreeMap::new(),
        }
    }

    /// Rebuilds an engine from a snapshot. Running timers keep counting from
    /// their recorded start; if several claim to run, only the latest started
    /// keeps running.
    pub fn restore(clock: C, timers: impl IntoIterator<Item = ClassTimer>) -> Self {
        let mut engine = Self::new(clock);
        for mut timer in timers {
            timer.normalize();
            engine.timers.insert(timer.class_id(), timer);
        }
        let latest = engine
            .timers
            .values()
            .filter_map(|t| t.started_at().map(|started| (started, t.class_id())))
            .max()
            .map(|(_, id)| id);
        if let Some(keep) = latest {
            engine.leave_all_except(Some(keep));
        }
        engine
    }

    /// All timers in class id order, ready to serialize.
    pub fn snapshot(&self) -> Vec<ClassTimer> {
        self.timers.values().cloned().collect()
    }

    /// Registers a class. Returns `false` when it was already known.
    pub fn add_class(&mut self, class_id: ClassId, display_name: impl Into<String>) -> bool {
        if self.timers.contains_key(&class_id) {
            return false;
        }
        self.timers.insert(class_id, ClassTimer::new(class_id, display_name));
        true
    }

    pub fn remove_class(&mut self, class_id: ClassId) -> Option<ClassTimer> {
        self.timers.remove(&class_id)
    }

    pub fn timer(&self, class_id: ClassId) -> Option<&ClassTimer> {
        self.timers.get(&class_id)
    }

    pub fn timers(&self) -> impl Iterator<Item = &ClassTimer> {
        self.timers.values()
    }

    pub fn start(&mut self, class_id: ClassId) -> bool {
        if self.state_of(class_id) != Some(TimerState::Idle) {
            return false;
        }
        self.leave_all_except(Some(class_id));
        let now = self.clock.now();
        self.transition(class_id, "start", |timer| timer.start(now))
    }

    pub fn stop(&mut self, class_id: ClassId) -> bool {
        let now = self.clock.now();
        self.transition(class_id, "stop", |timer| timer.stop(now))
    }

    pub fn resume(&mut self, class_id: ClassId) -> bool {
        if self.state_of(class_id) != Some(TimerState::Stopped) {
            return false;
        }
        self.leave_all_except(Some(class_id));
        let now = self.clock.now();
        self.transition(class_id, "resume", |timer| timer.resume(now))
    }

    pub fn save(&mut self, class_id: ClassId) -> Option<SessionReport> {
        let now = self.clock.now();
        let report = self.timers.get_mut(&class_id)?.save(now)?;
        tracing::debug!(class_id, seconds = report.seconds, "timer saved");
        Some(report)
    }

    pub fn discard(&mut self, class_id: ClassId) -> bool {
        self.transition(class_id, "discard", ClassTimer::discard)
    }

    /// Implicit stop when the user navigates away from a running timer.
    pub fn leave(&mut self, class_id: ClassId) -> bool {
        let now = self.clock.now();
        self.transition(class_id, "leave", |timer| timer.stop(now))
    }

    /// Stops every running timer. Returns how many were stopped.
    pub fn leave_all(&mut self) -> usize {
        self.leave_all_except(None)
    }

    pub fn running_class(&self) -> Option<ClassId> {
        self.timers
            .values()
            .find(|timer| timer.state() == TimerState::Running)
            .map(ClassTimer::class_id)
    }

    /// Unsaved milliseconds for a class, 0 for unknown ids.
    pub fn live_elapsed_ms(&self, class_id: ClassId) -> u64 {
        self.timers
            .get(&class_id)
            .map_or(0, |timer| timer.live_elapsed_ms(self.clock.now()))
    }

    pub fn live_seconds(&self, class_id: ClassId) -> u64 {
        self.live_elapsed_ms(class_id) / 1000
    }

    /// Saved time across every class.
    pub fn saved_total_seconds(&self) -> u64 {
        self.timers.values().map(ClassTimer::saved_ms).sum::<u64>() / 1000
    }

    /// Class with the most saved time. None until something has been saved;
    /// ties go to the lowest class id.
    pub fn top_class(&self) -> Option<&ClassTimer> {
        self.timers
            .values()
            .filter(|timer| timer.saved_ms() > 0)
            .fold(None, |top: Option<&ClassTimer>, timer| match top {
                Some(best) if best.saved_ms() >= timer.saved_ms() => Some(best),
                _ => Some(timer),
            })
    }

    fn state_of(&self, class_id: ClassId) -> Option<TimerState> {
        self.timers.get(&class_id).map(ClassTimer::state)
    }

    fn leave_all_except(&mut self, keep: Option<ClassId>) -> usize {
        let now = self.clock.now();
        let mut stopped = 0;
        for timer in self.timers.values_mut() {
            if Some(timer.class_id()) != keep && timer.stop(now) {
                tracing::debug!(class_id = timer.class_id(), "timer left");
                stopped += 1;
            }
        }
        stopped
    }

    fn transition(
        &mut self,
        class_id: ClassId,
        action: &'static str,
        apply: impl FnOnce(&mut ClassTimer) -> bool,
    ) -> bool {
        let Some(timer) = self.timers.get_mut(&class_id) else {
            return false;
        };
        let changed = apply(timer);
        if changed {
            tracing::debug!(class_id, action, state = ?timer.state(), "timer transition");
        }
        changed
    }
}
