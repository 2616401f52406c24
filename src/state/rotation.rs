//! Timer-driven rotation of an "active" member within a group
//!
//! Used for the highlight cards and the live-stat widgets. Time is passed in
//! explicitly so the event loop (and tests) decide what "now" is.

use std::time::{Duration, Instant};

/// Default interval between automatic advances
pub const DEFAULT_ROTATION_PERIOD: Duration = Duration::from_millis(6000);
/// Default quiet window after an interaction before rotation resumes
pub const DEFAULT_IDLE_RESUME: Duration = Duration::from_millis(12000);

/// A cancellable one-shot or repeating deadline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    due: Option<Instant>,
    period: Option<Duration>,
}

impl Timer {
    pub fn once(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
        self.period = None;
    }

    pub fn repeating(&mut self, now: Instant, period: Duration) {
        self.due = Some(now + period);
        self.period = Some(period);
    }

    pub fn cancel(&mut self) {
        self.due = None;
        self.period = None;
    }

    pub fn due(&self) -> Option<Instant> {
        self.due
    }

    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    /// Consume one firing if due: re-arms repeating timers, disarms one-shots
    fn fire(&mut self, now: Instant) -> Option<Instant> {
        let due = self.due.filter(|due| *due <= now)?;
        self.due = self.period.map(|period| due + period);
        Some(due)
    }
}

/// How the user touched a member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Pointer moved over the member
    PointerEnter,
    /// Keyboard focus landed on the member
    Focus,
    /// Discrete selection; starts the idle countdown immediately
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationPhase {
    AutoRotating,
    /// User is hovering or focusing a member; the idle window is armed too
    PausedInteracting,
    /// Interaction over, waiting for the idle window to elapse
    PausedIdleCountdown,
    /// Torn down; no timer will fire again
    Stopped,
}

/// Rotation state machine for one group of members
#[derive(Debug, Clone)]
pub struct RotationScheduler<K> {
    members: Vec<K>,
    active: usize,
    phase: RotationPhase,
    tick: Timer,
    idle: Timer,
    period: Duration,
    idle_delay: Duration,
    /// When the current member became active
    activated_at: Instant,
}

impl<K: PartialEq + std::fmt::Debug> RotationScheduler<K> {
    /// Mount the group; auto-rotation starts only with more than one member
    pub fn new(members: Vec<K>, period: Duration, idle_delay: Duration, now: Instant) -> Self {
        let mut tick = Timer::default();
        if members.len() > 1 {
            tick.repeating(now, period);
        }

        Self {
            members,
            active: 0,
            phase: RotationPhase::AutoRotating,
            tick,
            idle: Timer::default(),
            period,
            idle_delay,
            activated_at: now,
        }
    }

    pub fn members(&self) -> &[K] {
        &self.members
    }

    pub fn active_key(&self) -> Option<&K> {
        self.members.get(self.active)
    }

    pub fn active_index(&self) -> Option<usize> {
        (self.active < self.members.len()).then_some(self.active)
    }

    pub fn is_active(&self, key: &K) -> bool {
        self.active_key() == Some(key)
    }

    pub fn phase(&self) -> RotationPhase {
        self.phase
    }

    pub fn auto_rotate_enabled(&self) -> bool {
        self.phase == RotationPhase::AutoRotating
    }

    pub fn idle_resume_deadline(&self) -> Option<Instant> {
        self.idle.due()
    }

    pub fn next_tick(&self) -> Option<Instant> {
        self.tick.due()
    }

    pub fn activated_at(&self) -> Instant {
        self.activated_at
    }

    /// Fire every timer due at `now`, in deadline order. Returns true when
    /// the active member changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;

        loop {
            let idle_due = self.idle.due().filter(|due| *due <= now);
            let tick_due = self.tick.due().filter(|due| *due <= now);

            match (idle_due, tick_due) {
                (Some(idle), tick) if tick.map_or(true, |t| idle <= t) => {
                    self.idle.fire(now);
                    self.resume(idle);
                }
                (_, Some(_)) => {
                    if let Some(at) = self.tick.fire(now) {
                        self.advance(at);
                        changed = true;
                    }
                }
                _ => break,
            }
        }

        changed
    }

    /// User interaction with a member: select it and pause rotation
    pub fn interact(&mut self, key: &K, interaction: Interaction, now: Instant) -> bool {
        if self.phase == RotationPhase::Stopped {
            return false;
        }
        let Some(index) = self.members.iter().position(|m| m == key) else {
            tracing::debug!("Interaction with unknown rotation member {key:?}");
            return false;
        };

        if index != self.active {
            self.active = index;
            self.activated_at = now;
        }
        self.tick.cancel();
        self.idle.once(now, self.idle_delay);

        self.phase = match interaction {
            Interaction::PointerEnter | Interaction::Focus => RotationPhase::PausedInteracting,
            Interaction::Click => RotationPhase::PausedIdleCountdown,
        };
        true
    }

    /// Pointer left or focus moved away: restart the idle countdown
    pub fn rest(&mut self, now: Instant) {
        if self.phase == RotationPhase::PausedInteracting {
            self.idle.once(now, self.idle_delay);
            self.phase = RotationPhase::PausedIdleCountdown;
        }
    }

    /// Cancel both timers; nothing fires afterwards
    pub fn teardown(&mut self) {
        self.tick.cancel();
        self.idle.cancel();
        self.phase = RotationPhase::Stopped;
    }

    fn advance(&mut self, at: Instant) {
        if self.members.is_empty() {
            return;
        }
        self.active = (self.active + 1) % self.members.len();
        self.activated_at = at;
    }

    fn resume(&mut self, at: Instant) {
        tracing::debug!("Rotation resumed after idle window");
        self.phase = RotationPhase::AutoRotating;
        if self.members.len() > 1 {
            self.tick.repeating(at, self.period);
        }
    }
}
