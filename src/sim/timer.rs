//! Countdown timers for deferred and periodic effects
//!
//! Ship respawn, hyperspace re-entry, and saucer spawn windows all run on the
//! same primitive: a restartable countdown that reports expiry exactly once.
//! Timers live in a central [`TimerSet`] that the frame loop advances
//! unconditionally, whatever phase the game is in.

/// What a timer means when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Try to materialize a new life at screen center
    RespawnShip,
    /// Try to re-enter from hyperspace at a random position
    HyperspaceJump,
    /// A saucer spawn window elapsed
    SaucerSpawn,
}

/// Restartable one-shot countdown
///
/// A fresh timer is expired (inert). `start` arms it, `update` counts it
/// down, and the update that crosses zero reports the event exactly once.
#[derive(Debug, Clone)]
pub struct GameTimer {
    duration: f32,
    remaining: f32,
    expired: bool,
    event: Option<TimerEvent>,
}

impl GameTimer {
    pub fn new(duration_ms: f32, event: Option<TimerEvent>) -> Self {
        Self {
            duration: duration_ms,
            remaining: duration_ms,
            expired: true,
            event,
        }
    }

    pub fn expired(&self) -> bool {
        self.expired
    }

    /// Arm the countdown; the remaining time is left as-is
    pub fn start(&mut self) {
        self.expired = false;
    }

    /// Back to full duration, inert
    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.expired = true;
    }

    /// Reset to full duration and arm
    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    /// Advance by a frame delta; returns the event if this update crossed zero
    ///
    /// An oversized delta (a hitch, a background tab) expires the timer once;
    /// there is no catch-up.
    pub fn update(&mut self, delta_ms: f32) -> Option<TimerEvent> {
        if self.expired {
            return None;
        }
        self.remaining -= delta_ms;
        if self.remaining <= 0.0 {
            self.expired = true;
            return self.event;
        }
        None
    }
}

/// Stable handle into a [`TimerSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle(usize);

/// Central timer registry
///
/// Timers are registered once at construction time and never removed, so
/// handles stay valid for the life of the set.
#[derive(Debug, Default)]
pub struct TimerSet {
    timers: Vec<GameTimer>,
}

impl TimerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, timer: GameTimer) -> TimerHandle {
        self.timers.push(timer);
        TimerHandle(self.timers.len() - 1)
    }

    pub fn start(&mut self, handle: TimerHandle) {
        if let Some(timer) = self.checked_mut(handle) {
            timer.start();
        }
    }

    pub fn restart(&mut self, handle: TimerHandle) {
        if let Some(timer) = self.checked_mut(handle) {
            timer.restart();
        }
    }

    pub fn reset(&mut self, handle: TimerHandle) {
        if let Some(timer) = self.checked_mut(handle) {
            timer.reset();
        }
    }

    /// Expired state; a stale handle reads as expired
    pub fn is_expired(&self, handle: TimerHandle) -> bool {
        self.timers.get(handle.0).is_none_or(|t| t.expired())
    }

    /// Advance every timer; fired events come back in registration order
    pub fn update_all(&mut self, delta_ms: f32) -> Vec<TimerEvent> {
        self.timers
            .iter_mut()
            .filter_map(|t| t.update(delta_ms))
            .collect()
    }

    fn checked_mut(&mut self, handle: TimerHandle) -> Option<&mut GameTimer> {
        let timer = self.timers.get_mut(handle.0);
        if timer.is_none() {
            debug_assert!(false, "stale timer handle {}", handle.0);
            log::warn!("ignoring stale timer handle {}", handle.0);
        }
        timer
    }
}
