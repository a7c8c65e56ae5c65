use crate::foundation::core::FrameTime;

/// Default ceiling for a single frame step, in seconds.
pub const DEFAULT_MAX_FRAME_DT: f64 = 0.1;

/// Ordering bucket inside one frame.
///
/// Within a frame every `Scroll` subscriber runs before every `Triggers` subscriber, and so on,
/// so no consumer ever observes a scroll position older than the one computed this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FramePhase {
    /// Smooth-scroll integration.
    Scroll,
    /// Trigger recomputation and progress readouts.
    Triggers,
    /// Time-driven timelines.
    Timelines,
    /// Pointer-driven interpolation.
    Pointer,
}

/// Opaque per-frame subscription token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(u64);

/// One due subscription for the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Due<O> {
    /// Token the subscriber was given.
    pub handle: FrameHandle,
    /// Ordering bucket.
    pub phase: FramePhase,
    /// Who to run.
    pub owner: O,
}

/// Everything that should run for one display refresh, in execution order.
#[derive(Clone, Debug)]
pub struct FrameTick<O> {
    /// Timing for this frame.
    pub time: FrameTime,
    /// Subscriptions ordered by phase, then by subscription order.
    pub due: Vec<Due<O>>,
}

/// Explicit registry of per-frame work.
///
/// Nothing reschedules itself: a subscriber keeps running every frame until its handle is
/// unsubscribed, and `len()` is the number of live per-frame handles.
#[derive(Clone, Debug)]
pub struct FrameScheduler<O> {
    subs: Vec<Due<O>>,
    next: u64,
    last_now: Option<f64>,
    max_dt: f64,
    enabled: bool,
}

impl<O: Copy> FrameScheduler<O> {
    /// `enabled = false` models a host without frame callbacks: nothing ever runs.
    pub fn new(enabled: bool, max_dt: f64) -> Self {
        let max_dt = if max_dt.is_finite() && max_dt > 0.0 {
            max_dt
        } else {
            DEFAULT_MAX_FRAME_DT
        };
        Self {
            subs: Vec::new(),
            next: 0,
            last_now: None,
            max_dt,
            enabled,
        }
    }

    /// Register `owner` to run every frame in `phase`.
    pub fn subscribe(&mut self, phase: FramePhase, owner: O) -> FrameHandle {
        let handle = FrameHandle(self.next);
        self.next += 1;
        self.subs.push(Due {
            handle,
            phase,
            owner,
        });
        self.subs.sort_by_key(|d| (d.phase, d.handle));
        handle
    }

    /// Stop running `handle`. Returns whether it was live.
    pub fn unsubscribe(&mut self, handle: FrameHandle) -> bool {
        let before = self.subs.len();
        self.subs.retain(|d| d.handle != handle);
        self.subs.len() != before
    }

    /// Whether `handle` is still subscribed.
    pub fn contains(&self, handle: FrameHandle) -> bool {
        self.subs.iter().any(|d| d.handle == handle)
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.subs.len()
    }

    /// True when nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    /// Whether the host can drive frames at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Drop every subscription.
    pub fn clear(&mut self) {
        self.subs.clear();
    }

    /// Open a frame at host time `now` (seconds).
    ///
    /// Returns `None` when the host has no frame callbacks. The first frame has `dt = 0`;
    /// later frames clamp `dt` to `[0, max_dt]` so a suspended tab does not teleport animations.
    pub fn begin_frame(&mut self, now: f64) -> Option<FrameTick<O>> {
        if !self.enabled || !now.is_finite() {
            return None;
        }
        let dt = self
            .last_now
            .map(|last| (now - last).clamp(0.0, self.max_dt))
            .unwrap_or(0.0);
        self.last_now = Some(now);
        Some(FrameTick {
            time: FrameTime { now, dt },
            due: self.subs.clone(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/frame.rs"]
mod tests;
