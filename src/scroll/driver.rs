use crate::animation::ease::Ease;
use crate::foundation::error::{FolioError, FolioResult};
use crate::foundation::math::{clamp01, damp, lerp};
use crate::host::Host;

/// Remaining distance (px) under which lerp smoothing snaps onto its target.
const LERP_SNAP_PX: f64 = 0.01;

/// How the virtual scroll position chases the raw one.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Smoothing {
    /// Fixed-length ease from the current position to the latest target, restarted on every
    /// new input.
    Duration {
        /// Length of one ease in seconds (0 = immediate).
        secs: f64,
        /// Curve used for the ease.
        ease: Ease,
    },
    /// Exponential approach covering `factor` of the remaining distance per 60 Hz frame.
    Lerp {
        /// Per-frame fraction in `(0, 1]`.
        factor: f64,
    },
}

impl Default for Smoothing {
    fn default() -> Self {
        Self::Duration {
            secs: 1.2,
            ease: Ease::OutExpo,
        }
    }
}

/// Smooth-scroll driver settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SmoothScrollConfig {
    /// Smoothing model.
    pub smoothing: Smoothing,
    /// Multiplier applied to wheel/trackpad deltas.
    pub wheel_multiplier: f64,
    /// Multiplier applied to touch deltas.
    pub touch_multiplier: f64,
    /// Route touch input through the same smoothing as the wheel (otherwise touch is immediate).
    pub sync_touch: bool,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            smoothing: Smoothing::default(),
            wheel_multiplier: 1.0,
            touch_multiplier: 1.0,
            sync_touch: true,
        }
    }
}

impl SmoothScrollConfig {
    /// Reject non-finite or negative parameters.
    pub fn validate(&self) -> FolioResult<()> {
        match self.smoothing {
            Smoothing::Duration { secs, .. } => {
                if !(secs.is_finite() && secs >= 0.0) {
                    return Err(FolioError::validation(
                        "smooth scroll duration must be finite and >= 0",
                    ));
                }
            }
            Smoothing::Lerp { factor } => {
                if !(factor.is_finite() && factor > 0.0 && factor <= 1.0) {
                    return Err(FolioError::validation(
                        "smooth scroll lerp factor must be in (0, 1]",
                    ));
                }
            }
        }
        for (name, m) in [
            ("wheel_multiplier", self.wheel_multiplier),
            ("touch_multiplier", self.touch_multiplier),
        ] {
            if !m.is_finite() {
                return Err(FolioError::validation(format!("{name} must be finite")));
            }
        }
        Ok(())
    }
}

/// Raw scroll input delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollInput {
    /// Wheel or trackpad delta in pixels (positive = down).
    Wheel {
        /// Pixel delta.
        delta: f64,
    },
    /// Touch drag delta in pixels (positive = down).
    Touch {
        /// Pixel delta.
        delta: f64,
    },
    /// Native scroll position reported by the host (scrollbar, keyboard, anchors).
    Native {
        /// Absolute offset in pixels.
        offset: f64,
    },
    /// Programmatic scroll.
    ScrollTo {
        /// Absolute offset in pixels.
        offset: f64,
        /// Skip smoothing.
        immediate: bool,
    },
}

/// Last movement direction of the scroll target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScrollDirection {
    /// No input yet.
    #[default]
    Idle,
    /// Toward larger offsets.
    Down,
    /// Toward smaller offsets.
    Up,
}

/// Process-wide scroll value published once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollState {
    /// Target offset requested by input, clamped to `[0, limit]`.
    pub raw: f64,
    /// Eased offset everything else renders against.
    pub virtual_offset: f64,
    /// Maximum scroll offset (document height minus viewport height).
    pub limit: f64,
    /// `virtual_offset / limit` in `[0, 1]` (0 when nothing scrolls).
    pub progress: f64,
    /// Virtual speed in px/s over the last tick.
    pub velocity: f64,
    /// Direction of the latest input.
    pub direction: ScrollDirection,
}

#[derive(Clone, Copy, Debug)]
struct Ease1D {
    from: f64,
    to: f64,
    elapsed: f64,
}

/// Eases a virtual scroll position toward the raw input position, once per frame.
///
/// The virtual position only ever moves toward the target: it never overshoots, and once a
/// `Duration` ease completes (or the lerp gap falls under a hundredth of a pixel) it lands on
/// the target exactly.
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    config: SmoothScrollConfig,
    target: f64,
    current: f64,
    limit: f64,
    anim: Option<Ease1D>,
    velocity: f64,
    direction: ScrollDirection,
    native_disabled: bool,
}

impl SmoothScroll {
    /// Driver at offset 0 with nothing to scroll yet.
    pub fn new(config: SmoothScrollConfig) -> Self {
        Self {
            config,
            target: 0.0,
            current: 0.0,
            limit: 0.0,
            anim: None,
            velocity: 0.0,
            direction: ScrollDirection::Idle,
            native_disabled: false,
        }
    }

    /// Take over scrolling on `host`: native smooth scrolling is switched off once.
    pub fn attach(&mut self, host: &mut dyn Host) {
        if !self.native_disabled {
            host.set_native_smooth_scroll(false);
            self.native_disabled = true;
        }
    }

    /// Hand scrolling back to `host`.
    pub fn detach(&mut self, host: &mut dyn Host) {
        if self.native_disabled {
            host.set_native_smooth_scroll(true);
            self.native_disabled = false;
        }
    }

    /// Settings in use.
    pub fn config(&self) -> &SmoothScrollConfig {
        &self.config
    }

    /// Update the scrollable extent (after layout). Positions are re-clamped.
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = if limit.is_finite() { limit.max(0.0) } else { 0.0 };
        self.target = self.target.clamp(0.0, self.limit);
        self.current = self.current.clamp(0.0, self.limit);
        if let Some(anim) = &mut self.anim {
            anim.from = anim.from.clamp(0.0, self.limit);
            anim.to = self.target;
        }
    }

    /// Feed one input event. Non-finite values are ignored.
    pub fn input(&mut self, input: ScrollInput) {
        match input {
            ScrollInput::Wheel { delta } => {
                let delta = delta * self.config.wheel_multiplier;
                self.retarget(self.target + delta, false);
            }
            ScrollInput::Touch { delta } => {
                let delta = delta * self.config.touch_multiplier;
                self.retarget(self.target + delta, !self.config.sync_touch);
            }
            ScrollInput::Native { offset } => self.retarget(offset, false),
            ScrollInput::ScrollTo { offset, immediate } => self.retarget(offset, immediate),
        }
    }

    fn retarget(&mut self, offset: f64, immediate: bool) {
        if !offset.is_finite() {
            return;
        }
        let next = offset.clamp(0.0, self.limit);
        if next > self.target {
            self.direction = ScrollDirection::Down;
        } else if next < self.target {
            self.direction = ScrollDirection::Up;
        }
        self.target = next;

        let instant = immediate
            || matches!(self.config.smoothing, Smoothing::Duration { secs, .. } if secs <= 0.0);
        if instant {
            self.current = next;
            self.anim = None;
            return;
        }
        if let Smoothing::Duration { .. } = self.config.smoothing {
            if self.current == next {
                self.anim = None;
            } else {
                self.anim = Some(Ease1D {
                    from: self.current,
                    to: next,
                    elapsed: 0.0,
                });
            }
        }
    }

    /// Advance the virtual position by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let before = self.current;
        match self.config.smoothing {
            Smoothing::Duration { secs, ease } => {
                if let Some(anim) = &mut self.anim {
                    anim.elapsed += dt;
                    let t = if secs > 0.0 { anim.elapsed / secs } else { 1.0 };
                    if t >= 1.0 {
                        self.current = anim.to;
                        self.anim = None;
                    } else {
                        self.current = lerp(anim.from, anim.to, ease.apply(t));
                    }
                }
            }
            Smoothing::Lerp { factor } => {
                self.current = damp(self.current, self.target, factor, dt);
                if (self.target - self.current).abs() < LERP_SNAP_PX {
                    self.current = self.target;
                }
            }
        }
        self.velocity = if dt > 0.0 {
            (self.current - before) / dt
        } else {
            0.0
        };
    }

    /// True while the virtual position is still travelling toward the target.
    pub fn is_smoothing(&self) -> bool {
        self.current != self.target
    }

    /// Snapshot of the published scroll value.
    pub fn state(&self) -> ScrollState {
        ScrollState {
            raw: self.target,
            virtual_offset: self.current,
            limit: self.limit,
            progress: if self.limit > 0.0 {
                clamp01(self.current / self.limit)
            } else {
                0.0
            },
            velocity: self.velocity,
            direction: self.direction,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/driver.rs"]
mod tests;
