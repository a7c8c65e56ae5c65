use smallvec::SmallVec;

use crate::animation::ease::Ease;
use crate::animation::visual::{Lerp, Prop, Target, TargetStates};
use crate::foundation::error::{FolioError, FolioResult};

/// One animated channel: `prop` goes from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Channel {
    /// Animated property.
    pub prop: Prop,
    /// Value before the tween starts.
    pub from: f64,
    /// Value once the tween completes.
    pub to: f64,
}

impl Channel {
    /// Shorthand constructor.
    pub const fn new(prop: Prop, from: f64, to: f64) -> Self {
        Self { prop, from, to }
    }
}

/// Single-channel tween placed on a timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween {
    /// Element being animated.
    pub target: Target,
    /// Animated channel.
    pub channel: Channel,
    /// Start time in timeline seconds.
    pub start: f64,
    /// Length in seconds (0 = instantaneous step at `start`).
    pub duration: f64,
    /// Easing applied over the tween's own normalized time.
    pub ease: Ease,
}

impl Tween {
    /// End time in timeline seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Channel value at timeline time `time`.
    pub fn value_at(&self, time: f64) -> f64 {
        let Channel { from, to, .. } = self.channel;
        if self.duration <= 0.0 {
            return if time >= self.start { to } else { from };
        }
        let t = (time - self.start) / self.duration;
        if t <= 0.0 {
            from
        } else if t >= 1.0 {
            to
        } else {
            <f64 as Lerp>::lerp(&from, &to, self.ease.apply(t))
        }
    }
}

/// Where a group of tweens is inserted on a [`Timeline`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Position {
    /// Absolute time after the timeline delay.
    At(f64),
    /// Relative to the current end of the timeline; `End(-1.0)` overlaps the last second
    /// (the `"-=1"` form).
    End(f64),
}

/// Time-ordered set of tweens sampled as one composite animation.
///
/// Sampling rule per `(target, prop)` channel: the latest tween that has started wins; a channel
/// whose tweens have not started yet holds the `from` of its earliest tween. Sampling is therefore
/// continuous in time as long as consecutive tweens on a channel chain their values.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    tweens: Vec<Tween>,
    delay: f64,
    end: f64,
}

impl Timeline {
    /// Empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty timeline whose first tween can start no earlier than `delay` seconds.
    pub fn with_delay(delay: f64) -> Self {
        let delay = delay.max(0.0);
        Self {
            tweens: Vec::new(),
            delay,
            end: delay,
        }
    }

    /// Add one target animated over `channels`.
    pub fn from_to(
        &mut self,
        target: Target,
        channels: &[Channel],
        duration: f64,
        ease: Ease,
        at: Position,
    ) -> &mut Self {
        self.stagger_from_to(&[target], channels, duration, ease, 0.0, at)
    }

    /// Add several targets animated identically, each starting `each` seconds after the previous.
    pub fn stagger_from_to(
        &mut self,
        targets: &[Target],
        channels: &[Channel],
        duration: f64,
        ease: Ease,
        each: f64,
        at: Position,
    ) -> &mut Self {
        let base = match at {
            Position::At(t) => self.delay + t,
            Position::End(offset) => self.end + offset,
        }
        .max(0.0);
        let duration = duration.max(0.0);

        for (i, &target) in targets.iter().enumerate() {
            let start = base + each.max(0.0) * i as f64;
            for &channel in channels {
                self.tweens.push(Tween {
                    target,
                    channel,
                    start,
                    duration,
                    ease,
                });
            }
            self.end = self.end.max(start + duration);
        }
        self.tweens.sort_by(|a, b| a.start.total_cmp(&b.start));
        self
    }

    /// Total length in seconds, delay included.
    pub fn duration(&self) -> f64 {
        self.end
    }

    /// All tweens sorted by start time.
    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    /// True when no tween has been added.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Reject non-finite values.
    pub fn validate(&self) -> FolioResult<()> {
        for tw in &self.tweens {
            let c = tw.channel;
            if !(c.from.is_finite() && c.to.is_finite()) {
                return Err(FolioError::animation(format!(
                    "tween {:?}.{:?} has non-finite endpoints",
                    tw.target, c.prop
                )));
            }
            if !(tw.start.is_finite() && tw.duration.is_finite()) {
                return Err(FolioError::animation(format!(
                    "tween {:?}.{:?} has non-finite timing",
                    tw.target, c.prop
                )));
            }
        }
        Ok(())
    }

    /// Sample every animated target at `time` seconds.
    pub fn sample(&self, time: f64) -> TargetStates {
        let mut out = TargetStates::new();
        let mut written: SmallVec<[(Target, Prop); 16]> = SmallVec::new();
        for tw in &self.tweens {
            let key = (tw.target, tw.channel.prop);
            let seen = written.contains(&key);
            if tw.start <= time || !seen {
                out.entry(tw.target).set(tw.channel.prop, tw.value_at(time));
                if !seen {
                    written.push(key);
                }
            }
        }
        out
    }

    /// Sample at normalized progress `p` in `[0, 1]` (scrubbing).
    pub fn sample_progress(&self, p: f64) -> TargetStates {
        let p = crate::foundation::math::clamp01(p);
        self.sample(p * self.end)
    }

    /// State before anything has started: every channel holds its first `from`.
    pub fn sample_initial(&self) -> TargetStates {
        self.sample(f64::NEG_INFINITY)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
