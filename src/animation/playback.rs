use crate::animation::timeline::Timeline;
use crate::animation::visual::TargetStates;

/// Playhead direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// Toward the end of the timeline.
    Forward,
    /// Toward the start of the timeline.
    Reverse,
}

/// Time-driven playhead over a [`Timeline`].
///
/// There is exactly one playhead per playback: `reverse()` during a forward run turns the same
/// playhead around from where it is, so effects never stack and never jump.
#[derive(Clone, Debug)]
pub struct Playback {
    timeline: Timeline,
    time: f64,
    direction: Direction,
    playing: bool,
    started: bool,
    killed: bool,
}

impl Playback {
    /// Paused at time 0.
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            time: 0.0,
            direction: Direction::Forward,
            playing: false,
            started: false,
            killed: false,
        }
    }

    /// Run forward from the current position.
    pub fn play(&mut self) {
        if self.killed {
            return;
        }
        self.direction = Direction::Forward;
        self.started = true;
        self.playing = self.time < self.timeline.duration();
        if !self.playing {
            self.time = self.timeline.duration();
        }
    }

    /// Run backward from the current position.
    pub fn reverse(&mut self) {
        if self.killed {
            return;
        }
        self.direction = Direction::Reverse;
        self.started = false;
        self.playing = self.time > 0.0;
        if !self.playing {
            self.time = 0.0;
        }
    }

    /// Jump to the start and run forward again.
    pub fn restart(&mut self) {
        if self.killed {
            return;
        }
        self.time = 0.0;
        self.play();
    }

    /// Stop and snap to the start, paused.
    pub fn reset(&mut self) {
        if self.killed {
            return;
        }
        self.time = 0.0;
        self.direction = Direction::Forward;
        self.started = false;
        self.playing = false;
    }

    /// Stop and snap to the end, paused.
    pub fn complete(&mut self) {
        if self.killed {
            return;
        }
        self.time = self.timeline.duration();
        self.direction = Direction::Forward;
        self.started = true;
        self.playing = false;
    }

    /// Move the playhead by `dt` seconds in the current direction.
    ///
    /// Returns whether the playback is still running afterwards.
    pub fn advance(&mut self, dt: f64) -> bool {
        if self.killed || !self.playing || dt.is_nan() || dt <= 0.0 {
            return self.is_active();
        }
        let duration = self.timeline.duration();
        match self.direction {
            Direction::Forward => {
                self.time = (self.time + dt).min(duration);
                if self.time >= duration {
                    self.playing = false;
                }
            }
            Direction::Reverse => {
                self.time = (self.time - dt).max(0.0);
                if self.time <= 0.0 {
                    self.playing = false;
                }
            }
        }
        self.playing
    }

    /// Stop for good; later calls are ignored.
    pub fn kill(&mut self) {
        self.killed = true;
        self.playing = false;
    }

    /// True while the playhead is moving.
    pub fn is_active(&self) -> bool {
        self.playing && !self.killed
    }

    /// True after [`Playback::kill`].
    pub fn is_killed(&self) -> bool {
        self.killed
    }

    /// Current direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Playhead position in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Playhead position normalized to `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let d = self.timeline.duration();
        if d <= 0.0 {
            return if self.at_start() { 0.0 } else { 1.0 };
        }
        crate::foundation::math::clamp01(self.time / d)
    }

    /// Underlying timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Sampled targets at the playhead. At time 0 every channel rests on its `from` value.
    pub fn sample(&self) -> TargetStates {
        if self.at_start() {
            self.timeline.sample_initial()
        } else {
            self.timeline.sample(self.time)
        }
    }

    fn at_start(&self) -> bool {
        if self.timeline.duration() <= 0.0 {
            !self.started
        } else {
            self.time <= 0.0
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/playback.rs"]
mod tests;
