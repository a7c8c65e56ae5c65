use std::fmt;
use std::str::FromStr;

use crate::animation::playback::Playback;
use crate::animation::timeline::Timeline;
use crate::animation::visual::TargetStates;
use crate::context::Context;
use crate::foundation::error::{FolioError, FolioResult};
use crate::scroll::trigger::{TriggerEvent, TriggerEventKind, TriggerHandle, TriggerSpec};

/// What a toggle crossing does to a playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Leave the playhead alone.
    None,
    /// Run forward from where it is.
    Play,
    /// Run backward from where it is.
    Reverse,
    /// Jump to the start and run forward.
    Restart,
    /// Jump to the start and stop.
    Reset,
    /// Jump to the end and stop.
    Complete,
}

impl Action {
    fn apply(self, playback: &mut Playback) {
        match self {
            Self::None => {}
            Self::Play => playback.play(),
            Self::Reverse => playback.reverse(),
            Self::Restart => playback.restart(),
            Self::Reset => playback.reset(),
            Self::Complete => playback.complete(),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Play => "play",
            Self::Reverse => "reverse",
            Self::Restart => "restart",
            Self::Reset => "reset",
            Self::Complete => "complete",
        }
    }
}

impl FromStr for Action {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "none" => Self::None,
            "play" => Self::Play,
            "reverse" => Self::Reverse,
            "restart" => Self::Restart,
            "reset" => Self::Reset,
            "complete" => Self::Complete,
            other => {
                return Err(FolioError::validation(format!(
                    "unknown toggle action '{other}'"
                )));
            }
        })
    }
}

/// Actions for the four crossings, written `"<enter> <leave> <enter back> <leave back>"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToggleActions {
    /// Before → Active.
    pub on_enter: Action,
    /// Active → After.
    pub on_leave: Action,
    /// After → Active.
    pub on_enter_back: Action,
    /// Active → Before.
    pub on_leave_back: Action,
}

impl Default for ToggleActions {
    fn default() -> Self {
        Self::PLAY_REVERSE
    }
}

impl ToggleActions {
    /// `"play none none reverse"`: play on the way in, rewind when scrolled back above.
    pub const PLAY_REVERSE: Self = Self {
        on_enter: Action::Play,
        on_leave: Action::None,
        on_enter_back: Action::None,
        on_leave_back: Action::Reverse,
    };

    /// `"play none none none"`: play once and stay.
    pub const PLAY_ONCE: Self = Self {
        on_enter: Action::Play,
        on_leave: Action::None,
        on_enter_back: Action::None,
        on_leave_back: Action::None,
    };

    /// Action for a crossing; `None` for progress updates.
    pub fn action_for(&self, kind: TriggerEventKind) -> Action {
        match kind {
            TriggerEventKind::Enter => self.on_enter,
            TriggerEventKind::Leave => self.on_leave,
            TriggerEventKind::EnterBack => self.on_enter_back,
            TriggerEventKind::LeaveBack => self.on_leave_back,
            TriggerEventKind::Progress(_) => Action::None,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let [enter, leave, enter_back, leave_back] = parts.as_slice() else {
            return Err(FolioError::validation(format!(
                "toggle actions '{s}' must name exactly four actions"
            )));
        };
        Ok(Self {
            on_enter: enter.parse()?,
            on_leave: leave.parse()?,
            on_enter_back: enter_back.parse()?,
            on_leave_back: leave_back.parse()?,
        })
    }
}

impl fmt::Display for ToggleActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.on_enter.as_str(),
            self.on_leave.as_str(),
            self.on_enter_back.as_str(),
            self.on_leave_back.as_str()
        )
    }
}

impl TryFrom<String> for ToggleActions {
    type Error = FolioError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ToggleActions> for String {
    fn from(value: ToggleActions) -> Self {
        value.to_string()
    }
}

/// A time-driven timeline whose playhead is steered by trigger crossings.
#[derive(Debug)]
pub struct EntranceBinding {
    trigger: TriggerHandle,
    playback: Playback,
    actions: ToggleActions,
}

impl EntranceBinding {
    /// Validate `timeline` and register its trigger.
    pub fn bind(
        ctx: &mut Context,
        spec: TriggerSpec,
        timeline: Timeline,
        actions: ToggleActions,
    ) -> FolioResult<Self> {
        timeline.validate()?;
        let trigger = ctx.register(spec)?;
        Ok(Self {
            trigger,
            playback: Playback::new(timeline),
            actions,
        })
    }

    /// Trigger this binding listens to.
    pub fn trigger(&self) -> TriggerHandle {
        self.trigger
    }

    /// Apply `ev` if it belongs to this binding. Returns whether it did.
    pub fn handle(&mut self, ev: &TriggerEvent) -> bool {
        if ev.handle != self.trigger {
            return false;
        }
        self.actions.action_for(ev.kind).apply(&mut self.playback);
        true
    }

    /// Move the playhead by `dt` seconds.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.playback.advance(dt)
    }

    /// Current animated values.
    pub fn sample(&self) -> TargetStates {
        self.playback.sample()
    }

    /// Underlying playhead.
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    /// Unregister the trigger and stop the playhead.
    pub fn release(mut self, ctx: &mut Context) {
        ctx.unregister(self.trigger);
        self.playback.kill();
    }
}

/// A timeline sampled directly by a trigger's progress ratio.
#[derive(Debug)]
pub struct ScrubBinding {
    trigger: TriggerHandle,
    timeline: Timeline,
    progress: f64,
}

impl ScrubBinding {
    /// Validate `timeline` and register its trigger.
    pub fn bind(ctx: &mut Context, spec: TriggerSpec, timeline: Timeline) -> FolioResult<Self> {
        timeline.validate()?;
        let trigger = ctx.register(spec)?;
        Ok(Self {
            trigger,
            timeline,
            progress: 0.0,
        })
    }

    /// Trigger this binding listens to.
    pub fn trigger(&self) -> TriggerHandle {
        self.trigger
    }

    /// Take the progress carried by `ev` if it belongs to this binding.
    pub fn handle(&mut self, ev: &TriggerEvent) -> bool {
        if ev.handle != self.trigger {
            return false;
        }
        if let TriggerEventKind::Progress(p) = ev.kind {
            self.progress = p;
        }
        true
    }

    /// Last progress ratio.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Values at the current progress.
    pub fn sample(&self) -> TargetStates {
        self.timeline.sample_progress(self.progress)
    }

    /// Unregister the trigger.
    pub fn release(self, ctx: &mut Context) {
        ctx.unregister(self.trigger);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/binding.rs"]
mod tests;
