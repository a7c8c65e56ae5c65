use crate::catalog::Catalog;
use crate::foundation::core::Viewport;
use crate::foundation::error::{FolioError, FolioResult};
use crate::host::HeadlessHost;
use crate::shell::config::ShellConfig;
use crate::shell::{FrameSnapshot, InputEvent, Shell, ShellStats};

/// One input delivered at a fixed time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScriptEvent {
    /// Host time in seconds.
    pub at: f64,
    /// Input to deliver.
    pub event: InputEvent,
}

/// Synthetic input sequence for a headless run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrollScript {
    /// Initial viewport.
    pub viewport: Viewport,
    /// Frames per second.
    #[serde(default = "default_fps")]
    pub fps: f64,
    /// Length of the run in seconds.
    pub duration: f64,
    /// Inputs, delivered before the first frame at or after their time.
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
    /// Keep every n-th snapshot (the last frame is always kept).
    #[serde(default = "default_sample_every")]
    pub sample_every: u64,
}

/// Longest run accepted, in frames.
pub const MAX_SCRIPT_FRAMES: u64 = 1_000_000;

fn default_fps() -> f64 {
    60.0
}

fn default_sample_every() -> u64 {
    1
}

impl ScrollScript {
    /// Parse and validate a JSON script.
    pub fn from_json(json: &str) -> FolioResult<Self> {
        let script: Self = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    /// Reject scripts that cannot be run.
    pub fn validate(&self) -> FolioResult<()> {
        self.viewport.validate()?;
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(FolioError::validation("script fps must be finite and > 0"));
        }
        if !(self.duration.is_finite() && self.duration >= 0.0) {
            return Err(FolioError::validation(
                "script duration must be finite and >= 0",
            ));
        }
        if (self.duration * self.fps).ceil() > MAX_SCRIPT_FRAMES as f64 {
            return Err(FolioError::validation(format!(
                "script runs {}s at {} fps, more than {MAX_SCRIPT_FRAMES} frames",
                self.duration, self.fps
            )));
        }
        if self.sample_every == 0 {
            return Err(FolioError::validation("script sample_every must be >= 1"));
        }
        if let Some(ev) = self.events.iter().find(|e| !e.at.is_finite()) {
            return Err(FolioError::validation(format!(
                "script event {:?} has a non-finite time",
                ev.event
            )));
        }
        Ok(())
    }

    /// Index of the final frame. Bounded by [`MAX_SCRIPT_FRAMES`] once validated.
    fn last_frame(&self) -> u64 {
        (self.duration * self.fps).ceil() as u64
    }
}

/// Result of [`run_script`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScriptRun {
    /// Sampled frames.
    pub snapshots: Vec<FrameSnapshot>,
    /// Registrations at the end of the run.
    pub stats: ShellStats,
    /// Registrations after shutdown (all zero when teardown is complete).
    pub after_shutdown: ShellStats,
}

/// Drive `script` through a headless shell, one frame every `1 / fps` seconds.
#[tracing::instrument(skip_all, fields(fps = script.fps, duration = script.duration))]
pub fn run_script(
    script: &ScrollScript,
    catalog: Catalog,
    config: ShellConfig,
) -> FolioResult<ScriptRun> {
    script.validate()?;
    let mut shell = Shell::mount(HeadlessHost::new(script.viewport), catalog, config)?;

    let mut events = script.events.clone();
    events.sort_by(|a, b| a.at.total_cmp(&b.at));
    let mut pending = events.into_iter().peekable();

    let last = script.last_frame();
    let mut snapshots = Vec::new();
    for f in 0..=last {
        let now = f as f64 / script.fps;
        while let Some(ev) = pending.next_if(|e| e.at <= now) {
            if let InputEvent::Resize { width, height } = ev.event {
                shell
                    .host_mut()
                    .set_viewport(Viewport::new(width, height)?);
            }
            shell.handle(ev.event)?;
        }
        let keep = f % script.sample_every == 0 || f == last;
        if let Some(snap) = shell.frame(now)
            && keep
        {
            snapshots.push(snap.clone());
        }
    }

    let stats = shell.stats();
    shell.shutdown();
    let after_shutdown = shell.stats();
    tracing::debug!(frames = stats.frames, kept = snapshots.len(), "script finished");
    Ok(ScriptRun {
        snapshots,
        stats,
        after_shutdown,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/shell/script.rs"]
mod tests;
