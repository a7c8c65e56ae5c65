use crate::animation::playback::Playback;
use crate::animation::visual::{Target, TargetStates, VisualState};
use crate::context::{Context, Owner};
use crate::schedule::frame::{FrameHandle, FramePhase};
use crate::scroll::trigger::{TriggerEvent, TriggerHandle};
use crate::section::binding::{EntranceBinding, ScrubBinding, ToggleActions};
use crate::section::profile::{MotionProfile, ProfileKind};

/// Image decode status reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStatus {
    /// Not decoded yet. Animation does not wait for it.
    #[default]
    Pending,
    /// Decoded.
    Loaded,
    /// Failed; the panel shows its placeholder.
    Failed,
}

/// Resolved visual state of one artwork panel.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanelVisual {
    /// Image transform and opacity.
    pub image: VisualState,
    /// Text block transform and opacity.
    pub content: VisualState,
    /// Image decode status.
    pub image_status: ImageStatus,
    /// True when the panel could not bind its animations and rests unanimated.
    pub degraded: bool,
}

/// Owns the entrance and scrub animations of one artwork panel.
///
/// The entrance is time-driven and toggled by its trigger (`"play none none reverse"`); the
/// scrub is sampled from scroll progress. Both write into the same panel, composed as
/// `entrance.compose(scrub)`.
#[derive(Debug)]
pub struct SectionController {
    index: usize,
    kind: ProfileKind,
    entrance: Option<EntranceBinding>,
    scrub: Option<ScrubBinding>,
    frame: Option<FrameHandle>,
    image_status: ImageStatus,
    degraded: bool,
    mounted: bool,
}

impl SectionController {
    /// Register panel `index`'s triggers and per-frame work.
    ///
    /// Never fails: when the triggers cannot be registered the panel degrades to its resting,
    /// fully visible state.
    #[tracing::instrument(skip(ctx, profile))]
    pub fn mount(
        ctx: &mut Context,
        index: usize,
        kind: ProfileKind,
        profile: &MotionProfile,
    ) -> Self {
        let mut out = Self {
            index,
            kind,
            entrance: None,
            scrub: None,
            frame: None,
            image_status: ImageStatus::Pending,
            degraded: false,
            mounted: true,
        };
        out.bind(ctx, profile);
        out.frame = Some(ctx.subscribe(FramePhase::Timelines, Owner::Panel(index)));
        out
    }

    fn bind(&mut self, ctx: &mut Context, profile: &MotionProfile) {
        let entrance = EntranceBinding::bind(
            ctx,
            profile.entrance_trigger(self.index),
            profile.entrance_timeline(),
            ToggleActions::PLAY_REVERSE,
        );
        let scrub = ScrubBinding::bind(
            ctx,
            profile.scrub_trigger(self.index),
            profile.scrub_timeline(),
        );
        match (entrance, scrub) {
            (Ok(entrance), Ok(scrub)) => {
                self.entrance = Some(entrance);
                self.scrub = Some(scrub);
                self.degraded = false;
            }
            (entrance, scrub) => {
                let mut reasons = Vec::new();
                match entrance {
                    Ok(b) => b.release(ctx),
                    Err(err) => reasons.push(err.to_string()),
                }
                match scrub {
                    Ok(b) => b.release(ctx),
                    Err(err) => reasons.push(err.to_string()),
                }
                tracing::warn!(
                    panel = self.index,
                    reasons = %reasons.join("; "),
                    "panel animations disabled"
                );
                self.degraded = true;
            }
        }
    }

    fn unbind(&mut self, ctx: &mut Context) {
        if let Some(b) = self.entrance.take() {
            b.release(ctx);
        }
        if let Some(b) = self.scrub.take() {
            b.release(ctx);
        }
    }

    /// Tear down and re-register under `kind`'s parameters. The entrance restarts from rest.
    pub fn rebuild(&mut self, ctx: &mut Context, kind: ProfileKind, profile: &MotionProfile) {
        if !self.mounted {
            return;
        }
        self.unbind(ctx);
        self.kind = kind;
        self.bind(ctx, profile);
        tracing::debug!(panel = self.index, ?kind, "panel rebuilt");
    }

    /// Drop both animations and rest fully visible, marked degraded. Idempotent.
    ///
    /// Used when the host cannot drive frames, so no entrance would ever play.
    pub fn settle(&mut self, ctx: &mut Context) {
        if !self.mounted {
            return;
        }
        self.unbind(ctx);
        self.degraded = true;
    }

    /// Release every trigger and frame handle this panel holds. Idempotent.
    pub fn unmount(&mut self, ctx: &mut Context) {
        if !self.mounted {
            return;
        }
        self.unbind(ctx);
        if let Some(h) = self.frame.take() {
            ctx.unsubscribe(h);
        }
        self.mounted = false;
        tracing::debug!(panel = self.index, "panel unmounted");
    }

    /// Route a trigger event. Returns whether this panel consumed it.
    pub fn handle_trigger(&mut self, ev: &TriggerEvent) -> bool {
        if !self.mounted {
            return false;
        }
        let by_entrance = self.entrance.as_mut().is_some_and(|b| b.handle(ev));
        by_entrance || self.scrub.as_mut().is_some_and(|b| b.handle(ev))
    }

    /// Advance the entrance playhead.
    pub fn advance(&mut self, dt: f64) {
        if let Some(b) = &mut self.entrance {
            b.advance(dt);
        }
    }

    /// Record the host's image decode result.
    pub fn set_image_status(&mut self, status: ImageStatus) {
        self.image_status = status;
    }

    /// Current panel visuals.
    pub fn visual(&self) -> PanelVisual {
        let (image, content) = if self.degraded || !self.mounted {
            (VisualState::REST, VisualState::REST)
        } else {
            let entrance = self
                .entrance
                .as_ref()
                .map(EntranceBinding::sample)
                .unwrap_or_default();
            let scrub = self
                .scrub
                .as_ref()
                .map(ScrubBinding::sample)
                .unwrap_or_default();
            let states: TargetStates = entrance.compose(&scrub);
            (states.get(Target::Image), states.get(Target::Content))
        };
        PanelVisual {
            image,
            content,
            image_status: self.image_status,
            degraded: self.degraded,
        }
    }

    /// Panel position in the catalog.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Parameter set in force.
    pub fn kind(&self) -> ProfileKind {
        self.kind
    }

    /// False after [`SectionController::unmount`].
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// True when animations could not be bound.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Whether `handle` is one of this panel's triggers.
    pub fn owns(&self, handle: TriggerHandle) -> bool {
        self.entrance.as_ref().is_some_and(|b| b.trigger() == handle)
            || self.scrub.as_ref().is_some_and(|b| b.trigger() == handle)
    }

    /// Entrance playhead, if bound.
    pub fn entrance(&self) -> Option<&Playback> {
        self.entrance.as_ref().map(EntranceBinding::playback)
    }

    /// Scrub progress, if bound.
    pub fn scrub_progress(&self) -> Option<f64> {
        self.scrub.as_ref().map(ScrubBinding::progress)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/controller.rs"]
mod tests;
