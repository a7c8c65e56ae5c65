use crate::animation::ease::Ease;
use crate::animation::timeline::{Channel, Position, Timeline};
use crate::animation::visual::{Prop, Target, VisualState};
use crate::context::{Context, Owner};
use crate::schedule::frame::{FrameHandle, FramePhase};
use crate::scroll::trigger::{Edge, RegionId, Threshold, TriggerEvent, TriggerSpec};
use crate::section::binding::{EntranceBinding, ToggleActions};

/// Footer blocks: header, grid, bottom line.
pub const FOOTER_BLOCKS: usize = 3;

const BLOCKS: [Target; FOOTER_BLOCKS] = [Target::Footer(0), Target::Footer(1), Target::Footer(2)];

/// Resolved footer visuals.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FooterVisual {
    /// Blocks, top to bottom.
    pub blocks: [VisualState; FOOTER_BLOCKS],
    /// True when the entrance could not be bound.
    pub degraded: bool,
}

/// Staggered rise-in of the footer blocks.
pub fn entrance_timeline() -> Timeline {
    let mut tl = Timeline::new();
    tl.stagger_from_to(
        &BLOCKS,
        &[
            Channel::new(Prop::Opacity, 0.0, 1.0),
            Channel::new(Prop::Y, 50.0, 0.0),
        ],
        1.2,
        Ease::OutCubic,
        0.2,
        Position::At(0.0),
    );
    tl
}

/// Footer entrance toggled at `"top 80%"`.
#[derive(Debug)]
pub struct FooterController {
    entrance: Option<EntranceBinding>,
    frame: Option<FrameHandle>,
}

impl FooterController {
    /// Bind the entrance; on failure the footer rests fully visible.
    #[tracing::instrument(skip(ctx))]
    pub fn mount(ctx: &mut Context) -> Self {
        let spec = TriggerSpec::new(RegionId::Footer, Threshold::new(Edge::TOP, Edge::at(0.8)));
        let entrance = match EntranceBinding::bind(
            ctx,
            spec,
            entrance_timeline(),
            ToggleActions::PLAY_REVERSE,
        ) {
            Ok(b) => Some(b),
            Err(err) => {
                tracing::warn!(%err, "footer entrance disabled");
                None
            }
        };
        Self {
            entrance,
            frame: Some(ctx.subscribe(FramePhase::Timelines, Owner::Footer)),
        }
    }

    /// Route a trigger event.
    pub fn handle_trigger(&mut self, ev: &TriggerEvent) -> bool {
        self.entrance.as_mut().is_some_and(|b| b.handle(ev))
    }

    /// Advance the entrance.
    pub fn advance(&mut self, dt: f64) {
        if let Some(b) = &mut self.entrance {
            b.advance(dt);
        }
    }

    /// Current footer visuals.
    pub fn visual(&self) -> FooterVisual {
        match &self.entrance {
            Some(b) => {
                let states = b.sample();
                FooterVisual {
                    blocks: BLOCKS.map(|t| states.get(t)),
                    degraded: false,
                }
            }
            None => FooterVisual {
                blocks: [VisualState::REST; FOOTER_BLOCKS],
                degraded: true,
            },
        }
    }

    /// Drop the entrance; the footer rests fully visible.
    pub fn settle(&mut self, ctx: &mut Context) {
        if let Some(b) = self.entrance.take() {
            b.release(ctx);
        }
    }

    /// Release the trigger and the frame handle. Idempotent.
    pub fn unmount(&mut self, ctx: &mut Context) {
        if let Some(b) = self.entrance.take() {
            b.release(ctx);
        }
        if let Some(h) = self.frame.take() {
            ctx.unsubscribe(h);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/footer.rs"]
mod tests;
