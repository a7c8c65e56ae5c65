use crate::animation::ease::Ease;
use crate::animation::playback::Playback;
use crate::animation::timeline::{Channel, Position, Timeline};
use crate::animation::visual::{Prop, Target, VisualState};
use crate::context::{Context, Owner};
use crate::schedule::frame::{FrameHandle, FramePhase};
use crate::scroll::trigger::{Edge, RegionId, Threshold, TriggerEvent, TriggerSpec};
use crate::section::binding::ScrubBinding;

/// Lines in the hero title.
pub const TITLE_LINES: usize = 2;
/// Paragraphs in the hero biography.
pub const BIO_LINES: usize = 3;

const TITLES: [Target; TITLE_LINES] = [Target::Title(0), Target::Title(1)];
const BIO: [Target; BIO_LINES] = [Target::Bio(0), Target::Bio(1), Target::Bio(2)];

/// Resolved hero visuals.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeroVisual {
    /// Title lines, top to bottom.
    pub title: [VisualState; TITLE_LINES],
    /// Subtitle.
    pub subtitle: VisualState,
    /// Biography paragraphs.
    pub bio: [VisualState; BIO_LINES],
    /// Scroll hint.
    pub scroll_hint: VisualState,
}

/// Staggered intro, played once on mount after `delay` seconds.
pub fn intro_timeline(delay: f64) -> Timeline {
    let fade = |y: f64| [Channel::new(Prop::Opacity, 0.0, 1.0), Channel::new(Prop::Y, y, 0.0)];
    let mut tl = Timeline::with_delay(delay);
    tl.stagger_from_to(&TITLES, &fade(100.0), 1.5, Ease::OutQuart, 0.2, Position::At(0.0))
        .from_to(
            Target::Subtitle,
            &fade(50.0),
            1.2,
            Ease::OutCubic,
            Position::End(-1.0),
        )
        .stagger_from_to(&BIO, &fade(30.0), 1.0, Ease::OutCubic, 0.1, Position::End(-0.8))
        .from_to(
            Target::ScrollHint,
            &fade(20.0),
            1.0,
            Ease::OutCubic,
            Position::End(-0.5),
        );
    tl
}

/// Text drifting down and out while the hero scrolls away.
pub fn scrub_timeline() -> Timeline {
    let out = |y: f64| [Channel::new(Prop::Y, 0.0, y), Channel::new(Prop::Opacity, 1.0, 0.0)];
    let mut tl = Timeline::new();
    tl.stagger_from_to(&TITLES, &out(150.0), 1.0, Ease::Linear, 0.0, Position::At(0.0))
        .stagger_from_to(
            &[Target::Subtitle, Target::Bio(0), Target::Bio(1), Target::Bio(2)],
            &out(100.0),
            1.0,
            Ease::Linear,
            0.0,
            Position::At(0.0),
        );
    tl
}

/// Hero intro playback plus its scroll-away scrub.
#[derive(Debug)]
pub struct HeroController {
    intro: Playback,
    scrub: Option<ScrubBinding>,
    frame: Option<FrameHandle>,
}

impl HeroController {
    /// Start the intro and bind the scrub to the hero region (`"top top"` → `"bottom top"`).
    #[tracing::instrument(skip(ctx))]
    pub fn mount(ctx: &mut Context, delay: f64) -> Self {
        let spec = TriggerSpec::new(RegionId::Hero, Threshold::new(Edge::TOP, Edge::TOP));
        let scrub = match ScrubBinding::bind(ctx, spec, scrub_timeline()) {
            Ok(b) => Some(b),
            Err(err) => {
                tracing::warn!(%err, "hero scrub disabled");
                None
            }
        };
        let mut intro = Playback::new(intro_timeline(delay));
        intro.play();
        Self {
            intro,
            scrub,
            frame: Some(ctx.subscribe(FramePhase::Timelines, Owner::Hero)),
        }
    }

    /// Route a trigger event. Returns whether the hero consumed it.
    pub fn handle_trigger(&mut self, ev: &TriggerEvent) -> bool {
        self.scrub.as_mut().is_some_and(|b| b.handle(ev))
    }

    /// Advance the intro.
    pub fn advance(&mut self, dt: f64) {
        self.intro.advance(dt);
    }

    /// Intro playhead.
    pub fn intro(&self) -> &Playback {
        &self.intro
    }

    /// Current hero visuals.
    pub fn visual(&self) -> HeroVisual {
        let mut states = self.intro.sample();
        if let Some(scrub) = &self.scrub {
            states = states.compose(&scrub.sample());
        }
        HeroVisual {
            title: TITLES.map(|t| states.get(t)),
            subtitle: states.get(Target::Subtitle),
            bio: BIO.map(|t| states.get(t)),
            scroll_hint: states.get(Target::ScrollHint),
        }
    }

    /// Jump the intro to its end and drop the scrub, leaving the hero fully visible.
    pub fn settle(&mut self, ctx: &mut Context) {
        if let Some(b) = self.scrub.take() {
            b.release(ctx);
        }
        self.intro.complete();
    }

    /// Release the scrub trigger, stop the intro and drop the frame handle. Idempotent.
    pub fn unmount(&mut self, ctx: &mut Context) {
        if let Some(b) = self.scrub.take() {
            b.release(ctx);
        }
        if let Some(h) = self.frame.take() {
            ctx.unsubscribe(h);
        }
        self.intro.kill();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/hero.rs"]
mod tests;
