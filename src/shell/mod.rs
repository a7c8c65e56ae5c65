pub(crate) mod config;
pub(crate) mod footer;
pub(crate) mod hero;
pub(crate) mod script;

use crate::animation::visual::VisualState;
use crate::catalog::Catalog;
use crate::context::{Context, Owner};
use crate::foundation::core::{Point, Vec2, Viewport};
use crate::foundation::error::FolioResult;
use crate::host::Host;
use crate::layout::document::{DocumentLayout, LayoutMetrics};
use crate::pointer::parallax::ParallaxController;
use crate::progress::indicator::{ProgressIndicator, ProgressReadout};
use crate::schedule::frame::{FrameHandle, FramePhase, FrameScheduler};
use crate::scroll::driver::{ScrollInput, ScrollState, SmoothScroll};
use crate::section::controller::{ImageStatus, SectionController};
use crate::section::profile::{MotionProfile, ProfileKind};

use self::config::ShellConfig;
use self::footer::{FooterController, FooterVisual};
use self::hero::{HeroController, HeroVisual};

/// Input delivered by the host between frames.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Wheel or trackpad delta (px, positive = down).
    Wheel {
        /// Pixel delta.
        delta: f64,
    },
    /// Touch drag delta (px, positive = down).
    Touch {
        /// Pixel delta.
        delta: f64,
    },
    /// Native scroll position (scrollbar, keyboard, anchors).
    NativeScroll {
        /// Absolute offset.
        offset: f64,
    },
    /// Programmatic scroll.
    ScrollTo {
        /// Absolute offset.
        offset: f64,
        /// Skip smoothing.
        #[serde(default)]
        immediate: bool,
    },
    /// Viewport size changed.
    Resize {
        /// New width.
        width: f64,
        /// New height.
        height: f64,
    },
    /// Pointer moved, in viewport coordinates.
    PointerMove {
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },
    /// Pointer left the window.
    PointerLeave,
    /// Panel image decoded.
    ImageLoaded {
        /// Panel index.
        panel: usize,
    },
    /// Panel image failed to decode.
    ImageFailed {
        /// Panel index.
        panel: usize,
    },
}

/// Visual state of one mounted panel, parallax included.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanelSnapshot {
    /// Catalog position.
    pub index: usize,
    /// Artwork title.
    pub title: String,
    /// Image transform and opacity.
    pub image: VisualState,
    /// Text transform and opacity.
    pub content: VisualState,
    /// Image decode status.
    pub image_status: ImageStatus,
    /// True when the panel rests unanimated.
    pub degraded: bool,
}

/// Everything the page shows after one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameSnapshot {
    /// Frames run since mount.
    pub frame: u64,
    /// Host time of this frame (s).
    pub time: f64,
    /// Published scroll value.
    pub scroll: ScrollState,
    /// Parameter set in force.
    pub profile: ProfileKind,
    /// Progress readout.
    pub progress: ProgressReadout,
    /// Hero visuals.
    pub hero: HeroVisual,
    /// Mounted panels in catalog order.
    pub panels: Vec<PanelSnapshot>,
    /// Footer visuals.
    pub footer: FooterVisual,
}

/// Live registrations held by a shell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShellStats {
    /// Registered scroll triggers.
    pub triggers: usize,
    /// Per-frame subscriptions.
    pub frame_subscriptions: usize,
    /// Mounted panels.
    pub panels: usize,
    /// Frames run since mount.
    pub frames: u64,
}

/// The whole page: hero, one panel per artwork, footer, plus the scroll, trigger and frame
/// machinery driving them.
///
/// Per frame, in order: smooth scroll, trigger recomputation (events routed to their owners,
/// progress readout), timelines, pointer parallax.
pub struct Shell<H: Host> {
    host: H,
    config: ShellConfig,
    catalog: Catalog,
    ctx: Context,
    scroll: SmoothScroll,
    kind: ProfileKind,
    hero: HeroController,
    panels: Vec<SectionController>,
    parallax: Vec<ParallaxController>,
    progress: ProgressIndicator,
    footer: FooterController,
    own_frames: Vec<FrameHandle>,
    hovered: Option<usize>,
    frames: u64,
    snapshot: Option<FrameSnapshot>,
    shut_down: bool,
}

impl<H: Host> Shell<H> {
    /// Lay out the page for `host`'s viewport and mount every component.
    #[tracing::instrument(skip_all, fields(panels = catalog.len()))]
    pub fn mount(mut host: H, catalog: Catalog, config: ShellConfig) -> FolioResult<Self> {
        config.validate()?;
        catalog.validate()?;
        let viewport = host.viewport();
        viewport.validate()?;

        let kind = config.selector.select(viewport);
        let profile = config.profiles.get(kind).clone();
        let layout = DocumentLayout::compute(
            viewport,
            catalog.len(),
            &metrics_for(&config.layout, &profile),
        )?;
        let frames = FrameScheduler::new(host.supports_frame_callbacks(), config.max_frame_dt);
        if !frames.is_enabled() {
            tracing::warn!("host has no frame callbacks; content rests fully visible");
        }
        let mut ctx = Context::new(layout, frames);

        let mut scroll = SmoothScroll::new(config.smooth_scroll.clone());
        scroll.attach(&mut host);
        scroll.set_limit(ctx.layout().max_scroll());

        let own_frames = vec![
            ctx.subscribe(FramePhase::Scroll, Owner::Scroll),
            ctx.subscribe(FramePhase::Triggers, Owner::Triggers),
        ];
        let progress = ProgressIndicator::mount(&mut ctx, catalog.len(), config.progress_smoothing);
        let hero = HeroController::mount(&mut ctx, config.hero_intro_delay);
        let mut panels = Vec::with_capacity(catalog.len());
        let mut parallax = Vec::with_capacity(catalog.len());
        for i in 0..catalog.len() {
            panels.push(SectionController::mount(&mut ctx, i, kind, &profile));
            parallax.push(ParallaxController::mount(
                &mut ctx,
                i,
                config.parallax,
                profile.parallax_strength,
            ));
        }
        let footer = FooterController::mount(&mut ctx);

        tracing::debug!(
            ?kind,
            triggers = ctx.triggers().len(),
            frame_subscriptions = ctx.frames().len(),
            "shell mounted"
        );
        let mut shell = Self {
            host,
            config,
            catalog,
            ctx,
            scroll,
            kind,
            hero,
            panels,
            parallax,
            progress,
            footer,
            own_frames,
            hovered: None,
            frames: 0,
            snapshot: None,
            shut_down: false,
        };
        if !shell.ctx.frames().is_enabled() {
            shell.rest_without_frames();
        }
        Ok(shell)
    }

    /// Apply one input event. Ignored after [`Shell::shutdown`].
    pub fn handle(&mut self, event: InputEvent) -> FolioResult<()> {
        if self.shut_down {
            tracing::trace!(?event, "input after shutdown ignored");
            return Ok(());
        }
        match event {
            InputEvent::Wheel { delta } => self.scroll.input(ScrollInput::Wheel { delta }),
            InputEvent::Touch { delta } => self.scroll.input(ScrollInput::Touch { delta }),
            InputEvent::NativeScroll { offset } => {
                self.scroll.input(ScrollInput::Native { offset })
            }
            InputEvent::ScrollTo { offset, immediate } => self
                .scroll
                .input(ScrollInput::ScrollTo { offset, immediate }),
            InputEvent::Resize { width, height } => self.resize(Viewport::new(width, height)?)?,
            InputEvent::PointerMove { x, y } => self.pointer_move(Point::new(x, y)),
            InputEvent::PointerLeave => self.pointer_leave(),
            InputEvent::ImageLoaded { panel } => self.set_image_status(panel, ImageStatus::Loaded),
            InputEvent::ImageFailed { panel } => self.set_image_status(panel, ImageStatus::Failed),
        }
        if !self.ctx.frames().is_enabled() {
            self.rest_without_frames();
        }
        Ok(())
    }

    /// Without frame callbacks nothing would ever play in: everything rests fully visible and
    /// the snapshot is refreshed on input instead of per frame.
    fn rest_without_frames(&mut self) {
        for panel in &mut self.panels {
            panel.settle(&mut self.ctx);
        }
        self.hero.settle(&mut self.ctx);
        self.footer.settle(&mut self.ctx);
        self.snapshot = Some(self.capture(0.0));
    }

    /// Re-lay out for `viewport`.
    ///
    /// Crossing the breakpoint tears down and rebuilds every panel under the other profile;
    /// otherwise trigger bounds are refreshed in place.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, viewport: Viewport) -> FolioResult<()> {
        viewport.validate()?;
        let kind = self.config.selector.select(viewport);
        let profile = self.config.profiles.get(kind).clone();
        let layout = DocumentLayout::compute(
            viewport,
            self.catalog.len(),
            &metrics_for(&self.config.layout, &profile),
        )?;
        self.ctx.set_layout(layout);
        self.scroll.set_limit(self.ctx.layout().max_scroll());

        if kind != self.kind {
            for panel in self.panels.iter_mut() {
                panel.rebuild(&mut self.ctx, kind, &profile);
            }
            for p in self.parallax.iter_mut() {
                p.set_strength(profile.parallax_strength);
            }
            tracing::debug!(from = ?self.kind, to = ?kind, "motion profile switched");
            self.kind = kind;
        }
        if !self.ctx.frames().is_enabled() {
            self.rest_without_frames();
        }
        Ok(())
    }

    fn pointer_move(&mut self, point: Point) {
        let offset = self.scroll.state().virtual_offset;
        let layout = self.ctx.layout();
        let over = layout
            .panel_at(point.y + offset)
            .filter(|&i| self.parallax.get(i).is_some_and(ParallaxController::is_mounted));
        let bounds = over.and_then(|i| layout.panel(i));
        if over != self.hovered {
            self.pointer_leave();
        }
        if let (Some(i), Some(bounds)) = (over, bounds) {
            let on_screen = bounds - Vec2::new(0.0, offset);
            if self.parallax[i].pointer_move(point, on_screen) {
                self.hovered = Some(i);
            }
        }
    }

    fn pointer_leave(&mut self) {
        if let Some(p) = self.hovered.take().and_then(|i| self.parallax.get_mut(i)) {
            p.pointer_leave();
        }
    }

    fn set_image_status(&mut self, panel: usize, status: ImageStatus) {
        match self.panels.get_mut(panel).filter(|p| p.is_mounted()) {
            Some(p) => p.set_image_status(status),
            None => tracing::warn!(panel, ?status, "image status for unknown panel ignored"),
        }
    }

    /// Run one display refresh at host time `now` (seconds).
    ///
    /// Returns `None` when the host has no frame callbacks or the shell is shut down.
    pub fn frame(&mut self, now: f64) -> Option<&FrameSnapshot> {
        if self.shut_down {
            return None;
        }
        let tick = self.ctx.frames_mut().begin_frame(now)?;
        let dt = tick.time.dt;
        for due in tick.due {
            match due.owner {
                Owner::Scroll => self.scroll.tick(dt),
                Owner::Triggers => self.update_triggers(),
                Owner::Indicator => {
                    self.progress.update(&self.scroll.state(), self.ctx.layout(), dt);
                }
                Owner::Hero => self.hero.advance(dt),
                Owner::Footer => self.footer.advance(dt),
                Owner::Panel(i) => {
                    if let Some(p) = self.panels.get_mut(i) {
                        p.advance(dt);
                    }
                }
                Owner::Parallax(i) => {
                    if let Some(p) = self.parallax.get_mut(i) {
                        p.tick(dt);
                    }
                }
            }
        }
        self.frames += 1;
        self.snapshot = Some(self.capture(tick.time.now));
        self.snapshot.as_ref()
    }

    fn update_triggers(&mut self) {
        let y = self.scroll.state().virtual_offset;
        let events = self.ctx.triggers_mut().update(y);
        let Self {
            ctx,
            hero,
            panels,
            progress,
            footer,
            ..
        } = self;
        events.dispatch(ctx, |_, ev| {
            let consumed = progress.handle_trigger(&ev)
                || hero.handle_trigger(&ev)
                || footer.handle_trigger(&ev)
                || panels
                    .iter_mut()
                    .find(|p| p.owns(ev.handle))
                    .is_some_and(|p| p.handle_trigger(&ev));
            if !consumed {
                tracing::trace!(?ev, "trigger event without owner");
            }
        });
    }

    fn capture(&self, time: f64) -> FrameSnapshot {
        let panels = self
            .panels
            .iter()
            .zip(&self.parallax)
            .filter(|(p, _)| p.is_mounted())
            .map(|(p, px)| {
                let v = p.visual();
                let layer = px.offsets();
                PanelSnapshot {
                    index: p.index(),
                    title: self
                        .catalog
                        .get(p.index())
                        .map(|r| r.title.clone())
                        .unwrap_or_default(),
                    image: v.image.compose(layer.image),
                    content: v.content.compose(layer.content),
                    image_status: v.image_status,
                    degraded: v.degraded,
                }
            })
            .collect();
        FrameSnapshot {
            frame: self.frames,
            time,
            scroll: self.scroll.state(),
            profile: self.kind,
            progress: self.progress.readout().clone(),
            hero: self.hero.visual(),
            panels,
            footer: self.footer.visual(),
        }
    }

    /// Tear down one panel: its triggers, playbacks and frame handles go away immediately.
    pub fn unmount_panel(&mut self, index: usize) -> bool {
        let Some(panel) = self.panels.get_mut(index).filter(|p| p.is_mounted()) else {
            return false;
        };
        panel.unmount(&mut self.ctx);
        if let Some(p) = self.parallax.get_mut(index) {
            p.unmount(&mut self.ctx);
        }
        if self.hovered == Some(index) {
            self.hovered = None;
        }
        true
    }

    /// Release every registration, hand scrolling back to the host and stop producing frames.
    /// Idempotent.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        for i in 0..self.panels.len() {
            self.unmount_panel(i);
        }
        self.progress.unmount(&mut self.ctx);
        self.hero.unmount(&mut self.ctx);
        self.footer.unmount(&mut self.ctx);
        for h in self.own_frames.drain(..) {
            self.ctx.unsubscribe(h);
        }
        self.scroll.detach(&mut self.host);
        self.shut_down = true;
        tracing::debug!(
            triggers = self.ctx.triggers().len(),
            frame_subscriptions = self.ctx.frames().len(),
            "shell shut down"
        );
    }

    /// Live registration counts.
    pub fn stats(&self) -> ShellStats {
        ShellStats {
            triggers: self.ctx.triggers().len(),
            frame_subscriptions: self.ctx.frames().len(),
            panels: self.panels.iter().filter(|p| p.is_mounted()).count(),
            frames: self.frames,
        }
    }

    /// Snapshot of the latest frame. Without frame callbacks, the resting state as of the last
    /// input.
    pub fn snapshot(&self) -> Option<&FrameSnapshot> {
        self.snapshot.as_ref()
    }

    /// Published scroll value.
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll.state()
    }

    /// Parameter set in force.
    pub fn profile(&self) -> ProfileKind {
        self.kind
    }

    /// Current document layout.
    pub fn layout(&self) -> &DocumentLayout {
        self.ctx.layout()
    }

    /// Panel controller `index`.
    pub fn panel(&self, index: usize) -> Option<&SectionController> {
        self.panels.get(index)
    }

    /// Parallax controller of panel `index`.
    pub fn parallax(&self, index: usize) -> Option<&ParallaxController> {
        self.parallax.get(index)
    }

    /// Settings in use.
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Artworks shown.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// True after [`Shell::shutdown`].
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

impl<H: Host> Drop for Shell<H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn metrics_for(base: &LayoutMetrics, profile: &MotionProfile) -> LayoutMetrics {
    LayoutMetrics {
        min_panel_height: profile.min_panel_height,
        ..*base
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/mod.rs"]
mod tests;
