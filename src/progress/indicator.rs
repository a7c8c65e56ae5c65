use crate::context::{Context, Owner};
use crate::foundation::math::{clamp01, damp};
use crate::layout::document::DocumentLayout;
use crate::schedule::frame::{FrameHandle, FramePhase};
use crate::scroll::driver::ScrollState;
use crate::scroll::trigger::{
    Edge, RegionId, Threshold, TriggerEvent, TriggerEventKind, TriggerHandle, TriggerSpec,
};

/// Default follow factor of the displayed percentage, per 60 Hz frame.
pub const DEFAULT_DISPLAY_SMOOTHING: f64 = 0.1;

/// What the progress readout shows this frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressReadout {
    /// Page progress in `[0, 100]`.
    pub percent: f64,
    /// `percent` eased for the numeric label.
    pub display_percent: f64,
    /// 0 for the hero, `i + 1` for panel `i`, clamped to the panel count.
    pub section_index: usize,
    /// One entry per panel; at most one is `true`.
    pub dots: Vec<bool>,
}

/// Page-spanning progress readout and section dots.
#[derive(Debug)]
pub struct ProgressIndicator {
    trigger: Option<TriggerHandle>,
    frame: Option<FrameHandle>,
    panel_count: usize,
    smoothing: f64,
    ratio: f64,
    readout: ProgressReadout,
}

impl ProgressIndicator {
    /// Register the page-spanning trigger and a `Triggers`-phase frame handle.
    ///
    /// Without a trigger the ratio is read straight from the scroll state instead.
    pub fn mount(ctx: &mut Context, panel_count: usize, smoothing: f64) -> Self {
        let spec = TriggerSpec::new(RegionId::Document, Threshold::new(Edge::TOP, Edge::TOP))
            .until(Threshold::new(Edge::BOTTOM, Edge::BOTTOM));
        let trigger = match ctx.register(spec) {
            Ok(h) => Some(h),
            Err(err) => {
                tracing::warn!(%err, "progress falls back to scroll state");
                None
            }
        };
        let frame = Some(ctx.subscribe(FramePhase::Triggers, Owner::Indicator));
        Self {
            trigger,
            frame,
            panel_count,
            smoothing,
            ratio: 0.0,
            readout: ProgressReadout {
                dots: vec![false; panel_count],
                ..ProgressReadout::default()
            },
        }
    }

    /// Take the page ratio from the page-spanning trigger.
    pub fn handle_trigger(&mut self, ev: &TriggerEvent) -> bool {
        if self.trigger != Some(ev.handle) {
            return false;
        }
        if let TriggerEventKind::Progress(p) = ev.kind {
            self.ratio = p;
        }
        true
    }

    /// Recompute the readout for this frame.
    pub fn update(&mut self, scroll: &ScrollState, layout: &DocumentLayout, dt: f64) {
        if self.trigger.is_none() {
            self.ratio = scroll.progress;
        }
        let percent = clamp01(self.ratio) * 100.0;
        let section_index = section_at(layout, scroll.virtual_offset).min(self.panel_count);
        let display_percent = damp(self.readout.display_percent, percent, self.smoothing, dt);

        self.readout.percent = percent;
        self.readout.display_percent = display_percent;
        self.readout.section_index = section_index;
        for (i, dot) in self.readout.dots.iter_mut().enumerate() {
            *dot = section_index == i + 1;
        }
    }

    /// Latest readout.
    pub fn readout(&self) -> &ProgressReadout {
        &self.readout
    }

    /// Whether the page-spanning trigger is in use.
    pub fn is_trigger_driven(&self) -> bool {
        self.trigger.is_some()
    }

    /// Release the trigger and the frame handle. Idempotent.
    pub fn unmount(&mut self, ctx: &mut Context) {
        if let Some(h) = self.trigger.take() {
            ctx.unregister(h);
        }
        if let Some(h) = self.frame.take() {
            ctx.unsubscribe(h);
        }
    }
}

/// Section shown at scroll `offset`: 0 for the hero, `i + 1` for panel `i`, the panel count past
/// the last panel.
///
/// When the hero and every panel are exactly one viewport tall this is [`section_index`].
/// Panels raised above the viewport height by a minimum height are hit-tested instead.
pub fn section_at(layout: &DocumentLayout, offset: f64) -> usize {
    let vh = layout.viewport().height;
    let count = layout.panel_count();
    let uniform = layout.hero().height() == vh
        && (0..count).all(|i| layout.panel(i).is_some_and(|r| r.height() == vh));
    if uniform || !offset.is_finite() {
        return section_index(offset, vh, count);
    }
    let offset = offset.max(0.0);
    match layout.panel_at(offset) {
        Some(i) => i + 1,
        None if offset < layout.hero().y1 => 0,
        None => count,
    }
}

/// `min(floor(offset / viewport_height), panel_count)`; 0 for degenerate input.
pub fn section_index(offset: f64, viewport_height: f64, panel_count: usize) -> usize {
    if !(offset.is_finite() && viewport_height.is_finite() && viewport_height > 0.0) {
        return 0;
    }
    let idx = (offset.max(0.0) / viewport_height).floor();
    if idx >= panel_count as f64 {
        panel_count
    } else {
        idx as usize
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/indicator.rs"]
mod tests;
