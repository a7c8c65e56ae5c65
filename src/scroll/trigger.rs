use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::{FolioError, FolioResult};
use crate::foundation::math::inverse_lerp;

/// Named layout area a trigger observes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum RegionId {
    /// The whole scrollable document.
    Document,
    /// Hero block at the top of the page.
    Hero,
    /// Artwork panel by catalog ordinal.
    Panel(usize),
    /// Footer block.
    Footer,
}

/// Source of region bounds in document coordinates.
pub trait RegionLayout {
    /// Bounds of `region`, or `None` if it is not laid out.
    fn region_rect(&self, region: RegionId) -> Option<Rect>;
    /// Viewport the layout was computed for.
    fn viewport(&self) -> Viewport;
}

/// One side of a threshold: a fraction of a length plus a pixel offset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Edge {
    /// `0` = top, `0.5` = center, `1` = bottom.
    pub fraction: f64,
    /// Extra pixels added after the fraction.
    pub offset_px: f64,
}

impl Edge {
    /// Top edge.
    pub const TOP: Self = Self::at(0.0);
    /// Vertical center.
    pub const CENTER: Self = Self::at(0.5);
    /// Bottom edge.
    pub const BOTTOM: Self = Self::at(1.0);

    /// Edge at `fraction` with no pixel offset.
    pub const fn at(fraction: f64) -> Self {
        Self {
            fraction,
            offset_px: 0.0,
        }
    }

    fn resolve(self, length: f64) -> f64 {
        self.fraction * length + self.offset_px
    }
}

impl FromStr for Edge {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || FolioError::validation(format!("invalid threshold edge '{s}'"));
        let (base, offset) = if let Some(i) = s.find("+=") {
            (&s[..i], s[i + 2..].parse::<f64>().map_err(|_| bad())?)
        } else if let Some(i) = s.find("-=") {
            (&s[..i], -s[i + 2..].parse::<f64>().map_err(|_| bad())?)
        } else {
            (s, 0.0)
        };
        let mut edge = match base {
            "top" => Self::TOP,
            "center" => Self::CENTER,
            "bottom" => Self::BOTTOM,
            pct if pct.ends_with('%') => {
                let v = pct[..pct.len() - 1].parse::<f64>().map_err(|_| bad())?;
                Self::at(v / 100.0)
            }
            px => {
                let v = px
                    .strip_suffix("px")
                    .unwrap_or(px)
                    .parse::<f64>()
                    .map_err(|_| bad())?;
                Self {
                    fraction: 0.0,
                    offset_px: v,
                }
            }
        };
        edge.offset_px += offset;
        if !(edge.fraction.is_finite() && edge.offset_px.is_finite()) {
            return Err(bad());
        }
        Ok(edge)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fraction {
            x if x == 0.0 => f.write_str("top")?,
            x if x == 0.5 => f.write_str("center")?,
            x if x == 1.0 => f.write_str("bottom")?,
            x => write!(f, "{}%", (x * 100.0 * 1e6).round() / 1e6)?,
        }
        if self.offset_px > 0.0 {
            write!(f, "+={}", self.offset_px)?;
        } else if self.offset_px < 0.0 {
            write!(f, "-={}", -self.offset_px)?;
        }
        Ok(())
    }
}

/// Scroll position at which a point of the region meets a point of the viewport.
///
/// Written as `"<region edge> <viewport edge>"`: `"top 80%"` is reached when the region's top
/// is 80% of the way down the viewport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Threshold {
    /// Point on the region.
    pub region: Edge,
    /// Point on the viewport.
    pub viewport: Edge,
}

impl Threshold {
    /// Build from two edges.
    pub const fn new(region: Edge, viewport: Edge) -> Self {
        Self { region, viewport }
    }

    /// Scroll offset at which this threshold is met for `rect` in a viewport of `viewport_h`.
    pub fn position(&self, rect: Rect, viewport_h: f64) -> f64 {
        rect.y0 + self.region.resolve(rect.height()) - self.viewport.resolve(viewport_h)
    }
}

impl FromStr for Threshold {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(region), Some(viewport), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(FolioError::validation(format!(
                "threshold '{s}' must be '<region edge> <viewport edge>'"
            )));
        };
        Ok(Self {
            region: region.parse()?,
            viewport: viewport.parse()?,
        })
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.region, self.viewport)
    }
}

impl TryFrom<String> for Threshold {
    type Error = FolioError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Threshold> for String {
    fn from(value: Threshold) -> Self {
        value.to_string()
    }
}

/// What to observe and between which thresholds it is active.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerSpec {
    /// Observed region.
    pub region: RegionId,
    /// Activation threshold.
    pub start: Threshold,
    /// Deactivation threshold.
    pub end: Threshold,
}

impl TriggerSpec {
    /// Spec with the conventional end: the region's bottom leaving the viewport top.
    pub fn new(region: RegionId, start: Threshold) -> Self {
        Self {
            region,
            start,
            end: Threshold::new(Edge::BOTTOM, Edge::TOP),
        }
    }

    /// Replace the end threshold.
    pub fn until(mut self, end: Threshold) -> Self {
        self.end = end;
        self
    }
}

/// Where the scroll position sits relative to a trigger's range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    /// Above the start threshold.
    Before,
    /// Between start and end (inclusive).
    Active,
    /// Past the end threshold.
    After,
}

impl Phase {
    fn classify(start: f64, end: f64, y: f64) -> Self {
        if y < start {
            Self::Before
        } else if y > end {
            Self::After
        } else {
            Self::Active
        }
    }
}

/// Opaque registration token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TriggerHandle(u64);

/// What happened to a registration during an update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerEventKind {
    /// Before → Active.
    Enter,
    /// Active → After.
    Leave,
    /// After → Active.
    EnterBack,
    /// Active → Before.
    LeaveBack,
    /// Progress ratio in `[0, 1]`.
    Progress(f64),
}

/// Event emitted by [`TriggerRegistry::update`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerEvent {
    /// Registration the event belongs to.
    pub handle: TriggerHandle,
    /// What happened.
    pub kind: TriggerEventKind,
}

/// Anything that can tell whether a trigger registration is still alive.
pub trait TriggerLiveness {
    /// Whether `handle` is still registered.
    fn is_live(&self, handle: TriggerHandle) -> bool;
}

/// Events produced by one registry update, in registration order.
#[derive(Clone, Debug, Default)]
pub struct TriggerEvents {
    events: SmallVec<[TriggerEvent; 8]>,
}

impl TriggerEvents {
    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when nothing happened.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate without consuming.
    pub fn iter(&self) -> impl Iterator<Item = &TriggerEvent> {
        self.events.iter()
    }

    /// Deliver events to `f`, skipping any whose registration is gone by the time it is reached.
    ///
    /// `f` may unregister triggers (including the current one) through `ctx`. Returns the number
    /// of delivered events.
    pub fn dispatch<C>(self, ctx: &mut C, mut f: impl FnMut(&mut C, TriggerEvent)) -> usize
    where
        C: TriggerLiveness + ?Sized,
    {
        let mut delivered = 0;
        for ev in self.events {
            if ctx.is_live(ev.handle) {
                f(ctx, ev);
                delivered += 1;
            }
        }
        delivered
    }
}

impl IntoIterator for TriggerEvents {
    type Item = TriggerEvent;
    type IntoIter = smallvec::IntoIter<[TriggerEvent; 8]>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

#[derive(Clone, Debug)]
struct Registration {
    handle: TriggerHandle,
    spec: TriggerSpec,
    start: f64,
    end: f64,
    phase: Phase,
    progress: f64,
}

/// Viewport-intersection registry driven by the virtual scroll position.
///
/// Toggle callbacks are edge-triggered: each crossing yields exactly one event no matter how many
/// updates it is spread over, and a single update that jumps over a whole range still reports
/// both crossings in order.
#[derive(Clone, Debug, Default)]
pub struct TriggerRegistry {
    regs: Vec<Registration>,
    next: u64,
}

impl TriggerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `spec` against `layout`.
    ///
    /// Fails when the region is not laid out or the end threshold precedes the start.
    pub fn register(
        &mut self,
        spec: TriggerSpec,
        layout: &dyn RegionLayout,
    ) -> FolioResult<TriggerHandle> {
        let (start, end) = resolve(&spec, layout)?;
        if end < start {
            return Err(FolioError::validation(format!(
                "trigger on {:?}: end '{}' precedes start '{}'",
                spec.region, spec.end, spec.start
            )));
        }
        let handle = TriggerHandle(self.next);
        self.next += 1;
        self.regs.push(Registration {
            handle,
            spec,
            start,
            end,
            phase: Phase::Before,
            progress: 0.0,
        });
        tracing::trace!(?handle, region = ?spec.region, start, end, "trigger registered");
        Ok(handle)
    }

    /// Remove a registration. Idempotent; returns whether it was live.
    pub fn unregister(&mut self, handle: TriggerHandle) -> bool {
        let before = self.regs.len();
        self.regs.retain(|r| r.handle != handle);
        self.regs.len() != before
    }

    /// Whether `handle` is registered.
    pub fn contains(&self, handle: TriggerHandle) -> bool {
        self.find(handle).is_some()
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Drop every registration.
    pub fn clear(&mut self) {
        self.regs.clear();
    }

    /// Current phase of `handle`.
    pub fn phase(&self, handle: TriggerHandle) -> Option<Phase> {
        self.find(handle).map(|r| r.phase)
    }

    /// Last computed progress of `handle`.
    pub fn progress(&self, handle: TriggerHandle) -> Option<f64> {
        self.find(handle).map(|r| r.progress)
    }

    /// Resolved `(start, end)` scroll offsets of `handle`.
    pub fn bounds(&self, handle: TriggerHandle) -> Option<(f64, f64)> {
        self.find(handle).map(|r| (r.start, r.end))
    }

    /// Recompute every registration's offsets after a layout change. Phases are kept, so the
    /// next [`TriggerRegistry::update`] reports only real crossings.
    pub fn refresh(&mut self, layout: &dyn RegionLayout) {
        for reg in &mut self.regs {
            match resolve(&reg.spec, layout) {
                Ok((start, end)) => {
                    if end < start {
                        tracing::warn!(
                            region = ?reg.spec.region,
                            start,
                            end,
                            "trigger range collapsed after refresh"
                        );
                    }
                    reg.start = start;
                    reg.end = end.max(start);
                }
                Err(err) => {
                    tracing::warn!(region = ?reg.spec.region, %err, "trigger kept stale bounds");
                }
            }
        }
    }

    /// Recompute progress and phase for every registration at scroll offset `y`.
    pub fn update(&mut self, y: f64) -> TriggerEvents {
        let mut out = TriggerEvents::default();
        if !y.is_finite() {
            return out;
        }
        for reg in &mut self.regs {
            let progress = inverse_lerp(reg.start, reg.end, y);
            let phase = Phase::classify(reg.start, reg.end, y);
            let old = reg.phase;
            let crossings: &[TriggerEventKind] = match (old, phase) {
                (Phase::Before, Phase::Active) => &[TriggerEventKind::Enter],
                (Phase::Active, Phase::After) => &[TriggerEventKind::Leave],
                (Phase::Before, Phase::After) => {
                    &[TriggerEventKind::Enter, TriggerEventKind::Leave]
                }
                (Phase::After, Phase::Active) => &[TriggerEventKind::EnterBack],
                (Phase::Active, Phase::Before) => &[TriggerEventKind::LeaveBack],
                (Phase::After, Phase::Before) => {
                    &[TriggerEventKind::EnterBack, TriggerEventKind::LeaveBack]
                }
                _ => &[],
            };
            for &kind in crossings {
                out.events.push(TriggerEvent {
                    handle: reg.handle,
                    kind,
                });
            }
            if phase == Phase::Active || phase != old {
                out.events.push(TriggerEvent {
                    handle: reg.handle,
                    kind: TriggerEventKind::Progress(progress),
                });
            }
            reg.phase = phase;
            reg.progress = progress;
        }
        out
    }

    fn find(&self, handle: TriggerHandle) -> Option<&Registration> {
        self.regs.iter().find(|r| r.handle == handle)
    }
}

impl TriggerLiveness for TriggerRegistry {
    fn is_live(&self, handle: TriggerHandle) -> bool {
        self.contains(handle)
    }
}

fn resolve(spec: &TriggerSpec, layout: &dyn RegionLayout) -> FolioResult<(f64, f64)> {
    let rect = layout
        .region_rect(spec.region)
        .ok_or_else(|| FolioError::layout(format!("region {:?} is not laid out", spec.region)))?;
    let vh = layout.viewport().height;
    Ok((
        spec.start.position(rect, vh),
        spec.end.position(rect, vh),
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/trigger.rs"]
mod tests;
