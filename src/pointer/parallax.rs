use crate::animation::visual::VisualState;
use crate::context::{Context, Owner};
use crate::foundation::core::{Point, Rect, Vec2};
use crate::foundation::math::damp;
use crate::schedule::frame::{FrameHandle, FramePhase};

/// Below this per-axis distance the eased pointer lands on its target.
const SNAP: f64 = 1e-4;

/// Parallax gains.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Fraction of the remaining distance covered per 60 Hz frame.
    pub factor: f64,
    /// Image translation per unit of pointer offset (px).
    pub image_translate: f64,
    /// Image rotation per unit of pointer offset (deg).
    pub image_rotate_deg: f64,
    /// Text translation per unit of pointer offset (px).
    pub content_translate: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            factor: 0.1,
            image_translate: 15.0,
            image_rotate_deg: 2.0,
            content_translate: 5.0,
        }
    }
}

/// Additive layers for one panel's image and text.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParallaxOffsets {
    /// Image layer.
    pub image: VisualState,
    /// Text layer.
    pub content: VisualState,
}

impl Default for ParallaxOffsets {
    fn default() -> Self {
        Self {
            image: VisualState::REST,
            content: VisualState::REST,
        }
    }
}

/// Eased pointer offset for one panel.
///
/// The pointer is normalized to `[-1, 1]` per axis relative to the panel center, then followed
/// with the same exponential smoothing the scroll driver's lerp mode uses.
#[derive(Debug)]
pub struct ParallaxController {
    panel: usize,
    config: ParallaxConfig,
    strength: f64,
    target: Vec2,
    current: Vec2,
    frame: Option<FrameHandle>,
}

impl ParallaxController {
    /// Subscribe a `Pointer`-phase frame handle for `panel`.
    pub fn mount(ctx: &mut Context, panel: usize, config: ParallaxConfig, strength: f64) -> Self {
        Self {
            panel,
            config,
            strength,
            target: Vec2::ZERO,
            current: Vec2::ZERO,
            frame: Some(ctx.subscribe(FramePhase::Pointer, Owner::Parallax(panel))),
        }
    }

    /// Pointer moved to `point` over the panel occupying `bounds` (same coordinate space).
    ///
    /// Ignored once unmounted or when `bounds` has no area.
    pub fn pointer_move(&mut self, point: Point, bounds: Rect) -> bool {
        if !self.is_mounted() {
            return false;
        }
        let (w, h) = (bounds.width(), bounds.height());
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0)
            || !(point.x.is_finite() && point.y.is_finite())
        {
            return false;
        }
        let nx = ((point.x - bounds.x0) / w - 0.5) * 2.0;
        let ny = ((point.y - bounds.y0) / h - 0.5) * 2.0;
        self.target = Vec2::new(nx.clamp(-1.0, 1.0), ny.clamp(-1.0, 1.0));
        true
    }

    /// Pointer left the panel: ease back to neutral.
    pub fn pointer_leave(&mut self) {
        self.target = Vec2::ZERO;
    }

    /// Move the eased pointer toward its target by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        if !self.is_mounted() {
            return;
        }
        let f = self.config.factor;
        let mut next = Vec2::new(
            damp(self.current.x, self.target.x, f, dt),
            damp(self.current.y, self.target.y, f, dt),
        );
        if (next.x - self.target.x).abs() < SNAP {
            next.x = self.target.x;
        }
        if (next.y - self.target.y).abs() < SNAP {
            next.y = self.target.y;
        }
        self.current = next;
    }

    /// Change the profile multiplier (0 disables the effect).
    pub fn set_strength(&mut self, strength: f64) {
        self.strength = strength;
    }

    /// Layers to compose onto the panel's image and text.
    pub fn offsets(&self) -> ParallaxOffsets {
        let c = self.current * self.strength;
        let cfg = &self.config;
        let mut image = VisualState::REST;
        image.x = c.x * cfg.image_translate;
        image.y = c.y * cfg.image_translate;
        image.rotation_y = c.x * cfg.image_rotate_deg;
        image.rotation_x = c.y * cfg.image_rotate_deg;
        let mut content = VisualState::REST;
        content.x = c.x * cfg.content_translate;
        content.y = c.y * cfg.content_translate;
        ParallaxOffsets { image, content }
    }

    /// Normalized pointer target.
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Eased pointer position.
    pub fn current(&self) -> Vec2 {
        self.current
    }

    /// Panel this controller follows.
    pub fn panel(&self) -> usize {
        self.panel
    }

    /// False after [`ParallaxController::unmount`].
    pub fn is_mounted(&self) -> bool {
        self.frame.is_some()
    }

    /// Release the frame handle and drop back to neutral. Idempotent.
    pub fn unmount(&mut self, ctx: &mut Context) {
        if let Some(h) = self.frame.take() {
            ctx.unsubscribe(h);
        }
        self.target = Vec2::ZERO;
        self.current = Vec2::ZERO;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pointer/parallax.rs"]
mod tests;
