use crate::foundation::error::{FolioError, FolioResult};

pub use kurbo::{Point, Rect, Vec2};

/// Visible area of the rendering surface, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels (> 0).
    pub width: f64,
    /// Height in pixels (> 0).
    pub height: f64,
}

impl Viewport {
    /// Build a validated viewport.
    pub fn new(width: f64, height: f64) -> FolioResult<Self> {
        let vp = Self { width, height };
        vp.validate()?;
        Ok(vp)
    }

    /// Check that both extents are finite and strictly positive.
    pub fn validate(self) -> FolioResult<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(FolioError::validation("Viewport width must be finite and > 0"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(FolioError::validation(
                "Viewport height must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// The viewport as a rectangle anchored at `(0, scroll_y)` in document space.
    pub fn rect_at(self, scroll_y: f64) -> Rect {
        Rect::new(0.0, scroll_y, self.width, scroll_y + self.height)
    }
}

/// Timing information for one display refresh.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameTime {
    /// Host timestamp in seconds.
    pub now: f64,
    /// Seconds since the previous frame (0 on the first frame).
    pub dt: f64,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
