use crate::foundation::error::{FolioError, FolioResult};
use crate::layout::document::LayoutMetrics;
use crate::pointer::parallax::ParallaxConfig;
use crate::progress::indicator::DEFAULT_DISPLAY_SMOOTHING;
use crate::schedule::frame::DEFAULT_MAX_FRAME_DT;
use crate::scroll::driver::SmoothScrollConfig;
use crate::section::profile::{MotionProfiles, ProfileSelector};

/// Options controlling a [`crate::Shell`].
///
/// Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Smooth-scroll driver settings.
    pub smooth_scroll: SmoothScrollConfig,
    /// Breakpoint between the desktop and constrained profiles.
    pub selector: ProfileSelector,
    /// Panel animation parameter sets.
    pub profiles: MotionProfiles,
    /// Pointer parallax gains.
    pub parallax: ParallaxConfig,
    /// Block heights. `min_panel_height` is taken from the active profile.
    pub layout: LayoutMetrics,
    /// Largest frame step in seconds.
    pub max_frame_dt: f64,
    /// Seconds before the hero intro starts.
    pub hero_intro_delay: f64,
    /// Follow factor of the displayed progress percentage per 60 Hz frame.
    pub progress_smoothing: f64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            smooth_scroll: SmoothScrollConfig::default(),
            selector: ProfileSelector::default(),
            profiles: MotionProfiles::default(),
            parallax: ParallaxConfig::default(),
            layout: LayoutMetrics::default(),
            max_frame_dt: DEFAULT_MAX_FRAME_DT,
            hero_intro_delay: 0.5,
            progress_smoothing: DEFAULT_DISPLAY_SMOOTHING,
        }
    }
}

impl ShellConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> FolioResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the shell cannot run with.
    pub fn validate(&self) -> FolioResult<()> {
        self.smooth_scroll.validate()?;
        self.profiles.validate()?;
        let bp = self.selector.breakpoint;
        if !(bp.is_finite() && bp >= 0.0) {
            return Err(FolioError::validation("breakpoint must be finite and >= 0"));
        }
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            return Err(FolioError::validation("max_frame_dt must be finite and > 0"));
        }
        if !(self.hero_intro_delay.is_finite() && self.hero_intro_delay >= 0.0) {
            return Err(FolioError::validation(
                "hero_intro_delay must be finite and >= 0",
            ));
        }
        for (name, f) in [
            ("progress_smoothing", self.progress_smoothing),
            ("parallax.factor", self.parallax.factor),
        ] {
            if !(f.is_finite() && f > 0.0 && f <= 1.0) {
                return Err(FolioError::validation(format!("{name} must be in (0, 1]")));
            }
        }
        let p = &self.parallax;
        if ![p.image_translate, p.image_rotate_deg, p.content_translate]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(FolioError::validation("parallax gains must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/config.rs"]
mod tests;
