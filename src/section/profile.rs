use crate::animation::ease::Ease;
use crate::animation::timeline::{Channel, Position, Timeline};
use crate::animation::visual::{Prop, Target};
use crate::foundation::core::Viewport;
use crate::foundation::error::{FolioError, FolioResult};
use crate::scroll::trigger::{Edge, RegionId, Threshold, TriggerSpec};

/// Which parameter set is in force.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    /// Wide viewports with pointer input.
    Desktop,
    /// Narrow viewports (phones, split windows).
    Constrained,
}

/// Picks a [`ProfileKind`] from the viewport width.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProfileSelector {
    /// Widths strictly below this are constrained.
    pub breakpoint: f64,
}

impl Default for ProfileSelector {
    fn default() -> Self {
        Self { breakpoint: 768.0 }
    }
}

impl ProfileSelector {
    /// Profile for `viewport`.
    pub fn select(&self, viewport: Viewport) -> ProfileKind {
        if viewport.width < self.breakpoint {
            ProfileKind::Constrained
        } else {
            ProfileKind::Desktop
        }
    }
}

/// Animation parameters for artwork panels.
///
/// Switching profiles rebuilds triggers and timelines; the two sets are never mixed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionProfile {
    /// Where the entrance plays.
    pub entrance_start: Threshold,
    /// Image entrance length (s).
    pub entrance_duration: f64,
    /// Image entrance curve.
    pub entrance_ease: Ease,
    /// Image scale before the entrance.
    pub image_from_scale: f64,
    /// Image depth offset before the entrance (px, negative = away).
    pub depth_offset: f64,
    /// Image tilt before the entrance (deg around X).
    pub tilt_deg: f64,
    /// Text entrance length (s).
    pub content_duration: f64,
    /// Text entrance curve.
    pub content_ease: Ease,
    /// Text vertical offset before the entrance (px).
    pub content_offset_y: f64,
    /// Delay between the image and text entrances (s).
    pub stagger: f64,
    /// Image vertical travel across the scrub range (px).
    pub scrub_y: [f64; 2],
    /// Image scale across the scrub range.
    pub scrub_scale: [f64; 2],
    /// Curve for the scrubbed scale.
    pub scrub_scale_ease: Ease,
    /// Lower bound for panel height (px).
    pub min_panel_height: f64,
    /// Multiplier for pointer parallax offsets (0 disables).
    pub parallax_strength: f64,
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self::desktop()
    }
}

impl MotionProfile {
    /// Wide-viewport parameters.
    pub fn desktop() -> Self {
        Self {
            entrance_start: Threshold::new(Edge::TOP, Edge::at(0.8)),
            entrance_duration: 1.0,
            entrance_ease: Ease::OutCubic,
            image_from_scale: 0.9,
            depth_offset: -80.0,
            tilt_deg: 6.0,
            content_duration: 0.8,
            content_ease: Ease::OutCubic,
            content_offset_y: 30.0,
            stagger: 0.2,
            scrub_y: [-50.0, 100.0],
            scrub_scale: [1.0, 1.1],
            scrub_scale_ease: Ease::InOutQuad,
            min_panel_height: 0.0,
            parallax_strength: 1.0,
        }
    }

    /// Narrow-viewport parameters: shorter, flatter, no pointer parallax.
    pub fn constrained() -> Self {
        Self {
            entrance_start: Threshold::new(Edge::TOP, Edge::at(0.9)),
            entrance_duration: 0.7,
            entrance_ease: Ease::OutQuad,
            image_from_scale: 0.95,
            depth_offset: 0.0,
            tilt_deg: 0.0,
            content_duration: 0.6,
            content_ease: Ease::OutQuad,
            content_offset_y: 20.0,
            stagger: 0.1,
            scrub_y: [-20.0, 40.0],
            scrub_scale: [1.0, 1.05],
            scrub_scale_ease: Ease::InOutQuad,
            min_panel_height: 560.0,
            parallax_strength: 0.0,
        }
    }

    /// Reject non-finite or negative timings and non-positive scales.
    pub fn validate(&self) -> FolioResult<()> {
        for (name, v) in [
            ("entrance_duration", self.entrance_duration),
            ("content_duration", self.content_duration),
            ("stagger", self.stagger),
            ("min_panel_height", self.min_panel_height),
            ("parallax_strength", self.parallax_strength),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(FolioError::validation(format!(
                    "profile {name} must be finite and >= 0"
                )));
            }
        }
        let scales = [
            self.image_from_scale,
            self.scrub_scale[0],
            self.scrub_scale[1],
        ];
        if scales.iter().any(|s| !(s.is_finite() && *s > 0.0)) {
            return Err(FolioError::validation("profile scales must be finite and > 0"));
        }
        let offsets = [
            self.depth_offset,
            self.tilt_deg,
            self.content_offset_y,
            self.scrub_y[0],
            self.scrub_y[1],
        ];
        if offsets.iter().any(|v| !v.is_finite()) {
            return Err(FolioError::validation("profile offsets must be finite"));
        }
        Ok(())
    }

    /// Entrance trigger for panel `index`.
    pub fn entrance_trigger(&self, index: usize) -> TriggerSpec {
        TriggerSpec::new(RegionId::Panel(index), self.entrance_start)
    }

    /// Scrub trigger for panel `index`: from entering the viewport bottom to leaving its top.
    pub fn scrub_trigger(&self, index: usize) -> TriggerSpec {
        TriggerSpec::new(
            RegionId::Panel(index),
            Threshold::new(Edge::TOP, Edge::BOTTOM),
        )
        .until(Threshold::new(Edge::BOTTOM, Edge::TOP))
    }

    /// Time-driven entrance: image fades/scales/settles in, then the text rises in.
    pub fn entrance_timeline(&self) -> Timeline {
        let mut tl = Timeline::new();
        tl.from_to(
            Target::Image,
            &[
                Channel::new(Prop::Opacity, 0.0, 1.0),
                Channel::new(Prop::Scale, self.image_from_scale, 1.0),
                Channel::new(Prop::Z, self.depth_offset, 0.0),
                Channel::new(Prop::RotationX, self.tilt_deg, 0.0),
            ],
            self.entrance_duration,
            self.entrance_ease,
            Position::At(0.0),
        )
        .from_to(
            Target::Content,
            &[
                Channel::new(Prop::Opacity, 0.0, 1.0),
                Channel::new(Prop::Y, self.content_offset_y, 0.0),
            ],
            self.content_duration,
            self.content_ease,
            Position::At(self.stagger),
        );
        tl
    }

    /// Scroll-scrubbed image drift, sampled by progress over a unit-length timeline.
    pub fn scrub_timeline(&self) -> Timeline {
        let mut tl = Timeline::new();
        tl.from_to(
            Target::Image,
            &[Channel::new(Prop::Y, self.scrub_y[0], self.scrub_y[1])],
            1.0,
            Ease::Linear,
            Position::At(0.0),
        )
        .from_to(
            Target::Image,
            &[Channel::new(
                Prop::Scale,
                self.scrub_scale[0],
                self.scrub_scale[1],
            )],
            1.0,
            self.scrub_scale_ease,
            Position::At(0.0),
        );
        tl
    }
}

/// Desktop and constrained parameter sets.
///
/// When deserialized, each set is a partial overlay on its own defaults: a `constrained` object
/// that names one field keeps every other constrained value.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MotionProfiles {
    /// Wide-viewport set.
    pub desktop: MotionProfile,
    /// Narrow-viewport set.
    pub constrained: MotionProfile,
}

impl Default for MotionProfiles {
    fn default() -> Self {
        Self {
            desktop: MotionProfile::desktop(),
            constrained: MotionProfile::constrained(),
        }
    }
}

impl<'de> serde::Deserialize<'de> for MotionProfiles {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;

        #[derive(serde::Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Raw {
            #[serde(default)]
            desktop: serde_json::Map<String, serde_json::Value>,
            #[serde(default)]
            constrained: serde_json::Map<String, serde_json::Value>,
        }

        let raw = Raw::deserialize(d)?;
        Ok(Self {
            desktop: overlay(MotionProfile::desktop(), raw.desktop).map_err(D::Error::custom)?,
            constrained: overlay(MotionProfile::constrained(), raw.constrained)
                .map_err(D::Error::custom)?,
        })
    }
}

fn overlay(
    base: MotionProfile,
    patch: serde_json::Map<String, serde_json::Value>,
) -> serde_json::Result<MotionProfile> {
    let mut value = serde_json::to_value(base)?;
    if let serde_json::Value::Object(fields) = &mut value {
        fields.extend(patch);
    }
    serde_json::from_value(value)
}

impl MotionProfiles {
    /// Parameter set for `kind`.
    pub fn get(&self, kind: ProfileKind) -> &MotionProfile {
        match kind {
            ProfileKind::Desktop => &self.desktop,
            ProfileKind::Constrained => &self.constrained,
        }
    }

    /// Validate both sets.
    pub fn validate(&self) -> FolioResult<()> {
        self.desktop.validate()?;
        self.constrained.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/profile.rs"]
mod tests;
