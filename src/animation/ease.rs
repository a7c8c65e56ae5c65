use std::str::FromStr;

use crate::foundation::error::FolioError;

/// Easing curve mapping normalized time `[0, 1]` to normalized progress `[0, 1]`.
///
/// `Quad`, `Cubic` and `Quart` correspond to the `power1`, `power2` and `power3` families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Identity curve (`none`).
    Linear,
    /// `power1.in`
    InQuad,
    /// `power1.out`
    OutQuad,
    /// `power1.inOut`
    InOutQuad,
    /// `power2.in`
    InCubic,
    /// `power2.out`
    OutCubic,
    /// `power2.inOut`
    InOutCubic,
    /// `power3.in`
    InQuart,
    /// `power3.out`
    OutQuart,
    /// `power3.inOut`
    InOutQuart,
    /// `expo.out`: `1 - 2^(-10t)`, pinned to exactly 1 at `t = 1`.
    OutExpo,
}

impl Ease {
    /// Every supported curve, in declaration order.
    pub const ALL: [Ease; 11] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InQuart,
        Ease::OutQuart,
        Ease::InOutQuart,
        Ease::OutExpo,
    ];

    /// Evaluate the curve. Input is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
            Self::OutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
        }
    }
}

impl FromStr for Ease {
    type Err = FolioError;

    /// Parse GSAP-style names such as `"none"`, `"power2.out"`, `"power1.inOut"` or `"expo.out"`.
    ///
    /// A bare family name (`"power3"`) means its `out` variant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let (family, variant) = lower.split_once('.').unwrap_or((lower.as_str(), "out"));
        let ease = match (family, variant) {
            ("none" | "linear", _) => Self::Linear,
            ("power1" | "quad", "in") => Self::InQuad,
            ("power1" | "quad", "out") => Self::OutQuad,
            ("power1" | "quad", "inout") => Self::InOutQuad,
            ("power2" | "cubic", "in") => Self::InCubic,
            ("power2" | "cubic", "out") => Self::OutCubic,
            ("power2" | "cubic", "inout") => Self::InOutCubic,
            ("power3" | "quart", "in") => Self::InQuart,
            ("power3" | "quart", "out") => Self::OutQuart,
            ("power3" | "quart", "inout") => Self::InOutQuart,
            ("expo", "out") => Self::OutExpo,
            _ => return Err(FolioError::animation(format!("unknown ease '{s}'"))),
        };
        Ok(ease)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
