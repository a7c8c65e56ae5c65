use smallvec::SmallVec;

/// Interpolation between two values of the same type.
pub trait Lerp: Sized {
    /// Value at `t` between `a` (t = 0) and `b` (t = 1).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// One animatable channel of a [`VisualState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Prop {
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Uniform scale factor.
    Scale,
    /// Horizontal translation (px).
    X,
    /// Vertical translation (px).
    Y,
    /// Depth translation (px).
    Z,
    /// Rotation around the horizontal axis (degrees).
    RotationX,
    /// Rotation around the vertical axis (degrees).
    RotationY,
    /// In-plane rotation (degrees).
    Rotation,
}

impl Prop {
    /// Every channel, in declaration order.
    pub const ALL: [Prop; 8] = [
        Prop::Opacity,
        Prop::Scale,
        Prop::X,
        Prop::Y,
        Prop::Z,
        Prop::RotationX,
        Prop::RotationY,
        Prop::Rotation,
    ];
}

/// Interpolated visual transform of one animated element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualState {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Horizontal translation (px).
    pub x: f64,
    /// Vertical translation (px).
    pub y: f64,
    /// Depth translation (px).
    pub z: f64,
    /// Rotation around the horizontal axis (degrees).
    pub rotation_x: f64,
    /// Rotation around the vertical axis (degrees).
    pub rotation_y: f64,
    /// In-plane rotation (degrees).
    pub rotation: f64,
}

impl Default for VisualState {
    fn default() -> Self {
        Self::REST
    }
}

impl VisualState {
    /// Fully visible, untransformed. Also the identity for [`VisualState::compose`].
    pub const REST: Self = Self {
        opacity: 1.0,
        scale: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
        rotation_x: 0.0,
        rotation_y: 0.0,
        rotation: 0.0,
    };

    /// Read one channel.
    pub fn get(&self, prop: Prop) -> f64 {
        match prop {
            Prop::Opacity => self.opacity,
            Prop::Scale => self.scale,
            Prop::X => self.x,
            Prop::Y => self.y,
            Prop::Z => self.z,
            Prop::RotationX => self.rotation_x,
            Prop::RotationY => self.rotation_y,
            Prop::Rotation => self.rotation,
        }
    }

    /// Write one channel.
    pub fn set(&mut self, prop: Prop, value: f64) {
        let slot = match prop {
            Prop::Opacity => &mut self.opacity,
            Prop::Scale => &mut self.scale,
            Prop::X => &mut self.x,
            Prop::Y => &mut self.y,
            Prop::Z => &mut self.z,
            Prop::RotationX => &mut self.rotation_x,
            Prop::RotationY => &mut self.rotation_y,
            Prop::Rotation => &mut self.rotation,
        };
        *slot = value;
    }

    /// Stack `layer` on top of `self`: opacity and scale multiply, offsets and rotations add.
    pub fn compose(self, layer: Self) -> Self {
        Self {
            opacity: (self.opacity * layer.opacity).clamp(0.0, 1.0),
            scale: self.scale * layer.scale,
            x: self.x + layer.x,
            y: self.y + layer.y,
            z: self.z + layer.z,
            rotation_x: self.rotation_x + layer.rotation_x,
            rotation_y: self.rotation_y + layer.rotation_y,
            rotation: self.rotation + layer.rotation,
        }
    }

    /// True when every channel is finite.
    pub fn is_finite(&self) -> bool {
        Prop::ALL.iter().all(|p| self.get(*p).is_finite())
    }
}

impl Lerp for VisualState {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let mut out = *a;
        for prop in Prop::ALL {
            out.set(prop, <f64 as Lerp>::lerp(&a.get(prop), &b.get(prop), t));
        }
        out
    }
}

/// Addressable element inside an animated block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Target {
    /// Artwork image container of a panel.
    Image,
    /// Text block (title, metadata, description) of a panel.
    Content,
    /// One line of the hero title.
    Title(u8),
    /// Hero subtitle.
    Subtitle,
    /// One paragraph of the hero biography.
    Bio(u8),
    /// "Explore" hint at the bottom of the hero.
    ScrollHint,
    /// One block of the footer.
    Footer(u8),
}

/// Sampled state of one target.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TargetState {
    /// Which element.
    pub target: Target,
    /// Its sampled transform.
    pub state: VisualState,
}

/// Small ordered map from [`Target`] to [`VisualState`].
///
/// Targets that were never written read as [`VisualState::REST`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TargetStates {
    entries: SmallVec<[TargetState; 4]>,
}

impl TargetStates {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// State of `target`, or [`VisualState::REST`] when absent.
    pub fn get(&self, target: Target) -> VisualState {
        self.entries
            .iter()
            .find(|e| e.target == target)
            .map(|e| e.state)
            .unwrap_or(VisualState::REST)
    }

    /// Mutable state of `target`, inserting [`VisualState::REST`] when absent.
    pub fn entry(&mut self, target: Target) -> &mut VisualState {
        let idx = match self.entries.iter().position(|e| e.target == target) {
            Some(i) => i,
            None => {
                self.entries.push(TargetState {
                    target,
                    state: VisualState::REST,
                });
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].state
    }

    /// Compose `other` on top of `self`, target by target.
    pub fn compose(mut self, other: &TargetStates) -> Self {
        for e in other.iter() {
            let slot = self.entry(e.target);
            *slot = slot.compose(e.state);
        }
        self
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TargetState> {
        self.entries.iter()
    }

    /// Number of targets present.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no target is present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/visual.rs"]
mod tests;
