//! Folio orchestrates the scroll-driven motion of a single-page artwork portfolio.
//!
//! A page is a hero, one panel per artwork, and a footer. The crate is headless and
//! deterministic: a [`Host`] reports the viewport, input arrives as [`InputEvent`]s, and each
//! call to [`Shell::frame`] advances everything by one display refresh:
//!
//! - [`SmoothScroll`] eases the virtual scroll offset toward the input offset
//! - [`TriggerRegistry`] turns that offset into edge-triggered enter/leave and progress events
//! - panel entrance and scrub timelines, the hero intro and the footer consume those events
//! - [`ParallaxController`]s follow the pointer over their panel
//!
//! The result of each frame is a serializable [`FrameSnapshot`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod context;
mod foundation;
mod host;

pub(crate) mod animation;
pub(crate) mod catalog;
pub(crate) mod layout;
pub(crate) mod pointer;
pub(crate) mod progress;
pub(crate) mod schedule;
pub(crate) mod scroll;
pub(crate) mod section;
pub(crate) mod shell;

pub use crate::foundation::core::{FrameTime, Point, Rect, Vec2, Viewport};
pub use crate::foundation::error::{FolioError, FolioResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::playback::{Direction, Playback};
pub use crate::animation::timeline::{Channel, Position, Timeline, Tween};
pub use crate::animation::visual::{Lerp, Prop, Target, TargetState, TargetStates, VisualState};
pub use crate::catalog::{ArtworkRecord, Catalog};
pub use crate::context::{Context, Owner};
pub use crate::host::{HeadlessHost, Host};
pub use crate::layout::document::{DocumentLayout, LayoutMetrics};
pub use crate::pointer::parallax::{ParallaxConfig, ParallaxController, ParallaxOffsets};
pub use crate::progress::indicator::{
    DEFAULT_DISPLAY_SMOOTHING, ProgressIndicator, ProgressReadout, section_at,
    section_index,
};
pub use crate::schedule::frame::{
    DEFAULT_MAX_FRAME_DT, Due, FrameHandle, FramePhase, FrameScheduler, FrameTick,
};
pub use crate::scroll::driver::{
    ScrollDirection, ScrollInput, ScrollState, SmoothScroll, SmoothScrollConfig, Smoothing,
};
pub use crate::scroll::trigger::{
    Edge, Phase, RegionId, RegionLayout, Threshold, TriggerEvent, TriggerEventKind, TriggerEvents,
    TriggerHandle, TriggerLiveness, TriggerRegistry, TriggerSpec,
};
pub use crate::section::binding::{Action, EntranceBinding, ScrubBinding, ToggleActions};
pub use crate::section::controller::{ImageStatus, PanelVisual, SectionController};
pub use crate::section::profile::{MotionProfile, MotionProfiles, ProfileKind, ProfileSelector};
pub use crate::shell::config::ShellConfig;
pub use crate::shell::footer::{FOOTER_BLOCKS, FooterController, FooterVisual};
pub use crate::shell::hero::{BIO_LINES, HeroController, HeroVisual, TITLE_LINES};
pub use crate::shell::script::{
    MAX_SCRIPT_FRAMES, ScriptEvent, ScriptRun, ScrollScript, run_script,
};
pub use crate::shell::{FrameSnapshot, InputEvent, PanelSnapshot, Shell, ShellStats};
