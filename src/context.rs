use crate::foundation::error::FolioResult;
use crate::layout::document::DocumentLayout;
use crate::schedule::frame::{FrameHandle, FramePhase, FrameScheduler};
use crate::scroll::trigger::{TriggerHandle, TriggerLiveness, TriggerRegistry, TriggerSpec};

/// Who a per-frame subscription belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Owner {
    /// Smooth-scroll integration.
    Scroll,
    /// Trigger registry recomputation.
    Triggers,
    /// Global progress readout.
    Indicator,
    /// Hero timelines.
    Hero,
    /// Footer timelines.
    Footer,
    /// Entrance playback of panel `n`.
    Panel(usize),
    /// Pointer parallax of panel `n`.
    Parallax(usize),
}

/// Orchestration context handed to every component on mount and teardown.
///
/// Owns the trigger registry, the frame scheduler, and the current document layout, so
/// component lifetimes are explicit: whatever a component registers here, it releases here.
#[derive(Debug)]
pub struct Context {
    triggers: TriggerRegistry,
    frames: FrameScheduler<Owner>,
    layout: DocumentLayout,
}

impl Context {
    /// Fresh context over `layout`.
    pub fn new(layout: DocumentLayout, frames: FrameScheduler<Owner>) -> Self {
        Self {
            triggers: TriggerRegistry::new(),
            frames,
            layout,
        }
    }

    /// Current layout.
    pub fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    /// Swap in a new layout and recompute every trigger's bounds in place.
    pub fn set_layout(&mut self, layout: DocumentLayout) {
        self.layout = layout;
        self.triggers.refresh(&self.layout);
    }

    /// Register a trigger against the current layout.
    pub fn register(&mut self, spec: TriggerSpec) -> FolioResult<TriggerHandle> {
        self.triggers.register(spec, &self.layout)
    }

    /// Remove a trigger.
    pub fn unregister(&mut self, handle: TriggerHandle) -> bool {
        self.triggers.unregister(handle)
    }

    /// Run `owner` every frame in `phase`.
    pub fn subscribe(&mut self, phase: FramePhase, owner: Owner) -> FrameHandle {
        self.frames.subscribe(phase, owner)
    }

    /// Stop per-frame work.
    pub fn unsubscribe(&mut self, handle: FrameHandle) -> bool {
        self.frames.unsubscribe(handle)
    }

    /// Trigger registry.
    pub fn triggers(&self) -> &TriggerRegistry {
        &self.triggers
    }

    /// Mutable trigger registry.
    pub fn triggers_mut(&mut self) -> &mut TriggerRegistry {
        &mut self.triggers
    }

    /// Frame scheduler.
    pub fn frames(&self) -> &FrameScheduler<Owner> {
        &self.frames
    }

    /// Mutable frame scheduler.
    pub fn frames_mut(&mut self) -> &mut FrameScheduler<Owner> {
        &mut self.frames
    }
}

impl TriggerLiveness for Context {
    fn is_live(&self, handle: TriggerHandle) -> bool {
        self.triggers.contains(handle)
    }
}
