use crate::foundation::core::Viewport;

/// The rendering surface the shell runs on.
///
/// Implemented by a windowing/web bridge in production and by [`HeadlessHost`] for tests and the
/// CLI. The shell never blocks on the host; all calls are cheap property reads or toggles.
pub trait Host {
    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Whether the host can deliver per-frame callbacks. Without them the shell stays static.
    fn supports_frame_callbacks(&self) -> bool {
        true
    }

    /// Toggle the host's built-in smooth scrolling (disabled while the smooth-scroll driver runs
    /// so easing is not applied twice).
    fn set_native_smooth_scroll(&mut self, enabled: bool);
}

/// In-memory host with a fixed viewport.
#[derive(Clone, Debug)]
pub struct HeadlessHost {
    viewport: Viewport,
    frame_callbacks: bool,
    native_smooth_scroll: bool,
    toggles: u32,
}

impl HeadlessHost {
    /// Host with frame callbacks and native smooth scrolling enabled.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            frame_callbacks: true,
            native_smooth_scroll: true,
            toggles: 0,
        }
    }

    /// Same host, but without frame callbacks.
    pub fn without_frame_callbacks(mut self) -> Self {
        self.frame_callbacks = false;
        self
    }

    /// Change the reported viewport (pair with a `Resize` input event).
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Current native smooth-scroll flag.
    pub fn native_smooth_scroll(&self) -> bool {
        self.native_smooth_scroll
    }

    /// How many times the native smooth-scroll flag was toggled.
    pub fn native_smooth_scroll_toggles(&self) -> u32 {
        self.toggles
    }
}

impl Host for HeadlessHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn supports_frame_callbacks(&self) -> bool {
        self.frame_callbacks
    }

    fn set_native_smooth_scroll(&mut self, enabled: bool) {
        if self.native_smooth_scroll != enabled {
            self.toggles += 1;
        }
        self.native_smooth_scroll = enabled;
    }
}
