use timeline_virtualizer::TimelineOptions;

use crate::Easing;

/// Configuration for [`crate::Engine`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineOptions {
    pub timeline: TimelineOptions,
    /// Defer resize, re-measurement and prepend-anchor work to the next frame so bursts coalesce
    /// into one render. When `false`, that work runs inside the triggering call.
    pub use_frame_scheduling: bool,
    /// Quiet period after the last scroll event before load-more is checked.
    pub scroll_debounce_ms: u64,
    /// Duration of smooth scrolls. `0` makes every scroll instant.
    pub smooth_scroll_ms: u64,
    pub smooth_scroll_easing: Easing,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            timeline: TimelineOptions::default(),
            use_frame_scheduling: true,
            scroll_debounce_ms: 150,
            smooth_scroll_ms: 240,
            smooth_scroll_easing: Easing::default(),
        }
    }
}

impl EngineOptions {
    pub fn new(timeline: TimelineOptions) -> Self {
        Self {
            timeline,
            ..Self::default()
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.timeline.overscan = overscan;
        self
    }

    pub fn with_use_frame_scheduling(mut self, enabled: bool) -> Self {
        self.use_frame_scheduling = enabled;
        self
    }

    pub fn with_scroll_debounce_ms(mut self, delay_ms: u64) -> Self {
        self.scroll_debounce_ms = delay_ms;
        self
    }

    pub fn with_smooth_scroll(mut self, duration_ms: u64, easing: Easing) -> Self {
        self.smooth_scroll_ms = duration_ms;
        self.smooth_scroll_easing = easing;
        self
    }
}
