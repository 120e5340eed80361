/// Tracks whether a frame has been requested from the host.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FrameScheduler {
    enabled: bool,
    pending: bool,
}

impl FrameScheduler {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            pending: false,
        }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending
    }

    /// Returns `true` the first time a frame is requested since the last [`Self::begin_frame`].
    pub(crate) fn request(&mut self) -> bool {
        !core::mem::replace(&mut self.pending, true)
    }

    pub(crate) fn begin_frame(&mut self) {
        self.pending = false;
    }

    pub(crate) fn cancel(&mut self) {
        self.pending = false;
    }
}

/// Trailing-edge debounce driven by caller-supplied timestamps.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Debounce {
    delay_ms: u64,
    last_event_ms: Option<u64>,
}

impl Debounce {
    pub(crate) fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            last_event_ms: None,
        }
    }

    pub(crate) fn touch(&mut self, now_ms: u64) {
        self.last_event_ms = Some(now_ms);
    }

    /// Returns `true` once, when the quiet period since the last event has elapsed.
    pub(crate) fn take_due(&mut self, now_ms: u64) -> bool {
        let Some(last) = self.last_event_ms else {
            return false;
        };
        if now_ms.saturating_sub(last) < self.delay_ms {
            return false;
        }
        self.last_event_ms = None;
        true
    }

    pub(crate) fn cancel(&mut self) {
        self.last_event_ms = None;
    }
}
