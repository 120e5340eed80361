use alloc::vec::Vec;

/// Where the resize coordinator is in its measure/re-render cycle.
///
/// `Idle → Measuring` on the first out-of-tolerance notification, `Measuring → Settled` once
/// the batched work has been applied and rendered, and `Settled → Idle` after a frame with no
/// new work. Re-entering `Measuring` from `Settled` requires a delta still outside tolerance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResizePhase {
    #[default]
    Idle,
    Measuring,
    Settled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeDecision {
    /// The measurement agrees with the cache; nothing to do.
    WithinTolerance,
    /// New work was queued and a frame must be requested.
    Schedule,
    /// New work was queued onto a frame that is already requested.
    Coalesced,
}

/// Work collected since the last frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResizeBatch {
    pub viewport_extent: Option<u32>,
    /// `(index, actual_height)`, one entry per index, latest value wins.
    pub items: Vec<(usize, u32)>,
}

impl ResizeBatch {
    pub fn is_empty(&self) -> bool {
        self.viewport_extent.is_none() && self.items.is_empty()
    }
}

/// Coalesces container and item size changes into at most one re-render per frame.
#[derive(Clone, Debug)]
pub struct ResizeCoordinator {
    phase: ResizePhase,
    tolerance: u32,
    pending: ResizeBatch,
}

impl ResizeCoordinator {
    pub fn new(tolerance: u32) -> Self {
        Self {
            phase: ResizePhase::Idle,
            tolerance,
            pending: ResizeBatch::default(),
        }
    }

    pub fn phase(&self) -> ResizePhase {
        self.phase
    }

    pub fn tolerance(&self) -> u32 {
        self.tolerance
    }

    pub fn set_tolerance(&mut self, tolerance: u32) {
        self.tolerance = tolerance;
    }

    fn enqueue(&mut self) -> ResizeDecision {
        if self.phase == ResizePhase::Measuring {
            return ResizeDecision::Coalesced;
        }
        vtrace!(from = ?self.phase, "resize phase -> Measuring");
        self.phase = ResizePhase::Measuring;
        ResizeDecision::Schedule
    }

    pub fn on_container_resize(&mut self, viewport_extent: u32) -> ResizeDecision {
        self.pending.viewport_extent = Some(viewport_extent);
        self.enqueue()
    }

    /// Compares an item's rendered height with its cached height.
    pub fn on_item_resize(&mut self, index: usize, cached: u32, actual: u32) -> ResizeDecision {
        if cached.abs_diff(actual) <= self.tolerance {
            return ResizeDecision::WithinTolerance;
        }
        match self.pending.items.iter_mut().find(|(i, _)| *i == index) {
            Some(entry) => entry.1 = actual,
            None => self.pending.items.push((index, actual)),
        }
        self.enqueue()
    }

    /// Drops queued item measurements, e.g. because the item array was replaced and the queued
    /// indexes no longer refer to the same items.
    pub fn discard_item_measurements(&mut self) {
        self.pending.items.clear();
    }

    /// Hands the queued work to the frame that is about to run.
    pub fn take_pending(&mut self) -> ResizeBatch {
        core::mem::take(&mut self.pending)
    }

    /// Called at the end of each frame; `did_work` is whether a batch was applied.
    pub fn finish_frame(&mut self, did_work: bool) {
        let next = match (self.phase, did_work) {
            (ResizePhase::Measuring, true) => ResizePhase::Settled,
            (ResizePhase::Measuring, false) => ResizePhase::Idle,
            (ResizePhase::Settled, false) => ResizePhase::Idle,
            (phase, _) => phase,
        };
        if next != self.phase {
            vtrace!(from = ?self.phase, to = ?next, "resize phase");
            self.phase = next;
        }
    }
}
