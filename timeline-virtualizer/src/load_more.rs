use crate::{LoadDirection, VisibleRange};

/// Pagination flags for both ends of the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadState {
    pub is_loading_before: bool,
    pub is_loading_after: bool,
    pub has_more_before: bool,
    pub has_more_after: bool,
}

impl Default for LoadState {
    fn default() -> Self {
        Self {
            is_loading_before: false,
            is_loading_after: false,
            has_more_before: true,
            has_more_after: true,
        }
    }
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        self.is_loading_before || self.is_loading_after
    }

    pub fn is_loading_in(&self, direction: LoadDirection) -> bool {
        match direction {
            LoadDirection::Before => self.is_loading_before,
            LoadDirection::After => self.is_loading_after,
        }
    }
}

/// Decides when to ask the host for more items.
///
/// A request is only issued while nothing is loading, so at most one direction is ever pending.
/// Pending flags are never timed out here: they are cleared by [`Self::finish_update`] (or by the
/// host through [`Self::set_loading`]).
#[derive(Clone, Debug)]
pub struct LoadMoreCoordinator {
    state: LoadState,
    threshold: usize,
}

impl LoadMoreCoordinator {
    pub fn new(threshold: usize) -> Self {
        Self {
            state: LoadState::default(),
            threshold,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: usize) {
        self.threshold = threshold;
    }

    pub fn set_loading(&mut self, direction: LoadDirection, is_loading: bool) {
        match direction {
            LoadDirection::Before => self.state.is_loading_before = is_loading,
            LoadDirection::After => self.state.is_loading_after = is_loading,
        }
    }

    pub fn set_has_more(&mut self, before: Option<bool>, after: Option<bool>) {
        if let Some(before) = before {
            self.state.has_more_before = before;
        }
        if let Some(after) = after {
            self.state.has_more_after = after;
        }
    }

    /// Returns the direction to load, if any, and marks it as loading.
    ///
    /// The leading edge wins when both edges are within the threshold.
    pub fn check_load_more(
        &mut self,
        range: Option<VisibleRange>,
        count: usize,
    ) -> Option<LoadDirection> {
        let range = range?;
        if count == 0 || self.state.is_loading() {
            return None;
        }

        let direction = if self.state.has_more_before && range.start <= self.threshold {
            LoadDirection::Before
        } else if self.state.has_more_after
            && (count - 1).saturating_sub(range.end) <= self.threshold
        {
            LoadDirection::After
        } else {
            return None;
        };

        self.set_loading(direction, true);
        vdebug!(?direction, start = range.start, end = range.end, count, "check_load_more");
        Some(direction)
    }

    /// Applies the outcome of a wholesale update: optional new `has_more*` values, and both
    /// loading flags cleared unconditionally.
    ///
    /// Returns the state as it was before the update.
    pub fn finish_update(
        &mut self,
        has_more_before: Option<bool>,
        has_more_after: Option<bool>,
    ) -> LoadState {
        let prev = self.state;
        self.set_has_more(has_more_before, has_more_after);
        self.state.is_loading_before = false;
        self.state.is_loading_after = false;
        prev
    }
}
