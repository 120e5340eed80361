/// Scroll position captured before older items are prepended.
///
/// Prepending grows the content above the viewport. Shifting the scroll offset by the growth in
/// scroll extent keeps the content the user was looking at in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrependAnchor {
    pub scroll_offset: u64,
    pub scroll_extent: u64,
}

impl PrependAnchor {
    pub fn capture(scroll_offset: u64, scroll_extent: u64) -> Self {
        Self {
            scroll_offset,
            scroll_extent,
        }
    }

    /// Growth of the scroll extent since capture (negative if it shrank).
    pub fn height_delta(&self, new_scroll_extent: u64) -> i64 {
        new_scroll_extent as i64 - self.scroll_extent as i64
    }

    /// The scroll offset that keeps the captured content in place.
    pub fn resolve(&self, new_scroll_extent: u64) -> u64 {
        let delta = self.height_delta(new_scroll_extent);
        if delta >= 0 {
            self.scroll_offset.saturating_add(delta as u64)
        } else {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        }
    }
}
