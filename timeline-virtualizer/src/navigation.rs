//! Scroll-target math over the current offset index. None of these re-measure anything.

use crate::OffsetIndex;

/// The largest scroll offset that still fills the viewport.
pub fn max_offset(total_extent: u64, viewport_extent: u32) -> u64 {
    total_extent.saturating_sub(viewport_extent as u64)
}

pub fn clamp_offset(offset: u64, total_extent: u64, viewport_extent: u32) -> u64 {
    offset.min(max_offset(total_extent, viewport_extent))
}

/// `current + delta`, clamped to `[0, max_offset]`.
pub fn offset_by(current: u64, delta: i64, total_extent: u64, viewport_extent: u32) -> u64 {
    let moved = if delta >= 0 {
        current.saturating_add(delta as u64)
    } else {
        current.saturating_sub(delta.unsigned_abs())
    };
    clamp_offset(moved, total_extent, viewport_extent)
}

/// Offset that vertically centers item `index` in the viewport.
///
/// Out-of-range indexes clamp to the last item; an empty list yields `0`.
pub fn centered_offset(offsets: &OffsetIndex, index: usize, viewport_extent: u32) -> u64 {
    let count = offsets.len();
    if count == 0 {
        return 0;
    }
    let index = index.min(count - 1);
    let center = offsets
        .start_of(index)
        .saturating_add(offsets.height_of(index) as u64 / 2);
    let target = center.saturating_sub(viewport_extent as u64 / 2);
    clamp_offset(target, offsets.total_extent(), viewport_extent)
}
