use crate::{OffsetIndex, VisibleRange};

/// Resolves the items intersecting `[scroll_offset, scroll_offset + viewport_extent]`, widened
/// by `overscan` on each side and clamped to the list.
///
/// Both edges are found by binary search over `offsets`, so this is `O(log n)`. An empty list
/// yields `None`; a non-empty list always yields at least one item, even for a zero-sized or
/// overscrolled viewport.
pub fn resolve_visible_range(
    offsets: &OffsetIndex,
    scroll_offset: u64,
    viewport_extent: u32,
    overscan: usize,
) -> Option<VisibleRange> {
    let count = offsets.len();
    let first = offsets.first_reaching(scroll_offset)?;
    let view_end = scroll_offset.saturating_add(viewport_extent as u64);
    let last = offsets
        .last_starting_at_or_before(view_end)
        .unwrap_or(first)
        .max(first);

    let range = VisibleRange {
        start: first.saturating_sub(overscan),
        end: last.saturating_add(overscan).min(count - 1),
    };
    vtrace!(
        scroll_offset,
        viewport_extent,
        start = range.start,
        end = range.end,
        "resolve_visible_range"
    );
    Some(range)
}
