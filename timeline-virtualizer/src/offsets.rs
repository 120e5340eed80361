use alloc::vec;
use alloc::vec::Vec;

/// Cumulative start offsets of every item.
///
/// `starts[i]` is the sum of all heights before item `i`; the table carries one extra trailing
/// entry so that `starts[n]` is the total extent. The table is only ever rebuilt in bulk by
/// [`crate::HeightModel::calculate_heights`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OffsetIndex {
    starts: Vec<u64>, // len == count + 1, starts[0] == 0
}

impl Default for OffsetIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl OffsetIndex {
    pub fn new() -> Self {
        Self { starts: vec![0] }
    }

    pub(crate) fn from_heights(heights: impl ExactSizeIterator<Item = u32>) -> Self {
        let mut starts = Vec::with_capacity(heights.len() + 1);
        let mut acc = 0u64;
        starts.push(acc);
        for h in heights {
            acc = acc.saturating_add(h as u64);
            starts.push(acc);
        }
        Self { starts }
    }

    pub fn len(&self) -> usize {
        self.starts.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Start offset of `index`. Indexes past the end clamp to the total extent.
    pub fn start_of(&self, index: usize) -> u64 {
        self.starts[index.min(self.len())]
    }

    pub fn end_of(&self, index: usize) -> u64 {
        self.start_of(index.saturating_add(1))
    }

    pub fn height_of(&self, index: usize) -> u32 {
        let h = self.end_of(index) - self.start_of(index);
        h.min(u32::MAX as u64) as u32
    }

    pub fn total_extent(&self) -> u64 {
        self.starts[self.len()]
    }

    /// The smallest index whose `[start, start + height)` reaches past `offset`.
    ///
    /// Offsets beyond the end clamp to the last item. `O(log n)`.
    pub fn first_reaching(&self, offset: u64) -> Option<usize> {
        let count = self.len();
        if count == 0 {
            return None;
        }
        let i = self.starts[1..].partition_point(|&end| end <= offset);
        Some(i.min(count - 1))
    }

    /// The largest index whose start is `<= offset`. `O(log n)`.
    pub fn last_starting_at_or_before(&self, offset: u64) -> Option<usize> {
        let count = self.len();
        if count == 0 {
            return None;
        }
        // starts[0] == 0 <= offset, so the partition point is at least 1.
        let n = self.starts[..count].partition_point(|&start| start <= offset);
        n.checked_sub(1)
    }
}
