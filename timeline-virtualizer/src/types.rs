use core::ops::RangeInclusive;

/// The inclusive index window to materialize, already widened by overscan.
///
/// An empty list has no range at all (`Option::None`) rather than a sentinel value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize, // inclusive
}

impl VisibleRange {
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    pub fn indexes(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Layout of one item in the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualItem {
    pub index: usize,
    pub start: u64,
    /// Height including the date label, when the item opens a group.
    pub size: u32,
    /// Whether a date label is rendered above this item.
    pub starts_group: bool,
}

impl VirtualItem {
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.size as u64)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LoadDirection {
    Before,
    After,
}
