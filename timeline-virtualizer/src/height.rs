use alloc::vec::Vec;

use chrono::FixedOffset;

use crate::key::{IdentityMap, ItemId};
use crate::{DateKey, ItemIdentity, OffsetIndex, TimelineItem, TimelineOptions, VirtualItem, date_key};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Measured {
    starts_group: bool,
    height: u32,
}

/// Per-index heights of a date-grouped timeline, plus the [`OffsetIndex`] derived from them.
///
/// Heights are estimates (`base_height`, plus `date_label_height` for the first item of each
/// date group) until a real measurement is recorded. Measurements are keyed by item identity and
/// survive wholesale item replacements, as long as the item is still in the array and still opens
/// (or still doesn't open) a date group. Each bulk pass drops the measurements of items that are
/// gone.
#[derive(Clone, Debug)]
pub struct HeightModel<Id> {
    base_height: u32,
    date_label_height: u32,
    date_offset: FixedOffset,

    cache: Vec<Option<u32>>,
    group_starts: Vec<bool>,
    measured: IdentityMap<ItemIdentity<Id>, Measured>,
    offsets: OffsetIndex,
}

impl<Id: ItemId> HeightModel<Id> {
    pub fn new(options: &TimelineOptions) -> Self {
        Self {
            base_height: options.base_height,
            date_label_height: options.date_label_height,
            date_offset: options.date_offset(),
            cache: Vec::new(),
            group_starts: Vec::new(),
            measured: IdentityMap::new(),
            offsets: OffsetIndex::new(),
        }
    }

    /// Applies new layout options. Cached heights are dropped; call
    /// [`Self::calculate_heights`] afterwards.
    pub fn set_options(&mut self, options: &TimelineOptions) {
        self.base_height = options.base_height;
        self.date_label_height = options.date_label_height;
        self.date_offset = options.date_offset();
        self.invalidate();
    }

    pub fn offsets(&self) -> &OffsetIndex {
        &self.offsets
    }

    pub fn total_extent(&self) -> u64 {
        self.offsets.total_extent()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Estimated height for an unmeasured item.
    pub fn estimate(&self, starts_group: bool) -> u32 {
        if starts_group {
            self.base_height.saturating_add(self.date_label_height)
        } else {
            self.base_height
        }
    }

    fn key_of<T: TimelineItem>(&self, item: &T) -> Option<DateKey> {
        item.timestamp().map(|ts| date_key(ts, self.date_offset))
    }

    /// Whether item `index` opens a new date group.
    ///
    /// Items without a timestamp never open a group. Otherwise the first item always does, and
    /// later items do when their date key differs from their predecessor's (a predecessor with no
    /// timestamp counts as different).
    pub fn starts_group<T: TimelineItem>(&self, items: &[T], index: usize) -> bool {
        let Some(item) = items.get(index) else {
            return false;
        };
        let Some(key) = self.key_of(item) else {
            return false;
        };
        if index == 0 {
            return true;
        }
        self.key_of(&items[index - 1]).as_ref() != Some(&key)
    }

    fn resolve(&self, identity: &ItemIdentity<Id>, starts_group: bool) -> u32 {
        match self.measured.get(identity) {
            Some(m) if m.starts_group == starts_group => m.height,
            _ => self.estimate(starts_group),
        }
    }

    /// Height of item `index`, computed on first access and cached until the next invalidation.
    pub fn height_of<T: TimelineItem<Id = Id>>(&mut self, items: &[T], index: usize) -> u32 {
        if index >= items.len() {
            return 0;
        }
        if self.cache.len() < items.len() {
            self.cache.resize(items.len(), None);
        }
        if let Some(h) = self.cache[index] {
            return h;
        }
        let starts_group = self.starts_group(items, index);
        let h = self.resolve(&ItemIdentity::of(&items[index], index), starts_group);
        self.cache[index] = Some(h);
        h
    }

    /// Drops every cached height. The offset index is left as is until the next bulk pass.
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    /// Recomputes every height and the offset index in one walk over `items`.
    ///
    /// Returns the total extent.
    pub fn calculate_heights<T: TimelineItem<Id = Id>>(&mut self, items: &[T]) -> u64 {
        self.cache.clear();
        self.group_starts.clear();
        self.cache.reserve_exact(items.len());
        self.group_starts.reserve_exact(items.len());

        // Measurements of items that left the array are dropped in the same walk.
        let mut kept: IdentityMap<ItemIdentity<Id>, Measured> = IdentityMap::new();
        let mut prev: Option<DateKey> = None;
        for (i, item) in items.iter().enumerate() {
            let key = self.key_of(item);
            let starts_group = match &key {
                None => false,
                Some(k) => i == 0 || prev.as_ref() != Some(k),
            };
            let identity = ItemIdentity::of(item, i);
            let h = self.resolve(&identity, starts_group);
            if let Some(m) = self.measured.remove(&identity) {
                kept.insert(identity, m);
            }
            self.cache.push(Some(h));
            self.group_starts.push(starts_group);
            prev = key;
        }

        self.offsets = OffsetIndex::from_heights(self.cache.iter().map(|h| h.unwrap_or(0)));
        vdebug!(
            count = items.len(),
            measured = kept.len(),
            dropped = self.measured.len(),
            total = self.offsets.total_extent(),
            "calculate_heights"
        );
        self.measured = kept;
        self.offsets.total_extent()
    }

    /// Records the rendered height of item `index` and returns `actual - cached`.
    ///
    /// Only the per-index cache is touched; the offset index is stale until the next
    /// [`Self::calculate_heights`].
    pub fn record_measurement<T: TimelineItem<Id = Id>>(
        &mut self,
        items: &[T],
        index: usize,
        actual: u32,
    ) -> i64 {
        let Some(item) = items.get(index) else {
            vwarn!(index, count = items.len(), "measurement for out-of-range index ignored");
            return 0;
        };
        let cached = self.height_of(items, index);
        let starts_group = match self.group_starts.get(index) {
            Some(&sg) if self.group_starts.len() == items.len() => sg,
            _ => self.starts_group(items, index),
        };
        self.measured.insert(
            ItemIdentity::of(item, index),
            Measured {
                starts_group,
                height: actual,
            },
        );
        self.cache[index] = Some(actual);
        vtrace!(index, cached, actual, "record_measurement");
        actual as i64 - cached as i64
    }

    /// Forgets measurements of items that have no id.
    ///
    /// Those are keyed by position, which says nothing about the item once the array has been
    /// replaced. Call this before [`Self::calculate_heights`] on a wholesale replacement.
    pub fn forget_positional_measurements(&mut self) {
        self.measured
            .retain(|identity, _| !matches!(identity, ItemIdentity::Position(_)));
        self.invalidate();
    }

    pub fn measurement_count(&self) -> usize {
        self.measured.len()
    }

    pub fn clear_measurements(&mut self) {
        self.measured.clear();
        self.invalidate();
    }

    /// Layout of item `index` as of the last bulk pass.
    pub fn virtual_item(&self, index: usize) -> Option<VirtualItem> {
        (index < self.offsets.len()).then(|| VirtualItem {
            index,
            start: self.offsets.start_of(index),
            size: self.offsets.height_of(index),
            starts_group: self.group_starts.get(index).copied().unwrap_or(false),
        })
    }
}
