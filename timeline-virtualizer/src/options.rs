use chrono::{FixedOffset, Offset, Utc};

/// Layout configuration for a [`crate::HeightModel`] and the coordinators built on it.
///
/// With `feature = "serde"`, missing fields deserialize to their defaults, so hosts can keep a
/// partial section in their own config files.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimelineOptions {
    /// Estimated height of a thumbnail row before it is measured.
    pub base_height: u32,
    /// Extra height of the date label above the first item of each date group.
    pub date_label_height: u32,
    /// Items materialized beyond each edge of the viewport.
    pub overscan: usize,
    /// Distance (in items) from either end of the list that triggers a load-more request.
    pub load_more_threshold: usize,
    /// A measured height must differ from the cached one by more than this to be applied.
    pub resize_tolerance: u32,
    /// UTC offset, in seconds, used to bucket timestamps into calendar dates.
    pub date_offset_secs: i32,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            base_height: 88,
            date_label_height: 28,
            overscan: 3,
            load_more_threshold: 5,
            resize_tolerance: 1,
            date_offset_secs: 0,
        }
    }
}

impl TimelineOptions {
    pub fn new(base_height: u32, date_label_height: u32) -> Self {
        Self {
            base_height,
            date_label_height,
            ..Self::default()
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_load_more_threshold(mut self, threshold: usize) -> Self {
        self.load_more_threshold = threshold;
        self
    }

    pub fn with_resize_tolerance(mut self, tolerance: u32) -> Self {
        self.resize_tolerance = tolerance;
        self
    }

    pub fn with_date_offset_secs(mut self, secs: i32) -> Self {
        self.date_offset_secs = secs;
        self
    }

    /// The date-bucketing offset. Out-of-range values fall back to UTC.
    pub fn date_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.date_offset_secs).unwrap_or_else(|| Utc.fix())
    }
}
