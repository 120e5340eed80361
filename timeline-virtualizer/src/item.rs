use alloc::string::String;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use crate::ItemError;
use crate::key::ItemId;

/// A record rendered by the timeline.
///
/// The engine only ever reads the identity and the timestamp; everything else on the record
/// (media URL, uploader, kind, ...) is opaque payload for the view layer.
pub trait TimelineItem {
    type Id: ItemId;

    fn id(&self) -> Option<&Self::Id>;

    /// Raw timestamp. RFC 3339, `YYYY-MM-DD[ HH:MM:SS]` and integral Unix milliseconds are
    /// recognised; anything else is compared verbatim.
    fn timestamp(&self) -> Option<&str>;
}

/// Stable identity of an item across wholesale array replacements.
///
/// Items without an id fall back to their position, which only identifies them until the next
/// update.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemIdentity<Id> {
    Id(Id),
    Position(usize),
}

impl<Id: ItemId> ItemIdentity<Id> {
    pub fn of<T: TimelineItem<Id = Id>>(item: &T, index: usize) -> Self {
        match item.id() {
            Some(id) => Self::Id(id.clone()),
            None => Self::Position(index),
        }
    }

    /// Returns `true` if `item`, sitting at `index`, carries this identity.
    pub fn matches<T: TimelineItem<Id = Id>>(&self, item: &T, index: usize) -> bool {
        match (self, item.id()) {
            (Self::Id(a), Some(b)) => a == b,
            (Self::Position(p), None) => *p == index,
            _ => false,
        }
    }

    pub fn id(&self) -> Option<&Id> {
        match self {
            Self::Id(id) => Some(id),
            Self::Position(_) => None,
        }
    }
}

/// The calendar-date bucket an item belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateKey {
    Day(NaiveDate),
    /// The timestamp could not be parsed; equal raw strings still group together.
    Raw(String),
}

/// Computes the date key of a timestamp in a fixed UTC offset.
///
/// A fixed offset (instead of the host's local zone) keeps grouping identical across machines.
pub fn date_key(timestamp: &str, offset: FixedOffset) -> DateKey {
    let ts = timestamp.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return DateKey::Day(dt.with_timezone(&offset).date_naive());
    }
    if let Ok(ms) = ts.parse::<i64>() {
        if let Some(dt) = DateTime::from_timestamp_millis(ms) {
            return DateKey::Day(dt.with_timezone(&offset).date_naive());
        }
    }
    // Zone-less values are taken to be in the display zone already.
    if let Ok(dt) = NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S") {
        return DateKey::Day(dt.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(ts, "%Y-%m-%d") {
        return DateKey::Day(date);
    }
    DateKey::Raw(String::from(timestamp))
}

/// Checks an item for the fields layout depends on.
pub fn validate_item<T: TimelineItem>(item: &T, offset: FixedOffset) -> Result<(), ItemError> {
    if item.id().is_none() {
        return Err(ItemError::MissingId);
    }
    let Some(ts) = item.timestamp() else {
        return Err(ItemError::MissingTimestamp);
    };
    match date_key(ts, offset) {
        DateKey::Day(_) => Ok(()),
        DateKey::Raw(raw) => Err(ItemError::InvalidTimestamp(raw)),
    }
}
