//! A headless, variable-height list virtualization engine for chronologically grouped
//! thumbnail timelines (attachment and media galleries).
//!
//! For the driver that reconciles materialized views, schedules frames and anchors scroll
//! position across prepends, see the `timeline-virtualizer-adapter` crate.
//!
//! This crate holds the layout math only:
//! - per-item heights with a date-label surcharge for the first item of each calendar day
//! - cumulative offsets and `O(log n)` offset → index lookup
//! - overscanned visible ranges
//! - load-more and resize coordination state machines
//!
//! It is UI-agnostic. A host is expected to provide the item array, the viewport extent and the
//! scroll offset, and (optionally) measured item heights.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod height;
mod item;
mod key;
mod load_more;
pub mod navigation;
mod offsets;
mod options;
mod range;
mod resize;
mod types;

#[cfg(test)]
mod tests;

pub use error::ItemError;
pub use height::HeightModel;
pub use item::{DateKey, ItemIdentity, TimelineItem, date_key, validate_item};
pub use key::ItemId;
pub use load_more::{LoadMoreCoordinator, LoadState};
pub use offsets::OffsetIndex;
pub use options::TimelineOptions;
pub use range::resolve_visible_range;
pub use resize::{ResizeBatch, ResizeCoordinator, ResizeDecision, ResizePhase};
pub use types::{LoadDirection, VirtualItem, VisibleRange};
