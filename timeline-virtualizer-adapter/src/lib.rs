//! Framework-neutral driver for the `timeline-virtualizer` crate.
//!
//! `timeline-virtualizer` only does layout math. This crate wires it to a UI:
//!
//! - [`Engine`] owns the item array and keeps one view per visible item through a [`ViewHost`]
//! - [`ScrollContainer`] abstracts the scrollable region (offset, extent, frame requests)
//! - frame-coalesced resize handling and a debounced load-more check
//! - [`PrependAnchor`] keeps the viewport still when older items are prepended
//! - [`ScrollTween`] for adapter-driven smooth scrolling
//!
//! No UI toolkit is bound here; the host implements the two traits and forwards its events.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod container;
mod engine;
mod handlers;
mod host;
mod options;
mod reconciler;
mod scheduler;
mod tween;


pub use anchor::PrependAnchor;
pub use container::ScrollContainer;
pub use engine::Engine;
pub use handlers::{Handlers, LoadMoreHandler, ThumbnailClickHandler};
pub use host::ViewHost;
pub use options::EngineOptions;
pub use reconciler::RenderStats;
pub use tween::{Easing, ScrollTween};
