use core::fmt;

use timeline_virtualizer::{TimelineItem, VirtualItem};

/// Creates, positions and tears down the views of materialized items.
///
/// Events raised by a view (media loaded or failed, clicked, resized) are routed back by the host
/// through [`crate::Engine::on_item_resize`], [`crate::Engine::on_item_media_error`] and
/// [`crate::Engine::on_item_click`], using the view's index.
pub trait ViewHost<T: TimelineItem> {
    type View;
    type Error: fmt::Display;

    fn create(&mut self, item: &T, layout: VirtualItem) -> Result<Self::View, Self::Error>;

    /// Builds the inline error affordance shown in place of an item whose view failed to build.
    fn create_placeholder(&mut self, layout: VirtualItem, error: &Self::Error) -> Self::View;

    fn position(&mut self, view: &mut Self::View, layout: VirtualItem);

    fn set_active(&mut self, view: &mut Self::View, active: bool);

    /// Swaps the view's media for an inline error affordance.
    fn show_media_error(&mut self, view: &mut Self::View);

    /// Starts observing the view's rendered size. Returns `false` when unsupported.
    fn observe(&mut self, _view: &Self::View) -> bool {
        false
    }

    fn unobserve(&mut self, _view: &Self::View) {}

    fn destroy(&mut self, view: Self::View);
}
