/// The scrollable region a timeline is rendered into.
///
/// Scroll events are not subscribed to through this trait: the host forwards them by calling
/// [`crate::Engine::on_scroll`]. The subscribe/unsubscribe hooks only let the host attach and
/// release its own listeners in step with the engine's lifetime.
pub trait ScrollContainer {
    fn scroll_offset(&self) -> u64;

    /// Total scrollable extent of the content, as last reported by the container.
    fn scroll_extent(&self) -> u64;

    fn viewport_extent(&self) -> u32;

    /// Sizes the content so the container can scroll over every item.
    fn set_content_extent(&mut self, extent: u64);

    fn set_scroll_offset(&mut self, offset: u64);

    /// Starts observing the container's own size. Returns `false` when the host cannot observe
    /// sizes; it must then report resizes through [`crate::Engine::on_container_resize`].
    fn observe_size(&mut self) -> bool {
        false
    }

    fn unobserve_size(&mut self) {}

    fn subscribe_scroll(&mut self) {}

    fn unsubscribe_scroll(&mut self) {}

    /// Asks the host to call [`crate::Engine::on_frame`] (or `tick`) before the next paint.
    fn request_frame(&mut self) {}
}
