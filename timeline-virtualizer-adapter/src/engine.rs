use alloc::vec::Vec;

use timeline_virtualizer::{
    HeightModel, ItemIdentity, LoadDirection, LoadMoreCoordinator, LoadState, ResizeCoordinator,
    ResizeDecision, ResizePhase, TimelineItem, VirtualItem, VisibleRange, navigation,
    resolve_visible_range,
};

use crate::reconciler::Reconciler;
use crate::scheduler::{Debounce, FrameScheduler};
use crate::{
    EngineOptions, Handlers, LoadMoreHandler, PrependAnchor, RenderStats, ScrollContainer,
    ScrollTween, ThumbnailClickHandler, ViewHost,
};

/// Drives a [`timeline_virtualizer::HeightModel`] against a scroll container and a view host.
///
/// The engine holds no UI objects of its own. The host drives it by calling:
/// - `on_scroll` / `on_container_resize` / `on_item_resize` when UI events occur
/// - `tick(now_ms)` on every frame or timer tick (frame work, smooth scrolling, and the debounced
///   load-more check)
/// - `update` whenever a new item array is available
///
/// Everything runs on the caller's thread; deferred work only waits for the next `tick` or
/// `on_frame`.
pub struct Engine<T, C, H>
where
    T: TimelineItem,
    C: ScrollContainer,
    H: ViewHost<T>,
{
    container: C,
    host: H,
    items: Vec<T>,
    options: EngineOptions,

    heights: HeightModel<T::Id>,
    reconciler: Reconciler<H::View, T::Id>,
    load_more: LoadMoreCoordinator,
    resize: ResizeCoordinator,

    frame: FrameScheduler,
    scroll_debounce: Debounce,
    viewport_extent: u32,
    scroll_dirty: bool,
    pending_anchor: Option<PrependAnchor>,
    tween: Option<ScrollTween>,
    last_set_offset: Option<u64>,

    active: Option<ItemIdentity<T::Id>>,
    handlers: Handlers<T::Id>,
    size_observed: bool,
    destroyed: bool,
}

impl<T, C, H> Engine<T, C, H>
where
    T: TimelineItem,
    C: ScrollContainer,
    H: ViewHost<T>,
{
    /// Builds the engine, lays out `items` and materializes the initial visible range.
    pub fn new(container: C, host: H, items: Vec<T>, options: EngineOptions) -> Self {
        adebug!(
            count = items.len(),
            overscan = options.timeline.overscan,
            frame_scheduling = options.use_frame_scheduling,
            "Engine::new"
        );
        let viewport_extent = container.viewport_extent();
        let mut engine = Self {
            heights: HeightModel::new(&options.timeline),
            reconciler: Reconciler::new(),
            load_more: LoadMoreCoordinator::new(options.timeline.load_more_threshold),
            resize: ResizeCoordinator::new(options.timeline.resize_tolerance),
            frame: FrameScheduler::new(options.use_frame_scheduling),
            scroll_debounce: Debounce::new(options.scroll_debounce_ms),
            viewport_extent,
            scroll_dirty: false,
            pending_anchor: None,
            tween: None,
            last_set_offset: None,
            active: None,
            handlers: Handlers::default(),
            size_observed: false,
            destroyed: false,
            container,
            host,
            items,
            options,
        };
        engine.size_observed = engine.container.observe_size();
        if !engine.size_observed {
            adebug!("container size observation unavailable; relying on on_container_resize");
        }
        engine.container.subscribe_scroll();
        engine.warn_malformed();
        engine.recalculate();
        engine.render();
        engine
    }

    pub fn with_handlers(mut self, handlers: Handlers<T::Id>) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn set_handlers(&mut self, handlers: Handlers<T::Id>) {
        self.handlers = handlers;
    }

    pub fn handlers(&self) -> &Handlers<T::Id> {
        &self.handlers
    }

    pub fn set_on_thumbnail_click(&mut self, f: Option<ThumbnailClickHandler<T::Id>>) {
        self.handlers.on_thumbnail_click = f;
    }

    pub fn set_on_load_more(&mut self, f: Option<LoadMoreHandler>) {
        self.handlers.on_load_more = f;
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn heights(&self) -> &HeightModel<T::Id> {
        &self.heights
    }

    pub fn total_extent(&self) -> u64 {
        self.heights.total_extent()
    }

    pub fn viewport_extent(&self) -> u32 {
        self.viewport_extent
    }

    pub fn load_state(&self) -> LoadState {
        self.load_more.state()
    }

    pub fn resize_phase(&self) -> ResizePhase {
        self.resize.phase()
    }

    pub fn render_stats(&self) -> RenderStats {
        self.reconciler.stats()
    }

    pub fn materialized_count(&self) -> usize {
        self.reconciler.len()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame.is_pending()
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn active_id(&self) -> Option<&T::Id> {
        self.active.as_ref().and_then(|a| a.id())
    }

    /// Index of the materialized view currently highlighted as active.
    pub fn active_view_index(&self) -> Option<usize> {
        self.reconciler.active_index()
    }

    /// Resolves the visible range for the current scroll offset and viewport.
    pub fn visible_range(&self) -> Option<VisibleRange> {
        resolve_visible_range(
            self.heights.offsets(),
            self.container.scroll_offset(),
            self.viewport_extent,
            self.options.timeline.overscan,
        )
    }

    /// Reconciles materialized views with the visible range. Idempotent.
    pub fn render(&mut self) {
        if self.destroyed {
            return;
        }
        let range = self.visible_range();
        self.reconciler.reconcile(
            &mut self.host,
            &self.items,
            &self.heights,
            range,
            self.active.as_ref(),
        );
        self.scroll_dirty = false;
    }

    /// Replaces the item array wholesale and re-renders.
    ///
    /// When this completes a "load before" request and the array grew, the scroll offset is
    /// shifted by the growth of the scroll extent (on the next frame with frame scheduling), so
    /// the content on screen does not move. Otherwise, a `selected_id` different from the current
    /// active item scrolls that item to the center of the viewport. Both loading flags are
    /// cleared before returning.
    pub fn update(
        &mut self,
        items: Vec<T>,
        selected_id: Option<T::Id>,
        has_more_before: Option<bool>,
        has_more_after: Option<bool>,
    ) {
        if self.destroyed {
            return;
        }
        let previous_len = self.items.len();
        let was_loading_before = self.load_more.state().is_loading_before;
        let anchor =
            PrependAnchor::capture(self.container.scroll_offset(), self.container.scroll_extent());

        self.items = items;
        self.resize.discard_item_measurements();
        self.heights.forget_positional_measurements();
        self.warn_malformed();
        self.recalculate();
        self.reconciler.invalidate_items();

        let prepended = was_loading_before && self.items.len() > previous_len;
        let selection_changed = selected_id
            .as_ref()
            .is_some_and(|id| self.active_id() != Some(id));
        if let Some(id) = selected_id {
            self.active = Some(ItemIdentity::Id(id));
        }
        adebug!(
            previous_len,
            count = self.items.len(),
            prepended,
            selection_changed,
            "update"
        );

        if prepended {
            self.tween = None;
            if self.frame.is_enabled() {
                self.pending_anchor = Some(anchor);
                self.request_frame();
            } else {
                self.apply_anchor(anchor);
            }
        } else if selection_changed {
            if let Some(index) = self.active_id().and_then(|id| self.find_index_by_id(id)) {
                let target = self.centered_offset(index);
                self.tween = None;
                self.set_offset(target);
            }
        }

        self.render();
        self.load_more.finish_update(has_more_before, has_more_after);
    }

    pub fn set_loading_state(&mut self, direction: LoadDirection, is_loading: bool) {
        self.load_more.set_loading(direction, is_loading);
    }

    /// Call this when the container reports a scroll event.
    ///
    /// The visible range is re-rendered on the next frame; load-more is checked once scrolling
    /// has been quiet for `scroll_debounce_ms`.
    pub fn on_scroll(&mut self, now_ms: u64) {
        if self.destroyed {
            return;
        }
        let offset = self.container.scroll_offset();
        if self.last_set_offset != Some(offset) {
            // Not an echo of our own scroll: the user took over.
            self.tween = None;
        }
        self.last_set_offset = None;
        self.scroll_dirty = true;
        self.scroll_debounce.touch(now_ms);
        self.schedule_frame();
    }

    pub fn on_container_resize(&mut self, viewport_extent: u32) {
        if self.destroyed {
            return;
        }
        atrace!(viewport_extent, "on_container_resize");
        if self.resize.on_container_resize(viewport_extent) == ResizeDecision::Schedule {
            self.schedule_frame();
        }
    }

    /// Reports the rendered height of the item at `index`.
    ///
    /// Heights within `resize_tolerance` of the cached value are ignored, so the re-render a
    /// measurement causes cannot trigger another one by itself.
    pub fn on_item_resize(&mut self, index: usize, actual_height: u32) {
        if self.destroyed || index >= self.items.len() {
            return;
        }
        let cached = self.heights.height_of(&self.items, index);
        if self.resize.on_item_resize(index, cached, actual_height) == ResizeDecision::Schedule {
            self.schedule_frame();
        }
    }

    /// Routes a click on the view at `index` to the thumbnail-click handler.
    pub fn on_item_click(&mut self, index: usize) {
        if self.destroyed {
            return;
        }
        let Some(id) = self.items.get(index).and_then(|item| item.id()) else {
            return;
        };
        if let Some(cb) = &self.handlers.on_thumbnail_click {
            cb(id);
        }
    }

    /// Swaps the media of the view at `index` for an inline error. Siblings are untouched.
    pub fn on_item_media_error(&mut self, index: usize) {
        if self.destroyed {
            return;
        }
        adebug!(index, "media failed to load");
        self.reconciler.show_media_error::<T, H>(&mut self.host, index);
    }

    /// Advances time-driven work: smooth scrolling, pending frame work, and the debounced
    /// load-more check.
    pub fn tick(&mut self, now_ms: u64) {
        if self.destroyed {
            return;
        }

        if let Some(mut tween) = self.tween {
            // The content may have shrunk since the tween was aimed.
            tween.clamp_to(navigation::max_offset(self.total_extent(), self.viewport_extent));
            let offset = tween.sample(now_ms);
            self.tween = (!tween.is_done(now_ms)).then_some(tween);
            self.set_offset(offset);
            self.scroll_debounce.touch(now_ms);
            self.schedule_frame();
        }

        if self.frame.is_pending() {
            self.on_frame();
        }

        if self.scroll_debounce.take_due(now_ms) {
            self.check_load_more();
        }
    }

    /// Runs deferred frame work: container and item resizes, the prepend anchor, and the
    /// re-render they (or scrolling) require. At most one render per call.
    pub fn on_frame(&mut self) {
        if self.destroyed {
            return;
        }
        self.frame.begin_frame();

        let batch = self.resize.take_pending();
        let did_resize = !batch.is_empty();
        if let Some(extent) = batch.viewport_extent {
            self.viewport_extent = extent;
        }
        if !batch.items.is_empty() {
            self.apply_measurements(&batch.items);
        }

        let anchor = self.pending_anchor.take();
        if let Some(anchor) = anchor {
            self.apply_anchor(anchor);
        }

        if did_resize || anchor.is_some() || self.scroll_dirty {
            self.render();
        }
        self.resize.finish_frame(did_resize);
    }

    /// Requests more items if the visible range is near either end of the list.
    ///
    /// Returns the direction requested, if any.
    pub fn check_load_more(&mut self) -> Option<LoadDirection> {
        if self.destroyed {
            return None;
        }
        let range = self.visible_range();
        let direction = self.load_more.check_load_more(range, self.items.len())?;
        adebug!(?direction, "load more");
        if let Some(cb) = &self.handlers.on_load_more {
            cb(direction);
        }
        Some(direction)
    }

    /// Scrolls so item `index` is centered. Out-of-range indexes clamp to the last item.
    ///
    /// Returns the (clamped) target offset.
    pub fn scroll_to_index(&mut self, index: usize, smooth: bool) -> u64 {
        let target = self.centered_offset(index);
        self.scroll_to_offset(target, smooth)
    }

    pub fn scroll_to_bottom(&mut self, smooth: bool) -> u64 {
        let target = navigation::max_offset(self.total_extent(), self.viewport_extent);
        self.scroll_to_offset(target, smooth)
    }

    pub fn scroll_by(&mut self, delta: i64, smooth: bool) -> u64 {
        let from = match self.tween {
            Some(tween) => tween.to,
            None => self.container.scroll_offset(),
        };
        let target =
            navigation::offset_by(from, delta, self.total_extent(), self.viewport_extent);
        self.scroll_to_offset(target, smooth)
    }

    /// Scrolls to `offset`, clamped to `[0, total_extent - viewport_extent]`.
    ///
    /// Returns the clamped target offset.
    pub fn scroll_to_offset(&mut self, offset: u64, smooth: bool) -> u64 {
        if self.destroyed {
            return self.container.scroll_offset();
        }
        let target = navigation::clamp_offset(offset, self.total_extent(), self.viewport_extent);
        if smooth && self.options.smooth_scroll_ms > 0 {
            let duration = self.options.smooth_scroll_ms;
            let current = self.container.scroll_offset();
            match &mut self.tween {
                Some(tween) => tween.retarget(current, target, duration),
                None => {
                    self.tween = Some(ScrollTween::new(
                        current,
                        target,
                        duration,
                        self.options.smooth_scroll_easing,
                    ))
                }
            }
            self.container.request_frame();
        } else {
            self.tween = None;
            self.set_offset(target);
            self.schedule_frame();
        }
        target
    }

    pub fn find_index_by_id(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == Some(id))
    }

    /// Diagnostic snapshot of the materialized items, in index order.
    pub fn get_virtual_items(&self) -> Vec<VirtualItem> {
        self.reconciler.virtual_items()
    }

    /// Releases every materialized view and observation. Idempotent; the engine is inert
    /// afterwards.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        adebug!(views = self.reconciler.len(), "destroy");
        self.reconciler.destroy_all::<T, H>(&mut self.host);
        if self.size_observed {
            self.container.unobserve_size();
            self.size_observed = false;
        }
        self.container.unsubscribe_scroll();
        self.tween = None;
        self.pending_anchor = None;
        self.frame.cancel();
        self.scroll_debounce.cancel();
        self.destroyed = true;
    }

    fn centered_offset(&self, index: usize) -> u64 {
        navigation::centered_offset(self.heights.offsets(), index, self.viewport_extent)
    }

    fn set_offset(&mut self, offset: u64) {
        self.container.set_scroll_offset(offset);
        self.last_set_offset = Some(offset);
        self.scroll_dirty = true;
    }

    fn request_frame(&mut self) {
        if self.frame.request() {
            self.container.request_frame();
        }
    }

    fn schedule_frame(&mut self) {
        if self.frame.is_enabled() {
            self.request_frame();
        } else {
            self.on_frame();
        }
    }

    fn recalculate(&mut self) {
        let total = self.heights.calculate_heights(&self.items);
        self.container.set_content_extent(total);
    }

    fn apply_anchor(&mut self, anchor: PrependAnchor) {
        let target = anchor.resolve(self.container.scroll_extent());
        let target = navigation::clamp_offset(target, self.total_extent(), self.viewport_extent);
        adebug!(
            from = anchor.scroll_offset,
            to = target,
            delta = anchor.height_delta(self.container.scroll_extent()),
            "prepend anchor"
        );
        self.set_offset(target);
    }

    fn apply_measurements(&mut self, measurements: &[(usize, u32)]) {
        let scroll = self.container.scroll_offset();
        let mut above = 0i64;
        for &(index, actual) in measurements {
            if index >= self.items.len() {
                continue;
            }
            let start = self.heights.offsets().start_of(index);
            let delta = self.heights.record_measurement(&self.items, index, actual);
            // Growth above the viewport would push visible content down.
            if start < scroll {
                above += delta;
            }
        }
        self.recalculate();
        if above != 0 {
            let target =
                navigation::offset_by(scroll, above, self.total_extent(), self.viewport_extent);
            self.set_offset(target);
        }
    }

    #[cfg(feature = "tracing")]
    fn warn_malformed(&self) {
        let offset = self.options.timeline.date_offset();
        for (index, item) in self.items.iter().enumerate() {
            if let Err(err) = timeline_virtualizer::validate_item(item, offset) {
                awarn!(index, error = %err, "malformed item");
            }
        }
    }

    #[cfg(not(feature = "tracing"))]
    fn warn_malformed(&self) {}
}
