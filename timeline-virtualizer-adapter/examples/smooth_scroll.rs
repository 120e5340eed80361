use timeline_virtualizer::{TimelineItem, TimelineOptions, VirtualItem};
use timeline_virtualizer_adapter::{Easing, Engine, EngineOptions, ScrollContainer, ViewHost};

// Example: jump to a selected item with an adapter-driven smooth scroll.
//
// The engine never reads a clock. The host calls `tick(now_ms)` from its frame loop and the
// engine advances the tween, writes the scroll offset and re-renders.

struct Thumb(u64);

impl TimelineItem for Thumb {
    type Id = u64;

    fn id(&self) -> Option<&u64> {
        Some(&self.0)
    }

    fn timestamp(&self) -> Option<&str> {
        None
    }
}

#[derive(Default)]
struct Scroller {
    offset: u64,
    content: u64,
    frames: usize,
}

impl ScrollContainer for Scroller {
    fn scroll_offset(&self) -> u64 {
        self.offset
    }

    fn scroll_extent(&self) -> u64 {
        self.content
    }

    fn viewport_extent(&self) -> u32 {
        400
    }

    fn set_content_extent(&mut self, extent: u64) {
        self.content = extent;
    }

    fn set_scroll_offset(&mut self, offset: u64) {
        self.offset = offset;
    }

    fn request_frame(&mut self) {
        self.frames += 1;
    }
}

#[derive(Default)]
struct Counter {
    live: usize,
    created: usize,
}

impl ViewHost<Thumb> for Counter {
    type View = ();
    type Error = &'static str;

    fn create(&mut self, _item: &Thumb, _layout: VirtualItem) -> Result<(), Self::Error> {
        self.live += 1;
        self.created += 1;
        Ok(())
    }

    fn create_placeholder(&mut self, _layout: VirtualItem, _error: &Self::Error) {
        self.live += 1;
    }

    fn position(&mut self, _view: &mut (), _layout: VirtualItem) {}

    fn set_active(&mut self, _view: &mut (), _active: bool) {}

    fn show_media_error(&mut self, _view: &mut ()) {}

    fn destroy(&mut self, _view: ()) {
        self.live -= 1;
    }
}

fn main() {
    let options = EngineOptions::new(TimelineOptions::new(88, 28))
        .with_smooth_scroll(200, Easing::SmoothStep);
    let items: Vec<Thumb> = (0..500).map(Thumb).collect();
    let mut engine = Engine::new(Scroller::default(), Counter::default(), items, options);

    let target = engine.scroll_to_index(250, true);
    println!("target={target}");

    for now_ms in (0..=240).step_by(16) {
        engine.tick(now_ms);
        println!(
            "t={now_ms:>3} offset={:>5} range={:?} live_views={}",
            engine.container().offset,
            engine.visible_range(),
            engine.host().live
        );
        if !engine.is_animating() {
            break;
        }
    }

    println!(
        "views created={} frames requested={} stats={:?}",
        engine.host().created,
        engine.container().frames,
        engine.render_stats()
    );
}
