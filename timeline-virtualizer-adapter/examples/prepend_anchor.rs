use std::collections::BTreeMap;

use timeline_virtualizer::{TimelineItem, TimelineOptions, VirtualItem};
use timeline_virtualizer_adapter::{Engine, EngineOptions, ScrollContainer, ViewHost};

// Example: load older items when the user reaches the top, without the content jumping.
//
// The host flow is:
// 1) forward scroll events (`on_scroll`) and frame callbacks (`tick`)
// 2) when the engine asks for older items, fetch them and call `update`
// 3) the engine shifts the scroll offset by the height added above the viewport

struct Message {
    id: u64,
    sent_at: String,
}

impl TimelineItem for Message {
    type Id = u64;

    fn id(&self) -> Option<&u64> {
        Some(&self.id)
    }

    fn timestamp(&self) -> Option<&str> {
        Some(&self.sent_at)
    }
}

fn messages(ids: std::ops::Range<u64>) -> Vec<Message> {
    ids.map(|id| Message {
        id,
        sent_at: format!("2024-06-{:02} 10:00:00", 1 + id / 20),
    })
    .collect()
}

#[derive(Default)]
struct Scroller {
    offset: u64,
    content: u64,
}

impl ScrollContainer for Scroller {
    fn scroll_offset(&self) -> u64 {
        self.offset
    }

    fn scroll_extent(&self) -> u64 {
        self.content
    }

    fn viewport_extent(&self) -> u32 {
        480
    }

    fn set_content_extent(&mut self, extent: u64) {
        self.content = extent;
    }

    fn set_scroll_offset(&mut self, offset: u64) {
        self.offset = offset;
    }
}

#[derive(Default)]
struct Rows {
    next: u64,
    live: BTreeMap<u64, (u64, VirtualItem)>,
}

impl ViewHost<Message> for Rows {
    type View = u64;
    type Error = std::convert::Infallible;

    fn create(&mut self, item: &Message, layout: VirtualItem) -> Result<u64, Self::Error> {
        self.next += 1;
        self.live.insert(self.next, (item.id, layout));
        Ok(self.next)
    }

    fn create_placeholder(&mut self, _layout: VirtualItem, error: &Self::Error) -> u64 {
        match *error {}
    }

    fn position(&mut self, view: &mut u64, layout: VirtualItem) {
        if let Some(row) = self.live.get_mut(view) {
            row.1 = layout;
        }
    }

    fn set_active(&mut self, _view: &mut u64, _active: bool) {}

    fn show_media_error(&mut self, _view: &mut u64) {}

    fn destroy(&mut self, view: u64) {
        self.live.remove(&view);
    }
}

/// Id of the first row on screen and its offset from the viewport top.
fn first_visible(engine: &Engine<Message, Scroller, Rows>) -> Option<(u64, i64)> {
    let offset = engine.container().scroll_offset();
    engine
        .host()
        .live
        .values()
        .filter(|(_, layout)| layout.end() > offset)
        .min_by_key(|(_, layout)| layout.index)
        .map(|&(id, layout)| (id, layout.start as i64 - offset as i64))
}

fn main() {
    let options = EngineOptions::new(TimelineOptions::default());
    let mut engine = Engine::new(Scroller::default(), Rows::default(), messages(100..160), options);

    engine.scroll_to_offset(300, false);
    engine.on_scroll(0);
    engine.tick(16);
    println!("before: offset={} first={:?}", engine.container().offset, first_visible(&engine));

    // Quiet for longer than the debounce: the load-more check runs.
    engine.tick(200);
    let requested = engine.load_state().is_loading_before;
    println!("requested older items: {requested}");

    if requested {
        let mut items = messages(60..100);
        items.extend(messages(100..160));
        engine.update(items, None, Some(true), None);
        engine.on_frame();
    }
    println!("after:  offset={} first={:?}", engine.container().offset, first_visible(&engine));
    println!("load state: {:?}", engine.load_state());

    engine.destroy();
}
