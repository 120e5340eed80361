// Example: measured heights are keyed by item id, so they survive prepends.
use timeline_virtualizer::{HeightModel, TimelineItem, TimelineOptions};

#[derive(Clone)]
struct Attachment {
    id: u64,
    created_at: &'static str,
}

impl TimelineItem for Attachment {
    type Id = u64;

    fn id(&self) -> Option<&u64> {
        Some(&self.id)
    }

    fn timestamp(&self) -> Option<&str> {
        Some(self.created_at)
    }
}

fn main() {
    let mut items = vec![
        Attachment { id: 10, created_at: "2024-05-02T09:00:00Z" },
        Attachment { id: 11, created_at: "2024-05-02T11:30:00Z" },
        Attachment { id: 12, created_at: "2024-05-03T08:15:00Z" },
    ];

    let mut heights = HeightModel::new(&TimelineOptions::new(88, 28));
    println!("estimated total={}", heights.calculate_heights(&items));

    // A tall caption made item 11 render at 140px.
    let delta = heights.record_measurement(&items, 1, 140);
    println!("measured item 11: delta={delta} total={}", heights.calculate_heights(&items));

    // Older attachments arrive and are prepended; item 11 moves to index 3.
    let mut older = vec![
        Attachment { id: 1, created_at: "2024-05-01T10:00:00Z" },
        Attachment { id: 2, created_at: "2024-05-01T12:00:00Z" },
    ];
    older.append(&mut items);
    let total = heights.calculate_heights(&older);
    println!(
        "after prepend: total={total} height[3]={} groups={:?}",
        heights.height_of(&older, 3),
        (0..older.len())
            .map(|i| heights.starts_group(&older, i))
            .collect::<Vec<_>>()
    );
}
