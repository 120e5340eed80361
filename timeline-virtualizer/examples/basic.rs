// Example: lay out a day-grouped photo timeline and resolve the visible window.
use timeline_virtualizer::{
    HeightModel, TimelineItem, TimelineOptions, navigation, resolve_visible_range,
};

struct Photo {
    id: u64,
    taken_at: String,
}

impl TimelineItem for Photo {
    type Id = u64;

    fn id(&self) -> Option<&u64> {
        Some(&self.id)
    }

    fn timestamp(&self) -> Option<&str> {
        Some(&self.taken_at)
    }
}

fn main() {
    let photos: Vec<Photo> = (0..10_000u64)
        .map(|id| Photo {
            id,
            // Twelve photos per day.
            taken_at: format!("{}", 1_700_000_000_000 + (id / 12) * 86_400_000 + id % 12),
        })
        .collect();

    let options = TimelineOptions::default();
    let mut heights = HeightModel::new(&options);
    let total = heights.calculate_heights(&photos);
    println!("total_extent={total}");

    let viewport = 600;
    let scroll = navigation::centered_offset(heights.offsets(), 5_000, viewport);
    let range = resolve_visible_range(heights.offsets(), scroll, viewport, options.overscan);
    println!("scroll_offset={scroll} visible_range={range:?}");

    if let Some(range) = range {
        for index in range.indexes() {
            if let Some(item) = heights.virtual_item(index) {
                let label = if item.starts_group { " [date label]" } else { "" };
                println!("  #{index} at {} ({}px){label}", item.start, item.size);
            }
        }
    }
}
