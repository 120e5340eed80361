use crate::*;

use alloc::string::String;
use alloc::vec::Vec;

#[derive(Clone, Debug)]
struct Photo {
    id: Option<u64>,
    ts: Option<String>,
}

impl TimelineItem for Photo {
    type Id = u64;

    fn id(&self) -> Option<&u64> {
        self.id.as_ref()
    }

    fn timestamp(&self) -> Option<&str> {
        self.ts.as_deref()
    }
}

fn photo(id: u64, ts: &str) -> Photo {
    Photo {
        id: Some(id),
        ts: Some(String::from(ts)),
    }
}

fn untimed(id: u64) -> Photo {
    Photo {
        id: Some(id),
        ts: None,
    }
}

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 11
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start))
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }
}

/// Items spread over a few days, with the given number of photos per day.
fn days(per_day: &[usize]) -> Vec<Photo> {
    let mut out = Vec::new();
    let mut id = 0u64;
    for (day, &n) in per_day.iter().enumerate() {
        for k in 0..n {
            out.push(photo(
                id,
                &std::format!("2024-03-{:02}T{:02}:00:00Z", day + 1, k % 24),
            ));
            id += 1;
        }
    }
    out
}

fn uniform(count: u64) -> Vec<Photo> {
    (0..count).map(untimed).collect()
}

fn uniform_ids(ids: core::ops::Range<u64>) -> Vec<Photo> {
    ids.map(untimed).collect()
}

fn brute_force_range(
    offsets: &OffsetIndex,
    scroll: u64,
    view: u32,
    overscan: usize,
) -> Option<VisibleRange> {
    let n = offsets.len();
    if n == 0 {
        return None;
    }
    let view_end = scroll + view as u64;
    let first = (0..n)
        .find(|&i| offsets.end_of(i) > scroll)
        .unwrap_or(n - 1);
    let last = (0..n)
        .filter(|&i| offsets.start_of(i) <= view_end)
        .last()
        .unwrap_or(first)
        .max(first);
    Some(VisibleRange {
        start: first.saturating_sub(overscan),
        end: (last + overscan).min(n - 1),
    })
}

#[test]
fn uniform_list_resolves_expected_window() {
    // 20 rows of 88 in a 400 viewport: rows 0..=4 intersect, plus 3 rows of overscan.
    let items = uniform(20);
    let mut heights = HeightModel::new(&TimelineOptions::new(88, 28));
    assert_eq!(heights.calculate_heights(&items), 20 * 88);

    let range = resolve_visible_range(heights.offsets(), 0, 400, 3);
    assert_eq!(range, Some(VisibleRange { start: 0, end: 7 }));
}

#[test]
fn empty_list_has_no_range() {
    let items: Vec<Photo> = Vec::new();
    let mut heights = HeightModel::new(&TimelineOptions::default());
    assert_eq!(heights.calculate_heights(&items), 0);
    assert_eq!(resolve_visible_range(heights.offsets(), 0, 400, 3), None);
    assert_eq!(resolve_visible_range(heights.offsets(), 500, 0, 0), None);
}

#[test]
fn single_item_range_spans_one_index() {
    let items = uniform(1);
    let mut heights = HeightModel::new(&TimelineOptions::default());
    heights.calculate_heights(&items);
    let range = resolve_visible_range(heights.offsets(), 0, 400, 3).unwrap();
    assert_eq!(range.indexes().count(), 1);
    assert!(range.contains(0));
    assert!(!range.contains(1));
}

#[test]
fn overscrolled_offset_clamps_to_last_item() {
    let items = uniform(10);
    let mut heights = HeightModel::new(&TimelineOptions::new(10, 0));
    heights.calculate_heights(&items);
    let range = resolve_visible_range(heights.offsets(), 10_000, 50, 2).unwrap();
    assert_eq!(range, VisibleRange { start: 7, end: 9 });
}

#[test]
fn item_starting_exactly_at_viewport_end_is_included() {
    let items = uniform(10);
    let mut heights = HeightModel::new(&TimelineOptions::new(10, 0));
    heights.calculate_heights(&items);
    // Viewport [0, 30]: item 3 starts at 30.
    let range = resolve_visible_range(heights.offsets(), 0, 30, 0).unwrap();
    assert_eq!(range, VisibleRange { start: 0, end: 3 });
    // Scrolled to 10: item 0 ends at 10 and no longer reaches the viewport.
    let range = resolve_visible_range(heights.offsets(), 10, 30, 0).unwrap();
    assert_eq!(range, VisibleRange { start: 1, end: 4 });
}

#[test]
fn same_day_items_share_one_date_label() {
    let items = [
        photo(1, "2024-03-01T10:00:00Z"),
        photo(2, "2024-03-01T12:00:00Z"),
        photo(3, "2024-03-02T09:00:00Z"),
        photo(4, "2024-03-02T18:00:00Z"),
    ];
    let mut heights = HeightModel::new(&TimelineOptions::new(88, 28));
    let total = heights.calculate_heights(&items);

    assert_eq!(heights.height_of(&items, 0), 88 + 28);
    assert_eq!(heights.height_of(&items, 1), 88);
    assert_eq!(heights.height_of(&items, 2), 88 + 28);
    assert_eq!(heights.height_of(&items, 3), 88);
    assert_eq!(total, 4 * 88 + 2 * 28);

    assert!(heights.virtual_item(2).unwrap().starts_group);
    assert!(!heights.virtual_item(3).unwrap().starts_group);
    assert_eq!(heights.virtual_item(2).unwrap().start, 88 + 28 + 88);
}

#[test]
fn lazy_heights_match_bulk_heights() {
    let items = days(&[3, 1, 4, 2]);
    let options = TimelineOptions::new(60, 20);

    let mut lazy = HeightModel::new(&options);
    let lazy_heights: Vec<u32> = (0..items.len())
        .rev()
        .map(|i| lazy.height_of(&items, i))
        .collect();

    let mut bulk = HeightModel::new(&options);
    bulk.calculate_heights(&items);
    for (k, &h) in lazy_heights.iter().enumerate() {
        let i = items.len() - 1 - k;
        assert_eq!(h, bulk.offsets().height_of(i), "index {i}");
    }
    assert_eq!(lazy.height_of(&items, items.len()), 0);
}

#[test]
fn missing_timestamp_falls_back_to_base_height() {
    let items = [
        photo(1, "2024-03-01T10:00:00Z"),
        untimed(2),
        photo(3, "2024-03-01T11:00:00Z"),
    ];
    let mut heights = HeightModel::new(&TimelineOptions::new(88, 28));
    heights.calculate_heights(&items);

    assert_eq!(heights.height_of(&items, 1), 88);
    // The predecessor has no date, so the same-day item opens a new group.
    assert_eq!(heights.height_of(&items, 2), 88 + 28);
}

#[test]
fn unparseable_timestamps_group_by_raw_value() {
    let items = [
        photo(1, "yesterday"),
        photo(2, "yesterday"),
        photo(3, "today"),
    ];
    let mut heights = HeightModel::new(&TimelineOptions::new(10, 5));
    heights.calculate_heights(&items);
    assert_eq!(heights.height_of(&items, 0), 15);
    assert_eq!(heights.height_of(&items, 1), 10);
    assert_eq!(heights.height_of(&items, 2), 15);
}

#[test]
fn date_keys_accept_several_formats() {
    let utc = TimelineOptions::default().date_offset();
    let day = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    assert_eq!(date_key("2024-03-01T00:00:00Z", utc), DateKey::Day(day));
    assert_eq!(date_key("1709251200000", utc), DateKey::Day(day));
    assert_eq!(date_key("2024-03-01 08:15:00", utc), DateKey::Day(day));
    assert_eq!(date_key(" 2024-03-01 ", utc), DateKey::Day(day));
    assert_eq!(date_key("soon", utc), DateKey::Raw(String::from("soon")));
}

#[test]
fn date_offset_moves_items_across_midnight() {
    let items = [
        photo(1, "2024-03-01T23:30:00Z"),
        photo(2, "2024-03-02T00:30:00Z"),
    ];
    let mut utc = HeightModel::new(&TimelineOptions::new(10, 5));
    utc.calculate_heights(&items);
    assert_eq!(utc.height_of(&items, 1), 15);

    let mut plus_one = HeightModel::new(&TimelineOptions::new(10, 5).with_date_offset_secs(3600));
    plus_one.calculate_heights(&items);
    assert_eq!(plus_one.height_of(&items, 1), 10);

    // Invalid offsets fall back to UTC.
    let bogus = TimelineOptions::default().with_date_offset_secs(100 * 3600);
    assert_eq!(bogus.date_offset(), TimelineOptions::default().date_offset());
}

#[test]
fn validate_item_reports_malformed_records() {
    let utc = TimelineOptions::default().date_offset();
    assert_eq!(validate_item(&photo(1, "2024-03-01T00:00:00Z"), utc), Ok(()));
    assert_eq!(validate_item(&untimed(1), utc), Err(ItemError::MissingTimestamp));
    assert_eq!(
        validate_item(&photo(1, "n/a"), utc),
        Err(ItemError::InvalidTimestamp(String::from("n/a")))
    );
    let anonymous = Photo {
        id: None,
        ts: Some(String::from("2024-03-01")),
    };
    assert_eq!(validate_item(&anonymous, utc), Err(ItemError::MissingId));
}

#[test]
fn identity_prefers_id_and_falls_back_to_position() {
    let anonymous = Photo { id: None, ts: None };
    assert_eq!(ItemIdentity::of(&photo(7, "x"), 3), ItemIdentity::Id(7));
    assert_eq!(ItemIdentity::of(&anonymous, 3), ItemIdentity::Position(3));

    assert!(ItemIdentity::Id(7u64).matches(&photo(7, "x"), 0));
    assert!(!ItemIdentity::Id(7u64).matches(&photo(8, "x"), 0));
    assert!(ItemIdentity::<u64>::Position(3).matches(&anonymous, 3));
    assert!(!ItemIdentity::<u64>::Position(3).matches(&anonymous, 4));
    assert!(!ItemIdentity::<u64>::Position(3).matches(&photo(3, "x"), 3));
}

#[test]
fn measurements_follow_identity_across_replacement() {
    let mut items = days(&[3]);
    let mut heights = HeightModel::new(&TimelineOptions::new(88, 28));
    heights.calculate_heights(&items);

    let delta = heights.record_measurement(&items, 1, 120);
    assert_eq!(delta, 120 - 88);
    assert_eq!(heights.calculate_heights(&items), 116 + 120 + 88);
    assert_eq!(heights.measurement_count(), 1);

    // Prepend two photos from an earlier day: id 1 keeps its measured height at index 3.
    let mut next = days(&[2]);
    for (k, p) in next.iter_mut().enumerate() {
        p.id = Some(100 + k as u64);
        p.ts = Some(String::from("2024-02-28T10:00:00Z"));
    }
    next.append(&mut items);
    heights.calculate_heights(&next);
    assert_eq!(heights.height_of(&next, 3), 120);

    // Once id 1 opens a date group, the old measurement no longer applies.
    let reordered = [next[3].clone(), next[2].clone()];
    heights.calculate_heights(&reordered);
    assert_eq!(heights.height_of(&reordered, 0), 88 + 28);

    heights.clear_measurements();
    heights.calculate_heights(&next);
    assert_eq!(heights.height_of(&next, 3), 88);
}

#[test]
fn measurements_of_departed_items_are_dropped() {
    let mut heights = HeightModel::new(&TimelineOptions::new(88, 28));
    let mut rng = Lcg::new(7);
    for page in 0..6u64 {
        let items = uniform_ids(page * 100..page * 100 + 20);
        heights.calculate_heights(&items);
        for _ in 0..8 {
            let i = rng.gen_range_usize(0, items.len());
            heights.record_measurement(&items, i, 90 + rng.gen_range_u64(0, 40) as u32);
        }
        heights.calculate_heights(&items);
        assert!(heights.measurement_count() <= items.len());
    }

    // Only the items that stay keep their measurements.
    let last = uniform_ids(500..520);
    for i in 0..last.len() {
        heights.record_measurement(&last, i, 100);
    }
    let mut next = uniform_ids(500..505);
    next.extend(uniform_ids(900..915));
    heights.calculate_heights(&next);
    assert_eq!(heights.measurement_count(), 5);
    assert_eq!(heights.height_of(&next, 4), 100);
    assert_eq!(heights.height_of(&next, 5), 88);
}

#[test]
fn positional_measurements_do_not_carry_over() {
    let anonymous = |n: usize| -> Vec<Photo> {
        (0..n).map(|_| Photo { id: None, ts: None }).collect()
    };
    let before = anonymous(2);
    let mut heights = HeightModel::new(&TimelineOptions::new(88, 28));
    heights.calculate_heights(&before);
    heights.record_measurement(&before, 0, 300);
    assert_eq!(heights.calculate_heights(&before), 300 + 88);

    // Same array again: the positional measurement still applies.
    heights.calculate_heights(&before);
    assert_eq!(heights.height_of(&before, 0), 300);

    let after = anonymous(3);
    heights.forget_positional_measurements();
    assert_eq!(heights.calculate_heights(&after), 3 * 88);
    assert_eq!(heights.measurement_count(), 0);
}

#[test]
fn set_options_rebuilds_estimates() {
    let items = days(&[2, 2]);
    let mut heights = HeightModel::new(&TimelineOptions::new(88, 28));
    heights.calculate_heights(&items);

    heights.set_options(&TimelineOptions::new(50, 10));
    assert_eq!(heights.calculate_heights(&items), 4 * 50 + 2 * 10);
}

#[test]
fn property_random_layout_invariants() {
    let mut rng = Lcg::new(0x7157_0ff5);
    for _round in 0..200 {
        let day_count = rng.gen_range_usize(0, 6);
        let per_day: Vec<usize> = (0..day_count).map(|_| rng.gen_range_usize(1, 12)).collect();
        let items = days(&per_day);
        let options = TimelineOptions::new(
            rng.gen_range_u64(0, 120) as u32,
            rng.gen_range_u64(0, 40) as u32,
        );
        let mut heights = HeightModel::new(&options);
        heights.calculate_heights(&items);

        for _ in 0..rng.gen_range_usize(0, 4) {
            if items.is_empty() {
                break;
            }
            let i = rng.gen_range_usize(0, items.len());
            heights.record_measurement(&items, i, rng.gen_range_u64(0, 300) as u32);
        }
        let total = heights.calculate_heights(&items);

        let n = items.len();
        let offsets = heights.offsets().clone();
        assert_eq!(offsets.len(), n);
        assert_eq!(offsets.start_of(0), 0);
        let mut sum = 0u64;
        for i in 0..n {
            let h = heights.height_of(&items, i);
            assert_eq!(offsets.start_of(i + 1) - offsets.start_of(i), h as u64);
            sum += h as u64;
        }
        assert_eq!(sum, total);

        for _ in 0..20 {
            let scroll = rng.gen_range_u64(0, total + 200);
            let view = rng.gen_range_u64(0, 600) as u32;
            let overscan = rng.gen_range_usize(0, 5);
            let got = resolve_visible_range(&offsets, scroll, view, overscan);
            assert_eq!(got, brute_force_range(&offsets, scroll, view, overscan));
            if let Some(r) = got {
                assert!(r.start <= r.end && r.end < n);
            }
        }
    }
}

#[test]
fn load_more_fires_once_per_direction_until_update() {
    let mut lm = LoadMoreCoordinator::new(5);
    let near_top = Some(VisibleRange { start: 0, end: 7 });

    assert_eq!(lm.check_load_more(near_top, 20), Some(LoadDirection::Before));
    assert!(lm.state().is_loading_before);
    assert_eq!(lm.check_load_more(near_top, 20), None);
    assert_eq!(lm.check_load_more(near_top, 20), None);

    // Completion arrives with no further history: flag cleared even though has_more is false.
    let prev = lm.finish_update(Some(false), None);
    assert!(prev.is_loading_before);
    assert!(!lm.state().is_loading_before);
    assert!(!lm.state().has_more_before);
    assert_eq!(lm.check_load_more(near_top, 20), None);

    let near_bottom = Some(VisibleRange { start: 12, end: 19 });
    assert_eq!(lm.check_load_more(near_bottom, 20), Some(LoadDirection::After));
    assert!(lm.state().is_loading_after);
    assert_eq!(lm.check_load_more(near_bottom, 20), None);
}

#[test]
fn load_more_respects_threshold_and_pending_flags() {
    let mut lm = LoadMoreCoordinator::new(5);
    let middle = Some(VisibleRange { start: 40, end: 48 });
    assert_eq!(lm.check_load_more(middle, 100), None);
    assert_eq!(lm.check_load_more(None, 0), None);

    // Edge cases of the threshold itself.
    assert_eq!(
        lm.check_load_more(Some(VisibleRange { start: 6, end: 10 }), 100),
        None
    );
    assert_eq!(
        lm.check_load_more(Some(VisibleRange { start: 5, end: 10 }), 100),
        Some(LoadDirection::Before)
    );

    // While anything is pending, nothing else is requested.
    assert_eq!(
        lm.check_load_more(Some(VisibleRange { start: 90, end: 99 }), 100),
        None
    );

    lm.set_loading(LoadDirection::Before, false);
    lm.set_has_more(Some(false), Some(true));
    assert_eq!(
        lm.check_load_more(Some(VisibleRange { start: 90, end: 94 }), 100),
        Some(LoadDirection::After)
    );
    assert!(lm.state().is_loading_in(LoadDirection::After));
}

#[test]
fn resize_coordinator_batches_and_settles() {
    let mut rc = ResizeCoordinator::new(1);
    assert_eq!(rc.phase(), ResizePhase::Idle);

    assert_eq!(rc.on_item_resize(0, 88, 89), ResizeDecision::WithinTolerance);
    assert_eq!(rc.phase(), ResizePhase::Idle);

    assert_eq!(rc.on_item_resize(0, 88, 100), ResizeDecision::Schedule);
    assert_eq!(rc.phase(), ResizePhase::Measuring);
    assert_eq!(rc.on_item_resize(3, 88, 60), ResizeDecision::Coalesced);
    assert_eq!(rc.on_item_resize(0, 88, 104), ResizeDecision::Coalesced);
    assert_eq!(rc.on_container_resize(500), ResizeDecision::Coalesced);

    let batch = rc.take_pending();
    assert_eq!(batch.viewport_extent, Some(500));
    assert_eq!(batch.items, std::vec![(0, 104), (3, 60)]);
    assert!(rc.take_pending().is_empty());

    rc.finish_frame(true);
    assert_eq!(rc.phase(), ResizePhase::Settled);

    // The re-render reports the sizes it just applied: no new cycle.
    assert_eq!(rc.on_item_resize(0, 104, 104), ResizeDecision::WithinTolerance);
    assert_eq!(rc.phase(), ResizePhase::Settled);
    rc.finish_frame(false);
    assert_eq!(rc.phase(), ResizePhase::Idle);
}

#[test]
fn resize_coordinator_reenters_measuring_only_outside_tolerance() {
    let mut rc = ResizeCoordinator::new(4);
    assert_eq!(rc.on_container_resize(300), ResizeDecision::Schedule);
    rc.take_pending();
    rc.finish_frame(true);
    assert_eq!(rc.phase(), ResizePhase::Settled);

    assert_eq!(rc.on_item_resize(2, 50, 54), ResizeDecision::WithinTolerance);
    assert_eq!(rc.on_item_resize(2, 50, 55), ResizeDecision::Schedule);
    assert_eq!(rc.phase(), ResizePhase::Measuring);

    rc.discard_item_measurements();
    let batch = rc.take_pending();
    assert!(batch.is_empty());
    rc.finish_frame(false);
    assert_eq!(rc.phase(), ResizePhase::Idle);
}

#[test]
fn resize_tolerance_is_configurable() {
    let mut strict = ResizeCoordinator::new(0);
    assert_eq!(strict.on_item_resize(0, 88, 89), ResizeDecision::Schedule);

    let mut loose = ResizeCoordinator::new(16);
    assert_eq!(loose.on_item_resize(0, 88, 100), ResizeDecision::WithinTolerance);
    loose.set_tolerance(2);
    assert_eq!(loose.tolerance(), 2);
    assert_eq!(loose.on_item_resize(0, 88, 100), ResizeDecision::Schedule);
}

#[test]
fn centered_offset_clamps_to_scrollable_range() {
    let items = uniform(20);
    let mut heights = HeightModel::new(&TimelineOptions::new(88, 0));
    heights.calculate_heights(&items);
    let offsets = heights.offsets();

    assert_eq!(navigation::centered_offset(offsets, 10, 400), 880 + 44 - 200);
    assert_eq!(navigation::centered_offset(offsets, 0, 400), 0);
    assert_eq!(navigation::centered_offset(offsets, 19, 400), 1760 - 400);
    assert_eq!(navigation::centered_offset(offsets, 999, 400), 1760 - 400);
    assert_eq!(navigation::centered_offset(&OffsetIndex::new(), 3, 400), 0);
}

#[test]
fn offset_helpers_clamp() {
    assert_eq!(navigation::max_offset(1000, 400), 600);
    assert_eq!(navigation::max_offset(100, 400), 0);
    assert_eq!(navigation::clamp_offset(900, 1000, 400), 600);
    assert_eq!(navigation::offset_by(100, -250, 1000, 400), 0);
    assert_eq!(navigation::offset_by(100, 250, 1000, 400), 350);
    assert_eq!(navigation::offset_by(500, 250, 1000, 400), 600);
}

#[test]
fn offset_index_lookups() {
    let offsets = OffsetIndex::from_heights([10u32, 0, 20, 5].into_iter());
    assert_eq!(offsets.len(), 4);
    assert_eq!(offsets.total_extent(), 35);
    assert_eq!(offsets.start_of(2), 10);
    assert_eq!(offsets.start_of(99), 35);
    assert_eq!(offsets.height_of(1), 0);

    assert_eq!(offsets.first_reaching(0), Some(0));
    assert_eq!(offsets.first_reaching(9), Some(0));
    // Item 1 has no height, so offset 10 belongs to item 2.
    assert_eq!(offsets.first_reaching(10), Some(2));
    assert_eq!(offsets.first_reaching(34), Some(3));
    assert_eq!(offsets.first_reaching(35), Some(3));

    assert_eq!(offsets.last_starting_at_or_before(0), Some(0));
    assert_eq!(offsets.last_starting_at_or_before(10), Some(2));
    assert_eq!(offsets.last_starting_at_or_before(1000), Some(3));
    assert_eq!(OffsetIndex::new().first_reaching(0), None);
}

#[cfg(feature = "serde")]
#[test]
fn options_deserialize_with_defaults() {
    // Fields missing from the map fall back to their defaults.
    let options: TimelineOptions = serde::Deserialize::deserialize(
        serde::de::value::MapDeserializer::<_, serde::de::value::Error>::new(
            [("overscan", 7usize)].into_iter(),
        ),
    )
    .unwrap();
    assert_eq!(options.overscan, 7);
    assert_eq!(options.base_height, TimelineOptions::default().base_height);
}
