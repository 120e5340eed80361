use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use timeline_virtualizer::{
    HeightModel, ItemId, ItemIdentity, TimelineItem, VirtualItem, VisibleRange,
};

use crate::ViewHost;

/// Cumulative reconcile counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderStats {
    pub renders: u64,
    pub created: u64,
    pub destroyed: u64,
    pub repositioned: u64,
    /// Views that failed to build and were replaced by a placeholder.
    pub failed: u64,
}

struct Materialized<V, Id> {
    view: V,
    identity: ItemIdentity<Id>,
    layout: VirtualItem,
    active: bool,
    observed: bool,
}

/// Keeps exactly one view per materialized index in sync with the visible range.
pub(crate) struct Reconciler<V, Id> {
    views: BTreeMap<usize, Materialized<V, Id>>,
    range: Option<VisibleRange>,
    items_changed: bool,
    stats: RenderStats,
}

impl<V, Id: ItemId> Reconciler<V, Id> {
    pub(crate) fn new() -> Self {
        Self {
            views: BTreeMap::new(),
            range: None,
            items_changed: false,
            stats: RenderStats::default(),
        }
    }

    pub(crate) fn stats(&self) -> RenderStats {
        self.stats
    }

    pub(crate) fn len(&self) -> usize {
        self.views.len()
    }

    /// Marks the item array as replaced: the next reconcile re-checks every view's identity.
    pub(crate) fn invalidate_items(&mut self) {
        self.items_changed = true;
    }

    pub(crate) fn virtual_items(&self) -> Vec<VirtualItem> {
        self.views.values().map(|m| m.layout).collect()
    }

    pub(crate) fn active_index(&self) -> Option<usize> {
        self.views
            .iter()
            .find_map(|(&index, m)| m.active.then_some(index))
    }

    pub(crate) fn reconcile<T, H>(
        &mut self,
        host: &mut H,
        items: &[T],
        heights: &HeightModel<Id>,
        range: Option<VisibleRange>,
        active: Option<&ItemIdentity<Id>>,
    ) where
        T: TimelineItem<Id = Id>,
        H: ViewHost<T, View = V>,
    {
        self.stats.renders += 1;

        if range == self.range && !self.items_changed {
            // Same window: only positions and highlighting can have changed.
            for m in self.views.values_mut() {
                Self::reposition::<T, H>(host, m, heights, &mut self.stats);
            }
            self.refresh_active::<T, H>(host, active);
            return;
        }

        let items_changed = self.items_changed;
        let stale: Vec<usize> = self
            .views
            .iter()
            .filter(|&(&index, m)| {
                let in_range = range.is_some_and(|r| r.contains(index));
                // A position says nothing about which record sits there after a replacement.
                let positional = matches!(m.identity, ItemIdentity::Position(_));
                let same_item = !(items_changed && positional)
                    && items
                        .get(index)
                        .is_some_and(|item| m.identity.matches(item, index));
                !(in_range && same_item)
            })
            .map(|(&index, _)| index)
            .collect();
        for index in stale {
            if let Some(m) = self.views.remove(&index) {
                Self::teardown::<T, H>(host, m, &mut self.stats);
            }
        }

        if let Some(r) = range {
            for index in r.indexes() {
                if let Some(m) = self.views.get_mut(&index) {
                    Self::reposition::<T, H>(host, m, heights, &mut self.stats);
                    continue;
                }
                let (Some(item), Some(layout)) = (items.get(index), heights.virtual_item(index))
                else {
                    continue;
                };
                let view = match host.create(item, layout) {
                    Ok(view) => view,
                    Err(err) => {
                        awarn!(index, error = %err, "view construction failed; showing placeholder");
                        self.stats.failed += 1;
                        host.create_placeholder(layout, &err)
                    }
                };
                let observed = host.observe(&view);
                self.stats.created += 1;
                self.views.insert(
                    index,
                    Materialized {
                        view,
                        identity: ItemIdentity::of(item, index),
                        layout,
                        active: false,
                        observed,
                    },
                );
            }
        }

        if range != self.range {
            atrace!(?range, views = self.views.len(), "visible range changed");
        }
        self.range = range;
        self.items_changed = false;
        self.refresh_active::<T, H>(host, active);
    }

    fn reposition<T, H>(
        host: &mut H,
        m: &mut Materialized<V, Id>,
        heights: &HeightModel<Id>,
        stats: &mut RenderStats,
    ) where
        T: TimelineItem<Id = Id>,
        H: ViewHost<T, View = V>,
    {
        let Some(layout) = heights.virtual_item(m.layout.index) else {
            return;
        };
        if layout != m.layout {
            host.position(&mut m.view, layout);
            m.layout = layout;
            stats.repositioned += 1;
        }
    }

    fn refresh_active<T, H>(&mut self, host: &mut H, active: Option<&ItemIdentity<Id>>)
    where
        T: TimelineItem<Id = Id>,
        H: ViewHost<T, View = V>,
    {
        for m in self.views.values_mut() {
            let should = active.is_some_and(|a| *a == m.identity);
            if m.active != should {
                host.set_active(&mut m.view, should);
                m.active = should;
            }
        }
    }

    fn teardown<T, H>(host: &mut H, m: Materialized<V, Id>, stats: &mut RenderStats)
    where
        T: TimelineItem<Id = Id>,
        H: ViewHost<T, View = V>,
    {
        if m.observed {
            host.unobserve(&m.view);
        }
        host.destroy(m.view);
        stats.destroyed += 1;
    }

    /// Swaps the media of the view at `index` for an error affordance. Returns `false` if the
    /// index is not materialized.
    pub(crate) fn show_media_error<T, H>(&mut self, host: &mut H, index: usize) -> bool
    where
        T: TimelineItem<Id = Id>,
        H: ViewHost<T, View = V>,
    {
        let Some(m) = self.views.get_mut(&index) else {
            return false;
        };
        host.show_media_error(&mut m.view);
        true
    }

    pub(crate) fn destroy_all<T, H>(&mut self, host: &mut H)
    where
        T: TimelineItem<Id = Id>,
        H: ViewHost<T, View = V>,
    {
        let views = core::mem::take(&mut self.views);
        for m in views.into_values() {
            Self::teardown::<T, H>(host, m, &mut self.stats);
        }
        self.range = None;
    }
}
