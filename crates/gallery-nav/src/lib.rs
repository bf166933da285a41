mod filter;
mod nav;
#[cfg(not(target_arch = "wasm32"))]
pub mod scan;

use gallery_types::{FilterTag, GalleryItem, ItemId};
use std::time::Duration;

pub use filter::{FilterBar, ItemChange};
pub use nav::{VisibleSet, step};

/// The full item collection plus the shown/hidden state the filter left behind.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    items: Vec<GalleryItem>,
    shown: Vec<bool>,
}

impl Gallery {
    /// Every item starts shown, matching the default "all" filter.
    pub fn new(items: Vec<GalleryItem>) -> Self {
        let shown = vec![true; items.len()];
        Self { items, shown }
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&GalleryItem> {
        self.items.get(id.index())
    }

    pub fn is_shown(&self, id: ItemId) -> bool {
        self.shown.get(id.index()).copied().unwrap_or(false)
    }

    /// Re-evaluates every item against `tag`.
    ///
    /// Matching items are shown with an entrance delay of `position × stagger`,
    /// where position is the index in the full collection. Everything else is
    /// hidden with no delay.
    pub fn apply_filter(&mut self, tag: &FilterTag, stagger: Duration) -> Vec<ItemChange> {
        self.items
            .iter()
            .zip(self.shown.iter_mut())
            .enumerate()
            .map(|(idx, (item, shown))| {
                let id = ItemId(idx);
                if tag.matches(&item.category) {
                    *shown = true;
                    let position = u32::try_from(idx).unwrap_or(u32::MAX);
                    ItemChange::Show {
                        id,
                        delay: stagger.saturating_mul(position),
                    }
                } else {
                    *shown = false;
                    ItemChange::Hide { id }
                }
            })
            .collect()
    }

    /// Derives the visible set from the current shown state, in collection order.
    pub fn visible_set(&self) -> VisibleSet {
        VisibleSet::from_ids(
            self.shown
                .iter()
                .enumerate()
                .filter(|(_, shown)| **shown)
                .map(|(idx, _)| ItemId(idx)),
        )
    }
}
