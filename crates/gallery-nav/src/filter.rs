use gallery_types::{FilterTag, GalleryItem, ItemId};
use std::time::Duration;

/// What the view must do to one grid item after a filter change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemChange {
    Show { id: ItemId, delay: Duration },
    Hide { id: ItemId },
}

/// Closed, single-select set of filter buttons. "all" is always one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBar {
    tags: Vec<FilterTag>,
    active: usize,
}

impl Default for FilterBar {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FilterBar {
    /// Builds the bar from button tags in page order. "all" is prepended when
    /// missing, duplicates are dropped, and "all" starts active.
    pub fn new(tags: Vec<FilterTag>) -> Self {
        let mut unique: Vec<FilterTag> = Vec::with_capacity(tags.len() + 1);
        if !tags.iter().any(FilterTag::is_all) {
            unique.push(FilterTag::All);
        }
        for tag in tags {
            if !unique.contains(&tag) {
                unique.push(tag);
            }
        }

        let active = unique.iter().position(FilterTag::is_all).unwrap_or_default();
        Self {
            tags: unique,
            active,
        }
    }

    /// One button per distinct category, in order of first appearance.
    pub fn from_items(items: &[GalleryItem]) -> Self {
        Self::new(
            items
                .iter()
                .map(|item| FilterTag::category(item.category.as_str()))
                .collect(),
        )
    }

    pub fn tags(&self) -> &[FilterTag] {
        &self.tags
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_tag(&self) -> &FilterTag {
        &self.tags[self.active]
    }

    pub fn position(&self, tag: &FilterTag) -> Option<usize> {
        self.tags.iter().position(|candidate| candidate == tag)
    }

    /// Makes `tag` the only active button. Tags outside the bar are refused.
    pub fn select(&mut self, tag: &FilterTag) -> Option<usize> {
        let idx = self.position(tag)?;
        self.active = idx;
        Some(idx)
    }

    pub fn is_active(&self, idx: usize) -> bool {
        self.active == idx
    }
}
