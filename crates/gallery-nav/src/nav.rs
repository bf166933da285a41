use gallery_types::{Direction, ItemId};

/// Moves `current` one step in `direction`, wrapping at both ends.
///
/// Returns `None` only when there is nothing to step through.
pub fn step(current: usize, len: usize, direction: Direction) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let current = current.min(len - 1);
    Some(match direction {
        Direction::Next => (current + 1) % len,
        Direction::Prev if current == 0 => len - 1,
        Direction::Prev => current - 1,
    })
}

/// Ordered subsequence of gallery items that were shown when it was taken.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSet {
    ids: Vec<ItemId>,
}

impl VisibleSet {
    pub fn from_ids(ids: impl IntoIterator<Item = ItemId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<ItemId> {
        self.ids.get(idx).copied()
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.ids.iter().position(|candidate| *candidate == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.position(id).is_some()
    }
}
