use gallery_nav::{VisibleSet, step};
use gallery_types::{Direction, ItemId};

/// State of an open lightbox: the visible set captured when it opened and the
/// position being shown. `current < visible.len()` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxSession {
    visible: VisibleSet,
    current: usize,
}

impl LightboxSession {
    /// Starts a session on `id`. Refuses items that are not in `visible`.
    pub fn begin(visible: VisibleSet, id: ItemId) -> Option<Self> {
        let current = visible.position(id)?;
        Some(Self { visible, current })
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_id(&self) -> ItemId {
        // begin() and navigate() keep `current` in bounds
        self.visible.ids()[self.current]
    }

    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    /// Commits the wrapped index and returns the item now on display.
    pub fn navigate(&mut self, direction: Direction) -> ItemId {
        if let Some(next) = step(self.current, self.visible.len(), direction) {
            self.current = next;
        }
        self.current_id()
    }
}
