use crate::message::Effect;
use gallery_types::{FilterTag, ImageRef, ItemId};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemView {
    pub shown: bool,
    /// Entrance delay of the last show
    pub delay: Duration,
}

/// In-memory page that applies [`Effect`]s the way the browser adapter does,
/// with a virtual clock standing in for `setTimeout`.
#[derive(Debug, Clone)]
pub struct HeadlessView {
    now: Duration,
    next_seq: u64,
    pending: Vec<PendingSwap>,
    /// Generation of the modal currently open, if any
    generation: Option<u64>,
    pub items: Vec<ItemView>,
    /// `data-filter` value of each button, in page order
    pub buttons: Vec<FilterTag>,
    pub active_buttons: Vec<bool>,
    pub active_filter: FilterTag,
    pub modal_open: bool,
    pub scroll_locked: bool,
    pub image: Option<ImageRef>,
    pub opacity: f32,
    /// Every swap applied so far, oldest first
    pub swap_log: Vec<ImageRef>,
}

#[derive(Debug, Clone)]
struct PendingSwap {
    due: Duration,
    seq: u64,
    generation: u64,
    image: ImageRef,
}

impl HeadlessView {
    pub fn new(item_count: usize) -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: Vec::new(),
            generation: None,
            items: vec![
                ItemView {
                    shown: true,
                    delay: Duration::ZERO,
                };
                item_count
            ],
            buttons: Vec::new(),
            active_buttons: Vec::new(),
            active_filter: FilterTag::All,
            modal_open: false,
            scroll_locked: false,
            image: None,
            opacity: 1.0,
            swap_log: Vec::new(),
        }
    }

    /// Adds filter buttons as they appear in the markup. The "all" button, if
    /// present, starts active.
    pub fn with_buttons(mut self, buttons: Vec<FilterTag>) -> Self {
        self.active_buttons = buttons.iter().map(FilterTag::is_all).collect();
        self.buttons = buttons;
        self
    }

    pub fn pending_swaps(&self) -> usize {
        self.pending.len()
    }

    pub fn is_shown(&self, id: ItemId) -> bool {
        self.items.get(id.index()).is_some_and(|item| item.shown)
    }

    pub fn apply(&mut self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            match effect {
                Effect::ActivateFilter(tag) => {
                    self.active_buttons =
                        self.buttons.iter().map(|button| *button == tag).collect();
                    self.active_filter = tag;
                }
                Effect::ShowItem { id, delay } => {
                    if let Some(item) = self.items.get_mut(id.index()) {
                        item.shown = true;
                        item.delay = delay;
                    }
                }
                Effect::HideItem { id } => {
                    if let Some(item) = self.items.get_mut(id.index()) {
                        item.shown = false;
                    }
                }
                Effect::OpenModal { image, generation } => {
                    self.image = Some(image);
                    self.opacity = 1.0;
                    self.modal_open = true;
                    self.generation = Some(generation);
                }
                Effect::CloseModal => {
                    self.modal_open = false;
                    self.generation = None;
                }
                Effect::LockScroll => self.scroll_locked = true,
                Effect::UnlockScroll => self.scroll_locked = false,
                Effect::FadeOut => self.opacity = 0.0,
                Effect::SwapImage {
                    image,
                    after,
                    generation,
                } => {
                    self.pending.push(PendingSwap {
                        due: self.now + after,
                        seq: self.next_seq,
                        generation,
                        image,
                    });
                    self.next_seq += 1;
                }
            }
        }
    }

    /// Moves the clock forward, firing due swaps in schedule order. Swaps from
    /// an earlier opening of the modal are discarded.
    pub fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;

        let now = self.now;
        let (mut due, later): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|swap| swap.due <= now);
        self.pending = later;

        due.sort_by_key(|swap| (swap.due, swap.seq));
        for swap in due {
            if self.generation != Some(swap.generation) {
                continue;
            }
            self.image = Some(swap.image.clone());
            self.opacity = 1.0;
            self.swap_log.push(swap.image);
        }
    }
}
