use gallery_types::{FilterTag, ImageRef, ItemId};
use std::time::Duration;

pub use crate::key_binds::KeyAction;

/// Where a click on the lightbox overlay landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The overlay element itself
    Backdrop,
    /// Anything inside it (the image, the controls) that bubbled up
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Filter(FilterTag),
    Lightbox(LightboxMessage),
    /// A `KeyboardEvent.key` value from the document
    Key(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxMessage {
    Open(ItemId),
    Prev,
    Next,
    Close,
    OverlayClick(ClickTarget),
}

/// Instruction for the view layer. The controller never touches the page itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Mark the buttons carrying this tag active and every other one inactive
    ActivateFilter(FilterTag),
    ShowItem {
        id: ItemId,
        delay: Duration,
    },
    HideItem {
        id: ItemId,
    },
    /// Put `image` in the modal and make the modal visible. `generation`
    /// identifies this opening until the modal closes.
    OpenModal {
        image: ImageRef,
        generation: u64,
    },
    CloseModal,
    LockScroll,
    UnlockScroll,
    /// Drop the modal image to opacity 0
    FadeOut,
    /// After `after`, set the modal image to `image` and restore opacity.
    /// Dropped if the modal is no longer on the same `generation` by then.
    SwapImage {
        image: ImageRef,
        after: Duration,
        generation: u64,
    },
}
