use crate::{
    key_binds::{KeyAction, init_key_binds},
    message::{ClickTarget, Effect, LightboxMessage, Message},
    session::LightboxSession,
};
use gallery_config::SiteConfig;
use gallery_nav::{FilterBar, Gallery, ItemChange};
use gallery_types::{Direction, FilterTag, GalleryItem, ItemId};
use std::{collections::HashMap, time::Duration};

/// Owns the filter, the item grid state and the lightbox session, and turns
/// page events into [`Effect`]s.
///
/// The visible set is derived from the grid every time the lightbox opens and
/// is never cached between sessions, so a filter change can't leave a stale
/// index behind.
#[derive(Debug, Clone)]
pub struct GalleryLightboxController {
    gallery: Gallery,
    filters: FilterBar,
    session: Option<LightboxSession>,
    key_binds: HashMap<&'static str, KeyAction>,
    /// Bumped on every open
    generation: u64,
    stagger: Duration,
    fade_delay: Duration,
}

impl GalleryLightboxController {
    pub fn new(items: Vec<GalleryItem>, filter_tags: Vec<FilterTag>, config: &SiteConfig) -> Self {
        Self {
            gallery: Gallery::new(items),
            filters: FilterBar::new(filter_tags),
            session: None,
            key_binds: init_key_binds(),
            generation: 0,
            stagger: config.stagger_step(),
            fade_delay: config.fade_delay(),
        }
    }

    /// One filter button per category found in `items`.
    pub fn from_items(items: Vec<GalleryItem>, config: &SiteConfig) -> Self {
        let tags = FilterBar::from_items(&items).tags().to_vec();
        Self::new(items, tags, config)
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn filters(&self) -> &FilterBar {
        &self.filters
    }

    pub fn session(&self) -> Option<&LightboxSession> {
        self.session.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.session.as_ref().map(LightboxSession::current_index)
    }

    pub fn current_item(&self) -> Option<&GalleryItem> {
        self.session
            .as_ref()
            .and_then(|session| self.gallery.get(session.current_id()))
    }

    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::Filter(tag) => self.apply_filter(&tag),
            Message::Lightbox(lightbox_msg) => match lightbox_msg {
                LightboxMessage::Open(id) => self.open(id),
                LightboxMessage::Prev => self.navigate(Direction::Prev),
                LightboxMessage::Next => self.navigate(Direction::Next),
                LightboxMessage::Close => self.close(),
                LightboxMessage::OverlayClick(target) => self.overlay_click(target),
            },
            Message::Key(key) => self.handle_key(&key),
        }
    }

    /// Activates `tag` and re-evaluates every item. Tags that have no button
    /// are ignored.
    pub fn apply_filter(&mut self, tag: &FilterTag) -> Vec<Effect> {
        if self.filters.select(tag).is_none() {
            tracing::warn!("ignoring unknown filter tag {tag}");
            return Vec::new();
        }

        let changes = self.gallery.apply_filter(tag, self.stagger);
        tracing::debug!(
            "filter {tag}: {} of {} items shown",
            self.gallery.visible_set().len(),
            self.gallery.total()
        );

        let mut effects = Vec::with_capacity(changes.len() + 1);
        effects.push(Effect::ActivateFilter(tag.clone()));
        effects.extend(changes.into_iter().map(|change| match change {
            ItemChange::Show { id, delay } => Effect::ShowItem { id, delay },
            ItemChange::Hide { id } => Effect::HideItem { id },
        }));
        effects
    }

    /// Opens the lightbox on `id`.
    ///
    /// The item must be in the visible set derived right now. A hidden item or
    /// an unknown id (a click that raced a filter change) is rejected: nothing
    /// changes and no effects are returned.
    pub fn open(&mut self, id: ItemId) -> Vec<Effect> {
        let visible = self.gallery.visible_set();
        let Some(session) = LightboxSession::begin(visible, id) else {
            tracing::debug!("refusing to open {id}: not in the visible set");
            return Vec::new();
        };
        let Some(item) = self.gallery.get(id) else {
            return Vec::new();
        };

        let image = item.image.clone();
        tracing::debug!(
            "lightbox open on {id} ({} of {})",
            session.current_index() + 1,
            session.visible().len()
        );
        self.session = Some(session);
        self.generation = self.generation.wrapping_add(1);

        vec![
            Effect::OpenModal {
                image,
                generation: self.generation,
            },
            Effect::LockScroll,
        ]
    }

    /// Steps the open session with wraparound.
    ///
    /// The index is committed before returning; the image swap is deferred by
    /// the fade delay and never cancelled, so back-to-back calls always start
    /// from the latest index and the last swap applied is the latest item.
    /// Swaps carry the session generation so a view can drop ones that land
    /// after the modal was closed or reopened.
    pub fn navigate(&mut self, direction: Direction) -> Vec<Effect> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };

        let id = session.navigate(direction);
        let Some(item) = self.gallery.get(id) else {
            return Vec::new();
        };

        vec![
            Effect::FadeOut,
            Effect::SwapImage {
                image: item.image.clone(),
                after: self.fade_delay,
                generation: self.generation,
            },
        ]
    }

    /// Hides the modal and releases the page scroll. No-op when closed.
    pub fn close(&mut self) -> Vec<Effect> {
        if self.session.take().is_none() {
            return Vec::new();
        }

        tracing::debug!("lightbox closed");
        vec![Effect::CloseModal, Effect::UnlockScroll]
    }

    /// Only a click on the overlay itself closes; clicks bubbling from its
    /// content do not.
    pub fn overlay_click(&mut self, target: ClickTarget) -> Vec<Effect> {
        match target {
            ClickTarget::Backdrop => self.close(),
            ClickTarget::Content => Vec::new(),
        }
    }

    /// Global key handler. Ignored unless the lightbox is open.
    pub fn handle_key(&mut self, key: &str) -> Vec<Effect> {
        if !self.is_open() {
            return Vec::new();
        }

        match self.key_binds.get(key).copied() {
            Some(action) => self.update(action.message()),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_types::ImageRef;

    fn item(category: &str, name: &str) -> GalleryItem {
        GalleryItem::new(
            category,
            ImageRef::new(format!("{name}.jpg"), format!("{name} alt")),
        )
    }

    fn controller(categories: &[(&str, &str)]) -> GalleryLightboxController {
        GalleryLightboxController::from_items(
            categories.iter().map(|(cat, name)| item(cat, name)).collect(),
            &SiteConfig::default(),
        )
    }

    #[test]
    fn test_open_effects() {
        let mut ctrl = controller(&[("x", "a"), ("x", "b")]);
        let effects = ctrl.open(ItemId(1));

        assert_eq!(
            effects,
            vec![
                Effect::OpenModal {
                    image: ImageRef::new("b.jpg", "b alt"),
                    generation: 1,
                },
                Effect::LockScroll
            ]
        );
        assert_eq!(ctrl.current_index(), Some(1));
    }

    #[test]
    fn test_open_hidden_item_is_rejected() {
        let mut ctrl = controller(&[("x", "a"), ("y", "b")]);
        ctrl.apply_filter(&FilterTag::category("x"));

        assert!(ctrl.open(ItemId(1)).is_empty());
        assert!(!ctrl.is_open());
        assert!(ctrl.open(ItemId(99)).is_empty());
        assert!(!ctrl.is_open());
    }

    #[test]
    fn test_navigate_effects_carry_fade_delay() {
        let mut ctrl = controller(&[("x", "a"), ("x", "b")]);
        ctrl.open(ItemId(0));

        assert_eq!(
            ctrl.navigate(Direction::Next),
            vec![
                Effect::FadeOut,
                Effect::SwapImage {
                    image: ImageRef::new("b.jpg", "b alt"),
                    after: Duration::from_millis(200),
                    generation: 1,
                }
            ]
        );
    }

    #[test]
    fn test_navigate_when_closed_does_nothing() {
        let mut ctrl = controller(&[("x", "a")]);
        assert!(ctrl.navigate(Direction::Next).is_empty());
        assert_eq!(ctrl.current_index(), None);
    }

    #[test]
    fn test_filter_effects_lead_with_active_button() {
        let mut ctrl = controller(&[("x", "a"), ("y", "b")]);
        let effects = ctrl.apply_filter(&FilterTag::category("y"));

        assert_eq!(effects[0], Effect::ActivateFilter(FilterTag::category("y")));
        assert_eq!(effects[1], Effect::HideItem { id: ItemId(0) });
        assert_eq!(
            effects[2],
            Effect::ShowItem {
                id: ItemId(1),
                delay: Duration::from_millis(50)
            }
        );
    }

    #[test]
    fn test_filter_effect_names_tag_without_all_button() {
        let items = vec![item("a", "x"), item("b", "y")];
        let tags = vec![FilterTag::category("a"), FilterTag::category("b")];
        let mut ctrl = GalleryLightboxController::new(items, tags, &SiteConfig::default());

        let effects = ctrl.apply_filter(&FilterTag::category("b"));
        assert_eq!(effects[0], Effect::ActivateFilter(FilterTag::category("b")));
    }

    #[test]
    fn test_each_open_gets_a_new_generation() {
        let mut ctrl = controller(&[("x", "a"), ("x", "b")]);
        let generation = |effects: &[Effect]| match effects.first() {
            Some(Effect::OpenModal { generation, .. }) => *generation,
            other => panic!("expected OpenModal, got {other:?}"),
        };

        let first = generation(&ctrl.open(ItemId(0)));
        ctrl.close();
        let second = generation(&ctrl.open(ItemId(1)));
        assert_ne!(first, second);

        match ctrl.navigate(Direction::Next).as_slice() {
            [Effect::FadeOut, Effect::SwapImage { generation, .. }] => {
                assert_eq!(*generation, second)
            }
            other => panic!("unexpected effects {other:?}"),
        }
    }

    #[test]
    fn test_unknown_filter_changes_nothing() {
        let mut ctrl = controller(&[("x", "a"), ("y", "b")]);
        assert!(ctrl.apply_filter(&FilterTag::category("nope")).is_empty());
        assert_eq!(ctrl.filters().active_tag(), &FilterTag::All);
        assert_eq!(ctrl.gallery().visible_set().len(), 2);
    }

    #[test]
    fn test_keys_ignored_while_closed() {
        let mut ctrl = controller(&[("x", "a"), ("x", "b")]);
        assert!(ctrl.handle_key("ArrowRight").is_empty());
        assert!(ctrl.handle_key("Escape").is_empty());

        ctrl.open(ItemId(0));
        assert!(ctrl.handle_key("Enter").is_empty());
        assert_eq!(ctrl.handle_key("ArrowRight").len(), 2);
        assert_eq!(ctrl.current_index(), Some(1));
        assert_eq!(
            ctrl.handle_key("Escape"),
            vec![Effect::CloseModal, Effect::UnlockScroll]
        );
    }
}
