#[cfg(test)]
mod tests {
    use galeria::{
        ClickTarget, Effect, GalleryLightboxController, LightboxMessage, Message, view::HeadlessView,
    };
    use gallery_config::SiteConfig;
    use gallery_types::{Direction, FilterTag, GalleryItem, ImageRef, ItemId};
    use std::time::Duration;

    const FADE: Duration = Duration::from_millis(200);

    fn item(category: &str, name: &str) -> GalleryItem {
        GalleryItem::new(category, ImageRef::new(format!("/img/{name}.jpg"), name))
    }

    /// A B C D E, where B and D are portraits
    fn site() -> (GalleryLightboxController, HeadlessView) {
        let items = vec![
            item("events", "A"),
            item("portraits", "B"),
            item("events", "C"),
            item("portraits", "D"),
            item("team", "E"),
        ];
        let view = HeadlessView::new(items.len());
        let ctrl = GalleryLightboxController::from_items(items, &SiteConfig::default());
        (ctrl, view)
    }

    fn three() -> (GalleryLightboxController, HeadlessView) {
        let items = vec![item("x", "A"), item("x", "B"), item("x", "C")];
        let view = HeadlessView::new(items.len());
        let ctrl = GalleryLightboxController::from_items(items, &SiteConfig::default());
        (ctrl, view)
    }

    fn shown_alt(view: &HeadlessView) -> Option<&str> {
        view.image.as_ref().map(|image| image.alt.as_str())
    }

    #[test]
    fn test_filter_shows_only_matching_for_every_tag() {
        let (mut ctrl, mut view) = site();
        let tags = ctrl.filters().tags().to_vec();

        for tag in tags {
            view.apply(ctrl.update(Message::Filter(tag.clone())));

            for (idx, item) in ctrl.gallery().items().iter().enumerate() {
                let expected = tag.is_all() || tag.matches(&item.category);
                assert_eq!(view.is_shown(ItemId(idx)), expected, "tag {tag} item {idx}");
            }
            assert_eq!(view.active_filter, tag);
        }
    }

    #[test]
    fn test_open_points_at_item_for_any_visible_item() {
        let (mut ctrl, _) = site();
        ctrl.apply_filter(&FilterTag::category("events"));

        let visible = ctrl.gallery().visible_set();
        for id in visible.ids().to_vec() {
            ctrl.open(id);
            let idx = ctrl.current_index().unwrap();
            assert_eq!(visible.get(idx), Some(id));
            ctrl.close();
        }
    }

    #[test]
    fn test_wraparound_scenario() {
        let (mut ctrl, mut view) = three();

        view.apply(ctrl.open(ItemId(1)));
        assert_eq!(ctrl.current_index(), Some(1));
        assert_eq!(shown_alt(&view), Some("B"));

        view.apply(ctrl.navigate(Direction::Next));
        assert_eq!(ctrl.current_index(), Some(2));
        view.advance(FADE);
        assert_eq!(shown_alt(&view), Some("C"));

        view.apply(ctrl.navigate(Direction::Next));
        assert_eq!(ctrl.current_index(), Some(0));
        view.advance(FADE);
        assert_eq!(shown_alt(&view), Some("A"));

        view.apply(ctrl.navigate(Direction::Prev));
        assert_eq!(ctrl.current_index(), Some(2));
        view.advance(FADE);
        assert_eq!(shown_alt(&view), Some("C"));
    }

    #[test]
    fn test_portraits_scenario() {
        let (mut ctrl, mut view) = site();
        view.apply(ctrl.update(Message::Filter(FilterTag::category("portraits"))));

        view.apply(ctrl.update(Message::Lightbox(LightboxMessage::Open(ItemId(3)))));

        let session = ctrl.session().unwrap();
        assert_eq!(session.visible().ids(), &[ItemId(1), ItemId(3)]);
        assert_eq!(session.current_index(), 1);
        assert_eq!(shown_alt(&view), Some("D"));
    }

    #[test]
    fn test_next_then_prev_is_identity() {
        for start in 0..3 {
            let (mut ctrl, _) = three();
            ctrl.open(ItemId(start));
            ctrl.navigate(Direction::Next);
            ctrl.navigate(Direction::Prev);
            assert_eq!(ctrl.current_index(), Some(start));
        }

        let items = vec![item("solo", "only")];
        let mut ctrl = GalleryLightboxController::from_items(items, &SiteConfig::default());
        ctrl.open(ItemId(0));
        ctrl.navigate(Direction::Next);
        ctrl.navigate(Direction::Prev);
        assert_eq!(ctrl.current_index(), Some(0));
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let (mut ctrl, _) = site();
        ctrl.open(ItemId(2));
        let start = ctrl.current_index();
        let len = ctrl.session().unwrap().visible().len();

        for _ in 0..len {
            ctrl.navigate(Direction::Next);
        }
        assert_eq!(ctrl.current_index(), start);
    }

    #[test]
    fn test_close_is_idempotent() {
        let (mut ctrl, mut view) = three();
        view.apply(ctrl.open(ItemId(0)));
        assert!(view.modal_open && view.scroll_locked);

        view.apply(ctrl.close());
        let once = (ctrl.is_open(), view.modal_open, view.scroll_locked);

        let second = ctrl.close();
        assert!(second.is_empty());
        view.apply(second);
        assert_eq!((ctrl.is_open(), view.modal_open, view.scroll_locked), once);
        assert_eq!(once, (false, false, false));
    }

    #[test]
    fn test_overlay_click_target_decides_close() {
        let (mut ctrl, mut view) = three();
        view.apply(ctrl.open(ItemId(0)));

        view.apply(ctrl.update(Message::Lightbox(LightboxMessage::OverlayClick(
            ClickTarget::Content,
        ))));
        assert!(ctrl.is_open());
        assert!(view.modal_open);

        view.apply(ctrl.update(Message::Lightbox(LightboxMessage::OverlayClick(
            ClickTarget::Backdrop,
        ))));
        assert!(!ctrl.is_open());
        assert!(!view.modal_open);
        assert!(!view.scroll_locked);
    }

    #[test]
    fn test_rapid_navigation_uses_committed_index() {
        let (mut ctrl, mut view) = three();
        view.apply(ctrl.open(ItemId(0)));

        view.apply(ctrl.navigate(Direction::Next));
        assert_eq!(view.opacity, 0.0);
        view.advance(Duration::from_millis(50));
        view.apply(ctrl.navigate(Direction::Next));

        assert_eq!(ctrl.current_index(), Some(2));
        assert_eq!(view.pending_swaps(), 2);

        view.advance(FADE);
        assert_eq!(view.pending_swaps(), 0);
        assert_eq!(shown_alt(&view), Some("C"));
        assert_eq!(view.opacity, 1.0);
        let log: Vec<_> = view.swap_log.iter().map(|image| image.alt.as_str()).collect();
        assert_eq!(log, vec!["B", "C"]);
    }

    #[test]
    fn test_swap_from_closed_session_does_not_reach_reopened_modal() {
        let (mut ctrl, mut view) = three();

        view.apply(ctrl.open(ItemId(0)));
        view.apply(ctrl.navigate(Direction::Next));
        view.apply(ctrl.close());
        view.advance(Duration::from_millis(50));
        view.apply(ctrl.open(ItemId(2)));
        view.advance(FADE);

        assert_eq!(ctrl.current_item().unwrap().image.alt, "C");
        assert_eq!(shown_alt(&view), Some("C"));
        assert_eq!(view.pending_swaps(), 0);
        assert!(view.swap_log.is_empty());

        // Swaps issued within the new opening still apply
        view.apply(ctrl.navigate(Direction::Next));
        view.advance(FADE);
        assert_eq!(shown_alt(&view), Some("A"));
    }

    #[test]
    fn test_active_button_follows_tag_not_bar_position() {
        let items = vec![item("a", "A"), item("b", "B")];
        let buttons = vec![FilterTag::category("a"), FilterTag::category("b")];
        let mut ctrl =
            GalleryLightboxController::new(items, buttons.clone(), &SiteConfig::default());
        let mut view = HeadlessView::new(2).with_buttons(buttons);
        assert_eq!(view.active_buttons, vec![false, false]);

        view.apply(ctrl.apply_filter(&FilterTag::category("b")));
        assert_eq!(view.active_buttons, vec![false, true]);

        view.apply(ctrl.apply_filter(&FilterTag::category("a")));
        assert_eq!(view.active_buttons, vec![true, false]);
    }

    #[test]
    fn test_duplicate_buttons_light_up_together() {
        let items = vec![item("a", "A"), item("b", "B")];
        let buttons = vec![
            FilterTag::All,
            FilterTag::category("b"),
            FilterTag::category("a"),
            FilterTag::category("b"),
        ];
        let mut ctrl =
            GalleryLightboxController::new(items, buttons.clone(), &SiteConfig::default());
        let mut view = HeadlessView::new(2).with_buttons(buttons);
        assert_eq!(view.active_buttons, vec![true, false, false, false]);

        view.apply(ctrl.apply_filter(&FilterTag::category("b")));
        assert_eq!(view.active_buttons, vec![false, true, false, true]);
        assert!(!view.is_shown(ItemId(0)));
        assert!(view.is_shown(ItemId(1)));
    }

    #[test]
    fn test_session_keeps_snapshot_until_reopened() {
        let (mut ctrl, _) = site();
        ctrl.open(ItemId(0));
        assert_eq!(ctrl.session().unwrap().visible().len(), 5);

        // Filter buttons sit under the overlay, but the controller still accepts it
        ctrl.apply_filter(&FilterTag::category("portraits"));
        assert_eq!(ctrl.session().unwrap().visible().len(), 5);
        assert_eq!(ctrl.navigate(Direction::Next).len(), 2);
        assert_eq!(ctrl.current_item().unwrap().image.alt, "B");

        ctrl.close();
        ctrl.open(ItemId(3));
        assert_eq!(ctrl.session().unwrap().visible().len(), 2);
    }

    #[test]
    fn test_stale_click_after_filter_is_rejected() {
        let (mut ctrl, mut view) = site();
        view.apply(ctrl.apply_filter(&FilterTag::category("team")));

        let effects = ctrl.update(Message::Lightbox(LightboxMessage::Open(ItemId(1))));
        assert!(effects.is_empty());
        assert!(!ctrl.is_open());
        view.apply(effects);
        assert!(!view.modal_open);
        assert!(!view.scroll_locked);
    }

    #[test]
    fn test_keyboard_drives_open_session_only() {
        let (mut ctrl, mut view) = three();
        view.apply(ctrl.update(Message::Key("ArrowLeft".into())));
        assert!(!ctrl.is_open());
        assert_eq!(view.pending_swaps(), 0);

        view.apply(ctrl.open(ItemId(0)));
        view.apply(ctrl.update(Message::Key("ArrowLeft".into())));
        assert_eq!(ctrl.current_index(), Some(2));

        view.apply(ctrl.update(Message::Key("Escape".into())));
        assert!(!ctrl.is_open());
        assert!(!view.modal_open);

        assert_eq!(
            ctrl.update(Message::Key("Escape".into())),
            Vec::<Effect>::new()
        );
    }

    #[test]
    fn test_staggered_entrance_uses_full_position() {
        let (mut ctrl, mut view) = site();
        view.apply(ctrl.apply_filter(&FilterTag::category("portraits")));

        assert_eq!(view.items[1].delay, Duration::from_millis(50));
        assert_eq!(view.items[3].delay, Duration::from_millis(150));
    }
}
