use super::{by_id, on, query_all};
use crate::{ClickTarget, Effect, GalleryLightboxController, LightboxMessage, Message};
use gallery_config::SiteConfig;
use gallery_types::{FilterTag, GalleryItem, ImageRef, ItemId};
use gloo_timers::callback::Timeout;
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlImageElement, KeyboardEvent,
};

/// Elements the effects are applied to
struct GalleryDom {
    buttons: Vec<Element>,
    items: Vec<HtmlElement>,
    lightbox: Element,
    image: HtmlImageElement,
    body: HtmlElement,
    /// Generation of the open modal, shared with pending swap timers
    generation: Rc<Cell<Option<u64>>>,
}

impl GalleryDom {
    fn apply(&self, effects: Vec<Effect>) -> Result<(), JsValue> {
        for effect in effects {
            match effect {
                Effect::ActivateFilter(active) => {
                    for button in &self.buttons {
                        button
                            .class_list()
                            .toggle_with_force("active", filter_tag(button) == active)?;
                    }
                }
                Effect::ShowItem { id, delay } => {
                    if let Some(item) = self.items.get(id.index()) {
                        item.class_list().remove_1("hidden")?;
                        item.style().set_property(
                            "animation",
                            &format!("fadeInUp 0.5s ease {}ms forwards", delay.as_millis()),
                        )?;
                    }
                }
                Effect::HideItem { id } => {
                    if let Some(item) = self.items.get(id.index()) {
                        item.class_list().add_1("hidden")?;
                    }
                }
                Effect::OpenModal { image, generation } => {
                    self.generation.set(Some(generation));
                    show_image(&self.image, &image)?;
                    self.lightbox.class_list().add_1("active")?;
                }
                Effect::CloseModal => {
                    self.generation.set(None);
                    self.lightbox.class_list().remove_1("active")?;
                }
                Effect::LockScroll => self.body.style().set_property("overflow", "hidden")?,
                Effect::UnlockScroll => {
                    self.body.style().remove_property("overflow")?;
                }
                Effect::FadeOut => self.image.style().set_property("opacity", "0")?,
                Effect::SwapImage {
                    image,
                    after,
                    generation,
                } => {
                    let target = self.image.clone();
                    let current = Rc::clone(&self.generation);
                    let millis = u32::try_from(after.as_millis()).unwrap_or(u32::MAX);
                    Timeout::new(millis, move || {
                        if current.get() != Some(generation) {
                            return;
                        }
                        if let Err(err) = show_image(&target, &image) {
                            tracing::error!("image swap failed: {err:?}");
                        }
                    })
                    .forget();
                }
            }
        }
        Ok(())
    }
}

fn show_image(target: &HtmlImageElement, image: &ImageRef) -> Result<(), JsValue> {
    target.set_src(&image.src);
    target.set_alt(&image.alt);
    target.style().set_property("opacity", "1")
}

#[derive(Clone)]
struct Dispatcher {
    controller: Rc<RefCell<GalleryLightboxController>>,
    dom: Rc<GalleryDom>,
}

impl Dispatcher {
    fn dispatch(&self, message: Message) {
        let effects = self.controller.borrow_mut().update(message);
        if let Err(err) = self.dom.apply(effects) {
            tracing::error!("failed to apply gallery effects: {err:?}");
        }
    }

    fn listen(
        &self,
        target: &EventTarget,
        event: &str,
        handler: impl Fn(&Event) -> Option<Message> + 'static,
    ) -> Result<(), JsValue> {
        let dispatcher = self.clone();
        on(target, event, move |event| {
            if let Some(message) = handler(&event) {
                dispatcher.dispatch(message);
            }
        })
    }
}

fn filter_tag(button: &Element) -> FilterTag {
    FilterTag::parse(&button.get_attribute("data-filter").unwrap_or_default())
}

fn read_item(element: &HtmlElement) -> Result<GalleryItem, JsValue> {
    let category = element.get_attribute("data-category").unwrap_or_default();
    let image = match element
        .query_selector("img")?
        .and_then(|img| img.dyn_into::<HtmlImageElement>().ok())
    {
        Some(img) => ImageRef::new(img.src(), img.alt()),
        None => {
            tracing::warn!("gallery item without an image");
            ImageRef::default()
        }
    };
    Ok(GalleryItem::new(category, image))
}

/// Wires the filter bar, the grid and the lightbox. Pages without a gallery
/// are left alone.
pub fn bind(document: &Document, config: &SiteConfig) -> Result<(), JsValue> {
    let items: Vec<HtmlElement> = query_all(document, ".galeria__item")?;
    let (Some(lightbox), Some(image), Some(body)) = (
        document.get_element_by_id("lightbox"),
        by_id::<HtmlImageElement>(document, "lightboxImage"),
        document.body(),
    ) else {
        tracing::debug!("no gallery lightbox on this page");
        return Ok(());
    };

    let buttons: Vec<Element> = query_all(document, ".galeria__filter")?;
    let tags = buttons
        .iter()
        .map(filter_tag)
        .collect();
    let gallery_items = items
        .iter()
        .map(read_item)
        .collect::<Result<Vec<_>, _>>()?;
    tracing::info!(
        "gallery: {} items, {} filters",
        gallery_items.len(),
        buttons.len()
    );

    let dispatcher = Dispatcher {
        controller: Rc::new(RefCell::new(GalleryLightboxController::new(
            gallery_items,
            tags,
            config,
        ))),
        dom: Rc::new(GalleryDom {
            buttons,
            items,
            lightbox,
            image,
            body,
            generation: Rc::new(Cell::new(None)),
        }),
    };

    for button in &dispatcher.dom.buttons {
        let tag = filter_tag(button);
        dispatcher.listen(button, "click", move |_| Some(Message::Filter(tag.clone())))?;
    }

    for (idx, item) in dispatcher.dom.items.iter().enumerate() {
        dispatcher.listen(item, "click", move |_| {
            Some(Message::Lightbox(LightboxMessage::Open(ItemId(idx))))
        })?;
    }

    let controls = [
        (".lightbox__close", LightboxMessage::Close),
        (".lightbox__prev", LightboxMessage::Prev),
        (".lightbox__next", LightboxMessage::Next),
    ];
    for (selector, message) in controls {
        let Some(control) = document.query_selector(selector)? else {
            continue;
        };
        dispatcher.listen(&control, "click", move |event| {
            // Keep the click from reaching the overlay handler
            event.stop_propagation();
            Some(Message::Lightbox(message))
        })?;
    }

    dispatcher.listen(&dispatcher.dom.lightbox, "click", |event| {
        let target = if event.target() == event.current_target() {
            ClickTarget::Backdrop
        } else {
            ClickTarget::Content
        };
        Some(Message::Lightbox(LightboxMessage::OverlayClick(target)))
    })?;

    dispatcher.listen(document, "keydown", |event| {
        let key = event.dyn_ref::<KeyboardEvent>()?.key();
        Some(Message::Key(key))
    })
}
