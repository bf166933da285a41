use super::{by_id, on, query_all};
use crate::media::{
    TestimonialEffect, TestimonialMessage, TestimonialPlayer, VideoEffect, VideoMessage,
    VideoModal,
};
use gallery_config::SiteConfig;
use gloo_timers::callback::Timeout;
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{
    Document, Element, HtmlElement, HtmlSourceElement, HtmlVideoElement, KeyboardEvent,
};

fn play(video: &HtmlVideoElement) {
    video.set_muted(false);
    // The returned promise rejects when autoplay is blocked; the controls stay usable
    if let Err(err) = video.play() {
        tracing::warn!("video playback refused: {err:?}");
    }
}

struct VideoDom {
    modal: Element,
    video: Option<HtmlVideoElement>,
    body: HtmlElement,
    generation: Rc<Cell<Option<u64>>>,
}

impl VideoDom {
    fn apply(&self, effects: Vec<VideoEffect>) -> Result<(), JsValue> {
        for effect in effects {
            match effect {
                VideoEffect::OpenModal { generation } => {
                    self.generation.set(Some(generation));
                    self.modal.class_list().add_1("active")?;
                }
                VideoEffect::CloseModal => {
                    self.generation.set(None);
                    self.modal.class_list().remove_1("active")?;
                }
                VideoEffect::LockScroll => self.body.style().set_property("overflow", "hidden")?,
                VideoEffect::UnlockScroll => {
                    self.body.style().remove_property("overflow")?;
                }
                VideoEffect::Play { after, generation } => {
                    let Some(video) = self.video.clone() else {
                        continue;
                    };
                    let current = Rc::clone(&self.generation);
                    let millis = u32::try_from(after.as_millis()).unwrap_or(u32::MAX);
                    Timeout::new(millis, move || {
                        if current.get() == Some(generation) {
                            play(&video);
                        }
                    })
                    .forget();
                }
                VideoEffect::Pause => {
                    if let Some(video) = &self.video {
                        video.pause()?;
                    }
                }
                VideoEffect::Rewind => {
                    if let Some(video) = &self.video {
                        video.set_current_time(0.0);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Wires `#videoModal` to the hero play button.
pub fn bind_video_modal(document: &Document, config: &SiteConfig) -> Result<(), JsValue> {
    let (Some(modal), Some(body)) = (document.get_element_by_id("videoModal"), document.body())
    else {
        return Ok(());
    };

    let video = document
        .query_selector(".video-modal__video")?
        .and_then(|video| video.dyn_into::<HtmlVideoElement>().ok());
    let controller = Rc::new(RefCell::new(VideoModal::new(config)));
    let dom = Rc::new(VideoDom {
        modal,
        video,
        body,
        generation: Rc::new(Cell::new(None)),
    });

    let dispatch = Rc::new(move |message: VideoMessage| {
        let effects = controller.borrow_mut().update(message);
        if let Err(err) = dom.apply(effects) {
            tracing::error!("failed to apply video modal effects: {err:?}");
        }
    });

    let triggers = [
        (".hero__video-btn", VideoMessage::Open),
        (".video-modal__close", VideoMessage::Close),
        (".video-modal__overlay", VideoMessage::Close),
    ];
    for (selector, message) in triggers {
        let Some(target) = document.query_selector(selector)? else {
            continue;
        };
        let dispatch = Rc::clone(&dispatch);
        on(&target, "click", move |_| dispatch(message.clone()))?;
    }

    on(document, "keydown", move |event| {
        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
            dispatch(VideoMessage::Key(event.key()));
        }
    })
}

struct TestimonialDom {
    items: Vec<Element>,
    video: HtmlVideoElement,
    controls: Option<Element>,
    poster: Option<HtmlElement>,
}

impl TestimonialDom {
    fn show_controls(&self, shown: bool) -> Result<(), JsValue> {
        if let Some(controls) = &self.controls {
            controls.class_list().toggle_with_force("hidden", !shown)?;
        }
        if let Some(poster) = &self.poster {
            let display = if shown { "block" } else { "none" };
            poster.style().set_property("display", display)?;
        }
        Ok(())
    }

    fn apply(&self, effects: Vec<TestimonialEffect>) -> Result<(), JsValue> {
        for effect in effects {
            match effect {
                TestimonialEffect::Activate(active) => {
                    for (idx, item) in self.items.iter().enumerate() {
                        item.class_list().toggle_with_force("active", idx == active)?;
                    }
                }
                TestimonialEffect::SetSource(src) => {
                    if let Some(source) = self
                        .video
                        .query_selector("source")?
                        .and_then(|source| source.dyn_into::<HtmlSourceElement>().ok())
                    {
                        source.set_src(&src);
                    }
                    self.video.load();
                }
                TestimonialEffect::ShowControls => self.show_controls(true)?,
                TestimonialEffect::HideControls => self.show_controls(false)?,
                TestimonialEffect::Play => play(&self.video),
                TestimonialEffect::Pause => self.video.pause()?,
            }
        }
        Ok(())
    }
}

/// Wires the testimonials list to `#testimonialVideo`.
pub fn bind_testimonials(document: &Document) -> Result<(), JsValue> {
    let Some(video) = by_id::<HtmlVideoElement>(document, "testimonialVideo") else {
        return Ok(());
    };

    let items: Vec<Element> = query_all(document, ".testimonials__item")?;
    let videos = items
        .iter()
        .map(|item| item.get_attribute("data-video"))
        .collect();
    let controller = Rc::new(RefCell::new(TestimonialPlayer::new(videos)));
    let dom = Rc::new(TestimonialDom {
        items,
        video,
        controls: document.query_selector(".testimonials__video-controls")?,
        poster: by_id(document, "testimonialPoster"),
    });

    let handle = Rc::clone(&dom);
    let dispatch = Rc::new(move |message: TestimonialMessage| {
        let effects = controller.borrow_mut().update(message);
        if let Err(err) = handle.apply(effects) {
            tracing::error!("failed to apply testimonial effects: {err:?}");
        }
    });

    for (idx, item) in dom.items.iter().enumerate() {
        let dispatch = Rc::clone(&dispatch);
        on(item, "click", move |_| dispatch(TestimonialMessage::Select(idx)))?;
    }

    if let Some(button) = document.query_selector(".testimonials__play-btn")? {
        let dispatch = Rc::clone(&dispatch);
        on(&button, "click", move |event| {
            event.stop_propagation();
            dispatch(TestimonialMessage::TogglePlay);
        })?;
    }

    let on_click = Rc::clone(&dispatch);
    on(&dom.video, "click", move |_| on_click(TestimonialMessage::VideoClick))?;
    on(&dom.video, "ended", move |_| dispatch(TestimonialMessage::Ended))
}
