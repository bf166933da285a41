use super::{by_id, query_all};
use crate::page;
use gallery_config::SiteConfig;
use gloo_net::http::Request;
use gloo_timers::callback::{Interval, Timeout};
use shared::{
    contact::ContactRequest,
    feed::{self, FeedError, FeedEvent, FeedState},
    reveal::RevealTracker,
};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window,
};

/// Fades gallery items in the first time they scroll into view.
pub fn bind_reveal(document: &Document, config: &SiteConfig) -> Result<(), JsValue> {
    let items: Vec<HtmlElement> = query_all(document, ".galeria__item")?;
    if items.is_empty() {
        return Ok(());
    }

    let options = page::reveal_options(config);
    let tracker = Rc::new(RefCell::new(RevealTracker::new(items.len(), options)));

    for (idx, item) in items.iter().enumerate() {
        let style = item.style();
        style.set_property("opacity", "0")?;
        style.set_property("transform", "translateY(30px)")?;
        style.set_property(
            "animation-delay",
            &format!("{}ms", tracker.borrow().initial_delay(idx).as_millis()),
        )?;
    }

    let targets = items.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(idx) = targets.iter().position(|item| **item == target) else {
                    continue;
                };

                let ratio = if entry.is_intersecting() {
                    entry.intersection_ratio()
                } else {
                    0.0
                };
                if !tracker.borrow_mut().observe(idx, ratio) {
                    continue;
                }

                if let Err(err) = targets[idx]
                    .style()
                    .set_property("animation", "fadeInUp 0.6s ease forwards")
                {
                    tracing::error!("reveal failed: {err:?}");
                }
                observer.unobserve(&target);
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&format!("0px 0px -{}px 0px", options.bottom_margin));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();

    for item in &items {
        observer.observe(item);
    }
    Ok(())
}

/// Ticks `#days`, `#hours`, `#minutes` and `#seconds` once per second.
pub fn bind_countdown(document: &Document, config: &SiteConfig) -> Result<(), JsValue> {
    let ids = ["days", "hours", "minutes", "seconds"];
    let Some(cells) = ids
        .iter()
        .map(|id| document.get_element_by_id(id))
        .collect::<Option<Vec<Element>>>()
    else {
        return Ok(());
    };

    // getTimezoneOffset is minutes west of UTC for that instant
    let offset_at = |ms: i64| {
        let date = js_sys::Date::new(&JsValue::from_f64(ms as f64));
        -(date.get_timezone_offset() as i32)
    };
    let countdown = match page::countdown(config, offset_at) {
        Ok(countdown) => countdown,
        Err(err) => {
            tracing::warn!("countdown disabled: {err}");
            return Ok(());
        }
    };

    let tick = move || {
        let Some(parts) = countdown.remaining_at(js_sys::Date::now() as i64) else {
            return;
        };
        for (cell, label) in cells.iter().zip(parts.labels()) {
            cell.set_text_content(Some(&label));
        }
    };
    tick();
    Interval::new(1_000, tick).forget();
    Ok(())
}

fn field_value(document: &Document, id: &str) -> String {
    if let Some(input) = by_id::<HtmlInputElement>(document, id) {
        return input.value();
    }
    by_id::<HtmlSelectElement>(document, id)
        .map(|select| select.value())
        .unwrap_or_default()
}

fn read_contact(document: &Document) -> ContactRequest {
    ContactRequest {
        first_name: field_value(document, "nombre"),
        last_name: field_value(document, "apellido"),
        company: field_value(document, "empresa"),
        phone: field_value(document, "telefono"),
        email: field_value(document, "email"),
        program: field_value(document, "programa"),
    }
}

/// Turns `#contactForm` submissions into a WhatsApp chat.
pub fn bind_contact(
    window: &Window,
    document: &Document,
    config: &SiteConfig,
) -> Result<(), JsValue> {
    let Some(form) = by_id::<HtmlFormElement>(document, "contactForm") else {
        return Ok(());
    };

    let user_agent = window.navigator().user_agent().unwrap_or_default();
    let endpoint = page::contact_endpoint(config, &user_agent);
    let number = config.whatsapp_number.clone();

    let window = window.clone();
    let document = document.clone();
    let target = form.clone();
    let callback = Closure::<dyn Fn(Event)>::new(move |event: Event| {
        event.prevent_default();

        let link = match read_contact(&document).into_link(&number, endpoint) {
            Ok(link) => link,
            Err(err) => {
                tracing::warn!("contact form not sent: {err}");
                return;
            }
        };
        if let Err(err) = window.open_with_url_and_target(&link, "_blank") {
            tracing::error!("failed to open WhatsApp: {err:?}");
            return;
        }

        if let Err(err) = confirm_sent(&target) {
            tracing::error!("failed to update submit button: {err:?}");
        }
    });
    form.add_event_listener_with_callback("submit", callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Flashes the submit button, then restores it and clears the form.
fn confirm_sent(form: &HtmlFormElement) -> Result<(), JsValue> {
    let Some(button) = form
        .query_selector(".contact__submit")?
        .and_then(|button| button.dyn_into::<HtmlElement>().ok())
    else {
        form.reset();
        return Ok(());
    };
    let label = button.query_selector(".contact__submit-text")?;
    let original = label.as_ref().and_then(|label| label.text_content());

    if let Some(label) = &label {
        label.set_text_content(Some(page::SENT_LABEL));
    }
    button.style().set_property("background", page::SENT_COLOR)?;

    let form = form.clone();
    Timeout::new(3_000, move || {
        if let Some(label) = &label {
            label.set_text_content(original.as_deref());
        }
        if let Err(err) = button.style().remove_property("background") {
            tracing::error!("failed to reset submit button: {err:?}");
        }
        form.reset();
    })
    .forget();
    Ok(())
}

async fn fetch_feed(url: &str, config: &SiteConfig) -> FeedState {
    let failed = |msg: String| FeedEvent::Failed(msg).into_state();

    let response = match Request::get(url).send().await {
        Ok(response) => response,
        Err(err) => return failed(err.to_string()),
    };
    if !response.ok() {
        return failed(FeedError::Status(response.status()).to_string());
    }

    match response.text().await {
        Ok(body) => {
            feed::load_from_body(&body, &config.feed_fallback_image, config.words_per_minute)
        }
        Err(err) => failed(err.to_string()),
    }
}

/// Fills `#blogGrid` from the WordPress feed.
pub fn bind_feed(document: &Document, config: &SiteConfig) {
    let Some(grid) = document.get_element_by_id("blogGrid") else {
        return;
    };

    let config = config.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let state = fetch_feed(&config.feed_url, &config).await;
        tracing::info!("blog feed: {state}");
        if let Some(html) = page::blog_html(&state) {
            grid.set_inner_html(&html);
        }
    });
}
