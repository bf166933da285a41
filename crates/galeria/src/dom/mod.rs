//! Browser bindings. Reads the page markup, forwards events to the
//! controller and applies the returned effects to the DOM.

mod gallery;
mod media;
mod widgets;

use gallery_config::SiteConfig;
use std::io;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{Document, Event, EventTarget, console};

const CONFIG_ELEMENT: &str = "galeria-config";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    init_logging();

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let config = load_config(&document);

    gallery::bind(&document, &config)?;
    media::bind_video_modal(&document, &config)?;
    media::bind_testimonials(&document)?;
    widgets::bind_reveal(&document, &config)?;
    widgets::bind_countdown(&document, &config)?;
    widgets::bind_contact(&window, &document, &config)?;
    widgets::bind_feed(&document, &config);

    tracing::info!("galeria ready");
    Ok(())
}

fn init_logging() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .without_time()
        .with_writer(ConsoleMakeWriter)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        console::warn_1(&"tracing subscriber already installed".into());
    }
}

/// Settings come from an optional `<script type="application/json">` block,
/// since the browser has no config directory.
fn load_config(document: &Document) -> SiteConfig {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT)
        .and_then(|element| element.text_content())
    else {
        return SiteConfig::default();
    };

    match serde_json::from_str(&raw) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("invalid #{CONFIG_ELEMENT} block, using defaults: {err}");
            SiteConfig::default()
        }
    }
}

pub(crate) fn query_all<T: JsCast>(document: &Document, selector: &str) -> Result<Vec<T>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|idx| nodes.get(idx))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect())
}

/// Adds a listener that lives as long as the page.
pub(crate) fn on(
    target: &EventTarget,
    event: &str,
    handler: impl Fn(Event) + 'static,
) -> Result<(), JsValue> {
    let callback = Closure::<dyn Fn(Event)>::new(handler);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

pub(crate) fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
}

struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and hands it to the console on drop.
struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buf: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = JsValue::from_str(line.trim_end());
        match self.level {
            Level::ERROR => console::error_1(&line),
            Level::WARN => console::warn_1(&line),
            Level::DEBUG | Level::TRACE => console::debug_1(&line),
            _ => console::log_1(&line),
        }
    }
}
