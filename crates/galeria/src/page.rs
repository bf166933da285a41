//! Config-driven setup for the page widgets around the gallery.

use gallery_config::{LinkTarget, SiteConfig};
use shared::{
    contact::Endpoint,
    countdown::{Countdown, CountdownError},
    feed::{ERROR_HINT, FeedState, PostCard},
    reveal::RevealOptions,
};

pub const SENT_LABEL: &str = "¡Enviado!";
pub const SENT_COLOR: &str = "#10B981";

pub fn reveal_options(config: &SiteConfig) -> RevealOptions {
    RevealOptions {
        threshold: config.reveal_threshold,
        bottom_margin: config.reveal_bottom_margin_px,
        stagger: config.stagger_step(),
    }
}

pub fn contact_endpoint(config: &SiteConfig, user_agent: &str) -> Endpoint {
    match config.link_target {
        LinkTarget::Auto => Endpoint::for_user_agent(user_agent),
        LinkTarget::Mobile => Endpoint::Mobile,
        LinkTarget::Desktop => Endpoint::Desktop,
    }
}

/// `offset_at` gives the visitor's offset east of UTC, in minutes, at an
/// epoch millisecond.
pub fn countdown(
    config: &SiteConfig,
    offset_at: impl Fn(i64) -> i32,
) -> Result<Countdown, CountdownError> {
    Countdown::parse_zoned(&config.countdown_target, offset_at)
}

/// Escapes text for use inside a double-quoted attribute or as element text.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Title and excerpt arrive as WordPress-rendered HTML and keep their entities
/// in element text. Everything placed in an attribute is escaped.
fn card_html(card: &PostCard) -> String {
    let variant = if card.featured {
        "blog__card--featured"
    } else {
        "blog__card--vertical"
    };

    format!(
        r#"<a href="{link}" class="blog__card {variant}" data-index="{number}" target="_blank">
    <div class="blog__card-image">
        <img src="{image}" alt="{alt}" loading="lazy">
        <div class="blog__card-overlay"></div>
    </div>
    <div class="blog__card-content">
        <span class="blog__card-category {accent}">{category}</span>
        <h3 class="blog__card-title">{title}</h3>
        <p class="blog__card-excerpt">{excerpt}</p>
        <div class="blog__card-meta">
            <span class="blog__card-date">{date}</span>
            <span class="blog__card-read">{minutes} min lectura</span>
        </div>
    </div>
    <span class="blog__card-number">{number}</span>
</a>"#,
        link = escape_html(&card.link),
        number = escape_html(&card.number),
        image = escape_html(&card.image_url),
        alt = escape_html(&card.title),
        title = card.title,
        accent = card.accent.css_class(),
        category = escape_html(&card.category),
        excerpt = card.excerpt,
        date = card.date,
        minutes = card.read_minutes,
    )
}

/// Markup for the blog grid. `None` while the feed is still loading.
pub fn blog_html(state: &FeedState) -> Option<String> {
    match state {
        FeedState::Loading => None,
        FeedState::Ready(_) => Some(state.cards().iter().map(card_html).collect()),
        FeedState::Empty => state
            .fallback_message()
            .map(|message| format!(r#"<p class="blog__empty">{message}</p>"#)),
        FeedState::Error(_) => state.fallback_message().map(|message| {
            format!(r#"<p class="blog__error">{message} <br><small>{ERROR_HINT}</small></p>"#)
        }),
    }
}
