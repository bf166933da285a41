use chrono::{Datelike, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];
const DEFAULT_CATEGORY: &str = "Estrategia";

pub const EMPTY_MESSAGE: &str = "No hay artículos disponibles.";
pub const ERROR_MESSAGE: &str = "No se pudieron cargar los artículos.";
pub const ERROR_HINT: &str = "Intenta recargar la página.";

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("feed request failed with status {0}")]
    Status(u16),
    #[error("malformed feed: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Term {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Embedded {
    #[serde(rename = "wp:featuredmedia", default)]
    pub featured_media: Vec<Media>,
    #[serde(rename = "wp:term", default)]
    pub terms: Vec<Vec<Term>>,
}

/// The subset of a WordPress REST post (`_embed`) the blog grid reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WpPost {
    #[serde(default)]
    pub title: Rendered,
    #[serde(default)]
    pub excerpt: Rendered,
    #[serde(default)]
    pub content: Rendered,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub date: String,
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<Embedded>,
}

impl WpPost {
    fn featured_image(&self) -> Option<&str> {
        self.embedded
            .as_ref()?
            .featured_media
            .first()?
            .source_url
            .as_deref()
            .filter(|url| !url.is_empty())
    }

    fn primary_term(&self) -> Option<&Term> {
        self.embedded.as_ref()?.terms.first()?.first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CategoryAccent {
    #[default]
    Coral,
    Blue,
}

impl CategoryAccent {
    pub fn for_slug(slug: &str) -> Self {
        let slug = slug.to_lowercase();
        if slug.contains("mindset") || slug.contains("psicolog") {
            CategoryAccent::Blue
        } else {
            CategoryAccent::Coral
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            CategoryAccent::Coral => "blog__card-category--coral",
            CategoryAccent::Blue => "blog__card-category--blue",
        }
    }
}

/// Everything a blog card shows, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCard {
    pub number: String,
    pub featured: bool,
    pub title: String,
    pub excerpt: String,
    pub link: String,
    pub date: String,
    pub image_url: String,
    pub category: String,
    pub accent: CategoryAccent,
    pub read_minutes: u32,
}

pub fn parse_feed(json: &str) -> Result<Vec<WpPost>, FeedError> {
    Ok(serde_json::from_str(json)?)
}

pub fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, "").trim().to_string()
}

/// Whole minutes at `words_per_minute`, never less than one.
pub fn read_minutes(html: &str, words_per_minute: u32) -> u32 {
    let words = TAG.replace_all(html, "").split_whitespace().count();
    let words = u32::try_from(words).unwrap_or(u32::MAX);
    words.div_ceil(words_per_minute.max(1)).max(1)
}

/// `2024-03-05T10:00:00` becomes `5 mar 2024`. Unparseable dates pass through.
pub fn format_date_es(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        Ok(date) => format!(
            "{} {} {}",
            date.day(),
            MONTHS_ES[date.month0() as usize],
            date.year()
        ),
        Err(_) => raw.to_string(),
    }
}

pub fn summarize(posts: &[WpPost], fallback_image: &str, words_per_minute: u32) -> Vec<PostCard> {
    posts
        .iter()
        .enumerate()
        .map(|(idx, post)| {
            let (category, accent) = match post.primary_term() {
                Some(term) => (term.name.clone(), CategoryAccent::for_slug(&term.slug)),
                None => (DEFAULT_CATEGORY.to_string(), CategoryAccent::Coral),
            };

            PostCard {
                number: format!("{:02}", idx + 1),
                featured: idx == 0,
                title: post.title.rendered.clone(),
                excerpt: strip_tags(&post.excerpt.rendered),
                link: post.link.clone(),
                date: format_date_es(&post.date),
                image_url: post.featured_image().unwrap_or(fallback_image).to_string(),
                category,
                accent,
                read_minutes: read_minutes(&post.content.rendered, words_per_minute),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedState {
    #[default]
    Loading,
    Ready(Vec<PostCard>),
    Empty,
    Error(String),
}

impl FeedState {
    pub fn cards(&self) -> &[PostCard] {
        match self {
            FeedState::Ready(cards) => cards,
            _ => &[],
        }
    }

    /// Static text shown in place of the grid, if any.
    pub fn fallback_message(&self) -> Option<&'static str> {
        match self {
            FeedState::Empty => Some(EMPTY_MESSAGE),
            FeedState::Error(_) => Some(ERROR_MESSAGE),
            _ => None,
        }
    }
}

impl fmt::Display for FeedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedState::Loading => write!(f, "Loading"),
            FeedState::Ready(cards) => write!(f, "Ready ({} posts)", cards.len()),
            FeedState::Empty => write!(f, "Empty"),
            FeedState::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    Loaded(Vec<PostCard>),
    Failed(String),
}

impl FeedEvent {
    /// The state a finished load leaves the blog grid in.
    pub fn into_state(self) -> FeedState {
        match self {
            FeedEvent::Loaded(cards) if cards.is_empty() => FeedState::Empty,
            FeedEvent::Loaded(cards) => FeedState::Ready(cards),
            FeedEvent::Failed(msg) => {
                tracing::error!("blog feed failed: {msg}");
                FeedState::Error(msg)
            }
        }
    }
}

/// Decodes a feed body straight into the next state. Never fails.
pub fn load_from_body(body: &str, fallback_image: &str, words_per_minute: u32) -> FeedState {
    let event = match parse_feed(body) {
        Ok(posts) => FeedEvent::Loaded(summarize(&posts, fallback_image, words_per_minute)),
        Err(err) => FeedEvent::Failed(err.to_string()),
    };
    event.into_state()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"[
        {
            "title": { "rendered": "Cerrar con confianza" },
            "excerpt": { "rendered": "<p>Un <strong>resumen</strong> breve</p>\n" },
            "content": { "rendered": "<p>uno dos tres</p>" },
            "link": "https://example.com/cerrar",
            "date": "2024-03-05T10:00:00",
            "_embedded": {
                "wp:featuredmedia": [{ "source_url": "https://example.com/a.jpg" }],
                "wp:term": [[{ "name": "Mindset", "slug": "mindset-ganador" }]]
            }
        },
        {
            "title": { "rendered": "Sin imagen" },
            "excerpt": { "rendered": "" },
            "content": { "rendered": "" },
            "link": "https://example.com/b",
            "date": "2024-09-30T08:00:00"
        }
    ]"#;

    #[test]
    fn test_summarize_full_post() {
        let posts = parse_feed(FEED).unwrap();
        let cards = summarize(&posts, "assets/hero/1.jpg", 200);

        let first = &cards[0];
        assert_eq!(first.number, "01");
        assert!(first.featured);
        assert_eq!(first.excerpt, "Un resumen breve");
        assert_eq!(first.date, "5 mar 2024");
        assert_eq!(first.image_url, "https://example.com/a.jpg");
        assert_eq!(first.category, "Mindset");
        assert_eq!(first.accent, CategoryAccent::Blue);
        assert_eq!(first.read_minutes, 1);
    }

    #[test]
    fn test_summarize_uses_fallbacks() {
        let posts = parse_feed(FEED).unwrap();
        let cards = summarize(&posts, "assets/hero/1.jpg", 200);

        let second = &cards[1];
        assert_eq!(second.number, "02");
        assert!(!second.featured);
        assert_eq!(second.image_url, "assets/hero/1.jpg");
        assert_eq!(second.category, "Estrategia");
        assert_eq!(second.accent, CategoryAccent::Coral);
        assert_eq!(second.date, "30 sept 2024");
    }

    #[test]
    fn test_read_minutes_rounds_up() {
        let body = "palabra ".repeat(401);
        assert_eq!(read_minutes(&body, 200), 3);
        assert_eq!(read_minutes("", 200), 1);
        // Tags are removed, not turned into spaces
        assert_eq!(read_minutes("<p>a</p><p>b</p>", 1), 1);
        assert_eq!(read_minutes("<p>a</p> <p>b</p>", 1), 2);
    }

    #[test]
    fn test_state_transitions() {
        assert_eq!(FeedEvent::Loaded(vec![]).into_state(), FeedState::Empty);
        assert_eq!(
            FeedEvent::Failed("timeout".into()).into_state(),
            FeedState::Error("timeout".into())
        );
    }

    #[test]
    fn test_bad_body_degrades_to_message() {
        let state = load_from_body("<html>502</html>", "x.jpg", 200);
        assert_eq!(state.fallback_message(), Some(ERROR_MESSAGE));
        assert!(state.cards().is_empty());

        let empty = load_from_body("[]", "x.jpg", 200);
        assert_eq!(empty.fallback_message(), Some(EMPTY_MESSAGE));
    }
}
