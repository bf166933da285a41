use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel filter value that matches every category.
pub const ALL_TAG: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
}

impl ImageRef {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

/// One tile of the gallery grid. Immutable once the page is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub category: String,
    pub image: ImageRef,
}

impl GalleryItem {
    pub fn new(category: impl Into<String>, image: ImageRef) -> Self {
        Self {
            category: category.into(),
            image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterTag {
    #[default]
    All,
    Category(String),
}

impl FilterTag {
    pub fn category(name: impl Into<String>) -> Self {
        Self::parse(&name.into())
    }

    /// Reads a `data-filter` attribute value. `"all"` is the sentinel.
    pub fn parse(raw: &str) -> Self {
        if raw == ALL_TAG {
            FilterTag::All
        } else {
            FilterTag::Category(raw.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FilterTag::All)
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            FilterTag::All => true,
            FilterTag::Category(tag) => tag == category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FilterTag::All => ALL_TAG,
            FilterTag::Category(tag) => tag,
        }
    }
}

impl From<String> for FilterTag {
    fn from(raw: String) -> Self {
        FilterTag::parse(&raw)
    }
}

impl From<FilterTag> for String {
    fn from(tag: FilterTag) -> Self {
        tag.as_str().to_string()
    }
}

impl fmt::Display for FilterTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
