use crate::error::MalformedInput;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One documentation unit from a Documenter search index.
///
/// Deserializing requires `location` and a non-empty `page`, the same checks
/// [`parse_index`](crate::parse_index) applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Page anchor or URL fragment. Empty for the root of a page.
    pub location: String,
    /// Human-readable page name.
    pub page: String,
    /// Section or symbol title.
    pub title: String,
    /// Indexable body text.
    pub text: String,
    pub category: Category,
}

impl Entry {
    pub fn new(
        location: impl Into<String>,
        page: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            location: location.into(),
            page: page.into(),
            title: title.into(),
            text: text.into(),
            category,
        }
    }
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawEntry::deserialize(deserializer)?
            .into_entry()
            .map_err(serde::de::Error::custom)
    }
}

/// Entry as it appears on disk, before required fields are checked.
#[derive(Deserialize)]
pub(crate) struct RawEntry {
    location: Option<String>,
    page: Option<String>,
    title: Option<String>,
    text: Option<String>,
    category: Option<Category>,
}

/// A required entry field that is absent or empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub(crate) enum FieldError {
    #[error("missing `{0}`")]
    Missing(&'static str),
    #[error("empty `{0}`")]
    Empty(&'static str),
}

impl FieldError {
    /// Attaches the position of the offending entry.
    pub(crate) const fn at(self, index: usize) -> MalformedInput {
        match self {
            Self::Missing(field) => MalformedInput::MissingField { index, field },
            Self::Empty(field) => MalformedInput::EmptyField { index, field },
        }
    }
}

impl RawEntry {
    /// Checks required fields; missing or null optional fields become empty.
    pub(crate) fn into_entry(self) -> Result<Entry, FieldError> {
        let location = self.location.ok_or(FieldError::Missing("location"))?;
        let page = self.page.ok_or(FieldError::Missing("page"))?;
        if page.is_empty() {
            return Err(FieldError::Empty("page"));
        }

        Ok(Entry {
            location,
            page,
            title: self.title.unwrap_or_default(),
            text: self.text.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
        })
    }
}

/// Granularity of an entry as tagged by the documentation generator.
///
/// Unknown tags are kept verbatim in [`Category::Other`] so newer generator
/// output still loads and round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Page,
    Section,
    Method,
    Type,
    Function,
    Module,
    Macro,
    Constant,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Page => "page",
            Self::Section => "section",
            Self::Method => "method",
            Self::Type => "type",
            Self::Function => "function",
            Self::Module => "module",
            Self::Macro => "macro",
            Self::Constant => "constant",
            Self::Other(tag) => tag,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "page" => Self::Page,
            "section" => Self::Section,
            "method" => Self::Method,
            "type" => Self::Type,
            "function" => Self::Function,
            "module" => Self::Module,
            "macro" => Self::Macro,
            "constant" => Self::Constant,
            _ => Self::Other(tag.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
