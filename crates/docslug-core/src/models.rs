//! Remote entities as served by the ReadMe API.
//!
//! Only the fields docslug reasons about are typed. Everything else the
//! remote sends is kept in `extra` and serialized back unchanged, so the
//! gateway relays bodies without dropping fields.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Kind of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Guide,
    Reference,
    /// Any other kind, preserved verbatim.
    #[serde(untagged)]
    Other(String),
}

impl Default for CategoryKind {
    fn default() -> Self {
        CategoryKind::Other(String::new())
    }
}

/// Treat an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A documentation category. Read-only from docslug's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: CategoryKind,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Category {
    /// Whether the category holds guides, the only kind ever surfaced.
    pub fn is_guide(&self) -> bool {
        self.kind == CategoryKind::Guide
    }

    /// Keep only guide categories, preserving order.
    pub fn retain_guides(categories: Vec<Category>) -> Vec<Category> {
        categories.into_iter().filter(Category::is_guide).collect()
    }
}

/// A documentation page whose slug can be changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Doc {
    /// Doc with no opaque fields; convenient for tests and fixtures.
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            extra: Map::new(),
        }
    }
}

/// Body of a slug update, both on the gateway and upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSlugRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl UpdateSlugRequest {
    /// Request renaming to `slug`.
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
        }
    }

    /// The requested slug, treating an empty string as absent.
    pub fn new_slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|s| !s.is_empty())
    }
}
