//! Registry of content types managed by the console.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entities::value_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Blog,
    News,
    Videos,
    Events,
    Support,
    Tests,
}

impl ContentType {
    /// Registration order; bootstrap loads and page sections follow it.
    pub const ALL: [ContentType; 6] = [
        ContentType::Blog,
        ContentType::News,
        ContentType::Videos,
        ContentType::Events,
        ContentType::Support,
        ContentType::Tests,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Blog => "blog",
            ContentType::News => "news",
            ContentType::Videos => "videos",
            ContentType::Events => "events",
            ContentType::Support => "support",
            ContentType::Tests => "tests",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == key)
    }

    /// Public read-only list endpoint, relative to the API base.
    pub fn list_path(self) -> &'static str {
        match self {
            ContentType::Blog => "/blog",
            ContentType::News => "/news",
            ContentType::Videos => "/videos",
            ContentType::Events => "/events",
            ContentType::Support => "/support-orgs",
            ContentType::Tests => "/tests",
        }
    }

    /// Admin CRUD endpoint, relative to the API base.
    pub fn admin_path(self) -> &'static str {
        match self {
            ContentType::Blog => "/admin/blog",
            ContentType::News => "/admin/news",
            ContentType::Videos => "/admin/videos",
            ContentType::Events => "/admin/events",
            ContentType::Support => "/admin/support-orgs",
            ContentType::Tests => "/admin/tests",
        }
    }

    fn label_field(self) -> &'static str {
        match self {
            ContentType::Support | ContentType::Tests => "name",
            _ => "title",
        }
    }

    /// Display label of a record: its title/name when non-empty, otherwise its id.
    pub fn label(self, item: &Value) -> String {
        match item.get(self.label_field()).map(value_text) {
            Some(label) if !label.is_empty() => label,
            _ => item.get("id").map(value_text).unwrap_or_default(),
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            ContentType::Blog => "Blog",
            ContentType::News => "Noticias",
            ContentType::Videos => "Videos",
            ContentType::Events => "Eventos",
            ContentType::Support => "Rede de apoio",
            ContentType::Tests => "Testes",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
