//! Declarative field schema per content type.
//!
//! `name` is the form control and payload key; `source` is the key the API uses
//! for the same value when it returns a record.

use super::types::ContentType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    Tags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub source: &'static str,
    pub kind: FieldKind,
}

const fn text(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        source: name,
        kind: FieldKind::Text,
    }
}

const fn mapped(name: &'static str, source: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, source, kind }
}

const IMAGE_URL: FieldSpec = mapped("imageUrl", "image_url", FieldKind::Text);

const BLOG_FIELDS: &[FieldSpec] = &[
    text("title"),
    text("category"),
    text("summary"),
    mapped("readMinutes", "read_minutes", FieldKind::Number),
    text("content"),
    IMAGE_URL,
];

const NEWS_FIELDS: &[FieldSpec] = &[
    text("title"),
    text("summary"),
    text("source"),
    text("url"),
    IMAGE_URL,
];

const VIDEO_FIELDS: &[FieldSpec] = &[
    text("title"),
    text("category"),
    text("duration"),
    text("channel"),
    text("url"),
    IMAGE_URL,
];

const EVENT_FIELDS: &[FieldSpec] = &[
    text("title"),
    text("description"),
    text("category"),
    mapped("dateTime", "date_time", FieldKind::Text),
    IMAGE_URL,
    text("status"),
    mapped("isRecorded", "is_recorded", FieldKind::Boolean),
];

const SUPPORT_FIELDS: &[FieldSpec] = &[
    text("name"),
    text("category"),
    text("city"),
    text("country"),
    text("description"),
    text("phone"),
    text("email"),
    text("website"),
    mapped("tags", "tags", FieldKind::Tags),
    IMAGE_URL,
];

const TEST_FIELDS: &[FieldSpec] = &[
    text("name"),
    text("category"),
    mapped("durationMinutes", "duration_minutes", FieldKind::Number),
];

impl ContentType {
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            ContentType::Blog => BLOG_FIELDS,
            ContentType::News => NEWS_FIELDS,
            ContentType::Videos => VIDEO_FIELDS,
            ContentType::Events => EVENT_FIELDS,
            ContentType::Support => SUPPORT_FIELDS,
            ContentType::Tests => TEST_FIELDS,
        }
    }

    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|spec| spec.name == name)
    }
}
