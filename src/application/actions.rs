//! Button actions recognised by the console's delegated click handler.

use crate::domain::types::ContentType;

pub const ACTION_ATTR: &str = "data-admin-action";
pub const TYPE_ATTR: &str = "data-type";
pub const ID_ATTR: &str = "data-id";
pub const CLEAR_ATTR: &str = "data-admin-clear";
/// Prefix of the element id each content-type form carries.
pub const FORM_ID_PREFIX: &str = "admin-form-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    DeleteUser {
        id: String,
    },
    Delete {
        content_type: ContentType,
        id: String,
    },
    Edit {
        content_type: ContentType,
        id: String,
    },
    Clear {
        content_type: ContentType,
    },
}

impl AdminAction {
    /// Interpret the data attributes of a clicked element.
    ///
    /// Returns `None` for elements that are not admin actions or that lack the
    /// type/id the action needs; such clicks are ignored.
    pub fn from_attributes(attrs: &[(&str, &str)]) -> Option<Self> {
        let get = |name: &str| {
            attrs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value)
                .filter(|value| !value.is_empty())
        };

        if let Some(selector) = get(CLEAR_ATTR) {
            return Self::clear_target(selector);
        }

        let id = get(ID_ATTR)?.to_string();
        match get(ACTION_ATTR)? {
            "delete-user" => Some(Self::DeleteUser { id }),
            "delete" => Some(Self::Delete {
                content_type: ContentType::from_key(get(TYPE_ATTR)?)?,
                id,
            }),
            "edit" => Some(Self::Edit {
                content_type: ContentType::from_key(get(TYPE_ATTR)?)?,
                id,
            }),
            _ => None,
        }
    }

    /// Resolve a clear button's target selector (`#admin-form-<type>`).
    pub fn clear_target(selector: &str) -> Option<Self> {
        let key = selector.trim().strip_prefix('#')?.strip_prefix(FORM_ID_PREFIX)?;
        ContentType::from_key(key).map(|content_type| Self::Clear { content_type })
    }
}
