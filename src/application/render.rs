//! Pure renderers: API data in, view models out.

use serde_json::Value;

use crate::application::form::{ControlKind, FormBinding};
use crate::application::toast::Toast;
use crate::domain::entities::{STAT_KEYS, SessionInfo, UserRecord, value_text};
use crate::domain::types::ContentType;
use crate::presentation::views::{
    CardView, FormControlView, FormView, ListView, SessionView, StatView, StatsView, ToastView,
    UserRowView, UsersTableView,
};

pub const UNAUTHENTICATED_LABEL: &str = "Nao autenticado";
const MISSING_CELL: &str = "-";

/// One card per item; anything but a non-empty array renders the placeholder.
pub fn render_list(content_type: ContentType, items: Option<&Value>) -> ListView {
    let Some(Value::Array(items)) = items else {
        return ListView::empty(content_type.as_str());
    };

    let cards = items
        .iter()
        .map(|item| CardView {
            type_key: content_type.as_str(),
            label: content_type.label(item),
            id: item.get("id").map(value_text).unwrap_or_default(),
            item_json: item.to_string(),
        })
        .collect();

    ListView {
        type_key: content_type.as_str(),
        cards,
    }
}

/// One row per array element; a row with unexpected field types still renders
/// so it stays deletable.
pub fn render_users(users: Option<&Value>) -> UsersTableView {
    let Some(Value::Array(users)) = users else {
        return UsersTableView::default();
    };

    let rows = users
        .iter()
        .map(|raw| user_row(&UserRecord::from_value(raw)))
        .collect();

    UsersTableView { rows }
}

fn user_row(user: &UserRecord) -> UserRowView {
    let created = value_text(&user.created_at);
    let created = match created.split('T').next() {
        Some(date) if !date.is_empty() => date.to_string(),
        _ => MISSING_CELL.to_string(),
    };
    let name = match value_text(&user.name) {
        name if name.is_empty() => MISSING_CELL.to_string(),
        name => name,
    };

    UserRowView {
        id: user.id_text(),
        name,
        email: value_text(&user.email),
        admin_label: if user.is_admin() { "Sim" } else { "Nao" },
        created,
    }
}

/// Counters absent from the payload render as empty text.
pub fn render_stats(stats: &Value) -> StatsView {
    let counters = STAT_KEYS
        .iter()
        .map(|&key| StatView {
            key,
            value: stats.get(key).map(value_text).unwrap_or_default(),
        })
        .collect();
    StatsView { counters }
}

/// `None` (failed request) and unauthenticated sessions render the same label.
pub fn render_session(me: Option<&Value>) -> SessionView {
    let session = me.map(SessionInfo::from_value).unwrap_or_default();
    if !session.is_authenticated() {
        return SessionView {
            text: UNAUTHENTICATED_LABEL.to_string(),
        };
    }

    let role = if session.is_admin() { "admin" } else { "usuario" };
    SessionView {
        text: format!("{} ({role})", session.email()),
    }
}

pub fn render_form(form: &FormBinding) -> FormView {
    FormView {
        type_key: form.content_type.as_str(),
        edit_id: form.edit_id.clone(),
        controls: form
            .controls
            .iter()
            .map(|control| FormControlView {
                name: control.name.clone(),
                is_checkbox: control.kind == ControlKind::Checkbox,
                value: control.value.clone(),
                checked: control.checked,
            })
            .collect(),
    }
}

pub fn render_toasts(toasts: &[Toast]) -> Vec<ToastView> {
    toasts
        .iter()
        .map(|toast| ToastView {
            id: toast.id.to_string(),
            kind: toast.kind.as_variant(),
            text: toast.text.clone(),
            ttl_ms: u64::try_from(toast.ttl.as_millis()).unwrap_or(u64::MAX),
        })
        .collect()
}
