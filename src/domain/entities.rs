//! Records exchanged with the content API.
//!
//! Content items stay opaque JSON; only users and the session payload are typed
//! because the console reads individual fields out of them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text form of a JSON scalar as it would appear in a form control.
///
/// `null` becomes the empty string; composite values fall back to their JSON text.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Loose truthiness used for checkbox controls and the `ok` flag of save responses.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A row of `GET /admin/users`. Fields keep their raw JSON so a record with
/// unexpected scalar types still renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRecord {
    pub id: Value,
    pub name: Value,
    pub email: Value,
    pub is_admin: Value,
    pub created_at: Value,
}

impl UserRecord {
    /// Non-object rows read as a record with every field missing.
    pub fn from_value(raw: &Value) -> Self {
        serde_json::from_value(raw.clone()).unwrap_or_default()
    }

    pub fn id_text(&self) -> String {
        value_text(&self.id)
    }

    pub fn is_admin(&self) -> bool {
        is_truthy(&self.is_admin)
    }
}

/// Payload of `GET /me`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionInfo {
    pub authenticated: Value,
    pub user: Value,
}

impl SessionInfo {
    pub fn from_value(raw: &Value) -> Self {
        serde_json::from_value(raw.clone()).unwrap_or_default()
    }

    pub fn is_authenticated(&self) -> bool {
        is_truthy(&self.authenticated)
    }

    pub fn email(&self) -> String {
        self.user.get("email").map(value_text).unwrap_or_default()
    }

    pub fn is_admin(&self) -> bool {
        self.user.get("isAdmin").is_some_and(is_truthy)
    }
}

/// Counter keys of `GET /admin/stats`, in display order.
pub const STAT_KEYS: [&str; 7] = ["users", "blog", "news", "videos", "events", "support", "tests"];

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn value_text_mirrors_form_control_values() {
        assert_eq!(value_text(&Value::Null), "");
        assert_eq!(value_text(&json!(12)), "12");
        assert_eq!(value_text(&json!("x")), "x");
        assert_eq!(value_text(&json!(true)), "true");
    }

    #[test]
    fn truthiness_matches_loose_semantics() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("no")));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn session_reads_camel_case_flag() {
        let session = SessionInfo::from_value(&json!({
            "authenticated": true,
            "user": {"email": "a@b.c", "isAdmin": true}
        }));
        assert!(session.is_authenticated());
        assert!(session.is_admin());
        assert_eq!(session.email(), "a@b.c");
    }

    #[test]
    fn session_flags_use_loose_truthiness() {
        let session = SessionInfo::from_value(&json!({
            "authenticated": 1,
            "user": {"email": "a@b.c", "isAdmin": 1}
        }));
        assert!(session.is_authenticated());
        assert!(session.is_admin());

        let odd = SessionInfo::from_value(&json!({"authenticated": "yes", "user": "someone"}));
        assert!(odd.is_authenticated());
        assert!(!odd.is_admin());
        assert_eq!(odd.email(), "");
    }

    #[test]
    fn user_record_tolerates_missing_and_mistyped_fields() {
        let user = UserRecord::from_value(&json!({"id": 4, "email": "x@y"}));
        assert_eq!(user.id_text(), "4");
        assert_eq!(user.name, Value::Null);
        assert!(!user.is_admin());

        let numeric = UserRecord::from_value(&json!({"id": 5, "name": 42, "is_admin": 1}));
        assert_eq!(value_text(&numeric.name), "42");
        assert!(numeric.is_admin());

        assert_eq!(UserRecord::from_value(&json!("junk")), UserRecord::default());
    }
}
