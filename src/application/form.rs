//! Per-type form state and the binder that moves records in and out of it.

use serde::Serialize;
use serde_json::Value;

use crate::domain::entities::{is_truthy, value_text};
use crate::domain::schema::FieldKind;
use crate::domain::types::ContentType;

/// Value a checked checkbox submits when it has no explicit `value` attribute.
pub const CHECKBOX_ON: &str = "on";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Text,
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormControl {
    pub name: String,
    pub kind: ControlKind,
    pub value: String,
    pub checked: bool,
    pub default_value: String,
    pub default_checked: bool,
}

impl FormControl {
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ControlKind::Text,
            value: String::new(),
            checked: false,
            default_value: String::new(),
            default_checked: false,
        }
    }

    pub fn checkbox(name: impl Into<String>) -> Self {
        Self {
            kind: ControlKind::Checkbox,
            ..Self::text(name)
        }
    }

    /// Default restored by [`clear_form`]; also becomes the current value.
    #[must_use]
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self.value.clone_from(&self.default_value);
        self
    }

    fn reset(&mut self) {
        self.value.clone_from(&self.default_value);
        self.checked = self.default_checked;
    }
}

/// A form bound to one content type. `edit_id` is the edit marker: when set,
/// the next submit updates that record instead of creating a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormBinding {
    pub content_type: ContentType,
    pub controls: Vec<FormControl>,
    pub edit_id: Option<String>,
}

impl FormBinding {
    /// Form with one control per schema field; boolean fields become checkboxes.
    pub fn for_type(content_type: ContentType) -> Self {
        let controls = content_type
            .fields()
            .iter()
            .map(|spec| match spec.kind {
                FieldKind::Boolean => FormControl::checkbox(spec.name),
                FieldKind::Text | FieldKind::Number | FieldKind::Tags => {
                    FormControl::text(spec.name)
                }
            })
            .collect();
        Self::with_controls(content_type, controls)
    }

    pub fn with_controls(content_type: ContentType, controls: Vec<FormControl>) -> Self {
        Self {
            content_type,
            controls,
            edit_id: None,
        }
    }

    pub fn control(&self, name: &str) -> Option<&FormControl> {
        self.controls.iter().find(|control| control.name == name)
    }

    pub fn control_mut(&mut self, name: &str) -> Option<&mut FormControl> {
        self.controls.iter_mut().find(|control| control.name == name)
    }

    /// Type into a control. Checkboxes accept `on`/`true`/`1` as checked.
    /// Returns `false` when the form has no control with that name.
    pub fn set_input(&mut self, name: &str, input: &str) -> bool {
        let Some(control) = self.control_mut(name) else {
            return false;
        };
        match control.kind {
            ControlKind::Text => control.value = input.to_string(),
            ControlKind::Checkbox => {
                control.checked = matches!(input.trim(), CHECKBOX_ON | "true" | "1");
            }
        }
        true
    }

    /// The marker counts only when non-empty; an empty marker submits as a create.
    pub fn editing_id(&self) -> Option<&str> {
        self.edit_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Submitted entries: every text control, checked checkboxes only.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.controls
            .iter()
            .filter_map(|control| match control.kind {
                ControlKind::Text => Some((control.name.clone(), control.value.clone())),
                ControlKind::Checkbox => control
                    .checked
                    .then(|| (control.name.clone(), CHECKBOX_ON.to_string())),
            })
            .collect()
    }
}

/// Load `item` into `form` and mark the form as editing the item's id.
///
/// Fields the form has no control for are skipped.
pub fn fill_form(form: &mut FormBinding, content_type: ContentType, item: &Value) {
    form.edit_id = Some(item.get("id").map(value_text).unwrap_or_default());

    for spec in content_type.fields() {
        let Some(control) = form.control_mut(spec.name) else {
            continue;
        };
        let source = item.get(spec.source).unwrap_or(&Value::Null);
        match control.kind {
            ControlKind::Checkbox => control.checked = is_truthy(source),
            ControlKind::Text => {
                control.value = match spec.kind {
                    FieldKind::Tags => join_tags(source),
                    _ => value_text(source),
                };
            }
        }
    }
}

/// Reset every control to its default and drop the edit marker.
pub fn clear_form(form: &mut FormBinding) {
    for control in &mut form.controls {
        control.reset();
    }
    form.edit_id = None;
}

fn join_tags(value: &Value) -> String {
    match value {
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        _ => String::new(),
    }
}
