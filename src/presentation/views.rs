use askama::Template;
use serde::Serialize;

/// Placeholder shown for an empty or missing list.
pub const EMPTY_LIST_MESSAGE: &str = "Sem registros.";

/// One summary card. `item_json` keeps the full source record so the edit
/// action can fill the form without another fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub type_key: &'static str,
    pub label: String,
    pub id: String,
    pub item_json: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub type_key: &'static str,
    pub cards: Vec<CardView>,
}

impl ListView {
    pub fn empty(type_key: &'static str) -> Self {
        Self {
            type_key,
            cards: Vec::new(),
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        self.cards.is_empty().then_some(EMPTY_LIST_MESSAGE)
    }

    pub fn card(&self, id: &str) -> Option<&CardView> {
        self.cards.iter().find(|card| card.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRowView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub admin_label: &'static str,
    pub created: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsersTableView {
    pub rows: Vec<UserRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatView {
    pub key: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsView {
    pub counters: Vec<StatView>,
}

impl StatsView {
    pub fn value(&self, key: &str) -> Option<&str> {
        self.counters
            .iter()
            .find(|stat| stat.key == key)
            .map(|stat| stat.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormControlView {
    pub name: String,
    pub is_checkbox: bool,
    pub value: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub type_key: &'static str,
    pub edit_id: Option<String>,
    pub controls: Vec<FormControlView>,
}

impl FormView {
    pub fn edit_marker(&self) -> Option<&str> {
        self.edit_id.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastView {
    pub id: String,
    pub kind: &'static str,
    pub text: String,
    pub ttl_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub type_key: &'static str,
    pub heading: &'static str,
    pub list: ListView,
    pub form: FormView,
}

/// Snapshot of every console region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsoleView {
    pub session: SessionView,
    pub stats: StatsView,
    pub users: UsersTableView,
    pub sections: Vec<SectionView>,
    pub toasts: Vec<ToastView>,
}

#[derive(Template)]
#[template(path = "admin/list.html")]
pub struct AdminListTemplate<'a> {
    pub list: &'a ListView,
}

#[derive(Template)]
#[template(path = "admin/users.html")]
pub struct AdminUsersTemplate<'a> {
    pub users: &'a UsersTableView,
}

#[derive(Template)]
#[template(path = "admin/form.html")]
pub struct AdminFormTemplate<'a> {
    pub form: &'a FormView,
}

#[derive(Template)]
#[template(path = "admin/toast_stack.html")]
pub struct AdminToastStackTemplate<'a> {
    pub toasts: &'a [ToastView],
}

/// Section with its regions already rendered.
pub struct RenderedSection {
    pub type_key: &'static str,
    pub heading: &'static str,
    pub list_html: String,
    pub form_html: String,
}

#[derive(Template)]
#[template(path = "admin/console.html")]
pub struct AdminConsoleTemplate<'a> {
    pub session: &'a SessionView,
    pub stats: &'a StatsView,
    pub users_html: String,
    pub sections: Vec<RenderedSection>,
    pub toasts_html: String,
}

impl ConsoleView {
    /// Full HTML page for the console.
    pub fn render_html(&self) -> Result<String, askama::Error> {
        let sections = self
            .sections
            .iter()
            .map(|section| {
                Ok(RenderedSection {
                    type_key: section.type_key,
                    heading: section.heading,
                    list_html: AdminListTemplate {
                        list: &section.list,
                    }
                    .render()?,
                    form_html: AdminFormTemplate {
                        form: &section.form,
                    }
                    .render()?,
                })
            })
            .collect::<Result<Vec<_>, askama::Error>>()?;

        AdminConsoleTemplate {
            session: &self.session,
            stats: &self.stats,
            users_html: AdminUsersTemplate { users: &self.users }.render()?,
            sections,
            toasts_html: AdminToastStackTemplate {
                toasts: &self.toasts,
            }
            .render()?,
        }
        .render()
    }
}
