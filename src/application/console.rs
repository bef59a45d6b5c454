//! The console controller: owns every UI region and drives the
//! event → request → re-render cycle.
//!
//! Each region sits behind its own lock, taken only for the synchronous
//! update after a response arrives. A successful mutation always re-fetches;
//! nothing is patched locally.

use std::collections::BTreeMap;
use std::sync::Mutex;

use futures::future::join_all;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::actions::AdminAction;
use super::form::{FormBinding, clear_form, fill_form};
use super::lock::mutex_lock;
use super::payload::normalize_payload;
use super::render::{
    UNAUTHENTICATED_LABEL, render_form, render_list, render_session, render_stats, render_toasts,
    render_users,
};
use super::toast::ToastStack;
use crate::domain::entities::is_truthy;
use crate::domain::types::ContentType;
use crate::infra::gateway::Gateway;
use crate::presentation::views::{
    ConsoleView, ListView, SectionView, SessionView, StatsView, UsersTableView,
};

pub const SAVED_MESSAGE: &str = "Salvo com sucesso.";
const SESSION_PATH: &str = "/me";
const STATS_PATH: &str = "/admin/stats";
const USERS_PATH: &str = "/admin/users";

struct Section {
    list: Mutex<ListView>,
    form: Mutex<FormBinding>,
}

pub struct AdminConsole {
    gateway: Gateway,
    session: Mutex<SessionView>,
    stats: Mutex<StatsView>,
    users: Mutex<UsersTableView>,
    sections: BTreeMap<ContentType, Section>,
}

impl AdminConsole {
    /// Console with one schema-derived form per registered content type.
    pub fn new(gateway: Gateway) -> Self {
        let sections = ContentType::ALL
            .into_iter()
            .map(|ty| {
                let section = Section {
                    list: Mutex::new(ListView::empty(ty.as_str())),
                    form: Mutex::new(FormBinding::for_type(ty)),
                };
                (ty, section)
            })
            .collect();

        Self {
            gateway,
            session: Mutex::new(SessionView {
                text: UNAUTHENTICATED_LABEL.to_string(),
            }),
            stats: Mutex::new(StatsView::default()),
            users: Mutex::new(UsersTableView::default()),
            sections,
        }
    }

    /// Swap in a form with custom controls (e.g. non-empty defaults).
    #[must_use]
    pub fn with_form(self, form: FormBinding) -> Self {
        if let Some(section) = self.sections.get(&form.content_type) {
            *mutex_lock(&section.form, "form", "replace") = form;
        }
        self
    }

    pub fn toasts(&self) -> &ToastStack {
        self.gateway.toasts()
    }

    fn section(&self, content_type: ContentType) -> &Section {
        // every ContentType is registered in `new`
        &self.sections[&content_type]
    }

    /// Load every region concurrently. Failures stay local to their region.
    #[instrument(skip(self))]
    pub async fn bootstrap(&self) {
        let lists = join_all(ContentType::ALL.into_iter().map(|ty| self.load_list(ty)));
        futures::join!(self.load_session(), self.load_stats(), self.load_users(), lists);
    }

    pub async fn load_session(&self) {
        let data = self.gateway.get(SESSION_PATH).await;
        let view = render_session(data.as_ref());
        *mutex_lock(&self.session, "session", "render") = view;
    }

    pub async fn load_stats(&self) {
        let Some(data) = self.gateway.get(STATS_PATH).await else {
            return;
        };
        *mutex_lock(&self.stats, "stats", "render") = render_stats(&data);
    }

    pub async fn load_users(&self) {
        let Some(data) = self.gateway.get(USERS_PATH).await else {
            return;
        };
        *mutex_lock(&self.users, "users", "render") = render_users(Some(&data));
    }

    pub async fn load_list(&self, content_type: ContentType) {
        let Some(data) = self.gateway.get(content_type.list_path()).await else {
            return;
        };
        let view = render_list(content_type, Some(&data));
        *mutex_lock(&self.section(content_type).list, "list", "render") = view;
    }

    /// Handle a click on an element carrying the given data attributes.
    pub async fn click(&self, attrs: &[(&str, &str)]) -> bool {
        match AdminAction::from_attributes(attrs) {
            Some(action) => self.dispatch(action).await,
            None => false,
        }
    }

    /// Run one action. Returns whether it took effect; a `false` from a
    /// request-backed action means the gateway already raised a toast.
    pub async fn dispatch(&self, action: AdminAction) -> bool {
        match action {
            AdminAction::DeleteUser { id } => {
                if self
                    .gateway
                    .delete_item(USERS_PATH, &id)
                    .await
                    .is_none()
                {
                    return false;
                }
                info!(user_id = %id, "User deleted");
                self.load_users().await;
                true
            }
            AdminAction::Delete { content_type, id } => {
                if self
                    .gateway
                    .delete_item(content_type.admin_path(), &id)
                    .await
                    .is_none()
                {
                    return false;
                }
                info!(%content_type, id = %id, "Record deleted");
                self.load_list(content_type).await;
                true
            }
            AdminAction::Edit { content_type, id } => self.edit(content_type, &id),
            AdminAction::Clear { content_type } => {
                clear_form(&mut mutex_lock(
                    &self.section(content_type).form,
                    "form",
                    "clear",
                ));
                true
            }
        }
    }

    /// Fill the form from the record stored on the rendered card; no request.
    fn edit(&self, content_type: ContentType, id: &str) -> bool {
        let item_json = {
            let list = mutex_lock(&self.section(content_type).list, "list", "edit");
            match list.card(id) {
                Some(card) => card.item_json.clone(),
                None => {
                    debug!(%content_type, id, "No rendered card for edit action");
                    return false;
                }
            }
        };
        let item: Value = match serde_json::from_str(&item_json) {
            Ok(item) => item,
            Err(err) => {
                warn!(%content_type, id, error = %err, "Stored card payload is not JSON");
                return false;
            }
        };

        let mut form = mutex_lock(&self.section(content_type).form, "form", "fill");
        fill_form(&mut form, content_type, &item);
        true
    }

    /// Submit the form of `content_type`: create without an edit marker,
    /// update the marked record otherwise.
    ///
    /// Only a response with a truthy `ok` clears the form and reloads the list
    /// and stats; anything else leaves the console as it was.
    #[instrument(skip(self))]
    pub async fn submit(&self, content_type: ContentType) -> bool {
        let (entries, edit_id) = {
            let form = mutex_lock(&self.section(content_type).form, "form", "submit");
            (form.entries(), form.editing_id().map(str::to_string))
        };

        let payload = Value::Object(normalize_payload(content_type.as_str(), &entries));
        let collection = content_type.admin_path();
        let result = match edit_id.as_deref() {
            Some(id) => {
                self.gateway
                    .request_item(Method::PUT, collection, id, Some(&payload))
                    .await
            }
            None => {
                self.gateway
                    .request(Method::POST, collection, Some(&payload))
                    .await
            }
        };
        let saved = result
            .as_ref()
            .and_then(|body| body.get("ok"))
            .is_some_and(is_truthy);
        if !saved {
            debug!(%content_type, "Save did not report ok");
            return false;
        }

        info!(%content_type, edit_id = ?edit_id, "Record saved");
        clear_form(&mut mutex_lock(
            &self.section(content_type).form,
            "form",
            "reset",
        ));
        self.toasts().info(SAVED_MESSAGE);
        futures::join!(self.load_list(content_type), self.load_stats());
        true
    }

    /// Apply `f` to the form of `content_type`, e.g. to type into controls.
    pub fn with_form_mut<R>(
        &self,
        content_type: ContentType,
        f: impl FnOnce(&mut FormBinding) -> R,
    ) -> R {
        let mut form = mutex_lock(&self.section(content_type).form, "form", "input");
        f(&mut form)
    }

    pub fn form(&self, content_type: ContentType) -> FormBinding {
        mutex_lock(&self.section(content_type).form, "form", "read").clone()
    }

    pub fn list(&self, content_type: ContentType) -> ListView {
        mutex_lock(&self.section(content_type).list, "list", "read").clone()
    }

    pub fn session(&self) -> SessionView {
        mutex_lock(&self.session, "session", "read").clone()
    }

    pub fn stats(&self) -> StatsView {
        mutex_lock(&self.stats, "stats", "read").clone()
    }

    pub fn users(&self) -> UsersTableView {
        mutex_lock(&self.users, "users", "read").clone()
    }

    /// Snapshot of every region plus pending toasts.
    pub fn view(&self) -> ConsoleView {
        let sections = ContentType::ALL
            .into_iter()
            .map(|ty| SectionView {
                type_key: ty.as_str(),
                heading: ty.heading(),
                list: self.list(ty),
                form: render_form(&self.form(ty)),
            })
            .collect();

        ConsoleView {
            session: self.session(),
            stats: self.stats(),
            users: self.users(),
            sections,
            toasts: render_toasts(&self.toasts().snapshot()),
        }
    }
}
