#![deny(clippy::all, clippy::pedantic)]

use admin_console::{
    AdminConsole, ContentType,
    application::{
        actions::{ACTION_ATTR, CLEAR_ATTR, ID_ATTR, TYPE_ATTR},
        console::SAVED_MESSAGE,
        form::{FormBinding, FormControl},
        toast::{ToastKind, ToastStack},
    },
    config::ApiSettings,
    infra::gateway::{ADMIN_REQUIRED_MESSAGE, Gateway},
};
use httpmock::MockServer;
use url::Url;

fn console(server: &MockServer) -> AdminConsole {
    let settings = ApiSettings {
        base_url: Url::parse(&format!("{}/api", server.base_url())).expect("url"),
        bearer_token: None,
        cookie: None,
        timeout: None,
    };
    AdminConsole::new(Gateway::new(&settings, ToastStack::default()).expect("gateway"))
}

fn mock_json(server: &MockServer, method: &str, path: &str, status: u16, body: &str) {
    server.mock(|when, then| {
        when.method(method).path(path);
        then.status(status)
            .header("content-type", "application/json")
            .body(body);
    });
}

#[tokio::test]
async fn bootstrap_loads_every_region_and_isolates_failures() {
    let server = MockServer::start();
    mock_json(&server, "GET", "/api/me", 200, r#"{"authenticated":false}"#);
    mock_json(&server, "GET", "/api/admin/stats", 403, "{}");
    mock_json(
        &server,
        "GET",
        "/api/admin/users",
        200,
        r#"[{"id":1,"name":"Ana","email":"ana@x","is_admin":true,"created_at":"2024-01-02T03:04:05Z"}]"#,
    );
    mock_json(&server, "GET", "/api/blog", 200, r#"[{"id":"b1","title":"Primeiro"}]"#);
    mock_json(&server, "GET", "/api/news", 500, r#"{"error":"db down"}"#);
    for path in ["/api/videos", "/api/events", "/api/support-orgs", "/api/tests"] {
        mock_json(&server, "GET", path, 200, "[]");
    }

    let console = console(&server);
    console.bootstrap().await;

    assert_eq!(console.session().text, "Nao autenticado");
    assert_eq!(console.users().rows[0].created, "2024-01-02");
    assert_eq!(console.list(ContentType::Blog).cards[0].label, "Primeiro");
    assert!(console.list(ContentType::News).placeholder().is_some());
    assert!(console.stats().counters.is_empty());

    let mut texts: Vec<String> = console
        .toasts()
        .snapshot()
        .into_iter()
        .map(|toast| toast.text)
        .collect();
    texts.sort();
    assert_eq!(texts, vec![ADMIN_REQUIRED_MESSAGE.to_string(), "db down".to_string()]);
}

#[tokio::test]
async fn delete_reloads_list_from_server() {
    let server = MockServer::start();
    let delete = server.mock(|when, then| {
        when.method("DELETE").path("/api/admin/blog/7");
        then.status(200).body(r#"{"ok":true}"#);
    });
    let list = server.mock(|when, then| {
        when.method("GET").path("/api/blog");
        then.status(200).body(r#"[{"id":"8","title":"Restante"}]"#);
    });

    let console = console(&server);
    let handled = console
        .click(&[(ACTION_ATTR, "delete"), (TYPE_ATTR, "blog"), (ID_ATTR, "7")])
        .await;

    assert!(handled);
    delete.assert();
    list.assert();
    let view = console.list(ContentType::Blog);
    assert_eq!(view.cards.len(), 1);
    assert_eq!(view.cards[0].id, "8");
}

#[tokio::test]
async fn failed_delete_leaves_list_untouched() {
    let server = MockServer::start();
    mock_json(&server, "GET", "/api/videos", 200, r#"[{"id":"v1","title":"Aula"}]"#);
    mock_json(&server, "DELETE", "/api/admin/videos/v1", 401, "{}");
    let console = console(&server);
    console.load_list(ContentType::Videos).await;

    let handled = console
        .click(&[(ACTION_ATTR, "delete"), (TYPE_ATTR, "videos"), (ID_ATTR, "v1")])
        .await;

    assert!(!handled);
    assert_eq!(console.list(ContentType::Videos).cards.len(), 1);
    assert_eq!(console.toasts().error_count(), 1);
}

#[tokio::test]
async fn delete_keeps_path_like_ids_in_one_segment() {
    let server = MockServer::start();
    let users = server.mock(|when, then| {
        when.method("DELETE").path("/api/admin/users/1");
        then.status(200).body(r#"{"ok":true}"#);
    });
    let record = server.mock(|when, then| {
        when.method("DELETE").path("/api/admin/blog/..%2Fusers%2F1");
        then.status(404).body(r#"{"error":"Nao encontrado"}"#);
    });
    let console = console(&server);

    let handled = console
        .click(&[(ACTION_ATTR, "delete"), (TYPE_ATTR, "blog"), (ID_ATTR, "../users/1")])
        .await;

    assert!(!handled);
    record.assert();
    users.assert_calls(0);
    assert_eq!(console.toasts().snapshot()[0].text, "Nao encontrado");
}

#[tokio::test]
async fn edit_then_submit_updates_and_returns_to_clean() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method("GET").path("/api/events");
        then.status(200).body(
            r#"[{"id":"42","title":"Roda","description":"d","category":"c","date_time":"2025-01-01T10:00","image_url":"","status":"open","is_recorded":true}]"#,
        );
    });
    let update = server.mock(|when, then| {
        when.method("PUT")
            .path("/api/admin/events/42")
            .json_body_includes(r#"{"title":"Roda de conversa","isRecorded":true}"#);
        then.status(200).body(r#"{"ok":true}"#);
    });
    mock_json(&server, "GET", "/api/admin/stats", 200, r#"{"events":1}"#);

    let console = console(&server);
    console.load_list(ContentType::Events).await;
    assert!(
        console
            .click(&[(ACTION_ATTR, "edit"), (TYPE_ATTR, "events"), (ID_ATTR, "42")])
            .await
    );
    assert_eq!(console.form(ContentType::Events).editing_id(), Some("42"));

    console.with_form_mut(ContentType::Events, |form| {
        form.set_input("title", "Roda de conversa")
    });
    assert!(console.submit(ContentType::Events).await);

    update.assert();
    list.assert_calls(2);
    assert_eq!(console.form(ContentType::Events).edit_id, None);
    assert_eq!(console.stats().value("events"), Some("1"));

    let toasts = console.toasts().snapshot();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Info);
    assert_eq!(toasts[0].text, SAVED_MESSAGE);
}

#[tokio::test]
async fn submit_without_marker_creates() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method("POST")
            .path("/api/admin/support-orgs")
            .json_body_includes(r#"{"name":"CVV","tags":["escuta","24h"]}"#);
        then.status(201).body(r#"{"ok":true,"id":"s9"}"#);
    });
    mock_json(&server, "GET", "/api/support-orgs", 200, r#"[{"id":"s9","name":"CVV"}]"#);
    mock_json(&server, "GET", "/api/admin/stats", 200, "{}");

    let console = console(&server);
    console.with_form_mut(ContentType::Support, |form| {
        form.set_input("name", "CVV");
        form.set_input("tags", "escuta, 24h ,");
    });
    assert!(console.submit(ContentType::Support).await);

    create.assert();
    assert_eq!(console.list(ContentType::Support).cards[0].label, "CVV");
}

#[tokio::test]
async fn save_without_ok_flag_keeps_form_and_marker() {
    let server = MockServer::start();
    mock_json(&server, "GET", "/api/tests", 200, r#"[{"id":"t1","name":"GAD-7"}]"#);
    mock_json(&server, "PUT", "/api/admin/tests/t1", 200, r#"{"saved":true}"#);
    let stats = server.mock(|when, then| {
        when.method("GET").path("/api/admin/stats");
        then.status(200).body("{}");
    });

    let console = console(&server);
    console.load_list(ContentType::Tests).await;
    console
        .click(&[(ACTION_ATTR, "edit"), (TYPE_ATTR, "tests"), (ID_ATTR, "t1")])
        .await;

    assert!(!console.submit(ContentType::Tests).await);
    let form = console.form(ContentType::Tests);
    assert_eq!(form.editing_id(), Some("t1"));
    assert_eq!(form.control("name").map(|c| c.value.as_str()), Some("GAD-7"));
    assert!(console.toasts().is_empty());
    stats.assert_calls(0);
}

#[tokio::test]
async fn rejected_save_surfaces_server_error_once() {
    let server = MockServer::start();
    mock_json(&server, "POST", "/api/admin/news", 400, r#"{"error":"Titulo obrigatorio"}"#);

    let console = console(&server);
    assert!(!console.submit(ContentType::News).await);

    let toasts = console.toasts().snapshot();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].text, "Titulo obrigatorio");
}

#[tokio::test]
async fn clear_action_restores_defaults_and_drops_marker() {
    let server = MockServer::start();
    mock_json(&server, "GET", "/api/tests", 200, r#"[{"id":"t1","name":"GAD-7","category":"x"}]"#);

    let form = FormBinding::with_controls(
        ContentType::Tests,
        vec![
            FormControl::text("name").with_default_value("Novo"),
            FormControl::text("category"),
            FormControl::text("durationMinutes"),
        ],
    );
    let console = console(&server).with_form(form);
    console.load_list(ContentType::Tests).await;
    console
        .click(&[(ACTION_ATTR, "edit"), (TYPE_ATTR, "tests"), (ID_ATTR, "t1")])
        .await;
    assert!(console.click(&[(CLEAR_ATTR, "#admin-form-tests")]).await);

    let form = console.form(ContentType::Tests);
    assert_eq!(form.edit_id, None);
    assert_eq!(form.control("name").map(|c| c.value.as_str()), Some("Novo"));
    assert_eq!(form.control("category").map(|c| c.value.as_str()), Some(""));
}

#[tokio::test]
async fn edit_without_rendered_card_is_ignored() {
    let server = MockServer::start();
    let console = console(&server);
    let handled = console
        .click(&[(ACTION_ATTR, "edit"), (TYPE_ATTR, "blog"), (ID_ATTR, "nope")])
        .await;

    assert!(!handled);
    assert_eq!(console.form(ContentType::Blog).edit_id, None);
}
