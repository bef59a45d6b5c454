//! The single HTTP entry point. Every failure is reported as a toast and
//! collapsed to `None`; callers only distinguish data from "did not happen".

use reqwest::{
    Client, Method, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue},
};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use crate::application::{error::ConsoleError, toast::ToastStack};
use crate::config::ApiSettings;
use crate::domain::entities::{is_truthy, value_text};

pub const ADMIN_REQUIRED_MESSAGE: &str = "Acesso admin necessario.";
pub const REQUEST_FAILED_MESSAGE: &str = "Erro na solicitacao.";
pub const TRANSPORT_FAILED_MESSAGE: &str = "Falha de conexao com o servidor.";

#[derive(Clone, Debug)]
pub struct Gateway {
    client: Client,
    base: String,
    headers: HeaderMap,
    toasts: ToastStack,
}

impl Gateway {
    pub fn new(settings: &ApiSettings, toasts: ToastStack) -> Result<Self, ConsoleError> {
        let mut builder = Client::builder().user_agent(Self::user_agent());
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base: settings.base_url.as_str().trim_end_matches('/').to_string(),
            headers: Self::default_headers(settings)?,
            toasts,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("admin-console/", env!("CARGO_PKG_VERSION"))
    }

    /// JSON content type, then configured credentials on top.
    fn default_headers(settings: &ApiSettings) -> Result<HeaderMap, ConsoleError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = settings.bearer_token.as_deref() {
            headers.insert(
                AUTHORIZATION,
                header_value("authorization", &format!("Bearer {token}"))?,
            );
        }
        if let Some(cookie) = settings.cookie.as_deref() {
            headers.insert(COOKIE, header_value("cookie", cookie)?);
        }
        Ok(headers)
    }

    pub fn toasts(&self) -> &ToastStack {
        &self.toasts
    }

    pub fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}{path}", self.base))
    }

    /// `collection` with `id` appended as one percent-encoded path segment, so
    /// an id never climbs out of its collection. Dot segments have no such
    /// encoding and are refused.
    pub fn item_url(&self, collection: &str, id: &str) -> Option<Url> {
        if matches!(id, "" | "." | "..") {
            return None;
        }
        let mut url = self.url(collection).ok()?;
        url.path_segments_mut().ok()?.push(id);
        Some(url)
    }

    pub async fn get(&self, path: &str) -> Option<Value> {
        self.request(Method::GET, path, None).await
    }

    pub async fn delete_item(&self, collection: &str, id: &str) -> Option<Value> {
        self.request_item(Method::DELETE, collection, id, None).await
    }

    /// Send one request relative to the API base.
    ///
    /// 401/403 and other non-2xx statuses push an error toast and yield `None`;
    /// a 2xx body that is not JSON yields an empty object.
    pub async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Option<Value> {
        match self.url(path) {
            Ok(url) => self.send(method, url, body).await,
            Err(err) => {
                warn!(path, error = %err, "Invalid request URL");
                self.toasts.error(REQUEST_FAILED_MESSAGE);
                None
            }
        }
    }

    /// As [`Gateway::request`], addressed at one record of `collection`.
    pub async fn request_item(
        &self,
        method: Method,
        collection: &str,
        id: &str,
        body: Option<&Value>,
    ) -> Option<Value> {
        match self.item_url(collection, id) {
            Some(url) => self.send(method, url, body).await,
            None => {
                warn!(collection, id, "Invalid record id");
                self.toasts.error(REQUEST_FAILED_MESSAGE);
                None
            }
        }
    }

    async fn send(&self, method: Method, url: Url, body: Option<&Value>) -> Option<Value> {
        debug!(%method, %url, "Sending request");
        let path = url.path().to_string();
        let mut req = self
            .client
            .request(method.clone(), url)
            .headers(self.headers.clone());
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(err) => {
                warn!(%method, path, error = %err, "Request failed before a response arrived");
                self.toasts.error(TRANSPORT_FAILED_MESSAGE);
                return None;
            }
        };

        let status = resp.status();
        let data = match resp.bytes().await {
            Ok(bytes) => parse_body(&bytes),
            Err(err) => {
                warn!(%method, path, error = %err, "Failed to read response body");
                Value::Object(Map::new())
            }
        };

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(%method, path, %status, "Admin access denied");
            self.toasts.error(ADMIN_REQUIRED_MESSAGE);
            return None;
        }
        if !status.is_success() {
            let message = data
                .get("error")
                .filter(|error| is_truthy(error))
                .map_or_else(|| REQUEST_FAILED_MESSAGE.to_string(), value_text);
            warn!(%method, path, %status, error_message = %message, "Request rejected");
            self.toasts.error(message);
            return None;
        }

        debug!(%method, path, %status, "Request succeeded");
        Some(data)
    }
}

fn header_value(name: &'static str, raw: &str) -> Result<HeaderValue, ConsoleError> {
    HeaderValue::from_str(raw).map_err(|err| ConsoleError::InvalidHeader {
        name,
        reason: err.to_string(),
    })
}

fn parse_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::Object(Map::new()))
}
