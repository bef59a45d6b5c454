//! Transient success/error notifications.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;
use uuid::Uuid;

use super::lock::mutex_lock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Info,
    Error,
}

impl ToastKind {
    pub fn as_variant(self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Error => "error",
        }
    }
}

pub const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(2600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub text: String,
    pub ttl: Duration,
}

impl Toast {
    pub fn info_with_ttl(text: impl Into<String>, ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: ToastKind::Info,
            text: text.into(),
            ttl,
        }
    }

    pub fn error_with_ttl(text: impl Into<String>, ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: ToastKind::Error,
            text: text.into(),
            ttl,
        }
    }
}

/// Shared stack of pending toasts. Cloning shares the same stack.
#[derive(Debug, Clone)]
pub struct ToastStack {
    inner: Arc<Mutex<Vec<Toast>>>,
    ttl: Duration,
}

impl Default for ToastStack {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL)
    }
}

impl ToastStack {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Vec::new())),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Toast>> {
        mutex_lock(&self.inner, "toasts", "access")
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(Toast::info_with_ttl(text, self.ttl));
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(Toast::error_with_ttl(text, self.ttl));
    }

    pub fn push(&self, toast: Toast) {
        self.lock().push(toast);
    }

    pub fn snapshot(&self) -> Vec<Toast> {
        self.lock().clone()
    }

    /// Remove and return every pending toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|toast| toast.kind == ToastKind::Error)
            .count()
    }
}
