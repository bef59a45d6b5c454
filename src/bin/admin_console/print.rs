#![deny(clippy::all, clippy::pedantic)]

use admin_console::{ConsoleError, application::toast::Toast};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), ConsoleError> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}

/// Toasts go to stderr so stdout stays machine-readable.
pub fn print_toasts(toasts: &[Toast]) {
    for toast in toasts {
        eprintln!("[{}] {}", toast.kind.as_variant(), toast.text);
    }
}
