//! Headless admin console for the content API.
//!
//! [`application::console::AdminConsole`] keeps the session, stats, user table
//! and one list plus form per content type, and talks to the API only through
//! [`infra::gateway::Gateway`].

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;

pub use application::console::AdminConsole;
pub use application::error::ConsoleError;
pub use domain::types::ContentType;
