//! View models and their HTML templates.

pub mod views;
