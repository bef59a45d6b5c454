//! Console behaviour: form binding, payload mapping, rendering and the controller.

pub mod actions;
pub mod console;
pub mod error;
pub mod form;
mod lock;
pub mod payload;
pub mod render;
pub mod toast;
