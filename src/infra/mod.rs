//! Infrastructure adapters: HTTP gateway and telemetry.

pub mod error;
pub mod gateway;
pub mod telemetry;
