//! Feature modules. Each follows the same structure: `controller.rs` for
//! HTTP handlers, `service.rs` for provider calls, `model.rs` for DTOs,
//! `router.rs` for route wiring.

pub mod auth;
pub mod classes;
pub mod cours;
pub mod files;
pub mod users;
