//! Feature modules. Each has a `router.rs` building its routes and a
//! `controller.rs` of handlers; business logic lives in `service.rs`.

pub mod auth;
pub mod users;
