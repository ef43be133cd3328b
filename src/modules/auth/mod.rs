//! Registration, login, token refresh, logout and account self-service.

pub mod controller;
pub mod cookies;
pub mod router;
pub mod service;
