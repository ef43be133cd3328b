//! Role-gated demonstration routes.

pub mod controller;
pub mod router;
