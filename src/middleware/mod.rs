//! Request gates.
//!
//! - [`auth`]: resolves the caller from a bearer header or `accessToken`
//!   cookie and attaches an [`auth::AuthUser`] to the request
//! - [`role`]: rejects callers whose stored role is not on a route's
//!   allow-list
//!
//! The auth gate must run before any role gate:
//!
//! ```ignore
//! Router::new()
//!     .route("/admin", post(handler).route_layer(middleware::from_fn_with_state(
//!         RoleGate::new([UserRole::Admin]),
//!         enforce_roles,
//!     )))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

pub mod auth;
pub mod role;
