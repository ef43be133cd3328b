use tracing::instrument;

use crate::middleware::auth::AuthUser;

#[instrument(fields(user_id = %user.id, role = %user.role))]
pub async fn admin_area(user: AuthUser) -> &'static str {
    "Admin User Successfully"
}

#[instrument(fields(user_id = %user.id, role = %user.role))]
pub async fn manager_area(user: AuthUser) -> &'static str {
    "Manager User Successfully"
}

#[instrument(fields(user_id = %user.id, role = %user.role))]
pub async fn user_area(user: AuthUser) -> &'static str {
    "User Register Successfully"
}
