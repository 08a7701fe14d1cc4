//! # User Handlers
//!
//! Handlers for the logged-in user's own data.

use crate::account::SessionAccount;
use crate::auth::AuthContext;
use crate::error::{AppError, AppResult};
use axum::Json;
use serde_json::{json, Value};

/// Get current authenticated user's profile
///
/// ## Route
/// GET /api/users/me
///
/// ## Authentication
/// Protected by the `login_required` guard, so the context is always
/// authenticated here. The account was loaded by the auth middleware; no
/// extra query is needed.
///
/// ## Response
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "username": "alice",
///   "display_name": "Alice Smith",
///   "created_at": "2024-01-15T10:30:00Z"
/// }
/// ```
pub async fn get_current_user(context: AuthContext<SessionAccount>) -> AppResult<Json<Value>> {
    let account = context
        .user()
        .account()
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

    // The password hash stays server side
    Ok(Json(json!({
        "id": account.id,
        "username": account.username,
        "display_name": account.display_name,
        "created_at": account.created_at
    })))
}
