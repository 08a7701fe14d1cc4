use crate::account::SessionAccount;
use crate::auth::{self, AuthContext, User};
use crate::db::accounts;
use crate::error::{AppError, AppResult};
use crate::model::Model;
use crate::password;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tower_sessions::Session;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub display_name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// Login page: where the guard sends unauthenticated visitors

pub async fn login_page(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let return_url = params.get(&state.auth.redirect_param);

    Json(json!({
        "message": "Authentication required",
        "login_endpoint": "/api/auth/login",
        "return_url": return_url,
    }))
}

// Account endpoints

pub async fn register(model: Model, Json(req): Json<RegisterRequest>) -> AppResult<Json<Value>> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let hash = password::hash_password(&req.password)?;
    let account =
        accounts::create_account(model.db(), &req.username, &req.display_name, &hash).await?;
    tracing::info!("Registered account {}", account.id);

    Ok(Json(json!({
        "success": true,
        "user_id": account.id,
        "message": "Registration successful"
    })))
}

pub async fn login(
    State(state): State<AppState>,
    model: Model,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<Value>> {
    let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

    let account = match accounts::find_by_username(model.db(), &req.username).await {
        Ok(account) => account,
        Err(AppError::NotFound(_)) => return Err(invalid()),
        Err(e) => return Err(e),
    };

    if !password::verify_password(&req.password, &account.password_hash) {
        return Err(invalid());
    }

    let mut user = SessionAccount::from_account(model.db().clone(), account);
    auth::authenticate_session(&session, &state.auth, &mut user).await?;

    Ok(Json(json!({
        "success": true,
        "user_id": user.unique_id(),
        "message": "Authentication successful"
    })))
}

pub async fn logout(
    State(state): State<AppState>,
    context: AuthContext<SessionAccount>,
    session: Session,
) -> AppResult<Json<Value>> {
    let mut user = context.into_user();
    auth::logout(&session, &state.auth, &mut user).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Logged out successfully"
    })))
}

pub async fn session_info(context: AuthContext<SessionAccount>) -> Json<Value> {
    match context.user().account() {
        Some(account) if context.is_authenticated() => Json(json!({
            "authenticated": true,
            "user_id": account.id
        })),
        _ => Json(json!({
            "authenticated": false
        })),
    }
}
