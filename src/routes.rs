//! # Routes
//!
//! Builds the application router and installs the request middleware in order:
//! session layer (added by the caller, outermost) → model → auth → guard → handler.

use crate::account::SessionAccount;
use crate::auth::{load_user, login_required, Authenticator};
use crate::handlers::auth::{login, login_page, logout, register, session_info};
use crate::handlers::health::health_check;
use crate::handlers::users::get_current_user;
use crate::model::attach_model;
use crate::state::AppState;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

/// Build the application router
///
/// The returned router expects a `tower_sessions::SessionManagerLayer` to be
/// layered on top of it; the auth middleware reads the session from there.
pub fn router(state: AppState) -> Router {
    // Each request gets a fresh, empty user that can load itself from the pool
    let pool = state.db.clone();
    let authenticator = Authenticator::new(state.auth.clone(), move || {
        SessionAccount::new(pool.clone())
    });

    // Routes that require a logged-in user
    let protected_routes = Router::new()
        .route("/api/users/me", get(get_current_user))
        .route_layer(from_fn_with_state(
            state.auth.clone(),
            login_required::<SessionAccount>,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/login", get(login_page))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/session", get(session_info))
        .merge(protected_routes)
        // Layers run outside-in, so the model is attached before the user is loaded
        .layer(from_fn_with_state(authenticator, load_user::<SessionAccount>))
        .layer(from_fn_with_state(state.clone(), attach_model))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use axum::body::Body;
    use axum::extract::Request;
    use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
    use axum::http::{Method, StatusCode};
    use axum::response::Response;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use sqlx::sqlite::SqlitePoolOptions;
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    async fn test_app() -> Router {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();

        let state = AppState::from_parts(pool, AuthConfig::default());
        router(state).layer(SessionManagerLayer::new(MemoryStore::default()))
    }

    fn json_request(method: Method, uri: &str, body: Value, cookie: Option<&str>) -> Request {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(res: Response) -> Value {
        let body = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn session_cookie(res: &Response) -> String {
        res.headers()
            .get(SET_COOKIE)
            .expect("login should set the session cookie")
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    async fn register_alice(app: &Router) {
        let res = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/auth/register",
                json!({ "username": "alice", "display_name": "Alice Smith", "password": "hunter22" }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn protected_route_redirects_anonymous_visitors() {
        let app = test_app().await;

        let res = app.oneshot(get_request("/api/users/me", None)).await.unwrap();

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(LOCATION).unwrap(),
            "/login?return_url=/api/users/me"
        );
    }

    #[tokio::test]
    async fn login_page_echoes_return_url() {
        let app = test_app().await;

        let res = app
            .oneshot(get_request("/login?return_url=/api/users/me", None))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["return_url"], "/api/users/me");
    }

    #[tokio::test]
    async fn anonymous_session_info() {
        let app = test_app().await;

        let res = app.oneshot(get_request("/api/auth/session", None)).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await, json!({ "authenticated": false }));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let app = test_app().await;
        register_alice(&app).await;

        let res = app
            .oneshot(json_request(
                Method::POST,
                "/api/auth/login",
                json!({ "username": "alice", "password": "wrong" }),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.headers().get(SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_bad_request() {
        let app = test_app().await;
        register_alice(&app).await;

        let res = app
            .oneshot(json_request(
                Method::POST,
                "/api/auth/register",
                json!({ "username": "alice", "display_name": "Other", "password": "pw" }),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_then_logout() {
        let app = test_app().await;
        register_alice(&app).await;

        let res = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/auth/login",
                json!({ "username": "alice", "password": "hunter22" }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = session_cookie(&res);
        let user_id = body_json(res).await["user_id"].clone();

        let res = app
            .clone()
            .oneshot(get_request("/api/users/me", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let profile = body_json(res).await;
        assert_eq!(profile["id"], user_id);
        assert_eq!(profile["username"], "alice");
        assert!(profile.get("password_hash").is_none());

        let res = app
            .clone()
            .oneshot(get_request("/api/auth/session", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(
            body_json(res).await,
            json!({ "authenticated": true, "user_id": user_id })
        );

        let res = app
            .clone()
            .oneshot(json_request(Method::POST, "/api/auth/logout", json!({}), Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .oneshot(get_request("/api/users/me", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }
}
