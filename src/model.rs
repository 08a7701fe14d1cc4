//! # Model Accessor
//!
//! Attaches the application's database handle to every request so handlers can
//! reach it without threading `State<AppState>` through.
//!
//! ## Usage
//! ```ignore
//! let app = Router::new()
//!     .route("/items", get(list_items))
//!     .layer(axum::middleware::from_fn_with_state(state.clone(), attach_model))
//!     .with_state(state);
//!
//! async fn list_items(model: Model) -> AppResult<Json<Value>> {
//!     let rows = sqlx::query("SELECT ...").fetch_all(model.db()).await?;
//!     // ...
//! }
//! ```
//!
//! If a handler extracts [`Model`] on a route where [`attach_model`] was not
//! installed, extraction fails with [`AppError::MiddlewareMissing`] and the
//! client gets a 500 naming the missing middleware.

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, Extensions},
    middleware::Next,
    response::Response,
};
use sqlx::SqlitePool;

/// Per-request holder of the database handle
#[derive(Clone, Debug)]
pub struct Model {
    db: SqlitePool,
}

impl Model {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// The database handle attached to this request
    pub fn db(&self) -> &SqlitePool {
        &self.db
    }

    /// Look the model up in a request's extensions
    pub fn from_extensions(extensions: &Extensions) -> AppResult<Self> {
        extensions
            .get::<Model>()
            .cloned()
            .ok_or(AppError::MiddlewareMissing("model"))
    }
}

/// Middleware storing the process-wide pool on the request
///
/// The model is write-once: if an outer layer already attached one, it is kept.
#[tracing::instrument(skip_all)]
pub async fn attach_model(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    if request.extensions().get::<Model>().is_some() {
        tracing::warn!("model already attached to request, keeping the existing one");
    } else {
        request.extensions_mut().insert(Model::new(state.db.clone()));
    }

    next.run(request).await
}

impl<S> FromRequestParts<S> for Model
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Model::from_extensions(&parts.extensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use axum::{body::Body, http::StatusCode, routing::get, Router};
    use http_body_util::BodyExt;
    use sqlx::sqlite::SqlitePoolOptions;
    use tower::ServiceExt;

    // A single connection keeps every query on the same in-memory database
    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    async fn read_marker(model: Model) -> AppResult<String> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM marker")
            .fetch_one(model.db())
            .await?;
        Ok(value)
    }

    async fn body_text(response: Response) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.into()).unwrap()
    }

    #[tokio::test]
    async fn handler_sees_the_configured_pool() {
        let pool = memory_pool().await;
        sqlx::query("CREATE TABLE marker (value TEXT NOT NULL)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO marker (value) VALUES ('configured')")
            .execute(&pool)
            .await
            .unwrap();

        let state = AppState::from_parts(pool, AuthConfig::default());
        let app = Router::new()
            .route("/", get(read_marker))
            .layer(axum::middleware::from_fn_with_state(state.clone(), attach_model))
            .with_state(state);

        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, "configured");
    }

    #[tokio::test]
    async fn extraction_without_middleware_reports_it() {
        let app: Router = Router::new().route("/", get(read_marker));

        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(res).await.contains("model middleware not installed"));
    }

    #[tokio::test]
    async fn first_attached_model_wins() {
        let first = memory_pool().await;
        sqlx::query("CREATE TABLE marker (value TEXT NOT NULL)")
            .execute(&first)
            .await
            .unwrap();
        sqlx::query("INSERT INTO marker (value) VALUES ('first')")
            .execute(&first)
            .await
            .unwrap();
        let second = memory_pool().await;

        let inner = AppState::from_parts(second, AuthConfig::default());
        let outer = AppState::from_parts(first, AuthConfig::default());
        let app = Router::new()
            .route("/", get(read_marker))
            .layer(axum::middleware::from_fn_with_state(inner.clone(), attach_model))
            .layer(axum::middleware::from_fn_with_state(outer, attach_model))
            .with_state(inner);

        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, "first");
    }
}
