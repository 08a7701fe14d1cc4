use super::user::User;
use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};
use axum::{
    extract::{FromRequestParts, OriginalUri, Request, State},
    http::{request::Parts, Extensions},
    middleware::Next,
    response::Response,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::sync::Arc;
use tower_sessions::Session;

// Paths are already percent-encoded by the URI parser; only characters that
// would split the login URL's query string need escaping.
const RETURN_PATH: &AsciiSet = &CONTROLS.add(b' ').add(b'&').add(b'+').add(b'#');

/// Per-request authentication state
///
/// Wraps the user built by [`load_user`]. An unauthenticated user is a valid
/// value here; use [`AuthContext::is_authenticated`] or the [`login_required`]
/// guard to tell the two apart.
#[derive(Clone, Debug)]
pub struct AuthContext<U> {
    user: U,
}

impl<U: User> AuthContext<U> {
    pub fn new(user: U) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &U {
        &self.user
    }

    pub fn into_user(self) -> U {
        self.user
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_authenticated()
    }

    /// Look the context up in a request's extensions
    pub fn from_extensions(extensions: &Extensions) -> AppResult<Self> {
        extensions
            .get::<AuthContext<U>>()
            .cloned()
            .ok_or(AppError::MiddlewareMissing("auth"))
    }
}

impl<S, U> FromRequestParts<S> for AuthContext<U>
where
    S: Send + Sync,
    U: User,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        AuthContext::from_extensions(&parts.extensions)
    }
}

/// Builds the current user for a request from its session
///
/// Holds the injected user factory and the auth settings. Cloning is cheap, so
/// it can be used directly as middleware state.
pub struct Authenticator<U> {
    factory: Arc<dyn Fn() -> U + Send + Sync>,
    config: AuthConfig,
}

impl<U> Clone for Authenticator<U> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
            config: self.config.clone(),
        }
    }
}

impl<U: User> Authenticator<U> {
    pub fn new<F>(config: AuthConfig, factory: F) -> Self
    where
        F: Fn() -> U + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Resolve the session's user
    ///
    /// Never fails. Session store errors, undecodable ids and ids that don't
    /// resolve are logged and leave the user in its default, unauthenticated state.
    pub async fn authenticate(&self, session: &Session) -> AuthContext<U> {
        let user_id = match session.get::<U::Id>(&self.config.session_key).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Could not read user id from session: {}", e);
                None
            }
        };

        let mut user = (self.factory)();

        match user_id {
            Some(id) => match user.get_by_id(id).await {
                Ok(()) => user.login(),
                Err(e) => tracing::warn!("Login error: {}", e),
            },
            None => tracing::debug!("No user id in session"),
        }

        AuthContext::new(user)
    }
}

/// Middleware populating [`AuthContext`] for every request
///
/// Must run inside the session layer. The context is stored whether or not the
/// user authenticated; like the model, it is write-once per request.
#[tracing::instrument(skip_all)]
pub async fn load_user<U: User>(
    State(auth): State<Authenticator<U>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    if request.extensions().get::<AuthContext<U>>().is_some() {
        tracing::warn!("auth context already attached to request, keeping the existing one");
    } else {
        let context = auth.authenticate(&session).await;
        request.extensions_mut().insert(context);
    }

    next.run(request).await
}

/// Guard for routes that require a logged in user
///
/// Install with `route_layer` on the protected routes, inside [`load_user`].
/// Unauthenticated requests are halted with [`AppError::LoginRequired`], which
/// redirects to the login page with the original path in the return parameter.
/// The path includes any prefix stripped by `Router::nest`.
pub async fn login_required<U: User>(
    State(config): State<AuthConfig>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let context = AuthContext::<U>::from_extensions(request.extensions())?;

    if !context.is_authenticated() {
        let path = match request.extensions().get::<OriginalUri>() {
            Some(OriginalUri(uri)) => uri.path(),
            None => request.uri().path(),
        };
        return Err(AppError::LoginRequired {
            location: login_redirect(&config, path),
        });
    }

    Ok(next.run(request).await)
}

/// Build the login URL carrying `return_path`
pub fn login_redirect(config: &AuthConfig, return_path: &str) -> String {
    let separator = if config.login_path.contains('?') { '&' } else { '?' };
    format!(
        "{}{}{}={}",
        config.login_path,
        separator,
        config.redirect_param,
        utf8_percent_encode(return_path, RETURN_PATH)
    )
}
