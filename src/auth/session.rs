//! Login/logout helpers that keep the session in sync with the user object.
//!
//! Session store errors are returned as-is so callers can decide how to report them.

use super::user::User;
use crate::config::AuthConfig;
use tower_sessions::{session, Session};

/// Mark the user as authenticated and record them in the session
///
/// Call this after the user's credentials have been validated. The session id
/// is rotated first, so an id handed out before login is never authenticated.
pub async fn authenticate_session<U: User>(
    session: &Session,
    config: &AuthConfig,
    user: &mut U,
) -> Result<(), session::Error> {
    user.login();
    session.cycle_id().await?;
    update_user(session, config, user).await
}

/// Write the user's unique id into the session and persist it
///
/// Also useful when a change is made to the user that needs to persist across requests.
pub async fn update_user<U: User>(
    session: &Session,
    config: &AuthConfig,
    user: &U,
) -> Result<(), session::Error> {
    session.insert(&config.session_key, user.unique_id()).await?;
    session.save().await
}

/// Clear the user and remove their id from the session
pub async fn logout<U: User>(
    session: &Session,
    config: &AuthConfig,
    user: &mut U,
) -> Result<(), session::Error> {
    user.logout();
    session.remove_value(&config.session_key).await?;
    session.save().await
}
