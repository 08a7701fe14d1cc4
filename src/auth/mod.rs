//! # Session Authentication
//!
//! Loads the current user from session state, guards routes that need a login,
//! and keeps the session in step with logins and logouts.
//!
//! ## Pieces
//! - [`User`]: trait the application implements for its own user type
//! - [`Authenticator`]: user factory plus settings; [`load_user`] uses it to put an
//!   [`AuthContext`] on every request
//! - [`login_required`]: guard that redirects unauthenticated requests to the login page
//! - [`authenticate_session`], [`update_user`], [`logout`]: session bookkeeping
//!
//! ## Wiring
//! ```ignore
//! let auth = Authenticator::new(config.clone(), || MyUser::default());
//!
//! let protected = Router::new()
//!     .route("/secret", get(secret))
//!     .route_layer(from_fn_with_state(config.clone(), login_required::<MyUser>));
//!
//! let app = Router::new()
//!     .merge(protected)
//!     .layer(from_fn_with_state(auth, load_user::<MyUser>))
//!     .layer(session_layer);
//! ```
//!
//! ## States
//! A user starts unauthenticated. It becomes authenticated when the session id
//! resolves through [`User::get_by_id`] and [`User::login`] runs, and goes back
//! through [`logout`]. Nothing is kept between requests besides the session entry.

mod middleware;
mod session;
mod user;


pub use middleware::{load_user, login_redirect, login_required, AuthContext, Authenticator};
pub use session::{authenticate_session, logout, update_user};
pub use user::User;
