use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

/// Capabilities the auth middleware needs from an application's user type
///
/// The middleware never looks inside the user. It builds a fresh value through
/// the factory given to [`super::Authenticator::new`], hydrates it with
/// [`User::get_by_id`] when the session carries an id, and asks
/// [`User::is_authenticated`] when guarding a route.
///
/// A freshly built value must report `is_authenticated() == false`.
#[async_trait]
pub trait User: Clone + Send + Sync + 'static {
    /// Unique identifier persisted in the session
    type Id: Serialize + DeserializeOwned + Debug + Send + Sync;

    /// Error returned when a user cannot be loaded by id
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return whether this user is logged in or not
    fn is_authenticated(&self) -> bool;

    /// Set any flags or extra data that should be available
    fn login(&mut self);

    /// Clear any sensitive data out of the user
    fn logout(&mut self);

    /// Return the unique identifier of this user object
    fn unique_id(&self) -> Self::Id;

    /// Populate this user object with values
    async fn get_by_id(&mut self, id: Self::Id) -> Result<(), Self::Error>;
}
