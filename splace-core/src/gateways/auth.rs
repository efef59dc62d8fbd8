use super::Result;
use crate::entities::*;

pub trait AuthGateway {
    /// The session of the current user, if any.
    ///
    /// Implementations refresh sessions that are about to expire
    /// and return `None` if that fails.
    fn current_session(&self) -> Result<Option<Session>>;

    /// Registers a new identity. Depending on the backend
    /// settings this might already sign in the user.
    fn sign_up(&self, email: &EmailAddress, password: &str) -> Result<AuthUser>;

    fn sign_in_with_password(&self, email: &EmailAddress, password: &str) -> Result<Session>;

    /// The URL the user has to open to sign in with a third party provider.
    fn oauth_authorize_url(&self, provider: OAuthProvider, redirect_to: Option<&str>) -> String;

    fn sign_out(&self) -> Result<()>;
}
