use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{email::EmailAddress, id::Id, time::Timestamp};

/// Third party identity providers that are enabled for the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum OAuthProvider {
    Github,
    Google,
    Kakao,
}

/// The identity behind a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Id,
    pub email: Option<EmailAddress>,
    pub created_at: Option<Timestamp>,
}

/// An authenticated session issued by the backend.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token  : String,
    pub refresh_token : String,
    pub expires_at    : Option<Timestamp>,
    pub user          : AuthUser,
}

impl Session {
    pub fn user_id(&self) -> &Id {
        &self.user.id
    }

    /// A session without an expiry never expires.
    pub fn expires_within(&self, now: Timestamp, margin_secs: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at.as_secs() - margin_secs <= now.as_secs(),
            None => false,
        }
    }
}
