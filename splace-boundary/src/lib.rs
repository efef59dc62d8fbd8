//! Rows and payloads exactly as the hosted backend stores and returns them.
//!
//! Column names follow the backend tables, which is why some of them
//! differ from the names of the corresponding entity fields.

use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[cfg(feature = "entity-conversions")]
pub use conv::ConversionError;

pub const TABLE_PLACES: &str = "study_places";
pub const TABLE_COMMENTS: &str = "comments";
pub const TABLE_SCRAPS: &str = "study_place_scraps";
pub const TABLE_PROFILES: &str = "user_profiles";

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct StudyPlace {
    pub place_id        : String,
    pub category        : String,
    pub place_name      : String,
    pub place_type      : String,
    pub photo_url       : Option<String>,
    #[serde(default)]
    pub rating          : f64,
    pub address         : Option<String>,
    pub operating_hours : Option<String>,
    pub contact         : Option<String>,
    pub fee             : Option<String>,
    pub website_url     : Option<String>,
    pub notes           : Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct PlaceName {
    pub place_id: String,
    pub place_name: String,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Comment {
    pub comment_id         : String,
    pub study_place_id     : String,
    pub user_id            : String,
    pub rating             : String,
    #[serde(default)]
    pub title              : String,
    pub contents           : String,
    pub created_at         : String,
    pub nickname           : Option<String>,
    pub user_profile_image : Option<String>,
}

/// A comment of a user joined with the name of the commented place.
#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct CommentWithPlace {
    #[serde(flatten)]
    pub comment     : Comment,
    pub study_place : Option<PlaceName>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct NewComment {
    pub study_place_id     : String,
    pub user_id            : String,
    pub rating             : String,
    pub title              : String,
    pub contents           : String,
    pub nickname           : String,
    pub user_profile_image : Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct CommentUpdate {
    pub rating: String,
    pub title: String,
    pub contents: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct CommentAuthorUpdate {
    pub nickname: String,
    pub user_profile_image: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Scrap {
    pub user_id: String,
    pub study_place_id: String,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct UserProfile {
    pub user_uid           : String,
    pub nickname           : String,
    pub email              : String,
    pub user_type          : String,
    pub created_at         : String,
    pub user_profile_image : Option<String>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct UserProfileUpdate {
    pub nickname           : String,
    pub email              : String,
    pub user_type          : String,
    pub user_profile_image : String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct RefreshToken {
    pub refresh_token: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
    pub created_at: Option<String>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Session {
    pub access_token  : String,
    #[serde(default)]
    pub token_type    : String,
    pub expires_in    : Option<i64>,
    /// Seconds since the Unix epoch
    pub expires_at    : Option<i64>,
    pub refresh_token : String,
    pub user          : AuthUser,
}

/// Depending on the backend settings a sign-up either
/// returns a complete session or only the new user.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(Session),
    User(AuthUser),
}

impl SignUpResponse {
    pub fn user(&self) -> &AuthUser {
        match self {
            Self::Session(session) => &session.user,
            Self::User(user) => user,
        }
    }
}

/// Response of a blob upload.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct StoredObject {
    #[serde(rename = "Key")]
    pub key: String,
}

/// The different services of the backend report errors in different shapes.
#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct ErrorBody {
    pub message: Option<String>,
    pub msg: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
    pub error_code: Option<String>,
    pub code: Option<ErrorCode>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.msg.as_deref())
            .or(self.error_description.as_deref())
            .or(self.error.as_deref())
    }

    /// Machine readable error code, if any.
    pub fn code(&self) -> Option<String> {
        self.error_code
            .clone()
            .or_else(|| self.code.as_ref().map(ToString::to_string))
            .or_else(|| self.error.clone())
    }
}

/// Error codes are numbers for some services and strings for others.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(untagged)]
pub enum ErrorCode {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}
