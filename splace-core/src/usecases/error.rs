use crate::{entities::NicknameError, gateways, repositories, util::validate::CommentInvalidation};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid email address")]
    EmailAddress,
    #[error("The password needs at least 8 characters with letters, digits and one of @$!%*#?&")]
    Password,
    #[error("Email address and password are required")]
    MissingCredentials,
    #[error("Invalid credentials")]
    Credentials,
    #[error(transparent)]
    Nickname(#[from] NicknameError),
    #[error("Unknown user type")]
    UserType,
    #[error("The nickname is already taken")]
    NicknameTaken,
    #[error("The email address is already registered")]
    EmailTaken,
    #[error("The profile conflicts with an existing one")]
    ProfileConflict,
    #[error(transparent)]
    Comment(#[from] CommentInvalidation),
    #[error("Unsupported image format")]
    ImageFormat,
    #[error("The image is empty")]
    EmptyImage,
    #[error("This is not allowed")]
    Forbidden,
    #[error("This is not allowed without auth")]
    Unauthorized,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
    #[error(transparent)]
    Gateway(#[from] gateways::Error),
}
