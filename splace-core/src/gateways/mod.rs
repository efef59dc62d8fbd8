use std::io;
use thiserror::Error;

pub mod auth;
pub mod storage;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("The session is missing or expired")]
    Unauthenticated,
    #[error("The backend rejected the request: {0}")]
    Rejected(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
