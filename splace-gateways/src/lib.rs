//! Adapters for the hosted backend.
//!
//! All requests are blocking. The backend exposes the tables through
//! a REST interface, the identity service below `/auth/v1` and the
//! blob storage below `/storage/v1`.

use reqwest::blocking::Response;
use serde::de::DeserializeOwned;
use splace_boundary::ErrorBody;
use splace_core::{gateways, repositories};
use std::io;
use thiserror::Error;

mod auth;
mod backend;
mod repos;
mod storage;

pub mod rest;
pub mod session_store;

pub use self::{
    backend::{BackendConfig, HostedBackend},
    session_store::SessionStore,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Conversion(#[from] splace_boundary::ConversionError),
    #[error("{message} ({status})")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
}

impl Error {
    fn has_code(&self, expected: &[&str]) -> bool {
        match self {
            Self::Api {
                code: Some(code), ..
            } => expected.contains(&code.as_str()),
            _ => false,
        }
    }
}

// Unique constraint violation of the database
const CODE_UNIQUE_VIOLATION: &str = "23505";

const CODES_INVALID_CREDENTIALS: &[&str] = &["invalid_grant", "invalid_credentials"];

impl From<Error> for repositories::Error {
    fn from(err: Error) -> Self {
        if err.has_code(&[CODE_UNIQUE_VIOLATION]) {
            return Self::AlreadyExists;
        }
        match err {
            Error::Api { status: 404, .. } => Self::NotFound,
            Error::Api { status: 409, .. } => Self::AlreadyExists,
            Error::Api {
                status: 401 | 403, ..
            } => Self::Unauthorized,
            Error::Api { message, .. } => Self::Rejected(message),
            Error::Io(err) => Self::Io(err),
            err => Self::Other(err.into()),
        }
    }
}

impl From<Error> for gateways::Error {
    fn from(err: Error) -> Self {
        if err.has_code(CODES_INVALID_CREDENTIALS) {
            return Self::InvalidCredentials;
        }
        match err {
            Error::Api {
                status: 401 | 403, ..
            } => Self::Unauthenticated,
            Error::Api { message, .. } => Self::Rejected(message),
            Error::Io(err) => Self::Io(err),
            err => Self::Other(err.into()),
        }
    }
}

pub(crate) fn into_json<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    // ensure we've got 2xx status
    if response.status().is_success() {
        Ok(response.json()?)
    } else {
        Err(into_api_error(response))
    }
}

pub(crate) fn into_empty(response: Response) -> Result<()> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(into_api_error(response))
    }
}

fn into_api_error(response: Response) -> Error {
    let status = response.status();
    let text = response.text().unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
    let message = body
        .message()
        .map(ToOwned::to_owned)
        .or_else(|| status.canonical_reason().map(ToOwned::to_owned))
        .unwrap_or_else(|| text.clone());
    log::debug!("Backend responded with {status}: {text}");
    Error::Api {
        status: status.as_u16(),
        code: body.code(),
        message,
    }
}
