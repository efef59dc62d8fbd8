use reqwest::{
    blocking::{Client, RequestBuilder},
    Method,
};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use crate::{into_empty, into_json, rest::Query, Result, SessionStore};

const HEADER_API_KEY: &str = "apikey";
const HEADER_PREFER: &str = "Prefer";

#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL without a trailing slash
    pub url: String,
    pub api_key: String,
    pub timeout: Duration,
    /// Sessions that expire within this period are refreshed before use
    pub refresh_margin: Duration,
}

/// The hosted backend that stores all tables, identities and blobs.
pub struct HostedBackend {
    pub(crate) config: BackendConfig,
    pub(crate) http: Client,
    pub(crate) sessions: SessionStore,
}

impl HostedBackend {
    pub fn try_new(mut config: BackendConfig, sessions: SessionStore) -> Result<Self> {
        config.url = config.url.trim_end_matches('/').to_owned();
        let http = Client::builder().timeout(config.timeout).build()?;
        log::debug!("Using backend at {}", config.url);
        Ok(Self {
            config,
            http,
            sessions,
        })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn session_store(&self) -> &SessionStore {
        &self.sessions
    }

    /// Requests are authorized with the token of the stored session
    /// and fall back to the anonymous key.
    ///
    /// Sessions close to their expiry are refreshed first.
    pub(crate) fn bearer_token(&self) -> String {
        match self.usable_session() {
            Ok(Some(session)) => session.access_token,
            Ok(None) => self.config.api_key.clone(),
            Err(err) => {
                log::warn!("Unable to read the stored session: {err}");
                self.config.api_key.clone()
            }
        }
    }

    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.request_with_token(method, url, &self.bearer_token())
    }

    pub(crate) fn request_with_token(
        &self,
        method: Method,
        url: &str,
        token: &str,
    ) -> RequestBuilder {
        log::debug!("{method} {url}");
        self.http
            .request(method, url)
            .header(HEADER_API_KEY, &self.config.api_key)
            .bearer_auth(token)
    }

    pub(crate) fn fetch<T>(&self, query: &Query) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let response = self.request(Method::GET, &query.url(self.url())).send()?;
        into_json(response)
    }

    pub(crate) fn fetch_first<T>(&self, query: Query) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        Ok(self.fetch(&query.limit(1))?.into_iter().next())
    }

    /// Inserts a row and returns the row as stored.
    pub(crate) fn insert<B, T>(&self, table: &str, row: &B) -> Result<Vec<T>>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = crate::rest::table_url(self.url(), table);
        let response = self
            .request(Method::POST, &url)
            .header(HEADER_PREFER, "return=representation")
            .json(row)
            .send()?;
        into_json(response)
    }

    pub(crate) fn insert_minimal<B>(&self, table: &str, row: &B) -> Result<()>
    where
        B: Serialize,
    {
        let url = crate::rest::table_url(self.url(), table);
        let response = self
            .request(Method::POST, &url)
            .header(HEADER_PREFER, "return=minimal")
            .json(row)
            .send()?;
        into_empty(response)
    }

    /// Updates all matching rows and returns them.
    pub(crate) fn update<B, T>(&self, query: &Query, changes: &B) -> Result<Vec<T>>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::PATCH, &query.url(self.url()))
            .header(HEADER_PREFER, "return=representation")
            .json(changes)
            .send()?;
        into_json(response)
    }

    pub(crate) fn delete(&self, query: &Query) -> Result<()> {
        let response = self
            .request(Method::DELETE, &query.url(self.url()))
            .send()?;
        into_empty(response)
    }
}
