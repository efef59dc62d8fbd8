use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Method;
use splace_boundary as json;
use splace_core::{
    entities::*,
    gateways::{auth::AuthGateway, Error as GatewayError, Result as GatewayResult},
};

use crate::{into_empty, into_json, Error, HostedBackend, Result};

const PATH_AUTH: &str = "/auth/v1";

impl HostedBackend {
    fn auth_url(&self, endpoint: &str) -> String {
        format!("{}{PATH_AUTH}/{endpoint}", self.url())
    }

    fn request_token(&self, grant_type: &str, body: &impl serde::Serialize) -> Result<Session> {
        let url = self.auth_url(&format!("token?grant_type={grant_type}"));
        let response = self
            .request_with_token(Method::POST, &url, &self.config.api_key)
            .json(body)
            .send()?;
        let row: json::Session = into_json(response)?;
        Ok(row.try_into()?)
    }

    fn refresh(&self, session: &Session) -> Result<Session> {
        log::debug!("Refreshing session of user {}", session.user.id);
        let body = json::RefreshToken {
            refresh_token: session.refresh_token.clone(),
        };
        self.request_token("refresh_token", &body)
    }

    fn fetch_user(&self, access_token: &str) -> Result<json::AuthUser> {
        let response = self
            .request_with_token(Method::GET, &self.auth_url("user"), access_token)
            .send()?;
        into_json(response)
    }

    /// The stored session, refreshed if it expires within the margin.
    ///
    /// A session that cannot be refreshed is dropped.
    pub(crate) fn usable_session(&self) -> Result<Option<Session>> {
        let Some(session) = self.sessions.load()? else {
            return Ok(None);
        };
        let margin = i64::try_from(self.config.refresh_margin.as_secs()).unwrap_or(i64::MAX);
        if !session.expires_within(Timestamp::now(), margin) {
            return Ok(Some(session));
        }
        match self.refresh(&session) {
            Ok(refreshed) => {
                self.sessions.save(&refreshed)?;
                Ok(Some(refreshed))
            }
            Err(err) => {
                log::warn!("Unable to refresh the session: {err}");
                self.sessions.clear()?;
                Ok(None)
            }
        }
    }

    /// Completes a sign-in with a third party provider.
    ///
    /// The provider redirects to a URL that carries the tokens of
    /// the new session in its fragment.
    pub fn sign_in_with_redirect(&self, redirect_url: &str) -> GatewayResult<Session> {
        let tokens = RedirectTokens::parse(redirect_url).ok_or(GatewayError::Unauthenticated)?;
        let user = self.fetch_user(&tokens.access_token)?;
        let row = json::Session {
            access_token: tokens.access_token,
            token_type: "bearer".to_string(),
            expires_in: tokens.expires_in,
            expires_at: tokens.expires_at,
            refresh_token: tokens.refresh_token,
            user,
        };
        let session = Session::try_from(row).map_err(Error::from)?;
        self.sessions.save(&session)?;
        log::info!("Signed in user {}", session.user.id);
        Ok(session)
    }
}

impl AuthGateway for HostedBackend {
    fn current_session(&self) -> GatewayResult<Option<Session>> {
        Ok(self.usable_session()?)
    }

    fn sign_up(&self, email: &EmailAddress, password: &str) -> GatewayResult<AuthUser> {
        let credentials = json::Credentials {
            email: email.to_string(),
            password: password.to_owned(),
        };
        let response = self
            .request_with_token(Method::POST, &self.auth_url("signup"), &self.config.api_key)
            .json(&credentials)
            .send()
            .map_err(Error::from)?;
        match into_json::<json::SignUpResponse>(response)? {
            json::SignUpResponse::Session(row) => {
                // keep the session so that it can be closed properly
                let session = Session::try_from(row).map_err(Error::from)?;
                self.sessions.save(&session)?;
                Ok(session.user)
            }
            json::SignUpResponse::User(user) => {
                Ok(AuthUser::try_from(user).map_err(Error::from)?)
            }
        }
    }

    fn sign_in_with_password(&self, email: &EmailAddress, password: &str) -> GatewayResult<Session> {
        let credentials = json::Credentials {
            email: email.to_string(),
            password: password.to_owned(),
        };
        let session = self.request_token("password", &credentials)?;
        self.sessions.save(&session)?;
        log::info!("Signed in user {}", session.user.id);
        Ok(session)
    }

    fn oauth_authorize_url(&self, provider: OAuthProvider, redirect_to: Option<&str>) -> String {
        let mut url = self.auth_url(&format!("authorize?provider={provider}"));
        if let Some(redirect_to) = redirect_to {
            url.push_str("&redirect_to=");
            url.extend(utf8_percent_encode(redirect_to, NON_ALPHANUMERIC));
        }
        url
    }

    fn sign_out(&self) -> GatewayResult<()> {
        let Some(session) = self.sessions.load().unwrap_or_else(|err| {
            log::warn!("Unable to read the stored session: {err}");
            None
        }) else {
            return Ok(());
        };
        let result = self
            .request_with_token(Method::POST, &self.auth_url("logout"), &session.access_token)
            .send()
            .map_err(Error::from)
            .and_then(into_empty);
        // The local session is dropped in any case
        self.sessions.clear()?;
        if let Err(err) = result {
            log::warn!("Unable to close the session remotely: {err}");
            return Err(err.into());
        }
        Ok(())
    }
}

/// Tokens passed back by a third party sign-in.
#[derive(Debug, PartialEq, Eq)]
struct RedirectTokens {
    access_token: String,
    refresh_token: String,
    expires_in: Option<i64>,
    expires_at: Option<i64>,
}

impl RedirectTokens {
    fn parse(url: &str) -> Option<Self> {
        let (_, params) = url.split_once('#').or_else(|| url.split_once('?'))?;
        let mut access_token = None;
        let mut refresh_token = None;
        let mut expires_in = None;
        let mut expires_at = None;
        for pair in params.split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = percent_decode_str(value).decode_utf8_lossy().into_owned();
            match key {
                "access_token" => access_token = Some(value),
                "refresh_token" => refresh_token = Some(value),
                "expires_in" => expires_in = value.parse().ok(),
                "expires_at" => expires_at = value.parse().ok(),
                _ => {}
            }
        }
        Some(Self {
            access_token: access_token.filter(|t| !t.is_empty())?,
            refresh_token: refresh_token.filter(|t| !t.is_empty())?,
            expires_in,
            expires_at,
        })
    }
}
