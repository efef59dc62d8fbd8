use super::notice::Notices;
use crate::{entities::*, gateways::auth::AuthGateway};

/// Changes of the authentication state.
#[derive(Debug, Clone)]
pub enum AuthChange {
    SignedIn(Session),
    Refreshed(Session),
    SignedOut,
}

/// Holds the session of the current user.
///
/// Errors while reading the session are treated like
/// a missing session.
#[derive(Debug, Default)]
pub struct SessionHolder {
    session: Option<Session>,
    mounted: bool,
}

impl SessionHolder {
    pub fn mount<A: AuthGateway>(&mut self, auth: &A, notices: &mut Notices) {
        self.session = match auth.current_session() {
            Ok(session) => session,
            Err(err) => {
                log::warn!("Failed to read the current session: {err}");
                notices.error("The session could not be restored");
                None
            }
        };
        self.mounted = true;
    }

    /// Changes are ignored unless the holder is mounted.
    pub fn handle(&mut self, change: AuthChange) {
        if !self.mounted {
            log::debug!("Ignoring auth change of unmounted session holder");
            return;
        }
        match change {
            AuthChange::SignedIn(session) | AuthChange::Refreshed(session) => {
                self.session = Some(session);
            }
            AuthChange::SignedOut => {
                self.session = None;
            }
        }
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user_id(&self) -> Option<&Id> {
        self.session.as_ref().map(Session::user_id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}
