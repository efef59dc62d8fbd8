use super::prelude::*;
use crate::gateways::Error as GatewayError;

pub fn sign_in_with_password<A: AuthGateway>(auth: &A, email: &str, password: &str) -> Result<Session> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(Error::MissingCredentials);
    }
    let email = email.parse::<EmailAddress>().map_err(|_| Error::EmailAddress)?;
    match auth.sign_in_with_password(&email, password) {
        Ok(session) => {
            log::debug!("User {} signed in", session.user_id());
            Ok(session)
        }
        Err(GatewayError::InvalidCredentials) => Err(Error::Credentials),
        Err(err) => Err(err.into()),
    }
}

/// Returns the URL that has to be opened to complete the sign-in.
pub fn sign_in_with_oauth<A: AuthGateway>(
    auth: &A,
    provider: OAuthProvider,
    redirect_to: Option<&str>,
) -> String {
    auth.oauth_authorize_url(provider, redirect_to)
}

pub fn sign_out<A: AuthGateway>(auth: &A) -> Result<()> {
    auth.sign_out()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        super::tests::{Failure, MockDb},
        *,
    };

    #[test]
    fn sign_in_with_valid_credentials() {
        let db = MockDb::default();
        db.register("kim@example.com", "desk1234!", "u1");
        let session = sign_in_with_password(&db, "kim@example.com", "desk1234!").unwrap();
        assert_eq!("u1", session.user_id().as_str());
        assert!(db.current_session().unwrap().is_some());
    }

    #[test]
    fn reject_empty_credentials_locally() {
        let db = MockDb::default();
        assert!(matches!(
            sign_in_with_password(&db, "", "desk1234!"),
            Err(Error::MissingCredentials)
        ));
        assert!(matches!(
            sign_in_with_password(&db, "kim@example.com", ""),
            Err(Error::MissingCredentials)
        ));
        assert_eq!(0, db.total_calls());
    }

    #[test]
    fn wrong_password() {
        let db = MockDb::default();
        db.register("kim@example.com", "desk1234!", "u1");
        assert!(matches!(
            sign_in_with_password(&db, "kim@example.com", "desk1234?"),
            Err(Error::Credentials)
        ));
    }

    #[test]
    fn backend_failure_is_not_a_credential_error() {
        let db = MockDb::default();
        db.register("kim@example.com", "desk1234!", "u1");
        db.fail_with("sign_in_with_password", Failure::Rejected);
        assert!(matches!(
            sign_in_with_password(&db, "kim@example.com", "desk1234!"),
            Err(Error::Gateway(_))
        ));
    }

    #[test]
    fn oauth_url() {
        let db = MockDb::default();
        let url = sign_in_with_oauth(&db, OAuthProvider::Kakao, Some("/my"));
        assert!(url.contains("provider=kakao"));
    }

    #[test]
    fn sign_out_clears_session() {
        let db = MockDb::default();
        db.register("kim@example.com", "desk1234!", "u1");
        sign_in_with_password(&db, "kim@example.com", "desk1234!").unwrap();
        sign_out(&db).unwrap();
        assert!(db.current_session().unwrap().is_none());
    }
}
