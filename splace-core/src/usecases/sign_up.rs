use super::prelude::*;
use crate::{repositories::Error as RepoError, util::validate};

/// The sign-up form as entered by the user.
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub nickname: String,
    pub user_type: String,
}

#[derive(Debug)]
struct ValidAccount {
    email: EmailAddress,
    nickname: Nickname,
    user_type: UserType,
}

fn validate_account(account: &NewAccount) -> Result<ValidAccount> {
    let email = account.email.trim();
    if !validate::is_valid_email(email) {
        return Err(Error::EmailAddress);
    }
    let email = email.parse().map_err(|_| Error::EmailAddress)?;
    if !validate::is_valid_password(&account.password) {
        return Err(Error::Password);
    }
    let nickname = account.nickname.trim().parse()?;
    let user_type = account
        .user_type
        .trim()
        .parse()
        .map_err(|_| Error::UserType)?;
    Ok(ValidAccount {
        email,
        nickname,
        user_type,
    })
}

/// Registers a new user together with the profile.
///
/// The user is signed out afterwards and has to sign in explicitly.
pub fn sign_up<R, A>(repo: &R, auth: &A, account: &NewAccount) -> Result<UserProfile>
where
    R: ProfileRepo,
    A: AuthGateway,
{
    let ValidAccount {
        email,
        nickname,
        user_type,
    } = validate_account(account)?;
    // Another sign-up might claim the same nickname or email address
    // between these checks and the insert below. The backend will
    // then reject the profile.
    if repo.try_get_profile_by_nickname(&nickname)?.is_some() {
        return Err(Error::NicknameTaken);
    }
    if repo.try_get_profile_by_email(&email)?.is_some() {
        return Err(Error::EmailTaken);
    }
    let user = auth.sign_up(&email, &account.password)?;
    let profile = UserProfile {
        user_id: user.id,
        nickname,
        email,
        user_type,
        created_at: user.created_at.unwrap_or_else(Timestamp::now),
        avatar_url: DEFAULT_AVATAR_URL.to_string(),
    };
    log::debug!("Creating profile of new user {}", profile.user_id);
    repo.create_profile(&profile).map_err(|err| match err {
        RepoError::AlreadyExists => Error::ProfileConflict,
        err => Error::Repo(err),
    })?;
    if let Err(err) = auth.sign_out() {
        log::warn!("Failed to sign out after sign-up: {err}");
    }
    Ok(profile)
}
