use super::prelude::*;
use crate::{repositories::Error as RepoError, util::validate};

pub fn get_profile<R: ProfileRepo>(repo: &R, user_id: &Id) -> Result<UserProfile> {
    Ok(repo.get_profile(user_id)?)
}

/// The editable fields of the profile form.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub nickname: String,
    pub email: String,
    pub user_type: String,
    /// Keep the current avatar if `None`
    pub avatar_url: Option<String>,
}

impl From<&UserProfile> for ProfileUpdate {
    fn from(from: &UserProfile) -> Self {
        Self {
            nickname: from.nickname.to_string(),
            email: from.email.to_string(),
            user_type: from.user_type.to_string(),
            avatar_url: Some(from.avatar_url.clone()),
        }
    }
}

/// Outcome of a profile update.
///
/// The profile and the author details that have been
/// copied into the comments of the user are updated
/// one after another. The second step might fail
/// independently of the first one.
#[derive(Debug)]
pub struct ProfileUpdated {
    pub profile: UserProfile,
    pub comments: std::result::Result<usize, RepoError>,
}

pub fn update_profile<R>(repo: &R, user_id: &Id, update: &ProfileUpdate) -> Result<ProfileUpdated>
where
    R: ProfileRepo + CommentRepo,
{
    let nickname: Nickname = update.nickname.trim().parse()?;
    let email = update.email.trim();
    if !validate::is_valid_email(email) {
        return Err(Error::EmailAddress);
    }
    let email: EmailAddress = email.parse().map_err(|_| Error::EmailAddress)?;
    let user_type = update
        .user_type
        .trim()
        .parse()
        .map_err(|_| Error::UserType)?;
    let mut profile = repo.get_profile(user_id)?;
    if profile.nickname != nickname {
        if let Some(other) = repo.try_get_profile_by_nickname(&nickname)? {
            if &other.user_id != user_id {
                return Err(Error::NicknameTaken);
            }
        }
    }
    profile.nickname = nickname;
    profile.email = email;
    profile.user_type = user_type;
    if let Some(avatar_url) = update
        .avatar_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
    {
        profile.avatar_url = avatar_url.to_owned();
    }
    repo.update_profile(&profile)?;
    log::info!("Updated profile of user {user_id}");
    let comments = repo.update_author_of_comments(user_id, &Author::from(&profile));
    if let Err(err) = &comments {
        log::warn!("Failed to update the author of the comments of user {user_id}: {err}");
    }
    Ok(ProfileUpdated { profile, comments })
}

#[cfg(test)]
mod tests {
    use super::{
        super::tests::{Failure, MockDb},
        *,
    };
    use splace_entities::builders::*;

    fn db() -> MockDb {
        let db = MockDb::default();
        db.profiles.borrow_mut().extend([
            UserProfile::build().user_id("u1").nickname("kim").finish(),
            UserProfile::build().user_id("u2").nickname("lee").finish(),
        ]);
        db.comments.borrow_mut().extend([
            Comment::build().id("c1").user_id("u1").nickname("kim").finish(),
            Comment::build().id("c2").user_id("u2").nickname("lee").finish(),
        ]);
        db
    }

    fn update(nickname: &str) -> ProfileUpdate {
        ProfileUpdate {
            nickname: nickname.into(),
            email: "park@example.com".into(),
            user_type: "직장인".into(),
            avatar_url: None,
        }
    }

    #[test]
    fn update_profile_and_comments() {
        let db = db();
        let updated = update_profile(&db, &"u1".into(), &update("park")).unwrap();
        assert_eq!("park", updated.profile.nickname.as_str());
        assert_eq!(UserType::OfficeWorker, updated.profile.user_type);
        assert_eq!(1, updated.comments.unwrap());
        assert_eq!("park", db.profiles.borrow()[0].nickname.as_str());
        assert_eq!("park", db.comments.borrow()[0].author.nickname);
        assert_eq!("lee", db.comments.borrow()[1].author.nickname);
    }

    #[test]
    fn keep_avatar_if_not_replaced() {
        let db = db();
        let before = db.profiles.borrow()[0].avatar_url.clone();
        let updated = update_profile(&db, &"u1".into(), &update("kim")).unwrap();
        assert_eq!(before, updated.profile.avatar_url);

        let mut with_avatar = update("kim");
        with_avatar.avatar_url = Some("https://cdn/new.png".into());
        let updated = update_profile(&db, &"u1".into(), &with_avatar).unwrap();
        assert_eq!("https://cdn/new.png", updated.profile.avatar_url);
    }

    #[test]
    fn reject_nickname_of_other_user() {
        let db = db();
        assert!(matches!(
            update_profile(&db, &"u1".into(), &update("lee")),
            Err(Error::NicknameTaken)
        ));
        assert_eq!(0, db.calls("update_profile"));
    }

    #[test]
    fn reject_invalid_fields() {
        let db = db();
        assert!(matches!(
            update_profile(&db, &"u1".into(), &update("")),
            Err(Error::Nickname(_))
        ));
        let mut invalid = update("kim");
        invalid.email = "park".into();
        assert!(matches!(
            update_profile(&db, &"u1".into(), &invalid),
            Err(Error::EmailAddress)
        ));
        let mut invalid = update("kim");
        invalid.user_type = "pilot".into();
        assert!(matches!(
            update_profile(&db, &"u1".into(), &invalid),
            Err(Error::UserType)
        ));
        assert_eq!(0, db.total_calls());
    }

    #[test]
    fn failed_comment_update_keeps_profile_update() {
        let db = db();
        db.fail_with("update_author_of_comments", Failure::Rejected);
        let updated = update_profile(&db, &"u1".into(), &update("park")).unwrap();
        assert!(updated.comments.is_err());
        assert_eq!("park", db.profiles.borrow()[0].nickname.as_str());
        assert_eq!("kim", db.comments.borrow()[0].author.nickname);
    }
}
