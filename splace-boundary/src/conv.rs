use super::*;
use splace_entities as e;
use std::convert::TryFrom;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(transparent)]
    StarRating(#[from] e::star_rating::StarRatingParseError),
    #[error(transparent)]
    Timestamp(#[from] e::time::TimestampParseError),
    #[error(transparent)]
    Nickname(#[from] e::user::NicknameError),
    #[error("Unknown user type: {0}")]
    UserType(String),
    #[error(transparent)]
    EmailAddress(#[from] e::email::EmailAddressParseError),
    #[error("Invalid expiry time: {0}")]
    ExpiresAt(i64),
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

impl From<StudyPlace> for e::place::Place {
    fn from(from: StudyPlace) -> Self {
        let StudyPlace {
            place_id,
            category,
            place_name,
            place_type,
            photo_url,
            rating,
            address,
            operating_hours,
            contact,
            fee,
            website_url,
            notes,
        } = from;
        Self {
            id: place_id.into(),
            category,
            place_type,
            name: place_name,
            photo_url: non_empty(photo_url),
            rating,
            address: non_empty(address),
            operating_hours: non_empty(operating_hours),
            contact: non_empty(contact),
            fee: non_empty(fee),
            website_url: non_empty(website_url),
            notes: non_empty(notes),
        }
    }
}

impl From<e::place::Place> for StudyPlace {
    fn from(from: e::place::Place) -> Self {
        let e::place::Place {
            id,
            category,
            place_type,
            name,
            photo_url,
            rating,
            address,
            operating_hours,
            contact,
            fee,
            website_url,
            notes,
        } = from;
        Self {
            place_id: id.into(),
            category,
            place_name: name,
            place_type,
            photo_url,
            rating,
            address,
            operating_hours,
            contact,
            fee,
            website_url,
            notes,
        }
    }
}

impl From<PlaceName> for e::place::PlaceRef {
    fn from(from: PlaceName) -> Self {
        let PlaceName {
            place_id,
            place_name,
        } = from;
        Self {
            id: place_id.into(),
            name: place_name,
        }
    }
}

impl TryFrom<Comment> for e::comment::Comment {
    type Error = ConversionError;
    fn try_from(from: Comment) -> Result<Self, Self::Error> {
        let Comment {
            comment_id,
            study_place_id,
            user_id,
            rating,
            title,
            contents,
            created_at,
            nickname,
            user_profile_image,
        } = from;
        Ok(Self {
            id: comment_id.into(),
            place_id: study_place_id.into(),
            user_id: user_id.into(),
            rating: rating.parse()?,
            title,
            body: contents,
            created_at: created_at.parse()?,
            author: e::comment::Author {
                nickname: nickname.unwrap_or_default(),
                avatar_url: non_empty(user_profile_image),
            },
        })
    }
}

impl From<e::comment::Comment> for Comment {
    fn from(from: e::comment::Comment) -> Self {
        let e::comment::Comment {
            id,
            place_id,
            user_id,
            rating,
            title,
            body,
            created_at,
            author,
        } = from;
        Self {
            comment_id: id.into(),
            study_place_id: place_id.into(),
            user_id: user_id.into(),
            rating: rating.to_emoji(),
            title,
            contents: body,
            created_at: created_at.to_rfc3339(),
            nickname: Some(author.nickname),
            user_profile_image: author.avatar_url,
        }
    }
}

impl TryFrom<CommentWithPlace> for (e::comment::Comment, Option<e::place::PlaceRef>) {
    type Error = ConversionError;
    fn try_from(from: CommentWithPlace) -> Result<Self, Self::Error> {
        let CommentWithPlace {
            comment,
            study_place,
        } = from;
        Ok((comment.try_into()?, study_place.map(Into::into)))
    }
}

impl From<&e::comment::NewComment> for NewComment {
    fn from(from: &e::comment::NewComment) -> Self {
        let e::comment::NewComment {
            place_id,
            user_id,
            content,
            author,
        } = from;
        Self {
            study_place_id: place_id.to_string(),
            user_id: user_id.to_string(),
            rating: content.rating.to_emoji(),
            title: content.title.clone(),
            contents: content.body.clone(),
            nickname: author.nickname.clone(),
            user_profile_image: author.avatar_url.clone(),
        }
    }
}

impl From<&e::comment::CommentContent> for CommentUpdate {
    fn from(from: &e::comment::CommentContent) -> Self {
        Self {
            rating: from.rating.to_emoji(),
            title: from.title.clone(),
            contents: from.body.clone(),
        }
    }
}

impl From<&e::comment::Author> for CommentAuthorUpdate {
    fn from(from: &e::comment::Author) -> Self {
        Self {
            nickname: from.nickname.clone(),
            user_profile_image: from.avatar_url.clone(),
        }
    }
}

impl From<Scrap> for e::scrap::Scrap {
    fn from(from: Scrap) -> Self {
        let Scrap {
            user_id,
            study_place_id,
        } = from;
        Self {
            user_id: user_id.into(),
            place_id: study_place_id.into(),
        }
    }
}

impl From<&e::scrap::Scrap> for Scrap {
    fn from(from: &e::scrap::Scrap) -> Self {
        Self {
            user_id: from.user_id.to_string(),
            study_place_id: from.place_id.to_string(),
        }
    }
}

impl TryFrom<UserProfile> for e::user::UserProfile {
    type Error = ConversionError;
    fn try_from(from: UserProfile) -> Result<Self, Self::Error> {
        let UserProfile {
            user_uid,
            nickname,
            email,
            user_type,
            created_at,
            user_profile_image,
        } = from;
        let user_type = user_type
            .parse()
            .map_err(|_| ConversionError::UserType(user_type))?;
        Ok(Self {
            user_id: user_uid.into(),
            nickname: nickname.parse()?,
            email: email.parse()?,
            user_type,
            created_at: created_at.parse()?,
            avatar_url: non_empty(user_profile_image)
                .unwrap_or_else(|| e::user::DEFAULT_AVATAR_URL.to_string()),
        })
    }
}

impl From<&e::user::UserProfile> for UserProfile {
    fn from(from: &e::user::UserProfile) -> Self {
        Self {
            user_uid: from.user_id.to_string(),
            nickname: from.nickname.to_string(),
            email: from.email.to_string(),
            user_type: from.user_type.to_string(),
            created_at: from.created_at.to_rfc3339(),
            user_profile_image: Some(from.avatar_url.clone()),
        }
    }
}

impl From<&e::user::UserProfile> for UserProfileUpdate {
    fn from(from: &e::user::UserProfile) -> Self {
        Self {
            nickname: from.nickname.to_string(),
            email: from.email.to_string(),
            user_type: from.user_type.to_string(),
            user_profile_image: from.avatar_url.clone(),
        }
    }
}

impl TryFrom<AuthUser> for e::session::AuthUser {
    type Error = ConversionError;
    fn try_from(from: AuthUser) -> Result<Self, Self::Error> {
        let AuthUser {
            id,
            email,
            created_at,
        } = from;
        Ok(Self {
            id: id.into(),
            email: non_empty(email).map(|e| e.parse()).transpose()?,
            created_at: created_at.map(|t| t.parse()).transpose()?,
        })
    }
}

impl From<&e::session::AuthUser> for AuthUser {
    fn from(from: &e::session::AuthUser) -> Self {
        Self {
            id: from.id.to_string(),
            email: from.email.as_ref().map(ToString::to_string),
            created_at: from.created_at.as_ref().map(e::time::Timestamp::to_rfc3339),
        }
    }
}

impl TryFrom<Session> for e::session::Session {
    type Error = ConversionError;
    fn try_from(from: Session) -> Result<Self, Self::Error> {
        let Session {
            access_token,
            token_type: _,
            expires_in,
            expires_at,
            refresh_token,
            user,
        } = from;
        let expires_at = match (expires_at, expires_in) {
            (Some(at), _) => Some(
                e::time::Timestamp::from_secs(at).ok_or(ConversionError::ExpiresAt(at))?,
            ),
            (None, Some(secs)) => {
                let at = e::time::Timestamp::now().as_secs() + secs;
                Some(e::time::Timestamp::from_secs(at).ok_or(ConversionError::ExpiresAt(at))?)
            }
            (None, None) => None,
        };
        Ok(Self {
            access_token,
            refresh_token,
            expires_at,
            user: user.try_into()?,
        })
    }
}

impl From<&e::session::Session> for Session {
    fn from(from: &e::session::Session) -> Self {
        Self {
            access_token: from.access_token.clone(),
            token_type: "bearer".to_string(),
            expires_in: None,
            expires_at: from.expires_at.map(|t| t.as_secs()),
            refresh_token: from.refresh_token.clone(),
            user: (&from.user).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment_row() -> Comment {
        Comment {
            comment_id: "c1".into(),
            study_place_id: "p1".into(),
            user_id: "u1".into(),
            rating: "\u{2B50}\u{FE0F}".repeat(3),
            title: "".into(),
            contents: "great desks".into(),
            created_at: "2024-03-01T09:05:33.123+00:00".into(),
            nickname: Some("kim".into()),
            user_profile_image: Some("".into()),
        }
    }

    #[test]
    fn convert_comment_row() {
        let comment = e::comment::Comment::try_from(comment_row()).unwrap();
        assert_eq!(e::star_rating::StarRating::Three, comment.rating);
        assert_eq!("great desks", comment.body);
        assert_eq!("kim", comment.author.nickname);
        assert_eq!(None, comment.author.avatar_url);
    }

    #[test]
    fn reject_comment_with_invalid_rating() {
        let row = Comment {
            rating: "lots".into(),
            ..comment_row()
        };
        assert!(matches!(
            e::comment::Comment::try_from(row),
            Err(ConversionError::StarRating(_))
        ));
    }

    #[test]
    fn convert_profile_row() {
        let row = UserProfile {
            user_uid: "u1".into(),
            nickname: "kim".into(),
            email: "kim@example.com".into(),
            user_type: "대학생".into(),
            created_at: "2024-03-01T09:05:33Z".into(),
            user_profile_image: None,
        };
        let profile = e::user::UserProfile::try_from(row).unwrap();
        assert_eq!(e::user::UserType::UniversityStudent, profile.user_type);
        assert_eq!(e::user::DEFAULT_AVATAR_URL, profile.avatar_url);
    }

    #[test]
    fn reject_profile_with_unknown_user_type() {
        let row = UserProfile {
            user_uid: "u1".into(),
            nickname: "kim".into(),
            email: "kim@example.com".into(),
            user_type: "pilot".into(),
            created_at: "2024-03-01T09:05:33Z".into(),
            user_profile_image: None,
        };
        assert!(matches!(
            e::user::UserProfile::try_from(row),
            Err(ConversionError::UserType(_))
        ));
    }

    #[test]
    fn session_expiry_from_relative_lifetime() {
        let row = Session {
            access_token: "a".into(),
            token_type: "bearer".into(),
            expires_in: Some(3600),
            expires_at: None,
            refresh_token: "r".into(),
            user: AuthUser {
                id: "u1".into(),
                email: None,
                created_at: None,
            },
        };
        let before = e::time::Timestamp::now().as_secs();
        let session = e::session::Session::try_from(row).unwrap();
        let expires_at = session.expires_at.unwrap().as_secs();
        assert!(expires_at >= before + 3600);
        assert!(expires_at <= before + 3601);
    }
}
