use std::{fmt, str::FromStr};

use strum::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;

use crate::{comment::Author, email::EmailAddress, id::Id, time::Timestamp};

pub const DEFAULT_AVATAR_URL: &str = "/images/default-profile.jpg";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nickname(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NicknameError {
    #[error("The nickname must not be empty")]
    Empty,
    #[error("The nickname must not be longer than {max} characters")]
    TooLong { max: usize },
}

impl Nickname {
    pub const fn max_len() -> usize {
        15
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Nickname {
    type Err = NicknameError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len == 0 {
            return Err(NicknameError::Empty);
        }
        if len > Self::max_len() {
            return Err(NicknameError::TooLong {
                max: Self::max_len(),
            });
        }
        Ok(Self(s.to_owned()))
    }
}

impl From<Nickname> for String {
    fn from(from: Nickname) -> Self {
        from.0
    }
}

impl AsRef<str> for Nickname {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the user does for a living, as chosen at sign-up.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIter)]
pub enum UserType {
    #[strum(serialize = "중고등학생")] SecondarySchoolStudent,
    #[strum(serialize = "수험생")]     ExamCandidate,
    #[strum(serialize = "대학생")]     UniversityStudent,
    #[strum(serialize = "고시생")]     CivilServiceCandidate,
    #[strum(serialize = "직장인")]     OfficeWorker,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id    : Id,
    pub nickname   : Nickname,
    pub email      : EmailAddress,
    pub user_type  : UserType,
    pub created_at : Timestamp,
    pub avatar_url : String,
}

impl From<&UserProfile> for Author {
    fn from(from: &UserProfile) -> Self {
        Self {
            nickname: from.nickname.to_string(),
            avatar_url: Some(from.avatar_url.clone()),
        }
    }
}
