use crate::entities::*;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^\S+@\S+\.\S+$").unwrap();
}

const PASSWORD_MIN_LEN: usize = 8;
const PASSWORD_SPECIAL_CHARS: &str = "@$!%*#?&";

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// At least eight characters, only ASCII letters, digits and `@$!%*#?&`,
/// with at least one of each kind.
pub fn is_valid_password(password: &str) -> bool {
    let is_special = |c: char| PASSWORD_SPECIAL_CHARS.contains(c);
    password.chars().count() >= PASSWORD_MIN_LEN
        && password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || is_special(c))
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(is_special)
}

/// The comment form before it has been checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentDraft {
    pub rating: Option<StarRating>,
    pub title: String,
    pub body: String,
}

impl From<&Comment> for CommentDraft {
    fn from(from: &Comment) -> Self {
        Self {
            rating: Some(from.rating),
            title: from.title.clone(),
            body: from.body.clone(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommentInvalidation {
    #[error("Please choose a rating")]
    MissingRating,
    #[error("The comment must not be empty")]
    EmptyBody,
    #[error("The title must not be longer than {max} characters")]
    TitleTooLong { max: usize },
}

impl CommentDraft {
    pub fn validate(&self, title_max_len: usize) -> Result<CommentContent, CommentInvalidation> {
        let rating = self.rating.ok_or(CommentInvalidation::MissingRating)?;
        let body = self.body.trim();
        if body.is_empty() {
            return Err(CommentInvalidation::EmptyBody);
        }
        let title = self.title.trim();
        if title.chars().count() > title_max_len {
            return Err(CommentInvalidation::TitleTooLong { max: title_max_len });
        }
        Ok(CommentContent {
            rating,
            title: title.to_owned(),
            body: body.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_addresses() {
        assert!(is_valid_email("kim@example.com"));
        assert!(is_valid_email("a.b@c.kr"));
        assert!(!is_valid_email("kim@example"));
        assert!(!is_valid_email("kim example.com"));
        assert!(!is_valid_email("@."));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn passwords() {
        assert!(is_valid_password("abcd123!"));
        assert!(is_valid_password("Study#Place2024"));
        // too short
        assert!(!is_valid_password("ab12!"));
        // missing special character
        assert!(!is_valid_password("abcd1234"));
        // missing digit
        assert!(!is_valid_password("abcdefg!"));
        // missing letter
        assert!(!is_valid_password("1234567!"));
        // unsupported characters
        assert!(!is_valid_password("abcd 123!"));
        assert!(!is_valid_password("abcd123^"));
    }

    #[test]
    fn comment_without_rating() {
        let draft = CommentDraft {
            rating: None,
            title: "".into(),
            body: "great desks".into(),
        };
        assert_eq!(Err(CommentInvalidation::MissingRating), draft.validate(50));
    }

    #[test]
    fn comment_with_blank_body() {
        let draft = CommentDraft {
            rating: Some(StarRating::Three),
            title: "".into(),
            body: "  \n".into(),
        };
        assert_eq!(Err(CommentInvalidation::EmptyBody), draft.validate(50));
    }

    #[test]
    fn comment_title_length() {
        let mut draft = CommentDraft {
            rating: Some(StarRating::Three),
            title: "가".repeat(50),
            body: "great desks".into(),
        };
        assert!(draft.validate(50).is_ok());
        draft.title.push('나');
        assert_eq!(
            Err(CommentInvalidation::TitleTooLong { max: 50 }),
            draft.validate(50)
        );
    }

    #[test]
    fn comment_content_is_trimmed() {
        let draft = CommentDraft {
            rating: Some(StarRating::Five),
            title: " Quiet ".into(),
            body: " great desks\n".into(),
        };
        let content = draft.validate(50).unwrap();
        assert_eq!("Quiet", content.title);
        assert_eq!("great desks", content.body);
    }
}
