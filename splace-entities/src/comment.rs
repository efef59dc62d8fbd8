use crate::{id::*, star_rating::*, time::*};

/// Author details that are copied into each comment
/// at the time it is written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Author {
    pub nickname: String,
    pub avatar_url: Option<String>,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id         : Id,
    pub place_id   : Id,
    pub user_id    : Id,
    pub rating     : StarRating,
    pub title      : String,
    pub body       : String,
    pub created_at : Timestamp,
    pub author     : Author,
}

impl Comment {
    pub fn is_authored_by(&self, user_id: &Id) -> bool {
        &self.user_id == user_id
    }
}

/// The mutable part of a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentContent {
    pub rating: StarRating,
    pub title: String,
    pub body: String,
}

impl Comment {
    pub fn content(&self) -> CommentContent {
        CommentContent {
            rating: self.rating,
            title: self.title.clone(),
            body: self.body.clone(),
        }
    }

    pub fn apply(&mut self, content: CommentContent) {
        let CommentContent {
            rating,
            title,
            body,
        } = content;
        self.rating = rating;
        self.title = title;
        self.body = body;
    }
}

/// A comment that has not been stored yet.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub place_id : Id,
    pub user_id  : Id,
    pub content  : CommentContent,
    pub author   : Author,
}

/// Keep only comments rated with at least `min` stars.
pub fn with_min_rating(comments: Vec<Comment>, min: StarRating) -> Vec<Comment> {
    comments.into_iter().filter(|c| c.rating >= min).collect()
}
