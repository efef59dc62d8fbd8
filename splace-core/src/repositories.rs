// Low-level access to the tables of the backend.
// Each repository is responsible for a single table.
// Related rows are only referenced by their id.

use crate::entities::*;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error("The request requires an authenticated session")]
    Unauthorized,
    #[error("The backend rejected the request: {0}")]
    Rejected(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

pub trait PlaceRepo {
    fn get_place(&self, id: &Id) -> Result<Place>;

    /// Places that match the filter, best rated first.
    fn query_places(&self, filter: &PlaceFilter) -> Result<Vec<Place>>;

    fn get_places(&self, ids: &[Id]) -> Result<Vec<Place>>;
}

pub trait CommentRepo {
    /// Returns the comment as stored by the backend
    /// including its id and creation time.
    fn create_comment(&self, comment: &NewComment) -> Result<Comment>;

    fn get_comment(&self, id: &Id) -> Result<Comment>;
    fn update_comment(&self, id: &Id, content: &CommentContent) -> Result<()>;
    fn delete_comment(&self, id: &Id) -> Result<()>;

    fn load_comments_of_place(&self, place_id: &Id) -> Result<Vec<Comment>>;

    // Each comment is joined with the name of the place, if it still exists
    fn load_comments_of_user(&self, user_id: &Id) -> Result<Vec<(Comment, Option<PlaceRef>)>>;

    /// Overwrite the copied author details of all comments of a user.
    fn update_author_of_comments(&self, user_id: &Id, author: &Author) -> Result<usize>;
}

pub trait ScrapRepo {
    fn scrap_exists(&self, scrap: &Scrap) -> Result<bool>;
    fn create_scrap(&self, scrap: &Scrap) -> Result<()>;
    fn delete_scrap(&self, scrap: &Scrap) -> Result<()>;
    fn scrapped_place_ids(&self, user_id: &Id) -> Result<Vec<Id>>;
}

pub trait ProfileRepo {
    fn create_profile(&self, profile: &UserProfile) -> Result<()>;
    fn update_profile(&self, profile: &UserProfile) -> Result<()>;

    fn get_profile(&self, user_id: &Id) -> Result<UserProfile>;
    fn try_get_profile_by_nickname(&self, nickname: &Nickname) -> Result<Option<UserProfile>>;
    fn try_get_profile_by_email(&self, email: &EmailAddress) -> Result<Option<UserProfile>>;
}
