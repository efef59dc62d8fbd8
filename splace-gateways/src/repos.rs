use splace_boundary as json;
use splace_boundary::{TABLE_COMMENTS, TABLE_PLACES, TABLE_PROFILES, TABLE_SCRAPS};
use splace_core::{entities::*, repositories::*};

use crate::{rest::Query, HostedBackend};

type RepoResult<T> = std::result::Result<T, Error>;

const SELECT_COMMENT_WITH_PLACE: &str = "*,study_place:study_places(place_id,place_name)";

fn try_convert<R, E>(rows: Vec<R>) -> RepoResult<Vec<E>>
where
    E: TryFrom<R, Error = json::ConversionError>,
{
    rows.into_iter()
        .map(|row| E::try_from(row).map_err(|err| Error::Other(err.into())))
        .collect()
}

fn scrap_query(scrap: &Scrap) -> Query {
    Query::table(TABLE_SCRAPS)
        .eq("user_id", &scrap.user_id)
        .eq("study_place_id", &scrap.place_id)
}

impl PlaceRepo for HostedBackend {
    fn get_place(&self, id: &Id) -> RepoResult<Place> {
        let query = Query::table(TABLE_PLACES).eq("place_id", id);
        let row: json::StudyPlace = self.fetch_first(query)?.ok_or(Error::NotFound)?;
        Ok(row.into())
    }

    fn query_places(&self, filter: &PlaceFilter) -> RepoResult<Vec<Place>> {
        let mut query = Query::table(TABLE_PLACES);
        if let Some(category) = &filter.category {
            query = query.ilike("category", category);
        }
        if let Some(place_type) = &filter.place_type {
            query = query.ilike("place_type", place_type);
        }
        let rows: Vec<json::StudyPlace> = self.fetch(&query.order_desc("rating"))?;
        Ok(rows.into_iter().map(Place::from).collect())
    }

    fn get_places(&self, ids: &[Id]) -> RepoResult<Vec<Place>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let query = Query::table(TABLE_PLACES).in_list("place_id", ids);
        let rows: Vec<json::StudyPlace> = self.fetch(&query)?;
        Ok(rows.into_iter().map(Place::from).collect())
    }
}

impl CommentRepo for HostedBackend {
    fn create_comment(&self, comment: &NewComment) -> RepoResult<Comment> {
        let row = json::NewComment::from(comment);
        let stored: Vec<json::Comment> = self.insert(TABLE_COMMENTS, &row)?;
        try_convert(stored)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Rejected("The created comment was not returned".into()))
    }

    fn get_comment(&self, id: &Id) -> RepoResult<Comment> {
        let query = Query::table(TABLE_COMMENTS).eq("comment_id", id);
        let row: json::Comment = self.fetch_first(query)?.ok_or(Error::NotFound)?;
        Comment::try_from(row).map_err(|err| Error::Other(err.into()))
    }

    fn update_comment(&self, id: &Id, content: &CommentContent) -> RepoResult<()> {
        let query = Query::table(TABLE_COMMENTS).eq("comment_id", id);
        let changes = json::CommentUpdate::from(content);
        // Rows of other users are invisible and therefore not updated
        let updated: Vec<json::Comment> = self.update(&query, &changes)?;
        if updated.is_empty() {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn delete_comment(&self, id: &Id) -> RepoResult<()> {
        let query = Query::table(TABLE_COMMENTS).eq("comment_id", id);
        Ok(self.delete(&query)?)
    }

    fn load_comments_of_place(&self, place_id: &Id) -> RepoResult<Vec<Comment>> {
        let query = Query::table(TABLE_COMMENTS)
            .eq("study_place_id", place_id)
            .order_desc("created_at");
        try_convert(self.fetch::<json::Comment>(&query)?)
    }

    fn load_comments_of_user(&self, user_id: &Id) -> RepoResult<Vec<(Comment, Option<PlaceRef>)>> {
        let query = Query::table(TABLE_COMMENTS)
            .select(SELECT_COMMENT_WITH_PLACE)
            .eq("user_id", user_id)
            .order_desc("created_at");
        try_convert(self.fetch::<json::CommentWithPlace>(&query)?)
    }

    fn update_author_of_comments(&self, user_id: &Id, author: &Author) -> RepoResult<usize> {
        let query = Query::table(TABLE_COMMENTS)
            .select("comment_id")
            .eq("user_id", user_id);
        let changes = json::CommentAuthorUpdate::from(author);
        let updated: Vec<serde_json::Value> = self.update(&query, &changes)?;
        log::debug!("Updated the author of {} comments", updated.len());
        Ok(updated.len())
    }
}

impl ScrapRepo for HostedBackend {
    fn scrap_exists(&self, scrap: &Scrap) -> RepoResult<bool> {
        let query = scrap_query(scrap).select("user_id");
        let row: Option<serde_json::Value> = self.fetch_first(query)?;
        Ok(row.is_some())
    }

    fn create_scrap(&self, scrap: &Scrap) -> RepoResult<()> {
        Ok(self.insert_minimal(TABLE_SCRAPS, &json::Scrap::from(scrap))?)
    }

    fn delete_scrap(&self, scrap: &Scrap) -> RepoResult<()> {
        Ok(self.delete(&scrap_query(scrap))?)
    }

    fn scrapped_place_ids(&self, user_id: &Id) -> RepoResult<Vec<Id>> {
        let query = Query::table(TABLE_SCRAPS).eq("user_id", user_id);
        let rows: Vec<json::Scrap> = self.fetch(&query)?;
        Ok(rows
            .into_iter()
            .map(|row| Scrap::from(row).place_id)
            .collect())
    }
}

impl ProfileRepo for HostedBackend {
    fn create_profile(&self, profile: &UserProfile) -> RepoResult<()> {
        Ok(self.insert_minimal(TABLE_PROFILES, &json::UserProfile::from(profile))?)
    }

    fn update_profile(&self, profile: &UserProfile) -> RepoResult<()> {
        let query = Query::table(TABLE_PROFILES)
            .select("user_uid")
            .eq("user_uid", &profile.user_id);
        let changes = json::UserProfileUpdate::from(profile);
        let updated: Vec<serde_json::Value> = self.update(&query, &changes)?;
        if updated.is_empty() {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn get_profile(&self, user_id: &Id) -> RepoResult<UserProfile> {
        let query = Query::table(TABLE_PROFILES).eq("user_uid", user_id);
        let row: json::UserProfile = self.fetch_first(query)?.ok_or(Error::NotFound)?;
        UserProfile::try_from(row).map_err(|err| Error::Other(err.into()))
    }

    fn try_get_profile_by_nickname(&self, nickname: &Nickname) -> RepoResult<Option<UserProfile>> {
        let query = Query::table(TABLE_PROFILES).eq("nickname", nickname);
        let row: Option<json::UserProfile> = self.fetch_first(query)?;
        row.map(UserProfile::try_from)
            .transpose()
            .map_err(|err| Error::Other(err.into()))
    }

    fn try_get_profile_by_email(&self, email: &EmailAddress) -> RepoResult<Option<UserProfile>> {
        let query = Query::table(TABLE_PROFILES).eq("email", email.as_str());
        let row: Option<json::UserProfile> = self.fetch_first(query)?;
        row.map(UserProfile::try_from)
            .transpose()
            .map_err(|err| Error::Other(err.into()))
    }
}
