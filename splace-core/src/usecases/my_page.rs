use super::prelude::*;

pub fn scrapped_places<R>(repo: &R, user_id: &Id) -> Result<Vec<Place>>
where
    R: ScrapRepo + PlaceRepo,
{
    let ids = repo.scrapped_place_ids(user_id)?;
    if ids.is_empty() {
        return Ok(vec![]);
    }
    Ok(repo.get_places(&ids)?)
}

pub fn comments_of_user<R: CommentRepo>(
    repo: &R,
    user_id: &Id,
) -> Result<Vec<(Comment, Option<PlaceRef>)>> {
    let mut comments = repo.load_comments_of_user(user_id)?;
    comments.sort_by(|(a, _), (b, _)| b.created_at.cmp(&a.created_at));
    Ok(comments)
}
