use super::prelude::*;
use crate::util::validate::CommentDraft;

/// Writes a new comment in the name of the user.
///
/// Nickname and avatar are copied from the current profile.
/// Users without a profile, e.g. after a third party sign-in,
/// comment without them.
pub fn create_comment<R>(
    repo: &R,
    user_id: &Id,
    place_id: &Id,
    draft: &CommentDraft,
    title_max_len: usize,
) -> Result<Comment>
where
    R: CommentRepo + ProfileRepo,
{
    let content = draft.validate(title_max_len)?;
    let author = match repo.get_profile(user_id) {
        Ok(profile) => Author::from(&profile),
        Err(crate::repositories::Error::NotFound) => {
            log::debug!("User {user_id} has no profile");
            Author::default()
        }
        Err(err) => return Err(err.into()),
    };
    let new_comment = NewComment {
        place_id: place_id.clone(),
        user_id: user_id.clone(),
        content,
        author,
    };
    let comment = repo.create_comment(&new_comment)?;
    log::debug!("User {user_id} commented on place {place_id}");
    Ok(comment)
}

pub fn update_comment<R: CommentRepo>(
    repo: &R,
    user_id: &Id,
    comment_id: &Id,
    draft: &CommentDraft,
    title_max_len: usize,
) -> Result<Comment> {
    let content = draft.validate(title_max_len)?;
    let mut comment = repo.get_comment(comment_id)?;
    if !comment.is_authored_by(user_id) {
        return Err(Error::Forbidden);
    }
    repo.update_comment(comment_id, &content)?;
    comment.apply(content);
    Ok(comment)
}

pub fn delete_comment<R: CommentRepo>(repo: &R, user_id: &Id, comment_id: &Id) -> Result<()> {
    let comment = repo.get_comment(comment_id)?;
    if !comment.is_authored_by(user_id) {
        return Err(Error::Forbidden);
    }
    repo.delete_comment(comment_id)?;
    log::debug!("Deleted comment {comment_id}");
    Ok(())
}
