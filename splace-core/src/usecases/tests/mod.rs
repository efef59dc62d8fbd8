use super::prelude::*;
use crate::gateways::{self, Error as GatewayError};
use std::{cell::RefCell, collections::HashMap};

type RepoResult<T> = std::result::Result<T, RepoError>;
type RepoError = crate::repositories::Error;
type GatewayResult<T> = gateways::Result<T>;

const BACKEND_URL: &str = "https://backend.test";

/// How an operation of the [MockDb] should fail.
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Rejected,
    AlreadyExists,
}

/// In-memory backend that records every remote call.
#[derive(Debug, Default)]
pub struct MockDb {
    pub places: RefCell<Vec<Place>>,
    pub comments: RefCell<Vec<Comment>>,
    pub scraps: RefCell<Vec<Scrap>>,
    pub profiles: RefCell<Vec<UserProfile>>,
    pub accounts: RefCell<Vec<(EmailAddress, String, Id)>>,
    pub session: RefCell<Option<Session>>,
    /// bucket, path, content type, data
    pub blobs: RefCell<Vec<(String, String, String, Vec<u8>)>>,
    calls: RefCell<HashMap<&'static str, usize>>,
    failures: RefCell<HashMap<&'static str, Failure>>,
}

impl MockDb {
    pub fn calls(&self, op: &str) -> usize {
        self.calls.borrow().get(op).copied().unwrap_or_default()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().values().sum()
    }

    pub fn fail_with(&self, op: &'static str, failure: Failure) {
        self.failures.borrow_mut().insert(op, failure);
    }

    pub fn recover(&self, op: &str) {
        self.failures.borrow_mut().remove(op);
    }

    pub fn register(&self, email: &str, password: &str, user_id: &str) {
        self.accounts.borrow_mut().push((
            EmailAddress::new_unchecked(email.into()),
            password.into(),
            user_id.into(),
        ));
    }

    pub fn sign_in_as(&self, user_id: &str) -> Session {
        let session = Session {
            access_token: format!("token-of-{user_id}"),
            refresh_token: "refresh".into(),
            expires_at: None,
            user: AuthUser {
                id: user_id.into(),
                email: None,
                created_at: None,
            },
        };
        *self.session.borrow_mut() = Some(session.clone());
        session
    }

    fn call(&self, op: &'static str) -> Option<Failure> {
        *self.calls.borrow_mut().entry(op).or_default() += 1;
        self.failures.borrow().get(op).copied()
    }

    fn repo_call(&self, op: &'static str) -> RepoResult<()> {
        match self.call(op) {
            None => Ok(()),
            Some(Failure::Rejected) => Err(RepoError::Rejected(format!("{op} failed"))),
            Some(Failure::AlreadyExists) => Err(RepoError::AlreadyExists),
        }
    }

    fn gateway_call(&self, op: &'static str) -> GatewayResult<()> {
        match self.call(op) {
            None => Ok(()),
            Some(_) => Err(GatewayError::Rejected(format!("{op} failed"))),
        }
    }

    fn place_ref(&self, id: &Id) -> Option<PlaceRef> {
        self.places
            .borrow()
            .iter()
            .find(|p| &p.id == id)
            .map(PlaceRef::from)
    }
}

impl PlaceRepo for MockDb {
    fn get_place(&self, id: &Id) -> RepoResult<Place> {
        self.repo_call("get_place")?;
        self.places
            .borrow()
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    fn query_places(&self, filter: &PlaceFilter) -> RepoResult<Vec<Place>> {
        self.repo_call("query_places")?;
        let mut places: Vec<_> = self
            .places
            .borrow()
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        sort_by_rating_desc(&mut places);
        Ok(places)
    }

    fn get_places(&self, ids: &[Id]) -> RepoResult<Vec<Place>> {
        self.repo_call("get_places")?;
        Ok(self
            .places
            .borrow()
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }
}

impl CommentRepo for MockDb {
    fn create_comment(&self, new_comment: &NewComment) -> RepoResult<Comment> {
        self.repo_call("create_comment")?;
        if self.place_ref(&new_comment.place_id).is_none() {
            return Err(RepoError::Rejected("unknown place".into()));
        }
        let NewComment {
            place_id,
            user_id,
            content,
            author,
        } = new_comment.clone();
        let comment = Comment {
            id: Id::new(),
            place_id,
            user_id,
            rating: content.rating,
            title: content.title,
            body: content.body,
            created_at: Timestamp::now(),
            author,
        };
        self.comments.borrow_mut().push(comment.clone());
        Ok(comment)
    }

    fn get_comment(&self, id: &Id) -> RepoResult<Comment> {
        self.repo_call("get_comment")?;
        self.comments
            .borrow()
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    fn update_comment(&self, id: &Id, content: &CommentContent) -> RepoResult<()> {
        self.repo_call("update_comment")?;
        let mut comments = self.comments.borrow_mut();
        let comment = comments
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or(RepoError::NotFound)?;
        comment.apply(content.clone());
        Ok(())
    }

    fn delete_comment(&self, id: &Id) -> RepoResult<()> {
        self.repo_call("delete_comment")?;
        self.comments.borrow_mut().retain(|c| &c.id != id);
        Ok(())
    }

    fn load_comments_of_place(&self, place_id: &Id) -> RepoResult<Vec<Comment>> {
        self.repo_call("load_comments_of_place")?;
        Ok(self
            .comments
            .borrow()
            .iter()
            .filter(|c| &c.place_id == place_id)
            .cloned()
            .collect())
    }

    fn load_comments_of_user(&self, user_id: &Id) -> RepoResult<Vec<(Comment, Option<PlaceRef>)>> {
        self.repo_call("load_comments_of_user")?;
        Ok(self
            .comments
            .borrow()
            .iter()
            .filter(|c| c.is_authored_by(user_id))
            .map(|c| (c.clone(), self.place_ref(&c.place_id)))
            .collect())
    }

    fn update_author_of_comments(&self, user_id: &Id, author: &Author) -> RepoResult<usize> {
        self.repo_call("update_author_of_comments")?;
        let mut count = 0;
        for comment in self
            .comments
            .borrow_mut()
            .iter_mut()
            .filter(|c| c.is_authored_by(user_id))
        {
            comment.author = author.clone();
            count += 1;
        }
        Ok(count)
    }
}

impl ScrapRepo for MockDb {
    fn scrap_exists(&self, scrap: &Scrap) -> RepoResult<bool> {
        self.repo_call("scrap_exists")?;
        Ok(self.scraps.borrow().contains(scrap))
    }

    fn create_scrap(&self, scrap: &Scrap) -> RepoResult<()> {
        self.repo_call("create_scrap")?;
        self.scraps.borrow_mut().push(scrap.clone());
        Ok(())
    }

    fn delete_scrap(&self, scrap: &Scrap) -> RepoResult<()> {
        self.repo_call("delete_scrap")?;
        self.scraps.borrow_mut().retain(|s| s != scrap);
        Ok(())
    }

    fn scrapped_place_ids(&self, user_id: &Id) -> RepoResult<Vec<Id>> {
        self.repo_call("scrapped_place_ids")?;
        Ok(self
            .scraps
            .borrow()
            .iter()
            .filter(|s| &s.user_id == user_id)
            .map(|s| s.place_id.clone())
            .collect())
    }
}

impl ProfileRepo for MockDb {
    fn create_profile(&self, profile: &UserProfile) -> RepoResult<()> {
        self.repo_call("create_profile")?;
        let mut profiles = self.profiles.borrow_mut();
        if profiles.iter().any(|p| {
            p.user_id == profile.user_id || p.nickname == profile.nickname || p.email == profile.email
        }) {
            return Err(RepoError::AlreadyExists);
        }
        profiles.push(profile.clone());
        Ok(())
    }

    fn update_profile(&self, profile: &UserProfile) -> RepoResult<()> {
        self.repo_call("update_profile")?;
        let mut profiles = self.profiles.borrow_mut();
        let existing = profiles
            .iter_mut()
            .find(|p| p.user_id == profile.user_id)
            .ok_or(RepoError::NotFound)?;
        *existing = profile.clone();
        Ok(())
    }

    fn get_profile(&self, user_id: &Id) -> RepoResult<UserProfile> {
        self.repo_call("get_profile")?;
        self.profiles
            .borrow()
            .iter()
            .find(|p| &p.user_id == user_id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    fn try_get_profile_by_nickname(&self, nickname: &Nickname) -> RepoResult<Option<UserProfile>> {
        self.repo_call("try_get_profile_by_nickname")?;
        Ok(self
            .profiles
            .borrow()
            .iter()
            .find(|p| &p.nickname == nickname)
            .cloned())
    }

    fn try_get_profile_by_email(&self, email: &EmailAddress) -> RepoResult<Option<UserProfile>> {
        self.repo_call("try_get_profile_by_email")?;
        Ok(self
            .profiles
            .borrow()
            .iter()
            .find(|p| &p.email == email)
            .cloned())
    }
}

impl AuthGateway for MockDb {
    fn current_session(&self) -> GatewayResult<Option<Session>> {
        self.gateway_call("current_session")?;
        Ok(self.session.borrow().clone())
    }

    fn sign_up(&self, email: &EmailAddress, password: &str) -> GatewayResult<AuthUser> {
        self.gateway_call("sign_up")?;
        let mut accounts = self.accounts.borrow_mut();
        if accounts.iter().any(|(e, _, _)| e == email) {
            return Err(GatewayError::Rejected("User already registered".into()));
        }
        let id = Id::new();
        accounts.push((email.clone(), password.into(), id.clone()));
        Ok(AuthUser {
            id,
            email: Some(email.clone()),
            created_at: Some(Timestamp::now()),
        })
    }

    fn sign_in_with_password(&self, email: &EmailAddress, password: &str) -> GatewayResult<Session> {
        self.gateway_call("sign_in_with_password")?;
        let user_id = self
            .accounts
            .borrow()
            .iter()
            .find(|(e, p, _)| e == email && p == password)
            .map(|(_, _, id)| id.clone())
            .ok_or(GatewayError::InvalidCredentials)?;
        Ok(self.sign_in_as(user_id.as_str()))
    }

    fn oauth_authorize_url(&self, provider: OAuthProvider, redirect_to: Option<&str>) -> String {
        let mut url = format!("{BACKEND_URL}/auth/v1/authorize?provider={provider}");
        if let Some(redirect_to) = redirect_to {
            url.push_str("&redirect_to=");
            url.push_str(redirect_to);
        }
        url
    }

    fn sign_out(&self) -> GatewayResult<()> {
        self.gateway_call("sign_out")?;
        self.session.borrow_mut().take();
        Ok(())
    }
}

impl BlobStorage for MockDb {
    fn upload(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> GatewayResult<String> {
        self.gateway_call("upload")?;
        self.blobs
            .borrow_mut()
            .push((bucket.into(), path.into(), content_type.into(), data));
        Ok(format!("{BACKEND_URL}/storage/v1/object/public/{bucket}/{path}"))
    }
}
