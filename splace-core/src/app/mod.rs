//! Client state of the application.
//!
//! The [Store] owns all state that is shown to the user and
//! changes it only in response to [Action]s. The backend is
//! passed into every dispatch, which allows to drive the
//! store with an in-memory backend in tests.

pub mod comment_thread;
pub mod confirm;
pub mod filter;
pub mod history;
pub mod notice;
pub mod pages;
pub mod place_list;
pub mod route;
pub mod scrap_toggle;
pub mod session;
pub mod sync;


pub use self::{
    comment_thread::CommentThread,
    confirm::Confirm,
    filter::FilterMode,
    history::{History, MemoryHistory},
    notice::{Level, Notice, Notices},
    pages::*,
    place_list::PlaceList,
    route::{MyTab, Route},
    session::{AuthChange, SessionHolder},
};

use self::{
    route::{Guarded, NOTICE_SIGN_IN_REQUIRED},
    scrap_toggle::ScrapToggle,
    sync::UrlSync,
};
use crate::{
    entities::*,
    gateways::{auth::AuthGateway, storage::BlobStorage},
    repositories::*,
    usecases::{self, NewAccount, PlaceDetails, ProfileUpdate, ProfileUpdated},
    util::validate::CommentDraft,
};

/// Everything the application needs from the backend.
pub trait Backend:
    PlaceRepo + CommentRepo + ScrapRepo + ProfileRepo + AuthGateway + BlobStorage
{
}

impl<T> Backend for T where
    T: PlaceRepo + CommentRepo + ScrapRepo + ProfileRepo + AuthGateway + BlobStorage
{
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub filter_mode: FilterMode,
    pub title_max_len: usize,
    pub avatar_bucket: String,
    pub oauth_redirect_to: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            filter_mode: FilterMode::Exclusive,
            title_max_len: 50,
            avatar_bucket: "user_avatars".into(),
            oauth_redirect_to: None,
        }
    }
}

#[derive(Clone)]
pub enum Action {
    Mount,
    Unmount,
    AuthChanged(AuthChange),
    Navigate(Route),
    Back,
    Forward,
    SelectCategory(String),
    SelectPlaceType(String),
    ShowAll,
    SetMinRating(Option<StarRating>),
    SignIn { email: String, password: String },
    SignInWithOAuth(OAuthProvider),
    SignUp(NewAccount),
    SignOut,
    EditDraft(CommentDraft),
    SubmitComment,
    StartEditing(Id),
    EditComment(CommentDraft),
    SaveComment,
    CancelEditing,
    DeleteComment(Id),
    ToggleScrap,
    UpdateProfile(ProfileUpdate),
    UploadAvatar { file_name: String, data: Vec<u8> },
}

impl Action {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mount => "mount",
            Self::Unmount => "unmount",
            Self::AuthChanged(_) => "auth-changed",
            Self::Navigate(_) => "navigate",
            Self::Back => "back",
            Self::Forward => "forward",
            Self::SelectCategory(_) => "select-category",
            Self::SelectPlaceType(_) => "select-place-type",
            Self::ShowAll => "show-all",
            Self::SetMinRating(_) => "set-min-rating",
            Self::SignIn { .. } => "sign-in",
            Self::SignInWithOAuth(_) => "sign-in-with-oauth",
            Self::SignUp(_) => "sign-up",
            Self::SignOut => "sign-out",
            Self::EditDraft(_) => "edit-draft",
            Self::SubmitComment => "submit-comment",
            Self::StartEditing(_) => "start-editing",
            Self::EditComment(_) => "edit-comment",
            Self::SaveComment => "save-comment",
            Self::CancelEditing => "cancel-editing",
            Self::DeleteComment(_) => "delete-comment",
            Self::ToggleScrap => "toggle-scrap",
            Self::UpdateProfile(_) => "update-profile",
            Self::UploadAvatar { .. } => "upload-avatar",
        }
    }
}

// Credentials must never end up in the logs
impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug)]
pub struct Store<H = MemoryHistory> {
    settings: Settings,
    session: SessionHolder,
    nav: UrlSync<H>,
    places: PlaceList,
    page: Page,
    notices: Notices,
    external_url: Option<String>,
}

impl<H: History> Store<H> {
    pub fn new(settings: Settings, history: H) -> Self {
        let nav = UrlSync::new(history, settings.filter_mode);
        Self {
            settings,
            session: SessionHolder::default(),
            nav,
            places: PlaceList::default(),
            page: Page::default(),
            notices: Notices::default(),
            external_url: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &SessionHolder {
        &self.session
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn places(&self) -> &PlaceList {
        &self.places
    }

    pub fn filter(&self) -> &PlaceFilter {
        self.nav.filter()
    }

    pub fn location(&self) -> &str {
        self.nav.location()
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// A URL the user has to open outside of the application.
    pub fn take_external_url(&mut self) -> Option<String> {
        self.external_url.take()
    }

    pub fn dispatch<B: Backend>(&mut self, backend: &B, confirm: &mut dyn Confirm, action: Action) {
        log::debug!("Dispatching action {}", action.name());
        match action {
            Action::Mount => {
                self.session.mount(backend, &mut self.notices);
                self.enter(backend);
            }
            Action::Unmount => {
                self.session.unmount();
                self.page = Page::Blank;
            }
            Action::AuthChanged(change) => {
                self.session.handle(change);
                self.enter(backend);
            }
            Action::Navigate(route) => {
                self.nav.navigate(&route);
                self.enter(backend);
            }
            Action::Back => {
                if self.nav.back().is_some() {
                    self.enter(backend);
                }
            }
            Action::Forward => {
                if self.nav.forward().is_some() {
                    self.enter(backend);
                }
            }
            Action::SelectCategory(category) => {
                if self.nav.select_category(&category) {
                    self.enter(backend);
                }
            }
            Action::SelectPlaceType(place_type) => {
                if self.nav.select_place_type(&place_type) {
                    self.enter(backend);
                }
            }
            Action::ShowAll => {
                if self.nav.show_all() {
                    self.enter(backend);
                }
            }
            Action::SetMinRating(min_rating) => self.set_min_rating(backend, min_rating),
            Action::SignIn { email, password } => self.sign_in(backend, &email, &password),
            Action::SignInWithOAuth(provider) => {
                let redirect_to = self.settings.oauth_redirect_to.as_deref();
                self.external_url = Some(usecases::sign_in_with_oauth(
                    backend,
                    provider,
                    redirect_to,
                ));
            }
            Action::SignUp(account) => self.sign_up(backend, &account),
            Action::SignOut => self.sign_out(backend),
            Action::EditDraft(draft) => {
                if let Page::Detail(detail) = &mut self.page {
                    detail.thread.set_draft(draft);
                }
            }
            Action::SubmitComment => self.submit_comment(backend),
            Action::StartEditing(id) => self.start_editing(&id),
            Action::EditComment(draft) => {
                if let Page::Detail(detail) = &mut self.page {
                    detail.thread.set_editing_draft(draft);
                }
            }
            Action::SaveComment => self.save_comment(backend),
            Action::CancelEditing => {
                if let Page::Detail(detail) = &mut self.page {
                    detail.thread.stop_editing();
                }
            }
            Action::DeleteComment(id) => self.delete_comment(backend, confirm, &id),
            Action::ToggleScrap => self.toggle_scrap(backend),
            Action::UpdateProfile(update) => self.update_profile(backend, &update),
            Action::UploadAvatar { file_name, data } => {
                self.upload_avatar(backend, &file_name, data)
            }
        }
    }

    /// Renders the route of the current location.
    fn enter<B: Backend>(&mut self, backend: &B) {
        let mut route = self.nav.route();
        if let Guarded::Redirect { to, notice } =
            route::guard(&route, self.session.is_authenticated())
        {
            log::debug!("Redirecting from {route} to {to}");
            self.notices.info(notice);
            self.nav.redirect(&to);
            route = to;
        }
        self.page = match route {
            Route::Home(_) => {
                self.load_places(backend);
                Page::Home
            }
            Route::PlaceDetail(id) => self.load_detail(backend, &id, None),
            Route::SignIn => Page::SignIn,
            Route::SignUp => Page::SignUp,
            Route::My(tab) => self.load_my_page(backend, tab),
            Route::NotFound(url) => {
                log::debug!("No page at {url}");
                Page::NotFound
            }
        };
    }

    fn require_sign_in<B: Backend>(&mut self, backend: &B) {
        self.notices.info(NOTICE_SIGN_IN_REQUIRED);
        self.nav.navigate(&Route::SignIn);
        self.enter(backend);
    }

    fn load_places<B: PlaceRepo>(&mut self, backend: &B) {
        let ticket = self.places.begin(self.nav.filter());
        let result = usecases::load_places(backend, ticket.filter());
        self.places
            .complete(ticket, self.nav.filter(), result, &mut self.notices);
    }

    fn load_detail<B: Backend>(
        &mut self,
        backend: &B,
        id: &Id,
        min_rating: Option<StarRating>,
    ) -> Page {
        let PlaceDetails { place, comments } =
            match usecases::load_place_details(backend, id, min_rating) {
                Ok(details) => details,
                Err(err) => {
                    log::warn!("Failed to load place {id}: {err}");
                    self.notices.error("The place could not be loaded");
                    return Page::NotFound;
                }
            };
        let user_id = self.session.user_id().cloned();
        let mut scrap = ScrapToggle::new(place.id.clone());
        scrap.load(backend, user_id.as_ref(), &mut self.notices);
        let viewer = user_id.and_then(|user_id| match usecases::get_profile(backend, &user_id) {
            Ok(profile) => Some(profile),
            Err(err) => {
                log::warn!("Failed to load profile of {user_id}: {err}");
                None
            }
        });
        Page::Detail(Box::new(DetailPage {
            thread: CommentThread::new(place.id.clone(), comments),
            place,
            scrap,
            min_rating,
            viewer,
        }))
    }

    fn set_min_rating<B: Backend>(&mut self, backend: &B, min_rating: Option<StarRating>) {
        let Page::Detail(detail) = &self.page else {
            return;
        };
        let id = detail.place.id.clone();
        self.page = self.load_detail(backend, &id, min_rating);
    }

    fn load_my_page<B: Backend>(&mut self, backend: &B, tab: MyTab) -> Page {
        let mut page = MyPage::new(tab);
        let Some(user_id) = self.session.user_id().cloned() else {
            return Page::My(page);
        };
        match usecases::get_profile(backend, &user_id) {
            Ok(profile) => page.profile = Some(profile),
            Err(err) => {
                log::warn!("Failed to load profile of {user_id}: {err}");
                self.notices.error("Your profile could not be loaded");
            }
        }
        match tab {
            MyTab::Profile => {}
            MyTab::Scrapped => match usecases::scrapped_places(backend, &user_id) {
                Ok(places) => page.scrapped = places,
                Err(err) => {
                    log::warn!("Failed to load scrapped places of {user_id}: {err}");
                    self.notices.error("Your scraps could not be loaded");
                }
            },
            MyTab::Comments => match usecases::comments_of_user(backend, &user_id) {
                Ok(comments) => page.comments = comments,
                Err(err) => {
                    log::warn!("Failed to load comments of {user_id}: {err}");
                    self.notices.error("Your comments could not be loaded");
                }
            },
        }
        Page::My(page)
    }

    fn sign_in<B: Backend>(&mut self, backend: &B, email: &str, password: &str) {
        match usecases::sign_in_with_password(backend, email, password) {
            Ok(session) => {
                self.session.handle(AuthChange::SignedIn(session));
                self.notices.success("Signed in");
                self.nav.navigate(&Route::home());
                self.enter(backend);
            }
            Err(err) => self.notices.error(err.to_string()),
        }
    }

    fn sign_up<B: Backend>(&mut self, backend: &B, account: &NewAccount) {
        match usecases::sign_up(backend, backend, account) {
            Ok(profile) => {
                log::info!("Signed up user {}", profile.user_id);
                self.session.handle(AuthChange::SignedOut);
                self.notices
                    .success(format!("Welcome, {}! Please sign in.", profile.nickname));
                self.nav.navigate(&Route::SignIn);
                self.enter(backend);
            }
            Err(err) => self.notices.error(err.to_string()),
        }
    }

    fn sign_out<B: Backend>(&mut self, backend: &B) {
        if let Err(err) = usecases::sign_out(backend) {
            log::warn!("Failed to sign out: {err}");
        }
        self.session.handle(AuthChange::SignedOut);
        self.notices.success("Signed out");
        self.nav.navigate(&Route::home());
        self.enter(backend);
    }

    fn submit_comment<B: Backend>(&mut self, backend: &B) {
        if !matches!(self.page, Page::Detail(_)) {
            return;
        }
        let Some(user_id) = self.session.user_id().cloned() else {
            self.require_sign_in(backend);
            return;
        };
        let title_max_len = self.settings.title_max_len;
        let Page::Detail(detail) = &mut self.page else {
            return;
        };
        let draft = detail.thread.draft().clone();
        let content = match draft.validate(title_max_len) {
            Ok(content) => content,
            Err(err) => {
                self.notices.error(err.to_string());
                return;
            }
        };
        let author = detail.viewer.as_ref().map(Author::from).unwrap_or_default();
        let tmp_id = detail.thread.stage_create(&user_id, author, content);
        let place_id = detail.place.id.clone();
        match usecases::create_comment(backend, &user_id, &place_id, &draft, title_max_len) {
            Ok(comment) => {
                detail.thread.commit(&tmp_id, Some(comment));
                detail.thread.clear_draft();
                self.notices.success("Your comment has been saved");
            }
            Err(err) => {
                log::warn!("Failed to create comment: {err}");
                detail.thread.rollback(&tmp_id);
                self.notices.error("The comment could not be saved");
            }
        }
    }

    fn start_editing(&mut self, id: &Id) {
        let viewer = self.session.user_id();
        let Page::Detail(detail) = &mut self.page else {
            return;
        };
        let Some(entry) = detail.thread.get(id) else {
            return;
        };
        if !CommentThread::can_modify(&entry.comment, viewer) {
            self.notices.error("Only the author may edit this comment");
            return;
        }
        detail.thread.start_editing(id);
    }

    fn save_comment<B: Backend>(&mut self, backend: &B) {
        let Some(user_id) = self.session.user_id().cloned() else {
            self.require_sign_in(backend);
            return;
        };
        let title_max_len = self.settings.title_max_len;
        let Page::Detail(detail) = &mut self.page else {
            return;
        };
        let Some((id, draft)) = detail.thread.editing().cloned() else {
            return;
        };
        let content = match draft.validate(title_max_len) {
            Ok(content) => content,
            Err(err) => {
                self.notices.error(err.to_string());
                return;
            }
        };
        if !detail.thread.stage_update(&id, content) {
            return;
        }
        match usecases::update_comment(backend, &user_id, &id, &draft, title_max_len) {
            Ok(comment) => {
                detail.thread.commit(&id, Some(comment));
                detail.thread.stop_editing();
                self.notices.success("Your comment has been updated");
            }
            Err(err) => {
                log::warn!("Failed to update comment {id}: {err}");
                detail.thread.rollback(&id);
                self.notices.error("The comment could not be updated");
            }
        }
    }

    fn delete_comment<B: Backend>(&mut self, backend: &B, confirm: &mut dyn Confirm, id: &Id) {
        let Some(user_id) = self.session.user_id().cloned() else {
            self.require_sign_in(backend);
            return;
        };
        let Page::Detail(detail) = &mut self.page else {
            return;
        };
        let Some(entry) = detail.thread.get(id) else {
            return;
        };
        if !CommentThread::can_modify(&entry.comment, Some(&user_id)) {
            self.notices.error("Only the author may delete this comment");
            return;
        }
        if !confirm.confirm("Do you really want to delete this comment?") {
            return;
        }
        if !detail.thread.stage_delete(id) {
            return;
        }
        match usecases::delete_comment(backend, &user_id, id) {
            Ok(()) => {
                detail.thread.commit(id, None);
                self.notices.success("The comment has been deleted");
            }
            Err(err) => {
                log::warn!("Failed to delete comment {id}: {err}");
                detail.thread.rollback(id);
                self.notices.error("The comment could not be deleted");
            }
        }
    }

    fn toggle_scrap<B: Backend>(&mut self, backend: &B) {
        if !matches!(self.page, Page::Detail(_)) {
            return;
        }
        let Some(user_id) = self.session.user_id().cloned() else {
            self.require_sign_in(backend);
            return;
        };
        if let Page::Detail(detail) = &mut self.page {
            detail.scrap.toggle(backend, &user_id, &mut self.notices);
        }
    }

    fn update_profile<B: Backend>(&mut self, backend: &B, update: &ProfileUpdate) {
        let Some(user_id) = self.session.user_id().cloned() else {
            self.require_sign_in(backend);
            return;
        };
        match usecases::update_profile(backend, &user_id, update) {
            Ok(ProfileUpdated { profile, comments }) => {
                match comments {
                    Ok(_) => self.notices.success("Your profile has been saved"),
                    Err(_) => self.notices.warning(
                        "Your profile has been saved, but your comments still show the previous nickname",
                    ),
                }
                if let Page::My(page) = &mut self.page {
                    page.profile = Some(profile);
                }
            }
            Err(err) => self.notices.error(err.to_string()),
        }
    }

    fn upload_avatar<B: Backend>(&mut self, backend: &B, file_name: &str, data: Vec<u8>) {
        let Some(user_id) = self.session.user_id().cloned() else {
            self.require_sign_in(backend);
            return;
        };
        let Page::My(MyPage {
            profile: Some(profile),
            ..
        }) = &self.page
        else {
            self.notices.error("Your profile has not been loaded yet");
            return;
        };
        let mut update = ProfileUpdate::from(profile);
        let bucket = &self.settings.avatar_bucket;
        match usecases::upload_avatar(backend, bucket, &user_id, file_name, data) {
            Ok(url) => {
                update.avatar_url = Some(url);
                self.update_profile(backend, &update);
            }
            Err(err) => self.notices.error(err.to_string()),
        }
    }
}
