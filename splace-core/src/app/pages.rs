use super::{comment_thread::CommentThread, route::MyTab, scrap_toggle::ScrapToggle};
use crate::entities::*;

#[derive(Debug)]
pub struct DetailPage {
    pub place: Place,
    pub thread: CommentThread,
    pub scrap: ScrapToggle,
    pub min_rating: Option<StarRating>,
    /// Profile of the signed in user, used as author of new comments
    pub viewer: Option<UserProfile>,
}

#[derive(Debug)]
pub struct MyPage {
    pub tab: MyTab,
    pub profile: Option<UserProfile>,
    pub scrapped: Vec<Place>,
    pub comments: Vec<(Comment, Option<PlaceRef>)>,
}

impl MyPage {
    pub fn new(tab: MyTab) -> Self {
        Self {
            tab,
            profile: None,
            scrapped: vec![],
            comments: vec![],
        }
    }
}

#[derive(Debug, Default)]
pub enum Page {
    #[default]
    Blank,
    Home,
    Detail(Box<DetailPage>),
    SignIn,
    SignUp,
    My(MyPage),
    NotFound,
}
