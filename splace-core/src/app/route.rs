use super::filter::{self, query_pairs, URL_COMPONENT};
use crate::entities::*;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use std::fmt;

const PATH_HOME: &str = "/";
const PATH_DETAIL: &str = "/detail/";
const PATH_SIGN_IN: &str = "/sign/signin";
const PATH_SIGN_UP: &str = "/sign/signup";
const PATH_MY: &str = "/my";
const QUERY_KEY_MY_TAB: &str = "category";

/// Tabs of the profile area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MyTab {
    #[default]
    Profile,
    Scrapped,
    Comments,
}

impl MyTab {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Scrapped => "scrapped",
            Self::Comments => "comments",
        }
    }

    fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "profile" => Some(Self::Profile),
            "scrapped" => Some(Self::Scrapped),
            "comments" => Some(Self::Comments),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home(PlaceFilter),
    PlaceDetail(Id),
    SignIn,
    SignUp,
    My(MyTab),
    NotFound(String),
}

impl Route {
    pub fn parse(url: &str) -> Self {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let path = match path.trim_end_matches('/') {
            "" => PATH_HOME,
            path => path,
        };
        match path {
            PATH_HOME => Self::Home(filter::from_query(query)),
            PATH_SIGN_IN => Self::SignIn,
            PATH_SIGN_UP => Self::SignUp,
            PATH_MY => {
                let tab = query_pairs(query)
                    .find(|(key, _)| key == QUERY_KEY_MY_TAB)
                    .and_then(|(_, value)| MyTab::from_query_value(&value))
                    .unwrap_or_default();
                Self::My(tab)
            }
            _ => match path.strip_prefix(PATH_DETAIL) {
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    let id = percent_decode_str(id).decode_utf8_lossy();
                    Self::PlaceDetail(id.as_ref().into())
                }
                _ => Self::NotFound(url.to_owned()),
            },
        }
    }

    pub fn to_url(&self) -> String {
        match self {
            Self::Home(filter) => format!("{PATH_HOME}{}", filter::to_query(filter)),
            Self::PlaceDetail(id) => format!(
                "{PATH_DETAIL}{}",
                utf8_percent_encode(id.as_str(), URL_COMPONENT)
            ),
            Self::SignIn => PATH_SIGN_IN.to_owned(),
            Self::SignUp => PATH_SIGN_UP.to_owned(),
            Self::My(MyTab::Profile) => PATH_MY.to_owned(),
            Self::My(tab) => format!("{PATH_MY}?{QUERY_KEY_MY_TAB}={}", tab.as_str()),
            Self::NotFound(url) => url.clone(),
        }
    }

    pub fn home() -> Self {
        Self::Home(PlaceFilter::default())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}

/// What to do before a route is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded {
    Render,
    Redirect { to: Route, notice: &'static str },
}

pub const NOTICE_SIGN_IN_REQUIRED: &str = "Please sign in to continue.";
pub const NOTICE_ALREADY_SIGNED_IN: &str = "You are already signed in.";

/// The profile area requires a session, the sign-in
/// and sign-up pages require the absence of a session.
pub fn guard(route: &Route, authenticated: bool) -> Guarded {
    match route {
        Route::My(_) if !authenticated => Guarded::Redirect {
            to: Route::SignIn,
            notice: NOTICE_SIGN_IN_REQUIRED,
        },
        Route::SignIn | Route::SignUp if authenticated => Guarded::Redirect {
            to: Route::My(MyTab::Profile),
            notice: NOTICE_ALREADY_SIGNED_IN,
        },
        _ => Guarded::Render,
    }
}
