pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{comment_builder::*, place_builder::*, profile_builder::*, session_builder::*};

pub mod place_builder {

    use super::*;
    use crate::place::*;

    #[derive(Debug)]
    pub struct PlaceBuild {
        place: Place,
    }

    impl PlaceBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.place.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.place.name = name.into();
            self
        }
        pub fn category(mut self, category: &str) -> Self {
            self.place.category = category.into();
            self
        }
        pub fn place_type(mut self, place_type: &str) -> Self {
            self.place.place_type = place_type.into();
            self
        }
        pub fn rating(mut self, rating: f64) -> Self {
            self.place.rating = rating;
            self
        }
        pub fn address(mut self, address: &str) -> Self {
            self.place.address = Some(address.into());
            self
        }
        pub fn finish(self) -> Place {
            self.place
        }
    }

    impl Builder for Place {
        type Build = PlaceBuild;
        fn build() -> PlaceBuild {
            PlaceBuild {
                place: Place {
                    id: "place".into(),
                    category: "".into(),
                    place_type: "".into(),
                    name: "A study place".into(),
                    photo_url: None,
                    rating: 0.0,
                    address: None,
                    operating_hours: None,
                    contact: None,
                    fee: None,
                    website_url: None,
                    notes: None,
                },
            }
        }
    }
}

pub mod comment_builder {

    use super::*;
    use crate::{comment::*, star_rating::*, time::*};

    #[derive(Debug)]
    pub struct CommentBuild {
        comment: Comment,
    }

    impl CommentBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.comment.id = id.into();
            self
        }
        pub fn place_id(mut self, place_id: &str) -> Self {
            self.comment.place_id = place_id.into();
            self
        }
        pub fn user_id(mut self, user_id: &str) -> Self {
            self.comment.user_id = user_id.into();
            self
        }
        pub fn rating(mut self, rating: StarRating) -> Self {
            self.comment.rating = rating;
            self
        }
        pub fn title(mut self, title: &str) -> Self {
            self.comment.title = title.into();
            self
        }
        pub fn body(mut self, body: &str) -> Self {
            self.comment.body = body.into();
            self
        }
        pub fn created_at(mut self, created_at: Timestamp) -> Self {
            self.comment.created_at = created_at;
            self
        }
        pub fn nickname(mut self, nickname: &str) -> Self {
            self.comment.author.nickname = nickname.into();
            self
        }
        pub fn finish(self) -> Comment {
            self.comment
        }
    }

    impl Builder for Comment {
        type Build = CommentBuild;
        fn build() -> CommentBuild {
            CommentBuild {
                comment: Comment {
                    id: "comment".into(),
                    place_id: "place".into(),
                    user_id: "user".into(),
                    rating: StarRating::Three,
                    title: "".into(),
                    body: "Quiet and bright".into(),
                    created_at: Timestamp::now(),
                    author: Author {
                        nickname: "student".into(),
                        avatar_url: None,
                    },
                },
            }
        }
    }
}

pub mod session_builder {

    use super::*;
    use crate::{session::*, time::*};

    #[derive(Debug)]
    pub struct SessionBuild {
        session: Session,
    }

    impl SessionBuild {
        pub fn user_id(mut self, user_id: &str) -> Self {
            self.session.user.id = user_id.into();
            self
        }
        pub fn email(mut self, email: &str) -> Self {
            self.session.user.email = email.parse().ok();
            self
        }
        pub fn access_token(mut self, token: &str) -> Self {
            self.session.access_token = token.into();
            self
        }
        pub fn expires_at(mut self, expires_at: Option<Timestamp>) -> Self {
            self.session.expires_at = expires_at;
            self
        }
        pub fn finish(self) -> Session {
            self.session
        }
    }

    impl Builder for Session {
        type Build = SessionBuild;
        fn build() -> SessionBuild {
            SessionBuild {
                session: Session {
                    access_token: "access-token".into(),
                    refresh_token: "refresh-token".into(),
                    expires_at: None,
                    user: AuthUser {
                        id: "user".into(),
                        email: None,
                        created_at: None,
                    },
                },
            }
        }
    }
}

pub mod profile_builder {

    use super::*;
    use crate::{email::*, time::*, user::*};

    #[derive(Debug)]
    pub struct UserProfileBuild {
        profile: UserProfile,
    }

    impl UserProfileBuild {
        pub fn user_id(mut self, user_id: &str) -> Self {
            self.profile.user_id = user_id.into();
            self
        }
        /// Panics on invalid nicknames, only meant for tests.
        pub fn nickname(mut self, nickname: &str) -> Self {
            self.profile.nickname = nickname.parse().unwrap();
            self
        }
        pub fn email(mut self, email: &str) -> Self {
            self.profile.email = EmailAddress::new_unchecked(email.into());
            self
        }
        pub fn avatar_url(mut self, avatar_url: &str) -> Self {
            self.profile.avatar_url = avatar_url.into();
            self
        }
        pub fn finish(self) -> UserProfile {
            self.profile
        }
    }

    impl Builder for UserProfile {
        type Build = UserProfileBuild;
        fn build() -> UserProfileBuild {
            UserProfileBuild {
                profile: UserProfile {
                    user_id: "user".into(),
                    nickname: "student".parse().unwrap(),
                    email: EmailAddress::new_unchecked("student@example.com".into()),
                    user_type: UserType::UniversityStudent,
                    created_at: Timestamp::now(),
                    avatar_url: DEFAULT_AVATAR_URL.into(),
                },
            }
        }
    }
}
