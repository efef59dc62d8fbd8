pub mod app;
pub mod gateways;
pub mod repositories;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use splace_entities::{
        comment::*, email::*, filter::*, id::*, place::*, scrap::*, session::*, star_rating::*,
        time::*, user::*,
    };
}
