mod comments;
mod error;
mod load_places;
mod my_page;
mod profile;
mod scraps;
mod sign_in;
mod sign_up;
mod upload_avatar;

#[cfg(test)]
pub mod tests;

pub use self::{
    comments::*, error::Error, load_places::*, my_page::*, profile::*, scraps::*, sign_in::*,
    sign_up::*, upload_avatar::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{
        entities::*,
        gateways::{auth::*, storage::*},
        repositories::*,
    };
}
