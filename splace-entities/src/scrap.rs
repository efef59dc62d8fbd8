use crate::id::Id;

/// A bookmark of a place by a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scrap {
    pub user_id: Id,
    pub place_id: Id,
}
