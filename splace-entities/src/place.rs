use crate::id::Id;

/// A study place (study room, café, ...).
///
/// Places are maintained by the backend; the client only reads them.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub id              : Id,
    pub category        : String,
    pub place_type      : String,
    pub name            : String,
    pub photo_url       : Option<String>,
    pub rating          : f64,
    pub address         : Option<String>,
    pub operating_hours : Option<String>,
    pub contact         : Option<String>,
    pub fee             : Option<String>,
    pub website_url     : Option<String>,
    pub notes           : Option<String>,
}

/// A reference to a place that only carries the
/// attributes needed for displaying a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceRef {
    pub id: Id,
    pub name: String,
}

impl From<&Place> for PlaceRef {
    fn from(from: &Place) -> Self {
        Self {
            id: from.id.clone(),
            name: from.name.clone(),
        }
    }
}

/// Sort places by their rating, best rated first.
pub fn sort_by_rating_desc(places: &mut [Place]) {
    places.sort_by(|a, b| b.rating.total_cmp(&a.rating));
}
