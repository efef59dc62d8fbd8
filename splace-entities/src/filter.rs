use crate::place::Place;

/// The pair of facets that narrow down the list of places.
///
/// An empty facet matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PlaceFilter {
    pub category: Option<String>,
    pub place_type: Option<String>,
}

impl PlaceFilter {
    pub fn new(category: Option<&str>, place_type: Option<&str>) -> Self {
        Self {
            category: normalize(category),
            place_type: normalize(place_type),
        }
    }

    pub fn category(category: &str) -> Self {
        Self::new(Some(category), None)
    }

    pub fn place_type(place_type: &str) -> Self {
        Self::new(None, Some(place_type))
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.place_type.is_none()
    }

    /// Case-insensitive substring match on both facets.
    pub fn matches(&self, place: &Place) -> bool {
        facet_matches(self.category.as_deref(), &place.category)
            && facet_matches(self.place_type.as_deref(), &place.place_type)
    }
}

fn normalize(facet: Option<&str>) -> Option<String> {
    facet
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

fn facet_matches(facet: Option<&str>, value: &str) -> bool {
    match facet {
        Some(facet) => value.to_lowercase().contains(&facet.to_lowercase()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::*;

    #[test]
    fn blank_facets_are_dropped() {
        let f = PlaceFilter::new(Some("  "), Some(""));
        assert!(f.is_empty());
        assert_eq!(PlaceFilter::default(), f);
    }

    #[test]
    fn match_case_insensitive_substring() {
        let place = Place::build()
            .category("Study Cafe")
            .place_type("24h Room")
            .finish();
        assert!(PlaceFilter::default().matches(&place));
        assert!(PlaceFilter::category("cafe").matches(&place));
        assert!(PlaceFilter::place_type("ROOM").matches(&place));
        assert!(PlaceFilter::new(Some("study"), Some("24h")).matches(&place));
        assert!(!PlaceFilter::category("library").matches(&place));
        assert!(!PlaceFilter::new(Some("cafe"), Some("library")).matches(&place));
    }
}
