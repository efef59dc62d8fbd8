use crate::entities::PlaceFilter;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::str::FromStr;
use thiserror::Error;

pub const QUERY_KEY_CATEGORY: &str = "category";
pub const QUERY_KEY_PLACE_TYPE: &str = "placeType";

pub(crate) const URL_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Whether selecting one facet clears the other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Exclusive,
    Independent,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown filter mode: {0}")]
pub struct UnknownFilterMode(pub String);

impl FromStr for FilterMode {
    type Err = UnknownFilterMode;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "exclusive" => Ok(Self::Exclusive),
            "independent" => Ok(Self::Independent),
            _ => Err(UnknownFilterMode(s.to_owned())),
        }
    }
}

/// The currently selected facets.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    mode: FilterMode,
    filter: PlaceFilter,
}

impl FilterState {
    pub fn new(mode: FilterMode) -> Self {
        Self {
            mode,
            filter: PlaceFilter::default(),
        }
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn filter(&self) -> &PlaceFilter {
        &self.filter
    }

    pub fn select_category(&mut self, category: &str) {
        let place_type = match self.mode {
            FilterMode::Exclusive => None,
            FilterMode::Independent => self.filter.place_type.clone(),
        };
        self.filter = PlaceFilter::new(Some(category), place_type.as_deref());
    }

    pub fn select_place_type(&mut self, place_type: &str) {
        let category = match self.mode {
            FilterMode::Exclusive => None,
            FilterMode::Independent => self.filter.category.clone(),
        };
        self.filter = PlaceFilter::new(category.as_deref(), Some(place_type));
    }

    pub fn clear(&mut self) {
        self.filter = PlaceFilter::default();
    }

    /// Replaces the selection, e.g. after navigating through the history.
    ///
    /// Returns `true` if the selection has changed.
    pub fn set(&mut self, filter: PlaceFilter) -> bool {
        let filter = self.normalize(filter);
        if filter == self.filter {
            return false;
        }
        self.filter = filter;
        true
    }

    fn normalize(&self, mut filter: PlaceFilter) -> PlaceFilter {
        // The category wins if both facets are present
        if self.mode == FilterMode::Exclusive && filter.category.is_some() {
            filter.place_type = None;
        }
        filter
    }
}

/// Encodes the filter as a query string including the leading `?`.
///
/// An empty filter is encoded as an empty string.
pub fn to_query(filter: &PlaceFilter) -> String {
    let params: Vec<_> = [
        (QUERY_KEY_CATEGORY, filter.category.as_deref()),
        (QUERY_KEY_PLACE_TYPE, filter.place_type.as_deref()),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|v| format!("{key}={}", utf8_percent_encode(v, URL_COMPONENT))))
    .collect();
    if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    }
}

/// Decodes the facets from a query string with or without the leading `?`.
///
/// Unknown parameters are ignored.
pub fn from_query(query: &str) -> PlaceFilter {
    let mut category = None;
    let mut place_type = None;
    for (key, value) in query_pairs(query) {
        match key.as_str() {
            QUERY_KEY_CATEGORY => category = Some(value),
            QUERY_KEY_PLACE_TYPE => place_type = Some(value),
            _ => {}
        }
    }
    PlaceFilter::new(category.as_deref(), place_type.as_deref())
}

pub(crate) fn query_pairs(query: &str) -> impl Iterator<Item = (String, String)> + '_ {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
}

fn decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_decode_str(&s).decode_utf8_lossy().into_owned()
}
