use super::notice::Notices;
use crate::{entities::*, usecases};

/// Identifies a single fetch of places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    filter: PlaceFilter,
}

impl FetchTicket {
    pub fn filter(&self) -> &PlaceFilter {
        &self.filter
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The response belongs to a superseded fetch.
    Discarded,
}

/// The list of places shown on the home page.
///
/// Only the response of the most recent fetch is applied
/// and only if its filter is still selected.
#[derive(Debug, Default)]
pub struct PlaceList {
    latest: u64,
    loading: bool,
    settled: Option<PlaceFilter>,
    places: Vec<Place>,
}

impl PlaceList {
    pub fn begin(&mut self, filter: &PlaceFilter) -> FetchTicket {
        self.latest += 1;
        self.loading = true;
        FetchTicket {
            seq: self.latest,
            filter: filter.clone(),
        }
    }

    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        current: &PlaceFilter,
        result: Result<Vec<Place>, usecases::Error>,
        notices: &mut Notices,
    ) -> Completion {
        if ticket.seq != self.latest || &ticket.filter != current {
            log::debug!("Discarding stale places of fetch #{}", ticket.seq);
            return Completion::Discarded;
        }
        self.loading = false;
        self.places = match result {
            Ok(places) => places,
            Err(err) => {
                log::warn!("Failed to load places: {err}");
                notices.error("The places could not be loaded");
                vec![]
            }
        };
        self.settled = Some(ticket.filter);
        Completion::Applied
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The filter of the places that are currently shown.
    pub fn settled_filter(&self) -> Option<&PlaceFilter> {
        self.settled.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::Error as RepoError;
    use splace_entities::builders::*;

    fn places(ids: &[&str]) -> Vec<Place> {
        ids.iter().map(|id| Place::build().id(id).finish()).collect()
    }

    fn ids(list: &PlaceList) -> Vec<&str> {
        list.places().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn apply_latest_fetch() {
        let mut notices = Notices::default();
        let mut list = PlaceList::default();
        let filter = PlaceFilter::category("Cafe");
        let ticket = list.begin(&filter);
        assert!(list.is_loading());
        assert_eq!(
            Completion::Applied,
            list.complete(ticket, &filter, Ok(places(&["a"])), &mut notices)
        );
        assert!(!list.is_loading());
        assert_eq!(vec!["a"], ids(&list));
        assert_eq!(Some(&filter), list.settled_filter());
    }

    #[test]
    fn late_response_of_superseded_fetch_is_discarded() {
        let mut notices = Notices::default();
        let mut list = PlaceList::default();
        let f1 = PlaceFilter::category("Cafe");
        let f2 = PlaceFilter::place_type("Quiet");
        let t1 = list.begin(&f1);
        let t2 = list.begin(&f2);
        assert_eq!(
            Completion::Applied,
            list.complete(t2, &f2, Ok(places(&["quiet"])), &mut notices)
        );
        assert_eq!(
            Completion::Discarded,
            list.complete(t1, &f2, Ok(places(&["cafe"])), &mut notices)
        );
        assert_eq!(vec!["quiet"], ids(&list));
        assert_eq!(Some(&f2), list.settled_filter());
    }

    #[test]
    fn early_response_of_superseded_fetch_is_discarded() {
        let mut notices = Notices::default();
        let mut list = PlaceList::default();
        let f1 = PlaceFilter::category("Cafe");
        let f2 = PlaceFilter::place_type("Quiet");
        let t1 = list.begin(&f1);
        let t2 = list.begin(&f2);
        assert_eq!(
            Completion::Discarded,
            list.complete(t1, &f2, Ok(places(&["cafe"])), &mut notices)
        );
        assert!(list.is_loading());
        list.complete(t2, &f2, Ok(places(&["quiet"])), &mut notices);
        assert_eq!(vec!["quiet"], ids(&list));
    }

    #[test]
    fn response_for_deselected_filter_is_discarded() {
        let mut notices = Notices::default();
        let mut list = PlaceList::default();
        let ticket = list.begin(&PlaceFilter::category("Cafe"));
        assert_eq!(
            Completion::Discarded,
            list.complete(
                ticket,
                &PlaceFilter::default(),
                Ok(places(&["cafe"])),
                &mut notices
            )
        );
        assert!(list.places().is_empty());
    }

    #[test]
    fn failure_shows_empty_list_and_notice() {
        let mut notices = Notices::default();
        let mut list = PlaceList::default();
        let filter = PlaceFilter::default();
        let ticket = list.begin(&filter);
        list.complete(ticket, &filter, Ok(places(&["a", "b"])), &mut notices);
        let ticket = list.begin(&filter);
        let completion = list.complete(
            ticket,
            &filter,
            Err(RepoError::Rejected("offline".into()).into()),
            &mut notices,
        );
        assert_eq!(Completion::Applied, completion);
        assert!(list.places().is_empty());
        assert_eq!(1, notices.drain().len());
    }
}
