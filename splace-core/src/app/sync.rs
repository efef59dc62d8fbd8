use super::{
    filter::{FilterMode, FilterState},
    history::{History, PopState},
    route::Route,
};
use crate::entities::PlaceFilter;

/// Keeps the filter selection and the URL in sync.
///
/// The selection is the source of truth when the user picks a facet
/// and the URL is the source of truth when navigating through
/// the history.
#[derive(Debug)]
pub struct UrlSync<H> {
    history: H,
    filter: FilterState,
}

impl<H: History> UrlSync<H> {
    pub fn new(mut history: H, mode: FilterMode) -> Self {
        let mut filter = FilterState::new(mode);
        if let Route::Home(initial) = Route::parse(history.location()) {
            filter.set(initial.clone());
            if filter.filter() != &initial {
                // The URL must not show a facet that has been dropped
                let url = Route::Home(filter.filter().clone()).to_url();
                log::debug!("Normalized {} to {url}", history.location());
                history.replace(url);
            }
        }
        Self { history, filter }
    }

    pub fn location(&self) -> &str {
        self.history.location()
    }

    pub fn route(&self) -> Route {
        Route::parse(self.history.location())
    }

    pub fn filter(&self) -> &PlaceFilter {
        self.filter.filter()
    }

    pub fn mode(&self) -> FilterMode {
        self.filter.mode()
    }

    /// Returns `true` if a new history entry has been added.
    pub fn select_category(&mut self, category: &str) -> bool {
        self.filter.select_category(category);
        self.push_filter()
    }

    pub fn select_place_type(&mut self, place_type: &str) -> bool {
        self.filter.select_place_type(place_type);
        self.push_filter()
    }

    pub fn show_all(&mut self) -> bool {
        self.filter.clear();
        self.push_filter()
    }

    pub fn navigate(&mut self, route: &Route) -> bool {
        if let Route::Home(filter) = route {
            self.filter.set(filter.clone());
            return self.push_filter();
        }
        self.push(route.to_url())
    }

    /// Replaces the current entry without adding a new one.
    pub fn redirect(&mut self, route: &Route) {
        if let Route::Home(filter) = route {
            self.filter.set(filter.clone());
        }
        self.history.replace(route.to_url());
    }

    pub fn back(&mut self) -> Option<Route> {
        let pop = self.history.back()?;
        Some(self.on_popstate(&pop))
    }

    pub fn forward(&mut self) -> Option<Route> {
        let pop = self.history.forward()?;
        Some(self.on_popstate(&pop))
    }

    pub fn on_popstate(&mut self, pop: &PopState) -> Route {
        let route = Route::parse(&pop.url);
        if let Route::Home(filter) = &route {
            if self.filter.set(filter.clone()) {
                log::debug!("Restored filter from {}", pop.url);
            }
        }
        route
    }

    fn push_filter(&mut self) -> bool {
        let url = Route::Home(self.filter.filter().clone()).to_url();
        self.push(url)
    }

    fn push(&mut self, url: String) -> bool {
        if url == self.history.location() {
            return false;
        }
        self.history.push(url);
        true
    }
}
