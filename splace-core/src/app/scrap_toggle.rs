use super::notice::Notices;
use crate::{entities::*, repositories::ScrapRepo, usecases};

/// Scrap state of the place that is currently shown.
///
/// The state is always read from the backend and never cached.
#[derive(Debug)]
pub struct ScrapToggle {
    place_id: Id,
    scrapped: Option<bool>,
}

impl ScrapToggle {
    pub fn new(place_id: Id) -> Self {
        Self {
            place_id,
            scrapped: None,
        }
    }

    /// `None` until the state is known.
    pub fn is_scrapped(&self) -> Option<bool> {
        self.scrapped
    }

    pub fn load<R: ScrapRepo>(&mut self, repo: &R, user_id: Option<&Id>, notices: &mut Notices) {
        let Some(user_id) = user_id else {
            self.scrapped = Some(false);
            return;
        };
        self.scrapped = match usecases::is_scrapped(repo, user_id, &self.place_id) {
            Ok(scrapped) => Some(scrapped),
            Err(err) => {
                log::warn!("Failed to check scrap of place {}: {err}", self.place_id);
                notices.error("The scrap state could not be loaded");
                None
            }
        };
    }

    pub fn toggle<R: ScrapRepo>(&mut self, repo: &R, user_id: &Id, notices: &mut Notices) {
        match usecases::toggle_scrap(repo, user_id, &self.place_id) {
            Ok(true) => {
                notices.success("Scrapped");
                self.scrapped = Some(true);
            }
            Ok(false) => {
                notices.success("Removed from your scraps");
                self.scrapped = Some(false);
            }
            Err(err) => {
                log::warn!("Failed to toggle scrap of place {}: {err}", self.place_id);
                notices.error("The scrap could not be changed");
            }
        }
    }
}
