#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # splace-entities
//!
//! Reusable, agnostic domain entities for the study place client.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod comment;
pub mod email;
pub mod filter;
pub mod id;
pub mod place;
pub mod scrap;
pub mod session;
pub mod star_rating;
pub mod time;
pub mod user;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
