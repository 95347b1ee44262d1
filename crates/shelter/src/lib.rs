//! Shelter domain: listings, adoption requests, the kit shop, and accounts
//!
//! Services are generic over the repository traits in [`store`] and share
//! one store through an `Arc`.
//!
//! # Example
//!
//! ```rust
//! use petadopt_search::MatchConfig;
//! use petadopt_shelter::listing::ListingQuery;
//! use petadopt_shelter::{AnimalService, JsonStore};
//! use std::sync::Arc;
//!
//! let animals = AnimalService::new(Arc::new(JsonStore::in_memory()));
//! let query = ListingQuery {
//!     location: "Springfeld".to_string(),
//!     ..Default::default()
//! };
//! let found = animals.search(&query, &MatchConfig::default()).unwrap();
//! assert!(found.is_empty());
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod adoptions;
pub mod animals;
pub mod auth;
pub mod cart;
pub mod clock;
mod error;
pub mod kits;
pub mod listing;
pub mod models;
pub mod notify;
pub mod response;
pub mod store;

pub use adoptions::{AdoptionRequest, AdoptionService};
pub use animals::AnimalService;
pub use auth::{AuthService, AuthSettings, Session, SignupRequest};
pub use cart::{Cart, CartItem};
pub use clock::{Clock, SystemClock};
pub use error::{Result, ShelterError};
pub use kits::KitService;
pub use notify::{LogNotifier, OtpNotifier};
pub use response::ApiResponse;
pub use store::JsonStore;
