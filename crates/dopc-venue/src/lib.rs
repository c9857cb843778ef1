pub mod client;
pub mod error;
pub(crate) mod retry;
pub mod types;

pub use client::VenueClient;
pub use error::VenueError;
pub use types::{DynamicVenueResponse, StaticVenueResponse};
