pub mod app_config;
pub mod config;
pub mod error;
pub mod geo;
pub mod pricing;
pub mod quote;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, PricingError, ValidationError, VenueSourceError};
pub use geo::great_circle_distance;
pub use pricing::{price_order, resolve_delivery_fee, small_order_surcharge};
pub use quote::{PricingOrchestrator, VenueSource};
pub use types::{
    Coordinate, DeliveryPricingSpec, DistanceRange, OpenEndedRanges, PricingRequest,
    PricingResult, VenueLocation,
};
