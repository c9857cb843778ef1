//! Venue data service response types.
//!
//! Both endpoints wrap their content in a `venue_raw` object. Only the fields
//! needed for pricing are modelled; everything else in the payload is ignored.
//! A missing or ill-typed required field fails deserialization, which the
//! client reports as [`VenueError::Deserialize`].

use dopc_core::{Coordinate, DeliveryPricingSpec, DistanceRange, VenueLocation};
use serde::Deserialize;

use crate::error::VenueError;

// ---------------------------------------------------------------------------
// GET /{slug}/static
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct StaticVenueResponse {
    pub venue_raw: StaticVenueRaw,
}

#[derive(Debug, Deserialize)]
pub struct StaticVenueRaw {
    pub location: LocationRaw,
}

#[derive(Debug, Deserialize)]
pub struct LocationRaw {
    /// GeoJSON order: `[longitude, latitude]`.
    pub coordinates: [f64; 2],
}

impl StaticVenueResponse {
    /// # Errors
    ///
    /// Returns [`VenueError::InvalidPayload`] when the coordinates are not a
    /// valid point on Earth.
    pub fn into_location(self) -> Result<VenueLocation, VenueError> {
        let [longitude, latitude] = self.venue_raw.location.coordinates;
        let coordinates =
            Coordinate::new(latitude, longitude).map_err(|_| VenueError::InvalidPayload {
                context: "static venue data".to_owned(),
                reason: format!("coordinates [{longitude}, {latitude}] are out of range"),
            })?;
        Ok(VenueLocation { coordinates })
    }
}

// ---------------------------------------------------------------------------
// GET /{slug}/dynamic
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DynamicVenueResponse {
    pub venue_raw: DynamicVenueRaw,
}

#[derive(Debug, Deserialize)]
pub struct DynamicVenueRaw {
    pub delivery_specs: DeliverySpecsRaw,
}

#[derive(Debug, Deserialize)]
pub struct DeliverySpecsRaw {
    pub order_minimum_no_surcharge: i64,
    pub delivery_pricing: DeliveryPricingRaw,
}

#[derive(Debug, Deserialize)]
pub struct DeliveryPricingRaw {
    pub base_price: i64,
    pub distance_ranges: Vec<DistanceRangeRaw>,
}

#[derive(Debug, Deserialize)]
pub struct DistanceRangeRaw {
    pub min: f64,
    /// `0` marks the open-ended top range.
    pub max: f64,
    pub a: i64,
    pub b: i64,
}

impl DynamicVenueResponse {
    /// Converts to the pricing rules, keeping range order as delivered.
    ///
    /// # Errors
    ///
    /// Returns [`VenueError::InvalidPayload`] for negative or non-finite range
    /// bounds.
    pub fn into_pricing_spec(self) -> Result<DeliveryPricingSpec, VenueError> {
        let specs = self.venue_raw.delivery_specs;
        let distance_ranges = specs
            .delivery_pricing
            .distance_ranges
            .into_iter()
            .enumerate()
            .map(|(idx, r)| {
                let valid_bound = |v: f64| v.is_finite() && v >= 0.0;
                if valid_bound(r.min) && valid_bound(r.max) {
                    Ok(DistanceRange {
                        min: r.min,
                        max: r.max,
                        a: r.a,
                        b: r.b,
                    })
                } else {
                    Err(VenueError::InvalidPayload {
                        context: "dynamic venue data".to_owned(),
                        reason: format!(
                            "distance_ranges[{idx}] has invalid bounds [{}, {})",
                            r.min, r.max
                        ),
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DeliveryPricingSpec {
            base_price_cents: specs.delivery_pricing.base_price,
            order_minimum_no_surcharge_cents: specs.order_minimum_no_surcharge,
            distance_ranges,
        })
    }
}
