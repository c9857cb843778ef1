use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A point on the Earth's surface in decimal degrees.
///
/// Only [`Coordinate::new`] checks the ranges, so there is no `Deserialize`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting latitudes outside `[-90, 90]` and
    /// longitudes outside `[-180, 180]`. `NaN` is rejected as well.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming `user_lat` or `user_lon`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::new(
                "user_lat",
                "must be between -90 and 90",
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::new(
                "user_lon",
                "must be between -180 and 180",
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// One order to be priced. Built once per incoming request and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingRequest {
    pub venue_slug: String,
    pub cart_value_cents: i64,
    pub user_location: Coordinate,
}

impl PricingRequest {
    /// # Errors
    ///
    /// Returns [`ValidationError`] for an empty slug, a non-positive cart
    /// value, or out-of-range coordinates.
    pub fn new(
        venue_slug: impl Into<String>,
        cart_value_cents: i64,
        user_lat: f64,
        user_lon: f64,
    ) -> Result<Self, ValidationError> {
        let venue_slug = venue_slug.into();
        if venue_slug.trim().is_empty() {
            return Err(ValidationError::new("venue_slug", "must not be empty"));
        }
        if cart_value_cents <= 0 {
            return Err(ValidationError::new("cart_value", "must be greater than 0"));
        }
        let user_location = Coordinate::new(user_lat, user_lon)?;
        Ok(Self {
            venue_slug,
            cart_value_cents,
            user_location,
        })
    }
}

/// Where a venue is, taken from its static data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VenueLocation {
    pub coordinates: Coordinate,
}

/// A half-open distance interval `[min, max)` in meters with its fee formula
/// `a + round(b * distance / 10)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceRange {
    pub min: f64,
    /// `0` is the upstream's open-ended marker; see [`OpenEndedRanges`].
    pub max: f64,
    /// Flat addend in cents.
    pub a: i64,
    /// Multiplier applied per 10 meters of distance.
    pub b: i64,
}

impl DistanceRange {
    #[must_use]
    pub fn contains(&self, distance_m: f64, open_ended: OpenEndedRanges) -> bool {
        let upper = match open_ended {
            OpenEndedRanges::Unbounded if self.is_open_ended() => f64::INFINITY,
            _ => self.max,
        };
        self.min <= distance_m && distance_m < upper
    }

    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_open_ended(&self) -> bool {
        self.max == 0.0
    }

    /// Distance-dependent part of the fee, rounded half away from zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn distance_component(&self, distance_m: f64) -> i64 {
        (self.b as f64 * distance_m / 10.0).round() as i64
    }
}

/// Delivery pricing rules of a venue, taken from its dynamic data.
///
/// `distance_ranges` keeps upstream order; the first matching range wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryPricingSpec {
    pub base_price_cents: i64,
    pub order_minimum_no_surcharge_cents: i64,
    pub distance_ranges: Vec<DistanceRange>,
}

/// How a distance range with `max == 0` is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpenEndedRanges {
    /// `max == 0` is a literal ceiling of zero, so the range never matches a
    /// positive distance and delivery beyond its `min` is unavailable.
    #[default]
    Unavailable,
    /// `max == 0` means there is no upper bound.
    Unbounded,
}

impl fmt::Display for OpenEndedRanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenEndedRanges::Unavailable => write!(f, "unavailable"),
            OpenEndedRanges::Unbounded => write!(f, "unbounded"),
        }
    }
}

impl FromStr for OpenEndedRanges {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unavailable" => Ok(Self::Unavailable),
            "unbounded" => Ok(Self::Unbounded),
            other => Err(format!(
                "unknown policy \"{other}\" (expected \"unavailable\" or \"unbounded\")"
            )),
        }
    }
}

/// Outcome of pricing one order. All money is in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingResult {
    pub total_price_cents: i64,
    pub small_order_surcharge_cents: i64,
    pub cart_value_cents: i64,
    pub delivery_fee_cents: i64,
    /// Straight-line distance, rounded to whole meters for display.
    pub delivery_distance_meters: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: f64, max: f64) -> DistanceRange {
        DistanceRange { min, max, a: 0, b: 0 }
    }

    #[test]
    fn coordinate_accepts_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn coordinate_rejects_out_of_range_and_nan() {
        assert_eq!(Coordinate::new(90.5, 0.0).unwrap_err().field, "user_lat");
        assert_eq!(Coordinate::new(0.0, -180.1).unwrap_err().field, "user_lon");
        assert_eq!(Coordinate::new(f64::NAN, 0.0).unwrap_err().field, "user_lat");
    }

    #[test]
    fn coordinate_serializes_with_field_names() {
        let json = serde_json::to_value(Coordinate::new(60.17094, 24.92813).expect("valid"))
            .expect("serialize");
        assert_eq!(json, serde_json::json!({ "latitude": 60.17094, "longitude": 24.92813 }));
    }

    #[test]
    fn pricing_request_rejects_blank_slug() {
        let err = PricingRequest::new("  ", 100, 60.0, 24.0).unwrap_err();
        assert_eq!(err.field, "venue_slug");
    }

    #[test]
    fn pricing_request_rejects_non_positive_cart_value() {
        assert_eq!(
            PricingRequest::new("venue", 0, 60.0, 24.0).unwrap_err().field,
            "cart_value"
        );
        assert_eq!(
            PricingRequest::new("venue", -5, 60.0, 24.0).unwrap_err().field,
            "cart_value"
        );
    }

    #[test]
    fn range_includes_min_and_excludes_max() {
        let r = range(500.0, 1000.0);
        assert!(r.contains(500.0, OpenEndedRanges::Unavailable));
        assert!(r.contains(999.999, OpenEndedRanges::Unavailable));
        assert!(!r.contains(1000.0, OpenEndedRanges::Unavailable));
        assert!(!r.contains(499.9, OpenEndedRanges::Unavailable));
    }

    #[test]
    fn open_ended_range_depends_on_policy() {
        let r = range(1000.0, 0.0);
        assert!(!r.contains(1500.0, OpenEndedRanges::Unavailable));
        assert!(r.contains(1500.0, OpenEndedRanges::Unbounded));
        assert!(!r.contains(999.0, OpenEndedRanges::Unbounded));
    }

    #[test]
    fn distance_component_rounds_half_away_from_zero() {
        let r = DistanceRange {
            min: 0.0,
            max: 1000.0,
            a: 0,
            b: 1,
        };
        assert_eq!(r.distance_component(605.0), 61);
        assert_eq!(r.distance_component(604.9), 60);
        assert_eq!(r.distance_component(0.0), 0);
    }

    #[test]
    fn open_ended_policy_parses_case_insensitively() {
        assert_eq!(
            "Unbounded".parse::<OpenEndedRanges>(),
            Ok(OpenEndedRanges::Unbounded)
        );
        assert_eq!(
            "unavailable".parse::<OpenEndedRanges>(),
            Ok(OpenEndedRanges::Unavailable)
        );
        assert!("infinite".parse::<OpenEndedRanges>().is_err());
    }
}
