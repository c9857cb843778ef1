use std::str::FromStr;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use dopc_core::{PricingRequest, PricingResult, ValidationError};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_pricing_error, ApiError, AppState};

/// Raw query string. Fields stay strings so each one gets its own error.
#[derive(Debug, Default, Deserialize)]
pub(super) struct DeliveryPriceQuery {
    pub venue_slug: Option<String>,
    pub cart_value: Option<String>,
    pub user_lat: Option<String>,
    pub user_lon: Option<String>,
}

impl DeliveryPriceQuery {
    fn into_request(self) -> Result<PricingRequest, ValidationError> {
        let venue_slug = required(self.venue_slug.as_deref(), "venue_slug")?;
        let cart_value: i64 = parse_field(self.cart_value.as_deref(), "cart_value", "an integer")?;
        let user_lat: f64 = parse_field(self.user_lat.as_deref(), "user_lat", "a number")?;
        let user_lon: f64 = parse_field(self.user_lon.as_deref(), "user_lon", "a number")?;
        PricingRequest::new(venue_slug, cart_value, user_lat, user_lon)
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::new(field, "is required")),
    }
}

fn parse_field<T: FromStr>(
    value: Option<&str>,
    field: &'static str,
    expected: &str,
) -> Result<T, ValidationError> {
    required(value, field)?
        .parse::<T>()
        .map_err(|_| ValidationError::new(field, format!("must be {expected}")))
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(super) struct DeliveryOrderPrice {
    pub total_price: i64,
    pub small_order_surcharge: i64,
    pub cart_value: i64,
    pub delivery: DeliveryDetails,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(super) struct DeliveryDetails {
    pub fee: i64,
    /// Whole meters.
    pub distance: i64,
}

impl From<PricingResult> for DeliveryOrderPrice {
    fn from(result: PricingResult) -> Self {
        Self {
            total_price: result.total_price_cents,
            small_order_surcharge: result.small_order_surcharge_cents,
            cart_value: result.cart_value_cents,
            delivery: DeliveryDetails {
                fee: result.delivery_fee_cents,
                distance: result.delivery_distance_meters,
            },
        }
    }
}

pub(super) async fn delivery_order_price(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<DeliveryPriceQuery>, QueryRejection>,
) -> Result<Json<DeliveryOrderPrice>, ApiError> {
    let Query(query) = query.map_err(|e| {
        ApiError::new(req_id.0.clone(), "validation_error", e.body_text())
    })?;

    let request = query
        .into_request()
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    let result = state
        .pricing
        .compute_total(&request)
        .await
        .map_err(|e| map_pricing_error(req_id.0.clone(), &e))?;

    Ok(Json(result.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(slug: &str, cart: &str, lat: &str, lon: &str) -> DeliveryPriceQuery {
        DeliveryPriceQuery {
            venue_slug: Some(slug.to_owned()),
            cart_value: Some(cart.to_owned()),
            user_lat: Some(lat.to_owned()),
            user_lon: Some(lon.to_owned()),
        }
    }

    #[test]
    fn valid_query_builds_request() {
        let request = query("venue", "1000", "60.17094", "24.93087")
            .into_request()
            .expect("valid");
        assert_eq!(request.venue_slug, "venue");
        assert_eq!(request.cart_value_cents, 1000);
        assert!((request.user_location.latitude - 60.17094).abs() < 1e-12);
        assert!((request.user_location.longitude - 24.93087).abs() < 1e-12);
    }

    #[test]
    fn missing_parameter_is_named() {
        let mut q = query("venue", "1000", "60.1", "24.9");
        q.user_lon = None;
        assert_eq!(q.into_request().unwrap_err().field, "user_lon");

        let err = DeliveryPriceQuery::default().into_request().unwrap_err();
        assert_eq!(err.field, "venue_slug");
        assert_eq!(err.message, "is required");
    }

    #[test]
    fn non_integer_cart_value_is_rejected() {
        let err = query("venue", "10.5", "60.1", "24.9")
            .into_request()
            .unwrap_err();
        assert_eq!(err.field, "cart_value");
        assert_eq!(err.message, "must be an integer");
    }

    #[test]
    fn zero_cart_value_is_rejected() {
        let err = query("venue", "0", "60.1", "24.9")
            .into_request()
            .unwrap_err();
        assert_eq!(err.field, "cart_value");
    }

    #[test]
    fn zero_coordinates_are_accepted() {
        // 0 is a valid latitude/longitude, not a missing value.
        assert!(query("venue", "100", "0", "0").into_request().is_ok());
    }

    #[test]
    fn out_of_range_latitude_is_rejected() {
        let err = query("venue", "100", "-90.01", "24.9")
            .into_request()
            .unwrap_err();
        assert_eq!(err.field, "user_lat");
    }

    #[test]
    fn nan_longitude_is_rejected() {
        let err = query("venue", "100", "60", "NaN")
            .into_request()
            .unwrap_err();
        assert_eq!(err.field, "user_lon");
    }

    #[test]
    fn response_maps_pricing_result() {
        let body = DeliveryOrderPrice::from(PricingResult {
            total_price_cents: 1190,
            small_order_surcharge_cents: 0,
            cart_value_cents: 1000,
            delivery_fee_cents: 190,
            delivery_distance_meters: 177,
        });
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "total_price": 1190,
                "small_order_surcharge": 0,
                "cart_value": 1000,
                "delivery": { "fee": 190, "distance": 177 }
            })
        );
    }
}
