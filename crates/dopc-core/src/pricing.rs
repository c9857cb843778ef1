//! Fee and surcharge rules applied to a priced order.

use crate::error::{PricingError, ValidationError};
use crate::geo::great_circle_distance;
use crate::types::{
    DeliveryPricingSpec, DistanceRange, OpenEndedRanges, PricingRequest, PricingResult,
    VenueLocation,
};

/// Extra charge that tops a small cart up to the venue's minimum.
///
/// Floors at zero: carts at or above the minimum pay nothing and get no
/// discount.
#[must_use]
pub fn small_order_surcharge(cart_value_cents: i64, order_minimum_no_surcharge_cents: i64) -> i64 {
    order_minimum_no_surcharge_cents
        .saturating_sub(cart_value_cents)
        .max(0)
}

/// Delivery fee for `distance_m` under the first range (in upstream order)
/// that contains it: `base_price + a + round(b * distance / 10)`.
///
/// # Errors
///
/// - [`PricingError::OutOfRange`] when no range contains the distance.
/// - [`PricingError::VenueData`] when the range parameters overflow `i64`.
pub fn resolve_delivery_fee(
    distance_m: f64,
    base_price_cents: i64,
    ranges: &[DistanceRange],
    open_ended: OpenEndedRanges,
) -> Result<i64, PricingError> {
    let range = ranges
        .iter()
        .find(|r| r.contains(distance_m, open_ended))
        .ok_or(PricingError::OutOfRange { distance_m })?;

    base_price_cents
        .checked_add(range.a)
        .and_then(|fee| fee.checked_add(range.distance_component(distance_m)))
        .ok_or_else(|| {
            PricingError::VenueData(format!(
                "delivery fee overflows for base price {base_price_cents} and range {range:?}"
            ))
        })
}

/// Prices `request` against already-fetched venue data.
///
/// Distance arithmetic uses the unrounded value; only the reported
/// `delivery_distance_meters` is rounded.
///
/// # Errors
///
/// - [`PricingError::OutOfRange`] when the venue does not deliver that far.
/// - [`PricingError::VenueData`] when the venue's fee parameters overflow.
/// - [`PricingError::InvalidRequest`] when the total does not fit in `i64`.
#[allow(clippy::cast_possible_truncation)]
pub fn price_order(
    request: &PricingRequest,
    venue: &VenueLocation,
    spec: &DeliveryPricingSpec,
    open_ended: OpenEndedRanges,
) -> Result<PricingResult, PricingError> {
    let distance_m = great_circle_distance(venue.coordinates, request.user_location);
    let surcharge = small_order_surcharge(
        request.cart_value_cents,
        spec.order_minimum_no_surcharge_cents,
    );
    let fee = resolve_delivery_fee(
        distance_m,
        spec.base_price_cents,
        &spec.distance_ranges,
        open_ended,
    )?;
    let total = request
        .cart_value_cents
        .checked_add(surcharge)
        .and_then(|sum| sum.checked_add(fee))
        .ok_or_else(|| ValidationError::new("cart_value", "is too large to price"))?;

    Ok(PricingResult {
        total_price_cents: total,
        small_order_surcharge_cents: surcharge,
        cart_value_cents: request.cart_value_cents,
        delivery_fee_cents: fee,
        delivery_distance_meters: distance_m.round() as i64,
    })
}
