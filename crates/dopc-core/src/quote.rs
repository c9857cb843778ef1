//! Turns a [`PricingRequest`] into a [`PricingResult`] using live venue data.

use std::future::Future;

use crate::error::{PricingError, VenueSourceError};
use crate::pricing::price_order;
use crate::types::{
    DeliveryPricingSpec, OpenEndedRanges, PricingRequest, PricingResult, VenueLocation,
};

/// Supplier of per-venue data. Implementations own transport and retries.
pub trait VenueSource {
    /// Location from the venue's static data.
    fn venue_location(
        &self,
        venue_slug: &str,
    ) -> impl Future<Output = Result<VenueLocation, VenueSourceError>> + Send;

    /// Pricing rules from the venue's dynamic data.
    fn delivery_pricing(
        &self,
        venue_slug: &str,
    ) -> impl Future<Output = Result<DeliveryPricingSpec, VenueSourceError>> + Send;
}

/// Fetches both halves of a venue's data and prices an order against them.
///
/// Holds no per-request state, so one instance serves concurrent requests.
#[derive(Debug)]
pub struct PricingOrchestrator<S> {
    source: S,
    open_ended: OpenEndedRanges,
}

impl<S: VenueSource + Sync> PricingOrchestrator<S> {
    pub fn new(source: S, open_ended: OpenEndedRanges) -> Self {
        Self { source, open_ended }
    }

    #[must_use]
    pub fn open_ended_ranges(&self) -> OpenEndedRanges {
        self.open_ended
    }

    /// Computes the total price for `request`.
    ///
    /// Static and dynamic data are fetched concurrently; if either fails the
    /// other is dropped and the whole computation fails.
    ///
    /// # Errors
    ///
    /// - [`PricingError::Gateway`] when the venue data service fails.
    /// - [`PricingError::VenueData`] when its payload is unusable.
    /// - [`PricingError::OutOfRange`] when the venue does not deliver that far.
    /// - [`PricingError::InvalidRequest`] when the total does not fit in `i64`.
    pub async fn compute_total(
        &self,
        request: &PricingRequest,
    ) -> Result<PricingResult, PricingError> {
        let slug = request.venue_slug.as_str();
        let (venue, spec) = futures::try_join!(
            self.source.venue_location(slug),
            self.source.delivery_pricing(slug),
        )
        .map_err(|err| {
            tracing::warn!(venue_slug = slug, error = %err, "venue data unavailable");
            PricingError::from(err)
        })?;

        let result = price_order(request, &venue, &spec, self.open_ended).inspect_err(|err| {
            tracing::info!(venue_slug = slug, error = %err, "order not deliverable");
        })?;

        tracing::info!(
            venue_slug = slug,
            distance_m = result.delivery_distance_meters,
            fee = result.delivery_fee_cents,
            surcharge = result.small_order_surcharge_cents,
            total = result.total_price_cents,
            "priced delivery order"
        );
        Ok(result)
    }
}
