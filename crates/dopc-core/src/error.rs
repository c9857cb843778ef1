use thiserror::Error;

/// Failure of a single pricing computation.
///
/// Pricing is all-or-nothing: any of these aborts the request and no partial
/// result is produced.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Upstream venue payload is missing required fields or is malformed.
    #[error("invalid venue data: {0}")]
    VenueData(String),

    /// No configured distance range covers the computed distance.
    #[error("delivery not available for a distance of {distance_m:.0} m")]
    OutOfRange { distance_m: f64 },

    /// The venue data service could not be reached or answered with an error.
    #[error("venue data service error: {message}")]
    Gateway { status: Option<u16>, message: String },

    /// The request is well-formed but cannot be priced, e.g. the total would
    /// not fit in `i64` cents.
    #[error(transparent)]
    InvalidRequest(#[from] ValidationError),
}

/// Errors reported by a [`crate::VenueSource`] implementation.
#[derive(Debug, Error)]
pub enum VenueSourceError {
    /// Transport failure or non-success HTTP status from upstream.
    /// `status` is `None` when no response was received at all.
    #[error("upstream request failed: {message}")]
    Gateway { status: Option<u16>, message: String },

    /// The upstream answered, but the payload does not have the expected shape.
    #[error("invalid {context} payload: {reason}")]
    InvalidPayload { context: String, reason: String },
}

impl From<VenueSourceError> for PricingError {
    fn from(err: VenueSourceError) -> Self {
        match err {
            VenueSourceError::Gateway { status, message } => Self::Gateway { status, message },
            VenueSourceError::InvalidPayload { .. } => Self::VenueData(err.to_string()),
        }
    }
}

/// Rejected pricing input. `field` is the public parameter name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_payload_becomes_venue_data_error() {
        let err = PricingError::from(VenueSourceError::InvalidPayload {
            context: "static".to_owned(),
            reason: "missing field `coordinates`".to_owned(),
        });
        match err {
            PricingError::VenueData(msg) => assert!(msg.contains("coordinates"), "{msg}"),
            other => panic!("expected VenueData, got {other:?}"),
        }
    }

    #[test]
    fn gateway_error_keeps_upstream_status() {
        let err = PricingError::from(VenueSourceError::Gateway {
            status: Some(404),
            message: "not found".to_owned(),
        });
        assert!(matches!(
            err,
            PricingError::Gateway {
                status: Some(404),
                ..
            }
        ));
    }

    #[test]
    fn validation_error_names_field() {
        let err = ValidationError::new("cart_value", "must be greater than 0");
        assert_eq!(err.to_string(), "invalid cart_value: must be greater than 0");
    }
}
