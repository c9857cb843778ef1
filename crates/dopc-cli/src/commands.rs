//! Command handlers for the CLI.

use dopc_core::{AppConfig, PricingOrchestrator, PricingRequest};
use dopc_venue::VenueClient;

/// Price one order and print the result as pretty JSON.
pub(crate) async fn run_quote(
    config: &AppConfig,
    venue_slug: &str,
    cart_value: i64,
    lat: f64,
    lon: f64,
) -> anyhow::Result<()> {
    let request = PricingRequest::new(venue_slug, cart_value, lat, lon)?;

    let client = VenueClient::from_app_config(config)?;
    let pricing = PricingOrchestrator::new(client, config.open_ended_ranges);

    tracing::info!(venue_slug, base_url = %config.venue_api_base_url, "requesting quote");
    let result = pricing.compute_total(&request).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// One `NAME = value` line per setting.
pub(crate) fn render_config(config: &AppConfig) -> String {
    let rows: [(&str, String); 9] = [
        ("DOPC_ENV", config.env.to_string()),
        ("DOPC_BIND_ADDR", config.bind_addr.to_string()),
        ("DOPC_LOG_LEVEL", config.log_level.clone()),
        ("DOPC_VENUE_API_BASE_URL", config.venue_api_base_url.clone()),
        (
            "DOPC_VENUE_REQUEST_TIMEOUT_SECS",
            config.venue_request_timeout_secs.to_string(),
        ),
        ("DOPC_VENUE_USER_AGENT", config.venue_user_agent.clone()),
        ("DOPC_VENUE_MAX_RETRIES", config.venue_max_retries.to_string()),
        (
            "DOPC_VENUE_RETRY_BACKOFF_BASE_MS",
            config.venue_retry_backoff_base_ms.to_string(),
        ),
        ("DOPC_OPEN_ENDED_RANGES", config.open_ended_ranges.to_string()),
    ];

    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(name, value)| format!("{name:<width$} = {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
