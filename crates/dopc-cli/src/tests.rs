use super::*;
use dopc_core::{AppConfig, Environment, OpenEndedRanges};

#[test]
fn parses_quote_command() {
    let cli = Cli::try_parse_from([
        "dopc-cli",
        "quote",
        "--venue-slug",
        "home-assignment-venue-helsinki",
        "--cart-value",
        "1000",
        "--lat",
        "60.17094",
        "--lon",
        "24.93087",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Quote {
            ref venue_slug,
            cart_value: 1000,
            ..
        } if venue_slug == "home-assignment-venue-helsinki"
    ));
}

#[test]
fn quote_accepts_negative_coordinates() {
    let cli = Cli::try_parse_from([
        "dopc-cli",
        "quote",
        "--venue-slug",
        "v",
        "--cart-value",
        "500",
        "--lat",
        "-33.8688",
        "--lon",
        "-151.2093",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Quote { lat, lon, .. } => {
            assert!((lat + 33.8688).abs() < 1e-12);
            assert!((lon + 151.2093).abs() < 1e-12);
        }
        Commands::Config => panic!("expected quote command"),
    }
}

#[test]
fn quote_requires_all_arguments() {
    let result = Cli::try_parse_from(["dopc-cli", "quote", "--venue-slug", "v", "--cart-value", "500"]);
    assert!(result.is_err());
}

#[test]
fn quote_rejects_non_integer_cart_value() {
    let result = Cli::try_parse_from([
        "dopc-cli",
        "quote",
        "--venue-slug",
        "v",
        "--cart-value",
        "10.5",
        "--lat",
        "60",
        "--lon",
        "24",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_config_command() {
    let cli = Cli::try_parse_from(["dopc-cli", "config"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Config));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["dopc-cli"]).is_err());
}

#[test]
fn render_config_lists_every_setting() {
    let config = AppConfig {
        env: Environment::Test,
        bind_addr: "127.0.0.1:8000".parse().expect("socket addr"),
        log_level: "debug".to_owned(),
        venue_api_base_url: "http://localhost:9000/venues".to_owned(),
        venue_request_timeout_secs: 3,
        venue_user_agent: "dopc-test/0.1".to_owned(),
        venue_max_retries: 1,
        venue_retry_backoff_base_ms: 50,
        open_ended_ranges: OpenEndedRanges::Unbounded,
    };

    let rendered = commands::render_config(&config);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 9);
    assert!(lines[0].starts_with("DOPC_ENV "));
    assert!(lines[0].ends_with("= test"));
    assert!(rendered.contains("= 127.0.0.1:8000"));
    assert!(rendered.contains("= http://localhost:9000/venues"));
    assert!(lines[8].ends_with("= unbounded"));
    assert!(!rendered.ends_with('\n'));
}

#[tokio::test]
async fn run_quote_rejects_invalid_input_before_any_request() {
    let config = AppConfig {
        env: Environment::Test,
        bind_addr: "127.0.0.1:8000".parse().expect("socket addr"),
        log_level: "info".to_owned(),
        // Unroutable; validation must fail first.
        venue_api_base_url: "http://127.0.0.1:1/venues".to_owned(),
        venue_request_timeout_secs: 1,
        venue_user_agent: "dopc-test/0.1".to_owned(),
        venue_max_retries: 0,
        venue_retry_backoff_base_ms: 0,
        open_ended_ranges: OpenEndedRanges::Unavailable,
    };

    let err = commands::run_quote(&config, "v", 0, 60.0, 24.0)
        .await
        .expect_err("zero cart value is invalid");
    assert!(err.to_string().contains("cart_value"), "{err}");
}
