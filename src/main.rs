//! Event ticketing HTTP server.
//!
//! Configuration comes from `TICKETING__*` environment variables (see
//! `event_ticketing::config`).

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use event_ticketing::adapters::http::{build_router, TicketingAppState};
use event_ticketing::adapters::postgres::{self, PostgresLedger};
use event_ticketing::adapters::{JwtSessionValidator, StripeConfig, StripePaymentAuthority};
use event_ticketing::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let pool = postgres::connect(&config.database).await?;
    tracing::info!("ledger database connected");

    let mut stripe = StripeConfig::new(config.payment.stripe_api_key.clone())
        .with_default_currency(config.payment.currency()?);
    if let Some(base_url) = &config.payment.api_base_url {
        stripe = stripe.with_base_url(base_url.clone());
    }
    if config.payment.is_test_mode() {
        tracing::warn!("Stripe is in test mode");
    }

    let state = TicketingAppState::new(
        Arc::new(StripePaymentAuthority::new(stripe)),
        Arc::new(PostgresLedger::new(pool)),
    );
    let validator = Arc::new(JwtSessionValidator::from_config(&config.auth));
    let app = build_router(state, validator, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
