mod api;
mod events;
mod intake;
mod middleware;

use std::sync::Arc;

use kolos_airtable::AirtableClient;
use kolos_retell::RetellClient;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    events::CallEventHub,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = kolos_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "starting kolos server");

    let members = AirtableClient::with_base_url(
        &config.airtable_api_key,
        &config.airtable_base_id,
        &config.airtable_table_name,
        config.http_timeout_secs,
        &config.airtable_api_url,
    )?;

    let retell = match config.retell_api_key.as_deref() {
        Some(key) => Some(RetellClient::with_base_url(
            key,
            config.http_timeout_secs,
            &config.retell_api_url,
        )?),
        None => {
            tracing::warn!("RETELL_API_KEY not set; call detail and web calls are disabled");
            None
        }
    };
    if config.retell_agent_id.is_none() {
        tracing::warn!("RETELL_AGENT_ID not set; web calls cannot be started");
    }

    let events = CallEventHub::new(config.event_buffer);
    let app = build_app(AppState {
        members,
        retell,
        retell_agent_id: config.retell_agent_id.clone(),
        emitter: Arc::new(events.clone()),
        events,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
