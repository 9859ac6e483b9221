//! Loads configuration, connects to the backend and prints the first page
//! of customers.

use anyhow::{Context, Result};
use slicekit_http::HttpApiClient;
use slicekit_resource::{ApiEnvironment, ResourceAction};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use utility_admin::{admin_store, AdminAction, AdminConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AdminConfig::from_env().context("invalid configuration")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        base_url = %config.api.base_url,
        page_size = config.slices.default_page_size,
        stale_policy = ?config.slices.stale_policy,
        "Starting utility admin"
    );

    let client = HttpApiClient::new(&config.api).context("failed to build API client")?;
    let store = admin_store(config.slices, ApiEnvironment::new(Arc::new(client)));

    let settled = store
        .send_and_wait_for(
            AdminAction::Customers(ResourceAction::FetchList),
            AdminAction::is_settlement,
            config.api.timeout() + Duration::from_secs(1),
        )
        .await
        .context("customer fetch did not settle")?;

    match settled {
        AdminAction::Customers(ResourceAction::ListSettled { result: Ok(page), .. }) => {
            tracing::info!(
                total = page.pagination.total_count,
                page = page.pagination.current_page,
                pages = page.pagination.total_pages,
                "Loaded customers"
            );
            for customer in &page.items {
                tracing::info!("#{} {} ({})", customer.id, customer.full_name, customer.status);
            }
        },
        AdminAction::Customers(ResourceAction::ListSettled { result: Err(error), .. }) => {
            tracing::error!(%error, "Failed to load customers");
        },
        other => tracing::warn!(resource = other.resource(), "Unexpected settlement"),
    }

    store.shutdown_default().await?;
    Ok(())
}
