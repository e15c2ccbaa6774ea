use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use crate::domain::error::Result;
use crate::infrastructure::backend_client::HttpBulkSettingClient;
use crate::infrastructure::config::ConfigService;
use crate::interfaces::http::{start_server, HttpState};

pub fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ConfigService::new().load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let gateway = Arc::new(HttpBulkSettingClient::new(&config)?);

    tracing::info!(
        listen_addr = %config.listen_addr,
        api_url = %config.api_url,
        "Starting bulk import server"
    );

    let state = HttpState {
        gateway,
        config,
        logs: Arc::new(Mutex::new(Vec::new())),
    };

    actix_web::rt::System::new().block_on(async move {
        let server = start_server(state)?;
        server.await
    })?;

    tracing::info!("Bulk import server stopped");
    Ok(())
}
