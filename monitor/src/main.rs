// File: monitor/src/main.rs
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use status_monitor::config::{Config, ConfigManager};
use status_monitor::status::{
    check_dialect_status, Diagnostics, Group, NodeClient, TracingDiagnostics,
};

const CONFIG_DIR_ENV: &str = "STATUS_MONITOR_CONFIG_DIR";

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("status_monitor=info".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting node status monitor");

    let config_dir = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_DIR_ENV).ok())
        .unwrap_or_else(|| "config".to_string());

    let config_manager = ConfigManager::new(config_dir).await?;
    let config = config_manager.get_current_config();

    let client = NodeClient::new(config.request_timeout())?;
    let diagnostics: Arc<dyn Diagnostics> = Arc::new(TracingDiagnostics);

    if config.check_interval_seconds == 0 {
        run_cycle(&config, &client, &diagnostics).await;
        return Ok(());
    }

    info!(
        "Running status cycles every {}s for {} environments",
        config.check_interval_seconds,
        config.environments.len()
    );

    let mut interval = tokio::time::interval(Duration::from_secs(config.check_interval_seconds));
    loop {
        tokio::select! {
            _ = interval.tick() => run_cycle(&config, &client, &diagnostics).await,
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received, stopping");
                break;
            }
        }
    }

    Ok(())
}

async fn run_cycle(config: &Config, client: &NodeClient, diagnostics: &Arc<dyn Diagnostics>) {
    for (environment_name, environment) in &config.environments {
        let report = check_dialect_status(
            config.dialect,
            client,
            config.status_settings(),
            environment,
            &environment.nodes_to_monitor,
            diagnostics.clone(),
        )
        .await;

        if report.is_empty() {
            error!("Status check for {} produced no results", environment_name);
            continue;
        }

        for group in Group::ALL {
            for status in report.group(group) {
                if !status.block_height.is_value() && config.check_block_height {
                    warn!(
                        "{} [{}] {}: block height {}",
                        environment_name,
                        group,
                        status.name,
                        status.block_height.height_sentinel()
                    );
                }
            }
        }

        match serde_json::to_string(&report) {
            Ok(json) => debug!("{} report: {}", environment_name, json),
            Err(e) => error!("Failed to serialize report for {}: {}", environment_name, e),
        }
    }
}
