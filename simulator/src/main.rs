use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parola_simulator::{create_router, DeviceState, SimulatorConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载环境变量
    dotenv::dotenv().ok();

    // 加载配置
    let config = SimulatorConfig::from_env();

    // 初始化日志
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("parola_simulator={},tower_http=debug", config.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = config.bind_addr();

    info!("Starting Parola device simulator...");
    info!("Login user: {}", config.username);
    info!(
        "WiFi: {}",
        config.initial_ssid.as_deref().unwrap_or("not configured (AP mode)")
    );

    let state = Arc::new(DeviceState::new(config));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Simulator listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
