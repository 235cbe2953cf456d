use storefront_server::{Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env, configuration, logging
    let config = setup_environment()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %config.data_dir.display(),
        "storefront server starting"
    );

    // 2. JSON store, order engine, payment providers
    let state = ServerState::initialize(&config)?;

    // 3. HTTP server until Ctrl-C
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
