use anyhow::Context;
use ecotrack_core::config::ServerConfig;
use ecotrack_server::state::AppState;
use std::path::Path;

pub fn run(data_path: &Path, server: &ServerConfig) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let state = AppState::with_data_file(data_path);
    let addr = server.addr();

    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        let local = listener.local_addr()?;

        println!("ecotrack API → http://{local}/api/actions/");
        tracing::info!(data_file = %data_path.display(), "serving actions");

        tokio::select! {
            res = ecotrack_server::serve_on(state, listener) => res,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                Ok(())
            }
        }
    })
}
