pub mod handlers;
pub mod models;
pub mod router;
pub mod state;

pub use router::app_router;
pub use state::AppState;

use std::net::SocketAddr;
use tracing::info;

/// Start the HTTP server on the specified port and run until Ctrl-C
pub async fn start_server(state: AppState, port: u16) -> anyhow::Result<()> {
    if state.admin_token.is_none() {
        info!("No admin token configured; admin routes are disabled");
    }
    let app = app_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("HTTP server running on http://localhost:{port}");
    info!("Health check: http://localhost:{port}/health");

    hyper::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
