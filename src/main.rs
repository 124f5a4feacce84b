use clap::Parser as _;
use montorrent::bootstrap::config::Args;
use montorrent::{app, bootstrap};
use tracing::info;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let (config, gate) = bootstrap::app::setup(&args);

    let jobs = app::start(&config, gate).await;

    // handle the signals
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("montorrent shutting down ...");

            // Await for all jobs to shutdown
            futures::future::join_all(jobs).await;
            info!("montorrent successfully shutdown.");
        }
    }
}
