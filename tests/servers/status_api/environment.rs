use std::net::SocketAddr;
use std::sync::Arc;

use montorrent::bootstrap::jobs::Started;
use montorrent::core::backend::RemoteBackend;
use montorrent::core::cache::CacheGate;
use montorrent::core::invoker::Invoker;
use montorrent::servers::signals::Halted;
use montorrent::servers::status_api::server;
use montorrent_configuration::Configuration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::common::fake_rtorrent::FakeRtorrent;

/// A running status API in front of a [`FakeRtorrent`].
pub struct Environment {
    pub bind_address: SocketAddr,
    pub rtorrent: Arc<FakeRtorrent>,
    tx_halt: oneshot::Sender<Halted>,
    server: JoinHandle<Result<(), std::io::Error>>,
}

impl Environment {
    /// Starts the status API on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics if the server does not start.
    pub async fn start(config: &Configuration, rtorrent: Arc<FakeRtorrent>) -> Self {
        let backend: Arc<dyn RemoteBackend> = rtorrent.clone();
        let invoker = Invoker::new(backend, config.backend.retry_budget, config.backend.retry_delay());
        let gate = Arc::new(CacheGate::new(invoker, config.status_api.cache_window()));

        let (tx_start, rx_start) = oneshot::channel::<Started>();
        let (tx_halt, rx_halt) = oneshot::channel::<Halted>();

        let server = tokio::spawn(server::start(
            config.status_api.bind_address,
            None,
            tx_start,
            rx_halt,
            gate,
            config.status_api.credentials.clone(),
        ));

        let started = rx_start.await.expect("the status API should start");

        Self {
            bind_address: started.address,
            rtorrent,
            tx_halt,
            server,
        }
    }

    /// # Panics
    ///
    /// Panics if the server does not stop cleanly.
    pub async fn stop(self) {
        self.tx_halt.send(Halted::Normal).expect("the status API should be running");

        self.server
            .await
            .expect("it should join the status API task")
            .expect("the status API should stop without errors");
    }
}
