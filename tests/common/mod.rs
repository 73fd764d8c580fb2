//! Shared utilities for integration tests.

use dados_api::config::{CorsConfig, ServerConfig};
use dados_api::source::{FetchError, StaticSource, TableData, TableSource};
use dados_api::{HttpServer, Shutdown};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A source that counts how often it was asked for data.
pub struct CountingSource {
    inner: StaticSource,
    calls: AtomicUsize,
}

impl CountingSource {
    pub fn new(inner: StaticSource) -> Arc<Self> {
        Arc::new(Self {
            inner,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TableSource for CountingSource {
    fn table(&self) -> &str {
        self.inner.table()
    }

    fn fetch_table_data(&self) -> Result<TableData, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_table_data()
    }
}

/// A server bound to an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start the server with `cors` in front of `source`.
pub async fn start_server(cors: CorsConfig, source: Arc<dyn TableSource>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = ServerConfig::default();
    config.listener.bind_address = addr.to_string();
    config.cors = cors;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, source).unwrap();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

/// HTTP client without connection pooling or system proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
