//! Shared helpers for integration tests.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use urlshort::{HttpServer, PathMapping, ServerConfig};

/// A running server bound to an ephemeral port. Dropping it shuts it down.
pub struct TestServer {
    pub addr: SocketAddr,
    _shutdown: oneshot::Sender<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a server over `mapping` with default settings.
pub async fn start_server(mapping: PathMapping) -> TestServer {
    start_server_with(ServerConfig::default(), mapping).await
}

pub async fn start_server_with(config: ServerConfig, mapping: PathMapping) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let server = HttpServer::new(&config, mapping);
    tokio::spawn(async move {
        let _ = server
            .run(listener, async {
                let _ = rx.await;
            })
            .await;
    });

    TestServer {
        addr,
        _shutdown: tx,
    }
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
