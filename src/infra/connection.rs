use std::{sync::Arc, time::Duration};

use tokio::{
    io::BufReader,
    net::{
        tcp::{OwnedReadHalf, OwnedWriteHalf},
        TcpStream,
    },
    sync::{Mutex, MutexGuard},
};

use super::ChannelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connecting,
    Connected,
    Closed,
}

pub struct Transport {
    pub(crate) reader: BufReader<OwnedReadHalf>,
    pub(crate) writer: OwnedWriteHalf,
}

#[derive(Debug, Clone)]
pub struct ConnectConfig {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            timeout: Duration::from_secs(10),
        }
    }
}

impl ConnectConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("SCOPA_HOST").unwrap_or(defaults.host);

        let port = std::env::var("SCOPA_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let timeout = std::env::var("SCOPA_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Self {
            host,
            port,
            timeout,
        }
    }
}

/// Owns the TCP transport and its lifecycle. The transport itself sits behind
/// an async mutex so the channel can hold it for a whole exchange; the state
/// is tracked separately so queries never wait on in-flight network work.
#[derive(Clone)]
pub struct ConnectionManager {
    inner: Arc<InnerConnection>,
}

struct InnerConnection {
    transport: Mutex<Option<Transport>>,
    state: parking_lot::Mutex<LinkState>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(InnerConnection {
                transport: Mutex::new(None),
                state: parking_lot::Mutex::new(LinkState::Disconnected),
            }),
        }
    }

    /// Establishes the transport, honoring the timeout. A new attempt always
    /// restarts the cycle, dropping whatever connection was there before.
    pub async fn connect(
        &self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<(), ChannelError> {
        let mut transport = self.inner.transport.lock().await;

        *transport = None;
        self.set_state(LinkState::Connecting);

        let stream = match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                self.set_state(LinkState::Disconnected);
                return Err(ChannelError::ConnectFailed(e));
            }
            Err(_) => {
                self.set_state(LinkState::Disconnected);
                return Err(ChannelError::ConnectFailed(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    format!("no answer from {host}:{port} within {timeout:?}"),
                )));
            }
        };

        let (read, write) = stream.into_split();

        *transport = Some(Transport {
            reader: BufReader::new(read),
            writer: write,
        });

        self.set_state(LinkState::Connected);

        tracing::info!(">>>> connected to {host}:{port}");

        Ok(())
    }

    /// Idempotent, safe to call from any state.
    pub async fn close(&self) {
        let mut transport = self.inner.transport.lock().await;

        if transport.take().is_some() {
            tracing::info!(">>>> connection closed");
        }

        self.set_state(LinkState::Closed);
    }

    pub fn state(&self) -> LinkState {
        *self.inner.state.lock()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == LinkState::Connected
    }

    pub(crate) async fn transport(&self) -> MutexGuard<'_, Option<Transport>> {
        self.inner.transport.lock().await
    }

    /// Mid-session transport failure, reported by the channel while it still
    /// holds the transport guard: release the stream and close the link.
    pub(crate) fn mark_lost(&self, transport: &mut Option<Transport>) {
        *transport = None;
        self.set_state(LinkState::Closed);
    }

    fn set_state(&self, state: LinkState) {
        *self.inner.state.lock() = state;
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}
