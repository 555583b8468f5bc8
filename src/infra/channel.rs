use tokio::io::{AsyncBufReadExt, AsyncWriteExt};

use super::{connection::ConnectionManager, ChannelError, Command, Response};

/// Puts one command on the wire and correlates it with exactly one response
/// line. The transport guard is held for the whole exchange: concurrent
/// senders serialize, and bytes of two sends can never interleave. The
/// protocol has no request tagging, so this discipline is the correlation.
#[derive(Clone)]
pub struct CommandChannel {
    conn: ConnectionManager,
}

impl CommandChannel {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &ConnectionManager {
        &self.conn
    }

    pub async fn send(&self, command: &Command) -> Result<Response, ChannelError> {
        let mut transport = self.conn.transport().await;

        let Some(io) = transport.as_mut() else {
            return Err(ChannelError::NotConnected);
        };

        tracing::debug!(">>>> {command}");

        let request = format!("{command}\n");

        if let Err(e) = io.writer.write_all(request.as_bytes()).await {
            tracing::error!(">>>> write failed | {e}");
            self.conn.mark_lost(&mut transport);
            return Err(ChannelError::ConnectionLost(e));
        }

        let mut line = String::new();

        match io.reader.read_line(&mut line).await {
            Ok(0) => {
                tracing::error!(">>>> server closed the connection");
                self.conn.mark_lost(&mut transport);

                Err(ChannelError::ConnectionLost(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "end of stream before a response line",
                )))
            }
            Ok(_) => {
                tracing::debug!("<<<< {}", line.trim_end());
                Response::decode(line.trim_end())
            }
            Err(e) => {
                tracing::error!(">>>> read failed | {e}");
                self.conn.mark_lost(&mut transport);
                Err(ChannelError::ConnectionLost(e))
            }
        }
    }
}
