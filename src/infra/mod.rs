pub mod channel;
pub mod connection;

use serde::Deserialize;

use crate::models::{CaptureChoice, CaptureOption};

/// A protocol command: verb plus ordered arguments, one per line on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Hello,
    Start,
    State,
    Captures {
        hand_index: usize,
    },
    Play {
        hand_index: usize,
        capture: CaptureChoice,
    },
    Finalize,
    Score,
    Quit,
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Command::Hello => write!(f, "HELLO"),
            Command::Start => write!(f, "START"),
            Command::State => write!(f, "STATE"),
            Command::Captures { hand_index } => write!(f, "CAPTURES {hand_index}"),
            Command::Play {
                hand_index,
                capture,
            } => write!(f, "PLAY {hand_index} {capture}"),
            Command::Finalize => write!(f, "FINALIZE"),
            Command::Score => write!(f, "SCORE"),
            Command::Quit => write!(f, "QUIT"),
        }
    }
}

// The server answers QUIT with "bye" instead of "ok".
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
    Bye,
}

#[derive(Debug, Deserialize)]
struct ResponseHead {
    status: Status,
    #[serde(default)]
    message: Option<String>,
}

/// One decoded response line. The raw line is kept around so the
/// command-specific payload can be extracted once the status checks out.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: Status,
    pub message: Option<String>,
    line: String,
}

impl Response {
    pub fn decode(line: &str) -> Result<Self, ChannelError> {
        let head: ResponseHead = serde_json::from_str(line)?;

        Ok(Self {
            status: head.status,
            message: head.message,
            line: line.to_string(),
        })
    }

    pub fn payload<T: serde::de::DeserializeOwned>(&self) -> Result<T, ChannelError> {
        Ok(serde_json::from_str(&self.line)?)
    }
}

#[derive(Debug, Deserialize)]
pub struct CapturesPayload {
    pub captures: Vec<CaptureOption>,
}

#[derive(thiserror::Error, Debug)]
pub enum ChannelError {
    #[error("Connection attempt failed | {0}")]
    ConnectFailed(std::io::Error),
    #[error("Connection lost | {0}")]
    ConnectionLost(std::io::Error),
    #[error("Malformed response line | {0}")]
    Protocol(#[from] serde_json::Error),
    #[error("Not connected")]
    NotConnected,
}
