pub mod policy;
pub mod queue;
pub mod sequencer;
pub mod state;

use crate::infra::ChannelError;

#[derive(thiserror::Error, Debug)]
pub enum ActionError {
    #[error("Action rejected by server | {0}")]
    Rejected(String),
    #[error("Channel error | {0}")]
    Channel(#[from] ChannelError),
    #[error("Action queue closed")]
    QueueClosed,
}
