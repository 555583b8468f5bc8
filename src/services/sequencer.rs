use std::sync::Arc;

use crate::{
    infra::{channel::CommandChannel, CapturesPayload, Command, Response, Status},
    models::{CaptureChoice, CaptureOption, GameStateSnapshot, ScoreReport},
};

use super::{policy::CapturePolicy, state::StateStore, ActionError};

/// Runs user actions as ordered command/response sequences over the channel,
/// publishing every status-ok snapshot to the store. There is no atomicity
/// across the steps of a multi-step action: any failure abandons it, and
/// recovery is a fresh STATE query rather than a resume.
#[derive(Clone)]
pub struct GameActionSequencer {
    channel: CommandChannel,
    store: StateStore,
    policy: Arc<dyn CapturePolicy>,
}

/// What one play discovered and decided; exists only for the duration of the
/// call that produced it.
#[derive(Debug, Clone)]
pub struct PendingAction {
    pub hand_index: usize,
    pub options: Vec<CaptureOption>,
    pub choice: CaptureChoice,
}

#[derive(Debug, Clone)]
pub struct PlayOutcome {
    pub action: PendingAction,
    pub snapshot: GameStateSnapshot,
}

impl GameActionSequencer {
    pub fn new(
        channel: CommandChannel,
        store: StateStore,
        policy: Arc<dyn CapturePolicy>,
    ) -> Self {
        Self {
            channel,
            store,
            policy,
        }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub async fn hello(&self) -> Result<(), ActionError> {
        let response = self.send_ok(&Command::Hello).await?;

        let greeting = response
            .message
            .unwrap_or_else(|| "Connected".to_string());

        self.store.set_status(greeting);

        Ok(())
    }

    pub async fn start_game(&self) -> Result<GameStateSnapshot, ActionError> {
        let snapshot = self.snapshot_command(&Command::Start).await?;

        self.store.set_status("Game started");

        Ok(snapshot)
    }

    pub async fn refresh_state(&self) -> Result<GameStateSnapshot, ActionError> {
        let snapshot = self.snapshot_command(&Command::State).await?;

        self.store.set_status("State refreshed");

        Ok(snapshot)
    }

    pub async fn finalize_round(&self) -> Result<GameStateSnapshot, ActionError> {
        let snapshot = self.snapshot_command(&Command::Finalize).await?;

        self.store.set_status("Round finalized");

        Ok(snapshot)
    }

    /// Returned directly, the snapshot is left alone.
    pub async fn fetch_score(&self) -> Result<ScoreReport, ActionError> {
        let response = self.send_ok(&Command::Score).await?;

        let score: ScoreReport = response.payload()?;

        self.store.set_status(format!(
            "Score - Player 1: {}, Player 2: {}",
            score.player1_score, score.player2_score
        ));

        Ok(score)
    }

    /// CAPTURES lookup, capture selection, then the PLAY itself.
    pub async fn play_card(&self, hand_index: usize) -> Result<PlayOutcome, ActionError> {
        let response = self.send_ok(&Command::Captures { hand_index }).await?;

        let CapturesPayload { captures } = response.payload()?;

        let pending = PendingAction {
            hand_index,
            choice: self.policy.select(&captures),
            options: captures,
        };

        tracing::debug!(
            "playing hand card {} with capture {}",
            pending.hand_index,
            pending.choice
        );

        let play = Command::Play {
            hand_index: pending.hand_index,
            capture: pending.choice,
        };

        let response = self.send_ok(&play).await?;

        let snapshot: GameStateSnapshot = response.payload()?;

        self.store.set(snapshot.clone());
        self.store.set_status("Card played");

        Ok(PlayOutcome {
            action: pending,
            snapshot,
        })
    }

    /// Says goodbye, then tears the session down.
    pub async fn quit(&self) -> Result<(), ActionError> {
        let response = self.channel.send(&Command::Quit).await?;

        if response.status == Status::Error {
            return Err(rejected(response));
        }

        self.channel.connection().close().await;
        self.store.clear();
        self.store.set_status("Disconnected");

        Ok(())
    }

    async fn snapshot_command(&self, command: &Command) -> Result<GameStateSnapshot, ActionError> {
        let response = self.send_ok(command).await?;

        let snapshot: GameStateSnapshot = response.payload()?;

        self.store.set(snapshot.clone());

        Ok(snapshot)
    }

    async fn send_ok(&self, command: &Command) -> Result<Response, ActionError> {
        let response = self.channel.send(command).await?;

        match response.status {
            Status::Ok => Ok(response),
            Status::Error | Status::Bye => Err(rejected(response)),
        }
    }
}

fn rejected(response: Response) -> ActionError {
    ActionError::Rejected(
        response
            .message
            .unwrap_or_else(|| "no reason given".to_string()),
    )
}
