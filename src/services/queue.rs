use strum_macros::Display;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::models::{GameStateSnapshot, ScoreReport};

use super::{
    sequencer::{GameActionSequencer, PlayOutcome},
    ActionError,
};

/// A user intent, as triggered by the presentation layer.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Hello,
    StartGame,
    RefreshState,
    PlayCard { hand_index: usize },
    FinalizeRound,
    FetchScore,
    Quit,
}

#[derive(Debug)]
pub enum ActionOutcome {
    Acknowledged,
    Snapshot(GameStateSnapshot),
    Played(PlayOutcome),
    Score(ScoreReport),
}

impl ActionOutcome {
    pub fn into_snapshot(self) -> Option<GameStateSnapshot> {
        match self {
            ActionOutcome::Snapshot(snapshot) => Some(snapshot),
            ActionOutcome::Played(outcome) => Some(outcome.snapshot),
            _ => None,
        }
    }

    pub fn into_score(self) -> Option<ScoreReport> {
        match self {
            ActionOutcome::Score(score) => Some(score),
            _ => None,
        }
    }
}

struct Job {
    action: UserAction,
    done: oneshot::Sender<Result<ActionOutcome, ActionError>>,
}

/// Bounded work queue in front of the sequencer: a single worker drains
/// actions in submission order and every submission gets an explicit
/// completion. Dropping every handle closes the queue and stops the worker
/// once the backlog is drained.
#[derive(Clone)]
pub struct ActionQueue {
    jobs: mpsc::Sender<Job>,
}

impl ActionQueue {
    pub fn start(sequencer: GameActionSequencer, capacity: usize) -> (Self, JoinHandle<()>) {
        let (jobs, backlog) = mpsc::channel(capacity);

        let worker = tokio::spawn(run_worker(sequencer, backlog));

        (Self { jobs }, worker)
    }

    /// Enqueue and wait for the action's completion.
    pub async fn submit(&self, action: UserAction) -> Result<ActionOutcome, ActionError> {
        let completion = self.dispatch(action).await?;

        completion.await.map_err(|_| ActionError::QueueClosed)?
    }

    /// Enqueue without waiting; the receiver resolves when the worker has
    /// finished the action. Applies backpressure when the queue is full.
    pub async fn dispatch(
        &self,
        action: UserAction,
    ) -> Result<oneshot::Receiver<Result<ActionOutcome, ActionError>>, ActionError> {
        let (done, completion) = oneshot::channel();

        self.jobs
            .send(Job { action, done })
            .await
            .map_err(|_| ActionError::QueueClosed)?;

        Ok(completion)
    }
}

async fn run_worker(sequencer: GameActionSequencer, mut backlog: mpsc::Receiver<Job>) {
    while let Some(job) = backlog.recv().await {
        let result = run_action(&sequencer, job.action).await;

        if let Err(e) = &result {
            sequencer
                .store()
                .set_status(format!("{} failed: {e}", job.action));

            tracing::warn!("{} failed | {e}", job.action);
        }

        // the submitter may have stopped listening, that is fine
        let _ = job.done.send(result);
    }
}

async fn run_action(
    sequencer: &GameActionSequencer,
    action: UserAction,
) -> Result<ActionOutcome, ActionError> {
    let outcome = match action {
        UserAction::Hello => {
            sequencer.hello().await?;
            ActionOutcome::Acknowledged
        }
        UserAction::StartGame => ActionOutcome::Snapshot(sequencer.start_game().await?),
        UserAction::RefreshState => ActionOutcome::Snapshot(sequencer.refresh_state().await?),
        UserAction::PlayCard { hand_index } => {
            ActionOutcome::Played(sequencer.play_card(hand_index).await?)
        }
        UserAction::FinalizeRound => ActionOutcome::Snapshot(sequencer.finalize_round().await?),
        UserAction::FetchScore => ActionOutcome::Score(sequencer.fetch_score().await?),
        UserAction::Quit => {
            sequencer.quit().await?;
            ActionOutcome::Acknowledged
        }
    };

    Ok(outcome)
}
