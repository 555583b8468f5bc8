use std::{sync::Arc, time::Duration};

use scopa_client::{
    infra::{
        channel::CommandChannel,
        connection::{ConnectConfig, ConnectionManager},
    },
    services::{
        policy::FirstOption,
        queue::{ActionQueue, UserAction},
        sequencer::GameActionSequencer,
        state::StateStore,
        ActionError,
    },
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or("info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenv::dotenv().ok();

    let config = ConnectConfig::from_env();

    let connection = ConnectionManager::new();

    connection
        .connect(&config.host, config.port, config.timeout)
        .await
        .expect("Expected to reach the game server");

    let store = StateStore::new();

    let sequencer = GameActionSequencer::new(
        CommandChannel::new(connection),
        store.clone(),
        Arc::new(FirstOption),
    );

    let (queue, worker) = ActionQueue::start(sequencer, 8);

    let ticker = tokio::spawn(presentation_tick(store));

    if let Err(e) = drive_round(&queue).await {
        tracing::error!("round driver stopped | {e}");
    }

    ticker.abort();

    drop(queue);
    worker.await.expect("Expected the action worker to finish");
}

/// Plays one full round the way the original test client does: hello, start,
/// then keep playing the current player's first card until the round is over,
/// finalize, read the score, say goodbye.
async fn drive_round(queue: &ActionQueue) -> Result<(), ActionError> {
    queue.submit(UserAction::Hello).await?;

    let mut snapshot = queue
        .submit(UserAction::StartGame)
        .await?
        .into_snapshot()
        .expect("Expected START to return a snapshot");

    // 40 cards in the deck bounds the number of plays in a round
    for _ in 0..40 {
        if snapshot.round_over {
            break;
        }

        if snapshot.current_hand().is_empty() {
            snapshot = queue
                .submit(UserAction::RefreshState)
                .await?
                .into_snapshot()
                .expect("Expected STATE to return a snapshot");

            continue;
        }

        let played = queue
            .submit(UserAction::PlayCard { hand_index: 0 })
            .await?
            .into_snapshot()
            .expect("Expected PLAY to return a snapshot");

        snapshot = played;
    }

    if snapshot.round_over {
        queue.submit(UserAction::FinalizeRound).await?;
    }

    let score = queue
        .submit(UserAction::FetchScore)
        .await?
        .into_score()
        .expect("Expected SCORE to return a score report");

    tracing::info!(
        "final score | player 1: {}, player 2: {}",
        score.player1_score,
        score.player2_score
    );

    queue.submit(UserAction::Quit).await?;

    Ok(())
}

/// Stands in for the rendering loop: reads the store once per tick and never
/// touches the network.
async fn presentation_tick(store: StateStore) {
    let mut tick = tokio::time::interval(Duration::from_millis(500));

    loop {
        tick.tick().await;

        match store.get() {
            Some(s) => tracing::info!(
                "[tick] table {} cards, deck {}, turn: {} | {}",
                s.table.len(),
                s.deck_size,
                s.current_player,
                store.status()
            ),
            None => tracing::info!("[tick] no snapshot yet | {}", store.status()),
        }
    }
}
