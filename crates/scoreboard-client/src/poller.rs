use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, mpsc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use scoreboard_core::{GAMES, Game, RankedRecord};

use crate::api::ApiClient;
use crate::error::ClientError;

/// A freshly fetched and ranked leaderboard.
#[derive(Debug, Clone)]
pub struct LeaderboardUpdate {
    pub game: &'static Game,
    pub ranked: Vec<RankedRecord>,
}

/// What a poll produced.
#[derive(Debug)]
pub enum PollEvent {
    Updated(LeaderboardUpdate),
    Failed {
        game: &'static Game,
        error: ClientError,
    },
}

/// Periodically refreshes leaderboards, one task per game.
///
/// A game's fetch is awaited inside its own task, so at most one request per
/// game is ever outstanding; ticks missed while a fetch runs are skipped.
pub struct LeaderboardPoller {
    api: ApiClient,
    games: Vec<&'static Game>,
    interval: Duration,
}

impl LeaderboardPoller {
    /// Poll every catalog game.
    pub fn new(api: ApiClient, interval: Duration) -> Self {
        Self {
            api,
            games: GAMES.iter().collect(),
            interval,
        }
    }

    /// Restrict polling to the given games.
    pub fn with_games(mut self, games: Vec<&'static Game>) -> Self {
        self.games = games;
        self
    }

    /// Start polling. Events are delivered on `tx` until the returned handle
    /// is shut down or dropped, or the receiver goes away.
    pub fn spawn(self, tx: mpsc::Sender<PollEvent>) -> PollerHandle {
        let cancel = CancellationToken::new();
        let mut triggers = HashMap::new();
        let mut tasks = Vec::with_capacity(self.games.len());

        for game in self.games {
            let trigger = Arc::new(Notify::new());
            triggers.insert(game.id, Arc::clone(&trigger));
            tasks.push(tokio::spawn(poll_game(
                self.api.clone(),
                game,
                self.interval,
                trigger,
                cancel.child_token(),
                tx.clone(),
            )));
        }

        tracing::info!(
            games = tasks.len(),
            interval_ms = self.interval.as_millis() as u64,
            "Leaderboard poller started"
        );

        PollerHandle {
            cancel,
            triggers,
            tasks,
        }
    }
}

/// Control handle for a running [`LeaderboardPoller`]. Dropping it cancels
/// polling.
pub struct PollerHandle {
    cancel: CancellationToken,
    triggers: HashMap<&'static str, Arc<Notify>>,
    tasks: Vec<JoinHandle<()>>,
}

impl PollerHandle {
    /// Ask for an immediate refresh of one game (e.g. after a score was
    /// submitted). If a fetch is in flight the refresh runs right after it.
    /// Returns `false` for a game that is not being polled.
    pub fn refresh(&self, game_id: &str) -> bool {
        match self.triggers.get(game_id) {
            Some(trigger) => {
                trigger.notify_one();
                true
            },
            None => false,
        }
    }

    pub fn refresh_all(&self) {
        for trigger in self.triggers.values() {
            trigger.notify_one();
        }
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled() && self.tasks.iter().any(|t| !t.is_finished())
    }

    /// Cancel polling and wait for every task to stop. No event is sent
    /// after this returns.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        for task in std::mem::take(&mut self.tasks) {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Poller task ended abnormally");
            }
        }
        tracing::info!("Leaderboard poller stopped");
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn poll_game(
    api: ApiClient,
    game: &'static Game,
    interval: Duration,
    trigger: Arc<Notify>,
    cancel: CancellationToken,
    tx: mpsc::Sender<PollEvent>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = trigger.notified() => ticker.reset(),
            _ = ticker.tick() => {},
        }

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            result = api.leaderboard(game) => result,
        };

        let (event, stop) = match result {
            Ok(ranked) => (
                PollEvent::Updated(LeaderboardUpdate { game, ranked }),
                false,
            ),
            Err(ClientError::AuthExpired) => {
                tracing::warn!(game = game.id, "Session expired, stopping poll");
                (
                    PollEvent::Failed {
                        game,
                        error: ClientError::AuthExpired,
                    },
                    true,
                )
            },
            Err(error) => {
                tracing::warn!(game = game.id, error = %error, "Leaderboard poll failed");
                (PollEvent::Failed { game, error }, false)
            },
        };

        let delivered = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            sent = tx.send(event) => sent.is_ok(),
        };
        if !delivered {
            tracing::debug!(game = game.id, "Update receiver closed, stopping poll");
            break;
        }
        if stop {
            break;
        }
    }
}
