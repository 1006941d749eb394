//! Executes the commands the daily blessing state machine emits.

use encourager_core::{BlessingRepository, Clock, Command, DailyBlessing, VerseSource};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A state machine paired with the verse source that answers its lookups
pub struct Session<R, C> {
    pub state: DailyBlessing<R, C>,
    source: Box<dyn VerseSource>,
}

impl<R: BlessingRepository, C: Clock> Session<R, C> {
    pub fn new(state: DailyBlessing<R, C>, source: Box<dyn VerseSource>) -> Self {
        Self { state, source }
    }

    /// Perform every fetch in `commands`, feeding results back
    ///
    /// Returns the remaining commands (celebration, ticker control) for the
    /// caller to act on.
    pub async fn execute(&mut self, commands: Vec<Command>) -> Vec<Command> {
        let mut queue: std::collections::VecDeque<Command> = commands.into();
        let mut rest = Vec::new();

        while let Some(command) = queue.pop_front() {
            match command {
                Command::Fetch(request) => {
                    let result = self.source.fetch(request.language, request.index).await;
                    queue.extend(self.state.verse_arrived(request.generation, result));
                }
                other => rest.push(other),
            }
        }

        rest
    }
}

/// Periodic tick task, cancelled by [`Ticker::stop`] or on drop
pub struct Ticker {
    handle: JoinHandle<()>,
    rx: mpsc::Receiver<()>,
}

impl Ticker {
    pub fn start(period: Duration) -> Self {
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        Self { handle, rx }
    }

    /// Wait for the next tick
    pub async fn tick(&mut self) -> Option<()> {
        self.rx.recv().await
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
