use crate::{Message, ViewState, WaveStream};
use futures::StreamExt;
use std::sync::Arc;
use tokio::{sync::watch, task::JoinHandle};

/// A live `NewWave` subscription appending to the view's messages.
///
/// The delivery task is aborted when the subscription is dropped.
#[derive(Debug)]
pub struct WaveSubscription {
    handle: JoinHandle<()>,
}

impl WaveSubscription {
    /// Spawns a task appending every wave of `stream` to `state`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(mut stream: WaveStream, state: Arc<watch::Sender<ViewState>>) -> Self {
        let handle = tokio::spawn(async move {
            while let Some(item) = stream.next().await {
                let raw = match item {
                    Ok(raw) => raw,
                    Err(err) => {
                        warn!(%err, "dropping undecodable NewWave");
                        continue;
                    }
                };
                match Message::try_from(raw) {
                    Ok(message) => {
                        debug!(from = %message.address, "received wave");
                        state.send_modify(|state| state.messages.push(message));
                    }
                    Err(err) => warn!(%err, "skipping wave"),
                }
            }
            debug!("NewWave subscription ended");
        });
        Self { handle }
    }

    /// Whether the delivery task is still running.
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for WaveSubscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
