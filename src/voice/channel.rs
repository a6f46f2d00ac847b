use std::future::Future;
use std::sync::Arc;

use serenity::all::{ChannelId, CreateMessage, Http};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::playlist::OutputChannel;

/// Posts status notices to a Discord text channel.
///
/// Notices are delivered one at a time by a single background task, so they
/// show up in the order the engine posted them.
pub struct ChannelNotifier {
    channel_id: ChannelId,
    outbox: mpsc::UnboundedSender<String>,
}

impl ChannelNotifier {
    /// Must be called from within a tokio runtime.
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        let (outbox, _delivery) = spawn_delivery(move |text| {
            let http = Arc::clone(&http);
            async move {
                let message = CreateMessage::new().content(text);
                if let Err(e) = channel_id.send_message(http, message).await {
                    warn!("Failed to post to channel {}: {}", channel_id, e);
                }
            }
        });
        Self { channel_id, outbox }
    }
}

impl OutputChannel for ChannelNotifier {
    fn post(&self, text: String) {
        if self.outbox.send(text).is_err() {
            warn!(
                "Delivery task for channel {} is gone, dropping notice",
                self.channel_id
            );
        }
    }
}

/// Spawn a task that awaits `deliver` for each queued text, strictly in order.
/// The task ends once every sender is dropped and the queue is drained.
fn spawn_delivery<F, Fut>(deliver: F) -> (mpsc::UnboundedSender<String>, JoinHandle<()>)
where
    F: Fn(String) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();
    let handle = tokio::spawn(async move {
        while let Some(text) = receiver.recv().await {
            deliver(text).await;
        }
    });
    (sender, handle)
}
