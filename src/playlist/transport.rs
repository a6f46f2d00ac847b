//! Collaborators the engine drives but does not own the implementation of.

use serenity::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use super::PlaylistResult;

/// Receiving half of an engine's playback notifications.
pub type PlaybackEvents = mpsc::UnboundedReceiver<PlaybackEvent>;

/// What happened to a dispatched stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEventKind {
    /// The stream finished normally.
    End,
    /// The transport failed mid-stream. An `End` may or may not follow.
    Error(String),
}

/// A notification raised by a dispatcher, tagged with the generation of the
/// dispatcher that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackEvent {
    pub generation: u64,
    pub kind: PlaybackEventKind,
}

/// Handed to [`Transport::play`] so the dispatcher it creates can report back
/// to the owning engine.
#[derive(Debug, Clone)]
pub struct EventSink {
    generation: u64,
    sender: mpsc::UnboundedSender<PlaybackEvent>,
}

impl EventSink {
    pub(crate) fn new(generation: u64, sender: mpsc::UnboundedSender<PlaybackEvent>) -> Self {
        Self { generation, sender }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Report normal completion.
    pub fn end(&self) {
        self.send(PlaybackEventKind::End);
    }

    /// Report a mid-stream failure.
    pub fn error(&self, reason: impl Into<String>) {
        self.send(PlaybackEventKind::Error(reason.into()));
    }

    fn send(&self, kind: PlaybackEventKind) {
        let event = PlaybackEvent {
            generation: self.generation,
            kind,
        };
        // The engine is gone, nobody is left to advance.
        if self.sender.send(event).is_err() {
            debug!(
                "Dropping playback event for generation {}, engine no longer listening",
                self.generation
            );
        }
    }
}

/// A live voice connection that can play one stream at a time.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    type Stream: Send + 'static;
    type Dispatcher: Dispatcher;

    /// Starts playing `stream`. The returned dispatcher must report its end
    /// or failure through `events`.
    async fn play(&self, stream: Self::Stream, events: EventSink) -> PlaylistResult<Self::Dispatcher>;

    /// Whether `other` drives the same underlying connection as `self`.
    fn is_same_connection(&self, _other: &Self) -> bool
    where
        Self: Sized,
    {
        false
    }
}

/// The handle to an in-progress transmission. Owned exclusively by the engine.
pub trait Dispatcher: Send + Sync + 'static {
    fn pause(&self) -> PlaylistResult<()>;

    fn resume(&self) -> PlaylistResult<()>;

    /// Stops the transmission and releases the underlying audio resource.
    fn dispose(self);
}

/// Where status notifications are posted. Delivery is best effort.
pub trait OutputChannel: Send + Sync {
    fn post(&self, text: String);
}
