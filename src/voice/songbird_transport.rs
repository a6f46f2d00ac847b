use std::sync::Arc;

use serenity::async_trait;
use serenity::prelude::Mutex as SerenityMutex;
use songbird::input::Input;
use songbird::tracks::TrackHandle;
use songbird::{Call, Event, EventContext, EventHandler, TrackEvent};
use tracing::{debug, warn};

use crate::playlist::{Dispatcher, EventSink, PlaylistError, PlaylistResult, Transport};

/// A joined voice call. Each `play` replaces whatever the call was playing.
#[derive(Clone)]
pub struct SongbirdTransport {
    call: Arc<SerenityMutex<Call>>,
}

impl SongbirdTransport {
    pub fn new(call: Arc<SerenityMutex<Call>>) -> Self {
        Self { call }
    }
}

#[async_trait]
impl Transport for SongbirdTransport {
    type Stream = Input;
    type Dispatcher = TrackDispatcher;

    async fn play(&self, stream: Input, events: EventSink) -> PlaylistResult<TrackDispatcher> {
        let handle = {
            let mut call = self.call.lock().await;
            call.play_only_input(stream)
        };
        debug!(
            "Started track {} (generation {})",
            handle.uuid(),
            events.generation()
        );

        let register = |event: TrackEvent, forwarder: TrackEventForwarder| {
            handle
                .add_event(Event::Track(event), forwarder)
                .map_err(|e| PlaylistError::Playback(e.to_string()))
        };
        register(
            TrackEvent::End,
            TrackEventForwarder {
                events: events.clone(),
                on_error: false,
            },
        )?;
        register(
            TrackEvent::Error,
            TrackEventForwarder {
                events,
                on_error: true,
            },
        )?;

        Ok(TrackDispatcher { handle })
    }

    fn is_same_connection(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.call, &other.call)
    }
}

/// Relays songbird track events to the engine's event loop.
struct TrackEventForwarder {
    events: EventSink,
    on_error: bool,
}

#[async_trait]
impl EventHandler for TrackEventForwarder {
    async fn act(&self, ctx: &EventContext<'_>) -> Option<Event> {
        if let EventContext::Track(tracks) = ctx {
            if self.on_error {
                let reason = tracks
                    .first()
                    .map(|(state, _)| format!("{:?}", state.playing))
                    .unwrap_or_else(|| "unknown track error".to_string());
                self.events.error(reason);
            } else {
                self.events.end();
            }
        }
        None
    }
}

/// Songbird's `TrackHandle` as the engine's dispatcher.
pub struct TrackDispatcher {
    handle: TrackHandle,
}

impl Dispatcher for TrackDispatcher {
    fn pause(&self) -> PlaylistResult<()> {
        self.handle
            .pause()
            .map_err(|e| PlaylistError::Playback(e.to_string()))
    }

    fn resume(&self) -> PlaylistResult<()> {
        self.handle
            .play()
            .map_err(|e| PlaylistError::Playback(e.to_string()))
    }

    fn dispose(self) {
        // Errors here mean the track already ended.
        if let Err(e) = self.handle.stop() {
            warn!("Failed to stop track {}: {}", self.handle.uuid(), e);
        }
    }
}
