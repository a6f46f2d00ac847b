use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::{
    Dispatcher, EventSink, MediaResolver, OutputChannel, PlaybackEvent, PlaybackEventKind,
    PlaybackEvents, PlaylistError, PlaylistResult, ResolutionError, SongRecord, Transport,
};

/// How many queued songs `describe_queue` lists before truncating.
pub const QUEUE_DISPLAY_LIMIT: usize = 15;

/// Observable playback state of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
}

/// The dispatcher currently carrying audio, plus the generation its events are tagged with.
struct ActivePlayback<D> {
    generation: u64,
    dispatcher: D,
    paused: bool,
}

/// Queue and playback state for a single guild.
///
/// At most one dispatcher is alive at any time: every path that starts a new
/// stream releases the previous one first.
pub struct PlaylistEngine<R, T>
where
    R: MediaResolver,
    T: Transport<Stream = R::Stream>,
{
    guild_id: String,
    resolver: Arc<R>,
    transport: Option<T>,
    queue: VecDeque<SongRecord>,
    current: Option<SongRecord>,
    active: Option<ActivePlayback<T::Dispatcher>>,
    output: Option<Arc<dyn OutputChannel>>,
    events: mpsc::UnboundedSender<PlaybackEvent>,
    generation: u64,
}

impl<R, T> PlaylistEngine<R, T>
where
    R: MediaResolver,
    T: Transport<Stream = R::Stream>,
{
    /// Create an idle engine. The returned receiver yields the end/error
    /// notifications of every dispatcher this engine starts; feed them back
    /// through [`handle_event`](Self::handle_event).
    pub fn new(guild_id: impl Into<String>, resolver: Arc<R>) -> (Self, PlaybackEvents) {
        let (events, receiver) = mpsc::unbounded_channel();
        let engine = Self {
            guild_id: guild_id.into(),
            resolver,
            transport: None,
            queue: VecDeque::new(),
            current: None,
            active: None,
            output: None,
            events,
            generation: 0,
        };
        (engine, receiver)
    }

    pub fn guild_id(&self) -> &str {
        &self.guild_id
    }

    /// Songs waiting to be played, in play order.
    pub fn queued(&self) -> &VecDeque<SongRecord> {
        &self.queue
    }

    /// The song currently streaming (or paused).
    pub fn current(&self) -> Option<&SongRecord> {
        self.current.as_ref()
    }

    pub fn state(&self) -> PlaybackState {
        match &self.active {
            None => PlaybackState::Idle,
            Some(active) if active.paused => PlaybackState::Paused,
            Some(_) => PlaybackState::Playing,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Set where now-playing, paused, resumed and empty-queue notices go.
    pub fn bind_output_channel(&mut self, channel: Arc<dyn OutputChannel>) {
        self.output = Some(channel);
    }

    /// Attach a live voice connection. Any playback on a previous connection is torn down.
    ///
    /// Rebinding the connection that is already bound (a repeated join) keeps
    /// the current song playing.
    pub fn bind_transport(&mut self, transport: T) {
        if let Some(bound) = &self.transport {
            if bound.is_same_connection(&transport) {
                debug!("Transport for guild {} is already bound", self.guild_id);
                return;
            }
        }
        if self.transport.is_some() {
            self.teardown_playback();
        }
        info!("Transport bound for guild {}", self.guild_id);
        self.transport = Some(transport);
    }

    /// Detach the voice connection, stopping playback. The queue is kept.
    pub fn unbind_transport(&mut self) -> Option<T> {
        self.teardown_playback();
        info!("Transport unbound for guild {}", self.guild_id);
        self.transport.take()
    }

    /// Resolve `locator` and append it to the tail of the queue.
    ///
    /// The resolver is called exactly once. On failure the queue is untouched.
    /// This borrows the engine for the whole resolve; when the engine is
    /// shared, use [`PlaylistRegistry::enqueue`](super::PlaylistRegistry::enqueue),
    /// which resolves before taking the lock.
    pub async fn enqueue(
        &mut self,
        locator: &str,
        requester: &str,
    ) -> Result<SongRecord, ResolutionError> {
        let song = resolve_song(self.resolver.as_ref(), locator, requester).await?;
        self.push_resolved(song.clone());
        Ok(song)
    }

    /// Append an already resolved song to the tail of the queue.
    pub fn push_resolved(&mut self, song: SongRecord) {
        info!(
            "Queued '{}' for guild {} ({} waiting)",
            song.title(),
            self.guild_id,
            self.queue.len() + 1
        );
        self.queue.push_back(song);
    }

    /// Drop the current song and start the next one.
    ///
    /// Songs whose stream cannot be opened or dispatched are reported and
    /// skipped, so this settles either on `Playing` or on `Idle` with an empty
    /// queue.
    ///
    /// # Errors
    ///
    /// [`PlaylistError::NotConnected`] if songs are waiting but no transport is bound.
    /// The queue is left as it was.
    pub async fn advance(&mut self) -> PlaylistResult<PlaybackState> {
        self.teardown_playback();

        loop {
            if self.queue.is_empty() {
                info!("No more songs queued for guild {}", self.guild_id);
                self.notify("No more songs left in the queue!".to_string());
                return Ok(PlaybackState::Idle);
            }

            if self.transport.is_none() {
                warn!(
                    "Cannot advance guild {}: no transport bound",
                    self.guild_id
                );
                return Err(PlaylistError::NotConnected);
            }

            let Some(song) = self.queue.pop_front() else {
                continue;
            };

            match self.dispatch(&song).await {
                Ok(()) => {
                    info!("Now playing '{}' in guild {}", song.title(), self.guild_id);
                    self.notify(format!(
                        "Playing: **{}** as requested by: **{}**",
                        song.title(),
                        song.requester()
                    ));
                    self.current = Some(song);
                    return Ok(PlaybackState::Playing);
                }
                Err(err) => {
                    error!(
                        "Failed to start '{}' in guild {}: {}",
                        song.title(),
                        self.guild_id,
                        err
                    );
                    self.notify(format!("Playback error for **{}**: {}", song.title(), err));
                }
            }
        }
    }

    /// Operator skip. Returns the song that was interrupted, or `None`
    /// without touching anything when the engine is idle.
    pub async fn skip(&mut self) -> PlaylistResult<Option<SongRecord>> {
        if self.state() == PlaybackState::Idle {
            debug!("Skip ignored for guild {}: nothing playing", self.guild_id);
            return Ok(None);
        }
        let skipped = self.current.clone();
        self.advance().await?;
        Ok(skipped)
    }

    /// Stop playback and empty the queue. Returns how many queued songs were dropped.
    pub fn stop(&mut self) -> usize {
        self.teardown_playback();
        let cleared = self.queue.len();
        self.queue.clear();
        info!(
            "Stopped playback for guild {}, cleared {} queued songs",
            self.guild_id, cleared
        );
        self.notify("Playback stopped and queue cleared!".to_string());
        cleared
    }

    /// Pause the active dispatcher. Returns `false` (and posts nothing) when
    /// nothing is playing.
    pub fn pause(&mut self) -> PlaylistResult<bool> {
        let Some(active) = self.active.as_mut().filter(|active| !active.paused) else {
            debug!("Pause ignored for guild {}: nothing playing", self.guild_id);
            return Ok(false);
        };
        active.dispatcher.pause()?;
        active.paused = true;
        self.notify("Playback Paused!".to_string());
        Ok(true)
    }

    /// Resume a paused dispatcher. Returns `false` (and posts nothing) when
    /// nothing is paused.
    pub fn resume(&mut self) -> PlaylistResult<bool> {
        let Some(active) = self.active.as_mut().filter(|active| active.paused) else {
            debug!("Resume ignored for guild {}: nothing paused", self.guild_id);
            return Ok(false);
        };
        active.dispatcher.resume()?;
        active.paused = false;
        self.notify("Playback Resumed!".to_string());
        Ok(true)
    }

    /// Human readable summary of what is waiting in the queue.
    pub fn describe_queue(&self) -> String {
        let count = self.queue.len();
        let mut details = format!("__**Music Queue:**__ Currently **{}** songs queued", count);

        if count > QUEUE_DISPLAY_LIMIT {
            details.push_str(&format!(" *[Only next {} shown]*", QUEUE_DISPLAY_LIMIT));
        }

        if count == 0 {
            details.push_str("\nAdd some songs to the queue with the \"add\" command!");
            return details;
        }

        let listing = self
            .queue
            .iter()
            .take(QUEUE_DISPLAY_LIMIT)
            .enumerate()
            .map(|(i, song)| format!("{}. {}", i + 1, song))
            .collect::<Vec<_>>()
            .join("\n");
        details.push_str(&format!("\n```{}```", listing));
        details
    }

    /// Consume a notification from one of this engine's dispatchers.
    ///
    /// Only the active dispatcher's events count. Anything else (a second
    /// `End`, or the `End` a disposed track fires) is dropped.
    pub async fn handle_event(&mut self, event: PlaybackEvent) {
        let is_active = self
            .active
            .as_ref()
            .is_some_and(|active| active.generation == event.generation);

        if !is_active {
            debug!(
                "Ignoring stale {:?} for generation {} in guild {}",
                event.kind, event.generation, self.guild_id
            );
            return;
        }

        match event.kind {
            PlaybackEventKind::End => {
                info!("Track ended for guild {}", self.guild_id);
            }
            PlaybackEventKind::Error(reason) => {
                let title = self.current.as_ref().map_or("unknown track", |s| s.title());
                error!(
                    "Playback error for '{}' in guild {}: {}",
                    title, self.guild_id, reason
                );
                self.notify(format!("Playback error for **{}**: {}", title, reason));
            }
        }

        if let Err(err) = self.advance().await {
            error!("Auto-advance failed for guild {}: {}", self.guild_id, err);
        }
    }

    /// Open a stream for `song` and hand it to the transport.
    async fn dispatch(&mut self, song: &SongRecord) -> PlaylistResult<()> {
        let stream = self.resolver.open_stream(song.locator()).await?;
        let transport = self.transport.as_ref().ok_or(PlaylistError::NotConnected)?;

        self.generation += 1;
        let sink = EventSink::new(self.generation, self.events.clone());
        let dispatcher = transport.play(stream, sink).await?;

        self.active = Some(ActivePlayback {
            generation: self.generation,
            dispatcher,
            paused: false,
        });
        Ok(())
    }

    /// Dispose the active dispatcher (if any) and clear the current song.
    fn teardown_playback(&mut self) {
        if let Some(active) = self.active.take() {
            debug!(
                "Disposing dispatcher generation {} for guild {}",
                active.generation, self.guild_id
            );
            active.dispatcher.dispose();
        }
        self.current = None;
    }

    fn notify(&self, text: String) {
        match &self.output {
            Some(channel) => channel.post(text),
            None => warn!(
                "No output channel bound for guild {}, dropping notice: {}",
                self.guild_id, text
            ),
        }
    }
}

/// Resolve `locator` into a queue entry. The stream the resolver hands back is
/// only proof that one can be produced; `advance` opens its own.
pub(crate) async fn resolve_song<R: MediaResolver>(
    resolver: &R,
    locator: &str,
    requester: &str,
) -> Result<SongRecord, ResolutionError> {
    let media = resolver.resolve(locator).await?;
    Ok(SongRecord::new(locator, media.title, requester))
}
