use std::sync::{Arc, Weak};

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::engine::resolve_song;
use super::{MediaResolver, PlaybackEvents, PlaylistEngine, ResolutionError, SongRecord, Transport};

/// An engine shared between command handlers and its event loop.
pub type SharedPlaylist<R, T> = Arc<Mutex<PlaylistEngine<R, T>>>;

/// Maps guild identity to that guild's [`PlaylistEngine`].
///
/// Owned by the bot's shared data and created once at startup. Entries are
/// created lazily and never removed.
pub struct PlaylistRegistry<R, T>
where
    R: MediaResolver,
    T: Transport<Stream = R::Stream>,
{
    resolver: Arc<R>,
    playlists: DashMap<String, SharedPlaylist<R, T>>,
}

impl<R, T> PlaylistRegistry<R, T>
where
    R: MediaResolver,
    T: Transport<Stream = R::Stream>,
{
    pub fn new(resolver: Arc<R>) -> Self {
        Self {
            resolver,
            playlists: DashMap::new(),
        }
    }

    /// Return the engine for `guild_id`, creating it (and spawning its event
    /// loop) on first access. Must be called from within a tokio runtime.
    pub fn get_or_create(&self, guild_id: &str) -> SharedPlaylist<R, T> {
        self.playlists
            .entry(guild_id.to_string())
            .or_insert_with(|| {
                info!("Creating playlist for guild {}", guild_id);
                let (engine, events) = PlaylistEngine::new(guild_id, Arc::clone(&self.resolver));
                let engine = Arc::new(Mutex::new(engine));
                tokio::spawn(run_event_loop(Arc::downgrade(&engine), events));
                engine
            })
            .clone()
    }

    /// Resolve `locator` and append it to the queue of `guild_id`.
    ///
    /// Resolution runs before the guild's lock is taken, so a slow lookup
    /// never holds up auto-advance or other commands on the same guild. On
    /// failure nothing is queued.
    pub async fn enqueue(
        &self,
        guild_id: &str,
        locator: &str,
        requester: &str,
    ) -> Result<SongRecord, ResolutionError> {
        let playlist = self.get_or_create(guild_id);
        let song = resolve_song(self.resolver.as_ref(), locator, requester).await?;
        playlist.lock().await.push_resolved(song.clone());
        Ok(song)
    }

    pub fn get(&self, guild_id: &str) -> Option<SharedPlaylist<R, T>> {
        self.playlists.get(guild_id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }
}

/// Feeds dispatcher notifications back into the engine, one at a time.
async fn run_event_loop<R, T>(engine: Weak<Mutex<PlaylistEngine<R, T>>>, mut events: PlaybackEvents)
where
    R: MediaResolver,
    T: Transport<Stream = R::Stream>,
{
    while let Some(event) = events.recv().await {
        let Some(shared) = engine.upgrade() else {
            break;
        };
        shared.lock().await.handle_event(event).await;
    }
    debug!("Playlist event loop finished");
}
