use serenity::async_trait;

use super::ResolutionError;

/// What a locator resolves to: a display title and a playable stream.
///
/// The queue only keeps the title. Queued songs can wait a long time, so the
/// engine opens a fresh stream through [`MediaResolver::open_stream`] when a
/// song actually starts and drops this one.
pub struct ResolvedMedia<S> {
    pub title: String,
    pub stream: S,
}

/// Turns an opaque source locator into playable media.
///
/// Implementations must be cheap to share between guilds; the registry hands
/// the same resolver to every engine it creates.
#[async_trait]
pub trait MediaResolver: Send + Sync + 'static {
    /// The playable stream handed to a [`Transport`](super::Transport).
    type Stream: Send + 'static;

    /// Validates the locator and fetches its title. Called exactly once per
    /// enqueue, never during playback.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolutionError`] for malformed or unreachable locators.
    async fn resolve(&self, locator: &str) -> Result<ResolvedMedia<Self::Stream>, ResolutionError>;

    /// Opens a fresh stream for a locator that has already been resolved once.
    async fn open_stream(&self, locator: &str) -> Result<Self::Stream, ResolutionError>;
}
