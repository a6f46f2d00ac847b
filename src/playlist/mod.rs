//! The per-guild playback queue.
//!
//! A [`PlaylistEngine`] owns the queued [`SongRecord`]s for one guild and drives
//! them through a single active stream. Resolving locators, carrying audio and
//! posting status text are delegated to the collaborator traits in
//! [`resolver`] and [`transport`], so the engine itself knows nothing about
//! Discord or yt-dlp.

/// Command variants mapped onto engine operations.
pub mod command;
/// The playback state machine.
pub mod engine;
/// Guild identity to engine mapping.
pub mod registry;
/// The `MediaResolver` collaborator.
pub mod resolver;
/// The immutable queue entry.
pub mod song;
/// The `Transport`, `Dispatcher` and `OutputChannel` collaborators.
pub mod transport;

pub use command::PlaylistCommand;
pub use engine::{PlaybackState, PlaylistEngine, QUEUE_DISPLAY_LIMIT};
pub use registry::{PlaylistRegistry, SharedPlaylist};
pub use resolver::{MediaResolver, ResolvedMedia};
pub use song::SongRecord;
pub use transport::{
    Dispatcher, EventSink, OutputChannel, PlaybackEvent, PlaybackEventKind, PlaybackEvents,
    Transport,
};

use thiserror::Error;

/// A source locator could not be turned into playable media.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Invalid source locator: {0}")]
    InvalidLocator(String),

    #[error("Unable to resolve {locator}: {reason}")]
    Unresolvable { locator: String, reason: String },
}

/// Errors surfaced by playlist operations
#[derive(Error, Debug)]
pub enum PlaylistError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("Not connected to a voice channel")]
    NotConnected,
}

/// Result type for playlist operations
pub type PlaylistResult<T> = Result<T, PlaylistError>;
