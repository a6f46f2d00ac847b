//! Concrete collaborators for the playlist engine: yt-dlp for resolving,
//! songbird for carrying audio and serenity for posting status text.

/// Serenity text channel as an `OutputChannel`.
pub mod channel;
/// Songbird call as a `Transport`, track handles as dispatchers.
pub mod songbird_transport;
/// yt-dlp backed `MediaResolver`.
pub mod youtube;

pub use channel::ChannelNotifier;
pub use songbird_transport::{SongbirdTransport, TrackDispatcher};
pub use youtube::YtDlpResolver;

use crate::playlist::PlaylistRegistry;

/// The registry type the bot runs with.
pub type GuildPlaylists = PlaylistRegistry<YtDlpResolver, SongbirdTransport>;
