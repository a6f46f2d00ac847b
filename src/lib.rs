//! Per-guild music queue for a Discord bot.
//!
//! [`playlist`] holds the queue/playback state machine and the traits it
//! talks to. [`voice`] (feature `music`) implements those traits on top of
//! songbird and serenity.

pub mod config;
pub mod playlist;

/// songbird/serenity implementations of the playlist collaborators.
#[cfg(feature = "music")]
pub mod voice;
