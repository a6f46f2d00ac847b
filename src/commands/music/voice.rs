use std::sync::Arc;

use poise::serenity_prelude as serenity;
use serenity::client::Context;
use serenity::model::id::{ChannelId, GuildId};
use serenity::prelude::Mutex as SerenityMutex;
use songbird::{Call, Songbird};
use thiserror::Error;

/// Errors that can occur while managing the voice connection
#[derive(Error, Debug)]
pub enum MusicError {
    #[error("Not in a guild")]
    NotInGuild,

    #[error("Failed to join voice channel: {0}")]
    JoinError(String),

    #[error("Not connected to a voice channel")]
    NotConnected,

    #[error("Failed to get voice manager")]
    NoVoiceManager,

    #[error("User is not in a voice channel")]
    UserNotInVoiceChannel,
}

/// Result type for voice operations
pub type MusicResult<T> = Result<T, MusicError>;

/// Get the Songbird voice client from the context
pub async fn get_songbird(ctx: &Context) -> MusicResult<Arc<Songbird>> {
    songbird::get(ctx).await.ok_or(MusicError::NoVoiceManager)
}

/// Join a voice channel, or return the existing call if already connected there
pub async fn join_channel(
    ctx: &Context,
    guild_id: GuildId,
    channel_id: ChannelId,
) -> MusicResult<Arc<SerenityMutex<Call>>> {
    let songbird = get_songbird(ctx).await?;

    songbird
        .join(guild_id, channel_id)
        .await
        .map_err(|e| MusicError::JoinError(e.to_string()))
}

/// Leave the voice channel of a guild
pub async fn leave_channel(ctx: &Context, guild_id: GuildId) -> MusicResult<()> {
    let songbird = get_songbird(ctx).await?;

    if songbird.get(guild_id).is_none() {
        return Err(MusicError::NotConnected);
    }

    songbird
        .remove(guild_id)
        .await
        .map_err(|_| MusicError::JoinError("Failed to leave voice channel".to_string()))
}

/// Get the voice channel ID that the user is currently in
pub fn get_user_voice_channel(
    ctx: &Context,
    guild_id: GuildId,
    user_id: serenity::UserId,
) -> MusicResult<ChannelId> {
    let guild = ctx.cache.guild(guild_id).ok_or(MusicError::NotInGuild)?;

    let voice_state = guild
        .voice_states
        .get(&user_id)
        .ok_or(MusicError::UserNotInVoiceChannel)?;

    voice_state
        .channel_id
        .ok_or(MusicError::UserNotInVoiceChannel)
}
