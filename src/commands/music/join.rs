use poise::serenity_prelude::Mentionable;
use rusty_jukebox::voice::SongbirdTransport;
use tracing::info;

use super::voice::{get_user_voice_channel, join_channel};
use super::{error_reply, guild_playlist, require_guild};
use crate::{CommandResult, Context};

/// Join your voice channel
#[poise::command(slash_command, prefix_command, guild_only, category = "Music")]
pub async fn join(ctx: Context<'_>) -> CommandResult {
    let guild_id = require_guild(ctx)?;

    let channel_id =
        match get_user_voice_channel(ctx.serenity_context(), guild_id, ctx.author().id) {
            Ok(channel_id) => channel_id,
            Err(err) => {
                ctx.send(error_reply(format!(
                    "Unable to connect to voice channel! Ensure that you have joined a voice channel ({})",
                    err
                )))
                .await?;
                return Ok(());
            }
        };

    ctx.defer().await?;

    let call = match join_channel(ctx.serenity_context(), guild_id, channel_id).await {
        Ok(call) => call,
        Err(err) => {
            ctx.send(error_reply(err.to_string())).await?;
            return Ok(());
        }
    };

    guild_playlist(ctx, guild_id)
        .lock()
        .await
        .bind_transport(SongbirdTransport::new(call));
    info!("Joined voice channel {} in guild {}", channel_id, guild_id);

    ctx.say(format!("Connected to channel {}", channel_id.mention()))
        .await?;
    Ok(())
}
