use tracing::warn;

use super::voice::leave_channel;
use super::{error_reply, guild_playlist, require_guild};
use crate::{CommandResult, Context};

/// Leave the voice channel
#[poise::command(slash_command, prefix_command, guild_only, category = "Music")]
pub async fn leave(ctx: Context<'_>) -> CommandResult {
    let guild_id = require_guild(ctx)?;

    let had_transport = guild_playlist(ctx, guild_id)
        .lock()
        .await
        .unbind_transport()
        .is_some();

    if let Err(err) = leave_channel(ctx.serenity_context(), guild_id).await {
        warn!("Failed to leave voice channel in guild {}: {}", guild_id, err);
        if !had_transport {
            ctx.send(error_reply("Not currently in a voice channel!"))
                .await?;
            return Ok(());
        }
    }

    ctx.say("👋 Left the voice channel").await?;
    Ok(())
}
