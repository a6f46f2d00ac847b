use std::sync::Arc;

use rusty_jukebox::playlist::PlaylistCommand;
use rusty_jukebox::voice::ChannelNotifier;

use super::{guild_playlist, require_guild, run_playlist_command};
use crate::{CommandResult, Context};

/// Start playing the queue in this channel
#[poise::command(slash_command, prefix_command, guild_only, category = "Music")]
pub async fn play(ctx: Context<'_>) -> CommandResult {
    let guild_id = require_guild(ctx)?;

    // Status notices follow whichever channel last asked to play.
    let notifier = ChannelNotifier::new(ctx.serenity_context().http.clone(), ctx.channel_id());
    guild_playlist(ctx, guild_id)
        .lock()
        .await
        .bind_output_channel(Arc::new(notifier));

    run_playlist_command(ctx, PlaylistCommand::Play).await
}
