use rusty_jukebox::playlist::PlaylistCommand;

use super::run_playlist_command;
use crate::{CommandResult, Context};

/// Add a song to the queue
#[poise::command(slash_command, prefix_command, guild_only, category = "Music")]
pub async fn add(
    ctx: Context<'_>,
    #[description = "URL of the song to queue"] url: String,
) -> CommandResult {
    // Resolving runs yt-dlp, which can take a while.
    ctx.defer().await?;

    run_playlist_command(
        ctx,
        PlaylistCommand::Add {
            locator: url,
            requester: ctx.author().name.clone(),
        },
    )
    .await
}
