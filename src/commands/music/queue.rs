use rusty_jukebox::playlist::PlaylistCommand;

use super::run_playlist_command;
use crate::{CommandResult, Context};

/// View the current music queue
#[poise::command(slash_command, prefix_command, guild_only, category = "Music")]
pub async fn queue(ctx: Context<'_>) -> CommandResult {
    run_playlist_command(ctx, PlaylistCommand::Queue).await
}
