use rusty_jukebox::playlist::PlaylistCommand;

use super::run_playlist_command;
use crate::{CommandResult, Context};

/// Pause the current song
#[poise::command(slash_command, prefix_command, guild_only, category = "Music")]
pub async fn pause(ctx: Context<'_>) -> CommandResult {
    run_playlist_command(ctx, PlaylistCommand::Pause).await
}
