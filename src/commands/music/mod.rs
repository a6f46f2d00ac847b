//! Music commands. Each one is a thin wrapper that maps the invocation onto a
//! `PlaylistCommand` or onto the voice connection of the guild's playlist.

pub(crate) mod add;
pub(crate) mod join;
pub(crate) mod leave;
pub(crate) mod pause;
pub(crate) mod play;
pub(crate) mod queue;
pub(crate) mod resume;
pub(crate) mod skip;
pub(crate) mod stop;

/// Voice connection helpers and the music error type.
pub(crate) mod voice;

use poise::CreateReply;
use poise::serenity_prelude::{CreateEmbed, GuildId};
use rusty_jukebox::playlist::{PlaylistCommand, SharedPlaylist};
use rusty_jukebox::voice::{SongbirdTransport, YtDlpResolver};
use tracing::warn;

use crate::{CommandResult, Context};
use voice::MusicError;

type GuildPlaylist = SharedPlaylist<YtDlpResolver, SongbirdTransport>;

/// The guild this command was invoked in, or an error for DMs.
pub(crate) fn require_guild(ctx: Context<'_>) -> Result<GuildId, MusicError> {
    ctx.guild_id().ok_or(MusicError::NotInGuild)
}

/// Fetch (or lazily create) the playlist of `guild_id`.
pub(crate) fn guild_playlist(ctx: Context<'_>, guild_id: GuildId) -> GuildPlaylist {
    ctx.data().playlists.get_or_create(&guild_id.to_string())
}

/// Red error embed, matching the rest of the bot's replies.
pub(crate) fn error_reply(description: impl Into<String>) -> CreateReply {
    CreateReply::default()
        .embed(
            CreateEmbed::new()
                .title("❌ Error")
                .description(description)
                .color(0xff0000),
        )
        .ephemeral(true)
}

/// Execute `command` against this guild's playlist and reply with the outcome.
pub(crate) async fn run_playlist_command(ctx: Context<'_>, command: PlaylistCommand) -> CommandResult {
    let guild_id = require_guild(ctx)?;
    let outcome = command
        .execute(&ctx.data().playlists, &guild_id.to_string())
        .await;

    match outcome {
        Ok(Some(reply)) => {
            ctx.say(reply).await?;
        }
        // The engine already posted a notice to the bound channel.
        Ok(None) => {
            ctx.send(CreateReply::default().content("✅ Done").ephemeral(true))
                .await?;
        }
        Err(err) => {
            warn!("Music command failed in guild {}: {}", guild_id, err);
            ctx.send(error_reply(err.to_string())).await?;
        }
    }

    Ok(())
}
