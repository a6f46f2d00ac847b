use tracing::info;

use super::{
    MediaResolver, PlaybackState, PlaylistEngine, PlaylistRegistry, PlaylistResult, Transport,
};

/// Everything a user can ask of a guild's playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistCommand {
    Add { locator: String, requester: String },
    Play,
    Pause,
    Resume,
    Queue,
    Skip,
    Stop,
}

impl PlaylistCommand {
    /// Short name used in logs and help text.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Queue => "queue",
            Self::Skip => "skip",
            Self::Stop => "stop",
        }
    }

    /// Apply this command to the playlist of `guild_id`.
    ///
    /// Returns the reply for the invoking user, if there is one. Status
    /// notices (now playing, paused, ...) go to the engine's output channel
    /// instead. `Add` resolves its locator before locking the guild.
    pub async fn execute<R, T>(
        self,
        registry: &PlaylistRegistry<R, T>,
        guild_id: &str,
    ) -> PlaylistResult<Option<String>>
    where
        R: MediaResolver,
        T: Transport<Stream = R::Stream>,
    {
        info!("Executing '{}' for guild {}", self.name(), guild_id);

        match self {
            Self::Add { locator, requester } => {
                let song = registry.enqueue(guild_id, &locator, &requester).await?;
                Ok(Some(format!("Added **{}** to the queue", song.title())))
            }
            command => {
                let playlist = registry.get_or_create(guild_id);
                let mut engine = playlist.lock().await;
                command.apply(&mut engine).await
            }
        }
    }

    /// Apply this command to an engine the caller already holds.
    async fn apply<R, T>(self, engine: &mut PlaylistEngine<R, T>) -> PlaylistResult<Option<String>>
    where
        R: MediaResolver,
        T: Transport<Stream = R::Stream>,
    {
        match self {
            Self::Add { locator, requester } => {
                let song = engine.enqueue(&locator, &requester).await?;
                Ok(Some(format!("Added **{}** to the queue", song.title())))
            }
            Self::Play => match engine.state() {
                PlaybackState::Idle => {
                    engine.advance().await?;
                    Ok(None)
                }
                PlaybackState::Paused => {
                    engine.resume()?;
                    Ok(None)
                }
                PlaybackState::Playing => Ok(Some("Already playing!".to_string())),
            },
            Self::Pause => Ok((!engine.pause()?).then(|| "Nothing is playing!".to_string())),
            Self::Resume => Ok((!engine.resume()?).then(|| "Nothing is paused!".to_string())),
            Self::Queue => Ok(Some(engine.describe_queue())),
            Self::Skip => {
                let skipped = engine.skip().await?;
                Ok(Some(match skipped {
                    Some(song) => format!("Skipped **{}**", song.title()),
                    None => "Nothing to skip!".to_string(),
                }))
            }
            Self::Stop => {
                engine.stop();
                Ok(None)
            }
        }
    }
}
