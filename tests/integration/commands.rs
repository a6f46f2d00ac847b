use std::sync::Arc;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use rusty_jukebox::playlist::{
    PlaybackState, PlaylistCommand, PlaylistError, PlaylistRegistry, SharedPlaylist,
};

use crate::common::fixtures::{ALICE, BOB, GUILD_ONE, SONG_A, SONG_B, UNKNOWN_LOCATOR};
use crate::common::mocks::{FakeResolver, FakeTransport, RecordingChannel};

/// A registry whose `GUILD_ONE` playlist is connected to fakes.
struct Guild {
    registry: PlaylistRegistry<FakeResolver, FakeTransport>,
    playlist: SharedPlaylist<FakeResolver, FakeTransport>,
    channel: RecordingChannel,
}

impl Guild {
    async fn connected() -> Self {
        crate::test_utils::init();
        let registry = PlaylistRegistry::new(Arc::new(FakeResolver::with_songs(&[SONG_A, SONG_B])));
        let playlist = registry.get_or_create(GUILD_ONE);
        let channel = RecordingChannel::default();
        {
            let mut engine = playlist.lock().await;
            engine.bind_transport(FakeTransport::default());
            engine.bind_output_channel(Arc::new(channel.clone()));
        }
        Self {
            registry,
            playlist,
            channel,
        }
    }

    async fn run(&self, command: PlaylistCommand) -> Result<Option<String>, PlaylistError> {
        command.execute(&self.registry, GUILD_ONE).await
    }

    async fn state(&self) -> PlaybackState {
        self.playlist.lock().await.state()
    }

    async fn queued(&self) -> usize {
        self.playlist.lock().await.queued().len()
    }

    async fn current_title(&self) -> Option<String> {
        self.playlist
            .lock()
            .await
            .current()
            .map(|song| song.title().to_string())
    }
}

fn add(locator: &str, requester: &str) -> PlaylistCommand {
    PlaylistCommand::Add {
        locator: locator.to_string(),
        requester: requester.to_string(),
    }
}

#[tokio::test]
async fn test_add_replies_with_title() {
    let guild = Guild::connected().await;

    let reply = guild.run(add(SONG_A.0, ALICE)).await.unwrap();

    assert_eq!(reply.as_deref(), Some("Added **Song A** to the queue"));
    assert_eq!(guild.queued().await, 1);
}

#[tokio::test]
async fn test_add_unknown_locator_is_an_error() {
    let guild = Guild::connected().await;

    let result = guild.run(add(UNKNOWN_LOCATOR, ALICE)).await;

    assert_matches!(result, Err(PlaylistError::Resolution(_)));
    assert_eq!(guild.queued().await, 0);
}

#[tokio::test]
async fn test_add_to_unseen_guild_creates_its_playlist() {
    let guild = Guild::connected().await;

    guild.run(add(SONG_A.0, BOB)).await.unwrap();
    add(SONG_B.0, BOB)
        .execute(&guild.registry, "guild-three")
        .await
        .unwrap();

    assert_eq!(guild.registry.len(), 2);
    let three = guild.registry.get("guild-three").unwrap();
    assert_eq!(three.lock().await.queued().len(), 1);
}

#[tokio::test]
async fn test_play_depends_on_state() {
    let guild = Guild::connected().await;
    guild.run(add(SONG_A.0, ALICE)).await.unwrap();
    guild.run(add(SONG_B.0, BOB)).await.unwrap();

    // Idle: starts the queue
    let reply = guild.run(PlaylistCommand::Play).await.unwrap();
    assert_eq!(reply, None);
    assert_eq!(guild.state().await, PlaybackState::Playing);

    // Playing: leaves the current song alone
    let reply = guild.run(PlaylistCommand::Play).await.unwrap();
    assert_eq!(reply.as_deref(), Some("Already playing!"));
    assert_eq!(guild.current_title().await.as_deref(), Some(SONG_A.1));

    // Paused: resumes
    guild.run(PlaylistCommand::Pause).await.unwrap();
    let reply = guild.run(PlaylistCommand::Play).await.unwrap();
    assert_eq!(reply, None);
    assert_eq!(guild.state().await, PlaybackState::Playing);
    assert_eq!(guild.current_title().await.as_deref(), Some(SONG_A.1));
}

#[tokio::test]
async fn test_pause_and_resume_reply_when_nothing_changes() {
    let guild = Guild::connected().await;

    let pause = guild.run(PlaylistCommand::Pause).await.unwrap();
    let resume = guild.run(PlaylistCommand::Resume).await.unwrap();

    assert_eq!(pause.as_deref(), Some("Nothing is playing!"));
    assert_eq!(resume.as_deref(), Some("Nothing is paused!"));
}

#[tokio::test]
async fn test_queue_replies_with_description() {
    let guild = Guild::connected().await;
    guild.run(add(SONG_A.0, ALICE)).await.unwrap();

    let reply = guild.run(PlaylistCommand::Queue).await.unwrap();

    let expected = guild.playlist.lock().await.describe_queue();
    assert_eq!(reply, Some(expected));
}

#[tokio::test]
async fn test_skip_names_skipped_song() {
    let guild = Guild::connected().await;
    guild.run(add(SONG_A.0, ALICE)).await.unwrap();
    guild.run(add(SONG_B.0, BOB)).await.unwrap();
    guild.run(PlaylistCommand::Play).await.unwrap();

    let reply = guild.run(PlaylistCommand::Skip).await.unwrap();

    assert_eq!(reply.as_deref(), Some("Skipped **Song A**"));
    assert_eq!(guild.current_title().await.as_deref(), Some(SONG_B.1));
}

#[tokio::test]
async fn test_skip_before_play_does_not_start_the_queue() {
    let guild = Guild::connected().await;
    guild.run(add(SONG_A.0, ALICE)).await.unwrap();

    let reply = guild.run(PlaylistCommand::Skip).await.unwrap();

    assert_eq!(reply.as_deref(), Some("Nothing to skip!"));
    assert_eq!(guild.state().await, PlaybackState::Idle);
    assert_eq!(guild.queued().await, 1);
    assert!(guild.channel.posts().is_empty());
}

#[tokio::test]
async fn test_stop_empties_the_playlist() {
    let guild = Guild::connected().await;
    guild.run(add(SONG_A.0, ALICE)).await.unwrap();
    guild.run(add(SONG_B.0, BOB)).await.unwrap();
    guild.run(PlaylistCommand::Play).await.unwrap();

    guild.run(PlaylistCommand::Stop).await.unwrap();

    assert_eq!(guild.state().await, PlaybackState::Idle);
    assert_eq!(guild.queued().await, 0);
    assert_eq!(
        guild.channel.count_containing("Playback stopped and queue cleared!"),
        1
    );
}
