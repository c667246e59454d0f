//! Integration tests for the button actions against fake collaborators.
//!
//! The session bus and the host's buttons are both behind traits, so the
//! whole action layer runs here without a desktop attached.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use mediadeck::config::ActionSettings;
use mediadeck::plugin::actions::{
    InfoAction, NextAction, PauseAction, PlayAction, PlayPauseAction, PreviousAction, StopAction,
    ThumbnailAction,
};
use mediadeck::plugin::{ButtonAction, DeckButton, dispatch};
use mediadeck::services::mpris::{
    MediaControl, MediaError, PlaybackState, PlayerCapabilities, PlayerId, PlayerSelection,
    PlayerSnapshot, TrackMetadata,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Previous,
}

/// Recording fake for the session bus collaborator.
struct FakeMedia {
    snapshot: Option<PlayerSnapshot>,
    metadata: TrackMetadata,
    calls: Mutex<Vec<Call>>,
}

impl FakeMedia {
    fn without_player() -> Self {
        Self {
            snapshot: None,
            metadata: TrackMetadata::default(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_player(state: PlaybackState, capabilities: PlayerCapabilities) -> Self {
        Self {
            snapshot: Some(PlayerSnapshot {
                id: PlayerId::from_bus_name("org.mpris.MediaPlayer2.fake"),
                identity: "Fake Player".to_string(),
                playback_state: state,
                capabilities,
            }),
            metadata: TrackMetadata::default(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_metadata(mut self, metadata: TrackMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), MediaError> {
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl MediaControl for FakeMedia {
    async fn find_active(
        &self,
        _selection: &PlayerSelection,
    ) -> Result<PlayerSnapshot, MediaError> {
        self.snapshot.clone().ok_or(MediaError::NoPlayerFound)
    }

    async fn list_players(
        &self,
        _selection: &PlayerSelection,
    ) -> Result<Vec<PlayerSnapshot>, MediaError> {
        Ok(self.snapshot.clone().into_iter().collect())
    }

    async fn play(&self, _player: &PlayerId) -> Result<(), MediaError> {
        self.record(Call::Play)
    }

    async fn pause(&self, _player: &PlayerId) -> Result<(), MediaError> {
        self.record(Call::Pause)
    }

    async fn play_pause(&self, _player: &PlayerId) -> Result<(), MediaError> {
        self.record(Call::PlayPause)
    }

    async fn stop(&self, _player: &PlayerId) -> Result<(), MediaError> {
        self.record(Call::Stop)
    }

    async fn next(&self, _player: &PlayerId) -> Result<(), MediaError> {
        self.record(Call::Next)
    }

    async fn previous(&self, _player: &PlayerId) -> Result<(), MediaError> {
        self.record(Call::Previous)
    }

    async fn metadata(&self, _player: &PlayerId) -> Result<TrackMetadata, MediaError> {
        Ok(self.metadata.clone())
    }
}

/// Recording fake for a host button.
#[derive(Default)]
struct FakeButton {
    label: Option<String>,
    background: Option<PathBuf>,
}

impl DeckButton for FakeButton {
    fn set_label(&mut self, text: &str) {
        self.label = Some(text.to_string());
    }

    fn set_background(&mut self, image: &Path) {
        self.background = Some(image.to_path_buf());
    }
}

fn track(title: Option<&str>, artists: &[&str], art_url: Option<&str>) -> TrackMetadata {
    TrackMetadata {
        title: title.map(String::from),
        artists: artists.iter().map(|a| (*a).to_string()).collect(),
        art_url: art_url.map(String::from),
        ..TrackMetadata::default()
    }
}

fn all_actions() -> Vec<Box<dyn ButtonAction>> {
    vec![
        Box::new(PlayAction),
        Box::new(PauseAction),
        Box::new(PlayPauseAction),
        Box::new(StopAction),
        Box::new(NextAction),
        Box::new(PreviousAction),
        Box::new(InfoAction),
        Box::new(ThumbnailAction),
    ]
}

mod registry {
    use mediadeck::plugin::action_registry;

    #[test]
    fn exposes_every_action_once() {
        let registry = action_registry();
        let ids: Vec<&str> = registry.iter().map(|action| action.metadata().id).collect();

        assert_eq!(
            ids,
            vec![
                "play",
                "pause",
                "play-pause",
                "stop",
                "next",
                "previous",
                "info",
                "thumbnail"
            ]
        );
    }
}

mod no_player {
    use super::*;

    #[tokio::test]
    async fn every_action_is_a_silent_noop() {
        for action in all_actions() {
            let media = FakeMedia::without_player();
            let mut button = FakeButton::default();

            dispatch(action.as_ref(), &media, &mut button, &ActionSettings::default()).await;

            assert!(
                media.calls().is_empty(),
                "{} issued a call without a player",
                action.metadata().id
            );
            assert_eq!(button.label, None);
            assert_eq!(button.background, None);
        }
    }
}

mod play_pause {
    use super::*;

    #[tokio::test]
    async fn toggles_once_when_the_player_can_pause() {
        for state in [PlaybackState::Playing, PlaybackState::Paused] {
            let media = FakeMedia::with_player(state, PlayerCapabilities::all());
            let mut button = FakeButton::default();

            dispatch(
                &PlayPauseAction,
                &media,
                &mut button,
                &ActionSettings::default(),
            )
            .await;

            assert_eq!(media.calls(), vec![Call::PlayPause]);
        }
    }

    #[tokio::test]
    async fn derives_direction_when_toggle_is_unsupported() {
        let capabilities = PlayerCapabilities::CAN_CONTROL | PlayerCapabilities::CAN_PLAY;

        let media = FakeMedia::with_player(PlaybackState::Playing, capabilities);
        let mut button = FakeButton::default();
        dispatch(
            &PlayPauseAction,
            &media,
            &mut button,
            &ActionSettings::default(),
        )
        .await;
        assert_eq!(media.calls(), vec![Call::Pause]);

        let media = FakeMedia::with_player(PlaybackState::Paused, capabilities);
        let mut button = FakeButton::default();
        dispatch(
            &PlayPauseAction,
            &media,
            &mut button,
            &ActionSettings::default(),
        )
        .await;
        assert_eq!(media.calls(), vec![Call::Play]);
    }
}

mod play_and_pause {
    use super::*;

    #[tokio::test]
    async fn play_is_guarded_on_not_already_playing() {
        let media = FakeMedia::with_player(PlaybackState::Playing, PlayerCapabilities::all());
        let mut button = FakeButton::default();
        dispatch(&PlayAction, &media, &mut button, &ActionSettings::default()).await;
        assert!(media.calls().is_empty());

        for state in [PlaybackState::Paused, PlaybackState::Stopped] {
            let media = FakeMedia::with_player(state, PlayerCapabilities::all());
            let mut button = FakeButton::default();
            dispatch(&PlayAction, &media, &mut button, &ActionSettings::default()).await;
            assert_eq!(media.calls(), vec![Call::Play]);
        }
    }

    #[tokio::test]
    async fn pause_is_guarded_on_currently_playing() {
        let media = FakeMedia::with_player(PlaybackState::Paused, PlayerCapabilities::all());
        let mut button = FakeButton::default();
        dispatch(&PauseAction, &media, &mut button, &ActionSettings::default()).await;
        assert!(media.calls().is_empty());

        let media = FakeMedia::with_player(PlaybackState::Playing, PlayerCapabilities::all());
        let mut button = FakeButton::default();
        dispatch(&PauseAction, &media, &mut button, &ActionSettings::default()).await;
        assert_eq!(media.calls(), vec![Call::Pause]);
    }
}

mod capability_guards {
    use super::*;

    #[tokio::test]
    async fn next_requires_the_capability_flag() {
        let media = FakeMedia::with_player(PlaybackState::Playing, PlayerCapabilities::CAN_CONTROL);
        let mut button = FakeButton::default();
        dispatch(&NextAction, &media, &mut button, &ActionSettings::default()).await;
        assert!(media.calls().is_empty());

        let media = FakeMedia::with_player(
            PlaybackState::Playing,
            PlayerCapabilities::CAN_CONTROL | PlayerCapabilities::CAN_GO_NEXT,
        );
        let mut button = FakeButton::default();
        dispatch(&NextAction, &media, &mut button, &ActionSettings::default()).await;
        assert_eq!(media.calls(), vec![Call::Next]);
    }

    #[tokio::test]
    async fn previous_requires_the_capability_flag() {
        let media = FakeMedia::with_player(PlaybackState::Playing, PlayerCapabilities::CAN_CONTROL);
        let mut button = FakeButton::default();
        dispatch(
            &PreviousAction,
            &media,
            &mut button,
            &ActionSettings::default(),
        )
        .await;
        assert!(media.calls().is_empty());

        let media = FakeMedia::with_player(
            PlaybackState::Playing,
            PlayerCapabilities::CAN_CONTROL | PlayerCapabilities::CAN_GO_PREVIOUS,
        );
        let mut button = FakeButton::default();
        dispatch(
            &PreviousAction,
            &media,
            &mut button,
            &ActionSettings::default(),
        )
        .await;
        assert_eq!(media.calls(), vec![Call::Previous]);
    }

    #[tokio::test]
    async fn stop_requires_can_control() {
        let media = FakeMedia::with_player(PlaybackState::Playing, PlayerCapabilities::CAN_PLAY);
        let mut button = FakeButton::default();
        dispatch(&StopAction, &media, &mut button, &ActionSettings::default()).await;
        assert!(media.calls().is_empty());

        let media = FakeMedia::with_player(PlaybackState::Playing, PlayerCapabilities::all());
        let mut button = FakeButton::default();
        dispatch(&StopAction, &media, &mut button, &ActionSettings::default()).await;
        assert_eq!(media.calls(), vec![Call::Stop]);
    }
}

mod info {
    use super::*;

    async fn label_for(metadata: TrackMetadata) -> Option<String> {
        let media = FakeMedia::with_player(PlaybackState::Playing, PlayerCapabilities::all())
            .with_metadata(metadata);
        let mut button = FakeButton::default();
        dispatch(&InfoAction, &media, &mut button, &ActionSettings::default()).await;
        button.label
    }

    #[tokio::test]
    async fn renders_title_and_artist_with_separator() {
        let label = label_for(track(Some("Song"), &["Artist"], None)).await;
        assert_eq!(label.as_deref(), Some("Song - Artist"));
    }

    #[tokio::test]
    async fn degrades_to_title_when_artist_is_missing() {
        let label = label_for(track(Some("Song"), &[], None)).await;
        assert_eq!(label.as_deref(), Some("Song"));
    }

    #[tokio::test]
    async fn clears_the_label_when_nothing_is_known() {
        let label = label_for(track(None, &[], None)).await;
        assert_eq!(label.as_deref(), Some(""));
    }
}

mod thumbnail {
    use super::*;

    #[tokio::test]
    async fn missing_artwork_leaves_the_background_untouched() {
        let media = FakeMedia::with_player(PlaybackState::Playing, PlayerCapabilities::all())
            .with_metadata(track(Some("Song"), &["Artist"], None));
        let mut button = FakeButton::default();

        dispatch(
            &ThumbnailAction,
            &media,
            &mut button,
            &ActionSettings::default(),
        )
        .await;

        assert_eq!(button.background, None);
    }

    #[tokio::test]
    async fn file_urls_become_the_background_image() {
        let media = FakeMedia::with_player(PlaybackState::Playing, PlayerCapabilities::all())
            .with_metadata(track(None, &[], Some("file:///tmp/covers/album.png")));
        let mut button = FakeButton::default();

        dispatch(
            &ThumbnailAction,
            &media,
            &mut button,
            &ActionSettings::default(),
        )
        .await;

        assert_eq!(
            button.background,
            Some(PathBuf::from("/tmp/covers/album.png"))
        );
    }

    #[tokio::test]
    async fn unresolvable_artwork_is_a_silent_noop() {
        let media = FakeMedia::with_player(PlaybackState::Playing, PlayerCapabilities::all())
            .with_metadata(track(None, &[], Some("ftp://example.com/cover.png")));
        let mut button = FakeButton::default();

        dispatch(
            &ThumbnailAction,
            &media,
            &mut button,
            &ActionSettings::default(),
        )
        .await;

        assert_eq!(button.background, None);
    }
}

mod idempotence {
    use super::*;

    #[tokio::test]
    async fn repeated_presses_with_unchanged_state_repeat_the_same_call() {
        let media = FakeMedia::with_player(PlaybackState::Paused, PlayerCapabilities::all());
        let mut button = FakeButton::default();

        dispatch(
            &PlayPauseAction,
            &media,
            &mut button,
            &ActionSettings::default(),
        )
        .await;
        dispatch(
            &PlayPauseAction,
            &media,
            &mut button,
            &ActionSettings::default(),
        )
        .await;

        assert_eq!(media.calls(), vec![Call::PlayPause, Call::PlayPause]);
    }

    #[tokio::test]
    async fn repeated_info_presses_render_the_same_label() {
        let media = FakeMedia::with_player(PlaybackState::Playing, PlayerCapabilities::all())
            .with_metadata(track(Some("Song"), &["Artist"], None));
        let mut button = FakeButton::default();

        dispatch(&InfoAction, &media, &mut button, &ActionSettings::default()).await;
        let first = button.label.clone();
        dispatch(&InfoAction, &media, &mut button, &ActionSettings::default()).await;

        assert_eq!(first.as_deref(), Some("Song - Artist"));
        assert_eq!(button.label, first);
    }
}
