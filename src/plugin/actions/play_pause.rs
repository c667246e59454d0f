use async_trait::async_trait;

use crate::config::ActionSettings;
use crate::plugin::action::{ActionError, ActionMetadata, ButtonAction};
use crate::plugin::button::DeckButton;
use crate::services::mpris::{MediaControl, PlaybackState, PlayerCapabilities};

/// Action to toggle play/pause state of the active player.
///
/// Players that advertise `CanPause` get the single MPRIS toggle call;
/// for the rest the direction is derived from the current status. Either
/// way exactly one control call goes out per press.
pub struct PlayPauseAction;

#[async_trait]
impl ButtonAction for PlayPauseAction {
    fn metadata(&self) -> ActionMetadata {
        ActionMetadata {
            id: "play-pause",
            name: "Play/Pause",
            description: "Toggle play/pause state of the active media player",
        }
    }

    async fn on_press(
        &self,
        media: &dyn MediaControl,
        _button: &mut dyn DeckButton,
        settings: &ActionSettings,
    ) -> Result<(), ActionError> {
        let player = media.find_active(&settings.selection()).await?;

        if player.capabilities.contains(PlayerCapabilities::CAN_PAUSE) {
            media.play_pause(&player.id).await?;
        } else if player.playback_state == PlaybackState::Playing {
            media.pause(&player.id).await?;
        } else {
            media.play(&player.id).await?;
        }

        Ok(())
    }
}
