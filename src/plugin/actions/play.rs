use async_trait::async_trait;

use crate::config::ActionSettings;
use crate::plugin::action::{ActionError, ActionMetadata, ButtonAction};
use crate::plugin::button::DeckButton;
use crate::services::mpris::{MediaControl, PlaybackState};

/// Action to start playback on the active player.
///
/// Does nothing when the player is already playing, so holding the button
/// or mashing it cannot queue up redundant calls.
pub struct PlayAction;

#[async_trait]
impl ButtonAction for PlayAction {
    fn metadata(&self) -> ActionMetadata {
        ActionMetadata {
            id: "play",
            name: "Play",
            description: "Start playback on the active media player",
        }
    }

    async fn on_press(
        &self,
        media: &dyn MediaControl,
        _button: &mut dyn DeckButton,
        settings: &ActionSettings,
    ) -> Result<(), ActionError> {
        let player = media.find_active(&settings.selection()).await?;

        if player.playback_state == PlaybackState::Playing {
            return Ok(());
        }

        media.play(&player.id).await?;
        Ok(())
    }
}
