use async_trait::async_trait;

use crate::config::ActionSettings;
use crate::plugin::action::{ActionError, ActionMetadata, ButtonAction};
use crate::plugin::button::DeckButton;
use crate::services::mpris::{MediaControl, PlaybackState};

/// Action to pause the active player.
///
/// Only issues the call while the player reports it is playing.
pub struct PauseAction;

#[async_trait]
impl ButtonAction for PauseAction {
    fn metadata(&self) -> ActionMetadata {
        ActionMetadata {
            id: "pause",
            name: "Pause",
            description: "Pause the active media player",
        }
    }

    async fn on_press(
        &self,
        media: &dyn MediaControl,
        _button: &mut dyn DeckButton,
        settings: &ActionSettings,
    ) -> Result<(), ActionError> {
        let player = media.find_active(&settings.selection()).await?;

        if player.playback_state != PlaybackState::Playing {
            return Ok(());
        }

        media.pause(&player.id).await?;
        Ok(())
    }
}
