use async_trait::async_trait;

use crate::config::ActionSettings;
use crate::plugin::action::{ActionError, ActionMetadata, ButtonAction};
use crate::plugin::button::DeckButton;
use crate::services::mpris::{MediaControl, MediaError, PlayerCapabilities};

/// Action to go back to the previous track on the active player.
pub struct PreviousAction;

#[async_trait]
impl ButtonAction for PreviousAction {
    fn metadata(&self) -> ActionMetadata {
        ActionMetadata {
            id: "previous",
            name: "Previous Track",
            description: "Go back to the previous track on the active media player",
        }
    }

    async fn on_press(
        &self,
        media: &dyn MediaControl,
        _button: &mut dyn DeckButton,
        settings: &ActionSettings,
    ) -> Result<(), ActionError> {
        let player = media.find_active(&settings.selection()).await?;

        if !player
            .capabilities
            .contains(PlayerCapabilities::CAN_GO_PREVIOUS)
        {
            return Err(MediaError::UnsupportedOperation {
                player: player.id,
                operation: "previous track",
            }
            .into());
        }

        media.previous(&player.id).await?;
        Ok(())
    }
}
