use async_trait::async_trait;

use crate::config::ActionSettings;
use crate::plugin::action::{ActionError, ActionMetadata, ButtonAction};
use crate::plugin::button::DeckButton;
use crate::services::mpris::{MediaControl, MediaError, PlayerCapabilities};

/// Action to skip to the next track on the active player.
pub struct NextAction;

#[async_trait]
impl ButtonAction for NextAction {
    fn metadata(&self) -> ActionMetadata {
        ActionMetadata {
            id: "next",
            name: "Next Track",
            description: "Skip to the next track on the active media player",
        }
    }

    async fn on_press(
        &self,
        media: &dyn MediaControl,
        _button: &mut dyn DeckButton,
        settings: &ActionSettings,
    ) -> Result<(), ActionError> {
        let player = media.find_active(&settings.selection()).await?;

        if !player.capabilities.contains(PlayerCapabilities::CAN_GO_NEXT) {
            return Err(MediaError::UnsupportedOperation {
                player: player.id,
                operation: "next track",
            }
            .into());
        }

        media.next(&player.id).await?;
        Ok(())
    }
}
