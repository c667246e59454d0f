use async_trait::async_trait;

use crate::config::ActionSettings;
use crate::plugin::action::{ActionError, ActionMetadata, ButtonAction};
use crate::plugin::button::DeckButton;
use crate::services::mpris::{MediaControl, MediaError, PlayerCapabilities};

/// Action to stop playback on the active player.
///
/// MPRIS ties `Stop` to the `CanControl` property, so that is the flag
/// this action is guarded on.
pub struct StopAction;

#[async_trait]
impl ButtonAction for StopAction {
    fn metadata(&self) -> ActionMetadata {
        ActionMetadata {
            id: "stop",
            name: "Stop",
            description: "Stop playback on the active media player",
        }
    }

    async fn on_press(
        &self,
        media: &dyn MediaControl,
        _button: &mut dyn DeckButton,
        settings: &ActionSettings,
    ) -> Result<(), ActionError> {
        let player = media.find_active(&settings.selection()).await?;

        if !player.capabilities.contains(PlayerCapabilities::CAN_CONTROL) {
            return Err(MediaError::UnsupportedOperation {
                player: player.id,
                operation: "stop",
            }
            .into());
        }

        media.stop(&player.id).await?;
        Ok(())
    }
}
