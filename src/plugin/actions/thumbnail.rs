use async_trait::async_trait;

use crate::config::ActionSettings;
use crate::plugin::action::{ActionError, ActionMetadata, ButtonAction};
use crate::plugin::artwork;
use crate::plugin::button::DeckButton;
use crate::services::mpris::MediaControl;

/// Action to show the current track's artwork as the button background.
///
/// When the player reports no artwork, or the URL cannot be resolved to a
/// local file, the existing background stays untouched rather than
/// flickering to blank between tracks.
pub struct ThumbnailAction;

#[async_trait]
impl ButtonAction for ThumbnailAction {
    fn metadata(&self) -> ActionMetadata {
        ActionMetadata {
            id: "thumbnail",
            name: "Album Art",
            description: "Show the current track's artwork as the button background",
        }
    }

    async fn on_press(
        &self,
        media: &dyn MediaControl,
        button: &mut dyn DeckButton,
        settings: &ActionSettings,
    ) -> Result<(), ActionError> {
        let player = media.find_active(&settings.selection()).await?;
        let metadata = media.metadata(&player.id).await?;

        let Some(art_url) = metadata.art_url else {
            return Ok(());
        };

        let image = artwork::resolve(&art_url, settings.artwork_cache_dir.as_deref()).await?;
        button.set_background(&image);
        Ok(())
    }
}
