use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::ActionSettings;
use crate::services::mpris::{MediaControl, MediaError};

use super::actions::{
    InfoAction, NextAction, PauseAction, PlayAction, PlayPauseAction, PreviousAction, StopAction,
    ThumbnailAction,
};
use super::artwork::ArtworkError;
use super::button::DeckButton;

/// Errors a button action can run into.
///
/// Hosts never see these; [`dispatch`] logs them and leaves the button's
/// visual state untouched.
#[derive(thiserror::Error, Debug)]
pub enum ActionError {
    /// Media backend failure.
    #[error(transparent)]
    Media(#[from] MediaError),

    /// Artwork could not be resolved to a local file.
    #[error(transparent)]
    Artwork(#[from] ArtworkError),
}

/// Host-facing description of an action.
#[derive(Debug, Clone, Copy)]
pub struct ActionMetadata {
    /// Stable identifier the host binds buttons to.
    pub id: &'static str,

    /// Display name for the host's action picker.
    pub name: &'static str,

    /// One-line description for the host's action picker.
    pub description: &'static str,
}

/// A single media-control action bound to a deck button.
///
/// Every action is stateless and independently re-entrant: the target
/// player is recomputed from scratch on each press, and nothing carries
/// over between invocations.
#[async_trait]
pub trait ButtonAction: Send + Sync {
    /// Metadata shown by the host when assigning actions to buttons.
    fn metadata(&self) -> ActionMetadata;

    /// Handle one button press.
    ///
    /// # Errors
    ///
    /// Returns `ActionError` when the round-trip fails or the player lacks
    /// the required capability. Hosts route presses through [`dispatch`],
    /// which turns every failure into a silent no-op.
    async fn on_press(
        &self,
        media: &dyn MediaControl,
        button: &mut dyn DeckButton,
        settings: &ActionSettings,
    ) -> Result<(), ActionError>;
}

/// All actions this plugin exposes, in host display order.
pub fn action_registry() -> Vec<Box<dyn ButtonAction>> {
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

/// Run an action with the uniform failure policy applied.
///
/// A missing player or capability is expected desktop state, not a fault,
/// so it only shows up at debug level; bus and artwork failures get a
/// warning. Either way the press produces no visible change and nothing
/// reaches the host.
pub async fn dispatch(
    action: &dyn ButtonAction,
    media: &dyn MediaControl,
    button: &mut dyn DeckButton,
    settings: &ActionSettings,
) {
    if let Err(error) = action.on_press(media, button, settings).await {
        match error {
            ActionError::Media(MediaError::NoPlayerFound)
            | ActionError::Media(MediaError::UnsupportedOperation { .. }) => {
                debug!(action = action.metadata().id, "{error}");
            }
            _ => warn!(action = action.metadata().id, "{error}"),
        }
    }
}
