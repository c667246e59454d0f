use async_trait::async_trait;

use crate::config::ActionSettings;
use crate::plugin::action::{ActionError, ActionMetadata, ButtonAction};
use crate::plugin::button::DeckButton;
use crate::services::mpris::{MediaControl, TrackMetadata};

/// Action to show the current track on the button's label.
///
/// The label is always written, so text from a previous track clears when
/// the player reports nothing.
pub struct InfoAction;

/// Format `"{title}{separator}{artist}"`, degrading to whichever field the
/// player reported, and to an empty string when it reported neither.
pub(crate) fn format_track_label(metadata: &TrackMetadata, separator: &str) -> String {
    match (metadata.title.as_deref(), metadata.artist()) {
        (Some(title), Some(artist)) => format!("{title}{separator}{artist}"),
        (Some(title), None) => title.to_string(),
        (None, Some(artist)) => artist,
        (None, None) => String::new(),
    }
}

#[async_trait]
impl ButtonAction for InfoAction {
    fn metadata(&self) -> ActionMetadata {
        ActionMetadata {
            id: "info",
            name: "Track Info",
            description: "Show the current track's title and artist on the button",
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

        button.set_label(&format_track_label(&metadata, &settings.separator));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(title: Option<&str>, artists: &[&str]) -> TrackMetadata {
        TrackMetadata {
            title: title.map(String::from),
            artists: artists.iter().map(|a| (*a).to_string()).collect(),
            ..TrackMetadata::default()
        }
    }

    #[test]
    fn joins_title_and_artist_with_the_separator() {
        let label = format_track_label(&metadata(Some("Song"), &["Artist"]), " - ");
        assert_eq!(label, "Song - Artist");
    }

    #[test]
    fn joins_multiple_artists_before_separating() {
        let label = format_track_label(&metadata(Some("Song"), &["Artist", "Guest"]), " - ");
        assert_eq!(label, "Song - Artist, Guest");
    }

    #[test]
    fn degrades_to_the_available_field() {
        assert_eq!(
            format_track_label(&metadata(Some("Song"), &[]), " - "),
            "Song"
        );
        assert_eq!(
            format_track_label(&metadata(None, &["Artist"]), " - "),
            "Artist"
        );
    }

    #[test]
    fn empty_metadata_produces_an_empty_label() {
        assert_eq!(format_track_label(&metadata(None, &[]), " - "), "");
    }

    #[test]
    fn respects_a_custom_separator() {
        let label = format_track_label(&metadata(Some("Song"), &["Artist"]), " | ");
        assert_eq!(label, "Song | Artist");
    }
}
