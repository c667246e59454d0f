use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use zbus::zvariant::OwnedValue;

/// Unique identifier for a media player on the session bus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a `PlayerId` from a D-Bus bus name.
    pub fn from_bus_name(bus_name: &str) -> Self {
        Self(bus_name.to_string())
    }

    /// Get the D-Bus bus name.
    pub fn bus_name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Current playback state of a media player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Player is currently playing.
    Playing,

    /// Player is paused.
    Paused,

    /// Player is stopped.
    Stopped,
}

impl From<&str> for PlaybackState {
    fn from(status: &str) -> Self {
        match status {
            "Playing" => Self::Playing,
            "Paused" => Self::Paused,
            _ => Self::Stopped,
        }
    }
}

bitflags! {
    /// Control operations a player currently advertises support for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PlayerCapabilities: u8 {
        /// Player accepts control commands at all.
        const CAN_CONTROL = 0b0000_0001;
        /// Playback can be started.
        const CAN_PLAY = 0b0000_0010;
        /// Playback can be paused.
        const CAN_PAUSE = 0b0000_0100;
        /// Player can skip to the next track.
        const CAN_GO_NEXT = 0b0000_1000;
        /// Player can go back to the previous track.
        const CAN_GO_PREVIOUS = 0b0001_0000;
    }
}

/// Point-in-time view of a player, resolved fresh for every action.
///
/// Nothing here survives the invocation that resolved it; a snapshot is
/// discarded as soon as the action returns.
#[derive(Debug, Clone)]
pub struct PlayerSnapshot {
    /// Unique player identifier.
    pub id: PlayerId,

    /// Human-readable player name from the MPRIS `Identity` property.
    pub identity: String,

    /// Playback state at resolution time.
    pub playback_state: PlaybackState,

    /// Advertised capability flags.
    pub capabilities: PlayerCapabilities,
}

/// Tie-break policy when several MPRIS players are available at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// Prefer a playing player, then a paused one, then bus order.
    #[default]
    PreferPlaying,

    /// Take the first player in bus enumeration order.
    FirstAvailable,
}

/// Which players an action considers, and how ties are broken.
#[derive(Debug, Clone, Default)]
pub struct PlayerSelection {
    /// Tie-break policy.
    pub policy: SelectionPolicy,

    /// Case-insensitive substring matched against player identities.
    pub player: Option<String>,

    /// Bus-name patterns excluded from discovery.
    pub ignored: Vec<String>,
}

/// Metadata for the currently loaded track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackMetadata {
    /// Track title.
    pub title: Option<String>,

    /// Track artist(s), in player order.
    pub artists: Vec<String>,

    /// Album name.
    pub album: Option<String>,

    /// Artwork URL (`file://`, `data:` or `http(s)://`).
    pub art_url: Option<String>,

    /// Track length.
    pub length: Option<Duration>,
}

impl TrackMetadata {
    /// Artists joined for display, or `None` when the player reported none.
    pub fn artist(&self) -> Option<String> {
        if self.artists.is_empty() {
            None
        } else {
            Some(self.artists.join(", "))
        }
    }
}

impl From<HashMap<String, OwnedValue>> for TrackMetadata {
    fn from(metadata: HashMap<String, OwnedValue>) -> Self {
        let mut track = Self::default();

        if let Some(title) = metadata.get("xesam:title") {
            if let Ok(title_str) = String::try_from(title.clone()) {
                track.title = non_empty(title_str);
            }
        }

        if let Some(artist) = metadata.get("xesam:artist") {
            track.artists = string_list(artist);
        }

        if let Some(album) = metadata.get("xesam:album") {
            if let Ok(album_str) = String::try_from(album.clone()) {
                track.album = non_empty(album_str);
            }
        }

        if let Some(art_url) = metadata.get("mpris:artUrl") {
            if let Ok(url_str) = String::try_from(art_url.clone()) {
                track.art_url = non_empty(url_str);
            }
        }

        if let Some(length) = metadata.get("mpris:length") {
            // Players disagree on whether length is signed or unsigned.
            let micros = i64::try_from(length.clone())
                .ok()
                .and_then(|value| u64::try_from(value).ok())
                .or_else(|| u64::try_from(length.clone()).ok());
            if let Some(micros) = micros {
                if micros > 0 {
                    track.length = Some(Duration::from_micros(micros));
                }
            }
        }

        track
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

fn string_list(value: &OwnedValue) -> Vec<String> {
    if let Ok(array) = <&zbus::zvariant::Array>::try_from(value) {
        array
            .iter()
            .filter_map(|entry| {
                if let Ok(s) = entry.downcast_ref::<String>() {
                    Some(s.clone())
                } else if let Ok(s) = entry.downcast_ref::<&str>() {
                    Some(s.to_string())
                } else {
                    None
                }
            })
            .filter(|entry| !entry.is_empty())
            .collect()
    } else if let Ok(single) = value.downcast_ref::<String>() {
        if single.is_empty() { Vec::new() } else { vec![single.clone()] }
    } else if let Ok(single) = value.downcast_ref::<&str>() {
        if single.is_empty() {
            Vec::new()
        } else {
            vec![single.to_string()]
        }
    } else {
        Vec::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use zbus::zvariant::Value;

    use super::*;

    fn owned(value: Value<'_>) -> OwnedValue {
        value.try_to_owned().unwrap()
    }

    #[test]
    fn playback_state_parses_known_statuses() {
        assert_eq!(PlaybackState::from("Playing"), PlaybackState::Playing);
        assert_eq!(PlaybackState::from("Paused"), PlaybackState::Paused);
        assert_eq!(PlaybackState::from("Stopped"), PlaybackState::Stopped);
    }

    #[test]
    fn playback_state_degrades_to_stopped() {
        assert_eq!(PlaybackState::from("Buffering"), PlaybackState::Stopped);
        assert_eq!(PlaybackState::from(""), PlaybackState::Stopped);
    }

    #[test]
    fn metadata_parses_common_fields() {
        let mut raw = HashMap::new();
        raw.insert("xesam:title".to_string(), owned(Value::from("Song")));
        raw.insert(
            "xesam:artist".to_string(),
            owned(Value::from(vec!["Artist".to_string(), "Guest".to_string()])),
        );
        raw.insert("xesam:album".to_string(), owned(Value::from("Album")));
        raw.insert(
            "mpris:artUrl".to_string(),
            owned(Value::from("file:///tmp/cover.png")),
        );
        raw.insert(
            "mpris:length".to_string(),
            owned(Value::from(180_000_000_i64)),
        );

        let track = TrackMetadata::from(raw);
        assert_eq!(track.title.as_deref(), Some("Song"));
        assert_eq!(track.artist().as_deref(), Some("Artist, Guest"));
        assert_eq!(track.album.as_deref(), Some("Album"));
        assert_eq!(track.art_url.as_deref(), Some("file:///tmp/cover.png"));
        assert_eq!(track.length, Some(Duration::from_secs(180)));
    }

    #[test]
    fn metadata_treats_empty_strings_as_missing() {
        let mut raw = HashMap::new();
        raw.insert("xesam:title".to_string(), owned(Value::from("")));
        raw.insert("mpris:artUrl".to_string(), owned(Value::from("")));

        let track = TrackMetadata::from(raw);
        assert_eq!(track.title, None);
        assert_eq!(track.art_url, None);
        assert_eq!(track.artist(), None);
    }

    #[test]
    fn metadata_defaults_when_fields_are_absent() {
        let track = TrackMetadata::from(HashMap::new());
        assert_eq!(track, TrackMetadata::default());
    }
}
