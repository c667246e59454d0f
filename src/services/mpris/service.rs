use async_trait::async_trait;
use tracing::debug;
use zbus::Connection;

use super::error::MediaError;
use super::types::{PlayerId, PlayerSelection, PlayerSnapshot, TrackMetadata};
use super::{control, discovery};

/// Media-control collaborator used by button actions.
///
/// The session bus is external global state owned by the desktop
/// environment, not by this plugin. Actions depend on this trait rather
/// than on a concrete connection so tests can substitute a fake bus.
#[async_trait]
pub trait MediaControl: Send + Sync {
    /// Resolve the player an action should target.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::NoPlayerFound` if no player matches the selection
    async fn find_active(&self, selection: &PlayerSelection)
    -> Result<PlayerSnapshot, MediaError>;

    /// Snapshot every player the selection allows, in bus order.
    ///
    /// # Errors
    ///
    /// Returns error if player enumeration fails
    async fn list_players(
        &self,
        selection: &PlayerSelection,
    ) -> Result<Vec<PlayerSnapshot>, MediaError>;

    /// Start playback.
    ///
    /// # Errors
    ///
    /// Returns error if the D-Bus operation fails
    async fn play(&self, player: &PlayerId) -> Result<(), MediaError>;

    /// Pause playback.
    ///
    /// # Errors
    ///
    /// Returns error if the D-Bus operation fails
    async fn pause(&self, player: &PlayerId) -> Result<(), MediaError>;

    /// Toggle play/pause state.
    ///
    /// # Errors
    ///
    /// Returns error if the D-Bus operation fails
    async fn play_pause(&self, player: &PlayerId) -> Result<(), MediaError>;

    /// Stop playback.
    ///
    /// # Errors
    ///
    /// Returns error if the D-Bus operation fails
    async fn stop(&self, player: &PlayerId) -> Result<(), MediaError>;

    /// Skip to next track.
    ///
    /// # Errors
    ///
    /// Returns error if the D-Bus operation fails
    async fn next(&self, player: &PlayerId) -> Result<(), MediaError>;

    /// Go to previous track.
    ///
    /// # Errors
    ///
    /// Returns error if the D-Bus operation fails
    async fn previous(&self, player: &PlayerId) -> Result<(), MediaError>;

    /// Read current track metadata.
    ///
    /// # Errors
    ///
    /// Returns error if the D-Bus property read fails
    async fn metadata(&self, player: &PlayerId) -> Result<TrackMetadata, MediaError>;
}

/// Session-bus backed [`MediaControl`] implementation.
///
/// Holds nothing but the connection; player state is resolved fresh on
/// every call, so the service can be shared freely between actions.
#[derive(Debug, Clone)]
pub struct MprisService {
    connection: Connection,
}

impl MprisService {
    /// Connect to the session bus.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::InitializationFailed` if the D-Bus connection fails
    pub async fn new() -> Result<Self, MediaError> {
        let connection = Connection::session().await.map_err(|e| {
            MediaError::InitializationFailed(format!("D-Bus connection failed: {e}"))
        })?;
        debug!("Connected to session bus for MPRIS control");

        Ok(Self { connection })
    }

    /// Wrap an existing session-bus connection.
    ///
    /// Use this when the host runtime already manages a connection.
    pub fn with_connection(connection: Connection) -> Self {
        Self { connection }
    }

    /// Player identities for settings UIs, optionally deduplicated.
    ///
    /// Several instances of the same application advertise the same
    /// `Identity`; hosts listing players for the user usually want each
    /// name once.
    ///
    /// # Errors
    ///
    /// Returns error if player enumeration fails
    pub async fn player_identities(
        &self,
        remove_duplicates: bool,
    ) -> Result<Vec<String>, MediaError> {
        let players = self.list_players(&PlayerSelection::default()).await?;
        Ok(identities(players, remove_duplicates))
    }
}

/// Collect player identities in bus order, optionally skipping repeats.
fn identities(players: Vec<PlayerSnapshot>, remove_duplicates: bool) -> Vec<String> {
    let mut names = Vec::with_capacity(players.len());
    for player in players {
        if remove_duplicates && names.contains(&player.identity) {
            continue;
        }
        names.push(player.identity);
    }
    names
}

#[async_trait]
impl MediaControl for MprisService {
    async fn find_active(
        &self,
        selection: &PlayerSelection,
    ) -> Result<PlayerSnapshot, MediaError> {
        discovery::find_active(&self.connection, selection).await
    }

    async fn list_players(
        &self,
        selection: &PlayerSelection,
    ) -> Result<Vec<PlayerSnapshot>, MediaError> {
        discovery::candidates(&self.connection, selection).await
    }

    async fn play(&self, player: &PlayerId) -> Result<(), MediaError> {
        control::play(&self.connection, player).await
    }

    async fn pause(&self, player: &PlayerId) -> Result<(), MediaError> {
        control::pause(&self.connection, player).await
    }

    async fn play_pause(&self, player: &PlayerId) -> Result<(), MediaError> {
        control::play_pause(&self.connection, player).await
    }

    async fn stop(&self, player: &PlayerId) -> Result<(), MediaError> {
        control::stop(&self.connection, player).await
    }

    async fn next(&self, player: &PlayerId) -> Result<(), MediaError> {
        control::next(&self.connection, player).await
    }

    async fn previous(&self, player: &PlayerId) -> Result<(), MediaError> {
        control::previous(&self.connection, player).await
    }

    async fn metadata(&self, player: &PlayerId) -> Result<TrackMetadata, MediaError> {
        control::metadata(&self.connection, player).await
    }
}
