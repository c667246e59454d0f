use zbus::Connection;
use zbus::proxy::CacheProperties;

use super::error::MediaError;
use super::proxy::MediaPlayer2PlayerProxy;
use super::types::{PlayerId, TrackMetadata};

/// Build a fresh, uncached player proxy for one round-trip.
///
/// Each invocation observes the player's current state; nothing is reused
/// across calls.
pub(crate) async fn player_proxy(
    connection: &Connection,
    player: &PlayerId,
) -> Result<MediaPlayer2PlayerProxy<'static>, MediaError> {
    let proxy = MediaPlayer2PlayerProxy::builder(connection)
        .destination(player.bus_name().to_string())?
        .cache_properties(CacheProperties::No)
        .build()
        .await?;
    Ok(proxy)
}

/// Start playback.
///
/// # Errors
///
/// Returns error if the D-Bus operation fails
pub(crate) async fn play(connection: &Connection, player: &PlayerId) -> Result<(), MediaError> {
    let proxy = player_proxy(connection, player).await?;
    proxy.play().await.map_err(MediaError::Dbus)
}

/// Pause playback.
///
/// # Errors
///
/// Returns error if the D-Bus operation fails
pub(crate) async fn pause(connection: &Connection, player: &PlayerId) -> Result<(), MediaError> {
    let proxy = player_proxy(connection, player).await?;
    proxy.pause().await.map_err(MediaError::Dbus)
}

/// Toggle play/pause state.
///
/// # Errors
///
/// Returns error if the D-Bus operation fails
pub(crate) async fn play_pause(
    connection: &Connection,
    player: &PlayerId,
) -> Result<(), MediaError> {
    let proxy = player_proxy(connection, player).await?;
    proxy.play_pause().await.map_err(MediaError::Dbus)
}

/// Stop playback.
///
/// # Errors
///
/// Returns error if the D-Bus operation fails
pub(crate) async fn stop(connection: &Connection, player: &PlayerId) -> Result<(), MediaError> {
    let proxy = player_proxy(connection, player).await?;
    proxy.stop().await.map_err(MediaError::Dbus)
}

/// Skip to next track.
///
/// # Errors
///
/// Returns error if the D-Bus operation fails
pub(crate) async fn next(connection: &Connection, player: &PlayerId) -> Result<(), MediaError> {
    let proxy = player_proxy(connection, player).await?;
    proxy.next().await.map_err(MediaError::Dbus)
}

/// Go to previous track.
///
/// # Errors
///
/// Returns error if the D-Bus operation fails
pub(crate) async fn previous(connection: &Connection, player: &PlayerId) -> Result<(), MediaError> {
    let proxy = player_proxy(connection, player).await?;
    proxy.previous().await.map_err(MediaError::Dbus)
}

/// Read current track metadata.
///
/// # Errors
///
/// Returns error if the D-Bus property read fails
pub(crate) async fn metadata(
    connection: &Connection,
    player: &PlayerId,
) -> Result<TrackMetadata, MediaError> {
    let proxy = player_proxy(connection, player).await?;
    proxy
        .metadata()
        .await
        .map(TrackMetadata::from)
        .map_err(MediaError::Dbus)
}
