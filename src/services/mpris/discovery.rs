use tracing::warn;
use zbus::Connection;
use zbus::fdo::DBusProxy;
use zbus::proxy::CacheProperties;

use super::error::MediaError;
use super::proxy::{MediaPlayer2PlayerProxy, MediaPlayer2Proxy};
use super::types::{
    PlaybackState, PlayerCapabilities, PlayerId, PlayerSelection, PlayerSnapshot, SelectionPolicy,
};

/// MPRIS service name prefix for D-Bus.
pub(crate) const MPRIS_BUS_PREFIX: &str = "org.mpris.MediaPlayer2.";

/// Enumerate the bus names of available MPRIS players, in bus order.
///
/// # Errors
///
/// Returns error if the D-Bus proxy cannot be created or `ListNames` fails
pub(crate) async fn player_bus_names(
    connection: &Connection,
    ignored_patterns: &[String],
) -> Result<Vec<String>, MediaError> {
    let dbus_proxy = DBusProxy::new(connection)
        .await
        .map_err(|e| MediaError::InitializationFailed(format!("DBus proxy failed: {e}")))?;

    let names = dbus_proxy
        .list_names()
        .await
        .map_err(|e| MediaError::Dbus(e.into()))?;

    Ok(names
        .into_iter()
        .filter(|name| {
            name.starts_with(MPRIS_BUS_PREFIX) && !should_ignore(name, ignored_patterns)
        })
        .map(|name| name.to_string())
        .collect())
}

/// Resolve a fresh snapshot of a single player.
///
/// Property reads go through uncached proxies so every invocation observes
/// the player's current state. Individual capability reads that fail are
/// treated as the capability being absent.
///
/// # Errors
///
/// Returns error if the player's proxies cannot be built
pub(crate) async fn snapshot(
    connection: &Connection,
    id: PlayerId,
) -> Result<PlayerSnapshot, MediaError> {
    let base = MediaPlayer2Proxy::builder(connection)
        .destination(id.bus_name().to_string())?
        .cache_properties(CacheProperties::No)
        .build()
        .await?;
    let player = MediaPlayer2PlayerProxy::builder(connection)
        .destination(id.bus_name().to_string())?
        .cache_properties(CacheProperties::No)
        .build()
        .await?;

    let identity = match base.identity().await {
        Ok(identity) => identity,
        // Some players never implement the base interface properly; the
        // trailing bus-name segment is still a usable display name.
        Err(_) => id
            .bus_name()
            .trim_start_matches(MPRIS_BUS_PREFIX)
            .to_string(),
    };

    let playback_state = player
        .playback_status()
        .await
        .map(|status| PlaybackState::from(status.as_str()))
        .unwrap_or(PlaybackState::Stopped);

    let mut capabilities = PlayerCapabilities::empty();
    capabilities.set(
        PlayerCapabilities::CAN_CONTROL,
        player.can_control().await.unwrap_or(false),
    );
    capabilities.set(
        PlayerCapabilities::CAN_PLAY,
        player.can_play().await.unwrap_or(false),
    );
    capabilities.set(
        PlayerCapabilities::CAN_PAUSE,
        player.can_pause().await.unwrap_or(false),
    );
    capabilities.set(
        PlayerCapabilities::CAN_GO_NEXT,
        player.can_go_next().await.unwrap_or(false),
    );
    capabilities.set(
        PlayerCapabilities::CAN_GO_PREVIOUS,
        player.can_go_previous().await.unwrap_or(false),
    );

    Ok(PlayerSnapshot {
        id,
        identity,
        playback_state,
        capabilities,
    })
}

/// Snapshot every player the selection allows, in bus order.
///
/// Players that vanish between enumeration and snapshotting are skipped.
///
/// # Errors
///
/// Returns error if bus-name enumeration fails
pub(crate) async fn candidates(
    connection: &Connection,
    selection: &PlayerSelection,
) -> Result<Vec<PlayerSnapshot>, MediaError> {
    let names = player_bus_names(connection, &selection.ignored).await?;
    let mut snapshots = Vec::with_capacity(names.len());
    for name in names {
        match snapshot(connection, PlayerId::from_bus_name(&name)).await {
            Ok(snap) => snapshots.push(snap),
            Err(e) => warn!("Skipping player {}: {}", name, e),
        }
    }

    if let Some(filter) = selection.player.as_deref() {
        let needle = filter.to_lowercase();
        snapshots.retain(|snap| snap.identity.to_lowercase().contains(&needle));
    }

    Ok(snapshots)
}

/// Find the player an action should target.
///
/// # Errors
///
/// Returns `MediaError::NoPlayerFound` if no player matches the selection
pub(crate) async fn find_active(
    connection: &Connection,
    selection: &PlayerSelection,
) -> Result<PlayerSnapshot, MediaError> {
    let snapshots = candidates(connection, selection).await?;
    select_active(snapshots, selection.policy).ok_or(MediaError::NoPlayerFound)
}

/// Pick the active player from a candidate list.
///
/// With `PreferPlaying`, a playing player wins over a paused one, which wins
/// over anything else; bus order breaks ties within a rank.
pub(crate) fn select_active(
    mut candidates: Vec<PlayerSnapshot>,
    policy: SelectionPolicy,
) -> Option<PlayerSnapshot> {
    if candidates.is_empty() {
        return None;
    }

    let index = match policy {
        SelectionPolicy::FirstAvailable => 0,
        SelectionPolicy::PreferPlaying => candidates
            .iter()
            .position(|snap| snap.playback_state == PlaybackState::Playing)
            .or_else(|| {
                candidates
                    .iter()
                    .position(|snap| snap.playback_state == PlaybackState::Paused)
            })
            .unwrap_or(0),
    };

    Some(candidates.remove(index))
}

fn should_ignore(bus_name: &str, ignored_patterns: &[String]) -> bool {
    ignored_patterns
        .iter()
        .any(|pattern| bus_name.contains(pattern))
}
