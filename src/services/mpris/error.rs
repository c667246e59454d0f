use super::PlayerId;

/// Errors that can occur during media operations.
#[derive(thiserror::Error, Debug)]
pub enum MediaError {
    /// No MPRIS player is currently available on the bus.
    #[error("no MPRIS player available")]
    NoPlayerFound,

    /// Player with the given ID was not found.
    #[error("player {0:?} not found")]
    PlayerNotFound(PlayerId),

    /// D-Bus communication error.
    #[error("D-Bus operation failed: {0}")]
    Dbus(#[from] zbus::Error),

    /// Player doesn't advertise support for the requested operation.
    #[error("player {player:?} doesn't support {operation}")]
    UnsupportedOperation {
        /// Player that doesn't support the operation.
        player: PlayerId,
        /// Name of the unsupported operation.
        operation: &'static str,
    },

    /// Failed to connect to the session bus.
    #[error("failed to initialize media service: {0}")]
    InitializationFailed(String),
}
