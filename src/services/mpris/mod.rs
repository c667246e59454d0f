/// Playback control calls against a single player.
mod control;
/// Player discovery and active-player selection.
mod discovery;
/// Media player error types.
mod error;
/// D-Bus proxy trait definitions.
mod proxy;
/// Domain service and collaborator trait.
mod service;
/// Player types and capabilities.
mod types;

pub use error::*;
pub use proxy::*;
pub use service::*;
pub use types::*;
