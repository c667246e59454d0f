//! One module per media-control action, mirroring the host's action list.

mod info;
mod next;
mod pause;
mod play;
mod play_pause;
mod previous;
mod stop;
mod thumbnail;

pub use info::InfoAction;
pub use next::NextAction;
pub use pause::PauseAction;
pub use play::PlayAction;
pub use play_pause::PlayPauseAction;
pub use previous::PreviousAction;
pub use stop::StopAction;
pub use thumbnail::ThumbnailAction;
