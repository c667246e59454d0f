//! mediadeck - MPRIS media-control actions for deck-button hosts.
//!
//! mediadeck is a thin adapter between a deck-button host application and
//! whatever media player currently exposes the MPRIS D-Bus interface on
//! the user's desktop. Each button press resolves the active player fresh,
//! issues a single control call or property read, and updates the pressed
//! button's label or background. The main pieces:
//!
//! - Stateless button actions with a uniform silent-no-op failure policy
//! - Player discovery with a configurable active-player selection policy
//! - Track info and artwork rendering onto host-owned buttons
//! - A debug CLI that drives the same actions from a terminal
//!
//! # Quick start
//!
//! ```rust,no_run
//! use mediadeck::config::ActionSettings;
//! use mediadeck::plugin::actions::PlayPauseAction;
//! use mediadeck::plugin::{DeckButton, dispatch};
//! use mediadeck::services::mpris::MprisService;
//!
//! # async fn press(button: &mut dyn DeckButton) -> Result<(), Box<dyn std::error::Error>> {
//! let media = MprisService::new().await?;
//! dispatch(&PlayPauseAction, &media, button, &ActionSettings::default()).await;
//! # Ok(())
//! # }
//! ```

/// Command-line interface for driving actions without a deck host.
pub mod cli;

/// Settings types and file-system paths.
pub mod config;

/// Deck-plugin layer: actions, buttons, artwork.
pub mod plugin;

/// Session-bus services backing the actions.
pub mod services;

/// Logging initialization.
pub mod tracing_config;
