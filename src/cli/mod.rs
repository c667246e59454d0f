//! Debug command-line interface for the plugin's actions.
//!
//! Drives the same action layer a deck host would, against a button that
//! prints to the terminal, so every action can be exercised end to end
//! without a deck attached.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::{ActionSettings, ConfigError, ConfigPaths};
use crate::plugin::actions::{
    InfoAction, NextAction, PauseAction, PlayAction, PlayPauseAction, PreviousAction, StopAction,
    ThumbnailAction,
};
use crate::plugin::{ActionError, ButtonAction, DeckButton};
use crate::services::mpris::{
    MediaControl, MediaError, MprisService, PlaybackState, PlayerCapabilities,
};

/// Errors that can occur during CLI command execution.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Settings file could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Media service failure.
    #[error("Media service error: {0}")]
    Media(#[from] MediaError),

    /// An action failed.
    #[error("{0}")]
    Action(#[from] ActionError),
}

/// Drive the media-control actions from a terminal.
#[derive(Debug, Parser)]
#[command(
    name = "mediadeck",
    version,
    about = "MPRIS media-control actions for deck-button hosts"
)]
pub struct Cli {
    /// Restrict to players whose identity contains this string.
    #[arg(long, global = true)]
    pub player: Option<String>,

    /// Settings file to load instead of the default location.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands, one per plugin action plus diagnostics.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start playback on the active player.
    Play,

    /// Pause the active player.
    Pause,

    /// Toggle play/pause state of the active player.
    PlayPause,

    /// Stop the active player.
    Stop,

    /// Skip to the next track.
    Next,

    /// Go back to the previous track.
    Previous,

    /// Print the info label for the current track.
    Info {
        /// Separator between title and artist.
        #[arg(long)]
        separator: Option<String>,
    },

    /// Resolve the current track's artwork and print its local path.
    Art,

    /// List available players with their playback state.
    List,

    /// Show the active player, its capabilities, and the current track.
    Status,
}

/// Deck button stand-in that prints visual updates to stdout.
struct TerminalButton;

impl DeckButton for TerminalButton {
    fn set_label(&mut self, text: &str) {
        println!("{text}");
    }

    fn set_background(&mut self, image: &Path) {
        println!("{}", image.display());
    }
}

/// Execute the parsed command line.
///
/// # Errors
///
/// Returns `CliError` if settings cannot be loaded, the session bus is
/// unreachable, or the invoked action fails
pub async fn run(cli: Cli) -> Result<(), CliError> {
    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(player) = cli.player {
        settings.player = Some(player);
    }

    let service = MprisService::new().await?;

    match cli.command {
        Commands::Play => control(&PlayAction, &service, &settings).await,
        Commands::Pause => control(&PauseAction, &service, &settings).await,
        Commands::PlayPause => control(&PlayPauseAction, &service, &settings).await,
        Commands::Stop => control(&StopAction, &service, &settings).await,
        Commands::Next => control(&NextAction, &service, &settings).await,
        Commands::Previous => control(&PreviousAction, &service, &settings).await,
        Commands::Info { separator } => {
            if let Some(separator) = separator {
                settings.separator = separator;
            }
            press(&InfoAction, &service, &settings).await
        }
        Commands::Art => press(&ThumbnailAction, &service, &settings).await,
        Commands::List => list(&service, &settings).await,
        Commands::Status => status(&service, &settings).await,
    }
}

fn load_settings(path: Option<&Path>) -> Result<ActionSettings, CliError> {
    match path {
        Some(path) => Ok(ActionSettings::load(path)?),
        None => {
            let default_path = ConfigPaths::settings_file().map_err(ConfigError::Io)?;
            if default_path.exists() {
                Ok(ActionSettings::load(&default_path)?)
            } else {
                Ok(ActionSettings::default())
            }
        }
    }
}

/// Run a rendering action; its output is whatever the button prints.
async fn press(
    action: &dyn ButtonAction,
    service: &MprisService,
    settings: &ActionSettings,
) -> Result<(), CliError> {
    let mut button = TerminalButton;
    action.on_press(service, &mut button, settings).await?;
    Ok(())
}

/// Run a control action and confirm which player it reached.
async fn control(
    action: &dyn ButtonAction,
    service: &MprisService,
    settings: &ActionSettings,
) -> Result<(), CliError> {
    let player = service.find_active(&settings.selection()).await?;

    let mut button = TerminalButton;
    action.on_press(service, &mut button, settings).await?;

    println!("{} sent to: {}", action.metadata().name, player.identity);
    Ok(())
}

async fn list(service: &MprisService, settings: &ActionSettings) -> Result<(), CliError> {
    let players = service.list_players(&settings.selection()).await?;

    if players.is_empty() {
        println!("No media players found");
        return Ok(());
    }

    for (index, player) in players.iter().enumerate() {
        println!(
            "{}. {} {} ({})",
            index + 1,
            state_symbol(player.playback_state),
            player.identity,
            player.id
        );
    }

    Ok(())
}

async fn status(service: &MprisService, settings: &ActionSettings) -> Result<(), CliError> {
    let player = service.find_active(&settings.selection()).await?;
    let mut output = String::new();

    output.push_str(&format!("Player: {}\n", player.identity));
    output.push_str(&format!("Bus Name: {}\n", player.id.bus_name()));
    output.push_str(&format!(
        "Playback State: {} {:?}\n\n",
        state_symbol(player.playback_state),
        player.playback_state
    ));

    output.push_str("Capabilities:\n");
    let capability = |flag| player.capabilities.contains(flag);
    output.push_str(&format!(
        "  Control: {}\n",
        capability(PlayerCapabilities::CAN_CONTROL)
    ));
    output.push_str(&format!(
        "  Play: {}\n",
        capability(PlayerCapabilities::CAN_PLAY)
    ));
    output.push_str(&format!(
        "  Pause: {}\n",
        capability(PlayerCapabilities::CAN_PAUSE)
    ));
    output.push_str(&format!(
        "  Next Track: {}\n",
        capability(PlayerCapabilities::CAN_GO_NEXT)
    ));
    output.push_str(&format!(
        "  Previous Track: {}\n",
        capability(PlayerCapabilities::CAN_GO_PREVIOUS)
    ));

    let metadata = service.metadata(&player.id).await?;
    output.push_str("\nCurrent Track:\n");
    if let Some(title) = &metadata.title {
        output.push_str(&format!("  Title: {title}\n"));
    }
    if let Some(artist) = metadata.artist() {
        output.push_str(&format!("  Artist: {artist}\n"));
    }
    if let Some(album) = &metadata.album {
        output.push_str(&format!("  Album: {album}\n"));
    }
    if let Some(url) = &metadata.art_url {
        output.push_str(&format!("  Artwork URL: {url}\n"));
    }
    if metadata.title.is_none() && metadata.artists.is_empty() && metadata.album.is_none() {
        output.push_str("  No track currently loaded\n");
    }

    print!("{output}");
    Ok(())
}

fn state_symbol(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Playing => "▶",
        PlaybackState::Paused => "⏸",
        PlaybackState::Stopped => "⏹",
    }
}
