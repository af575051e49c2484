use blarchive::model::{Category, CategoryFilter, Direction, Platform};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, with the git hash for builds made from a checkout.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "blarchive", bin_name = "blarchive", version = get_version())]
#[command(about = "Photocard and playlist archive for Riize, NCT 127 and XngHan", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $BLARCHIVE_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Overview of every group (default)
    #[command(display_order = 1)]
    Home,

    /// List photocards
    #[command(alias = "cards", display_order = 2)]
    Gallery {
        /// Group to show, or "all"
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,

        /// Only cards carrying this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// List playlists
    #[command(display_order = 3)]
    Music {
        /// Group to show, or "all"
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
    },

    /// Official channels for each group
    #[command(display_order = 4)]
    Media,

    /// Add an image file as a new card
    #[command(display_order = 10)]
    Upload {
        file: PathBuf,

        /// Group for the card (falls back to the configured default)
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
    },

    /// Grab a frame from a camera source and add it as a new card
    #[command(display_order = 11)]
    Capture {
        /// Image file acting as the camera
        #[arg(short, long)]
        source: PathBuf,

        /// Group for the card (falls back to the configured default)
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
    },

    /// Delete a card
    #[command(alias = "rm", display_order = 12)]
    Delete {
        /// Card number from the gallery listing
        index: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Add a tag to a card
    #[command(display_order = 13)]
    Tag { index: String, tag: String },

    /// Remove a tag from a card
    #[command(display_order = 14)]
    Untag { index: String, tag: String },

    /// Suggest an Instagram caption for a group
    #[command(display_order = 15)]
    Caption { category: Category },

    /// Manage playlists
    #[command(subcommand, display_order = 20)]
    Playlist(PlaylistCommands),

    /// Get or set configuration
    #[command(display_order = 30)]
    Config {
        /// Configuration key (e.g., default-category)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Create the data directory and write the starting collections
    #[command(display_order = 31)]
    Init,
}

#[derive(Subcommand, Debug)]
pub enum PlaylistCommands {
    /// Add a playlist link
    Add {
        name: String,
        url: String,

        #[arg(short, long)]
        category: Category,

        /// Spotify, YouTube, "Apple Music" or Other
        #[arg(short, long, default_value = "YouTube")]
        platform: Platform,
    },

    /// Remove a playlist
    #[command(alias = "rm")]
    Delete {
        /// Playlist number from the music listing
        index: String,
    },

    /// Move a playlist one place up or down
    Move { index: String, direction: Direction },
}
