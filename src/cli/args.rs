//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Profile photo ingest, default avatars and the local profile store
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true, disable_version_flag = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: profilekit.toml, searched upward)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Local store path, overrides `[store] path`
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub store: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// Print version
    #[arg(long, action = clap::ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate the default avatar for a name
    #[command(visible_alias = "a")]
    Avatar {
        /// Display name, e.g. "Jane Doe"
        name: String,

        /// Side length in pixels
        #[arg(short, long)]
        size: Option<u32>,

        /// Output the raw SVG markup instead of a data URI
        #[arg(long)]
        svg: bool,

        /// Write to file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Validate, resize and encode a profile photo
    #[command(visible_alias = "i")]
    Ingest {
        /// Image file to process
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Store the result as this user's profile picture
        #[arg(short, long)]
        user: Option<String>,

        /// Declared MIME type (default: guessed from the extension)
        #[arg(long)]
        mime: Option<String>,

        /// Write the data URI to file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,

        #[command(flatten)]
        flags: IngestFlags,
    },

    /// Seed default avatars for every user in a JSON file
    #[command(visible_alias = "s")]
    Seed {
        /// JSON array of `{ "name": ... }` records
        #[arg(value_hint = clap::ValueHint::FilePath)]
        users: PathBuf,

        /// Side length in pixels
        #[arg(short, long)]
        size: Option<u32>,
    },

    /// Manage stored profile pictures and project images
    Images {
        #[command(subcommand)]
        action: ImagesAction,
    },

    /// Submit, show and delete profiles
    #[command(visible_alias = "p")]
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

/// Ingest overrides shared by every command that processes an image.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct IngestFlags {
    /// Keep the original bytes and MIME type
    #[arg(long)]
    pub no_compress: bool,

    /// Maximum output width in pixels
    #[arg(long)]
    pub max_width: Option<u32>,

    /// Maximum output height in pixels
    #[arg(long)]
    pub max_height: Option<u32>,

    /// Lossy encoder quality between 0.0 and 1.0
    #[arg(short, long)]
    pub quality: Option<f32>,

    /// Largest accepted input in megabytes
    #[arg(long)]
    pub max_size_mb: Option<f64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ImagesAction {
    /// List stored images
    #[command(visible_alias = "ls")]
    List,

    /// Remove a user's profile picture
    Remove {
        user: String,
    },

    /// Remove all images of a user
    Clear {
        user: String,
    },

    /// Process an image and add it to a user's project images
    AddProject {
        user: String,

        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Image id (default: derived from the content)
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        flags: IngestFlags,
    },

    /// Remove a project image by id
    RemoveProject {
        user: String,
        id: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProfileAction {
    /// Validate a signup form (JSON) and store the profile
    Submit {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        form: PathBuf,

        /// Edit an existing profile (password not required)
        #[arg(short, long)]
        edit: bool,

        /// Key a profile picture was uploaded under before the name was known
        #[arg(long)]
        image_key: Option<String>,
    },

    /// Print a stored profile as JSON (default: current user)
    Show {
        /// Full name or username
        name: Option<String>,
    },

    /// Delete a profile and its images
    Delete {
        /// Full name or username
        name: String,
    },

    /// Print the current user
    Whoami,

    /// Clear the current user
    Logout,
}
