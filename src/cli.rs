use clap::{Parser, Subcommand};
use std::path::PathBuf;

use gallery_common::ImageId;

#[derive(Parser)]
#[command(name = "gallery")]
#[command(author, version, about = "Multi-user image gallery backed by SQLite")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file (overrides the config file)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive menu
    Shell,

    /// Register a new user
    Register {
        username: String,
        password: String,
    },

    /// Check a username and password
    Login {
        username: String,
        password: String,
    },

    /// Upload an image file as the given user
    Upload {
        /// Username to upload as
        #[arg(short, long)]
        username: String,

        /// Password of that user
        #[arg(short, long)]
        password: String,

        /// Image file to upload
        #[arg(required = true)]
        file: PathBuf,

        /// Free-text description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// List metadata of all images
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save an image's stored bytes to a file
    Download {
        /// Image ID
        id: ImageId,

        /// Where to write the image
        output: PathBuf,
    },
}
