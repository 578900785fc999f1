use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dirtools")]
#[command(about = "Small filesystem helpers for asset trees", long_about = None)]
pub struct Cli {
    /// Log more detail (-v debug, -vv trace); TRACING_LEVEL takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Count files in a directory and all of its subdirectories
    Count { dir: PathBuf },
    /// List subdirectories that are not in the exclusion list
    Invert {
        parent: PathBuf,
        /// Subdirectory name to leave out (repeatable)
        #[arg(short, long = "exclude")]
        excluded: Vec<String>,
        /// Regex the name must match from its first character
        #[arg(short, long)]
        pattern: Option<String>,
    },
    /// Convert a forward-slash path to the native format
    Convert { path: String },
    /// Resolve paths through any symlinks
    Realpath {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// List every file below the given directories
    List {
        #[arg(required = true)]
        dirs: Vec<PathBuf>,
    },
    /// Group the files directly inside a directory by size
    Sizes { dir: PathBuf },
    /// Find the nearest ancestor containing a marker file
    Ancestor {
        path: PathBuf,
        /// Marker file name (repeatable); defaults to the configured markers
        #[arg(short, long = "marker")]
        markers: Vec<String>,
        /// Levels to inspect; 0 searches up to the root
        #[arg(short, long)]
        depth: Option<usize>,
    },
    /// Make a directory read-only
    Lock { dir: PathBuf },
    /// Give the owner write access to a directory again
    Unlock { dir: PathBuf },
    /// Check whether a symlink points into a directory
    Contains {
        link: PathBuf,
        dir: PathBuf,
        /// Only accept targets directly inside the directory
        #[arg(long)]
        exact: bool,
    },
    /// Print configuration values
    PrintConfig,
}
