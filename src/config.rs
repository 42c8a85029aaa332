//! Command-line configuration and data path resolution.

use clap::Parser;
use log::{debug, LevelFilter};
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};

/// Directory shipped with the program that relative data paths resolve against.
/// Worked out once at runtime from the executable's location.
pub static DATA_BASE_DIR: Lazy<PathBuf> = Lazy::new(|| {
    let exe = std::env::current_exe().ok();
    let exe_dir = exe.as_deref().and_then(Path::parent);
    let dir = base_dir(exe_dir, Path::new(env!("CARGO_MANIFEST_DIR")));
    debug!("Data base directory: {}", dir.display());
    dir
});

/// Pick the data base directory:
/// 1. the executable's directory when it carries a `data/` folder (installed copy);
/// 2. the package directory when it exists on this machine (`cargo run`, `cargo test`);
/// 3. the executable's directory;
/// 4. the package directory if the executable location is unknown.
pub fn base_dir(exe_dir: Option<&Path>, manifest_dir: &Path) -> PathBuf {
    match exe_dir {
        Some(dir) if dir.join(DATA_SUBDIR).is_dir() => dir.to_path_buf(),
        Some(_) if manifest_dir.is_dir() => manifest_dir.to_path_buf(),
        Some(dir) => dir.to_path_buf(),
        None => manifest_dir.to_path_buf(),
    }
}

const DATA_SUBDIR: &str = "data";

pub const DEFAULT_DATA_FILE: &str = "data/disneyland_reviews.csv";

#[derive(Debug, Parser)]
#[command(name = "park-reviews", version, about = "Interactive explorer for theme-park visitor reviews")]
pub struct Cli {
    /// Review dataset (CSV). Relative paths resolve against the program directory.
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    /// Directory where `summary.<ext>` exports are written.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

pub fn resolve_data_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        DATA_BASE_DIR.join(path)
    }
}
