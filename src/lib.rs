//! Yandex Music Terminal Player Library
//!
//! This library implements a command-line client for the Yandex Music API.
//! It resolves a user-selected track source (a playlist, liked tracks, a
//! search query, an auto-generated personal playlist or an explicit id list)
//! into an ordered track queue, then downloads each track into a local audio
//! cache and plays it through an external player process while accepting
//! single-key commands on standard input.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations, one per playback mode
//! - `config` - Session configuration, cache folder and token resolution
//! - `management` - On-disk state: the API token store and the audio cache
//! - `player` - Playback engine: process control, input race, session loop
//! - `types` - Data structures for API payloads
//! - `utils` - Path slugification, duration formatting and other helpers
//! - `yandex` - Yandex Music Web API client

pub mod cli;
pub mod config;
pub mod management;
pub mod player;
pub mod types;
pub mod utils;
pub mod yandex;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object with Send + Sync bounds so it
/// can cross `.await` points freely. Concrete error enums are preferred in
/// the lower layers; this alias is for the outer CLI edges.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`. Used for general status
/// updates ("Playing liked tracks…", startup greetings and the like).
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Accepts the same arguments as `println!`. Used to confirm completed
/// operations (a finished download, a saved token).
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Accepts the same arguments as `println!`, then terminates with exit
/// code 1. Reserved for unrecoverable failures: rejected credentials, a
/// missing config file, a player executable that cannot be launched.
/// Per-track failures use `warning!` instead so the run can continue.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Accepts the same arguments as `println!`. Used for recoverable issues:
/// a track that failed to download, a failed status report, a truncated
/// cache file being overwritten.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
