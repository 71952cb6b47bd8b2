//! # Playback engine
//!
//! The interactive core of the player: it turns a resolved track queue
//! into a supervised playback run. For each track the session downloads
//! the audio into the cache, launches the configured external player and
//! then races the player's exit against one line of user input, looping
//! until the track ends, the user skips it, or the user ends the run.
//!
//! Concurrency model: a single cooperative scheduler. Exactly two things
//! can suspend a session: waiting for the player process to exit and
//! waiting for a line of input (read on a background thread so the
//! blocking syscall never stalls the runtime). The race is a biased
//! `select!`: when both sides are ready the player's exit wins and the
//! input stays pending for the next iteration. Downloads run to
//! completion before the race starts, so no commands are accepted while
//! a track is downloading.

mod command;
mod input;
mod process;
mod queue;
mod session;

pub use command::PlayerCommand;
pub use input::CommandReader;
pub use process::{PlayerArgv, PlayerProcess, build_argv};
pub use queue::{Window, list_tracks, run_loop, window_state};
pub use session::{PlayerError, SessionOutcome, play_track};
