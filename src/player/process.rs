use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, Command};

use crate::config::PLAYER_PATH_SLOT;

/// Supervised external audio-player process playing one local file.
pub struct PlayerProcess {
    child: Child,
}

/// Resolved launch plan: program, final argument vector and an optional
/// working directory. Split out of [`PlayerProcess::spawn`] so template
/// substitution stays testable without spawning anything.
#[derive(Debug, PartialEq, Eq)]
pub struct PlayerArgv {
    pub program: String,
    pub args: Vec<String>,
    pub workdir: Option<PathBuf>,
}

/// Substitutes the `{}` slot of the command template with the audio file
/// path (appending the path when the template has no slot). With
/// `relative_to_parent` the player is launched from the file's directory
/// with a bare file name, which keeps the effective path short on
/// platforms with a MAX_PATH limit.
pub fn build_argv(
    template: &[String],
    file_path: &Path,
    relative_to_parent: bool,
) -> io::Result<PlayerArgv> {
    let (program, rest) = template.split_first().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "player command is empty")
    })?;

    let mut workdir = None;
    let target = match (relative_to_parent, file_path.parent(), file_path.file_name()) {
        (true, Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            workdir = Some(parent.to_path_buf());
            PathBuf::from(name)
        }
        _ => file_path.to_path_buf(),
    };
    let target = target.to_string_lossy().into_owned();

    let mut args: Vec<String> = Vec::with_capacity(rest.len() + 1);
    let mut substituted = false;
    for arg in rest {
        if arg == PLAYER_PATH_SLOT {
            args.push(target.clone());
            substituted = true;
        } else {
            args.push(arg.clone());
        }
    }
    if !substituted {
        args.push(target);
    }

    Ok(PlayerArgv {
        program: program.clone(),
        args,
        workdir,
    })
}

impl PlayerProcess {
    /// Launches the player against `file_path` with its error stream
    /// discarded. Stdin is detached too: command input belongs to this
    /// process, not the player.
    pub fn spawn(
        template: &[String],
        file_path: &Path,
        relative_to_parent: bool,
    ) -> io::Result<Self> {
        let argv = build_argv(template, file_path, relative_to_parent)?;
        let mut command = Command::new(&argv.program);
        command
            .args(&argv.args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        if let Some(dir) = &argv.workdir {
            command.current_dir(dir);
        }
        Ok(Self {
            child: command.spawn()?,
        })
    }

    /// Completion signal; resolves with the exit status once the player
    /// terminates.
    pub async fn wait(&mut self) -> io::Result<ExitStatus> {
        self.child.wait().await
    }

    /// Guaranteed cleanup: reaps the player if it already exited,
    /// otherwise kills it and awaits the exit so no zombie is left
    /// behind. Returns the status and whether the exit was forced.
    pub async fn ensure_stopped(&mut self) -> io::Result<(ExitStatus, bool)> {
        if let Some(status) = self.child.try_wait()? {
            return Ok((status, false));
        }
        self.child.start_kill()?;
        let status = self.child.wait().await?;
        Ok((status, true))
    }
}
