use std::io::{self, BufRead};
use std::thread;

use tokio::sync::oneshot;

/// Non-blocking line reader over standard input.
///
/// Each read runs on its own detached thread so the blocking stdin
/// syscall never touches the async scheduler, and the result comes back
/// through a oneshot channel that can be raced against other futures.
///
/// At most one read is outstanding at a time: if the future returned by
/// [`read_line`](Self::read_line) is dropped mid-race (the usual case,
/// the player exited first), the in-flight read stays pending and the
/// next call resumes waiting on the same line instead of starting a
/// second reader.
pub struct CommandReader {
    pending: Option<oneshot::Receiver<io::Result<String>>>,
    closed: bool,
}

impl CommandReader {
    pub fn new() -> Self {
        Self {
            pending: None,
            closed: false,
        }
    }

    /// True once stdin has reached end of file; no further reads will
    /// ever complete.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Awaits one line, trimmed. Returns an error once stdin is closed;
    /// callers should stop issuing reads after that.
    pub async fn read_line(&mut self) -> io::Result<String> {
        if self.closed {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }
        let pending = self.pending.get_or_insert_with(spawn_read);
        let received = pending.await;
        self.pending = None;
        let result = match received {
            Ok(result) => result,
            Err(_closed) => Err(io::Error::other("input thread terminated")),
        };
        if result.is_err() {
            self.closed = true;
        }
        result.map(|line| line.trim().to_string())
    }
}

impl Default for CommandReader {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_read() -> oneshot::Receiver<io::Result<String>> {
    let (tx, rx) = oneshot::channel();
    thread::spawn(move || {
        let mut line = String::new();
        let result = match io::stdin().lock().read_line(&mut line) {
            Ok(0) => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed",
            )),
            Ok(_) => Ok(line),
            Err(err) => Err(err),
        };
        let _ = tx.send(result);
    });
    rx
}
