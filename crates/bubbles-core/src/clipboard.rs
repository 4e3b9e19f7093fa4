//! Clipboard writes: native clipboard first, platform copy command second.

use std::fmt;
use std::io::{self, Write};
use std::process::{Command, Stdio};
#[cfg(any(target_os = "linux", test))]
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
#[cfg(target_os = "linux")]
use std::thread;
#[cfg(any(target_os = "linux", test))]
use std::time::Duration;

#[derive(Debug)]
pub enum ClipboardError {
    /// Neither the native clipboard nor any copy command could be used.
    Unavailable { native: String, fallback: String },
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Unavailable { native, fallback } => {
                write!(f, "clipboard unavailable ({native}; fallback: {fallback})")
            }
        }
    }
}

impl std::error::Error for ClipboardError {}

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The user's system clipboard.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let native = match native_copy(text) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };
        tracing::debug!(error = %native, "native clipboard failed, trying copy command");
        match command_copy(text) {
            Ok(()) => Ok(()),
            Err(fallback) => {
                let err = ClipboardError::Unavailable {
                    native,
                    fallback: fallback.to_string(),
                };
                tracing::warn!(error = %err, "clipboard write failed");
                Err(err)
            }
        }
    }
}

/// How long a Linux clipboard write may take to report an error before it is
/// treated as handed off.
#[cfg(target_os = "linux")]
const NATIVE_HANDOFF: Duration = Duration::from_millis(200);

// X11/Wayland keep the owner alive until a clipboard manager or another app
// takes the selection, so the write runs on its own thread.
#[cfg(target_os = "linux")]
fn native_copy(text: &str) -> Result<(), String> {
    let (tx, rx) = mpsc::channel();
    let owned = text.to_string();
    thread::spawn(move || {
        use arboard::SetExtLinux;
        let result = match arboard::Clipboard::new() {
            Ok(mut clipboard) => clipboard.set().wait().text(owned).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        if let Err(e) = &result {
            tracing::debug!(error = %e, "native clipboard thread failed");
        }
        let _ = tx.send(result);
    });
    await_handoff(&rx, NATIVE_HANDOFF)
}

#[cfg(not(target_os = "linux"))]
fn native_copy(text: &str) -> Result<(), String> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| e.to_string())?;
    clipboard.set_text(text).map_err(|e| e.to_string())
}

/// Result of a clipboard thread. Still running after `timeout` means it owns
/// the selection and is serving it.
#[cfg(any(target_os = "linux", test))]
fn await_handoff(rx: &Receiver<Result<(), String>>, timeout: Duration) -> Result<(), String> {
    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => Ok(()),
        Err(RecvTimeoutError::Disconnected) => Err("clipboard thread exited".to_string()),
    }
}

#[cfg(target_os = "macos")]
const COPY_COMMANDS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const COPY_COMMANDS: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const COPY_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

fn command_copy(text: &str) -> io::Result<()> {
    let mut last_err = io::Error::new(io::ErrorKind::NotFound, "no copy command available");
    for (program, args) in COPY_COMMANDS {
        match pipe_to(program, args, text) {
            Ok(()) => return Ok(()),
            Err(e) => last_err = io::Error::new(e.kind(), format!("{program}: {e}")),
        }
    }
    Err(last_err)
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("exited with {status}")))
    }
}

/// Records every write; used by tests of the TUI and CLI.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Vec<String>,
    pub fail: bool,
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Unavailable {
                native: "disabled".to_string(),
                fallback: "disabled".to_string(),
            });
        }
        self.contents.push(text.to_string());
        Ok(())
    }
}
