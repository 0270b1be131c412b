//! Button sources.
//!
//! A [`ButtonSource`] produces at most one [`ButtonFrame`] per simulation
//! frame. `Ok(None)` means "no new data": the held states from the previous
//! frame stay in effect.
//!
//! - [`LineButtonSource`] reads comma-separated flag lines (`1,0,0,1,0`) from a
//!   serial device file or stdin on a background thread and forwards them over
//!   a `crossbeam-channel`. Each poll waits at most `timeout` for data, then
//!   drains whatever queued up and keeps only the newest frame.
//! - [`KeyboardButtonSource`] samples five bound keys from a [`KeyboardPort`].
//! - [`ScriptedButtonSource`] replays a queue of frames.
//!
//! The [`ButtonInput`] resource owns the active source.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use std::time::Duration;

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use log::{debug, info, warn};
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::resources::input::{BUTTON_COUNT, ButtonFrame};

/// Errors raised by button sources.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("expected {expected} fields, got {got} in line '{line}'")]
    TooFewFields {
        expected: usize,
        got: usize,
        line: String,
    },
    #[error("button source disconnected")]
    Disconnected,
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("read error: {0}")]
    Io(#[from] io::Error),
}

/// Parse one line of comma-separated button flags.
///
/// A field is "pressed" only if it is exactly `1` after trimming. Fields past
/// the fifth are ignored.
pub fn parse_button_line(line: &str) -> Result<ButtonFrame, InputError> {
    let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    if fields.len() < BUTTON_COUNT {
        return Err(InputError::TooFewFields {
            expected: BUTTON_COUNT,
            got: fields.len(),
            line: line.trim().to_string(),
        });
    }
    let mut frame = [false; BUTTON_COUNT];
    for (held, field) in frame.iter_mut().zip(fields) {
        *held = field == "1";
    }
    Ok(frame)
}

/// Anything that can report the five logical buttons once per frame.
pub trait ButtonSource: Send + Sync {
    fn poll(&mut self) -> Result<Option<ButtonFrame>, InputError>;

    /// Short label for logs.
    fn describe(&self) -> String;
}

/// Spawn a thread that forwards every line of `reader` to `tx`.
///
/// The thread ends at EOF or when the receiving side is dropped.
fn spawn_line_reader<R>(reader: R, tx: Sender<io::Result<String>>, label: String) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    std::thread::spawn(move || {
        debug!("[input] reader thread for {} starting", label);
        for line in reader.lines() {
            let failed = line.is_err();
            if tx.send(line).is_err() {
                break;
            }
            if failed {
                // Avoid spinning on a device that keeps failing.
                std::thread::sleep(Duration::from_millis(100));
            }
        }
        debug!("[input] reader thread for {} finished", label);
    })
}

/// Line-oriented source backed by a reader thread.
pub struct LineButtonSource {
    rx: Receiver<io::Result<String>>,
    timeout: Duration,
    label: String,
    _handle: Option<JoinHandle<()>>,
}

impl LineButtonSource {
    /// Read lines from any buffered reader.
    pub fn from_reader<R>(reader: R, timeout: Duration, label: impl Into<String>) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let label = label.into();
        let (tx, rx) = unbounded();
        let handle = spawn_line_reader(reader, tx, label.clone());
        Self {
            rx,
            timeout,
            label,
            _handle: Some(handle),
        }
    }

    /// Read lines pushed by some other producer. The source reports
    /// [`InputError::Disconnected`] once every sender is dropped.
    pub fn from_channel(
        rx: Receiver<io::Result<String>>,
        timeout: Duration,
        label: impl Into<String>,
    ) -> Self {
        Self {
            rx,
            timeout,
            label: label.into(),
            _handle: None,
        }
    }

    /// Read lines from a serial device (or any file).
    pub fn open(path: impl AsRef<Path>, timeout: Duration) -> Result<Self, InputError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| InputError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        info!("[input] reading button lines from {:?}", path);
        Ok(Self::from_reader(
            BufReader::new(file),
            timeout,
            path.display().to_string(),
        ))
    }

    /// Read lines from standard input.
    pub fn stdin(timeout: Duration) -> Self {
        info!("[input] reading button lines from stdin");
        Self::from_reader(BufReader::new(io::stdin()), timeout, "stdin")
    }
}

impl ButtonSource for LineButtonSource {
    fn poll(&mut self) -> Result<Option<ButtonFrame>, InputError> {
        let first = match self.rx.recv_timeout(self.timeout) {
            Ok(line) => line,
            Err(RecvTimeoutError::Timeout) => return Ok(None),
            Err(RecvTimeoutError::Disconnected) => return Err(InputError::Disconnected),
        };

        // Only the newest held state matters; drop the backlog.
        let mut latest = None;
        let mut failure = None;
        for line in std::iter::once(first).chain(self.rx.try_iter()) {
            match line.map_err(InputError::Io).and_then(|l| parse_button_line(&l)) {
                Ok(frame) => latest = Some(frame),
                Err(e) => {
                    if let Some(skipped) = failure.replace(e) {
                        warn!("[input] {}: {}", self.label, skipped);
                    }
                }
            }
        }

        match (latest, failure) {
            (Some(frame), failure) => {
                if let Some(e) = failure {
                    warn!("[input] {}: {}", self.label, e);
                }
                Ok(Some(frame))
            }
            (None, Some(e)) => Err(e),
            (None, None) => Ok(None),
        }
    }

    fn describe(&self) -> String {
        format!("lines({})", self.label)
    }
}

/// Key-held state provider.
pub trait KeyboardPort: Send + Sync {
    /// Called once per poll before any key is sampled.
    fn refresh(&mut self) {}

    fn is_key_down(&self, key: char) -> bool;
}

/// Samples five bound keys every frame.
pub struct KeyboardButtonSource<K: KeyboardPort> {
    pub port: K,
    pub bindings: [char; BUTTON_COUNT],
}

impl<K: KeyboardPort> KeyboardButtonSource<K> {
    pub fn new(port: K, bindings: [char; BUTTON_COUNT]) -> Self {
        Self { port, bindings }
    }
}

impl<K: KeyboardPort> ButtonSource for KeyboardButtonSource<K> {
    fn poll(&mut self) -> Result<Option<ButtonFrame>, InputError> {
        self.port.refresh();
        Ok(Some(self.bindings.map(|key| self.port.is_key_down(key))))
    }

    fn describe(&self) -> String {
        format!("keyboard({})", self.bindings.iter().collect::<String>())
    }
}

/// Keyboard port fed by text lines: each line replaces the set of held keys
/// with the characters it contains. An empty line releases everything.
pub struct TypedKeys {
    rx: Receiver<io::Result<String>>,
    held: FxHashSet<char>,
    _handle: JoinHandle<()>,
}

impl TypedKeys {
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = unbounded();
        let handle = spawn_line_reader(reader, tx, "typed keys".to_string());
        Self {
            rx,
            held: FxHashSet::default(),
            _handle: handle,
        }
    }

    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(io::stdin()))
    }
}

impl KeyboardPort for TypedKeys {
    fn refresh(&mut self) {
        if let Some(line) = self.rx.try_iter().filter_map(Result::ok).last() {
            self.held = line.trim().chars().collect();
        }
    }

    fn is_key_down(&self, key: char) -> bool {
        self.held.contains(&key)
    }
}

/// Replays a fixed sequence of frames. `None` entries simulate frames where
/// no data arrived. Once exhausted, every poll returns `Ok(None)`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedButtonSource {
    frames: VecDeque<Option<ButtonFrame>>,
}

impl ScriptedButtonSource {
    pub fn new(frames: impl IntoIterator<Item = ButtonFrame>) -> Self {
        Self {
            frames: frames.into_iter().map(Some).collect(),
        }
    }

    pub fn push(&mut self, frame: ButtonFrame) {
        self.frames.push_back(Some(frame));
    }

    /// Queue a frame without data.
    pub fn push_idle(&mut self) {
        self.frames.push_back(None);
    }

    /// Queue `frames` copies of a held state.
    pub fn hold(&mut self, frame: ButtonFrame, frames: usize) {
        self.frames
            .extend(std::iter::repeat_n(Some(frame), frames));
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl ButtonSource for ScriptedButtonSource {
    fn poll(&mut self) -> Result<Option<ButtonFrame>, InputError> {
        Ok(self.frames.pop_front().flatten())
    }

    fn describe(&self) -> String {
        format!("scripted({} frames left)", self.frames.len())
    }
}

/// Resource owning the active button source.
#[derive(Resource)]
pub struct ButtonInput {
    source: Box<dyn ButtonSource>,
    /// Set once the source reported a disconnect, to log it only once.
    pub disconnected: bool,
}

impl ButtonInput {
    pub fn new(source: impl ButtonSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            disconnected: false,
        }
    }

    pub fn poll(&mut self) -> Result<Option<ButtonFrame>, InputError> {
        self.source.poll()
    }

    pub fn describe(&self) -> String {
        self.source.describe()
    }
}
