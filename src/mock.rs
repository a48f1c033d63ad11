//! Mock device and store for testing.

use crate::channel::Channel;
use crate::controller::GammaDevice;
use crate::error::GammaError;
use crate::store::SettingsStore;

use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

#[derive(Default)]
struct MockState {
    lines: HashMap<Channel, String>,
    pulses: usize,
    fail_writes: bool,
}

/// A mock gamma device for testing.
///
/// Holds per-channel lines in memory and counts apply pulses, so code that
/// depends on [`GammaDevice`] can be tested without the sysfs interface.
///
/// # Example
///
/// ```
/// use kgamma_core::{Channel, EditSession, MockDevice};
///
/// let mock = MockDevice::new();
/// let session = EditSession::open(&mock, Channel::Red).unwrap();
/// assert_eq!(session.state().amp0, 5);
/// ```
pub struct MockDevice {
    state: Mutex<MockState>,
    supported: bool,
}

impl MockDevice {
    /// The line every channel starts with.
    ///
    /// The leading checksum is deliberately stale (the trailing values sum
    /// to 33) so tests catch any code path that carries it over instead of
    /// recomputing.
    pub const DEFAULT_LINE: &'static str = "12 1 2 3 4 5 6 3 4 5";

    /// Create a mock with every channel seeded to [`DEFAULT_LINE`](Self::DEFAULT_LINE).
    pub fn new() -> Self {
        let lines = Channel::ALL
            .iter()
            .map(|&channel| (channel, Self::DEFAULT_LINE.to_owned()))
            .collect();
        Self {
            state: Mutex::new(MockState {
                lines,
                ..Default::default()
            }),
            supported: true,
        }
    }

    /// Create a mock whose support check fails, as on a device without
    /// the kgamma interface.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    /// Overwrite one channel's line without counting a pulse.
    pub fn set_line(&self, channel: Channel, line: &str) {
        self.state
            .lock()
            .unwrap()
            .lines
            .insert(channel, line.to_owned());
    }

    /// Current line of one channel.
    pub fn line(&self, channel: Channel) -> String {
        self.state.lock().unwrap().lines[&channel].clone()
    }

    /// Number of apply pulses seen so far.
    pub fn pulse_count(&self) -> usize {
        self.state.lock().unwrap().pulses
    }

    /// Make subsequent writes fail with a permission error.
    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().unwrap().fail_writes = fail;
    }
}

impl Default for MockDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GammaDevice for MockDevice {
    fn read(&self, channel: Channel) -> Result<String, GammaError> {
        Ok(self.state.lock().unwrap().lines[&channel].clone())
    }

    fn write(&self, channel: Channel, value: &str) -> Result<(), GammaError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_writes {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied).into());
        }
        state.lines.insert(channel, value.to_owned());
        state.pulses += 1;
        Ok(())
    }

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn persist_key(&self, channel: Channel) -> String {
        format!("/mock/kgamma_{}", channel.name())
    }
}

/// In-memory [`SettingsStore`] for tests; `flush` is a no-op.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn put(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }

    fn flush(&self) -> Result<(), GammaError> {
        Ok(())
    }
}
