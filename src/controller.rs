//! Device access and the per-channel edit session.

use crate::channel::{Channel, GammaPaths};
use crate::error::GammaError;
use crate::state::SessionState;
use crate::store::SettingsStore;
use crate::table::{Amp, GammaTable, RESET_AMP};

use log::{debug, info, warn};
use std::fs;

/// Value written to the control file to latch a just-written table.
const APPLY_PULSE: &str = "1";

// =============================================================================
// Gamma Device Trait
// =============================================================================

/// Trait for gamma device implementations.
///
/// This allows for mock implementations in tests.
pub trait GammaDevice: Send + Sync {
    /// Read one channel's current raw gamma line, trimmed of the trailing
    /// newline sysfs appends.
    fn read(&self, channel: Channel) -> Result<String, GammaError>;

    /// Write a raw gamma line to one channel's data file, then pulse the
    /// apply trigger so the driver latches it.
    fn write(&self, channel: Channel, value: &str) -> Result<(), GammaError>;

    /// Whether the full kgamma interface is present.
    fn is_supported(&self) -> bool;

    /// The store key under which this channel's confirmed line persists.
    fn persist_key(&self, channel: Channel) -> String;
}

// =============================================================================
// SysfsDevice
// =============================================================================

/// The sysfs-backed gamma device.
///
/// All I/O is plain blocking `std::fs`; the kernel serializes writers to
/// the same node, and the single-threaded event model of a settings
/// frontend never produces overlapping calls anyway.
#[derive(Debug, Default)]
pub struct SysfsDevice {
    paths: GammaPaths,
}

impl SysfsDevice {
    /// Create a device over the given node set.
    pub fn new(paths: GammaPaths) -> Self {
        Self { paths }
    }

    /// The node set in use.
    pub fn paths(&self) -> &GammaPaths {
        &self.paths
    }
}

impl GammaDevice for SysfsDevice {
    fn read(&self, channel: Channel) -> Result<String, GammaError> {
        let raw = fs::read_to_string(self.paths.data_path(channel))?;
        Ok(raw.trim_end().to_owned())
    }

    fn write(&self, channel: Channel, value: &str) -> Result<(), GammaError> {
        fs::write(self.paths.data_path(channel), value)?;
        fs::write(self.paths.ctrl_path(), APPLY_PULSE)?;
        Ok(())
    }

    fn is_supported(&self) -> bool {
        self.paths.is_supported()
    }

    fn persist_key(&self, channel: Channel) -> String {
        self.paths.data_path(channel).display().to_string()
    }
}

// =============================================================================
// EditSession
// =============================================================================

/// One channel's editing session.
///
/// Created when a tuning dialog opens. Every slider tick goes through
/// [`set_amp`](EditSession::set_amp) as a live-preview write, so the panel
/// shows each intermediate value. The session ends with
/// [`commit`](EditSession::commit) or [`cancel`](EditSession::cancel);
/// dropping it leaves whatever was last written in effect.
///
/// # Example
///
/// ```no_run
/// use kgamma_core::{Amp, Channel, EditSession, JsonStore, SysfsDevice};
///
/// let device = SysfsDevice::default();
/// let mut store = JsonStore::open("/data/misc/display/gamma.json")?;
///
/// let mut session = EditSession::open(&device, Channel::Red)?;
/// session.set_amp(Amp::Amp0, 17)?;
/// session.commit(&mut store)?;
/// # Ok::<(), kgamma_core::GammaError>(())
/// ```
pub struct EditSession<'d, D: GammaDevice> {
    device: &'d D,
    channel: Channel,
    original: String,
    table: GammaTable,
}

impl<'d, D: GammaDevice> EditSession<'d, D> {
    /// Open a session: read the channel once and snapshot the original
    /// line verbatim.
    ///
    /// # Errors
    ///
    /// [`GammaError::MalformedTable`] or [`GammaError::InvalidField`] if
    /// the device line does not hold a full table. The positional layout
    /// is load-bearing, so this is fatal for the session rather than
    /// recoverable.
    pub fn open(device: &'d D, channel: Channel) -> Result<Self, GammaError> {
        let original = device.read(channel)?;
        let table = GammaTable::parse(&original)?;
        debug!(
            "opened {} session: amps={:?}, original={:?}",
            channel.name(),
            table.amps(),
            original
        );
        Ok(Self {
            device,
            channel,
            original,
            table,
        })
    }

    /// The channel this session edits.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Current value of one tunable amplitude.
    pub fn amp(&self, amp: Amp) -> u32 {
        self.table.amp(amp)
    }

    /// Snapshot of the session for frontend binding.
    pub fn state(&self) -> SessionState {
        let (amp0, amp1) = self.table.amps();
        SessionState {
            channel: self.channel,
            amp0,
            amp1,
            original: self.original.clone(),
        }
    }

    /// Handle one slider tick: replace one amplitude and apply it.
    ///
    /// Encodes the full table with a recomputed checksum, writes it to the
    /// data file and pulses the apply trigger. A failed write is returned
    /// to the caller but does not end the session; the in-memory table
    /// only advances once the device accepted the value, so the next tick
    /// encodes from the last applied state.
    pub fn set_amp(&mut self, amp: Amp, value: u32) -> Result<(), GammaError> {
        let mut table = self.table.clone();
        table.set_amp(amp, value);
        let encoded = table.encode();
        self.device.write(self.channel, &encoded)?;
        self.table = table;
        debug!("{}: applied {:?}", self.channel.name(), encoded);
        Ok(())
    }

    /// Zero both amplitudes through the normal apply path.
    ///
    /// This is the dialog's neutral "defaults" action. It writes zeros
    /// rather than the opening snapshot; [`cancel`](EditSession::cancel)
    /// is the path that restores the original.
    pub fn reset(&mut self) -> Result<(), GammaError> {
        self.set_amp(Amp::Amp0, RESET_AMP)?;
        self.set_amp(Amp::Amp1, RESET_AMP)
    }

    /// Confirm the session: persist what the device currently holds.
    ///
    /// The data file is re-read rather than trusting the in-memory
    /// encoding, stored under the channel's path key, and the store is
    /// flushed.
    pub fn commit(self, store: &mut dyn SettingsStore) -> Result<(), GammaError> {
        let confirmed = self.device.read(self.channel)?;
        let key = self.device.persist_key(self.channel);
        info!("confirming {} gamma: {:?}", self.channel.name(), confirmed);
        store.put(&key, &confirmed);
        store.flush()
    }

    /// Abandon the session: rewrite the opening snapshot verbatim,
    /// discarding every edit made since [`open`](EditSession::open).
    pub fn cancel(self) -> Result<(), GammaError> {
        debug!("cancelling {} session", self.channel.name());
        self.device.write(self.channel, &self.original)
    }
}

// =============================================================================
// Restore at startup
// =============================================================================

/// Reapply previously confirmed gamma lines after a restart.
///
/// The driver does not retain written values across reboots, so this runs
/// once at process start. For each channel with a persisted entry the
/// stored line is written back verbatim (no re-parse) and latched;
/// channels without an entry were never configured and are left untouched.
/// Write failures are logged and swallowed so one bad channel does not
/// block the others.
///
/// No-op when the kgamma interface is not present.
pub fn restore(device: &dyn GammaDevice, store: &dyn SettingsStore) {
    if !device.is_supported() {
        debug!("kgamma interface not present, skipping restore");
        return;
    }

    for channel in Channel::ALL {
        let key = device.persist_key(channel);
        let Some(value) = store.get(&key) else {
            continue;
        };
        info!("restoring {} gamma: {:?}", channel.name(), value);
        if let Err(err) = device.write(channel, value) {
            warn!("failed to restore {} gamma: {}", channel.name(), err);
        }
    }
}
